//! Day/night evaluation from the feed's timestamps
//!
//! All three values share one time base (unix seconds for the weather
//! service); the evaluator never looks at wall-clock time itself.

/// Errors from inconsistent timing fields
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum TimingError {
    /// A field was never captured
    Unset,
    /// Sunrise is not strictly before sunset
    NonMonotonic,
}

/// Position of "now" within the solar day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Daylight {
    Day,
    /// Within the golden window after sunrise or before sunset
    GoldenHour,
    Night,
}

/// Timing fields captured from one payload
///
/// `None` marks a field the parser has not reached yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct SolarTimes {
    pub dt: Option<u32>,
    pub sunrise: Option<u32>,
    pub sunset: Option<u32>,
}

impl SolarTimes {
    /// Create a fully populated set of times
    pub fn new(dt: u32, sunrise: u32, sunset: u32) -> Self {
        Self {
            dt: Some(dt),
            sunrise: Some(sunrise),
            sunset: Some(sunset),
        }
    }

    /// Check whether all three fields have been captured
    pub fn is_complete(&self) -> bool {
        self.dt.is_some() && self.sunrise.is_some() && self.sunset.is_some()
    }

    /// Evaluate night for these times
    pub fn is_night(&self) -> Result<bool, TimingError> {
        let (dt, sunrise, sunset) = self.values()?;
        is_night(dt, sunrise, sunset)
    }

    fn values(&self) -> Result<(u32, u32, u32), TimingError> {
        match (self.dt, self.sunrise, self.sunset) {
            (Some(dt), Some(sunrise), Some(sunset)) => Ok((dt, sunrise, sunset)),
            _ => Err(TimingError::Unset),
        }
    }
}

/// Night holds when `dt < sunrise` or `dt >= sunset`
pub fn is_night(dt: u32, sunrise: u32, sunset: u32) -> Result<bool, TimingError> {
    if sunrise >= sunset {
        return Err(TimingError::NonMonotonic);
    }
    Ok(dt < sunrise || dt >= sunset)
}

/// Classify `times` into day, golden hour or night
///
/// `golden_window_s` of 0 disables the golden hour.
pub fn daylight(times: &SolarTimes, golden_window_s: u32) -> Result<Daylight, TimingError> {
    let (dt, sunrise, sunset) = times.values()?;

    if is_night(dt, sunrise, sunset)? {
        return Ok(Daylight::Night);
    }

    // dt is inside [sunrise, sunset) here
    let since_sunrise = dt - sunrise;
    let until_sunset = sunset - dt;
    if golden_window_s > 0 && (since_sunrise < golden_window_s || until_sunset <= golden_window_s) {
        return Ok(Daylight::GoldenHour);
    }

    Ok(Daylight::Day)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_between_sunrise_and_sunset() {
        assert_eq!(is_night(100, 50, 200), Ok(false));
    }

    #[test]
    fn test_night_boundaries() {
        assert_eq!(is_night(49, 50, 200), Ok(true));
        assert_eq!(is_night(50, 50, 200), Ok(false)); // sunrise is day
        assert_eq!(is_night(199, 50, 200), Ok(false));
        assert_eq!(is_night(200, 50, 200), Ok(true)); // sunset is night
        assert_eq!(is_night(300, 50, 200), Ok(true));
    }

    #[test]
    fn test_non_monotonic_rejected() {
        assert_eq!(is_night(100, 200, 50), Err(TimingError::NonMonotonic));
        assert_eq!(is_night(100, 80, 80), Err(TimingError::NonMonotonic));
    }

    #[test]
    fn test_unset_rejected() {
        let times = SolarTimes {
            dt: Some(100),
            sunrise: Some(50),
            sunset: None,
        };
        assert!(!times.is_complete());
        assert_eq!(times.is_night(), Err(TimingError::Unset));
        assert_eq!(daylight(&times, 0), Err(TimingError::Unset));
    }

    #[test]
    fn test_golden_window() {
        // sunrise 1000, sunset 5000, 600 s window
        assert_eq!(daylight(&SolarTimes::new(1200, 1000, 5000), 600), Ok(Daylight::GoldenHour));
        assert_eq!(daylight(&SolarTimes::new(3000, 1000, 5000), 600), Ok(Daylight::Day));
        assert_eq!(daylight(&SolarTimes::new(4500, 1000, 5000), 600), Ok(Daylight::GoldenHour));
        assert_eq!(daylight(&SolarTimes::new(5000, 1000, 5000), 600), Ok(Daylight::Night));
    }

    #[test]
    fn test_golden_window_disabled() {
        assert_eq!(daylight(&SolarTimes::new(1001, 1000, 5000), 0), Ok(Daylight::Day));
    }
}
