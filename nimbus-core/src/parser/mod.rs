//! Streaming weather payload parser
//!
//! Walks the weather-service response once, byte by byte, and pulls out the
//! condition token and the `dt`/`sunrise`/`sunset` timestamps. Nothing but
//! the current token and three integers is ever buffered.

pub mod field_parser;
pub mod key;
pub mod state;

pub use field_parser::{ParseContext, StreamingFieldParser, TOKEN_CAPACITY};
pub use state::{Field, ParseError, ParseOutcome, ParserState};
