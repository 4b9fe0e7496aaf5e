//! Provider-specific statement parsers.

pub mod wise;
