#![warn(clippy::pedantic)]

pub mod buffer;
pub mod config;
pub mod error;
pub mod parser;
pub mod source;
pub mod streaming;

mod grammar;

pub use buffer::ReadBuffer;
pub use config::ParserConfig;
pub use error::{ConfigError, DecodeError};
pub use parser::{Commands, Parser};
pub use source::ByteSource;
pub use streaming::{CommandStream, spawn_command_stream};
