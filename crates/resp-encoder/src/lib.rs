#![warn(clippy::pedantic)]

pub mod encoder;
pub mod error;
pub mod frame_writer;

pub use encoder::CommandEncoder;
pub use error::EncodeError;
pub use frame_writer::write_multi_bulk;
