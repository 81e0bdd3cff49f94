#![warn(clippy::pedantic)]

pub mod error;
pub mod marker;
pub mod number;

pub use error::WireError;
pub use marker::Marker;
