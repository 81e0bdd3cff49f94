#![warn(clippy::pedantic)]

pub mod command;
pub mod kind;

pub use command::Command;
pub use kind::CommandKind;
