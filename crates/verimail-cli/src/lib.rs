//! Library components of the `verimail` terminal client.

pub mod browse;
pub mod commands;
pub mod logging;
pub mod progress;
pub mod settings;
pub mod summary;
