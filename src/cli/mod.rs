pub mod commands;
pub mod progress;
