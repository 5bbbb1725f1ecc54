pub mod config;
pub mod feeds;
pub mod logging;
pub mod notifiers;
pub mod prices;
