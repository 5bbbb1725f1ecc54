//! Trade disclosure feeds implementing the `TradeFeed` port.

pub mod quiver;

pub use quiver::QuiverFeed;
