pub mod notifier;
pub mod price_provider;
pub mod progress;
pub mod trade_feed;
