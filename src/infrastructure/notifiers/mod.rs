//! Alert delivery adapters implementing the `Notifier` port.

pub mod log;
pub mod webhook;

pub use log::LogNotifier;
pub use webhook::WebhookNotifier;
