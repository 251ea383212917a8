pub mod client;
pub mod error;
pub mod types;

pub use client::{Notifier, WebhookClient};
pub use error::DeliveryError;
pub use types::NotificationPayload;
