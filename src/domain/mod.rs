//! Domain layer - Core business logic
//!
//! Contains value objects, entities, and domain errors.
//! This layer has no dependencies on external systems.

pub mod config;
pub mod error;
pub mod interval;
pub mod notification;
pub mod provider;

// Re-export common types
pub use config::AppConfig;
pub use error::*;
pub use interval::Interval;
pub use notification::{AppFilter, Notification, NotificationId, OutboundMessage, SeenSet};
pub use provider::{ProviderKind, SourceKind};
