//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod provider;
pub mod source;

// Re-export common types
pub use config::ConfigStore;
pub use provider::{DeliveryError, PushProvider};
pub use source::{NotificationSource, SourceError, SourceStatus};
