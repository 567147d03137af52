//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces:
//! notification stores, push backends and the config file.

pub mod config;
pub mod providers;
pub mod source;

// Re-export adapters
pub use config::XdgConfigStore;
pub use providers::{build_providers, FcmProvider, NtfyProvider, ProviderSet, PushbulletProvider};
pub use source::{create_source, DunstHistorySource, SnapshotFileSource};
