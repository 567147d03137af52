//! notify-forwarder - relay desktop notifications to push services
//!
//! Polls the desktop notification store, drops what was already seen or is
//! filtered by source application, and dispatches the rest to FCM,
//! Pushbullet and ntfy. A failing provider never blocks the others.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Notifications, the seen set, app filter, config and errors
//! - **Application**: Observer, dispatcher, forwarding use case and port traits
//! - **Infrastructure**: Notification sources, push providers, config store
//! - **CLI**: Argument parsing, presenter, signal handling and command runners

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
