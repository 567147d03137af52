//! Application layer - Use cases and port interfaces
//!
//! Contains the forwarding loop pieces (observer, dispatcher) and the
//! trait definitions for external system interactions.

pub mod dispatcher;
pub mod forward;
pub mod observer;
pub mod ports;

// Re-export use cases
pub use dispatcher::{DispatchReport, Dispatcher, ProviderOutcome};
pub use forward::{CycleReport, Delivery, ForwardUseCase};
pub use observer::Observer;
