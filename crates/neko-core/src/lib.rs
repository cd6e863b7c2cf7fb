//! neko-core: Headless logic for the neko chat mockup
//!
//! This crate holds everything that is not drawing:
//! - Message model and the seeded conversation
//! - The conversation store (append-only messages plus input draft)
//! - Reply timers that simulate the assistant answering
//! - Configuration

pub mod clock;
pub mod config;
pub mod draft;
pub mod message;
pub mod scheduler;
pub mod seed;
pub mod store;

// Re-export commonly used types
pub use clock::{format_timestamp, Clock, FixedClock, SystemClock};
pub use config::{ChatConfig, ConfigError, ThemeChoice};
pub use draft::Draft;
pub use message::{Message, Role};
pub use scheduler::{ReplyScheduler, DEFAULT_REPLY_DELAY};
pub use seed::ChatSession;
pub use store::{ConversationPhase, ConversationStore, ReplyTicket};

/// Returns the core version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_core_version() {
        let version = core_version();
        assert!(!version.is_empty());
        assert!(version.starts_with("0."));
    }
}
