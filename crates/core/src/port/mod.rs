// Port Layer - Interfaces for external collaborators
//
// The realtime data store, clock and id generation are all reached through
// these traits so the core stays deterministic and testable.

pub mod application_reader;
pub mod id_provider;
pub mod job_board;
pub mod mocks;
pub mod notification_sink;
pub mod time_provider;

// Re-exports
pub use application_reader::ApplicationReader;
pub use id_provider::IdProvider;
pub use job_board::{JobFeed, JobWriter};
pub use notification_sink::NotificationSink;
pub use time_provider::TimeProvider;
