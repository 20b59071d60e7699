// Domain Layer - Job marketplace entities

pub mod application;
pub mod error;
pub mod job;
pub mod notification;

pub use application::{Application, ApplicationStatus};
pub use error::DomainError;
pub use job::{
    BusinessId, BusinessPrivacy, Coordinates, Job, JobClosure, JobId, JobStatus, Location,
};
pub use notification::{Notification, NotificationKind};
