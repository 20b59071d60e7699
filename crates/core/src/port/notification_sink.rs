// Notification Sink Port

use crate::domain::Notification;
use crate::error::Result;
use async_trait::async_trait;

/// Creates new stored notification records
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn insert(&self, notification: &Notification) -> Result<()>;
}
