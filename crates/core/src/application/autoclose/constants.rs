// Auto-close constants (no magic values)
use std::time::Duration;

/// How long before the shift start a still-open job is closed (30 minutes)
pub const CLOSE_LEAD_TIME_MS: i64 = 30 * 60 * 1000;

/// Default evaluation cycle period (5 minutes)
pub const DEFAULT_POLL_PERIOD: Duration = Duration::from_secs(5 * 60);

/// Closure reason recorded on auto-closed job records
pub const AUTO_CLOSE_REASON: &str = "shift_start_imminent";
