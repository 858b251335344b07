//! Session tracking and history analytics: wellness score, cluster
//! distribution, per-raga feedback and stress/energy trends.

pub mod report;
pub mod session;

pub use report::{validate_history, AnalyticsReport};
pub use session::SessionTracker;
