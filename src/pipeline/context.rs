//! Submission context.
//!
//! Carries the acting identity and a short submission id for log
//! correlation.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::identity::session::Identity;
use crate::logging::structured::LogContext;

/// Context for one submission.
#[derive(Debug, Clone)]
pub struct SubmissionContext {
    pub submission_id: String,
    pub identity: Identity,
    pub received_at: DateTime<Utc>,
}

impl SubmissionContext {
    pub fn new(identity: Identity) -> Self {
        let submission_id = format!("sub-{}", &Uuid::new_v4().simple().to_string()[..8]);

        Self {
            submission_id,
            identity,
            received_at: Utc::now(),
        }
    }

    /// Log context tagged with the reporter's alias, never the raw user id.
    pub fn log_context(&self) -> LogContext {
        LogContext::for_identity(&self.submission_id, &self.identity)
    }
}
