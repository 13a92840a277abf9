//! Structured logging for report handling.
//!
//! Each line starts with a `LogContext`: the unit of work (`sub-1a2b3c4d`
//! for a submission, `avatar` or `reports` for the other store calls) and,
//! when a user is acting, their display alias. The raw user id is never
//! logged, so log lines can be shared without exposing who filed a report.
//!
//! ```text
//! [scope=sub-1a2b3c4d] [user=BraveOtter-3fa91c] REPORT_SUBMITTED report_id="..." score=64
//! ```

use std::fmt;

use crate::identity::session::Identity;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogContext {
    pub scope: String,
    pub alias: Option<String>,
}

impl LogContext {
    pub fn new(scope: &str) -> Self {
        Self {
            scope: scope.to_string(),
            alias: None,
        }
    }

    pub fn with_alias(&self, alias: &str) -> Self {
        Self {
            scope: self.scope.clone(),
            alias: Some(alias.to_string()),
        }
    }

    /// Context for work done on behalf of `identity`. An identity without a
    /// usable id logs without a user tag.
    pub fn for_identity(scope: &str, identity: &Identity) -> Self {
        let ctx = Self::new(scope);
        match identity.alias() {
            Ok(alias) => ctx.with_alias(&alias),
            Err(_) => ctx,
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.alias {
            Some(alias) => write!(f, "[scope={}] [user={}]", self.scope, alias),
            None => write!(f, "[scope={}]", self.scope),
        }
    }
}

/// `ctx EVENT key=value ...` at info level.
#[macro_export]
macro_rules! log_info {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::info!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[macro_export]
macro_rules! log_warn {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::warn!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[macro_export]
macro_rules! log_error {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::error!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}

#[macro_export]
macro_rules! log_debug {
    ($ctx:expr, $event:expr, $($key:ident = $value:expr),* $(,)?) => {
        log::debug!(
            "{} {} {}",
            $ctx,
            $event,
            format_args!(concat!($(stringify!($key), "={:?} "),*), $($value),*)
        );
    };
}
