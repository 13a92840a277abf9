//! User-submitted issue reports (bugs, suggestions, other feedback).
//!
//! Same contract as report validation: every problem is collected and a
//! failing record is never returned in part.

use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{ValidationErrors, ValidationReason};
use crate::validation::fields::{json_type_name, names, optional_string_field, string_field};
use crate::validation::report::merge_type_errors;
use crate::validation::rules::is_blank;

/// Shortest description accepted, in characters.
pub const MIN_DESCRIPTION_CHARS: usize = 10;

lazy_static! {
    /// local@domain.tld, no whitespace
    static ref EMAIL_PATTERN: Regex =
        Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap();
}

/// What kind of feedback an issue carries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IssueKind {
    Bug,
    Suggestion,
    Other,
}

impl IssueKind {
    /// Known kinds are matched case-insensitively; anything else is `Other`.
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "bug" => Self::Bug,
            "suggestion" => Self::Suggestion,
            _ => Self::Other,
        }
    }
}

/// An issue as sent from the feedback form.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct IssueReport {
    pub issue_type: String,
    pub description: String,
    pub user_email: Option<String>,
    pub user_id: Option<String>,
    pub page: Option<String>,
}

impl IssueReport {
    pub fn kind(&self) -> IssueKind {
        IssueKind::parse(&self.issue_type)
    }
}

pub fn is_valid_email(value: &str) -> bool {
    EMAIL_PATTERN.is_match(value.trim())
}

/// Validate an issue. Blank optional fields are normalized to `None`.
pub fn validate_issue(issue: &IssueReport) -> Result<IssueReport, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    if is_blank(&issue.issue_type) {
        errors.push(names::ISSUE_TYPE, ValidationReason::Required);
    }

    let description_chars = issue.description.trim().chars().count();
    if description_chars == 0 {
        errors.push(names::DESCRIPTION, ValidationReason::Required);
    } else if description_chars < MIN_DESCRIPTION_CHARS {
        errors.push(
            names::DESCRIPTION,
            ValidationReason::TooShort {
                min: MIN_DESCRIPTION_CHARS,
                actual: description_chars,
            },
        );
    }

    let user_email = non_blank(&issue.user_email);
    if let Some(email) = &user_email {
        if !is_valid_email(email) {
            errors.push(names::USER_EMAIL, ValidationReason::InvalidEmail);
        }
    }

    if !errors.is_empty() {
        log::debug!("ISSUE_REJECTED fields={:?}", errors.fields());
        return Err(errors);
    }

    Ok(IssueReport {
        issue_type: issue.issue_type.trim().to_string(),
        description: issue.description.clone(),
        user_email,
        user_id: non_blank(&issue.user_id),
        page: non_blank(&issue.page),
    })
}

/// Validate an issue given as arbitrary JSON.
pub fn validate_issue_value(value: &Value) -> Result<IssueReport, ValidationErrors> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            let mut errors = ValidationErrors::new();
            errors.push(names::ISSUE, ValidationReason::NotAnObject);
            log::debug!("ISSUE_REJECTED shape={}", json_type_name(value));
            return Err(errors);
        }
    };

    let mut type_errors = ValidationErrors::new();
    let issue = IssueReport {
        issue_type: string_field(obj, names::ISSUE_TYPE, &mut type_errors),
        description: string_field(obj, names::DESCRIPTION, &mut type_errors),
        user_email: optional_string_field(obj, names::USER_EMAIL, &mut type_errors),
        user_id: optional_string_field(obj, names::USER_ID, &mut type_errors),
        page: optional_string_field(obj, names::PAGE, &mut type_errors),
    };

    match validate_issue(&issue) {
        Ok(issue) if type_errors.is_empty() => Ok(issue),
        Ok(_) => Err(type_errors),
        Err(errors) => Err(merge_type_errors(type_errors, errors)),
    }
}

fn non_blank(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
