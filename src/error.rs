//! Error types.
//!
//! Every failure in the core is returned as a value. Nothing here is fatal
//! to the process; callers decide what to surface to an end user.

use std::fmt;

use thiserror::Error;

/// Alias derivation failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AliasError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
}

/// Why a single field failed validation.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationReason {
    #[error("is required")]
    Required,
    #[error("expected {expected}, got {found}")]
    WrongType {
        expected: &'static str,
        found: &'static str,
    },
    #[error("is not an absolute URL: {0}")]
    InvalidUrl(String),
    #[error("must not be negative (got {0})")]
    Negative(f64),
    #[error("must be a finite number")]
    NotFinite,
    #[error("must be an integer (got {0})")]
    NotAnInteger(f64),
    #[error("must be between {min} and {max} (got {value})")]
    OutOfRange { min: f64, max: f64, value: f64 },
    #[error("is not a valid date-time: {0}")]
    InvalidTimestamp(String),
    #[error("must look like \"<lat>, <lng>\" with finite coordinates")]
    InvalidLocation,
    #[error("must be 64 lowercase hex characters")]
    InvalidHash,
    #[error("must be at least {min} characters (got {actual})")]
    TooShort { min: usize, actual: usize },
    #[error("is not a valid email address")]
    InvalidEmail,
    #[error("must be a JSON object")]
    NotAnObject,
}

/// One failed check, tagged with the field it refers to.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: &'static str,
    pub reason: ValidationReason,
}

impl ValidationError {
    pub fn new(field: &'static str, reason: ValidationReason) -> Self {
        Self { field, reason }
    }
}

/// The complete, non-empty list of problems found in a candidate report.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ValidationErrors(Vec<ValidationError>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: &'static str, reason: ValidationReason) {
        self.0.push(ValidationError::new(field, reason));
    }

    pub fn extend(&mut self, other: ValidationErrors) {
        self.0.extend(other.0);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn errors(&self) -> &[ValidationError] {
        &self.0
    }

    pub fn into_errors(self) -> Vec<ValidationError> {
        self.0
    }

    /// Whether any error refers to `field`.
    pub fn has_field(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }

    /// Distinct field names in the order they were first reported.
    pub fn fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        for e in &self.0 {
            if !fields.contains(&e.field) {
                fields.push(e.field);
            }
        }
        fields
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<String> = self.0.iter().map(|e| e.to_string()).collect();
        write!(f, "invalid report: {}", messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl IntoIterator for ValidationErrors {
    type Item = ValidationError;
    type IntoIter = std::vec::IntoIter<ValidationError>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Photo or report store failure.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("rejected by storage: {0}")]
    Rejected(String),
}

/// Photo analysis failure.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("model returned no output")]
    EmptyOutput,
    #[error("malformed model output: {0}")]
    MalformedOutput(#[from] serde_json::Error),
    #[error("model invocation failed: {0}")]
    Invocation(String),
}

/// Photo payload could not be turned into bytes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PhotoError {
    #[error("not a base64 data URI")]
    NotADataUri,
    #[error("invalid base64 payload: {0}")]
    InvalidBase64(String),
    #[error("photo payload is empty")]
    Empty,
}

/// Failure of one submission step. Earlier steps are not rolled back.
#[derive(Debug, Error)]
pub enum SubmissionError {
    #[error("user not authenticated")]
    NotAuthenticated,
    #[error("the photo was not recognised as a pothole")]
    NotAPothole,
    #[error("invalid photo: {0}")]
    InvalidPhoto(#[from] PhotoError),
    #[error("failed to upload photo: {0}")]
    Upload(StoreError),
    #[error(transparent)]
    Invalid(#[from] ValidationErrors),
    #[error("failed to save report to database: {0}")]
    Persist(StoreError),
    #[error("could not fetch reports: {0}")]
    Fetch(StoreError),
    #[error("failed to analyze photo: {0}")]
    Analysis(#[from] AnalysisError),
}

/// Configuration value could not be used.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {reason}")]
    InvalidValue { key: &'static str, reason: String },
}
