//! Photo and report stores.
//!
//! The blob store and the document database are external collaborators;
//! these traits are the seam the submission pipeline talks to. The in-memory
//! implementations back the CLI and the tests.

use std::collections::HashMap;

use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use uuid::Uuid;

use crate::config::CoreConfig;
use crate::error::StoreError;
use crate::storage::models::{AcceptedReport, Report};

lazy_static! {
    static ref AVATAR_ID_PATTERN: Regex = Regex::new(r"^[A-Za-z0-9_.-]{1,128}$").unwrap();
}

/// Storage key for a report photo: `<prefix>/<hash>.jpg`.
///
/// Identical photos hash to the same key and overwrite the same object.
pub fn photo_key(prefix: &str, photo_hash: &str) -> String {
    format!("{}/{}.jpg", prefix.trim_end_matches('/'), photo_hash)
}

/// Storage key for a profile picture: `<prefix>/<user_id>.jpg`.
///
/// The id must be a single path segment: ASCII letters, digits, `-`, `_`
/// and `.`, with no `..`.
pub fn avatar_key(prefix: &str, user_id: &str) -> Result<String, StoreError> {
    if !AVATAR_ID_PATTERN.is_match(user_id) || user_id.contains("..") {
        return Err(StoreError::Rejected(format!(
            "user id is not a valid object name: {:?}",
            user_id
        )));
    }
    Ok(format!("{}/{}.jpg", prefix.trim_end_matches('/'), user_id))
}

/// Content-addressed blob storage.
pub trait PhotoStore {
    /// Store `bytes` under `key` and return the public download URL.
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError>;
}

/// Report document storage.
pub trait ReportStore {
    /// Persist a validated report and return it with its assigned id.
    fn insert(&self, report: AcceptedReport) -> Result<Report, StoreError>;

    /// All stored reports in insertion order.
    fn list(&self) -> Result<Vec<Report>, StoreError>;
}

#[derive(Debug, Clone)]
struct StoredObject {
    bytes: Vec<u8>,
    content_type: String,
}

/// In-memory photo store serving URLs under a fixed base.
#[derive(Debug)]
pub struct MemoryPhotoStore {
    base_url: String,
    objects: RwLock<HashMap<String, StoredObject>>,
}

impl MemoryPhotoStore {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            objects: RwLock::new(HashMap::new()),
        }
    }

    /// Serve URLs under the configured public base URL.
    pub fn from_config(config: &CoreConfig) -> Self {
        Self::new(&config.public_base_url)
    }

    pub fn object_count(&self) -> usize {
        self.objects.read().len()
    }

    pub fn get(&self, key: &str) -> Option<Vec<u8>> {
        self.objects.read().get(key).map(|o| o.bytes.clone())
    }

    pub fn content_type(&self, key: &str) -> Option<String> {
        self.objects.read().get(key).map(|o| o.content_type.clone())
    }
}

impl PhotoStore for MemoryPhotoStore {
    fn put(&self, key: &str, bytes: &[u8], content_type: &str) -> Result<String, StoreError> {
        if key.is_empty() {
            return Err(StoreError::Rejected("empty object key".to_string()));
        }

        let replaced = self.objects.write().insert(
            key.to_string(),
            StoredObject {
                bytes: bytes.to_vec(),
                content_type: content_type.to_string(),
            },
        );

        log::debug!(
            "PHOTO_STORED key={} bytes={} overwrite={}",
            key,
            bytes.len(),
            replaced.is_some()
        );

        Ok(format!("{}/{}", self.base_url, key))
    }
}

/// In-memory report collection. Ids are random UUIDs.
#[derive(Debug, Default)]
pub struct MemoryReportStore {
    reports: RwLock<Vec<Report>>,
}

impl MemoryReportStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with already-persisted reports.
    pub fn with_reports(reports: Vec<Report>) -> Self {
        Self {
            reports: RwLock::new(reports),
        }
    }

    pub fn len(&self) -> usize {
        self.reports.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.reports.read().is_empty()
    }
}

impl ReportStore for MemoryReportStore {
    fn insert(&self, report: AcceptedReport) -> Result<Report, StoreError> {
        let stored = Report::new(Uuid::new_v4().simple().to_string(), report);
        self.reports.write().push(stored.clone());
        Ok(stored)
    }

    fn list(&self) -> Result<Vec<Report>, StoreError> {
        Ok(self.reports.read().clone())
    }
}
