//! Report submission pipeline.
//!
//! Coordinates the submission workflow:
//! 1. Reject photos the model did not recognise as potholes
//! 2. Decode the photo and compute its SHA-256 content hash
//! 3. Upload the photo under its content-addressed key
//! 4. Compute the alias and validate the report
//! 5. Persist the report
//!
//! Steps run sequentially with no retries. A failure after step 3 leaves
//! the uploaded photo in place; it is logged as `PHOTO_ORPHANED`.

use chrono::{DateTime, SecondsFormat, Utc};

use crate::analysis::output::PotholeAnalysis;
use crate::analysis::prompt::PhotoAnalyzer;
use crate::config::CoreConfig;
use crate::error::SubmissionError;
use crate::identity::session::Identity;
use crate::leaderboard::aggregate::{aggregate, LeaderboardEntry};
use crate::storage::models::{Coordinates, RawReport, Report};
use crate::storage::store::{avatar_key, photo_key, PhotoStore, ReportStore};
use crate::validation::photo::{compute_photo_hash, decode_data_uri};
use crate::validation::report::validate;
use crate::validation::rules::check_timestamp;
use crate::logging::structured::LogContext;
use crate::{log_debug, log_error, log_info, log_warn};

use super::context::SubmissionContext;

/// What the client sends when confirming a report.
#[derive(Debug, Clone, PartialEq)]
pub struct SubmissionRequest {
    pub timestamp: String,
    pub location: String,
    pub ai_summary: String,
    pub approx_dimensions: String,
    pub surface_area: f64,
    pub approx_volume: f64,
    pub score: f64,
    pub is_pothole: bool,
    pub model_version: String,
    pub photo_data_uri: String,
}

impl SubmissionRequest {
    /// Build a request from a model analysis and the device position.
    pub fn from_analysis(
        analysis: PotholeAnalysis,
        coordinates: Coordinates,
        timestamp: DateTime<Utc>,
        photo_data_uri: String,
    ) -> Self {
        Self {
            timestamp: timestamp.to_rfc3339_opts(SecondsFormat::Millis, true),
            location: coordinates.to_location_string(),
            ai_summary: analysis.ai_summary,
            approx_dimensions: analysis.approx_dimensions,
            surface_area: analysis.surface_area,
            approx_volume: analysis.approx_volume,
            score: analysis.score,
            is_pothole: analysis.is_pothole,
            model_version: analysis.model_version,
            photo_data_uri,
        }
    }
}

/// Runs submissions against a photo store and a report store.
pub struct Submitter<P, R> {
    config: CoreConfig,
    photos: P,
    reports: R,
}

impl<P: PhotoStore, R: ReportStore> Submitter<P, R> {
    pub fn new(config: CoreConfig, photos: P, reports: R) -> Self {
        Self {
            config,
            photos,
            reports,
        }
    }

    pub fn config(&self) -> &CoreConfig {
        &self.config
    }

    pub fn photos(&self) -> &P {
        &self.photos
    }

    pub fn reports(&self) -> &R {
        &self.reports
    }

    /// Run the model over a photo. Analyses without a model version are
    /// stamped with the configured model name.
    pub fn analyze<A>(
        &self,
        ctx: &SubmissionContext,
        analyzer: &A,
        photo_data_uri: &str,
    ) -> Result<PotholeAnalysis, SubmissionError>
    where
        A: PhotoAnalyzer + ?Sized,
    {
        let log_ctx = ctx.log_context();
        log::debug!("{} ANALYSIS_START", log_ctx);

        match analyzer.analyze(photo_data_uri) {
            Ok(mut analysis) => {
                if analysis.model_version.trim().is_empty() {
                    analysis.model_version = self.config.model_name.clone();
                }
                log_info!(
                    log_ctx,
                    "ANALYSIS_COMPLETE",
                    is_pothole = analysis.is_pothole,
                    score = analysis.score,
                    model = analysis.model_version,
                );
                Ok(analysis)
            }
            Err(e) => {
                log::warn!("{} ANALYSIS_FAILED error={}", log_ctx, e);
                Err(e.into())
            }
        }
    }

    /// Submit a report on behalf of the context's identity.
    pub fn submit(
        &self,
        ctx: &SubmissionContext,
        request: SubmissionRequest,
    ) -> Result<Report, SubmissionError> {
        let log_ctx = ctx.log_context();

        if ctx.identity.user_id.trim().is_empty() {
            log::warn!("{} SUBMISSION_REJECTED reason=not_authenticated", log_ctx);
            return Err(SubmissionError::NotAuthenticated);
        }

        if !request.is_pothole {
            log::warn!("{} SUBMISSION_REJECTED reason=not_a_pothole", log_ctx);
            return Err(SubmissionError::NotAPothole);
        }

        // [1] CONTENT HASH
        let photo = decode_data_uri(&request.photo_data_uri).map_err(|e| {
            log::warn!("{} PHOTO_DECODE_FAILED error={}", log_ctx, e);
            e
        })?;
        let photo_hash = compute_photo_hash(&photo.bytes);

        log_debug!(log_ctx, "PHOTO_HASHED", hash = photo_hash, bytes = photo.bytes.len());

        // [2] UPLOAD
        let key = photo_key(&self.config.photo_prefix, &photo_hash);
        let photo_url = self
            .photos
            .put(&key, &photo.bytes, &self.config.photo_content_type)
            .map_err(|e| {
                log::warn!("{} PHOTO_UPLOAD_FAILED key={} error={}", log_ctx, key, e);
                SubmissionError::Upload(e)
            })?;

        // [3] ALIAS + VALIDATION
        let candidate = RawReport {
            user_id: ctx.identity.user_id.clone(),
            timestamp: request.timestamp,
            location: request.location,
            ai_summary: request.ai_summary,
            approx_dimensions: request.approx_dimensions,
            surface_area: Some(request.surface_area),
            approx_volume: Some(request.approx_volume),
            score: Some(request.score),
            is_pothole: request.is_pothole,
            photo_url,
            photo_hash,
            model_version: request.model_version,
        };

        let accepted = validate(&candidate).map_err(|errors| {
            log_warn!(log_ctx, "REPORT_INVALID", fields = errors.fields());
            log_warn!(log_ctx, "PHOTO_ORPHANED", key = key);
            SubmissionError::from(errors)
        })?;

        // [4] PERSIST
        let report = self.reports.insert(accepted).map_err(|e| {
            log::warn!("{} REPORT_PERSIST_FAILED error={}", log_ctx, e);
            log_warn!(log_ctx, "PHOTO_ORPHANED", key = key);
            SubmissionError::Persist(e)
        })?;

        log_info!(
            log_ctx,
            "REPORT_SUBMITTED",
            report_id = report.id,
            score = report.body.score,
            location = report.body.location,
        );

        Ok(report)
    }

    /// All reports, newest first. Unparseable timestamps sort last.
    pub fn list_reports(&self) -> Result<Vec<Report>, SubmissionError> {
        let mut reports = self.reports.list().map_err(|e| {
            log_error!(LogContext::new("reports"), "REPORTS_FETCH_FAILED", error = e.to_string());
            SubmissionError::Fetch(e)
        })?;

        reports.sort_by_cached_key(|r| std::cmp::Reverse(check_timestamp(&r.body.timestamp).ok()));
        Ok(reports)
    }

    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, SubmissionError> {
        Ok(aggregate(&self.list_reports()?))
    }

    /// Upload a profile picture and return its URL.
    pub fn update_profile_photo(
        &self,
        identity: &Identity,
        photo_data_uri: &str,
    ) -> Result<String, SubmissionError> {
        if identity.user_id.trim().is_empty() {
            return Err(SubmissionError::NotAuthenticated);
        }
        let log_ctx = LogContext::for_identity("avatar", identity);

        let key = avatar_key(&self.config.avatar_prefix, &identity.user_id).map_err(|e| {
            log_warn!(log_ctx, "AVATAR_KEY_REJECTED", error = e.to_string());
            SubmissionError::Upload(e)
        })?;
        let photo = decode_data_uri(photo_data_uri)?;

        self.photos
            .put(&key, &photo.bytes, &self.config.photo_content_type)
            .map_err(|e| {
                log_warn!(log_ctx, "AVATAR_UPLOAD_FAILED", key = key, error = e.to_string());
                SubmissionError::Upload(e)
            })
    }
}
