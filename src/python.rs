//! Python bindings.
//!
//! Exposes the core operations to a Python host as the `bache_core`
//! extension module. Reports cross the boundary as JSON strings in the
//! stored camelCase layout.

use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList};

use crate::export::csv::reports_to_csv;
use crate::identity::alias::generate_alias as derive_alias;
use crate::init_logger;
use crate::leaderboard::aggregate::aggregate;
use crate::storage::models::Report;
use crate::validation::photo::compute_photo_hash;
use crate::validation::report::validate_value;

fn value_error(e: impl std::fmt::Display) -> PyErr {
    PyValueError::new_err(e.to_string())
}

fn parse_reports(reports_json: &str) -> PyResult<Vec<Report>> {
    serde_json::from_str(reports_json).map_err(value_error)
}

/// Derive the display alias for a user id.
#[pyfunction]
fn generate_alias(user_id: &str) -> PyResult<String> {
    derive_alias(user_id).map_err(value_error)
}

/// Validate a candidate report.
///
/// # Returns
/// `{"accepted": True, "report": <json>}` or
/// `{"accepted": False, "errors": [{"field": ..., "reason": ...}, ...]}`
#[pyfunction]
fn validate_report(py: Python<'_>, report_json: &str) -> PyResult<Py<PyAny>> {
    init_logger();

    let value: serde_json::Value = serde_json::from_str(report_json).map_err(value_error)?;
    let result = PyDict::new(py);

    match validate_value(&value) {
        Ok(report) => {
            result.set_item("accepted", true)?;
            result.set_item("report", serde_json::to_string(&report).map_err(value_error)?)?;
        }
        Err(errors) => {
            result.set_item("accepted", false)?;
            let errors_list = PyList::empty(py);
            for error in errors.errors() {
                let error_dict = PyDict::new(py);
                error_dict.set_item("field", error.field)?;
                error_dict.set_item("reason", error.reason.to_string())?;
                errors_list.append(error_dict)?;
            }
            result.set_item("errors", errors_list)?;
        }
    }

    Ok(result.into())
}

/// Rank users by total score. Takes and returns JSON arrays.
#[pyfunction]
fn aggregate_leaderboard(reports_json: &str) -> PyResult<String> {
    let reports = parse_reports(reports_json)?;
    serde_json::to_string(&aggregate(&reports)).map_err(value_error)
}

/// Render reports as CSV.
#[pyfunction]
fn export_reports_csv(reports_json: &str) -> PyResult<String> {
    Ok(reports_to_csv(&parse_reports(reports_json)?))
}

/// Lowercase hex SHA-256 of photo bytes.
#[pyfunction]
fn photo_hash(photo: &[u8]) -> String {
    compute_photo_hash(photo)
}

/// Python module definition
#[pymodule]
fn bache_core(_py: Python<'_>, m: &PyModule) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(generate_alias, m)?)?;
    m.add_function(wrap_pyfunction!(validate_report, m)?)?;
    m.add_function(wrap_pyfunction!(aggregate_leaderboard, m)?)?;
    m.add_function(wrap_pyfunction!(export_reports_csv, m)?)?;
    m.add_function(wrap_pyfunction!(photo_hash, m)?)?;
    Ok(())
}
