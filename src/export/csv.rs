//! CSV export of the report table.
//!
//! Layout is fixed: one header line, one row per report, `\n` between
//! lines and no trailing newline. Free-text columns are always quoted; any
//! other field is quoted only when it contains a delimiter, quote or line
//! break. Embedded quotes are doubled.

use std::borrow::Cow;

use crate::storage::models::Report;

/// Suggested download name.
pub const EXPORT_FILE_NAME: &str = "pothole_reports.csv";

pub const CSV_HEADERS: [&str; 11] = [
    "ID",
    "User ID",
    "Alias",
    "Timestamp",
    "Location",
    "Surface Area (m^2)",
    "Dimensions",
    "Volume (m^3)",
    "Score",
    "AI Summary",
    "Photo URL",
];

/// Render reports as CSV text.
pub fn reports_to_csv(reports: &[Report]) -> String {
    let mut lines = Vec::with_capacity(reports.len() + 1);
    lines.push(CSV_HEADERS.join(","));

    for report in reports {
        let body = &report.body;
        let row = [
            escape_field(&report.id),
            escape_field(&body.user_id),
            escape_field(&body.alias),
            escape_field(&body.timestamp),
            quote_field(&body.location),
            Cow::Owned(body.surface_area.to_string()),
            quote_field(&body.approx_dimensions),
            Cow::Owned(body.approx_volume.to_string()),
            Cow::Owned(body.score.to_string()),
            quote_field(&body.ai_summary),
            escape_field(&body.photo_url),
        ];
        lines.push(row.join(","));
    }

    log::debug!("CSV_EXPORTED rows={}", reports.len());
    lines.join("\n")
}

/// Quote unconditionally, doubling embedded quotes.
pub fn quote_field(value: &str) -> Cow<'static, str> {
    Cow::Owned(format!("\"{}\"", value.replace('"', "\"\"")))
}

/// Quote only when the value would otherwise break the row.
pub fn escape_field(value: &str) -> Cow<'_, str> {
    if value.contains([',', '"', '\n', '\r']) {
        quote_field(value)
    } else {
        Cow::Borrowed(value)
    }
}
