//! Report validation.
//!
//! Every check runs and every violation is collected, so callers can show a
//! complete list of problems. A record that fails any check is never
//! returned in part.

use serde_json::Value;

use crate::error::{ValidationErrors, ValidationReason};
use crate::identity::alias::generate_alias;
use crate::storage::models::{AcceptedReport, RawReport};
use crate::validation::fields::{bool_field, json_type_name, names, number_field, string_field};
use crate::validation::rules::{
    check_absolute_url, check_location, check_measurement, check_photo_hash, check_score,
    check_timestamp, is_blank,
};

/// Validate a typed candidate and compute its alias.
pub fn validate(candidate: &RawReport) -> Result<AcceptedReport, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    // [1] required text
    let required = [
        (names::USER_ID, &candidate.user_id),
        (names::LOCATION, &candidate.location),
        (names::AI_SUMMARY, &candidate.ai_summary),
        (names::PHOTO_URL, &candidate.photo_url),
        (names::PHOTO_HASH, &candidate.photo_hash),
        (names::MODEL_VERSION, &candidate.model_version),
        (names::APPROX_DIMENSIONS, &candidate.approx_dimensions),
    ];
    for (field, value) in required {
        if is_blank(value) {
            errors.push(field, ValidationReason::Required);
        }
    }

    // [2] photo URL
    if !is_blank(&candidate.photo_url) {
        if let Err(reason) = check_absolute_url(&candidate.photo_url) {
            errors.push(names::PHOTO_URL, reason);
        }
    }

    // [3] measurements
    let surface_area = check_measurement(candidate.surface_area)
        .map_err(|reason| errors.push(names::SURFACE_AREA, reason))
        .ok();
    let approx_volume = check_measurement(candidate.approx_volume)
        .map_err(|reason| errors.push(names::APPROX_VOLUME, reason))
        .ok();

    // [4] score
    let score = check_score(candidate.score)
        .map_err(|reason| errors.push(names::SCORE, reason))
        .ok();

    // [5] timestamp
    if let Err(reason) = check_timestamp(&candidate.timestamp) {
        let reason = if is_blank(&candidate.timestamp) {
            ValidationReason::Required
        } else {
            reason
        };
        errors.push(names::TIMESTAMP, reason);
    }

    // [6] location
    if !is_blank(&candidate.location) {
        if let Err(reason) = check_location(&candidate.location) {
            errors.push(names::LOCATION, reason);
        }
    }

    // [7] photo hash
    if !is_blank(&candidate.photo_hash) {
        if let Err(reason) = check_photo_hash(&candidate.photo_hash) {
            errors.push(names::PHOTO_HASH, reason);
        }
    }

    // Alias only after user id passed [1]; a blank id is already reported.
    let alias = generate_alias(&candidate.user_id).ok();

    match (surface_area, approx_volume, score, alias) {
        (Some(surface_area), Some(approx_volume), Some(score), Some(alias)) if errors.is_empty() => {
            Ok(AcceptedReport {
                user_id: candidate.user_id.clone(),
                alias,
                timestamp: candidate.timestamp.clone(),
                location: candidate.location.clone(),
                ai_summary: candidate.ai_summary.clone(),
                approx_dimensions: candidate.approx_dimensions.clone(),
                surface_area,
                approx_volume,
                score,
                is_pothole: candidate.is_pothole,
                photo_url: candidate.photo_url.clone(),
                photo_hash: candidate.photo_hash.clone(),
                model_version: candidate.model_version.clone(),
            })
        }
        _ => {
            log::debug!("REPORT_REJECTED fields={:?}", errors.fields());
            Err(errors)
        }
    }
}

/// Validate an arbitrary JSON value.
///
/// Non-object input and mistyped fields are reported alongside the regular
/// checks, so the result is always either an accepted report or a
/// non-empty error list.
pub fn validate_value(value: &Value) -> Result<AcceptedReport, ValidationErrors> {
    let obj = match value.as_object() {
        Some(obj) => obj,
        None => {
            let mut errors = ValidationErrors::new();
            errors.push(names::REPORT, ValidationReason::NotAnObject);
            log::debug!("REPORT_REJECTED shape={}", json_type_name(value));
            return Err(errors);
        }
    };

    let mut type_errors = ValidationErrors::new();
    let candidate = RawReport {
        user_id: string_field(obj, names::USER_ID, &mut type_errors),
        timestamp: string_field(obj, names::TIMESTAMP, &mut type_errors),
        location: string_field(obj, names::LOCATION, &mut type_errors),
        ai_summary: string_field(obj, names::AI_SUMMARY, &mut type_errors),
        approx_dimensions: string_field(obj, names::APPROX_DIMENSIONS, &mut type_errors),
        surface_area: number_field(obj, names::SURFACE_AREA, &mut type_errors),
        approx_volume: number_field(obj, names::APPROX_VOLUME, &mut type_errors),
        score: number_field(obj, names::SCORE, &mut type_errors),
        is_pothole: bool_field(obj, names::IS_POTHOLE, &mut type_errors),
        photo_url: string_field(obj, names::PHOTO_URL, &mut type_errors),
        photo_hash: string_field(obj, names::PHOTO_HASH, &mut type_errors),
        model_version: string_field(obj, names::MODEL_VERSION, &mut type_errors),
    };

    match validate(&candidate) {
        Ok(report) if type_errors.is_empty() => Ok(report),
        Ok(_) => Err(type_errors),
        Err(errors) => Err(merge_type_errors(type_errors, errors)),
    }
}

/// Append `errors` to `type_errors`, dropping `Required` for fields that
/// were supplied with the wrong type.
pub(crate) fn merge_type_errors(
    mut type_errors: ValidationErrors,
    errors: ValidationErrors,
) -> ValidationErrors {
    let mut rest = ValidationErrors::new();
    for error in errors {
        if error.reason == ValidationReason::Required && type_errors.has_field(error.field) {
            continue;
        }
        rest.push(error.field, error.reason);
    }
    type_errors.extend(rest);
    type_errors
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use serde_json::json;

    fn valid_candidate() -> RawReport {
        RawReport {
            user_id: "anon-uid-1".to_string(),
            timestamp: "2024-05-01T12:00:00.000Z".to_string(),
            location: "-38.71830, -62.26610".to_string(),
            ai_summary: "Bache de gran tamaño junto a una alcantarilla.".to_string(),
            approx_dimensions: "30cm x 50cm".to_string(),
            surface_area: Some(0.15),
            approx_volume: Some(0.02),
            score: Some(72.0),
            is_pothole: true,
            photo_url: "https://storage.example.com/pothole_reports/a.jpg".to_string(),
            photo_hash: "ab".repeat(32),
            model_version: "googleai/gemini-2.0-flash".to_string(),
        }
    }

    #[test]
    fn test_valid_candidate_accepted_with_alias() {
        let candidate = valid_candidate();
        let report = validate(&candidate).unwrap();

        assert_eq!(report.alias, generate_alias("anon-uid-1").unwrap());
        assert_eq!(report.score, 72);
        assert_eq!(report.location, candidate.location);
    }

    #[test]
    fn test_score_out_of_range_rejected() {
        let mut candidate = valid_candidate();
        candidate.score = Some(150.0);

        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.fields(), vec![names::SCORE]);
        assert!(matches!(
            errors.errors()[0].reason,
            ValidationReason::OutOfRange { value, .. } if value == 150.0
        ));
    }

    #[test]
    fn test_non_integer_score_rejected() {
        let mut candidate = valid_candidate();
        candidate.score = Some(42.5);

        let errors = validate(&candidate).unwrap_err();
        assert_eq!(errors.errors()[0].reason, ValidationReason::NotAnInteger(42.5));
    }

    #[test]
    fn test_bad_location_rejected() {
        let mut candidate = valid_candidate();
        candidate.location = "not,a,coord".to_string();

        let errors = validate(&candidate).unwrap_err();
        assert!(errors.has_field(names::LOCATION));
        assert_eq!(errors.len(), 1);
    }

    #[test]
    fn test_all_violations_collected_in_order() {
        let candidate = RawReport {
            user_id: String::new(),
            timestamp: "not a date".to_string(),
            location: "north".to_string(),
            ai_summary: "  ".to_string(),
            approx_dimensions: "30cm".to_string(),
            surface_area: Some(-1.0),
            approx_volume: None,
            score: Some(0.0),
            is_pothole: false,
            photo_url: "relative/path.jpg".to_string(),
            photo_hash: "XYZ".to_string(),
            model_version: "m".to_string(),
        };

        let errors = validate(&candidate).unwrap_err();
        assert_eq!(
            errors.fields(),
            vec![
                names::USER_ID,
                names::AI_SUMMARY,
                names::PHOTO_URL,
                names::SURFACE_AREA,
                names::APPROX_VOLUME,
                names::SCORE,
                names::TIMESTAMP,
                names::LOCATION,
                names::PHOTO_HASH,
            ]
        );
    }

    #[test]
    fn test_blank_fields_reported_once() {
        let errors = validate(&RawReport::default()).unwrap_err();
        assert_eq!(
            errors.errors().iter().filter(|e| e.field == names::PHOTO_URL).count(),
            1
        );
        assert!(errors
            .errors()
            .iter()
            .filter(|e| e.field == names::TIMESTAMP)
            .all(|e| e.reason == ValidationReason::Required));
    }

    #[test]
    fn test_non_pothole_shape_still_accepted() {
        let mut candidate = valid_candidate();
        candidate.is_pothole = false;
        assert!(!validate(&candidate).unwrap().is_pothole);
    }

    #[test]
    fn test_validate_value_wrong_types() {
        let value = json!({
            "userId": "u1",
            "timestamp": "2024-05-01T12:00:00Z",
            "location": "10.00000, 20.00000",
            "aiSummary": "ok",
            "approxDimensions": "1m x 1m",
            "surfaceArea": "big",
            "approxVolume": 0.1,
            "score": 50,
            "isPothole": true,
            "photoUrl": "https://x.example/p.jpg",
            "photoHash": "00".repeat(32),
            "modelVersion": 3
        });

        let errors = validate_value(&value).unwrap_err();
        assert_eq!(errors.errors()[0].field, names::SURFACE_AREA);
        assert!(matches!(errors.errors()[0].reason, ValidationReason::WrongType { .. }));

        // Mistyped values were supplied, so they are not also "required".
        assert_eq!(errors.len(), 2);
        assert_eq!(errors.fields(), vec![names::SURFACE_AREA, names::MODEL_VERSION]);
        assert!(errors.errors().iter().all(|e| e.reason != ValidationReason::Required));
    }

    #[test]
    fn test_validate_value_missing_fields_still_required() {
        let errors = validate_value(&json!({"score": "high"})).unwrap_err();
        assert!(errors
            .errors()
            .iter()
            .any(|e| e.field == names::USER_ID && e.reason == ValidationReason::Required));
        assert_eq!(
            errors.errors().iter().filter(|e| e.field == names::SCORE).count(),
            1
        );
    }

    #[test]
    fn test_validate_value_not_object() {
        let errors = validate_value(&json!([1, 2, 3])).unwrap_err();
        assert_eq!(errors.errors()[0].reason, ValidationReason::NotAnObject);
    }

    #[test]
    fn test_validate_value_accepts_valid_document() {
        let value = serde_json::to_value(valid_candidate()).unwrap();
        let report = validate_value(&value).unwrap();
        assert_eq!(report.user_id, "anon-uid-1");
    }

    const REPORT_KEYS: [&str; 12] = [
        names::USER_ID,
        names::TIMESTAMP,
        names::LOCATION,
        names::AI_SUMMARY,
        names::APPROX_DIMENSIONS,
        names::SURFACE_AREA,
        names::APPROX_VOLUME,
        names::SCORE,
        names::IS_POTHOLE,
        names::PHOTO_URL,
        names::PHOTO_HASH,
        names::MODEL_VERSION,
    ];

    /// Any JSON leaf, weighted towards values that pass some check.
    fn json_leaf() -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            any::<bool>().prop_map(Value::from),
            any::<i64>().prop_map(Value::from),
            any::<f64>().prop_map(Value::from),
            (1u8..=100).prop_map(Value::from),
            (0.0f64..5.0).prop_map(Value::from),
            ".{0,16}".prop_map(Value::from),
            proptest::sample::select(vec![
                "2024-05-01T12:00:00Z".to_string(),
                "-38.71830, -62.26610".to_string(),
                "https://storage.example.com/p.jpg".to_string(),
                "ab".repeat(32),
            ])
            .prop_map(Value::from),
            proptest::sample::select(vec![json!([1, "two", null]), json!({"nested": {"score": 5}})]),
        ]
    }

    fn json_report() -> impl Strategy<Value = Value> {
        prop_oneof![
            4 => proptest::collection::vec(proptest::option::of(json_leaf()), REPORT_KEYS.len())
                .prop_map(|values| {
                    let obj: serde_json::Map<String, Value> = REPORT_KEYS
                        .iter()
                        .zip(values)
                        .filter_map(|(key, value)| value.map(|v| (key.to_string(), v)))
                        .collect();
                    Value::Object(obj)
                }),
            1 => json_leaf(),
        ]
    }

    proptest! {
        #[test]
        fn prop_validate_value_is_total(value in json_report()) {
            match validate_value(&value) {
                Ok(report) => {
                    prop_assert!((1..=100).contains(&report.score));
                    prop_assert!(!report.user_id.trim().is_empty());
                    prop_assert!(report.surface_area >= 0.0 && report.approx_volume >= 0.0);
                }
                Err(errors) => {
                    prop_assert!(!errors.is_empty());
                    for error in errors.errors() {
                        prop_assert!(
                            error.field == names::REPORT || REPORT_KEYS.contains(&error.field)
                        );
                    }
                }
            }
        }

        #[test]
        fn prop_validate_is_total(
            user_id in ".{0,12}",
            location in ".{0,24}",
            score in proptest::option::of(-500.0f64..500.0),
            area in proptest::option::of(-10.0f64..10.0),
        ) {
            let candidate = RawReport {
                user_id,
                location,
                score,
                surface_area: area,
                ..valid_candidate()
            };
            match validate(&candidate) {
                Ok(report) => prop_assert!((1..=100).contains(&report.score)),
                Err(errors) => prop_assert!(!errors.is_empty()),
            }
        }
    }
}
