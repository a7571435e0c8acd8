//! Schema validation and normalization of oracle output.
//!
//! Every function here is pure: a draft goes in, a validated value or a
//! list of violations comes out, independent of how the oracle produced it.
//! Structural checks collect **all** broken fields before failing so a human
//! reviewer sees the complete picture in one pass.

use chrono::NaiveDate;
use tracing::warn;
use url::Url;

use crate::error::{FieldViolation, SchemaViolation};
use crate::types::event::KNOWN_SPORTS;
use crate::types::result::TIME_NOT_FOUND;
use crate::types::{EventDraft, RegistrationStatus, ResultDraft, ValidatedEvent, ValidatedResult};

/// Textual date formats accepted from the oracle, tried in order.
///
/// Numeric slashed/dashed dates parse day-first; month-name formats are
/// unambiguous in either order.
const DATE_FORMATS: [&str; 9] = [
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%B %d, %Y",
    "%b %d, %Y",
    "%d %B %Y",
    "%d %b %Y",
];

/// Canonicalize a registration status, case-insensitively.
pub fn validate_registration_status(
    s: &str,
) -> std::result::Result<RegistrationStatus, FieldViolation> {
    match s.trim().to_lowercase().as_str() {
        "open" => Ok(RegistrationStatus::Open),
        "closed" => Ok(RegistrationStatus::Closed),
        "pending" => Ok(RegistrationStatus::Pending),
        other => Err(FieldViolation::new(
            "registration_status",
            format!("'{other}' is not one of open, closed, pending"),
        )),
    }
}

/// Parse a free-text calendar date.
pub fn validate_date(s: &str) -> std::result::Result<NaiveDate, FieldViolation> {
    let trimmed = s.trim();
    for format in DATE_FORMATS {
        if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
            return Ok(date);
        }
    }
    Err(FieldViolation::new(
        "date",
        format!("could not parse '{trimmed}' as a calendar date"),
    ))
}

/// Normalize a sport category.
///
/// Known categories come back in canonical casing; unknown values pass
/// through flagged `false` with a warning. Open-world on purpose: new sport
/// categories legitimately appear and must not block ingestion.
pub fn validate_sport(s: &str) -> (String, bool) {
    let trimmed = s.trim();
    for known in KNOWN_SPORTS {
        if known.eq_ignore_ascii_case(trimmed) {
            return (known.to_string(), true);
        }
    }
    warn!(sport = trimmed, "unrecognized sport category, accepting as-is");
    (trimmed.to_string(), false)
}

/// Drop an unparseable official URL instead of failing the whole draft.
fn normalize_url(raw: Option<&str>) -> Option<String> {
    let raw = raw.map(str::trim).filter(|s| !s.is_empty())?;
    match Url::parse(raw) {
        Ok(url) => Some(url.to_string()),
        Err(e) => {
            warn!(url = raw, error = %e, "dropping unparseable official URL");
            None
        }
    }
}

/// Validate and normalize an event draft.
///
/// Returns the validated event, or a [`SchemaViolation`] listing every
/// broken field (not just the first encountered).
pub fn validate_event(draft: &EventDraft) -> std::result::Result<ValidatedEvent, SchemaViolation> {
    let mut violations = Vec::new();

    let name = draft.official_name.trim();
    if name.chars().count() < 3 {
        violations.push(FieldViolation::new(
            "official_name",
            "must be at least 3 characters",
        ));
    }

    let place = draft.place.trim();
    if place.chars().count() < 2 {
        violations.push(FieldViolation::new(
            "place",
            "must be at least 2 characters",
        ));
    }

    let distances: Vec<String> = draft
        .distances
        .iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect();
    if distances.is_empty() {
        violations.push(FieldViolation::new("distances", "must not be empty"));
    }

    let date = match validate_date(&draft.date) {
        Ok(date) => Some(date),
        Err(v) => {
            violations.push(v);
            None
        }
    };

    let registration_status = match validate_registration_status(&draft.registration_status) {
        Ok(status) => Some(status),
        Err(v) => {
            violations.push(v);
            None
        }
    };

    if !violations.is_empty() {
        return Err(SchemaViolation::new(violations));
    }

    let (sport, sport_recognized) = validate_sport(&draft.sport);

    Ok(ValidatedEvent {
        name: name.to_string(),
        sport,
        sport_recognized,
        date: date.expect("checked above"),
        place: place.to_string(),
        distances,
        official_url: normalize_url(draft.official_url.as_deref()),
        registration_status: registration_status.expect("checked above"),
    })
}

/// Normalize a result draft. Infallible: a draft with nothing in it becomes
/// a row with the sentinel time, and the comment records the search year and
/// category position.
pub fn validate_result(draft: &ResultDraft, search_year: i32) -> ValidatedResult {
    let comments = match draft.category_position {
        Some(pos) => format!("search year {search_year}; category position {pos}"),
        None => format!("search year {search_year}; category position not found"),
    };

    ValidatedResult {
        official_time: draft
            .official_time
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .unwrap_or(TIME_NOT_FOUND)
            .to_string(),
        overall_position: draft.overall_position,
        average_pace: draft.average_pace.clone(),
        comments,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn draft() -> EventDraft {
        EventDraft {
            official_name: "Madrid Marathon 2025".to_string(),
            sport: "Running".to_string(),
            date: "2025-04-27".to_string(),
            place: "Madrid, Spain".to_string(),
            distances: vec!["10K".into(), "21K".into(), "42K".into()],
            official_url: Some("https://maratonmadrid.com".to_string()),
            registration_status: "Open".to_string(),
        }
    }

    #[test]
    fn status_is_case_insensitive() {
        for raw in ["open", "OPEN", "Open", " oPeN "] {
            assert_eq!(
                validate_registration_status(raw).unwrap(),
                RegistrationStatus::Open
            );
        }
        assert!(validate_registration_status("abierta").is_err());
    }

    proptest! {
        #[test]
        fn any_casing_of_a_valid_status_canonicalizes(word in 0usize..3, mask in any::<u16>()) {
            let (raw, expected) = [
                ("open", RegistrationStatus::Open),
                ("closed", RegistrationStatus::Closed),
                ("pending", RegistrationStatus::Pending),
            ][word];

            let mangled: String = raw
                .chars()
                .enumerate()
                .map(|(i, c)| {
                    if mask & (1u16 << (i % 16)) != 0 {
                        c.to_ascii_uppercase()
                    } else {
                        c
                    }
                })
                .collect();

            prop_assert_eq!(validate_registration_status(&mangled).unwrap(), expected);
        }
    }

    #[test]
    fn three_formats_one_date() {
        let expected = NaiveDate::from_ymd_opt(2025, 4, 27).unwrap();
        for raw in ["2025-04-27", "27/04/2025", "April 27, 2025", "27 Apr 2025"] {
            assert_eq!(validate_date(raw).unwrap(), expected, "format: {raw}");
        }
    }

    #[test]
    fn garbage_date_is_a_violation() {
        let violation = validate_date("next spring, probably").unwrap_err();
        assert_eq!(violation.field, "date");
    }

    #[test]
    fn known_sports_canonicalize_unknown_pass_flagged() {
        assert_eq!(validate_sport("running"), ("Running".to_string(), true));
        assert_eq!(validate_sport("TRAIL"), ("Trail".to_string(), true));
        let (value, recognized) = validate_sport("Snow Running");
        assert_eq!(value, "Snow Running");
        assert!(!recognized);
    }

    #[test]
    fn valid_draft_normalizes() {
        let validated = validate_event(&draft()).unwrap();
        assert_eq!(validated.name, "Madrid Marathon 2025");
        assert_eq!(validated.date, NaiveDate::from_ymd_opt(2025, 4, 27).unwrap());
        assert_eq!(validated.place, "Madrid, Spain");
        assert_eq!(validated.distances, vec!["10K", "21K", "42K"]);
        assert_eq!(validated.registration_status, RegistrationStatus::Open);
        assert!(validated.sport_recognized);
    }

    #[test]
    fn all_violations_are_collected() {
        let mut bad = draft();
        bad.place = "X".to_string();
        bad.distances = vec![];
        bad.date = "someday".to_string();

        let violation = validate_event(&bad).unwrap_err();
        assert_eq!(violation.len(), 3);
        assert!(violation.mentions("place"));
        assert!(violation.mentions("distances"));
        assert!(violation.mentions("date"));
    }

    #[test]
    fn blank_distance_entries_do_not_count() {
        let mut bad = draft();
        bad.distances = vec!["  ".to_string(), "".to_string()];
        let violation = validate_event(&bad).unwrap_err();
        assert!(violation.mentions("distances"));
    }

    #[test]
    fn bad_url_is_dropped_not_fatal() {
        let mut d = draft();
        d.official_url = Some("not a url".to_string());
        let validated = validate_event(&d).unwrap();
        assert!(validated.official_url.is_none());
    }

    #[test]
    fn empty_result_draft_gets_sentinel_and_comment() {
        let validated = validate_result(&ResultDraft::default(), 2024);
        assert_eq!(validated.official_time, TIME_NOT_FOUND);
        assert!(!validated.found_time());
        assert_eq!(
            validated.comments,
            "search year 2024; category position not found"
        );
    }

    #[test]
    fn full_result_draft_carries_through() {
        let draft = ResultDraft {
            official_time: Some(" 3:41:27 ".to_string()),
            overall_position: Some(120),
            category_position: Some(14),
            average_pace: Some("5:14 min/km".to_string()),
        };
        let validated = validate_result(&draft, 2024);
        assert_eq!(validated.official_time, "3:41:27");
        assert!(validated.found_time());
        assert_eq!(validated.overall_position, Some(120));
        assert_eq!(validated.comments, "search year 2024; category position 14");
    }
}
