use chrono::{Months, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;

/// How many days ahead of the due date a vaccination counts as "due soon".
pub const DUE_SOON_WINDOW_DAYS: i64 = 30;

/// A vaccination record for the pet
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vaccination {
    pub id: String,
    /// Label shown in the table (e.g. "Rabies")
    pub name: String,
    /// Date the vaccination was last administered, absent until first completion
    pub last_completed: Option<NaiveDate>,
    /// Date the next shot is due
    pub due_date: NaiveDate,
    /// RFC 3339 timestamp
    pub created_at: String,
    /// RFC 3339 timestamp
    pub updated_at: String,
}

/// Request for creating a new vaccination record.
///
/// Date fields travel as ISO 8601 strings; the backend validates presence
/// and format before touching the store, so everything here is optional.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateVaccinationRequest {
    pub name: Option<String>,
    pub due_date: Option<String>,
}

/// Request for marking a vaccination complete (the only mutation)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateVaccinationRequest {
    pub id: Option<String>,
    pub last_completed: Option<String>,
    pub due_date: Option<String>,
}

/// Request for deleting a vaccination record
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteVaccinationRequest {
    pub id: Option<String>,
}

/// Response after deleting a vaccination record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeleteVaccinationResponse {
    pub success: bool,
}

/// Uniform error envelope returned by the API on any failure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Urgency of a vaccination relative to a reference date.
///
/// "Completed" is inherited terminology: it really means "not due within the
/// next 30 days", whether or not the shot was ever administered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VaccinationStatus {
    Completed,
    DueSoon,
    OverDue,
}

impl VaccinationStatus {
    /// Classify a due date against an explicit "today".
    ///
    /// Callers always pass the reference date in; this never reads the
    /// wall clock, so rendering and tests stay deterministic.
    pub fn classify(due_date: NaiveDate, today: NaiveDate) -> Self {
        let days_until_due = due_date.signed_duration_since(today).num_days();
        if days_until_due < 0 {
            VaccinationStatus::OverDue
        } else if days_until_due <= DUE_SOON_WINDOW_DAYS {
            VaccinationStatus::DueSoon
        } else {
            VaccinationStatus::Completed
        }
    }
}

impl fmt::Display for VaccinationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VaccinationStatus::Completed => write!(f, "completed"),
            VaccinationStatus::DueSoon => write!(f, "due soon"),
            VaccinationStatus::OverDue => write!(f, "over due"),
        }
    }
}

/// Dates recorded when a vaccination is marked complete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompletionUpdate {
    pub last_completed: NaiveDate,
    pub due_date: NaiveDate,
}

/// Compute the record changes for a completion on the given date:
/// `last_completed` is the completion date itself and the next due date is
/// one calendar year later.
pub fn mark_complete(completed_on: NaiveDate) -> CompletionUpdate {
    CompletionUpdate {
        last_completed: completed_on,
        due_date: next_due_date(completed_on),
    }
}

/// One calendar year after the completion date (same month and day).
/// A Feb 29 completion clamps to Feb 28 of the following year.
pub fn next_due_date(completed_on: NaiveDate) -> NaiveDate {
    completed_on + Months::new(12)
}

/// Table filter options offered by the UI
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Completed,
    DueSoon,
    OverDue,
}

impl StatusFilter {
    /// Every filter, in the order the select element lists them
    pub const ALL: [StatusFilter; 4] = [
        StatusFilter::All,
        StatusFilter::Completed,
        StatusFilter::DueSoon,
        StatusFilter::OverDue,
    ];

    /// Label shown in the filter dropdown
    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "All",
            StatusFilter::Completed => "Completed",
            StatusFilter::DueSoon => "Due Soon",
            StatusFilter::OverDue => "Over due",
        }
    }

    /// Parse a dropdown label back into a filter, defaulting to `All`
    pub fn from_label(label: &str) -> Self {
        match label {
            "Completed" => StatusFilter::Completed,
            "Due Soon" => StatusFilter::DueSoon,
            "Over due" => StatusFilter::OverDue,
            _ => StatusFilter::All,
        }
    }

    /// Whether a vaccination with the given due date passes this filter
    pub fn matches(&self, due_date: NaiveDate, today: NaiveDate) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => {
                VaccinationStatus::classify(due_date, today) == VaccinationStatus::Completed
            }
            StatusFilter::DueSoon => {
                VaccinationStatus::classify(due_date, today) == VaccinationStatus::DueSoon
            }
            StatusFilter::OverDue => {
                VaccinationStatus::classify(due_date, today) == VaccinationStatus::OverDue
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_classify_past_due_date_is_over_due() {
        let today = date(2025, 6, 15);
        assert_eq!(
            VaccinationStatus::classify(date(2025, 6, 14), today),
            VaccinationStatus::OverDue
        );
        assert_eq!(
            VaccinationStatus::classify(date(2024, 1, 1), today),
            VaccinationStatus::OverDue
        );
    }

    #[test]
    fn test_classify_due_today_is_due_soon() {
        // diff is 0, not negative, so today falls on the due-soon side
        let today = date(2025, 6, 15);
        assert_eq!(
            VaccinationStatus::classify(today, today),
            VaccinationStatus::DueSoon
        );
    }

    #[test]
    fn test_classify_thirty_day_boundary_is_inclusive() {
        let today = date(2025, 6, 15);
        assert_eq!(
            VaccinationStatus::classify(date(2025, 7, 15), today),
            VaccinationStatus::DueSoon
        );
        assert_eq!(
            VaccinationStatus::classify(date(2025, 7, 16), today),
            VaccinationStatus::Completed
        );
    }

    #[test]
    fn test_classify_far_future_is_completed() {
        let today = date(2025, 6, 15);
        assert_eq!(
            VaccinationStatus::classify(date(2026, 6, 15), today),
            VaccinationStatus::Completed
        );
    }

    #[test]
    fn test_status_display_labels() {
        assert_eq!(VaccinationStatus::Completed.to_string(), "completed");
        assert_eq!(VaccinationStatus::DueSoon.to_string(), "due soon");
        assert_eq!(VaccinationStatus::OverDue.to_string(), "over due");
    }

    #[test]
    fn test_mark_complete_advances_one_year() {
        let update = mark_complete(date(2025, 6, 1));
        assert_eq!(update.last_completed, date(2025, 6, 1));
        assert_eq!(update.due_date, date(2026, 6, 1));
    }

    #[test]
    fn test_next_due_date_keeps_month_and_day() {
        assert_eq!(next_due_date(date(2025, 1, 1)), date(2026, 1, 1));
        assert_eq!(next_due_date(date(2025, 12, 31)), date(2026, 12, 31));
    }

    #[test]
    fn test_next_due_date_clamps_leap_day() {
        assert_eq!(next_due_date(date(2024, 2, 29)), date(2025, 2, 28));
    }

    #[test]
    fn test_vaccination_wire_format_is_camel_case() {
        let vaccination = Vaccination {
            id: "7c0f8a22-4a52-4b6e-9c38-1c2b57a3f000".to_string(),
            name: "Rabies".to_string(),
            last_completed: None,
            due_date: date(2025, 1, 1),
            created_at: "2024-12-01T09:30:00+00:00".to_string(),
            updated_at: "2024-12-01T09:30:00+00:00".to_string(),
        };

        let json = serde_json::to_value(&vaccination).unwrap();
        assert_eq!(json["dueDate"], "2025-01-01");
        assert_eq!(json["lastCompleted"], serde_json::Value::Null);
        assert!(json.get("createdAt").is_some());
        assert!(json.get("updatedAt").is_some());
    }

    #[test]
    fn test_create_request_missing_fields_deserialize_as_none() {
        let request: CreateVaccinationRequest = serde_json::from_str("{}").unwrap();
        assert_eq!(request.name, None);
        assert_eq!(request.due_date, None);

        let request: CreateVaccinationRequest =
            serde_json::from_str(r#"{"name":"Rabies","dueDate":"2025-01-01"}"#).unwrap();
        assert_eq!(request.name.as_deref(), Some("Rabies"));
        assert_eq!(request.due_date.as_deref(), Some("2025-01-01"));
    }

    #[test]
    fn test_status_filter_labels_round_trip() {
        for filter in StatusFilter::ALL {
            assert_eq!(StatusFilter::from_label(filter.label()), filter);
        }
        assert_eq!(StatusFilter::from_label("nonsense"), StatusFilter::All);
    }

    #[test]
    fn test_status_filter_matches() {
        let today = date(2025, 6, 15);
        let overdue = date(2025, 6, 1);
        let soon = date(2025, 6, 20);
        let far = date(2026, 1, 1);

        assert!(StatusFilter::All.matches(overdue, today));
        assert!(StatusFilter::All.matches(far, today));
        assert!(StatusFilter::OverDue.matches(overdue, today));
        assert!(!StatusFilter::OverDue.matches(soon, today));
        assert!(StatusFilter::DueSoon.matches(soon, today));
        assert!(StatusFilter::Completed.matches(far, today));
        assert!(!StatusFilter::Completed.matches(overdue, today));
    }
}
