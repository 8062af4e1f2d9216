//! Intent classification over an ordered keyword-rule table.
//!
//! The classifier normalizes the message once, then walks the lexicon's
//! intent rules in order; the first rule with any keyword contained in
//! the text wins and its param builder runs the relevant extractors.
//! The order is total and load-bearing — overlapping vocabularies
//! ("suggestion" appears under both optimization and feedback) are
//! disambiguated purely by precedence, and `Unknown` is the universal
//! fallback, so every message classifies to exactly one intent.
//!
//! Classification is a pure function of `(message, clock)`: no globals,
//! no ambient time.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::clock::Clock;
use crate::dates::{current_monday, extract_date, extract_date_range};
use crate::extract::{
    extract_employee_info, extract_period, extract_vacation_type, Period, VacationType,
};
use crate::lexicon::lexicon;
use crate::normalize::{contains_any, normalize};

// ---------------------------------------------------------------------------
// Intent types
// ---------------------------------------------------------------------------

/// The closed set of user intents the assistant understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Help,
    GenerateSchedule,
    ViewSchedule,
    CheckVacationAvailability,
    CreateVacationRequest,
    GetStats,
    GetOptimalSchedule,
    ListEmployees,
    SetReminder,
    UserPreferences,
    SearchInfo,
    Feedback,
    /// Universal fallback — a valid classification, not an error.
    Unknown,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Help => "help",
            Intent::GenerateSchedule => "generate_schedule",
            Intent::ViewSchedule => "view_schedule",
            Intent::CheckVacationAvailability => "check_vacation_availability",
            Intent::CreateVacationRequest => "create_vacation_request",
            Intent::GetStats => "get_stats",
            Intent::GetOptimalSchedule => "get_optimal_schedule",
            Intent::ListEmployees => "list_employees",
            Intent::SetReminder => "set_reminder",
            Intent::UserPreferences => "user_preferences",
            Intent::SearchInfo => "search_info",
            Intent::Feedback => "feedback",
            Intent::Unknown => "unknown",
        }
    }
}

/// Intent-specific extracted parameters. Each intent fills the fields
/// its builder knows about and leaves the rest `None`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct IntentParams {
    /// Week the schedule request refers to (its Monday).
    pub week_start: Option<NaiveDate>,
    /// Start of an extracted date range.
    pub start_date: Option<NaiveDate>,
    /// End of an extracted date range.
    pub end_date: Option<NaiveDate>,
    /// Single target date (reminders).
    pub date: Option<NaiveDate>,
    /// Referenced employee; `None` means the current user.
    pub employee_id: Option<String>,
    /// Requested leave category.
    pub vacation_type: Option<VacationType>,
    /// Reporting period for statistics.
    pub period: Option<Period>,
    /// Raw query text (information search).
    pub query: Option<String>,
    /// Raw message text (reminders, feedback).
    pub message: Option<String>,
}

/// Result of classifying one message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DetectedIntent {
    pub intent: Intent,
    pub params: IntentParams,
}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify a message into an intent plus extracted parameters.
///
/// Never fails: unmatched input yields `Intent::Unknown` with empty
/// params.
pub fn detect_intent(message: &str, clock: &dyn Clock) -> DetectedIntent {
    let normalized = normalize(message);

    for rule in &lexicon().intent_rules {
        if contains_any(&normalized, &rule.keywords) {
            debug!(intent = rule.intent.as_str(), "intent matched");
            return DetectedIntent {
                intent: rule.intent,
                params: build_params(rule.intent, message, clock),
            };
        }
    }

    DetectedIntent { intent: Intent::Unknown, params: IntentParams::default() }
}

/// Run the extractors relevant to a matched intent.
fn build_params(intent: Intent, message: &str, clock: &dyn Clock) -> IntentParams {
    let mut params = IntentParams::default();

    match intent {
        Intent::GenerateSchedule => {
            params.week_start =
                Some(extract_date(message, clock).unwrap_or_else(|| current_monday(clock)));
        }
        Intent::ViewSchedule | Intent::GetOptimalSchedule => {
            params.week_start =
                Some(extract_date(message, clock).unwrap_or_else(|| current_monday(clock)));
            params.employee_id = extract_employee_info(message);
        }
        Intent::CheckVacationAvailability => {
            let range = extract_date_range(message, clock);
            params.start_date = Some(range.start);
            params.end_date = Some(range.end);
            params.employee_id = extract_employee_info(message);
        }
        Intent::CreateVacationRequest => {
            let range = extract_date_range(message, clock);
            params.start_date = Some(range.start);
            params.end_date = Some(range.end);
            params.employee_id = extract_employee_info(message);
            params.vacation_type = Some(extract_vacation_type(message));
        }
        Intent::GetStats => {
            params.period = Some(extract_period(message));
            params.employee_id = extract_employee_info(message);
        }
        Intent::SetReminder => {
            params.date = Some(extract_date(message, clock).unwrap_or_else(|| clock.today()));
            params.message = Some(message.to_string());
        }
        Intent::SearchInfo => {
            params.query = Some(message.to_string());
        }
        Intent::Feedback => {
            params.message = Some(message.to_string());
        }
        Intent::Help | Intent::ListEmployees | Intent::UserPreferences | Intent::Unknown => {}
    }

    params
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
