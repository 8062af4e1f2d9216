//! Guided-conversation state machine for schedule generation.
//!
//! The conversation is a step graph: each step owns a French prompt and a
//! validator with the uniform signature
//! `(input, session_data, clock) -> ValidationResult`. The engine itself
//! is step-agnostic — it looks the validator up, applies the result, and
//! never mutates a session in place: [`advance`] returns an updated copy,
//! so independent sessions can be driven concurrently without cross-talk.
//!
//! Session storage is the integration layer's job; this module only
//! computes transitions.

use std::collections::BTreeMap;
use std::sync::OnceLock;

use chrono::NaiveDate;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::normalize::normalize;
use crate::summary::generate_schedule_summary;

// ---------------------------------------------------------------------------
// Step identifiers
// ---------------------------------------------------------------------------

/// The steps of the schedule-generation conversation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    Start,
    /// Optional free-text step; the driven path goes straight from
    /// `Start` to `EmployeeSelection`, but a session parked here by the
    /// integration layer resumes normally.
    Department,
    EmployeeSelection,
    SelectEmployees,
    MinHours,
    MaxHours,
    OpeningHours,
    SpecialRequests,
    Confirmation,
    Processing,
    Cancelled,
}

impl StepId {
    pub fn as_str(&self) -> &'static str {
        match self {
            StepId::Start => "start",
            StepId::Department => "department",
            StepId::EmployeeSelection => "employee_selection",
            StepId::SelectEmployees => "select_employees",
            StepId::MinHours => "min_hours",
            StepId::MaxHours => "max_hours",
            StepId::OpeningHours => "opening_hours",
            StepId::SpecialRequests => "special_requests",
            StepId::Confirmation => "confirmation",
            StepId::Processing => "processing",
            StepId::Cancelled => "cancelled",
        }
    }

    /// Terminal steps accept no further input.
    pub fn is_terminal(&self) -> bool {
        matches!(self, StepId::Processing | StepId::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Step values and session
// ---------------------------------------------------------------------------

/// Whether the schedule covers every employee or a hand-picked subset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmployeeChoice {
    All,
    Select,
}

/// The typed value a step stores once its input validates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepValue {
    Date(NaiveDate),
    Text(String),
    Hours(u32),
    Choice(EmployeeChoice),
    Employees(Vec<String>),
    TimeRange { start: String, end: String },
    Confirmed(bool),
}

/// Accumulated answers, keyed by the step that produced them.
pub type SessionData = BTreeMap<StepId, StepValue>;

/// One conversation's state. Created by the integration layer at
/// conversation start, persisted between turns, archived on a terminal
/// step. The engine never stores sessions itself.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogSession {
    pub current_step: StepId,
    pub data: SessionData,
    /// Raw user messages, in order received.
    pub history: Vec<String>,
}

impl DialogSession {
    /// A fresh session positioned at the first step.
    pub fn new() -> Self {
        DialogSession { current_step: StepId::Start, data: SessionData::new(), history: Vec::new() }
    }
}

impl Default for DialogSession {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Step graph
// ---------------------------------------------------------------------------

/// One node of the conversation graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DialogStep {
    pub id: StepId,
    /// The question shown when the conversation enters this step.
    pub prompt: String,
}

/// The prompt shown on entering a step.
fn prompt_for(step: StepId) -> &'static str {
    match step {
        StepId::Start => {
            "Je vais vous aider à générer un planning optimisé. Quelle est la date de début \
             de semaine pour ce planning? (format YYYY-MM-DD)"
        }
        StepId::Department => "Pour quel département souhaitez-vous générer le planning?",
        StepId::EmployeeSelection => {
            "Souhaitez-vous inclure tous les employés ou sélectionner certains employés \
             spécifiques? Répondez '1' pour tous les employés ou '2' pour sélectionner."
        }
        StepId::SelectEmployees => {
            "Veuillez entrer les noms ou IDs des employés à inclure, séparés par des virgules."
        }
        StepId::MinHours => "Quel est le nombre minimum d'heures par employé?",
        StepId::MaxHours => "Quel est le nombre maximum d'heures par employé?",
        StepId::OpeningHours => "Quelles sont les heures d'ouverture? (ex: 09:00-18:00)",
        StepId::SpecialRequests => {
            "Avez-vous des contraintes ou demandes spécifiques pour ce planning?"
        }
        StepId::Confirmation => "Dois-je générer le planning avec ces informations?",
        StepId::Processing => "Je lance la génération du planning. Un instant...",
        StepId::Cancelled => "Génération du planning annulée.",
    }
}

/// Build the static step graph for the schedule-generation conversation.
pub fn create_schedule_generation_tree() -> BTreeMap<StepId, DialogStep> {
    [
        StepId::Start,
        StepId::Department,
        StepId::EmployeeSelection,
        StepId::SelectEmployees,
        StepId::MinHours,
        StepId::MaxHours,
        StepId::OpeningHours,
        StepId::SpecialRequests,
        StepId::Confirmation,
        StepId::Processing,
        StepId::Cancelled,
    ]
    .into_iter()
    .map(|id| (id, DialogStep { id, prompt: prompt_for(id).to_string() }))
    .collect()
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Outcome of validating one user reply against the current step.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: bool,
    /// Human-readable French error when `is_valid` is false.
    pub error: Option<String>,
    /// The typed value to store when `is_valid` is true.
    pub processed_value: Option<StepValue>,
    /// The step the session moves to when `is_valid` is true.
    pub next_step: Option<StepId>,
}

impl ValidationResult {
    fn accept(value: StepValue, next: StepId) -> Self {
        ValidationResult {
            is_valid: true,
            error: None,
            processed_value: Some(value),
            next_step: Some(next),
        }
    }

    fn reject(error: &str) -> Self {
        ValidationResult {
            is_valid: false,
            error: Some(error.to_string()),
            processed_value: None,
            next_step: None,
        }
    }
}

type StepValidator = fn(&str, &SessionData, &dyn Clock) -> ValidationResult;

/// Validator table. Terminal steps have none.
fn validator_for(step: StepId) -> Option<StepValidator> {
    match step {
        StepId::Start => Some(validate_start),
        StepId::Department => Some(validate_department),
        StepId::EmployeeSelection => Some(validate_employee_selection),
        StepId::SelectEmployees => Some(validate_select_employees),
        StepId::MinHours => Some(validate_min_hours),
        StepId::MaxHours => Some(validate_max_hours),
        StepId::OpeningHours => Some(validate_opening_hours),
        StepId::SpecialRequests => Some(validate_special_requests),
        StepId::Confirmation => Some(validate_confirmation),
        StepId::Processing | StepId::Cancelled => None,
    }
}

const TERMINAL_ERROR: &str = "La conversation est terminée.";

/// Validate one user reply against a step. Total: any input yields a
/// `ValidationResult`, never an error.
pub fn validate_step_input(
    step: StepId,
    input: &str,
    data: &SessionData,
    clock: &dyn Clock,
) -> ValidationResult {
    match validator_for(step) {
        Some(validator) => validator(input, data, clock),
        None => ValidationResult::reject(TERMINAL_ERROR),
    }
}

// -- Per-step validators ----------------------------------------------------

fn iso_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid ISO date regex"))
}

fn opening_hours_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"(\d{1,2}:\d{2})-(\d{1,2}:\d{2})").expect("valid hours regex"))
}

fn validate_start(input: &str, _data: &SessionData, _clock: &dyn Clock) -> ValidationResult {
    let trimmed = input.trim();
    if !iso_date_re().is_match(trimmed) {
        return ValidationResult::reject(
            "Format de date invalide. Veuillez utiliser le format YYYY-MM-DD, \
             par exemple 2023-06-12.",
        );
    }
    match NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        Ok(date) => ValidationResult::accept(StepValue::Date(date), StepId::EmployeeSelection),
        Err(_) => ValidationResult::reject(
            "Cette date n'existe pas dans le calendrier. Veuillez entrer une date \
             valide au format YYYY-MM-DD.",
        ),
    }
}

fn validate_department(input: &str, _data: &SessionData, _clock: &dyn Clock) -> ValidationResult {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return ValidationResult::reject("Veuillez indiquer un département.");
    }
    ValidationResult::accept(StepValue::Text(trimmed.to_string()), StepId::EmployeeSelection)
}

fn validate_employee_selection(
    input: &str,
    _data: &SessionData,
    _clock: &dyn Clock,
) -> ValidationResult {
    let trimmed = input.trim();
    let normalized = normalize(trimmed);
    if trimmed == "1" || normalized.contains("tous") {
        return ValidationResult::accept(
            StepValue::Choice(EmployeeChoice::All),
            StepId::MinHours,
        );
    }
    if trimmed == "2" || normalized.contains("selectionner") || normalized.contains("specifiques") {
        return ValidationResult::accept(
            StepValue::Choice(EmployeeChoice::Select),
            StepId::SelectEmployees,
        );
    }
    ValidationResult::reject(
        "Je n'ai pas compris votre choix. Veuillez répondre '1' pour tous les employés \
         ou '2' pour sélectionner des employés spécifiques.",
    )
}

fn validate_select_employees(
    input: &str,
    _data: &SessionData,
    _clock: &dyn Clock,
) -> ValidationResult {
    let employees: Vec<String> = input
        .split(',')
        .map(str::trim)
        .filter(|e| !e.is_empty())
        .map(str::to_string)
        .collect();
    if employees.is_empty() {
        return ValidationResult::reject("Veuillez entrer au moins un employé.");
    }
    ValidationResult::accept(StepValue::Employees(employees), StepId::MinHours)
}

/// Leading-integer parse: optional sign, then digits; trailing text like
/// "35h" or "35 heures" is accepted.
fn parse_hours(input: &str) -> Option<i64> {
    let trimmed = input.trim();
    let (sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    digits.parse::<i64>().ok().map(|n| sign * n)
}

fn validate_min_hours(input: &str, _data: &SessionData, _clock: &dyn Clock) -> ValidationResult {
    match parse_hours(input).and_then(|n| u32::try_from(n).ok()) {
        Some(hours) => ValidationResult::accept(StepValue::Hours(hours), StepId::MaxHours),
        None => ValidationResult::reject(
            "Veuillez entrer un nombre valide pour les heures minimum.",
        ),
    }
}

fn validate_max_hours(input: &str, data: &SessionData, _clock: &dyn Clock) -> ValidationResult {
    let hours = match parse_hours(input).and_then(|n| u32::try_from(n).ok()) {
        Some(hours) => hours,
        None => {
            return ValidationResult::reject(
                "Veuillez entrer un nombre valide pour les heures maximum.",
            )
        }
    };
    // The floor is the value stored by the min_hours step.
    if let Some(StepValue::Hours(min)) = data.get(&StepId::MinHours) {
        if hours < *min {
            return ValidationResult::reject(
                "Le nombre maximum d'heures doit être supérieur au nombre minimum. \
                 Veuillez réessayer.",
            );
        }
    }
    ValidationResult::accept(StepValue::Hours(hours), StepId::OpeningHours)
}

fn validate_opening_hours(
    input: &str,
    _data: &SessionData,
    _clock: &dyn Clock,
) -> ValidationResult {
    match opening_hours_re().captures(input) {
        Some(caps) => ValidationResult::accept(
            StepValue::TimeRange { start: caps[1].to_string(), end: caps[2].to_string() },
            StepId::SpecialRequests,
        ),
        None => ValidationResult::reject(
            "Format d'heures invalide. Veuillez utiliser le format HH:MM-HH:MM, \
             par exemple 09:00-18:00.",
        ),
    }
}

fn validate_special_requests(
    input: &str,
    _data: &SessionData,
    _clock: &dyn Clock,
) -> ValidationResult {
    // Free-text step: every answer is acceptable, including "aucune".
    ValidationResult::accept(
        StepValue::Text(input.trim().to_string()),
        StepId::Confirmation,
    )
}

fn validate_confirmation(input: &str, _data: &SessionData, _clock: &dyn Clock) -> ValidationResult {
    let normalized = normalize(input);
    let affirmative = normalized.contains("oui")
        || normalized.contains("ok")
        || normalized.contains("generer");
    if affirmative {
        ValidationResult::accept(StepValue::Confirmed(true), StepId::Processing)
    } else {
        ValidationResult::accept(StepValue::Confirmed(false), StepId::Cancelled)
    }
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// The engine's answer to one conversation turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    /// The updated session (identical to the input session when the turn
    /// was invalid, apart from the message history).
    pub session: DialogSession,
    /// What to show the user: the next prompt, a validation error, or
    /// the recap when entering the confirmation step.
    pub reply: String,
}

/// Advance a conversation by one user reply.
///
/// An invalid reply leaves `current_step` and all accumulated data
/// untouched and returns the validator's error as the reply, so the
/// integration layer can re-prompt without losing state.
pub fn advance(session: &DialogSession, raw_input: &str, clock: &dyn Clock) -> TurnOutcome {
    let mut updated = session.clone();
    updated.history.push(raw_input.to_string());

    if updated.current_step.is_terminal() {
        return TurnOutcome { session: updated, reply: TERMINAL_ERROR.to_string() };
    }

    let result = validate_step_input(updated.current_step, raw_input, &updated.data, clock);
    if !result.is_valid {
        // Rejections carry their message; fall back to re-prompting the
        // current step rather than a misleading notice.
        let reply = result
            .error
            .unwrap_or_else(|| prompt_for(updated.current_step).to_string());
        return TurnOutcome { session: updated, reply };
    }

    let answered = updated.current_step;
    if let Some(value) = result.processed_value {
        updated.data.insert(answered, value);
    }
    if let Some(next) = result.next_step {
        updated.current_step = next;
    }

    // Entering the confirmation step, the user sees the recap of every
    // collected field instead of the bare prompt.
    let reply = if updated.current_step == StepId::Confirmation {
        generate_schedule_summary(&updated.data)
    } else {
        prompt_for(updated.current_step).to_string()
    };
    TurnOutcome { session: updated, reply }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
