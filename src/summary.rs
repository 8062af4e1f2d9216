//! French rendering of collected conversation data and schedule
//! statistics.
//!
//! Pure formatting: both functions are total over their inputs and
//! missing fields render as a dash rather than failing.

use serde::{Deserialize, Serialize};

use crate::dialogue::{EmployeeChoice, SessionData, StepId, StepValue};

// ---------------------------------------------------------------------------
// Conversation recap
// ---------------------------------------------------------------------------

const MISSING: &str = "-";

/// Render the recap shown when a schedule-generation conversation
/// reaches the confirmation step.
pub fn generate_schedule_summary(data: &SessionData) -> String {
    let week = match data.get(&StepId::Start) {
        Some(StepValue::Date(date)) => date.format("%Y-%m-%d").to_string(),
        _ => MISSING.to_string(),
    };
    let department = match data.get(&StepId::Department) {
        Some(StepValue::Text(text)) if !text.is_empty() => text.clone(),
        _ => MISSING.to_string(),
    };
    let employees = match data.get(&StepId::EmployeeSelection) {
        Some(StepValue::Choice(EmployeeChoice::All)) => "Tous".to_string(),
        Some(StepValue::Choice(EmployeeChoice::Select)) => match data.get(&StepId::SelectEmployees)
        {
            Some(StepValue::Employees(names)) => names.join(", "),
            _ => MISSING.to_string(),
        },
        _ => MISSING.to_string(),
    };
    let min_hours = match data.get(&StepId::MinHours) {
        Some(StepValue::Hours(hours)) => format!("{hours}h"),
        _ => MISSING.to_string(),
    };
    let max_hours = match data.get(&StepId::MaxHours) {
        Some(StepValue::Hours(hours)) => format!("{hours}h"),
        _ => MISSING.to_string(),
    };
    let opening = match data.get(&StepId::OpeningHours) {
        Some(StepValue::TimeRange { start, end }) => format!("{start} - {end}"),
        _ => MISSING.to_string(),
    };
    let special = match data.get(&StepId::SpecialRequests) {
        Some(StepValue::Text(text)) if !text.is_empty() => text.clone(),
        _ => MISSING.to_string(),
    };

    format!(
        "Voici un résumé des informations pour la génération du planning:\n\
         - Semaine du: {week}\n\
         - Département: {department}\n\
         - Employés: {employees}\n\
         - Heures min/max: {min_hours} - {max_hours}\n\
         - Horaires d'ouverture: {opening}\n\
         - Demandes spéciales: {special}\n\
         \n\
         Dois-je générer le planning avec ces informations?"
    )
}

// ---------------------------------------------------------------------------
// Schedule statistics
// ---------------------------------------------------------------------------

/// Aggregate figures for a generated schedule, as produced by the
/// scheduling backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleStats {
    pub total_employees: u32,
    pub total_hours: f64,
    pub avg_hours_per_employee: f64,
    pub total_shifts: u32,
}

/// Render schedule statistics as a French bullet list. Hour figures are
/// shown with one decimal.
pub fn format_schedule_stats(stats: &ScheduleStats) -> String {
    format!(
        "Statistiques du planning:\n\
         - Nombre d'employés: {}\n\
         - Heures totales: {:.1}h\n\
         - Heures moyennes par employé: {:.1}h\n\
         - Nombre total de shifts: {}",
        stats.total_employees, stats.total_hours, stats.avg_hours_per_employee, stats.total_shifts,
    )
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
