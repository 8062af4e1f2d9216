// ===========================================================================
// Intent classification grid — one probe per intent, plus the precedence
// cases where vocabularies overlap and rule order decides
// ===========================================================================

use chrono::NaiveDate;
use planbot::clock::FixedClock;
use planbot::extract::VacationType;
use planbot::intent::{detect_intent, Intent};

/// Thursday 2023-06-15; the current week's Monday is 2023-06-12.
fn clock() -> FixedClock {
    FixedClock(NaiveDate::from_ymd_opt(2023, 6, 15).unwrap())
}

fn intent_of(message: &str) -> Intent {
    detect_intent(message, &clock()).intent
}

// ===========================================================================
// One probe per intent
// ===========================================================================

#[test]
fn test_each_intent_has_a_reachable_probe() {
    let grid = [
        ("j'ai besoin d'aide", Intent::Help),
        ("générer un planning", Intent::GenerateSchedule),
        ("quels sont mes horaires ?", Intent::ViewSchedule),
        ("puis-je poser des jours en juillet ?", Intent::CheckVacationAvailability),
        ("je veux poser des congés", Intent::CreateVacationRequest),
        ("montre le dashboard", Intent::GetStats),
        ("peux-tu optimiser le planning", Intent::GetOptimalSchedule),
        ("affiche le trombinoscope", Intent::ListEmployees),
        ("rappelle-moi demain", Intent::SetReminder),
        ("changer mes préférences", Intent::UserPreferences),
        ("explique-moi cette fonction", Intent::SearchInfo),
        ("je voudrais laisser un avis", Intent::Feedback),
        ("blablabla xyz", Intent::Unknown),
    ];
    for (message, expected) in grid {
        assert_eq!(intent_of(message), expected, "probe: {message:?}");
    }
}

// ===========================================================================
// Precedence: overlapping vocabularies resolved by rule order
// ===========================================================================

#[test]
fn test_help_beats_every_later_rule() {
    assert_eq!(intent_of("aide pour générer un planning"), Intent::Help);
    assert_eq!(intent_of("besoin d'aide avec mes congés"), Intent::Help);
}

#[test]
fn test_availability_question_beats_vacation_request() {
    // "puis-je poser" (availability) and "poser des congés" (request)
    // both match; the availability rule comes first.
    assert_eq!(intent_of("puis-je poser des congés ?"), Intent::CheckVacationAvailability);
}

#[test]
fn test_suggestion_is_optimization_not_feedback() {
    assert_eq!(intent_of("une suggestion"), Intent::GetOptimalSchedule);
    assert_eq!(intent_of("as-tu une suggestion d'horaire ?"), Intent::GetOptimalSchedule);
}

#[test]
fn test_rapport_de_bug_classifies_as_stats() {
    // "rapport" belongs to the stats vocabulary, which precedes feedback.
    // Reporting a bug needs a word the stats rule does not claim.
    assert_eq!(intent_of("rapport de bug"), Intent::GetStats);
    assert_eq!(intent_of("je signale un bug"), Intent::Feedback);
}

#[test]
fn test_montre_planning_is_view_not_search() {
    // "montre" alone would be search_info, but the view rule fires first
    // on "mon planning".
    assert_eq!(intent_of("montre mon planning"), Intent::ViewSchedule);
    assert_eq!(intent_of("montre la météo"), Intent::SearchInfo);
}

#[test]
fn test_adjacent_pair_precedence_grid() {
    // One message per adjacent rule pair, each carrying vocabulary from
    // both intents. The earlier rule must win every time.
    let grid = [
        ("aide pour générer un planning", Intent::Help, Intent::GenerateSchedule),
        (
            "générer un nouveau planning et afficher planning actuel",
            Intent::GenerateSchedule,
            Intent::ViewSchedule,
        ),
        (
            "voir mon planning et vérifier disponibilité des congés",
            Intent::ViewSchedule,
            Intent::CheckVacationAvailability,
        ),
        (
            "puis-je poser des congés ?",
            Intent::CheckVacationAvailability,
            Intent::CreateVacationRequest,
        ),
        ("poser des congés et voir le bilan", Intent::CreateVacationRequest, Intent::GetStats),
        ("statistiques et suggestion d'horaire", Intent::GetStats, Intent::GetOptimalSchedule),
        (
            "optimiser les horaires de l'équipe",
            Intent::GetOptimalSchedule,
            Intent::ListEmployees,
        ),
        ("liste des employés et un rappel", Intent::ListEmployees, Intent::SetReminder),
        (
            "programmer rappel pour mes préférences",
            Intent::SetReminder,
            Intent::UserPreferences,
        ),
        ("explique les paramètres", Intent::UserPreferences, Intent::SearchInfo),
        ("cherche d'où vient le problème", Intent::SearchInfo, Intent::Feedback),
    ];
    for (message, winner, loser) in grid {
        assert_eq!(
            intent_of(message),
            winner,
            "{message:?} must classify as {winner:?}, not {loser:?}"
        );
    }
}

#[test]
fn test_rtt_question_is_a_vacation_request() {
    // "rtt" sits in the vacation-request vocabulary, which precedes
    // search_info, so even a definition question classifies as a request.
    assert_eq!(intent_of("c'est quoi un rtt ?"), Intent::CreateVacationRequest);
}

// ===========================================================================
// Robustness of the matcher
// ===========================================================================

#[test]
fn test_case_and_accents_are_ignored() {
    assert_eq!(intent_of("GÉNÉRER UN PLANNING"), Intent::GenerateSchedule);
    assert_eq!(intent_of("Generer un planning"), Intent::GenerateSchedule);
    assert_eq!(intent_of("puis-je poser des conges"), Intent::CheckVacationAvailability);
}

#[test]
fn test_keyword_inside_longer_sentence_still_matches() {
    assert_eq!(
        intent_of("bonjour, serait-il possible de générer un planning pour l'équipe ?"),
        Intent::GenerateSchedule
    );
}

#[test]
fn test_empty_and_whitespace_messages_are_unknown() {
    assert_eq!(intent_of(""), Intent::Unknown);
    assert_eq!(intent_of("   "), Intent::Unknown);
}

// ===========================================================================
// Parameters carried alongside classification
// ===========================================================================

#[test]
fn test_generate_schedule_defaults_to_current_monday() {
    let result = detect_intent("générer un planning", &clock());
    assert_eq!(result.params.week_start, Some(NaiveDate::from_ymd_opt(2023, 6, 12).unwrap()));
}

#[test]
fn test_vacation_request_carries_range_and_type() {
    let result =
        detect_intent("poser des congés du 01/07/2023 au 15/07/2023, je suis malade", &clock());
    assert_eq!(result.intent, Intent::CreateVacationRequest);
    assert_eq!(result.params.start_date, Some(NaiveDate::from_ymd_opt(2023, 7, 1).unwrap()));
    assert_eq!(result.params.end_date, Some(NaiveDate::from_ymd_opt(2023, 7, 15).unwrap()));
    assert_eq!(result.params.vacation_type, Some(VacationType::SickLeave));
}

#[test]
fn test_reminder_carries_the_raw_message() {
    let message = "rappelle-moi demain de valider les congés";
    let result = detect_intent(message, &clock());
    assert_eq!(result.intent, Intent::SetReminder);
    assert_eq!(result.params.message.as_deref(), Some(message));
    assert_eq!(result.params.date, Some(NaiveDate::from_ymd_opt(2023, 6, 16).unwrap()));
}
