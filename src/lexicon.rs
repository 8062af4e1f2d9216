//! French lexicon loader.
//!
//! Single consolidated loader for all locale word-list data: ordered
//! intent rules, weekday names, relative-date phrases, vacation-type and
//! period rules, first-person markers, stopwords, and sentiment lists.
//!
//! Uses the standard disk-first + `include_str!` fallback pattern. The
//! engine algorithms are locale-independent; only this pack is French —
//! swapping the YAML swaps the language.

use std::collections::HashSet;
use std::sync::OnceLock;

use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

use crate::extract::{Period, VacationType};
use crate::intent::Intent;

// ---------------------------------------------------------------------------
// Embedded fallback
// ---------------------------------------------------------------------------

const EMBEDDED_LEXICON: &str = include_str!("../data/lexicon_fr.yaml");

// ---------------------------------------------------------------------------
// YAML schema
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
struct LexiconYaml {
    intents: Vec<IntentEntry>,
    weekdays: Vec<WeekdayEntry>,
    relative_dates: Vec<RelativeDateEntry>,
    vacation_types: Vec<VacationTypeEntry>,
    periods: Vec<PeriodEntry>,
    first_person: Vec<String>,
    stopwords: Vec<String>,
    sentiment: SentimentYaml,
}

#[derive(Debug, Deserialize)]
struct IntentEntry {
    intent: Intent,
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct WeekdayEntry {
    word: String,
    number: u32,
}

#[derive(Debug, Deserialize)]
struct RelativeDateEntry {
    phrases: Vec<String>,
    offset_days: i64,
}

#[derive(Debug, Deserialize)]
struct VacationTypeEntry {
    #[serde(rename = "type")]
    vacation_type: VacationType,
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct PeriodEntry {
    period: Period,
    keywords: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct SentimentYaml {
    positive: Vec<String>,
    negative: Vec<String>,
}

// ---------------------------------------------------------------------------
// Errors
// ---------------------------------------------------------------------------

/// Failure to load or validate the lexicon pack.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("YAML parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    #[error("lexicon defines no intent rules")]
    NoIntentRules,
}

// ---------------------------------------------------------------------------
// Runtime lexicon — the loaded, indexed form
// ---------------------------------------------------------------------------

/// One intent rule: an intent and the keyword set that triggers it.
#[derive(Debug, Clone)]
pub struct IntentRule {
    pub intent: Intent,
    pub keywords: Vec<String>,
}

/// A weekday name with its day number (0 = Sunday).
#[derive(Debug, Clone)]
pub struct Weekday {
    pub word: String,
    pub number: u32,
}

/// A relative-date phrase set with its offset from today.
#[derive(Debug, Clone)]
pub struct RelativeDate {
    pub phrases: Vec<String>,
    pub offset_days: i64,
}

/// One vacation-type rule.
#[derive(Debug, Clone)]
pub struct VacationRule {
    pub vacation_type: VacationType,
    pub keywords: Vec<String>,
}

/// One reporting-period rule.
#[derive(Debug, Clone)]
pub struct PeriodRule {
    pub period: Period,
    pub keywords: Vec<String>,
}

/// Loaded French lexicon. Rule vectors preserve YAML order; every
/// "first match wins" loop in the crate iterates them as-is.
#[derive(Debug)]
pub struct Lexicon {
    /// Ordered intent rules — the classifier's precedence list.
    pub intent_rules: Vec<IntentRule>,
    /// Weekday names, Monday through Sunday.
    pub weekdays: Vec<Weekday>,
    /// Relative-date phrases, longest-shadowing-first.
    pub relative_dates: Vec<RelativeDate>,
    /// Vacation-type rules in priority order.
    pub vacation_rules: Vec<VacationRule>,
    /// Period rules in priority order.
    pub period_rules: Vec<PeriodRule>,
    /// First-person markers ("mon", "moi", …).
    pub first_person: Vec<String>,
    /// Stopwords for keyword extraction.
    pub stopwords: HashSet<String>,
    /// Positive sentiment words.
    pub positive_words: Vec<String>,
    /// Negative sentiment words.
    pub negative_words: Vec<String>,
}

// ---------------------------------------------------------------------------
// Singleton
// ---------------------------------------------------------------------------

static LEXICON: OnceLock<Lexicon> = OnceLock::new();

/// Get the loaded lexicon (singleton, loaded on first call).
pub fn lexicon() -> &'static Lexicon {
    LEXICON.get_or_init(load_lexicon)
}

// ---------------------------------------------------------------------------
// Loader
// ---------------------------------------------------------------------------

fn load_lexicon() -> Lexicon {
    // Disk-first, embedded fallback
    let yaml_str = std::fs::read_to_string("data/lexicon_fr.yaml")
        .unwrap_or_else(|_| EMBEDDED_LEXICON.to_string());

    parse_lexicon(&yaml_str).unwrap_or_else(|e| {
        warn!(error = %e, "failed to parse lexicon_fr.yaml from disk, using embedded pack");
        parse_lexicon(EMBEDDED_LEXICON).expect("embedded lexicon_fr.yaml must parse")
    })
}

fn parse_lexicon(yaml_str: &str) -> Result<Lexicon, LexiconError> {
    let raw: LexiconYaml = serde_yaml::from_str(yaml_str)?;

    if raw.intents.is_empty() {
        return Err(LexiconError::NoIntentRules);
    }

    let intent_rules = raw
        .intents
        .into_iter()
        .map(|e| IntentRule { intent: e.intent, keywords: e.keywords })
        .collect();
    let weekdays = raw
        .weekdays
        .into_iter()
        .map(|e| Weekday { word: e.word, number: e.number })
        .collect();
    let relative_dates = raw
        .relative_dates
        .into_iter()
        .map(|e| RelativeDate { phrases: e.phrases, offset_days: e.offset_days })
        .collect();
    let vacation_rules = raw
        .vacation_types
        .into_iter()
        .map(|e| VacationRule { vacation_type: e.vacation_type, keywords: e.keywords })
        .collect();
    let period_rules = raw
        .periods
        .into_iter()
        .map(|e| PeriodRule { period: e.period, keywords: e.keywords })
        .collect();

    Ok(Lexicon {
        intent_rules,
        weekdays,
        relative_dates,
        vacation_rules,
        period_rules,
        first_person: raw.first_person,
        stopwords: raw.stopwords.into_iter().collect(),
        positive_words: raw.sentiment.positive,
        negative_words: raw.sentiment.negative,
    })
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
