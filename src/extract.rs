//! Slot extractors: vacation type, reporting period, employee reference,
//! keywords, and sentiment.
//!
//! Every extractor follows the same shape: normalize once, walk an
//! ordered rule table from the lexicon, first match wins, documented
//! default otherwise. The tables live in `data/lexicon_fr.yaml`; the
//! loops here are locale-independent.

use serde::{Deserialize, Serialize};

use crate::lexicon::lexicon;
use crate::normalize::{contains_any, normalize};

// ---------------------------------------------------------------------------
// Extracted value types
// ---------------------------------------------------------------------------

/// Category of a leave request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VacationType {
    SickLeave,
    Training,
    Family,
    Unpaid,
    RemoteWork,
    /// Ordinary paid vacation — the default when nothing else matches.
    Vacation,
}

impl VacationType {
    pub fn as_str(&self) -> &'static str {
        match self {
            VacationType::SickLeave => "sick_leave",
            VacationType::Training => "training",
            VacationType::Family => "family",
            VacationType::Unpaid => "unpaid",
            VacationType::RemoteWork => "remote_work",
            VacationType::Vacation => "vacation",
        }
    }
}

/// Reporting period for statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Period {
    Week,
    Month,
    Quarter,
    Year,
}

impl Period {
    pub fn as_str(&self) -> &'static str {
        match self {
            Period::Week => "week",
            Period::Month => "month",
            Period::Quarter => "quarter",
            Period::Year => "year",
        }
    }
}

/// Coarse message sentiment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sentiment {
    Positive,
    Negative,
    Neutral,
}

// ---------------------------------------------------------------------------
// Extractors
// ---------------------------------------------------------------------------

/// Classify the vacation type mentioned in a message.
///
/// Rule priority is fixed (sick leave down to remote work) and
/// independent of keyword position: "malade" beats "famille" even when
/// "famille" appears first in the text.
pub fn extract_vacation_type(text: &str) -> VacationType {
    let normalized = normalize(text);
    for rule in &lexicon().vacation_rules {
        if contains_any(&normalized, &rule.keywords) {
            return rule.vacation_type;
        }
    }
    VacationType::Vacation
}

/// Extract the reporting period from a message; month when unspecified.
pub fn extract_period(text: &str) -> Period {
    let normalized = normalize(text);
    for rule in &lexicon().period_rules {
        if contains_any(&normalized, &rule.keywords) {
            return rule.period;
        }
    }
    Period::Month
}

/// Resolve which employee a message refers to.
///
/// First-person markers ("mon", "moi", …) mean the current user, which
/// is represented as `None` — the integration layer substitutes its own
/// session identity. Matching third-party names against the employee
/// directory is an extension point: the directory lives behind the REST
/// API, so this core cannot resolve names and returns `None` for them
/// as well.
pub fn extract_employee_info(text: &str) -> Option<String> {
    let normalized = normalize(text);
    if contains_any(&normalized, &lexicon().first_person) {
        return None;
    }
    None
}

/// Extract content keywords: whitespace tokens minus stopwords, tokens
/// of two characters or fewer, and purely numeric tokens.
pub fn extract_keywords(text: &str) -> Vec<String> {
    let normalized = normalize(text);
    let stopwords = &lexicon().stopwords;
    normalized
        .split_whitespace()
        .filter(|word| {
            word.chars().count() > 2
                && !stopwords.contains(*word)
                && !word.chars().all(|c| c.is_ascii_digit())
        })
        .map(str::to_string)
        .collect()
}

/// Score a message against the sentiment lexicons. The side with
/// strictly more hits wins; ties (including zero hits) are neutral.
pub fn detect_sentiment(text: &str) -> Sentiment {
    let normalized = normalize(text);
    let lex = lexicon();

    let positive = lex.positive_words.iter().filter(|w| normalized.contains(w.as_str())).count();
    let negative = lex.negative_words.iter().filter(|w| normalized.contains(w.as_str())).count();

    if positive > negative {
        Sentiment::Positive
    } else if negative > positive {
        Sentiment::Negative
    } else {
        Sentiment::Neutral
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
