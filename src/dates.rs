//! Date and date-range extraction from free text.
//!
//! Attempt order for a single date:
//! 1. Explicit numeric `DD/MM/YYYY` (also `.` and `-` separators,
//!    2-digit years expand to `20YY`)
//! 2. Relative phrases from the lexicon ("aujourd'hui", "demain", …)
//! 3. French weekday names — next occurrence, never today or earlier
//! 4. `None` — the caller applies its documented default
//!
//! Everything runs against an injected [`Clock`]; the functions are pure
//! and never panic, whatever the input.

use std::sync::OnceLock;

use chrono::{Datelike, Days, NaiveDate};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::clock::Clock;
use crate::lexicon::lexicon;
use crate::normalize::{contains_any, normalize};

// ---------------------------------------------------------------------------
// DateRange
// ---------------------------------------------------------------------------

/// An extracted date range. `start <= end` always holds: inverted user
/// input is swapped, and derived ranges grow forward from their start.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a range from two dates in either order.
    fn ordered(a: NaiveDate, b: NaiveDate) -> Self {
        if b < a {
            DateRange { start: b, end: a }
        } else {
            DateRange { start: a, end: b }
        }
    }

    /// Number of days spanned (`end - start`).
    pub fn days(&self) -> i64 {
        (self.end - self.start).num_days()
    }
}

// ---------------------------------------------------------------------------
// Compiled patterns
// ---------------------------------------------------------------------------

fn explicit_date_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})").expect("valid date regex")
    })
}

fn range_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"du (\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4}) au (\d{1,2})[/.\-](\d{1,2})[/.\-](\d{2,4})",
        )
        .expect("valid range regex")
    })
}

struct DurationPattern {
    re: Regex,
    unit_days: u64,
}

/// Duration phrases in match order: day forms before week forms, the
/// preposition-anchored forms before the bare `N jours` fallback.
fn duration_patterns() -> &'static [DurationPattern] {
    static PATTERNS: OnceLock<Vec<DurationPattern>> = OnceLock::new();
    PATTERNS.get_or_init(|| {
        [
            (r"pendant (\d+) jours?", 1),
            (r"pour (\d+) jours?", 1),
            (r"(\d+) jours?", 1),
            (r"pendant (\d+) semaines?", 7),
            (r"pour (\d+) semaines?", 7),
            (r"(\d+) semaines?", 7),
        ]
        .into_iter()
        .map(|(pattern, unit_days)| DurationPattern {
            re: Regex::new(pattern).expect("valid duration regex"),
            unit_days,
        })
        .collect()
    })
}

// ---------------------------------------------------------------------------
// Single date extraction
// ---------------------------------------------------------------------------

/// Extract a single date from free text, or `None` when nothing matches.
///
/// A numeric pattern that is not a real calendar date (month 13, day 45)
/// does not abort extraction — it simply falls through to the relative
/// and weekday attempts.
pub fn extract_date(text: &str, clock: &dyn Clock) -> Option<NaiveDate> {
    // 1. Explicit DD/MM/YYYY
    if let Some(caps) = explicit_date_re().captures(text) {
        if let Some(date) = parse_day_month_year(&caps[1], &caps[2], &caps[3]) {
            return Some(date);
        }
    }

    let normalized = normalize(text);
    let lex = lexicon();

    // 2. Relative phrases
    for rel in &lex.relative_dates {
        if contains_any(&normalized, &rel.phrases) {
            return add_days(clock.today(), rel.offset_days.max(0) as u64);
        }
    }

    // 3. Weekday names: next occurrence. A weekday that is today or
    // already past this week rolls forward seven days.
    let today = clock.today();
    let today_number = today.weekday().num_days_from_sunday();
    for weekday in &lex.weekdays {
        if normalized.contains(&weekday.word) {
            let mut days_ahead = weekday.number as i64 - today_number as i64;
            if days_ahead <= 0 {
                days_ahead += 7;
            }
            return add_days(today, days_ahead as u64);
        }
    }

    // 4. No date found
    None
}

/// Parse day/month/year capture texts; 2-digit years are 20YY.
fn parse_day_month_year(day: &str, month: &str, year: &str) -> Option<NaiveDate> {
    let day: u32 = day.parse().ok()?;
    let month: u32 = month.parse().ok()?;
    let year: i32 = if year.len() == 2 {
        2000 + year.parse::<i32>().ok()?
    } else {
        year.parse().ok()?
    };
    NaiveDate::from_ymd_opt(year, month, day)
}

fn add_days(date: NaiveDate, days: u64) -> Option<NaiveDate> {
    date.checked_add_days(Days::new(days))
}

fn add_days_saturating(date: NaiveDate, days: u64) -> NaiveDate {
    date.checked_add_days(Days::new(days)).unwrap_or(NaiveDate::MAX)
}

// ---------------------------------------------------------------------------
// Date range extraction
// ---------------------------------------------------------------------------

/// Extract a date range. Always returns a range; the fallbacks are part
/// of the contract (single date → one-day range, nothing → current week).
pub fn extract_date_range(text: &str, clock: &dyn Clock) -> DateRange {
    let normalized = normalize(text);

    // 1. Explicit "du D/M/Y au D/M/Y"
    if let Some(caps) = range_re().captures(&normalized) {
        let start = parse_day_month_year(&caps[1], &caps[2], &caps[3]);
        let end = parse_day_month_year(&caps[4], &caps[5], &caps[6]);
        if let (Some(start), Some(end)) = (start, end) {
            return DateRange::ordered(start, end);
        }
    }

    // 2. Relative durations ("pendant 3 jours", "pour 2 semaines", …).
    // The start is any date found elsewhere in the text, else today.
    for pattern in duration_patterns() {
        if let Some(caps) = pattern.re.captures(&normalized) {
            if let Ok(amount) = caps[1].parse::<u64>() {
                let start = extract_date(text, clock).unwrap_or_else(|| clock.today());
                let end = add_days_saturating(start, amount.saturating_mul(pattern.unit_days));
                return DateRange { start, end };
            }
        }
    }

    // 3. Single date → one-day range
    if let Some(date) = extract_date(text, clock) {
        return DateRange { start: date, end: add_days_saturating(date, 1) };
    }

    // 4. Default: today through next week
    let today = clock.today();
    DateRange { start: today, end: add_days_saturating(today, 7) }
}

// ---------------------------------------------------------------------------
// Week helpers
// ---------------------------------------------------------------------------

/// Monday of the current week (Sunday belongs to the preceding Monday).
pub fn current_monday(clock: &dyn Clock) -> NaiveDate {
    let today = clock.today();
    let back = today.weekday().num_days_from_monday() as u64;
    today.checked_sub_days(Days::new(back)).unwrap_or(today)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    /// Monday 2023-06-12.
    fn monday_clock() -> FixedClock {
        FixedClock(date(2023, 6, 12))
    }

    // -- Explicit dates --

    #[test]
    fn test_explicit_date_slash() {
        assert_eq!(extract_date("15/06/2023", &monday_clock()), Some(date(2023, 6, 15)));
    }

    #[test]
    fn test_explicit_date_two_digit_year() {
        assert_eq!(extract_date("15/06/23", &monday_clock()), Some(date(2023, 6, 15)));
    }

    #[test]
    fn test_explicit_date_dots_and_dashes() {
        assert_eq!(extract_date("le 15.06.2023", &monday_clock()), Some(date(2023, 6, 15)));
        assert_eq!(extract_date("le 15-06-2023", &monday_clock()), Some(date(2023, 6, 15)));
    }

    #[test]
    fn test_explicit_date_single_digit_fields() {
        assert_eq!(extract_date("1/2/2023", &monday_clock()), Some(date(2023, 2, 1)));
    }

    #[test]
    fn test_impossible_numeric_date_falls_through() {
        // Month 99 is not a date; with no other markers the result is None.
        assert_eq!(extract_date("45/99/2023", &monday_clock()), None);
    }

    // -- Relative phrases --

    #[test]
    fn test_aujourdhui_is_clock_today() {
        let clock = monday_clock();
        assert_eq!(extract_date("aujourd'hui", &clock), Some(clock.today()));
        let other = FixedClock(date(2024, 12, 31));
        assert_eq!(extract_date("aujourd'hui", &other), Some(other.today()));
    }

    #[test]
    fn test_ce_jour() {
        assert_eq!(extract_date("pour ce jour", &monday_clock()), Some(date(2023, 6, 12)));
    }

    #[test]
    fn test_demain() {
        assert_eq!(extract_date("demain", &monday_clock()), Some(date(2023, 6, 13)));
    }

    #[test]
    fn test_apres_demain_is_two_days_not_one() {
        // "après-demain" contains "demain"; the longer phrase must win.
        assert_eq!(extract_date("après-demain", &monday_clock()), Some(date(2023, 6, 14)));
        assert_eq!(extract_date("apres demain", &monday_clock()), Some(date(2023, 6, 14)));
    }

    #[test]
    fn test_semaine_prochaine() {
        assert_eq!(
            extract_date("la semaine prochaine", &monday_clock()),
            Some(date(2023, 6, 19))
        );
    }

    // -- Weekdays --

    #[test]
    fn test_weekday_later_this_week() {
        // From Monday, "mercredi" is in two days.
        assert_eq!(extract_date("mercredi", &monday_clock()), Some(date(2023, 6, 14)));
    }

    #[test]
    fn test_weekday_today_rolls_to_next_week() {
        // From Monday, "lundi" is next Monday, never today.
        assert_eq!(extract_date("lundi", &monday_clock()), Some(date(2023, 6, 19)));
    }

    #[test]
    fn test_weekday_sunday() {
        assert_eq!(extract_date("dimanche", &monday_clock()), Some(date(2023, 6, 18)));
    }

    #[test]
    fn test_weekday_already_passed_rolls_forward() {
        // From Thursday 2023-06-15, "mardi" is next week's Tuesday.
        let thursday = FixedClock(date(2023, 6, 15));
        assert_eq!(extract_date("mardi", &thursday), Some(date(2023, 6, 20)));
    }

    #[test]
    fn test_no_date_returns_none() {
        assert_eq!(extract_date("bonjour tout le monde", &monday_clock()), None);
        assert_eq!(extract_date("", &monday_clock()), None);
    }

    #[test]
    fn test_explicit_beats_relative() {
        // An explicit date wins over a relative phrase in the same text.
        assert_eq!(
            extract_date("demain ou le 20/06/2023", &monday_clock()),
            Some(date(2023, 6, 20))
        );
    }

    // -- Ranges --

    #[test]
    fn test_explicit_range() {
        let range = extract_date_range("du 01/01/2023 au 15/01/2023", &monday_clock());
        assert_eq!(range, DateRange { start: date(2023, 1, 1), end: date(2023, 1, 15) });
    }

    #[test]
    fn test_explicit_range_capitalized() {
        let range = extract_date_range("Du 01/01/2023 au 15/01/2023", &monday_clock());
        assert_eq!(range.start, date(2023, 1, 1));
    }

    #[test]
    fn test_inverted_range_is_swapped() {
        let range = extract_date_range("du 15/01/2023 au 01/01/2023", &monday_clock());
        assert!(range.start <= range.end);
        assert_eq!(range, DateRange { start: date(2023, 1, 1), end: date(2023, 1, 15) });
    }

    #[test]
    fn test_duration_days() {
        let range = extract_date_range("pendant 3 jours", &monday_clock());
        assert_eq!(range.start, date(2023, 6, 12));
        assert_eq!(range.end, date(2023, 6, 15));
    }

    #[test]
    fn test_duration_zero_days() {
        let range = extract_date_range("pendant 0 jour", &monday_clock());
        assert_eq!(range.days(), 0);
        assert!(range.start <= range.end);
    }

    #[test]
    fn test_duration_weeks() {
        let range = extract_date_range("pour 2 semaines", &monday_clock());
        assert_eq!(range.days(), 14);
    }

    #[test]
    fn test_bare_duration() {
        let range = extract_date_range("3 jours de congé", &monday_clock());
        assert_eq!(range.days(), 3);
    }

    #[test]
    fn test_duration_with_explicit_start() {
        let range = extract_date_range("pendant 5 jours à partir du 01/06/2023", &monday_clock());
        assert_eq!(range, DateRange { start: date(2023, 6, 1), end: date(2023, 6, 6) });
    }

    #[test]
    fn test_duration_span_matches_amount() {
        for n in [1u64, 7, 30, 365] {
            let text = format!("pendant {} jours", n);
            let range = extract_date_range(&text, &monday_clock());
            assert_eq!(range.days(), n as i64, "span for {}", text);
            assert!(range.start <= range.end);
        }
    }

    #[test]
    fn test_huge_duration_saturates() {
        let range = extract_date_range("pendant 99999999 semaines", &monday_clock());
        assert!(range.start <= range.end);
        assert_eq!(range.end, NaiveDate::MAX);
    }

    #[test]
    fn test_single_date_one_day_range() {
        let range = extract_date_range("le 15/06/2023", &monday_clock());
        assert_eq!(range, DateRange { start: date(2023, 6, 15), end: date(2023, 6, 16) });
    }

    #[test]
    fn test_default_range_is_current_week() {
        let range = extract_date_range("je voudrais des congés", &monday_clock());
        assert_eq!(range, DateRange { start: date(2023, 6, 12), end: date(2023, 6, 19) });
    }

    // -- Current Monday --

    #[test]
    fn test_current_monday_on_monday() {
        assert_eq!(current_monday(&monday_clock()), date(2023, 6, 12));
    }

    #[test]
    fn test_current_monday_midweek() {
        let wednesday = FixedClock(date(2023, 6, 14));
        assert_eq!(current_monday(&wednesday), date(2023, 6, 12));
    }

    #[test]
    fn test_current_monday_on_sunday_goes_back() {
        let sunday = FixedClock(date(2023, 6, 18));
        assert_eq!(current_monday(&sunday), date(2023, 6, 12));
    }
}
