//! planbot — rule-based French NLU and guided conversations for a
//! workforce-scheduling assistant.
//!
//! Two cooperating engines:
//!
//! - **Intent pipeline**: normalize a free-text message, classify it
//!   against an ordered keyword-rule table, then run per-intent slot
//!   extractors (dates, date ranges, vacation types, reporting periods,
//!   keywords, sentiment). Entry point: [`intent::detect_intent`].
//! - **Dialog engine**: a step graph that drives the multi-turn
//!   schedule-generation conversation, one validated answer at a time.
//!   Entry point: [`dialogue::advance`].
//!
//! All French vocabulary lives in `data/lexicon_fr.yaml` (embedded at
//! build time, overridable on disk); the algorithms themselves are
//! locale-independent. Everything here is deterministic and pure given
//! a [`clock::Clock`] — no I/O, no wall-clock reads, no hidden state
//! beyond the lazily loaded lexicon.

pub mod clock;
pub mod dates;
pub mod dialogue;
pub mod extract;
pub mod intent;
pub mod lexicon;
pub mod normalize;
pub mod summary;

pub use clock::{Clock, FixedClock, SystemClock};
pub use dialogue::{advance, DialogSession, StepId, TurnOutcome};
pub use intent::{detect_intent, DetectedIntent, Intent, IntentParams};
