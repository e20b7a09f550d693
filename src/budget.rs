//! Word budget selection
//!
//! Maps a length tier to the word range the description must land in, and
//! widens that range when the user supplied extra material to work in.

use crate::models::{LengthTier, WordBudget};

/// Default text of the context field before the user types anything.
pub const CONTEXT_PLACEHOLDER: &str = "Enter any additional context here...";

const BOTH_EXTRAS_BONUS: u32 = 15;
const ONE_EXTRA_BONUS: u32 = 10;

/// Normalize raw context input into an explicit optional.
///
/// Whitespace-only input and the untouched placeholder both count as absent.
/// A user who literally types the placeholder sentence gets the same
/// treatment.
pub fn normalize_context(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || raw == CONTEXT_PLACEHOLDER {
        None
    } else {
        Some(trimmed.to_string())
    }
}

pub fn has_context(raw: &str) -> bool {
    normalize_context(raw).is_some()
}

pub fn base_budget(length: LengthTier) -> WordBudget {
    match length {
        LengthTier::Short => WordBudget { min: 28, max: 30 },
        LengthTier::Medium => WordBudget { min: 48, max: 50 },
        LengthTier::Long => WordBudget { min: 68, max: 70 },
    }
}

pub fn compute_word_budget(
    length: LengthTier,
    has_context: bool,
    has_jewelry_info: bool,
) -> WordBudget {
    let base = base_budget(length);
    let bonus = match (has_context, has_jewelry_info) {
        (true, true) => BOTH_EXTRAS_BONUS,
        (true, false) | (false, true) => ONE_EXTRA_BONUS,
        (false, false) => 0,
    };

    WordBudget {
        min: base.min + bonus,
        max: base.max + bonus,
    }
}
