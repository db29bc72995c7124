//! Record Normalization - canonical call record fields from raw outcomes
//!
//! Turns a raw per-call classification or a per-phone outcome tally into
//! the canonical status / sentiment / call_human / country shape. Every
//! function here is total: malformed input falls back to a documented
//! default, never an error.

use std::collections::HashMap;

use crate::domain::value_objects::{Country, OutcomeBreakdown, Sentiment};

/// Outcome labels ordered by severity. `dominant_status` scans this list
/// top-down and returns the first label with a positive count: one
/// "success" among a hundred "hang up"s still wins. Priority, not
/// majority.
pub const STATUS_PRIORITY: [&str; 8] = [
    "success",
    "callback requested",
    "not interested",
    "avoid callback",
    "not the right person",
    "wrong flow",
    "hang up",
    "voicemail",
];

/// Sentinel status for an empty breakdown or an unclassified call
pub const STATUS_UNKNOWN: &str = "unknown";
pub const STATUS_FAILED: &str = "failed";
pub const STATUS_VOICEMAIL: &str = "voicemail";
pub const STATUS_CALLBACK_REQUESTED: &str = "callback requested";

/// Fallback summary for a breakdown with no positive counts
pub const EMPTY_SUMMARY: &str = "no calls recorded";

/// Strip spaces and collapse a leading run of '+' to a single '+'.
///
/// Best-effort: any input yields some string, never an error.
pub fn clean_phone(raw: &str) -> String {
    let mut cleaned = raw.replace(' ', "");
    while cleaned.starts_with("++") {
        cleaned.remove(0);
    }
    cleaned
}

/// Highest-priority outcome present in the breakdown.
///
/// Falls back to the breakdown's first label (insertion order) when no
/// priority label has a positive count, and to [`STATUS_UNKNOWN`] when
/// the breakdown is empty.
pub fn dominant_status(breakdown: &OutcomeBreakdown) -> String {
    for status in STATUS_PRIORITY {
        if breakdown.get(status) > 0 {
            return status.to_string();
        }
    }
    breakdown
        .first_label()
        .unwrap_or(STATUS_UNKNOWN)
        .to_string()
}

/// Sentiment derived from the dominant outcome
pub fn sentiment_for(status: &str) -> Sentiment {
    match status {
        "success" => Sentiment::Satisfied,
        "not interested" | "avoid callback" => Sentiment::Upset,
        _ => Sentiment::Neutral,
    }
}

/// Whether the outcome requires human follow-up.
///
/// Keyed off the dominant status only: a record needs a human iff the
/// caller asked to be called back.
pub fn needs_human(status: &str) -> bool {
    status == STATUS_CALLBACK_REQUESTED
}

/// Country derived from the (cleaned) phone prefix
pub fn country_for(phone: &str) -> Country {
    if phone.starts_with("+351") {
        Country::Pt
    } else {
        Country::Es
    }
}

/// Human-readable recap of the breakdown: "1 success, 9 hang up".
///
/// Labels with non-positive counts are skipped; [`EMPTY_SUMMARY`] when
/// nothing remains.
pub fn compose_summary(breakdown: &OutcomeBreakdown) -> String {
    let parts: Vec<String> = breakdown
        .iter()
        .filter(|(_, count)| *count > 0)
        .map(|(label, count)| format!("{} {}", count, label))
        .collect();

    if parts.is_empty() {
        EMPTY_SUMMARY.to_string()
    } else {
        parts.join(", ")
    }
}

/// Aggregate-mode call length: minutes excluding voicemail, in seconds
pub fn aggregate_duration_secs(minutes_excluding_voicemail: f64) -> i32 {
    (minutes_excluding_voicemail * 60.0).round() as i32
}

/// Aggregate-mode attempt count: sum of every breakdown value, voicemail
/// attempts included. Deliberately asymmetric with the duration rule
/// above, which excludes voicemail time.
pub fn aggregate_attempts(breakdown: &OutcomeBreakdown) -> i32 {
    breakdown.total() as i32
}

/// Per-call-mode attempt ordinals: the Nth call to the same phone, over
/// a sequence already sorted by timestamp ascending. Ties keep input
/// order.
pub fn attempt_numbers<'a, I>(phones_in_time_order: I) -> Vec<i32>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut seen: HashMap<String, i32> = HashMap::new();
    phones_in_time_order
        .into_iter()
        .map(|phone| {
            let counter = seen.entry(phone.to_string()).or_insert(0);
            *counter += 1;
            *counter
        })
        .collect()
}
