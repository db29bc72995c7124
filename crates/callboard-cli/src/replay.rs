//! Offline export replay
//!
//! Two export shapes are supported:
//! - aggregate: one entry per phone with a per-outcome tally
//! - per-call: one entry per individual classified call
//!
//! Both are normalized into the wire payload with the same rules the
//! dashboard expects, then posted one at a time with a politeness delay.

use std::time::Duration;

use colored::Colorize;
use serde::Deserialize;

use callboard::{normalize, Country, OutcomeBreakdown};

use crate::api::{CallPayload, CallboardClient, PostOutcome};

/// One entry of the aggregate export: a per-phone outcome tally
#[derive(Debug, Deserialize)]
pub struct AggregateEntry {
    pub phone: String,
    #[serde(default)]
    pub partner_name: Option<String>,
    #[serde(default)]
    pub result_breakdown: OutcomeBreakdown,
    #[serde(default)]
    pub minutes_excluding_voicemail: f64,
}

/// One entry of the per-call export: a single classified call
#[derive(Debug, Deserialize)]
pub struct CallEntry {
    pub phone: String,
    #[serde(default)]
    pub partner: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub duration: Option<i64>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

fn flag(value: bool) -> String {
    if value { "TRUE" } else { "FALSE" }.to_string()
}

/// Build the wire payload for one aggregate entry
pub fn build_aggregate_payload(entry: &AggregateEntry) -> CallPayload {
    let phone = normalize::clean_phone(&entry.phone);
    let status = normalize::dominant_status(&entry.result_breakdown);
    let duration = normalize::aggregate_duration_secs(entry.minutes_excluding_voicemail);

    CallPayload {
        sentiment: normalize::sentiment_for(&status).to_string(),
        call_human: flag(normalize::needs_human(&status)),
        summary: normalize::compose_summary(&entry.result_breakdown),
        attempt: normalize::aggregate_attempts(&entry.result_breakdown).to_string(),
        duration: duration.to_string(),
        country: normalize::country_for(&phone).to_string(),
        created_at: None,
        status,
        phone,
    }
}

/// Build wire payloads for a per-call export.
///
/// Entries are sorted by timestamp so attempt numbers become the Nth
/// call to each phone; entries without a phone are dropped. An explicit
/// country overrides the per-phone derivation for the whole file.
pub fn build_call_payloads(
    mut entries: Vec<CallEntry>,
    country_override: Option<Country>,
) -> Vec<CallPayload> {
    entries.retain(|entry| !entry.phone.trim().is_empty());
    for entry in &mut entries {
        entry.phone = normalize::clean_phone(&entry.phone);
    }
    entries.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));

    let attempts = normalize::attempt_numbers(entries.iter().map(|e| e.phone.as_str()));

    entries
        .iter()
        .zip(attempts)
        .map(|(entry, attempt)| {
            let status = entry
                .status
                .clone()
                .unwrap_or_else(|| normalize::STATUS_UNKNOWN.to_string());
            let partner = entry.partner.as_deref().unwrap_or("unknown");
            let country =
                country_override.unwrap_or_else(|| normalize::country_for(&entry.phone));

            CallPayload {
                phone: entry.phone.clone(),
                sentiment: normalize::sentiment_for(&status).to_string(),
                call_human: flag(normalize::needs_human(&status)),
                summary: format!("{} - {}", partner, status),
                attempt: attempt.to_string(),
                duration: entry.duration.unwrap_or(0).max(0).to_string(),
                country: country.to_string(),
                created_at: entry.timestamp.clone(),
                status,
            }
        })
        .collect()
}

/// Display label for one batch entry
pub fn aggregate_label(entry: &AggregateEntry) -> String {
    entry
        .partner_name
        .clone()
        .unwrap_or_else(|| "unknown".to_string())
}

/// Counters for one replay run
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
}

/// Post a batch of labeled payloads, one bad record never aborting the
/// rest. `skip` drops an already-posted prefix.
pub async fn run(
    client: &CallboardClient,
    batch: Vec<(String, CallPayload)>,
    send_delay: Duration,
    skip: usize,
) -> ReplayStats {
    let batch: Vec<_> = batch.into_iter().skip(skip).collect();
    let mut stats = ReplayStats {
        total: batch.len(),
        ..Default::default()
    };

    for (i, (label, payload)) in batch.iter().enumerate() {
        println!("[{:>4}/{}] {} -- {}", i + 1, stats.total, payload.phone, label);
        println!(
            "          status={} | sentiment={} | attempt={} | duration={}s",
            payload.status, payload.sentiment, payload.attempt, payload.duration
        );

        match client.post_call(payload).await {
            PostOutcome::Delivered(code) => {
                println!("          {} HTTP {}", "OK".green(), code);
                stats.succeeded += 1;
            }
            PostOutcome::Failed(Some(code)) => {
                println!("          {} after retry (HTTP {})", "SKIPPED".red(), code);
                stats.failed += 1;
            }
            PostOutcome::Failed(None) => {
                println!("          {} after retry (network error)", "SKIPPED".red());
                stats.failed += 1;
            }
        }

        tokio::time::sleep(send_delay).await;
    }

    println!();
    println!("{}", "-".repeat(50));
    println!("Succeeded : {}/{}", stats.succeeded, stats.total);
    println!("Failed    : {}/{}", stats.failed, stats.total);

    stats
}
