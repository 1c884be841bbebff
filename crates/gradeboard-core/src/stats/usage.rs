use crate::errors::Result;
use crate::storage::Store;
use serde::Serialize;

/// USD per million prompt tokens.
pub const INPUT_PRICE_PER_MILLION_TOKENS: f64 = 0.075;
/// USD per million candidate tokens.
pub const OUTPUT_PRICE_PER_MILLION_TOKENS: f64 = 0.30;

#[derive(Debug, Clone, Serialize)]
pub struct SubjectUsage {
    pub subject_name: String,
    pub request_count: u64,
    pub total_request_time: f64,
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub candidates_tokens: u64,
    pub input_cost: f64,
    pub output_cost: f64,
    pub total_cost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct UsageSummary {
    /// Per-subject rollups, ordered by subject name.
    pub subjects: Vec<SubjectUsage>,
    pub grand_total_tokens: u64,
    pub grand_total_cost: f64,
    pub grand_total_time: f64,
    /// Grand total time over the ungrouped request count; 0.0 when the log
    /// table is empty. Deliberately not the accuracy module's `None` sentinel.
    pub average_inference_time: f64,
}

/// Token, cost, and latency rollup across all request logs.
pub fn usage_summary(store: &Store) -> Result<UsageSummary> {
    let rows = store.usage_rollup()?;

    let mut subjects = Vec::with_capacity(rows.len());
    let mut grand_total_tokens = 0u64;
    let mut grand_total_cost = 0.0f64;
    let mut grand_total_time = 0.0f64;

    for row in rows {
        let input_cost = row.prompt_tokens as f64 / 1_000_000.0 * INPUT_PRICE_PER_MILLION_TOKENS;
        let output_cost =
            row.candidates_tokens as f64 / 1_000_000.0 * OUTPUT_PRICE_PER_MILLION_TOKENS;
        let total_cost = input_cost + output_cost;

        grand_total_tokens += row.total_tokens;
        grand_total_cost += total_cost;
        grand_total_time += row.total_request_time;

        subjects.push(SubjectUsage {
            subject_name: row.subject_name,
            request_count: row.request_count,
            total_request_time: row.total_request_time,
            total_tokens: row.total_tokens,
            prompt_tokens: row.prompt_tokens,
            candidates_tokens: row.candidates_tokens,
            input_cost,
            output_cost,
            total_cost,
        });
    }

    let total_requests = store.count_request_logs()?;
    let average_inference_time = if total_requests > 0 {
        grand_total_time / total_requests as f64
    } else {
        0.0
    };

    Ok(UsageSummary {
        subjects,
        grand_total_tokens,
        grand_total_cost,
        grand_total_time,
        average_inference_time,
    })
}
