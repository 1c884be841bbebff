use crate::errors::{DashboardError, Result};
use crate::model::Verdict;
use crate::storage::Store;
use serde::Serialize;
use uuid::Uuid;

/// Agreement between evaluator verdicts and ground truth for one subject.
///
/// `percent` is `None` when nothing has been evaluated yet — "undefined", not
/// zero. Rendering shows "n/a" for it; a genuine 0% stays `Some(0.0)`.
#[derive(Debug, Clone, Serialize)]
pub struct SubjectAccuracy {
    pub total_evaluated: u64,
    pub correct: u64,
    pub percent: Option<f64>,
}

/// Computes evaluation accuracy for a subject, or `SubjectNotFound`.
pub fn subject_accuracy(store: &Store, subject_id: Uuid) -> Result<SubjectAccuracy> {
    if store.get_subject(subject_id)?.is_none() {
        return Err(DashboardError::SubjectNotFound(subject_id));
    }
    Ok(accuracy(&store.verdict_pairs(subject_id)?))
}

/// The fold itself, over `(status, ground_truth)` pairs.
pub fn accuracy(pairs: &[(Verdict, Verdict)]) -> SubjectAccuracy {
    let total_evaluated = pairs.iter().filter(|(status, _)| status.is_known()).count() as u64;
    // No is_known() filter on the numerator: agrees_with already rejects
    // Unknown on either side, the way SQL `status = ground_truth` drops NULLs.
    let correct = pairs
        .iter()
        .filter(|(status, truth)| status.agrees_with(*truth))
        .count() as u64;
    let percent = if total_evaluated > 0 {
        Some(correct as f64 / total_evaluated as f64 * 100.0)
    } else {
        None
    };
    SubjectAccuracy {
        total_evaluated,
        correct,
        percent,
    }
}
