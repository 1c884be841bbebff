use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Three-valued evaluator verdict. Replaces the nullable boolean pair the
/// schema stores: NULL maps to `Unknown`, 1 to `Pass`, 0 to `Fail`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    #[default]
    Unknown,
    Pass,
    Fail,
}

impl Verdict {
    /// An answer counts as evaluated once a verdict exists.
    pub fn is_known(self) -> bool {
        !matches!(self, Verdict::Unknown)
    }

    /// SQL-style equality: `Unknown` agrees with nothing, including `Unknown`,
    /// the way `NULL = x` is never true.
    pub fn agrees_with(self, other: Verdict) -> bool {
        matches!(
            (self, other),
            (Verdict::Pass, Verdict::Pass) | (Verdict::Fail, Verdict::Fail)
        )
    }

    pub fn from_stored(v: Option<bool>) -> Self {
        match v {
            None => Verdict::Unknown,
            Some(true) => Verdict::Pass,
            Some(false) => Verdict::Fail,
        }
    }

    pub fn as_stored(self) -> Option<bool> {
        match self {
            Verdict::Unknown => None,
            Verdict::Pass => Some(true),
            Verdict::Fail => Some(false),
        }
    }
}

/// A topic grouping questions. `name` is unique.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subject {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Student {
    pub id: Uuid,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Question {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub text: String,
    pub preferred_answer: Option<String>,
}

/// A student's answer to a question, plus the evaluator's verdict (`status`)
/// and the human-verified verdict (`ground_truth`).
///
/// `subject_id` duplicates the question's subject so per-subject scans skip
/// the join; `Store::insert_task_answer` rejects rows where the two disagree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskAnswer {
    pub id: Uuid,
    pub subject_id: Uuid,
    pub question_id: Uuid,
    pub student_id: Uuid,
    pub answer: String,
    pub status: Verdict,
    pub ground_truth: Verdict,
}

/// One row per evaluation API call made against a question.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequestLog {
    pub id: Uuid,
    /// Wall-clock duration of the call, in seconds.
    pub request_time: f64,
    pub question_count: u32,
    pub prompt_token_count: u64,
    pub candidates_token_count: u64,
    pub total_token_count: u64,
    pub question_id: Uuid,
}

/// One answer as shown on the subject detail page, student name attached.
#[derive(Debug, Clone, Serialize)]
pub struct AnswerDetail {
    pub student_name: String,
    pub answer: String,
    pub status: Verdict,
    pub ground_truth: Verdict,
}

/// A question with all of its answers, loaded in a single join-fetch.
#[derive(Debug, Clone, Serialize)]
pub struct QuestionDetail {
    pub question: Question,
    pub answers: Vec<AnswerDetail>,
}

/// Per-subject sums over `request_logs`, straight from the grouped query.
/// Cost math happens in `stats::usage`, not here.
#[derive(Debug, Clone)]
pub struct UsageRow {
    pub subject_name: String,
    pub total_request_time: f64,
    pub total_tokens: u64,
    pub prompt_tokens: u64,
    pub candidates_tokens: u64,
    pub request_count: u64,
}
