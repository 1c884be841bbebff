use crate::errors::{DashboardError, Result};
use crate::model::{
    AnswerDetail, Question, QuestionDetail, RequestLog, Student, Subject, TaskAnswer, UsageRow,
    Verdict,
};
use rusqlite::{params, Connection};
use std::path::Path;
use std::sync::{Arc, Mutex};
use uuid::Uuid;

/// Shared handle to the dashboard database. Every operation locks the
/// connection for its own duration only; the guard is the scope.
#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn init_schema(&self) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute_batch(crate::storage::schema::DDL)?;
        Ok(())
    }

    // write path: the ingestion seam; not exposed over HTTP

    pub fn insert_subject(&self, subject: &Subject) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO subjects(id, subject_name) VALUES (?1, ?2)",
            params![subject.id.to_string(), subject.name],
        )?;
        Ok(())
    }

    pub fn insert_student(&self, student: &Student) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO students(id, name) VALUES (?1, ?2)",
            params![student.id.to_string(), student.name],
        )?;
        Ok(())
    }

    pub fn insert_question(&self, question: &Question) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO questions(id, subject_id, question_text, preferred_answer)
             VALUES (?1, ?2, ?3, ?4)",
            params![
                question.id.to_string(),
                question.subject_id.to_string(),
                question.text,
                question.preferred_answer,
            ],
        )?;
        Ok(())
    }

    /// Inserts an answer after checking that its denormalized `subject_id`
    /// matches the question's subject.
    pub fn insert_task_answer(&self, answer: &TaskAnswer) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        let expected = {
            let mut stmt = conn.prepare("SELECT subject_id FROM questions WHERE id = ?1")?;
            let mut rows = stmt.query(params![answer.question_id.to_string()])?;
            let Some(row) = rows.next()? else {
                return Err(DashboardError::QuestionNotFound(answer.question_id));
            };
            uuid_column(0, row.get(0)?)?
        };
        if expected != answer.subject_id {
            return Err(DashboardError::SubjectMismatch {
                question_id: answer.question_id,
                expected,
                got: answer.subject_id,
            });
        }
        conn.execute(
            "INSERT INTO task_answers(id, subject_id, question_id, student_id, answer, status, ground_truth)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                answer.id.to_string(),
                answer.subject_id.to_string(),
                answer.question_id.to_string(),
                answer.student_id.to_string(),
                answer.answer,
                answer.status.as_stored(),
                answer.ground_truth.as_stored(),
            ],
        )?;
        Ok(())
    }

    pub fn insert_request_log(&self, log: &RequestLog) -> Result<()> {
        let conn = self.conn.lock().unwrap();
        conn.execute(
            "INSERT INTO request_logs(id, request_time, question_count, prompt_token_count,
                                      candidates_token_count, total_token_count, question_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            params![
                log.id.to_string(),
                log.request_time,
                log.question_count,
                log.prompt_token_count,
                log.candidates_token_count,
                log.total_token_count,
                log.question_id.to_string(),
            ],
        )?;
        Ok(())
    }

    // read path

    pub fn list_subjects(&self) -> Result<Vec<Subject>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, subject_name FROM subjects ORDER BY subject_name")?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(Subject {
                id: uuid_column(0, row.get(0)?)?,
                name: row.get(1)?,
            });
        }
        Ok(out)
    }

    pub fn get_subject(&self, id: Uuid) -> Result<Option<Subject>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare("SELECT id, subject_name FROM subjects WHERE id = ?1")?;
        let mut rows = stmt.query(params![id.to_string()])?;
        if let Some(row) = rows.next()? {
            Ok(Some(Subject {
                id: uuid_column(0, row.get(0)?)?,
                name: row.get(1)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// Loads every question of a subject together with its answers and each
    /// answer's student name in one query, so the detail page never issues a
    /// per-question or per-answer lookup.
    pub fn subject_questions(&self, subject_id: Uuid) -> Result<Vec<QuestionDetail>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT q.id, q.question_text, q.preferred_answer,
                    a.answer, a.status, a.ground_truth, st.name
             FROM questions q
             LEFT JOIN task_answers a ON a.question_id = q.id
             LEFT JOIN students st ON st.id = a.student_id
             WHERE q.subject_id = ?1
             ORDER BY q.id, a.id",
        )?;
        let mut rows = stmt.query(params![subject_id.to_string()])?;
        let mut out: Vec<QuestionDetail> = Vec::new();
        while let Some(row) = rows.next()? {
            let qid = uuid_column(0, row.get(0)?)?;
            let is_new = out.last().map(|d| d.question.id != qid).unwrap_or(true);
            if is_new {
                out.push(QuestionDetail {
                    question: Question {
                        id: qid,
                        subject_id,
                        text: row.get(1)?,
                        preferred_answer: row.get(2)?,
                    },
                    answers: Vec::new(),
                });
            }
            // answer columns are NULL when the question has no answers yet
            if let Some(answer) = row.get::<_, Option<String>>(3)? {
                let detail = AnswerDetail {
                    student_name: row.get::<_, Option<String>>(6)?.unwrap_or_default(),
                    answer,
                    status: Verdict::from_stored(row.get(4)?),
                    ground_truth: Verdict::from_stored(row.get(5)?),
                };
                if let Some(current) = out.last_mut() {
                    current.answers.push(detail);
                }
            }
        }
        Ok(out)
    }

    /// `(status, ground_truth)` for every answer of a subject, via the
    /// denormalized column.
    pub fn verdict_pairs(&self, subject_id: Uuid) -> Result<Vec<(Verdict, Verdict)>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt =
            conn.prepare("SELECT status, ground_truth FROM task_answers WHERE subject_id = ?1")?;
        let mut rows = stmt.query(params![subject_id.to_string()])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push((
                Verdict::from_stored(row.get(0)?),
                Verdict::from_stored(row.get(1)?),
            ));
        }
        Ok(out)
    }

    /// Per-subject sums over request logs, reached via the two-hop join
    /// request_logs -> questions -> subjects. Ordered by subject name.
    pub fn usage_rollup(&self) -> Result<Vec<UsageRow>> {
        let conn = self.conn.lock().unwrap();
        let mut stmt = conn.prepare(
            "SELECT s.subject_name,
                    SUM(l.request_time),
                    SUM(l.total_token_count),
                    SUM(l.prompt_token_count),
                    SUM(l.candidates_token_count),
                    COUNT(l.id)
             FROM request_logs l
             JOIN questions q ON q.id = l.question_id
             JOIN subjects s ON s.id = q.subject_id
             GROUP BY s.subject_name
             ORDER BY s.subject_name",
        )?;
        let mut rows = stmt.query([])?;
        let mut out = Vec::new();
        while let Some(row) = rows.next()? {
            out.push(UsageRow {
                subject_name: row.get(0)?,
                total_request_time: row.get(1)?,
                total_tokens: row.get(2)?,
                prompt_tokens: row.get(3)?,
                candidates_tokens: row.get(4)?,
                request_count: row.get(5)?,
            });
        }
        Ok(out)
    }

    /// Ungrouped row count; the average-inference-time denominator.
    pub fn count_request_logs(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let n = conn.query_row("SELECT COUNT(*) FROM request_logs", [], |r| r.get(0))?;
        Ok(n)
    }

    /// Audit for rows whose denormalized subject disagrees with the question's.
    /// The insert path rejects these, but data ingested out-of-band can drift.
    pub fn count_subject_mismatches(&self) -> Result<u64> {
        let conn = self.conn.lock().unwrap();
        let n = conn.query_row(
            "SELECT COUNT(*) FROM task_answers a
             JOIN questions q ON q.id = a.question_id
             WHERE a.subject_id <> q.subject_id",
            [],
            |r| r.get(0),
        )?;
        Ok(n)
    }
}

fn uuid_column(idx: usize, raw: String) -> rusqlite::Result<Uuid> {
    Uuid::parse_str(&raw).map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, rusqlite::types::Type::Text, Box::new(e))
    })
}
