pub const DDL: &str = r#"
CREATE TABLE IF NOT EXISTS subjects (
  id TEXT PRIMARY KEY,
  subject_name TEXT NOT NULL UNIQUE
);

CREATE TABLE IF NOT EXISTS students (
  id TEXT PRIMARY KEY,
  name TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS questions (
  id TEXT PRIMARY KEY,
  subject_id TEXT NOT NULL REFERENCES subjects(id),
  question_text TEXT NOT NULL,
  preferred_answer TEXT
);

CREATE TABLE IF NOT EXISTS task_answers (
  id TEXT PRIMARY KEY,
  subject_id TEXT NOT NULL REFERENCES subjects(id),
  question_id TEXT NOT NULL REFERENCES questions(id),
  student_id TEXT NOT NULL REFERENCES students(id),
  answer TEXT NOT NULL,
  status INTEGER,
  ground_truth INTEGER
);

-- subject_id is denormalized onto task_answers for exactly this scan
CREATE INDEX IF NOT EXISTS idx_task_answers_subject ON task_answers(subject_id);

CREATE TABLE IF NOT EXISTS request_logs (
  id TEXT PRIMARY KEY,
  request_time REAL NOT NULL,
  question_count INTEGER NOT NULL,
  prompt_token_count INTEGER NOT NULL,
  candidates_token_count INTEGER NOT NULL,
  total_token_count INTEGER NOT NULL,
  question_id TEXT NOT NULL REFERENCES questions(id)
);
"#;
