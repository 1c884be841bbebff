use gradeboard_core::errors::DashboardError;
use gradeboard_core::model::{Question, Student, Subject, TaskAnswer};
use gradeboard_core::stats::accuracy::{accuracy, subject_accuracy};
use gradeboard_core::storage::Store;
use tempfile::tempdir;
use uuid::Uuid;

use gradeboard_core::model::Verdict::{Fail, Pass, Unknown};

#[test]
fn empty_input_is_undefined_not_zero() {
    let result = accuracy(&[]);
    assert_eq!(result.total_evaluated, 0);
    assert_eq!(result.correct, 0);
    assert_eq!(result.percent, None);
}

#[test]
fn agreement_matrix_follows_null_propagation() {
    assert!(Pass.agrees_with(Pass));
    assert!(Fail.agrees_with(Fail));
    assert!(!Pass.agrees_with(Fail));
    assert!(!Fail.agrees_with(Pass));
    // Unknown never agrees, not even with Unknown
    assert!(!Unknown.agrees_with(Unknown));
    assert!(!Unknown.agrees_with(Pass));
    assert!(!Pass.agrees_with(Unknown));
}

#[test]
fn exact_percentage_for_evaluated_rows() {
    // 4 evaluated, 3 agreeing
    let result = accuracy(&[(Pass, Pass), (Pass, Pass), (Fail, Fail), (Pass, Fail)]);
    assert_eq!(result.total_evaluated, 4);
    assert_eq!(result.correct, 3);
    assert_eq!(result.percent, Some(75.0));
}

#[test]
fn unevaluated_rows_are_excluded_from_both_counts() {
    let result = accuracy(&[(Unknown, Pass), (Unknown, Unknown), (Pass, Pass)]);
    assert_eq!(result.total_evaluated, 1);
    assert_eq!(result.correct, 1);
    assert_eq!(result.percent, Some(100.0));
}

#[test]
fn missing_ground_truth_counts_toward_denominator_only() {
    // evaluated (status known) but ground truth unknown: in the denominator,
    // never in the numerator
    let result = accuracy(&[(Pass, Unknown)]);
    assert_eq!(result.total_evaluated, 1);
    assert_eq!(result.correct, 0);
    // a true 0%, distinguishable from the undefined sentinel
    assert_eq!(result.percent, Some(0.0));
}

#[test]
fn store_backed_accuracy_and_not_found() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = Store::open(&dir.path().join("gradeboard.db"))?;
    store.init_schema()?;

    let algebra = Subject {
        id: Uuid::new_v4(),
        name: "Algebra".into(),
    };
    store.insert_subject(&algebra)?;
    let ada = Student {
        id: Uuid::new_v4(),
        name: "Ada".into(),
    };
    store.insert_student(&ada)?;
    let q = Question {
        id: Uuid::new_v4(),
        subject_id: algebra.id,
        text: "What is 2 + 2?".into(),
        preferred_answer: None,
    };
    store.insert_question(&q)?;

    for (status, truth) in [(Pass, Pass), (Fail, Fail), (Pass, Fail), (Unknown, Pass)] {
        store.insert_task_answer(&TaskAnswer {
            id: Uuid::new_v4(),
            subject_id: algebra.id,
            question_id: q.id,
            student_id: ada.id,
            answer: "4".into(),
            status,
            ground_truth: truth,
        })?;
    }

    let result = subject_accuracy(&store, algebra.id)?;
    assert_eq!(result.total_evaluated, 3);
    assert_eq!(result.correct, 2);
    let percent = result.percent.expect("evaluated rows exist");
    assert!((percent - 200.0 / 3.0).abs() < 1e-9);

    let err = subject_accuracy(&store, Uuid::new_v4()).unwrap_err();
    assert!(matches!(err, DashboardError::SubjectNotFound(_)));

    Ok(())
}

#[test]
fn subject_with_no_evaluated_answers_is_undefined() -> anyhow::Result<()> {
    let dir = tempdir()?;
    let store = Store::open(&dir.path().join("gradeboard.db"))?;
    store.init_schema()?;

    let biology = Subject {
        id: Uuid::new_v4(),
        name: "Biology".into(),
    };
    store.insert_subject(&biology)?;
    let ada = Student {
        id: Uuid::new_v4(),
        name: "Ada".into(),
    };
    store.insert_student(&ada)?;
    let q = Question {
        id: Uuid::new_v4(),
        subject_id: biology.id,
        text: "Name a cell organelle.".into(),
        preferred_answer: None,
    };
    store.insert_question(&q)?;
    store.insert_task_answer(&TaskAnswer {
        id: Uuid::new_v4(),
        subject_id: biology.id,
        question_id: q.id,
        student_id: ada.id,
        answer: "mitochondria".into(),
        status: Unknown,
        ground_truth: Pass,
    })?;

    let result = subject_accuracy(&store, biology.id)?;
    assert_eq!(result.total_evaluated, 0);
    assert_eq!(result.percent, None);
    Ok(())
}
