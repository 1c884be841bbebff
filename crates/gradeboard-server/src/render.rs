//! Escaped-HTML page rendering. Self-contained pages with inlined CSS, no
//! template engine, no scripts. Pure consumer of core types.

use gradeboard_core::model::{QuestionDetail, Subject, Verdict};
use gradeboard_core::stats::accuracy::SubjectAccuracy;
use gradeboard_core::stats::usage::UsageSummary;

/// Escape a string for safe HTML insertion.
pub fn html_escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

const CSS: &str = "\
body { font-family: system-ui, sans-serif; margin: 2rem auto; max-width: 60rem; color: #222; }
table { border-collapse: collapse; margin: 1rem 0; width: 100%; }
th, td { border: 1px solid #ccc; padding: 0.4rem 0.6rem; text-align: left; }
tfoot th { background: #f4f4f4; }
td.pass { color: #1a7f37; }
td.fail { color: #b42318; }
td.pending { color: #777; }
p.accuracy strong { font-size: 1.2rem; }
li.empty, p.empty { color: #777; font-style: italic; }
";

fn page(title: &str, body: &str) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
    html.push_str("<meta charset=\"utf-8\">\n");
    html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
    html.push_str(&format!("<title>{}</title>\n", html_escape(title)));
    html.push_str("<style>\n");
    html.push_str(CSS);
    html.push_str("</style>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(body);
    html.push_str("</body>\n</html>");
    html
}

pub fn index_page(subjects: &[Subject]) -> String {
    let mut body = String::new();
    body.push_str("<h1>Subjects</h1>\n<ul class=\"subjects\">\n");
    for s in subjects {
        body.push_str(&format!(
            "<li><a href=\"/subject/{}\">{}</a></li>\n",
            s.id,
            html_escape(&s.name)
        ));
    }
    if subjects.is_empty() {
        body.push_str("<li class=\"empty\">no subjects yet</li>\n");
    }
    body.push_str("</ul>\n<p><a href=\"/logs\">Request log summary</a></p>\n");
    page("gradeboard — subjects", &body)
}

pub fn subject_page(
    subject: &Subject,
    accuracy: &SubjectAccuracy,
    questions: &[QuestionDetail],
) -> String {
    let mut body = String::new();
    body.push_str(&format!("<h1>{}</h1>\n", html_escape(&subject.name)));

    // the undefined sentinel renders as "n/a"; a real 0% stays "0.0%"
    let shown = match accuracy.percent {
        Some(p) => format!("{:.1}%", p),
        None => "n/a".to_string(),
    };
    body.push_str(&format!(
        "<p class=\"accuracy\">Evaluation accuracy: <strong>{}</strong> ({} of {} evaluated answers correct)</p>\n",
        shown, accuracy.correct, accuracy.total_evaluated
    ));

    body.push_str(&format!(
        "<form method=\"post\" action=\"/api/subject/{}/evaluate\"><button type=\"submit\">Trigger evaluation</button></form>\n",
        subject.id
    ));

    for detail in questions {
        body.push_str("<section class=\"question\">\n");
        body.push_str(&format!(
            "<h2>{}</h2>\n",
            html_escape(&detail.question.text)
        ));
        if let Some(preferred) = &detail.question.preferred_answer {
            body.push_str(&format!(
                "<p class=\"preferred\">Preferred answer: {}</p>\n",
                html_escape(preferred)
            ));
        }
        if detail.answers.is_empty() {
            body.push_str("<p class=\"empty\">no answers yet</p>\n");
        } else {
            body.push_str("<table>\n<thead><tr><th>Student</th><th>Answer</th><th>Status</th><th>Ground truth</th></tr></thead>\n<tbody>\n");
            for a in &detail.answers {
                body.push_str(&format!(
                    "<tr><td>{}</td><td>{}</td><td class=\"{}\">{}</td><td>{}</td></tr>\n",
                    html_escape(&a.student_name),
                    html_escape(&a.answer),
                    verdict_class(a.status),
                    verdict_label(a.status),
                    verdict_label(a.ground_truth),
                ));
            }
            body.push_str("</tbody></table>\n");
        }
        body.push_str("</section>\n");
    }

    body.push_str("<p><a href=\"/\">All subjects</a></p>\n");
    page(&format!("gradeboard — {}", subject.name), &body)
}

pub fn logs_page(summary: &UsageSummary) -> String {
    let mut body = String::new();
    body.push_str("<h1>Request log summary</h1>\n");
    body.push_str("<table class=\"usage\">\n<thead><tr><th>Subject</th><th>Requests</th><th>Time (s)</th><th>Tokens</th><th>Input cost</th><th>Output cost</th><th>Total cost</th></tr></thead>\n<tbody>\n");
    for row in &summary.subjects {
        body.push_str(&format!(
            "<tr><td>{}</td><td>{}</td><td>{:.2}</td><td>{}</td><td>${:.6}</td><td>${:.6}</td><td>${:.6}</td></tr>\n",
            html_escape(&row.subject_name),
            row.request_count,
            row.total_request_time,
            row.total_tokens,
            row.input_cost,
            row.output_cost,
            row.total_cost,
        ));
    }
    body.push_str("</tbody>\n");
    body.push_str(&format!(
        "<tfoot><tr><th>Total</th><th></th><th>{:.2}</th><th>{}</th><th></th><th></th><th>${:.6}</th></tr></tfoot>\n",
        summary.grand_total_time, summary.grand_total_tokens, summary.grand_total_cost
    ));
    body.push_str("</table>\n");
    body.push_str(&format!(
        "<p class=\"avg\">Average inference time: {:.3} s per request</p>\n",
        summary.average_inference_time
    ));
    body.push_str("<p><a href=\"/\">All subjects</a></p>\n");
    page("gradeboard — request logs", &body)
}

pub fn not_found_page() -> String {
    page(
        "gradeboard — not found",
        "<h1>Not found</h1>\n<p>Subject not found.</p>\n<p><a href=\"/\">All subjects</a></p>\n",
    )
}

pub fn error_page(message: &str) -> String {
    page(
        "gradeboard — error",
        &format!(
            "<h1>Something went wrong</h1>\n<p>{}</p>\n",
            html_escape(message)
        ),
    )
}

fn verdict_label(v: Verdict) -> &'static str {
    match v {
        Verdict::Unknown => "not evaluated",
        Verdict::Pass => "correct",
        Verdict::Fail => "incorrect",
    }
}

fn verdict_class(v: Verdict) -> &'static str {
    match v {
        Verdict::Unknown => "pending",
        Verdict::Pass => "pass",
        Verdict::Fail => "fail",
    }
}
