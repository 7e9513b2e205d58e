//! Result logger: prints the model's review and, when it parses, a summary.

use tracing::{info, warn};

use super::{ReviewResult, report::ReviewReport};

const SEPARATOR: &str = "================================";

/// Logs the review text and returns the parsed report when the text matches
/// the requested shape. An absent text is logged as empty, never as an error.
pub fn log_review_result(result: &ReviewResult) -> Option<ReviewReport> {
    let Some(text) = result.raw_text.as_deref() else {
        info!("{SEPARATOR}\nGemini review result: <empty>\n{SEPARATOR}");
        return None;
    };

    info!("{SEPARATOR}\nGemini review result:\n{text}\n{SEPARATOR}");

    match ReviewReport::parse(text) {
        Ok(report) => {
            info!(
                score = report.overall_score,
                bugs = report.bugs.len(),
                strengths = report.strengths.len(),
                weaknesses = report.weaknesses.len(),
                suggestions = report.suggestions.len(),
                "review report parsed"
            );
            Some(report)
        }
        Err(e) => {
            warn!(error = %e, "review text kept as raw text only");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_result_is_not_an_error() {
        assert_eq!(log_review_result(&ReviewResult::default()), None);
    }

    #[test]
    fn parsed_report_is_returned() {
        let result = ReviewResult {
            raw_text: Some(r#"{"overall_score": 8, "summary": "nice"}"#.into()),
        };
        let report = log_review_result(&result).unwrap();
        assert_eq!(report.overall_score, Some(8.0));
    }

    #[test]
    fn free_text_is_logged_without_report() {
        let result = ReviewResult {
            raw_text: Some("LGTM".into()),
        };
        assert_eq!(log_review_result(&result), None);
    }
}
