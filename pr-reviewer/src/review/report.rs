//! Typed reading of the model's JSON review.
//!
//! The prompt asks for a fixed JSON shape but nothing enforces it, so this
//! parser is tolerant: code fences are stripped, list entries may be plain
//! strings or objects, and missing keys default to empty.

use serde::{Deserialize, Serialize};

use crate::errors::ReportError;

/// Review in the shape requested by the prompt.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ReviewReport {
    #[serde(default)]
    pub overall_score: Option<f64>,
    #[serde(default)]
    pub bugs: Vec<ReviewItem>,
    #[serde(default)]
    pub strengths: Vec<ReviewItem>,
    #[serde(default)]
    pub weaknesses: Vec<ReviewItem>,
    #[serde(default)]
    pub suggestions: Vec<ReviewItem>,
    #[serde(default)]
    pub summary: Option<String>,
}

/// One list entry; models alternate between strings and small objects.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ReviewItem {
    Text(String),
    Structured(serde_json::Value),
}

impl ReviewReport {
    /// Parses model output into a report.
    ///
    /// Tries the fence-stripped text first, then the outermost `{...}` span.
    pub fn parse(raw: &str) -> Result<Self, ReportError> {
        let clean = cleanup_json_like(raw);
        let report: ReviewReport = match serde_json::from_str(&clean) {
            Ok(r) => r,
            Err(first) => match outer_object(&clean) {
                Some(obj) => serde_json::from_str(obj).map_err(|_| first)?,
                None => return Err(first.into()),
            },
        };

        if let Some(score) = report.overall_score {
            if !(1.0..=10.0).contains(&score) {
                return Err(ReportError::ScoreOutOfRange(score));
            }
        }

        Ok(report)
    }
}

/// Trim common code-fence wrappers around JSON.
fn cleanup_json_like(s: &str) -> String {
    let mut t = s.trim().to_string();
    if t.starts_with("```") {
        t = t
            .trim_start_matches("```json")
            .trim_start_matches("```JSON")
            .trim_start_matches("```")
            .to_string();
        if let Some(pos) = t.rfind("```") {
            t.truncate(pos);
        }
    }
    t.trim().to_string()
}

fn outer_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    (start < end).then(|| &s[start..=end])
}
