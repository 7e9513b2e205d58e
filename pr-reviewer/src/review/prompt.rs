//! Prompt builder for the mentor-style PR review.

use super::ReviewRequest;

/// Fixed instructions placed before the diff.
///
/// The JSON shape is a request to the model, not something the provider enforces.
const REVIEW_INSTRUCTIONS: &str = "
You are a senior software mentor reviewing an intern's pull request.

Return ONLY valid JSON:
{
  \"overall_score\": 1-10,
  \"bugs\": [],
  \"strengths\": [],
  \"weaknesses\": [],
  \"suggestions\": [],
  \"summary\": \"\"
}

Pull Request Diff:
";

/// Build the review prompt with the aggregated diff appended.
pub fn build_review_prompt(diff: &str) -> String {
    let mut s = String::with_capacity(REVIEW_INSTRUCTIONS.len() + diff.len() + 1);
    s.push_str(REVIEW_INSTRUCTIONS);
    s.push_str(diff);
    s.push('\n');
    s
}

impl ReviewRequest {
    /// Request carrying the prompt for one aggregated diff.
    pub fn for_diff(diff: &str) -> Self {
        Self {
            prompt_text: build_review_prompt(diff),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_ends_with_diff() {
        let diff = "\nFile: a.js\n+1\n";
        let p = build_review_prompt(diff);
        assert!(p.ends_with("Pull Request Diff:\n\nFile: a.js\n+1\n\n"));
    }

    #[test]
    fn prompt_requests_review_schema() {
        let p = ReviewRequest::for_diff("").prompt_text;
        assert!(p.starts_with("\nYou are a senior software mentor"));
        for key in [
            "\"overall_score\": 1-10",
            "\"bugs\": []",
            "\"strengths\": []",
            "\"weaknesses\": []",
            "\"suggestions\": []",
            "\"summary\": \"\"",
        ] {
            assert!(p.contains(key), "missing {key}");
        }
    }
}
