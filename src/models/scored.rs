// file: src/models/scored.rs
// description: scored resume and ranked result models
// reference: internal data structures

use serde::{Deserialize, Serialize};

/// One processed resume: detected skills in vocabulary order and the
/// TF-IDF match score against the job description, as a percentage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoredResume {
    pub file_name: String,
    pub skills: Vec<String>,
    pub match_score: f64,
}

impl ScoredResume {
    pub fn new(file_name: String, skills: Vec<String>, match_score: f64) -> Self {
        Self {
            file_name,
            skills,
            match_score,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkipReason {
    UnsupportedFormat = 1,
    ExtractionFailed = 2,
    EmptyText = 3,
}

impl SkipReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            SkipReason::UnsupportedFormat => "unsupported_format",
            SkipReason::ExtractionFailed => "extraction_failed",
            SkipReason::EmptyText => "empty_text",
        }
    }
}

/// Warning emitted for a document the pipeline skipped. Skips never abort
/// the batch; they are surfaced to the caller alongside the ranking.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingWarning {
    pub file_name: String,
    pub reason: SkipReason,
    pub detail: String,
}

impl ProcessingWarning {
    pub fn new(file_name: String, reason: SkipReason, detail: String) -> Self {
        Self {
            file_name,
            reason,
            detail,
        }
    }
}

/// Outcome of one ranking run: entries sorted by match score descending
/// (ties keep input order) plus per-document warnings for skipped files.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedResult {
    pub entries: Vec<ScoredResume>,
    pub warnings: Vec<ProcessingWarning>,
}

impl RankedResult {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn top(&self) -> Option<&ScoredResume> {
        self.entries.first()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scored_resume_creation() {
        let scored = ScoredResume::new(
            "resume.pdf".to_string(),
            vec!["python".to_string(), "aws".to_string()],
            72.5,
        );

        assert_eq!(scored.file_name, "resume.pdf");
        assert_eq!(scored.skills.len(), 2);
        assert!((scored.match_score - 72.5).abs() < f64::EPSILON);
    }

    #[test]
    fn test_skip_reason_labels() {
        assert_eq!(SkipReason::UnsupportedFormat.as_str(), "unsupported_format");
        assert_eq!(SkipReason::ExtractionFailed.as_str(), "extraction_failed");
        assert_eq!(SkipReason::EmptyText.as_str(), "empty_text");
    }

    #[test]
    fn test_ranked_result_accessors() {
        let result = RankedResult {
            entries: vec![
                ScoredResume::new("a.txt".to_string(), vec![], 80.0),
                ScoredResume::new("b.txt".to_string(), vec![], 20.0),
            ],
            warnings: vec![],
        };

        assert_eq!(result.len(), 2);
        assert!(!result.is_empty());
        assert_eq!(result.top().unwrap().file_name, "a.txt");
    }
}
