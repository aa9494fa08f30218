// file: src/skills/detector.rs
// description: substring-based skill detection over the fixed vocabulary
// reference: internal keyword taxonomy

use crate::skills::vocabulary::SKILL_VOCABULARY;

/// Scans text for vocabulary skills by case-insensitive substring
/// containment. A phrase occurring inside a longer token still counts
/// ("css" inside "success"); this is a known false-positive source kept
/// deliberately, matching the screening behavior downstream consumers
/// already expect. Presence is binary, no per-skill weighting.
pub struct SkillDetector {
    vocabulary: &'static [&'static str],
}

impl SkillDetector {
    pub fn new() -> Self {
        Self {
            vocabulary: &SKILL_VOCABULARY,
        }
    }

    /// Returns detected skills in vocabulary order, each at most once.
    /// Empty input yields an empty set, never an error.
    pub fn detect(&self, text: &str) -> Vec<String> {
        if text.is_empty() {
            return Vec::new();
        }

        let haystack = text.to_lowercase();

        self.vocabulary
            .iter()
            .filter(|skill| haystack.contains(*skill))
            .map(|skill| skill.to_string())
            .collect()
    }
}

impl Default for SkillDetector {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detects_case_insensitively() {
        let detector = SkillDetector::new();
        let skills = detector.detect("Senior PYTHON engineer, AWS certified, Docker expert");

        assert_eq!(skills, vec!["python", "aws", "docker"]);
    }

    #[test]
    fn test_output_follows_vocabulary_order() {
        let detector = SkillDetector::new();
        // Occurrence order is reversed relative to the vocabulary.
        let skills = detector.detect("docker first, then aws, finally python");

        assert_eq!(skills, vec!["python", "aws", "docker"]);
    }

    #[test]
    fn test_empty_text_yields_empty_set() {
        let detector = SkillDetector::new();
        assert!(detector.detect("").is_empty());
    }

    #[test]
    fn test_no_matches() {
        let detector = SkillDetector::new();
        assert!(detector.detect("Graphic designer with Photoshop skills").is_empty());
    }

    #[test]
    fn test_substring_containment_matches_inside_tokens() {
        let detector = SkillDetector::new();
        // "java" inside "JavaScript" and "sql" inside "MySQL" both count;
        // the vocabulary match is a plain substring check, not
        // word-boundary matching.
        let skills = detector.detect("MySQL and JavaScript developer");
        assert_eq!(skills, vec!["java", "javascript", "sql"]);
    }

    #[test]
    fn test_multi_word_phrases() {
        let detector = SkillDetector::new();
        let skills = detector.detect("Experience with machine learning and problem solving");
        assert_eq!(skills, vec!["machine learning", "problem solving"]);
    }

    #[test]
    fn test_repeated_mentions_deduplicated() {
        let detector = SkillDetector::new();
        let skills = detector.detect("python python python");
        assert_eq!(skills, vec!["python"]);
    }

    #[test]
    fn test_detect_is_idempotent() {
        let detector = SkillDetector::new();
        let text = "java and javascript and sql";

        assert_eq!(detector.detect(text), detector.detect(text));
    }
}
