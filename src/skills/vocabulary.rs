// file: src/skills/vocabulary.rs
// description: fixed skill vocabulary loaded once as process-wide state
// reference: internal keyword taxonomy

use lazy_static::lazy_static;

lazy_static! {
    /// Canonical skill vocabulary: lowercase phrases in a fixed order.
    /// Detection output preserves this order, not occurrence order.
    pub static ref SKILL_VOCABULARY: Vec<&'static str> = vec![
        "python",
        "java",
        "javascript",
        "html",
        "css",
        "react",
        "angular",
        "node.js",
        "sql",
        "mongodb",
        "aws",
        "docker",
        "kubernetes",
        "machine learning",
        "data analysis",
        "project management",
        "leadership",
        "communication",
        "teamwork",
        "problem solving",
    ];
}

pub fn vocabulary_size() -> usize {
    SKILL_VOCABULARY.len()
}

pub fn is_known_skill(label: &str) -> bool {
    SKILL_VOCABULARY.contains(&label)
}
