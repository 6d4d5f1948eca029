use serde::{Deserialize, Serialize};

/// The canonical module catalog offered to every user.
pub const TRAINING_MODULES: [&str; 4] = [
    "Phishing Awareness",
    "Password Security",
    "Ransomware Prevention",
    "Data Protection Basics",
];

/// Denominator used by dashboard metrics when a user has no sessions yet.
pub const DEFAULT_MODULE_COUNT: usize = TRAINING_MODULES.len();

/// A single teachable concept inside a module.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KeyConcept {
    pub concept: String,
    pub explanation: String,
}

/// One multiple-choice quiz question.
///
/// `correct` is expected to match one of `options`; generated content is not
/// checked for this, so consumers that care must call [`Self::correct_is_option`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    pub correct: String,
}

impl QuizQuestion {
    #[must_use]
    pub fn correct_is_option(&self) -> bool {
        self.options.iter().any(|option| option == &self.correct)
    }
}

/// The training payload stored with each session and returned to clients.
///
/// This is a plain serialization schema rather than an invariant-bearing
/// entity: it round-trips unchanged through the persisted JSON blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleContent {
    pub title: String,
    pub introduction: String,
    pub key_concepts: Vec<KeyConcept>,
    pub real_world_examples: Vec<String>,
    pub best_practices: Vec<String>,
    pub quiz: Vec<QuizQuestion>,
}

impl ModuleContent {
    /// Minimal well-formed content for a topic outside the authored catalog.
    #[must_use]
    pub fn placeholder(topic: &str) -> Self {
        Self {
            title: topic.to_owned(),
            introduction: format!("Training on {topic}"),
            key_concepts: Vec::new(),
            real_world_examples: Vec::new(),
            best_practices: Vec::new(),
            quiz: Vec::new(),
        }
    }

    /// True when every quiz question's `correct` value appears in its options.
    #[must_use]
    pub fn quiz_is_consistent(&self) -> bool {
        self.quiz.iter().all(QuizQuestion::correct_is_option)
    }
}

/// Profile handed to the content generator to personalize a module.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserProfile {
    pub role: String,
    pub industry: String,
    pub tech_level: String,
}

impl UserProfile {
    /// All generated content currently targets beginners.
    #[must_use]
    pub fn beginner(role: impl Into<String>, industry: impl Into<String>) -> Self {
        Self {
            role: role.into(),
            industry: industry.into(),
            tech_level: "beginner".to_owned(),
        }
    }
}
