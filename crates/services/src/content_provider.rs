use std::env;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use cyber_core::model::{ModuleContent, UserProfile};

use crate::error::GenerationError;

/// Source of generated training content.
///
/// A single failed attempt yields an error immediately: no retry, no backoff,
/// no timeout beyond the transport default. Callers are expected to substitute
/// fallback content on any error.
#[async_trait]
pub trait ContentGenerator: Send + Sync {
    /// Generate a module for the topic, personalized to the profile.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError` when the request fails, the response is
    /// empty, or the returned text is not a valid module payload.
    async fn generate(
        &self,
        topic: &str,
        profile: &UserProfile,
    ) -> Result<ModuleContent, GenerationError>;
}

#[derive(Clone, Debug)]
pub struct GeminiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GeminiConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("GEMINI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("GEMINI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
        let model = env::var("GEMINI_MODEL").unwrap_or_else(|_| "gemini-1.5-flash".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Generates module content through the Gemini `generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiContentProvider {
    client: Client,
    config: GeminiConfig,
}

impl GeminiContentProvider {
    #[must_use]
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }
}

#[async_trait]
impl ContentGenerator for GeminiContentProvider {
    async fn generate(
        &self,
        topic: &str,
        profile: &UserProfile,
    ) -> Result<ModuleContent, GenerationError> {
        let prompt = build_prompt(topic, profile);

        log::info!(
            "generating content for {topic} (role: {}, industry: {})",
            profile.role,
            profile.industry
        );

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.config.base_url.trim_end_matches('/'),
            self.config.model,
            self.config.api_key
        );
        let payload = GenerateRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: prompt }],
            }],
        };

        let response = self.client.post(url).json(&payload).send().await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: GenerateResponse = response.json().await?;
        let text = body
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content.parts.into_iter().next())
            .map(|part| part.text)
            .ok_or(GenerationError::EmptyResponse)?;

        let content: ModuleContent = serde_json::from_str(strip_markdown_fence(&text))?;

        log::info!("generated module: {}", content.title);
        Ok(content)
    }
}

/// Builds the generation instruction: a fixed JSON object shape, sized lists,
/// and an explicit ban on any non-JSON surrounding text.
pub(crate) fn build_prompt(topic: &str, profile: &UserProfile) -> String {
    format!(
        r#"You are an expert cybersecurity trainer creating a short training module.

Create a training module in JSON format with this structure:

{{
  "title": "string - module title",
  "introduction": "string - 2-3 sentences explaining why this matters for their role",
  "key_concepts": [
    {{"concept": "string - concept name", "explanation": "string - clear explanation"}},
    {{"concept": "string", "explanation": "string"}}
  ],
  "real_world_examples": [
    "string - realistic example"
  ],
  "best_practices": [
    "string - actionable best practice"
  ],
  "quiz": [
    {{"question": "string - quiz question", "options": ["option A", "option B", "option C"], "correct": "option A"}}
  ]
}}

Topic: {topic}
User Role: {role}
Industry: {industry}
Technical Level: {tech_level}

Requirements:
- Make it relevant to their {industry} industry
- Use real examples from their role ({role})
- Keep it practical and actionable
- Include 3-4 key concepts
- Include 2-3 real world examples
- Include 4-5 best practices
- Include 3-5 quiz questions with clear correct answers
- Use professional but accessible language

IMPORTANT: Return ONLY the JSON. No extra text, no markdown, no explanations. Just the JSON object.
"#,
        topic = topic,
        role = profile.role,
        industry = profile.industry,
        tech_level = profile.tech_level,
    )
}

/// Removes a wrapping markdown code fence, including a `json` language tag
/// after the opening fence. The provider is known to sometimes wrap output
/// this way despite the prompt.
pub(crate) fn strip_markdown_fence(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    let rest = rest.trim_end();
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<RequestContent>,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: CandidateContent,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_topic_profile_and_shape() {
        let profile = UserProfile::beginner("IT Manager", "Professional Services");
        let prompt = build_prompt("Phishing Awareness", &profile);

        assert!(prompt.contains("Topic: Phishing Awareness"));
        assert!(prompt.contains("User Role: IT Manager"));
        assert!(prompt.contains("Industry: Professional Services"));
        assert!(prompt.contains("Technical Level: beginner"));
        assert!(prompt.contains("\"key_concepts\""));
        assert!(prompt.contains("Include 3-5 quiz questions"));
        assert!(prompt.contains("Return ONLY the JSON"));
    }

    #[test]
    fn strips_fence_with_json_tag() {
        let wrapped = "```json\n{\"title\": \"T\"}\n```";
        assert_eq!(strip_markdown_fence(wrapped), "{\"title\": \"T\"}");
    }

    #[test]
    fn strips_bare_fence() {
        let wrapped = "```\n{}\n```";
        assert_eq!(strip_markdown_fence(wrapped), "{}");
    }

    #[test]
    fn leaves_unfenced_text_alone() {
        assert_eq!(strip_markdown_fence("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn fenced_payload_parses_as_module() {
        let raw = r#"```json
{
  "title": "Phishing Awareness",
  "introduction": "Why it matters.",
  "key_concepts": [{"concept": "Spoofing", "explanation": "Faked senders."}],
  "real_world_examples": ["A fake invoice email"],
  "best_practices": ["Verify senders"],
  "quiz": [{"question": "Q?", "options": ["A", "B"], "correct": "A"}]
}
```"#;
        let content: ModuleContent = serde_json::from_str(strip_markdown_fence(raw)).unwrap();
        assert_eq!(content.title, "Phishing Awareness");
        assert!(content.quiz_is_consistent());
    }
}
