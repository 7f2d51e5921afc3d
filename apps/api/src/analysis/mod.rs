//! Resume analysis — the analyzer pipeline and its six kinds.
//!
//! Each kind is a matched (prompt builder, sanitizer) pair around one shared
//! skeleton: build prompt → call LLM → extract JSON → sanitize. The prompt
//! embeds the exact field names and enum spellings the sanitizer expects, so
//! the pair is versioned together; changing one without the other is a
//! contract break.

pub mod aha;
pub mod chat;
pub mod handlers;
pub mod profile;
pub mod prompts;
pub mod pronunciation;
pub mod roadmap;
pub mod service;
pub mod technical;
pub mod voice;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::warn;

use crate::errors::AppError;
use crate::extract::extract;
use crate::llm_client::TextGenerator;
use crate::sanitize::Keyword;

/// The configured analyzer kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisKind {
    Profile,
    TechnicalSkills,
    HiddenEquivalents,
    Roadmap,
    VoiceEmotion,
    Pronunciation,
}

impl AnalysisKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisKind::Profile => "profile",
            AnalysisKind::TechnicalSkills => "technical-skills",
            AnalysisKind::HiddenEquivalents => "hidden-equivalents",
            AnalysisKind::Roadmap => "roadmap",
            AnalysisKind::VoiceEmotion => "voice-emotion",
            AnalysisKind::Pronunciation => "pronunciation",
        }
    }
}

/// Transient request for the resume-bound kinds. Constructed per call, never
/// persisted. `today` is injected so prompts that embed the current date stay
/// deterministic under test.
#[derive(Debug, Clone)]
pub struct AnalysisRequest {
    pub resume_text: String,
    pub today: NaiveDate,
}

/// Proficiency level shared by the profile and technical-skills schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    #[default]
    Intermediate,
    Advanced,
    Expert,
}

impl Keyword for SkillLevel {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "beginner" => Some(SkillLevel::Beginner),
            "intermediate" => Some(SkillLevel::Intermediate),
            "advanced" => Some(SkillLevel::Advanced),
            "expert" => Some(SkillLevel::Expert),
            _ => None,
        }
    }
}

/// Priority used across recommendation and roadmap schemas.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl Keyword for Priority {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "high" => Some(Priority::High),
            "medium" => Some(Priority::Medium),
            "low" => Some(Priority::Low),
            _ => None,
        }
    }
}

/// One analyzer: a (prompt builder, sanitizer) pair injected into the shared
/// pipeline. Analyzers hold no state; construct freely per request.
pub struct Analyzer<R, T> {
    pub kind: AnalysisKind,
    pub system: &'static str,
    pub build_prompt: fn(&R) -> String,
    pub sanitize: fn(&R, &Value) -> T,
}

impl<R, T> Analyzer<R, T> {
    /// Runs one analysis round-trip.
    ///
    /// A transport failure or a response with no text block propagates as an
    /// upstream error — the external dependency is unavailable. Text that
    /// merely fails to parse after every repair degrades to the kind's
    /// all-defaults result; that distinction is deliberate.
    pub async fn analyze(&self, llm: &dyn TextGenerator, request: &R) -> Result<T, AppError> {
        let prompt = (self.build_prompt)(request);

        let text = llm.generate(&prompt, self.system).await.map_err(|e| {
            AppError::Llm(format!("{} analysis failed upstream: {e}", self.kind.as_str()))
        })?;

        match extract(&text) {
            Ok(parsed) => Ok((self.sanitize)(request, &parsed)),
            Err(e) => {
                warn!(
                    "{} analysis returned malformed output, degrading to defaults: {e}",
                    self.kind.as_str()
                );
                Ok((self.sanitize)(request, &Value::Null))
            }
        }
    }
}

#[cfg(test)]
pub(crate) mod testing {
    use super::*;
    use crate::llm_client::LlmError;
    use async_trait::async_trait;

    /// Canned generator: replays a fixed response or fails every call.
    pub struct FakeGenerator {
        response: Result<String, ()>,
    }

    impl FakeGenerator {
        pub fn returning(text: &str) -> Self {
            Self {
                response: Ok(text.to_string()),
            }
        }

        pub fn failing() -> Self {
            Self { response: Err(()) }
        }
    }

    #[async_trait]
    impl TextGenerator for FakeGenerator {
        async fn generate(&self, _prompt: &str, _system: &str) -> Result<String, LlmError> {
            match &self.response {
                Ok(text) => Ok(text.clone()),
                Err(()) => Err(LlmError::EmptyContent),
            }
        }
    }

    pub fn request(resume_text: &str) -> AnalysisRequest {
        AnalysisRequest {
            resume_text: resume_text.to_string(),
            today: NaiveDate::from_ymd_opt(2026, 8, 28).unwrap(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::{request, FakeGenerator};
    use super::*;

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let llm = FakeGenerator::failing();
        let result = profile::analyzer()
            .analyze(&llm, &request("resume text"))
            .await;
        assert!(matches!(result, Err(AppError::Llm(_))));
    }

    #[tokio::test]
    async fn test_empty_response_text_degrades_to_defaults() {
        // The LLM did respond, just not with JSON. Distinct from no response
        // at all: this leg completes with every field at its default.
        let llm = FakeGenerator::returning("");
        let result = profile::analyzer()
            .analyze(&llm, &request("resume text"))
            .await
            .unwrap();
        assert!(result.skills.is_empty());
        assert!(result.experience.is_empty());
        assert!(result.education.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[tokio::test]
    async fn test_fenced_json_analyzed_end_to_end() {
        // Scenario A.
        let raw = "```json\n{\"skills\":[{\"name\":\"PM\",\"level\":\"advanced\",\"confidence\":0.9}],\"experience\":[],\"education\":[],\"recommendations\":[]}\n```";
        let llm = FakeGenerator::returning(raw);
        let result = profile::analyzer()
            .analyze(&llm, &request("resume text"))
            .await
            .unwrap();
        assert_eq!(result.skills.len(), 1);
        assert_eq!(result.skills[0].name, "PM");
        assert_eq!(result.skills[0].level, SkillLevel::Advanced);
        assert!((result.skills[0].confidence - 0.9).abs() < f64::EPSILON);
    }

    #[test]
    fn test_kind_names() {
        assert_eq!(AnalysisKind::Profile.as_str(), "profile");
        assert_eq!(AnalysisKind::HiddenEquivalents.as_str(), "hidden-equivalents");
    }
}
