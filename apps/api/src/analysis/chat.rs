//! Coaching chat — free-form career conversation, optionally grounded in a
//! completed analysis. Unlike the analyzer kinds this returns plain text:
//! there is no JSON contract and no sanitizer, the reply goes to the user
//! verbatim.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::analysis::prompts::{
    CHAT_CAREER_GUIDANCE_SYSTEM, CHAT_CONTEXT_GATHERING, CHAT_INTERVIEW_PREP_SYSTEM,
    CHAT_RESUME_REVIEW_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::TextGenerator;
use crate::models::analysis::{AnalysisRecord, AnalysisStatus};
use crate::sanitize::{object_field, string_field, NO_CAP};

/// Turns of history carried into the prompt. Older turns are dropped.
const HISTORY_WINDOW: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatMode {
    ResumeReview,
    InterviewPrep,
    CareerGuidance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatRequest {
    pub user_id: Uuid,
    pub message: String,
    pub mode: ChatMode,
    #[serde(default = "default_language")]
    pub language: String,
    pub analysis_id: Option<Uuid>,
    #[serde(default)]
    pub conversation_history: Vec<ChatTurn>,
}

fn default_language() -> String {
    "English".to_string()
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatReply {
    pub response: String,
}

/// Runs one chat turn. The analysis record, when given, has already passed
/// the caller's ownership check.
pub async fn respond(
    llm: &dyn TextGenerator,
    request: &ChatRequest,
    analysis: Option<&AnalysisRecord>,
) -> Result<ChatReply, AppError> {
    let context = analysis.and_then(analysis_context);
    let system = build_system(request, context.as_deref());
    let prompt = build_prompt(request);

    let response = llm
        .generate(&prompt, &system)
        .await
        .map_err(|e| AppError::Llm(format!("coach chat failed upstream: {e}")))?;

    Ok(ChatReply { response })
}

/// Summarizes a completed analysis into the context block the chat prompts
/// expect. Anything other than a completed record contributes nothing.
pub fn analysis_context(record: &AnalysisRecord) -> Option<String> {
    if record.status != AnalysisStatus::Completed {
        return None;
    }
    let profile = record.profile_results.as_ref();
    let technical = record.technical_results.as_ref();
    let aha = record.aha_results.as_ref();

    Some(format!(
        "Analysis Context:\n\
         - Skills: {}\n\
         - Experience: {}\n\
         - Education: {}\n\
         - Technical Skills: {}\n\
         - Hidden Skills: {}",
        joined(profile, "skills", |s| {
            format!(
                "{} ({})",
                string_field(s, "name", NO_CAP),
                string_field(s, "level", NO_CAP)
            )
        }),
        joined(profile, "experience", |e| {
            format!(
                "{} at {}",
                string_field(e, "role", NO_CAP),
                string_field(e, "company", NO_CAP)
            )
        }),
        joined(profile, "education", |e| {
            format!(
                "{} from {}",
                string_field(e, "degree", NO_CAP),
                string_field(e, "institution", NO_CAP)
            )
        }),
        joined(technical, "technicalSkills", |s| string_field(s, "name", NO_CAP)),
        joined(aha, "hiddenSkills", |s| {
            string_field(object_field(s, "originalSkill"), "name", NO_CAP)
        }),
    ))
}

fn joined(value: Option<&Value>, key: &str, render: impl Fn(&Value) -> String) -> String {
    let items: Vec<String> = value
        .and_then(|v| v.get(key))
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(&render).collect())
        .unwrap_or_default();
    if items.is_empty() {
        "None".to_string()
    } else {
        items.join(", ")
    }
}

fn build_system(request: &ChatRequest, context: Option<&str>) -> String {
    let mut system = match request.mode {
        ChatMode::ResumeReview => CHAT_RESUME_REVIEW_SYSTEM,
        ChatMode::InterviewPrep => CHAT_INTERVIEW_PREP_SYSTEM,
        ChatMode::CareerGuidance => CHAT_CAREER_GUIDANCE_SYSTEM,
    }
    .to_string();

    if request.conversation_history.is_empty() {
        system.push_str(CHAT_CONTEXT_GATHERING);
    }
    if let Some(context) = context {
        system.push_str("\n\n");
        system.push_str(context);
    }
    system.push_str(&format!(
        "\n\nRespond in {}. Use plain text only. Do not use markdown, \
         asterisks, or special formatting.",
        request.language
    ));
    system
}

fn build_prompt(request: &ChatRequest) -> String {
    let history = &request.conversation_history;
    let start = history.len().saturating_sub(HISTORY_WINDOW);

    let mut prompt = String::from("Previous conversation:\n");
    for turn in &history[start..] {
        let speaker = match turn.role {
            ChatRole::User => "User",
            ChatRole::Assistant => "Assistant",
        };
        prompt.push_str(speaker);
        prompt.push_str(": ");
        prompt.push_str(&turn.content);
        prompt.push('\n');
    }

    prompt.push_str("\nUser: ");
    prompt.push_str(&request.message);
    prompt.push_str(
        "\n\nRemember to:\n\
         1. Stay focused on the specific question or role mentioned\n\
         2. Provide relevant, actionable advice\n\
         3. Maintain conversation context\n\
         4. Be concise and clear\n\n\
         A:",
    );
    prompt
}
