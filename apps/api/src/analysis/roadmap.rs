//! Roadmap generation — a personalized action plan toward working in Canada
//! (bridge courses, certifications, mentorship, internships, exams).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{ROADMAP_SYSTEM, ROADMAP_TEMPLATE};
use crate::analysis::{AnalysisKind, Analyzer, Priority};
use crate::sanitize::{
    array_field, enum_field, optional_string, string_field, string_field_or, string_list,
    Keyword, NO_CAP,
};

/// Request payload for roadmap generation. Unlike the resume-bound kinds this
/// one is driven by the user's stated goal, not stored resume text.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapRequest {
    pub user_profile: RoadmapUserProfile,
    pub user_input: RoadmapUserInput,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapUserProfile {
    pub country_of_origin: String,
    pub years_of_experience: f64,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapUserInput {
    pub target_role: String,
    pub preferred_language: String,
    pub timeline: String,
    pub budget: String,
    pub current_skills: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RoadmapItemType {
    #[default]
    Course,
    Certification,
    Mentorship,
    Internship,
    Exam,
}

impl Keyword for RoadmapItemType {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "course" => Some(RoadmapItemType::Course),
            "certification" => Some(RoadmapItemType::Certification),
            "mentorship" => Some(RoadmapItemType::Mentorship),
            "internship" => Some(RoadmapItemType::Internship),
            "exam" => Some(RoadmapItemType::Exam),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoadmapItem {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: RoadmapItemType,
    pub title: String,
    pub description: String,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cost: Option<String>,
    pub priority: Priority,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    pub requirements: Vec<String>,
    pub benefits: Vec<String>,
    pub timeline: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoadmapResult {
    pub roadmap: Vec<RoadmapItem>,
    pub summary: String,
    pub estimated_timeline: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_cost: Option<String>,
    pub language: String,
}

pub fn analyzer() -> Analyzer<RoadmapRequest, RoadmapResult> {
    Analyzer {
        kind: AnalysisKind::Roadmap,
        system: ROADMAP_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &RoadmapRequest) -> String {
    let language = &request.user_input.preferred_language;
    // URLs stay in English either way; only descriptive text switches.
    let language_instruction = if language.eq_ignore_ascii_case("english") || language.is_empty() {
        String::new()
    } else {
        format!(
            "IMPORTANT: Respond entirely in {language}. All titles, descriptions, \
             and text content must be in {language}."
        )
    };

    ROADMAP_TEMPLATE
        .replace("{country_of_origin}", &request.user_profile.country_of_origin)
        .replace("{target_role}", &request.user_input.target_role)
        .replace(
            "{years_of_experience}",
            &request.user_profile.years_of_experience.to_string(),
        )
        .replace("{preferred_language}", language)
        .replace("{timeline}", &request.user_input.timeline)
        .replace("{budget}", &request.user_input.budget)
        .replace("{current_skills}", &request.user_input.current_skills)
        .replace("{language_instruction}", &language_instruction)
}

/// Total sanitization per the roadmap field table. Never fails.
pub fn sanitize(_request: &RoadmapRequest, parsed: &Value) -> RoadmapResult {
    RoadmapResult {
        roadmap: array_field(parsed, "roadmap")
            .iter()
            .enumerate()
            .map(|(index, raw)| sanitize_item(raw, index))
            .collect(),
        summary: string_field(parsed, "summary", 1000),
        estimated_timeline: string_field(parsed, "estimatedTimeline", NO_CAP),
        total_cost: optional_string(parsed, "totalCost", 100),
        language: string_field_or(parsed, "language", NO_CAP, "English"),
    }
}

fn sanitize_item(raw: &Value, index: usize) -> RoadmapItem {
    RoadmapItem {
        id: string_field_or(raw, "id", NO_CAP, &format!("roadmap-item-{index}")),
        kind: enum_field(raw, "type"),
        title: string_field(raw, "title", 200),
        description: string_field(raw, "description", 500),
        duration: string_field(raw, "duration", NO_CAP),
        cost: optional_string(raw, "cost", 100),
        priority: enum_field(raw, "priority"),
        link: optional_string(raw, "link", 500),
        requirements: string_list(raw, "requirements", 5, 200),
        benefits: string_list(raw, "benefits", 5, 200),
        timeline: string_field(raw, "timeline", NO_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request_for(language: &str) -> RoadmapRequest {
        RoadmapRequest {
            user_profile: RoadmapUserProfile {
                country_of_origin: "India".to_string(),
                years_of_experience: 8.0,
            },
            user_input: RoadmapUserInput {
                target_role: "Registered Nurse".to_string(),
                preferred_language: language.to_string(),
                timeline: "12 months".to_string(),
                budget: "under 5000 CAD".to_string(),
                current_skills: "ICU nursing, patient triage".to_string(),
            },
        }
    }

    fn sanitize_value(parsed: Value) -> RoadmapResult {
        sanitize(&request_for("English"), &parsed)
    }

    #[test]
    fn test_request_deserializes_camel_case_wire_format() {
        let body = json!({
            "userProfile": {
                "countryOfOrigin": "Philippines",
                "yearsOfExperience": 6.5
            },
            "userInput": {
                "targetRole": "Pharmacist",
                "preferredLanguage": "Tagalog",
                "timeline": "18 months",
                "budget": "10000 CAD",
                "currentSkills": "dispensing, patient counselling"
            }
        });
        let request: RoadmapRequest = serde_json::from_value(body).unwrap();
        assert_eq!(request.user_profile.country_of_origin, "Philippines");
        assert!((request.user_profile.years_of_experience - 6.5).abs() < f64::EPSILON);
        assert_eq!(request.user_input.target_role, "Pharmacist");
        assert_eq!(request.user_input.current_skills, "dispensing, patient counselling");
    }

    #[test]
    fn test_sanitize_is_total_on_degenerate_inputs() {
        for parsed in [json!({}), json!(null), json!(["x"])] {
            let result = sanitize_value(parsed);
            assert!(result.roadmap.is_empty());
            assert_eq!(result.summary, "");
            assert_eq!(result.language, "English");
            assert!(result.total_cost.is_none());
        }
    }

    #[test]
    fn test_item_id_generated_when_absent() {
        let result = sanitize_value(json!({
            "roadmap": [
                {"title": "NCLEX-RN prep"},
                {"id": "given-id", "title": "Bridge program"}
            ]
        }));
        assert_eq!(result.roadmap[0].id, "roadmap-item-0");
        assert_eq!(result.roadmap[1].id, "given-id");
    }

    #[test]
    fn test_item_enum_defaults_and_caps() {
        let result = sanitize_value(json!({
            "roadmap": [{
                "type": "bootcamp",
                "title": "t".repeat(300),
                "description": "d".repeat(700),
                "priority": "critical",
                "link": "",
                "requirements": vec!["r".repeat(300); 8],
                "benefits": vec!["b"; 2]
            }]
        }));
        let item = &result.roadmap[0];
        assert_eq!(item.kind, RoadmapItemType::Course);
        assert_eq!(item.title.len(), 200);
        assert_eq!(item.description.len(), 500);
        assert_eq!(item.priority, Priority::Medium);
        assert!(item.link.is_none());
        assert!(item.cost.is_none());
        assert_eq!(item.requirements.len(), 5);
        assert_eq!(item.requirements[0].len(), 200);
        assert_eq!(item.benefits.len(), 2);
    }

    #[test]
    fn test_summary_capped_at_1000() {
        let result = sanitize_value(json!({"summary": "s".repeat(1500)}));
        assert_eq!(result.summary.len(), 1000);
    }

    #[test]
    fn test_prompt_in_english_has_no_language_instruction() {
        let prompt = build_prompt(&request_for("English"));
        assert!(prompt.contains("Registered Nurse"));
        assert!(prompt.contains("India"));
        assert!(!prompt.contains("Respond entirely in"));
    }

    #[test]
    fn test_prompt_switches_language_but_keeps_urls_english() {
        let prompt = build_prompt(&request_for("French"));
        assert!(prompt.contains("Respond entirely in French"));
        assert!(prompt.contains("Keep ALL URLs in their original English form"));
    }
}
