//! Technical skills analysis — categorized skills, projects, certifications,
//! and gap recommendations.

use chrono::Datelike;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{TECHNICAL_SYSTEM, TECHNICAL_TEMPLATE};
use crate::analysis::{AnalysisKind, AnalysisRequest, Analyzer, Priority, SkillLevel};
use crate::sanitize::{
    array_field, enum_field, number_field, string_field, string_list, NO_CAP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SkillCategory {
    Programming,
    Database,
    Cloud,
    #[default]
    Tool,
    Methodology,
    Monitoring,
    Framework,
}

impl SkillCategory {
    /// Category matching is looser than the other enums: the model often
    /// answers with a product name or shorthand, so unknown spellings go
    /// through a synonym map before falling back to `tool`.
    pub fn from_loose(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "programming" | "language" | "lang" => SkillCategory::Programming,
            "database" | "databases" | "db" => SkillCategory::Database,
            "cloud" | "aws" | "azure" | "gcp" | "docker" | "kubernetes" | "k8s" => {
                SkillCategory::Cloud
            }
            "methodology" | "devops" | "agile" | "scrum" | "ci/cd" | "cicd" => {
                SkillCategory::Methodology
            }
            "monitoring" | "prometheus" | "grafana" | "elk" => SkillCategory::Monitoring,
            "framework" | "react" | "angular" | "vue" | "django" | "spring" | "express"
            | "node" => SkillCategory::Framework,
            _ => SkillCategory::Tool,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSkill {
    pub name: String,
    pub category: SkillCategory,
    pub level: SkillLevel,
    pub years_of_experience: f64,
    /// Year the skill was last used; defaults to the request's current year.
    pub last_used: f64,
    pub context: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TechnicalProject {
    pub name: String,
    pub description: String,
    pub technologies: Vec<String>,
    pub role: String,
    pub impact: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Certification {
    pub name: String,
    pub issuer: String,
    pub year: Option<i64>,
    pub relevance: Priority,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SkillGapRecommendation {
    pub skill_gap: String,
    pub suggestion: String,
    pub priority: Priority,
    pub rationale: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TechnicalSkillsAnalysis {
    pub technical_skills: Vec<TechnicalSkill>,
    pub technical_projects: Vec<TechnicalProject>,
    pub certifications: Vec<Certification>,
    pub recommendations: Vec<SkillGapRecommendation>,
}

pub fn analyzer() -> Analyzer<AnalysisRequest, TechnicalSkillsAnalysis> {
    Analyzer {
        kind: AnalysisKind::TechnicalSkills,
        system: TECHNICAL_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &AnalysisRequest) -> String {
    TECHNICAL_TEMPLATE.replace("{resume_text}", &request.resume_text)
}

/// Total sanitization per the technical-skills field table. Never fails.
pub fn sanitize(request: &AnalysisRequest, parsed: &Value) -> TechnicalSkillsAnalysis {
    let current_year = f64::from(request.today.year());
    TechnicalSkillsAnalysis {
        technical_skills: array_field(parsed, "technicalSkills")
            .iter()
            .take(20)
            .map(|raw| sanitize_skill(raw, current_year))
            .collect(),
        technical_projects: array_field(parsed, "technicalProjects")
            .iter()
            .take(5)
            .map(sanitize_project)
            .collect(),
        certifications: array_field(parsed, "certifications")
            .iter()
            .take(3)
            .map(sanitize_certification)
            .collect(),
        recommendations: array_field(parsed, "recommendations")
            .iter()
            .take(3)
            .map(sanitize_recommendation)
            .collect(),
    }
}

fn sanitize_skill(raw: &Value, current_year: f64) -> TechnicalSkill {
    TechnicalSkill {
        name: string_field(raw, "name", NO_CAP),
        category: SkillCategory::from_loose(&string_field(raw, "category", NO_CAP)),
        level: enum_field(raw, "level"),
        years_of_experience: number_field(raw, "yearsOfExperience", 0.0),
        last_used: number_field(raw, "lastUsed", current_year),
        context: string_list(raw, "context", 3, NO_CAP),
    }
}

fn sanitize_project(raw: &Value) -> TechnicalProject {
    TechnicalProject {
        name: string_field(raw, "name", NO_CAP),
        description: string_field(raw, "description", 250),
        technologies: string_list(raw, "technologies", NO_CAP, NO_CAP),
        role: string_field(raw, "role", NO_CAP),
        impact: string_list(raw, "impact", NO_CAP, 250),
    }
}

fn sanitize_certification(raw: &Value) -> Certification {
    Certification {
        name: string_field(raw, "name", NO_CAP),
        issuer: string_field(raw, "issuer", NO_CAP),
        year: crate::sanitize::int_or_null(raw, "year"),
        relevance: enum_field(raw, "relevance"),
    }
}

fn sanitize_recommendation(raw: &Value) -> SkillGapRecommendation {
    SkillGapRecommendation {
        skill_gap: string_field(raw, "skillGap", NO_CAP),
        suggestion: string_field(raw, "suggestion", 250),
        priority: enum_field(raw, "priority"),
        rationale: string_field(raw, "rationale", 250),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::testing::request;
    use serde_json::json;

    fn sanitize_value(parsed: Value) -> TechnicalSkillsAnalysis {
        sanitize(&request("resume"), &parsed)
    }

    #[test]
    fn test_sanitize_is_total_on_degenerate_inputs() {
        for parsed in [json!({}), json!(null), json!(["nope"]), json!("text")] {
            let result = sanitize_value(parsed);
            assert!(result.technical_skills.is_empty());
            assert!(result.technical_projects.is_empty());
            assert!(result.certifications.is_empty());
            assert!(result.recommendations.is_empty());
        }
    }

    #[test]
    fn test_skills_capped_at_twenty() {
        let skills: Vec<Value> = (0..30)
            .map(|i| json!({"name": format!("skill-{i}"), "category": "programming"}))
            .collect();
        let result = sanitize_value(json!({ "technicalSkills": skills }));
        assert_eq!(result.technical_skills.len(), 20);
    }

    #[test]
    fn test_category_synonym_map() {
        assert_eq!(SkillCategory::from_loose("programming"), SkillCategory::Programming);
        assert_eq!(SkillCategory::from_loose("  K8S "), SkillCategory::Cloud);
        assert_eq!(SkillCategory::from_loose("DevOps"), SkillCategory::Methodology);
        assert_eq!(SkillCategory::from_loose("react"), SkillCategory::Framework);
        assert_eq!(SkillCategory::from_loose("db"), SkillCategory::Database);
        assert_eq!(SkillCategory::from_loose("grafana"), SkillCategory::Monitoring);
        assert_eq!(SkillCategory::from_loose("something else"), SkillCategory::Tool);
        assert_eq!(SkillCategory::from_loose(""), SkillCategory::Tool);
    }

    #[test]
    fn test_last_used_defaults_to_injected_year() {
        let result = sanitize_value(json!({
            "technicalSkills": [
                {"name": "Rust", "lastUsed": 2021},
                {"name": "Perl"}
            ]
        }));
        assert!((result.technical_skills[0].last_used - 2021.0).abs() < f64::EPSILON);
        // request() pins today to 2026-08-28.
        assert!((result.technical_skills[1].last_used - 2026.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_context_capped_at_three() {
        let result = sanitize_value(json!({
            "technicalSkills": [{"name": "SQL", "context": ["a", "b", "c", "d"]}]
        }));
        assert_eq!(result.technical_skills[0].context.len(), 3);
    }

    #[test]
    fn test_projects_certifications_recommendations_caps() {
        let result = sanitize_value(json!({
            "technicalProjects": (0..8).map(|i| json!({"name": format!("p{i}")})).collect::<Vec<_>>(),
            "certifications": (0..5).map(|i| json!({"name": format!("c{i}"), "year": 2020 + i})).collect::<Vec<_>>(),
            "recommendations": (0..5).map(|i| json!({"skillGap": format!("g{i}")})).collect::<Vec<_>>()
        }));
        assert_eq!(result.technical_projects.len(), 5);
        assert_eq!(result.certifications.len(), 3);
        assert_eq!(result.recommendations.len(), 3);
        assert_eq!(result.certifications[0].year, Some(2020));
        assert_eq!(result.certifications[0].relevance, Priority::Medium);
    }

    #[test]
    fn test_wire_format_is_camel_case() {
        let result = sanitize_value(json!({
            "technicalSkills": [{"name": "Rust", "category": "programming", "yearsOfExperience": 3}]
        }));
        let json = serde_json::to_value(&result).unwrap();
        assert!(json.get("technicalSkills").is_some());
        assert!(json["technicalSkills"][0].get("yearsOfExperience").is_some());
        assert_eq!(json["technicalSkills"][0]["category"], "programming");
    }
}
