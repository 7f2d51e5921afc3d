//! Profile analysis — skills, experience, and international credential
//! recognition for the Canadian market.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{PROFILE_SYSTEM, PROFILE_TEMPLATE};
use crate::analysis::{AnalysisKind, AnalysisRequest, Analyzer, Priority, SkillLevel};
use crate::sanitize::{
    array_field, bool_field, enum_field, int_or_null, number_field, object_field, string_field,
    string_list, Keyword, NO_CAP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Accreditation {
    Recognized,
    Unrecognized,
    #[default]
    PendingVerification,
}

impl Keyword for Accreditation {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "recognized" => Some(Accreditation::Recognized),
            "unrecognized" => Some(Accreditation::Unrecognized),
            "pending_verification" => Some(Accreditation::PendingVerification),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionStatus {
    FullyRecognized,
    PartiallyRecognized,
    #[default]
    RequiresAssessment,
    NotRecognized,
}

impl Keyword for RecognitionStatus {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "fully_recognized" => Some(RecognitionStatus::FullyRecognized),
            "partially_recognized" => Some(RecognitionStatus::PartiallyRecognized),
            "requires_assessment" => Some(RecognitionStatus::RequiresAssessment),
            "not_recognized" => Some(RecognitionStatus::NotRecognized),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationType {
    #[default]
    Skill,
    Certification,
    Experience,
    EducationUpgrade,
}

impl Keyword for RecommendationType {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "skill" => Some(RecommendationType::Skill),
            "certification" => Some(RecommendationType::Certification),
            "experience" => Some(RecommendationType::Experience),
            "education_upgrade" => Some(RecommendationType::EducationUpgrade),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecommendationCategory {
    Immediate,
    #[default]
    ShortTerm,
    LongTerm,
}

impl Keyword for RecommendationCategory {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "immediate" => Some(RecommendationCategory::Immediate),
            "short_term" => Some(RecommendationCategory::ShortTerm),
            "long_term" => Some(RecommendationCategory::LongTerm),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Timeframe {
    #[serde(rename = "1-3 months")]
    OneToThreeMonths,
    #[default]
    #[serde(rename = "3-6 months")]
    ThreeToSixMonths,
    #[serde(rename = "6-12 months")]
    SixToTwelveMonths,
    #[serde(rename = "1+ years")]
    OnePlusYears,
}

impl Keyword for Timeframe {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "1-3 months" => Some(Timeframe::OneToThreeMonths),
            "3-6 months" => Some(Timeframe::ThreeToSixMonths),
            "6-12 months" => Some(Timeframe::SixToTwelveMonths),
            "1+ years" => Some(Timeframe::OnePlusYears),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Skill {
    pub name: String,
    pub level: SkillLevel,
    pub confidence: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Experience {
    pub role: String,
    pub company: String,
    /// Months, as instructed in the prompt's duration rules.
    pub duration: f64,
    pub highlights: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GapAnalysis {
    pub missing_requirements: Vec<String>,
    pub additional_steps: Vec<String>,
    pub estimated_time_to_equivalency: f64,
    pub licensing_exams_required: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Equivalency {
    pub local_equivalent: String,
    pub coverage_percentage: f64,
    pub recognizing_bodies: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Education {
    pub degree: String,
    pub institution: String,
    pub year: Option<i64>,
    pub country: String,
    pub accreditation: Accreditation,
    pub credibility_score: f64,
    pub recognition_status: RecognitionStatus,
    /// Always present, defaulted when the model omits it. Consumers never
    /// null-check these nested blocks.
    pub gap_analysis: GapAnalysis,
    pub equivalency: Equivalency,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
    #[serde(rename = "type")]
    pub kind: RecommendationType,
    pub description: String,
    pub priority: Priority,
    pub category: RecommendationCategory,
    pub actionable: bool,
    pub timeframe: Timeframe,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ProfileAnalysis {
    pub skills: Vec<Skill>,
    pub experience: Vec<Experience>,
    pub education: Vec<Education>,
    pub recommendations: Vec<Recommendation>,
}

pub fn analyzer() -> Analyzer<AnalysisRequest, ProfileAnalysis> {
    Analyzer {
        kind: AnalysisKind::Profile,
        system: PROFILE_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &AnalysisRequest) -> String {
    PROFILE_TEMPLATE
        .replace("{resume_text}", &request.resume_text)
        .replace("{today}", &request.today.to_string())
}

/// Total sanitization per the profile field table. Never fails.
pub fn sanitize(_request: &AnalysisRequest, parsed: &Value) -> ProfileAnalysis {
    ProfileAnalysis {
        skills: array_field(parsed, "skills").iter().map(sanitize_skill).collect(),
        experience: array_field(parsed, "experience")
            .iter()
            .map(sanitize_experience)
            .collect(),
        education: array_field(parsed, "education")
            .iter()
            .map(sanitize_education)
            .collect(),
        recommendations: array_field(parsed, "recommendations")
            .iter()
            .map(sanitize_recommendation)
            .collect(),
    }
}

fn sanitize_skill(raw: &Value) -> Skill {
    Skill {
        name: string_field(raw, "name", 50),
        level: enum_field(raw, "level"),
        confidence: number_field(raw, "confidence", 0.5),
    }
}

fn sanitize_experience(raw: &Value) -> Experience {
    Experience {
        role: string_field(raw, "role", 100),
        company: string_field(raw, "company", 100),
        duration: number_field(raw, "duration", 0.0),
        highlights: string_list(raw, "highlights", 5, 200),
    }
}

fn sanitize_education(raw: &Value) -> Education {
    let gap = object_field(raw, "gapAnalysis");
    let equivalency = object_field(raw, "equivalency");
    Education {
        degree: string_field(raw, "degree", 100),
        institution: string_field(raw, "institution", 100),
        year: int_or_null(raw, "year"),
        country: string_field(raw, "country", NO_CAP),
        accreditation: enum_field(raw, "accreditation"),
        credibility_score: number_field(raw, "credibilityScore", 0.5),
        recognition_status: enum_field(raw, "recognitionStatus"),
        gap_analysis: GapAnalysis {
            missing_requirements: string_list(gap, "missingRequirements", NO_CAP, NO_CAP),
            additional_steps: string_list(gap, "additionalSteps", NO_CAP, NO_CAP),
            estimated_time_to_equivalency: number_field(gap, "estimatedTimeToEquivalency", 0.0),
            licensing_exams_required: string_list(gap, "licensingExamsRequired", NO_CAP, NO_CAP),
        },
        equivalency: Equivalency {
            local_equivalent: string_field(equivalency, "localEquivalent", NO_CAP),
            coverage_percentage: number_field(equivalency, "coveragePercentage", 0.0),
            recognizing_bodies: string_list(equivalency, "recognizingBodies", NO_CAP, NO_CAP),
        },
    }
}

fn sanitize_recommendation(raw: &Value) -> Recommendation {
    Recommendation {
        kind: enum_field(raw, "type"),
        description: string_field(raw, "description", 200),
        priority: enum_field(raw, "priority"),
        category: enum_field(raw, "category"),
        actionable: bool_field(raw, "actionable"),
        timeframe: enum_field(raw, "timeframe"),
    }
}
