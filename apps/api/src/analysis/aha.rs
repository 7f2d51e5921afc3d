//! Hidden-equivalents ("aha") analysis — skills that carry a different name
//! or higher value in the Canadian market.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{AHA_SYSTEM, AHA_TEMPLATE};
use crate::analysis::{AnalysisKind, AnalysisRequest, Analyzer};
use crate::sanitize::{
    array_field, enum_field, number_field, object_field, string_field, string_field_or,
    string_list, Keyword, NO_CAP,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DemandLevel {
    High,
    #[default]
    Medium,
    Low,
}

impl Keyword for DemandLevel {
    fn from_keyword(s: &str) -> Option<Self> {
        match s {
            "high" => Some(DemandLevel::High),
            "medium" => Some(DemandLevel::Medium),
            "low" => Some(DemandLevel::Low),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OriginalSkill {
    pub name: String,
    pub context: String,
    pub location: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EquivalentSkill {
    pub name: String,
    pub market: String,
    pub confidence: f64,
    pub description: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalaryRange {
    pub min: f64,
    pub max: f64,
    pub currency: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketValue {
    pub salary: SalaryRange,
    pub demand_level: DemandLevel,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenSkill {
    pub original_skill: OriginalSkill,
    pub equivalent_skill: EquivalentSkill,
    pub potential_roles: Vec<String>,
    pub market_value: MarketValue,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenEquivalentsAnalysis {
    pub hidden_skills: Vec<HiddenSkill>,
    pub insight_summary: String,
}

pub fn analyzer() -> Analyzer<AnalysisRequest, HiddenEquivalentsAnalysis> {
    Analyzer {
        kind: AnalysisKind::HiddenEquivalents,
        system: AHA_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &AnalysisRequest) -> String {
    AHA_TEMPLATE.replace("{resume_text}", &request.resume_text)
}

/// Total sanitization per the hidden-equivalents field table. Never fails.
pub fn sanitize(_request: &AnalysisRequest, parsed: &Value) -> HiddenEquivalentsAnalysis {
    HiddenEquivalentsAnalysis {
        hidden_skills: array_field(parsed, "hiddenSkills")
            .iter()
            .map(sanitize_hidden_skill)
            .collect(),
        insight_summary: string_field(parsed, "insightSummary", NO_CAP),
    }
}

fn sanitize_hidden_skill(raw: &Value) -> HiddenSkill {
    let original = object_field(raw, "originalSkill");
    let equivalent = object_field(raw, "equivalentSkill");
    let market_value = object_field(raw, "marketValue");
    let salary = object_field(market_value, "salary");

    HiddenSkill {
        original_skill: OriginalSkill {
            name: string_field(original, "name", NO_CAP),
            context: string_field(original, "context", NO_CAP),
            location: string_field(original, "location", NO_CAP),
        },
        equivalent_skill: EquivalentSkill {
            name: string_field(equivalent, "name", NO_CAP),
            market: string_field_or(equivalent, "market", NO_CAP, "Canadian"),
            confidence: number_field(equivalent, "confidence", 0.0),
            description: string_field(equivalent, "description", 200),
        },
        potential_roles: string_list(raw, "potentialRoles", NO_CAP, NO_CAP),
        market_value: MarketValue {
            salary: SalaryRange {
                min: number_field(salary, "min", 0.0),
                max: number_field(salary, "max", 0.0),
                currency: string_field_or(salary, "currency", NO_CAP, "CAD"),
            },
            demand_level: enum_field(market_value, "demandLevel"),
        },
    }
}
