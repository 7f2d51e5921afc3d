//! Voice/emotion interview coaching. Scores an interview answer on four
//! attributes and derives the single attribute the speaker should work on
//! first. Accent mode adds a Canadian pronunciation coaching block.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{
    VOICE_ACCENT_INSTRUCTION, VOICE_PRONUNCIATION_FIELD, VOICE_SYSTEM, VOICE_TEMPLATE,
};
use crate::analysis::{AnalysisKind, Analyzer};
use crate::sanitize::{clamp_unit, number_field, object_field, string_field, string_list, NO_CAP};

#[derive(Debug, Clone, Deserialize)]
pub struct VoiceRequest {
    pub text: String,
    #[serde(rename = "isAccentEnabled", default)]
    pub accent_enabled: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct VoiceScores {
    pub confidence: f64,
    pub nervousness: f64,
    pub engagement: f64,
    pub clarity: f64,
}

/// Per-attribute detail: score plus the evidence behind it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AttributeDetail {
    pub score: f64,
    pub reasons: Vec<String>,
    pub examples: Vec<String>,
    pub improvements: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VoiceBreakdown {
    pub confidence: AttributeDetail,
    pub nervousness: AttributeDetail,
    pub engagement: AttributeDetail,
    pub clarity: AttributeDetail,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PronunciationCoaching {
    pub patterns: Vec<String>,
    pub feedback: Vec<String>,
    pub focus_words: Vec<String>,
    pub practice_exercises: Vec<String>,
}

/// The lowest-scoring attribute (nervousness inverted so that high
/// nervousness reads as a low score) with its supporting detail.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FocusFeedback {
    pub score: f64,
    pub attribute: String,
    pub reasons: Vec<String>,
    pub examples: Vec<String>,
    pub improvements: Vec<String>,
    pub primary_feedback: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pronunciation: Option<PronunciationCoaching>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceAnalysis {
    pub scores: VoiceScores,
    pub feedback: FocusFeedback,
    pub detailed_analysis: VoiceBreakdown,
}

pub fn analyzer() -> Analyzer<VoiceRequest, VoiceAnalysis> {
    Analyzer {
        kind: AnalysisKind::VoiceEmotion,
        system: VOICE_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &VoiceRequest) -> String {
    let (instruction, field) = if request.accent_enabled {
        (VOICE_ACCENT_INSTRUCTION, VOICE_PRONUNCIATION_FIELD)
    } else {
        ("", "")
    };
    VOICE_TEMPLATE
        .replace("{accent_instruction}", instruction)
        .replace("{pronunciation_field}", field)
        .replace("{text}", &request.text)
}

/// Picks the attribute to focus on: the lowest of confidence, engagement,
/// clarity, and inverted nervousness. Ties resolve in that order.
pub fn focus_attribute(scores: &VoiceScores) -> (&'static str, f64) {
    let candidates = [
        ("confidence", scores.confidence),
        ("engagement", scores.engagement),
        ("clarity", scores.clarity),
        ("nervousness", 1.0 - scores.nervousness),
    ];
    let mut chosen = candidates[0];
    for candidate in &candidates[1..] {
        if candidate.1 < chosen.1 {
            chosen = *candidate;
        }
    }
    chosen
}

pub fn sanitize(request: &VoiceRequest, parsed: &Value) -> VoiceAnalysis {
    let scores = VoiceScores {
        confidence: clamp_unit(number_field(parsed, "confidence", 0.0)),
        nervousness: clamp_unit(number_field(parsed, "nervousness", 0.0)),
        engagement: clamp_unit(number_field(parsed, "engagement", 0.0)),
        clarity: clamp_unit(number_field(parsed, "clarity", 0.0)),
    };

    let analysis = object_field(parsed, "analysis");
    let detailed_analysis = VoiceBreakdown {
        confidence: sanitize_detail(analysis, "confidence", scores.confidence),
        nervousness: sanitize_detail(analysis, "nervousness", scores.nervousness),
        engagement: sanitize_detail(analysis, "engagement", scores.engagement),
        clarity: sanitize_detail(analysis, "clarity", scores.clarity),
    };

    let (attribute, score) = focus_attribute(&scores);
    let focus_detail = match attribute {
        "nervousness" => &detailed_analysis.nervousness,
        "engagement" => &detailed_analysis.engagement,
        "clarity" => &detailed_analysis.clarity,
        _ => &detailed_analysis.confidence,
    };

    let pronunciation = request.accent_enabled.then(|| {
        let block = object_field(parsed, "pronunciation");
        PronunciationCoaching {
            patterns: string_list(block, "patterns", NO_CAP, NO_CAP),
            feedback: string_list(block, "feedback", NO_CAP, NO_CAP),
            focus_words: string_list(block, "focusWords", NO_CAP, NO_CAP),
            practice_exercises: string_list(block, "practiceExercises", NO_CAP, NO_CAP),
        }
    });

    let feedback = FocusFeedback {
        score,
        attribute: attribute.to_string(),
        reasons: focus_detail.reasons.clone(),
        examples: focus_detail.examples.clone(),
        improvements: focus_detail.improvements.clone(),
        primary_feedback: string_field(parsed, "primaryFeedback", NO_CAP),
        pronunciation,
    };

    VoiceAnalysis {
        scores,
        feedback,
        detailed_analysis,
    }
}

fn sanitize_detail(analysis: &Value, key: &str, fallback_score: f64) -> AttributeDetail {
    let detail = object_field(analysis, key);
    AttributeDetail {
        score: clamp_unit(number_field(detail, "score", fallback_score)),
        reasons: string_list(detail, "reasons", NO_CAP, NO_CAP),
        examples: string_list(detail, "examples", NO_CAP, NO_CAP),
        improvements: string_list(detail, "improvements", NO_CAP, NO_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request(accent_enabled: bool) -> VoiceRequest {
        VoiceRequest {
            text: "I led a team of five nurses through a ward redesign.".to_string(),
            accent_enabled,
        }
    }

    #[test]
    fn test_focus_prefers_confidence_on_ties() {
        let scores = VoiceScores {
            confidence: 0.5,
            nervousness: 0.5,
            engagement: 0.5,
            clarity: 0.5,
        };
        assert_eq!(focus_attribute(&scores), ("confidence", 0.5));
    }

    #[test]
    fn test_focus_inverts_nervousness() {
        let scores = VoiceScores {
            confidence: 0.8,
            nervousness: 0.9,
            engagement: 0.8,
            clarity: 0.8,
        };
        let (attribute, score) = focus_attribute(&scores);
        assert_eq!(attribute, "nervousness");
        assert!((score - 0.1).abs() < 1e-9);
    }

    #[test]
    fn test_focus_picks_lowest_direct_score() {
        let scores = VoiceScores {
            confidence: 0.7,
            nervousness: 0.2,
            engagement: 0.4,
            clarity: 0.6,
        };
        assert_eq!(focus_attribute(&scores), ("engagement", 0.4));
    }

    #[test]
    fn test_sanitize_total_on_null() {
        let result = sanitize(&request(false), &Value::Null);
        assert_eq!(result.scores.confidence, 0.0);
        assert_eq!(result.feedback.attribute, "confidence");
        assert!(result.feedback.pronunciation.is_none());
        assert!(result.detailed_analysis.clarity.reasons.is_empty());
    }

    #[test]
    fn test_sanitize_clamps_out_of_range_scores() {
        let result = sanitize(
            &request(false),
            &json!({"confidence": 1.4, "nervousness": -0.2}),
        );
        assert_eq!(result.scores.confidence, 1.0);
        assert_eq!(result.scores.nervousness, 0.0);
    }

    #[test]
    fn test_feedback_carries_detail_of_focus_attribute() {
        let result = sanitize(
            &request(false),
            &json!({
                "confidence": 0.9,
                "nervousness": 0.1,
                "engagement": 0.3,
                "clarity": 0.8,
                "analysis": {
                    "engagement": {
                        "score": 0.3,
                        "reasons": ["Flat delivery"],
                        "examples": ["monotone opening"],
                        "improvements": ["Vary your tone"]
                    }
                },
                "primaryFeedback": "Bring more energy to your answers."
            }),
        );
        assert_eq!(result.feedback.attribute, "engagement");
        assert_eq!(result.feedback.reasons, vec!["Flat delivery"]);
        assert_eq!(
            result.feedback.primary_feedback,
            "Bring more energy to your answers."
        );
    }

    #[test]
    fn test_accent_mode_includes_pronunciation_block() {
        let result = sanitize(
            &request(true),
            &json!({
                "pronunciation": {
                    "patterns": ["th-fronting"],
                    "feedback": ["Round the 'ou' in about"],
                    "focusWords": ["about", "sorry"],
                    "practiceExercises": ["Read the weather report aloud"]
                }
            }),
        );
        let coaching = result.feedback.pronunciation.expect("accent block");
        assert_eq!(coaching.focus_words, vec!["about", "sorry"]);
        assert_eq!(coaching.patterns, vec!["th-fronting"]);
    }

    #[test]
    fn test_prompt_splices_accent_sections_only_when_enabled() {
        let with = build_prompt(&request(true));
        assert!(with.contains("\"pronunciation\" section"));
        assert!(with.contains("\"focusWords\""));

        let without = build_prompt(&request(false));
        assert!(!without.contains("focusWords"));
        assert!(without.contains("I led a team of five nurses"));
    }
}
