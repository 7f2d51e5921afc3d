//! Canadian English pronunciation feedback on a piece of spoken text.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::analysis::prompts::{PRONUNCIATION_SYSTEM, PRONUNCIATION_TEMPLATE};
use crate::analysis::{AnalysisKind, Analyzer};
use crate::sanitize::{
    array_field, clamp_unit, number_field, string_field, string_list, NO_CAP,
};

#[derive(Debug, Clone, Deserialize)]
pub struct PronunciationRequest {
    pub text: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WordFeedback {
    pub word: String,
    pub canadian_pronunciation: String,
    pub user_pronunciation: String,
    pub confidence: f64,
    pub tips: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PronunciationAnalysis {
    pub feedback: Vec<WordFeedback>,
}

pub fn analyzer() -> Analyzer<PronunciationRequest, PronunciationAnalysis> {
    Analyzer {
        kind: AnalysisKind::Pronunciation,
        system: PRONUNCIATION_SYSTEM,
        build_prompt,
        sanitize,
    }
}

fn build_prompt(request: &PronunciationRequest) -> String {
    PRONUNCIATION_TEMPLATE.replace("{text}", &request.text)
}

pub fn sanitize(_request: &PronunciationRequest, parsed: &Value) -> PronunciationAnalysis {
    PronunciationAnalysis {
        feedback: array_field(parsed, "feedback")
            .iter()
            .map(sanitize_word)
            .collect(),
    }
}

fn sanitize_word(raw: &Value) -> WordFeedback {
    WordFeedback {
        word: string_field(raw, "word", NO_CAP),
        canadian_pronunciation: string_field(raw, "canadianPronunciation", NO_CAP),
        user_pronunciation: string_field(raw, "userPronunciation", NO_CAP),
        confidence: clamp_unit(number_field(raw, "confidence", 0.0)),
        tips: string_list(raw, "tips", NO_CAP, NO_CAP),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn request() -> PronunciationRequest {
        PronunciationRequest {
            text: "Sorry about the process delay.".to_string(),
        }
    }

    #[test]
    fn test_sanitize_total_on_degenerate_inputs() {
        for parsed in [Value::Null, json!({}), json!({"feedback": "nope"})] {
            let result = sanitize(&request(), &parsed);
            assert!(result.feedback.is_empty());
        }
    }

    #[test]
    fn test_word_feedback_defaults() {
        let result = sanitize(&request(), &json!({"feedback": [{}]}));
        let word = &result.feedback[0];
        assert_eq!(word.word, "");
        assert_eq!(word.canadian_pronunciation, "");
        assert_eq!(word.confidence, 0.0);
        assert!(word.tips.is_empty());
    }

    #[test]
    fn test_word_feedback_passthrough_and_clamp() {
        let result = sanitize(
            &request(),
            &json!({"feedback": [{
                "word": "about",
                "canadianPronunciation": "uh-BOWT",
                "userPronunciation": "a-BAUT",
                "confidence": 1.7,
                "tips": ["Round the vowel", 42]
            }]}),
        );
        let word = &result.feedback[0];
        assert_eq!(word.word, "about");
        assert_eq!(word.canadian_pronunciation, "uh-BOWT");
        assert_eq!(word.confidence, 1.0);
        assert_eq!(word.tips, vec!["Round the vowel", "42"]);
    }

    #[test]
    fn test_prompt_embeds_text() {
        let prompt = build_prompt(&request());
        assert!(prompt.contains("Sorry about the process delay."));
        assert!(prompt.contains("Canadian English"));
    }
}
