//! Interview preparation: generates role-specific questions with answer
//! guidance from a job description.

use serde::{Deserialize, Serialize};

use crate::ai::prompts::{INTERVIEW_PROMPT_TEMPLATE, INTERVIEW_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::LlmClient;

/// How many questions to generate when the caller does not say.
pub const DEFAULT_QUESTION_COUNT: u32 = 8;
/// Upper bound on one generation; keeps output inside the token budget.
pub const MAX_QUESTION_COUNT: u32 = 15;

/// The angle a question probes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    Behavioral,
    Technical,
    Company,
}

/// One prepared question with its answer guidance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterviewQuestion {
    pub question: String,
    pub category: QuestionKind,
    pub answer_outline: String,
}

/// Generates interview questions for a role. `count` is clamped to
/// `1..=MAX_QUESTION_COUNT`; `None` uses the default.
pub async fn generate_interview_questions(
    llm: &LlmClient,
    role: &str,
    jd_text: &str,
    count: Option<u32>,
) -> Result<Vec<InterviewQuestion>, AppError> {
    let count = count
        .unwrap_or(DEFAULT_QUESTION_COUNT)
        .clamp(1, MAX_QUESTION_COUNT);

    let prompt = INTERVIEW_PROMPT_TEMPLATE
        .replace("{count}", &count.to_string())
        .replace("{role}", role)
        .replace("{jd_text}", jd_text);

    let questions: Vec<InterviewQuestion> = llm
        .call_json(&prompt, INTERVIEW_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Interview question generation failed: {e}")))?;

    if questions.is_empty() {
        return Err(AppError::Llm(
            "Interview generation returned no questions".to_string(),
        ));
    }

    Ok(questions)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_question_kind_serde_snake_case() {
        let kind: QuestionKind = serde_json::from_str(r#""behavioral""#).unwrap();
        assert_eq!(kind, QuestionKind::Behavioral);
        assert_eq!(
            serde_json::to_string(&QuestionKind::Company).unwrap(),
            r#""company""#
        );
    }

    #[test]
    fn test_question_array_deserializes_from_llm_shape() {
        let json = r#"[
            {
                "question": "Walk me through a ledger reconciliation you owned.",
                "category": "technical",
                "answer_outline": "Name the system, the discrepancy class, the fix."
            },
            {
                "question": "Why this company?",
                "category": "company",
                "answer_outline": "Tie sector knowledge to the company's market."
            }
        ]"#;
        let questions: Vec<InterviewQuestion> = serde_json::from_str(json).unwrap();
        assert_eq!(questions.len(), 2);
        assert_eq!(questions[0].category, QuestionKind::Technical);
    }

    #[test]
    fn test_unknown_category_fails_deserialization() {
        let json = r#"[{"question": "?", "category": "trick", "answer_outline": "..."}]"#;
        let result: Result<Vec<InterviewQuestion>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_count_clamping_bounds() {
        assert_eq!(50u32.clamp(1, MAX_QUESTION_COUNT), MAX_QUESTION_COUNT);
        assert_eq!(0u32.clamp(1, MAX_QUESTION_COUNT), 1);
    }
}
