//! Cover letter generation: builds a structured letter from the
//! applicant's profile and a target job.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};

use crate::ai::prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};
use crate::errors::AppError;
use crate::llm_client::prompts::{FACTUAL_INSTRUCTION, UAE_MARKET_INSTRUCTION};
use crate::llm_client::LlmClient;

/// The applicant facts the letter may draw on. Anything not in here must
/// not appear in the output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplicantProfile {
    pub full_name: String,
    pub headline: String,
    pub summary: Option<String>,
    pub skills: Vec<String>,
    pub years_experience: Option<u32>,
}

/// The job the letter targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobTarget {
    pub job_title: String,
    pub company: Option<String>,
    pub jd_text: String,
}

/// Structured letter returned by the LLM, rendered client-side.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoverLetter {
    pub greeting: String,
    pub opening: String,
    pub body_paragraphs: Vec<String>,
    pub closing: String,
    pub signature: String,
}

/// Generates a cover letter for one application.
pub async fn generate_cover_letter(
    llm: &LlmClient,
    applicant: &ApplicantProfile,
    job: &JobTarget,
) -> Result<CoverLetter, AppError> {
    let prompt = build_cover_letter_prompt(applicant, job)?;

    let letter: CoverLetter = llm
        .call_json(&prompt, COVER_LETTER_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Cover letter generation failed: {e}")))?;

    if letter.body_paragraphs.is_empty() {
        return Err(AppError::Llm(
            "Cover letter generation returned no body paragraphs".to_string(),
        ));
    }

    Ok(letter)
}

fn build_cover_letter_prompt(
    applicant: &ApplicantProfile,
    job: &JobTarget,
) -> Result<String, AppError> {
    let applicant_json = serde_json::to_string_pretty(applicant)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize applicant: {e}")))?;
    let job_json = serde_json::to_string_pretty(job)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize job: {e}")))?;

    Ok(COVER_LETTER_PROMPT_TEMPLATE
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{market_instruction}", UAE_MARKET_INSTRUCTION)
        .replace("{applicant_json}", &applicant_json)
        .replace("{job_json}", &job_json))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn applicant() -> ApplicantProfile {
        ApplicantProfile {
            full_name: "Amina Khalid".to_string(),
            headline: "Senior Accountant".to_string(),
            summary: Some("8 years across audit and FP&A in Dubai.".to_string()),
            skills: vec!["IFRS".to_string(), "SAP".to_string()],
            years_experience: Some(8),
        }
    }

    fn job() -> JobTarget {
        JobTarget {
            job_title: "Finance Manager".to_string(),
            company: Some("Emirates Logistics LLC".to_string()),
            jd_text: "Lead month-end close and IFRS reporting.".to_string(),
        }
    }

    #[test]
    fn test_prompt_includes_applicant_and_job_facts() {
        let prompt = build_cover_letter_prompt(&applicant(), &job()).unwrap();
        assert!(prompt.contains("Amina Khalid"));
        assert!(prompt.contains("Emirates Logistics LLC"));
        assert!(prompt.contains("IFRS reporting"));
        // Fragments are substituted, not left as placeholders.
        assert!(!prompt.contains("{factual_instruction}"));
        assert!(!prompt.contains("{applicant_json}"));
    }

    #[test]
    fn test_cover_letter_deserializes_from_llm_shape() {
        let json = r#"{
            "greeting": "Dear Hiring Manager,",
            "opening": "I am applying for the Finance Manager role.",
            "body_paragraphs": ["Eight years of IFRS reporting...", "At my current firm..."],
            "closing": "I would welcome the chance to discuss further.",
            "signature": "Sincerely,\nAmina Khalid"
        }"#;
        let letter: CoverLetter = serde_json::from_str(json).unwrap();
        assert_eq!(letter.body_paragraphs.len(), 2);
        assert!(letter.signature.contains("Amina"));
    }

    #[test]
    fn test_cover_letter_missing_field_fails_deserialization() {
        let json = r#"{"greeting": "Dear Hiring Manager,", "opening": "..."}"#;
        let result: Result<CoverLetter, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }
}
