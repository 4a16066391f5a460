//! Resume tailoring and experience-bullet optimization. Both operations
//! are metered under the `resume` category.

use anyhow::anyhow;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::ai::prompts::{
    EXPERIENCE_PROMPT_TEMPLATE, EXPERIENCE_SYSTEM, RESUME_TAILOR_PROMPT_TEMPLATE,
    RESUME_TAILOR_SYSTEM,
};
use crate::errors::AppError;
use crate::llm_client::prompts::FACTUAL_INSTRUCTION;
use crate::llm_client::LlmClient;

/// Max LLM retries when the optimizer returns the wrong bullet count.
const MAX_OPTIMIZE_RETRIES: u32 = 2;

/// The parts of a stored resume the tailoring step works from. Resume
/// CRUD itself lives in the document service; we only receive a snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResumeSnapshot {
    pub summary: String,
    pub skills: Vec<String>,
    pub recent_titles: Vec<String>,
}

/// Tailoring output: a rewritten summary plus skill ordering and keyword
/// suggestions grounded in the original resume.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TailoredResume {
    pub tailored_summary: String,
    pub reordered_skills: Vec<String>,
    pub keyword_suggestions: Vec<String>,
}

/// One rewritten experience bullet, paired with its original.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptimizedBullet {
    pub original: String,
    pub improved: String,
}

/// Tailors a resume snapshot toward a job description.
pub async fn tailor_resume(
    llm: &LlmClient,
    snapshot: &ResumeSnapshot,
    jd_text: &str,
) -> Result<TailoredResume, AppError> {
    let resume_json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize resume: {e}")))?;

    let prompt = RESUME_TAILOR_PROMPT_TEMPLATE
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{resume_json}", &resume_json)
        .replace("{jd_text}", jd_text);

    let TailoredResume {
        tailored_summary,
        reordered_skills,
        keyword_suggestions,
    } = llm
        .call_json(&prompt, RESUME_TAILOR_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume tailoring failed: {e}")))?;

    // Skills the resume never listed are dropped, not surfaced.
    let (kept, invented): (Vec<String>, Vec<String>) = reordered_skills
        .into_iter()
        .partition(|s| snapshot.skills.iter().any(|k| k.eq_ignore_ascii_case(s)));

    if !invented.is_empty() {
        warn!(
            "Tailoring invented {} skill(s) not in the resume, dropped: {:?}",
            invented.len(),
            invented
        );
    }

    Ok(TailoredResume {
        tailored_summary,
        reordered_skills: kept,
        keyword_suggestions,
    })
}

/// Rewrites experience bullets to be achievement-oriented. Retries when
/// the LLM returns a different number of bullets than it was given.
pub async fn optimize_experience(
    llm: &LlmClient,
    bullets: &[String],
    role_context: &str,
) -> Result<Vec<OptimizedBullet>, AppError> {
    let bullets_json = serde_json::to_string_pretty(bullets)
        .map_err(|e| AppError::Internal(anyhow!("Failed to serialize bullets: {e}")))?;

    let prompt = EXPERIENCE_PROMPT_TEMPLATE
        .replace("{factual_instruction}", FACTUAL_INSTRUCTION)
        .replace("{role_context}", role_context)
        .replace("{bullets_json}", &bullets_json);

    for attempt in 0..=MAX_OPTIMIZE_RETRIES {
        let optimized: Vec<OptimizedBullet> = llm
            .call_json(&prompt, EXPERIENCE_SYSTEM)
            .await
            .map_err(|e| AppError::Llm(format!("Experience optimization failed: {e}")))?;

        if optimized.len() == bullets.len() {
            return Ok(optimized);
        }

        warn!(
            "Optimization attempt {}/{}: got {} bullets for {} inputs — retrying",
            attempt + 1,
            MAX_OPTIMIZE_RETRIES + 1,
            optimized.len(),
            bullets.len()
        );
    }

    Err(AppError::Llm(format!(
        "Experience optimization failed after {} attempts: bullet count never matched input",
        MAX_OPTIMIZE_RETRIES + 1
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tailored_resume_deserializes_from_llm_shape() {
        let json = r#"{
            "tailored_summary": "Finance professional with 8 years of IFRS reporting...",
            "reordered_skills": ["IFRS", "SAP"],
            "keyword_suggestions": ["month-end close"]
        }"#;
        let tailored: TailoredResume = serde_json::from_str(json).unwrap();
        assert_eq!(tailored.reordered_skills, vec!["IFRS", "SAP"]);
    }

    #[test]
    fn test_optimized_bullet_requires_both_fields() {
        let json = r#"[{"improved": "Led migration..."}]"#;
        let result: Result<Vec<OptimizedBullet>, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_resume_snapshot_round_trips() {
        let snapshot = ResumeSnapshot {
            summary: "Accountant".to_string(),
            skills: vec!["IFRS".to_string()],
            recent_titles: vec!["Senior Accountant".to_string()],
        };
        let json = serde_json::to_string(&snapshot).unwrap();
        let recovered: ResumeSnapshot = serde_json::from_str(&json).unwrap();
        assert_eq!(recovered.skills, snapshot.skills);
    }
}
