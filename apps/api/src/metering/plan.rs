//! Plan tiers and their fixed monthly AI-generation quotas.

use serde::{Deserialize, Serialize};

/// The three meterable AI feature groups. Each maps to exactly one
/// counter on the monthly usage row and one quota column per plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Resume,
    CoverLetter,
    Interview,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Resume, Category::CoverLetter, Category::Interview];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Resume => "resume",
            Category::CoverLetter => "cover_letter",
            Category::Interview => "interview",
        }
    }
}

/// Subscription plan tier. A closed set: adding a tier forces every
/// `match` below to be revisited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlanType {
    #[default]
    Free,
    PayPerDownload,
    Pro,
    Business,
}

impl PlanType {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanType::Free => "free",
            PlanType::PayPerDownload => "pay_per_download",
            PlanType::Pro => "pro",
            PlanType::Business => "business",
        }
    }

    /// Parses the string form stored on subscription rows.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "free" => Some(PlanType::Free),
            "pay_per_download" => Some(PlanType::PayPerDownload),
            "pro" => Some(PlanType::Pro),
            "business" => Some(PlanType::Business),
            _ => None,
        }
    }

    /// Monthly quotas for this plan.
    ///
    /// | Plan             | resumes | cover letters | interviews |
    /// |------------------|---------|---------------|------------|
    /// | Free             | 2       | 2             | 0          |
    /// | Pay-per-download | 2       | 2             | 0          |
    /// | Pro              | 40      | 40            | 30         |
    /// | Business         | 150     | 150           | 100        |
    ///
    /// A quota of 0 means the category is unavailable on that plan,
    /// not unlimited.
    pub fn quotas(self) -> PlanQuotas {
        match self {
            PlanType::Free | PlanType::PayPerDownload => PlanQuotas {
                resumes: 2,
                cover_letters: 2,
                interviews: 0,
            },
            PlanType::Pro => PlanQuotas {
                resumes: 40,
                cover_letters: 40,
                interviews: 30,
            },
            PlanType::Business => PlanQuotas {
                resumes: 150,
                cover_letters: 150,
                interviews: 100,
            },
        }
    }
}

/// Per-category monthly generation quotas for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanQuotas {
    pub resumes: u32,
    pub cover_letters: u32,
    pub interviews: u32,
}

impl PlanQuotas {
    pub fn for_category(&self, category: Category) -> u32 {
        match category {
            Category::Resume => self.resumes,
            Category::CoverLetter => self.cover_letters,
            Category::Interview => self.interviews,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_free_plan_quotas() {
        let quotas = PlanType::Free.quotas();
        assert_eq!(quotas.resumes, 2);
        assert_eq!(quotas.cover_letters, 2);
        assert_eq!(quotas.interviews, 0);
    }

    #[test]
    fn test_pay_per_download_matches_free_quotas() {
        assert_eq!(PlanType::PayPerDownload.quotas(), PlanType::Free.quotas());
    }

    #[test]
    fn test_pro_plan_quotas() {
        let quotas = PlanType::Pro.quotas();
        assert_eq!(quotas.resumes, 40);
        assert_eq!(quotas.cover_letters, 40);
        assert_eq!(quotas.interviews, 30);
    }

    #[test]
    fn test_business_plan_quotas() {
        let quotas = PlanType::Business.quotas();
        assert_eq!(quotas.resumes, 150);
        assert_eq!(quotas.cover_letters, 150);
        assert_eq!(quotas.interviews, 100);
    }

    #[test]
    fn test_plan_string_round_trip() {
        for plan in [
            PlanType::Free,
            PlanType::PayPerDownload,
            PlanType::Pro,
            PlanType::Business,
        ] {
            assert_eq!(PlanType::parse(plan.as_str()), Some(plan));
        }
        assert_eq!(PlanType::parse("enterprise"), None);
    }

    #[test]
    fn test_plan_serde_uses_snake_case() {
        let json = serde_json::to_string(&PlanType::PayPerDownload).unwrap();
        assert_eq!(json, r#""pay_per_download""#);

        let plan: PlanType = serde_json::from_str(r#""pro""#).unwrap();
        assert_eq!(plan, PlanType::Pro);
    }

    #[test]
    fn test_category_strings() {
        assert_eq!(Category::Resume.as_str(), "resume");
        assert_eq!(Category::CoverLetter.as_str(), "cover_letter");
        assert_eq!(Category::Interview.as_str(), "interview");
    }

    #[test]
    fn test_quota_lookup_by_category() {
        let quotas = PlanType::Pro.quotas();
        assert_eq!(quotas.for_category(Category::Resume), 40);
        assert_eq!(quotas.for_category(Category::CoverLetter), 40);
        assert_eq!(quotas.for_category(Category::Interview), 30);
    }

    #[test]
    fn test_default_plan_is_free() {
        assert_eq!(PlanType::default(), PlanType::Free);
    }
}
