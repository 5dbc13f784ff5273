use serde::{Deserialize, Deserializer, Serialize};
use tracing::warn;

/// Structured résumé analysis produced by the model.
///
/// Every field is required on the wire; a payload missing any of them fails to
/// decode. Unknown extra fields are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    #[serde(deserialize_with = "deserialize_score")]
    pub ats_score: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub parsability_score: u8,
    #[serde(deserialize_with = "deserialize_score")]
    pub keyword_match_score: u8,
    pub candidate_name: String,
    pub candidate_title: String,
    pub professional_summary: String,
    pub contact_info: ContactInfo,
    pub work_experience: Vec<WorkExperience>,
    pub extracted_skills: Vec<String>,
    pub missing_keywords: Vec<String>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub formatting_issues: Vec<String>,
    pub improvement_plan: Vec<ImprovementItem>,
    pub skill_breakdown: Vec<SkillScore>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContactInfo {
    pub email: String,
    pub phone: String,
    pub location: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperience {
    pub role: String,
    pub company: String,
    pub duration: String,
    pub description: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    Content,
    Keywords,
    Formatting,
}

/// One prioritized recommendation from the model's improvement plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImprovementItem {
    pub priority: Priority,
    pub category: Category,
    pub action: String,
    pub explanation: String,
    pub expected_benefit: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkillScore {
    pub category: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub score: u8,
}

pub const MIN_SCORE: f64 = 0.0;
pub const MAX_SCORE: f64 = 100.0;

/// Accepts any JSON number and clamps it into `0..=100`.
///
/// The model is asked for integers in that range but nothing on its side
/// enforces it, so fractional values are rounded and outliers pinned.
fn deserialize_score<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    Ok(normalize_score(raw))
}

pub fn normalize_score(raw: f64) -> u8 {
    if raw.is_nan() {
        warn!("Model returned NaN score, treating as 0");
        return 0;
    }
    let clamped = raw.round().clamp(MIN_SCORE, MAX_SCORE);
    if clamped != raw {
        warn!("Model returned score {raw}, normalized to {clamped}");
    }
    clamped as u8
}

#[cfg(test)]
pub(crate) mod fixtures {
    use serde_json::{json, Value};

    /// A complete, schema-conforming payload as the model would emit it.
    pub fn sample_payload() -> Value {
        json!({
            "atsScore": 72,
            "parsabilityScore": 85,
            "keywordMatchScore": 64,
            "candidateName": "Jane Doe",
            "candidateTitle": "Senior Backend Engineer",
            "professionalSummary": "Backend engineer with 8 years building payment systems.",
            "contactInfo": {
                "email": "jane@example.com",
                "phone": "+1 555 0100",
                "location": "Berlin, DE"
            },
            "workExperience": [
                {
                    "role": "Senior Engineer",
                    "company": "Acme Pay",
                    "duration": "2019 - Present",
                    "description": [
                        "Led migration of ledger service to Rust",
                        "Cut p99 latency by 40%"
                    ]
                }
            ],
            "extractedSkills": ["Rust", "PostgreSQL", "Kafka", "Rust"],
            "missingKeywords": ["Kubernetes", "Terraform"],
            "strengths": ["Quantified impact"],
            "weaknesses": ["No cloud tooling listed"],
            "formattingIssues": [],
            "improvementPlan": [
                {
                    "priority": "High",
                    "category": "Keywords",
                    "action": "Add cloud tooling",
                    "explanation": "Infrastructure keywords are absent.",
                    "expectedBenefit": "Higher keyword match for platform roles."
                }
            ],
            "skillBreakdown": [
                {"category": "Backend", "score": 90},
                {"category": "Cloud", "score": 35}
            ]
        })
    }
}
