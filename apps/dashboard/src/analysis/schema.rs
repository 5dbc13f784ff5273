//! Response schema handed to the model with every analysis request.
//!
//! The decoder in `models::analysis` is the enforcement side of this
//! contract; the two must list the same required fields.

use serde_json::{json, Value};

/// Top-level fields the model must always emit.
pub const REQUIRED_FIELDS: &[&str] = &[
    "atsScore",
    "parsabilityScore",
    "keywordMatchScore",
    "candidateName",
    "candidateTitle",
    "professionalSummary",
    "contactInfo",
    "workExperience",
    "extractedSkills",
    "missingKeywords",
    "strengths",
    "weaknesses",
    "formattingIssues",
    "improvementPlan",
    "skillBreakdown",
];

pub const PRIORITY_VALUES: &[&str] = &["High", "Medium", "Low"];
pub const CATEGORY_VALUES: &[&str] = &["Content", "Keywords", "Formatting"];

fn string() -> Value {
    json!({ "type": "STRING" })
}

fn score(description: &str) -> Value {
    json!({ "type": "INTEGER", "description": description })
}

fn string_list(description: &str) -> Value {
    json!({ "type": "ARRAY", "items": string(), "description": description })
}

/// Builds the strict object schema (OpenAPI subset accepted by the model API).
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "atsScore": score("Overall ATS compatibility score, 0-100"),
            "parsabilityScore": score("How reliably an ATS can extract fields from the layout, 0-100"),
            "keywordMatchScore": score("Coverage of industry-standard keywords for the candidate's role, 0-100"),
            "candidateName": string(),
            "candidateTitle": string(),
            "professionalSummary": string(),
            "contactInfo": {
                "type": "OBJECT",
                "properties": {
                    "email": string(),
                    "phone": string(),
                    "location": string()
                },
                "required": ["email", "phone", "location"]
            },
            "workExperience": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "role": string(),
                        "company": string(),
                        "duration": string(),
                        "description": string_list("Bullet points for this role")
                    },
                    "required": ["role", "company", "duration", "description"]
                }
            },
            "extractedSkills": string_list("Skills found in the document"),
            "missingKeywords": string_list("Important keywords absent from the document"),
            "strengths": string_list("What the résumé does well"),
            "weaknesses": string_list("What holds the résumé back"),
            "formattingIssues": string_list("Layout problems that hurt ATS parsing"),
            "improvementPlan": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "priority": { "type": "STRING", "enum": PRIORITY_VALUES },
                        "category": { "type": "STRING", "enum": CATEGORY_VALUES },
                        "action": string(),
                        "explanation": string(),
                        "expectedBenefit": string()
                    },
                    "required": ["priority", "category", "action", "explanation", "expectedBenefit"]
                }
            },
            "skillBreakdown": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "category": string(),
                        "score": score("Proficiency for this skill category, 0-100")
                    },
                    "required": ["category", "score"]
                }
            }
        },
        "required": REQUIRED_FIELDS
    })
}
