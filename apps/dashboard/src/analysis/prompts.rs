// Prompt constants for résumé analysis.
// Reuses cross-cutting fragments from llm_client::prompts.

use crate::llm_client::prompts::{GROUNDING_INSTRUCTION, JSON_ONLY_INSTRUCTION};

/// Task instruction sent alongside the PDF. The response shape itself is
/// carried by the schema, so the instruction only describes the judgement.
pub const ANALYSIS_TASK: &str = "\
You are an expert technical recruiter and Applicant Tracking System (ATS) specialist.
Analyze the attached résumé PDF the way a modern ATS and an experienced recruiter would.

SCORING (integers from 0 to 100):
- atsScore: overall likelihood the résumé passes automated screening.
- parsabilityScore: how reliably an ATS can extract fields from this layout.
  Penalize tables, multi-column layouts, text in images, headers/footers holding key data, unusual fonts.
- keywordMatchScore: coverage of industry-standard keywords for the candidate's apparent target role.

EXTRACTION:
- candidateName, candidateTitle, professionalSummary, contactInfo and workExperience exactly as written.
- extractedSkills: every skill, tool, language and framework mentioned.
- skillBreakdown: 4 to 6 skill categories with a proficiency score each.

FEEDBACK:
- missingKeywords: important keywords for the target role that the résumé lacks.
- strengths and weaknesses: concise, specific observations.
- formattingIssues: concrete layout problems that hurt ATS parsing.
- improvementPlan: prioritized, actionable steps. priority is one of High, Medium, Low;
  category is one of Content, Keywords, Formatting. Mention \"summary\" or \"objective\" in the
  action when the step targets that section.";

/// Full instruction text for one analysis request.
pub fn analysis_instruction() -> String {
    format!("{ANALYSIS_TASK}\n\n{GROUNDING_INSTRUCTION}\n\n{JSON_ONLY_INSTRUCTION}")
}
