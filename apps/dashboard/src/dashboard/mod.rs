//! Builds the dashboard payload from one analysis result: candidate header,
//! score cards, filtered feedback and the export file name.

pub mod export;
pub mod feedback;
pub mod scores;

use serde::Serialize;

use crate::models::analysis::{AnalysisResult, ContactInfo, WorkExperience};

use self::feedback::{derive_feedback, filter_items, tab_counts, CategoryFilter, FeedbackItem, TabCounts};
use self::scores::{summarize, ScoreSummary};

#[derive(Debug, Clone, Serialize)]
pub struct CandidateHeader {
    pub name: String,
    pub title: String,
    pub summary: String,
    pub contact: ContactInfo,
}

#[derive(Debug, Clone, Serialize)]
pub struct FeedbackPanel {
    pub active_tab: CategoryFilter,
    pub active_count: usize,
    pub counts: TabCounts,
    pub items: Vec<FeedbackItem>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    pub candidate: CandidateHeader,
    pub scores: ScoreSummary,
    pub skills: Vec<String>,
    pub experience: Vec<WorkExperience>,
    pub strengths: Vec<String>,
    pub weaknesses: Vec<String>,
    pub feedback: FeedbackPanel,
    pub export_file_name: String,
}

impl DashboardView {
    pub fn build(result: &AnalysisResult, tab: CategoryFilter) -> Self {
        let all_items = derive_feedback(result);
        let items = filter_items(&all_items, tab).into_iter().cloned().collect();
        let counts = tab_counts(result);

        DashboardView {
            candidate: CandidateHeader {
                name: result.candidate_name.clone(),
                title: result.candidate_title.clone(),
                summary: result.professional_summary.clone(),
                contact: result.contact_info.clone(),
            },
            scores: summarize(result),
            skills: result.extracted_skills.clone(),
            experience: result.work_experience.clone(),
            strengths: result.strengths.clone(),
            weaknesses: result.weaknesses.clone(),
            feedback: FeedbackPanel {
                active_tab: tab,
                active_count: counts.get(tab),
                counts,
                items,
            },
            export_file_name: export::export_file_name(
                &result.candidate_name,
                export::EXPORT_EXTENSION,
            ),
        }
    }
}
