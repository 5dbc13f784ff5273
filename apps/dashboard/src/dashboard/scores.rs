use serde::Serialize;

use crate::models::analysis::{AnalysisResult, SkillScore};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScoreBand {
    Excellent,
    Good,
    Fair,
    Poor,
}

impl ScoreBand {
    pub fn for_score(score: u8) -> Self {
        match score {
            80..=u8::MAX => ScoreBand::Excellent,
            60..=79 => ScoreBand::Good,
            40..=59 => ScoreBand::Fair,
            _ => ScoreBand::Poor,
        }
    }
}

/// One gauge on the dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreCard {
    pub label: &'static str,
    pub score: u8,
    pub band: ScoreBand,
}

impl ScoreCard {
    fn new(label: &'static str, score: u8) -> Self {
        Self {
            label,
            score,
            band: ScoreBand::for_score(score),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScoreSummary {
    /// Rounded mean of the three headline scores.
    pub overall: u8,
    pub overall_band: ScoreBand,
    pub cards: Vec<ScoreCard>,
    pub skill_breakdown: Vec<SkillScore>,
}

pub fn summarize(result: &AnalysisResult) -> ScoreSummary {
    let cards = vec![
        ScoreCard::new("ATS Score", result.ats_score),
        ScoreCard::new("Parsability", result.parsability_score),
        ScoreCard::new("Keyword Match", result.keyword_match_score),
    ];
    let total: u32 = cards.iter().map(|c| u32::from(c.score)).sum();
    let overall = ((f64::from(total) / cards.len() as f64).round()) as u8;

    ScoreSummary {
        overall,
        overall_band: ScoreBand::for_score(overall),
        cards,
        skill_breakdown: result.skill_breakdown.clone(),
    }
}
