//! Flattens the model's findings into one list of categorized items for the
//! tabbed feedback panel.
//!
//! Order is fixed: missing keywords, then formatting issues, then the
//! improvement plan in the model's order.

use std::str::FromStr;

use serde::Serialize;

use crate::models::analysis::{AnalysisResult, Category, ImprovementItem, Priority};

pub const MISSING_KEYWORDS_TITLE: &str = "Missing Critical Keywords";

/// Résumé section a feedback item points at in the document preview.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DocumentSection {
    Skills,
    Summary,
    Experience,
    Document,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FeedbackItem {
    pub id: String,
    pub title: String,
    pub description: String,
    pub priority: Priority,
    pub category: Category,
    pub section: DocumentSection,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub keywords: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected_benefit: Option<String>,
}

/// Feedback tab selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum CategoryFilter {
    #[default]
    All,
    Content,
    Keywords,
    Formatting,
}

impl CategoryFilter {
    pub fn matches(&self, category: Category) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Content => category == Category::Content,
            CategoryFilter::Keywords => category == Category::Keywords,
            CategoryFilter::Formatting => category == Category::Formatting,
        }
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "" | "all" => Ok(CategoryFilter::All),
            "content" => Ok(CategoryFilter::Content),
            "keywords" => Ok(CategoryFilter::Keywords),
            "formatting" => Ok(CategoryFilter::Formatting),
            other => Err(format!(
                "Unknown category '{other}'. Expected one of: All, Content, Keywords, Formatting"
            )),
        }
    }
}

/// Item count per feedback tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TabCounts {
    pub all: usize,
    pub content: usize,
    pub keywords: usize,
    pub formatting: usize,
}

impl TabCounts {
    pub fn get(&self, filter: CategoryFilter) -> usize {
        match filter {
            CategoryFilter::All => self.all,
            CategoryFilter::Content => self.content,
            CategoryFilter::Keywords => self.keywords,
            CategoryFilter::Formatting => self.formatting,
        }
    }
}

pub fn derive_feedback(result: &AnalysisResult) -> Vec<FeedbackItem> {
    let mut items = Vec::with_capacity(
        1 + result.formatting_issues.len() + result.improvement_plan.len(),
    );

    if !result.missing_keywords.is_empty() {
        items.push(FeedbackItem {
            id: "missing-keywords".to_string(),
            title: MISSING_KEYWORDS_TITLE.to_string(),
            description: format!(
                "Your resume is missing {} keyword{} that recruiters and ATS filters look for: {}.",
                result.missing_keywords.len(),
                if result.missing_keywords.len() == 1 { "" } else { "s" },
                result.missing_keywords.join(", ")
            ),
            priority: Priority::High,
            category: Category::Keywords,
            section: DocumentSection::Skills,
            keywords: result.missing_keywords.clone(),
            expected_benefit: None,
        });
    }

    items.extend(
        result
            .formatting_issues
            .iter()
            .enumerate()
            .map(|(i, issue)| FeedbackItem {
                id: format!("formatting-{i}"),
                title: "Formatting Issue".to_string(),
                description: issue.clone(),
                priority: Priority::Medium,
                category: Category::Formatting,
                section: DocumentSection::Document,
                keywords: vec![],
                expected_benefit: None,
            }),
    );

    items.extend(
        result
            .improvement_plan
            .iter()
            .enumerate()
            .map(|(i, step)| FeedbackItem {
                id: format!("plan-{i}"),
                title: step.action.clone(),
                description: step.explanation.clone(),
                priority: step.priority,
                category: step.category,
                section: section_for(step),
                keywords: vec![],
                expected_benefit: Some(step.expected_benefit.clone()),
            }),
    );

    items
}

/// Picks the document section an improvement-plan step refers to.
pub fn section_for(step: &ImprovementItem) -> DocumentSection {
    if step.category == Category::Keywords {
        return DocumentSection::Skills;
    }
    let action = step.action.to_lowercase();
    if action.contains("summary") || action.contains("objective") {
        DocumentSection::Summary
    } else if step.category == Category::Content {
        DocumentSection::Experience
    } else {
        DocumentSection::Document
    }
}

/// Order-preserving filter over `category`.
pub fn filter_items(items: &[FeedbackItem], filter: CategoryFilter) -> Vec<&FeedbackItem> {
    items.iter().filter(|item| filter.matches(item.category)).collect()
}

pub fn tab_counts(result: &AnalysisResult) -> TabCounts {
    let plan_count = |category: Category| {
        result
            .improvement_plan
            .iter()
            .filter(|step| step.category == category)
            .count()
    };

    let content = plan_count(Category::Content);
    let keywords = usize::from(!result.missing_keywords.is_empty()) + plan_count(Category::Keywords);
    let formatting = result.formatting_issues.len() + plan_count(Category::Formatting);

    TabCounts {
        all: content + keywords + formatting,
        content,
        keywords,
        formatting,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::analysis::fixtures::sample_payload;
    use serde_json::json;

    fn result() -> AnalysisResult {
        serde_json::from_value(sample_payload()).unwrap()
    }

    fn step(priority: Priority, category: Category, action: &str) -> ImprovementItem {
        ImprovementItem {
            priority,
            category,
            action: action.to_string(),
            explanation: "why".to_string(),
            expected_benefit: "gain".to_string(),
        }
    }

    fn rich_result() -> AnalysisResult {
        let mut r = result();
        r.formatting_issues = vec![
            "Two-column layout".to_string(),
            "Contact details in header".to_string(),
        ];
        r.improvement_plan = vec![
            step(Priority::High, Category::Content, "Quantify achievements at Acme"),
            step(Priority::Low, Category::Formatting, "Use standard section headings"),
            step(Priority::Medium, Category::Keywords, "Add Terraform to skills"),
            step(Priority::Medium, Category::Content, "Rewrite the professional Summary"),
        ];
        r
    }

    #[test]
    fn test_example_scenario() {
        // ats=72, two missing keywords, no formatting issues, one Keywords step.
        let r = result();
        let items = derive_feedback(&r);
        assert_eq!(items.len(), 2);
        assert_eq!(items[0].title, MISSING_KEYWORDS_TITLE);
        assert_eq!(items[0].keywords, vec!["Kubernetes", "Terraform"]);
        assert_eq!(items[1].title, "Add cloud tooling");

        let counts = tab_counts(&r);
        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.all, 2);
        assert_eq!(counts.formatting, 0);
        assert_eq!(counts.content, 0);
    }

    #[test]
    fn test_fixed_source_order() {
        let items = derive_feedback(&rich_result());
        let ids: Vec<&str> = items.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(
            ids,
            vec![
                "missing-keywords",
                "formatting-0",
                "formatting-1",
                "plan-0",
                "plan-1",
                "plan-2",
                "plan-3"
            ]
        );
    }

    #[test]
    fn test_formatting_items_are_medium_priority() {
        let items = derive_feedback(&rich_result());
        let formatting: Vec<_> = items.iter().filter(|i| i.id.starts_with("formatting")).collect();
        assert_eq!(formatting.len(), 2);
        assert!(formatting.iter().all(|i| i.priority == Priority::Medium));
        assert!(formatting.iter().all(|i| i.category == Category::Formatting));
        assert_eq!(formatting[0].description, "Two-column layout");
    }

    #[test]
    fn test_plan_items_keep_their_priority_and_category() {
        let items = derive_feedback(&rich_result());
        let plan: Vec<_> = items.iter().filter(|i| i.id.starts_with("plan")).collect();
        assert_eq!(plan[0].priority, Priority::High);
        assert_eq!(plan[0].category, Category::Content);
        assert_eq!(plan[1].priority, Priority::Low);
        assert_eq!(plan[2].category, Category::Keywords);
        assert_eq!(plan[0].expected_benefit.as_deref(), Some("gain"));
    }

    #[test]
    fn test_no_missing_keywords_item_when_list_empty() {
        let mut r = rich_result();
        r.missing_keywords.clear();
        let items = derive_feedback(&r);
        assert!(items.iter().all(|i| i.title != MISSING_KEYWORDS_TITLE));
        assert_eq!(tab_counts(&r).keywords, 1);
    }

    #[test]
    fn test_section_rules() {
        assert_eq!(
            section_for(&step(Priority::High, Category::Keywords, "Rewrite summary with keywords")),
            DocumentSection::Skills
        );
        assert_eq!(
            section_for(&step(Priority::High, Category::Formatting, "Shorten the OBJECTIVE")),
            DocumentSection::Summary
        );
        assert_eq!(
            section_for(&step(Priority::High, Category::Content, "Quantify bullets")),
            DocumentSection::Experience
        );
        assert_eq!(
            section_for(&step(Priority::High, Category::Formatting, "Use one column")),
            DocumentSection::Document
        );
    }

    #[test]
    fn test_all_count_equals_sum_of_tabs() {
        let r = rich_result();
        let counts = tab_counts(&r);
        assert_eq!(counts.all, counts.content + counts.keywords + counts.formatting);
        assert_eq!(counts.all, derive_feedback(&r).len());
        assert_eq!(counts.content, 2);
        assert_eq!(counts.keywords, 2);
        assert_eq!(counts.formatting, 3);
    }

    #[test]
    fn test_tab_counts_match_filtered_lengths() {
        let r = rich_result();
        let items = derive_feedback(&r);
        let counts = tab_counts(&r);
        for filter in [
            CategoryFilter::All,
            CategoryFilter::Content,
            CategoryFilter::Keywords,
            CategoryFilter::Formatting,
        ] {
            assert_eq!(filter_items(&items, filter).len(), counts.get(filter), "{filter:?}");
        }
    }

    #[test]
    fn test_filter_keeps_only_category_in_order() {
        let items = derive_feedback(&rich_result());
        let content = filter_items(&items, CategoryFilter::Content);
        assert!(content.iter().all(|i| i.category == Category::Content));
        let ids: Vec<&str> = content.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["plan-0", "plan-3"]);

        let formatting = filter_items(&items, CategoryFilter::Formatting);
        let ids: Vec<&str> = formatting.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["formatting-0", "formatting-1", "plan-1"]);
    }

    #[test]
    fn test_filter_all_is_identity() {
        let items = derive_feedback(&rich_result());
        let all = filter_items(&items, CategoryFilter::All);
        assert_eq!(all.len(), items.len());
        assert!(all.iter().zip(items.iter()).all(|(a, b)| *a == b));
    }

    #[test]
    fn test_empty_result_has_no_items() {
        let mut r = result();
        r.missing_keywords.clear();
        r.improvement_plan.clear();
        assert!(derive_feedback(&r).is_empty());
        assert_eq!(tab_counts(&r).all, 0);
    }

    #[test]
    fn test_category_filter_parsing() {
        assert_eq!("keywords".parse::<CategoryFilter>(), Ok(CategoryFilter::Keywords));
        assert_eq!("All".parse::<CategoryFilter>(), Ok(CategoryFilter::All));
        assert_eq!(" FORMATTING ".parse::<CategoryFilter>(), Ok(CategoryFilter::Formatting));
        assert!("design".parse::<CategoryFilter>().is_err());
    }

    #[test]
    fn test_single_missing_keyword_wording() {
        let mut r = result();
        r.missing_keywords = vec!["Go".to_string()];
        let items = derive_feedback(&r);
        assert!(items[0].description.contains("1 keyword that"));
    }

    #[test]
    fn test_serialized_item_shape() {
        let items = derive_feedback(&result());
        let value = serde_json::to_value(&items[1]).unwrap();
        assert_eq!(value["section"], json!("skills"));
        assert_eq!(value["priority"], json!("High"));
        assert!(value.get("keywords").is_none());
    }
}
