use chrono::{DateTime, Utc};

use crate::models::interview::InterviewRecord;

/// Everything one interview card needs, already formatted for display.
#[derive(Debug, Clone, PartialEq)]
pub struct InterviewCard {
    pub interview_id: String,
    pub viewer_id: Option<String>,
    pub role: String,
    pub type_label: String,
    pub techstack: Vec<String>,
    pub created_at: DateTime<Utc>,
    pub date_label: String,
    pub href: String,
}

impl InterviewCard {
    pub fn new(viewer_id: Option<&str>, record: &InterviewRecord) -> Self {
        Self {
            interview_id: record.id.clone(),
            viewer_id: viewer_id.map(str::to_string),
            role: record.role.clone(),
            type_label: type_label(&record.interview_type),
            techstack: record.techstack.clone(),
            created_at: record.created_at,
            date_label: record.created_at.format("%b %-d, %Y").to_string(),
            href: format!("/interview/{}", record.id),
        }
    }
}

/// Any "mix"-style type collapses to "Mixed".
pub fn type_label(interview_type: &str) -> String {
    if interview_type.to_ascii_lowercase().contains("mix") {
        "Mixed".to_string()
    } else {
        interview_type.to_string()
    }
}
