use askama::Template;

use crate::dashboard::Dashboard;

use super::{InterviewCard, PageContext};

pub const NO_PAST_INTERVIEWS: &str = "You haven't taken any interviews yet";
pub const NO_AVAILABLE_INTERVIEWS: &str = "There are no interviews available";

#[derive(Template)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub ctx: PageContext,
    pub has_past_interviews: bool,
    pub has_upcoming_interviews: bool,
    pub user_interviews: Vec<InterviewCard>,
    pub available_interviews: Vec<InterviewCard>,
    pub no_past_message: &'static str,
    pub no_available_message: &'static str,
}

impl DashboardTemplate {
    pub fn new(ctx: PageContext, dashboard: &Dashboard) -> Self {
        let viewer_id = dashboard.viewer.viewer_id();
        let cards = |records: &[crate::models::interview::InterviewRecord]| {
            records.iter().map(|r| InterviewCard::new(viewer_id, r)).collect::<Vec<_>>()
        };
        Self {
            ctx,
            has_past_interviews: dashboard.owned.is_non_empty,
            has_upcoming_interviews: dashboard.available.is_non_empty,
            user_interviews: cards(&dashboard.owned.interviews),
            available_interviews: cards(&dashboard.available.interviews),
            no_past_message: NO_PAST_INTERVIEWS,
            no_available_message: NO_AVAILABLE_INTERVIEWS,
        }
    }
}
