// Template context structures for Askama templates, organized by page.

mod api;
mod card;
mod common;
mod dashboard;

pub use self::api::ApiErrorResponse;
pub use self::card::{InterviewCard, type_label};
pub use self::common::{APP_NAME, PageContext};
pub use self::dashboard::{DashboardTemplate, NO_AVAILABLE_INTERVIEWS, NO_PAST_INTERVIEWS};
