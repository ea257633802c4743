//! Dashboard read pipeline: identity → two concurrent interview queries → display state.

pub mod aggregator;
pub mod identity;
pub mod repository;

pub use aggregator::{Dashboard, DashboardAggregator, GuestPolicy, Section};
pub use identity::{Identity, IdentityResolver, SessionIdentityResolver, Viewer};
pub use repository::{InterviewRepository, MemoryInterviewRepository, PgInterviewRepository};
