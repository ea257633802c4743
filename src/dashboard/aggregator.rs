use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;

use crate::config::DEFAULT_TIMEOUT_MS;
use crate::errors::AppError;
use crate::models::interview::InterviewRecord;

use super::identity::{Identity, IdentityResolver};
use super::repository::InterviewRepository;

/// What to do when nobody is signed in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GuestPolicy {
    /// Query both collections as a guest: nothing owned, the open pool available.
    #[default]
    Browse,
    /// Refuse before touching the repository.
    Reject,
}

impl GuestPolicy {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "browse" => Some(GuestPolicy::Browse),
            "reject" => Some(GuestPolicy::Reject),
            _ => None,
        }
    }
}

/// One dashboard section: the records in repository order plus its display decision.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Section {
    pub interviews: Vec<InterviewRecord>,
    /// `true` renders the list, `false` the empty-state message.
    pub is_non_empty: bool,
}

impl Section {
    pub fn new(interviews: Vec<InterviewRecord>) -> Self {
        let is_non_empty = !interviews.is_empty();
        Self { interviews, is_non_empty }
    }

    pub fn len(&self) -> usize {
        self.interviews.len()
    }

    pub fn is_empty(&self) -> bool {
        !self.is_non_empty
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Dashboard {
    pub viewer: Identity,
    pub owned: Section,
    pub available: Section,
}

/// Fans out the owned and available queries, joins them, and derives display state.
pub struct DashboardAggregator {
    repo: Arc<dyn InterviewRepository>,
    timeout: Duration,
    guest_policy: GuestPolicy,
}

impl DashboardAggregator {
    pub fn new(repo: Arc<dyn InterviewRepository>) -> Self {
        Self {
            repo,
            timeout: Duration::from_millis(DEFAULT_TIMEOUT_MS),
            guest_policy: GuestPolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_guest_policy(mut self, policy: GuestPolicy) -> Self {
        self.guest_policy = policy;
        self
    }

    /// Resolve the identity once, then aggregate for it.
    pub async fn load(&self, resolver: &dyn IdentityResolver) -> Result<Dashboard, AppError> {
        let identity = resolver.resolve().await?;
        self.aggregate(&identity).await
    }

    pub async fn aggregate(&self, identity: &Identity) -> Result<Dashboard, AppError> {
        if identity.is_guest() && self.guest_policy == GuestPolicy::Reject {
            log::debug!("Dashboard refused for guest");
            return Err(AppError::Unauthenticated);
        }

        log::debug!("Aggregating dashboard for {:?}", identity.viewer_id());

        let joined = async {
            tokio::try_join!(
                self.repo.fetch_owned(identity),
                self.repo.fetch_available(identity),
            )
        };
        let (owned, available) = match tokio::time::timeout(self.timeout, joined).await {
            Ok(result) => result?,
            Err(_) => {
                log::warn!("Dashboard queries exceeded {}ms", self.timeout.as_millis());
                return Err(AppError::Timeout(self.timeout));
            }
        };

        log::debug!("Dashboard loaded: owned={}, available={}", owned.len(), available.len());

        Ok(Dashboard {
            viewer: identity.clone(),
            owned: Section::new(owned),
            available: Section::new(available),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::{TimeZone, Utc};
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Barrier;

    fn record(id: &str, owner: &str) -> InterviewRecord {
        InterviewRecord {
            id: id.to_string(),
            user_id: owner.to_string(),
            role: "Frontend Developer".to_string(),
            interview_type: "Mixed".to_string(),
            level: "Junior".to_string(),
            techstack: vec!["React".to_string(), "TypeScript".to_string()],
            finalized: true,
            created_at: Utc.with_ymd_and_hms(2026, 2, 14, 12, 0, 0).unwrap(),
        }
    }

    fn ids(section: &Section) -> Vec<&str> {
        section.interviews.iter().map(|r| r.id.as_str()).collect()
    }

    /// Returns canned results, optionally delayed, and counts calls.
    #[derive(Default)]
    struct Scripted {
        owned: Vec<InterviewRecord>,
        available: Vec<InterviewRecord>,
        owned_fails: bool,
        available_fails: bool,
        owned_delay: Option<Duration>,
        available_delay: Option<Duration>,
        calls: AtomicUsize,
        seen: std::sync::Mutex<Vec<Identity>>,
    }

    impl Scripted {
        fn record_call(&self, identity: &Identity) {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.seen.lock().unwrap().push(identity.clone());
        }
    }

    #[async_trait]
    impl InterviewRepository for Scripted {
        async fn fetch_owned(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
            self.record_call(identity);
            if let Some(d) = self.owned_delay {
                tokio::time::sleep(d).await;
            }
            if self.owned_fails {
                return Err(AppError::Repository("owned query failed".into()));
            }
            Ok(self.owned.clone())
        }

        async fn fetch_available(&self, identity: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
            self.record_call(identity);
            if let Some(d) = self.available_delay {
                tokio::time::sleep(d).await;
            }
            if self.available_fails {
                return Err(AppError::Repository("available query failed".into()));
            }
            Ok(self.available.clone())
        }
    }

    /// Each query waits until the other one has started.
    struct Rendezvous {
        barrier: Barrier,
    }

    #[async_trait]
    impl InterviewRepository for Rendezvous {
        async fn fetch_owned(&self, _: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
            self.barrier.wait().await;
            Ok(vec![record("mine", "u1")])
        }

        async fn fetch_available(&self, _: &Identity) -> Result<Vec<InterviewRecord>, AppError> {
            self.barrier.wait().await;
            Ok(vec![record("theirs", "u2")])
        }
    }

    #[tokio::test]
    async fn owned_only_shows_list_and_available_empty_state() {
        let repo = Arc::new(Scripted {
            owned: vec![record("i1", "u1"), record("i2", "u1")],
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);

        let dash = agg.aggregate(&Identity::known("u1", "Ada")).await.expect("dashboard");
        assert!(dash.owned.is_non_empty);
        assert_eq!(dash.owned.len(), 2);
        assert!(!dash.available.is_non_empty);
        assert!(dash.available.is_empty());
    }

    #[tokio::test]
    async fn guest_with_nothing_stored_gets_two_empty_sections() {
        let repo = Arc::new(Scripted::default());
        let agg = DashboardAggregator::new(repo.clone());

        let dash = agg.aggregate(&Identity::Guest).await.expect("dashboard");
        assert!(!dash.owned.is_non_empty);
        assert!(!dash.available.is_non_empty);
        assert_eq!(dash.viewer, Identity::Guest);
        // Browse does not short-circuit: both queries still run, as the guest.
        assert_eq!(repo.calls.load(Ordering::SeqCst), 2);
        assert!(repo.seen.lock().unwrap().iter().all(|i| i.is_guest()));
    }

    #[tokio::test]
    async fn reject_policy_fails_fast_for_guest() {
        let repo = Arc::new(Scripted::default());
        let agg = DashboardAggregator::new(repo.clone()).with_guest_policy(GuestPolicy::Reject);

        let err = agg.aggregate(&Identity::Guest).await.unwrap_err();
        assert!(matches!(err, AppError::Unauthenticated));
        assert_eq!(repo.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn reject_policy_still_serves_known_viewers() {
        let repo = Arc::new(Scripted {
            available: vec![record("x", "u2")],
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo).with_guest_policy(GuestPolicy::Reject);

        let dash = agg.aggregate(&Identity::known("u1", "Ada")).await.expect("dashboard");
        assert!(dash.available.is_non_empty);
    }

    #[tokio::test]
    async fn owned_failure_fails_whole_aggregation() {
        let repo = Arc::new(Scripted {
            owned_fails: true,
            available: vec![record("x", "u2")],
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);

        let err = agg.aggregate(&Identity::known("u1", "Ada")).await.unwrap_err();
        assert!(matches!(err, AppError::Repository(_)));
    }

    #[tokio::test]
    async fn available_failure_fails_whole_aggregation() {
        let repo = Arc::new(Scripted {
            owned: vec![record("i1", "u1")],
            owned_delay: Some(Duration::from_millis(20)),
            available_fails: true,
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);

        let result = agg.aggregate(&Identity::known("u1", "Ada")).await;
        assert!(matches!(result, Err(AppError::Repository(_))));
    }

    #[tokio::test]
    async fn queries_run_concurrently() {
        let repo = Arc::new(Rendezvous { barrier: Barrier::new(2) });
        // Sequential execution would park on the barrier until the timeout fires.
        let agg = DashboardAggregator::new(repo).with_timeout(Duration::from_secs(2));

        let dash = agg.aggregate(&Identity::known("u1", "Ada")).await.expect("dashboard");
        assert_eq!(ids(&dash.owned), vec!["mine"]);
        assert_eq!(ids(&dash.available), vec!["theirs"]);
    }

    #[tokio::test(start_paused = true)]
    async fn slow_query_does_not_delay_the_other() {
        let repo = Arc::new(Scripted {
            owned_delay: Some(Duration::from_millis(150)),
            available_delay: Some(Duration::from_millis(150)),
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);

        let started = tokio::time::Instant::now();
        agg.aggregate(&Identity::known("u1", "Ada")).await.expect("dashboard");
        // Two 150ms waits overlapped, not summed.
        assert!(started.elapsed() < Duration::from_millis(300));
    }

    #[tokio::test]
    async fn slow_repository_times_out() {
        let repo = Arc::new(Scripted {
            available_delay: Some(Duration::from_secs(5)),
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo).with_timeout(Duration::from_millis(30));

        let err = agg.aggregate(&Identity::known("u1", "Ada")).await.unwrap_err();
        assert!(matches!(err, AppError::Timeout(d) if d == Duration::from_millis(30)));
    }

    #[tokio::test]
    async fn repository_order_is_preserved() {
        let repo = Arc::new(Scripted {
            owned: vec![record("z", "u1"), record("a", "u1"), record("m", "u1")],
            available: vec![record("q", "u2"), record("b", "u3")],
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);

        let dash = agg.aggregate(&Identity::known("u1", "Ada")).await.expect("dashboard");
        assert_eq!(ids(&dash.owned), vec!["z", "a", "m"]);
        assert_eq!(ids(&dash.available), vec!["q", "b"]);
    }

    #[tokio::test]
    async fn repeated_loads_are_identical() {
        let repo = Arc::new(Scripted {
            owned: vec![record("i1", "u1")],
            available: vec![record("x", "u2"), record("y", "u3")],
            ..Default::default()
        });
        let agg = DashboardAggregator::new(repo);
        let identity = Identity::known("u1", "Ada");

        let first = agg.aggregate(&identity).await.expect("first");
        let second = agg.aggregate(&identity).await.expect("second");
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn flag_tracks_length_for_every_size() {
        for n in 0..4 {
            let rows: Vec<_> = (0..n).map(|i| record(&format!("i{i}"), "u1")).collect();
            let repo = Arc::new(Scripted {
                owned: rows.clone(),
                available: rows,
                ..Default::default()
            });
            let dash = DashboardAggregator::new(repo)
                .aggregate(&Identity::known("u1", "Ada"))
                .await
                .expect("dashboard");
            assert_eq!(dash.owned.is_non_empty, n > 0);
            assert_eq!(dash.available.is_non_empty, n > 0);
        }
    }

    #[tokio::test]
    async fn load_uses_resolved_identity() {
        let repo = Arc::new(Scripted::default());
        let agg = DashboardAggregator::new(repo.clone());

        let dash = agg.load(&Identity::known("u9", "Grace")).await.expect("dashboard");
        assert_eq!(dash.viewer.viewer_id(), Some("u9"));
        assert!(repo.seen.lock().unwrap().iter().all(|i| i.viewer_id() == Some("u9")));
    }

    #[test]
    fn guest_policy_parses_case_insensitively() {
        assert_eq!(GuestPolicy::parse("Browse"), Some(GuestPolicy::Browse));
        assert_eq!(GuestPolicy::parse(" REJECT "), Some(GuestPolicy::Reject));
        assert_eq!(GuestPolicy::parse("deny"), None);
    }
}
