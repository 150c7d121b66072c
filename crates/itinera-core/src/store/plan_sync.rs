//! Plan fetch, refresh, and the staleness policy.

use chrono::{DateTime, Duration, Utc};
use tracing::{debug, warn};

use itinera_contract::{plan_to_ui, profile_to_wire};

use super::AppStore;

/// Age beyond which a plan is eligible for background refresh.
const PLAN_STALE_AFTER_HOURS: i64 = 6;

impl AppStore {
    /// Fetch or refresh the plan.
    ///
    /// Never returns an error: transport failures land in
    /// [`AppStore::plan_error`] so the UI can render a retry banner while
    /// the previous plan stays visible. The previous error is cleared
    /// before the request resolves.
    ///
    /// At most one plan request is outbound at a time; a call while one
    /// is in flight is a no-op, as is a call without a profile.
    pub async fn sync_plan(&mut self) {
        if self.is_fetching_plan {
            debug!("plan fetch already in flight; skipping");
            return;
        }
        let Some(profile) = self.state.profile.clone() else {
            debug!("no profile; skipping plan fetch");
            return;
        };

        self.is_fetching_plan = true;
        self.plan_error = None;

        let payload = profile_to_wire(&profile);
        let result = self.transport.fetch_plan(&payload).await;
        self.is_fetching_plan = false;

        match result {
            Ok(wire_plan) => {
                self.state.plan = Some(plan_to_ui(&wire_plan, Some(&profile)));
                self.state.plan_fetched_at = Some(Utc::now());
                self.persist();
            }
            Err(e) => {
                warn!(error = %e, "plan fetch failed");
                self.plan_error = Some(e.to_string());
            }
        }
    }

    /// Refresh the plan only if it is stale. Called once per
    /// mount/hydration event, never polled.
    pub async fn sync_plan_if_stale(&mut self) {
        if self.is_plan_stale() {
            self.sync_plan().await;
        }
    }

    /// A plan is stale when absent, when its fetch timestamp is absent,
    /// or when more than six hours have passed since the fetch.
    pub fn is_plan_stale(&self) -> bool {
        stale_at(
            self.state.plan.is_some(),
            self.state.plan_fetched_at,
            Utc::now(),
        )
    }
}

fn stale_at(has_plan: bool, fetched_at: Option<DateTime<Utc>>, now: DateTime<Utc>) -> bool {
    if !has_plan {
        return true;
    }
    match fetched_at {
        None => true,
        Some(fetched) => now - fetched > Duration::hours(PLAN_STALE_AFTER_HOURS),
    }
}
