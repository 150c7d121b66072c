//! Checklist completion state.
//!
//! Completion is a set of stable item ids persisted independently of the
//! plan, so a plan refresh does not discard user progress. Entries whose
//! item no longer exists in the current plan are orphans: they stay in
//! storage (a regenerated plan may bring the item back) and are filtered
//! out at read time.

use std::collections::BTreeSet;

use super::AppStore;

impl AppStore {
    /// The raw completion set, orphans included.
    pub fn completed_checklist_ids(&self) -> &BTreeSet<String> {
        &self.state.completed_checklist_ids
    }

    /// Flip completion for one checklist item id.
    ///
    /// The id is not validated against the current plan; toggling an
    /// unknown id simply records it (and a second toggle removes it).
    pub fn toggle_checklist_item(&mut self, id: &str) {
        if !self.state.completed_checklist_ids.remove(id) {
            self.state.completed_checklist_ids.insert(id.to_string());
        }
        self.persist();
    }

    /// Whether the given id is in the completion set (orphaned or not).
    pub fn is_checklist_item_completed(&self, id: &str) -> bool {
        self.state.completed_checklist_ids.contains(id)
    }

    /// The completion set restricted to items present in the current
    /// plan. This is what render surfaces consume; orphans never appear
    /// here.
    pub fn completed_ids_in_plan(&self) -> BTreeSet<String> {
        let Some(plan) = &self.state.plan else {
            return BTreeSet::new();
        };
        plan.checklist
            .iter()
            .flat_map(|category| category.items.iter())
            .filter(|item| self.state.completed_checklist_ids.contains(&item.id))
            .map(|item| item.id.clone())
            .collect()
    }
}
