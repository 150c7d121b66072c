//! `itinera status` -- profile, plan, and sync state overview.

use anyhow::Result;

use itinera_core::AppStore;

pub fn run(store: &AppStore) -> Result<()> {
    match store.profile() {
        Some(profile) => {
            println!(
                "profile: {} -> {} ({}, {} months)",
                profile.origin_country, profile.destination_country, profile.purpose,
                profile.duration
            );
        }
        None => println!("profile: none (run `itinera onboard`)"),
    }

    match store.plan() {
        Some(plan) => {
            println!(
                "plan:    {} tasks, {} documents, about {} weeks",
                plan.summary.total_tasks,
                plan.summary.total_documents,
                plan.summary.estimated_weeks
            );
            match store.plan_fetched_at() {
                Some(fetched_at) => println!("fetched: {fetched_at}"),
                None => println!("fetched: unknown"),
            }
            if store.is_plan_stale() {
                println!("         (stale; `itinera plan show` will refresh it)");
            }
        }
        None => println!("plan:    none"),
    }

    println!("chat:    {} message(s)", store.chat_history().len());
    if let Some(failed) = store.last_failed_message() {
        println!("         pending retry: {failed:?}");
    }

    let completed = store.completed_checklist_ids().len();
    if completed > 0 {
        println!("checked: {completed} checklist item(s)");
    }
    Ok(())
}
