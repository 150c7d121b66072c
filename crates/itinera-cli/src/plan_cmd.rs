//! `itinera plan` -- render and refresh the plan.

use anyhow::Result;

use itinera_contract::Plan;
use itinera_core::AppStore;

use crate::PlanCommands;

pub async fn run(store: &mut AppStore, command: PlanCommands) -> Result<()> {
    match command {
        PlanCommands::Show => show(store).await,
        PlanCommands::Refresh => refresh(store).await,
    }
}

async fn show(store: &mut AppStore) -> Result<()> {
    if store.profile().is_none() {
        println!("no profile yet; run `itinera onboard` first");
        return Ok(());
    }

    // Staleness is checked once here, the CLI equivalent of a mount.
    store.sync_plan_if_stale().await;

    if let Some(error) = store.plan_error() {
        println!("! plan refresh failed: {error}");
    }

    match store.plan() {
        Some(plan) => {
            // Rendering reads the plan and the filtered completion set
            // from the same store snapshot.
            let completed = store.completed_ids_in_plan();
            render(plan, &completed);
        }
        None => println!("no plan available; run `itinera plan refresh` to retry"),
    }
    Ok(())
}

async fn refresh(store: &mut AppStore) -> Result<()> {
    if store.profile().is_none() {
        println!("no profile yet; run `itinera onboard` first");
        return Ok(());
    }

    store.sync_plan().await;
    match store.plan_error() {
        Some(error) => println!("plan refresh failed: {error}"),
        None => {
            if let Some(plan) = store.plan() {
                println!(
                    "plan refreshed: {} tasks, {} documents, about {} weeks",
                    plan.summary.total_tasks,
                    plan.summary.total_documents,
                    plan.summary.estimated_weeks
                );
            }
        }
    }
    Ok(())
}

fn render(plan: &Plan, completed: &std::collections::BTreeSet<String>) {
    println!("== Summary ==");
    println!("confidence:      {:.0}%", plan.summary.confidence * 100.0);
    println!("estimated weeks: {}", plan.summary.estimated_weeks);
    println!("documents:       {}", plan.summary.total_documents);
    println!("tasks:           {}", plan.summary.total_tasks);

    if !plan.timeline.is_empty() {
        println!("\n== Timeline ==");
        for milestone in &plan.timeline {
            println!(
                "[{}] {} ({})",
                milestone.status, milestone.title, milestone.date
            );
            println!("    {}", milestone.description);
        }
    }

    if !plan.checklist.is_empty() {
        println!("\n== Checklist ==");
        for category in &plan.checklist {
            println!("{}:", category.category);
            for item in &category.items {
                let mark = if completed.contains(&item.id) { "x" } else { " " };
                println!("  [{mark}] {} ({})", item.title, item.id);
            }
        }
    }

    if !plan.documents.is_empty() {
        println!("\n== Documents ==");
        for category in &plan.documents {
            println!("{}:", category.category);
            for document in &category.documents {
                println!("  - {}: {}", document.name, document.description);
                for requirement in &document.requirements {
                    println!("      * {requirement}");
                }
            }
        }
    }

    if !plan.risks.is_empty() {
        println!("\n== Risks ==");
        for risk in &plan.risks {
            println!("({}) {}", risk.severity, risk.title);
            println!("    {}", risk.description);
            for step in &risk.mitigation {
                println!("    -> {step}");
            }
        }
    }
}
