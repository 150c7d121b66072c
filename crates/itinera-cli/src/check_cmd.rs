//! `itinera check` -- checklist completion tracking.

use anyhow::Result;

use itinera_core::AppStore;

use crate::CheckCommands;

pub fn run(store: &mut AppStore, command: CheckCommands) -> Result<()> {
    match command {
        CheckCommands::Toggle { id } => {
            store.toggle_checklist_item(&id);
            if store.is_checklist_item_completed(&id) {
                println!("checked {id}");
            } else {
                println!("unchecked {id}");
            }
            Ok(())
        }
        CheckCommands::List => list(store),
    }
}

fn list(store: &AppStore) -> Result<()> {
    let Some(plan) = store.plan() else {
        println!("no plan yet; run `itinera onboard` or `itinera plan refresh`");
        return Ok(());
    };

    let completed = store.completed_ids_in_plan();
    for category in &plan.checklist {
        println!("{}:", category.category);
        for item in &category.items {
            let mark = if completed.contains(&item.id) { "x" } else { " " };
            println!("  [{mark}] {} ({})", item.title, item.id);
        }
    }

    let orphans = store.completed_checklist_ids().len() - completed.len();
    if orphans > 0 {
        println!("({orphans} completed item(s) no longer in the current plan)");
    }
    Ok(())
}
