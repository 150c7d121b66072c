//! `itinera onboard` -- capture the profile and generate a plan.
//!
//! The profile is replaced wholesale; re-running onboard overwrites the
//! previous one and triggers a fresh plan fetch.

use anyhow::Result;
use clap::Args;

use itinera_contract::Profile;
use itinera_core::AppStore;

#[derive(Args)]
pub struct OnboardArgs {
    /// Origin country code, e.g. "cm"
    #[arg(long)]
    pub origin: String,

    /// Destination country code, e.g. "fr"
    #[arg(long)]
    pub destination: String,

    /// Travel purpose: study, work, tourism, family, or business
    #[arg(long)]
    pub purpose: String,

    /// Planned departure date (YYYY-MM-DD)
    #[arg(long)]
    pub departure: String,

    /// Stay duration in months
    #[arg(long)]
    pub duration: String,

    /// Passport expiry date (YYYY-MM-DD)
    #[arg(long)]
    pub passport_expiry: String,

    /// Whether a sponsor backs the trip
    #[arg(long)]
    pub sponsor: bool,

    /// Proof-of-funds level: low, medium, or high
    #[arg(long, default_value = "medium")]
    pub funds: String,

    /// Preferred language: en or fr
    #[arg(long, default_value = "en")]
    pub language: String,

    /// Free-text notes for the plan generator
    #[arg(long)]
    pub notes: Option<String>,
}

pub async fn run(store: &mut AppStore, args: OnboardArgs) -> Result<()> {
    let profile = Profile {
        origin_country: args.origin,
        destination_country: args.destination,
        purpose: args.purpose,
        departure_date: args.departure,
        duration: args.duration,
        passport_expiry: args.passport_expiry,
        has_sponsor: args.sponsor,
        funds_level: args.funds,
        language: args.language,
        notes: args.notes,
    };

    store.set_profile(Some(profile));
    println!("profile saved");

    store.sync_plan().await;
    match store.plan_error() {
        Some(error) => {
            println!("plan fetch failed: {error}");
            println!("run `itinera plan refresh` to retry");
        }
        None => {
            if let Some(plan) = store.plan() {
                println!(
                    "plan ready: {} tasks, {} documents, about {} weeks",
                    plan.summary.total_tasks,
                    plan.summary.total_documents,
                    plan.summary.estimated_weeks
                );
            }
        }
    }
    Ok(())
}
