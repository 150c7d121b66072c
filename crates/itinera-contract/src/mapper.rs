//! Contract mapper: pure translation between UI shapes and wire shapes.
//!
//! Both directions are total over their declared inputs. Malformed values
//! are substituted with fallbacks (the current date, a duration of 1, the
//! medium priority bucket), never rejected -- fallback-on-bad-input is the
//! error-handling strategy for this layer.

use chrono::{DateTime, NaiveDate, Utc};

use crate::plan::{
    ChecklistCategory, ChecklistItem, DocumentCategory, DocumentEntry, Milestone, MilestoneStatus,
    Plan, PlanSummary, Priority, Risk,
};
use crate::profile::Profile;
use crate::wire::{
    FundsLevel, Language, Purpose, WireChecklistItem, WireDocumentCategory, WirePlan, WireProfile,
    WireRiskItem, WireTimelineItem,
};

/// Confidence assumed when the wire summary omits one.
const DEFAULT_CONFIDENCE: f64 = 0.6;

/// Separator between timeline actions in a milestone description.
const ACTION_SEPARATOR: &str = " \u{2022} ";

// ---------------------------------------------------------------------------
// Profile -> wire payload
// ---------------------------------------------------------------------------

/// Translate a UI profile into the backend payload.
///
/// Enumerable fields go through fixed tables with an upper-cased-verbatim
/// fallback; dates are normalized to `YYYY-MM-DD` with the current UTC
/// date as fallback; the duration string is clamped to a minimum of 1.
pub fn profile_to_wire(profile: &Profile) -> WireProfile {
    WireProfile {
        origin_country: profile.origin_country.clone(),
        destination_country: profile.destination_country.clone(),
        purpose: map_purpose(&profile.purpose),
        planned_departure_date: ensure_iso_date(&profile.departure_date),
        duration_months: clamp_duration(&profile.duration),
        passport_expiry_date: ensure_iso_date(&profile.passport_expiry),
        has_sponsor: profile.has_sponsor,
        proof_of_funds_level: map_funds_level(&profile.funds_level),
        language: map_language(&profile.language),
        notes: normalize_notes(profile.notes.as_deref()),
    }
}

fn map_purpose(raw: &str) -> String {
    match raw {
        "study" => Purpose::Study.to_string(),
        "work" | "business" => Purpose::Work.to_string(),
        "tourism" | "family" => Purpose::Tourism.to_string(),
        other => other.to_uppercase(),
    }
}

fn map_funds_level(raw: &str) -> String {
    match raw {
        "low" => FundsLevel::Low.to_string(),
        "medium" => FundsLevel::Medium.to_string(),
        "high" => FundsLevel::High.to_string(),
        other => other.to_uppercase(),
    }
}

fn map_language(raw: &str) -> String {
    match raw {
        "en" => Language::En.to_string(),
        "fr" => Language::Fr.to_string(),
        other => other.to_uppercase(),
    }
}

/// Normalize a date string to `YYYY-MM-DD`. Unparseable or empty input
/// falls back to the current UTC date; this function cannot fail.
fn ensure_iso_date(raw: &str) -> String {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.format("%Y-%m-%d").to_string();
    }
    if let Ok(stamp) = DateTime::parse_from_rfc3339(trimmed) {
        return stamp.date_naive().format("%Y-%m-%d").to_string();
    }
    Utc::now().date_naive().format("%Y-%m-%d").to_string()
}

/// Parse the leading integer of a duration string, clamped to `>= 1`.
/// Empty, junk, zero, and negative input all become 1.
fn clamp_duration(raw: &str) -> u32 {
    let trimmed = raw.trim();
    let unsigned = trimmed.strip_prefix('+').unwrap_or(trimmed);
    if unsigned.starts_with('-') {
        return 1;
    }
    let digits: String = unsigned
        .chars()
        .take_while(|c| c.is_ascii_digit())
        .collect();
    match digits.parse::<u64>() {
        Ok(months) if months >= 1 => months.min(u64::from(u32::MAX)) as u32,
        _ => 1,
    }
}

fn normalize_notes(notes: Option<&str>) -> Option<String> {
    let trimmed = notes?.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

// ---------------------------------------------------------------------------
// Wire plan -> UI plan
// ---------------------------------------------------------------------------

/// Translate a backend plan into the UI shape.
///
/// Missing collections read as empty, a missing confidence defaults to
/// 0.6, and the summary totals are recomputed from the translated
/// collections rather than trusted from the wire summary.
pub fn plan_to_ui(plan: &WirePlan, profile: Option<&Profile>) -> Plan {
    let timeline = ui_timeline(&plan.timeline);
    let checklist = ui_checklist(&plan.checklist);
    let documents = ui_documents(&plan.documents);
    let risks = ui_risks(&plan.risks);

    let total_documents = documents.iter().map(|c| c.documents.len()).sum();
    let total_tasks = checklist.iter().map(|c| c.items.len()).sum();

    Plan {
        summary: PlanSummary {
            confidence: plan
                .summary
                .as_ref()
                .and_then(|s| s.confidence)
                .unwrap_or(DEFAULT_CONFIDENCE),
            estimated_weeks: estimate_weeks(plan, profile),
            total_documents,
            total_tasks,
        },
        timeline,
        checklist,
        documents,
        risks,
    }
}

fn ui_timeline(items: &[WireTimelineItem]) -> Vec<Milestone> {
    items
        .iter()
        .map(|item| {
            let description = if item.actions.is_empty() {
                item.when.clone()
            } else {
                item.actions.join(ACTION_SEPARATOR)
            };
            let title = match item.actions.first() {
                Some(action) => action.clone(),
                None if item.when.is_empty() => "Milestone".to_string(),
                None => item.when.clone(),
            };
            Milestone {
                title,
                date: item.when.clone(),
                // The wire contract carries no status distinct from pending.
                status: MilestoneStatus::Pending,
                description,
            }
        })
        .collect()
}

/// Regroup checklist items by priority into three synthetic categories.
/// Category order is first-seen order; item order within a category is
/// wire order.
fn ui_checklist(items: &[WireChecklistItem]) -> Vec<ChecklistCategory> {
    let mut categories: Vec<(Priority, ChecklistCategory)> = Vec::new();
    for (index, item) in items.iter().enumerate() {
        let priority = Priority::from_wire(&item.priority);
        let entry = ChecklistItem {
            id: stable_item_id(item, index),
            title: item.title.clone(),
            priority,
        };
        match categories.iter_mut().find(|(p, _)| *p == priority) {
            Some((_, category)) => category.items.push(entry),
            None => categories.push((
                priority,
                ChecklistCategory {
                    category: priority.category_name().to_string(),
                    items: vec![entry],
                },
            )),
        }
    }
    categories.into_iter().map(|(_, c)| c).collect()
}

/// Stable identifier for a checklist item: the wire id when present,
/// otherwise a slug of the title. Completion state is keyed on this id,
/// so it must not depend on category or item position.
fn stable_item_id(item: &WireChecklistItem, index: usize) -> String {
    let id = item.id.trim();
    if !id.is_empty() {
        return id.to_string();
    }
    let slug = slugify(&item.title);
    if slug.is_empty() {
        format!("item-{index}")
    } else {
        slug
    }
}

/// Lower-case and collapse non-alphanumeric runs to single dashes.
fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;
    for c in value.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.push(c.to_ascii_lowercase());
        } else {
            pending_dash = true;
        }
    }
    slug
}

fn ui_documents(categories: &[WireDocumentCategory]) -> Vec<DocumentCategory> {
    categories
        .iter()
        .map(|category| DocumentCategory {
            category: category.category.clone(),
            documents: category
                .items
                .iter()
                .map(|doc| DocumentEntry {
                    name: doc.name.clone(),
                    description: doc.why.clone(),
                    requirements: doc.common_mistakes.clone(),
                })
                .collect(),
        })
        .collect()
}

fn ui_risks(risks: &[WireRiskItem]) -> Vec<Risk> {
    risks
        .iter()
        .map(|risk| Risk {
            title: risk.risk.clone(),
            severity: Priority::from_wire(&risk.severity),
            description: risk.why_it_matters.clone(),
            mitigation: risk.mitigation.clone(),
        })
        .collect()
}

/// Largest week number mentioned in the timeline labels, independent of
/// label order; falls back to a table keyed by travel purpose when no
/// label parses.
fn estimate_weeks(plan: &WirePlan, profile: Option<&Profile>) -> u32 {
    let max_hint = plan
        .timeline
        .iter()
        .filter_map(|item| parse_week_label(&item.when))
        .filter(|&week| week > 0)
        .max();
    if let Some(week) = max_hint {
        return week;
    }
    match profile.map(|p| p.purpose.as_str()).unwrap_or("tourism") {
        "tourism" => 4,
        "study" => 10,
        "work" | "business" => 8,
        _ => 6,
    }
}

/// Parse `"week N"` / `"week N-M"` style labels; a range yields its
/// endpoint.
fn parse_week_label(label: &str) -> Option<u32> {
    let start_begin = label.find(|c: char| c.is_ascii_digit())?;
    let tail = &label[start_begin..];
    let digits_len = tail
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(tail.len());
    let start: u32 = tail[..digits_len].parse().ok()?;

    let rest = tail[digits_len..].trim_start();
    if let Some(range_tail) = rest.strip_prefix('-') {
        let range_tail = range_tail.trim_start();
        let end_len = range_tail
            .find(|c: char| !c.is_ascii_digit())
            .unwrap_or(range_tail.len());
        if end_len > 0 {
            if let Ok(end) = range_tail[..end_len].parse() {
                return Some(end);
            }
        }
    }
    Some(start)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
