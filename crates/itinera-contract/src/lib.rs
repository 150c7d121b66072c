//! Data contracts for the itinera client core.
//!
//! This crate holds the three families of shapes the client deals with --
//! the UI-facing [`profile::Profile`] and [`plan::Plan`], the backend wire
//! shapes in [`wire`], the chat transcript shapes in [`chat`] -- and the
//! pure [`mapper`] functions that translate between them.
//!
//! Nothing here performs I/O or holds state. The mapper is total over its
//! declared inputs: malformed values are substituted with fallbacks, never
//! rejected (validation happens upstream in the form layer).

pub mod chat;
pub mod mapper;
pub mod plan;
pub mod profile;
pub mod wire;

pub use chat::{ChatMessage, ChatRole};
pub use mapper::{plan_to_ui, profile_to_wire};
pub use plan::{
    ChecklistCategory, ChecklistItem, DocumentCategory, DocumentEntry, Milestone, MilestoneStatus,
    Plan, PlanSummary, Priority, Risk,
};
pub use profile::Profile;
pub use wire::{
    ChatReply, ChatRequest, FundsLevel, HistoryEntry, Language, Purpose, WireChecklistItem,
    WireDocumentCategory, WireDocumentItem, WirePlan, WireProfile, WireRiskItem, WireSource,
    WireSummary, WireTimelineItem,
};
