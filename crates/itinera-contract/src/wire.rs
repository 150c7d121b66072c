//! Backend wire shapes for `POST /api/plan` and `POST /api/chat`.
//!
//! Every collection on the inbound plan shape is optional in the contract;
//! `#[serde(default)]` reads absence as empty so translation never has to
//! distinguish the two.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::chat::ChatRole;

// ---------------------------------------------------------------------------
// Wire enumerations
// ---------------------------------------------------------------------------

/// Canonical travel purpose accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Purpose {
    Study,
    Work,
    Tourism,
}

impl fmt::Display for Purpose {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Study => "STUDY",
            Self::Work => "WORK",
            Self::Tourism => "TOURISM",
        };
        f.write_str(s)
    }
}

impl FromStr for Purpose {
    type Err = PurposeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "STUDY" => Ok(Self::Study),
            "WORK" => Ok(Self::Work),
            "TOURISM" => Ok(Self::Tourism),
            other => Err(PurposeParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Purpose`] string.
#[derive(Debug, Clone)]
pub struct PurposeParseError(pub String);

impl fmt::Display for PurposeParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid purpose: {:?}", self.0)
    }
}

impl std::error::Error for PurposeParseError {}

// ---------------------------------------------------------------------------

/// Canonical proof-of-funds level accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FundsLevel {
    Low,
    Medium,
    High,
}

impl fmt::Display for FundsLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
        };
        f.write_str(s)
    }
}

impl FromStr for FundsLevel {
    type Err = FundsLevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "LOW" => Ok(Self::Low),
            "MEDIUM" => Ok(Self::Medium),
            "HIGH" => Ok(Self::High),
            other => Err(FundsLevelParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`FundsLevel`] string.
#[derive(Debug, Clone)]
pub struct FundsLevelParseError(pub String);

impl fmt::Display for FundsLevelParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid funds level: {:?}", self.0)
    }
}

impl std::error::Error for FundsLevelParseError {}

// ---------------------------------------------------------------------------

/// Language accepted by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Language {
    En,
    Fr,
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::En => "EN",
            Self::Fr => "FR",
        };
        f.write_str(s)
    }
}

impl FromStr for Language {
    type Err = LanguageParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "EN" => Ok(Self::En),
            "FR" => Ok(Self::Fr),
            other => Err(LanguageParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`Language`] string.
#[derive(Debug, Clone)]
pub struct LanguageParseError(pub String);

impl fmt::Display for LanguageParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid language: {:?}", self.0)
    }
}

impl std::error::Error for LanguageParseError {}

// ---------------------------------------------------------------------------
// Plan request
// ---------------------------------------------------------------------------

/// Profile payload sent to `POST /api/plan`.
///
/// `purpose`, `proof_of_funds_level`, and `language` are strings rather
/// than the enums above: the mapper's fallback path upper-cases
/// unrecognized UI values verbatim, which the fixed enums cannot carry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireProfile {
    pub origin_country: String,
    pub destination_country: String,
    pub purpose: String,
    pub planned_departure_date: String,
    pub duration_months: u32,
    pub passport_expiry_date: String,
    pub has_sponsor: bool,
    pub proof_of_funds_level: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

// ---------------------------------------------------------------------------
// Plan response
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireSummary {
    pub title: String,
    pub key_advice: Vec<String>,
    pub assumptions: Vec<String>,
    pub confidence: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireTimelineItem {
    /// Time-window label, e.g. `"Week 2-3"`.
    pub when: String,
    pub actions: Vec<String>,
    pub priority: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireChecklistItem {
    pub id: String,
    pub title: String,
    pub steps: Vec<String>,
    pub priority: String,
    pub estimated_time: String,
    pub dependencies: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireDocumentItem {
    pub name: String,
    pub why: String,
    pub priority: String,
    pub common_mistakes: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireDocumentCategory {
    pub category: String,
    pub items: Vec<WireDocumentItem>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WireRiskItem {
    pub id: String,
    pub risk: String,
    pub why_it_matters: String,
    pub mitigation: Vec<String>,
    pub severity: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WireSource {
    pub title: String,
    #[serde(rename = "ref")]
    pub reference: String,
}

/// Plan payload returned by `POST /api/plan`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WirePlan {
    pub summary: Option<WireSummary>,
    pub timeline: Vec<WireTimelineItem>,
    pub checklist: Vec<WireChecklistItem>,
    pub documents: Vec<WireDocumentCategory>,
    pub risks: Vec<WireRiskItem>,
    pub sources: Vec<WireSource>,
    pub generated_at: Option<String>,
}

// ---------------------------------------------------------------------------
// Chat
// ---------------------------------------------------------------------------

/// One transcript entry forwarded to the backend as conversational
/// context. Display timestamps are deliberately not part of this shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: ChatRole,
    pub content: String,
}

/// Request body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatRequest {
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<WireProfile>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub history: Vec<HistoryEntry>,
}

/// Response body for `POST /api/chat`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatReply {
    pub response: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn purpose_display_roundtrip() {
        let variants = [Purpose::Study, Purpose::Work, Purpose::Tourism];
        for v in &variants {
            let s = v.to_string();
            let parsed: Purpose = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn purpose_invalid() {
        let result = "HOLIDAY".parse::<Purpose>();
        assert!(result.is_err());
    }

    #[test]
    fn funds_level_display_roundtrip() {
        let variants = [FundsLevel::Low, FundsLevel::Medium, FundsLevel::High];
        for v in &variants {
            let s = v.to_string();
            let parsed: FundsLevel = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn funds_level_invalid() {
        let result = "ABUNDANT".parse::<FundsLevel>();
        assert!(result.is_err());
    }

    #[test]
    fn language_display_roundtrip() {
        let variants = [Language::En, Language::Fr];
        for v in &variants {
            let s = v.to_string();
            let parsed: Language = s.parse().expect("should parse");
            assert_eq!(*v, parsed);
        }
    }

    #[test]
    fn language_invalid() {
        let result = "DE".parse::<Language>();
        assert!(result.is_err());
    }

    #[test]
    fn wire_plan_tolerates_missing_collections() {
        let plan: WirePlan = serde_json::from_str(r#"{"summary": {"title": "t"}}"#)
            .expect("should deserialize");
        assert!(plan.timeline.is_empty());
        assert!(plan.checklist.is_empty());
        assert!(plan.documents.is_empty());
        assert!(plan.risks.is_empty());
        assert_eq!(plan.summary.as_ref().map(|s| s.title.as_str()), Some("t"));
        assert_eq!(plan.summary.unwrap().confidence, None);
    }

    #[test]
    fn wire_plan_tolerates_empty_object() {
        let plan: WirePlan = serde_json::from_str("{}").expect("should deserialize");
        assert!(plan.summary.is_none());
        assert!(plan.generated_at.is_none());
    }

    #[test]
    fn chat_request_omits_absent_fields() {
        let request = ChatRequest {
            message: "hello".to_string(),
            profile: None,
            history: Vec::new(),
        };
        let value = serde_json::to_value(&request).expect("should serialize");
        assert!(value.get("profile").is_none());
        assert!(value.get("history").is_none());
    }

    #[test]
    fn wire_source_renames_ref() {
        let source: WireSource =
            serde_json::from_str(r#"{"title": "Embassy", "ref": "https://example.org"}"#)
                .expect("should deserialize");
        assert_eq!(source.reference, "https://example.org");
    }
}
