//! The UI-shaped user profile.

use serde::{Deserialize, Serialize};

/// A user's travel parameters as captured by the onboarding form.
///
/// Enumerable fields (`purpose`, `funds_level`, `language`) and dates are
/// free-form strings here; [`crate::mapper::profile_to_wire`] owns their
/// normalization. `duration` in particular is a numeric string that may be
/// empty or junk -- the mapper clamps it, the profile does not.
///
/// The profile is replaced wholesale on every edit; there is no
/// field-by-field mutation anywhere in the client.
///
/// Serialized with camelCase keys for compatibility with records written
/// by earlier versions of the app.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Profile {
    pub origin_country: String,
    pub destination_country: String,
    pub purpose: String,
    pub departure_date: String,
    pub duration: String,
    pub passport_expiry: String,
    pub has_sponsor: bool,
    pub funds_level: String,
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn profile_uses_camel_case_keys() {
        let profile = Profile {
            origin_country: "cm".to_string(),
            destination_country: "fr".to_string(),
            purpose: "study".to_string(),
            departure_date: "2025-06-01".to_string(),
            duration: "6".to_string(),
            passport_expiry: "2026-12-01".to_string(),
            has_sponsor: true,
            funds_level: "high".to_string(),
            language: "en".to_string(),
            notes: None,
        };

        let value = serde_json::to_value(&profile).expect("should serialize");
        assert!(value.get("originCountry").is_some());
        assert!(value.get("fundsLevel").is_some());
        assert!(value.get("notes").is_none(), "absent notes should be omitted");
    }
}
