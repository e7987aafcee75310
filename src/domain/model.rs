use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Number of leftover posts the community has made.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PostCount(pub u64);

impl PostCount {
    pub fn value(self) -> u64 {
        self.0
    }
}

impl From<u64> for PostCount {
    fn from(count: u64) -> Self {
        PostCount(count)
    }
}

impl From<usize> for PostCount {
    fn from(count: usize) -> Self {
        PostCount(count as u64)
    }
}

impl std::fmt::Display for PostCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Result of one estimation call. Built fresh every time and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatesSavedEstimate {
    estimated_plates_saved: u64,
    explanation: String,
}

impl PlatesSavedEstimate {
    /// Callers outside the crate go through `PlatesSavedEstimator`, which
    /// guarantees the explanation is non-empty.
    pub(crate) fn new(estimated_plates_saved: u64, explanation: String) -> Self {
        Self {
            estimated_plates_saved,
            explanation,
        }
    }

    pub fn estimated_plates_saved(&self) -> u64 {
        self.estimated_plates_saved
    }

    pub fn explanation(&self) -> &str {
        &self.explanation
    }
}

/// A leftover the user confirmed and published.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeftoverPost {
    pub id: Uuid,
    pub food_name: String,
    pub freshness: String,
    pub expiration_date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_uri: Option<String>,
    pub posted_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLeftoverPost {
    pub food_name: String,
    pub freshness: String,
    pub expiration_date: NaiveDate,
    pub image_uri: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum VoiceAction {
    GetStorageTips,
    PostLeftovers,
    FindFoodNearMe,
    ScanBarcode,
    NavigateHome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceParameters {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub food: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoiceCommand {
    pub action: VoiceAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parameters: Option<VoiceParameters>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum BarcodeFormat {
    Ean13,
    Ean8,
    UpcA,
    Other,
}

/// Usage and storage suggestions for a scanned product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BarcodeScan {
    pub product_name: String,
    pub usage_suggestions: String,
    pub storage_suggestions: String,
}
