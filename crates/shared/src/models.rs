use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::classifier::Classification;
use crate::config::CuratorConfig;
use crate::editorial::EditorialContent;
use crate::engagement::EngagementQuality;

/// One normalized content record as produced by the upstream collectors.
///
/// Collectors own this shape; the curation core treats it as read-only and
/// tolerates any field being absent. Unrecognized collector fields are kept
/// in `extra` so they survive the curate round trip.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentRecord {
    pub title: Option<String>,
    pub content: Option<String>,
    pub url: Option<String>,
    pub author_username: Option<String>,
    pub impressions_likes: Option<u64>,
    pub impressions_replies: Option<u64>,
    pub impressions_views: Option<u64>,
    pub published_at: Option<String>,
    pub metadata: serde_json::Map<String, serde_json::Value>,
    #[serde(flatten)]
    pub extra: serde_json::Map<String, serde_json::Value>,
}

impl ContentRecord {
    pub fn title_text(&self) -> &str {
        self.title.as_deref().unwrap_or("")
    }

    pub fn body_text(&self) -> &str {
        self.content.as_deref().unwrap_or("")
    }

    pub fn likes(&self) -> u64 {
        self.impressions_likes.unwrap_or(0)
    }

    pub fn replies(&self) -> u64 {
        self.impressions_replies.unwrap_or(0)
    }

    /// Direct reply count from collector metadata, if present
    pub fn child_count(&self) -> u64 {
        self.metadata
            .get("kids_count")
            .and_then(|v| v.as_u64())
            .unwrap_or(0)
    }
}

/// Input envelope written by the collectors: `{schema_version, source, items}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawBatch {
    pub schema_version: Option<String>,
    pub source: Option<String>,
    pub items: Vec<ContentRecord>,
}

/// A record that survived the funnel, annotated with every derived layer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CuratedItem {
    #[serde(flatten)]
    pub record: ContentRecord,
    pub classification: Classification,
    pub engagement_quality: EngagementQuality,
    pub editorial: EditorialContent,
}

/// Minimal trace of a record that was filtered out, kept for auditing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FilteredRecord {
    pub title: Option<String>,
    pub reason: String,
}

/// Per-bucket collections of filtered records. The bucket set is closed, so
/// this is a fixed struct rather than a dynamically keyed map.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FilteredOut {
    pub noise: Vec<FilteredRecord>,
    pub low_relevance: Vec<FilteredRecord>,
    pub flamewar: Vec<FilteredRecord>,
    pub low_quality_hidden: Vec<FilteredRecord>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationStats {
    pub input_items: usize,
    pub pool_items: usize,
    pub published_items: usize,
    pub filtered_noise: usize,
    pub filtered_low_relevance: usize,
    pub filtered_flamewar: usize,
    pub filtered_low_quality: usize,
    pub themes: BTreeMap<String, usize>,
}

/// Complete curated digest document for serialization
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurationOutput {
    pub schema_version: String,
    pub curated_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub curation_config: CuratorConfig,
    pub stats: CurationStats,
    pub themes: BTreeMap<String, Vec<CuratedItem>>,
    pub published_items: Vec<CuratedItem>,
    pub pool_items: Vec<CuratedItem>,
    pub filtered_out: FilteredOut,
}
