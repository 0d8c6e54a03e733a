use serde::{Deserialize, Serialize};

use crate::classifier::Classification;
use crate::engagement::{EngagementQuality, QualityTier};
use crate::models::ContentRecord;

/// Template-generated editorial text for one digest entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EditorialContent {
    pub one_liner: String,
    pub why_it_matters: String,
    pub audience_fit: String,
    pub newsletter_priority: u8,
}

/// Produce the editorial layer for a record that survived filtering.
///
/// Entirely template-based; patterns are checked in a fixed order so the
/// output is deterministic.
pub fn synthesize(
    record: &ContentRecord,
    classification: &Classification,
    engagement: &EngagementQuality,
) -> EditorialContent {
    let topic_label = classification.primary_topic_label.as_deref().unwrap_or("Tech");

    EditorialContent {
        one_liner: one_liner(record.title_text(), topic_label),
        why_it_matters: why_it_matters(record.likes(), classification, engagement),
        audience_fit: audience_fit(classification.primary_topic.as_deref()).to_string(),
        newsletter_priority: newsletter_priority(classification, engagement),
    }
}

fn contains_any(haystack: &str, needles: &[&str]) -> bool {
    needles.iter().any(|n| haystack.contains(n))
}

/// TL;DR line from common title patterns, first match wins
fn one_liner(title: &str, topic_label: &str) -> String {
    let title = title.to_lowercase();
    let topic = topic_label.to_lowercase();

    if title.contains("show hn") {
        format!("New {} project worth checking out", topic)
    } else if title.contains("launch hn") {
        format!("YC startup launching in {} space", topic)
    } else if title.contains("ask hn") {
        format!("Community discussion on {}", topic)
    } else if contains_any(&title, &["benchmark", "comparison", "vs"]) {
        format!("Performance/comparison data for {}", topic)
    } else if contains_any(&title, &["raises", "funding", "acquisition"]) {
        format!("Industry news: funding/M&A in {}", topic)
    } else if contains_any(&title, &["release", "announce", "introducing"]) {
        format!("New release or announcement in {}", topic)
    } else if contains_any(&title, &["tutorial", "guide", "how to"]) {
        format!("Learning resource for {}", topic)
    } else {
        format!("{} insight worth reading", topic_label)
    }
}

/// Join the two strongest signals into a "why this matters" phrase
fn why_it_matters(
    likes: u64,
    classification: &Classification,
    engagement: &EngagementQuality,
) -> String {
    let mut signals: Vec<&str> = Vec::new();

    if engagement.velocity > 20.0 {
        signals.push("rapidly gaining attention");
    }
    if likes > 300 {
        signals.push("highly upvoted");
    }
    if engagement.is_high_signal {
        signals.push("quality discussion");
    }
    match classification.primary_topic.as_deref() {
        Some("llm") | Some("ml_research") => signals.push("directly relevant to practitioners"),
        Some("ai_infra") => signals.push("infrastructure implications"),
        Some("ai_product") => signals.push("commercial application"),
        _ => {}
    }

    if signals.is_empty() {
        signals.push("worth monitoring");
    }

    signals.truncate(2);
    signals.join("; ")
}

fn audience_fit(primary_topic: Option<&str>) -> &'static str {
    match primary_topic {
        Some("llm") | Some("ml_research") => "AI engineers & researchers",
        Some("ai_infra") => "ML platform engineers",
        Some("ai_product") => "Product managers & founders",
        Some("ai_ethics") => "AI policy & safety researchers",
        Some("developer_tools") => "Software developers",
        Some("tech_industry") => "Tech industry watchers",
        _ => "General tech audience",
    }
}

/// Digest priority 1-5 (1 = highest), first matching row wins
fn newsletter_priority(classification: &Classification, engagement: &EngagementQuality) -> u8 {
    let relevance = classification.relevance_score;
    match engagement.quality_tier {
        QualityTier::TrendingMustInclude if relevance > 0.6 => 1,
        QualityTier::HighQuality if relevance > 0.5 => 2,
        QualityTier::Good | QualityTier::HighQuality => 3,
        _ if relevance > 0.3 => 4,
        _ => 5,
    }
}
