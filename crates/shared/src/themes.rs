use std::collections::BTreeMap;

use crate::models::CuratedItem;

/// Map a primary topic id to its digest section
pub fn theme_label(primary_topic: Option<&str>) -> &'static str {
    match primary_topic {
        Some("llm") | Some("ml_research") => "AI & LLMs",
        Some("ai_infra") => "AI Infrastructure",
        Some("ai_product") => "AI Products & Startups",
        Some("ai_ethics") => "AI Ethics & Policy",
        Some("developer_tools") => "Developer Tools",
        Some("tech_industry") => "Tech Industry News",
        _ => "Other Notable",
    }
}

/// Bucket items into digest sections, each ordered by newsletter priority.
///
/// The sort is stable, so items with equal priority keep their incoming
/// relative order.
pub fn group_by_theme(items: &[CuratedItem]) -> BTreeMap<String, Vec<CuratedItem>> {
    let mut themes: BTreeMap<String, Vec<CuratedItem>> = BTreeMap::new();

    for item in items {
        let label = theme_label(item.classification.primary_topic.as_deref());
        themes.entry(label.to_string()).or_default().push(item.clone());
    }

    for section in themes.values_mut() {
        section.sort_by_key(|item| item.editorial.newsletter_priority);
    }

    themes
}
