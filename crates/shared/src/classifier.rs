use serde::{Deserialize, Serialize};

use crate::models::ContentRecord;
use crate::taxonomy::Taxonomy;

/// Score details for one matched topic
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopicMatch {
    pub topic: String,
    pub label: String,
    pub raw_score: u32,
    pub weighted_score: f64,
    pub matched_keywords: Vec<String>,
}

/// Topical relevance verdict for one record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub is_relevant: bool,
    pub primary_topic: Option<String>,
    pub primary_topic_label: Option<String>,
    pub all_topics: Vec<String>,
    pub topic_details: Vec<TopicMatch>,
    pub relevance_score: f64,
    pub is_noise: bool,
    pub filter_reason: Option<String>,
}

impl Classification {
    fn noise(reason: String) -> Self {
        Self {
            is_relevant: false,
            primary_topic: None,
            primary_topic_label: None,
            all_topics: Vec::new(),
            topic_details: Vec::new(),
            relevance_score: 0.0,
            is_noise: true,
            filter_reason: Some(reason),
        }
    }
}

/// Classify a record against the taxonomy.
///
/// Noise keywords take absolute precedence: a record containing one is
/// discarded no matter how many topic keywords also match. Keyword hits in
/// the title count double. Relevance is the sum of weighted topic scores
/// normalized against a fixed divisor of 10 and clamped to [0, 1].
pub fn classify(record: &ContentRecord, taxonomy: &Taxonomy) -> Classification {
    let title = record.title_text().to_lowercase();
    let text = format!("{} {}", title, record.body_text().to_lowercase());

    for phrase in &taxonomy.noise_keywords {
        if text.contains(phrase.as_str()) {
            return Classification::noise(format!("noise_keyword: {}", phrase));
        }
    }

    let mut topic_details = Vec::new();
    for topic in &taxonomy.topics {
        let mut raw_score = 0u32;
        let mut matched_keywords = Vec::new();
        for keyword in &topic.keywords {
            if text.contains(keyword.as_str()) {
                raw_score += if title.contains(keyword.as_str()) { 2 } else { 1 };
                matched_keywords.push(keyword.clone());
            }
        }
        if raw_score > 0 {
            topic_details.push(TopicMatch {
                topic: topic.id.clone(),
                label: topic.label.clone(),
                raw_score,
                weighted_score: raw_score as f64 * topic.weight,
                matched_keywords,
            });
        }
    }

    if topic_details.is_empty() {
        return Classification::noise("no_ai_keywords_matched".to_string());
    }

    // Highest weighted score wins; ties go to the first topic in
    // configuration order.
    let mut primary = 0;
    for (idx, detail) in topic_details.iter().enumerate().skip(1) {
        if detail.weighted_score > topic_details[primary].weighted_score {
            primary = idx;
        }
    }

    let total: f64 = topic_details.iter().map(|d| d.weighted_score).sum();
    let relevance = (total / 10.0).min(1.0);

    Classification {
        is_relevant: true,
        primary_topic: Some(topic_details[primary].topic.clone()),
        primary_topic_label: Some(topic_details[primary].label.clone()),
        all_topics: topic_details.iter().map(|d| d.topic.clone()).collect(),
        relevance_score: (relevance * 100.0).round() / 100.0,
        topic_details,
        is_noise: false,
        filter_reason: None,
    }
}
