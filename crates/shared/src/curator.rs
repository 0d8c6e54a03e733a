use anyhow::Result;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::classifier;
use crate::config::CuratorConfig;
use crate::editorial;
use crate::engagement::{self, QualityTier};
use crate::models::{
    ContentRecord, CuratedItem, CurationOutput, CurationStats, FilteredOut, FilteredRecord,
};
use crate::taxonomy::Taxonomy;
use crate::themes;

pub const SCHEMA_VERSION: &str = "3.1";

/// Runs the full curation funnel: classify, filter, score, sort, select,
/// group. Stateless between calls; the taxonomy is the only shared state and
/// it is read-only.
pub struct Curator {
    config: CuratorConfig,
    taxonomy: Taxonomy,
}

impl Curator {
    pub fn new(config: CuratorConfig) -> Result<Self> {
        Self::with_taxonomy(config, Taxonomy::ai_tech())
    }

    pub fn with_taxonomy(config: CuratorConfig, taxonomy: Taxonomy) -> Result<Self> {
        config.validate()?;
        Ok(Self { config, taxonomy })
    }

    pub fn config(&self) -> &CuratorConfig {
        &self.config
    }

    /// Curate a batch of collected records into a digest document
    pub fn curate(&self, records: &[ContentRecord], source: Option<&str>) -> CurationOutput {
        self.curate_at(records, source, Utc::now())
    }

    /// Deterministic core of `curate`: all time-dependent math is derived
    /// from the supplied `now`, so identical inputs produce identical output.
    pub fn curate_at(
        &self,
        records: &[ContentRecord],
        source: Option<&str>,
        now: DateTime<Utc>,
    ) -> CurationOutput {
        let mut curated: Vec<CuratedItem> = Vec::new();
        let mut filtered_out = FilteredOut::default();

        for record in records {
            let classification = classifier::classify(record, &self.taxonomy);
            if classification.is_noise {
                filtered_out.noise.push(FilteredRecord {
                    title: record.title.clone(),
                    reason: classification.filter_reason.unwrap_or_default(),
                });
                continue;
            }

            let engagement_quality = engagement::analyze(record, now);
            if engagement_quality.quality_tier == QualityTier::SkipFlamewar {
                filtered_out.flamewar.push(FilteredRecord {
                    title: record.title.clone(),
                    reason: "flamewar engagement pattern".to_string(),
                });
                continue;
            }

            if classification.relevance_score < self.config.min_relevance {
                filtered_out.low_relevance.push(FilteredRecord {
                    title: record.title.clone(),
                    reason: format!(
                        "relevance {:.2} below minimum {}",
                        classification.relevance_score, self.config.min_relevance
                    ),
                });
                continue;
            }

            let editorial = editorial::synthesize(record, &classification, &engagement_quality);
            curated.push(CuratedItem {
                record: record.clone(),
                classification,
                engagement_quality,
                editorial,
            });
        }

        // Trending first, then editorial priority, then composite engagement.
        // Stable sort: full ties keep input order.
        curated.sort_by(|a, b| {
            sort_key(a)
                .partial_cmp(&sort_key(b))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        let pool: Vec<CuratedItem> = curated
            .into_iter()
            .take(self.config.pool_size)
            .collect();

        // Publish scan: low-tier items are hidden unless extremely fresh or
        // the first entry for their topic. The per-topic counts are ordered
        // state, so this loop is inherently sequential.
        let mut published: Vec<CuratedItem> = Vec::new();
        let mut topic_counts: HashMap<String, usize> = HashMap::new();

        for item in &pool {
            let topic = item
                .classification
                .primary_topic
                .clone()
                .unwrap_or_else(|| "other".to_string());
            let seen = topic_counts.get(&topic).copied().unwrap_or(0);

            if item.engagement_quality.quality_tier == QualityTier::Low {
                let is_fresh = item.engagement_quality.hours_old < 4.0;
                let fills_gap = seen == 0;
                if !(is_fresh || fills_gap) {
                    filtered_out.low_quality_hidden.push(FilteredRecord {
                        title: item.record.title.clone(),
                        reason: format!(
                            "low_quality, {:.1}h old, topic '{}' has {} items",
                            item.engagement_quality.hours_old, topic, seen
                        ),
                    });
                    continue;
                }
            }

            *topic_counts.entry(topic).or_insert(0) += 1;
            published.push(item.clone());

            if published.len() >= self.config.publish_count {
                break;
            }
        }

        let themes = themes::group_by_theme(&published);
        let theme_counts = themes
            .iter()
            .map(|(label, items)| (label.clone(), items.len()))
            .collect();

        CurationOutput {
            schema_version: SCHEMA_VERSION.to_string(),
            curated_at: now.to_rfc3339(),
            source: source.map(str::to_string),
            curation_config: self.config,
            stats: CurationStats {
                input_items: records.len(),
                pool_items: pool.len(),
                published_items: published.len(),
                filtered_noise: filtered_out.noise.len(),
                filtered_low_relevance: filtered_out.low_relevance.len(),
                filtered_flamewar: filtered_out.flamewar.len(),
                filtered_low_quality: filtered_out.low_quality_hidden.len(),
                themes: theme_counts,
            },
            themes,
            published_items: published,
            pool_items: pool,
            filtered_out,
        }
    }
}

/// Lexicographic pool ordering: (tier rank, priority, negated
/// velocity-times-depth)
fn sort_key(item: &CuratedItem) -> (u8, u8, f64) {
    let engagement = &item.engagement_quality;
    (
        engagement.quality_tier.sort_rank(),
        item.editorial.newsletter_priority,
        -(engagement.velocity * engagement.discussion_depth),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 1, 12, 0, 0).unwrap()
    }

    /// Record with an AI-relevant title, published the given hours before
    /// the fixed test clock
    fn record(title: &str, likes: u64, replies: u64, hours_ago: Option<i64>) -> ContentRecord {
        ContentRecord {
            title: Some(title.to_string()),
            impressions_likes: Some(likes),
            impressions_replies: Some(replies),
            published_at: hours_ago
                .map(|h| (now() - chrono::Duration::hours(h)).to_rfc3339()),
            ..Default::default()
        }
    }

    fn curator() -> Curator {
        Curator::new(CuratorConfig::default()).unwrap()
    }

    // ==================== Funnel Bucket Tests ====================

    #[test]
    fn test_noise_record_is_bucketed() {
        // Scenario: noise keyword wins even with strong AI title matches
        let records = vec![record("New grammar rules for AI chat", 500, 10, Some(24))];
        let output = curator().curate_at(&records, None, now());

        assert!(output.published_items.is_empty());
        assert_eq!(output.stats.filtered_noise, 1);
        assert_eq!(
            output.filtered_out.noise[0].reason,
            "noise_keyword: grammar"
        );
    }

    #[test]
    fn test_flamewar_never_reaches_pool() {
        // 200 replies vs 10 likes: flamewar despite the relevant title
        let records = vec![record("Claude hot take", 10, 200, Some(24))];
        let output = curator().curate_at(&records, None, now());

        assert!(output.pool_items.is_empty());
        assert!(output.published_items.is_empty());
        assert_eq!(output.stats.filtered_flamewar, 1);
        assert!(output
            .pool_items
            .iter()
            .chain(output.published_items.iter())
            .all(|i| !i.engagement_quality.is_flamewar));
    }

    #[test]
    fn test_low_relevance_is_bucketed() {
        // "startup" alone: tech_industry raw 2 x 0.5 = 1.0 -> relevance 0.1
        let records = vec![record("Another startup", 200, 10, Some(24))];
        let output = curator().curate_at(&records, None, now());

        assert!(output.pool_items.is_empty());
        assert_eq!(output.stats.filtered_low_relevance, 1);
        assert!(output.filtered_out.low_relevance[0]
            .reason
            .starts_with("relevance 0.10"));
    }

    #[test]
    fn test_surviving_record_is_fully_annotated() {
        let records = vec![record("Benchmarking GPT-4 vs Claude", 350, 80, Some(48))];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 1);
        let item = &output.published_items[0];
        assert_eq!(item.classification.primary_topic.as_deref(), Some("llm"));
        assert!(item.engagement_quality.is_high_signal);
        assert_eq!(item.engagement_quality.quality_tier, QualityTier::HighQuality);
        assert_eq!(item.editorial.newsletter_priority, 2);
    }

    // ==================== Sort Order Tests ====================

    #[test]
    fn test_trending_sorts_before_everything() {
        let records = vec![
            // HighQuality, priority 3
            record("Claude GPT odyssey", 400, 40, Some(48)),
            // Trending: 150 likes in 1 hour
            record("GPT spike", 150, 10, Some(1)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.pool_items.len(), 2);
        assert_eq!(
            output.pool_items[0].record.title_text(),
            "GPT spike",
            "trending item must sort first despite a worse priority"
        );
        assert_eq!(
            output.pool_items[0].engagement_quality.quality_tier,
            QualityTier::TrendingMustInclude
        );
    }

    #[test]
    fn test_pool_is_sorted_by_composite_key() {
        let records = vec![
            record("Claude tips daily", 40, 4, Some(72)),
            record("GPT spike", 150, 10, Some(1)),
            record("Benchmarking GPT-4 vs Claude", 350, 80, Some(48)),
            record("Show HN: Claude agent", 120, 30, Some(36)),
        ];
        let output = curator().curate_at(&records, None, now());

        let keys: Vec<(u8, u8, f64)> = output.pool_items.iter().map(sort_key).collect();
        for pair in keys.windows(2) {
            assert!(
                pair[0] <= pair[1],
                "pool out of order: {:?} before {:?}",
                pair[0],
                pair[1]
            );
        }
    }

    // ==================== Selection Bound Tests ====================

    #[test]
    fn test_pool_and_publish_bounds() {
        let config = CuratorConfig {
            pool_size: 5,
            publish_count: 3,
            ..Default::default()
        };
        let curator = Curator::new(config).unwrap();

        let records: Vec<ContentRecord> = (0..20)
            .map(|i| record(&format!("Claude update {}", i), 200 + i, 10, Some(24)))
            .collect();
        let output = curator.curate_at(&records, None, now());

        assert_eq!(output.pool_items.len(), 5);
        assert_eq!(output.published_items.len(), 3);
        assert_eq!(output.stats.pool_items, 5);
        assert_eq!(output.stats.published_items, 3);
    }

    #[test]
    fn test_publish_stops_at_count_even_with_pool_left() {
        let config = CuratorConfig {
            publish_count: 2,
            ..Default::default()
        };
        let curator = Curator::new(config).unwrap();

        let records: Vec<ContentRecord> = (0..6)
            .map(|i| record(&format!("GPT report {}", i), 400, 20, Some(24)))
            .collect();
        let output = curator.curate_at(&records, None, now());

        assert!(output.pool_items.len() > 2);
        assert_eq!(output.published_items.len(), 2);
    }

    // ==================== Low-Tier Publish Rule Tests ====================

    #[test]
    fn test_low_tier_gap_fill_then_hidden() {
        // Two stale low-tier items in the same topic: the first fills the
        // thematic gap, the second is hidden.
        let records = vec![
            record("Claude corner one", 20, 2, Some(48)),
            record("Claude corner two", 20, 2, Some(48)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 1);
        assert_eq!(output.published_items[0].record.title_text(), "Claude corner one");
        assert_eq!(output.stats.filtered_low_quality, 1);
        let hidden = &output.filtered_out.low_quality_hidden[0];
        assert_eq!(hidden.title.as_deref(), Some("Claude corner two"));
        assert_eq!(
            hidden.reason,
            "low_quality, 48.0h old, topic 'llm' has 1 items"
        );
    }

    #[test]
    fn test_low_tier_fresh_item_is_admitted() {
        // Same topic already has a published item, but the low-tier record
        // is under four hours old.
        let records = vec![
            record("Claude deep dive", 400, 20, Some(24)),
            record("Claude quick note", 10, 1, Some(2)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 2);
        assert_eq!(output.stats.filtered_low_quality, 0);
    }

    #[test]
    fn test_low_tier_stale_item_is_hidden_when_topic_covered() {
        let records = vec![
            record("Claude deep dive", 400, 20, Some(24)),
            record("Claude stale note", 10, 1, Some(48)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 1);
        assert_eq!(output.stats.filtered_low_quality, 1);
    }

    #[test]
    fn test_hidden_low_tier_does_not_count_toward_topic() {
        // Three stale low-tier items: first fills the gap, the other two are
        // hidden and must not bump the topic count.
        let records = vec![
            record("Claude corner one", 20, 2, Some(48)),
            record("Claude corner two", 20, 2, Some(48)),
            record("Claude corner three", 20, 2, Some(48)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 1);
        assert_eq!(output.stats.filtered_low_quality, 2);
        assert!(output.filtered_out.low_quality_hidden[1]
            .reason
            .contains("has 1 items"));
    }

    // ==================== Theme & Stats Tests ====================

    #[test]
    fn test_published_items_are_grouped_into_themes() {
        let records = vec![
            record("Claude GPT odyssey", 400, 40, Some(48)),
            record("New CUDA GPU inference server tricks", 350, 30, Some(48)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.published_items.len(), 2);
        assert!(output.themes.contains_key("AI & LLMs"));
        assert!(output.themes.contains_key("AI Infrastructure"));
        assert_eq!(output.stats.themes["AI & LLMs"], 1);
        assert_eq!(output.stats.themes["AI Infrastructure"], 1);
    }

    #[test]
    fn test_stats_count_every_input() {
        let records = vec![
            record("New grammar rules for AI chat", 500, 10, Some(24)),
            record("Claude hot take", 10, 200, Some(24)),
            record("Another startup", 200, 10, Some(24)),
            record("Claude GPT odyssey", 400, 40, Some(48)),
        ];
        let output = curator().curate_at(&records, None, now());

        assert_eq!(output.stats.input_items, 4);
        assert_eq!(output.stats.filtered_noise, 1);
        assert_eq!(output.stats.filtered_flamewar, 1);
        assert_eq!(output.stats.filtered_low_relevance, 1);
        assert_eq!(output.stats.published_items, 1);
    }

    #[test]
    fn test_source_passthrough_and_schema_version() {
        let output = curator().curate_at(&[], Some("hackernews"), now());
        assert_eq!(output.schema_version, SCHEMA_VERSION);
        assert_eq!(output.source.as_deref(), Some("hackernews"));
        assert_eq!(output.stats.input_items, 0);
    }

    // ==================== Determinism Tests ====================

    #[test]
    fn test_curate_twice_is_byte_identical() {
        let records = vec![
            record("Benchmarking GPT-4 vs Claude", 350, 80, Some(48)),
            record("GPT spike", 150, 10, Some(1)),
            record("Claude corner one", 20, 2, Some(48)),
            record("New grammar rules for AI chat", 500, 10, Some(24)),
            record("Claude hot take", 10, 200, Some(24)),
        ];
        let curator = curator();

        let first = serde_json::to_string(&curator.curate_at(&records, Some("hackernews"), now()))
            .unwrap();
        let second = serde_json::to_string(&curator.curate_at(&records, Some("hackernews"), now()))
            .unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_malformed_records_do_not_abort_the_batch() {
        let records = vec![
            ContentRecord::default(),
            ContentRecord {
                title: Some("Claude GPT odyssey".to_string()),
                impressions_likes: Some(400),
                impressions_replies: Some(40),
                published_at: Some("garbage".to_string()),
                ..Default::default()
            },
        ];
        let output = curator().curate_at(&records, None, now());

        // Empty record falls into noise; the malformed timestamp degrades
        assert_eq!(output.stats.filtered_noise, 1);
        assert_eq!(output.published_items.len(), 1);
        assert_eq!(output.published_items[0].engagement_quality.hours_old, 24.0);
    }

    #[test]
    fn test_invalid_config_is_rejected_before_curation() {
        let config = CuratorConfig {
            min_relevance: 2.0,
            ..Default::default()
        };
        assert!(Curator::new(config).is_err());
    }
}
