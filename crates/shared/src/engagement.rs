use chrono::{DateTime, NaiveDateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::ContentRecord;

/// Newsletter-worthiness bucket, checked in strict priority order.
///
/// A flamewar outranks everything, including trending: a record can carry
/// digest-worthy velocity and still be excluded outright.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QualityTier {
    SkipFlamewar,
    TrendingMustInclude,
    HighQuality,
    Good,
    Moderate,
    Low,
}

impl QualityTier {
    /// Rank used by the global pool sort: trending items first
    pub fn sort_rank(self) -> u8 {
        match self {
            QualityTier::TrendingMustInclude => 0,
            _ => 1,
        }
    }
}

/// Quality signals derived from raw engagement counts and timestamps
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngagementQuality {
    pub engagement_ratio: f64,
    pub is_flamewar: bool,
    pub is_high_signal: bool,
    pub is_emerging: bool,
    pub discussion_depth: f64,
    pub velocity: f64,
    pub hours_old: f64,
    pub quality_tier: QualityTier,
}

/// Interpret raw counts as quality signals rather than popularity.
///
/// `now` is passed in by the caller so the whole pipeline stays a pure
/// function of its inputs. Missing or unparsable timestamps degrade to a
/// 24-hour age and zero velocity instead of failing the record.
pub fn analyze(record: &ContentRecord, now: DateTime<Utc>) -> EngagementQuality {
    let likes = record.likes();
    let replies = record.replies();

    // High replies relative to likes = contentious
    let ratio = replies as f64 / likes.max(1) as f64;

    let is_flamewar = ratio > 1.5 && replies > 100;
    let is_high_signal = likes > 200 && ratio < 0.5;
    let is_emerging = likes > 50 && likes < 200 && ratio < 0.8;

    let child_count = record.child_count();
    let depth = if child_count > 0 {
        replies as f64 / child_count as f64
    } else {
        1.0
    };

    let (hours_old, velocity) = match record.published_at.as_deref().and_then(parse_timestamp) {
        Some(published) => {
            let hours = (now - published).num_seconds() as f64 / 3600.0;
            (hours, likes as f64 / hours.max(1.0))
        }
        None => (24.0, 0.0),
    };

    // Tier is decided on unrounded values; rounding below is presentation only
    let quality_tier = quality_tier(likes, ratio, is_flamewar, velocity);

    EngagementQuality {
        engagement_ratio: round2(ratio),
        is_flamewar,
        is_high_signal,
        is_emerging,
        discussion_depth: round2(depth),
        velocity: round2(velocity),
        hours_old: round1(hours_old),
        quality_tier,
    }
}

/// Pure tier function of (likes, ratio, flamewar flag, velocity)
pub fn quality_tier(likes: u64, ratio: f64, is_flamewar: bool, velocity: f64) -> QualityTier {
    if is_flamewar {
        return QualityTier::SkipFlamewar;
    }
    if velocity > 20.0 && likes > 100 {
        return QualityTier::TrendingMustInclude;
    }
    if likes > 300 && ratio < 0.6 {
        return QualityTier::HighQuality;
    }
    if likes > 100 {
        return QualityTier::Good;
    }
    if likes > 30 {
        return QualityTier::Moderate;
    }
    QualityTier::Low
}

fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = raw.parse::<DateTime<Utc>>() {
        return Some(dt);
    }
    // Collectors emit naive ISO-8601 without an offset; treat those as UTC
    raw.parse::<NaiveDateTime>().ok().map(|ndt| ndt.and_utc())
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
