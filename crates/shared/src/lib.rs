// Public modules
pub mod classifier;
pub mod config;
pub mod curator;
pub mod editorial;
pub mod engagement;
pub mod io;
pub mod models;
pub mod preview;
pub mod taxonomy;
pub mod themes;

// Re-export commonly used types
pub use classifier::{classify, Classification, TopicMatch};
pub use config::CuratorConfig;
pub use curator::{Curator, SCHEMA_VERSION};
pub use editorial::{synthesize, EditorialContent};
pub use engagement::{analyze, quality_tier, EngagementQuality, QualityTier};
pub use io::{default_data_dir, default_output_path, find_latest_batch, load_batch, save_output};
pub use models::{
    ContentRecord, CuratedItem, CurationOutput, CurationStats, FilteredOut, FilteredRecord,
    RawBatch,
};
pub use taxonomy::{Taxonomy, TopicDefinition};
pub use themes::{group_by_theme, theme_label};
