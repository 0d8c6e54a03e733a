use anyhow::{Context, Result};
use clap::Parser;
use shared::{Curator, CuratorConfig};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "curate-digest")]
#[command(about = "Curate collected content records into a periodic AI/tech digest")]
struct Args {
    /// Input JSON batch from the collectors (defaults to the newest batch)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Output JSON file (defaults to a timestamped file in the data directory)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Minimum relevance score for the candidate pool
    #[arg(long)]
    min_relevance: Option<f64>,

    /// Internal candidate pool size
    #[arg(long)]
    pool_size: Option<usize>,

    /// Items to publish (8 daily, 12 weekly)
    #[arg(long)]
    publish: Option<usize>,

    /// Print a markdown preview of the curated digest
    #[arg(long)]
    preview: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = CuratorConfig::from_env()?;
    if let Some(value) = args.min_relevance {
        config.min_relevance = value;
    }
    if let Some(value) = args.pool_size {
        config.pool_size = value;
    }
    if let Some(value) = args.publish {
        config.publish_count = value;
    }

    let curator = Curator::new(config).context("Invalid curation configuration")?;

    let input_path = match args.input {
        Some(path) => path,
        None => {
            let latest = shared::find_latest_batch()?
                .context("No collector batches found. Pass --input or drop a batch file in the data directory.")?;
            println!("Using most recent: {}", latest.display());
            latest
        }
    };

    println!("📥 Loading records from {}", input_path.display());
    let batch = shared::load_batch(&input_path)?;
    println!("✓ Loaded {} records", batch.items.len());

    println!("\n📊 Curating {} items...", batch.items.len());
    let curated = curator.curate(&batch.items, batch.source.as_deref());

    println!(
        "✅ Pool: {} items → Published: {} items across {} themes",
        curated.stats.pool_items,
        curated.stats.published_items,
        curated.themes.len()
    );
    println!(
        "   Filtered: {} noise, {} low relevance, {} flamewars, {} low quality hidden",
        curated.stats.filtered_noise,
        curated.stats.filtered_low_relevance,
        curated.stats.filtered_flamewar,
        curated.stats.filtered_low_quality
    );

    let output_path = match args.output {
        Some(path) => path,
        None => shared::default_output_path()?,
    };
    shared::save_output(&curated, &output_path)?;
    println!("\n💾 Saved to {}", output_path.display());

    if args.preview {
        println!("\n{}", shared::preview::generate_markdown(&curated));
    }

    Ok(())
}
