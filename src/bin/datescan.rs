// Copyright (c) Microsoft Corporation.
// Licensed under the MIT License.

//! Prints every date found in a file along with its distance, category and color.

use std::io::Read;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use date_heat::buffer::LineIndex;
use date_heat::dates::{BoundaryPolicy, DistanceMode};
use date_heat::highlight::{BucketPolicy, Category, ColorMapper};
use date_heat::{Classifier, HighlightConfig};

/// Scan a text file for yyyy-MM-dd dates and classify them by distance from today
#[derive(Parser)]
#[command(name = "datescan")]
#[command(author, version, about, long_about = None)]
#[command(after_help = "EXAMPLES:
    # Classify the dates in a todo list
    datescan TODO.md

    # Count business days, as of a fixed day
    datescan --business --today 2024-06-14 plan.txt

    # One category per day, capped at 30
    datescan --linear 30 notes.txt")]
struct Cli {
    /// File to scan; `-` reads standard input
    input: PathBuf,

    /// TOML configuration file; flags below override it
    #[arg(long)]
    config: Option<PathBuf>,

    /// Measure from this day instead of today (yyyy-MM-dd)
    #[arg(long)]
    today: Option<String>,

    /// Skip Saturdays and Sundays when counting
    #[arg(long)]
    business: bool,

    /// One category per day up to CAP instead of Fibonacci buckets
    #[arg(long, value_name = "CAP")]
    linear: Option<u32>,

    /// Accept dates next to punctuation, e.g. "(2024-06-15)"
    #[arg(long)]
    word_boundary: bool,

    /// Print the number of dates per category after the listing
    #[arg(long)]
    summary: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = build_config(&cli)?;
    let text = read_input(&cli.input)?;

    let classifier = Classifier::new(&config);
    let colors = ColorMapper::new(config.colors.clone());
    let today = config.reference_date.unwrap_or_else(date_heat::dates::local_today);
    let lines = LineIndex::new(&text);

    let mut per_category = std::collections::BTreeMap::new();
    for found in classifier.classify(&text, today) {
        let position = lines.position(found.date.start);
        let color = colors.get_color(classifier.bucketing(), found.category);
        println!(
            "{}:{}\t{}\t{:+}\t{}\t{}",
            position.line + 1,
            position.column + 1,
            found.date.date,
            found.distance,
            found.category,
            color
        );
        *per_category.entry(found.category).or_insert(0usize) += 1;
    }

    if cli.summary {
        println!();
        println!("as of {today}:");
        for (category, count) in &per_category {
            let label = bucket_label(classifier.bucketing(), *category);
            println!("  {label:>12}  {count}");
        }
    }

    Ok(())
}

fn build_config(cli: &Cli) -> Result<HighlightConfig> {
    let mut config = match &cli.config {
        Some(path) => HighlightConfig::load(path).with_context(|| format!("loading {}", path.display()))?,
        None => HighlightConfig::default(),
    };
    if let Some(today) = &cli.today {
        config = config.with_reference_date(today)?;
    }
    if cli.business {
        config.distance = DistanceMode::Business;
    }
    if let Some(cap) = cli.linear {
        config.bucketing = BucketPolicy::Linear { cap };
    }
    if cli.word_boundary {
        config.boundary = BoundaryPolicy::WordBoundary;
    }
    config.validate()?;
    Ok(config)
}

/// Describes the distances a category covers, e.g. `13-20` or `89+`.
fn bucket_label(policy: &BucketPolicy, category: Category) -> String {
    if category.is_past() {
        return "past/today".to_string();
    }
    let next = policy.categories().into_iter().find(|c| *c > category);
    match next {
        Some(next) if next.value() == category.value() + 1 => category.to_string(),
        Some(next) => format!("{category}-{}", next.value() - 1),
        None => format!("{category}+"),
    }
}

fn read_input(path: &Path) -> Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().read_to_string(&mut text).context("reading standard input")?;
        return Ok(text);
    }
    std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))
}
