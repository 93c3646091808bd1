use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use morph_model::{LanguageRegistry, group_for_display};

mod analysis;
mod render;

use analysis::AnalysisFile;

/// Groups the inflections of a morphological analysis the way they are shown to a reader.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Analysis file: a homonym with lexemes, lemmas and inflections with their features
    input: PathBuf,

    /// Language configuration file (a JSON array), applied on top of the built-in languages
    #[arg(short, long)]
    languages: Option<PathBuf>,

    /// Print a JSON summary instead of a tree
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut registry = LanguageRegistry::classical().context("Failed to set up built-in languages")?;
    if let Some(path) = &args.languages {
        let config = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read language configuration {}", path.display()))?;
        registry
            .load_json(&config)
            .with_context(|| format!("Failed to load language configuration {}", path.display()))?;
    }

    let input = std::fs::read_to_string(&args.input)
        .with_context(|| format!("Failed to read {}", args.input.display()))?;
    let analysis: AnalysisFile = serde_json::from_str(&input)
        .with_context(|| format!("Failed to parse {}", args.input.display()))?;
    let homonym = analysis
        .into_homonym(&registry)
        .context("Invalid morphology data")?;
    log::info!(
        "Loaded {} lexemes with {} inflections",
        homonym.lexemes().len(),
        homonym.inflections().count()
    );

    let groups = group_for_display(homonym.inflections().cloned());

    if args.json {
        println!("{}", serde_json::to_string_pretty(&render::summary(&homonym, &groups))?);
    } else {
        if let Some(word) = homonym.target_word() {
            println!("{word}");
        }
        print!("{}", render::Tree(&groups));
    }
    Ok(())
}
