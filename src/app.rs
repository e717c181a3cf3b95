//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - parses CLI arguments
//! - runs cleaning + scoring
//! - prints the summary report
//! - writes optional exports and word clouds

use clap::Parser;

use crate::cli::{CleanArgs, Cli, CloudArgs, Command, SampleArgs, ScoreArgs};
use crate::domain::RunConfig;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `senti` binary.
pub fn run() -> Result<(), AppError> {
    let cli = Cli::parse();

    match cli.command {
        Command::Score(args) => handle_score(args),
        Command::Clean(args) => handle_clean(args),
        Command::Cloud(args) => handle_cloud(args),
        Command::Sample(args) => handle_sample(args),
    }
}

fn handle_score(args: ScoreArgs) -> Result<(), AppError> {
    let config = run_config_from_args(&args);
    let run = pipeline::run_score(&config)?;

    println!(
        "{}",
        crate::report::format_run_summary(&run.scored, run.lexicon_words)
    );

    if let Some(path) = &config.export_scored {
        crate::io::write_scored_csv(path, &run.scored)?;
        println!("Scored rows written to {}", path.display());
    }

    if config.render_clouds {
        let stopwords = pipeline::resolve_stopwords(config.stopwords_path.as_deref())?;
        let paths = pipeline::render_group_clouds(
            run.scored
                .iter()
                .map(|r| (r.epoch.as_str(), r.category.as_str(), r.text.as_str())),
            &stopwords,
            &config.figures_dir,
            &config.cloud,
        )?;
        for path in paths {
            println!("Word cloud written to {}", path.display());
        }
    }

    Ok(())
}

pub fn run_config_from_args(args: &ScoreArgs) -> RunConfig {
    RunConfig {
        input_path: args.input.input.clone(),
        format: args.input.format,
        category: args.input.category.clone(),
        epoch: args.epoch.to_config(),
        lexicon_path: args.lexicon.clone(),
        stopwords_path: args.cloud.stopwords.clone(),
        figures_dir: args.cloud.figures_dir.clone(),
        cloud: args.cloud.to_options(),
        render_clouds: args.clouds,
        export_scored: args.export.clone(),
    }
}

fn handle_clean(args: CleanArgs) -> Result<(), AppError> {
    let cleaned = crate::io::load_and_clean(
        &args.input.input,
        args.input.format,
        &args.input.category,
        &args.epoch.to_config(),
    )?;

    crate::io::write_cleaned_csv(&args.out, &cleaned)?;
    println!("{} cleaned rows written to {}", cleaned.len(), args.out.display());
    Ok(())
}

fn handle_cloud(args: CloudArgs) -> Result<(), AppError> {
    let cleaned = crate::io::load_and_clean(
        &args.input.input,
        args.input.format,
        &args.input.category,
        &args.epoch.to_config(),
    )?;
    let stopwords = pipeline::resolve_stopwords(args.cloud.stopwords.as_deref())?;

    let paths = pipeline::render_group_clouds(
        cleaned
            .iter()
            .map(|r| (r.epoch.as_str(), r.category.as_str(), r.text.as_str())),
        &stopwords,
        &args.cloud.figures_dir,
        &args.cloud.to_options(),
    )?;
    for path in paths {
        println!("Word cloud written to {}", path.display());
    }
    Ok(())
}

fn handle_sample(args: SampleArgs) -> Result<(), AppError> {
    let rows = crate::data::generate_reviews(args.count, args.seed, args.year_min, args.year_max)?;
    crate::io::write_reviews_csv(&args.out, &rows)?;
    println!("{} sample reviews written to {}", rows.len(), args.out.display());
    Ok(())
}
