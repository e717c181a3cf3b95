//! Shared "score pipeline" logic used by the CLI subcommands.
//!
//! Keeping this in one place avoids duplicating the core workflow:
//! load -> clean -> lexicon -> score -> group -> clouds
//!
//! The CLI handlers can then focus on presentation (printing and file paths).

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use crate::cloud;
use crate::domain::{CloudOptions, RunConfig, ScoredReview};
use crate::error::AppError;
use crate::senti::{score_reviews, Lexicon};

/// All computed outputs of a single `senti score` run.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub scored: Vec<ScoredReview>,
    pub lexicon_words: usize,
}

/// Execute the full scoring pipeline: load, clean, score.
pub fn run_score(config: &RunConfig) -> Result<RunOutput, AppError> {
    let cleaned = crate::io::load_and_clean(
        &config.input_path,
        config.format,
        &config.category,
        &config.epoch,
    )?;
    let lexicon = Lexicon::load_csv(&config.lexicon_path)?;
    let lexicon_words = lexicon.len();
    let scored = score_reviews(cleaned, &lexicon);

    Ok(RunOutput {
        scored,
        lexicon_words,
    })
}

/// Load the stopword file if one was given; otherwise use an empty set.
pub fn resolve_stopwords(path: Option<&Path>) -> Result<HashSet<String>, AppError> {
    match path {
        Some(path) => cloud::load_stopwords(path),
        None => Ok(HashSet::new()),
    }
}

/// Render one word cloud per (epoch, category) group.
///
/// Rows are supplied as `(epoch, category, text)` triples so both cleaned and
/// scored rows can feed the renderer. Groups render in stable (alphabetical)
/// order; the returned paths are the PNGs written.
pub fn render_group_clouds<'a, I>(
    rows: I,
    stopwords: &HashSet<String>,
    figures_dir: &Path,
    options: &CloudOptions,
) -> Result<Vec<PathBuf>, AppError>
where
    I: IntoIterator<Item = (&'a str, &'a str, &'a str)>,
{
    let mut groups: BTreeMap<(&str, &str), Vec<&str>> = BTreeMap::new();
    for (epoch, category, text) in rows {
        groups
            .entry((epoch, category))
            .or_default()
            .extend(text.split_whitespace());
    }

    if groups.is_empty() {
        return Err(AppError::new(3, "No review groups to render clouds for."));
    }

    let mut paths = Vec::with_capacity(groups.len());
    for ((epoch, category), tokens) in &groups {
        let path = cloud::render(
            figures_dir,
            tokens.iter().copied(),
            epoch,
            category,
            stopwords,
            options,
        )?;
        paths.push(path);
    }
    Ok(paths)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{EpochConfig, TableFormat};
    use std::io::Write;

    #[test]
    fn run_score_end_to_end_on_csv() {
        let dir = std::env::temp_dir();
        let reviews = dir.join(format!("senti_pipeline_reviews_{}.csv", std::process::id()));
        let lexicon = dir.join(format!("senti_pipeline_lexicon_{}.csv", std::process::id()));
        {
            let mut file = std::fs::File::create(&reviews).unwrap();
            writeln!(file, "rating,date,text").unwrap();
            writeln!(file, "5,janeiro de 2020,hotel bom bom").unwrap();
            writeln!(file, "1,maio de 2021,hotel mau").unwrap();
        }
        {
            let mut file = std::fs::File::create(&lexicon).unwrap();
            writeln!(file, "word,pol").unwrap();
            writeln!(file, "bom,1").unwrap();
            writeln!(file, "mau,-1").unwrap();
        }

        let config = RunConfig {
            input_path: reviews.clone(),
            format: TableFormat::Auto,
            category: "hotel".to_string(),
            epoch: EpochConfig::default(),
            lexicon_path: lexicon.clone(),
            stopwords_path: None,
            figures_dir: PathBuf::from("./figures"),
            cloud: CloudOptions::default(),
            render_clouds: false,
            export_scored: None,
        };

        let run = run_score(&config).unwrap();
        std::fs::remove_file(&reviews).ok();
        std::fs::remove_file(&lexicon).ok();

        assert_eq!(run.lexicon_words, 2);
        assert_eq!(run.scored.len(), 2);

        assert_eq!(run.scored[0].epoch, "Pre-Covid");
        assert_eq!(run.scored[0].matched, 2);
        assert!((run.scored[0].senti_ratio - 1.0).abs() < 1e-12);

        assert_eq!(run.scored[1].epoch, "Pos-Covid");
        assert!((run.scored[1].senti_ratio + 1.0).abs() < 1e-12);
    }

    #[test]
    fn empty_group_list_is_an_error() {
        let err = render_group_clouds(
            std::iter::empty::<(&str, &str, &str)>(),
            &HashSet::new(),
            Path::new("."),
            &CloudOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 3);
    }
}
