//! Word-cloud rendering.
//!
//! Frequency counting and layout are pure functions so they can be tested
//! without touching the filesystem; only [`render`] performs the one-shot PNG
//! write. Output files are named `WordCloud_<epoch>_<category>.png` and land
//! in a caller-supplied directory that is assumed to pre-exist (a missing
//! directory propagates as an error, it is not created).

use std::collections::{HashMap, HashSet};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use plotters::prelude::*;

use crate::domain::CloudOptions;
use crate::error::AppError;
use crate::senti::strip_punctuation;

/// High-contrast palette cycled through by word rank.
const PALETTE: [RGBColor; 6] = [
    RGBColor(31, 119, 180),
    RGBColor(214, 39, 40),
    RGBColor(44, 160, 44),
    RGBColor(148, 103, 189),
    RGBColor(255, 127, 14),
    RGBColor(23, 190, 207),
];

/// A laid-out word ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub text: String,
    /// Top-left pixel position.
    pub x: i32,
    pub y: i32,
    /// Font size in pixels.
    pub size: u32,
}

/// Load a stopword set from a plain text file, one word per line.
pub fn load_stopwords(path: &Path) -> Result<HashSet<String>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open stopwords '{}': {e}", path.display()))
    })?;

    let mut words = HashSet::new();
    for line in BufReader::new(file).lines() {
        let line =
            line.map_err(|e| AppError::input(format!("Failed to read stopwords: {e}")))?;
        let word = line.trim();
        if !word.is_empty() {
            words.insert(word.to_string());
        }
    }
    Ok(words)
}

/// Count word frequencies over the given tokens.
///
/// Each token is punctuation-stripped first; empty results and stopwords are
/// excluded. The output is sorted by descending count, ties broken
/// alphabetically so the layout is deterministic.
pub fn word_frequencies<'a, I>(tokens: I, stopwords: &HashSet<String>) -> Vec<(String, usize)>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut counts: HashMap<String, usize> = HashMap::new();
    for token in tokens {
        let word = strip_punctuation(token);
        if word.is_empty() || stopwords.contains(&word) {
            continue;
        }
        *counts.entry(word).or_insert(0) += 1;
    }

    let mut freqs: Vec<(String, usize)> = counts.into_iter().collect();
    freqs.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    freqs
}

/// Flow-layout the most frequent words onto the canvas.
///
/// Words are placed left-to-right in rows, most frequent first, with the font
/// size interpolated between `min_font` and `max_font` by relative count.
/// Words that no longer fit vertically are dropped.
pub fn layout(freqs: &[(String, usize)], options: &CloudOptions) -> Vec<PlacedWord> {
    const MARGIN: i32 = 8;
    const GAP: i32 = 6;

    let kept = &freqs[..freqs.len().min(options.max_words)];
    let Some(&(_, max_count)) = kept.first() else {
        return Vec::new();
    };
    let min_count = kept.last().map(|&(_, c)| c).unwrap_or(max_count);

    let mut placed = Vec::new();
    let mut x = MARGIN;
    let mut y = MARGIN;
    let mut row_height = 0i32;

    for (word, count) in kept {
        let size = font_size(*count, min_count, max_count, options);
        let width = estimate_width(word, size);

        if x + width > options.width as i32 - MARGIN && x > MARGIN {
            x = MARGIN;
            y += row_height + GAP;
            row_height = 0;
        }
        if y + size as i32 > options.height as i32 - MARGIN {
            break;
        }

        placed.push(PlacedWord {
            text: word.clone(),
            x,
            y,
            size,
        });
        x += width + GAP;
        row_height = row_height.max(size as i32);
    }

    placed
}

fn font_size(count: usize, min_count: usize, max_count: usize, options: &CloudOptions) -> u32 {
    if max_count == min_count {
        return options.max_font;
    }
    let t = (count - min_count) as f64 / (max_count - min_count) as f64;
    let size = options.min_font as f64 + t * (options.max_font - options.min_font) as f64;
    size.round() as u32
}

fn estimate_width(word: &str, size: u32) -> i32 {
    // Rough average glyph aspect for sans-serif text; close enough for flow
    // layout on a fixed canvas.
    let glyphs = word.chars().count().max(1) as f64;
    (glyphs * size as f64 * 0.6).ceil() as i32
}

/// Output filename for a group's cloud.
pub fn cloud_filename(epoch_label: &str, category: &str) -> String {
    format!("WordCloud_{epoch_label}_{category}.png")
}

/// Render one word cloud and write it as a PNG.
///
/// Pure side effect: counts frequencies over `tokens` (minus stopwords), lays
/// the words out, and writes `<dir>/WordCloud_<epoch>_<category>.png`.
pub fn render<'a, I>(
    dir: &Path,
    tokens: I,
    epoch_label: &str,
    category: &str,
    stopwords: &HashSet<String>,
    options: &CloudOptions,
) -> Result<PathBuf, AppError>
where
    I: IntoIterator<Item = &'a str>,
{
    let freqs = word_frequencies(tokens, stopwords);
    if freqs.is_empty() {
        return Err(AppError::new(
            3,
            format!("No words left for cloud '{epoch_label}/{category}' after stopword filtering."),
        ));
    }
    let placed = layout(&freqs, options);

    let path = dir.join(cloud_filename(epoch_label, category));
    {
        let root =
            BitMapBackend::new(&path, (options.width, options.height)).into_drawing_area();
        root.fill(&WHITE).map_err(|e| {
            AppError::internal(format!("Failed to fill cloud canvas '{}': {e}", path.display()))
        })?;

        for (rank, word) in placed.iter().enumerate() {
            let color = PALETTE[rank % PALETTE.len()];
            let style = ("sans-serif", word.size as f64).into_font().color(&color);
            root.draw(&Text::new(word.text.clone(), (word.x, word.y), style))
                .map_err(|e| {
                    AppError::internal(format!("Failed to draw word '{}': {e}", word.text))
                })?;
        }

        root.present().map_err(|e| {
            AppError::internal(format!(
                "Failed to write cloud PNG '{}' (does the output directory exist?): {e}",
                path.display()
            ))
        })?;
    }

    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stopset(words: &[&str]) -> HashSet<String> {
        words.iter().map(|w| w.to_string()).collect()
    }

    #[test]
    fn frequencies_strip_punctuation_and_stopwords() {
        let tokens = ["quarto,", "limpo!", "o", "quarto", "(limpo)", "limpo"];
        let freqs = word_frequencies(tokens, &stopset(&["o"]));

        assert_eq!(freqs[0], ("limpo".to_string(), 3));
        assert_eq!(freqs[1], ("quarto".to_string(), 2));
        assert_eq!(freqs.len(), 2);
    }

    #[test]
    fn frequencies_drop_punctuation_only_tokens() {
        let tokens = ["...", "!!", "bom"];
        let freqs = word_frequencies(tokens, &HashSet::new());
        assert_eq!(freqs, vec![("bom".to_string(), 1)]);
    }

    #[test]
    fn frequency_ties_sort_alphabetically() {
        let tokens = ["beta", "alfa"];
        let freqs = word_frequencies(tokens, &HashSet::new());
        assert_eq!(freqs[0].0, "alfa");
        assert_eq!(freqs[1].0, "beta");
    }

    #[test]
    fn layout_respects_canvas_and_font_bounds() {
        let options = CloudOptions::default();
        let freqs: Vec<(String, usize)> = (0..200)
            .map(|i| (format!("word{i}"), 200 - i))
            .collect();

        let placed = layout(&freqs, &options);
        assert!(!placed.is_empty());
        assert!(placed.len() <= options.max_words);
        for word in &placed {
            assert!(word.size >= options.min_font && word.size <= options.max_font);
            assert!(word.x >= 0 && word.y >= 0);
            assert!(word.y + word.size as i32 <= options.height as i32);
        }
        // Most frequent word comes first and gets the largest font.
        assert_eq!(placed[0].text, "word0");
        assert_eq!(placed[0].size, options.max_font);
    }

    #[test]
    fn layout_of_uniform_frequencies_is_stable() {
        let options = CloudOptions::default();
        let freqs = vec![("a".to_string(), 1), ("b".to_string(), 1)];
        let placed = layout(&freqs, &options);
        assert_eq!(placed.len(), 2);
        assert_eq!(placed[0].size, options.max_font);
        assert_eq!(placed[1].size, options.max_font);
    }

    #[test]
    fn filename_combines_both_labels() {
        assert_eq!(
            cloud_filename("Pos-Covid", "hotel"),
            "WordCloud_Pos-Covid_hotel.png"
        );
    }

    #[test]
    fn render_into_missing_directory_errors() {
        let dir = std::env::temp_dir().join(format!("senti_no_such_dir_{}", std::process::id()));
        let tokens = ["bom", "bom", "mau"];
        let err = render(
            &dir,
            tokens,
            "Pre-Covid",
            "hotel",
            &HashSet::new(),
            &CloudOptions::default(),
        )
        .unwrap_err();
        assert_eq!(err.exit_code(), 4);
    }
}
