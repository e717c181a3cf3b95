//! Polarity lexicon: a flat `word → polarity` mapping.
//!
//! Entries are case-sensitive exactly as they appear in the source table; no
//! folding or stemming happens here or at lookup time.

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use crate::error::AppError;

/// A word → signed polarity lookup table.
#[derive(Debug, Clone, Default)]
pub struct Lexicon {
    map: HashMap<String, f64>,
}

impl Lexicon {
    /// Build a lexicon from `(word, polarity)` pairs.
    ///
    /// Duplicate words keep the **first** occurrence; later rows for the same
    /// word are ignored rather than overwriting or erroring.
    pub fn from_entries<I, S>(entries: I) -> Self
    where
        I: IntoIterator<Item = (S, f64)>,
        S: Into<String>,
    {
        let mut map = HashMap::new();
        for (word, pol) in entries {
            map.entry(word.into()).or_insert(pol);
        }
        Self { map }
    }

    /// Load a lexicon from a CSV file with `word` and `pol` columns.
    pub fn load_csv(path: &Path) -> Result<Self, AppError> {
        let file = File::open(path).map_err(|e| {
            AppError::input(format!("Failed to open lexicon '{}': {e}", path.display()))
        })?;

        let mut reader = csv::ReaderBuilder::new()
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(file);

        let headers = reader
            .headers()
            .map_err(|e| AppError::input(format!("Failed to read lexicon headers: {e}")))?;

        let mut word_idx = None;
        let mut pol_idx = None;
        for (idx, name) in headers.iter().enumerate() {
            match name.trim().trim_start_matches('\u{feff}').to_ascii_lowercase().as_str() {
                "word" => word_idx = Some(idx),
                "pol" => pol_idx = Some(idx),
                _ => {}
            }
        }
        let word_idx =
            word_idx.ok_or_else(|| AppError::input("Lexicon is missing required column: `word`"))?;
        let pol_idx =
            pol_idx.ok_or_else(|| AppError::input("Lexicon is missing required column: `pol`"))?;

        let mut entries = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let line = idx + 2;
            let record = result
                .map_err(|e| AppError::input(format!("Lexicon line {line}: CSV parse error: {e}")))?;

            let word = record
                .get(word_idx)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .ok_or_else(|| AppError::input(format!("Lexicon line {line}: missing `word`.")))?;
            let pol = record
                .get(pol_idx)
                .and_then(|s| s.trim().parse::<f64>().ok())
                .filter(|v| v.is_finite())
                .ok_or_else(|| {
                    AppError::input(format!("Lexicon line {line}: missing/invalid `pol`."))
                })?;

            entries.push((word.to_string(), pol));
        }

        if entries.is_empty() {
            return Err(AppError::new(3, "Lexicon contains no entries."));
        }

        Ok(Self::from_entries(entries))
    }

    /// Look up a token's polarity. Absent tokens return `None` (ignored by
    /// the scorer, not treated as zero).
    pub fn polarity(&self, token: &str) -> Option<f64> {
        self.map.get(token).copied()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}
