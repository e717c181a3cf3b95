//! Per-review sentiment scoring.
//!
//! The scoring scheme is deliberately simple: strip punctuation, split on
//! whitespace, look each token up in the lexicon, and average the polarities
//! of the tokens that matched. Tokens absent from the lexicon are ignored
//! entirely (they do not count as zero-polarity matches).

use rayon::prelude::*;

use crate::domain::{CleanedReview, ScoredReview, SentimentScore};
use crate::senti::Lexicon;

/// ASCII punctuation stripped before tokenization.
///
/// Accented letters and other non-ASCII characters pass through untouched, so
/// locale-specific words keep their spelling for the (case-sensitive) lookup.
pub const PUNCTUATION: &str = r##"!"#$%&'()*+,-./:;<=>?@[\]^_`{|}~"##;

/// Remove all [`PUNCTUATION`] characters from `text`.
pub fn strip_punctuation(text: &str) -> String {
    text.chars().filter(|c| !PUNCTUATION.contains(*c)).collect()
}

/// Average polarity over matched tokens.
///
/// Zero-match policy: the divisor is substituted with 1, so a review with no
/// lexicon hits scores 0.0 instead of being undefined. This deliberately
/// conflates "no signal" with "neutral signal"; callers that need to tell
/// them apart must check [`SentimentScore::matched`].
pub fn average_polarity(sum: f64, matched: usize) -> f64 {
    sum / matched.max(1) as f64
}

/// Score one text against a lexicon.
pub fn score_text(text: &str, lexicon: &Lexicon) -> SentimentScore {
    let stripped = strip_punctuation(text);

    let mut sum = 0.0;
    let mut matched = 0usize;
    for token in stripped.split_whitespace() {
        if let Some(pol) = lexicon.polarity(token) {
            sum += pol;
            matched += 1;
        }
    }

    SentimentScore {
        sum,
        matched,
        senti_ratio: average_polarity(sum, matched),
    }
}

/// Score a batch of cleaned reviews in parallel, preserving row order.
pub fn score_reviews(rows: Vec<CleanedReview>, lexicon: &Lexicon) -> Vec<ScoredReview> {
    rows.into_par_iter()
        .map(|row| {
            let score = score_text(&row.text, lexicon);
            ScoredReview::from_parts(row, score)
        })
        .collect()
}
