//! Synthetic review sample generation.
//!
//! Produces raw (uncleaned) review rows in the same shape as a real export:
//! ratings, three-token dates (`"<month> de <year>"`), and short free-text
//! blurbs drawn from small phrase pools. Deterministic for a fixed seed, so
//! demo runs and tests are reproducible.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::domain::Review;
use crate::error::AppError;

const MONTHS: [&str; 12] = [
    "janeiro",
    "fevereiro",
    "março",
    "abril",
    "maio",
    "junho",
    "julho",
    "agosto",
    "setembro",
    "outubro",
    "novembro",
    "dezembro",
];

const POSITIVE_PHRASES: [&str; 6] = [
    "Quarto limpo e confortável, adorei a estadia.",
    "Equipe muito atenciosa, pequeno-almoço excelente!",
    "Localização ótima, voltaria sem dúvida.",
    "Piscina limpa e vista maravilhosa.",
    "Excelente custo-benefício, recomendo.",
    "Cama confortável e quarto espaçoso.",
];

const NEGATIVE_PHRASES: [&str; 6] = [
    "Quarto sujo e barulhento, péssima experiência.",
    "Atendimento horrível, nunca mais volto.",
    "Casa de banho suja, cheiro ruim no corredor.",
    "Wi-fi fraco e pequeno-almoço fraco.",
    "Preço alto demais para o que oferece.",
    "Colchão velho, dormi mal todas as noites.",
];

/// Generate `count` synthetic raw reviews spanning `year_min..=year_max`.
pub fn generate_reviews(
    count: usize,
    seed: u64,
    year_min: i32,
    year_max: i32,
) -> Result<Vec<Review>, AppError> {
    if count == 0 {
        return Err(AppError::input("Sample count must be > 0."));
    }
    if year_max < year_min {
        return Err(AppError::input("Invalid year range for sample generation."));
    }

    let mut rng = StdRng::seed_from_u64(seed);
    let mut rows = Vec::with_capacity(count);

    for _ in 0..count {
        let month = MONTHS[rng.gen_range(0..MONTHS.len())];
        let year = rng.gen_range(year_min..=year_max);

        let positive = rng.gen_bool(0.6);
        let (pool, rating_range) = if positive {
            (&POSITIVE_PHRASES, 4..=5)
        } else {
            (&NEGATIVE_PHRASES, 1..=3)
        };
        let text = pool[rng.gen_range(0..pool.len())].to_string();
        let rating = rng.gen_range(rating_range) as f64;

        rows.push(Review {
            rating,
            date: format!("{month} de {year}"),
            text,
        });
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::ingest::normalize_date;

    #[test]
    fn fixed_seed_is_deterministic() {
        let a = generate_reviews(20, 7, 2018, 2022).unwrap();
        let b = generate_reviews(20, 7, 2018, 2022).unwrap();
        assert_eq!(a.len(), 20);
        for (x, y) in a.iter().zip(&b) {
            assert_eq!(x.rating, y.rating);
            assert_eq!(x.date, y.date);
            assert_eq!(x.text, y.text);
        }
    }

    #[test]
    fn generated_dates_are_cleanable() {
        let rows = generate_reviews(50, 3, 2019, 2021).unwrap();
        for row in &rows {
            let cleaned = normalize_date(&row.date).unwrap();
            assert_eq!(cleaned.split_whitespace().count(), 2);
        }
    }

    #[test]
    fn ratings_stay_in_review_scale() {
        let rows = generate_reviews(100, 11, 2018, 2022).unwrap();
        assert!(rows.iter().all(|r| (1.0..=5.0).contains(&r.rating)));
    }

    #[test]
    fn zero_count_is_rejected() {
        assert!(generate_reviews(0, 1, 2018, 2022).is_err());
        assert!(generate_reviews(10, 1, 2022, 2018).is_err());
    }
}
