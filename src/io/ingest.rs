//! Review table ingest and cleaning.
//!
//! This module is responsible for turning an exported review table (CSV, or
//! XLSX with a sheet literally named `Sheet1`) into clean rows that are safe
//! to score.
//!
//! Design goals:
//! - **Strict schema** for required columns (clear errors + exit code 2)
//! - **Fail fast**: the first malformed row aborts the run with its line number
//! - **Deterministic behavior** (row order preserved, no hidden fallbacks)
//! - **Separation of concerns**: no scoring logic here

use std::collections::HashMap;
use std::fs::File;
use std::path::Path;

use calamine::{open_workbook, Data, DataType, Reader, Xlsx};
use csv::StringRecord;

use crate::domain::{CleanedReview, EpochConfig, Review, TableFormat};
use crate::epoch;
use crate::error::AppError;

/// Sheet the XLSX loader reads from; review exports use this name verbatim.
pub const SHEET_NAME: &str = "Sheet1";

/// Load raw review rows from a CSV or XLSX table.
pub fn load_reviews(path: &Path, format: TableFormat) -> Result<Vec<Review>, AppError> {
    match resolve_format(path, format) {
        TableFormat::Xlsx => load_reviews_xlsx(path),
        _ => load_reviews_csv(path),
    }
}

/// Load, clean, and epoch-classify a review table in one pass.
///
/// This is the cleaner's public entry point: discard the middle date token,
/// classify the epoch, and attach the caller-supplied category tag to every
/// row. Output row count equals input row count; order is preserved.
pub fn load_and_clean(
    path: &Path,
    format: TableFormat,
    category: &str,
    epoch_config: &EpochConfig,
) -> Result<Vec<CleanedReview>, AppError> {
    let rows = load_reviews(path, format)?;
    if rows.is_empty() {
        return Err(AppError::new(3, "No review rows found in the input table."));
    }
    clean_reviews(rows, category, epoch_config)
}

fn resolve_format(path: &Path, format: TableFormat) -> TableFormat {
    match format {
        TableFormat::Auto => {
            let ext = path
                .extension()
                .and_then(|e| e.to_str())
                .map(str::to_ascii_lowercase);
            match ext.as_deref() {
                Some("xlsx") | Some("xls") => TableFormat::Xlsx,
                _ => TableFormat::Csv,
            }
        }
        other => other,
    }
}

fn load_reviews_csv(path: &Path) -> Result<Vec<Review>, AppError> {
    let file = File::open(path).map_err(|e| {
        AppError::input(format!("Failed to open review table '{}': {e}", path.display()))
    })?;

    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(file);

    let headers = reader
        .headers()
        .map_err(|e| AppError::input(format!("Failed to read CSV headers: {e}")))?
        .clone();

    let header_map = build_header_map(&headers);
    ensure_review_columns_exist(&header_map)?;

    let mut rows = Vec::new();
    for (idx, result) in reader.records().enumerate() {
        // +2 because:
        // - records() starts at line 1 after headers
        // - CSV is 1-based line numbers
        let line = idx + 2;

        let record =
            result.map_err(|e| AppError::input(format!("Line {line}: CSV parse error: {e}")))?;

        let row = parse_review_record(&record, &header_map)
            .map_err(|e| AppError::input(format!("Line {line}: {e}")))?;
        rows.push(row);
    }

    Ok(rows)
}

fn load_reviews_xlsx(path: &Path) -> Result<Vec<Review>, AppError> {
    let mut workbook: Xlsx<_> = open_workbook(path).map_err(|e| {
        AppError::input(format!("Failed to open workbook '{}': {e}", path.display()))
    })?;

    let range = workbook.worksheet_range(SHEET_NAME).map_err(|e| {
        AppError::input(format!(
            "Failed to read sheet '{SHEET_NAME}' from '{}': {e}",
            path.display()
        ))
    })?;

    let mut row_iter = range.rows();
    let headers = row_iter
        .next()
        .ok_or_else(|| AppError::input(format!("Sheet '{SHEET_NAME}' is empty.")))?;

    let header_map: HashMap<String, usize> = headers
        .iter()
        .enumerate()
        .filter_map(|(idx, cell)| cell.as_string().map(|name| (normalize_header_name(&name), idx)))
        .collect();
    ensure_review_columns_exist(&header_map)?;

    let rating_idx = header_map["rating"];
    let date_idx = header_map["date"];
    let text_idx = header_map["text"];

    let mut rows = Vec::new();
    for (idx, cells) in row_iter.enumerate() {
        // Header is row 1, so the first data row is row 2.
        let line = idx + 2;

        let rating = cells
            .get(rating_idx)
            .and_then(|c| c.as_f64())
            .ok_or_else(|| AppError::input(format!("Row {line}: missing/invalid `rating` value.")))?;
        let date = cell_to_string(cells.get(date_idx))
            .ok_or_else(|| AppError::input(format!("Row {line}: missing `date` value.")))?;
        let text = cell_to_string(cells.get(text_idx))
            .ok_or_else(|| AppError::input(format!("Row {line}: missing `text` value.")))?;

        rows.push(Review { rating, date, text });
    }

    Ok(rows)
}

fn cell_to_string(cell: Option<&Data>) -> Option<String> {
    match cell? {
        Data::Empty => None,
        Data::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        }
        other => other.as_string().filter(|s| !s.trim().is_empty()),
    }
}

fn build_header_map(headers: &StringRecord) -> HashMap<String, usize> {
    headers
        .iter()
        .enumerate()
        .map(|(idx, name)| (normalize_header_name(name), idx))
        .collect()
}

fn normalize_header_name(name: &str) -> String {
    // Excel and other tools sometimes emit UTF-8 CSVs with a BOM prefix on the
    // first header (e.g. "﻿rating"). If we don't strip it, schema validation
    // will incorrectly report missing columns.
    let name = name.trim().trim_start_matches('\u{feff}');
    name.to_ascii_lowercase()
}

fn ensure_review_columns_exist(header_map: &HashMap<String, usize>) -> Result<(), AppError> {
    for name in ["rating", "date", "text"] {
        if !header_map.contains_key(name) {
            return Err(AppError::input(format!("Missing required column: `{name}`")));
        }
    }
    Ok(())
}

fn parse_review_record(
    record: &StringRecord,
    header_map: &HashMap<String, usize>,
) -> Result<Review, String> {
    let rating_raw = get_required(record, header_map, "rating")?;
    let rating = rating_raw
        .parse::<f64>()
        .map_err(|_| format!("Invalid `rating` value '{rating_raw}'."))?;
    if !rating.is_finite() {
        return Err(format!("Non-finite `rating` value '{rating_raw}'."));
    }

    let date = get_required(record, header_map, "date")?.to_string();
    let text = get_required(record, header_map, "text")?.to_string();

    Ok(Review { rating, date, text })
}

fn get_required<'a>(
    record: &'a StringRecord,
    header_map: &HashMap<String, usize>,
    name: &str,
) -> Result<&'a str, String> {
    let idx = header_map
        .get(name)
        .ok_or_else(|| format!("Missing required column: `{name}`"))?;
    record
        .get(*idx)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .ok_or_else(|| format!("Missing required value: `{name}`"))
}

/// Clean raw rows: normalize dates, classify epochs, attach the category tag.
pub fn clean_reviews(
    rows: Vec<Review>,
    category: &str,
    epoch_config: &EpochConfig,
) -> Result<Vec<CleanedReview>, AppError> {
    let mut cleaned = Vec::with_capacity(rows.len());
    for (idx, row) in rows.into_iter().enumerate() {
        let line = idx + 2;

        let date = normalize_date(&row.date)
            .map_err(|e| AppError::input(format!("Row {line}: {e}")))?;
        let label = epoch::classify(&date, epoch_config)
            .map_err(|e| AppError::input(format!("Row {line}: {e}")))?;

        cleaned.push(CleanedReview {
            rating: row.rating,
            date,
            text: row.text,
            epoch: label.display(epoch_config).to_string(),
            category: category.to_string(),
        });
    }
    Ok(cleaned)
}

/// Normalize a raw review date to `"<month> <year>"`.
///
/// Raw exports carry dates as three whitespace tokens (`"março de 2021"`);
/// the middle token is discarded. Anything else errors, including a date that
/// is already normalized: re-cleaning cleaned data is unsupported.
pub fn normalize_date(raw: &str) -> Result<String, String> {
    let mut parts = raw.split_whitespace();
    let (Some(first), Some(_middle), Some(third), None) =
        (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "Invalid date '{raw}': expected three tokens `<month> <conn> <year>`."
        ));
    };
    Ok(format!("{first} {third}"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn normalize_date_drops_middle_token() {
        assert_eq!(normalize_date("março de 2021").unwrap(), "março 2021");
        assert_eq!(normalize_date("janeiro de 2019").unwrap(), "janeiro 2019");
    }

    #[test]
    fn normalize_date_rejects_already_cleaned_input() {
        // The cleaner assumes three tokens; feeding it its own two-token
        // output is an unsupported boundary and must fail, not no-op.
        assert!(normalize_date("março 2021").is_err());
    }

    #[test]
    fn normalize_date_rejects_other_shapes() {
        assert!(normalize_date("2021").is_err());
        assert!(normalize_date("23 de março de 2021").is_err());
        assert!(normalize_date("").is_err());
    }

    #[test]
    fn clean_preserves_row_count_and_order() {
        let rows = vec![
            Review {
                rating: 5.0,
                date: "janeiro de 2020".to_string(),
                text: "otimo hotel".to_string(),
            },
            Review {
                rating: 2.0,
                date: "julho de 2021".to_string(),
                text: "quarto pequeno".to_string(),
            },
        ];

        let cleaned = clean_reviews(rows, "hotel", &EpochConfig::default()).unwrap();
        assert_eq!(cleaned.len(), 2);
        assert_eq!(cleaned[0].date, "janeiro 2020");
        assert_eq!(cleaned[0].epoch, "Pre-Covid");
        assert_eq!(cleaned[1].date, "julho 2021");
        assert_eq!(cleaned[1].epoch, "Pos-Covid");
        assert!(cleaned.iter().all(|r| r.category == "hotel"));
    }

    #[test]
    fn clean_fails_fast_on_first_bad_date() {
        let rows = vec![
            Review {
                rating: 4.0,
                date: "março 2021".to_string(), // two tokens: malformed here
                text: "ok".to_string(),
            },
            Review {
                rating: 4.0,
                date: "abril de 2021".to_string(),
                text: "ok".to_string(),
            },
        ];

        let err = clean_reviews(rows, "hotel", &EpochConfig::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("Row 2"));
    }

    #[test]
    fn csv_load_reads_required_columns() {
        let path = std::env::temp_dir().join(format!("senti_ingest_test_{}.csv", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "rating,date,text,extra").unwrap();
            writeln!(file, "5,janeiro de 2020,muito bom,x").unwrap();
            writeln!(file, "1,maio de 2021,péssimo,y").unwrap();
        }

        let rows = load_reviews(&path, TableFormat::Csv).unwrap();
        std::fs::remove_file(&path).ok();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].rating, 5.0);
        assert_eq!(rows[0].date, "janeiro de 2020");
        assert_eq!(rows[1].text, "péssimo");
    }

    #[test]
    fn csv_load_reports_missing_column() {
        let path = std::env::temp_dir().join(format!("senti_ingest_cols_{}.csv", std::process::id()));
        {
            let mut file = std::fs::File::create(&path).unwrap();
            writeln!(file, "rating,when,text").unwrap();
            writeln!(file, "5,janeiro de 2020,bom").unwrap();
        }

        let err = load_reviews(&path, TableFormat::Csv).unwrap_err();
        std::fs::remove_file(&path).ok();

        assert_eq!(err.exit_code(), 2);
        assert!(err.to_string().contains("`date`"));
    }

    #[test]
    fn format_resolution_uses_extension() {
        let xlsx = Path::new("reviews.XLSX");
        let csv = Path::new("reviews.csv");
        assert_eq!(resolve_format(xlsx, TableFormat::Auto), TableFormat::Xlsx);
        assert_eq!(resolve_format(csv, TableFormat::Auto), TableFormat::Csv);
        assert_eq!(resolve_format(csv, TableFormat::Xlsx), TableFormat::Xlsx);
    }
}
