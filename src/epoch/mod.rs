//! Date-to-epoch classification.
//!
//! Maps a normalized review date (`"<month> <year>"`) onto the binary
//! pre/post split defined by an [`EpochConfig`]:
//!
//! - year above the reference year → post
//! - year below the reference year → pre
//! - in the reference year itself, only the configured months are still pre
//!
//! Month matching is case-sensitive against the names as they appear in the
//! data; the default config carries the Portuguese names of the original
//! dataset ("janeiro", "fevereiro").

use crate::domain::{EpochConfig, EpochLabel};

/// Classify a normalized date string into an epoch.
///
/// The input must split into exactly two whitespace tokens, `<month> <year>`,
/// with an integer year. Anything else is an error (malformed rows fail fast
/// upstream; there is no partial scoring of bad dates).
pub fn classify(date: &str, config: &EpochConfig) -> Result<EpochLabel, String> {
    let mut parts = date.split_whitespace();
    let (Some(month), Some(year), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!(
            "Invalid date '{date}': expected `<month> <year>`."
        ));
    };

    let year: i32 = year
        .parse()
        .map_err(|_| format!("Invalid year '{year}' in date '{date}'."))?;

    if year > config.reference_year {
        return Ok(EpochLabel::Post);
    }
    if year < config.reference_year {
        return Ok(EpochLabel::Pre);
    }
    if config.pre_months.iter().any(|m| m == month) {
        Ok(EpochLabel::Pre)
    } else {
        Ok(EpochLabel::Post)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn later_year_is_post() {
        let config = EpochConfig::default();
        assert_eq!(classify("julho 2021", &config).unwrap(), EpochLabel::Post);
        assert_eq!(classify("janeiro 2022", &config).unwrap(), EpochLabel::Post);
    }

    #[test]
    fn earlier_year_is_pre() {
        let config = EpochConfig::default();
        assert_eq!(classify("dezembro 2019", &config).unwrap(), EpochLabel::Pre);
        assert_eq!(classify("julho 2015", &config).unwrap(), EpochLabel::Pre);
    }

    #[test]
    fn reference_year_splits_on_month() {
        let config = EpochConfig::default();
        assert_eq!(classify("janeiro 2020", &config).unwrap(), EpochLabel::Pre);
        assert_eq!(classify("fevereiro 2020", &config).unwrap(), EpochLabel::Pre);
        assert_eq!(classify("março 2020", &config).unwrap(), EpochLabel::Post);
        assert_eq!(classify("dezembro 2020", &config).unwrap(), EpochLabel::Post);
    }

    #[test]
    fn month_match_is_case_sensitive() {
        let config = EpochConfig::default();
        // "Janeiro" is not in the configured set; only the lowercase form is.
        assert_eq!(classify("Janeiro 2020", &config).unwrap(), EpochLabel::Post);
    }

    #[test]
    fn custom_config_overrides_defaults() {
        let config = EpochConfig {
            reference_year: 2008,
            pre_months: vec!["august".to_string()],
            pre_label: "Pre-Crisis".to_string(),
            post_label: "Post-Crisis".to_string(),
        };
        assert_eq!(classify("august 2008", &config).unwrap(), EpochLabel::Pre);
        assert_eq!(classify("september 2008", &config).unwrap(), EpochLabel::Post);
        assert_eq!(EpochLabel::Pre.display(&config), "Pre-Crisis");
    }

    #[test]
    fn malformed_dates_error() {
        let config = EpochConfig::default();
        assert!(classify("2020", &config).is_err());
        assert!(classify("23 de março de 2020", &config).is_err());
        assert!(classify("março vinte", &config).is_err());
        assert!(classify("", &config).is_err());
    }
}
