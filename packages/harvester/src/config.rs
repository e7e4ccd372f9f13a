//! Configuration constants, URL builders, and validation for the harvester.

use regex::Regex;
use std::sync::LazyLock;

use chrono::NaiveDate;

use crate::error::{HarvestError, Result};

/// Base URL for the eCFR publisher.
pub const ECFR_BASE_URL: &str = "https://www.ecfr.gov";

/// Default HTTP timeout in seconds.
///
/// Large titles take a while: Title 40 serves well over 100 MB of XML.
pub const DEFAULT_TIMEOUT_SECS: u64 = 120;

/// Default maximum HTTP response size in bytes (512 MB).
///
/// A guard against runaway responses; the largest title XML observed so far
/// stays well under half of this.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 512 * 1024 * 1024;

/// Number of CFR titles. Title numbers run 1 through this value.
pub const TITLE_COUNT: u16 = 50;

/// Date pattern: YYYY-MM-DD.
#[allow(clippy::expect_used)] // Static regex that is guaranteed to be valid
static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}-\d{2}-\d{2}$").expect("valid regex"));

/// Validate a CFR title number.
///
/// # Arguments
/// * `number` - The title number to validate
///
/// # Returns
/// * `Ok(())` if the number is in range
/// * `Err(HarvestError::InvalidTitleNumber)` otherwise
///
/// # Examples
/// ```
/// use regscope_harvester::config::validate_title_number;
///
/// assert!(validate_title_number(29).is_ok());
/// assert!(validate_title_number(0).is_err());
/// assert!(validate_title_number(51).is_err());
/// ```
pub fn validate_title_number(number: u16) -> Result<()> {
    if (1..=TITLE_COUNT).contains(&number) {
        Ok(())
    } else {
        Err(HarvestError::InvalidTitleNumber(number))
    }
}

/// Validate and parse a date string (YYYY-MM-DD).
///
/// Rejects dates in the future since the publisher has no editions for them.
///
/// # Arguments
/// * `date_str` - Date string to validate
///
/// # Returns
/// * `Ok(NaiveDate)` if the string is a real, non-future date
/// * `Err(HarvestError::InvalidDate)` otherwise
///
/// # Examples
/// ```
/// use regscope_harvester::config::validate_date;
///
/// assert!(validate_date("2025-06-01").is_ok());
/// assert!(validate_date("invalid").is_err());
/// assert!(validate_date("2025-13-01").is_err()); // Invalid month
/// ```
pub fn validate_date(date_str: &str) -> Result<NaiveDate> {
    if !DATE_PATTERN.is_match(date_str) {
        return Err(HarvestError::InvalidDate(date_str.to_string()));
    }

    let parsed_date = NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
        .map_err(|_| HarvestError::InvalidDate(date_str.to_string()))?;

    // The publisher only serves past editions
    let today = chrono::Local::now().date_naive();
    if parsed_date > today {
        return Err(HarvestError::InvalidDate(format!(
            "{date_str} is in the future (today is {today})"
        )));
    }

    Ok(parsed_date)
}

/// Build the title catalog URL.
///
/// # Arguments
/// * `base_url` - Publisher base URL (a trailing slash is tolerated)
///
/// # Returns
/// URL of the titles index
pub fn titles_url(base_url: &str) -> String {
    format!(
        "{}/api/versioner/v1/titles.json",
        base_url.trim_end_matches('/')
    )
}

/// Build the full-title XML URL for a title at a specific issue date.
///
/// # Arguments
/// * `base_url` - Publisher base URL (a trailing slash is tolerated)
/// * `number` - The title number (should be validated with `validate_title_number` first)
/// * `date` - The edition issue date
///
/// # Returns
/// URL of the consolidated title XML
///
/// # Panics
/// Debug builds panic if the title number is out of range.
pub fn title_xml_url(base_url: &str, number: u16, date: NaiveDate) -> String {
    debug_assert!(
        (1..=TITLE_COUNT).contains(&number),
        "title number should be validated before calling title_xml_url"
    );
    format!(
        "{}/api/versioner/v1/full/{}/title-{}.xml",
        base_url.trim_end_matches('/'),
        date.format("%Y-%m-%d"),
        number
    )
}
