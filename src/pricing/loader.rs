use crate::config::SourceConfig;
use crate::error::AppError;
use crate::pricing::models::{RunnerRow, RunnerTable};
use reqwest::StatusCode;
use sha2::{Digest, Sha256};
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;
use tracing::{debug, info};

/// Field separator of the runner prices file
pub const FIELD_DELIMITER: u8 = b';';

/// Location of the runner prices CSV
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceLocation {
    Http(String),
    File(PathBuf),
}

impl ResourceLocation {
    pub fn parse(location: &str) -> Self {
        if location.starts_with("http://") || location.starts_with("https://") {
            Self::Http(location.to_string())
        } else {
            Self::File(PathBuf::from(location))
        }
    }
}

impl fmt::Display for ResourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{}", url),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Fetch the raw CSV text
///
/// Only HTTP 200 counts as success; any other status is a load failure.
pub async fn fetch_resource(
    location: &ResourceLocation,
    timeout: Duration,
) -> Result<String, AppError> {
    info!("Fetching runner prices from: {}", location);

    let content = match location {
        ResourceLocation::Http(url) => {
            let client = reqwest::Client::builder()
                .timeout(timeout)
                .build()
                .map_err(|e| AppError::InternalError(format!("Failed to build HTTP client: {}", e)))?;

            let response = client
                .get(url)
                .send()
                .await
                .map_err(|e| AppError::resource_load(url.as_str(), e))?;

            if response.status() != StatusCode::OK {
                return Err(AppError::resource_load(
                    url.as_str(),
                    format!("HTTP {}", response.status()),
                ));
            }

            response
                .text()
                .await
                .map_err(|e| AppError::resource_load(url.as_str(), e))?
        }
        ResourceLocation::File(path) => {
            let display = path.display().to_string();
            tokio::time::timeout(timeout, tokio::fs::read_to_string(path))
                .await
                .map_err(|_| AppError::resource_load(display.as_str(), "timed out"))?
                .map_err(|e| AppError::resource_load(display.as_str(), e))?
        }
    };

    debug!("Fetched {} bytes of runner prices", content.len());
    Ok(content)
}

/// Parse the semicolon-separated runner prices into a table
///
/// The first line is the header. Fields are split on `;` without any quoting
/// rules and kept as raw text.
pub fn parse_runner_csv(content: &str) -> Result<RunnerTable, AppError> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(FIELD_DELIMITER)
        .has_headers(true)
        .flexible(true)
        .quoting(false)
        .from_reader(content.trim().as_bytes());

    let headers = reader.headers()?.iter().map(String::from).collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        rows.push(RunnerRow::from_fields(
            record.iter().map(String::from).collect(),
        ));
    }

    info!("Parsed {} runner rows", rows.len());
    Ok(RunnerTable::new(headers, rows))
}

/// Calculate SHA256 hash of content
pub fn calculate_hash(content: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(content.as_bytes());
    format!("{:x}", hasher.finalize())
}

/// Fetch and parse the configured source in one go
///
/// Returns the table and the hash of the fetched content.
pub async fn load_table(source: &SourceConfig) -> Result<(RunnerTable, String), AppError> {
    let location = ResourceLocation::parse(&source.location);
    let content = fetch_resource(&location, source.timeout()).await?;
    let table = parse_runner_csv(&content)?;
    Ok((table, calculate_hash(&content)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = "header1;header2;pricePerMinute\nrunnerA;2cpu;0.50\nrunnerB;4cpu;1.00\n";

    #[test]
    fn test_parse_scenario() {
        let table = parse_runner_csv(SCENARIO).unwrap();

        assert_eq!(table.headers(), ["header1", "header2", "pricePerMinute"]);
        assert_eq!(table.len(), 2);

        let first = &table.rows()[0];
        assert_eq!(first.cell_count(), 4);
        assert_eq!(first.price().computed_price(), "0");
        assert_eq!(first.price().default_price(), "0.50");
        assert_eq!(table.rows()[1].price().default_price(), "1.00");
    }

    #[test]
    fn test_parse_header_only() {
        let table = parse_runner_csv("a;b;price\n").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.headers().len(), 3);
    }

    #[test]
    fn test_parse_empty_body() {
        let table = parse_runner_csv("  \n ").unwrap();
        assert!(table.is_empty());
        assert!(table.headers().is_empty());
    }

    #[test]
    fn test_parse_keeps_markup_and_quotes_verbatim() {
        let table = parse_runner_csv("name;price\n<b>\"big\"</b>;2\n").unwrap();
        assert_eq!(table.rows()[0].fields()[0], "<b>\"big\"</b>");
    }

    #[test]
    fn test_parse_crlf_and_ragged_rows() {
        let table = parse_runner_csv("name;cpu;price\r\nsmall;0.1\r\nlarge;8;0.9;extra\r\n").unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].cell_count(), 3);
        assert_eq!(table.rows()[0].price().default_price(), "0.1");
        assert_eq!(table.rows()[1].cell_count(), 5);
        assert_eq!(table.rows()[1].price().default_price(), "extra");
    }

    #[test]
    fn test_parse_skips_blank_interior_lines() {
        let table = parse_runner_csv("name;price\na;1\n\n\nb;2").unwrap();

        assert_eq!(table.len(), 2);
        assert_eq!(table.rows()[0].fields(), ["a", "1"]);
        assert_eq!(table.rows()[1].fields(), ["b", "2"]);
    }

    #[test]
    fn test_resource_location_parse() {
        assert_eq!(
            ResourceLocation::parse("https://example.com/prices.csv"),
            ResourceLocation::Http("https://example.com/prices.csv".to_string())
        );
        assert_eq!(
            ResourceLocation::parse("./runner_prices.csv"),
            ResourceLocation::File(PathBuf::from("./runner_prices.csv"))
        );
    }

    #[test]
    fn test_calculate_hash_is_stable() {
        assert_eq!(calculate_hash(SCENARIO), calculate_hash(SCENARIO));
        assert_ne!(calculate_hash(SCENARIO), calculate_hash("other"));
        assert_eq!(calculate_hash("").len(), 64);
    }

    #[tokio::test]
    async fn test_fetch_missing_file_fails() {
        let location = ResourceLocation::File(PathBuf::from("/nonexistent/runner_prices.csv"));
        let result = fetch_resource(&location, Duration::from_secs(1)).await;
        assert!(matches!(result, Err(AppError::ResourceLoad { .. })));
    }
}
