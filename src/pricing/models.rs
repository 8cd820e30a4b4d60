use chrono::{DateTime, Utc};
use serde::Serialize;

/// Displayed value of a price cell before any calculation
pub const INITIAL_COMPUTED_PRICE: &str = "0";

/// Synthetic cell appended to every runner row
///
/// `default_price` is the row's trailing CSV field, copied verbatim and never
/// modified afterwards. `computed_price` is the displayed value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceCell {
    default_price: String,
    computed_price: String,
}

impl PriceCell {
    pub fn new(default_price: impl Into<String>) -> Self {
        Self {
            default_price: default_price.into(),
            computed_price: INITIAL_COMPUTED_PRICE.to_string(),
        }
    }

    pub fn default_price(&self) -> &str {
        &self.default_price
    }

    pub fn computed_price(&self) -> &str {
        &self.computed_price
    }

    /// Numeric value of the default price
    ///
    /// Blank text counts as zero; anything else that does not parse is NaN.
    pub fn default_price_value(&self) -> f64 {
        let trimmed = self.default_price.trim();
        if trimmed.is_empty() {
            return 0.0;
        }
        trimmed.parse::<f64>().unwrap_or(f64::NAN)
    }

    pub(crate) fn set_computed_price(&mut self, value: f64) {
        self.computed_price = format_price(value);
    }
}

/// Shortest decimal representation of a computed price, no rounding
pub fn format_price(value: f64) -> String {
    if value == 0.0 {
        // also folds -0 into 0
        "0".to_string()
    } else if value == f64::INFINITY {
        "Infinity".to_string()
    } else if value == f64::NEG_INFINITY {
        "-Infinity".to_string()
    } else {
        value.to_string()
    }
}

/// One CSV data line plus its price cell
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunnerRow {
    fields: Vec<String>,
    #[serde(flatten)]
    price: PriceCell,
}

impl RunnerRow {
    /// Build a row from its CSV fields, using the last one as default price
    pub fn from_fields(fields: Vec<String>) -> Self {
        let default_price = fields.last().cloned().unwrap_or_default();
        Self {
            fields,
            price: PriceCell::new(default_price),
        }
    }

    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    pub fn price(&self) -> &PriceCell {
        &self.price
    }

    pub(crate) fn price_mut(&mut self) -> &mut PriceCell {
        &mut self.price
    }

    /// Number of rendered cells: every field plus the price cell
    pub fn cell_count(&self) -> usize {
        self.fields.len() + 1
    }
}

/// Ordered collection of runner rows with the CSV header
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunnerTable {
    headers: Vec<String>,
    rows: Vec<RunnerRow>,
}

impl RunnerTable {
    pub fn new(headers: Vec<String>, rows: Vec<RunnerRow>) -> Self {
        Self { headers, rows }
    }

    pub fn headers(&self) -> &[String] {
        &self.headers
    }

    pub fn rows(&self) -> &[RunnerRow] {
        &self.rows
    }

    pub(crate) fn rows_mut(&mut self) -> &mut [RunnerRow] {
        &mut self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// Where the table is in its load lifecycle
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum LoadState {
    /// Fetch issued, no result yet
    Pending,
    Loaded {
        loaded_at: DateTime<Utc>,
        content_hash: String,
    },
    Failed {
        failed_at: DateTime<Utc>,
        reason: String,
    },
}

impl LoadState {
    pub fn is_loaded(&self) -> bool {
        matches!(self, Self::Loaded { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_row_uses_last_field_as_default_price() {
        let row = RunnerRow::from_fields(fields(&["runnerA", "2cpu", "0.50"]));
        assert_eq!(row.cell_count(), 4);
        assert_eq!(row.price().default_price(), "0.50");
        assert_eq!(row.price().computed_price(), "0");
    }

    #[test]
    fn test_default_price_value() {
        assert_eq!(PriceCell::new("0.50").default_price_value(), 0.5);
        assert_eq!(PriceCell::new(" 1.00 ").default_price_value(), 1.0);
        assert_eq!(PriceCell::new("").default_price_value(), 0.0);
        assert!(PriceCell::new("free").default_price_value().is_nan());
    }

    #[test]
    fn test_format_price() {
        assert_eq!(format_price(5.0), "5");
        assert_eq!(format_price(1.5), "1.5");
        assert_eq!(format_price(-0.0), "0");
        assert_eq!(format_price(0.1 + 0.2), "0.30000000000000004");
        assert_eq!(format_price(f64::NAN), "NaN");
        assert_eq!(format_price(f64::INFINITY), "Infinity");
    }

    #[test]
    fn test_load_state_serializes_with_tag() {
        let json = serde_json::to_value(LoadState::Pending).unwrap();
        assert_eq!(json["state"], "pending");
    }
}
