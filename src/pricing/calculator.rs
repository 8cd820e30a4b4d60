use crate::error::AppError;
use crate::pricing::models::RunnerTable;
use tracing::debug;

/// Parse a user-supplied minutes value
///
/// Surrounding whitespace is ignored. Anything that is not a finite decimal
/// number is rejected, including the empty string.
pub fn parse_minutes(input: &str) -> Result<f64, AppError> {
    let trimmed = input.trim();
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(AppError::InvalidMinutes(input.to_string())),
    }
}

/// Multiplies every row's default price by a validated minutes value
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceCalculator {
    minutes: f64,
}

impl PriceCalculator {
    /// Create a calculator from a numeric minutes value
    pub fn new(minutes: f64) -> Result<Self, AppError> {
        if !minutes.is_finite() {
            return Err(AppError::InvalidMinutes(minutes.to_string()));
        }
        Ok(Self { minutes })
    }

    /// Create a calculator from the text typed by the user
    pub fn from_input(input: &str) -> Result<Self, AppError> {
        parse_minutes(input).map(|minutes| Self { minutes })
    }

    pub fn minutes(&self) -> f64 {
        self.minutes
    }

    /// Rewrite every price cell as `default_price * minutes`
    ///
    /// Returns the number of cells updated.
    pub fn apply(&self, table: &mut RunnerTable) -> usize {
        let mut updated = 0;
        for row in table.rows_mut() {
            let price = row.price_mut();
            let computed = price.default_price_value() * self.minutes;
            price.set_computed_price(computed);
            updated += 1;
        }

        debug!(minutes = self.minutes, updated, "Recomputed runner prices");
        updated
    }
}
