// Code generated by ironxsd. DO NOT EDIT.
// Source: orders.xsd

use regex::Regex;

/// Error returned by generated `validate()` routines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// Numeric code in `1001..=1005`.
    pub code: u32,
    /// Description naming the field and the violated facet.
    pub message: String,
}

impl ValidationError {
    /// Creates a new validation error.
    pub fn new(code: u32, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "validation error {}: {}", self.code, self.message)
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Clone, PartialEq)]
#[allow(non_camel_case_types)]
pub enum Side {
    BUY,
    SELL,
}

impl Side {
    /// Returns the literal as written in the schema.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BUY => "Buy",
            Self::SELL => "Sell",
        }
    }

    /// Enumerations are valid by construction.
    pub fn validate(&self) -> Result<(), ValidationError> {
        Ok(())
    }
}

/// A single order.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    pub id: i64,
    pub symbol: String,
    pub side: Side,
    pub quantity: i32,
    pub tag: Option<Vec<String>>,
    pub venue: String,
}

impl Order {
    /// Checks every field against its schema facets.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let symbol_pattern = Regex::new("^(?:[A-Z]+)$").map_err(|e| ValidationError::new(1005, e.to_string()))?;
        if self.symbol.chars().count() < 1 {
            return Err(ValidationError::new(1001, "symbol is shorter than the minimum length of 1"));
        }
        if self.symbol.chars().count() > 8 {
            return Err(ValidationError::new(1002, "symbol exceeds the maximum length of 8"));
        }
        if !symbol_pattern.is_match(self.symbol.as_str()) {
            return Err(ValidationError::new(1005, "symbol does not match the pattern ^(?:[A-Z]+)$"));
        }
        self.side.validate()?;
        if (self.quantity as f64) < 1.0 {
            return Err(ValidationError::new(1003, "quantity is less than the minimum value of 1"));
        }
        if (self.quantity as f64) > 1000.0 {
            return Err(ValidationError::new(1004, "quantity exceeds the maximum value of 1000"));
        }
        if let Some(items) = &self.tag {
            for item in items {
                if item.chars().count() > 4 {
                    return Err(ValidationError::new(1002, "tag exceeds the maximum length of 4"));
                }
            }
        }
        if self.venue.chars().count() < 3 {
            return Err(ValidationError::new(1001, "venue is shorter than the minimum length of 3"));
        }
        Ok(())
    }
}
