//! Catalog-side domain types: bottle sizes, product categories, and the
//! low-stock classification used by the inventory alert scan.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;

/// The two sellable bottle sizes per product. Wire and storage form is
/// `"1oz"` / `"2oz"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Size {
    #[serde(rename = "1oz")]
    OneOz,
    #[serde(rename = "2oz")]
    TwoOz,
}

impl Size {
    pub fn as_str(self) -> &'static str {
        match self {
            Size::OneOz => "1oz",
            Size::TwoOz => "2oz",
        }
    }
}

impl std::fmt::Display for Size {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Size {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "1oz" => Ok(Size::OneOz),
            "2oz" => Ok(Size::TwoOz),
            other => Err(CoreError::Validation(format!("Unknown size: {other}"))),
        }
    }
}

/// Product category. The catalog uses the original store's fixed set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Masculino,
    Femenino,
    Unisex,
}

impl Category {
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Masculino => "masculino",
            Category::Femenino => "femenino",
            Category::Unisex => "unisex",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for Category {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "masculino" => Ok(Category::Masculino),
            "femenino" => Ok(Category::Femenino),
            "unisex" => Ok(Category::Unisex),
            other => Err(CoreError::Validation(format!("Unknown category: {other}"))),
        }
    }
}

/// Severity of an inventory alert.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AlertSeverity {
    /// Stock is at or below the minimum threshold but not exhausted.
    Low,
    /// Stock is exactly zero.
    Critical,
}

impl AlertSeverity {
    /// Classify a stock level that is already known to be at or below the
    /// minimum threshold.
    pub fn for_stock(stock: i32) -> Self {
        if stock == 0 {
            AlertSeverity::Critical
        } else {
            AlertSeverity::Low
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AlertSeverity::Low => "low",
            AlertSeverity::Critical => "critical",
        }
    }
}

impl std::fmt::Display for AlertSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<String> for AlertSeverity {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        match value.as_str() {
            "low" => Ok(AlertSeverity::Low),
            "critical" => Ok(AlertSeverity::Critical),
            other => Err(CoreError::Validation(format!("Unknown severity: {other}"))),
        }
    }
}

/// Whether a single size's stock level is at or below the minimum threshold.
pub fn is_undersupplied(stock: i32, min_stock: i32) -> bool {
    stock <= min_stock
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn size_round_trips_through_text() {
        assert_eq!(Size::try_from("1oz".to_string()).unwrap(), Size::OneOz);
        assert_eq!(Size::try_from("2oz".to_string()).unwrap(), Size::TwoOz);
        assert_eq!(Size::OneOz.to_string(), "1oz");
        assert!(Size::try_from("3oz".to_string()).is_err());
    }

    #[test]
    fn severity_is_critical_only_at_zero() {
        assert_eq!(AlertSeverity::for_stock(0), AlertSeverity::Critical);
        assert_eq!(AlertSeverity::for_stock(1), AlertSeverity::Low);
        assert_eq!(AlertSeverity::for_stock(5), AlertSeverity::Low);
    }

    #[test]
    fn undersupply_is_inclusive_of_the_threshold() {
        assert!(is_undersupplied(5, 5));
        assert!(is_undersupplied(0, 5));
        assert!(!is_undersupplied(6, 5));
    }

    #[test]
    fn size_serializes_as_wire_form() {
        assert_eq!(serde_json::to_string(&Size::OneOz).unwrap(), "\"1oz\"");
        let parsed: Size = serde_json::from_str("\"2oz\"").unwrap();
        assert_eq!(parsed, Size::TwoOz);
    }
}
