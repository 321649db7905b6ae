//! Filterable categorical dimensions

use std::fmt;

use serde::{Deserialize, Serialize};

/// A categorical column the filter state can constrain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    Product,
    Segment,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Dimension::Region, Dimension::Product, Dimension::Segment];

    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Region => "region",
            Dimension::Product => "product",
            Dimension::Segment => "segment",
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        assert_eq!(Dimension::Region.to_string(), "region");
        assert_eq!(Dimension::Segment.to_string(), "segment");
    }

    #[test]
    fn test_serde_snake_case() {
        let json = serde_json::to_string(&Dimension::Product).unwrap();
        assert_eq!(json, "\"product\"");
    }
}
