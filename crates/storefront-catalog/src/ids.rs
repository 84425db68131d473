//! Product identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Catalog identifier of a product.
///
/// Stable across fetches; the only key used to join favorites and detail
/// lookups against the snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(i64);

impl ProductId {
    /// Create an ID from its numeric value.
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// The numeric value.
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ProductId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_and_display() {
        let id: ProductId = " 42 ".parse().unwrap();
        assert_eq!(id, ProductId::new(42));
        assert_eq!(id.to_string(), "42");
        assert!("abc".parse::<ProductId>().is_err());
    }

    #[test]
    fn test_serde_transparent() {
        let id: ProductId = serde_json::from_str("7").unwrap();
        assert_eq!(id.get(), 7);
        assert_eq!(serde_json::to_string(&id).unwrap(), "7");
    }
}
