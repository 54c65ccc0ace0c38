//! Types that can be used in other crates

use std::{fmt, str::FromStr};

use error_stack::ResultExt;
use rust_decimal::{prelude::ToPrimitive, Decimal};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::errors::{CustomResult, ParsingError};

/// A rupee amount in major units, e.g. `5000.50`.
///
/// The backend sends amounts either as JSON numbers or as numeric strings, so both forms
/// are accepted. Whole amounts are written back as integers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MajorUnit(Decimal);

impl MajorUnit {
    /// Wraps a decimal amount
    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    /// Zero rupees
    pub fn zero() -> Self {
        Self(Decimal::ZERO)
    }

    /// The underlying decimal value
    pub fn get_amount_as_decimal(self) -> Decimal {
        self.0
    }

    /// Whether the amount is strictly greater than zero
    pub fn is_positive(self) -> bool {
        self.0 > Decimal::ZERO
    }

    /// Parses an amount typed by a user, such as `"5000"` or `"1,250.50"`.
    pub fn from_user_input(input: &str) -> CustomResult<Self, ParsingError> {
        let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
        Decimal::from_str(&cleaned)
            .map(Self)
            .change_context(ParsingError::AmountParsingError)
            .attach_printable_lazy(|| format!("Unable to parse {input:?} as an amount"))
    }
}

impl From<i64> for MajorUnit {
    fn from(value: i64) -> Self {
        Self(Decimal::from(value))
    }
}

impl From<Decimal> for MajorUnit {
    fn from(value: Decimal) -> Self {
        Self(value)
    }
}

impl fmt::Display for MajorUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl std::ops::Add for MajorUnit {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Serialize for MajorUnit {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let normalized = self.0.normalize();
        if normalized.scale() == 0 {
            if let Some(whole) = normalized.to_i64() {
                return serializer.serialize_i64(whole);
            }
        }
        match normalized.to_f64() {
            Some(value) => serializer.serialize_f64(value),
            None => serializer.serialize_str(&normalized.to_string()),
        }
    }
}

impl<'de> Deserialize<'de> for MajorUnit {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(serde_json::Number),
            Text(String),
        }

        let raw = Raw::deserialize(deserializer)?;
        let text = match &raw {
            Raw::Number(number) => number.to_string(),
            Raw::Text(text) => text.trim().to_string(),
        };
        Decimal::from_str(&text)
            .or_else(|_| Decimal::from_scientific(&text))
            .map(Self)
            .map_err(serde::de::Error::custom)
    }
}

/// Identifier of a backend resource.
///
/// Ids arrive as JSON numbers or strings depending on the endpoint; numeric ids are sent
/// back as numbers.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceId(String);

impl ResourceId {
    /// The id as text
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<u64> for ResourceId {
    fn from(value: u64) -> Self {
        Self(value.to_string())
    }
}

impl From<&str> for ResourceId {
    fn from(value: &str) -> Self {
        Self(value.trim().to_string())
    }
}

impl From<String> for ResourceId {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

impl FromStr for ResourceId {
    type Err = error_stack::Report<ParsingError>;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim();
        if value.is_empty() {
            return Err(
                error_stack::report!(ParsingError::StructParseFailure("ResourceId"))
                    .attach_printable("identifier is empty"),
            );
        }
        Ok(Self(value.to_string()))
    }
}

impl Serialize for ResourceId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.0.parse::<u64>() {
            Ok(numeric) => serializer.serialize_u64(numeric),
            Err(_) => serializer.serialize_str(&self.0),
        }
    }
}

impl<'de> Deserialize<'de> for ResourceId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Number(u64),
            Text(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Number(number) => Ok(Self::from(number)),
            Raw::Text(text) if !text.trim().is_empty() => Ok(Self::from(text)),
            Raw::Text(_) => Err(serde::de::Error::custom("empty identifier")),
        }
    }
}

#[cfg(test)]
mod amount_tests {
    #![allow(clippy::unwrap_used)]

    use super::*;

    #[test]
    fn accepts_numbers_and_numeric_strings() {
        let from_number: MajorUnit = serde_json::from_str("5000").unwrap();
        let from_string: MajorUnit = serde_json::from_str("\"5000.00\"").unwrap();
        let fractional: MajorUnit = serde_json::from_str("1250.5").unwrap();

        assert_eq!(from_number, MajorUnit::from(5000_i64));
        assert_eq!(from_number, from_string);
        assert_eq!(fractional.to_string(), "1250.50");
        assert!(serde_json::from_str::<MajorUnit>("\"five\"").is_err());
    }

    #[test]
    fn whole_amounts_serialize_as_integers() {
        let whole: MajorUnit = serde_json::from_str("\"5000.00\"").unwrap();
        assert_eq!(serde_json::to_string(&whole).unwrap(), "5000");

        let fractional: MajorUnit = serde_json::from_str("\"99.5\"").unwrap();
        assert_eq!(serde_json::to_string(&fractional).unwrap(), "99.5");
    }

    #[test]
    fn resource_ids_keep_their_wire_shape() {
        let numeric: ResourceId = serde_json::from_str("3").unwrap();
        let textual: ResourceId = serde_json::from_str("\"65f0c1ab\"").unwrap();

        assert_eq!(numeric, ResourceId::from(3_u64));
        assert_eq!(serde_json::to_string(&numeric).unwrap(), "3");
        assert_eq!(serde_json::to_string(&textual).unwrap(), "\"65f0c1ab\"");
        assert!(serde_json::from_str::<ResourceId>("\"  \"").is_err());
        assert!("".parse::<ResourceId>().is_err());
    }

    #[test]
    fn parses_user_input() {
        assert_eq!(
            MajorUnit::from_user_input(" 1,250 ").unwrap(),
            MajorUnit::from(1250_i64)
        );
        assert!(MajorUnit::from_user_input("abc").is_err());
        assert!(!MajorUnit::zero().is_positive());
    }
}
