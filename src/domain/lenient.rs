//! Forgiving deserializers for records produced by upstream capture steps.
//!
//! Survey data arrives as loosely-typed JSON. A negative or missing count is
//! treated as zero and a quantity is never below one, so nothing downstream
//! has to re-check these values.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Deserializer};

/// Largest unit volume, weight or dimension accepted from a survey.
/// Anything larger is clamped so downstream sums stay in range.
pub const MAX_ITEM_MEASURE: Decimal = dec!(1000000);

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Int(i64),
    Float(f64),
}

impl RawNumber {
    fn to_i64(&self) -> i64 {
        match *self {
            Self::Int(n) => n,
            // Truncates toward zero; NaN becomes 0
            Self::Float(f) => f as i64,
        }
    }
}

/// Non-negative count; absent, null, negative or garbage values become 0.
pub fn count<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| serde_json::from_value::<RawNumber>(v).ok())
        .map(|n| n.to_i64().clamp(0, u32::MAX as i64) as u32)
        .unwrap_or(0))
}

/// Item quantity; anything below one is read as one.
pub fn quantity<'de, D>(deserializer: D) -> Result<u32, D::Error>
where
    D: Deserializer<'de>,
{
    count(deserializer).map(|n| n.max(1))
}

pub fn default_quantity() -> u32 {
    1
}

/// Optional unit measure (volume, weight, dimension). Accepts numbers or
/// numeric strings. Negative or unreadable values read as absent; huge
/// values are clamped to [`MAX_ITEM_MEASURE`].
pub fn measure<'de, D>(deserializer: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(raw
        .and_then(|v| serde_json::from_value::<Decimal>(v).ok())
        .filter(|v| !v.is_sign_negative())
        .map(|v| v.min(MAX_ITEM_MEASURE)))
}

/// String tag that may be null; null reads as the type's default.
pub fn tag<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: From<String> + Default,
{
    Ok(Option::<String>::deserialize(deserializer)?
        .map(T::from)
        .unwrap_or_default())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "count")]
        floors: u32,
        #[serde(default = "default_quantity", deserialize_with = "quantity")]
        qty: u32,
        #[serde(default, deserialize_with = "measure")]
        cbm: Option<Decimal>,
    }

    fn sample(json: &str) -> Sample {
        serde_json::from_str(json).unwrap()
    }

    #[test]
    fn negative_and_missing_counts_are_zero() {
        assert_eq!(sample(r#"{"floors": -2}"#).floors, 0);
        assert_eq!(sample(r#"{}"#).floors, 0);
        assert_eq!(sample(r#"{"floors": null}"#).floors, 0);
        assert_eq!(sample(r#"{"floors": "three"}"#).floors, 0);
        assert_eq!(sample(r#"{"floors": 3.7}"#).floors, 3);
    }

    #[test]
    fn quantity_never_below_one() {
        assert_eq!(sample(r#"{}"#).qty, 1);
        assert_eq!(sample(r#"{"qty": 0}"#).qty, 1);
        assert_eq!(sample(r#"{"qty": -4}"#).qty, 1);
        assert_eq!(sample(r#"{"qty": 12}"#).qty, 12);
    }

    #[test]
    fn measures_are_bounded() {
        assert_eq!(sample(r#"{"cbm": "2.5"}"#).cbm, Some(dec!(2.5)));
        assert_eq!(sample(r#"{"cbm": 0.75}"#).cbm, Some(dec!(0.75)));
        assert_eq!(sample(r#"{}"#).cbm, None);
        assert_eq!(sample(r#"{"cbm": null}"#).cbm, None);
        assert_eq!(sample(r#"{"cbm": "-3"}"#).cbm, None);
        assert_eq!(sample(r#"{"cbm": "lots"}"#).cbm, None);
        assert_eq!(
            sample(r#"{"cbm": "79228162514264337593543950"}"#).cbm,
            Some(MAX_ITEM_MEASURE)
        );
    }
}
