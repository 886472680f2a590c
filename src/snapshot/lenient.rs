//! Forgiving field decoders for loosely-shaped snapshot JSON.
//!
//! Every decoder here is total: `null`, a missing key, or a value of the wrong
//! JSON type resolves to the field's default instead of failing the document.
//! Collections are decoded element by element so one bad entry only drops that
//! entry.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// Decode `T`, falling back to `T::default()` on any shape mismatch.
pub fn or_default<'de, D, T>(de: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    let v = Value::deserialize(de)?;
    Ok(serde_json::from_value(v).unwrap_or_default())
}

/// Optional string; numbers are kept in their textual form.
pub fn string<'de, D>(de: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(match v {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}

/// Number or numeric string; anything else reads as `0.0`.
pub fn number<'de, D>(de: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(as_number(&v).unwrap_or(0.0))
}

/// Like [`number`] but keeps absence distinguishable.
pub fn opt_number<'de, D>(de: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(as_number(&v))
}

/// Non-negative integer count (floats are truncated, negatives clamp to 0).
pub fn count<'de, D>(de: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(as_number(&v).map(|n| n.max(0.0) as u64).unwrap_or(0))
}

/// Array of numbers; non-numeric elements read as `0.0`.
pub fn numbers<'de, D>(de: D) -> Result<Vec<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(numbers_of(v).unwrap_or_default())
}

/// Optional array of numbers; a non-array reads as absent.
pub fn opt_numbers<'de, D>(de: D) -> Result<Option<Vec<f64>>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Value::deserialize(de)?;
    Ok(numbers_of(v))
}

/// Array of `T`; elements that fail to decode are skipped.
pub fn vec_of<'de, D, T>(de: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(de)?;
    Ok(elements_of(v).unwrap_or_default())
}

/// Optional array of `T`; a non-array reads as absent.
pub fn opt_vec_of<'de, D, T>(de: D) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let v = Value::deserialize(de)?;
    Ok(elements_of(v))
}

pub(crate) fn as_number(v: &Value) -> Option<f64> {
    match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        _ => None,
    }
}

fn numbers_of(v: Value) -> Option<Vec<f64>> {
    match v {
        Value::Array(items) => Some(
            items
                .iter()
                .map(|item| as_number(item).unwrap_or(0.0))
                .collect(),
        ),
        _ => None,
    }
}

fn elements_of<T: DeserializeOwned>(v: Value) -> Option<Vec<T>> {
    match v {
        Value::Array(items) => Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        ),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn numeric_strings_are_accepted() {
        assert_eq!(as_number(&json!("12")), Some(12.0));
        assert_eq!(as_number(&json!(" 4.5 ")), Some(4.5));
        assert_eq!(as_number(&json!("n/a")), None);
        assert_eq!(as_number(&json!(null)), None);
        assert_eq!(as_number(&json!(true)), None);
    }

    #[test]
    fn arrays_skip_bad_elements() {
        let v: Option<Vec<String>> = elements_of(json!(["a", 3, "b", null]));
        assert_eq!(v, Some(vec!["a".to_string(), "b".to_string()]));
        let none: Option<Vec<String>> = elements_of(json!({"a": 1}));
        assert!(none.is_none());
    }

    #[test]
    fn number_arrays_zero_fill() {
        assert_eq!(
            numbers_of(json!([40, "55", "x", null])),
            Some(vec![40.0, 55.0, 0.0, 0.0])
        );
    }
}
