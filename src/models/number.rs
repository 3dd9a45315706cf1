use mongodb::bson::Bson;
use serde::{de::Error, Deserialize, Deserializer};

/// Accepts a number or a numeric string (`25`, `12.5`, `"25"`), as form-backed
/// clients send prices either way. Blank strings and `null` read as absent.
fn number_from_bson(value: Bson) -> Result<Option<f64>, String> {
    let number = match value {
        Bson::Double(n) => n,
        Bson::Int32(n) => f64::from(n),
        Bson::Int64(n) => n as f64,
        Bson::Null | Bson::Undefined => return Ok(None),
        Bson::String(s) if s.trim().is_empty() => return Ok(None),
        Bson::String(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| format!("Expected a number, got \"{}\"", s))?,
        other => return Err(format!("Expected a number, got {:?}", other.element_type())),
    };

    if !number.is_finite() {
        return Err("Expected a finite number".to_string());
    }
    Ok(Some(number))
}

pub fn deserialize_lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    number_from_bson(Bson::deserialize(deserializer)?)
        .map_err(D::Error::custom)?
        .ok_or_else(|| D::Error::custom("Expected a number, got nothing"))
}

pub fn deserialize_lenient_opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    number_from_bson(Bson::deserialize(deserializer)?).map_err(D::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numbers_and_numeric_strings() {
        assert_eq!(number_from_bson(Bson::Int32(25)), Ok(Some(25.0)));
        assert_eq!(number_from_bson(Bson::Int64(7)), Ok(Some(7.0)));
        assert_eq!(number_from_bson(Bson::Double(12.5)), Ok(Some(12.5)));
        assert_eq!(number_from_bson(Bson::String(" 19.99 ".into())), Ok(Some(19.99)));
    }

    #[test]
    fn test_blank_and_null_are_absent() {
        assert_eq!(number_from_bson(Bson::Null), Ok(None));
        assert_eq!(number_from_bson(Bson::String("  ".into())), Ok(None));
    }

    #[test]
    fn test_non_numeric_is_rejected() {
        assert!(number_from_bson(Bson::String("cheap".into())).is_err());
        assert!(number_from_bson(Bson::String("NaN".into())).is_err());
        assert!(number_from_bson(Bson::Boolean(true)).is_err());
    }
}
