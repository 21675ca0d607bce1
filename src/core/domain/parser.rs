//! Normalizes per-venue wire-format ladder rows into canonical [`Order`]s.
//!
//! A row is `[price, amount, iv?]`, with arity and `iv`
//! presence fixed per venue.

use serde_json::Value;
use thiserror::Error;

use super::id::{OptionType, VenueId};
use super::order::Order;

/// The two wire shapes this parser knows how to decode. Distinct from
/// [`VenueId`] (a free-form identity string) because arity rules are a
/// closed set, not something a new venue can opt into
/// without a code change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WireShape {
    /// `[price, amount, iv]`, all strings.
    Aevo,
    /// `[price, amount]`, all strings; `iv` synthesized as `-1.0`.
    Lyra,
}

#[derive(Error, Debug, PartialEq)]
pub enum ParseError {
    #[error("row has wrong arity: expected {expected}, got {actual}")]
    MalformedRow { expected: usize, actual: usize },

    #[error("row field {index} is not a string")]
    NonString { index: usize },

    #[error("row field {index} ({value:?}) does not parse as f64")]
    NonNumeric { index: usize, value: String },
}

/// Parses a venue's raw `bids` or `asks` array into canonical [`Order`]s.
/// Arrival order is preserved; ladder sorting is the store's concern.
pub fn parse_rows(
    shape: WireShape,
    venue: &VenueId,
    strike: f64,
    option_type: OptionType,
    rows: &[Value],
) -> Result<Vec<Order>, ParseError> {
    rows.iter()
        .map(|row| parse_row(shape, venue, strike, option_type, row))
        .collect()
}

fn parse_row(
    shape: WireShape,
    venue: &VenueId,
    strike: f64,
    option_type: OptionType,
    row: &Value,
) -> Result<Order, ParseError> {
    let fields = row.as_array().ok_or(ParseError::MalformedRow {
        expected: expected_arity(shape),
        actual: 0,
    })?;

    let expected = expected_arity(shape);
    if fields.len() != expected {
        return Err(ParseError::MalformedRow {
            expected,
            actual: fields.len(),
        });
    }

    let price = parse_field(fields, 0)?;
    let amount = parse_field(fields, 1)?;
    let iv = match shape {
        WireShape::Aevo => parse_field(fields, 2)?,
        WireShape::Lyra => -1.0,
    };

    Ok(Order::new(price, amount, iv, strike, option_type, venue.clone()))
}

fn expected_arity(shape: WireShape) -> usize {
    match shape {
        WireShape::Aevo => 3,
        WireShape::Lyra => 2,
    }
}

fn parse_field(fields: &[Value], index: usize) -> Result<f64, ParseError> {
    let raw = fields[index]
        .as_str()
        .ok_or(ParseError::NonString { index })?;
    raw.parse::<f64>().map_err(|_| ParseError::NonNumeric {
        index,
        value: raw.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn venue(id: &str) -> VenueId {
        VenueId::from(id)
    }

    #[test]
    fn aevo_row_parses_three_fields() {
        let rows = vec![json!(["50", "1", "0.5"])];
        let orders =
            parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows).unwrap();
        assert_eq!(orders.len(), 1);
        assert_eq!(orders[0].price(), 50.0);
        assert_eq!(orders[0].amount(), 1.0);
        assert_eq!(orders[0].iv(), 0.5);
    }

    #[test]
    fn lyra_row_parses_two_fields_and_synthesizes_iv() {
        let rows = vec![json!(["50", "1"])];
        let orders =
            parse_rows(WireShape::Lyra, &venue("lyra"), 3000.0, OptionType::Call, &rows).unwrap();
        assert_eq!(orders[0].iv(), -1.0);
    }

    #[test]
    fn aevo_row_wrong_arity_is_malformed() {
        let rows = vec![json!(["50", "1"])];
        let err = parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows)
            .unwrap_err();
        assert_eq!(err, ParseError::MalformedRow { expected: 3, actual: 2 });
    }

    #[test]
    fn lyra_row_wrong_arity_is_malformed() {
        let rows = vec![json!(["50", "1", "0.5"])];
        let err = parse_rows(WireShape::Lyra, &venue("lyra"), 3000.0, OptionType::Call, &rows)
            .unwrap_err();
        assert_eq!(err, ParseError::MalformedRow { expected: 2, actual: 3 });
    }

    #[test]
    fn non_string_field_errors() {
        let rows = vec![json!([50, "1", "0.5"])];
        let err = parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows)
            .unwrap_err();
        assert_eq!(err, ParseError::NonString { index: 0 });
    }

    #[test]
    fn non_numeric_field_errors() {
        let rows = vec![json!(["abc", "1", "0.5"])];
        let err = parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows)
            .unwrap_err();
        assert_eq!(
            err,
            ParseError::NonNumeric { index: 0, value: "abc".to_string() }
        );
    }

    #[test]
    fn arrival_order_is_preserved() {
        let rows = vec![json!(["10", "1", "0.5"]), json!(["20", "1", "0.5"])];
        let orders =
            parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows).unwrap();
        assert_eq!(orders[0].price(), 10.0);
        assert_eq!(orders[1].price(), 20.0);
    }

    #[test]
    fn numeric_roundtrip_to_three_decimals() {
        let rows = vec![json!(["1234.500", "0.250", "0.512"])];
        let orders =
            parse_rows(WireShape::Aevo, &venue("aevo"), 3000.0, OptionType::Call, &rows).unwrap();
        let o = &orders[0];
        assert_eq!(format!("{:.3}", o.price()), "1234.500");
        assert_eq!(format!("{:.3}", o.amount()), "0.250");
        assert_eq!(format!("{:.3}", o.iv()), "0.512");
    }
}
