//! Parses venue instrument names into their constituent expiry/strike/type.
//!
//! Both venues encode an option as hyphen-separated tokens:
//! `UNDERLYING-EXPIRY-STRIKE-TYPE` (e.g. `ETH-28MAR25-3000-C` on aevo,
//! `ETH-20250328-3000-C` on lyra). Only the expiry token's date format
//! differs between venues.

use chrono::{NaiveDate, TimeZone, Utc};
use thiserror::Error;

use crate::core::domain::OptionType;

#[derive(Error, Debug, PartialEq)]
pub enum InstrumentError {
    #[error("instrument name {0:?} has wrong token count: expected 4, got {1}")]
    WrongArity(String, usize),

    #[error("instrument name {0:?} has unparseable expiry {1:?}")]
    BadExpiry(String, String),

    #[error("instrument name {0:?} has unparseable strike {1:?}")]
    BadStrike(String, String),

    #[error("instrument name {0:?} has unrecognized option type {1:?}")]
    BadOptionType(String, String),
}

/// One parsed instrument identity, stripped of its underlying asset token
/// (the scanner only needs expiry/strike/type; the underlying is implied
/// by which asset subscription produced the instrument).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Instrument {
    pub expiry: i64,
    pub strike: f64,
    pub option_type: OptionType,
}

/// Parses an aevo-style instrument name, whose expiry token is `DDMmmYY`
/// (e.g. `28MAR25`).
pub fn parse_aevo(name: &str) -> Result<Instrument, InstrumentError> {
    parse(name, parse_expiry_ddmmmyy)
}

/// Parses a lyra-style instrument name, whose expiry token is `YYYYMMDD`.
pub fn parse_lyra(name: &str) -> Result<Instrument, InstrumentError> {
    parse(name, parse_expiry_yyyymmdd)
}

fn parse(
    name: &str,
    parse_expiry: impl Fn(&str) -> Option<i64>,
) -> Result<Instrument, InstrumentError> {
    let tokens: Vec<&str> = name.split('-').collect();
    if tokens.len() != 4 {
        return Err(InstrumentError::WrongArity(name.to_string(), tokens.len()));
    }

    let expiry = parse_expiry(tokens[1])
        .ok_or_else(|| InstrumentError::BadExpiry(name.to_string(), tokens[1].to_string()))?;

    let strike: f64 = tokens[2]
        .parse()
        .map_err(|_| InstrumentError::BadStrike(name.to_string(), tokens[2].to_string()))?;

    let option_type = OptionType::parse(tokens[3])
        .ok_or_else(|| InstrumentError::BadOptionType(name.to_string(), tokens[3].to_string()))?;

    Ok(Instrument {
        expiry,
        strike,
        option_type,
    })
}

/// `DDMmmYY`, e.g. `28MAR25` -> unix seconds at UTC midnight of that date.
fn parse_expiry_ddmmmyy(token: &str) -> Option<i64> {
    if token.len() != 7 {
        return None;
    }
    let day: u32 = token[0..2].parse().ok()?;
    let month = month_from_abbrev(&token[2..5].to_ascii_uppercase())?;
    let year: i32 = 2000 + token[5..7].parse::<i32>().ok()?;
    date_to_expiry_seconds(year, month, day)
}

/// `YYYYMMDD` -> unix seconds at UTC midnight of that date.
fn parse_expiry_yyyymmdd(token: &str) -> Option<i64> {
    if token.len() != 8 {
        return None;
    }
    let year: i32 = token[0..4].parse().ok()?;
    let month: u32 = token[4..6].parse().ok()?;
    let day: u32 = token[6..8].parse().ok()?;
    date_to_expiry_seconds(year, month, day)
}

fn date_to_expiry_seconds(year: i32, month: u32, day: u32) -> Option<i64> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let dt = date.and_hms_opt(0, 0, 0)?;
    Some(Utc.from_utc_datetime(&dt).timestamp())
}

fn month_from_abbrev(abbrev: &str) -> Option<u32> {
    Some(match abbrev {
        "JAN" => 1,
        "FEB" => 2,
        "MAR" => 3,
        "APR" => 4,
        "MAY" => 5,
        "JUN" => 6,
        "JUL" => 7,
        "AUG" => 8,
        "SEP" => 9,
        "OCT" => 10,
        "NOV" => 11,
        "DEC" => 12,
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_aevo_instrument() {
        let i = parse_aevo("ETH-28MAR25-3000-C").unwrap();
        assert_eq!(i.strike, 3000.0);
        assert_eq!(i.option_type, OptionType::Call);
    }

    #[test]
    fn parses_lyra_instrument() {
        let i = parse_lyra("ETH-20250328-3000-P").unwrap();
        assert_eq!(i.strike, 3000.0);
        assert_eq!(i.option_type, OptionType::Put);
        // same calendar day as the aevo fixture above
        let aevo = parse_aevo("ETH-28MAR25-3000-C").unwrap();
        assert_eq!(i.expiry, aevo.expiry);
    }

    #[test]
    fn rejects_wrong_arity() {
        assert_eq!(
            parse_aevo("ETH-28MAR25-3000"),
            Err(InstrumentError::WrongArity("ETH-28MAR25-3000".to_string(), 3))
        );
    }

    #[test]
    fn rejects_bad_option_type() {
        assert!(matches!(
            parse_aevo("ETH-28MAR25-3000-X"),
            Err(InstrumentError::BadOptionType(_, _))
        ));
    }

    #[test]
    fn rejects_bad_expiry() {
        assert!(matches!(
            parse_lyra("ETH-2025ZZ28-3000-C"),
            Err(InstrumentError::BadExpiry(_, _))
        ));
    }

    #[test]
    fn expiry_lands_on_utc_midnight() {
        let i = parse_aevo("ETH-28MAR25-3000-C").unwrap();
        assert_eq!(i.expiry.rem_euclid(86_400), 0);
    }
}
