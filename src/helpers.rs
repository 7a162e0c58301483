use std::str::FromStr;

use bigdecimal::{num_bigint::BigInt, BigDecimal};
use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};

use crate::error::Error;

pub const ZERO_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

const SELECTOR_HEX_LEN: usize = 8;
const WORD_HEX_LEN: usize = 64;

pub fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, Error> {
    DateTime::parse_from_rfc3339(raw)
        .map(|timestamp| timestamp.with_timezone(&Utc))
        .map_err(|_| Error::DecodeDateTimeError(raw.to_owned()))
}

/// Monday (UTC) of the calendar week containing the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(i64::from(date.weekday().num_days_from_monday()))
}

/// Parses an unsigned integer amount, decimal or `0x`-prefixed hex.
pub fn parse_uint(raw: &str) -> Option<BigInt> {
    if let Some(hex) = raw.strip_prefix("0x") {
        BigInt::parse_bytes(hex.as_bytes(), 16)
    } else {
        BigInt::parse_bytes(raw.as_bytes(), 10)
    }
}

/// Scales an unsigned integer amount by `10^-decimals` using exact
/// integer arithmetic. Splitting into quotient and remainder and
/// rebuilding the value as a decimal string avoids the precision loss
/// of dividing 256-bit amounts as floating-point numbers.
pub fn scale_amount(value: &BigInt, decimals: u32) -> Result<BigDecimal, Error> {
    let base = BigInt::from(10).pow(decimals);
    let integer = value / &base;
    let fraction = value % &base;

    let padded = format!(
        "{:0>width$}",
        fraction.to_string(),
        width = decimals as usize
    );
    let fraction_digits = padded.trim_end_matches('0');

    let rendered = if fraction_digits.is_empty() {
        integer.to_string()
    } else {
        format!("{}.{}", integer, fraction_digits)
    };

    Ok(BigDecimal::from_str(&rendered)?)
}

/// Decodes the amount of an ERC-20 `transfer`-shaped call directly from
/// raw call data: selector, then the recipient word, then the amount
/// word interpreted as a big-endian unsigned integer.
pub fn decode_transfer_calldata(
    input: &str,
    decimals: u32,
) -> Option<BigDecimal> {
    let data = input.strip_prefix("0x").unwrap_or(input);
    let amount_offset = SELECTOR_HEX_LEN + WORD_HEX_LEN;

    // Checked slicing: call data that is too short, or not even ASCII
    // hex, contributes nothing instead of aborting the batch.
    let amount_hex = data.get(amount_offset..amount_offset + WORD_HEX_LEN)?;
    let value = BigInt::parse_bytes(amount_hex.as_bytes(), 16)?;

    scale_amount(&value, decimals).ok()
}
