//! Strict numeric literal parsing for option values and positionals.
//!
//! Both parsers require the whole token to be consumed: `12x` is rejected
//! rather than read as `12`.

use crate::error::{Error, Result};

/// Parse an `i32` literal.
///
/// Leading whitespace and a sign are accepted. The radix follows the usual
/// C prefix rules: `0x`/`0X` selects hexadecimal, a leading `0` selects octal,
/// anything else is decimal. As with `strtol`, a numeric prefix that is out
/// of range is reported as such even when garbage follows it.
pub fn parse_int(token: &str) -> Result<i32> {
    let body = skip_c_space(token);
    let (negative, body) = match body.as_bytes().first() {
        Some(b'-') => (true, &body[1..]),
        Some(b'+') => (false, &body[1..]),
        _ => (false, body),
    };

    let (radix, digits) = if let Some(hex) = body
        .strip_prefix("0x")
        .or_else(|| body.strip_prefix("0X"))
    {
        (16, hex)
    } else if body.len() > 1 && body.starts_with('0') {
        (8, &body[1..])
    } else {
        (10, body)
    };

    let end = digits
        .find(|c: char| !c.is_digit(radix))
        .unwrap_or(digits.len());
    let (prefix, rest) = digits.split_at(end);
    if prefix.is_empty() {
        return Err(Error::MalformedInt(token.to_string()));
    }

    let value = u64::from_str_radix(prefix, radix)
        .ok()
        .map(|magnitude| {
            if negative {
                -i128::from(magnitude)
            } else {
                i128::from(magnitude)
            }
        })
        .and_then(|value| i32::try_from(value).ok())
        .ok_or_else(|| Error::OutOfRange(token.to_string()))?;

    if !rest.is_empty() {
        return Err(Error::MalformedInt(token.to_string()));
    }
    Ok(value)
}

/// Parse an `f64` literal.
///
/// `inf`, `infinity` and `nan` are accepted in any case. A finite literal
/// that overflows to infinity, or a non-zero literal that underflows to zero,
/// is reported as out of range. That includes the longest numeric prefix of
/// a malformed token, so `1e999x` is out of range rather than malformed.
pub fn parse_float(token: &str) -> Result<f64> {
    let body = skip_c_space(token);
    match body.parse::<f64>() {
        Ok(value) if out_of_range(body, value) => Err(Error::OutOfRange(token.to_string())),
        Ok(value) => Ok(value),
        Err(_) => {
            let prefix_out_of_range = body
                .char_indices()
                .rev()
                .map(|(i, _)| &body[..i])
                .filter(|prefix| !prefix.is_empty())
                .find_map(|prefix| prefix.parse::<f64>().ok().map(|v| out_of_range(prefix, v)))
                .unwrap_or(false);
            if prefix_out_of_range {
                Err(Error::OutOfRange(token.to_string()))
            } else {
                Err(Error::MalformedFloat(token.to_string()))
            }
        }
    }
}

/// Skip the characters C's `isspace` accepts.
fn skip_c_space(token: &str) -> &str {
    token.trim_start_matches([' ', '\t', '\n', '\x0b', '\x0c', '\r'])
}

fn out_of_range(literal: &str, value: f64) -> bool {
    (value.is_infinite() && !is_infinity_literal(literal))
        || (value == 0.0 && has_nonzero_mantissa(literal))
}

fn is_infinity_literal(body: &str) -> bool {
    let unsigned = body.trim_start_matches(['+', '-']);
    unsigned.eq_ignore_ascii_case("inf") || unsigned.eq_ignore_ascii_case("infinity")
}

fn has_nonzero_mantissa(body: &str) -> bool {
    body.split(['e', 'E'])
        .next()
        .is_some_and(|mantissa| mantissa.bytes().any(|b| (b'1'..=b'9').contains(&b)))
}
