use crate::engine::errors::CoercionError;
use crate::engine::types::{RawResult, ResultKind, TypedResult};

/// Processor output for a missing value.
pub const NULL_LITERAL: &str = "null";

/// Strips trailing whitespace only; leading whitespace is part of the answer.
pub fn trim_output(text: &str) -> &str {
    text.trim_end()
}

/// Coerces processor output into `kind`, never failing.
///
/// Strings come back trimmed and otherwise verbatim, a literal `null` included.
/// Numbers map `null` and unreadable text to zero.
pub fn coerce(raw: &RawResult, kind: ResultKind) -> TypedResult {
    coerce_text(&raw.text(), kind)
}

pub fn coerce_text(text: &str, kind: ResultKind) -> TypedResult {
    try_coerce(text, kind).unwrap_or_else(|_| TypedResult::zero(kind))
}

/// Like [`coerce_text`] but reports numeric text that could not be read.
pub fn try_coerce(text: &str, kind: ResultKind) -> Result<TypedResult, CoercionError> {
    let trimmed = trim_output(text);
    match kind {
        ResultKind::String => Ok(TypedResult::String(trimmed.to_string())),
        ResultKind::Integer if trimmed == NULL_LITERAL => Ok(TypedResult::Integer(0)),
        ResultKind::Float if trimmed == NULL_LITERAL => Ok(TypedResult::Float(0.0)),
        ResultKind::Integer => parse_leading_integer(trimmed)
            .map(TypedResult::Integer)
            .ok_or_else(|| unparseable(kind, trimmed)),
        ResultKind::Float => parse_leading_float(trimmed)
            .map(TypedResult::Float)
            .ok_or_else(|| unparseable(kind, trimmed)),
    }
}

fn unparseable(kind: ResultKind, text: &str) -> CoercionError {
    CoercionError::Unparseable {
        kind,
        text: text.to_string(),
    }
}

/// Reads an optionally signed run of decimal digits after leading whitespace,
/// ignoring whatever follows. Out-of-range values saturate.
pub fn parse_leading_integer(text: &str) -> Option<i64> {
    let s = text.trim_start().as_bytes();
    let (negative, rest) = split_sign(s);
    let digits = rest.iter().take_while(|b| b.is_ascii_digit()).count();
    if digits == 0 {
        return None;
    }

    let mut value: i64 = 0;
    for &b in &rest[..digits] {
        let d = i64::from(b - b'0');
        value = if negative {
            value.saturating_mul(10).saturating_sub(d)
        } else {
            value.saturating_mul(10).saturating_add(d)
        };
    }
    Some(value)
}

/// Reads the longest decimal floating-point prefix after leading whitespace:
/// sign, digits, optional fraction, optional exponent, or `inf`/`infinity`/`nan`.
pub fn parse_leading_float(text: &str) -> Option<f64> {
    let s = text.trim_start();
    let bytes = s.as_bytes();
    let (_, rest) = split_sign(bytes);
    let sign_len = bytes.len() - rest.len();

    if let Some(special) = special_float_len(rest) {
        return s[..sign_len + special].parse::<f64>().ok();
    }

    let mut end = sign_len;
    let int_digits = count_digits(&bytes[end..]);
    end += int_digits;

    let mut frac_digits = 0;
    if bytes.get(end) == Some(&b'.') {
        frac_digits = count_digits(&bytes[end + 1..]);
        if int_digits > 0 || frac_digits > 0 {
            end += 1 + frac_digits;
        }
    }
    if int_digits == 0 && frac_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e') | Some(b'E')) {
        let (_, exp_rest) = split_sign(&bytes[end + 1..]);
        let exp_sign_len = bytes.len() - (end + 1) - exp_rest.len();
        let exp_digits = count_digits(exp_rest);
        if exp_digits > 0 {
            end += 1 + exp_sign_len + exp_digits;
        }
    }

    s[..end].parse::<f64>().ok()
}

fn split_sign(bytes: &[u8]) -> (bool, &[u8]) {
    match bytes.first() {
        Some(b'-') => (true, &bytes[1..]),
        Some(b'+') => (false, &bytes[1..]),
        _ => (false, bytes),
    }
}

fn count_digits(bytes: &[u8]) -> usize {
    bytes.iter().take_while(|b| b.is_ascii_digit()).count()
}

fn special_float_len(bytes: &[u8]) -> Option<usize> {
    ["infinity", "inf", "nan"].iter().find_map(|word| {
        let n = word.len();
        (bytes.len() >= n && bytes[..n].eq_ignore_ascii_case(word.as_bytes())).then_some(n)
    })
}
