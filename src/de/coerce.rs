//! Optional conversion of decoded string values into richer scalars.
//!
//! The literal words are looked up in a fixed table. Anything else becomes a
//! number only if it is the exact text an ECMAScript engine would print for
//! that number, so `"1234"` and `"0.5"` convert while `"01"`, `"1.0"`, `"+1"`
//! and `"999999999999999999"` (which loses precision) stay strings.

use std::borrow::Cow;

use crate::Value;

static COERCE_TYPES: [(&str, Value); 4] = [
    ("undefined", Value::Undefined),
    ("true", Value::Bool(true)),
    ("false", Value::Bool(false)),
    ("null", Value::Null),
];

/// Integral values below this bound are printed without an exponent.
const EXPONENT_THRESHOLD: f64 = 1e21;

pub fn coerce(value: Cow<'_, str>) -> Value {
    if let Some((_, coerced)) = COERCE_TYPES.iter().find(|(word, _)| *word == value) {
        return coerced.clone();
    }
    match parse_number(&value) {
        Some(n) => Value::Number(n),
        None => Value::String(value.into_owned()),
    }
}

/// Parses `s` as a finite number that prints back to exactly `s`.
pub fn parse_number(s: &str) -> Option<f64> {
    let n = s.parse::<f64>().ok().filter(|n| n.is_finite())?;
    (format_number(n) == s).then_some(n)
}

/// Formats a finite number the way ECMAScript's `Number::toString` does.
pub fn format_number(n: f64) -> String {
    if n == 0.0 {
        // covers -0
        return "0".to_owned();
    }
    if n < 0.0 {
        return format!("-{}", format_number(-n));
    }
    if n.fract() == 0.0 && n < EXPONENT_THRESHOLD {
        // exact: every integral f64 below 1e21 fits in a u128
        let mut buffer = itoa::Buffer::new();
        return buffer.format(n as u128).to_owned();
    }

    let (digits, point) = shortest_digits(n);
    let k = digits.len() as i32;
    let mut out = String::with_capacity(digits.len() + 8);
    if k <= point && point <= 21 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', (point - k) as usize));
    } else if 0 < point && point <= 21 {
        out.push_str(&digits[..point as usize]);
        out.push('.');
        out.push_str(&digits[point as usize..]);
    } else if -6 < point && point <= 0 {
        out.push_str("0.");
        out.extend(std::iter::repeat_n('0', (-point) as usize));
        out.push_str(&digits);
    } else {
        let exponent = point - 1;
        out.push_str(&digits[..1]);
        if k > 1 {
            out.push('.');
            out.push_str(&digits[1..]);
        }
        out.push('e');
        out.push(if exponent < 0 { '-' } else { '+' });
        let mut buffer = itoa::Buffer::new();
        out.push_str(buffer.format(exponent.unsigned_abs()));
    }
    out
}

/// Returns the shortest round-tripping decimal digits of a positive finite
/// `n`, without leading or trailing zeros, together with the position of the
/// decimal point: `n == 0.<digits> * 10^point`.
fn shortest_digits(n: f64) -> (String, i32) {
    let mut buffer = ryu::Buffer::new();
    let printed = buffer.format_finite(n);

    let (mantissa, exponent) = match printed.split_once('e') {
        Some((mantissa, exponent)) => (mantissa, exponent.parse::<i32>().unwrap_or(0)),
        None => (printed, 0),
    };
    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));

    let mut point = int_part.len() as i32 + exponent;
    let all_digits = format!("{int_part}{frac_part}");
    let trimmed_leading = all_digits.trim_start_matches('0');
    point -= (all_digits.len() - trimmed_leading.len()) as i32;
    let digits = trimmed_leading.trim_end_matches('0').to_owned();

    (digits, point)
}
