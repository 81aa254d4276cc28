//! Format-string interpretation for placeholder values.
//!
//! Placeholders carry an optional format after a colon (`%date:s%`,
//! `%timeSinceStartup:F1%`). Because a `%` closes the placeholder, strftime
//! patterns can't be written inside a template; instead formats follow the
//! conventions editors built on .NET expose to their users:
//!
//! - **Dates**: single-letter standard formats (`s`, `u`, `o`, `G`, ...) or
//!   custom patterns such as `yyyy-MM-dd HH:mm:ss`
//! - **Numbers**: standard formats (`F2`, `N0`, `E3`, `P1`, `D8`, `X`) or
//!   custom digit patterns such as `0.00` and `#.##`
//!
//! Anything that can't be interpreted is reported as a [`FormatError`], which
//! the template formatter turns into the literal placeholder text.
//!
//! ## Examples
//!
//! ```rust
//! use time_tracker::libs::formats::{format_float, format_integer};
//!
//! assert_eq!(format_float(12.3456, "F2").unwrap(), "12.35");
//! assert_eq!(format_integer(255, "X4").unwrap(), "00FF");
//! assert!(format_float(1.0, "Q").is_err());
//! ```

use chrono::{DateTime, Datelike, Offset, TimeZone, Timelike, Utc};
use thiserror::Error;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = ["Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday"];

/// Errors raised while interpreting a placeholder format string.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormatError {
    #[error("unknown standard format specifier '{0}'")]
    UnknownSpecifier(char),
    #[error("invalid precision in format '{0}'")]
    InvalidPrecision(String),
    #[error("unsupported format pattern '{0}'")]
    Unsupported(String),
    #[error("unterminated quoted literal in format '{0}'")]
    UnterminatedLiteral(String),
}

/// Formats a timestamp with a standard or custom date format.
///
/// An empty format uses the general `G` pattern (`MM/dd/yyyy HH:mm:ss`).
/// Formats `u`, `r` and `R` render the instant in UTC, all others keep the
/// timestamp's own offset.
pub fn format_date<Tz: TimeZone>(dt: &DateTime<Tz>, format: &str) -> Result<String, FormatError> {
    let mut chars = format.chars();
    let pattern = match (chars.next(), chars.next()) {
        (None, _) => "MM/dd/yyyy HH:mm:ss",
        (Some(spec), None) => match spec {
            'd' => "MM/dd/yyyy",
            'D' => "dddd, dd MMMM yyyy",
            't' => "HH:mm",
            'T' => "HH:mm:ss",
            'f' => "dddd, dd MMMM yyyy HH:mm",
            'F' => "dddd, dd MMMM yyyy HH:mm:ss",
            'g' => "MM/dd/yyyy HH:mm",
            'G' => "MM/dd/yyyy HH:mm:ss",
            's' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss",
            'o' | 'O' => "yyyy'-'MM'-'dd'T'HH':'mm':'ss'.'fffffffzzz",
            'M' | 'm' => "MMMM dd",
            'Y' | 'y' => "yyyy MMMM",
            'u' => return format_custom(&dt.with_timezone(&Utc), "yyyy'-'MM'-'dd HH':'mm':'ss'Z'"),
            'r' | 'R' => return format_custom(&dt.with_timezone(&Utc), "ddd, dd MMM yyyy HH':'mm':'ss 'GMT'"),
            other => return Err(FormatError::UnknownSpecifier(other)),
        },
        _ => format,
    };
    format_custom(dt, pattern)
}

fn format_custom<Tz: TimeZone>(dt: &DateTime<Tz>, pattern: &str) -> Result<String, FormatError> {
    let chars: Vec<char> = pattern.chars().collect();
    let mut out = String::with_capacity(pattern.len() * 2);
    let mut i = 0;

    while i < chars.len() {
        let c = chars[i];
        let run = chars[i..].iter().take_while(|&&x| x == c).count();

        match c {
            'y' => {
                let year = dt.year();
                match run {
                    1 => out.push_str(&(year % 100).to_string()),
                    2 => out.push_str(&format!("{:02}", year % 100)),
                    n => out.push_str(&format!("{:0width$}", year, width = n)),
                }
            }
            'M' => {
                let month = dt.month();
                match run {
                    1 => out.push_str(&month.to_string()),
                    2 => out.push_str(&format!("{:02}", month)),
                    3 => out.push_str(&MONTHS[month as usize - 1][..3]),
                    _ => out.push_str(MONTHS[month as usize - 1]),
                }
            }
            'd' => match run {
                1 => out.push_str(&dt.day().to_string()),
                2 => out.push_str(&format!("{:02}", dt.day())),
                3 => out.push_str(&WEEKDAYS[dt.weekday().num_days_from_monday() as usize][..3]),
                _ => out.push_str(WEEKDAYS[dt.weekday().num_days_from_monday() as usize]),
            },
            'H' => push_padded(&mut out, dt.hour(), run),
            'h' => push_padded(&mut out, dt.hour12().1, run),
            'm' => push_padded(&mut out, dt.minute(), run),
            's' => push_padded(&mut out, dt.second(), run),
            'f' | 'F' => {
                if run > 7 {
                    return Err(FormatError::Unsupported(pattern.to_string()));
                }
                // Leap seconds are folded into the last second.
                let nanos = dt.nanosecond() % 1_000_000_000;
                let digits = format!("{:09}", nanos);
                let fraction = &digits[..run];
                if c == 'f' {
                    out.push_str(fraction);
                } else {
                    out.push_str(fraction.trim_end_matches('0'));
                }
            }
            't' => {
                let designator = if dt.hour12().0 { "PM" } else { "AM" };
                out.push_str(if run == 1 { &designator[..1] } else { designator });
            }
            'z' | 'K' => {
                let offset = dt.offset().fix().local_minus_utc();
                let sign = if offset < 0 { '-' } else { '+' };
                let hours = offset.abs() / 3600;
                let minutes = (offset.abs() % 3600) / 60;
                match (c, run) {
                    ('z', 1) => out.push_str(&format!("{}{}", sign, hours)),
                    ('z', 2) => out.push_str(&format!("{}{:02}", sign, hours)),
                    _ => out.push_str(&format!("{}{:02}:{:02}", sign, hours, minutes)),
                }
            }
            'g' => out.push_str("A.D."),
            '\'' | '"' => {
                let close = chars[i + 1..]
                    .iter()
                    .position(|&x| x == c)
                    .ok_or_else(|| FormatError::UnterminatedLiteral(pattern.to_string()))?;
                out.extend(&chars[i + 1..i + 1 + close]);
                i += close + 2;
                continue;
            }
            '\\' => {
                let escaped = chars
                    .get(i + 1)
                    .ok_or_else(|| FormatError::Unsupported(pattern.to_string()))?;
                out.push(*escaped);
                i += 2;
                continue;
            }
            other => {
                out.extend(std::iter::repeat(other).take(run));
            }
        }

        i += run;
    }

    Ok(out)
}

fn push_padded(out: &mut String, value: u32, run: usize) {
    if run == 1 {
        out.push_str(&value.to_string());
    } else {
        out.push_str(&format!("{:02}", value));
    }
}

/// Formats a floating point value with a standard or custom numeric format.
pub fn format_float(value: f64, format: &str) -> Result<String, FormatError> {
    if format.is_empty() {
        return Ok(value.to_string());
    }
    if is_custom_pattern(format) {
        return format_custom_number(value, format);
    }

    let (spec, precision) = split_standard(format)?;
    match spec {
        'G' | 'g' => match precision {
            None | Some(0) => Ok(value.to_string()),
            Some(digits) => Ok(significant(value, digits)),
        },
        'R' | 'r' => Ok(value.to_string()),
        'F' | 'f' => Ok(format!("{:.*}", precision.unwrap_or(2), value)),
        'N' | 'n' => Ok(group_number(&format!("{:.*}", precision.unwrap_or(2), value))),
        'P' | 'p' => Ok(format!("{} %", group_number(&format!("{:.*}", precision.unwrap_or(2), value * 100.0)))),
        'E' | 'e' => {
            let raw = format!("{:.*e}", precision.unwrap_or(6), value);
            let (mantissa, exponent) = raw
                .split_once('e')
                .ok_or_else(|| FormatError::Unsupported(format.to_string()))?;
            let exponent: i32 = exponent
                .parse()
                .map_err(|_| FormatError::Unsupported(format.to_string()))?;
            let sign = if exponent < 0 { '-' } else { '+' };
            Ok(format!("{}{}{}{:03}", mantissa, spec, sign, exponent.abs()))
        }
        other => Err(FormatError::UnknownSpecifier(other)),
    }
}

/// Formats an integer value with a standard or custom numeric format.
///
/// `G`, `D` and `X` are integer specific; every other format is handled the
/// same way as for floating point values.
pub fn format_integer(value: i64, format: &str) -> Result<String, FormatError> {
    if format.is_empty() {
        return Ok(value.to_string());
    }
    if is_custom_pattern(format) {
        return format_custom_number(value as f64, format);
    }

    let (spec, precision) = split_standard(format)?;
    let width = precision.unwrap_or(0);
    match spec {
        'G' | 'g' => Ok(value.to_string()),
        'D' | 'd' => {
            let digits = format!("{:0width$}", value.unsigned_abs(), width = width);
            Ok(if value < 0 { format!("-{}", digits) } else { digits })
        }
        'X' => Ok(format!("{:0width$X}", value, width = width)),
        'x' => Ok(format!("{:0width$x}", value, width = width)),
        _ => format_float(value as f64, format),
    }
}

fn split_standard(format: &str) -> Result<(char, Option<usize>), FormatError> {
    let mut chars = format.chars();
    let spec = chars
        .next()
        .ok_or_else(|| FormatError::Unsupported(format.to_string()))?;
    if !spec.is_ascii_alphabetic() {
        return Err(FormatError::Unsupported(format.to_string()));
    }

    let rest = chars.as_str();
    if rest.is_empty() {
        return Ok((spec, None));
    }
    match rest.parse::<usize>() {
        Ok(precision) if precision <= 99 && rest.chars().all(|c| c.is_ascii_digit()) => Ok((spec, Some(precision))),
        _ => Err(FormatError::InvalidPrecision(format.to_string())),
    }
}

fn is_custom_pattern(format: &str) -> bool {
    format.chars().all(|c| matches!(c, '0' | '#' | '.' | ','))
}

fn format_custom_number(value: f64, format: &str) -> Result<String, FormatError> {
    let (int_pattern, frac_pattern) = match format.split_once('.') {
        Some((int, frac)) if !frac.contains('.') => (int, frac),
        Some(_) => return Err(FormatError::Unsupported(format.to_string())),
        None => (format, ""),
    };

    let grouped = int_pattern.contains(',');
    let min_int = int_pattern.chars().filter(|&c| c == '0').count();
    let min_frac = frac_pattern.chars().take_while(|&c| c == '0').count();
    let max_frac = frac_pattern.chars().filter(|&c| c == '0' || c == '#').count();

    let rendered = format!("{:.*}", max_frac, value.abs());
    let (int_digits, frac_digits) = rendered.split_once('.').unwrap_or((&rendered, ""));

    let mut frac = frac_digits.to_string();
    while frac.len() > min_frac && frac.ends_with('0') {
        frac.pop();
    }

    let mut int = if int_digits == "0" && min_int == 0 {
        String::new()
    } else {
        format!("{:0>width$}", int_digits, width = min_int)
    };
    if grouped && !int.is_empty() {
        int = group_number(&int);
    }

    let mut out = String::new();
    if value < 0.0 && (int.chars().any(|c| c != '0' && c != ',') || frac.chars().any(|c| c != '0')) {
        out.push('-');
    }
    out.push_str(&int);
    if !frac.is_empty() {
        out.push('.');
        out.push_str(&frac);
    }
    if out.is_empty() || out == "-" {
        out = "0".to_string();
    }
    Ok(out)
}

/// Inserts `,` thousands separators into the integer part of a plain decimal string.
fn group_number(plain: &str) -> String {
    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain),
    };
    let (int, frac) = match unsigned.split_once('.') {
        Some((int, frac)) => (int, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (index, digit) in int.chars().enumerate() {
        if index > 0 && (int.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    match frac {
        Some(frac) => format!("{}{}.{}", sign, grouped, frac),
        None => format!("{}{}", sign, grouped),
    }
}

fn significant(value: f64, digits: usize) -> String {
    if value == 0.0 || !value.is_finite() {
        return value.to_string();
    }
    let magnitude = value.abs().log10().floor() as i64;
    let decimals = (digits as i64 - 1 - magnitude).max(0) as usize;
    let rendered = format!("{:.*}", decimals, value);
    if rendered.contains('.') {
        rendered.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rendered
    }
}
