//! printf-style template rendering
//!
//! Supports `%[flags][width][.precision]conversion` with flags `-0+ ` and
//! conversions `s d i u x X o f e c`, plus `%%`. Arguments are consumed left to
//! right and every argument must be used.

use crate::greeting::error::{GreetingError, GreetingResult};
use regex::{Captures, Regex};
use std::sync::LazyLock;

/// Largest accepted width or precision
pub const MAX_FIELD_WIDTH: usize = 4096;

static SPECIFIER: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"%(?P<flags>[-0+ ]*)(?P<width>\d+)?(?:\.(?P<precision>\d+))?(?P<conv>.?)")
        .expect("format specifier pattern is valid")
});

/// One positional argument for [`render`]
#[derive(Debug, Clone, PartialEq)]
pub enum FormatArg {
    Str(String),
    Int(i64),
    Float(f64),
    Char(char),
}

impl FormatArg {
    fn as_int(&self) -> Option<i64> {
        match self {
            FormatArg::Int(n) => Some(*n),
            FormatArg::Char(c) => Some(*c as i64),
            FormatArg::Str(s) => s.trim().parse().ok(),
            FormatArg::Float(_) => None,
        }
    }

    fn as_float(&self) -> Option<f64> {
        match self {
            FormatArg::Float(f) => Some(*f),
            FormatArg::Int(n) => Some(*n as f64),
            FormatArg::Str(s) => s.trim().parse().ok(),
            FormatArg::Char(_) => None,
        }
    }

    fn as_char(&self) -> Option<char> {
        match self {
            FormatArg::Char(c) => Some(*c),
            FormatArg::Int(n) => u32::try_from(*n).ok().and_then(char::from_u32),
            FormatArg::Str(s) => {
                let mut chars = s.chars();
                match (chars.next(), chars.next()) {
                    (Some(c), None) => Some(c),
                    _ => None,
                }
            }
            FormatArg::Float(_) => None,
        }
    }
}

impl std::fmt::Display for FormatArg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormatArg::Str(s) => f.write_str(s),
            FormatArg::Int(n) => write!(f, "{}", n),
            FormatArg::Float(x) => write!(f, "{}", x),
            FormatArg::Char(c) => write!(f, "{}", c),
        }
    }
}

impl From<&str> for FormatArg {
    fn from(value: &str) -> Self {
        FormatArg::Str(value.to_string())
    }
}

impl From<String> for FormatArg {
    fn from(value: String) -> Self {
        FormatArg::Str(value)
    }
}

impl From<i64> for FormatArg {
    fn from(value: i64) -> Self {
        FormatArg::Int(value)
    }
}

impl From<i32> for FormatArg {
    fn from(value: i32) -> Self {
        FormatArg::Int(value.into())
    }
}

impl From<f64> for FormatArg {
    fn from(value: f64) -> Self {
        FormatArg::Float(value)
    }
}

impl From<char> for FormatArg {
    fn from(value: char) -> Self {
        FormatArg::Char(value)
    }
}

#[derive(Debug, Default)]
struct Spec {
    left_align: bool,
    zero_pad: bool,
    plus_sign: bool,
    space_sign: bool,
    width: usize,
    precision: Option<usize>,
}

impl Spec {
    fn from_captures(caps: &Captures<'_>) -> GreetingResult<Self> {
        let flags = caps.name("flags").map_or("", |m| m.as_str());
        let parse_num = |name: &str| -> GreetingResult<Option<usize>> {
            caps.name(name)
                .map(|m| match m.as_str().parse::<usize>() {
                    Ok(n) if n <= MAX_FIELD_WIDTH => Ok(n),
                    _ => Err(GreetingError::Format {
                        message: format!(
                            "{} '{}' exceeds the limit of {}",
                            name,
                            m.as_str(),
                            MAX_FIELD_WIDTH
                        ),
                    }),
                })
                .transpose()
        };
        Ok(Self {
            left_align: flags.contains('-'),
            zero_pad: flags.contains('0'),
            plus_sign: flags.contains('+'),
            space_sign: flags.contains(' '),
            width: parse_num("width")?.unwrap_or(0),
            precision: parse_num("precision")?,
        })
    }

    fn sign_prefix(&self, negative: bool) -> &'static str {
        if negative {
            "-"
        } else if self.plus_sign {
            "+"
        } else if self.space_sign {
            " "
        } else {
            ""
        }
    }

    /// Pad a rendered numeric body, keeping the sign ahead of zero padding
    fn pad_number(&self, sign: &str, digits: &str) -> String {
        let len = sign.chars().count() + digits.chars().count();
        if len >= self.width {
            return format!("{}{}", sign, digits);
        }
        let fill = self.width - len;
        if self.left_align {
            format!("{}{}{}", sign, digits, " ".repeat(fill))
        } else if self.zero_pad {
            format!("{}{}{}", sign, "0".repeat(fill), digits)
        } else {
            format!("{}{}{}", " ".repeat(fill), sign, digits)
        }
    }

    fn pad_text(&self, text: &str) -> String {
        let len = text.chars().count();
        if len >= self.width {
            return text.to_string();
        }
        let fill = " ".repeat(self.width - len);
        if self.left_align {
            format!("{}{}", text, fill)
        } else {
            format!("{}{}", fill, text)
        }
    }
}

/// Render `template` with positional `args`.
///
/// Fails with an `InvalidConfig`-class error on unknown conversions, missing
/// or surplus arguments, and arguments that do not fit their conversion.
pub fn render(template: &str, args: &[FormatArg]) -> GreetingResult<String> {
    let mut output = String::with_capacity(template.len());
    let mut remaining = args.iter().enumerate();
    let mut last = 0;

    for caps in SPECIFIER.captures_iter(template) {
        let whole = caps.get(0).expect("capture group 0 always present");
        output.push_str(&template[last..whole.start()]);
        last = whole.end();

        let conv = caps.name("conv").map_or("", |m| m.as_str());
        if conv == "%" {
            output.push('%');
            continue;
        }
        if conv.is_empty() {
            return Err(format_error("template ends with a dangling '%'"));
        }

        let spec = Spec::from_captures(&caps)?;
        let (position, arg) = remaining.next().ok_or_else(|| {
            format_error(format!("missing argument for '{}'", whole.as_str()))
        })?;
        output.push_str(&convert(&spec, conv, position, arg)?);
    }
    output.push_str(&template[last..]);

    let surplus = remaining.count();
    if surplus > 0 {
        return Err(format_error(format!(
            "{} argument(s) not used by the template",
            surplus
        )));
    }
    Ok(output)
}

fn convert(spec: &Spec, conv: &str, position: usize, arg: &FormatArg) -> GreetingResult<String> {
    let mismatch = |expected: &str| {
        format_error(format!(
            "argument {} ('{}') is not {} for '%{}'",
            position + 1,
            arg,
            expected,
            conv
        ))
    };

    let rendered = match conv {
        "s" => {
            let text = arg.to_string();
            let text = match spec.precision {
                Some(max) => text.chars().take(max).collect(),
                None => text,
            };
            spec.pad_text(&text)
        }
        "c" => {
            let c = arg.as_char().ok_or_else(|| mismatch("a character"))?;
            spec.pad_text(&c.to_string())
        }
        "d" | "i" => {
            let n = arg.as_int().ok_or_else(|| mismatch("an integer"))?;
            let digits = apply_int_precision(spec, n.unsigned_abs().to_string());
            spec.pad_number(spec.sign_prefix(n < 0), &digits)
        }
        "u" | "x" | "X" | "o" => {
            let n = arg.as_int().ok_or_else(|| mismatch("an integer"))?;
            // Negative values wrap like an unsigned 64-bit reinterpretation
            let unsigned = n as u64;
            let digits = match conv {
                "u" => unsigned.to_string(),
                "x" => format!("{:x}", unsigned),
                "X" => format!("{:X}", unsigned),
                _ => format!("{:o}", unsigned),
            };
            spec.pad_number("", &apply_int_precision(spec, digits))
        }
        "f" | "e" => {
            let x = arg.as_float().ok_or_else(|| mismatch("a number"))?;
            let precision = spec.precision.unwrap_or(6);
            let body = if conv == "f" {
                format!("{:.*}", precision, x.abs())
            } else {
                c_exponent(x.abs(), precision)
            };
            spec.pad_number(spec.sign_prefix(x.is_sign_negative() && x != 0.0), &body)
        }
        other => {
            return Err(format_error(format!("unsupported conversion '%{}'", other)));
        }
    };
    Ok(rendered)
}

fn apply_int_precision(spec: &Spec, digits: String) -> String {
    match spec.precision {
        Some(min) if digits.len() < min => format!("{}{}", "0".repeat(min - digits.len()), digits),
        _ => digits,
    }
}

/// Rust renders `1.5e2`; C renders `1.500000e+02`
fn c_exponent(x: f64, precision: usize) -> String {
    let rendered = format!("{:.*e}", precision, x);
    match rendered.split_once('e') {
        Some((mantissa, exponent)) => {
            let (sign, digits) = match exponent.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exponent),
            };
            format!("{}e{}{:0>2}", mantissa, sign, digits)
        }
        None => rendered,
    }
}

fn format_error(message: impl Into<String>) -> GreetingError {
    GreetingError::Format {
        message: message.into(),
    }
}
