//! printf-style text formatting.
//!
//! Templates are tokenized with nom into literal runs and directives:
//!
//! | Directive | Meaning |
//! |-----------|---------|
//! | `%s` | String form of the argument |
//! | `%d` | Numeric form of the argument (`NaN` when not numeric) |
//! | `%j` | JSON encoding of the argument |
//! | `%%` | A literal `%` |
//!
//! Directives consume arguments left to right. A directive with no argument
//! left is emitted verbatim; arguments left over after the template are
//! appended, space-separated.

use nom::{
    branch::alt,
    bytes::complete::{tag, take_till1},
    character::complete::char,
    combinator::{all_consuming, map, recognize, value},
    multi::many0,
    IResult,
};
use serde_json::Value;

use crate::value::format_number;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Directive {
    String,
    Number,
    Json,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Token<'a> {
    Literal(&'a str),
    Percent,
    Directive(Directive, &'a str),
}

fn token(input: &str) -> IResult<&str, Token<'_>> {
    alt((
        value(Token::Percent, tag("%%")),
        map(tag("%s"), |t| Token::Directive(Directive::String, t)),
        map(tag("%d"), |t| Token::Directive(Directive::Number, t)),
        map(tag("%j"), |t| Token::Directive(Directive::Json, t)),
        map(take_till1(|c| c == '%'), Token::Literal),
        // stray `%` not starting a directive
        map(recognize(char('%')), Token::Literal),
    ))(input)
}

fn tokenize(template: &str) -> Vec<Token<'_>> {
    match all_consuming(many0(token))(template) {
        Ok((_, tokens)) => tokens,
        Err(_) => vec![Token::Literal(template)],
    }
}

/// Formats `template`, substituting directives with `args` in order.
///
/// ```rust
/// use most_query::text::format;
/// use serde_json::json;
///
/// assert_eq!(format("%s(%s)", &[json!("tolower"), json!("name")]), "tolower(name)");
/// assert_eq!(format("%d%%", &[json!("42")]), "42%");
/// assert_eq!(format("%s and %s", &[json!(1)]), "1 and %s");
/// assert_eq!(format("%j", &[json!({"a": 1}), json!("extra")]), r#"{"a":1} extra"#);
/// ```
pub fn format(template: &str, args: &[Value]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut remaining = args.iter();

    for token in tokenize(template) {
        match token {
            Token::Literal(text) => out.push_str(text),
            Token::Percent => out.push('%'),
            Token::Directive(directive, text) => match remaining.next() {
                Some(arg) => out.push_str(&render(directive, arg)),
                None => out.push_str(text),
            },
        }
    }

    for arg in remaining {
        out.push(' ');
        if is_primitive(arg) {
            out.push_str(&stringify(arg));
        } else {
            out.push_str(&arg.to_string());
        }
    }
    out
}

/// Formats a list of values whose first element may be a template.
///
/// When the first value is a string it is used as the template for the
/// rest; otherwise every value is JSON-encoded and the results are joined
/// with spaces.
pub fn format_values(values: &[Value]) -> String {
    match values.split_first() {
        Some((Value::String(template), rest)) => format(template, rest),
        _ => values
            .iter()
            .map(Value::to_string)
            .collect::<Vec<_>>()
            .join(" "),
    }
}

fn render(directive: Directive, arg: &Value) -> String {
    match directive {
        Directive::String => stringify(arg),
        Directive::Number => numeric(arg),
        Directive::Json => arg.to_string(),
    }
}

fn is_primitive(value: &Value) -> bool {
    !matches!(value, Value::Array(_) | Value::Object(_))
}

fn stringify(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => render_number(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items.iter().map(stringify).collect::<Vec<_>>().join(","),
        Value::Object(_) => value.to_string(),
    }
}

/// Integers render exactly; only floats go through the float formatting.
fn render_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() => format_number(f),
        _ => n.to_string(),
    }
}

fn numeric(value: &Value) -> String {
    let n = match value {
        Value::Null => 0.0,
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::Number(n) => return render_number(n),
        Value::String(s) => {
            let s = s.trim();
            if s.is_empty() {
                0.0
            } else {
                s.parse::<f64>().unwrap_or(f64::NAN)
            }
        }
        Value::Array(_) | Value::Object(_) => f64::NAN,
    };
    format_number(n)
}
