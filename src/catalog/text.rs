//! String utilities.

use fuzzgate_core::fuzz::{CallResult, Thrown, Value};

use super::Module;

/// Longest string `repeat` will build, in bytes.
const MAX_REPEAT_BYTES: usize = 1 << 20;

pub fn module() -> Module {
    Module::new("text", "string utilities")
        .export("slugify", Value::function("slugify", 1, slugify))
        .export("word_count", Value::function("word_count", 1, word_count))
        .export("truncate", Value::function("truncate", 2, truncate))
        .export("repeat", Value::function("repeat", 2, repeat))
}

fn arg(args: &[Value], index: usize) -> Value {
    args.get(index).cloned().unwrap_or(Value::Undefined)
}

fn expect_text(function: &str, value: &Value) -> Result<String, Thrown> {
    value.as_str().map(str::to_string).ok_or_else(|| {
        Thrown::type_error(format!(
            "{function} expects a string, got {}",
            value.type_name()
        ))
    })
}

fn expect_count(value: &Value) -> Result<usize, Thrown> {
    match value.as_f64() {
        Some(n) if n.is_finite() && n >= 0.0 => Ok(n as usize),
        _ => Err(Thrown::range_error(format!("Invalid count value: {value}"))),
    }
}

fn slugify(args: &[Value]) -> CallResult {
    let source = expect_text("slugify", &arg(args, 0))?;
    let mut slug = String::with_capacity(source.len());
    for c in source.chars().flat_map(char::to_lowercase) {
        if c.is_alphanumeric() {
            slug.push(c);
        } else if !slug.is_empty() && !slug.ends_with('-') {
            slug.push('-');
        }
    }
    while slug.ends_with('-') {
        slug.pop();
    }
    Ok(Value::text(slug))
}

/// Whitespace-separated words; non-strings count as zero.
fn word_count(args: &[Value]) -> CallResult {
    let count = arg(args, 0)
        .as_str()
        .map_or(0, |s| s.split_whitespace().count());
    Ok(Value::Int(count as i64))
}

/// First `n` characters of a string.
fn truncate(args: &[Value]) -> CallResult {
    let source = expect_text("truncate", &arg(args, 0))?;
    let limit = expect_count(&arg(args, 1))?;
    Ok(Value::text(source.chars().take(limit).collect::<String>()))
}

fn repeat(args: &[Value]) -> CallResult {
    let source = expect_text("repeat", &arg(args, 0))?;
    let count = expect_count(&arg(args, 1))?;
    match source.len().checked_mul(count) {
        Some(total) if total <= MAX_REPEAT_BYTES => Ok(Value::text(source.repeat(count))),
        _ => Err(Thrown::range_error("Invalid string length")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text_of(result: CallResult) -> String {
        result.unwrap().as_str().unwrap_or_default().to_string()
    }

    #[test]
    fn test_slugify() {
        assert_eq!(text_of(slugify(&[Value::text("  Hello, World!  ")])), "hello-world");
        assert_eq!(text_of(slugify(&[Value::text("../../etc")])), "etc");
        assert_eq!(
            slugify(&[Value::Int(1)]).unwrap_err().message(),
            "slugify expects a string, got number"
        );
    }

    #[test]
    fn test_truncate_is_char_safe() {
        let s = Value::text("\u{1F4A9}\u{1F4A9}\u{1F4A9}");
        assert_eq!(text_of(truncate(&[s, Value::Int(2)])), "\u{1F4A9}\u{1F4A9}");
        let err = truncate(&[Value::text("abc"), Value::Float(f64::NAN)]).unwrap_err();
        assert_eq!(err.name(), Some("RangeError"));
    }

    #[test]
    fn test_repeat_guards_length() {
        assert_eq!(text_of(repeat(&[Value::text("ab"), Value::Int(3)])), "ababab");
        let err = repeat(&[Value::text("a".repeat(100)), Value::Int(1 << 32)]).unwrap_err();
        assert_eq!(err.message(), "Invalid string length");
        let err = repeat(&[Value::text("a"), Value::Int(-1)]).unwrap_err();
        assert_eq!(err.message(), "Invalid count value: -1");
    }

    #[test]
    fn test_word_count() {
        assert!(word_count(&[Value::text("one two\nthree")])
            .unwrap()
            .same_value(&Value::Int(3)));
        assert!(word_count(&[Value::Null]).unwrap().same_value(&Value::Int(0)));
    }
}
