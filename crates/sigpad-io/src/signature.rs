//! Signature JSON reader and writer.
//!
//! A signature is a JSON array of line objects:
//!
//! ```json
//! [{"lx": 20, "ly": 34, "mx": 20, "my": 34}, {"lx": 21, "ly": 33, "mx": 20, "my": 34}]
//! ```
//!
//! `lx`/`ly` is the start of a line and `mx`/`my` its end. Any key may be
//! missing and then counts as 0; values that are not numbers are coerced
//! (`true` is 1, `"12px"` is 12, `"abc"` is 0). Payloads that went through a form layer
//! often arrive backslash-escaped (`[{\"lx\":20}]`); the escaping is
//! removed before decoding.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use thiserror::Error;

use sigpad_core::Segment;

#[derive(Error, Debug)]
pub enum SignatureError {
    #[error("Invalid signature JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Signature must be a JSON array of lines")]
    NotAnArray,

    #[error("Line {index} is not an object")]
    InvalidLine { index: usize },
}

/// One line as it appears on the wire.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SegmentRecord {
    #[serde(deserialize_with = "lenient_number")]
    pub lx: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub ly: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub mx: f64,
    #[serde(deserialize_with = "lenient_number")]
    pub my: f64,
}

impl From<SegmentRecord> for Segment {
    fn from(r: SegmentRecord) -> Self {
        Segment::new(r.lx, r.ly, r.mx, r.my)
    }
}

impl From<Segment> for SegmentRecord {
    fn from(s: Segment) -> Self {
        Self {
            lx: s.start_x,
            ly: s.start_y,
            mx: s.end_x,
            my: s.end_y,
        }
    }
}

/// Coerce a coordinate the way a loosely typed form backend would: numbers
/// as-is, `true`/`false` as 1/0, `null` as 0, and strings by their leading
/// numeric prefix (`"12px"` is 12). Anything else becomes 0.
fn lenient_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match &value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::Bool(b) => f64::from(u8::from(*b)),
        Value::String(s) => match numeric_prefix(s) {
            Some((v, rest)) => {
                if !rest.trim().is_empty() {
                    log::warn!("Coordinate {:?} has trailing characters, using {}", s, v);
                }
                v
            }
            None => {
                log::warn!("Non-numeric coordinate {:?}, using 0", s);
                0.0
            }
        },
        Value::Null => 0.0,
        other => {
            log::warn!("Unexpected coordinate value {}, using 0", other);
            0.0
        }
    })
}

/// Parse the longest decimal number at the start of `s` (after leading
/// whitespace) and return it with the unparsed remainder.
fn numeric_prefix(s: &str) -> Option<(f64, &str)> {
    let s = s.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }
    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;
    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - end - 1;
        end = frac_end;
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    let value = s[..end].parse::<f64>().ok()?;
    Some((value, &s[end..]))
}

/// Remove one level of backslash escaping: `\x` becomes `x`, `\\` becomes `\`.
pub fn strip_slashes(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut chars = input.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            if let Some(next) = chars.next() {
                out.push(if next == '0' { '\0' } else { next });
            }
        } else {
            out.push(c);
        }
    }
    out
}

/// Decode a signature into segments, in drawing order.
pub fn parse_signature(json: &str) -> Result<Vec<Segment>, SignatureError> {
    let unescaped = strip_slashes(json);
    let value: Value = serde_json::from_str(&unescaped)?;
    let Value::Array(lines) = value else {
        return Err(SignatureError::NotAnArray);
    };

    let mut segments = Vec::with_capacity(lines.len());
    for (index, line) in lines.into_iter().enumerate() {
        if !line.is_object() {
            return Err(SignatureError::InvalidLine { index });
        }
        let record: SegmentRecord = serde_json::from_value(line)?;
        segments.push(record.into());
    }

    log::debug!("Parsed signature with {} segments", segments.len());
    Ok(segments)
}

/// Encode segments in the same wire format [`parse_signature`] reads.
pub fn encode_signature(segments: &[Segment]) -> Result<String, SignatureError> {
    let records: Vec<SegmentRecord> = segments.iter().copied().map(Into::into).collect();
    Ok(serde_json::to_string(&records)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_records() {
        let json = r#"[{"lx":20,"ly":34,"mx":21,"my":35},{"lx":1.5,"ly":2,"mx":3,"my":4}]"#;
        let segments = parse_signature(json).unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::new(20.0, 34.0, 21.0, 35.0),
                Segment::new(1.5, 2.0, 3.0, 4.0),
            ]
        );
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let segments = parse_signature(r#"[{"lx":5,"my":7},{}]"#).unwrap();
        assert_eq!(segments[0], Segment::new(5.0, 0.0, 0.0, 7.0));
        assert_eq!(segments[1], Segment::default());
    }

    #[test]
    fn test_escaped_payload() {
        let json = r#"[{\"lx\":1,\"ly\":2,\"mx\":3,\"my\":4}]"#;
        let segments = parse_signature(json).unwrap();
        assert_eq!(segments, vec![Segment::new(1.0, 2.0, 3.0, 4.0)]);
    }

    #[test]
    fn test_lenient_values() {
        let segments =
            parse_signature(r#"[{"lx":"12","ly":null,"mx":true,"my":" 4.5 ","extra":"x"}]"#).unwrap();
        assert_eq!(segments[0], Segment::new(12.0, 0.0, 1.0, 4.5));
    }

    #[test]
    fn test_strings_use_leading_number() {
        let segments = parse_signature(
            r#"[{"lx":"12px","ly":"1e2x","mx":"abc","my":"-.5e"},{"lx":"inf","ly":false,"mx":[1],"my":"+3."}]"#,
        )
        .unwrap();
        assert_eq!(segments[0], Segment::new(12.0, 100.0, 0.0, -0.5));
        assert_eq!(segments[1], Segment::new(0.0, 0.0, 0.0, 3.0));
    }

    #[test]
    fn test_empty_signature() {
        assert!(parse_signature("[]").unwrap().is_empty());
    }

    #[test]
    fn test_rejects_non_array() {
        assert!(matches!(
            parse_signature(r#"{"lx":1}"#),
            Err(SignatureError::NotAnArray)
        ));
        assert!(matches!(
            parse_signature(r#"[{"lx":1}, 5]"#),
            Err(SignatureError::InvalidLine { index: 1 })
        ));
        assert!(matches!(parse_signature("not json"), Err(SignatureError::Json(_))));
    }

    #[test]
    fn test_strip_slashes() {
        assert_eq!(strip_slashes(r#"a\"b"#), "a\"b");
        assert_eq!(strip_slashes(r"a\\b"), r"a\b");
        assert_eq!(strip_slashes(r"trailing\"), "trailing");
    }

    #[test]
    fn test_encode_then_parse() {
        let segments = vec![Segment::new(1.0, 2.0, 3.0, 4.0), Segment::new(-1.0, 0.5, 9.0, 9.0)];
        let json = encode_signature(&segments).unwrap();
        assert!(json.contains("\"lx\":1.0"));
        assert_eq!(parse_signature(&json).unwrap(), segments);
    }

    #[test]
    fn test_parsed_signature_renders() {
        let json = r#"[{"lx":10,"ly":27,"mx":60,"my":27},{"lx":60,"ly":27,"mx":100}]"#;
        let segments = parse_signature(json).unwrap();
        let config = sigpad_core::RenderConfig::default();
        let out = sigpad_render::render(&segments, &config).unwrap();
        let pen = sigpad_core::Rgba8::opaque(20, 83, 148);
        assert_eq!(out.pixel(30, 26), Some(pen));
        assert_eq!(out.pixel(150, 50), Some(sigpad_core::Rgba8::opaque(255, 255, 255)));
    }
}
