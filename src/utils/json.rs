//! Strict JSON request decoding and response encoding.
//!
//! [`decode_strict`] accepts exactly one JSON object per body and classifies
//! every failure into a [`DecodeError`] whose `Display` text is sent to the
//! client verbatim. Positions in those messages are byte offsets into the body:
//!
//! - syntax errors point just past the offending byte
//! - a mismatched scalar points just past the scalar
//! - a mismatched array or object points just past its opening bracket
//!
//! The first value is fully checked (syntax, types, unknown keys) before any
//! trailing content is looked at. A key repeated at the top level keeps its
//! last value.

use std::ops::Range;

use serde::Serialize;
use serde::de::{DeserializeOwned, IgnoredAny};
use serde_json::error::Category;
use serde_path_to_error::Segment;
use thiserror::Error;

/// Classified failure of [`decode_strict`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    #[error("body is empty")]
    Empty,

    #[error("body contains badly-formed JSON (at position {position})")]
    Syntax { position: usize },

    #[error("body contains an invalid value for the {field:?} field (at position {position})")]
    InvalidField { field: String, position: usize },

    #[error("body contains an invalid value (at position {position})")]
    InvalidValue { position: usize },

    #[error("body contains an unexpected end of JSON")]
    UnexpectedEof,

    #[error("body contains unknown key {0:?}")]
    UnknownKey(String),

    #[error("body must only contain a single JSON object")]
    MultipleValues,
}

/// Decodes `body` into `T`, requiring exactly one JSON object.
///
/// A top-level `null` is treated as an empty object. Unknown keys are rejected
/// only if `T` opts into it with `#[serde(deny_unknown_fields)]`.
///
/// # Errors
///
/// See [`DecodeError`] for the classification.
pub fn decode_strict<T: DeserializeOwned>(body: &[u8]) -> Result<T, DecodeError> {
    let Some(start) = body.iter().position(|b| !is_json_whitespace(*b)) else {
        return Err(DecodeError::Empty);
    };

    let mut stream = serde_json::Deserializer::from_slice(body).into_iter::<IgnoredAny>();
    match stream.next() {
        Some(Ok(_)) => {}
        Some(Err(err)) => return Err(classify_scan_error(body, &err)),
        None => return Err(DecodeError::Empty),
    }
    let end = stream.byte_offset();

    let value = match body[start] {
        b'{' => decode_object(&body[..end])?,
        b'n' => decode_object(b"{}")?,
        b'[' => return Err(DecodeError::InvalidValue { position: start + 1 }),
        _ => return Err(DecodeError::InvalidValue { position: end }),
    };

    if stream.next().is_some() {
        return Err(DecodeError::MultipleValues);
    }

    Ok(value)
}

/// Serializes `value`, two-space indented when `pretty` is set.
///
/// The output always ends with a newline.
pub fn encode<T: Serialize + ?Sized>(value: &T, pretty: bool) -> serde_json::Result<Vec<u8>> {
    let mut out = if pretty {
        serde_json::to_vec_pretty(value)?
    } else {
        serde_json::to_vec(value)?
    };
    out.push(b'\n');
    Ok(out)
}

fn decode_object<T: DeserializeOwned>(input: &[u8]) -> Result<T, DecodeError> {
    match deserialize_tracked(input) {
        Err(err) if is_duplicate_field(&err) => {
            let last_wins = blank_shadowed_members(input);
            deserialize_tracked(&last_wins).map_err(|err| classify_typed_error(&last_wins, err))
        }
        result => result.map_err(|err| classify_typed_error(input, err)),
    }
}

fn deserialize_tracked<T: DeserializeOwned>(
    input: &[u8],
) -> Result<T, serde_path_to_error::Error<serde_json::Error>> {
    let mut de = serde_json::Deserializer::from_slice(input);
    serde_path_to_error::deserialize(&mut de)
}

fn is_duplicate_field(err: &serde_path_to_error::Error<serde_json::Error>) -> bool {
    err.inner().classify() == Category::Data
        && err.inner().to_string().starts_with("duplicate field")
}

/// Overwrites with spaces every top-level member that a later member with the
/// same key overrides. Byte offsets into the result match the input.
fn blank_shadowed_members(input: &[u8]) -> Vec<u8> {
    let members = top_level_members(input);
    let mut out = input.to_vec();

    for (i, (key, span)) in members.iter().enumerate() {
        if members[i + 1..].iter().any(|(later, _)| later == key) {
            out[span.clone()].fill(b' ');
        }
    }

    out
}

/// Keys of a syntactically valid object, each with the span from its opening
/// quote through the comma that follows its value, if any.
fn top_level_members(input: &[u8]) -> Vec<(String, Range<usize>)> {
    let mut members = Vec::new();
    let Some(open) = input.iter().position(|b| *b == b'{') else {
        return members;
    };

    let mut pos = open + 1;
    loop {
        pos = skip_whitespace(input, pos);
        if input.get(pos) != Some(&b'"') {
            break;
        }
        let start = pos;

        let Some((key, len)) = input.get(pos..).and_then(next_value::<String>) else {
            break;
        };
        // past the ':'
        pos = skip_whitespace(input, pos + len) + 1;

        let Some((_, len)) = input.get(pos..).and_then(next_value::<IgnoredAny>) else {
            break;
        };
        pos = skip_whitespace(input, pos + len);
        if input.get(pos) == Some(&b',') {
            pos += 1;
        }

        members.push((key, start..pos));
    }

    members
}

/// First JSON value in `input` and the number of bytes it took.
fn next_value<T: DeserializeOwned>(input: &[u8]) -> Option<(T, usize)> {
    let mut stream = serde_json::Deserializer::from_slice(input).into_iter::<T>();
    let value = stream.next()?.ok()?;
    Some((value, stream.byte_offset()))
}

fn skip_whitespace(input: &[u8], from: usize) -> usize {
    input[from.min(input.len())..]
        .iter()
        .position(|b| !is_json_whitespace(*b))
        .map_or(input.len(), |n| from + n)
}

fn classify_scan_error(input: &[u8], err: &serde_json::Error) -> DecodeError {
    match err.classify() {
        Category::Eof => DecodeError::UnexpectedEof,
        Category::Syntax | Category::Data | Category::Io => DecodeError::Syntax {
            position: byte_offset(input, err.line(), err.column()),
        },
    }
}

fn classify_typed_error(
    input: &[u8],
    err: serde_path_to_error::Error<serde_json::Error>,
) -> DecodeError {
    let field = field_path(err.path());
    let inner = err.into_inner();

    match inner.classify() {
        Category::Eof => return DecodeError::UnexpectedEof,
        Category::Syntax | Category::Io => {
            return DecodeError::Syntax {
                position: byte_offset(input, inner.line(), inner.column()),
            };
        }
        Category::Data => {}
    }

    let message = inner.to_string();
    if message.starts_with("unknown field")
        && let Some(key) = backticked(&message)
    {
        return DecodeError::UnknownKey(key.to_owned());
    }

    let position = type_error_position(input, byte_offset(input, inner.line(), inner.column()));

    match field {
        Some(field) => DecodeError::InvalidField { field, position },
        None => DecodeError::InvalidValue { position },
    }
}

/// Dotted path of object keys leading to the failing value, if any.
fn field_path(path: &serde_path_to_error::Path) -> Option<String> {
    let keys: Vec<&str> = path
        .iter()
        .filter_map(|segment| match segment {
            Segment::Map { key } => Some(key.as_str()),
            _ => None,
        })
        .collect();

    if keys.is_empty() {
        None
    } else {
        Some(keys.join("."))
    }
}

/// Converts serde_json's 1-based line and per-line column into a byte offset.
fn byte_offset(input: &[u8], line: usize, column: usize) -> usize {
    let line_start = if line <= 1 {
        0
    } else {
        input
            .iter()
            .enumerate()
            .filter(|(_, b)| **b == b'\n')
            .nth(line - 2)
            .map_or(input.len(), |(i, _)| i + 1)
    };

    (line_start + column).min(input.len())
}

/// Containers are reported before their opening bracket is consumed; step past it.
fn type_error_position(input: &[u8], offset: usize) -> usize {
    match input.get(offset) {
        Some(b'[' | b'{') => offset + 1,
        _ => offset,
    }
}

fn backticked(message: &str) -> Option<&str> {
    let rest = &message[message.find('`')? + 1..];
    Some(&rest[..rest.find('`')?])
}

fn is_json_whitespace(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r')
}
