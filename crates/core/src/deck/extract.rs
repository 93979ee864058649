use regex::Regex;
use serde_json::Value;
use thiserror::Error;

/// Why a model response could not be turned into a JSON object.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ExtractError {
    #[error("no JSON found in response")]
    NoJson,

    #[error("malformed JSON in response: {message}")]
    Malformed {
        /// The text that was handed to the parser, after repairs.
        cleaned: String,
        message: String,
    },
}

/// Recover a JSON object from a free-form model response.
///
/// The response may be wrapped in markdown fences, surrounded by prose, or
/// carry trailing commas before `}` / `]`. Repairs are applied in order:
///
/// 1. Parse the response directly.
/// 2. Strip markdown fence markers anywhere in the text.
/// 3. Walk the balanced `{ ... }` spans in order, skipping braces inside
///    string literals. An opening brace that never closes is skipped and the
///    walk resumes at the next `{`.
/// 4. Drop trailing commas outside string literals and parse each span,
///    returning the first one that parses.
///
/// When no balanced span exists, the outermost first-`{`-to-last-`}` span is
/// reported as malformed. Text without any such span is [`ExtractError::NoJson`].
pub fn extract_json(response: &str) -> Result<Value, ExtractError> {
    let trimmed = response.trim();

    if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(trimmed) {
        return Ok(value);
    }

    let unfenced = strip_fences(trimmed);

    let mut first_failure: Option<ExtractError> = None;
    let mut rest = unfenced.as_str();

    while let Some(span) = next_object_span(rest) {
        if !span.balanced {
            rest = &rest[span.start + 1..];
            continue;
        }

        let cleaned = remove_trailing_commas(span.text);
        match serde_json::from_str::<Value>(&cleaned) {
            Ok(value) => return Ok(value),
            Err(e) => {
                if first_failure.is_none() {
                    first_failure = Some(ExtractError::Malformed {
                        cleaned,
                        message: e.to_string(),
                    });
                }
            }
        }
        rest = &rest[span.end..];
    }

    if let Some(failure) = first_failure {
        return Err(failure);
    }

    let outer = outermost_span(&unfenced).ok_or(ExtractError::NoJson)?;
    let cleaned = remove_trailing_commas(outer);
    serde_json::from_str::<Value>(&cleaned).map_err(|e| ExtractError::Malformed {
        message: e.to_string(),
        cleaned,
    })
}

/// Remove markdown code fence markers (```` ```json ````, ```` ``` ````) regardless of case.
pub fn strip_fences(text: &str) -> String {
    let re = Regex::new(r"(?i)```[a-z0-9_+-]*").unwrap();
    re.replace_all(text, "").into_owned()
}

struct ObjectSpan<'a> {
    text: &'a str,
    /// Byte offset of the opening brace, relative to the scanned text.
    start: usize,
    /// Byte offset just past the span, relative to the scanned text.
    end: usize,
    /// `false` when the text ran out before the opening brace was closed.
    balanced: bool,
}

fn next_object_span(text: &str) -> Option<ObjectSpan<'_>> {
    let start = text.find('{')?;

    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + 1;
                    return Some(ObjectSpan {
                        text: &text[start..end],
                        start,
                        end,
                        balanced: true,
                    });
                }
            }
            _ => {}
        }
    }

    Some(ObjectSpan {
        text: &text[start..],
        start,
        end: text.len(),
        balanced: false,
    })
}

/// Text from the first `{` to the last `}`, if the `}` comes after the `{`.
fn outermost_span(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

/// Drop commas that directly precede `}` or `]`, ignoring whitespace in
/// between. Commas inside string literals are left alone.
pub fn remove_trailing_commas(json: &str) -> String {
    let chars: Vec<char> = json.chars().collect();
    let mut out = String::with_capacity(json.len());
    let mut in_string = false;
    let mut escaped = false;

    for (i, &ch) in chars.iter().enumerate() {
        if in_string {
            out.push(ch);
            if escaped {
                escaped = false;
            } else if ch == '\\' {
                escaped = true;
            } else if ch == '"' {
                in_string = false;
            }
            continue;
        }

        match ch {
            '"' => {
                in_string = true;
                out.push(ch);
            }
            ',' => {
                let next = chars[i + 1..].iter().find(|c| !c.is_whitespace());
                if !matches!(next, Some('}') | Some(']')) {
                    out.push(ch);
                }
            }
            _ => out.push(ch),
        }
    }

    out
}
