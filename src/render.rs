use crate::TextError;

/// A piece of the corrected rendition of a text.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Plain(String),
    Corrected {
        original: String,
        replacement: String,
        message: String,
    },
}

/// Split `text` into plain runs and corrected spans, walking errors by
/// ascending `start`. Errors on the same span collapse into one segment
/// carrying the last replacement, as `apply_corrections` leaves it; any other
/// span starting inside the previous one is dropped.
pub fn segments(text: &str, errors: &[TextError]) -> Vec<Segment> {
    let chars: Vec<char> = text.chars().collect();
    if errors.is_empty() {
        return vec![Segment::Plain(text.to_string())];
    }

    let mut ordered: Vec<&TextError> = errors.iter().collect();
    ordered.sort_by_key(|e| e.start);

    let mut parts: Vec<Segment> = Vec::new();
    let mut last = 0;
    let mut last_start = None;

    for error in ordered {
        if error.start < last {
            if last_start == Some(error.start) && error.end == last {
                if let (Some(Segment::Corrected { replacement, message, .. }), Some(s)) =
                    (parts.last_mut(), error.suggestions.first().filter(|s| !s.is_empty()))
                {
                    *replacement = s.clone();
                    *message = error.message.clone();
                }
            }
            continue;
        }

        if last < error.start {
            parts.push(Segment::Plain(slice(&chars, last, error.start)));
        }

        let original = slice(&chars, error.start, error.end);
        let replacement = match error.suggestions.first() {
            Some(s) if !s.is_empty() => s.clone(),
            _ => original.clone(),
        };
        parts.push(Segment::Corrected {
            original,
            replacement,
            message: error.message.clone(),
        });

        last = error.end;
        last_start = Some(error.start);
    }

    if last < chars.len() {
        parts.push(Segment::Plain(slice(&chars, last, chars.len())));
    }

    parts
}

fn slice(chars: &[char], start: usize, end: usize) -> String {
    let start = start.min(chars.len());
    let end = end.min(chars.len());
    if start >= end {
        String::new()
    } else {
        chars[start..end].iter().collect()
    }
}
