//! Dotted path reads over [`Access`]
//!
//! Supports:
//! - Nested property access (e.g., "user.address.city")
//! - Bracket indexing (e.g., "orders[0].total", "matrix[1][0]")
//! - Dot indexing (e.g., "orders.0.total")
//! - `*` as the first element (e.g., "orders[*].total")
//! - A leading "$." (JSONPath style)
//!
//! Every step goes through the null-safe reads of [`Access`], so a missing link
//! anywhere in the chain reads as `Null`. A malformed path also reads as `Null`.

use crate::optional::Access;
use crate::Value;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment<'a> {
    Key(&'a str),
    Index(usize),
}

impl<'a> Segment<'a> {
    fn from_dotted(part: &'a str) -> Self {
        if part == "*" {
            return Segment::Index(0);
        }
        match part.parse::<usize>() {
            Ok(idx) => Segment::Index(idx),
            Err(_) => Segment::Key(part),
        }
    }

    fn apply<A: Access + ?Sized>(&self, current: &A) -> Value {
        match self {
            Segment::Key(key) => current.get(key),
            Segment::Index(idx) => current.at(*idx),
        }
    }
}

/// Split a path into segments. `None` when the path is malformed.
pub fn parse(path: &str) -> Option<Vec<Segment<'_>>> {
    let normalized = path.trim().trim_start_matches("$.");
    if normalized.is_empty() {
        return None;
    }

    let mut segments = Vec::new();
    for part in normalized.split('.') {
        if part.is_empty() {
            return None;
        }

        // e.g. "orders[0]" or "matrix[1][0]"
        if let Some(bracket_pos) = part.find('[') {
            let key = &part[..bracket_pos];
            if !key.is_empty() {
                segments.push(Segment::Key(key));
            }
            for chunk in part[bracket_pos + 1..].split('[') {
                let idx_str = chunk.strip_suffix(']')?;
                if idx_str == "*" {
                    segments.push(Segment::Index(0));
                } else {
                    segments.push(Segment::Index(idx_str.parse().ok()?));
                }
            }
        } else {
            segments.push(Segment::from_dotted(part));
        }
    }
    Some(segments)
}

/// Walk `path` from `root`. Never fails; absent links read as `Null`.
pub fn resolve<A: Access + ?Sized>(root: &A, path: &str) -> Value {
    let Some(segments) = parse(path) else {
        return Value::Null;
    };
    let mut segments = segments.into_iter();
    let Some(first) = segments.next() else {
        return Value::Null;
    };
    segments.fold(first.apply(root), |current, segment| segment.apply(&current))
}
