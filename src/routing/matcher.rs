//! Path pattern matching.
//!
//! # Responsibilities
//! - Compile patterns like `/deals/{digits}/activity` into segment lists
//! - Match a request path segment by segment, capturing parameters
//!
//! # Design Decisions
//! - Path matching is case-sensitive and exact (no trailing-slash folding)
//! - Parameter classes are ASCII-only: `{digits}` is `[0-9]+`, `{hex}` is `[a-fA-F0-9]+`
//! - No regex to guarantee O(n) matching

/// One segment of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Must equal this text.
    Literal(String),
    /// One or more ASCII digits, captured.
    Digits,
    /// One or more ASCII hex digits, captured.
    Hex,
}

impl Segment {
    fn matches(&self, part: &str) -> bool {
        match self {
            Segment::Literal(text) => part == text,
            Segment::Digits => !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit()),
            Segment::Hex => !part.is_empty() && part.bytes().all(|b| b.is_ascii_hexdigit()),
        }
    }

    fn captures(&self) -> bool {
        !matches!(self, Segment::Literal(_))
    }
}

/// A compiled path pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPattern {
    segments: Vec<Segment>,
}

impl PathPattern {
    /// Compile a pattern. `{digits}` and `{hex}` are parameters, anything
    /// else is literal text.
    pub fn new(pattern: &str) -> Self {
        let segments = split(pattern)
            .map(|part| match part {
                "{digits}" => Segment::Digits,
                "{hex}" => Segment::Hex,
                literal => Segment::Literal(literal.to_string()),
            })
            .collect();
        Self { segments }
    }

    /// Captured parameters if `path` matches, in pattern order.
    pub fn captures<'a>(&self, path: &'a str) -> Option<Vec<&'a str>> {
        let path = path.strip_prefix('/')?;
        let parts: Vec<&str> = path.split('/').collect();
        if parts.len() != self.segments.len() {
            return None;
        }

        let mut captured = Vec::new();
        for (segment, part) in self.segments.iter().zip(parts) {
            if !segment.matches(part) {
                return None;
            }
            if segment.captures() {
                captured.push(part);
            }
        }
        Some(captured)
    }

    /// Returns true if `path` matches this pattern.
    pub fn matches(&self, path: &str) -> bool {
        self.captures(path).is_some()
    }
}

/// True for a non-empty run of ASCII digits.
pub fn is_digits(text: &str) -> bool {
    Segment::Digits.matches(text)
}

fn split(pattern: &str) -> impl Iterator<Item = &str> {
    pattern.strip_prefix('/').unwrap_or(pattern).split('/')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_literal_pattern() {
        let pattern = PathPattern::new("/deals");
        assert!(pattern.matches("/deals"));
        assert!(!pattern.matches("/deals/"));
        assert!(!pattern.matches("/Deals"));
        assert!(!pattern.matches("/deals/1"));
        assert!(!pattern.matches("deals"));
    }

    #[test]
    fn test_digits_capture() {
        let pattern = PathPattern::new("/deals/{digits}/activity");
        assert_eq!(pattern.captures("/deals/42/activity"), Some(vec!["42"]));
        assert_eq!(pattern.captures("/deals/4a/activity"), None);
        assert_eq!(pattern.captures("/deals//activity"), None);
        assert_eq!(pattern.captures("/deals/42/activity/"), None);
        assert_eq!(pattern.captures("/deals/４２/activity"), None);
    }

    #[test]
    fn test_hex_capture() {
        let pattern = PathPattern::new("/deal-fields/{hex}");
        assert_eq!(pattern.captures("/deal-fields/123"), Some(vec!["123"]));
        assert_eq!(pattern.captures("/deal-fields/aBc123"), Some(vec!["aBc123"]));
        assert_eq!(pattern.captures("/deal-fields/zzz"), None);
        assert_eq!(pattern.captures("/deal-fields/"), None);
    }

    #[test]
    fn test_is_digits() {
        assert!(is_digits("0123"));
        assert!(!is_digits(""));
        assert!(!is_digits("12f"));
    }
}
