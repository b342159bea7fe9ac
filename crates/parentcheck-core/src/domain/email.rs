use crate::error::CoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A trimmed email that passed the `local@domain.tld` shape check.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    pub fn parse(raw: &str) -> Result<Self, CoreError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || !is_valid_email(trimmed) {
            return Err(CoreError::InvalidEmail);
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Loose shape check: a non-empty run, `@`, a non-empty run, `.`, a non-empty
/// run, all on one line. Any `@` may serve as the separator.
pub fn is_valid_email(raw: &str) -> bool {
    raw.trim().split(LINE_BREAKS).any(line_has_email_shape)
}

const LINE_BREAKS: [char; 4] = ['\n', '\r', '\u{2028}', '\u{2029}'];

fn line_has_email_shape(line: &str) -> bool {
    line.char_indices()
        .filter(|(idx, ch)| *ch == '@' && *idx > 0)
        .any(|(idx, _)| domain_has_dot(&line[idx + 1..]))
}

fn domain_has_dot(domain: &str) -> bool {
    domain
        .char_indices()
        .any(|(idx, ch)| ch == '.' && idx > 0 && idx + 1 < domain.len())
}

#[cfg(test)]
mod tests {
    use super::{is_valid_email, EmailAddress};
    use crate::error::CoreError;

    #[test]
    fn parse_trims_without_normalizing_case() {
        let email = EmailAddress::parse("  Ada@Example.com ").expect("valid");
        assert_eq!(email.as_str(), "Ada@Example.com");
    }

    #[test]
    fn parse_rejects_empty_and_blank() {
        assert_eq!(EmailAddress::parse(""), Err(CoreError::InvalidEmail));
        assert_eq!(EmailAddress::parse("   "), Err(CoreError::InvalidEmail));
    }

    #[test]
    fn rejects_missing_at_or_dot_after_at() {
        for raw in [
            "plainaddress",
            "no-at.example.com",
            "user@localhost",
            "user.name@domain",
            "@example.com",
            "user@.com",
            "user@example.",
            "a.b@c",
        ] {
            assert!(!is_valid_email(raw), "{raw} should be rejected");
        }
    }

    #[test]
    fn accepts_basic_shapes() {
        for raw in [
            "a@b.c",
            "parent@example.com",
            "first.last@sub.example.org",
            "weird@@example.com",
            "x@y.z.w",
            "@lead@example.com",
        ] {
            assert!(is_valid_email(raw), "{raw} should be accepted");
        }
    }

    #[test]
    fn shape_must_fit_on_one_line() {
        assert!(!is_valid_email("user@\nexample.com"));
        assert!(!is_valid_email("user\n@example.com"));
        assert!(!is_valid_email("a\r@b.c"));
        assert!(!is_valid_email("a\u{2028}@b.c"));
        assert!(!is_valid_email("a@b\u{2029}.c"));
        assert!(is_valid_email("junk\r\nparent@example.com"));
    }
}
