//! Syntactic email check applied to new users.
//!
//! The accepted shape is: one or more characters that are neither blank
//! nor `@`, a literal `@`, a domain part of the same character class, a
//! literal `.`, and a final part of the same class running to the end of the
//! string. Surrounding blanks are ignored.
//!
//! "Blank" is the ECMAScript whitespace set, so clients validating with a
//! browser's `\s` and `trim()` agree with the server: it includes U+FEFF
//! (byte order mark) and excludes U+0085 (next line), unlike Rust's
//! `char::is_whitespace`.
//!
//! This is not RFC 5322 validation. Quoted local parts, comments and IP
//! literals are judged purely by the shape above, and addresses such as
//! `a@b.c.d` or `x@-.-` pass. Deliverability is never checked.

use std::sync::OnceLock;

use regex::Regex;

static EMAIL_RE: OnceLock<Regex> = OnceLock::new();

/// Regex class body matching [`is_blank`].
const BLANK_CLASS: &str = r"\t\n\x0B\x0C\r \x{A0}\x{1680}\x{2000}-\x{200A}\x{2028}\x{2029}\x{202F}\x{205F}\x{3000}\x{FEFF}";

/// ECMAScript whitespace or line terminator.
fn is_blank(c: char) -> bool {
    (c.is_whitespace() && c != '\u{85}') || c == '\u{feff}'
}

/// Strip leading and trailing blanks.
pub(crate) fn trim_blank(raw: &str) -> &str {
    raw.trim_matches(is_blank)
}

fn email_regex() -> &'static Regex {
    EMAIL_RE.get_or_init(|| {
        let part = format!("[^{BLANK_CLASS}@]+");
        Regex::new(&format!(r"^{part}@{part}\.{part}$"))
            .unwrap_or_else(|error| panic!("email regex failed to compile: {error}"))
    })
}

/// Return whether `candidate`, once trimmed, has the shape of an email
/// address.
///
/// Values that are not text at all (JSON numbers, `null`, a missing field)
/// never reach this function; the caller treats them as invalid.
///
/// # Examples
/// ```
/// use roster::domain::is_valid_email;
///
/// assert!(is_valid_email("john.doe@example.com"));
/// assert!(is_valid_email("  padded@example.com  "));
/// assert!(!is_valid_email("bad-email"));
/// ```
pub fn is_valid_email(candidate: &str) -> bool {
    email_regex().is_match(trim_blank(candidate))
}
