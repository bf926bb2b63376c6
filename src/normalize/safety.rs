//! Advisory content screen.
//!
//! Rejects submissions whose code (not comments) mentions a denylisted
//! pattern. This is a substring match on lowercased text and is trivially
//! bypassed; nothing downstream executes the submitted code.

use crate::error::InputError;
use crate::language::Language;

/// Patterns rejected by default, matched case-insensitively.
pub const DEFAULT_DENYLIST: &[&str] = &[
    "import os",
    "import sys",
    "__import__",
    "eval(",
    "exec(",
    "open(",
    "compile(",
    "input(",
    "subprocess",
    "os.system",
    "socket.",
    "http.client",
    "urllib.request",
];

/// Reject `raw` if any denylisted pattern appears outside comments.
///
/// The first matching pattern in denylist order is reported.
pub fn check_content<S: AsRef<str>>(
    raw: &str,
    language: Language,
    denylist: &[S],
) -> Result<(), InputError> {
    let lowered_raw = raw.to_lowercase();
    let candidates: Vec<&str> = denylist
        .iter()
        .map(|p| p.as_ref())
        .filter(|p| !p.is_empty() && lowered_raw.contains(&p.to_lowercase()))
        .collect();

    // Only pay for stripping when the raw text could match at all.
    if candidates.is_empty() {
        return Ok(());
    }

    let code = super::strip(raw, language)
        .iter()
        .map(|l| l.text.to_lowercase())
        .collect::<Vec<_>>()
        .join("\n");

    match candidates
        .into_iter()
        .find(|p| code.contains(&p.to_lowercase()))
    {
        Some(pattern) => Err(InputError::ContentRejected {
            pattern: pattern.to_string(),
        }),
        None => Ok(()),
    }
}
