//! Email acceptance filter.

/// Domain suffix of GitHub's privacy-preserving commit addresses.
pub const NOREPLY_SUFFIX: &str = "@users.noreply.github.com";

/// Returns true if `email` looks like a real, non-obfuscated address.
#[must_use]
pub fn is_acceptable_email(email: &str) -> bool {
    !email.is_empty()
        && email.contains('@')
        && !email.ends_with(NOREPLY_SUFFIX)
        && !email.starts_with("noreply")
}
