use regex::Regex;

pub const EMAIL_MAX_LENGTH: usize = 255;

/// Trim the address and lowercase its domain part.
///
/// The local part is kept as typed: mailbox names may be case sensitive.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    let email = email.trim();

    match email.rsplit_once('@') {
        Some((local, domain)) => format!("{local}@{}", domain.to_lowercase()),
        None => email.to_string(),
    }
}

/// Basic email format check.
#[must_use]
pub fn valid_email(email: &str) -> bool {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").is_ok_and(|re| re.is_match(email))
}
