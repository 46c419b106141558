//! Slug derivation for field keys and option values.

/// Convert arbitrary label text to a stable `snake_case` slug.
///
/// Lowercases, maps runs of non-alphanumeric characters to single
/// underscores, and trims leading/trailing underscores. Empty input (or
/// input with no alphanumerics) yields an empty string; callers are
/// responsible for rejecting empty keys.
///
/// ```rust
/// use formlift_core::slugify;
///
/// assert_eq!(slugify("Date of Birth:"), "date_of_birth");
/// assert_eq!(slugify("SSN #"), "ssn");
/// ```
#[must_use]
pub fn slugify(text: &str) -> String {
    let mut slug = String::with_capacity(text.len());
    let mut last_underscore = true; // suppress leading underscore
    for ch in text.chars() {
        if ch.is_ascii_alphanumeric() {
            slug.push(ch.to_ascii_lowercase());
            last_underscore = false;
        } else if !last_underscore {
            slug.push('_');
            last_underscore = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Join a parent key and a suffix into a child key.
#[must_use]
pub fn child_key(parent: &str, suffix: &str) -> String {
    format!("{parent}_{suffix}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugs() {
        assert_eq!(slugify("First Name"), "first_name");
        assert_eq!(slugify("Phone (Mobile)"), "phone_mobile");
        assert_eq!(slugify("  E-mail Address  "), "e_mail_address");
    }

    #[test]
    fn test_punctuation_collapses() {
        assert_eq!(slugify("City / State / Zip"), "city_state_zip");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_child_key() {
        assert_eq!(child_key("allergic", "detail"), "allergic_detail");
    }
}
