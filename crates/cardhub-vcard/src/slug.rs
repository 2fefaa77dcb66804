//! URL-safe slug derivation from display names.

/// Maximum numeric suffix probed before falling back to a random one.
pub const MAX_NUMERIC_SUFFIX: u32 = 9;

/// Derive a URL-safe slug from a display name.
///
/// Lowercases ASCII, maps every non-alphanumeric run to a single
/// hyphen, and trims leading/trailing hyphens. Returns `"client"` for
/// names with no usable characters so the result is never empty.
pub fn slugify(name: &str) -> String {
    let mut slug = String::with_capacity(name.len());
    let mut last_was_hyphen = true; // suppress a leading hyphen

    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_hyphen = false;
        } else if !last_was_hyphen {
            slug.push('-');
            last_was_hyphen = true;
        }
    }

    while slug.ends_with('-') {
        slug.pop();
    }

    if slug.is_empty() {
        "client".to_string()
    } else {
        slug
    }
}

/// A numeric collision suffix: `jane-doe` → `jane-doe-3`.
pub fn with_numeric_suffix(base: &str, n: u32) -> String {
    format!("{base}-{n}")
}

/// A random collision suffix used when all numeric suffixes are taken.
pub fn with_random_suffix(base: &str) -> String {
    let tail = uuid::Uuid::new_v4().simple().to_string();
    format!("{base}-{}", &tail[..6])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_hyphenates() {
        assert_eq!(slugify("Jane Doe"), "jane-doe");
        assert_eq!(slugify("  Jane   Q.  Doe "), "jane-q-doe");
    }

    #[test]
    fn strips_symbols() {
        assert_eq!(slugify("Acme & Sons, Ltd."), "acme-sons-ltd");
    }

    #[test]
    fn never_empty() {
        assert_eq!(slugify("!!!"), "client");
        assert_eq!(slugify(""), "client");
    }

    #[test]
    fn numeric_suffix_format() {
        assert_eq!(with_numeric_suffix("jane-doe", 1), "jane-doe-1");
    }

    #[test]
    fn random_suffix_extends_base() {
        let slug = with_random_suffix("jane-doe");
        assert!(slug.starts_with("jane-doe-"));
        assert_eq!(slug.len(), "jane-doe-".len() + 6);
    }
}
