//! Record name normalization.
//!
//! The record API returns fully-qualified names; managed state keeps only
//! the subdomain fragment. Normalization is lenient: a name that does not
//! carry the expected domain suffix is returned unmodified rather than
//! rejected.

/// Derive the subdomain fragment from a fully-qualified record name.
///
/// A name equal to the domain is the apex and yields the empty fragment;
/// otherwise a single trailing `.domain` suffix is stripped. Already-bare
/// fragments pass through unchanged, so the function is idempotent.
#[must_use]
pub fn subdomain_fragment(full_name: &str, domain: &str) -> String {
    if full_name == domain {
        return String::new();
    }

    match full_name.strip_suffix(&format!(".{domain}")) {
        Some(fragment) => fragment.to_string(),
        None => full_name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apex_yields_empty_fragment() {
        assert_eq!(subdomain_fragment("example.com", "example.com"), "");
    }

    #[test]
    fn suffix_is_stripped() {
        assert_eq!(subdomain_fragment("www.example.com", "example.com"), "www");
    }

    #[test]
    fn nested_fragment_keeps_inner_dots() {
        assert_eq!(
            subdomain_fragment("a.b.example.com", "example.com"),
            "a.b"
        );
    }

    #[test]
    fn bare_fragment_is_stable() {
        let once = subdomain_fragment("www.example.com", "example.com");
        let twice = subdomain_fragment(&once, "example.com");
        assert_eq!(once, twice);
    }

    #[test]
    fn unrelated_name_passes_through() {
        assert_eq!(
            subdomain_fragment("www.other.org", "example.com"),
            "www.other.org"
        );
    }

    #[test]
    fn only_the_trailing_suffix_is_removed() {
        // The domain appearing mid-name must survive.
        assert_eq!(
            subdomain_fragment("example.com.example.com", "example.com"),
            "example.com"
        );
    }
}
