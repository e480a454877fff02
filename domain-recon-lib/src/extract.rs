//! Domain parsing: loose query validation and base-name extraction.
//!
//! Base-name extraction is public-suffix aware. A naive "last two labels"
//! split would mangle multi-label suffixes like `co.uk`, so the split is
//! delegated to the embedded public suffix list.

use crate::error::DomainReconError;

/// Validate a domain query loosely before any network activity.
///
/// The bar is deliberately low: the downstream lookups are the real
/// validation, and over-strict rules would drop queries an analyst wants
/// probed anyway. A query must contain a dot, carry no internal whitespace,
/// and fit in 253 octets.
pub fn validate_query(domain: &str) -> Result<(), DomainReconError> {
    let domain = domain.trim();

    if domain.is_empty() {
        return Err(DomainReconError::invalid_query(
            domain,
            "domain name is empty",
        ));
    }

    if !domain.contains('.') {
        return Err(DomainReconError::invalid_query(
            domain,
            "domain name contains no dot",
        ));
    }

    if domain.chars().any(|c| c.is_whitespace()) {
        return Err(DomainReconError::invalid_query(
            domain,
            "domain name contains whitespace",
        ));
    }

    if domain.len() > 253 {
        return Err(DomainReconError::invalid_query(
            domain,
            "domain name exceeds 253 characters",
        ));
    }

    Ok(())
}

/// Extract the meaningful part of a domain before its public suffix.
///
/// Subdomain labels are kept: they are part of what makes a look-alike
/// convincing, and analysts want variants of the full prefix.
///
/// ```
/// use domain_recon_lib::base_name;
///
/// assert_eq!(base_name("example.com"), Some("example".to_string()));
/// assert_eq!(base_name("sub.example.co.uk"), Some("sub.example".to_string()));
/// assert_eq!(base_name("co.uk"), None);
/// ```
///
/// Returns `None` when no registrable domain label can be identified
/// (the input is itself a public suffix, or is not a host name at all).
/// Callers must treat that as a per-input, non-fatal condition.
pub fn base_name(fqdn: &str) -> Option<String> {
    let host = fqdn.trim().trim_end_matches('.').to_lowercase();
    if host.is_empty() {
        return None;
    }

    // domain_str() is None when the input has no label under its suffix
    psl::domain_str(&host)?;
    let suffix = psl::suffix_str(&host)?;

    let stem = host
        .strip_suffix(suffix)
        .map(|s| s.trim_end_matches('.'))
        .unwrap_or("");

    if stem.is_empty() {
        None
    } else {
        Some(stem.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_query_accepts_plain_domains() {
        assert!(validate_query("example.com").is_ok());
        assert!(validate_query("sub.example.co.uk").is_ok());
        assert!(validate_query("xn--bcher-kva.example").is_ok());
    }

    #[test]
    fn test_validate_query_rejects_malformed() {
        assert!(validate_query("").is_err());
        assert!(validate_query("nodot").is_err());
        assert!(validate_query("bad domain.com").is_err());
        assert!(validate_query(&format!("{}.com", "a".repeat(260))).is_err());
    }

    #[test]
    fn test_base_name_strips_simple_suffix() {
        assert_eq!(base_name("example.com"), Some("example".to_string()));
        assert_eq!(base_name("EXAMPLE.COM"), Some("example".to_string()));
    }

    #[test]
    fn test_base_name_strips_multi_label_suffix() {
        assert_eq!(
            base_name("sub.example.co.uk"),
            Some("sub.example".to_string())
        );
        assert_eq!(base_name("example.co.uk"), Some("example".to_string()));
    }

    #[test]
    fn test_base_name_keeps_all_subdomain_labels() {
        assert_eq!(
            base_name("a.b.example.com"),
            Some("a.b.example".to_string())
        );
    }

    #[test]
    fn test_base_name_rejects_bare_suffixes() {
        assert_eq!(base_name("com"), None);
        assert_eq!(base_name("co.uk"), None);
        assert_eq!(base_name(""), None);
        assert_eq!(base_name("."), None);
    }

    #[test]
    fn test_base_name_trims_trailing_dot() {
        assert_eq!(base_name("example.com."), Some("example".to_string()));
    }
}
