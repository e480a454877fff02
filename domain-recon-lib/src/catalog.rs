//! The TLD variant catalog.
//!
//! A look-alike hunt expands every base name against this fixed list of
//! candidate suffixes. The built-in catalog covers the TLDs that actually
//! show up in phishing campaigns: the big gTLDs, the cheap "trendy"
//! registries, and the common ccTLDs. Custom catalogs can be supplied via
//! configuration; both paths go through the same normalization.

/// Candidate TLDs checked for every base name.
///
/// Kept roughly grouped for maintainability; [`default_catalog`] sorts and
/// de-duplicates before use, so order here carries no meaning.
const CANDIDATE_TLDS: &[&str] = &[
    ".com", ".org", ".net", ".co", ".info", ".biz", ".us", ".ca", ".uk",
    ".io", ".ai", ".tech", ".app", ".online", ".site", ".website", ".space",
    ".store", ".xyz", ".club", ".vip", ".link", ".click", ".top", ".loan",
    ".support", ".help", ".services", ".company", ".solutions", ".agency",
    ".email", ".cc", ".tv", ".me", ".asia", ".mobi", ".pro", ".name",
    // Common ccTLDs
    ".de", ".fr", ".au", ".nl", ".ru", ".cn", ".br", ".in", ".jp",
    ".live", ".shop", ".world", ".guru", ".news", ".today", ".ltd", ".group",
];

/// The built-in candidate catalog: de-duplicated, sorted, every entry
/// starting with a dot.
pub fn default_catalog() -> Vec<String> {
    normalize_catalog(CANDIDATE_TLDS)
}

/// Normalize a user-supplied TLD list into catalog form.
///
/// Each entry is trimmed, lowercased, and prefixed with a dot when missing;
/// empty entries are dropped; the result is de-duplicated and sorted so
/// expansion order is deterministic.
pub fn normalize_catalog<S: AsRef<str>>(tlds: &[S]) -> Vec<String> {
    let mut normalized: Vec<String> = tlds
        .iter()
        .map(|tld| tld.as_ref().trim().to_lowercase())
        .filter(|tld| !tld.is_empty() && tld != ".")
        .map(|tld| {
            if tld.starts_with('.') {
                tld
            } else {
                format!(".{}", tld)
            }
        })
        .collect();
    normalized.sort();
    normalized.dedup();
    normalized
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_catalog_sorted_and_unique() {
        let catalog = default_catalog();
        assert!(!catalog.is_empty());

        let mut sorted = catalog.clone();
        sorted.sort();
        sorted.dedup();
        assert_eq!(catalog, sorted);
    }

    #[test]
    fn test_default_catalog_entries_start_with_dot() {
        for tld in default_catalog() {
            assert!(tld.starts_with('.'), "catalog entry '{}' lacks a dot", tld);
        }
    }

    #[test]
    fn test_default_catalog_covers_core_gtlds() {
        let catalog = default_catalog();
        for expected in [".com", ".net", ".org", ".io", ".xyz"] {
            assert!(catalog.contains(&expected.to_string()));
        }
    }

    #[test]
    fn test_normalize_adds_dot_and_dedupes() {
        let catalog = normalize_catalog(&["com", ".COM", " net ", "", "org"]);
        assert_eq!(catalog, vec![".com", ".net", ".org"]);
    }

    #[test]
    fn test_normalize_is_sorted() {
        let catalog = normalize_catalog(&["zzz", "aaa", "mmm"]);
        assert_eq!(catalog, vec![".aaa", ".mmm", ".zzz"]);
    }
}
