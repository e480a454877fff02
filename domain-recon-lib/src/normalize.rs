//! WHOIS normalization: typed record in, fixed display strings out.
//!
//! Everything in this module is pure and independently testable without any
//! network dependency. The rules:
//!
//! - absent/empty field -> the literal `"N/A"`, never an empty string;
//! - date lists -> first element;
//! - other lists -> unique stringified elements, sorted, comma-joined;
//! - no registrar URL -> best-effort guess synthesized from the registrar
//!   name (explicitly allowed to be wrong).

use crate::types::{MxAnswer, WhoisRecord};

/// Placeholder written for any absent or unparseable field.
pub const NOT_AVAILABLE: &str = "N/A";

/// Render an optional scalar field, defaulting to `"N/A"`.
pub fn display_scalar(value: Option<&str>) -> String {
    match value.map(str::trim) {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

/// Render a date field: the first element of a possibly-repeated list.
pub fn display_first_date(values: &[String]) -> String {
    values
        .iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(|v| v.to_string())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Render a multi-valued field: unique elements, sorted for determinism,
/// joined with `", "`.
pub fn display_joined(values: &[String]) -> String {
    let mut unique: Vec<String> = values
        .iter()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .collect();
    unique.sort();
    unique.dedup();

    if unique.is_empty() {
        NOT_AVAILABLE.to_string()
    } else {
        unique.join(", ")
    }
}

/// Render the joined, sorted, de-duplicated domain status field.
pub fn display_status(record: &WhoisRecord) -> String {
    display_joined(&record.statuses)
}

/// Render the registrar URL, synthesizing a guess when absent.
///
/// The guess takes the registrar's first comma-delimited segment, lowercases
/// it, strips spaces and periods, and formats it as `https://www.<name>.com`.
/// Common but not guaranteed.
pub fn display_registrar_url(record: &WhoisRecord) -> String {
    if let Some(url) = record.registrar_url.as_deref() {
        let url = url.trim();
        if !url.is_empty() {
            return url.to_string();
        }
    }

    if let Some(registrar) = record.registrar.as_deref() {
        let main_segment: String = registrar
            .split(',')
            .next()
            .unwrap_or("")
            .to_lowercase()
            .chars()
            .filter(|c| *c != ' ' && *c != '.')
            .collect();
        if !main_segment.is_empty() {
            return format!("https://www.{}.com", main_segment);
        }
    }

    NOT_AVAILABLE.to_string()
}

/// Render the registrant organization, falling back through the contact
/// fields the way registries actually populate them.
pub fn display_registrant_org(record: &WhoisRecord) -> String {
    let org = record
        .registrant_org
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty());
    display_scalar(org)
}

/// Render a merged, de-duplicated, sorted IP address list.
pub fn display_ips(addresses: &[String]) -> String {
    display_joined(addresses)
}

/// Render MX answers, sorted by `(preference, exchange)`.
pub fn display_mx(answers: &[MxAnswer]) -> String {
    if answers.is_empty() {
        return NOT_AVAILABLE.to_string();
    }
    let mut sorted = answers.to_vec();
    sorted.sort();
    sorted
        .iter()
        .map(|mx| mx.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Build the multi-line information block the collector writes per domain.
///
/// Field order and wording match the long-standing report format analysts
/// already grep through. Contact lines are emitted only when present; the
/// fixed fields always appear, `"N/A"` when absent.
pub fn collector_lines(record: &WhoisRecord) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Domain Name: {}",
        display_scalar(record.domain_name.as_deref())
    ));
    lines.push(format!(
        "Registry Domain ID: {}",
        display_scalar(record.registry_domain_id.as_deref())
    ));
    lines.push(format!(
        "Registrar WHOIS Server: {}",
        display_scalar(record.whois_server.as_deref())
    ));
    lines.push(format!("Registrar URL: {}", display_registrar_url(record)));
    lines.push(format!(
        "Updated Date: {}",
        display_first_date(&record.updated_dates)
    ));
    lines.push(format!(
        "Creation Date: {}",
        display_first_date(&record.creation_dates)
    ));
    lines.push(format!(
        "Registrar Registration Expiration Date: {}",
        display_first_date(&record.expiration_dates)
    ));
    lines.push(format!(
        "Registrar: {}",
        display_scalar(record.registrar.as_deref())
    ));
    lines.push(format!(
        "Registrar IANA ID: {}",
        display_scalar(record.registrar_iana_id.as_deref())
    ));
    lines.push(format!(
        "Registrar Abuse Contact Email: {}",
        display_scalar(record.abuse_email.as_deref())
    ));
    lines.push(format!(
        "Registrar Abuse Contact Phone: {}",
        display_scalar(record.abuse_phone.as_deref())
    ));
    lines.push(format!("Domain Status: {}", display_status(record)));

    // Contact details are usually masked by privacy services; report what
    // the registry actually published and nothing else.
    let contacts = [
        ("Registrant", &record.registrant_name, &record.registrant_org, &record.registrant_email),
        ("Admin", &record.admin_name, &record.admin_org, &record.admin_email),
        ("Tech", &record.tech_name, &record.tech_org, &record.tech_email),
    ];
    for (label, name, org, email) in contacts {
        if let Some(name) = name.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{} Name: {}", label, name));
        }
        if let Some(org) = org.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{} Organization: {}", label, org));
        }
        if let Some(email) = email.as_deref().map(str::trim).filter(|v| !v.is_empty()) {
            lines.push(format!("{} Email: {}", label, email));
        }
    }

    lines.push(format!(
        "Name Server: {}",
        display_joined(&record.name_servers)
    ));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_record() -> WhoisRecord {
        WhoisRecord {
            domain_name: Some("example.com".to_string()),
            registrar: Some("Example Registrar, Inc.".to_string()),
            creation_dates: vec![
                "1995-08-14T04:00:00Z".to_string(),
                "1995-08-14".to_string(),
            ],
            statuses: vec![
                "clientTransferProhibited".to_string(),
                "clientDeleteProhibited".to_string(),
                "clientTransferProhibited".to_string(),
            ],
            name_servers: vec![
                "b.iana-servers.net".to_string(),
                "a.iana-servers.net".to_string(),
            ],
            ..Default::default()
        }
    }

    #[test]
    fn test_absent_fields_render_as_na() {
        let record = WhoisRecord::default();
        assert_eq!(display_scalar(record.registrar.as_deref()), "N/A");
        assert_eq!(display_first_date(&record.creation_dates), "N/A");
        assert_eq!(display_status(&record), "N/A");
        assert_eq!(display_registrar_url(&record), "N/A");
    }

    #[test]
    fn test_empty_string_renders_as_na() {
        // "N/A" is the contract; empty strings must never leak through
        assert_eq!(display_scalar(Some("")), "N/A");
        assert_eq!(display_scalar(Some("   ")), "N/A");
        assert_eq!(display_joined(&["".to_string()]), "N/A");
    }

    #[test]
    fn test_date_lists_take_first_element() {
        let record = sample_record();
        assert_eq!(
            display_first_date(&record.creation_dates),
            "1995-08-14T04:00:00Z"
        );
    }

    #[test]
    fn test_status_joined_sorted_deduplicated() {
        let record = sample_record();
        assert_eq!(
            display_status(&record),
            "clientDeleteProhibited, clientTransferProhibited"
        );
    }

    #[test]
    fn test_registrar_url_explicit_wins() {
        let record = WhoisRecord {
            registrar_url: Some("https://registrar.example".to_string()),
            registrar: Some("Other Name".to_string()),
            ..Default::default()
        };
        assert_eq!(display_registrar_url(&record), "https://registrar.example");
    }

    #[test]
    fn test_registrar_url_heuristic() {
        let record = WhoisRecord {
            registrar: Some("MarkMonitor Inc.".to_string()),
            ..Default::default()
        };
        assert_eq!(
            display_registrar_url(&record),
            "https://www.markmonitorinc.com"
        );

        // Only the first comma-delimited segment feeds the guess
        let record = WhoisRecord {
            registrar: Some("Example Registrar, LLC".to_string()),
            ..Default::default()
        };
        assert_eq!(
            display_registrar_url(&record),
            "https://www.exampleregistrar.com"
        );
    }

    #[test]
    fn test_mx_rendering_sorted_by_preference_then_name() {
        let answers = vec![
            MxAnswer {
                preference: 20,
                exchange: "b.mx.example".to_string(),
            },
            MxAnswer {
                preference: 10,
                exchange: "a.mx.example".to_string(),
            },
        ];
        assert_eq!(display_mx(&answers), "10 a.mx.example, 20 b.mx.example");
    }

    #[test]
    fn test_ip_list_deduplicated_and_sorted() {
        let ips = vec![
            "93.184.216.34".to_string(),
            "2606:2800:220:1:248:1893:25c8:1946".to_string(),
            "93.184.216.34".to_string(),
        ];
        assert_eq!(
            display_ips(&ips),
            "2606:2800:220:1:248:1893:25c8:1946, 93.184.216.34"
        );
    }

    #[test]
    fn test_normalization_is_deterministic() {
        let record = sample_record();
        let first = collector_lines(&record);
        let second = collector_lines(&record);
        assert_eq!(first, second);
    }

    #[test]
    fn test_collector_lines_field_order() {
        let lines = collector_lines(&sample_record());
        assert!(lines[0].starts_with("Domain Name: "));
        assert!(lines[1].starts_with("Registry Domain ID: "));
        assert!(lines
            .last()
            .unwrap()
            .starts_with("Name Server: a.iana-servers.net, b.iana-servers.net"));
    }
}
