//! Query drivers for the two batch tools.
//!
//! Both drivers are single sequential streams: each query is issued, awaited
//! to completion or timeout, and consumed before the next begins, with a
//! fixed pacing delay after every completed domain or variant. The streams
//! are built with `stream::iter(..).then(..)`, which awaits each item in
//! turn - sequential by construction.
//!
//! The one piece of adaptive control flow is the WHOIS skip: when DNS has
//! already proven a variant does not exist (authoritative negative on both
//! the IP and NS lookups), the WHOIS query is skipped and the notes say so.

use crate::catalog;
use crate::error::DomainReconError;
use crate::extract::{base_name, validate_query};
use crate::normalize;
use crate::protocols::{DnsClient, WhoisClient};
use crate::report::{CollectorRow, VariantRow};
use crate::types::{DnsError, LookupConfig};
use futures::stream::{Stream, StreamExt};
use std::pin::Pin;
use tracing::{debug, info};

/// Note written when the WHOIS query was skipped for a dead variant.
pub const WHOIS_SKIPPED_NOTE: &str = "Skipped WHOIS due to DNS indicating non-existence.";

/// One planned unit of work for the variant checker.
///
/// Planning is separated from execution so callers can count rows up front
/// and so the expansion rules are testable without any network dependency.
#[derive(Debug, Clone, PartialEq)]
pub enum VariantQuery {
    /// Input failed the loose format validation; yields one error row,
    /// no network activity.
    Invalid { original: String },

    /// No registrable base name could be identified; yields one error row,
    /// no network activity.
    NoBase { original: String },

    /// A real (base, TLD) probe.
    Probe {
        original: String,
        base: String,
        tld: String,
    },
}

/// Expand input domains against a TLD catalog into the work plan.
///
/// Valid inputs contribute one probe per catalog entry; invalid or
/// unextractable inputs contribute exactly one error item each, so the
/// plan length equals the number of output rows.
pub fn plan_variants(inputs: &[String], catalog: &[String]) -> Vec<VariantQuery> {
    let mut plan = Vec::new();

    for input in inputs {
        let original = input.trim().to_lowercase();
        if original.is_empty() {
            continue;
        }

        if validate_query(&original).is_err() {
            plan.push(VariantQuery::Invalid { original });
            continue;
        }

        match base_name(&original) {
            Some(base) => {
                for tld in catalog {
                    plan.push(VariantQuery::Probe {
                        original: original.clone(),
                        base: base.clone(),
                        tld: tld.clone(),
                    });
                }
            }
            None => plan.push(VariantQuery::NoBase { original }),
        }
    }

    plan
}

/// Decide whether WHOIS can be skipped for a variant.
///
/// Skip only when both the IP and NS lookups returned an authoritative
/// "name does not exist" - a weaker signal (timeout, no-answer) still
/// warrants the WHOIS query.
pub fn should_skip_whois(
    ip_result: &Result<Vec<String>, DnsError>,
    ns_result: &Result<Vec<String>, DnsError>,
) -> bool {
    matches!(ip_result, Err(DnsError::NameNotFound))
        && matches!(ns_result, Err(DnsError::NameNotFound))
}

/// Assemble the notes field from accumulated DNS and WHOIS fragments.
///
/// Fragments are de-duplicated and sorted within each section so identical
/// inputs always render identical notes. A clean row reads `OK`.
pub fn assemble_notes(dns_errors: &[String], whois_errors: &[String]) -> String {
    fn section(label: &str, fragments: &[String]) -> Option<String> {
        if fragments.is_empty() {
            return None;
        }
        let mut unique: Vec<String> = fragments.to_vec();
        unique.sort();
        unique.dedup();
        Some(format!("{}: {}", label, unique.join("; ")))
    }

    let sections: Vec<String> = [
        section("DNS", dns_errors),
        section("WHOIS", whois_errors),
    ]
    .into_iter()
    .flatten()
    .collect();

    if sections.is_empty() {
        "OK".to_string()
    } else {
        sections.join(" | ")
    }
}

/// Scanner owning the protocol clients and lookup configuration.
pub struct DomainScanner {
    config: LookupConfig,
    dns: DnsClient,
    whois: WhoisClient,
}

impl DomainScanner {
    /// Create a scanner with default configuration.
    pub fn new() -> Result<Self, DomainReconError> {
        Self::with_config(LookupConfig::default())
    }

    /// Create a scanner with custom configuration.
    pub fn with_config(config: LookupConfig) -> Result<Self, DomainReconError> {
        let dns = DnsClient::new(&config)?;
        let whois = WhoisClient::with_timeout(config.whois_timeout);
        Ok(Self { config, dns, whois })
    }

    /// The lookup configuration this scanner was built with.
    pub fn config(&self) -> &LookupConfig {
        &self.config
    }

    /// The TLD catalog used for variant expansion: the configured override,
    /// normalized, or the built-in catalog.
    pub fn catalog(&self) -> Vec<String> {
        match &self.config.tlds {
            Some(tlds) => catalog::normalize_catalog(tlds),
            None => catalog::default_catalog(),
        }
    }

    /// Gather WHOIS and DNS (A/AAAA, MX) information for one domain.
    ///
    /// Always produces a row; every failure is folded into the information
    /// blob rather than propagated.
    pub async fn collect_domain_info(&self, domain: &str) -> CollectorRow {
        let mut info_parts: Vec<String> = Vec::new();
        let mut errors: Vec<String> = Vec::new();

        match self.whois.lookup(domain).await {
            Ok(record) if record.has_identity() => {
                info_parts.extend(normalize::collector_lines(&record));
            }
            Ok(_) => {
                info_parts.push("WHOIS information incomplete or lookup failed.".to_string());
                errors.push(format!(
                    "WHOIS lookup returned no identifying data for {}",
                    domain
                ));
            }
            Err(failure) => {
                info_parts.push(failure.to_string());
                errors.push(format!("WHOIS lookup error for {}: {}", domain, failure));
            }
        }

        match self.dns.lookup_ips(domain).await {
            Ok(ips) if !ips.is_empty() => {
                info_parts.push(format!(
                    "Server IP (A/AAAA): {}",
                    normalize::display_ips(&ips)
                ));
            }
            Ok(_) => {
                info_parts.push("Server IP (A/AAAA): No A/AAAA record found".to_string());
            }
            Err(DnsError::NameNotFound) => {
                info_parts.push("Server IP (A/AAAA): NXDOMAIN (Domain does not exist)".to_string());
                errors.push(format!("DNS NXDOMAIN for {} (A/AAAA)", domain));
            }
            Err(DnsError::NoRecords) => {
                info_parts.push("Server IP (A/AAAA): No A/AAAA record found".to_string());
                errors.push(format!("DNS NoAnswer for {} (A/AAAA)", domain));
            }
            Err(DnsError::Timeout) => {
                info_parts.push("Server IP (A/AAAA): DNS Timeout".to_string());
                errors.push(format!("DNS Timeout for {} (A/AAAA)", domain));
            }
            Err(DnsError::Other(e)) => {
                info_parts.push(format!("Server IP (A/AAAA) Error: {}", e));
                errors.push(format!("DNS A/AAAA lookup error for {}: {}", domain, e));
            }
        }

        match self.dns.lookup_mx(domain).await {
            Ok(answers) if !answers.is_empty() => {
                info_parts.push(format!(
                    "Mail Server (MX): {}",
                    normalize::display_mx(&answers)
                ));
            }
            Ok(_) => {
                info_parts.push("Mail Server (MX): No MX record found".to_string());
            }
            Err(DnsError::NameNotFound) => {
                info_parts.push("Mail Server (MX): NXDOMAIN (Domain does not exist)".to_string());
                errors.push(format!("DNS NXDOMAIN for {} (MX)", domain));
            }
            Err(DnsError::NoRecords) => {
                info_parts.push("Mail Server (MX): No MX record found".to_string());
                errors.push(format!("DNS NoAnswer for {} (MX)", domain));
            }
            Err(DnsError::Timeout) => {
                info_parts.push("Mail Server (MX): DNS Timeout".to_string());
                errors.push(format!("DNS Timeout for {} (MX)", domain));
            }
            Err(DnsError::Other(e)) => {
                info_parts.push(format!("Mail Server (MX) Error: {}", e));
                errors.push(format!("DNS MX lookup error for {}: {}", domain, e));
            }
        }

        debug!(domain, issues = errors.len(), "collected domain info");

        let information = if errors.is_empty() {
            info_parts.join("\n")
        } else {
            format!(
                "{}\n\nEncountered issues:\n{}",
                info_parts.join("\n"),
                errors.join("\n")
            )
        };

        CollectorRow {
            domain: domain.to_string(),
            information,
        }
    }

    /// Run the collector over raw first-column values from the input CSV.
    ///
    /// Yields exactly one row per entry: empty cells become `EMPTY_ROW`
    /// placeholders, malformed domains are flagged without any network
    /// activity, and valid domains are looked up with the pacing delay
    /// applied afterwards.
    pub fn collect_stream<'a>(
        &'a self,
        entries: &[String],
    ) -> Pin<Box<dyn Stream<Item = CollectorRow> + 'a>> {
        let entries: Vec<String> = entries
            .iter()
            .map(|e| e.trim().to_lowercase())
            .collect();

        let stream = futures::stream::iter(entries).then(move |domain| async move {
            if domain.is_empty() {
                return CollectorRow {
                    domain: "EMPTY_ROW".to_string(),
                    information: "No domain provided in this row.".to_string(),
                };
            }

            if validate_query(&domain).is_err() {
                return CollectorRow {
                    domain,
                    information: "Invalid domain format".to_string(),
                };
            }

            let row = self.collect_domain_info(&domain).await;
            tokio::time::sleep(self.config.pacing_delay).await;
            row
        });

        Box::pin(stream)
    }

    /// Probe one (base, TLD) variant: DNS A/AAAA, NS, MX, then WHOIS unless
    /// DNS already proved the name does not exist.
    pub async fn probe_variant(&self, original: &str, base: &str, tld: &str) -> VariantRow {
        let full_domain = format!("{}{}", base, tld);
        let mut row = VariantRow::placeholder(original, base, tld, &full_domain);
        let mut dns_errors: Vec<String> = Vec::new();
        let mut whois_errors: Vec<String> = Vec::new();

        let ip_result = self.dns.lookup_ips(&full_domain).await;
        let mut resolved_ip = false;
        match &ip_result {
            Ok(ips) if !ips.is_empty() => {
                row.ip_addresses = normalize::display_ips(ips);
                row.dns_resolves = "Yes".to_string();
                resolved_ip = true;
            }
            Ok(_) => {}
            Err(DnsError::NameNotFound) => dns_errors.push("DNS NXDOMAIN (IP)".to_string()),
            Err(DnsError::NoRecords) => dns_errors.push("DNS NoAnswer (IP)".to_string()),
            Err(DnsError::Timeout) => dns_errors.push("DNS Timeout (IP)".to_string()),
            Err(DnsError::Other(e)) => dns_errors.push(format!("DNS IP Error: {}", e)),
        }

        let ns_result = self.dns.lookup_ns(&full_domain).await;
        let mut resolved_ns = false;
        match &ns_result {
            Ok(servers) if !servers.is_empty() => {
                row.name_servers = normalize::display_joined(servers);
                resolved_ns = true;
            }
            Ok(_) => {}
            Err(DnsError::NameNotFound) => {
                // Only worth a note when the IP lookup failed too
                if !resolved_ip {
                    dns_errors.push("DNS NXDOMAIN (NS)".to_string());
                }
            }
            Err(DnsError::NoRecords) => dns_errors.push("DNS NoAnswer (NS)".to_string()),
            Err(DnsError::Timeout) => dns_errors.push("DNS Timeout (NS)".to_string()),
            Err(DnsError::Other(e)) => dns_errors.push(format!("DNS NS Error: {}", e)),
        }

        match self.dns.lookup_mx(&full_domain).await {
            Ok(answers) if !answers.is_empty() => {
                row.mail_servers = normalize::display_mx(&answers);
            }
            Ok(_) => {}
            Err(DnsError::NameNotFound) => {
                if !resolved_ip && !resolved_ns {
                    dns_errors.push("DNS NXDOMAIN (MX)".to_string());
                }
            }
            Err(DnsError::NoRecords) => dns_errors.push("DNS NoAnswer (MX)".to_string()),
            Err(DnsError::Timeout) => dns_errors.push("DNS Timeout (MX)".to_string()),
            Err(DnsError::Other(e)) => dns_errors.push(format!("DNS MX Error: {}", e)),
        }

        if should_skip_whois(&ip_result, &ns_result) {
            whois_errors.push(WHOIS_SKIPPED_NOTE.to_string());
        } else {
            match self.whois.lookup(&full_domain).await {
                Ok(record) if record.has_identity() => {
                    row.whois_creation_date =
                        normalize::display_first_date(&record.creation_dates);
                    row.whois_updated_date = normalize::display_first_date(&record.updated_dates);
                    row.whois_expiration_date =
                        normalize::display_first_date(&record.expiration_dates);
                    row.whois_registrar = normalize::display_scalar(record.registrar.as_deref());
                    row.whois_domain_status = normalize::display_status(&record);
                    row.whois_registrant_org = normalize::display_registrant_org(&record);

                    if !resolved_ip && !resolved_ns {
                        whois_errors
                            .push("WHOIS found, but no active DNS (A/AAAA or NS).".to_string());
                    }
                }
                Ok(_) => {
                    if !resolved_ip && !resolved_ns {
                        whois_errors
                            .push("WHOIS data sparse or domain may be available.".to_string());
                    } else {
                        whois_errors.push(
                            "DNS resolves, but WHOIS lookup failed or returned no data."
                                .to_string(),
                        );
                    }
                }
                Err(failure) => whois_errors.push(failure.to_string()),
            }
        }

        row.notes = assemble_notes(&dns_errors, &whois_errors);
        debug!(domain = %full_domain, notes = %row.notes, "variant probed");
        row
    }

    /// Run the variant checker over a pre-computed plan.
    ///
    /// Yields exactly one row per plan item, in plan order, sleeping the
    /// pacing delay after each network-touching probe.
    pub fn variant_stream<'a>(
        &'a self,
        plan: Vec<VariantQuery>,
    ) -> Pin<Box<dyn Stream<Item = VariantRow> + 'a>> {
        info!(queries = plan.len(), "starting variant scan");

        let stream = futures::stream::iter(plan).then(move |query| async move {
            match query {
                VariantQuery::Invalid { original } => {
                    let mut row = VariantRow::placeholder(&original, "Error", "", "");
                    row.notes = "Invalid domain format".to_string();
                    row
                }
                VariantQuery::NoBase { original } => {
                    let mut row = VariantRow::placeholder(&original, "Error", "", "");
                    row.notes = "Could not extract base name from input.".to_string();
                    row
                }
                VariantQuery::Probe {
                    original,
                    base,
                    tld,
                } => {
                    let row = self.probe_variant(&original, &base, &tld).await;
                    tokio::time::sleep(self.config.pacing_delay).await;
                    row
                }
            }
        });

        Box::pin(stream)
    }
}
