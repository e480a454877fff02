//! WHOIS client and response decoding.
//!
//! Queries go through the system's `whois` command-line tool, targeted at
//! the authoritative server for the TLD when IANA referral discovery finds
//! one. The loosely-structured response text is decoded exactly once, here
//! at the boundary, into the typed [`WhoisRecord`]; transport failures are
//! categorized into [`WhoisFailure`] so raw exception text never reaches
//! the output rows.

use crate::types::{WhoisFailure, WhoisRecord};
use lazy_static::lazy_static;
use std::collections::HashMap;
use std::sync::Mutex;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

lazy_static! {
    /// TLD -> authoritative WHOIS server discovered via IANA referral.
    /// `None` entries record TLDs whose discovery already failed, so each
    /// TLD costs at most one IANA query per process.
    static ref REFERRAL_CACHE: Mutex<HashMap<String, Option<String>>> =
        Mutex::new(HashMap::new());
}

/// WHOIS client using the system's `whois` command.
#[derive(Clone)]
pub struct WhoisClient {
    /// Timeout for WHOIS queries
    timeout: Duration,
}

impl WhoisClient {
    /// Create a new WHOIS client with default settings.
    pub fn new() -> Self {
        Self {
            timeout: Duration::from_secs(10),
        }
    }

    /// Create a new WHOIS client with custom timeout.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self { timeout }
    }

    /// Query registration data for a domain.
    ///
    /// One query per call: the authoritative server for the TLD is looked
    /// up in the referral cache (populated from IANA on first use), and the
    /// query is targeted at it when known, falling back to the bare
    /// `whois <domain>` server selection otherwise.
    ///
    /// # Errors
    ///
    /// Returns a categorized [`WhoisFailure`]; never raw transport text.
    pub async fn lookup(&self, domain: &str) -> Result<WhoisRecord, WhoisFailure> {
        let server = match domain.rsplit('.').next() {
            Some(tld) if !tld.is_empty() => get_whois_server(tld).await,
            _ => None,
        };

        let result = tokio::time::timeout(self.timeout, run_whois(domain, server.as_deref())).await;

        let text = match result {
            Ok(Ok(text)) => text,
            Ok(Err(failure)) => return Err(failure),
            Err(_) => return Err(WhoisFailure::Timeout),
        };

        if is_no_match(&text) {
            debug!(domain, "WHOIS reports no match");
            return Err(WhoisFailure::NoMatch);
        }

        if text.trim().is_empty() || !text.lines().any(|line| line.contains(':')) {
            return Err(WhoisFailure::Malformed);
        }

        Ok(parse_whois_response(&text))
    }
}

impl Default for WhoisClient {
    fn default() -> Self {
        Self::new()
    }
}

/// Execute the whois command, targeted when a server is known.
async fn run_whois(domain: &str, server: Option<&str>) -> Result<String, WhoisFailure> {
    let mut command = Command::new("whois");
    if let Some(server) = server {
        command.arg("-h").arg(server);
    }
    command.arg(domain);

    let output = command.output().await.map_err(classify_io_failure)?;

    let stdout = String::from_utf8_lossy(&output.stdout).to_string();
    if stdout.trim().is_empty() && !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_lowercase();
        if stderr.contains("connection reset") {
            return Err(WhoisFailure::ConnectionReset);
        }
        if stderr.contains("timed out") || stderr.contains("timeout") {
            return Err(WhoisFailure::Timeout);
        }
        if !stderr.trim().is_empty() {
            return Err(WhoisFailure::Other(
                stderr.lines().next().unwrap_or("whois failed").to_string(),
            ));
        }
    }

    Ok(stdout)
}

/// Map a process-spawn I/O error onto the failure taxonomy.
fn classify_io_failure(err: std::io::Error) -> WhoisFailure {
    match err.kind() {
        std::io::ErrorKind::ConnectionReset => WhoisFailure::ConnectionReset,
        std::io::ErrorKind::TimedOut => WhoisFailure::Timeout,
        _ => WhoisFailure::Other(format!(
            "failed to execute whois command: {}. Make sure 'whois' is installed.",
            err
        )),
    }
}

/// Registry wordings that mean "this domain has no registration".
fn is_no_match(response: &str) -> bool {
    let lowered = response.to_lowercase();
    let no_match_patterns = [
        "no match",
        "not found",
        "no data found",
        "no entries found",
        "domain not found",
        "no matching record",
        "no matching entry",
        "domain name not found",
        "the queried object does not exist",
        "object does not exist",
        "not registered",
        "this domain name has not been registered",
        "status: available",
        "status: free",
    ];

    no_match_patterns
        .iter()
        .any(|pattern| lowered.contains(pattern))
}

/// Decode a raw WHOIS response into the typed record.
///
/// Line-based `Key: Value` parsing. Scalar fields keep their first
/// occurrence (registry data precedes registrar boilerplate); repeatable
/// fields (dates, statuses, name servers) accumulate in response order and
/// are de-duplicated at display time.
pub fn parse_whois_response(response: &str) -> WhoisRecord {
    let mut record = WhoisRecord::default();

    for line in response.lines() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('%') || line.starts_with('#') {
            continue;
        }
        // The Verisign trailer starts with ">>>"; everything after it is
        // boilerplate about the database itself.
        if line.starts_with(">>>") {
            break;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        let value = value.trim();
        if value.is_empty() {
            continue;
        }

        match key.as_str() {
            "domain name" | "domain" => {
                scalar(&mut record.domain_name, &value.to_lowercase());
            }
            "registry domain id" => scalar(&mut record.registry_domain_id, value),
            "registrar whois server" | "whois server" | "whois" => {
                scalar(&mut record.whois_server, value)
            }
            "registrar url" => scalar(&mut record.registrar_url, value),
            "registrar" | "sponsoring registrar" => scalar(&mut record.registrar, value),
            "registrar iana id" => scalar(&mut record.registrar_iana_id, value),
            "registrar abuse contact email" => scalar(&mut record.abuse_email, value),
            "registrar abuse contact phone" => scalar(&mut record.abuse_phone, value),
            "updated date" | "last updated" | "last-update" | "modified" => {
                record.updated_dates.push(value.to_string())
            }
            "creation date" | "created" | "registered" | "registered on" => {
                record.creation_dates.push(value.to_string())
            }
            "registry expiry date"
            | "registrar registration expiration date"
            | "expiration date"
            | "expiry date"
            | "expires"
            | "expire" => record.expiration_dates.push(value.to_string()),
            "domain status" | "status" => {
                // EPP status lines carry a trailing ICANN URL; only the
                // code itself is a status value.
                let code = value.split_whitespace().next().unwrap_or(value);
                record.statuses.push(code.to_string());
            }
            "name server" | "nameserver" | "nserver" => record
                .name_servers
                .push(value.to_lowercase()),
            "registrant name" => scalar(&mut record.registrant_name, value),
            "registrant organization" | "registrant organisation" | "org" => {
                scalar(&mut record.registrant_org, value)
            }
            "registrant email" => scalar(&mut record.registrant_email, value),
            "admin name" => scalar(&mut record.admin_name, value),
            "admin organization" | "admin organisation" => scalar(&mut record.admin_org, value),
            "admin email" => scalar(&mut record.admin_email, value),
            "tech name" => scalar(&mut record.tech_name, value),
            "tech organization" | "tech organisation" => scalar(&mut record.tech_org, value),
            "tech email" => scalar(&mut record.tech_email, value),
            _ => {}
        }
    }

    record
}

/// Keep the first occurrence of a scalar field.
fn scalar(slot: &mut Option<String>, value: &str) {
    if slot.is_none() {
        *slot = Some(value.to_string());
    }
}

/// Discover the authoritative WHOIS server for a TLD via IANA referral.
///
/// Results (including failures) are cached per TLD for the lifetime of the
/// process, so repeated variant queries against the same TLD cost a single
/// IANA round trip.
pub async fn get_whois_server(tld: &str) -> Option<String> {
    let tld_lower = tld.to_lowercase();

    if let Ok(cache) = REFERRAL_CACHE.lock() {
        if let Some(cached) = cache.get(&tld_lower) {
            return cached.clone();
        }
    }

    let discovered = discover_whois_server(&tld_lower).await;
    if discovered.is_none() {
        warn!(tld = %tld_lower, "no WHOIS referral found via IANA");
    }

    if let Ok(mut cache) = REFERRAL_CACHE.lock() {
        cache.insert(tld_lower, discovered.clone());
    }

    discovered
}

/// Query `whois.iana.org` for a TLD and parse the referral.
async fn discover_whois_server(tld: &str) -> Option<String> {
    let result = tokio::time::timeout(Duration::from_secs(10), async {
        let output = Command::new("whois")
            .arg("-h")
            .arg("whois.iana.org")
            .arg(tld)
            .output()
            .await
            .ok()?;

        let response = String::from_utf8_lossy(&output.stdout);
        parse_iana_referral(&response)
    })
    .await;

    result.unwrap_or(None)
}

/// Parse an IANA WHOIS response for the authoritative WHOIS server.
///
/// The IANA response may use either `refer:` or `whois:` to name the
/// authoritative server; `refer:` is canonical and wins when both appear.
fn parse_iana_referral(response: &str) -> Option<String> {
    let mut whois_server = None;

    for line in response.lines() {
        let line_trimmed = line.trim();
        if let Some(server) = line_trimmed.strip_prefix("refer:") {
            let server = server.trim();
            if !server.is_empty() {
                return Some(server.to_string());
            }
        } else if let Some(server) = line_trimmed.strip_prefix("whois:") {
            let server = server.trim();
            if !server.is_empty() {
                whois_server = Some(server.to_string());
            }
        }
    }

    whois_server
}
