//! Core data types for domain reconnaissance.
//!
//! This module defines the main data structures used throughout the library:
//! lookup configuration, the typed WHOIS record produced at the protocol
//! boundary, and the categorized per-query failure types that the
//! normalization layer turns into stable display labels.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for lookup operations.
///
/// The original tooling this replaces kept resolver timeouts in implicit
/// global state; here the configuration is an explicit value handed to every
/// client at construction time.
#[derive(Debug, Clone)]
pub struct LookupConfig {
    /// Timeout for each DNS lookup
    /// Default: 2500 ms
    pub dns_timeout: Duration,

    /// Timeout for each WHOIS query
    /// Default: 10 seconds (WHOIS servers are slow and chase referrals)
    pub whois_timeout: Duration,

    /// Fixed delay after every completed domain or variant, to stay within
    /// registry/resolver politeness norms.
    /// Default: 800 ms
    pub pacing_delay: Duration,

    /// TLD catalog override for variant expansion.
    /// If None, the built-in catalog is used.
    pub tlds: Option<Vec<String>>,
}

impl Default for LookupConfig {
    /// Create a sensible default configuration.
    ///
    /// These defaults match the pacing and timeouts the batch tools have
    /// always used; they are conservative on purpose.
    fn default() -> Self {
        Self {
            dns_timeout: Duration::from_millis(2500),
            whois_timeout: Duration::from_secs(10),
            pacing_delay: Duration::from_millis(800),
            tlds: None,
        }
    }
}

impl LookupConfig {
    /// Set a custom DNS lookup timeout.
    pub fn with_dns_timeout(mut self, timeout: Duration) -> Self {
        self.dns_timeout = timeout;
        self
    }

    /// Set a custom WHOIS query timeout.
    pub fn with_whois_timeout(mut self, timeout: Duration) -> Self {
        self.whois_timeout = timeout;
        self
    }

    /// Set the inter-query pacing delay.
    pub fn with_pacing_delay(mut self, delay: Duration) -> Self {
        self.pacing_delay = delay;
        self
    }

    /// Set the TLD catalog for variant expansion.
    pub fn with_tlds(mut self, tlds: Vec<String>) -> Self {
        self.tlds = Some(tlds);
        self
    }
}

/// Typed WHOIS record with explicit per-field presence.
///
/// WHOIS responses are loosely structured text whose fields may be absent,
/// single-valued, or repeated across registry/registrar sections. The
/// protocol adapter decodes that shape exactly once, at the boundary, into
/// this record; everything downstream works with plain options and vectors.
///
/// Date fields are vectors because registries frequently repeat them
/// (`Updated Date:` appears in both the registry and registrar blocks);
/// the normalizer takes the first occurrence for display.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct WhoisRecord {
    /// The domain name as echoed by the registry. Absent when the lookup
    /// returned no identifying data - callers treat that as the distinct
    /// "no data" signal rather than a regular field.
    pub domain_name: Option<String>,

    /// Registry-assigned domain identifier
    pub registry_domain_id: Option<String>,

    /// Registrar WHOIS server hostname
    pub whois_server: Option<String>,

    /// Sponsoring registrar
    pub registrar: Option<String>,

    /// Registrar URL as reported (the normalizer synthesizes a guess from
    /// the registrar name when this is absent)
    pub registrar_url: Option<String>,

    /// Registrar IANA id
    pub registrar_iana_id: Option<String>,

    /// Registrar abuse contact email
    pub abuse_email: Option<String>,

    /// Registrar abuse contact phone
    pub abuse_phone: Option<String>,

    /// Last-updated dates, in response order
    pub updated_dates: Vec<String>,

    /// Creation dates, in response order
    pub creation_dates: Vec<String>,

    /// Expiration dates, in response order
    pub expiration_dates: Vec<String>,

    /// EPP status codes, in response order
    pub statuses: Vec<String>,

    /// Delegated name servers, in response order
    pub name_servers: Vec<String>,

    /// Registrant contact (often masked by privacy services)
    pub registrant_name: Option<String>,
    pub registrant_org: Option<String>,
    pub registrant_email: Option<String>,

    /// Administrative contact
    pub admin_name: Option<String>,
    pub admin_org: Option<String>,
    pub admin_email: Option<String>,

    /// Technical contact
    pub tech_name: Option<String>,
    pub tech_org: Option<String>,
    pub tech_email: Option<String>,
}

impl WhoisRecord {
    /// Whether the response carried an identifying domain-name field.
    ///
    /// A record without one means the lookup returned no usable data; the
    /// caller decides whether to also flag "domain may be unregistered".
    pub fn has_identity(&self) -> bool {
        self.domain_name
            .as_deref()
            .map(|d| !d.trim().is_empty())
            .unwrap_or(false)
    }
}

/// Categorized WHOIS transport failure.
///
/// Raw exception text from the transport is never written to output rows;
/// each known failure class maps to a short, stable label so a human can
/// filter rows on it.
#[derive(Debug, Clone, PartialEq)]
pub enum WhoisFailure {
    /// The registry answered "no match" / "not found": the domain is
    /// likely unregistered.
    NoMatch,

    /// The peer reset the connection mid-query.
    ConnectionReset,

    /// The query did not complete within the configured timeout.
    Timeout,

    /// The response arrived but had an unexpected shape.
    Malformed,

    /// Anything else, with a short description.
    Other(String),
}

impl std::fmt::Display for WhoisFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NoMatch => write!(f, "WHOIS: No match/Not found (likely available)"),
            Self::ConnectionReset => write!(f, "WHOIS Error: Connection reset"),
            Self::Timeout => write!(f, "WHOIS Error: Timeout"),
            Self::Malformed => write!(f, "WHOIS Error: Malformed response"),
            Self::Other(message) => write!(f, "WHOIS General Error: {}", message),
        }
    }
}

/// Categorized DNS lookup failure.
#[derive(Debug, Clone, PartialEq)]
pub enum DnsError {
    /// Authoritative negative answer: the name does not exist (NXDOMAIN).
    NameNotFound,

    /// The name exists but has no records of the requested type.
    NoRecords,

    /// The lookup did not complete within the configured timeout.
    Timeout,

    /// Anything else, with a short description.
    Other(String),
}

impl std::fmt::Display for DnsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NameNotFound => write!(f, "NXDOMAIN"),
            Self::NoRecords => write!(f, "NoAnswer"),
            Self::Timeout => write!(f, "Timeout"),
            Self::Other(message) => write!(f, "{}", message),
        }
    }
}

/// A single MX answer.
///
/// Ordered by `(preference, exchange)`; the normalizer depends on this
/// ordering for deterministic display output.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MxAnswer {
    /// Preference value (lower is more preferred)
    pub preference: u16,

    /// Exchange hostname, trailing dot stripped
    pub exchange: String,
}

impl std::fmt::Display for MxAnswer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.preference, self.exchange)
    }
}
