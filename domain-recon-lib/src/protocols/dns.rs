//! DNS lookup wrapper.
//!
//! One bounded-time resolution per call, with failures classified into the
//! small [`DnsError`] taxonomy the report layer renders. The resolver is
//! built once from explicit options; there is no hidden global state.

use crate::error::DomainReconError;
use crate::types::{DnsError, LookupConfig, MxAnswer};
use hickory_resolver::config::LookupIpStrategy;
use hickory_resolver::proto::op::ResponseCode;
use hickory_resolver::proto::rr::{RData, RecordType};
use hickory_resolver::proto::ProtoErrorKind;
use hickory_resolver::{ResolveError, ResolveErrorKind, TokioResolver};
use std::time::Duration;
use tracing::debug;

/// DNS client over the system-configured resolver.
///
/// Each lookup is a one-shot query (no retransmission retries) bounded by
/// the configured timeout, with an outer guard timeout on top in case the
/// resolver misbehaves.
pub struct DnsClient {
    resolver: TokioResolver,
    timeout: Duration,
}

impl DnsClient {
    /// Build a client from explicit lookup configuration.
    ///
    /// Reads the system resolver configuration (`/etc/resolv.conf` on Unix)
    /// and applies the configured per-query timeout. Construction fails only
    /// when no resolver configuration can be found.
    pub fn new(config: &LookupConfig) -> Result<Self, DomainReconError> {
        let mut builder = TokioResolver::builder_tokio().map_err(|e| {
            DomainReconError::resolver(format!("failed to read system resolver config: {}", e))
        })?;

        let opts = builder.options_mut();
        opts.timeout = config.dns_timeout;
        opts.attempts = 1;
        opts.ip_strategy = LookupIpStrategy::Ipv4AndIpv6;

        Ok(Self {
            resolver: builder.build(),
            timeout: config.dns_timeout,
        })
    }

    /// Look up A and AAAA records for a name.
    ///
    /// Returns the merged address list, de-duplicated and sorted so that
    /// display output is deterministic.
    pub async fn lookup_ips(&self, domain: &str) -> Result<Vec<String>, DnsError> {
        let lookup = self
            .guarded(self.resolver.lookup_ip(domain.to_string()))
            .await?;

        let mut addresses: Vec<String> = lookup.iter().map(|ip| ip.to_string()).collect();
        addresses.sort();
        addresses.dedup();
        debug!(domain, count = addresses.len(), "A/AAAA lookup complete");
        Ok(addresses)
    }

    /// Look up NS records for a name.
    ///
    /// Target hostnames are returned with the trailing dot stripped,
    /// de-duplicated and sorted.
    pub async fn lookup_ns(&self, domain: &str) -> Result<Vec<String>, DnsError> {
        let lookup = self
            .guarded(self.resolver.lookup(domain.to_string(), RecordType::NS))
            .await?;

        let mut servers: Vec<String> = lookup
            .iter()
            .filter_map(|rdata| {
                if let RData::NS(ns) = rdata {
                    Some(ns.to_utf8().trim_end_matches('.').to_lowercase())
                } else {
                    None
                }
            })
            .collect();
        servers.sort();
        servers.dedup();
        debug!(domain, count = servers.len(), "NS lookup complete");
        Ok(servers)
    }

    /// Look up MX records for a name.
    ///
    /// Answers come back sorted by `(preference, exchange)` - the report
    /// layer depends on this ordering.
    pub async fn lookup_mx(&self, domain: &str) -> Result<Vec<MxAnswer>, DnsError> {
        let lookup = self
            .guarded(self.resolver.lookup(domain.to_string(), RecordType::MX))
            .await?;

        let mut answers: Vec<MxAnswer> = lookup
            .iter()
            .filter_map(|rdata| {
                if let RData::MX(mx) = rdata {
                    Some(MxAnswer {
                        preference: mx.preference(),
                        exchange: mx.exchange().to_utf8().trim_end_matches('.').to_lowercase(),
                    })
                } else {
                    None
                }
            })
            .collect();
        answers.sort();
        debug!(domain, count = answers.len(), "MX lookup complete");
        Ok(answers)
    }

    /// Run a lookup future under the outer guard timeout and classify
    /// failures.
    async fn guarded<T, F>(&self, lookup: F) -> Result<T, DnsError>
    where
        F: std::future::Future<Output = Result<T, ResolveError>>,
    {
        // Guard slightly past the resolver's own timeout so the resolver
        // gets the first chance to report its more precise error.
        let guard = self.timeout + Duration::from_millis(500);
        match tokio::time::timeout(guard, lookup).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(err)) => Err(classify_resolve_error(&err)),
            Err(_) => Err(DnsError::Timeout),
        }
    }
}

/// Map a resolver error onto the categorized [`DnsError`] taxonomy.
///
/// NXDOMAIN (authoritative negative) and "name exists, type absent" are
/// distinguished via the response code; everything else falls back to
/// message matching, which tracks how the resolver crate words its errors.
fn classify_resolve_error(err: &ResolveError) -> DnsError {
    if let ResolveErrorKind::Proto(proto) = err.kind() {
        if let ProtoErrorKind::NoRecordsFound { response_code, .. } = proto.kind() {
            return if *response_code == ResponseCode::NXDomain {
                DnsError::NameNotFound
            } else {
                DnsError::NoRecords
            };
        }
    }

    let text = err.to_string();
    let lowered = text.to_lowercase();
    if lowered.contains("timed out") || lowered.contains("timeout") {
        DnsError::Timeout
    } else if text.contains("NXDomain") {
        DnsError::NameNotFound
    } else if lowered.contains("no record") {
        DnsError::NoRecords
    } else {
        DnsError::Other(text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_client_creation_with_default_config() {
        let config = LookupConfig::default();
        // Fails only when the host has no resolver configuration at all.
        assert!(DnsClient::new(&config).is_ok());
    }

    /// Network test: resolving a well-known name returns sorted addresses.
    #[tokio::test]
    #[ignore]
    async fn test_lookup_ips_known_domain() {
        let client = DnsClient::new(&LookupConfig::default()).unwrap();
        let ips = client.lookup_ips("example.com").await.unwrap();
        assert!(!ips.is_empty());

        let mut sorted = ips.clone();
        sorted.sort();
        assert_eq!(ips, sorted);
    }

    /// Network test: a name under an unregistered label is NXDOMAIN.
    #[tokio::test]
    #[ignore]
    async fn test_lookup_nonexistent_name() {
        let client = DnsClient::new(&LookupConfig::default()).unwrap();
        let result = client
            .lookup_ips("this-name-does-not-exist-zzqp.example")
            .await;
        assert_eq!(result, Err(DnsError::NameNotFound));
    }
}
