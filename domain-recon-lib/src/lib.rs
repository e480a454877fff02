//! # Domain Recon Library
//!
//! Bulk DNS/WHOIS reconnaissance over domain names, for triaging potential
//! look-alike/phishing registrations.
//!
//! The library drives two batch pipelines: an info collector (one WHOIS plus
//! A/AAAA and MX lookups per domain) and a TLD variant checker (base-name
//! extraction, expansion against a candidate TLD catalog, DNS + conditional
//! WHOIS per variant). Both produce fixed-shape CSV rows where absent data
//! renders as the literal `"N/A"` and every input query yields exactly one
//! row, failures included.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use domain_recon_lib::DomainScanner;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let scanner = DomainScanner::new()?;
//!     let row = scanner.collect_domain_info("example.com").await;
//!
//!     println!("{}\n{}", row.domain, row.information);
//!     Ok(())
//! }
//! ```
//!
//! ## Features
//!
//! - **Typed WHOIS decoding**: the loosely-structured response is decoded
//!   once, at the protocol boundary, into an optional-field record
//! - **Categorized failures**: transport errors become short stable labels,
//!   never raw exception text
//! - **Public-suffix-aware extraction**: `sub.example.co.uk` -> `sub.example`
//! - **Deliberate pacing**: a fixed delay follows every completed query
//! - **Cost-aware WHOIS**: variants that DNS proves nonexistent skip WHOIS

// Re-export main public API types and functions
// This makes them available as domain_recon_lib::TypeName
pub use catalog::{default_catalog, normalize_catalog};
pub use config::{apply_file_config, merge_configs, ConfigManager, FileConfig};
pub use error::DomainReconError;
pub use extract::{base_name, validate_query};
pub use normalize::NOT_AVAILABLE;
pub use protocols::whois::get_whois_server;
pub use protocols::{parse_whois_response, DnsClient, WhoisClient};
pub use report::{CollectorRow, CsvSink, VariantRow};
pub use scanner::{
    assemble_notes, plan_variants, should_skip_whois, DomainScanner, VariantQuery,
    WHOIS_SKIPPED_NOTE,
};
pub use types::{DnsError, LookupConfig, MxAnswer, WhoisFailure, WhoisRecord};

// Public modules
pub mod normalize;

// Internal modules - these are not part of the public API
mod catalog;
mod config;
mod error;
mod extract;
mod protocols;
mod report;
mod scanner;
mod types;

// Type alias for convenience
pub type Result<T> = std::result::Result<T, DomainReconError>;

// Library version metadata
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
