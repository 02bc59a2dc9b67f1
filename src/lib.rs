//! # dns-reconciler
//!
//! Declarative DNS record reconciliation for the [Porkbun](https://porkbun.com/)
//! record API.
//!
//! An orchestrator declares the desired shape of a DNS record; this crate
//! reconciles that declaration against live remote state across
//! Create/Read/Update/Delete/Import operations. Two mechanisms make the
//! remote calls trustworthy:
//!
//! - a generic [`retry`] executor with exponential backoff and explicit
//!   failure classification, and
//! - the [`RecordReconciler`], which maps between the declared record
//!   specification and the remote representation, normalizing names and
//!   reporting drift.
//!
//! ## Feature Flags
//!
//! - **`native-tls`** *(default)* — Use the platform's native TLS
//!   implementation.
//! - **`rustls`** — Use rustls. Recommended for cross-compilation.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use dns_reconciler::{ApiCredentials, PorkbunClient, RecordReconciler, RecordSpec};
//! use tokio_util::sync::CancellationToken;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let credentials = ApiCredentials::new("pk1_...", "sk1_...")?;
//!     let reconciler = RecordReconciler::new(PorkbunClient::new(credentials), 5);
//!
//!     let spec = RecordSpec {
//!         name: "www".to_string(),
//!         domain: "example.com".to_string(),
//!         record_type: "A".to_string(),
//!         content: "1.2.3.4".to_string(),
//!         ttl: Some("600".to_string()),
//!         ..RecordSpec::default()
//!     };
//!
//!     let outcome = reconciler.create(&spec, &CancellationToken::new()).await;
//!     for diagnostic in &outcome.diagnostics {
//!         eprintln!("{}: {}", diagnostic.summary, diagnostic.detail);
//!     }
//!     if let Some(state) = outcome.state {
//!         println!("record id: {}", state.id.unwrap_or_default());
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Error Handling
//!
//! The record API boundary reports failures as [`ApiError`], a closed set
//! of tagged variants the retry layer classifies:
//!
//! - [`ApiError::Status`] — the API rejected the request; terminal,
//!   never retried.
//! - [`ApiError::ServerFault`] — HTTP fault code; retried only when the
//!   code is in the policy's retryable set (default `{503}`, the code the
//!   API uses for rate limiting).
//! - [`ApiError::Transport`] — connectivity or decode failure; retried
//!   by default until attempts exhaust.
//!
//! Reconciler operations never panic or bubble errors: each returns a
//! [`StepResult`] carrying the updated state (when one was produced) and
//! severity-tagged [`Diagnostics`].

mod error;
mod naming;
mod porkbun;
mod reconciler;
pub mod retry;
mod traits;
mod types;

// Re-export error types
pub use error::{ApiError, ApiResult, CredentialError, ReconcileError, RetryError};

// Re-export the name normalizer
pub use naming::subdomain_fragment;

// Re-export the concrete client
pub use porkbun::PorkbunClient;

// Re-export the reconciliation core
pub use reconciler::RecordReconciler;
pub use retry::{Classification, RetryPolicy};

// Re-export the record API boundary
pub use traits::RecordApi;

// Re-export types
pub use types::{
    ApiCredentials, Diagnostic, Diagnostics, ManagedRecord, ObservedRecord, RecordPayload,
    RecordSpec, Severity, StepResult,
};
