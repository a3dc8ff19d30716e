//! The hand-analysis seam.
//!
//! Analysis is an external capability with a narrow contract: hand details
//! plus a signed result go in, free-text commentary comes out. The concrete
//! provider lives in `felt-analysis`; tests substitute stubs.

use std::future::Future;

use thiserror::Error;

/// Failure modes of the analysis collaborator.
#[derive(Debug, Error)]
pub enum AnalysisError {
  /// No credential is configured; the provider cannot be called at all.
  #[error("analysis service not configured")]
  NotConfigured,

  /// The provider call failed: transport, status, or a malformed reply.
  #[error("analysis provider error: {0}")]
  Upstream(String),
}

/// Abstraction over the external hand-analysis provider.
pub trait HandAnalyst: Send + Sync {
  /// Produce commentary for a hand. `result` is the signed monetary delta.
  fn analyze<'a>(
    &'a self,
    details: &'a str,
    result: i64,
  ) -> impl Future<Output = Result<String, AnalysisError>> + Send + 'a;
}
