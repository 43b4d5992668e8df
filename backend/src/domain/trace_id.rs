//! Correlation id for one HTTP request.
//!
//! The id lives in a tokio task-local for the duration of the request, so
//! [`super::Error`] values and log lines can pick it up without extra
//! parameters. Spawned tasks start outside the scope; wrap their futures in
//! [`TraceId::scope`] to carry it across.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Header echoing the trace id on every response. A well-formed UUID in the
/// same request header is adopted instead of minting a new one.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static CURRENT: TraceId;
}

/// UUID naming one request.
///
/// # Examples
/// ```
/// use roster::TraceId;
///
/// let inbound = TraceId::from_header_or_generate(Some("0d3c1f1e-8b4a-4a3e-9d55-2f1f3a5c9e01"));
/// assert_eq!(inbound.to_string(), "0d3c1f1e-8b4a-4a3e-9d55-2f1f3a5c9e01");
///
/// let fresh = TraceId::from_header_or_generate(Some("not-a-uuid"));
/// assert_ne!(fresh.to_string(), "not-a-uuid");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a random (v4) id.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt a caller-supplied header value when it parses as a UUID,
    /// otherwise mint a fresh id.
    #[must_use]
    pub fn from_header_or_generate(header: Option<&str>) -> Self {
        header
            .and_then(|value| value.trim().parse().ok())
            .unwrap_or_else(Self::generate)
    }

    /// Id of the request currently being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        CURRENT.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current id.
    ///
    /// # Examples
    /// ```
    /// use roster::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().expect("runtime").block_on(async {
    /// let id = TraceId::generate();
    /// assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        CURRENT.scope(trace_id, fut).await
    }
}

impl fmt::Display for TraceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.hyphenated(), f)
    }
}

impl FromStr for TraceId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    const NIL: &str = "00000000-0000-0000-0000-000000000000";

    #[tokio::test]
    async fn scope_sets_and_clears_current() {
        let id = TraceId::generate();
        assert_eq!(TraceId::scope(id, async { TraceId::current() }).await, Some(id));
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    #[case::exact(NIL)]
    #[case::padded("  00000000-0000-0000-0000-000000000000 ")]
    fn adopts_uuid_headers(#[case] header: &str) {
        assert_eq!(
            TraceId::from_header_or_generate(Some(header)).to_string(),
            NIL
        );
    }

    #[rstest]
    #[case::absent(None)]
    #[case::garbage(Some("abc"))]
    #[case::empty(Some(""))]
    fn generates_for_unusable_headers(#[case] header: Option<&str>) {
        let id = TraceId::from_header_or_generate(header);
        assert_ne!(id.to_string(), NIL);
        assert_eq!(id.to_string().len(), 36);
    }
}
