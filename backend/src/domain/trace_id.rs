//! Correlation identifier shared by a request's log lines and error bodies.
//!
//! The HTTP middleware either adopts the caller's `trace-id` header or mints
//! a fresh UUID, then runs the request inside [`TraceId::scope`]. Anything
//! that needs the identifier later (error envelopes, log fields) reads it
//! back through [`TraceId::current`] instead of threading it as a parameter.
//!
//! The value lives in a Tokio task-local, which spawned tasks and blocking
//! threads do not inherit. Wrap such work in [`TraceId::scope`] again.

use std::fmt;
use std::future::Future;
use std::str::FromStr;

use tokio::task_local;
use uuid::Uuid;

/// Response header carrying the request trace identifier.
pub const TRACE_ID_HEADER: &str = "trace-id";

task_local! {
    static TRACE_ID: TraceId;
}

/// Per-request trace identifier.
///
/// # Examples
/// ```
/// use runit::TraceId;
///
/// fn current_label() -> String {
///     TraceId::current().map_or_else(|| "untraced".to_owned(), |id| id.to_string())
/// }
/// assert_eq!(current_label(), "untraced");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TraceId(Uuid);

impl TraceId {
    /// Mint a random identifier.
    #[must_use]
    pub(crate) fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Adopt an identifier supplied by the caller.
    ///
    /// Only a non-nil hyphenated UUID is accepted so clients cannot inject
    /// arbitrary text into logs.
    #[must_use]
    pub fn from_inbound(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.len() != uuid::fmt::Hyphenated::LENGTH {
            return None;
        }
        Uuid::parse_str(raw)
            .ok()
            .filter(|uuid| !uuid.is_nil())
            .map(Self)
    }

    /// Identifier of the request being served, if any.
    #[must_use]
    pub fn current() -> Option<Self> {
        TRACE_ID.try_with(|id| *id).ok()
    }

    /// Run `fut` with `trace_id` as the current identifier.
    ///
    /// # Examples
    /// ```
    /// use runit::TraceId;
    ///
    /// # tokio::runtime::Runtime::new().unwrap().block_on(async {
    /// let trace_id: TraceId = "3f2b8c1e-0d4a-4c59-9e2f-6a7b8c9d0e1f"
    ///     .parse()
    ///     .expect("valid UUID");
    /// let observed = TraceId::scope(trace_id, async move { TraceId::current() }).await;
    /// assert_eq!(observed, Some(trace_id));
    /// # });
    /// ```
    pub async fn scope<Fut>(trace_id: Self, fut: Fut) -> Fut::Output
    where
        Fut: Future,
    {
        TRACE_ID.scope(trace_id, fut).await
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
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("3f2b8c1e-0d4a-4c59-9e2f-6a7b8c9d0e1f", true)]
    #[case("  3f2b8c1e-0d4a-4c59-9e2f-6a7b8c9d0e1f ", true)]
    #[case("00000000-0000-0000-0000-000000000000", false)]
    #[case("3f2b8c1e0d4a4c599e2f6a7b8c9d0e1f", false)]
    #[case("drop table users", false)]
    #[case("", false)]
    fn inbound_identifiers_must_be_hyphenated_uuids(#[case] raw: &str, #[case] accepted: bool) {
        assert_eq!(TraceId::from_inbound(raw).is_some(), accepted);
    }

    #[tokio::test]
    async fn scope_sets_and_restores_the_identifier() {
        assert!(TraceId::current().is_none());
        let outer = TraceId::generate();
        let inner = TraceId::generate();
        let (seen_inner, seen_outer) = TraceId::scope(outer, async move {
            let seen_inner = TraceId::scope(inner, async { TraceId::current() }).await;
            (seen_inner, TraceId::current())
        })
        .await;
        assert_eq!(seen_inner, Some(inner));
        assert_eq!(seen_outer, Some(outer));
        assert!(TraceId::current().is_none());
    }

    #[rstest]
    fn display_uses_hyphenated_lowercase() {
        let id: TraceId = "3F2B8C1E-0D4A-4C59-9E2F-6A7B8C9D0E1F"
            .parse()
            .expect("valid UUID");
        assert_eq!(id.to_string(), "3f2b8c1e-0d4a-4c59-9e2f-6a7b8c9d0e1f");
    }
}
