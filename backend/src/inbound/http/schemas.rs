//! OpenAPI schema definitions for types that do not derive `ToSchema`.
//!
//! The error envelope and the pagination crate stay framework-agnostic, so
//! their OpenAPI shapes are registered here through utoipa's `as = ...`
//! aliases.

use utoipa::ToSchema;

use crate::domain::{SnippetWithOwner, UserWithSnippets};

/// OpenAPI schema for [`crate::domain::ErrorCode`].
///
/// Stable machine-readable error codes returned in API error responses.
#[derive(ToSchema)]
#[schema(as = crate::domain::ErrorCode)]
pub enum ErrorCodeSchema {
    /// The request is malformed or fails validation.
    #[schema(rename = "invalid_request")]
    InvalidRequest,
    /// Authentication failed or is missing.
    #[schema(rename = "unauthorized")]
    Unauthorized,
    /// Authenticated but not permitted to perform this action.
    #[schema(rename = "forbidden")]
    Forbidden,
    /// The requested resource does not exist.
    #[schema(rename = "not_found")]
    NotFound,
    /// A backing service is temporarily unavailable.
    #[schema(rename = "service_unavailable")]
    ServiceUnavailable,
    /// An unexpected error occurred on the server.
    #[schema(rename = "internal_error")]
    InternalError,
}

/// OpenAPI schema for [`crate::domain::Error`].
///
/// Validation failures carry `details.errors`, a map from field name to
/// `{ "message": ... }`.
#[derive(ToSchema)]
#[schema(as = crate::domain::Error)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct ErrorSchema {
    /// Stable machine-readable error code.
    #[schema(example = "invalid_request")]
    code: ErrorCodeSchema,
    /// Human-readable message returned to clients.
    #[schema(example = "validation failed")]
    message: String,
    /// Correlation identifier echoed in the `trace-id` response header.
    #[schema(example = "3fa85f64-5717-4562-b3fc-2c963f66afa6")]
    trace_id: Option<String>,
    /// Supplementary error details for clients.
    #[schema(example = json!({"errors": {"email": {"message": "email is already in use"}}}))]
    details: Option<serde_json::Value>,
}

/// OpenAPI schema for a page of users with their snippets.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct UserPageSchema {
    /// Records on this page.
    items: Vec<UserWithSnippets>,
    /// One-based page number.
    #[schema(example = 2)]
    page: u32,
    /// Requested page size.
    #[schema(example = 10)]
    take: u32,
    /// Whether at least one more record exists.
    has_more: bool,
}

/// OpenAPI schema for a page of snippets with their owners.
#[derive(ToSchema)]
#[schema(rename_all = "camelCase")]
#[expect(
    dead_code,
    reason = "Used only for OpenAPI schema generation via utoipa"
)]
pub struct SnippetPageSchema {
    /// Records on this page.
    items: Vec<SnippetWithOwner>,
    /// One-based page number.
    #[schema(example = 1)]
    page: u32,
    /// Requested page size.
    #[schema(example = 10)]
    take: u32,
    /// Whether at least one more record exists.
    has_more: bool,
}
