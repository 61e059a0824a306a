//! Shared validation helpers for inbound HTTP adapters.
//!
//! Extractor failures (malformed JSON, query strings, or path segments) are
//! turned into the domain `invalid_request` envelope instead of Actix's plain
//! text bodies.

use actix_web::{HttpRequest, web};
use pagination::{PageQuery, PageRequest, PageRequestError};

use crate::domain::{Error, FieldErrors, SnippetId, UserId};

/// JSON extractor configuration producing domain errors.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid JSON body: {err}")).into()
    })
}

/// Query-string extractor configuration producing domain errors.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid query string: {err}")).into()
    })
}

/// Path extractor configuration producing domain errors.
pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req: &HttpRequest| {
        Error::invalid_request(format!("invalid path parameter: {err}")).into()
    })
}

/// Validate `page`/`take`, applying defaults for missing values.
pub(crate) fn page_request(query: PageQuery) -> Result<PageRequest, Error> {
    PageRequest::from_query(query).map_err(|err| {
        let field = match err {
            PageRequestError::ZeroPage => "page",
            PageRequestError::ZeroTake | PageRequestError::TakeTooLarge { .. } => "take",
        };
        let mut errors = FieldErrors::default();
        errors.push(field, err.to_string());
        Error::validation(errors)
    })
}

/// Path user id. Identifiers that can never exist are reported as missing.
pub(crate) fn user_id_param(raw: i64) -> Result<UserId, Error> {
    UserId::new(raw).map_err(|_| Error::not_found("user not found"))
}

/// Path snippet id. Identifiers that can never exist are reported as missing.
pub(crate) fn snippet_id_param(raw: i64) -> Result<SnippetId, Error> {
    SnippetId::new(raw).map_err(|_| Error::not_found("snippet not found"))
}
