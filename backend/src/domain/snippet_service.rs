//! Snippet domain services.
//!
//! Owner-scoped reads and writes for the editor plus the public share-link
//! lookup. New snippets get a random slug; the store rejects a slug already
//! used by the same owner and the service retries with a fresh one.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::domain::port_errors::map_snippet_error;
use crate::domain::ports::{
    SnippetDraft, SnippetRepository, SnippetRepositoryError, SnippetsCommand, SnippetsQuery,
};
use crate::domain::{
    Error, FieldErrors, NewSnippet, Slug, Snippet, SnippetCode, SnippetId, SnippetName, UserId,
    Username,
};

/// Slug generation attempts before a create is abandoned.
pub const MAX_SLUG_ATTEMPTS: usize = 5;

fn parse_draft(draft: SnippetDraft) -> Result<(SnippetName, SnippetCode), Error> {
    let mut errors = FieldErrors::default();
    let name = errors.check("name", SnippetName::new(&draft.name));
    let code = errors.check("code", SnippetCode::new(draft.code));
    errors.into_result()?;
    match (name, code) {
        (Some(name), Some(code)) => Ok((name, code)),
        _ => Err(Error::internal("snippet fields missing after validation")),
    }
}

fn snippet_not_found() -> Error {
    Error::not_found("snippet not found")
}

/// Snippet service implementing the snippet driving ports.
#[derive(Clone)]
pub struct SnippetService<S> {
    snippets: Arc<S>,
}

impl<S> SnippetService<S> {
    /// Create a new service with the given repository.
    pub fn new(snippets: Arc<S>) -> Self {
        Self { snippets }
    }
}

#[async_trait]
impl<S> SnippetsCommand for SnippetService<S>
where
    S: SnippetRepository,
{
    async fn create(&self, owner: UserId, draft: SnippetDraft) -> Result<Snippet, Error> {
        let (name, code) = parse_draft(draft)?;

        for attempt in 1..=MAX_SLUG_ATTEMPTS {
            let candidate = NewSnippet {
                owner_id: owner,
                name: name.clone(),
                code: code.clone(),
                slug: Slug::generate(),
            };
            match self.snippets.create(&candidate).await {
                Ok(snippet) => return Ok(snippet),
                Err(SnippetRepositoryError::SlugConflict { slug }) => {
                    debug!(%owner, %slug, attempt, "slug collision; regenerating");
                }
                Err(err) => return Err(map_snippet_error(err)),
            }
        }

        warn!(%owner, "could not allocate a unique snippet slug");
        Err(Error::internal("could not allocate a unique snippet slug"))
    }

    async fn update(
        &self,
        id: SnippetId,
        owner: UserId,
        draft: SnippetDraft,
    ) -> Result<Snippet, Error> {
        let (name, code) = parse_draft(draft)?;
        self.snippets
            .update(id, owner, &name, &code)
            .await
            .map_err(map_snippet_error)?
            .ok_or_else(snippet_not_found)
    }

    async fn rename(&self, id: SnippetId, owner: UserId, name: String) -> Result<(), Error> {
        let mut errors = FieldErrors::default();
        let name = errors.check("name", SnippetName::new(&name));
        errors.into_result()?;
        let Some(name) = name else {
            return Err(Error::internal("snippet name missing after validation"));
        };

        let matched = self
            .snippets
            .rename(id, owner, &name)
            .await
            .map_err(map_snippet_error)?;
        if matched {
            Ok(())
        } else {
            Err(snippet_not_found())
        }
    }

    async fn delete(&self, id: SnippetId, owner: UserId) -> Result<(), Error> {
        self.snippets
            .delete_owned(id, owner)
            .await
            .map_err(map_snippet_error)
    }

    async fn delete_all_for_user(&self, owner: UserId) -> Result<(), Error> {
        self.snippets
            .delete_all_for_user(owner)
            .await
            .map_err(map_snippet_error)
    }
}

#[async_trait]
impl<S> SnippetsQuery for SnippetService<S>
where
    S: SnippetRepository,
{
    async fn list_by_owner(&self, owner: UserId) -> Result<Vec<Snippet>, Error> {
        self.snippets
            .list_by_owner(owner)
            .await
            .map_err(map_snippet_error)
    }

    async fn get(&self, id: SnippetId, owner: UserId) -> Result<Snippet, Error> {
        self.snippets
            .find_by_id(id)
            .await
            .map_err(map_snippet_error)?
            .filter(|snippet| snippet.owner_id == owner)
            .ok_or_else(snippet_not_found)
    }

    async fn view_by_slug(&self, username: &str, slug: &str) -> Result<Snippet, Error> {
        let (Ok(username), Ok(slug)) = (Username::new(username), Slug::new(slug)) else {
            return Err(snippet_not_found());
        };
        self.snippets
            .find_by_owner_and_slug(&username, &slug)
            .await
            .map_err(map_snippet_error)?
            .ok_or_else(snippet_not_found)
    }
}

#[cfg(test)]
#[path = "snippet_service_tests.rs"]
mod tests;
