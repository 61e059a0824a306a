//! Tests for the snippet service.

use std::sync::Arc;

use rstest::{fixture, rstest};

use super::*;
use crate::domain::ErrorCode;
use crate::domain::ports::MockSnippetRepository;

#[fixture]
fn owner() -> UserId {
    UserId::new(1).expect("valid id")
}

#[fixture]
fn snippet_id() -> SnippetId {
    SnippetId::new(10).expect("valid id")
}

fn stored(candidate: &NewSnippet, id: i64) -> Snippet {
    Snippet {
        id: SnippetId::new(id).expect("valid id"),
        owner_id: candidate.owner_id,
        name: candidate.name.clone(),
        code: candidate.code.clone(),
        slug: candidate.slug.clone(),
    }
}

fn draft(name: &str, code: &str) -> SnippetDraft {
    SnippetDraft {
        name: name.to_owned(),
        code: code.to_owned(),
    }
}

fn make_service(repo: MockSnippetRepository) -> SnippetService<MockSnippetRepository> {
    SnippetService::new(Arc::new(repo))
}

#[rstest]
#[tokio::test]
async fn create_retries_after_slug_collisions(owner: UserId) {
    let mut repo = MockSnippetRepository::new();
    let mut seq = mockall::Sequence::new();
    repo.expect_create()
        .times(2)
        .in_sequence(&mut seq)
        .returning(|candidate| {
            Err(SnippetRepositoryError::slug_conflict(
                candidate.slug.as_ref(),
            ))
        });
    repo.expect_create()
        .times(1)
        .in_sequence(&mut seq)
        .returning(|candidate| Ok(stored(candidate, 3)));

    let snippet = make_service(repo)
        .create(owner, draft("  hello  ", "print(1)"))
        .await
        .expect("third attempt succeeds");

    assert_eq!(snippet.name.as_ref(), "hello");
    assert_eq!(snippet.owner_id, owner);
}

#[rstest]
#[tokio::test]
async fn create_gives_up_after_max_attempts(owner: UserId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_create()
        .times(MAX_SLUG_ATTEMPTS)
        .returning(|candidate| {
            Err(SnippetRepositoryError::slug_conflict(
                candidate.slug.as_ref(),
            ))
        });

    let error = make_service(repo)
        .create(owner, draft("hello", ""))
        .await
        .expect_err("exhausted");

    assert_eq!(error.code(), ErrorCode::InternalError);
}

#[rstest]
#[tokio::test]
async fn create_validates_before_touching_the_store(owner: UserId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_create().times(0);

    let error = make_service(repo)
        .create(owner, draft("   ", ""))
        .await
        .expect_err("invalid name");

    assert_eq!(error.code(), ErrorCode::InvalidRequest);
    assert!(error.details().is_some_and(|d| d["errors"].get("name").is_some()));
}

#[rstest]
#[tokio::test]
async fn rename_of_foreign_snippet_is_not_found(owner: UserId, snippet_id: SnippetId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_rename()
        .times(1)
        .return_once(|_, _, _| Ok(false));

    let error = make_service(repo)
        .rename(snippet_id, owner, "renamed".to_owned())
        .await
        .expect_err("no match");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[tokio::test]
async fn rename_passes_trimmed_name(owner: UserId, snippet_id: SnippetId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_rename()
        .withf(move |id, who, name: &SnippetName| {
            *id == snippet_id && *who == owner && name.as_ref() == "renamed"
        })
        .times(1)
        .return_once(|_, _, _| Ok(true));

    make_service(repo)
        .rename(snippet_id, owner, " renamed ".to_owned())
        .await
        .expect("rename succeeds");
}

#[rstest]
#[tokio::test]
async fn delete_is_idempotent(owner: UserId, snippet_id: SnippetId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_delete_owned().times(2).returning(|_, _| Ok(()));

    let service = make_service(repo);
    service.delete(snippet_id, owner).await.expect("first delete");
    service.delete(snippet_id, owner).await.expect("second delete");
}

#[rstest]
#[tokio::test]
async fn delete_all_targets_the_owner_and_reports_outages(owner: UserId) {
    let mut repo = MockSnippetRepository::new();
    let mut calls = mockall::Sequence::new();
    repo.expect_delete_all_for_user()
        .withf(move |id| *id == owner)
        .times(1)
        .in_sequence(&mut calls)
        .returning(|_| Ok(()));
    repo.expect_delete_all_for_user()
        .times(1)
        .in_sequence(&mut calls)
        .returning(|_| Err(SnippetRepositoryError::connection("pool exhausted")));

    let service = make_service(repo);
    service
        .delete_all_for_user(owner)
        .await
        .expect("owned snippets removed");
    let error = service
        .delete_all_for_user(owner)
        .await
        .expect_err("store offline");
    assert_eq!(error.code(), ErrorCode::ServiceUnavailable);
}

#[rstest]
#[tokio::test]
async fn get_hides_snippets_of_other_owners(owner: UserId, snippet_id: SnippetId) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_find_by_id().return_once(move |id| {
        Ok(Some(Snippet {
            id,
            owner_id: UserId::new(99).expect("valid id"),
            name: SnippetName::new("theirs").expect("name"),
            code: SnippetCode::default(),
            slug: Slug::new("abcdefgh").expect("slug"),
        }))
    });

    let error = make_service(repo)
        .get(snippet_id, owner)
        .await
        .expect_err("foreign snippet");

    assert_eq!(error.code(), ErrorCode::NotFound);
}

#[rstest]
#[case("x", "abcdefgh")]
#[case("ada_l", "NOT A SLUG")]
#[tokio::test]
async fn malformed_share_links_are_not_found(#[case] username: &str, #[case] slug: &str) {
    let mut repo = MockSnippetRepository::new();
    repo.expect_find_by_owner_and_slug().times(0);

    let error = make_service(repo)
        .view_by_slug(username, slug)
        .await
        .expect_err("malformed link");

    assert_eq!(error.code(), ErrorCode::NotFound);
}
