//! End-to-end behaviour of the mutation handlers over the in-memory store.

use std::sync::Arc;

use uuid::Uuid;

use blog_core::ports::Store;
use blog_core::services::{CommentInput, PostInput, TagInput};
use blog_core::{Actor, BlogMutations, DomainError, Policy, RequestContext, TagPolicy};
use blog_infra::InMemoryStore;

fn setup() -> (InMemoryStore, BlogMutations) {
    let store = InMemoryStore::new();
    let mutations = BlogMutations::new(Arc::new(store.clone()), Policy::default());
    (store, mutations)
}

fn as_user(id: Uuid) -> RequestContext {
    RequestContext::new(Actor::user(id)).with_request_id("test")
}

fn post_input(title: &str, content: &str, tags: &[&str]) -> PostInput {
    PostInput {
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
    }
}

fn comment_input(post_slug: &str, body: &str) -> CommentInput {
    CommentInput {
        post_slug: post_slug.to_string(),
        email: "reader@example.com".to_string(),
        comment: body.to_string(),
    }
}

async fn create_tag(mutations: &BlogMutations, ctx: &RequestContext, slug: &str) {
    mutations
        .create_tag(
            ctx,
            TagInput {
                name: slug.to_string(),
                slug: Some(slug.to_string()),
            },
        )
        .await
        .unwrap();
}

async fn comment_count(store: &InMemoryStore, post_id: i64) -> usize {
    let uow = store.begin().await.unwrap();
    uow.comments_for_post(post_id).await.unwrap().len()
}

#[tokio::test]
async fn test_author_lifecycle_scenario() {
    let (store, mutations) = setup();
    let u1 = as_user(Uuid::new_v4());
    let u2 = as_user(Uuid::new_v4());
    create_tag(&mutations, &u1, "go").await;

    let created = mutations
        .create_post(&u1, post_input("A", "x", &["go"]))
        .await
        .unwrap();
    assert!(created.success);
    assert_eq!(Some(created.post.author_id), u1.actor.user_id());
    assert_eq!(created.post.tag_slugs(), vec!["go"]);
    let post_id = created.post.id;

    mutations
        .create_comment(&u2, comment_input("a", "first!"))
        .await
        .unwrap();
    assert_eq!(comment_count(&store, post_id).await, 1);

    let denied = mutations
        .update_post(&u2, post_id, post_input("Hijacked", "y", &[]))
        .await;
    assert!(matches!(denied, Err(DomainError::Forbidden(_))));

    let unchanged = store
        .begin()
        .await
        .unwrap()
        .find_post(post_id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(unchanged, created.post);

    let deleted = mutations.delete_post(&u1, post_id).await.unwrap();
    assert!(deleted.success);
    assert_eq!(comment_count(&store, post_id).await, 0);
}

#[tokio::test]
async fn test_only_author_may_delete_post() {
    let (store, mutations) = setup();
    let author = as_user(Uuid::new_v4());
    let post = mutations
        .create_post(&author, post_input("Mine", "x", &[]))
        .await
        .unwrap()
        .post;

    let stranger = mutations
        .delete_post(&as_user(Uuid::new_v4()), post.id)
        .await;
    assert!(matches!(stranger, Err(DomainError::Forbidden(_))));

    let anonymous = mutations
        .delete_post(&RequestContext::anonymous(), post.id)
        .await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated(_))));

    let uow = store.begin().await.unwrap();
    assert!(uow.find_post(post.id).await.unwrap().is_some());
}

#[tokio::test]
async fn test_anonymous_cannot_create_post() {
    let (_store, mutations) = setup();
    let result = mutations
        .create_post(&RequestContext::anonymous(), post_input("A", "x", &[]))
        .await;
    assert!(matches!(result, Err(DomainError::Unauthenticated(_))));
}

#[tokio::test]
async fn test_create_post_with_unknown_tag_creates_nothing() {
    let (store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    create_tag(&mutations, &user, "go").await;

    let result = mutations
        .create_post(&user, post_input("A", "x", &["go", "nope", "also-nope"]))
        .await;

    match result {
        Err(DomainError::UnknownTags(missing)) => assert_eq!(missing, vec!["nope", "also-nope"]),
        other => panic!("expected UnknownTags, got {other:?}"),
    }
    let uow = store.begin().await.unwrap();
    assert!(uow.find_post_by_slug("a").await.unwrap().is_none());
}

#[tokio::test]
async fn test_update_post_with_unknown_tag_changes_nothing() {
    let (store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    create_tag(&mutations, &user, "go").await;
    let original = mutations
        .create_post(&user, post_input("A", "x", &["go"]))
        .await
        .unwrap()
        .post;

    let result = mutations
        .update_post(&user, original.id, post_input("B", "y", &["missing"]))
        .await;
    assert!(matches!(result, Err(DomainError::UnknownTags(_))));

    let uow = store.begin().await.unwrap();
    let stored = uow.find_post(original.id).await.unwrap().unwrap();
    assert_eq!(stored, original);
}

#[tokio::test]
async fn test_update_post_replaces_tags_and_keeps_identity() {
    let (_store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    for slug in ["go", "rust", "web"] {
        create_tag(&mutations, &user, slug).await;
    }
    let original = mutations
        .create_post(&user, post_input("Original Title", "x", &["go", "web"]))
        .await
        .unwrap()
        .post;

    let updated = mutations
        .update_post(&user, original.id, post_input("New Title", "y", &["rust"]))
        .await
        .unwrap();

    assert!(updated.success);
    let post = updated.post;
    assert_eq!(post.title, "New Title");
    assert_eq!(post.content, "y");
    assert_eq!(post.tag_slugs(), vec!["rust"]);
    assert_eq!(post.author_id, original.author_id);
    assert_eq!(post.slug, "original-title");
    assert_eq!(post.published_at, original.published_at);
    assert!(post.updated_at >= original.updated_at);
}

#[tokio::test]
async fn test_update_unknown_post_is_not_found() {
    let (_store, mutations) = setup();
    let result = mutations
        .update_post(&as_user(Uuid::new_v4()), 404, post_input("A", "x", &[]))
        .await;
    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "post",
            ..
        })
    ));
}

#[tokio::test]
async fn test_duplicate_title_is_rejected() {
    let (_store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    mutations
        .create_post(&user, post_input("Same", "x", &[]))
        .await
        .unwrap();

    let result = mutations
        .create_post(&as_user(Uuid::new_v4()), post_input("Same", "y", &[]))
        .await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_anonymous_comment_is_rejected() {
    let (store, mutations) = setup();
    let author = as_user(Uuid::new_v4());
    let post = mutations
        .create_post(&author, post_input("A", "x", &[]))
        .await
        .unwrap()
        .post;

    let result = mutations
        .create_comment(&RequestContext::anonymous(), comment_input(&post.slug, "hi"))
        .await;

    assert!(matches!(result, Err(DomainError::Unauthenticated(_))));
    assert_eq!(comment_count(&store, post.id).await, 0);
}

#[tokio::test]
async fn test_comment_on_unknown_slug_is_rejected() {
    let (store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    let post = mutations
        .create_post(&user, post_input("A", "x", &[]))
        .await
        .unwrap()
        .post;

    let result = mutations
        .create_comment(&user, comment_input("no-such-post", "hi"))
        .await;

    assert!(matches!(
        result,
        Err(DomainError::NotFound {
            entity_type: "post",
            ..
        })
    ));
    assert_eq!(comment_count(&store, post.id).await, 0);
}

#[tokio::test]
async fn test_create_comment_returns_parent_post() {
    let (_store, mutations) = setup();
    let author = as_user(Uuid::new_v4());
    let reader_id = Uuid::new_v4();
    let post = mutations
        .create_post(&author, post_input("Hello World", "x", &[]))
        .await
        .unwrap()
        .post;

    let payload = mutations
        .create_comment(&as_user(reader_id), comment_input("hello-world", "Great read"))
        .await
        .unwrap();

    assert_eq!(payload.post.id, post.id);
    assert_eq!(payload.comment.post_id, post.id);
    assert_eq!(payload.comment.user_id, reader_id);
    assert_eq!(payload.comment.comment, "Great read");
    assert!(!payload.comment.approved);
}

#[tokio::test]
async fn test_only_comment_owner_may_edit_or_delete() {
    let (store, mutations) = setup();
    let owner = as_user(Uuid::new_v4());
    let other = as_user(Uuid::new_v4());
    let post = mutations
        .create_post(&other, post_input("A", "x", &[]))
        .await
        .unwrap()
        .post;
    let comment = mutations
        .create_comment(&owner, comment_input(&post.slug, "original"))
        .await
        .unwrap()
        .comment;

    // The post author does not own the comment either.
    let denied = mutations.update_comment(&other, comment.id, "edited").await;
    assert!(matches!(denied, Err(DomainError::Forbidden(_))));
    let denied = mutations.delete_comment(&other, comment.id).await;
    assert!(matches!(denied, Err(DomainError::Forbidden(_))));

    let updated = mutations
        .update_comment(&owner, comment.id, "edited")
        .await
        .unwrap();
    assert!(updated.success);
    assert_eq!(updated.comment.comment, "edited");
    assert_eq!(updated.comment.email, comment.email);

    let deleted = mutations.delete_comment(&owner, comment.id).await.unwrap();
    assert!(deleted.success);
    assert_eq!(comment_count(&store, post.id).await, 0);

    let gone = mutations.delete_comment(&owner, comment.id).await;
    assert!(matches!(gone, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_tag_mutations_follow_policy() {
    let (_store, mutations) = setup();
    let anonymous = RequestContext::anonymous();

    let result = mutations
        .create_tag(
            &anonymous,
            TagInput {
                name: "go".to_string(),
                slug: None,
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Unauthenticated(_))));

    let open = BlogMutations::new(Arc::new(InMemoryStore::new()), Policy::new(TagPolicy::Open));
    let created = open
        .create_tag(
            &anonymous,
            TagInput {
                name: "Go Lang".to_string(),
                slug: None,
            },
        )
        .await
        .unwrap();
    assert_eq!(created.tag.slug, "go-lang");
}

#[tokio::test]
async fn test_tag_update_and_delete() {
    let (store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    let tag = mutations
        .create_tag(
            &user,
            TagInput {
                name: "go".to_string(),
                slug: None,
            },
        )
        .await
        .unwrap()
        .tag;
    let post = mutations
        .create_post(&user, post_input("A", "x", &["go"]))
        .await
        .unwrap()
        .post;

    let renamed = mutations
        .update_tag(
            &user,
            tag.id,
            TagInput {
                name: "Golang".to_string(),
                slug: Some("golang".to_string()),
            },
        )
        .await
        .unwrap();
    assert_eq!(renamed.tag.name, "Golang");
    assert_eq!(renamed.tag.slug, "golang");

    let missing = mutations
        .update_tag(
            &user,
            999,
            TagInput {
                name: "x".to_string(),
                slug: None,
            },
        )
        .await;
    assert!(matches!(missing, Err(DomainError::NotFound { .. })));

    let deleted = mutations.delete_tag(&user, tag.id).await.unwrap();
    assert!(deleted.success);
    assert_eq!(deleted.tag.slug, "golang");

    let uow = store.begin().await.unwrap();
    let post = uow.find_post(post.id).await.unwrap().unwrap();
    assert!(post.tags.is_empty());
    drop(uow);

    let again = mutations.delete_tag(&user, tag.id).await;
    assert!(matches!(again, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_duplicate_tag_is_rejected() {
    let (_store, mutations) = setup();
    let user = as_user(Uuid::new_v4());
    create_tag(&mutations, &user, "go").await;

    let result = mutations
        .create_tag(
            &user,
            TagInput {
                name: "Go again".to_string(),
                slug: Some("go".to_string()),
            },
        )
        .await;
    assert!(matches!(result, Err(DomainError::Duplicate(_))));
}

#[tokio::test]
async fn test_toggle_favorite() {
    let (_store, mutations) = setup();
    let author = as_user(Uuid::new_v4());
    let fan_id = Uuid::new_v4();
    let post = mutations
        .create_post(&author, post_input("A", "x", &[]))
        .await
        .unwrap()
        .post;

    let first = mutations
        .toggle_favorite(&as_user(fan_id), post.id)
        .await
        .unwrap();
    assert!(first.favorited);
    assert_eq!(first.post.favorites, vec![fan_id]);

    let second = mutations
        .toggle_favorite(&as_user(fan_id), post.id)
        .await
        .unwrap();
    assert!(!second.favorited);
    assert!(second.post.favorites.is_empty());

    let anonymous = mutations
        .toggle_favorite(&RequestContext::anonymous(), post.id)
        .await;
    assert!(matches!(anonymous, Err(DomainError::Unauthenticated(_))));
}
