use chrono::Utc;
use sea_orm::{DatabaseBackend, DbErr, MockDatabase, MockExecResult, RuntimeErr};

use blog_core::error::RepoError;
use blog_core::ports::Store;

use super::entity::{post, post_favorite, tag};
use super::postgres_base::map_db_err;
use super::postgres_repo::PostgresStore;

fn tag_model(id: i64, slug: &str) -> tag::Model {
    tag::Model {
        id,
        name: slug.to_uppercase(),
        slug: slug.to_owned(),
    }
}

#[tokio::test]
async fn test_find_post_loads_tags_and_favorites() {
    let user_id = uuid::Uuid::new_v4();
    let fan = uuid::Uuid::new_v4();
    let now = Utc::now();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![post::Model {
            id: 3,
            title: "Test Post".to_owned(),
            slug: "test-post".to_owned(),
            content: "Content".to_owned(),
            author_id: user_id,
            published_at: now.into(),
            updated_at: now.into(),
        }]])
        .append_query_results([vec![tag_model(2, "rust"), tag_model(1, "go")]])
        .append_query_results([vec![post_favorite::Model {
            post_id: 3,
            user_id: fan,
        }]])
        .into_connection();

    let store = PostgresStore::new(db);
    let uow = store.begin().await.unwrap();

    let post = uow.find_post(3).await.unwrap().expect("post should exist");

    assert_eq!(post.title, "Test Post");
    assert_eq!(post.author_id, user_id);
    assert_eq!(post.tag_slugs(), vec!["go", "rust"]);
    assert_eq!(post.favorites, vec![fan]);
}

#[tokio::test]
async fn test_find_post_missing_returns_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<post::Model>::new()])
        .into_connection();

    let store = PostgresStore::new(db);
    let uow = store.begin().await.unwrap();

    assert!(uow.find_post(42).await.unwrap().is_none());
}

#[tokio::test]
async fn test_find_tags_by_slugs() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![tag_model(1, "go")]])
        .into_connection();

    let store = PostgresStore::new(db);
    let uow = store.begin().await.unwrap();

    let tags = uow
        .find_tags_by_slugs(&["go".to_string(), "nope".to_string()])
        .await
        .unwrap();

    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0].slug, "go");
}

#[tokio::test]
async fn test_delete_missing_tag_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let store = PostgresStore::new(db);
    let uow = store.begin().await.unwrap();

    let result = uow.delete_tag(9).await;
    assert!(matches!(result, Err(RepoError::NotFound)));
}

#[test]
fn test_map_db_err() {
    assert!(matches!(
        map_db_err(DbErr::RecordNotUpdated),
        RepoError::NotFound
    ));
    assert!(matches!(
        map_db_err(DbErr::Conn(RuntimeErr::Internal("refused".to_owned()))),
        RepoError::Connection(_)
    ));
    assert!(matches!(
        map_db_err(DbErr::Custom("boom".to_owned())),
        RepoError::Query(_)
    ));
}
