use chrono::Utc;
use sea_orm::{DatabaseBackend, DatabaseConnection, MockDatabase, MockExecResult};
use uuid::Uuid;

use quill_core::domain::{Author, AuthorChanges, NewPost, Post, PostChanges};
use quill_core::error::RepoError;
use quill_core::ports::{AuthorRepository, BaseRepository, PostRepository};

use crate::database::entity::{author, post};
use crate::database::postgres_repo::{PostgresAuthorRepository, PostgresPostRepository};

fn post_model(id: Uuid, author_id: Uuid, title: &str) -> post::Model {
    post::Model {
        id,
        title: title.to_owned(),
        slug: "t".to_owned(),
        content: "C".to_owned(),
        published: false,
        created_at: Utc::now().into(),
        author_id,
    }
}

fn author_model(id: Uuid) -> author::Model {
    author::Model {
        id,
        name: "Ada".to_owned(),
        email: "ada@example.com".to_owned(),
        created_at: Utc::now().into(),
    }
}

fn post_repo(db: DatabaseConnection) -> PostgresPostRepository {
    PostgresPostRepository::new(db)
}

#[tokio::test]
async fn test_find_post_by_id() {
    let post_id = Uuid::new_v4();
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![post_model(post_id, author_id, "Test Post")]])
        .into_connection();

    let result: Option<Post> = BaseRepository::<Post, Uuid>::find_by_id(&post_repo(db), post_id)
        .await
        .unwrap();

    let post = result.unwrap();
    assert_eq!(post.title, "Test Post");
    assert_eq!(post.id, post_id);
    assert_eq!(post.author_id, author_id);
}

#[tokio::test]
async fn test_find_missing_author_is_none() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<author::Model>::new()])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);
    let result: Option<Author> = BaseRepository::<Author, Uuid>::find_by_id(&repo, Uuid::new_v4())
        .await
        .unwrap();

    assert!(result.is_none());
}

#[tokio::test]
async fn test_create_post_returns_stored_row() {
    let author_id = Uuid::new_v4();
    let stored = post_model(Uuid::new_v4(), author_id, "T");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![stored.clone()]])
        .into_connection();

    let post = PostRepository::create(
        &post_repo(db),
        NewPost {
            title: "T".to_owned(),
            slug: "t".to_owned(),
            content: "C".to_owned(),
            published: false,
            author_id,
        },
    )
    .await
    .unwrap();

    assert_eq!(post.id, stored.id);
    assert!(!post.published);
}

#[tokio::test]
async fn test_update_unknown_author_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![Vec::<author::Model>::new()])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);
    let err = AuthorRepository::update(
        &repo,
        Uuid::new_v4(),
        AuthorChanges {
            name: Some("Ada Lovelace".to_owned()),
            email: None,
        },
    )
    .await
    .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_empty_update_reads_current_row() {
    let id = Uuid::new_v4();
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![author_model(id)]])
        .into_connection();

    let repo = PostgresAuthorRepository::new(db);
    let author = AuthorRepository::update(&repo, id, AuthorChanges::default())
        .await
        .unwrap();

    assert_eq!(author.id, id);
    assert_eq!(author.name, "Ada");
}

#[tokio::test]
async fn test_partial_post_update() {
    let id = Uuid::new_v4();
    let updated = post_model(id, Uuid::new_v4(), "T2");

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![updated]])
        .into_connection();

    let post = PostRepository::update(
        &post_repo(db),
        id,
        PostChanges {
            title: Some("T2".to_owned()),
            ..Default::default()
        },
    )
    .await
    .unwrap();

    assert_eq!(post.title, "T2");
    assert_eq!(post.slug, "t");
}

#[tokio::test]
async fn test_delete_missing_post_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results(vec![MockExecResult {
            last_insert_id: 0,
            rows_affected: 0,
        }])
        .into_connection();

    let err = BaseRepository::<Post, Uuid>::delete(&post_repo(db), Uuid::new_v4())
        .await
        .unwrap_err();

    assert!(matches!(err, RepoError::NotFound));
}

#[tokio::test]
async fn test_find_posts_by_author() {
    let author_id = Uuid::new_v4();

    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results(vec![vec![
            post_model(Uuid::new_v4(), author_id, "A"),
            post_model(Uuid::new_v4(), author_id, "B"),
        ]])
        .into_connection();

    let posts = post_repo(db).find_by_author_id(author_id).await.unwrap();

    assert_eq!(posts.len(), 2);
    assert!(posts.iter().all(|p| p.author_id == author_id));
}
