//! Integration tests for the attachment and comment ledgers and workspaces.

use chrono::Utc;
use scribe_db::models::attachment::Attachment;
use scribe_db::repositories::{
    ArticleRepo, ArticleVersionRepo, AttachmentRepo, CommentRepo, WorkspaceRepo,
};
use sqlx::PgPool;
use uuid::Uuid;

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn seed_article(pool: &PgPool, id: &str) {
    let mut tx = pool.begin().await.unwrap();
    ArticleRepo::insert_envelope(&mut *tx, id, "default", None)
        .await
        .unwrap()
        .unwrap();
    ArticleVersionRepo::insert(&mut *tx, id, 1, "Seed", "body", "default")
        .await
        .unwrap();
    tx.commit().await.unwrap();
}

fn attachment(name: &str) -> Attachment {
    Attachment {
        id: Uuid::new_v4(),
        file_name: format!("1700000000000-1.{name}"),
        original_name: format!("photo.{name}"),
        mime_type: "image/png".to_string(),
        size: 42,
        url: format!("/uploads/a/1700000000000-1.{name}"),
        created_at: Utc::now(),
    }
}

// ---------------------------------------------------------------------------
// Attachments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn add_then_remove_restores_list(pool: PgPool) {
    let id = "att-202401010000";
    seed_article(&pool, id).await;
    let keep = attachment("png");
    AttachmentRepo::add(&pool, id, &keep).await.unwrap().unwrap();
    let before = AttachmentRepo::list(&pool, id).await.unwrap().unwrap();

    let extra = attachment("pdf");
    AttachmentRepo::add(&pool, id, &extra).await.unwrap().unwrap();
    assert_eq!(AttachmentRepo::list(&pool, id).await.unwrap().unwrap().len(), 2);

    let removed = AttachmentRepo::remove(&pool, id, extra.id).await.unwrap().unwrap();
    assert_eq!(removed.file_name, extra.file_name);

    let after = AttachmentRepo::list(&pool, id).await.unwrap().unwrap();
    assert_eq!(after, before);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn removing_unknown_attachment_leaves_list_untouched(pool: PgPool) {
    let id = "att-202401010000";
    seed_article(&pool, id).await;
    let keep = attachment("png");
    AttachmentRepo::add(&pool, id, &keep).await.unwrap();

    let removed = AttachmentRepo::remove(&pool, id, Uuid::new_v4()).await.unwrap();
    assert!(removed.is_none());
    assert_eq!(AttachmentRepo::list(&pool, id).await.unwrap().unwrap(), vec![keep]);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachments_on_missing_article_are_none(pool: PgPool) {
    let a = attachment("png");
    assert!(AttachmentRepo::add(&pool, "nope", &a).await.unwrap().is_none());
    assert!(AttachmentRepo::remove(&pool, "nope", a.id).await.unwrap().is_none());
    assert!(AttachmentRepo::list(&pool, "nope").await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn attachments_are_visible_from_every_version(pool: PgPool) {
    let id = "att-202401010000";
    seed_article(&pool, id).await;
    let a = attachment("png");
    AttachmentRepo::add(&pool, id, &a).await.unwrap();

    let mut tx = pool.begin().await.unwrap();
    ArticleRepo::lock_envelope(&mut *tx, id).await.unwrap().unwrap();
    ArticleVersionRepo::insert(&mut *tx, id, 2, "Seed", "edited", "default")
        .await
        .unwrap();
    ArticleRepo::advance_version(&mut *tx, id, 2, "default")
        .await
        .unwrap()
        .unwrap();
    tx.commit().await.unwrap();

    let v1 = ArticleRepo::find(&pool, id, Some(1)).await.unwrap().unwrap();
    let v2 = ArticleRepo::find(&pool, id, Some(2)).await.unwrap().unwrap();
    assert_eq!(v1.attachments, vec![a.clone()]);
    assert_eq!(v2.attachments, vec![a]);
}

// ---------------------------------------------------------------------------
// Comments
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_crud(pool: PgPool) {
    let id = "talk-202401010000";
    seed_article(&pool, id).await;

    let first = CommentRepo::create(&pool, id, None, "first").await.unwrap();
    let second = CommentRepo::create(&pool, id, Some("bo"), "second").await.unwrap();
    assert!(first.author.is_none());

    let listed = CommentRepo::list_for_article(&pool, id).await.unwrap();
    let bodies: Vec<&str> = listed.iter().map(|c| c.body.as_str()).collect();
    assert_eq!(bodies, vec!["first", "second"]);

    let edited = CommentRepo::update(&pool, id, first.id, Some("al"), "edited")
        .await
        .unwrap()
        .unwrap();
    assert_eq!(edited.body, "edited");
    assert_eq!(edited.author.as_deref(), Some("al"));

    assert!(CommentRepo::delete(&pool, id, second.id).await.unwrap());
    assert!(!CommentRepo::delete(&pool, id, second.id).await.unwrap());
    assert!(CommentRepo::find(&pool, id, second.id).await.unwrap().is_none());
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn comment_is_keyed_by_article(pool: PgPool) {
    seed_article(&pool, "one-202401010000").await;
    seed_article(&pool, "two-202401010000").await;
    let c = CommentRepo::create(&pool, "one-202401010000", None, "hi").await.unwrap();

    assert!(CommentRepo::find(&pool, "two-202401010000", c.id).await.unwrap().is_none());
    assert!(CommentRepo::update(&pool, "two-202401010000", c.id, None, "x")
        .await
        .unwrap()
        .is_none());
}

// ---------------------------------------------------------------------------
// Workspaces
// ---------------------------------------------------------------------------

#[sqlx::test(migrations = "../../db/migrations")]
async fn default_workspace_is_seeded(pool: PgPool) {
    assert!(WorkspaceRepo::exists(&pool, "default").await.unwrap());
    let ws = WorkspaceRepo::ensure_default(&pool).await.unwrap();
    assert_eq!(ws.id, "default");
    assert_eq!(WorkspaceRepo::list(&pool).await.unwrap().len(), 1);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn create_unique_suffixes_taken_ids(pool: PgPool) {
    let a = WorkspaceRepo::create_unique(&pool, "team", "Team").await.unwrap().unwrap();
    let b = WorkspaceRepo::create_unique(&pool, "team", "Team").await.unwrap().unwrap();
    let c = WorkspaceRepo::create_unique(&pool, "team", "Team").await.unwrap().unwrap();
    assert_eq!(a.id, "team");
    assert_eq!(b.id, "team-1");
    assert_eq!(c.id, "team-2");
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn rename_workspace(pool: PgPool) {
    let renamed = WorkspaceRepo::rename(&pool, "default", "Main").await.unwrap().unwrap();
    assert_eq!(renamed.name, "Main");
    assert!(WorkspaceRepo::rename(&pool, "missing", "X").await.unwrap().is_none());
}
