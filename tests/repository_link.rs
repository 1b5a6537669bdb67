//! PostgreSQL link store tests.
//!
//! Run with `DATABASE_URL` pointing at a disposable server:
//! `cargo test --test repository_link -- --ignored`

use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

use shortlink::domain::entities::{ClickMeta, LinkPatch, NewClick, NewLink, OwnerId};
use shortlink::domain::repositories::LinkRepository;
use shortlink::error::AppError;
use shortlink::infrastructure::persistence::PgLinkRepository;

fn new_link(code: &str, owner: Option<&str>) -> NewLink {
    NewLink {
        code: code.to_string(),
        original: "https://example.com".to_string(),
        owner_id: owner.map(OwnerId::new),
    }
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_insert_and_find_by_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    let link = repo.insert(new_link("Ab1cD2", Some("u1"))).await.unwrap();

    assert_eq!(link.code, "Ab1cD2");
    assert_eq!(link.click_count, 0);
    assert!(link.is_active());

    let found = repo.find_active_by_code("Ab1cD2").await.unwrap().unwrap();
    assert_eq!(found.id, link.id);
    assert_eq!(found.owner_id, Some(OwnerId::new("u1")));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_duplicate_code_is_conflict(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));

    repo.insert(new_link("dup123", None)).await.unwrap();
    let err = repo.insert(new_link("dup123", None)).await.unwrap_err();

    assert!(err.is_conflict());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_soft_delete_hides_link_and_keeps_code(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.insert(new_link("del123", Some("u1"))).await.unwrap();

    assert!(repo.soft_delete(link.id).await.unwrap());
    assert!(!repo.soft_delete(link.id).await.unwrap());

    assert!(repo.find_active_by_code("del123").await.unwrap().is_none());
    assert!(
        repo.find_owned_active(link.id, &OwnerId::new("u1"))
            .await
            .unwrap()
            .is_none()
    );
    let deleted = repo
        .find_owned(link.id, &OwnerId::new("u1"))
        .await
        .unwrap()
        .unwrap();
    assert!(deleted.deleted_at().is_some());

    let err = repo.insert(new_link("del123", None)).await.unwrap_err();
    assert!(err.is_conflict());
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_find_owned_active_checks_owner(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.insert(new_link("own123", Some("u1"))).await.unwrap();
    let anon = repo.insert(new_link("anon12", None)).await.unwrap();

    let u1 = OwnerId::new("u1");
    let u2 = OwnerId::new("u2");

    assert!(repo.find_owned_active(link.id, &u1).await.unwrap().is_some());
    assert!(repo.find_owned_active(link.id, &u2).await.unwrap().is_none());
    assert!(repo.find_owned_active(anon.id, &u1).await.unwrap().is_none());
    assert!(
        repo.find_owned_active(Uuid::new_v4(), &u1)
            .await
            .unwrap()
            .is_none()
    );
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_update_fields(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.insert(new_link("upd123", Some("u1"))).await.unwrap();

    let updated = repo
        .update_fields(
            link.id,
            LinkPatch::new(Some("https://new.example.com".to_string())),
        )
        .await
        .unwrap();

    assert_eq!(updated.original, "https://new.example.com");
    assert_eq!(updated.code, "upd123");
    assert!(updated.updated_at >= link.updated_at);

    let err = repo
        .update_fields(Uuid::new_v4(), LinkPatch::default())
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_active_by_owner(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let a = repo.insert(new_link("lst001", Some("u1"))).await.unwrap();
    let b = repo.insert(new_link("lst002", Some("u1"))).await.unwrap();
    let c = repo.insert(new_link("lst003", Some("u1"))).await.unwrap();
    repo.insert(new_link("lst004", Some("u2"))).await.unwrap();
    repo.soft_delete(b.id).await.unwrap();

    let links = repo.list_active_by_owner(&OwnerId::new("u1")).await.unwrap();
    let ids: Vec<Uuid> = links.iter().map(|l| l.id).collect();

    assert_eq!(ids, vec![c.id, a.id]);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_record_click_is_atomic(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool.clone()));
    let link = repo.insert(new_link("clk123", None)).await.unwrap();

    let click = repo
        .record_click(NewClick {
            link_id: link.id,
            meta: ClickMeta::new(Some("127.0.0.1".to_string()), Some("curl/8"), None),
        })
        .await
        .unwrap();
    assert_eq!(click.link_id, link.id);
    assert_eq!(click.user_agent.as_deref(), Some("curl/8"));

    let err = repo
        .record_click(NewClick {
            link_id: Uuid::new_v4(),
            meta: ClickMeta::default(),
        })
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound { .. }));

    let rows: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(rows, 1);

    let found = repo.find_active_by_code("clk123").await.unwrap().unwrap();
    assert_eq!(found.click_count, 1);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_concurrent_clicks(pool: PgPool) {
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool)));
    let link = repo.insert(new_link("con123", None)).await.unwrap();

    let handles: Vec<_> = (0..20)
        .map(|_| {
            let repo = repo.clone();
            tokio::spawn(async move {
                repo.record_click(NewClick {
                    link_id: link.id,
                    meta: ClickMeta::default(),
                })
                .await
            })
        })
        .collect();

    for handle in handles {
        handle.await.unwrap().unwrap();
    }

    let found = repo.find_active_by_code("con123").await.unwrap().unwrap();
    assert_eq!(found.click_count, 20);
    assert_eq!(repo.list_clicks(link.id, 0, 100).await.unwrap().len(), 20);
}

#[sqlx::test]
#[ignore = "requires DATABASE_URL"]
async fn test_list_clicks_paginates_newest_first(pool: PgPool) {
    let repo = PgLinkRepository::new(Arc::new(pool));
    let link = repo.insert(new_link("pag123", None)).await.unwrap();

    for ua in ["first", "second", "third"] {
        repo.record_click(NewClick {
            link_id: link.id,
            meta: ClickMeta::new(None, Some(ua), None),
        })
        .await
        .unwrap();
    }

    let page = repo.list_clicks(link.id, 0, 2).await.unwrap();
    assert_eq!(page.len(), 2);
    assert_eq!(page[0].user_agent.as_deref(), Some("third"));

    let rest = repo.list_clicks(link.id, 2, 2).await.unwrap();
    assert_eq!(rest.len(), 1);
    assert_eq!(rest[0].user_agent.as_deref(), Some("first"));

    assert!(repo.ping().await.is_ok());
}
