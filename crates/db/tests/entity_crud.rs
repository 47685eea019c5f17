//! Integration tests for repository CRUD against an isolated in-memory
//! database:
//! - Create the discussion and work item hierarchies
//! - Partial updates leave untouched columns alone
//! - Soft delete via status, hard delete with cascade
//! - Restrict-on-delete for users, organization types and relations
//! - Updates re-check the status rule against the row they replace and
//!   survive concurrent writers

use assert_matches::assert_matches;
use forum_core::error::CoreError;
use forum_db::mapping::{discussion, work_item};
use forum_db::models::discussion::{CreateDiscussion, DiscussionFilter, UpdateDiscussion};
use forum_db::models::entity_ref::{EntityType, ParentKind, RelationType};
use forum_db::models::organization_type::CreateOrganizationType;
use forum_db::models::participant::NewParticipant;
use forum_db::models::relation::CreateRelation;
use forum_db::models::response::{CreateResponse, UpdateResponse};
use forum_db::models::user::CreateUser;
use forum_db::models::work_item::CreateWorkItem;
use forum_db::repositories::{
    DiscussionRepo, OrganizationTypeRepo, ParticipantRepo, RelationRepo, ResponseRepo, UserRepo,
    WorkItemRepo,
};
use forum_db::{DbPool, RepoError};

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

async fn pool() -> DbPool {
    forum_db::create_isolated_pool().await.unwrap()
}

async fn new_user(pool: &DbPool, name: &str) -> i64 {
    UserRepo::create(
        pool,
        &CreateUser {
            display_name: name.to_string(),
        },
    )
    .await
    .unwrap()
    .id
}

fn create_discussion(user_id: i64, subject: &str) -> CreateDiscussion {
    CreateDiscussion {
        subject: subject.to_string(),
        comment: "body".to_string(),
        user_id,
        status: None,
        end_date: None,
    }
}

fn create_work_item(user_id: i64, subject: &str) -> CreateWorkItem {
    CreateWorkItem {
        subject: subject.to_string(),
        comment: String::new(),
        user_id,
        status: None,
        end_date: None,
    }
}

fn all_discussions() -> DiscussionFilter {
    DiscussionFilter {
        status: None,
        include_deleted: true,
        limit: 100,
        offset: 0,
    }
}

fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    err.as_database_error()
        .is_some_and(|db_err| forum_db::is_foreign_key_violation(db_err))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[tokio::test]
async fn isolated_pools_do_not_share_rows() {
    let first = pool().await;
    let second = pool().await;

    new_user(&first, "only-in-first").await;

    assert_eq!(UserRepo::list(&first).await.unwrap().len(), 1);
    assert!(UserRepo::list(&second).await.unwrap().is_empty());
}

#[tokio::test]
async fn create_discussion_defaults_status_and_timestamps() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;

    let created = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Hello")),
    )
    .await
    .unwrap();

    assert!(created.id > 0);
    assert_eq!(created.status, "Open");
    assert_eq!(created.user_id, user_id);
    assert!(created.updated_at.is_none());

    let found = DiscussionRepo::find_by_id(&pool, created.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(found, created);
}

#[tokio::test]
async fn discussion_requires_existing_user() {
    let pool = pool().await;
    let err = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(999, "Orphan")),
    )
    .await
    .unwrap_err();
    assert!(is_foreign_key_violation(&err));
}

#[tokio::test]
async fn update_changes_only_present_fields() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let created = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Before")),
    )
    .await
    .unwrap();

    let input = UpdateDiscussion {
        subject: Some("After".to_string()),
        ..Default::default()
    };
    let updated = DiscussionRepo::update(&pool, created.id, &input)
        .await
        .unwrap()
        .unwrap();

    assert_eq!(updated.subject, "After");
    assert_eq!(updated.comment, created.comment);
    assert_eq!(updated.status, created.status);
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at.is_some());

    let again = DiscussionRepo::update(&pool, created.id, &input)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(again.subject, updated.subject);
    assert_eq!(again.comment, updated.comment);
    assert_eq!(again.status, updated.status);
}

#[tokio::test]
async fn update_missing_discussion_returns_none() {
    let pool = pool().await;
    let result = DiscussionRepo::update(&pool, 404, &UpdateDiscussion::default())
        .await
        .unwrap();
    assert!(result.is_none());
}

#[tokio::test]
async fn soft_delete_hides_from_default_listing() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let keep = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Keep")),
    )
    .await
    .unwrap();
    let drop = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Drop")),
    )
    .await
    .unwrap();

    assert!(DiscussionRepo::soft_delete(&pool, drop.id).await.unwrap());

    let visible = DiscussionRepo::list(
        &pool,
        &DiscussionFilter {
            include_deleted: false,
            ..all_discussions()
        },
    )
    .await
    .unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].id, keep.id);

    let everything = DiscussionRepo::list(&pool, &all_discussions()).await.unwrap();
    assert_eq!(everything.len(), 2);

    let deleted = DiscussionRepo::find_by_id(&pool, drop.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(deleted.status, "Deleted");
}

#[tokio::test]
async fn list_filters_by_status_and_paginates() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    for i in 0..3 {
        let mut input = create_discussion(user_id, &format!("D{i}"));
        if i == 0 {
            input.status = Some("Closed".to_string());
        }
        DiscussionRepo::create(&pool, &discussion::new_discussion(&input))
            .await
            .unwrap();
    }

    let closed = DiscussionRepo::list(
        &pool,
        &DiscussionFilter {
            status: Some("Closed".to_string()),
            ..all_discussions()
        },
    )
    .await
    .unwrap();
    assert_eq!(closed.len(), 1);
    assert_eq!(closed[0].subject, "D0");

    let page = DiscussionRepo::list(
        &pool,
        &DiscussionFilter {
            limit: 2,
            offset: 2,
            ..all_discussions()
        },
    )
    .await
    .unwrap();
    assert_eq!(page.len(), 1);
}

#[tokio::test]
async fn hard_delete_cascades_to_responses_and_participants() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Gone")),
    )
    .await
    .unwrap();

    ResponseRepo::create(
        &pool,
        &discussion::new_response(
            d.id,
            &CreateResponse {
                user_id,
                comment: "first".to_string(),
                status: None,
            },
        ),
    )
    .await
    .unwrap();
    ParticipantRepo::create(
        &pool,
        ParentKind::Discussion,
        &NewParticipant {
            parent_id: d.id,
            entity_id: user_id,
            entity_type: EntityType::User,
            organization_type_id: None,
        },
    )
    .await
    .unwrap();

    assert!(DiscussionRepo::hard_delete(&pool, d.id).await.unwrap());

    assert!(ResponseRepo::list_by_discussion(&pool, d.id)
        .await
        .unwrap()
        .is_empty());
    assert!(
        ParticipantRepo::list_by_parent(&pool, ParentKind::Discussion, d.id)
            .await
            .unwrap()
            .is_empty()
    );
}

#[tokio::test]
async fn responses_are_scoped_to_their_discussion() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let a = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "A")),
    )
    .await
    .unwrap();
    let b = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "B")),
    )
    .await
    .unwrap();

    let reply = ResponseRepo::create(
        &pool,
        &discussion::new_response(
            a.id,
            &CreateResponse {
                user_id,
                comment: "on A".to_string(),
                status: None,
            },
        ),
    )
    .await
    .unwrap();

    assert!(ResponseRepo::find_by_id(&pool, b.id, reply.id)
        .await
        .unwrap()
        .is_none());
    assert!(ResponseRepo::find_by_id(&pool, a.id, reply.id)
        .await
        .unwrap()
        .is_some());

    let grouped = ResponseRepo::list_by_discussions(&pool, &[a.id, b.id])
        .await
        .unwrap();
    assert_eq!(grouped.len(), 1);
    assert!(ResponseRepo::list_by_discussions(&pool, &[])
        .await
        .unwrap()
        .is_empty());
}

#[tokio::test]
async fn organization_type_in_use_cannot_be_deleted() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Org")),
    )
    .await
    .unwrap();
    let org_type = OrganizationTypeRepo::create(
        &pool,
        &CreateOrganizationType {
            type_label: "Vendor".to_string(),
        },
    )
    .await
    .unwrap();
    let participant = ParticipantRepo::create(
        &pool,
        ParentKind::Discussion,
        &NewParticipant {
            parent_id: d.id,
            entity_id: 55,
            entity_type: EntityType::Organization,
            organization_type_id: Some(org_type.id),
        },
    )
    .await
    .unwrap();

    let err = OrganizationTypeRepo::delete(&pool, org_type.id)
        .await
        .unwrap_err();
    assert!(is_foreign_key_violation(&err));

    ParticipantRepo::delete(&pool, ParentKind::Discussion, d.id, participant.id)
        .await
        .unwrap();
    assert!(OrganizationTypeRepo::delete(&pool, org_type.id).await.unwrap());
}

#[tokio::test]
async fn relation_blocks_hard_delete_of_endpoint() {
    let pool = pool().await;
    let user_id = new_user(&pool, "bob").await;
    let from = WorkItemRepo::create(
        &pool,
        &work_item::new_work_item(&create_work_item(user_id, "From")),
    )
    .await
    .unwrap();
    let to = WorkItemRepo::create(
        &pool,
        &work_item::new_work_item(&create_work_item(user_id, "To")),
    )
    .await
    .unwrap();

    let relation = RelationRepo::create(
        &pool,
        &work_item::new_relation(
            from.id,
            &CreateRelation {
                to_work_item_id: to.id,
                relation_type: RelationType::Blocks,
            },
        ),
    )
    .await
    .unwrap();

    assert_eq!(
        RelationRepo::list_for_work_item(&pool, to.id)
            .await
            .unwrap()
            .len(),
        1
    );

    let err = WorkItemRepo::hard_delete(&pool, to.id).await.unwrap_err();
    assert!(is_foreign_key_violation(&err));

    RelationRepo::delete(&pool, relation.id).await.unwrap();
    assert!(WorkItemRepo::hard_delete(&pool, to.id).await.unwrap());
}

#[tokio::test]
async fn user_with_discussions_cannot_be_deleted() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Mine")),
    )
    .await
    .unwrap();

    let err = UserRepo::delete(&pool, user_id).await.unwrap_err();
    assert!(is_foreign_key_violation(&err));

    assert!(DiscussionRepo::hard_delete(&pool, d.id).await.unwrap());
    assert!(UserRepo::delete(&pool, user_id).await.unwrap());
}

// ---------------------------------------------------------------------------
// Status rule and concurrent writers
// ---------------------------------------------------------------------------

#[tokio::test]
async fn soft_deleted_discussion_cannot_be_reopened() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Gone")),
    )
    .await
    .unwrap();
    assert!(DiscussionRepo::soft_delete(&pool, d.id).await.unwrap());

    let input = UpdateDiscussion {
        subject: Some("Back".to_string()),
        status: Some("Open".to_string()),
        ..Default::default()
    };
    let err = DiscussionRepo::update(&pool, d.id, &input).await.unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Conflict(_)));

    let stored = DiscussionRepo::find_by_id(&pool, d.id).await.unwrap().unwrap();
    assert_eq!(stored.status, "Deleted");
    assert_eq!(stored.subject, "Gone");

    // Re-stating the terminal label is allowed.
    let same = UpdateDiscussion {
        status: Some("Deleted".to_string()),
        ..Default::default()
    };
    let kept = DiscussionRepo::update(&pool, d.id, &same).await.unwrap().unwrap();
    assert_eq!(kept.status, "Deleted");
}

#[tokio::test]
async fn soft_deleted_response_cannot_be_reopened() {
    let pool = pool().await;
    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Thread")),
    )
    .await
    .unwrap();
    let r = ResponseRepo::create(
        &pool,
        &discussion::new_response(
            d.id,
            &CreateResponse {
                user_id,
                comment: "hi".to_string(),
                status: None,
            },
        ),
    )
    .await
    .unwrap();
    assert!(ResponseRepo::soft_delete(&pool, d.id, r.id).await.unwrap());

    let input = UpdateResponse {
        status: Some("Open".to_string()),
        ..Default::default()
    };
    let err = ResponseRepo::update(&pool, d.id, r.id, &input)
        .await
        .unwrap_err();
    assert_matches!(err, RepoError::Core(CoreError::Conflict(_)));
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_updates_on_a_file_database_all_land() {
    let path = std::env::temp_dir().join(format!("forum-{}.db", uuid::Uuid::new_v4()));
    let pool = forum_db::create_pool(&format!("sqlite://{}", path.display()))
        .await
        .unwrap();
    forum_db::run_migrations(&pool).await.unwrap();

    let user_id = new_user(&pool, "alice").await;
    let d = DiscussionRepo::create(
        &pool,
        &discussion::new_discussion(&create_discussion(user_id, "Busy")),
    )
    .await
    .unwrap();

    let id = d.id;
    let mut tasks = Vec::new();
    for n in 0..20 {
        let pool = pool.clone();
        tasks.push(tokio::spawn(async move {
            let input = UpdateDiscussion {
                comment: Some(format!("edit {n}")),
                ..Default::default()
            };
            DiscussionRepo::update(&pool, id, &input).await
        }));
    }
    for task in tasks {
        let updated = task.await.unwrap().unwrap().unwrap();
        assert!(updated.comment.starts_with("edit "));
        assert_eq!(updated.subject, "Busy");
    }

    let stored = DiscussionRepo::find_by_id(&pool, d.id).await.unwrap().unwrap();
    assert!(stored.comment.starts_with("edit "));
    assert_eq!(stored.status, "Open");

    pool.close().await;
    let _ = std::fs::remove_file(&path);
}
