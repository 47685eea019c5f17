//! Work item and comment projections.

use forum_core::error::CoreError;
use forum_core::status::effective_status;
use forum_core::types::{DbId, Timestamp};

use super::{apply_status, author_name, initial_status};
use crate::models::comment::{Comment, CommentToReturn, CreateComment, NewComment, UpdateComment};
use crate::models::relation::{CreateRelation, NewRelation, Relation, UpdateRelation};
use crate::models::user::User;
use crate::models::work_item::{
    CreateWorkItem, NewWorkItem, UpdateWorkItem, WorkItem, WorkItemForList, WorkItemToReturn,
};

/// Project a work item for a detail view.
pub fn to_return(
    work_item: &WorkItem,
    author: Option<&User>,
    now: Timestamp,
) -> Result<WorkItemToReturn, CoreError> {
    Ok(WorkItemToReturn {
        id: work_item.id,
        subject: work_item.subject.clone(),
        comment: work_item.comment.clone(),
        user_id: work_item.user_id,
        username: author_name(author, work_item.user_id)?,
        status: effective_status(&work_item.status, work_item.end_date, now),
        created_at: work_item.created_at,
        end_date: work_item.end_date,
        updated_at: work_item.updated_at,
    })
}

/// Project a work item for a list view. `comments` is its full comment
/// collection; only its length is kept.
pub fn for_list(
    work_item: &WorkItem,
    author: Option<&User>,
    comments: &[Comment],
    now: Timestamp,
) -> Result<WorkItemForList, CoreError> {
    let base = to_return(work_item, author, now)?;
    Ok(WorkItemForList {
        id: base.id,
        subject: base.subject,
        comment: base.comment,
        user_id: base.user_id,
        username: base.username,
        status: base.status,
        created_at: base.created_at,
        end_date: base.end_date,
        updated_at: base.updated_at,
        comments_count: comments.len(),
    })
}

pub fn new_work_item(input: &CreateWorkItem) -> NewWorkItem {
    NewWorkItem {
        subject: input.subject.clone(),
        comment: input.comment.clone(),
        user_id: input.user_id,
        status: initial_status(input.status.as_deref()),
        end_date: input.end_date,
    }
}

/// Overwrite the fields present on `input`; leave the rest alone.
pub fn apply_update(work_item: &mut WorkItem, input: &UpdateWorkItem) -> Result<(), CoreError> {
    apply_status(&mut work_item.status, input.status.as_deref())?;
    if let Some(subject) = &input.subject {
        work_item.subject = subject.clone();
    }
    if let Some(comment) = &input.comment {
        work_item.comment = comment.clone();
    }
    if let Some(end_date) = input.end_date {
        work_item.end_date = Some(end_date);
    }
    Ok(())
}

/// Project a comment, attaching its author's display name.
pub fn comment_to_return(
    comment: &Comment,
    author: Option<&User>,
) -> Result<CommentToReturn, CoreError> {
    Ok(CommentToReturn {
        id: comment.id,
        work_item_id: comment.work_item_id,
        user_id: comment.user_id,
        username: author_name(author, comment.user_id)?,
        comment: comment.comment.clone(),
        status: comment.status.clone(),
        created_at: comment.created_at,
        updated_at: comment.updated_at,
    })
}

pub fn new_comment(work_item_id: DbId, input: &CreateComment) -> NewComment {
    NewComment {
        work_item_id,
        user_id: input.user_id,
        comment: input.comment.clone(),
        status: initial_status(input.status.as_deref()),
    }
}

pub fn apply_comment_update(target: &mut Comment, input: &UpdateComment) -> Result<(), CoreError> {
    apply_status(&mut target.status, input.status.as_deref())?;
    if let Some(text) = &input.comment {
        target.comment = text.clone();
    }
    Ok(())
}

/// Build an edge leaving `from_work_item_id`.
pub fn new_relation(from_work_item_id: DbId, input: &CreateRelation) -> NewRelation {
    NewRelation {
        from_work_item_id,
        to_work_item_id: input.to_work_item_id,
        relation_type: input.relation_type,
    }
}

pub fn apply_relation_update(relation: &mut Relation, input: &UpdateRelation) {
    if let Some(kind) = input.relation_type {
        relation.relation_type = kind;
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use chrono::{Duration, TimeZone, Utc};

    use super::*;
    use crate::models::entity_ref::RelationType;

    fn now() -> Timestamp {
        Utc.with_ymd_and_hms(2020, 6, 1, 0, 0, 0).unwrap()
    }

    fn bob() -> User {
        User {
            id: 3,
            display_name: "bob".to_string(),
            created_at: now() - Duration::days(400),
            updated_at: None,
        }
    }

    fn work_item(status: &str, end_date: Option<Timestamp>) -> WorkItem {
        WorkItem {
            id: 10,
            subject: "Fix login".to_string(),
            comment: String::new(),
            user_id: 3,
            status: status.to_string(),
            end_date,
            created_at: now() - Duration::days(30),
            updated_at: None,
        }
    }

    fn comment(id: DbId) -> Comment {
        Comment {
            id,
            work_item_id: 10,
            user_id: 3,
            comment: "looking".to_string(),
            status: "Open".to_string(),
            created_at: now() - Duration::days(1),
            updated_at: None,
        }
    }

    #[test]
    fn status_follows_end_date() {
        let past = work_item("Open", Some(now() - Duration::hours(1)));
        let future = work_item("Open", Some(now() + Duration::hours(1)));
        let deleted = work_item("Deleted", Some(now() - Duration::hours(1)));

        assert_eq!(to_return(&past, Some(&bob()), now()).unwrap().status, "Closed");
        assert_eq!(to_return(&future, Some(&bob()), now()).unwrap().status, "Open");
        assert_eq!(to_return(&deleted, Some(&bob()), now()).unwrap().status, "Deleted");
    }

    #[test]
    fn list_projection_counts_comments() {
        let item = work_item("Open", None);
        let comments = [comment(1), comment(2)];
        let out = for_list(&item, Some(&bob()), &comments, now()).unwrap();
        assert_eq!(out.comments_count, 2);
        assert_eq!(out.username, "bob");
    }

    #[test]
    fn comment_requires_loaded_author() {
        assert_matches!(
            comment_to_return(&comment(1), None),
            Err(CoreError::MissingReference { entity: "User", id: 3 })
        );
        assert_eq!(comment_to_return(&comment(1), Some(&bob())).unwrap().username, "bob");
    }

    #[test]
    fn comment_update_overwrites_text_only() {
        let mut c = comment(1);
        let input = UpdateComment {
            comment: Some("done".to_string()),
            status: None,
        };
        apply_comment_update(&mut c, &input).unwrap();
        apply_comment_update(&mut c, &input).unwrap();
        assert_eq!(c.comment, "done");
        assert_eq!(c.status, "Open");
    }

    #[test]
    fn deleted_comment_keeps_its_status() {
        let mut c = comment(1);
        c.status = "Deleted".to_string();
        let input = UpdateComment {
            comment: None,
            status: Some("Open".to_string()),
        };
        assert_matches!(
            apply_comment_update(&mut c, &input),
            Err(CoreError::Conflict(_))
        );
        assert_eq!(c.status, "Deleted");
    }

    #[test]
    fn new_comment_takes_parent_from_caller() {
        let input = CreateComment {
            user_id: 3,
            comment: "hi".to_string(),
            status: None,
        };
        let new = new_comment(42, &input);
        assert_eq!(new.work_item_id, 42);
        assert_eq!(new.status, "Open");
    }

    #[test]
    fn relation_update_keeps_endpoints() {
        let mut relation = Relation {
            id: 1,
            from_work_item_id: 10,
            to_work_item_id: 11,
            relation_type: RelationType::RelatesTo,
            created_at: now(),
            updated_at: None,
        };
        apply_relation_update(
            &mut relation,
            &UpdateRelation {
                relation_type: Some(RelationType::Blocks),
            },
        );
        assert_eq!(relation.relation_type, RelationType::Blocks);
        assert_eq!(relation.from_work_item_id, 10);
        assert_eq!(relation.to_work_item_id, 11);

        apply_relation_update(&mut relation, &UpdateRelation::default());
        assert_eq!(relation.relation_type, RelationType::Blocks);
    }
}
