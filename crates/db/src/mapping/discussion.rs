//! Discussion and response projections.

use forum_core::error::CoreError;
use forum_core::status::effective_status;
use forum_core::types::{DbId, Timestamp};

use super::{apply_status, author_name, initial_status};
use crate::models::discussion::{
    CreateDiscussion, Discussion, DiscussionForList, DiscussionToReturn, NewDiscussion,
    UpdateDiscussion,
};
use crate::models::response::{
    CreateResponse, NewResponse, Response, ResponseToReturn, UpdateResponse,
};
use crate::models::user::User;

/// Project a discussion for a detail view.
pub fn to_return(
    discussion: &Discussion,
    author: Option<&User>,
    now: Timestamp,
) -> Result<DiscussionToReturn, CoreError> {
    Ok(DiscussionToReturn {
        id: discussion.id,
        subject: discussion.subject.clone(),
        comment: discussion.comment.clone(),
        user_id: discussion.user_id,
        username: author_name(author, discussion.user_id)?,
        status: effective_status(&discussion.status, discussion.end_date, now),
        created_at: discussion.created_at,
        end_date: discussion.end_date,
        updated_at: discussion.updated_at,
    })
}

/// Project a discussion for a list view. `responses` is its full response
/// collection; only its length is kept.
pub fn for_list(
    discussion: &Discussion,
    author: Option<&User>,
    responses: &[Response],
    now: Timestamp,
) -> Result<DiscussionForList, CoreError> {
    let base = to_return(discussion, author, now)?;
    Ok(DiscussionForList {
        id: base.id,
        subject: base.subject,
        comment: base.comment,
        user_id: base.user_id,
        username: base.username,
        status: base.status,
        created_at: base.created_at,
        end_date: base.end_date,
        updated_at: base.updated_at,
        responses_count: responses.len(),
    })
}

pub fn new_discussion(input: &CreateDiscussion) -> NewDiscussion {
    NewDiscussion {
        subject: input.subject.clone(),
        comment: input.comment.clone(),
        user_id: input.user_id,
        status: initial_status(input.status.as_deref()),
        end_date: input.end_date,
    }
}

/// Overwrite the fields present on `input`; leave the rest alone.
///
/// Fails without touching anything when the status change is refused.
pub fn apply_update(
    discussion: &mut Discussion,
    input: &UpdateDiscussion,
) -> Result<(), CoreError> {
    apply_status(&mut discussion.status, input.status.as_deref())?;
    if let Some(subject) = &input.subject {
        discussion.subject = subject.clone();
    }
    if let Some(comment) = &input.comment {
        discussion.comment = comment.clone();
    }
    if let Some(end_date) = input.end_date {
        discussion.end_date = Some(end_date);
    }
    Ok(())
}

/// Project a response, attaching its author's display name.
pub fn response_to_return(
    response: &Response,
    author: Option<&User>,
) -> Result<ResponseToReturn, CoreError> {
    Ok(ResponseToReturn {
        id: response.id,
        discussion_id: response.discussion_id,
        user_id: response.user_id,
        username: author_name(author, response.user_id)?,
        comment: response.comment.clone(),
        status: response.status.clone(),
        created_at: response.created_at,
        updated_at: response.updated_at,
    })
}

pub fn new_response(discussion_id: DbId, input: &CreateResponse) -> NewResponse {
    NewResponse {
        discussion_id,
        user_id: input.user_id,
        comment: input.comment.clone(),
        status: initial_status(input.status.as_deref()),
    }
}

pub fn apply_response_update(
    response: &mut Response,
    input: &UpdateResponse,
) -> Result<(), CoreError> {
    apply_status(&mut response.status, input.status.as_deref())?;
    if let Some(comment) = &input.comment {
        response.comment = comment.clone();
    }
    Ok(())
}
