//! Validation and narrowing of untrusted upstream JSON.
//!
//! Both projections are all-or-nothing. They stop at the first field that is
//! missing or mistyped and report it as a `ProjectionError`. No partially
//! built value is ever returned.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use serde_json::{Map, Value};

use crate::error::ProjectionError;
use crate::types::{CommentItemSubset, IssueSubset};

/// Project a raw issue object into an `IssueSubset`.
pub fn project_issue(raw: &Value) -> Result<IssueSubset, ProjectionError> {
    let obj = raw.as_object().ok_or(ProjectionError::IssueObject)?;

    let number = obj
        .get("number")
        .and_then(Value::as_u64)
        .ok_or(ProjectionError::IssueNumber)?;
    let title = string_field(obj, "title").ok_or(ProjectionError::IssueTitle)?;
    let state = string_field(obj, "state").ok_or(ProjectionError::IssueState)?;
    let body = string_field(obj, "body").ok_or(ProjectionError::IssueBody)?;
    let comments = obj
        .get("comments")
        .and_then(Value::as_u64)
        .ok_or(ProjectionError::IssueComments)?;
    let html_url = string_field(obj, "html_url").ok_or(ProjectionError::IssueHtmlUrl)?;
    let created_at = string_field(obj, "created_at").ok_or(ProjectionError::IssueCreatedAt)?;
    let author = login(obj.get("user")).ok_or(ProjectionError::IssueAuthor)?;

    let labels = obj
        .get("labels")
        .and_then(Value::as_array)
        .ok_or(ProjectionError::IssueLabels)?
        .iter()
        .map(label_name)
        .collect::<Result<Vec<_>, _>>()?;

    let assignees = obj
        .get("assignees")
        .and_then(Value::as_array)
        .ok_or(ProjectionError::IssueAssignees)?
        .iter()
        .map(|a| login(Some(a)).ok_or(ProjectionError::IssueAssigneesItem))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(IssueSubset {
        number,
        title,
        state,
        author,
        labels,
        assignees,
        created_at,
        body_markdown: body,
        html_url,
        comments_total_count: Some(comments),
    })
}

/// Project a raw comment list, ordered oldest first.
///
/// Every item is validated before any is kept. Ordering is by `created_at`;
/// timestamps that do not parse count as the epoch and sort to the front.
pub fn project_comments(raw: &Value) -> Result<Vec<CommentItemSubset>, ProjectionError> {
    let items = raw.as_array().ok_or(ProjectionError::CommentsArray)?;

    let mut stamped = items
        .iter()
        .map(|item| -> Result<(i64, CommentItemSubset), ProjectionError> {
            let obj = item.as_object().ok_or(ProjectionError::CommentsItem)?;
            let body = string_field(obj, "body").ok_or(ProjectionError::CommentsBody)?;
            let created_at =
                obj.get("created_at").and_then(Value::as_str).ok_or(ProjectionError::CommentsCreatedAt)?;
            let author = login(obj.get("user")).ok_or(ProjectionError::CommentsAuthor)?;
            Ok((
                timestamp_millis(created_at),
                CommentItemSubset {
                    author,
                    body_markdown: body,
                },
            ))
        })
        .collect::<Result<Vec<_>, _>>()?;

    // Stable: equal timestamps keep upstream order.
    stamped.sort_by_key(|(ts, _)| *ts);
    Ok(stamped.into_iter().map(|(_, comment)| comment).collect())
}

/// A label is either a bare string or an object carrying a string `name`.
fn label_name(label: &Value) -> Result<String, ProjectionError> {
    match label {
        Value::String(name) => Ok(name.clone()),
        Value::Object(obj) => string_field(obj, "name").ok_or(ProjectionError::IssueLabelsItem),
        _ => Err(ProjectionError::IssueLabelsItem),
    }
}

fn string_field(obj: &Map<String, Value>, key: &str) -> Option<String> {
    obj.get(key).and_then(Value::as_str).map(str::to_owned)
}

fn login(user: Option<&Value>) -> Option<String> {
    user.and_then(Value::as_object).and_then(|u| string_field(u, "login"))
}

/// Milliseconds since the epoch, or 0 when `raw` is not a recognizable date.
fn timestamp_millis(raw: &str) -> i64 {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return dt.timestamp_millis();
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(raw) {
        return dt.timestamp_millis();
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(raw, format) {
            return naive.and_utc().timestamp_millis();
        }
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map_or(0, |naive| naive.and_utc().timestamp_millis())
}
