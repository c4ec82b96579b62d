use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;

#[derive(Debug, Clone)]
pub struct Board {
    pub id: i64,
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone)]
pub struct Topic {
    pub id: i64,
    pub board: i64,
    pub board_name: String,
    pub title: String,
    pub starter: String,
    pub created_at: NaiveDateTime,
    pub last_updated: NaiveDateTime,
    pub views: i64,
}

/// One row of the topic listing, with the derived reply count.
#[derive(Debug)]
pub struct TopicOverview {
    pub id: i64,
    pub title: String,
    pub starter: String,
    pub last_updated: NaiveDateTime,
    pub views: i64,
    pub replies: i64,
}

#[derive(Debug, Clone)]
pub struct Post {
    pub id: i64,
    pub topic: i64,
    pub message: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_by: Option<String>,
    pub updated_at: Option<NaiveDateTime>,
}

/// A post fetched through the ownership filter, carrying enough of its
/// topic to render the edit page and compute the redirect target.
#[derive(Debug)]
pub struct OwnPost {
    pub id: i64,
    pub topic: i64,
    pub board: i64,
    pub topic_title: String,
    pub message: String,
}

/// Display form of a post: avatar and edit permission resolved for the
/// requesting user.
#[derive(Debug)]
pub struct PostView {
    pub id: i64,
    pub message: String,
    pub created_by: String,
    pub created_at: NaiveDateTime,
    pub updated_at: Option<NaiveDateTime>,
    pub avatar: String,
    pub editable: bool,
}

#[derive(Default, Serialize, Deserialize)]
pub enum Flash {
    Success(Cow<'static, str>),
    Error(Cow<'static, str>),
    #[default]
    None,
}
