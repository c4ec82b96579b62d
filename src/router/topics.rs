use axum::{
    body::Body,
    extract::{Path, Query, State},
    http::Response,
    response::{IntoResponse, Redirect},
    Form,
};
use axum_sessions::extractors::WritableSession;
use chrono::Utc;
use serde::Deserialize;

use crate::{
    forms::{FieldErrors, NewTopicForm},
    pagination::{Pager, PAGE_SIZE},
    templates::{self, models::Flash},
};

use super::{
    auth::{AuthUser, MaybeUser},
    error, AppState,
};

#[derive(Deserialize)]
pub struct PageQuery {
    pub page: Option<usize>,
}

/// Topic listing of a board, most recently updated first, with the derived
/// reply count per topic.
pub async fn handle_topics(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    Query(query): Query<PageQuery>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, Response<Body>> {
    let Some(board) = state
        .db
        .get_board(board_id)
        .await
        .map_err(error::err_into_500)?
    else {
        return Err(error::http_404());
    };
    let total = state
        .db
        .count_topics(board.id)
        .await
        .map_err(error::err_into_500)?;
    let pager = Pager::new(query.page, total, PAGE_SIZE);
    let topics = state
        .db
        .topics_page(board.id, pager.offset, PAGE_SIZE)
        .await
        .map_err(error::err_into_500)?;
    Ok(templates::Topics {
        user: user.map(|u| u.name),
        board,
        topics,
        pager,
    })
}

pub async fn handle_new_topic_form(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    AuthUser(user): AuthUser,
) -> Result<impl IntoResponse, Response<Body>> {
    let Some(board) = state
        .db
        .get_board(board_id)
        .await
        .map_err(error::err_into_500)?
    else {
        return Err(error::http_404());
    };
    Ok(templates::NewTopic {
        user: Some(user.name),
        board,
        form: NewTopicForm::default(),
        errors: FieldErrors::default(),
    })
}

/// Creates a topic together with its opening post and redirects to the new
/// topic's post listing. An invalid form redisplays with field errors and
/// writes nothing.
pub async fn handle_new_topic(
    State(state): State<AppState>,
    Path(board_id): Path<i64>,
    AuthUser(user): AuthUser,
    mut session: WritableSession,
    Form(form): Form<NewTopicForm>,
) -> Result<impl IntoResponse, Response<Body>> {
    let Some(board) = state
        .db
        .get_board(board_id)
        .await
        .map_err(error::err_into_500)?
    else {
        return Err(error::http_404());
    };
    match form.validate() {
        Ok(data) => {
            let topic_id = state
                .db
                .create_topic(
                    board.id,
                    user.name,
                    data.title,
                    data.message,
                    Utc::now().timestamp(),
                )
                .await
                .map_err(error::err_into_500)?;
            session
                .insert("flash", Flash::Success("Topic created".into()))
                .unwrap();
            Ok(Redirect::to(&format!("/boards/{}/topics/{topic_id}", board.id)).into_response())
        }
        Err(errors) => Ok(templates::NewTopic {
            user: Some(user.name),
            board,
            form,
            errors,
        }
        .into_response()),
    }
}
