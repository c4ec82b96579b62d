use axum::{body::Body, extract::State, http::Response, response::IntoResponse};

use crate::templates;

use super::{
    auth::MaybeUser,
    error, AppState,
};

/// Board list. Boards are public reference data, so there is no auth and no
/// pagination here.
pub async fn handle_home(
    State(state): State<AppState>,
    MaybeUser(user): MaybeUser,
) -> Result<impl IntoResponse, Response<Body>> {
    let boards = state.db.get_boards().await.map_err(error::err_into_500)?;
    Ok(templates::Home {
        user: user.map(|u| u.name),
        boards,
    })
}
