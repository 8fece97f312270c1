use axum::{
    extract::{DefaultBodyLimit, Multipart, Path, State},
    http::{header, HeaderMap, HeaderValue, StatusCode},
    response::Html,
    routing::{get, post},
    Form, Router,
};
use tracing::{error, info, instrument, warn};

use crate::{pictures, state::AppState};

use super::dto::{AddUserFields, UpdateUserForm};
use super::render;
use super::repo::{NewUser, UserStore};

pub fn read_routes() -> Router<AppState> {
    Router::new().route("/", get(index))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/add", post(add_user))
        .route("/delete/:id", get(delete_user))
        .route("/update/:id", post(update_user))
        .layer(DefaultBodyLimit::max(20 * 1024 * 1024)) // 20MB
}

#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
) -> Result<Html<String>, (StatusCode, String)> {
    let users = state.users.list().await.map_err(internal)?;
    Ok(Html(render::listing_page(&users)))
}

#[instrument(skip(state, mp))]
pub async fn add_user(
    State(state): State<AppState>,
    mut mp: Multipart,
) -> Result<(StatusCode, HeaderMap), (StatusCode, String)> {
    let mut fields = AddUserFields::default();
    while let Ok(Some(field)) = mp.next_field().await {
        let field_name = field.name().map(|s| s.to_string());
        match field_name.as_deref() {
            Some("name") => fields.name = Some(field.text().await.map_err(internal)?),
            Some("email") => fields.email = Some(field.text().await.map_err(internal)?),
            Some("profile_picture") => {
                let filename = field.file_name().map(|s| s.to_string()).unwrap_or_default();
                let data = field.bytes().await.map_err(internal)?;
                // a file input left empty still submits a part with no filename
                if !filename.is_empty() {
                    fields.picture = Some((filename, data));
                }
            }
            _ => {}
        }
    }

    let name = fields.name.ok_or_else(|| missing("name"))?;
    let email = fields.email.ok_or_else(|| missing("email"))?;

    let profile_picture = match fields.picture {
        Some((filename, data)) => pictures::store_picture(&state, &filename, data)
            .await
            .map_err(internal)?,
        None => None,
    };

    match state
        .users
        .create(NewUser {
            name,
            email,
            profile_picture,
        })
        .await
    {
        Ok(user) => {
            info!(user_id = user.id, "user created");
            Ok(back_to_index())
        }
        Err(e) => {
            error!(error = %e, "create user failed");
            Err((StatusCode::INTERNAL_SERVER_ERROR, e.to_string()))
        }
    }
}

#[instrument(skip(state))]
pub async fn delete_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
) -> Result<(StatusCode, HeaderMap), (StatusCode, String)> {
    state.users.delete(id).await.map_err(internal)?;
    Ok(back_to_index())
}

#[instrument(skip(state, form))]
pub async fn update_user(
    State(state): State<AppState>,
    Path(id): Path<i32>,
    Form(form): Form<UpdateUserForm>,
) -> Result<(StatusCode, HeaderMap), (StatusCode, String)> {
    state
        .users
        .update(id, &form.name, &form.email)
        .await
        .map_err(internal)?;
    Ok(back_to_index())
}

fn back_to_index() -> (StatusCode, HeaderMap) {
    let mut headers = HeaderMap::new();
    headers.insert(header::LOCATION, HeaderValue::from_static("/"));
    (StatusCode::FOUND, headers)
}

fn missing(field: &str) -> (StatusCode, String) {
    warn!(%field, "required form field missing");
    (StatusCode::BAD_REQUEST, format!("{} is required", field))
}

fn internal<E: std::fmt::Display>(e: E) -> (StatusCode, String) {
    (StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
}
