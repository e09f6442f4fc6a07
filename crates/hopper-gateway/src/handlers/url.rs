use crate::error::{AppError, Result};
use crate::model::ShortenForm;
use crate::page;
use crate::state::AppState;
use axum::extract::rejection::FormRejection;
use axum::extract::{Path, State};
use axum::http::header::LOCATION;
use axum::http::{HeaderValue, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Form;
use hopper_core::{ShortCode, ShortenerError};
use tracing::info;

pub async fn home_handler(State(state): State<AppState>) -> Html<String> {
    let mappings = state.shortener().list();
    Html(page::render_home(&mappings, state.base_url()).into_string())
}

pub async fn shorten_handler(
    State(state): State<AppState>,
    form: std::result::Result<Form<ShortenForm>, FormRejection>,
) -> Result<Response> {
    // A body that is not a readable form carries no `url`, which counts as empty.
    let Form(form) = form.map_err(|rejection| ShortenerError::Validation(rejection.body_text()))?;
    let code = state.shortener().shorten(&form.url).await?;
    info!(short_code = %code, "created mapping");
    see_other("/")
}

pub async fn redirect_handler(
    Path(short_code): Path<String>,
    State(state): State<AppState>,
) -> Result<Response> {
    // Anything that could never have been generated is simply unknown.
    let code = ShortCode::new(short_code.as_str())
        .map_err(|_| ShortenerError::NotFound(short_code.clone()))?;
    let url = state.shortener().resolve(&code).await?;
    see_other(&url)
}

fn see_other(location: &str) -> Result<Response> {
    let value = HeaderValue::try_from(location)
        .map_err(|_| AppError::InvalidLocation(location.to_string()))?;
    Ok((StatusCode::SEE_OTHER, [(LOCATION, value)]).into_response())
}
