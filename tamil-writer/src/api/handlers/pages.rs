//! Server-rendered form page.
//!
//! `GET /` shows the empty form; `POST /generate` validates the submission, runs the
//! generation pipeline and re-renders the same page with either an inline warning, an inline
//! error or the generated text and its download link. The download link carries the document
//! itself as a `data:` URI, so nothing is stored between requests.

use axum::{
    Form,
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::Serialize;

use crate::{
    AppState,
    api::models::generations::GenerationForm,
    config::LengthConfig,
    document::MIME_TYPE,
    errors::{Error, Result},
    generation::{self, Generation},
    templates,
    types::Genre,
};

#[derive(Serialize)]
struct Choice {
    id: &'static str,
    label: &'static str,
}

#[derive(Serialize)]
struct GenreChoice {
    id: &'static str,
    label: &'static str,
    subgenres: Vec<Choice>,
}

#[derive(Serialize)]
struct PageResult {
    text: String,
    genre_label: &'static str,
    filename: String,
    download_href: String,
}

#[derive(Serialize)]
struct Page<'a> {
    genres: Vec<GenreChoice>,
    length: &'a LengthConfig,
    form: &'a GenerationForm,
    warning: Option<String>,
    error: Option<String>,
    result: Option<PageResult>,
}

impl<'a> Page<'a> {
    fn new(length: &'a LengthConfig, form: &'a GenerationForm) -> Self {
        let genres = Genre::ALL
            .into_iter()
            .map(|genre| GenreChoice {
                id: genre.id(),
                label: genre.label(),
                subgenres: genre
                    .subgenres()
                    .iter()
                    .map(|sg| Choice {
                        id: sg.id(),
                        label: sg.label(),
                    })
                    .collect(),
            })
            .collect();

        Self {
            genres,
            length,
            form,
            warning: None,
            error: None,
            result: None,
        }
    }

    fn render(&self, status: StatusCode) -> Result<Response> {
        let html = templates::render(templates::INDEX, self)?;
        Ok((status, Html(html)).into_response())
    }
}

fn download_href(body: &str) -> String {
    format!("data:{MIME_TYPE};charset=utf-8;base64,{}", STANDARD.encode(body))
}

#[tracing::instrument(skip_all)]
pub async fn index(State(state): State<AppState>) -> Result<Response> {
    let form = GenerationForm::initial(&state.config.length);
    Page::new(&state.config.length, &form).render(StatusCode::OK)
}

#[tracing::instrument(skip_all)]
pub async fn submit(State(state): State<AppState>, Form(form): Form<GenerationForm>) -> Result<Response> {
    let mut page = Page::new(&state.config.length, &form);

    let outcome = match form.to_request(&state.config.length) {
        Ok(request) => generation::generate(state.completion.as_ref(), &request).await,
        Err(e) => Err(e),
    };

    match outcome {
        Ok(Generation { text, document }) => {
            page.result = Some(PageResult {
                text,
                genre_label: document.genre_label,
                download_href: download_href(&document.body),
                filename: document.filename,
            });
            page.render(StatusCode::OK)
        }
        Err(e @ Error::Validation { .. }) => {
            e.log();
            page.warning = Some(e.user_message());
            page.render(e.status_code())
        }
        Err(e @ Error::Generation(_)) => {
            e.log();
            page.error = Some(e.user_message());
            page.render(e.status_code())
        }
        Err(e) => Err(e),
    }
}
