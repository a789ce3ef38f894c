//! The generation pipeline: validated request → prompts → completion → document.
//!
//! Nothing here keeps state between calls. A failed completion returns its error and no
//! document is rendered.

use tracing::{info, instrument};

use crate::{
    completion::CompletionService,
    config::LengthConfig,
    document::{self, RenderedDocument},
    errors::{Error, MISSING_FIELDS_WARNING, Result},
    prompt::build_prompts,
    types::{Genre, Subgenre},
};

/// One user submission, checked and normalized.
///
/// Only constructible through [`GenerationRequest::new`], so every instance has a non-empty
/// title and description, a subgenre that belongs to its genre and an in-range length budget.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    title: String,
    description: String,
    genre: Genre,
    subgenre: Subgenre,
    length_budget: u32,
}

impl GenerationRequest {
    pub fn new(
        title: &str,
        description: &str,
        genre: Genre,
        subgenre: Subgenre,
        length_budget: Option<u32>,
        limits: &LengthConfig,
    ) -> Result<Self> {
        let title = title.trim();
        let description = description.trim();
        if title.is_empty() || description.is_empty() {
            return Err(Error::validation(MISSING_FIELDS_WARNING));
        }

        if subgenre.genre() != genre {
            return Err(Error::validation(format!(
                "'{}' is not a {} subgenre",
                subgenre.label(),
                genre.label()
            )));
        }

        let length_budget = length_budget.unwrap_or(limits.default);
        if !limits.contains(length_budget) {
            return Err(Error::validation(format!(
                "Length must be between {} and {}, got {}",
                limits.min, limits.max, length_budget
            )));
        }

        Ok(Self {
            title: title.to_string(),
            description: description.to_string(),
            genre,
            subgenre,
            length_budget,
        })
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn genre(&self) -> Genre {
        self.genre
    }

    pub fn subgenre(&self) -> Subgenre {
        self.subgenre
    }

    pub fn length_budget(&self) -> u32 {
        self.length_budget
    }
}

/// Successful pipeline output
#[derive(Debug, Clone)]
pub struct Generation {
    pub text: String,
    pub document: RenderedDocument,
}

#[instrument(skip_all, fields(genre = %request.genre, subgenre = %request.subgenre, length_budget = request.length_budget))]
pub async fn generate(service: &dyn CompletionService, request: &GenerationRequest) -> Result<Generation> {
    let prompts = build_prompts(request.genre, request.subgenre, &request.title, &request.description);
    let text = service.complete(&prompts, request.length_budget).await?;
    let document = document::render_document(&request.title, request.genre, request.subgenre, &text)?;

    info!(filename = %document.filename, "Generated document");
    Ok(Generation { text, document })
}
