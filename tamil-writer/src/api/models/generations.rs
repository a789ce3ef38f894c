use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    config::LengthConfig,
    errors::{Error, Result},
    generation::{Generation, GenerationRequest},
    types::{Genre, Subgenre},
};

/// JSON body for `POST /api/v1/generations`
#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct GenerationCreate {
    /// Title of the piece, e.g. "கடலின் அழகு"
    pub title: String,
    /// What the piece should be about
    pub description: String,
    pub genre: Genre,
    pub subgenre: Subgenre,
    /// Maximum generated tokens; defaults to the configured default
    #[serde(default)]
    pub length: Option<u32>,
}

impl GenerationCreate {
    pub fn into_request(self, limits: &LengthConfig) -> Result<GenerationRequest> {
        GenerationRequest::new(&self.title, &self.description, self.genre, self.subgenre, self.length, limits)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct GenerationResponse {
    /// Generated text, line breaks preserved
    pub text: String,
    pub title: String,
    pub genre: Genre,
    pub subgenre: Subgenre,
    pub genre_label: String,
    pub subgenre_label: String,
    /// Local wall-clock time, `YYYY-MM-DD HH:MM:SS`
    pub generated_at: String,
    /// Suggested download name, `tamil_<genre>_<YYYYMMDD_HHMMSS>.html`
    pub filename: String,
    pub mime_type: String,
    /// The standalone HTML document
    pub document: String,
}

impl GenerationResponse {
    pub fn new(request: &GenerationRequest, generation: Generation) -> Self {
        let document = generation.document;
        Self {
            text: generation.text,
            title: document.title,
            genre: request.genre(),
            subgenre: request.subgenre(),
            genre_label: document.genre_label.to_string(),
            subgenre_label: document.subgenre_label.to_string(),
            generated_at: document.generated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            filename: document.filename,
            mime_type: document.mime_type.to_string(),
            document: document.body,
        }
    }
}

/// Form fields posted by the page to `POST /generate`.
///
/// Fields are kept as strings so that a bad value re-renders the page with a warning instead
/// of being rejected by the extractor.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct GenerationForm {
    pub title: String,
    pub description: String,
    pub genre: String,
    pub subgenre: String,
    pub length: String,
}

impl GenerationForm {
    /// Form prefilled with the first genre, its first subgenre and the default length
    pub fn initial(limits: &LengthConfig) -> Self {
        let genre = Genre::Poem;
        Self {
            genre: genre.id().to_string(),
            subgenre: genre.subgenres()[0].id().to_string(),
            length: limits.default.to_string(),
            ..Default::default()
        }
    }

    pub fn to_request(&self, limits: &LengthConfig) -> Result<GenerationRequest> {
        let genre = self.genre.parse::<Genre>().map_err(|e| Error::validation(e.to_string()))?;
        let subgenre = self.subgenre.parse::<Subgenre>().map_err(|e| Error::validation(e.to_string()))?;

        let length = match self.length.trim() {
            "" => None,
            raw => Some(
                raw.parse::<u32>()
                    .map_err(|_| Error::validation(format!("Length must be a whole number, got '{raw}'")))?,
            ),
        };

        GenerationRequest::new(&self.title, &self.description, genre, subgenre, length, limits)
    }
}
