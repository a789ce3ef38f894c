//! Standalone HTML document for a generated text.
//!
//! The document embeds its own styling (only the Noto Sans Tamil web font is fetched
//! externally) and records when it was generated. Its download filename is derived from the
//! genre label and the same instant.

use chrono::{Local, NaiveDateTime};
use serde::{Serialize, Serializer};

use crate::{
    errors::Result,
    templates,
    types::{Genre, Subgenre},
};

pub const MIME_TYPE: &str = "text/html";

const DISPLAY_TIMESTAMP: &str = "%Y-%m-%d %H:%M:%S";
const FILENAME_TIMESTAMP: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Serialize)]
pub struct RenderedDocument {
    pub title: String,
    pub genre_label: &'static str,
    pub subgenre_label: &'static str,
    #[serde(serialize_with = "serialize_display_timestamp")]
    pub generated_at: NaiveDateTime,
    pub filename: String,
    pub mime_type: &'static str,
    /// The complete HTML text
    pub body: String,
}

fn serialize_display_timestamp<S: Serializer>(at: &NaiveDateTime, serializer: S) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(&at.format(DISPLAY_TIMESTAMP))
}

/// `tamil_<genre label>_<YYYYMMDD_HHMMSS>.html`
pub fn document_filename(genre: Genre, at: NaiveDateTime) -> String {
    format!("tamil_{}_{}.html", genre.label(), at.format(FILENAME_TIMESTAMP))
}

/// Render a document stamped with the current local wall-clock time.
pub fn render_document(title: &str, genre: Genre, subgenre: Subgenre, text: &str) -> Result<RenderedDocument> {
    render_document_at(title, genre, subgenre, text, Local::now().naive_local())
}

pub fn render_document_at(title: &str, genre: Genre, subgenre: Subgenre, text: &str, at: NaiveDateTime) -> Result<RenderedDocument> {
    let generated_at = at.format(DISPLAY_TIMESTAMP).to_string();
    let body = templates::render(
        templates::DOCUMENT,
        minijinja::context! {
            title,
            genre_label => genre.label(),
            subgenre_label => subgenre.label(),
            generated_at,
            text,
        },
    )?;

    Ok(RenderedDocument {
        title: title.to_string(),
        genre_label: genre.label(),
        subgenre_label: subgenre.label(),
        generated_at: at,
        filename: document_filename(genre, at),
        mime_type: MIME_TYPE,
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn instant(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9).unwrap().and_hms_opt(h, m, s).unwrap()
    }

    #[test]
    fn test_document_contains_each_field_once_in_place() {
        let doc = render_document_at(
            "கடலின் அழகு",
            Genre::Poem,
            Subgenre::Venba,
            "அலை ஒன்று\nஅலை இரண்டு",
            instant(14, 5, 9),
        )
        .unwrap();

        let html = &doc.body;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert_eq!(html.matches("<h1>கடலின் அழகு</h1>").count(), 1);
        assert_eq!(html.matches("<title>கடலின் அழகு</title>").count(), 1);
        assert_eq!(html.matches("வகை: கவிதை (வெண்பா)").count(), 1);
        assert_eq!(html.matches("2024-03-09 14:05:09").count(), 1);
        assert_eq!(html.matches(r#"<div class="content">அலை ஒன்று
அலை இரண்டு</div>"#).count(), 1);
        assert_eq!(html.matches("அலை ஒன்று").count(), 1);
    }

    #[test]
    fn test_fixed_text_is_embedded_verbatim() {
        let doc = render_document("வணக்கம் தலைப்பு", Genre::Story, Subgenre::Moral, "வணக்கம்").unwrap();
        assert!(doc.body.contains(r#"<div class="content">வணக்கம்</div>"#));
        assert_eq!(doc.mime_type, "text/html");
    }

    #[test]
    fn test_markup_in_inputs_is_escaped() {
        let doc = render_document_at(
            "<script>alert(1)</script>",
            Genre::Story,
            Subgenre::Horror,
            "a < b & c",
            instant(0, 0, 0),
        )
        .unwrap();

        assert!(!doc.body.contains("<script>"));
        assert!(doc.body.contains("a &lt; b &amp; c"));
        // The struct keeps the raw title for callers
        assert_eq!(doc.title, "<script>alert(1)</script>");
    }

    #[test]
    fn test_filename_format() {
        let doc = render_document_at("t", Genre::Story, Subgenre::Romance, "x", instant(9, 30, 0)).unwrap();
        assert_eq!(doc.filename, "tamil_கதை_20240309_093000.html");
        assert_eq!(doc.genre_label, "கதை");
        assert_eq!(doc.subgenre_label, "காதல் கதை");
    }

    #[test]
    fn test_filename_is_deterministic_per_second() {
        let a = document_filename(Genre::Poem, instant(10, 0, 1));
        let b = document_filename(Genre::Poem, instant(10, 0, 1));
        let c = document_filename(Genre::Poem, instant(10, 0, 2));

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_filename_ignores_subsecond_precision() {
        let base = instant(10, 0, 1);
        let later = base + chrono::Duration::milliseconds(750);
        assert_eq!(document_filename(Genre::Poem, base), document_filename(Genre::Poem, later));
    }

    #[test]
    fn test_serializes_display_timestamp() {
        let doc = render_document_at("t", Genre::Poem, Subgenre::Kuraladi, "x", instant(23, 59, 58)).unwrap();
        let json = serde_json::to_value(&doc).unwrap();
        assert_eq!(json["generated_at"], "2024-03-09 23:59:58");
        assert_eq!(json["filename"], "tamil_கவிதை_20240309_235958.html");
    }
}
