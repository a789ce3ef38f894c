//! HTTP handler for the JSON generation endpoint.

use axum::{Json, extract::State, http::StatusCode};

use crate::{
    AppState,
    api::models::generations::{GenerationCreate, GenerationResponse},
    errors::Result,
    generation,
};

#[utoipa::path(
    post,
    path = "/api/v1/generations",
    tag = "generations",
    summary = "Generate a poem or story",
    description = "Builds the prompts for the requested genre, calls the completion service once and returns the text together with a standalone HTML document.",
    request_body = GenerationCreate,
    responses(
        (status = 201, description = "Text generated", body = GenerationResponse),
        (status = 400, description = "Blank title or description, mismatched subgenre or length out of range"),
        (status = 422, description = "Unknown genre or subgenre"),
        (status = 502, description = "Completion service failed"),
        (status = 504, description = "Completion service timed out"),
    )
)]
#[tracing::instrument(skip_all)]
pub async fn create_generation(
    State(state): State<AppState>,
    Json(body): Json<GenerationCreate>,
) -> Result<(StatusCode, Json<GenerationResponse>)> {
    let request = body.into_request(&state.config.length)?;
    let generation = generation::generate(state.completion.as_ref(), &request).await?;

    Ok((StatusCode::CREATED, Json(GenerationResponse::new(&request, generation))))
}

#[cfg(test)]
mod tests {
    use crate::{
        api::models::generations::GenerationResponse,
        completion::GenerationError,
        errors::MISSING_FIELDS_WARNING,
        test_utils::{FailingCompletion, RecordingCompletion, create_test_app},
    };
    use axum::http::StatusCode;
    use serde_json::json;
    use std::sync::Arc;

    #[test_log::test(tokio::test)]
    async fn test_create_generation_returns_document() {
        let service = Arc::new(RecordingCompletion::new("வணக்கம்"));
        let server = create_test_app(service.clone());

        let response = server
            .post("/api/v1/generations")
            .json(&json!({
                "title": "கடலின் அழகு",
                "description": "கடலின் அழகை பற்றிய கவிதை",
                "genre": "poem",
                "subgenre": "venba",
                "length": 300
            }))
            .await;

        response.assert_status(StatusCode::CREATED);
        let body: GenerationResponse = response.json();
        assert_eq!(body.text, "வணக்கம்");
        assert_eq!(body.title, "கடலின் அழகு");
        assert_eq!(body.genre_label, "கவிதை");
        assert_eq!(body.subgenre_label, "வெண்பா");
        assert_eq!(body.mime_type, "text/html");
        assert!(body.filename.starts_with("tamil_கவிதை_"));
        assert!(body.filename.ends_with(".html"));
        assert!(body.document.contains(r#"<div class="content">வணக்கம்</div>"#));
        assert!(body.document.contains(&body.generated_at));

        let calls = service.calls();
        assert_eq!(calls.len(), 1);
        assert_eq!(calls[0].1, 300);
    }

    #[tokio::test]
    async fn test_blank_title_never_calls_the_service() {
        let service = Arc::new(RecordingCompletion::new("unused"));
        let server = create_test_app(service.clone());

        let response = server
            .post("/api/v1/generations")
            .json(&json!({
                "title": "   ",
                "description": "something",
                "genre": "story",
                "subgenre": "horror"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert_eq!(response.text(), MISSING_FIELDS_WARNING);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_mismatched_subgenre_is_rejected() {
        let service = Arc::new(RecordingCompletion::new("unused"));
        let server = create_test_app(service.clone());

        let response = server
            .post("/api/v1/generations")
            .json(&json!({
                "title": "t",
                "description": "d",
                "genre": "story",
                "subgenre": "venba"
            }))
            .await;

        response.assert_status(StatusCode::BAD_REQUEST);
        assert!(service.calls().is_empty());
    }

    #[tokio::test]
    async fn test_unknown_subgenre_is_unprocessable() {
        let server = create_test_app(Arc::new(RecordingCompletion::new("unused")));

        let response = server
            .post("/api/v1/generations")
            .json(&json!({
                "title": "t",
                "description": "d",
                "genre": "poem",
                "subgenre": "sonnet"
            }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_generation_failure_is_bad_gateway_with_message() {
        let server = create_test_app(Arc::new(FailingCompletion(GenerationError::Transport(
            "connection refused".to_string(),
        ))));

        let response = server
            .post("/api/v1/generations")
            .json(&json!({
                "title": "t",
                "description": "d",
                "genre": "poem",
                "subgenre": "kuraladi"
            }))
            .await;

        response.assert_status(StatusCode::BAD_GATEWAY);
        let text = response.text();
        assert!(text.contains("connection refused"));
        assert!(!text.contains("<!DOCTYPE html>"));
    }
}
