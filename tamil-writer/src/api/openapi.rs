//! OpenAPI documentation for the JSON API, served at `/api/docs`.

use utoipa::OpenApi;

use crate::api::handlers::generations;

#[derive(OpenApi)]
#[openapi(
    paths(generations::create_generation),
    tags(
        (name = "generations", description = "Generate Tamil poems and stories")
    ),
    info(
        title = "Tamil Writer API",
        description = "Generate a Tamil poem or story with a hosted language model and receive it as a standalone HTML document."
    )
)]
pub struct ApiDoc;
