//! Axum route handler for PDF rendering.

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::errors::AppError;
use crate::latex::validate_latex_structure;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RenderRequest {
    pub latex: String,
}

/// POST /api/v1/render
///
/// Returns the compiled PDF as `application/pdf`. Documents missing the
/// `\documentclass` / `\begin{document}` / `\end{document}` frame are rejected
/// before the compiler is invoked.
pub async fn handle_render(
    State(state): State<AppState>,
    Json(request): Json<RenderRequest>,
) -> Result<Response, AppError> {
    if !validate_latex_structure(&request.latex) {
        return Err(AppError::Validation(
            "latex must contain \\documentclass, \\begin{document} and \\end{document}"
                .to_string(),
        ));
    }

    let pdf = state.pdf.compile(&request.latex).await?;
    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf"),
            (
                header::CONTENT_DISPOSITION,
                "attachment; filename=\"resume.pdf\"",
            ),
        ],
        pdf,
    )
        .into_response())
}
