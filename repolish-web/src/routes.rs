//! Request handlers for the review form

use std::sync::Arc;

use axum::extract::{Form, State};
use axum::http::StatusCode;
use axum::response::Html;
use serde::Deserialize;
use tracing::{info, warn};

use repolish_core::{Error, Style};

use crate::page;
use crate::AppState;

/// Submitted form fields; both are optional on the wire
#[derive(Debug, Deserialize)]
pub struct ImproveForm {
    #[serde(default)]
    pub review: String,
    pub customization: Option<String>,
}

/// GET `/` - render the empty form with the default style selected.
///
/// No outbound call is made here.
pub async fn index() -> Html<String> {
    Html(page::render_page("", Style::default()))
}

/// POST `/` - rewrite the submitted review and render the result
pub async fn improve(
    State(state): State<Arc<AppState>>,
    Form(form): Form<ImproveForm>,
) -> (StatusCode, Html<String>) {
    // An absent style falls back to the default; an unknown style does not
    let label = form
        .customization
        .as_deref()
        .unwrap_or(Style::default().label());

    match state.client.improve(&form.review, label).await {
        Ok(result) => {
            info!(style = label, chars = result.len(), "Review rewritten");
            let selected = Style::from_label(label).unwrap_or_default();
            (StatusCode::OK, Html(page::render_page(&result, selected)))
        }
        Err(err) => {
            warn!(style = label, error = %err, "Review rewrite failed");
            (
                status_for(&err),
                Html(page::render_error_page(&user_message(&err), Style::default())),
            )
        }
    }
}

/// Map a core error onto the response status
fn status_for(err: &Error) -> StatusCode {
    match err {
        Error::UnknownStyle(_) => StatusCode::BAD_REQUEST,
        _ => StatusCode::BAD_GATEWAY,
    }
}

/// User-facing failure text; provider details stay in the logs
fn user_message(err: &Error) -> String {
    match err {
        Error::UnknownStyle(label) => format!("\"{}\" is not one of the available styles.", label),
        _ => "The review could not be rewritten right now. Please try again.".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_index_renders_default_selection() {
        let Html(body) = index().await;
        assert!(body.contains(r#"<option value="Auto-Improve" selected>"#));
        assert!(!body.contains("Improved review"));
    }

    #[test]
    fn test_unknown_style_is_client_error() {
        assert_eq!(
            status_for(&Error::UnknownStyle("Loud".into())),
            StatusCode::BAD_REQUEST
        );
    }

    #[test]
    fn test_provider_failures_are_gateway_errors() {
        assert_eq!(
            status_for(&Error::RateLimited("429".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(
            status_for(&Error::Auth("bad key".into())),
            StatusCode::BAD_GATEWAY
        );
        assert_eq!(status_for(&Error::EmptyResponse), StatusCode::BAD_GATEWAY);
    }

    #[test]
    fn test_user_message_hides_provider_detail() {
        let message = user_message(&Error::Auth("sk-secret rejected".into()));
        assert!(!message.contains("sk-secret"));
    }

    #[test]
    fn test_user_message_names_unknown_style() {
        let message = user_message(&Error::UnknownStyle("Pirate Voice".into()));
        assert!(message.contains("Pirate Voice"));
    }

    #[test]
    fn test_absent_customization_defaults() {
        let form = ImproveForm {
            review: "ok".into(),
            customization: None,
        };
        let label = form
            .customization
            .as_deref()
            .unwrap_or(Style::default().label());
        assert_eq!(label, "Auto-Improve");
    }
}
