use std::future::Future;

use subex_status::{ContainerResolver, StatusRenderer};

use crate::ClientError;

/// Drive a status container around a request.
///
/// Shows a spinner with `message` while `request` is pending and the error
/// text if it fails. On success the container is left for the caller to fill.
pub async fn track<R, T, F>(
    renderer: &StatusRenderer<R>,
    target: &str,
    message: &str,
    request: F,
) -> Result<T, ClientError>
where
    R: ContainerResolver,
    F: Future<Output = Result<T, ClientError>>,
{
    renderer.show_loading(target, Some(message));
    let result = request.await;
    if let Err(e) = &result {
        tracing::debug!(container = target, error = %e, "tracked request failed");
        renderer.show_error(target, &e.user_message());
    }
    result
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use subex_status::Document;

    use super::*;

    fn page() -> StatusRenderer<Arc<Document>> {
        let doc = Arc::new(Document::new());
        doc.insert("extract-status");
        StatusRenderer::new(doc)
    }

    #[tokio::test]
    async fn success_leaves_loading_for_caller() {
        let renderer = page();
        let value = track(&renderer, "extract-status", "Extracting…", async {
            Ok::<_, ClientError>(42)
        })
        .await
        .unwrap();
        assert_eq!(value, 42);

        let status = renderer.resolver().get("extract-status").unwrap();
        assert!(status.markup().find_by_role("status").is_some());
        assert_eq!(status.text(), "Extracting…");
    }

    #[tokio::test]
    async fn failure_renders_error() {
        let renderer = page();
        let result: Result<(), _> = track(&renderer, "extract-status", "Extracting…", async {
            Err(ClientError::Api {
                status: 500,
                message: "Failed to extract subtitle".to_string(),
            })
        })
        .await;
        assert!(result.is_err());

        let markup = renderer.resolver().get("extract-status").unwrap().markup();
        assert!(markup.find_by_role("alert").is_some());
        assert_eq!(markup.text_content(), "Failed to extract subtitle");
    }

    #[tokio::test]
    async fn missing_container_still_returns_result() {
        let renderer = StatusRenderer::new(Document::new());
        let result = track(&renderer, "nowhere", "Working", async {
            Err::<(), _>(ClientError::NoSession)
        })
        .await;
        assert!(matches!(result, Err(ClientError::NoSession)));
    }
}
