//! Integration tests for the HTTP boundary: authentication and the
//! validation rules that must reject a request before anything is
//! persisted. Aggregation semantics are covered by the unit tests next
//! to the core.

mod common;

#[cfg(test)]
mod boundary_tests {
    use super::common::{create_test_jwt, create_test_server, create_test_state};
    use axum_test::http::{HeaderName, StatusCode};
    use serde_json::json;

    // ============================================================
    // Health check
    // ============================================================

    #[tokio::test]
    async fn test_root_is_public() {
        let server = create_test_server(create_test_state());

        let response = server.get("/").await;

        response.assert_status_ok();
        response.assert_text("Server is running!");
    }

    // ============================================================
    // Authentication boundary
    // ============================================================

    #[tokio::test]
    async fn test_get_inbox_without_token() {
        let server = create_test_server(create_test_state());

        let response = server.get("/inbox").await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_get_inbox_with_invalid_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .get("/inbox")
            .add_header(
                HeaderName::from_static("authorization"),
                "Bearer invalid_token_here",
            )
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_mark_read_without_token() {
        let server = create_test_server(create_test_state());

        let response = server.post("/conversations/abc/read").await;

        response.assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_send_message_without_token() {
        let server = create_test_server(create_test_state());

        let response = server
            .post("/messages")
            .json(&json!({
                "receiver_id": "u2",
                "content": "hola"
            }))
            .await;

        response.assert_status_forbidden();
    }

    // ============================================================
    // Send-reply validation (rejected before any store mutation)
    // ============================================================

    #[tokio::test]
    async fn test_send_message_with_empty_receiver() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt("u1");

        let response = server
            .post("/messages")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "receiver_id": "",
                "content": "hello",
                "conversation_id": "A"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_send_message_with_blank_content() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt("u1");

        let response = server
            .post("/messages")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "receiver_id": "u2",
                "content": "   ",
                "conversation_id": "A"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_send_message_to_self() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt("u1");

        let response = server
            .post("/messages")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({
                "receiver_id": "u1",
                "content": "hola"
            }))
            .await;

        response.assert_status_bad_request();
    }

    #[tokio::test]
    async fn test_send_message_with_missing_body_fields() {
        let server = create_test_server(create_test_state());
        let token = create_test_jwt("u1");

        let response = server
            .post("/messages")
            .add_header(
                HeaderName::from_static("authorization"),
                format!("Bearer {}", token),
            )
            .json(&json!({ "content": "hola" }))
            .await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
    }
}
