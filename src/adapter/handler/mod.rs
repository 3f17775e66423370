pub mod search_handler;

pub use search_handler::AppState;

use axum::routing::get;
use axum::Router;
use tower_http::trace::TraceLayer;

/// REST API router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthcheck", get(search_handler::healthcheck))
        .route(
            "/search",
            get(search_handler::search_get).post(search_handler::search_post),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    use std::sync::Arc;

    use crate::domain::entity::search::SearchResult;
    use crate::domain::repository::search_repository::MockSearchRepository;
    use crate::domain::repository::SearchRepository;
    use crate::usecase::SearchUseCase;

    fn make_app_state(mock: MockSearchRepository) -> AppState {
        let repo: Arc<dyn SearchRepository> = Arc::new(mock);
        AppState {
            search_uc: Arc::new(SearchUseCase::new(repo)),
        }
    }

    async fn body_json(resp: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_healthcheck() {
        let state = make_app_state(MockSearchRepository::new());
        let app = router(state);

        let req = Request::builder()
            .uri("/healthcheck")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["status"], "ok");
    }

    #[tokio::test]
    async fn test_get_search_without_params_is_bad_request() {
        // モックに期待を設定しないことで、エンジンが一切呼ばれないことも検証する
        let state = make_app_state(MockSearchRepository::new());
        let app = router(state);

        let req = Request::builder()
            .uri("/search")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        assert!(json["error"].as_str().unwrap().contains("required"));
    }

    #[tokio::test]
    async fn test_get_search_empty_params_is_bad_request() {
        let state = make_app_state(MockSearchRepository::new());
        let app = router(state);

        let req = Request::builder()
            .uri("/search?q=&i=")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_search_accepts_qt_alias() {
        let mut mock = MockSearchRepository::new();
        mock.expect_search()
            .withf(|req| req.search_term == "openai" && req.index == "docs")
            .returning(|_| Ok(SearchResult::default()));
        mock.expect_record_query()
            .returning(|_, _| Ok("[201] created; version=1".to_string()));

        let state = make_app_state(mock);
        let app = router(state);

        let req = Request::builder()
            .uri("/search?qt=openai&i=docs")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_post_search_with_empty_term_is_bad_request() {
        let state = make_app_state(MockSearchRepository::new());
        let app = router(state);

        let req = Request::builder()
            .method("POST")
            .uri("/search")
            .header("content-type", "application/json")
            .body(Body::from(r#"{"searchTerm":"","index":"docs"}"#))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_post_search_passes_fields_through() {
        let mut mock = MockSearchRepository::new();
        mock.expect_search()
            .withf(|req| req.fields == vec!["title".to_string(), "body".to_string()])
            .returning(|_| Ok(SearchResult::default()));
        mock.expect_record_query()
            .returning(|_, _| Ok("[201] created; version=1".to_string()));

        let state = make_app_state(mock);
        let app = router(state);

        let req = Request::builder()
            .method("POST")
            .uri("/search")
            .header("content-type", "application/json")
            .body(Body::from(
                r#"{"searchTerm":"openai","index":"docs","fields":["title","body"]}"#,
            ))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert!(json["hits"]["hits"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_post_search_malformed_json_is_client_error() {
        let state = make_app_state(MockSearchRepository::new());
        let app = router(state);

        let req = Request::builder()
            .method("POST")
            .uri("/search")
            .header("content-type", "application/json")
            .body(Body::from("{not json"))
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert!(resp.status().is_client_error());
    }

    #[tokio::test]
    async fn test_engine_error_maps_to_bad_gateway() {
        let mut mock = MockSearchRepository::new();
        mock.expect_search().returning(|_| {
            Err(crate::error::SearchError::Engine {
                status: 404,
                error_type: "index_not_found_exception".to_string(),
                reason: "no such index [missing]".to_string(),
            })
        });
        mock.expect_record_query()
            .returning(|_, _| Ok(String::new()));

        let state = make_app_state(mock);
        let app = router(state);

        let req = Request::builder()
            .uri("/search?q=openai&i=missing")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::BAD_GATEWAY);
        let json = body_json(resp).await;
        assert_eq!(
            json["error"],
            "[404] index_not_found_exception: no such index [missing]"
        );
    }

    #[tokio::test]
    async fn test_transport_error_maps_to_internal_error() {
        let mut mock = MockSearchRepository::new();
        mock.expect_search().returning(|_| {
            Err(crate::error::SearchError::Transport(
                "connection refused".to_string(),
            ))
        });
        mock.expect_record_query()
            .returning(|_, _| Ok(String::new()));

        let state = make_app_state(mock);
        let app = router(state);

        let req = Request::builder()
            .uri("/search?q=openai&i=docs")
            .body(Body::empty())
            .unwrap();

        let resp = app.oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
