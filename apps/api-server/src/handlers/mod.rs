//! HTTP handlers and route configuration.

mod comments;
mod health;
mod posts;
mod tags;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.app_data(
        web::JsonConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .app_data(
        web::PathConfig::default()
            .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into()),
    )
    .service(
        web::scope("/api")
            // Public routes
            .route("/health", web::get().to(health::health_check))
            // Posts
            .service(
                web::scope("/posts")
                    .route("", web::post().to(posts::create_post))
                    .route("/{id}", web::put().to(posts::update_post))
                    .route("/{id}", web::delete().to(posts::delete_post))
                    .route("/{id}/favorite", web::post().to(posts::toggle_favorite)),
            )
            // Comments
            .service(
                web::scope("/comments")
                    .route("", web::post().to(comments::create_comment))
                    .route("/{id}", web::put().to(comments::update_comment))
                    .route("/{id}", web::delete().to(comments::delete_comment)),
            )
            // Tags
            .service(
                web::scope("/tags")
                    .route("", web::post().to(tags::create_tag))
                    .route("/{id}", web::put().to(tags::update_tag))
                    .route("/{id}", web::delete().to(tags::delete_tag)),
            ),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::StatusCode;
    use actix_web::{App, test, web};
    use serde_json::{Value, json};
    use uuid::Uuid;

    use blog_core::Policy;
    use blog_core::ports::TokenService;
    use blog_infra::{InMemoryStore, JwtConfig, JwtTokenService};

    use super::configure_routes;
    use crate::observability::RequestIdMiddleware;
    use crate::state::AppState;

    fn setup() -> (AppState, Arc<JwtTokenService>) {
        let tokens = Arc::new(JwtTokenService::new(JwtConfig::default()));
        let state = AppState::from_parts(
            Arc::new(InMemoryStore::new()),
            "memory",
            tokens.clone(),
            Policy::default(),
        );
        (state, tokens)
    }

    fn bearer(tokens: &JwtTokenService, user: Uuid) -> (&'static str, String) {
        let token = tokens
            .generate_token(user, "user@example.com", vec!["user".to_string()])
            .unwrap();
        ("Authorization", format!("Bearer {token}"))
    }

    #[actix_web::test]
    async fn test_health_reports_storage() {
        let (state, _) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["status"], "ok");
        assert_eq!(body["storage"], "memory");
    }

    #[actix_web::test]
    async fn test_anonymous_create_post_is_unauthenticated() {
        let (state, _) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(json!({"title": "Hello", "content": "world"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unauthenticated");
    }

    #[actix_web::test]
    async fn test_invalid_token_is_rejected() {
        let (state, _) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/tags")
            .insert_header(("Authorization", "Bearer not-a-token"))
            .set_json(json!({"name": "Go"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "invalid_token");
    }

    #[actix_web::test]
    async fn test_post_lifecycle_over_http() {
        let (state, tokens) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;
        let author = Uuid::new_v4();
        let other = Uuid::new_v4();

        let req = test::TestRequest::post()
            .uri("/api/tags")
            .insert_header(bearer(&tokens, author))
            .set_json(json!({"name": "Go"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&tokens, author))
            .set_json(json!({"title": "Post A", "content": "body", "tags": ["go"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["success"], true);
        assert_eq!(body["post"]["slug"], "post-a");
        assert_eq!(body["post"]["tags"][0]["slug"], "go");
        let id = body["post"]["id"].as_i64().unwrap();

        let req = test::TestRequest::put()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(bearer(&tokens, other))
            .set_json(json!({"title": "Hijacked", "content": "x"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(bearer(&tokens, author))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["success"], true);

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(bearer(&tokens, author))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn test_unknown_tags_are_listed() {
        let (state, tokens) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&tokens, Uuid::new_v4()))
            .set_json(json!({"title": "Post", "content": "x", "tags": ["rust", "go"]}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "unknown_tags");
        assert_eq!(body["invalid_slugs"], json!(["rust", "go"]));
    }

    #[actix_web::test]
    async fn test_anonymous_comment_is_unauthenticated() {
        let (state, _) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/comments")
            .set_json(json!({"post_slug": "missing", "email": "a@b.c", "comment": "hi"}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
    }

    #[actix_web::test]
    async fn test_malformed_body_is_bad_request() {
        let (state, tokens) = setup();
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(bearer(&tokens, Uuid::new_v4()))
            .insert_header(("Content-Type", "application/json"))
            .set_payload("{\"title\":")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["code"], "bad_request");
    }

    #[actix_web::test]
    async fn test_error_response_carries_request_id() {
        let (state, _) = setup();
        let app = test::init_service(
            App::new()
                .wrap(RequestIdMiddleware)
                .app_data(web::Data::new(state))
                .configure(configure_routes),
        )
        .await;

        let req = test::TestRequest::delete()
            .uri("/api/tags/1")
            .insert_header(("X-Request-ID", "req-42"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(resp.headers().get("x-request-id").unwrap(), "req-42");
    }

}
