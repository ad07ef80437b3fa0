//! HTTP API tests with the real Firebase verifier

#[cfg(test)]
mod tests {
    use crate::common::{TokenFactory, test_config, test_state};
    use actix_web::http::StatusCode;
    use actix_web::test;
    use firegate::auth::AuthCategory;
    use firegate::config::TokenFailurePolicy;
    use firegate::server::create_app;
    use serde_json::{Value, json};

    fn bearer(token: &str) -> (&'static str, String) {
        ("Authorization", format!("Bearer {}", token))
    }

    #[actix_web::test]
    async fn test_poc_round_trip_with_signed_token() {
        let (state, _) = test_state(test_config());
        let app = test::init_service(create_app(state)).await;
        let token = TokenFactory::new().valid("editor");

        let req = test::TestRequest::put()
            .uri("/api/poc")
            .insert_header(bearer(&token))
            .set_json(json!({"helloword": "first"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::put()
            .uri("/api/poc")
            .insert_header(bearer(&token))
            .set_json(json!({"helloword": "second"}))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get()
            .uri("/api/poc")
            .insert_header(bearer(&token))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, json!({"data": {"helloword": "second"}}));
    }

    #[actix_web::test]
    async fn test_expired_token_is_forbidden() {
        let (state, _) = test_state(test_config());
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/user/profile")
            .insert_header(bearer(&TokenFactory::new().expired("editor")))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Invalid token");
    }

    #[actix_web::test]
    async fn test_profile_reflects_token_claims() {
        let (state, _) = test_state(test_config());
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::get()
            .uri("/api/user/profile")
            .insert_header(bearer(&TokenFactory::new().valid("ada")))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["uid"], "ada");
        assert_eq!(body["email"], "ada@example.com");
        assert_eq!(body["name"], "Test User");
    }

    #[actix_web::test]
    async fn test_webhook_audits_every_outcome() {
        let (state, audit) = test_state(test_config());
        let app = test::init_service(create_app(state)).await;
        let tokens = TokenFactory::new();

        let cases: Vec<(Vec<(&str, String)>, StatusCode, AuthCategory)> = vec![
            (
                vec![bearer(&tokens.valid("ada"))],
                StatusCode::OK,
                AuthCategory::FirebaseUser,
            ),
            (
                vec![bearer(&TokenFactory::for_project("other").valid("ada"))],
                StatusCode::OK,
                AuthCategory::GoogleService,
            ),
            (
                vec![("X-Apps-Script-Project", "1AbC".to_string())],
                StatusCode::OK,
                AuthCategory::GoogleService,
            ),
            (
                vec![("X-Development-Mode", "true".to_string())],
                StatusCode::OK,
                AuthCategory::Development,
            ),
            (vec![], StatusCode::UNAUTHORIZED, AuthCategory::Unauthenticated),
        ];

        for (headers, status, category) in &cases {
            let mut req = test::TestRequest::post()
                .uri("/webhook/spreadsheet-change")
                .set_json(json!({"spreadsheetId": "sheet-1", "range": "A1"}));
            for header in headers {
                req = req.insert_header(header.clone());
            }
            let resp = test::call_service(&app, req.to_request()).await;
            assert_eq!(resp.status(), *status, "category {}", category);

            if *status == StatusCode::OK {
                let body: Value = test::read_body_json(resp).await;
                assert_eq!(body["authType"], category.as_str());
            }
        }

        let events = audit.events();
        assert_eq!(events.len(), cases.len());
        for (event, (_, _, category)) in events.iter().zip(&cases) {
            assert_eq!(event.category, *category);
            assert_eq!(event.authenticated, *category != AuthCategory::Unauthenticated);
        }
        assert_eq!(events[0].subject_id.as_deref(), Some("ada"));
        assert!(events[1].subject_id.is_none());
    }

    #[actix_web::test]
    async fn test_fail_closed_webhook_rejects_bad_token() {
        let mut config = test_config();
        config.gateway.auth.token_failure_policy = TokenFailurePolicy::FailClosed;
        let (state, _) = test_state(config);
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::post()
            .uri("/webhook/spreadsheet-change")
            .insert_header(bearer("not-a-jwt"))
            .insert_header(("User-Agent", "Google-Apps-Script"))
            .set_json(json!({}))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["authOptions"].as_array().map(Vec::len), Some(3));
    }

    #[actix_web::test]
    async fn test_cors_preflight_from_dashboard_origin() {
        let (state, _) = test_state(test_config());
        let app = test::init_service(create_app(state)).await;

        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri("/api/poc")
            .insert_header(("Origin", "http://localhost:3000"))
            .insert_header(("Access-Control-Request-Method", "PUT"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert!(resp.status().is_success());
        assert_eq!(
            resp.headers().get("access-control-allow-origin").unwrap(),
            "http://localhost:3000"
        );
    }
}
