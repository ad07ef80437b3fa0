//! HTTP app backed by the Firestore REST backend

#[cfg(test)]
mod tests {
    use crate::common::{TokenFactory, static_verifier, test_config};
    use actix_web::http::StatusCode;
    use actix_web::{test, web};
    use firegate::auth::MemoryAuditSink;
    use firegate::config::{Config, StorageBackend};
    use firegate::server::{ServerBuilder, create_app};
    use firegate::storage::DocumentStore;
    use serde_json::{Value, json};
    use std::sync::Arc;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const DOC_PATH: &str = "/v1/projects/firegate-test/databases/(default)/documents/poc/pocid";

    fn firestore_config(server: &MockServer) -> Config {
        let mut config = test_config();
        config.gateway.storage.backend = StorageBackend::Firestore;
        config.gateway.storage.firestore.base_url = server.uri();
        config.gateway.storage.firestore.access_token = Some("ya29.test".to_string());
        config
    }

    fn state(config: Config) -> web::Data<firegate::server::AppState> {
        let store = DocumentStore::new(config.storage(), &config.auth().firebase_project_id).unwrap();
        let state = ServerBuilder::new()
            .with_config(config)
            .with_verifier(static_verifier())
            .with_store(store)
            .with_audit_sink(Arc::new(MemoryAuditSink::new()))
            .build_state()
            .unwrap();
        web::Data::new(state)
    }

    #[actix_web::test]
    async fn test_get_poc_reads_firestore_document() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "name": "projects/firegate-test/databases/(default)/documents/poc/pocid",
                "fields": {"helloword": {"stringValue": "from firestore"}}
            })))
            .mount(&server)
            .await;

        let app = test::init_service(create_app(state(firestore_config(&server)))).await;
        let req = test::TestRequest::get()
            .uri("/api/poc")
            .insert_header(("Authorization", format!("Bearer {}", TokenFactory::new().valid("u"))))
            .to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;

        assert_eq!(body["data"]["helloword"], "from firestore");
    }

    #[actix_web::test]
    async fn test_put_poc_patches_with_update_mask() {
        let server = MockServer::start().await;
        Mock::given(method("PATCH"))
            .and(path(DOC_PATH))
            .and(query_param("updateMask.fieldPaths", "helloword"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"fields": {}})))
            .expect(1)
            .mount(&server)
            .await;

        let app = test::init_service(create_app(state(firestore_config(&server)))).await;
        let req = test::TestRequest::put()
            .uri("/api/poc")
            .insert_header(("Authorization", format!("Bearer {}", TokenFactory::new().valid("u"))))
            .set_json(json!({"helloword": "patched"}))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn test_firestore_outage_is_internal_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(DOC_PATH))
            .respond_with(ResponseTemplate::new(503).set_body_string("unavailable"))
            .mount(&server)
            .await;

        let app = test::init_service(create_app(state(firestore_config(&server)))).await;
        let req = test::TestRequest::get()
            .uri("/api/poc")
            .insert_header(("Authorization", format!("Bearer {}", TokenFactory::new().valid("u"))))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
