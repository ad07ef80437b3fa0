//! Firebase verifier against a mock JWKS endpoint

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{JWKS, PROJECT_ID, TokenFactory};
    use firegate::auth::{FirebaseTokenVerifier, TokenVerifier, VerificationError};
    use firegate::config::AuthConfig;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn verifier_for(server: &MockServer) -> FirebaseTokenVerifier {
        let config = AuthConfig {
            firebase_project_id: PROJECT_ID.to_string(),
            jwks_url: format!("{}/jwk/securetoken", server.uri()),
            verify_timeout_ms: 2000,
            ..Default::default()
        };
        FirebaseTokenVerifier::new(&config).unwrap()
    }

    #[tokio::test]
    async fn test_keys_are_fetched_and_cached() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwk/securetoken"))
            .respond_with(
                ResponseTemplate::new(200)
                    .insert_header("cache-control", "public, max-age=21600")
                    .set_body_raw(JWKS, "application/json"),
            )
            .expect(1)
            .mount(&server)
            .await;

        let verifier = verifier_for(&server);
        assert_eq!(verifier.issuer(), "https://securetoken.google.com/firegate-test");

        let tokens = TokenFactory::new();
        for uid in ["a", "b", "c"] {
            let verified = verifier.verify(&tokens.valid(uid)).await.unwrap();
            assert_eq!(verified.uid, uid);
        }
    }

    #[tokio::test]
    async fn test_unreachable_key_endpoint_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwk/securetoken"))
            .respond_with(ResponseTemplate::new(502))
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify(&TokenFactory::new().valid("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::VerifierUnavailable(_)));
    }

    #[tokio::test]
    async fn test_malformed_key_set_is_unavailable() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/jwk/securetoken"))
            .respond_with(ResponseTemplate::new(200).set_body_raw("{\"keys\": []}", "application/json"))
            .mount(&server)
            .await;

        let err = verifier_for(&server)
            .verify(&TokenFactory::new().valid("a"))
            .await
            .unwrap_err();
        assert!(matches!(err, VerificationError::VerifierUnavailable(_)));
    }
}
