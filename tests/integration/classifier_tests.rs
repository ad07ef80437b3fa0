//! Request classification against the real Firebase verifier

#[cfg(test)]
mod tests {
    use crate::common::assertions::ClassificationAssertions;
    use crate::common::{PROJECT_ID, TokenFactory, static_verifier};
    use firegate::auth::{AuthCategory, RequestClassifier};
    use firegate::config::{AuthConfig, TokenFailurePolicy};
    use std::collections::HashMap;

    fn classifier(policy: TokenFailurePolicy) -> RequestClassifier {
        let config = AuthConfig {
            firebase_project_id: PROJECT_ID.to_string(),
            token_failure_policy: policy,
            ..Default::default()
        };
        RequestClassifier::new(static_verifier(), &config)
    }

    fn headers(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[tokio::test]
    async fn test_signed_token_yields_identity() {
        let token = TokenFactory::new().valid("alice");
        let result = classifier(TokenFailurePolicy::FailOpen)
            .classify(&headers(&[]), Some(&token))
            .await;

        result.assert_admitted_as(AuthCategory::FirebaseUser);
        let identity = result.identity().unwrap();
        assert_eq!(identity.subject_id, "alice");
        assert_eq!(identity.email.as_deref(), Some("alice@example.com"));
    }

    #[tokio::test]
    async fn test_token_for_other_project_falls_back() {
        let token = TokenFactory::for_project("someone-else").valid("mallory");
        let result = classifier(TokenFailurePolicy::FailOpen)
            .classify(&headers(&[]), Some(&token))
            .await;

        result.assert_admitted_as(AuthCategory::GoogleService);
    }

    #[tokio::test]
    async fn test_expired_token_rejected_when_fail_closed() {
        let token = TokenFactory::new().expired("alice");
        let result = classifier(TokenFailurePolicy::FailClosed)
            .classify(&headers(&[]), Some(&token))
            .await;

        result.assert_rejected();
    }

    #[tokio::test]
    async fn test_unknown_signing_key_falls_back() {
        let tokens = TokenFactory::new();
        let token = tokens.sign_with_kid(&tokens.claims("alice"), "retired-key");
        let result = classifier(TokenFailurePolicy::FailOpen)
            .classify(&headers(&[]), Some(&token))
            .await;

        result.assert_admitted_as(AuthCategory::GoogleService);
    }

    #[tokio::test]
    async fn test_header_only_callers() {
        let c = classifier(TokenFailurePolicy::FailOpen);

        c.classify(
            &headers(&[("user-agent", "Mozilla/5.0 (compatible; Google-Apps-Script)")]),
            None,
        )
        .await
        .assert_admitted_as(AuthCategory::GoogleService);

        c.classify(
            &headers(&[("referer", "https://script.google.com/macros/s/abc/exec")]),
            None,
        )
        .await
        .assert_admitted_as(AuthCategory::GoogleService);

        c.classify(&headers(&[("x-development-mode", "true")]), None)
            .await
            .assert_admitted_as(AuthCategory::Development);

        c.classify(&headers(&[("user-agent", "curl/8.0")]), None)
            .await
            .assert_rejected();
    }

    #[tokio::test]
    async fn test_empty_request_is_rejected() {
        classifier(TokenFailurePolicy::FailOpen)
            .classify(&headers(&[]), None)
            .await
            .assert_rejected();
    }
}
