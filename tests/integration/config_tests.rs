//! Configuration loading integration tests

#[cfg(test)]
mod tests {
    use firegate::config::{Config, StorageBackend, TokenFailurePolicy, apply_overrides};
    use std::collections::HashMap;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE: &str = r#"
server:
  port: 8088
  rate_limit:
    max_requests: 10
auth:
  firebase_project_id: sample-project
  token_failure_policy: fail_closed
  allow_development_header: false
  service_heuristics:
    user_agent_substrings: ["Google-Apps-Script"]
storage:
  collection: dashboards
logging:
  level: debug
  json: true
"#;

    fn write_config(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[tokio::test]
    async fn test_load_sample_file() {
        let file = write_config(SAMPLE);
        let config = Config::from_file(file.path()).await.unwrap();

        assert_eq!(config.server().port, 8088);
        assert_eq!(config.server().rate_limit.max_requests, 10);
        assert_eq!(config.server().rate_limit.window_secs, 900);
        assert_eq!(config.auth().firebase_project_id, "sample-project");
        assert_eq!(config.auth().token_failure_policy, TokenFailurePolicy::FailClosed);
        assert!(!config.auth().allow_development_header);
        assert_eq!(
            config.auth().service_heuristics.user_agent_substrings,
            vec!["Google-Apps-Script".to_string()]
        );
        assert_eq!(config.auth().service_heuristics.project_header, "x-apps-script-project");
        assert_eq!(config.storage().collection, "dashboards");
        assert_eq!(config.storage().document, "pocid");
        assert!(config.logging().json);
    }

    #[tokio::test]
    async fn test_invalid_file_is_an_error() {
        let file = write_config("server: [not, a, map]");
        assert!(Config::from_file(file.path()).await.is_err());

        let file = write_config("auth:\n  verify_timeout_ms: 0\n");
        assert!(Config::from_file(file.path()).await.is_err());
    }

    #[tokio::test]
    async fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load(dir.path().join("absent.yaml")).await.unwrap();
        assert_eq!(config.storage().backend, StorageBackend::Memory);
    }

    #[tokio::test]
    async fn test_environment_overrides_file() {
        let file = write_config(SAMPLE);
        let mut config = Config::from_file(file.path()).await.unwrap();

        let env: HashMap<&str, &str> = HashMap::from([
            ("PORT", "9000"),
            ("FIREBASE_PROJECT_ID", "env-project"),
            ("FIREGATE_TOKEN_FAILURE_POLICY", "fail_open"),
            ("FIREGATE_STORAGE_BACKEND", "firestore"),
            ("FIRESTORE_EMULATOR_HOST", "localhost:8080"),
        ]);
        apply_overrides(&mut config.gateway, |key| env.get(key).map(|v| v.to_string())).unwrap();

        assert_eq!(config.server().port, 9000);
        assert_eq!(config.auth().firebase_project_id, "env-project");
        assert_eq!(config.auth().token_failure_policy, TokenFailurePolicy::FailOpen);
        assert_eq!(config.storage().backend, StorageBackend::Firestore);
        assert!(config.validate().is_ok());
    }

    #[tokio::test]
    async fn test_yaml_round_trip_preserves_policy() {
        let file = write_config(SAMPLE);
        let config = Config::from_file(file.path()).await.unwrap();
        let yaml = config.to_yaml().unwrap();
        assert!(yaml.contains("fail_closed"));
    }
}
