//! End-to-end tests for the `littlepay` commands.
//!
//! Each test gets its own config directory and a wiremock server registered
//! as the `test` environment. Commands run through the same entry point as
//! the binary, with output captured and confirmations fed from a buffer.

use std::fs;
use std::io::Cursor;
use std::path::PathBuf;

use clap::Parser;
use serde_json::{json, Value};
use tempfile::TempDir;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use littlepay_rs::cli::Cli;
use littlepay_rs::commands::{self, Console, RESULT_FAILURE, RESULT_SUCCESS};
use littlepay_rs::config::{Config, ConfigDir};
use littlepay_rs::{ClientConfig, Result};

struct Harness {
    _tmp: TempDir,
    dir: ConfigDir,
    config_path: PathBuf,
}

impl Harness {
    /// A config dir holding a config whose active selection is `test`/`cst`.
    fn new(server: &MockServer) -> Self {
        let tmp = tempfile::tempdir().unwrap();
        let dir = ConfigDir::new(tmp.path().join(".littlepay"));
        let config_path = tmp.path().join("littlepay.yaml");

        fs::write(
            &config_path,
            format!(
                "active:\n  env: test\n  participant: cst\n\
                 envs:\n  qa:\n    url: https://api.qa.littlepay.com\n    version: v1\n  \
                 test:\n    url: {}\n    version: v1\n\
                 participants:\n  cst:\n    test:\n      audience: cst-audience\n      \
                 client_id: cst-client\n      client_secret: cst-secret\n",
                server.uri()
            ),
        )
        .unwrap();

        dir.update_current_config_path(&config_path).unwrap();

        Self {
            _tmp: tmp,
            dir,
            config_path,
        }
    }

    /// Run `littlepay <args>` with `input` as stdin.
    async fn run(&self, args: &[&str], input: &str) -> (Result<i32>, String) {
        let argv = std::iter::once("littlepay").chain(args.iter().copied());
        let cli = Cli::try_parse_from(argv).unwrap();

        let mut out = Vec::new();
        let mut input = Cursor::new(input.as_bytes().to_vec());
        let result = {
            let mut console = Console::new(&mut out, &mut input);
            commands::run_with(cli, &self.dir, &ClientConfig::default(), &mut console).await
        };

        (result, String::from_utf8(out).unwrap())
    }

    /// Blank out the active participant's client secret.
    fn clear_secret(&self) {
        let yaml = fs::read_to_string(&self.config_path).unwrap();
        fs::write(&self.config_path, yaml.replace("cst-secret", "''")).unwrap();
    }

    fn config(&self) -> Config {
        Config::load(&self.config_path).unwrap()
    }
}

async fn mount_token(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/api/v1/oauth/token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access_token": "test-token",
            "token_type": "Bearer",
            "expires_in": 3600
        })))
        .mount(server)
        .await;
}

async fn mount_groups(server: &MockServer, groups: Value) {
    let total = groups.as_array().map(|g| g.len()).unwrap_or(0);
    Mock::given(method("GET"))
        .and(path("/api/v1/concession_groups"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "list": groups, "total_count": total })),
        )
        .mount(server)
        .await;
}

fn two_groups() -> Value {
    json!([
        { "id": "g-1", "label": "Seniors", "participant_id": "cst" },
        { "id": "g-2", "label": "Students", "participant_id": "cst" }
    ])
}

fn lines(output: &str) -> Vec<&str> {
    output.lines().collect()
}

// ============================================================================
// CONFIG AND SWITCH TESTS
// ============================================================================

mod config_tests {
    use super::*;

    #[tokio::test]
    async fn test_config_shows_active_selection() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["config"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(
            lines(&output),
            [
                format!("Config: {}", harness.config_path.display()).as_str(),
                "Envs: qa, test",
                "Participants: cst",
                "Active: test, cst",
            ]
        );
    }

    #[tokio::test]
    async fn test_no_command_behaves_like_config() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&[], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert!(output.ends_with("Active: test, cst\n"));
    }

    #[tokio::test]
    async fn test_new_config_file_has_no_participant() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);
        let other = harness.dir.root().join("other.yaml");
        let other_arg = other.to_string_lossy().to_string();

        let (result, output) = harness.run(&["config", &other_arg], "").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert!(other.exists());
        assert!(output.contains("Envs: prod, qa"));
        assert!(output.contains("Active: qa, [no participant]"));
        assert_eq!(harness.dir.current_config_path().unwrap(), other);
    }

    #[tokio::test]
    async fn test_reset_restores_defaults() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["config", "--reset"], "").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert!(output.contains("Participants: \n"));
        assert_eq!(harness.config().active_env_name(), "qa");
    }

    #[tokio::test]
    async fn test_switch_env() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["switch", "env", "qa"], "").await;

        // cst has no credentials for qa
        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert!(output.contains("Active: qa, cst [missing credentials]"));
        assert_eq!(harness.config().active_env_name(), "qa");
    }

    #[tokio::test]
    async fn test_switch_to_unknown_env_fails() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, _) = harness.run(&["switch", "env", "staging"], "").await;

        assert!(result.unwrap_err().is_config_error());
        assert_eq!(harness.config().active_env_name(), "test");
    }

    #[tokio::test]
    async fn test_version() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["--version"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(output, format!("littlepay {}\n", env!("CARGO_PKG_VERSION")));
    }
}

// ============================================================================
// GROUPS COMMAND TESTS
// ============================================================================

mod groups_tests {
    use super::*;

    #[tokio::test]
    async fn test_list_groups_and_persist_token() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["groups"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(
            lines(&output),
            [
                "👥 Matching groups (2): test, cst",
                "Group(id=g-1, label=Seniors, participant_id=cst)",
                "Group(id=g-2, label=Students, participant_id=cst)",
            ]
        );

        let token = harness.config().active_token().unwrap();
        assert_eq!(token.secret(), "test-token");
    }

    #[tokio::test]
    async fn test_list_groups_csv_with_filter() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;
        let harness = Harness::new(&server);

        let (result, output) = harness.run(&["groups", "--csv", "-f", "STUD"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(lines(&output), ["id,label,participant_id", "g-2,Students,cst"]);
    }

    #[tokio::test]
    async fn test_link_product_to_matching_groups() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/concession_groups/g-1/products"))
            .and(body_json(json!({ "id": "p-1" })))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["groups", "-f", "senior", "link", "p-1"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert!(output.contains("Linking group <-> product: test, cst [g-1] <-> [p-1]"));
        assert!(output.contains("✅ Linked: {\"status_code\":201}"));
        assert!(output.contains("👥 Matching groups (1): test, cst"));
    }

    #[tokio::test]
    async fn test_remove_canceled() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/concession_groups/g-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["groups", "remove", "g-1"], "no\n").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert!(output.contains("Removing group: test, cst [g-1]"));
        assert!(output.contains("❔ Are you sure? (yes/no): "));
        assert!(output.contains("Canceled..."));
    }

    #[tokio::test]
    async fn test_remove_forced() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/concession_groups/g-1"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["groups", "remove", "g-1", "--force"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert!(!output.contains("Are you sure"));
        assert!(output.contains("Removing group...\n✅ Removed"));
    }

    #[tokio::test]
    async fn test_migrate_failure_sets_exit_status() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, two_groups()).await;

        Mock::given(method("POST"))
            .and(path("/api/v1/concession_groups/g-1/migrate"))
            .respond_with(ResponseTemplate::new(204))
            .mount(&server)
            .await;

        Mock::given(method("POST"))
            .and(path("/api/v1/concession_groups/g-2/migrate"))
            .respond_with(ResponseTemplate::new(500).set_body_json(json!({ "message": "boom" })))
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["groups", "migrate"], "yes\nyes\n").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert!(output.contains("✅ Migrated"));
        assert!(output.contains("❌ Error: API error: status=500"));
    }

    #[tokio::test]
    async fn test_group_products_csv() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_groups(&server, json!([{ "id": "g-1", "label": "Seniors", "participant_id": "cst" }])).await;

        Mock::given(method("GET"))
            .and(path("/api/v1/concession_groups/g-1/products"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [{ "id": "p-1" }],
                "total_count": 1
            })))
            .mount(&server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v1/products/p-1"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": "p-1",
                "code": "one",
                "status": "ACTIVE",
                "type": "CAPPING",
                "description": "one cap",
                "participant_id": "cst"
            })))
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["groups", "--csv", "products"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(lines(&output), ["group_id,product_id,participant_id", "g-1,p-1,cst"]);
    }

    #[tokio::test]
    async fn test_missing_credentials() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/api/v1/oauth/token"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        harness.clear_secret();

        let (result, output) = harness.run(&["groups"], "").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert_eq!(lines(&output), ["Active: test, cst [missing credentials]"]);
    }

    #[tokio::test]
    async fn test_missing_credentials_after_switch() {
        let server = MockServer::start().await;
        let harness = Harness::new(&server);
        harness.run(&["switch", "env", "qa"], "").await.0.unwrap();

        let (result, output) = harness.run(&["groups", "--csv"], "").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert_eq!(lines(&output), ["Active: qa, cst [missing credentials]"]);
    }
}

// ============================================================================
// PRODUCTS COMMAND TESTS
// ============================================================================

mod products_tests {
    use super::*;

    async fn mount_products(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v1/products"))
            .and(query_param("status", "ACTIVE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "list": [
                    {
                        "id": "p-1",
                        "code": "daily",
                        "status": "ACTIVE",
                        "type": "CAPPING",
                        "description": "Daily cap",
                        "participant_id": "cst"
                    },
                    {
                        "id": "p-2",
                        "code": "weekly",
                        "status": "ACTIVE",
                        "type": "CAPPING",
                        "description": "Weekly cap, off-peak",
                        "participant_id": "cst"
                    }
                ],
                "total_count": 2
            })))
            .expect(1)
            .mount(server)
            .await;
    }

    #[tokio::test]
    async fn test_no_participant() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/api/v1/products"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let yaml = fs::read_to_string(&harness.config_path).unwrap();
        fs::write(&harness.config_path, yaml.replace("participant: cst", "participant: ''")).unwrap();

        let (result, output) = harness.run(&["products"], "").await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert_eq!(lines(&output), ["Active: test, [no participant]"]);
    }

    #[tokio::test]
    async fn test_list_products_csv() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_products(&server).await;

        let harness = Harness::new(&server);
        let (result, output) = harness.run(&["products", "--csv", "--status", "ACTIVE"], "").await;

        assert_eq!(result.unwrap(), RESULT_SUCCESS);
        assert_eq!(
            lines(&output),
            [
                "id,code,status,type,description,participant_id",
                "p-1,daily,ACTIVE,CAPPING,Daily cap,cst",
                "p-2,weekly,ACTIVE,CAPPING,\"Weekly cap, off-peak\",cst",
            ]
        );
    }

    #[tokio::test]
    async fn test_unlink_reports_each_product() {
        let server = MockServer::start().await;
        mount_token(&server).await;
        mount_products(&server).await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/concession_groups/g-1/products/p-1"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&server)
            .await;

        Mock::given(method("DELETE"))
            .and(path("/api/v1/concession_groups/g-1/products/p-2"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let harness = Harness::new(&server);
        let (result, output) = harness
            .run(&["products", "-s", "ACTIVE", "unlink", "g-1"], "")
            .await;

        assert_eq!(result.unwrap(), RESULT_FAILURE);
        assert!(output.starts_with("🛒 Matching products (2): test, cst\n"));
        assert!(output.contains("Unlinking group <-> product: test, cst [g-1] <-> [p-1]\n✅ Unlinked"));
        assert!(output.contains("[g-1] <-> [p-2]\n❌ Error: API error: status=404"));
    }
}
