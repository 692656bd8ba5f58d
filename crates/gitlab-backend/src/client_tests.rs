//! Tests for GitLabTracker using wiremock and the scripted transport

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use crate::tracker::GitLabTracker;
    use tracker_core::{
        CreateIssueOptions, IssueTracker, LogLevel, NoteOptions, StringCatalog, TrackerConfig,
        TrackerServices, FAILED_ISSUE_ID,
    };
    use tracker_mock::{RecordingLog, ScriptedReply, ScriptedTransport};
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn services(log: &RecordingLog) -> TrackerServices {
        TrackerServices::new(Arc::new(log.clone()), Arc::new(StringCatalog::default()))
    }

    fn config(uri: &str, project: Option<&str>) -> TrackerConfig {
        TrackerConfig::new(uri, "test-token", project)
    }

    /// Helper to mount the version probe answer
    async fn mount_version(mock_server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/version"))
            .and(header("PRIVATE-TOKEN", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "version": "16.5.0",
                "revision": "abc123"
            })))
            .mount(mock_server)
            .await;
    }

    /// Helper to create a mock GitLab issue response
    fn mock_gitlab_issue(iid: u64, title: &str, state: &str) -> serde_json::Value {
        serde_json::json!({
            "id": 1000 + iid,
            "iid": iid,
            "project_id": 123,
            "title": title,
            "description": "Steps to reproduce",
            "state": state,
            "labels": ["bug"],
            "created_at": "2024-01-01T00:00:00.000Z",
            "updated_at": "2024-01-02T00:00:00.000Z",
            "closed_at": null,
            "web_url": format!("https://gitlab.com/group/project/-/issues/{}", iid)
        })
    }

    async fn connected_tracker(mock_server: &MockServer, log: &RecordingLog) -> GitLabTracker {
        mount_version(mock_server).await;
        GitLabTracker::new("gitlab", config(&mock_server.uri(), Some("123")), services(log))
            .unwrap()
    }

    fn scripted_version() -> ScriptedReply {
        ScriptedReply::json(200, serde_json::json!({"version": "16.5.0"}))
    }

    // ==================== Construction & connection ====================

    #[test]
    fn test_new_rejects_empty_token() {
        let log = RecordingLog::new();
        let err = GitLabTracker::new(
            "gitlab",
            TrackerConfig::new("http://127.0.0.1:1", "  ", Some("1")),
            services(&log),
        )
        .err()
        .unwrap();

        assert!(err.is_configuration());
        assert!(log.entries().is_empty());
    }

    #[test]
    fn test_new_rejects_empty_host() {
        let transport = ScriptedTransport::new("http://unused");
        let calls = transport.calls();
        let log = RecordingLog::new();

        let result = GitLabTracker::with_transport(
            "gitlab",
            TrackerConfig::new("", "test-token", Some("1")),
            transport,
            services(&log),
        );

        assert!(result.err().unwrap().is_configuration());
        assert!(calls.is_empty());
    }

    #[tokio::test]
    async fn test_connects_with_version_probe() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/version"))
            .and(header("PRIVATE-TOKEN", "test-token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"version": "16.5.0"})),
            )
            .expect(1)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker =
            GitLabTracker::new("gitlab", config(&mock_server.uri(), Some("123")), services(&log))
                .unwrap();

        assert!(tracker.is_connected());
        assert_eq!(tracker.name(), "gitlab");
        assert!(log.entries().is_empty());
    }

    #[tokio::test]
    async fn test_failed_probe_stays_disconnected_and_redacts_key() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = GitLabTracker::new(
            "gitlab",
            TrackerConfig::new(&mock_server.uri(), "glpat-abcdef1234", Some("123")),
            services(&log),
        )
        .unwrap();

        assert!(!tracker.is_connected());
        assert_eq!(log.count(LogLevel::Error), 1);
        assert!(log.contains(LogLevel::Error, "HTTP 500"));
        assert!(log.contains(LogLevel::Error, "****1234"));
        assert!(!log.contains(LogLevel::Error, "glpat-abcdef"));
    }

    #[test]
    fn test_unreachable_tracker_is_not_a_construction_error() {
        let log = RecordingLog::new();
        let tracker = GitLabTracker::new(
            "gitlab",
            TrackerConfig::new("http://127.0.0.1:1/api/v4", "test-token", Some("1")),
            services(&log),
        )
        .unwrap();

        assert!(!tracker.is_connected());
        assert_eq!(log.count(LogLevel::Error), 1);
    }

    #[test]
    fn test_connect_can_be_retried() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(ScriptedReply::fail("connection refused"))
            .reply(scripted_version());
        let log = RecordingLog::new();
        let mut tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", Some("1")),
            transport,
            services(&log),
        )
        .unwrap();

        assert!(!tracker.is_connected());
        assert!(tracker.connect());
        assert!(tracker.is_connected());
    }

    // ==================== get_issue ====================

    #[tokio::test]
    async fn test_get_issue_normalizes_fields() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/42"))
            .and(header("PRIVATE-TOKEN", "test-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "iid": 42,
                "title": "T",
                "state": "opened"
            })))
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;
        let issue = tracker.get_issue("42").unwrap();

        assert_eq!(issue.id, "42");
        assert_eq!(issue.summary, "T");
        assert_eq!(issue.status_code, "opened");
        assert_eq!(issue.status_verbose, "opened");
        assert!(!issue.is_resolved);
        assert_eq!(issue.id_html, "<b>42 : </b>");
        assert_eq!(issue.status_html, "opened");
        assert_eq!(issue.summary_html, "T");
    }

    #[tokio::test]
    async fn test_get_issue_closed_is_resolved() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/7"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_gitlab_issue(7, "Fixed crash", "closed")),
            )
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;
        let issue = tracker.get_issue("7").unwrap();

        assert!(issue.is_resolved);
        assert_eq!(issue.status_code, "closed");
        assert_eq!(issue.description.as_deref(), Some("Steps to reproduce"));
        assert_eq!(
            issue.web_url.as_deref(),
            Some("https://gitlab.com/group/project/-/issues/7")
        );
    }

    #[tokio::test]
    async fn test_get_issue_not_found_returns_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/999"))
            .respond_with(
                ResponseTemplate::new(404)
                    .set_body_json(serde_json::json!({"message": "404 Not found"})),
            )
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;

        assert!(tracker.get_issue("999").is_none());
        assert!(!tracker.check_bug_id_existence("999"));
        assert_eq!(log.count(LogLevel::Warning), 0);
    }

    #[tokio::test]
    async fn test_get_issue_malformed_body_returns_none() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/5"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"iid": 5})),
            )
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;

        assert!(tracker.get_issue("5").is_none());
    }

    #[test]
    fn test_get_issue_transport_failure_logs_one_warning() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(scripted_version())
            .reply(ScriptedReply::fail("operation timed out"));
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", Some("123")),
            transport,
            services(&log),
        )
        .unwrap();

        assert!(tracker.get_issue("42").is_none());
        assert_eq!(log.count(LogLevel::Warning), 1);
        assert!(log.contains(LogLevel::Warning, "GitLab Issue ID 42"));
        assert!(log.contains(LogLevel::Warning, "operation timed out"));
        assert_eq!(log.count(LogLevel::Error), 0);
    }

    #[tokio::test]
    async fn test_check_bug_id_existence() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/1"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(mock_gitlab_issue(1, "First", "opened")),
            )
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;

        assert!(tracker.check_bug_id_existence("1"));
        assert!(!tracker.check_bug_id_existence("2"));
    }

    #[tokio::test]
    async fn test_field_projections_refetch_the_issue() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/projects/123/issues/9"))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(mock_gitlab_issue(9, "Login & logout", "opened")),
            )
            .expect(3)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;

        assert_eq!(tracker.get_issue_status_code("9").as_deref(), Some("opened"));
        assert_eq!(
            tracker.get_issue_status_verbose("9").as_deref(),
            Some("opened")
        );
        assert_eq!(
            tracker.get_issue_summary_html("9").as_deref(),
            Some("Login &amp; logout")
        );
    }

    #[test]
    fn test_check_bug_id_syntax() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(scripted_version());
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", None),
            transport,
            services(&log),
        )
        .unwrap();

        assert!(tracker.check_bug_id_syntax("123"));
        assert!(!tracker.check_bug_id_syntax("abc"));
        assert!(!tracker.check_bug_id_syntax("12a"));
        assert!(!tracker.check_bug_id_syntax(""));
    }

    // ==================== add_issue ====================

    #[tokio::test]
    async fn test_add_issue_without_project_is_configuration_error() {
        let mock_server = MockServer::start().await;
        mount_version(&mock_server).await;

        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker =
            GitLabTracker::new("gitlab", config(&mock_server.uri(), None), services(&log))
                .unwrap();

        assert!(!tracker.can_create_via_api());
        let err = tracker
            .add_issue("Crash", "details", &CreateIssueOptions::default())
            .unwrap_err();
        assert!(err.is_configuration());
    }

    #[tokio::test]
    async fn test_add_issue_success() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/projects/123/issues"))
            .and(header("PRIVATE-TOKEN", "test-token"))
            .and(query_param("title", "Crash on login"))
            .and(query_param("description", "Test case TC-1 failed"))
            .and(query_param("labels", "bug"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"iid": 7})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;
        let outcome = tracker
            .add_issue(
                "Crash on login",
                "Test case TC-1 failed",
                &CreateIssueOptions::default(),
            )
            .unwrap();

        assert!(outcome.status_ok);
        assert_eq!(outcome.id.as_deref(), Some("7"));
        assert!(outcome.msg.contains("Crash on login"));
        assert!(outcome.msg.contains("123"));
    }

    #[tokio::test]
    async fn test_add_issue_with_custom_labels() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/projects/123/issues"))
            .and(query_param("labels", "bug,ui"))
            .respond_with(ResponseTemplate::new(201).set_body_json(serde_json::json!({"iid": 8})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;
        let opts = CreateIssueOptions {
            labels: vec!["bug".to_string(), "ui".to_string()],
            ..Default::default()
        };
        let outcome = tracker.add_issue("Button misaligned", "", &opts).unwrap();

        assert!(outcome.status_ok);
        assert_eq!(outcome.id.as_deref(), Some("8"));
    }

    #[tokio::test]
    async fn test_add_issue_rejected_by_gitlab() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/projects/123/issues"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(serde_json::json!({"message": "bad title"})),
            )
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker = connected_tracker(&mock_server, &log).await;
        let outcome = tracker
            .add_issue("", "no title", &CreateIssueOptions::default())
            .unwrap();

        assert!(!outcome.status_ok);
        assert_eq!(outcome.id, None);
        assert!(outcome.msg.contains("bad title"));
    }

    #[test]
    fn test_add_issue_transport_failure() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(scripted_version())
            .reply(ScriptedReply::fail("connection reset by peer"));
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", Some("123")),
            transport,
            services(&log),
        )
        .unwrap();

        let outcome = tracker
            .add_issue("Crash", "details", &CreateIssueOptions::default())
            .unwrap();

        assert!(!outcome.status_ok);
        assert_eq!(outcome.id.as_deref(), Some(FAILED_ISSUE_ID));
        assert!(outcome.msg.contains("connection reset by peer"));
        assert_eq!(log.count(LogLevel::Warning), 1);
    }

    // ==================== Disconnected state ====================

    #[test]
    fn test_disconnected_operations_skip_the_network() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(ScriptedReply::text(503, "maintenance"));
        let calls = transport.calls();
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", Some("123")),
            transport,
            services(&log),
        )
        .unwrap();
        assert!(!tracker.is_connected());
        assert_eq!(calls.len(), 1);

        assert!(tracker.get_issue("42").is_none());
        assert!(!tracker.check_bug_id_existence("42"));
        assert!(tracker.get_issue_status_code("42").is_none());
        let outcome = tracker
            .add_issue("Crash", "details", &CreateIssueOptions::default())
            .unwrap();

        assert!(!outcome.status_ok);
        assert_eq!(outcome.id, None);
        assert!(outcome.msg.contains("not connected"));
        assert_eq!(calls.len(), 1);
        assert!(log.contains(LogLevel::Error, "get_issue: not connected"));
    }

    #[tokio::test]
    async fn test_disconnected_tracker_sends_no_issue_requests() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/version"))
            .respond_with(ResponseTemplate::new(401))
            .expect(1)
            .mount(&mock_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/projects/123/issues/42"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&mock_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&mock_server)
            .await;

        let log = RecordingLog::new();
        let tracker =
            GitLabTracker::new("gitlab", config(&mock_server.uri(), Some("123")), services(&log))
                .unwrap();

        assert!(tracker.get_issue("42").is_none());
        assert!(!tracker
            .add_issue("Crash", "", &CreateIssueOptions::default())
            .unwrap()
            .status_ok);
    }

    // ==================== Shared instance ====================

    #[tokio::test]
    async fn test_shared_tracker_answers_each_caller() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<GitLabTracker>();

        let mock_server = MockServer::start().await;
        for iid in 1..=8u64 {
            Mock::given(method("GET"))
                .and(path(format!("/projects/123/issues/{}", iid)))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(mock_gitlab_issue(iid, &format!("Issue {}", iid), "opened"))
                        .set_delay(std::time::Duration::from_millis(20)),
                )
                .expect(4)
                .mount(&mock_server)
                .await;
        }

        let log = RecordingLog::new();
        let tracker = Arc::new(connected_tracker(&mock_server, &log).await);

        let handles: Vec<_> = (1..=8u64)
            .map(|iid| {
                let tracker = Arc::clone(&tracker);
                std::thread::spawn(move || {
                    (0..4)
                        .map(|_| tracker.get_issue(&iid.to_string()))
                        .collect::<Vec<_>>()
                })
            })
            .collect();

        for (iid, handle) in (1..=8u64).zip(handles) {
            for issue in handle.join().unwrap() {
                let issue = issue.unwrap();
                assert_eq!(issue.id, iid.to_string());
                assert_eq!(issue.summary, format!("Issue {}", iid));
                assert_eq!(issue.id_html, format!("<b>{} : </b>", iid));
            }
        }
        assert!(log.entries().is_empty());
    }

    // ==================== Notes & presentation ====================

    #[test]
    fn test_add_note_is_not_supported() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(scripted_version());
        let calls = transport.calls();
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4", Some("123")),
            transport,
            services(&log),
        )
        .unwrap();

        assert!(!tracker.add_note("42", "Executed in build 1.2", &NoteOptions::default()));
        assert!(!tracker.add_note("", "", &NoteOptions::default()));
        assert_eq!(calls.len(), 1);
    }

    #[test]
    fn test_urls_and_template() {
        let transport = ScriptedTransport::new("https://gitlab.example.com/api/v4")
            .reply(scripted_version());
        let log = RecordingLog::new();
        let tracker = GitLabTracker::with_transport(
            "gitlab",
            config("https://gitlab.example.com/api/v4/", Some("123")),
            transport,
            services(&log),
        )
        .unwrap();

        assert!(tracker.can_create_via_api());
        assert_eq!(
            tracker.view_issue_url("42").as_deref(),
            Some("https://gitlab.example.com/api/v4/projects/123/issues/42")
        );
        assert_eq!(
            tracker.create_issue_url().as_deref(),
            Some("https://gitlab.example.com/api/v4/projects/123/issues")
        );

        let template = tracker.config_template();
        for key in ["apikey", "uribase", "uriview", "projectidentifier"] {
            assert!(template.contains(key), "template is missing {key}");
        }
    }
}
