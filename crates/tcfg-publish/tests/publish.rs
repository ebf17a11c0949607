//! Integration tests for normalization and dataset dispatch.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use serde_json::{Value, json};
use tcfg_publish::{
    DEFAULT_TARGETS_NAMESPACE_ID, Dataset, DispatchStatus, KvSink, NamespaceConfig, PublishError,
    Publisher, SinkError, load_and_normalize,
};
use tempfile::TempDir;

#[derive(Debug, Clone, PartialEq)]
struct RecordedWrite {
    namespace_id: String,
    key: String,
    payload: String,
}

/// Records every write and fails the keys listed in `reject`.
#[derive(Default)]
struct RecordingSink {
    writes: RefCell<Vec<RecordedWrite>>,
    reject: Vec<&'static str>,
}

impl KvSink for RecordingSink {
    fn write(&self, namespace_id: &str, key: &str, payload: &[u8]) -> Result<(), SinkError> {
        self.writes.borrow_mut().push(RecordedWrite {
            namespace_id: namespace_id.to_string(),
            key: key.to_string(),
            payload: String::from_utf8(payload.to_vec()).expect("utf-8 payload"),
        });
        if self.reject.iter().any(|rejected| *rejected == key) {
            return Err(SinkError::Rejected {
                status: Some(1),
                stdout: "partial output".to_string(),
                stderr: "authentication required".to_string(),
            });
        }
        Ok(())
    }
}

fn no_env() -> NamespaceConfig {
    NamespaceConfig::new(HashMap::new())
}

fn config_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("targets.csv"),
        "tenant_id,company_name,pr_url,twitter_id,x_feed_url,line_user_id,enabled\n\
         t1,株式会社アクメ,https://acme.example,@acme,,U0123456789abcdef0123456789abcdef,true\n\
         t2,Beta,,,,U0123456789abcdef0123456789abcdef,Yes\n\
         t3,Gamma,,,,U0123456789abcdef0123456789abcdef,FALSE\n",
    )
    .unwrap();
    fs::write(
        dir.path().join("sinks.csv"),
        "tenant_id,type,enabled,config_json\n\
         t1,line,TRUE,\n",
    )
    .unwrap();
    dir
}

fn datasets(dir: &Path) -> Vec<Dataset> {
    vec![Dataset::targets(dir), Dataset::sinks(dir)]
}

#[test]
fn load_and_normalize_types_enabled() {
    let dir = config_dir();
    let records = load_and_normalize(&dir.path().join("targets.csv")).unwrap();

    let enabled: Vec<&Value> = records.iter().map(|record| &record["enabled"]).collect();
    assert_eq!(enabled, vec![&json!(true), &json!(false), &json!(false)]);
    assert_eq!(records[0]["company_name"], json!("株式会社アクメ"));
    assert_eq!(records[0]["x_feed_url"], json!(""));
}

#[test]
fn load_and_normalize_missing_file_is_fatal() {
    let dir = TempDir::new().unwrap();
    let result = load_and_normalize(&dir.path().join("targets.csv"));
    assert!(matches!(result, Err(PublishError::Ingest(_))));
}

#[test]
fn upload_writes_every_dataset_with_resolved_namespace() {
    let dir = config_dir();
    let namespaces = no_env();
    let sink = RecordingSink::default();
    let mut out = Vec::new();

    let summary = Publisher::new(&namespaces, &sink)
        .publish_all(&datasets(dir.path()), &mut out)
        .unwrap();

    assert!(summary.success());
    let writes = sink.writes.borrow();
    let keys: Vec<&str> = writes.iter().map(|write| write.key.as_str()).collect();
    assert_eq!(keys, vec!["targets:active", "sinks:active"]);
    assert!(
        writes
            .iter()
            .all(|write| write.namespace_id == DEFAULT_TARGETS_NAMESPACE_ID)
    );

    let sinks_payload: Value = serde_json::from_str(&writes[1].payload).unwrap();
    assert_eq!(
        sinks_payload,
        json!([{"tenant_id": "t1", "type": "line", "enabled": true, "config_json": ""}])
    );
    // pretty printed, non-ASCII kept verbatim
    assert!(writes[0].payload.starts_with("[\n  {\n    \"tenant_id\": \"t1\""));
    assert!(writes[0].payload.contains("株式会社アクメ"));
}

#[test]
fn override_namespace_is_used() {
    let dir = config_dir();
    let env: HashMap<String, String> =
        HashMap::from([("KV_TARGETS_ID".to_string(), "staging-ns".to_string())]);
    let namespaces = NamespaceConfig::new(env);
    let sink = RecordingSink::default();

    Publisher::new(&namespaces, &sink)
        .publish_all(&[Dataset::targets(dir.path())], &mut Vec::new())
        .unwrap();

    assert_eq!(sink.writes.borrow()[0].namespace_id, "staging-ns");
}

#[test]
fn failed_dataset_does_not_stop_siblings() {
    let dir = config_dir();
    let namespaces = no_env();
    let sink = RecordingSink {
        reject: vec!["targets:active"],
        ..RecordingSink::default()
    };
    let mut out = Vec::new();

    let summary = Publisher::new(&namespaces, &sink)
        .publish_all(&datasets(dir.path()), &mut out)
        .unwrap();

    assert!(!summary.success());
    assert_eq!(sink.writes.borrow().len(), 2);
    assert!(!summary.outcomes[0].succeeded());
    assert_eq!(summary.outcomes[1].status, DispatchStatus::Uploaded);
    let failed: Vec<&str> = summary.failed().map(|outcome| outcome.name.as_str()).collect();
    assert_eq!(failed, vec!["targets"]);

    let printed = String::from_utf8(out).unwrap();
    assert!(printed.contains("partial output"));
    assert!(printed.contains("Error: authentication required"));
}

#[test]
fn unknown_binding_fails_dataset_without_writing() {
    let dir = config_dir();
    let namespaces = NamespaceConfig::empty(HashMap::new());
    let sink = RecordingSink::default();

    let summary = Publisher::new(&namespaces, &sink)
        .publish_all(&[Dataset::targets(dir.path())], &mut Vec::new())
        .unwrap();

    assert!(!summary.success());
    assert!(sink.writes.borrow().is_empty());
    assert_eq!(
        summary.outcomes[0].status,
        DispatchStatus::Failed {
            reason: "no namespace id for binding TARGETS; set KV_TARGETS_ID".to_string()
        }
    );
}

#[test]
fn dry_run_previews_without_writing() {
    let dir = config_dir();
    let namespaces = NamespaceConfig::empty(HashMap::new());
    let sink = RecordingSink::default();
    let mut out = Vec::new();

    let summary = Publisher::new(&namespaces, &sink)
        .with_dry_run(true)
        .publish_all(&[Dataset::sinks(dir.path())], &mut out)
        .unwrap();

    assert!(summary.success());
    assert!(sink.writes.borrow().is_empty());
    let printed = String::from_utf8(out).unwrap();
    let printed = printed.replace(&dir.path().display().to_string(), "<config>");
    insta::assert_snapshot!(printed, @r#"
    Processing <config>/sinks.csv...
    [DRY RUN] Would upload to KV key 'sinks:active' with 1 items
    Data preview: [
      {
        "tenant_id": "t1",
        "type": "line",
        "enabled": true,
        "config_json": ""
      }
    ]
    "#);
}

#[test]
fn missing_source_aborts_run() {
    let dir = config_dir();
    fs::remove_file(dir.path().join("sinks.csv")).unwrap();
    let namespaces = no_env();
    let sink = RecordingSink::default();

    let result =
        Publisher::new(&namespaces, &sink).publish_all(&datasets(dir.path()), &mut Vec::new());

    assert!(matches!(result, Err(PublishError::Ingest(_))));
    // targets were already dispatched before the sinks file was read
    assert_eq!(sink.writes.borrow().len(), 1);
}

#[cfg(unix)]
mod wrangler {
    use std::fs;
    use std::os::unix::fs::PermissionsExt;
    use std::path::Path;

    use tcfg_publish::{KvSink, SinkError, WranglerSink, detect_wrangler};
    use tempfile::TempDir;

    /// Shell script standing in for the store CLI. It records its arguments
    /// and a copy of the payload, then exits with `status`.
    fn fake_tool(dir: &Path, status: i32) -> String {
        let script = dir.join("fake-wrangler");
        let log = dir.join("args.txt");
        let copy = dir.join("payload-copy.json");
        let body = format!(
            "#!/bin/sh\n\
             echo \"$@\" > '{log}'\n\
             for arg in \"$@\"; do\n\
               case \"$arg\" in --path=*) cp \"${{arg#--path=}}\" '{copy}' ;; esac\n\
             done\n\
             echo 'tool stdout'\n\
             echo 'tool stderr' >&2\n\
             exit {status}\n",
            log = log.display(),
            copy = copy.display(),
        );
        fs::write(&script, body).unwrap();
        fs::set_permissions(&script, fs::Permissions::from_mode(0o755)).unwrap();
        script.display().to_string()
    }

    #[test]
    fn wrangler_sink_runs_put_and_cleans_up() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(dir.path(), 0);
        let sink = WranglerSink::new(&tool, dir.path());

        sink.write("ns-123", "targets:active", b"[]").unwrap();

        let args = fs::read_to_string(dir.path().join("args.txt")).unwrap();
        let staged = sink.payload_path("targets:active");
        let staged = std::path::absolute(&staged).unwrap();
        assert_eq!(
            args.trim(),
            format!(
                "kv key put --remote --config=/dev/null --namespace-id=ns-123 targets:active --path={}",
                staged.display()
            )
        );
        assert_eq!(
            fs::read_to_string(dir.path().join("payload-copy.json")).unwrap(),
            "[]"
        );
        assert!(!staged.exists());
    }

    #[test]
    fn wrangler_sink_surfaces_tool_output_on_failure() {
        let dir = TempDir::new().unwrap();
        let tool = fake_tool(dir.path(), 3);
        let sink = WranglerSink::new(&tool, dir.path());

        let error = sink.write("ns-123", "sinks:active", b"[]").unwrap_err();

        match error {
            SinkError::Rejected {
                status,
                stdout,
                stderr,
            } => {
                assert_eq!(status, Some(3));
                assert_eq!(stdout.trim(), "tool stdout");
                assert_eq!(stderr.trim(), "tool stderr");
            }
            other => panic!("unexpected error: {other}"),
        }
        assert!(!sink.payload_path("sinks:active").exists());
    }

    #[test]
    fn detect_wrangler_checks_exit_status() {
        let dir = TempDir::new().unwrap();
        let ok = fake_tool(dir.path(), 0);
        assert!(detect_wrangler(&ok));

        let other = TempDir::new().unwrap();
        let failing = fake_tool(other.path(), 1);
        assert!(!detect_wrangler(&failing));
    }
}
