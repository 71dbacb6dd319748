use anyhow::Result;
use axum::Router;
use axum_test::multipart::{MultipartForm, Part};
use axum_test::TestServer;
use modernizer_api::{create_router, AppState};
use modernizer_core::Settings;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub struct TestContext {
    pub server: TestServer,
    pub tmpdir: TempDir,
}

impl TestContext {
    /// Output root the server writes sessions under.
    pub fn output_root(&self) -> &Path {
        self.tmpdir.path()
    }

    pub fn session_dir(&self, session_id: &str) -> PathBuf {
        self.output_root().join("sessions").join(session_id)
    }
}

/// TestServer with an isolated output root and no language model configured.
pub fn setup_test_server() -> Result<TestContext> {
    let tmpdir = tempfile::tempdir()?;
    let mut settings = Settings::default();
    settings.storage.output_root = tmpdir.path().to_path_buf();

    let state = AppState::with_provider(settings, None);
    let app: Router = create_router(state);
    let server = TestServer::new(app)?;

    Ok(TestContext { server, tmpdir })
}

/// A small mixed-language legacy codebase as (file name, contents) pairs.
pub fn sample_legacy_files() -> Vec<(&'static str, &'static str)> {
    vec![
        (
            "PAYROLL.cob",
            "       IDENTIFICATION DIVISION.\n       PROGRAM-ID. PAYROLL.\n       PROCEDURE DIVISION.\n           DISPLAY 'RUN'.\n           STOP RUN.\n",
        ),
        (
            "Invoice.vb",
            "Public Class Invoice\n    Public Function Total() As Decimal\n        Return 0\n    End Function\nEnd Class\n",
        ),
        (
            "Ledger.java",
            "public class Ledger {\n    public int balance() { return 0; }\n}\n",
        ),
    ]
}

pub fn upload_form(files: &[(&str, &str)]) -> MultipartForm {
    files.iter().fold(MultipartForm::new(), |form, (name, body)| {
        form.add_part("files", Part::text(body.to_string()).file_name(name.to_string()))
    })
}

/// Uploads `files` and returns the new session id.
pub async fn ingest(server: &TestServer, files: &[(&str, &str)]) -> String {
    let resp = server
        .post("/ingest/legacy-code")
        .multipart(upload_form(files))
        .await;
    assert_eq!(resp.status_code(), 200, "ingest failed: {}", resp.text());
    let body: Value = resp.json();
    body["session_id"]
        .as_str()
        .expect("session_id in ingest response")
        .to_string()
}
