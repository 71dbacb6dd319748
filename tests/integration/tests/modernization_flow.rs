use modernizer_integration_test_support::{ingest, sample_legacy_files, setup_test_server};
use serde_json::Value;

#[tokio::test]
async fn full_pipeline_produces_every_artifact() {
    let ctx = setup_test_server().expect("test server");
    let files = sample_legacy_files();
    let session_id = ingest(&ctx.server, &files).await;

    let docs = ctx
        .server
        .post("/docs/generate")
        .add_query_param("session_id", &session_id)
        .await;
    assert_eq!(docs.status_code(), 200);

    let metrics = ctx
        .server
        .get("/evaluation/metrics")
        .add_query_param("session_id", &session_id)
        .await;
    assert_eq!(metrics.status_code(), 200);

    for lang in ["java", "python"] {
        for endpoint in ["/codegen/generate", "/testgen/generate"] {
            let resp = ctx
                .server
                .post(endpoint)
                .add_query_param("session_id", &session_id)
                .add_query_param("target_lang", lang)
                .await;
            assert_eq!(resp.status_code(), 200, "{endpoint} {lang}");
        }
    }

    let listing: Value = ctx
        .server
        .get(&format!("/sessions/{session_id}/artifacts"))
        .await
        .json();
    let artifacts: Vec<String> = listing["artifacts"]
        .as_array()
        .expect("artifacts array")
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect();

    let expected = [
        "code/java/SampleService.java",
        "code/python/SampleService.py",
        "docs/metrics.json",
        "docs/summary.json",
        "input/Invoice.vb",
        "input/Ledger.java",
        "input/PAYROLL.cob",
        "tests/java/SampleServiceTest.java",
        "tests/python/SampleServiceTest.py",
    ];
    assert_eq!(artifacts, expected);

    let dir = ctx.session_dir(&session_id);
    for (name, contents) in &files {
        let stored = std::fs::read_to_string(dir.join("input").join(name)).unwrap();
        assert_eq!(&stored, contents);
    }
}

#[tokio::test]
async fn generation_for_unknown_languages_uses_generic_template() {
    let ctx = setup_test_server().expect("test server");
    let session_id = ingest(&ctx.server, &sample_legacy_files()).await;

    let resp = ctx
        .server
        .post("/codegen/generate")
        .add_query_param("session_id", &session_id)
        .add_query_param("target_lang", "Kotlin")
        .await;
    assert_eq!(resp.status_code(), 200);
    let body: Value = resp.json();
    assert_eq!(body["target_lang"], "kotlin");

    let file = ctx
        .session_dir(&session_id)
        .join("code/kotlin/SampleService.txt");
    let contents = std::fs::read_to_string(file).unwrap();
    assert!(contents.starts_with("# SampleService\n"));
    assert!(contents.lines().all(|line| line.starts_with("# ")));
}

#[tokio::test]
async fn sessions_never_share_storage() {
    let ctx = setup_test_server().expect("test server");
    let first = ingest(&ctx.server, &[("same.cob", "FIRST")]).await;
    let second = ingest(&ctx.server, &[("same.cob", "SECOND")]).await;
    assert_ne!(first, second);

    let read = |id: &str| {
        std::fs::read_to_string(ctx.session_dir(id).join("input/same.cob")).unwrap()
    };
    assert_eq!(read(&first), "FIRST");
    assert_eq!(read(&second), "SECOND");
}

#[tokio::test]
async fn caller_supplied_session_ids_get_directories_on_demand() {
    let ctx = setup_test_server().expect("test server");
    let resp = ctx
        .server
        .post("/docs/generate")
        .add_query_param("session_id", "manual-session_01")
        .await;
    assert_eq!(resp.status_code(), 200);
    assert!(ctx
        .session_dir("manual-session_01")
        .join("docs/summary.json")
        .is_file());
}
