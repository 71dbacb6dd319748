use futures::future::join_all;
use modernizer_integration_test_support::{ingest, setup_test_server};
use serde_json::Value;
use std::collections::HashSet;

#[tokio::test]
async fn concurrent_ingests_allocate_distinct_sessions() {
    let ctx = setup_test_server().expect("test server");
    let server = &ctx.server;

    let ids = join_all((0..12).map(|i| async move {
        let body = format!("PROGRAM-ID. P{i}.");
        ingest(server, &[("prog.cob", body.as_str())]).await
    }))
    .await;

    let unique: HashSet<_> = ids.iter().collect();
    assert_eq!(unique.len(), ids.len());

    for (i, id) in ids.iter().enumerate() {
        let stored =
            std::fs::read_to_string(ctx.session_dir(id).join("input/prog.cob")).unwrap();
        assert_eq!(stored, format!("PROGRAM-ID. P{i}."));
    }
}

#[tokio::test]
async fn concurrent_regeneration_leaves_one_complete_file() {
    let ctx = setup_test_server().expect("test server");
    let session_id = ingest(&ctx.server, &[("a.vb", "Sub A()\nEnd Sub")]).await;
    let server = &ctx.server;
    let id = session_id.as_str();

    let statuses = join_all((0..10).map(|_| async move {
        server
            .post("/codegen/generate")
            .add_query_param("session_id", id)
            .add_query_param("target_lang", "java")
            .await
            .status_code()
    }))
    .await;
    assert!(statuses.iter().all(|s| *s == 200));

    let dir = ctx.session_dir(id).join("code/java");
    let names: Vec<_> = std::fs::read_dir(&dir)
        .unwrap()
        .filter_map(|e| e.ok())
        .map(|e| e.file_name().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["SampleService.java".to_string()]);

    let contents = std::fs::read_to_string(dir.join("SampleService.java")).unwrap();
    assert!(contents.starts_with("// SampleService\n"));
    assert_eq!(contents.lines().count(), 3);
}

#[tokio::test]
async fn concurrent_metrics_requests_agree() {
    let ctx = setup_test_server().expect("test server");
    let session_id = ingest(&ctx.server, &[("a.cob", "STOP RUN.")]).await;
    let server = &ctx.server;
    let id = session_id.as_str();

    let bodies: Vec<Value> = join_all((0..8).map(|_| async move {
        server
            .get("/evaluation/metrics")
            .add_query_param("session_id", id)
            .await
            .json::<Value>()
    }))
    .await;

    assert!(bodies.windows(2).all(|w| w[0] == w[1]));

    let stored: Value = serde_json::from_slice(
        &std::fs::read(ctx.session_dir(id).join("docs/metrics.json")).unwrap(),
    )
    .unwrap();
    assert_eq!(stored["session_id"], id);
}
