// tests/web_api_tests.rs
use prospector::core::ConfigManager;
use prospector::web::build_rocket;
use rocket::http::{ContentType, Status};
use rocket::local::asynchronous::Client;
use serde_json::Value;
use tempfile::TempDir;

async fn client(output: &TempDir) -> Client {
    let dir = output.path().to_string_lossy().into_owned();
    let config = ConfigManager::from_lookup(move |key| match key {
        "PROSPECTOR_OUTPUT_DIR" => Some(dir.clone()),
        _ => None,
    })
    .unwrap();
    Client::tracked(build_rocket(config, 0)).await.unwrap()
}

#[rocket::async_test]
async fn health_reports_ok() {
    let tmp = TempDir::new().unwrap();
    let client = client(&tmp).await;

    let response = client.get("/api/health").dispatch().await;
    assert_eq!(response.status(), Status::Ok);
    assert_eq!(
        response.headers().get_one("Access-Control-Allow-Origin"),
        Some("*")
    );
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["status"], "ok");
}

#[rocket::async_test]
async fn blank_input_is_rejected() {
    let tmp = TempDir::new().unwrap();
    let client = client(&tmp).await;

    let response = client
        .post("/api/run")
        .header(ContentType::JSON)
        .body(r#"{"input": "   "}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::BadRequest);
    let body: Value = response.into_json().await.unwrap();
    assert_eq!(body["detail"], "input is required");
}

#[rocket::async_test]
async fn unknown_jobs_are_not_found() {
    let tmp = TempDir::new().unwrap();
    let client = client(&tmp).await;

    for path in ["/api/status/nope", "/api/logs/nope", "/api/results/nope", "/api/report/nope"] {
        let response = client.get(path).dispatch().await;
        assert_eq!(response.status(), Status::NotFound, "{}", path);
        let body: Value = response.into_json().await.unwrap();
        assert_eq!(body["detail"], "job not found");
    }
}

#[rocket::async_test]
async fn queued_job_is_visible_and_fails_without_api_key() {
    let tmp = TempDir::new().unwrap();
    let client = client(&tmp).await;

    let response = client
        .post("/api/run")
        .header(ContentType::JSON)
        .body(r#"{"input": "average rust salary", "max_results": 0}"#)
        .dispatch()
        .await;
    assert_eq!(response.status(), Status::Ok);
    let body: Value = response.into_json().await.unwrap();
    let job_id = body["job_id"].as_str().unwrap().to_string();
    assert_eq!(job_id.len(), 12);

    let mut status = String::new();
    for _ in 0..50 {
        let job: Value = client
            .get(format!("/api/status/{}", job_id))
            .dispatch()
            .await
            .into_json()
            .await
            .unwrap();
        assert_eq!(job["max_results"], 1);
        status = job["status"].as_str().unwrap().to_string();
        if status == "failed" {
            break;
        }
        tokio::time::sleep(std::time::Duration::from_millis(20)).await;
    }
    assert_eq!(status, "failed");

    let logs: Value = client
        .get(format!("/api/logs/{}", job_id))
        .dispatch()
        .await
        .into_json()
        .await
        .unwrap();
    assert_eq!(logs["logs"][0], "Job queued");
    assert_eq!(logs["logs"][1], "Input: average rust salary");

    let report = client
        .get(format!("/api/report/{}", job_id))
        .dispatch()
        .await;
    assert_eq!(report.status(), Status::NotFound);
    assert_eq!(report.into_string().await.unwrap(), "Report not available");

    let results = client
        .get(format!("/api/results/{}", job_id))
        .dispatch()
        .await;
    assert_eq!(results.status(), Status::NotFound);
}
