use std::sync::Arc;
use healthvoice_core::config::ChatEndpointConfig;
use healthvoice_core::error::PipelineError;
use healthvoice_core::types::SymptomQuery;
use healthvoice_engine::engine::{DiagnosisPipeline, PipelineConfig};
use healthvoice_runtime::llm::OpenAiCompatibleChatProvider;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn pipeline_for(uri: String) -> DiagnosisPipeline {
    let endpoint = ChatEndpointConfig {
        base_url: uri,
        model: "mixtral-8x7b-32768".into(),
        connect_timeout_secs: 5,
        request_timeout_secs: 5,
    };
    DiagnosisPipeline::new(
        PipelineConfig::default(),
        Arc::new(OpenAiCompatibleChatProvider::new(&endpoint, "k")),
    )
}

#[tokio::test]
async fn end_to_end_diagnosis_against_mock_endpoint() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer k"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"Sure! {\"SYMPTOM_DIAGNOSIS\":[\"Flu\",\"Cold\"],\"SYMPTOM_REMEDIES\":[\"Rest\",\"Fluids\"]} Hope that helps."}}]}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = pipeline_for(server.uri());
    let query = SymptomQuery::new("fever, sore throat.").unwrap();

    let d = pipeline.diagnose(&query).await.unwrap();
    assert_eq!(d.result.diagnoses, vec!["Flu", "Cold"]);
    assert_eq!(d.result.remedies, vec!["Rest", "Fluids"]);
    assert_eq!(d.model, "mixtral-8x7b-32768");

    let received = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&received[0].body).unwrap();
    assert_eq!(body["model"], "mixtral-8x7b-32768");
    assert_eq!(body["messages"].as_array().unwrap().len(), 1);
    assert_eq!(body["messages"][0]["role"], "user");
    assert!(
        body["messages"][0]["content"]
            .as_str()
            .unwrap()
            .contains("\"fever, sore throat\"")
    );
}

#[tokio::test]
async fn identical_queries_yield_identical_results() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"choices":[{"message":{"content":"{\"SYMPTOM_DIAGNOSIS\":[\"Tension headache\"],\"SYMPTOM_REMEDIES\":[\"Sleep\"]}"}}]}"#,
            "application/json",
        ))
        .expect(2)
        .mount(&server)
        .await;

    let pipeline = pipeline_for(server.uri());
    let query = SymptomQuery::new("headache").unwrap();

    let first = pipeline.diagnose(&query).await.unwrap();
    let second = pipeline.diagnose(&query).await.unwrap();
    assert_eq!(first.result, second.result);
}

#[tokio::test]
async fn unreachable_endpoint_surfaces_transport_error() {
    let server = MockServer::start().await;
    let uri = server.uri();
    drop(server);

    let pipeline = pipeline_for(uri);
    let err = pipeline
        .diagnose(&SymptomQuery::new("dizzy").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn empty_choices_surface_empty_response() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw(r#"{"choices":[]}"#, "application/json"),
        )
        .mount(&server)
        .await;

    let err = pipeline_for(server.uri())
        .diagnose(&SymptomQuery::new("rash").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err, PipelineError::EmptyResponse);
}

#[tokio::test]
async fn undecodable_body_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_raw("<html>bad gateway</html>", "text/html"),
        )
        .mount(&server)
        .await;

    let err = pipeline_for(server.uri())
        .diagnose(&SymptomQuery::new("chest tightness").unwrap())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "transport");
}

#[tokio::test]
async fn non_success_status_is_a_transport_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .mount(&server)
        .await;

    let err = pipeline_for(server.uri())
        .diagnose(&SymptomQuery::new("fatigue").unwrap())
        .await
        .unwrap_err();
    assert!(matches!(err, PipelineError::Transport(ref m) if m.contains("status=401")));
}
