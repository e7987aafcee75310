use httpmock::prelude::*;
use leftover_impact::{
    GeneratedExplanation, GeneratorSettings, HttpTextGenerator, ImpactError, PlatesSavedEstimator,
};
use std::time::Duration;

fn generator_for(server: &MockServer) -> HttpTextGenerator {
    HttpTextGenerator::new(GeneratorSettings {
        endpoint: server.url("/v1"),
        model: "gemini-1.5-flash".to_string(),
        api_key: Some("test-key".to_string()),
        timeout: Duration::from_secs(5),
        temperature: 0.7,
    })
    .unwrap()
}

#[tokio::test]
async fn test_end_to_end_augmented_estimate() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST)
            .path("/v1/chat/completions")
            .header("authorization", "Bearer test-key")
            .body_contains("1040 leftover posts")
            .body_contains("saved 520 plates");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "choices": [{
                    "message": {
                        "role": "assistant",
                        "content": "It's an estimate: two shared leftovers rescue about one meal!"
                    }
                }]
            }));
    });

    let estimator = PlatesSavedEstimator::new(GeneratedExplanation::new(generator_for(&server)));
    let estimate = estimator.estimate(1040.0).await.unwrap();

    api_mock.assert();
    assert_eq!(estimate.estimated_plates_saved(), 520);
    assert_eq!(
        estimate.explanation(),
        "It's an estimate: two shared leftovers rescue about one meal!"
    );
}

#[tokio::test]
async fn test_service_outage_surfaces_generation_failure() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(503).body("model overloaded");
    });

    let estimator = PlatesSavedEstimator::new(GeneratedExplanation::new(generator_for(&server)));
    let result = estimator.estimate(10.0).await;

    api_mock.assert_hits(1);
    match result {
        Err(ImpactError::GenerationFailure { message }) => {
            assert!(message.contains("503"));
        }
        other => panic!("expected GenerationFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_input_never_calls_generator() {
    let server = MockServer::start();
    let api_mock = server.mock(|when, then| {
        when.method(POST).path("/v1/chat/completions");
        then.status(200)
            .json_body(serde_json::json!({"choices": [{"message": {"content": "unused"}}]}));
    });

    let estimator = PlatesSavedEstimator::new(GeneratedExplanation::new(generator_for(&server)));
    let err = estimator.estimate(f64::NAN).await.unwrap_err();

    assert!(matches!(err, ImpactError::InvalidInput { .. }));
    api_mock.assert_hits(0);
}
