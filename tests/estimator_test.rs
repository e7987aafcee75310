use async_trait::async_trait;
use chrono::NaiveDate;
use leftover_impact::{
    FixedExplanation, GeneratedExplanation, GenerationError, ImpactError, LocalStorage,
    NewLeftoverPost, PlatesSavedEstimator, PostLedger, PostStore, TextGenerator,
    DEFAULT_EXPLANATION,
};
use tempfile::TempDir;

/// Deterministic generator covering the three explanation configurations.
enum StubGenerator {
    Reply(&'static str),
    Fail,
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerationError> {
        match self {
            StubGenerator::Reply(text) => Ok(text.to_string()),
            StubGenerator::Fail => Err(GenerationError::Transport("network down".to_string())),
        }
    }
}

fn leftover(name: &str) -> NewLeftoverPost {
    NewLeftoverPost {
        food_name: name.to_string(),
        freshness: "Best eaten soon".to_string(),
        expiration_date: NaiveDate::from_ymd_opt(2026, 10, 19).unwrap(),
        image_uri: Some("data:image/png;base64,AAAA".to_string()),
    }
}

#[tokio::test]
async fn test_spec_scenarios_in_default_mode() {
    let estimator = PlatesSavedEstimator::new(FixedExplanation);

    for (posts, plates) in [(0.0, 0), (1.0, 0), (2.0, 1), (3.0, 1), (1040.0, 520)] {
        let estimate = estimator.estimate(posts).await.unwrap();
        assert_eq!(estimate.estimated_plates_saved(), plates, "posts = {}", posts);
        assert_eq!(estimate.explanation(), DEFAULT_EXPLANATION);
    }
}

#[tokio::test]
async fn test_augmented_mode_uses_generated_text() {
    let estimator =
        PlatesSavedEstimator::new(GeneratedExplanation::new(StubGenerator::Reply(
            "Every pair of shared leftovers puts a whole meal on someone's table!",
        )));

    let estimate = estimator.estimate(1040.0).await.unwrap();
    assert_eq!(estimate.estimated_plates_saved(), 520);
    assert_eq!(
        estimate.explanation(),
        "Every pair of shared leftovers puts a whole meal on someone's table!"
    );
}

#[tokio::test]
async fn test_augmented_failure_yields_no_estimate() {
    let estimator = PlatesSavedEstimator::new(GeneratedExplanation::new(StubGenerator::Fail));

    match estimator.estimate(1040.0).await {
        Err(ImpactError::GenerationFailure { message }) => {
            assert!(message.contains("network down"));
        }
        other => panic!("expected GenerationFailure, got {:?}", other),
    }
}

#[tokio::test]
async fn test_invalid_input_reported_before_generation() {
    let estimator = PlatesSavedEstimator::new(GeneratedExplanation::new(StubGenerator::Fail));

    let err = estimator.estimate(-1.0).await.unwrap_err();
    assert!(matches!(err, ImpactError::InvalidInput { .. }));
}

#[tokio::test]
async fn test_estimate_from_persisted_posts() {
    let temp_dir = TempDir::new().unwrap();
    let store = PostLedger::new(LocalStorage::new(temp_dir.path()));
    let estimator = PlatesSavedEstimator::new(FixedExplanation);

    assert_eq!(
        estimator.estimate_from_store(&store).await.unwrap().estimated_plates_saved(),
        0
    );

    let mut ids = Vec::new();
    for name in ["Lasagna", "Fried rice", "Banana bread"] {
        ids.push(store.add_post(leftover(name)).await.unwrap().id);
    }
    assert_eq!(
        estimator.estimate_from_store(&store).await.unwrap().estimated_plates_saved(),
        1
    );

    store.add_post(leftover("Curry")).await.unwrap();
    assert_eq!(
        estimator.estimate_from_store(&store).await.unwrap().estimated_plates_saved(),
        2
    );

    store.delete_post(ids[0]).await.unwrap();
    let reopened = PostLedger::new(LocalStorage::new(temp_dir.path()));
    let posts = reopened.list_posts().await.unwrap();
    assert_eq!(posts.len(), 3);
    assert_eq!(posts[0].food_name, "Curry");
    assert!(temp_dir.path().join("leftover_posts.json").exists());
}
