use recipe_planner::config::{GeneratorConfig, SessionConfig, API_KEY_ENV_VAR};
use recipe_planner::generator::connection::{ApiConnectionError, ChatClient};
use recipe_planner::generator::endpoints::{ChatCompletionRequest, ChatMessage, CHAT_MODELS, DEFAULT_ENDPOINT};
use recipe_planner::generator::{
    ChatCompletionGenerator, Filter, GenerationError, GenerationRequest, RecipeGenerator,
    SearchFilters,
};
use recipe_planner::session::{SearchOutcome, Session};
use dotenv::dotenv;
use std::env;

const MISSING_KEY_ENV_VAR: &str = "THIS_KEY_SHOULD_NOT_EXIST_IN_ENV_ABXYZ";

fn setup_test_environment() {
    dotenv().ok();
}

fn missing_key_generator() -> ChatCompletionGenerator {
    ChatCompletionGenerator::new(GeneratorConfig {
        api_key_env_var: MISSING_KEY_ENV_VAR.to_string(),
        ..GeneratorConfig::default()
    })
}

#[tokio::test]
async fn test_missing_api_key_error() {
    setup_test_environment();
    let client = ChatClient::new(DEFAULT_ENDPOINT, MISSING_KEY_ENV_VAR);
    let request = ChatCompletionRequest {
        model: CHAT_MODELS[0].model_name.to_string(),
        messages: vec![ChatMessage::user("Hello")],
        response_format: None,
        temperature: None,
        max_tokens: None,
    };
    let result = client.call_chat_completion(&request).await;
    match result {
        Err(ApiConnectionError::MissingApiKey(key_name)) => {
            assert_eq!(key_name, MISSING_KEY_ENV_VAR)
        }
        other => panic!("expected MissingApiKey, got {:?}", other),
    }
}

#[tokio::test]
async fn test_generator_maps_missing_key_to_generation_error() {
    setup_test_environment();
    let request = GenerationRequest {
        pantry_items: vec!["rice".to_string()],
        filters: SearchFilters::default(),
    };
    let result = missing_key_generator().generate(&request).await;
    assert!(matches!(
        result,
        Err(GenerationError::Connection(ApiConnectionError::MissingApiKey(_)))
    ));
}

#[tokio::test]
async fn test_failed_search_surfaces_one_message_and_keeps_session_usable() {
    setup_test_environment();
    let mut session = Session::new(SessionConfig::default());
    let pantry_before = session.pantry().clone();

    let outcome = session
        .find_recipes(&missing_key_generator(), SearchFilters::default())
        .await;

    assert_eq!(outcome, SearchOutcome::Failed);
    assert!(!session.search().in_progress());
    assert!(session.search().results().is_empty());
    assert_eq!(
        session.search().error(),
        Some("Failed to generate recipes. Please check your API key and try again.")
    );
    assert_eq!(session.pantry(), &pantry_before);
    assert!(session.add_pantry_item("paneer"));
}

#[tokio::test]
#[ignore]
async fn test_successful_generation_call() {
    setup_test_environment();
    if env::var(API_KEY_ENV_VAR).is_err() {
        println!(
            "Skipping test_successful_generation_call: {} not set.",
            API_KEY_ENV_VAR
        );
        return;
    }

    let generator = ChatCompletionGenerator::new(
        GeneratorConfig::from_env().expect("generator config from environment"),
    );
    let request = GenerationRequest {
        pantry_items: vec![
            "rice".to_string(),
            "lentils".to_string(),
            "onions".to_string(),
        ],
        filters: SearchFilters {
            cuisine: Filter::Named("North Indian".to_string()),
            diet: Filter::Any,
        },
    };

    let result = generator.generate(&request).await;
    assert!(result.is_ok(), "API call failed: {:?}", result.err());
    let recipes = result.unwrap();
    assert!(!recipes.is_empty());
    for recipe in &recipes {
        assert!(!recipe.name.is_empty());
        assert!(recipe.image_url.starts_with("https://picsum.photos/seed/"));
    }
}

#[tokio::test]
#[ignore]
async fn test_api_error_with_invalid_key() {
    setup_test_environment();

    const INVALID_KEY_ENV_NAME_FOR_THIS_TEST: &str = "ENV_VAR_WITH_BAD_KEY_VALUE";
    unsafe {
        std::env::set_var(
            INVALID_KEY_ENV_NAME_FOR_THIS_TEST,
            "this_is_a_deliberately_bad_api_key_string_for_testing",
        );
    }

    let client = ChatClient::new(DEFAULT_ENDPOINT, INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    let request = ChatCompletionRequest {
        model: CHAT_MODELS[0].model_name.to_string(),
        messages: vec![ChatMessage::user("This call should fail due to invalid key.")],
        response_format: None,
        temperature: None,
        max_tokens: None,
    };

    let result = client.call_chat_completion(&request).await;
    assert!(
        matches!(result, Err(ApiConnectionError::ApiError { .. })),
        "Expected ApiError, got {:?}",
        result
    );
    if let Err(ApiConnectionError::ApiError { status, .. }) = result {
        assert_eq!(status, reqwest::StatusCode::UNAUTHORIZED);
    }

    unsafe {
        std::env::remove_var(INVALID_KEY_ENV_NAME_FOR_THIS_TEST);
    }
}
