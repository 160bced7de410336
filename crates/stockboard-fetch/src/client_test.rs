use super::*;

#[test]
fn resource_url_joins_root_and_segment() {
    assert_eq!(
        resource_url("https://bad-api-assignment.reaktor.com", "products", "jackets"),
        "https://bad-api-assignment.reaktor.com/products/jackets"
    );
}

#[test]
fn resource_url_strips_trailing_slash_on_root() {
    assert_eq!(
        resource_url("http://localhost:8080/", "availability", "reps"),
        "http://localhost:8080/availability/reps"
    );
}

#[test]
fn resource_url_escapes_key() {
    assert_eq!(
        resource_url("http://localhost", "availability", "umpante co/2"),
        "http://localhost/availability/umpante%20co%2F2"
    );
}

#[test]
fn new_rejects_relative_api_root() {
    let result = ApiClient::new("not-a-url", ClientOptions::default());
    assert!(
        matches!(result, Err(FetchError::InvalidApiRoot { .. })),
        "expected InvalidApiRoot"
    );
}

#[test]
fn new_rejects_non_base_api_root() {
    let result = ApiClient::new("mailto:ops@example.com", ClientOptions::default());
    assert!(
        matches!(result, Err(FetchError::InvalidApiRoot { .. })),
        "expected InvalidApiRoot"
    );
}

#[test]
fn options_from_config_carry_retry_policy() {
    let config = AppConfig {
        api_root: "http://localhost".into(),
        categories: vec!["jackets".into()],
        decode_mode: DecodeMode::Strict,
        force_error_mode: "all".into(),
        request_timeout_secs: 5,
        user_agent: "ua".into(),
        max_retries: 4,
        retry_backoff_base_ms: 0,
        output_path: "out.html".into(),
        log_level: "debug".into(),
    };
    let options = ClientOptions::from(&config);
    assert_eq!(options.decode_mode, DecodeMode::Strict);
    assert_eq!(options.force_error_mode, "all");
    assert_eq!(
        options.retry,
        RetryPolicy {
            max_retries: 4,
            backoff_base_ms: 0
        }
    );
}
