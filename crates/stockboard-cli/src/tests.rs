use stockboard_core::{AppConfig, DecodeMode};

use super::*;

fn base_config() -> AppConfig {
    AppConfig {
        api_root: "https://bad-api-assignment.reaktor.com".into(),
        categories: vec!["jackets".into(), "shirts".into(), "accessories".into()],
        decode_mode: DecodeMode::Lenient,
        force_error_mode: "none".into(),
        request_timeout_secs: 30,
        user_agent: "stockboard/0.1 (inventory-board)".into(),
        max_retries: 10,
        retry_backoff_base_ms: 250,
        output_path: "./stockboard.html".into(),
        log_level: "info".into(),
    }
}

#[test]
fn no_command_is_none() {
    let cli = Cli::try_parse_from(["stockboard-cli"]).expect("expected valid cli args");
    assert!(cli.command.is_none());
}

#[test]
fn parses_run_with_overrides() {
    let cli = Cli::try_parse_from([
        "stockboard-cli",
        "run",
        "--output",
        "/tmp/board.html",
        "--strict",
        "--category",
        "jackets",
        "--category",
        "gloves",
    ])
    .expect("expected valid cli args");

    let Some(Commands::Run(args)) = cli.command else {
        panic!("expected run command");
    };
    assert_eq!(args.output.as_deref(), Some(std::path::Path::new("/tmp/board.html")));
    assert!(args.strict);
    assert_eq!(args.categories, vec!["jackets", "gloves"]);
}

#[test]
fn parses_products_command() {
    let cli = Cli::try_parse_from(["stockboard-cli", "products"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Some(Commands::Products(_))));
}

#[test]
fn rejects_unknown_command() {
    assert!(Cli::try_parse_from(["stockboard-cli", "report"]).is_err());
}

#[test]
fn overrides_replace_config_values() {
    let args = BoardArgs {
        output: Some("/tmp/x.html".into()),
        strict: true,
        categories: vec!["shirts".into()],
    };
    let config = board::apply_overrides(base_config(), &args);
    assert_eq!(config.output_path.to_str(), Some("/tmp/x.html"));
    assert_eq!(config.decode_mode, DecodeMode::Strict);
    assert_eq!(config.categories, vec!["shirts"]);
}

#[test]
fn empty_overrides_keep_config() {
    let config = board::apply_overrides(base_config(), &BoardArgs::default());
    assert_eq!(config.output_path.to_str(), Some("./stockboard.html"));
    assert_eq!(config.decode_mode, DecodeMode::Lenient);
    assert_eq!(config.categories.len(), 3);
}
