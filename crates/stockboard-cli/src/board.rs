//! Command handlers: build the client and presenter from config, then drive
//! the pipeline.

use stockboard_core::{AppConfig, DecodeMode};
use stockboard_fetch::ApiClient;
use stockboard_pipeline::HtmlTablePresenter;

use crate::BoardArgs;

/// Applies command-line overrides to the environment config.
pub(crate) fn apply_overrides(mut config: AppConfig, args: &BoardArgs) -> AppConfig {
    if let Some(output) = &args.output {
        config.output_path.clone_from(output);
    }
    if args.strict {
        config.decode_mode = DecodeMode::Strict;
    }
    if !args.categories.is_empty() {
        config.categories.clone_from(&args.categories);
    }
    config
}

fn build_api_client(config: &AppConfig) -> anyhow::Result<ApiClient> {
    ApiClient::from_config(config)
        .map_err(|e| anyhow::anyhow!("failed to build catalog API client: {e}"))
}

fn build_presenter(config: &AppConfig) -> anyhow::Result<HtmlTablePresenter> {
    HtmlTablePresenter::create(&config.output_path)
        .map_err(|e| anyhow::anyhow!("failed to prepare board output: {e}"))
}

/// Runs the full products + availability pipeline.
///
/// # Errors
///
/// Returns an error if the client or presenter cannot be built, or if the
/// pipeline hits a fatal fetch or write error.
pub(crate) async fn run_board(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_api_client(config)?;
    let presenter = build_presenter(config)?;
    tracing::info!(
        api_root = %config.api_root,
        decode_mode = %client.decode_mode(),
        output = %config.output_path.display(),
        "starting board run"
    );

    let session = stockboard_pipeline::run(&client, &config.categories, presenter).await?;

    let joined = session
        .products()
        .iter()
        .filter(|p| !p.availability.is_empty())
        .count();
    println!(
        "wrote {} products ({joined} with availability) to {}",
        session.products().len(),
        session.presenter().path().display()
    );
    Ok(())
}

/// Runs the product phase only.
///
/// # Errors
///
/// Returns an error if the client or presenter cannot be built, or if a
/// product fetch fails.
pub(crate) async fn run_products(config: &AppConfig) -> anyhow::Result<()> {
    let client = build_api_client(config)?;
    let presenter = build_presenter(config)?;

    let session =
        stockboard_pipeline::run_products_only(&client, &config.categories, presenter).await?;

    println!(
        "wrote {} products to {}",
        session.products().len(),
        session.presenter().path().display()
    );
    Ok(())
}
