//! Calls the configured remote provider once, without rate limiting or
//! fallback, and reports what came back.
//!
//! Usage: `check_provider [subject] [country]`. The service configuration is
//! read from `$UNIMATCH_CONFIG` when set, otherwise from the environment.

use anyhow::{Context, Result};
use unimatch::adapters::http::ChatCompletionProvider;
use unimatch::domain::ports::RecommendationProvider;
use unimatch::utils::validation::Validate;
use unimatch::{RecommendationQuery, ServiceConfig};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt::init();

    let config = match std::env::var("UNIMATCH_CONFIG") {
        Ok(path) => ServiceConfig::from_file(&path)
            .with_context(|| format!("loading {}", path))?
            .with_env_overrides(|name| std::env::var(name).ok()),
        Err(_) => ServiceConfig::from_env(),
    };
    config.validate()?;

    let mut args = std::env::args().skip(1);
    let subject = args.next().unwrap_or_else(|| "computer-science".to_string());
    let country = args.next().unwrap_or_default();
    let query = RecommendationQuery::new(&subject, &country)?;

    let provider = ChatCompletionProvider::from_config(&config)
        .context("remote provider is not configured (set OPENAI_API_KEY)")?;

    println!("🔎 POST {}", provider.endpoint());
    match provider.fetch(&query).await {
        Ok(records) => {
            println!("✅ {} recommendations", records.len());
            for record in &records {
                println!(
                    "  {}. {} ({}) {} / {}",
                    record.rank,
                    record.institution_name,
                    record.country,
                    record.acceptance_rate,
                    record.tuition
                );
            }
        }
        Err(failure) => {
            println!("❌ [{}] {}", failure.reason(), failure);
            std::process::exit(2);
        }
    }

    Ok(())
}
