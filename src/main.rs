use clap::Parser;
use unimatch::app::cards::{ensure_recommendations, render_cards, render_json, render_options};
use unimatch::domain::catalog::resolve_country;
use unimatch::utils::{logger, validation::Validate};
use unimatch::{CliConfig, OutputFormat, RecommendationQuery, RecommendationService, UnimatchError};

fn fail(e: UnimatchError) -> ! {
    tracing::error!("❌ {}", e);
    tracing::error!("💡 Suggestion: {}", e.recovery_suggestion());
    eprintln!("❌ {}", e.user_friendly_message());
    eprintln!("💡 {}", e.recovery_suggestion());
    std::process::exit(1);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = CliConfig::parse();

    if cli.json_logs {
        logger::init_json_logger(cli.verbose);
    } else {
        logger::init_cli_logger(cli.verbose);
    }

    tracing::debug!("CLI config: {:?}", cli);

    if cli.list_options {
        print!("{}", render_options());
        return Ok(());
    }

    if let Err(e) = cli.validate() {
        fail(e);
    }

    let config = cli.service_config().unwrap_or_else(|e| fail(e));
    let service = RecommendationService::from_config(&config).unwrap_or_else(|e| fail(e));

    let subject = cli.subject.as_deref().unwrap_or_default();
    let query = RecommendationQuery::new(subject, &resolve_country(&cli.country))
        .unwrap_or_else(|e| fail(e));

    tracing::info!(subject = %query.subject, country = %query.country, "Finding recommendations");
    let records = service.acquire(&query).await;

    if let Err(e) = ensure_recommendations(&records) {
        fail(e);
    }

    match cli.format {
        OutputFormat::Text => print!("{}", render_cards(&query, &records)),
        OutputFormat::Json => println!("{}", render_json(&query, &records)?),
    }

    Ok(())
}
