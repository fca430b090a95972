//! Trade Risk API — rule-based trade classification and analysis
//!
//! Usage:
//!   trade-risk serve --port 8080           — Launch the HTTP API
//!   trade-risk classify --input file.json  — Classify a batch from the CLI
//!   trade-risk analyze --input file.json   — Analyze a batch from the CLI

use chrono::Utc;
use clap::{Parser, Subcommand};
use engine::{
    validate_analyze, validate_classify, AnalysisReport, AnalyzeRequest, ClassifyRequest,
    RiskCategory, TradeAnalyzer, TradeClassifier,
};
use serde_json::Value;
use tracing::info;

use trade_risk::{app, AppState, APP_VERSION};

#[derive(Parser)]
#[command(name = "trade-risk")]
#[command(about = "Rule-based trade risk classification and analysis", long_about = None)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the HTTP API server
    Serve {
        /// Host to bind to
        #[arg(long, default_value = "0.0.0.0")]
        host: String,
        /// Port to listen on
        #[arg(short, long, default_value_t = 8080)]
        port: u16,
    },
    /// Classify a batch of trades from a JSON file (no web server)
    Classify {
        /// Path to a JSON file: {"trades": [{"value": .., "clientSector": ..}]}
        #[arg(long)]
        input: String,
    },
    /// Analyze a batch of trades from a JSON file (no web server)
    Analyze {
        /// Path to a JSON file: {"trades": [{"value": .., "clientSector": .., "clientId": ..}]}
        #[arg(long)]
        input: String,
        /// Optional JSON export path for the full report
        #[arg(long)]
        export: Option<String>,
    },
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter = if verbose {
        EnvFilter::new("debug,engine=debug,trade_risk=debug")
    } else {
        EnvFilter::new("info,engine=info,trade_risk=info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).compact())
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    dotenvy::dotenv().ok();

    match cli.command {
        Commands::Serve { host, port } => {
            cmd_serve(&host, port).await?;
        }
        Commands::Classify { input } => {
            cmd_classify(&input)?;
        }
        Commands::Analyze { input, export } => {
            cmd_analyze(&input, export)?;
        }
    }

    Ok(())
}

// ============================================================================
// Serve command — Axum web server
// ============================================================================

async fn cmd_serve(host: &str, port: u16) -> anyhow::Result<()> {
    info!("Trade Risk API v{} starting...", APP_VERSION);

    let state = AppState::new();
    let app = app(state);

    let addr: std::net::SocketAddr = format!("{}:{}", host, port).parse()?;
    println!("\n=== Trade Risk API v{} ===", APP_VERSION);
    println!("Listening on http://{}", addr);
    println!("\nEndpoints:");
    println!("  GET  /api/health          - Health check");
    println!("  POST /api/trades/classify - Classify a batch of trades");
    println!("  POST /api/trades/analyze  - Classify and aggregate a batch");
    println!("\nPress Ctrl+C to stop\n");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

// ============================================================================
// Classify command — CLI mode (no web server)
// ============================================================================

fn cmd_classify(input: &str) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)?;
    let request: ClassifyRequest = serde_json::from_str(&text)?;

    if let Err(err) = validate_classify(&request) {
        for field_error in &err.errors {
            eprintln!("  {}", field_error);
        }
        return Err(err.into());
    }

    let trades = request.into_trades();
    let classifier = TradeClassifier::with_default_rules();
    let categories = classifier.classify_batch(&trades);

    println!("\nClassified {} trades:", trades.len());
    println!("  {:>4}  {:>16}  {:<10}  {}", "#", "Value", "Sector", "Category");
    println!("  {}", "-".repeat(48));
    for (i, (trade, category)) in trades.iter().zip(&categories).enumerate() {
        println!(
            "  {:>4}  {:>16}  {:<10}  {}",
            i + 1,
            trade.value.to_string(),
            trade.client_sector,
            category
        );
    }

    Ok(())
}

// ============================================================================
// Analyze command — CLI mode (no web server)
// ============================================================================

fn cmd_analyze(input: &str, export: Option<String>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(input)?;
    let request: AnalyzeRequest = serde_json::from_str(&text)?;

    if let Err(err) = validate_analyze(&request) {
        for field_error in &err.errors {
            eprintln!("  {}", field_error);
        }
        return Err(err.into());
    }

    let trades = request.into_trades();
    let analyzer = TradeAnalyzer::with_default_rules();
    let report = analyzer.analyze(&trades);

    print_summary(&report);

    if let Some(export_path) = export {
        let export_data = build_export_json(&report);
        let json = serde_json::to_string_pretty(&export_data)?;
        std::fs::write(&export_path, &json)?;
        println!("\nReport exported to {}", export_path);
    }

    Ok(())
}

fn print_summary(report: &AnalysisReport) {
    println!("\nPer-category summary:");
    println!(
        "  {:<12} {:>8} {:>16}  {}",
        "Category", "Count", "Total Value", "Top Client"
    );
    println!("  {}", "-".repeat(52));
    for category in RiskCategory::ALL {
        if let Some(summary) = report.summary.get(&category) {
            let top_client = if summary.top_client.is_empty() {
                "-"
            } else {
                summary.top_client.as_str()
            };
            println!(
                "  {:<12} {:>8} {:>16}  {}",
                category.to_string(),
                summary.count,
                summary.total_value.to_string(),
                top_client
            );
        }
    }
    println!(
        "\nProcessed {} trades in {} ms",
        report.categories.len(),
        report.processing_time_ms
    );
}

/// Build export JSON for the analysis report (used by the CLI analyze command)
fn build_export_json(report: &AnalysisReport) -> Value {
    serde_json::json!({
        "generated_at": Utc::now().to_rfc3339(),
        "categories": report.categories,
        "summary": report.summary,
        "processingTimeMs": report.processing_time_ms,
    })
}
