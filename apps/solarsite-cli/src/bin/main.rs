use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use solarsite_chat::{ChatRequest, ChatService};
use solarsite_core::config::Config;
use solarsite_core::types::CustomerInfo;
use solarsite_knowledge::{search_scored, search_scored_in_category, CustomerInfoExtractor, KeywordRetriever};
use solarsite_rebate::{calculate, EligibilityChecklist, RebateInput, RebateTables};

#[derive(Parser)]
#[command(name = "solarsite", about = "Rebate estimates and knowledge-base chat for the solar site")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Estimate STC and state rebates for a system
    Rebate(RebateArgs),
    /// Rank knowledge chunks for a query
    Search {
        query: String,
        #[arg(short, long)]
        limit: Option<usize>,
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Answer one chat message from the knowledge base
    Chat {
        message: String,
        /// Print the full JSON response
        #[arg(long)]
        json: bool,
    },
    /// Show the customer details found in a message
    Extract { message: String },
}

#[derive(Args)]
struct RebateArgs {
    postcode: String,
    #[arg(long)]
    panels: u32,
    #[arg(long, default_value_t = 440.0)]
    watts: f64,
    /// Battery size in kW; omit for solar only
    #[arg(long)]
    battery_kw: Option<f64>,
    #[arg(long)]
    owner_occupier: bool,
    #[arg(long)]
    property_under_cap: bool,
    #[arg(long)]
    income_under_cap: bool,
    #[arg(long)]
    no_previous_rebate: bool,
}

fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();
}

fn load_retriever(config: &Config) -> anyhow::Result<KeywordRetriever> {
    match config.corpus_path()? {
        Some(path) => {
            info!(path = %path.display(), "loading corpus");
            Ok(KeywordRetriever::from_path(&path)?)
        }
        None => Ok(KeywordRetriever::builtin()?),
    }
}

fn main() -> anyhow::Result<()> {
    init_tracing();
    let cli = Cli::parse();
    let config = Config::load().map_err(|e| { eprintln!("Error loading config: {}", e); e })?;
    let settings = config.settings()?;

    match cli.command {
        Command::Rebate(args) => {
            let mut input = RebateInput::solar(args.postcode, args.panels, args.watts).with_eligibility(EligibilityChecklist {
                owner_occupier: args.owner_occupier,
                property_under_value_cap: args.property_under_cap,
                income_under_cap: args.income_under_cap,
                no_previous_rebate: args.no_previous_rebate,
            });
            if let Some(kw) = args.battery_kw { input = input.with_battery(kw); }
            input.validate()?;

            let tables = RebateTables::from_settings(&settings.rebate);
            match calculate(&tables, &input) {
                Some(result) => {
                    println!("Postcode {} ({})  system {:.2} kW", input.postcode, result.zone, result.system_size_kw);
                    println!("  Solar STCs:    {:>4}  {}", result.solar_certificates, result.solar_value);
                    println!("  Battery STCs:  {:>4}  {}", result.battery_certificates, result.battery_value);
                    println!("  State rebate:        {}", result.state_rebate);
                    println!("  Total:               {}", result.total);
                }
                None => println!("Calculation not available for postcode {}", input.postcode),
            }
        }
        Command::Search { query, limit, category } => {
            let retriever = load_retriever(&config)?;
            let limit = limit.unwrap_or(settings.knowledge.search_limit);
            let hits = match &category {
                Some(category) => search_scored_in_category(&query, retriever.chunks(), category, limit),
                None => search_scored(&query, retriever.chunks(), limit),
            };
            if hits.is_empty() { println!("No matching answers for \"{}\"", query); }
            for (i, hit) in hits.iter().enumerate() {
                println!("  {}. score={:<3} id={}  {}", i + 1, hit.score, hit.chunk.id, hit.chunk.title);
            }
        }
        Command::Chat { message, json } => {
            let chat = ChatService::new(load_retriever(&config)?, CustomerInfoExtractor::new()?, settings.chat)
                .with_context_limit(settings.knowledge.context_limit);
            let response = chat.respond(&ChatRequest { message, ..ChatRequest::default() });
            if json { println!("{}", serde_json::to_string_pretty(&response)?); } else { println!("{}", response.response); }
        }
        Command::Extract { message } => {
            let info = CustomerInfoExtractor::new()?.extract(&message, &CustomerInfo::default());
            println!("{}", serde_json::to_string_pretty(&info)?);
        }
    }
    Ok(())
}
