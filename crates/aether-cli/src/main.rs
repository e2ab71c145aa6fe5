mod display;
mod settings;

use std::path::{Path, PathBuf};

use aether_ai::Formulator;
use aether_core::compliance::ValidationRequest;
use aether_core::{MoodInput, PhysiologicalProfile, SkinType, validate_ingredients};
use aether_payment::{OrderRequest, PaymentClient};
use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::settings::Settings;

#[derive(Parser)]
#[command(
    name = "aether",
    version,
    about = "Personalised fragrance formulation and IFRA-style checks"
)]
struct Cli {
    #[command(flatten)]
    settings: Settings,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Generate a formula for a skin profile and optional mood.
    Generate(GenerateArgs),

    /// Check an ingredient list (JSON `{"ingredients": [...]}`) against compliance rules.
    Validate {
        /// Path to the JSON file, or `-` for stdin.
        input: PathBuf,

        /// Print a readable card instead of JSON.
        #[arg(long)]
        card: bool,
    },

    /// Purchase a formula through PayPal.
    Order {
        #[command(subcommand)]
        action: OrderAction,
    },
}

#[derive(Args)]
struct GenerateArgs {
    /// Skin surface pH (3.0–9.0).
    #[arg(long)]
    ph: f64,

    /// dry, normal, or oily.
    #[arg(long)]
    skin_type: SkinType,

    /// Skin temperature in Celsius (35.0–40.0).
    #[arg(long, default_value_t = aether_core::profile::DEFAULT_TEMPERATURE_C)]
    temperature: f64,

    /// Free-text description of the desired mood.
    #[arg(long)]
    prompt: Option<String>,

    /// Mood valence (-1.0–1.0).
    #[arg(long, allow_negative_numbers = true)]
    valence: Option<f64>,

    /// Mood arousal (-1.0–1.0).
    #[arg(long, allow_negative_numbers = true)]
    arousal: Option<f64>,

    /// Print a readable card instead of JSON.
    #[arg(long)]
    card: bool,
}

#[derive(Subcommand)]
enum OrderAction {
    /// Create a checkout order and print the approval URL.
    Create {
        #[arg(long)]
        formula_id: String,
        #[arg(long)]
        formula_name: String,
        #[arg(long)]
        amount: f64,
        #[arg(long, default_value = "USD")]
        currency: String,
    },
    /// Capture an approved order.
    Capture { order_id: String },
    /// Print the public checkout configuration.
    Config,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Process environment wins over .env entries.
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    tracing::debug!("aether v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Command::Generate(args) => cmd_generate(&cli.settings, args).await,
        Command::Validate { input, card } => cmd_validate(&input, card),
        Command::Order { action } => cmd_order(&cli.settings, action).await,
    }
}

async fn cmd_generate(settings: &Settings, args: GenerateArgs) -> anyhow::Result<()> {
    let profile = PhysiologicalProfile::new(args.ph, args.skin_type, args.temperature)?;
    let mood = MoodInput {
        free_text: args.prompt,
        valence: args.valence,
        arousal: args.arousal,
    };

    let backend = settings
        .backend()
        .connect()
        .context("building generative backend client")?;
    let formulator = Formulator::new(backend);
    tracing::info!(mode = ?formulator.mode(), "formulator ready");

    let formula = formulator.formulate(&profile, &mood).await?;
    if args.card {
        display::print_formula_card(&formula);
    } else {
        println!("{}", serde_json::to_string_pretty(&formula)?);
    }
    Ok(())
}

fn cmd_validate(input: &Path, card: bool) -> anyhow::Result<()> {
    let raw = if input.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("reading stdin")?
    } else {
        std::fs::read_to_string(input).with_context(|| format!("reading {}", input.display()))?
    };

    let request: ValidationRequest =
        serde_json::from_str(&raw).context("parsing ingredient list")?;
    let result = validate_ingredients(&request.ingredients);

    if card {
        display::print_validation_card(&result);
    } else {
        println!("{}", serde_json::to_string_pretty(&result)?);
    }
    Ok(())
}

async fn cmd_order(settings: &Settings, action: OrderAction) -> anyhow::Result<()> {
    let client = PaymentClient::new(settings.payment());

    match action {
        OrderAction::Create {
            formula_id,
            formula_name,
            amount,
            currency,
        } => {
            let order = OrderRequest {
                formula_id,
                formula_name,
                amount,
                currency,
            };
            let created = client.create_order(&order).await?;
            println!("{}", serde_json::to_string_pretty(&created)?);
        }
        OrderAction::Capture { order_id } => {
            let captured = client.capture_order(&order_id).await?;
            println!("{}", serde_json::to_string_pretty(&captured)?);
        }
        OrderAction::Config => {
            println!("{}", serde_json::to_string_pretty(&client.client_config()?)?);
        }
    }
    Ok(())
}
