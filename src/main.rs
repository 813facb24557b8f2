use cardpay::application::assembler::PaymentAssembler;
use cardpay::application::saved_card::SavedCardPayment;
use cardpay::config::{Environment, GatewayConfig};
use cardpay::domain::payment::Intent;
use cardpay::domain::ports::{AccessToken, AuthenticatorBox, Credentials};
use cardpay::error::AuthError;
use cardpay::infrastructure::in_memory::InMemoryGateway;
use cardpay::infrastructure::rest::RestGateway;
use cardpay::interfaces::csv::outcome_writer::{OutcomeWriter, PaymentOutcome};
use cardpay::interfaces::csv::payment_reader::PaymentReader;
use cardpay::telemetry::{LogFormat, init_logging};
use clap::{Args, Parser, Subcommand};
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use std::time::Duration;
use tracing::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Submit to an in-memory gateway instead of the real one. No credentials needed.
    #[arg(long, global = true)]
    dry_run: bool,

    /// Gateway environment
    #[arg(long, global = true, env = "CARDPAY_MODE", value_enum, default_value_t = Environment::Sandbox)]
    mode: Environment,

    /// Gateway base URL, overrides --mode
    #[arg(long, global = true, env = "CARDPAY_ENDPOINT")]
    endpoint: Option<String>,

    #[arg(long, global = true, env = "CARDPAY_CLIENT_ID")]
    client_id: Option<String>,

    #[arg(long, global = true, env = "CARDPAY_CLIENT_SECRET", hide_env_values = true)]
    client_secret: Option<String>,

    /// Upper bound for each gateway call, in seconds
    #[arg(long, global = true, env = "CARDPAY_TIMEOUT_SECS", default_value_t = 30)]
    timeout_secs: u64,

    #[arg(long, global = true, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Pretty)]
    log_format: LogFormat,
}

#[derive(Subcommand)]
enum Command {
    /// Charge a previously stored card and print the created payment
    Pay(PayArgs),
    /// Submit every saved-card payment in a CSV file
    Batch {
        /// Input payments CSV file
        input: PathBuf,
    },
}

#[derive(Args)]
struct PayArgs {
    /// Id of the stored card, as returned when it was saved
    #[arg(long)]
    card_id: String,

    #[arg(long, default_value = "USD")]
    currency: String,

    #[arg(long)]
    total: Decimal,

    #[arg(long)]
    subtotal: Decimal,

    #[arg(long, default_value = "0")]
    tax: Decimal,

    #[arg(long, default_value = "0")]
    shipping: Decimal,

    #[arg(long)]
    description: Option<String>,

    /// sale, authorize or order
    #[arg(long)]
    intent: Option<Intent>,

    /// Idempotency key forwarded to the gateway
    #[arg(long)]
    request_id: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.log_format);

    let (assembler, token) = if cli.dry_run {
        info!("Dry run, payments go to the in-memory gateway");
        let gateway = Box::new(InMemoryGateway::new());
        let timeout = Duration::from_secs(cli.timeout_secs);
        (
            PaymentAssembler::new(gateway, timeout),
            AccessToken::new("dry-run"),
        )
    } else {
        let config = GatewayConfig::new(
            cli.mode,
            cli.endpoint,
            cli.client_id,
            cli.client_secret,
            cli.timeout_secs,
        )
        .into_diagnostic()?;

        let gateway = RestGateway::new(config.base_url());
        let authenticator: AuthenticatorBox = Box::new(gateway.clone());
        let token = tokio::time::timeout(
            config.timeout,
            authenticator.access_token(&config.client_id, &config.client_secret),
        )
        .await
        .map_err(|_| AuthError::Timeout(config.timeout))
        .and_then(|token| token)
        .into_diagnostic()?;

        (PaymentAssembler::new(Box::new(gateway), config.timeout), token)
    };

    match cli.command {
        Command::Pay(args) => {
            let mut credentials = Credentials::new(token);
            if let Some(request_id) = args.request_id {
                credentials = credentials.with_request_id(request_id);
            }

            let request = SavedCardPayment {
                card_id: args.card_id,
                currency: args.currency,
                total: args.total,
                subtotal: args.subtotal,
                tax: args.tax,
                shipping: args.shipping,
                description: args.description,
                intent: args.intent,
            };

            match assembler
                .create_payment_with_saved_card(request, &credentials)
                .await
            {
                Ok(payment) => {
                    let summary = serde_json::json!({
                        "id": payment.id,
                        "state": payment.state.as_str(),
                    });
                    println!("{}", serde_json::to_string_pretty(&summary).into_diagnostic()?);
                }
                Err(err) => {
                    if let Some(raw) = err.diagnostic() {
                        eprintln!("Gateway response: {}", raw);
                    }
                    return Err(err).into_diagnostic();
                }
            }
        }
        Command::Batch { input } => {
            let credentials = Credentials::new(token);
            let file = File::open(input).into_diagnostic()?;
            let reader = PaymentReader::new(file);

            let stdout = io::stdout();
            let mut writer = OutcomeWriter::new(stdout.lock());
            for (index, row) in reader.payments().enumerate() {
                let row_number = index + 1;
                match row {
                    Ok(request) => {
                        let result = assembler
                            .create_payment_with_saved_card(request, &credentials)
                            .await;
                        writer
                            .write(&PaymentOutcome::new(row_number, &result))
                            .into_diagnostic()?;
                    }
                    Err(e) => {
                        eprintln!("Error reading payment on row {}: {}", row_number, e);
                    }
                }
            }
            writer.flush().into_diagnostic()?;
        }
    }

    Ok(())
}
