//! ARIO wallet top-up CLI.
//!
//! Reads a wallet file, queries its ARIO balance, computes a top-up amount
//! from an absolute value or a percentage of the balance, submits the top-up,
//! and optionally reports the outcome to a Telegram recipient.

use clap::Parser;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use topup_ario::{
    AntClient, TurboClient, DEFAULT_GATEWAY_URL, DEFAULT_PAYMENT_URL, DEFAULT_PROCESS_ID,
};
use topup_core::{wallet_label, TopupError, TopupReport, TopupResult, TopupService};
use topup_telegram::{Notifier, TelegramClient, TelegramNotifier, DEFAULT_API_URL};

#[derive(Parser)]
#[command(name = "topup-cli")]
#[command(about = "ARIO wallet top-up with optional Telegram notifications")]
struct Cli {
    /// Path to the wallet JSON file
    #[arg(long, value_name = "PATH")]
    wallet: Option<PathBuf>,

    /// Amount to top up: absolute (10) or percentage of balance (50%)
    #[arg(long, value_name = "AMOUNT", allow_hyphen_values = true)]
    amount: Option<String>,

    /// Telegram bot token for notifications
    #[arg(long, value_name = "TOKEN")]
    telegram_bot_token: Option<String>,

    /// Telegram username or numeric chat id to notify
    #[arg(long, value_name = "USERNAME")]
    telegram_username: Option<String>,

    /// Print the chat id of the most recent message sent to the bot, then exit
    #[arg(long)]
    get_chat_id: bool,

    /// Gateway base URL for balance queries
    #[arg(long, value_name = "URL", default_value = DEFAULT_GATEWAY_URL)]
    gateway_url: String,

    /// Payment service base URL for top-up submission
    #[arg(long, value_name = "URL", default_value = DEFAULT_PAYMENT_URL)]
    payment_url: String,

    /// Telegram Bot API base URL
    #[arg(long, value_name = "URL", default_value = DEFAULT_API_URL)]
    telegram_api_url: String,
}

/// Everything one run needs, validated once. The failure handler reads from
/// the same object instead of re-parsing arguments.
#[derive(Debug)]
struct RunConfig {
    wallet_path: PathBuf,
    amount_spec: String,
    telegram: Option<TelegramConfig>,
    gateway_url: String,
    payment_url: String,
    telegram_api_url: String,
}

#[derive(Debug)]
struct TelegramConfig {
    bot_token: String,
    username: String,
}

fn build_config(cli: Cli) -> Result<RunConfig, Vec<String>> {
    let mut errors = Vec::new();

    if cli.wallet.is_none() {
        errors.push("--wallet parameter is required".to_string());
    }
    if cli.amount.is_none() {
        errors.push("--amount parameter is required".to_string());
    }

    let telegram = match (cli.telegram_bot_token, cli.telegram_username) {
        (Some(bot_token), Some(username)) => Some(TelegramConfig {
            bot_token,
            username,
        }),
        (None, None) => None,
        _ => {
            errors.push(
                "Both --telegram-bot-token and --telegram-username must be provided for Telegram notifications"
                    .to_string(),
            );
            None
        }
    };

    match (cli.wallet, cli.amount) {
        (Some(wallet), Some(amount)) if errors.is_empty() => Ok(RunConfig {
            wallet_path: wallet,
            amount_spec: amount,
            telegram,
            gateway_url: cli.gateway_url,
            payment_url: cli.payment_url,
            telegram_api_url: cli.telegram_api_url,
        }),
        _ => Err(errors),
    }
}

fn print_success(message: &str) {
    println!("✅ {}", message);
}

fn print_info(message: &str) {
    println!("ℹ️  {}", message);
}

fn print_warning(message: &str) {
    println!("⚠️  {}", message);
}

fn print_error(message: &str) {
    eprintln!("❌ {}", message);
}

fn usage() {
    eprintln!("Usage: topup-cli --wallet <path> --amount <amount|percentage%> [--telegram-bot-token <token>] [--telegram-username <username>]");
    eprintln!();
    eprintln!("Required parameters:");
    eprintln!("  --wallet <path>              Path to wallet JSON file");
    eprintln!("  --amount <amount|percentage> Amount to top up (e.g., 10 or 50%)");
    eprintln!();
    eprintln!("Optional parameters:");
    eprintln!("  --telegram-bot-token <token> Telegram bot token for notifications");
    eprintln!("  --telegram-username <username> Telegram username to send notifications to");
    eprintln!();
    eprintln!("Examples:");
    eprintln!("  topup-cli --wallet /wallets/wallet.json --amount 10");
    eprintln!("  topup-cli --wallet /wallets/wallet.json --amount 50%");
    eprintln!("  topup-cli --wallet /wallets/wallet.json --amount 100% --telegram-bot-token 123456:ABC --telegram-username @username");
    eprintln!("  topup-cli --get-chat-id --telegram-bot-token 123456:ABC");
}

fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(err) => {
            let is_help = !err.use_stderr();
            let _ = err.print();
            if is_help {
                std::process::exit(0);
            }
            usage();
            std::process::exit(1);
        }
    };

    if cli.get_chat_id {
        let Some(token) = cli.telegram_bot_token.as_deref() else {
            print_error("--telegram-bot-token is required with --get-chat-id");
            std::process::exit(1);
        };
        run_get_chat_id(token, &cli.telegram_api_url).await;
        return;
    }

    let config = match build_config(cli) {
        Ok(config) => config,
        Err(errors) => {
            for error in &errors {
                print_error(error);
            }
            usage();
            std::process::exit(1);
        }
    };

    let notifier = setup_notifier(&config).await;

    print_info(&format!(
        "Starting ARIO top-up: {} from {}",
        config.amount_spec,
        config.wallet_path.display()
    ));

    match run(&config).await {
        Ok(report) => {
            print_success(&format!(
                "Top-up completed! Status: {}, TX: {}",
                report.status, report.transaction_id
            ));
            print_info(&format!(
                "Used: {} ARIO, Remaining: {:.6} ARIO",
                report.topup_amount, report.remaining_balance
            ));
            notifier.notify_success(&report).await;
        }
        Err(err) => {
            print_error(&format!("Failed: {err}"));
            report_failure(&config, &notifier, &err).await;
            std::process::exit(1);
        }
    }
}

async fn run(config: &RunConfig) -> TopupResult<TopupReport> {
    let ant = AntClient::new(&config.gateway_url, DEFAULT_PROCESS_ID)
        .map_err(TopupError::balance_query)?;
    let turbo = TurboClient::new(&config.payment_url).map_err(TopupError::submission)?;
    TopupService::new(ant, turbo)
        .execute(&config.wallet_path, &config.amount_spec)
        .await
}

async fn setup_notifier(config: &RunConfig) -> TelegramNotifier {
    match &config.telegram {
        Some(telegram) => match TelegramClient::new(&telegram.bot_token, &config.telegram_api_url)
        {
            Ok(client) => {
                let notifier = Notifier::connect(client, &telegram.username).await;
                print_info(&format!(
                    "Telegram notifications enabled for {}",
                    telegram.username
                ));
                notifier
            }
            Err(err) => {
                print_warning(&format!(
                    "Telegram setup failed, notifications disabled: {err}"
                ));
                Notifier::disabled()
            }
        },
        None => {
            print_info("Telegram notifications disabled");
            Notifier::disabled()
        }
    }
}

/// Pick the notification template matching the failure.
async fn report_failure(config: &RunConfig, notifier: &TelegramNotifier, err: &TopupError) {
    let public_key = wallet_label(&config.wallet_path);
    let spec = config.amount_spec.as_str();
    match err {
        TopupError::InsufficientBalance {
            available,
            requested,
        } => {
            notifier
                .notify_insufficient_balance(&public_key, *available, *requested)
                .await;
        }
        TopupError::NoBalance => notifier.notify_no_balance(&public_key).await,
        TopupError::InvalidAmount(reason) => {
            notifier
                .notify_invalid_amount(&public_key, reason, spec)
                .await;
        }
        other => {
            notifier
                .notify_error(&public_key, &other.to_string(), Some(spec))
                .await;
        }
    }
}

async fn run_get_chat_id(token: &str, api_url: &str) {
    println!();
    println!("🔍 Getting recent updates to find your chat ID...");
    let client = match TelegramClient::new(token, api_url) {
        Ok(client) => client,
        Err(err) => {
            print_error(&format!("Error getting chat ID: {err}"));
            return;
        }
    };
    match client.get_updates().await {
        Ok(updates) => {
            match updates.iter().rev().find_map(|update| update.message.as_ref()) {
                Some(message) => {
                    print_success(&format!("Found chat ID: {}", message.chat.id));
                    if let Some(username) = message
                        .from
                        .as_ref()
                        .and_then(|from| from.username.as_deref())
                    {
                        println!("👤 Username: @{}", username);
                    }
                    println!(
                        "\n💡 Use this chat ID instead of username: --telegram-username \"{}\"",
                        message.chat.id
                    );
                }
                None => {
                    println!("❌ No recent messages found.");
                    println!("💡 Please send any message to your bot first, then run this command again.");
                }
            }
        }
        Err(err) => print_error(&format!("Error getting chat ID: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(args).unwrap()
    }

    #[test]
    fn test_config_requires_wallet_and_amount() {
        let cli = parse(&["topup-cli"]);
        let errors = build_config(cli).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "--wallet parameter is required".to_string(),
                "--amount parameter is required".to_string(),
            ]
        );
    }

    #[test]
    fn test_amount_accepts_negative_specs() {
        // A leading hyphen must not be mistaken for a flag; the value flows
        // through so the calculator can reject it with its own message.
        let cli = parse(&["topup-cli", "--wallet", "/w/wallet.json", "--amount", "-3"]);
        let config = build_config(cli).unwrap();
        assert_eq!(config.amount_spec, "-3");
    }

    #[test]
    fn test_config_accepts_minimal_arguments() {
        let cli = parse(&["topup-cli", "--wallet", "/w/wallet.json", "--amount", "50%"]);
        let config = build_config(cli).unwrap();
        assert_eq!(config.wallet_path, PathBuf::from("/w/wallet.json"));
        assert_eq!(config.amount_spec, "50%");
        assert!(config.telegram.is_none());
        assert_eq!(config.gateway_url, DEFAULT_GATEWAY_URL);
        assert_eq!(config.payment_url, DEFAULT_PAYMENT_URL);
        assert_eq!(config.telegram_api_url, DEFAULT_API_URL);
    }

    #[test]
    fn test_config_rejects_half_telegram_pair() {
        let cli = parse(&[
            "topup-cli",
            "--wallet",
            "/w/wallet.json",
            "--amount",
            "10",
            "--telegram-bot-token",
            "123:ABC",
        ]);
        let errors = build_config(cli).unwrap_err();
        assert_eq!(
            errors,
            vec![
                "Both --telegram-bot-token and --telegram-username must be provided for Telegram notifications"
                    .to_string()
            ]
        );

        let cli = parse(&[
            "topup-cli",
            "--wallet",
            "/w/wallet.json",
            "--amount",
            "10",
            "--telegram-username",
            "@alice",
        ]);
        assert!(build_config(cli).is_err());
    }

    #[test]
    fn test_config_accepts_full_telegram_pair() {
        let cli = parse(&[
            "topup-cli",
            "--wallet",
            "/w/wallet.json",
            "--amount",
            "10",
            "--telegram-bot-token",
            "123:ABC",
            "--telegram-username",
            "@alice",
        ]);
        let config = build_config(cli).unwrap();
        let telegram = config.telegram.unwrap();
        assert_eq!(telegram.bot_token, "123:ABC");
        assert_eq!(telegram.username, "@alice");
    }

    #[test]
    fn test_endpoint_overrides() {
        let cli = parse(&[
            "topup-cli",
            "--wallet",
            "/w/wallet.json",
            "--amount",
            "10",
            "--gateway-url",
            "http://localhost:3000",
            "--payment-url",
            "http://localhost:4000",
            "--telegram-api-url",
            "http://localhost:5000",
        ]);
        let config = build_config(cli).unwrap();
        assert_eq!(config.gateway_url, "http://localhost:3000");
        assert_eq!(config.payment_url, "http://localhost:4000");
        assert_eq!(config.telegram_api_url, "http://localhost:5000");
    }

    #[test]
    fn test_validation_errors_collected_together() {
        let cli = parse(&["topup-cli", "--telegram-bot-token", "123:ABC"]);
        let errors = build_config(cli).unwrap_err();
        assert_eq!(errors.len(), 3);
    }
}
