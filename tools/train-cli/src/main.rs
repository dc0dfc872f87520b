//! train-cli: operator tooling for Train swaps.
//!
//! Decodes memo payloads seen in OP_RETURN outputs and generates
//! secret/hashlock pairs. Output is JSON on stdout; logs go to stderr.

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use shared_types::Hashlock;
use train_htlc::new_secret_pair;
use train_memo::{build_op_return_script, decode_event, decode_script};

/// Environment variable holding the log filter.
const LOG_ENV: &str = "TRAIN_LOG";

/// Train operator CLI
#[derive(Parser, Debug)]
#[command(name = "train-cli")]
#[command(about = "Decode Train memos and generate HTLC secrets")]
struct Args {
    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Decode one memo payload
    DecodePayload {
        /// Payload bytes as hex (0x optional)
        hex: String,
    },
    /// Extract every OP_RETURN push from a scriptPubKey and decode each
    DecodeScript {
        /// scriptPubKey as hex (0x optional)
        hex: String,
    },
    /// Wrap a payload in an OP_RETURN script
    BuildScript {
        /// Payload bytes as hex (0x optional)
        hex: String,
    },
    /// Generate a random secret and its hashlock
    NewSecret,
    /// Compute the hashlock of a known secret
    Hashlock {
        /// 32-byte secret as hex (0x optional)
        secret: String,
    },
}

fn main() -> Result<()> {
    let filter = EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let args = Args::parse();
    debug!("[train-cli] {:?}", args.command);

    let output = run(args.command)?;
    let text = if args.pretty {
        serde_json::to_string_pretty(&output)?
    } else {
        serde_json::to_string(&output)?
    };
    println!("{}", text);
    Ok(())
}

fn run(command: Command) -> Result<serde_json::Value> {
    match command {
        Command::DecodePayload { hex } => {
            let payload = decode_hex(&hex).context("payload")?;
            let event = decode_event(&payload);
            info!("[train-cli] {}-byte payload decoded as {}", payload.len(), event.kind());
            Ok(serde_json::to_value(event)?)
        }
        Command::DecodeScript { hex } => {
            let script = decode_hex(&hex).context("script")?;
            let events = decode_script(&script).context("extracting OP_RETURN pushes")?;
            info!("[train-cli] {} memo(s) in script", events.len());
            Ok(serde_json::to_value(events)?)
        }
        Command::BuildScript { hex } => {
            let payload = decode_hex(&hex).context("payload")?;
            let script = build_op_return_script(&payload)?;
            Ok(json!({ "script": hex::encode(script) }))
        }
        Command::NewSecret => {
            let (secret, hashlock) = new_secret_pair();
            Ok(json!({
                "secret": hex::encode(secret.as_bytes()),
                "hashlock": hex::encode(hashlock.as_bytes()),
            }))
        }
        Command::Hashlock { secret } => {
            let bytes = decode_hex(&secret).context("secret")?;
            let secret: [u8; 32] = match bytes.try_into() {
                Ok(arr) => arr,
                Err(b) => bail!("secret must be 32 bytes, got {}", b.len()),
            };
            let hashlock = Hashlock::from_secret(&secret);
            Ok(json!({ "hashlock": hex::encode(hashlock.as_bytes()) }))
        }
    }
}

fn decode_hex(input: &str) -> Result<Vec<u8>> {
    let trimmed = input.trim();
    hex::decode(trimmed.strip_prefix("0x").unwrap_or(trimmed))
        .with_context(|| format!("invalid hex: {:?}", input))
}
