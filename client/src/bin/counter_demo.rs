//! Interactive counter demo against a local test validator.
//!
//! Walkthrough: connect a wallet identity, open one program session, fund
//! the payer, then drive the counter from a small command loop.

use std::{
    io::{self, BufRead, Write},
    path::PathBuf,
    sync::Arc,
};

use anyhow::{Context, Result};
use clap::Parser;
use counter_client::{
    idl::Idl, wallet::LocalWallet, ClientError, CounterApp, ProgramSession, SessionConfig,
    LOCALNET_ENDPOINT,
};
use solana_sdk::{commitment_config::CommitmentConfig, native_token::LAMPORTS_PER_SOL};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(about = "Interactive client for the on-chain counter program")]
struct Args {
    /// RPC endpoint of the test validator
    #[arg(long, default_value = LOCALNET_ENDPOINT)]
    endpoint: String,

    /// Wallet keypair file; a throwaway identity is generated when omitted
    #[arg(long)]
    keypair: Option<PathBuf>,

    /// Interface description of the deployed program
    #[arg(long, default_value = "idl/counter.json")]
    idl: PathBuf,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let args = Args::parse();

    println!("=== Counter Program Demo ===\n");

    // Step 1: connect the wallet
    let wallet =
        LocalWallet::connect(args.keypair.as_deref()).context("Failed to connect wallet")?;
    println!("✓ Wallet connected: {}", wallet.pubkey());

    // Step 2: open the program session (once; every action reuses it)
    let idl = Idl::load(&args.idl).context("Failed to load interface description")?;
    let config = SessionConfig {
        endpoint: args.endpoint,
        commitment: CommitmentConfig::processed(),
    };
    let session = ProgramSession::connect(config, wallet.signer(), idl)
        .context("Failed to open program session")?;
    println!("✓ Session open, program: {}", session.program_id());

    // Step 3: fund the payer so account rent and fees clear on localnet
    session
        .ensure_funded(LAMPORTS_PER_SOL)
        .await
        .context("Failed to fund payer on localnet")?;
    println!("✓ Payer funded\n");

    let app = CounterApp::new(Arc::new(session));

    println!("Commands: create | increment | show | quit");
    let stdin = io::stdin();
    loop {
        print!("> ");
        io::stdout().flush()?;
        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        match line.trim() {
            "create" => match app.create_counter().await {
                Ok(count) => println!("✓ Counter created, count = {count}"),
                Err(err) => println!("create failed: {err}"),
            },
            "increment" => match app.increment().await {
                Ok(count) => println!("✓ Count = {count}"),
                Err(err @ ClientError::NoCounter) => println!("{err}"),
                Err(err) => println!("increment failed: {err}"),
            },
            "show" => println!("{}", app.display()),
            "quit" | "exit" => break,
            "" => continue,
            other => println!("unknown command: {other:?}"),
        }
    }

    Ok(())
}
