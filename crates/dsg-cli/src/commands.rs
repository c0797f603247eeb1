use std::io::Write;
use std::sync::Arc;

use colored::Colorize;
use dsg_crypto::{ChunkedHasher, SigningKey};
use dsg_gateway::Gateway;
use dsg_ledger::HttpLedgerClient;
use dsg_server::{AppState, GatewayServer};
use dsg_storage::HttpBackend;
use dsg_types::ContentRoot;

use crate::cli::*;
use crate::config::CliConfig;

pub async fn run_command(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::load(cli.config.as_deref())?;
    match cli.command {
        Command::Upload(args) => cmd_upload(args, &config).await,
        Command::Download(args) => cmd_download(args, &config).await,
        Command::Hash(args) => cmd_hash(args, &config),
        Command::Keygen(args) => cmd_keygen(args),
        Command::Serve(args) => cmd_serve(args, config).await,
    }
}

fn build_gateway(config: &CliConfig) -> anyhow::Result<Gateway> {
    let backend = Arc::new(HttpBackend::new(
        &config.storage_endpoint,
        config.gateway.request_timeout(),
        config.gateway.retry_policy(),
    )?);
    let ledger = Arc::new(HttpLedgerClient::new(
        &config.ledger_endpoint,
        config.gateway.request_timeout(),
    )?);
    let key = config.resolve_signing_key()?;
    Ok(Gateway::new(backend, ledger, key, &config.gateway)?)
}

async fn cmd_upload(args: UploadArgs, config: &CliConfig) -> anyhow::Result<()> {
    let gateway = build_gateway(config)?;
    let tags = args.tag.join(",").into_bytes();
    let result = gateway.upload_file(&args.file, &tags).await?;

    println!("{} Upload complete", "✓".green().bold());
    println!("  Root hash: {}", result.root.to_hex().cyan());
    println!("  Tx hash:   {}", result.receipt.tx_id.to_hex().yellow());
    if let Some(block) = result.receipt.block_ref {
        println!("  Block:     {block}");
    }
    Ok(())
}

async fn cmd_download(args: DownloadArgs, config: &CliConfig) -> anyhow::Result<()> {
    let gateway = build_gateway(config)?;
    let root = ContentRoot::from_hex(&args.root)
        .map_err(|e| anyhow::anyhow!("invalid root hash: {e}"))?;
    let result = gateway.download(&root).await?;

    match args.output {
        Some(path) => {
            std::fs::write(&path, result.bytes())?;
            println!(
                "{} Verified {} bytes written to {}",
                "✓".green().bold(),
                result.len(),
                path.display().to_string().bold()
            );
        }
        None => {
            std::io::stdout().write_all(result.bytes())?;
        }
    }
    Ok(())
}

fn cmd_hash(args: HashArgs, config: &CliConfig) -> anyhow::Result<()> {
    let hasher = ChunkedHasher::new(config.gateway.chunk_size)?;
    let file = std::fs::File::open(&args.file)?;
    let root = hasher.compute_root(file)?;
    println!("{root}");
    Ok(())
}

fn cmd_keygen(args: KeygenArgs) -> anyhow::Result<()> {
    let key = SigningKey::generate();
    match args.out {
        Some(path) => {
            std::fs::write(&path, key.to_hex())?;
            println!(
                "{} Signing key written to {}",
                "✓".green().bold(),
                path.display().to_string().bold()
            );
        }
        None => println!("{}", key.to_hex()),
    }
    Ok(())
}

async fn cmd_serve(args: ServeArgs, mut config: CliConfig) -> anyhow::Result<()> {
    if let Some(bind) = args.bind {
        config.server.bind_addr = bind.parse()?;
    }
    let gateway = build_gateway(&config)?;
    let state = AppState::new(Arc::new(gateway));
    println!(
        "Gateway on {} (storage: {}, ledger: {})",
        config.server.bind_addr.to_string().bold(),
        config.storage_endpoint,
        config.ledger_endpoint
    );
    GatewayServer::new(config.server, state).serve().await?;
    Ok(())
}
