use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "dsg",
    about = "Dispersed Storage Gateway — content-addressed upload and verified download",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Path to a TOML configuration file.
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Hash a file, disperse it to storage, and record the root on the ledger
    Upload(UploadArgs),
    /// Fetch a file by root hash and verify it before writing
    Download(DownloadArgs),
    /// Compute a file's content root without uploading
    Hash(HashArgs),
    /// Generate a new Ed25519 signing key
    Keygen(KeygenArgs),
    /// Start the gateway HTTP server
    Serve(ServeArgs),
}

#[derive(Args)]
pub struct UploadArgs {
    /// File to upload.
    pub file: PathBuf,
    /// Opaque tags attached to the ledger record (repeatable).
    #[arg(long)]
    pub tag: Vec<String>,
}

#[derive(Args)]
pub struct DownloadArgs {
    /// Root hash of the content to fetch.
    pub root: String,
    /// Write the verified bytes here instead of stdout.
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct HashArgs {
    /// File to hash.
    pub file: PathBuf,
}

#[derive(Args)]
pub struct KeygenArgs {
    /// Write the hex-encoded secret here instead of stdout.
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[derive(Args)]
pub struct ServeArgs {
    /// Override the configured bind address.
    #[arg(long)]
    pub bind: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_upload() {
        let cli = Cli::try_parse_from(["dsg", "upload", "report.pdf"]).unwrap();
        if let Command::Upload(args) = cli.command {
            assert_eq!(args.file, PathBuf::from("report.pdf"));
            assert!(args.tag.is_empty());
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_upload_with_tags() {
        let cli =
            Cli::try_parse_from(["dsg", "upload", "a.bin", "--tag", "archive", "--tag", "v2"])
                .unwrap();
        if let Command::Upload(args) = cli.command {
            assert_eq!(args.tag, vec!["archive", "v2"]);
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_download_with_output() {
        let cli = Cli::try_parse_from(["dsg", "download", "abcd", "-o", "out.bin"]).unwrap();
        if let Command::Download(args) = cli.command {
            assert_eq!(args.root, "abcd");
            assert_eq!(args.output, Some(PathBuf::from("out.bin")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_hash() {
        let cli = Cli::try_parse_from(["dsg", "hash", "file.txt"]).unwrap();
        assert!(matches!(cli.command, Command::Hash(_)));
    }

    #[test]
    fn parse_keygen() {
        let cli = Cli::try_parse_from(["dsg", "keygen", "--out", "key.hex"]).unwrap();
        if let Command::Keygen(args) = cli.command {
            assert_eq!(args.out, Some(PathBuf::from("key.hex")));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_serve_with_bind() {
        let cli = Cli::try_parse_from(["dsg", "serve", "--bind", "0.0.0.0:8080"]).unwrap();
        if let Command::Serve(args) = cli.command {
            assert_eq!(args.bind, Some("0.0.0.0:8080".into()));
        } else {
            panic!("wrong command");
        }
    }

    #[test]
    fn parse_global_config_flag() {
        let cli = Cli::try_parse_from(["dsg", "-c", "gw.toml", "serve"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("gw.toml")));
    }
}
