mod commands;

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cloudbridge")]
#[command(about = "ひとつのインターフェースで、あらゆるクラウドへ。", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// 登録済みプロバイダーの一覧を表示
    Providers {
        /// JSON 形式で出力
        #[arg(long)]
        json: bool,
    },
    /// プロバイダー名から実装を解決
    Resolve {
        /// プロバイダー名 (ec2, openstack)
        name: String,
        /// 実装バージョン（省略時は最新）
        #[arg(short, long)]
        version: Option<u32>,
    },
    /// すべての実装がロードできるか確認
    Check,
    /// プロファイルのキーペア一覧を表示
    #[command(name = "key-pairs")]
    KeyPairs {
        /// プロファイル名
        profile: String,
        /// 設定ファイルのパス（省略時は自動検出）
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// バージョン情報を表示
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // stdout はコマンド出力に使うので、ログは stderr に出力
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    match cli.command {
        Commands::Providers { json } => commands::providers::handle(json)?,
        Commands::Resolve { name, version } => commands::resolve::handle(&name, version)?,
        Commands::Check => commands::check::handle()?,
        Commands::KeyPairs { profile, config } => {
            commands::key_pairs::handle(&profile, config.as_deref()).await?
        }
        Commands::Version => {
            println!("cloudbridge {}", env!("CARGO_PKG_VERSION"));
        }
    }

    Ok(())
}
