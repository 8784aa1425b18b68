//! CloudBridge のプロバイダー設定
//!
//! プロバイダーごとの接続設定（プロファイル）を YAML ファイルから読み込む。
//!
//! ```yaml
//! profiles:
//!   aws:
//!     provider: ec2
//!     access_key: AKIA...
//!     secret_key: ...
//!     region_name: ap-northeast-1
//!   lab:
//!     provider: openstack
//!     version: 1
//!     access_key: demo
//!     secret_key: ...
//!     region_endpoint: keystone.example.org
//!     project_name: demo
//! ```

pub mod error;
pub mod profile;

pub use error::*;
pub use profile::*;

use std::path::PathBuf;

/// 設定ファイルパスの環境変数
const CONFIG_PATH_ENV: &str = "CLOUDBRIDGE_CONFIG_PATH";

/// カレントディレクトリで探す設定ファイル名（優先順）
const CANDIDATES: [&str; 2] = ["cloudbridge.yaml", ".cloudbridge.yaml"];

/// グローバル設定ファイルのパス (~/.config/cloudbridge/config.yaml)
pub fn global_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("cloudbridge").join("config.yaml"))
}

/// 設定ファイルを探す
///
/// 以下の優先順位で設定ファイルを検索:
/// 1. 環境変数 CLOUDBRIDGE_CONFIG_PATH (直接パス指定)
/// 2. カレントディレクトリ: cloudbridge.yaml, .cloudbridge.yaml
/// 3. ~/.config/cloudbridge/config.yaml (グローバル設定)
#[tracing::instrument]
pub fn find_config_file() -> Result<PathBuf> {
    // 1. 環境変数で直接指定
    if let Ok(config_path) = std::env::var(CONFIG_PATH_ENV) {
        let path = PathBuf::from(&config_path);
        if path.exists() {
            tracing::debug!(path = %path.display(), "Found config from environment variable");
            return Ok(path);
        }
        tracing::warn!(env_path = %config_path, "CLOUDBRIDGE_CONFIG_PATH is set but file does not exist");
    }

    // 2. カレントディレクトリで検索
    let current_dir = std::env::current_dir()?;
    for filename in &CANDIDATES {
        let path = current_dir.join(filename);
        if path.exists() {
            return Ok(path);
        }
    }

    // 3. グローバル設定ファイル
    if let Some(global_config) = global_config_path()
        && global_config.exists()
    {
        return Ok(global_config);
    }

    Err(ConfigError::ConfigFileNotFound)
}

/// 設定ファイルを探してプロファイルを読み込む
pub fn load_default_profiles() -> Result<ProfileSet> {
    let path = find_config_file()?;
    load_profiles(&path)
}
