use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error(
        "設定ファイルが見つかりません。以下の場所を確認してください:\n\
        - カレントディレクトリ: cloudbridge.yaml, .cloudbridge.yaml\n\
        - ~/.config/cloudbridge/config.yaml\n\
        または CLOUDBRIDGE_CONFIG_PATH 環境変数で直接指定できます"
    )]
    ConfigFileNotFound,

    #[error("プロファイル '{0}' が見つかりません")]
    ProfileNotFound(String),

    #[error("不正なプロファイル '{name}': {reason}")]
    InvalidProfile { name: String, reason: String },

    #[error("YAML パースエラー: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO エラー: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ConfigError>;
