//! プロファイル定義
//!
//! プロファイル = プロバイダー名 + バージョン（任意）+ 接続設定。
//! 接続設定の解釈はプロバイダー側で行う。

use crate::error::{ConfigError, Result};
use cloudbridge_core::ProviderConfig;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

/// 名前付きの接続プロファイル
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    /// プロバイダーファミリー名（ec2, openstack など）
    pub provider: String,

    /// 実装バージョン（省略時は最新）
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<u32>,

    /// プロバイダーに渡す接続設定
    #[serde(flatten)]
    pub settings: ProviderConfig,
}

/// 設定ファイル全体
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileSet {
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,
}

impl ProfileSet {
    /// 名前でプロファイルを取得
    pub fn get(&self, name: &str) -> Result<&Profile> {
        self.profiles
            .get(name)
            .ok_or_else(|| ConfigError::ProfileNotFound(name.to_string()))
    }

    /// プロファイル名の一覧（名前順）
    pub fn names(&self) -> Vec<&str> {
        self.profiles.keys().map(String::as_str).collect()
    }

    fn validate(&self) -> Result<()> {
        for (name, profile) in &self.profiles {
            if profile.provider.trim().is_empty() {
                return Err(ConfigError::InvalidProfile {
                    name: name.clone(),
                    reason: "provider が必要です".to_string(),
                });
            }
            if profile.version == Some(0) {
                return Err(ConfigError::InvalidProfile {
                    name: name.clone(),
                    reason: "version は 1 以上である必要があります".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// YAML ファイルからプロファイルを読み込む
pub fn load_profiles(path: &Path) -> Result<ProfileSet> {
    let content = std::fs::read_to_string(path)?;
    tracing::debug!(path = %path.display(), "Loading profiles");
    parse_profiles(&content)
}

/// YAML 文字列からプロファイルを読み込む
pub fn parse_profiles(content: &str) -> Result<ProfileSet> {
    if content.trim().is_empty() {
        return Ok(ProfileSet::default());
    }

    let set: ProfileSet = serde_yaml::from_str(content)?;
    set.validate()?;
    Ok(set)
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"
profiles:
  aws:
    provider: ec2
    access_key: AKIAEXAMPLE
    secret_key: secret
    region_name: ap-northeast-1
  lab:
    provider: openstack
    version: 1
    access_key: demo
    secret_key: password
    region_endpoint: keystone.example.org
    is_secure: false
    port: 5000
    project_name: demo
"#;

    #[test]
    fn test_parse_profiles() {
        let set = parse_profiles(SAMPLE).unwrap();
        assert_eq!(set.names(), vec!["aws", "lab"]);

        let aws = set.get("aws").unwrap();
        assert_eq!(aws.provider, "ec2");
        assert_eq!(aws.version, None);
        assert_eq!(aws.settings.access_key().unwrap(), "AKIAEXAMPLE");
        assert_eq!(aws.settings.region_name(), "ap-northeast-1");
        assert!(aws.settings.extra.is_empty());

        let lab = set.get("lab").unwrap();
        assert_eq!(lab.provider, "openstack");
        assert_eq!(lab.version, Some(1));
        assert!(!lab.settings.is_secure());
        assert_eq!(lab.settings.port, Some(5000));
        assert_eq!(lab.settings.get("project_name"), Some("demo"));
    }

    #[test]
    fn test_profile_not_found() {
        let set = parse_profiles(SAMPLE).unwrap();
        assert!(matches!(
            set.get("gcp"),
            Err(ConfigError::ProfileNotFound(name)) if name == "gcp"
        ));
    }

    #[test]
    fn test_empty_content() {
        assert!(parse_profiles("").unwrap().profiles.is_empty());
        assert!(parse_profiles("profiles: {}").unwrap().profiles.is_empty());
    }

    #[test]
    fn test_missing_provider_rejected() {
        let content = "profiles:\n  broken:\n    provider: \"\"\n";
        assert!(matches!(
            parse_profiles(content),
            Err(ConfigError::InvalidProfile { name, .. }) if name == "broken"
        ));
    }

    #[test]
    fn test_zero_version_rejected() {
        let content = "profiles:\n  old:\n    provider: ec2\n    version: 0\n";
        assert!(matches!(
            parse_profiles(content),
            Err(ConfigError::InvalidProfile { .. })
        ));
    }

    #[test]
    fn test_non_string_extra_values() {
        let content = "profiles:\n  lab:\n    provider: openstack\n    project_name: 1234\n    verify: true\n";
        let set = parse_profiles(content).unwrap();
        let lab = set.get("lab").unwrap();

        assert_eq!(lab.settings.get("project_name"), Some("1234"));
        assert_eq!(lab.settings.get("verify"), Some("true"));
    }

    #[test]
    fn test_misspelled_field_is_reported_as_unknown() {
        let content = "profiles:\n  aws:\n    provider: ec2\n    regoin_name: eu-west-1\n";
        let set = parse_profiles(content).unwrap();
        let aws = set.get("aws").unwrap();

        assert_eq!(aws.settings.region_name(), "us-east-1");
        assert_eq!(aws.settings.unknown_extras(&[]), vec!["regoin_name"]);
    }

    #[test]
    fn test_invalid_yaml() {
        assert!(matches!(
            parse_profiles("profiles: [unterminated"),
            Err(ConfigError::Yaml(_))
        ));
    }

    #[test]
    fn test_load_profiles_from_file() {
        let temp_dir = tempfile::tempdir().unwrap();
        let path = temp_dir.path().join("cloudbridge.yaml");
        std::fs::write(&path, SAMPLE).unwrap();

        let set = load_profiles(&path).unwrap();
        assert_eq!(set.profiles.len(), 2);
    }
}
