use colored::Colorize;
use std::path::Path;

pub async fn handle(profile_name: &str, config_path: Option<&Path>) -> anyhow::Result<()> {
    let profiles = match config_path {
        Some(path) => cloudbridge_config::load_profiles(path)?,
        None => cloudbridge_config::load_default_profiles()?,
    };
    let profile = profiles.get(profile_name)?;

    tracing::debug!(
        profile = %profile_name,
        provider = %profile.provider,
        version = ?profile.version,
        "Resolved profile"
    );

    let factory = cloudbridge::default_factory()?;
    let provider = match factory.create_provider(&profile.provider, &profile.settings, profile.version)
    {
        Ok(provider) => provider,
        Err(e) => {
            eprintln!(
                "{}",
                format!("✗ プロバイダーを初期化できません: {}", profile_name)
                    .red()
                    .bold()
            );
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    let key_pairs = match provider.security().list_key_pairs().await {
        Ok(key_pairs) => key_pairs,
        Err(e) => {
            eprintln!("{}", "✗ キーペアを取得できません".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    };

    println!(
        "{} ({})",
        profile_name.cyan().bold(),
        provider.display_name()
    );
    if key_pairs.is_empty() {
        println!("  {}", "(キーペアなし)".dimmed());
    }
    for key_pair in &key_pairs {
        match &key_pair.fingerprint {
            Some(fp) => println!("  - {}  {}", key_pair.name, fp.dimmed()),
            None => println!("  - {}", key_pair.name),
        }
    }

    Ok(())
}
