use colored::Colorize;

pub fn handle(json: bool) -> anyhow::Result<()> {
    let registry = cloudbridge::default_registry()?;

    if json {
        println!("{}", serde_json::to_string_pretty(registry.list_providers())?);
        return Ok(());
    }

    let loader = cloudbridge::default_loader()?;

    println!("{}", "登録済みプロバイダー:".bold());
    for provider in registry.list_providers() {
        println!("  {}", provider.name.cyan().bold());
        for entry in &provider.implementations {
            let status = if loader.contains(entry.identifier.as_str()) {
                "✓".green()
            } else {
                "✗ (このビルドには含まれていません)".yellow()
            };
            println!(
                "    v{}  {}  {}",
                entry.version,
                entry.identifier.to_string().dimmed(),
                status
            );
        }
    }

    Ok(())
}
