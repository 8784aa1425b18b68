use colored::Colorize;

pub fn handle(name: &str, version: Option<u32>) -> anyhow::Result<()> {
    let factory = cloudbridge::default_factory()?;

    match factory.find_provider_impl(name, version) {
        Some(identifier) => {
            println!("{}", identifier);
        }
        None => {
            let requested = match version {
                Some(v) => format!("{} (v{})", name, v),
                None => name.to_string(),
            };
            eprintln!(
                "{}",
                format!("✗ プロバイダーが見つかりません: {}", requested)
                    .red()
                    .bold()
            );

            let available: Vec<&str> = factory
                .list_providers()
                .iter()
                .map(|p| p.name.as_str())
                .collect();
            eprintln!("  利用可能: {}", available.join(", "));
            std::process::exit(1);
        }
    }

    Ok(())
}
