use colored::Colorize;

pub fn handle() -> anyhow::Result<()> {
    println!("{}", "実装を検証中...".blue());

    let factory = cloudbridge::default_factory()?;

    match factory.get_all_provider_classes() {
        Ok(classes) => {
            for class in &classes {
                println!(
                    "  {} {} ({})",
                    "✓".green(),
                    class.identifier(),
                    class.cloud_type().cyan()
                );
            }
            println!();
            println!(
                "{}",
                format!("✓ {}個の実装をすべてロードできました", classes.len())
                    .green()
                    .bold()
            );
        }
        Err(e) => {
            eprintln!();
            eprintln!("{}", "✗ ロードできない実装があります".red().bold());
            eprintln!("  {}", e);
            std::process::exit(1);
        }
    }

    Ok(())
}
