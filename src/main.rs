use anyhow::Result;
use tracing::info;
use tracing_subscriber::filter::EnvFilter;

fn main() -> Result<()> {
    // Logs go to stderr; stdout carries the resolved configuration document.
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive("brewenv=info".parse().expect("Directive should parse"))
                .from_env_lossy(),
        )
        .init();

    let settings = brewenv::load_settings()?;
    info!(
        "☕ Configuration resolved for a {} build",
        if settings.production { "production" } else { "development" }
    );
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}
