mod cli;

use std::path::Path;
use std::time::Duration;

use ad_core::config::Config;
use ad_services::{NewEvent, NewImage, PageRequest, Services};
use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};

fn run_demo(services: &Services, extra: usize, page_size: i32) -> Result<()> {
    let event = services.events.create(NewEvent::new(
        "users/anonymous",
        "animal-classifier",
        "classify",
        Duration::from_millis(1500),
    ))?;
    println!("Created event: {}", event.name);

    for i in 0..extra {
        services.events.create(NewEvent::new(
            "users/anonymous",
            "animal-classifier",
            format!("classify-{}", i + 1),
            Duration::from_millis(100 * (i as u64 + 1)),
        ))?;
    }

    let mut request = PageRequest::new(page_size);
    let mut total = 0;
    let mut pages = 0;
    loop {
        let page = services.events.list(&request);
        pages += 1;
        for event in &page.items {
            println!(
                "  - {}: {}/{} (took {:?})",
                event.name, event.source, event.action, event.execution_duration
            );
            total += 1;
        }
        match page.next_page_token {
            Some(token) => request = PageRequest::new(page_size).with_token(token),
            None => break,
        }
    }

    println!("Found {total} events across {pages} page(s)");
    Ok(())
}

fn run_preview(services: &Services, input: &Path, output: &Path) -> Result<()> {
    let data = std::fs::read(input)
        .with_context(|| format!("Failed to read image {}", input.display()))?;
    let filename = input
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();

    let image = services
        .images
        .create(NewImage::new(filename, data))
        .with_context(|| format!("Failed to create image from {}", input.display()))?;

    std::fs::write(output, &image.preview.data)
        .with_context(|| format!("Failed to write preview {}", output.display()))?;

    let summary = serde_json::json!({
        "name": image.name,
        "filename": image.filename,
        "mime_type": image.mime_type,
        "size_bytes": image.size_bytes,
        "create_time": image.create_time,
        "preview": {
            "mime_type": image.preview.mime_type,
            "width": image.preview.width,
            "height": image.preview.height,
            "size_bytes": image.preview.data.len(),
            "path": output.display().to_string(),
        },
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let Some(path) = path else {
        println!("No config file given; defaults are valid");
        return Ok(());
    };

    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    let config = Config::from_json(&contents)
        .with_context(|| format!("Invalid config {}", path.display()))?;

    let warnings = config.validate();
    if warnings.is_empty() {
        println!("Configuration is valid");
    } else {
        println!("Configuration is valid with {} warning(s):", warnings.len());
        for warning in warnings {
            println!("  - {warning}");
        }
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = Config::load_or_default(cli.config.as_deref());

    // Initialize logging
    // Respect RUST_LOG env var if set, otherwise use the verbose flag or config
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "apidemo=trace,ad_services=trace,ad_store=trace,ad_preview=trace,ad_core=debug"
                .to_string()
        } else {
            config.logging.filter.clone()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(filter = %env_filter, "Logging initialized");

    match cli.command {
        Commands::Demo { extra, page_size } => {
            let services = Services::from_config(&config);
            run_demo(&services, extra, page_size)
        }
        Commands::Preview { input, output } => {
            let services = Services::from_config(&config);
            run_preview(&services, &input, &output)
        }
        Commands::Validate { config: path } => {
            validate_config(path.as_deref().or(cli.config.as_deref()))
        }
        Commands::Version => {
            println!("apidemo {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}
