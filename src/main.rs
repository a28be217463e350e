mod cli;

use anyhow::Context;
use clap::Parser;
use cli::{CheckPasteArgs, Cli, Commands, InspectArgs, SplitArgs};
use docx_splitter::{
    ArchiveWriter, ClientConfig, HttpSplitterClient, PasteParser, SplitterController,
    UploadCandidate, CLIENT_DEFAULTS,
};
use tokio::io::AsyncReadExt;
use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    let result = match &cli.command {
        Commands::Inspect(args) => handle_inspect_command(args, &cli).await,
        Commands::Split(args) => handle_split_command(args, &cli).await,
        Commands::CheckPaste(args) => handle_check_paste_command(args).await,
    };

    if let Err(e) = result {
        error!("Operation failed: {:#}", e);
        std::process::exit(1);
    }

    Ok(())
}

fn build_config(cli: &Cli, force: bool) -> anyhow::Result<ClientConfig> {
    ClientConfig::new(&cli.server, cli.output.clone(), force)
        .with_context(|| format!("Invalid server address '{}'", cli.server))
}

async fn handle_inspect_command(args: &InspectArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli, false)?;
    let mut controller = SplitterController::new(HttpSplitterClient::new(config));

    let candidate = UploadCandidate::from_path(&args.file).await?;
    let session = controller.upload(candidate).await?.clone();

    println!("\n=== Upload '{}' ===", args.file.display());
    println!("Session: {}", session.session_id.as_deref().unwrap_or("-"));
    println!("Total pages: {}", session.total_pages);
    if let Some(status) = controller.status() {
        println!("{}", status.text);
    }

    Ok(())
}

async fn handle_split_command(args: &SplitArgs, cli: &Cli) -> anyhow::Result<()> {
    let config = build_config(cli, args.force)?;

    // Check the archive target before any work is done
    ArchiveWriter::check_target(&config.output_dir, CLIENT_DEFAULTS.archive_name, config.force)?;

    let mut controller = SplitterController::new(HttpSplitterClient::new(config.clone()));

    let candidate = UploadCandidate::from_path(&args.file).await?;
    let total_pages = controller.upload(candidate).await?.total_pages;
    info!("Document has {} pages", total_pages);

    if let Some(count) = args.generate {
        let status = controller.generate_rows(count)?;
        info!("{}", status.text);
    }

    if let Some(source) = &args.paste {
        let text = read_source(source).await?;
        controller.set_paste_data(text);
        let result = controller.apply_pasted_data()?;
        for line_error in &result.errors {
            warn!("Skipped {}", line_error);
        }
        if let Some(status) = controller.bulk_status() {
            info!("{}", status.text);
        }
    }

    for row in &args.rows {
        let id = controller.add_row()?;
        controller.set_filename(id, &row.filename)?;
        let start = controller.set_start_page(id, row.start)?;
        let end = controller.set_end_page(id, row.end)?;
        if i64::from(start) != row.start || i64::from(end) != row.end {
            warn!(
                "Row '{}' adjusted to pages {}-{} (document has {} pages)",
                row.filename, start, end, total_pages
            );
        }
    }

    println!("\nSplit configuration:");
    for (idx, entry) in controller.table().entries().enumerate() {
        println!(
            "  {}. {}: Pages {}-{}",
            idx + 1,
            entry.filename,
            entry.start_page,
            entry.end_page
        );
    }

    let outcome = controller.submit().await?;
    let saved = ArchiveWriter::save(&outcome, &config.output_dir, config.force).await?;

    println!("\n=== Results ===");
    println!("{}", outcome.headline);
    for item in &outcome.results {
        println!("  ✓ {} ({})", item.filename, item.message);
    }
    println!("Archive: {}", saved.display());
    println!("Completed at {}", outcome.completed_at.to_rfc3339());

    Ok(())
}

async fn handle_check_paste_command(args: &CheckPasteArgs) -> anyhow::Result<()> {
    let text = read_source(&args.source).await?;
    let parsed = PasteParser::new().parse(&text, args.pages)?;

    println!("\n=== Paste check ({} pages) ===", args.pages);
    println!("Importable rows: {}", parsed.entries.len());
    for entry in &parsed.entries {
        println!("  - {}: Pages {}-{}", entry.filename, entry.start_page, entry.end_page);
    }

    if !parsed.errors.is_empty() {
        println!("Skipped rows:");
        for line_error in &parsed.errors {
            println!("  - {}", line_error);
        }
    }

    if let Some(json_path) = &args.json_output {
        let json_content = serde_json::to_string_pretty(&parsed)
            .context("Failed to serialize paste report")?;

        tokio::fs::write(json_path, json_content)
            .await
            .context("Failed to write JSON paste report")?;

        info!("Paste report written to: {}", json_path.display());
    }

    if parsed.entries.is_empty() {
        anyhow::bail!("No rows could be imported");
    }

    Ok(())
}

async fn read_source(source: &str) -> anyhow::Result<String> {
    if source == "-" {
        let mut text = String::new();
        tokio::io::stdin()
            .read_to_string(&mut text)
            .await
            .context("Failed to read pasted data from stdin")?;
        return Ok(text);
    }

    tokio::fs::read_to_string(source)
        .await
        .with_context(|| format!("Failed to read pasted data from {}", source))
}
