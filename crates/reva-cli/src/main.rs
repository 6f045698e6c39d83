use std::io::Write;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::Context;
use clap::{Parser, Subcommand};
use indicatif::{ProgressBar, ProgressStyle};
use reva_core::config_file;
use reva_core::screens::{self, ScreenKind};
use reva_core::{CatalogBackend, Config, HttpCatalog, PdfGenerationRequest, Session, filter, pdf};
use tokio_util::sync::CancellationToken;

mod output;

use output::ColorMode;

/// Reva - browse the wedding-decoration catalog and export a selection as PDF
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    /// Backend base URL including the API prefix (e.g. http://localhost:8080/api/v1)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Per-request timeout in seconds
    #[arg(long, global = true)]
    timeout: Option<u64>,

    /// Disable colored output
    #[arg(long, global = true)]
    no_color: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List events, optionally filtered by name or description
    Events {
        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Search events by name on the backend
    Search { query: String },

    /// Show one event
    Event { id: i64 },

    /// List the decoration types of an event, or of the whole catalog
    Types {
        event_id: Option<i64>,

        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// List the images of a decoration type, or of the whole catalog
    Images {
        decoration_type_id: Option<i64>,

        #[arg(short, long, default_value = "")]
        query: String,
    },

    /// Show one image
    Image { id: i64 },

    /// Select images of a decoration type and download them as a PDF
    Export {
        decoration_type_id: i64,

        /// Comma-separated image ids to select
        #[arg(long, value_delimiter = ',', required = true)]
        select: Vec<i64>,

        /// Directory to write the PDF into
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Use the base64 endpoint instead of the binary one
        #[arg(long)]
        base64: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .init();

    let cli = Cli::parse();

    // Resolve configuration: CLI flags > env vars > config files > defaults
    let mut config = config_file::load_config().to_config();
    config_file::apply_env(&mut config);
    if let Some(url) = cli.api_url {
        config.base_url = url;
    }
    if let Some(secs) = cli.timeout {
        config.timeout_secs = secs;
    }
    tracing::debug!(base_url = %config.base_url, timeout = config.timeout_secs, "resolved config");

    let backend = HttpCatalog::from_config(&config)?;
    let color = ColorMode(!cli.no_color);
    let mut out = std::io::stdout().lock();

    match cli.command {
        Command::Events { query } => list_events(&backend, &query, &mut out, color).await,
        Command::Search { query } => search(&backend, &query, &mut out, color).await,
        Command::Event { id } => show_event(&backend, id, &mut out, color).await,
        Command::Types { event_id, query } => {
            list_types(&backend, event_id, &query, &mut out, color).await
        }
        Command::Images {
            decoration_type_id,
            query,
        } => list_images(&backend, decoration_type_id, &query, &mut out, color).await,
        Command::Image { id } => show_image(&backend, id, &mut out, color).await,
        Command::Export {
            decoration_type_id,
            select,
            output,
            base64,
        } => {
            export(
                &backend,
                &config,
                decoration_type_id,
                &select,
                output,
                base64,
                &mut out,
                color,
            )
            .await
        }
    }
}

async fn list_events(
    backend: &dyn CatalogBackend,
    query: &str,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let events = ScreenKind::Events
        .into_message(screens::load_events(backend, &CancellationToken::new()).await)
        .map_err(anyhow::Error::msg)?;
    output::print_events(out, &filter(&events, query), query, color)?;
    Ok(())
}

async fn search(
    backend: &dyn CatalogBackend,
    query: &str,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let events = backend
        .search_events(query)
        .await?
        .into_result()
        .context("Failed to search events")?;
    let hits: Vec<_> = events.iter().collect();
    output::print_events(out, &hits, query, color)?;
    Ok(())
}

async fn show_event(
    backend: &dyn CatalogBackend,
    id: i64,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let event = backend.event(id).await?.into_result()?;
    output::print_event_detail(out, &event, color)?;
    Ok(())
}

async fn list_types(
    backend: &dyn CatalogBackend,
    event_id: Option<i64>,
    query: &str,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let Some(event_id) = event_id else {
        let types = backend
            .decoration_types()
            .await?
            .into_result()
            .context("Failed to fetch decoration types")?;
        output::print_decoration_types(out, "", &filter(&types, query), query, color)?;
        return Ok(());
    };
    let view = ScreenKind::DecorationTypes
        .into_message(
            screens::load_decoration_types(backend, event_id, &CancellationToken::new()).await,
        )
        .map_err(anyhow::Error::msg)?;
    output::print_decoration_types(
        out,
        view.event_name(),
        &filter(&view.decoration_types, query),
        query,
        color,
    )?;
    Ok(())
}

async fn list_images(
    backend: &dyn CatalogBackend,
    decoration_type_id: Option<i64>,
    query: &str,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let Some(decoration_type_id) = decoration_type_id else {
        let images = backend
            .decoration_images()
            .await?
            .into_result()
            .context("Failed to fetch images")?;
        output::print_images(out, "", &filter(&images, query), query, color)?;
        return Ok(());
    };
    let view = ScreenKind::Gallery
        .into_message(
            screens::load_gallery(backend, decoration_type_id, &CancellationToken::new()).await,
        )
        .map_err(anyhow::Error::msg)?;
    output::print_images(
        out,
        view.decoration_type_name(),
        &filter(&view.images, query),
        query,
        color,
    )?;
    Ok(())
}

async fn show_image(
    backend: &dyn CatalogBackend,
    id: i64,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let image = backend.decoration_image(id).await?.into_result()?;
    output::print_image_detail(out, &image, color)?;
    Ok(())
}

#[allow(clippy::too_many_arguments)]
async fn export(
    backend: &dyn CatalogBackend,
    config: &Config,
    decoration_type_id: i64,
    select: &[i64],
    output_dir: Option<PathBuf>,
    base64: bool,
    out: &mut dyn Write,
    color: ColorMode,
) -> anyhow::Result<()> {
    let view = ScreenKind::Gallery
        .into_message(
            screens::load_gallery(backend, decoration_type_id, &CancellationToken::new()).await,
        )
        .map_err(anyhow::Error::msg)?;

    let mut session = Session::started();
    let selection = session.selection_mut()?;
    for id in select {
        match view.images.iter().find(|img| img.id == *id) {
            Some(image) => selection.add(image, view.decoration_type_name()),
            None => tracing::warn!(
                image_id = id,
                decoration_type_id,
                "image not in this gallery, skipping"
            ),
        }
    }

    let (event_id, event_name) = view.event_ref();
    let request = PdfGenerationRequest::from_selection(event_id, event_name, selection)?;
    output::print_selection(out, selection, color)?;

    let dir = output_dir.unwrap_or_else(|| config.output_dir.clone());
    let file_name = pdf::export_file_name(view.decoration_type_name(), event_name);

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(
        ProgressStyle::with_template("{spinner:.cyan} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    spinner.set_message("Generating PDF...");
    spinner.enable_steady_tick(Duration::from_millis(120));

    let result = if base64 || config.use_base64 {
        pdf::export_pdf_base64(backend, &request, &dir, &file_name).await
    } else {
        pdf::export_pdf(backend, &request, &dir, &file_name).await
    };
    spinner.finish_and_clear();

    let path = result.context("Failed to generate PDF. Please try again.")?;
    output::print_export_done(out, &path, color)?;
    session.end();
    Ok(())
}
