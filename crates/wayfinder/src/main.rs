//! Wayfinder CLI
//!
//! Formats a route file into the menu a principal would see, or resolves
//! the breadcrumb trail for one location.
//!
//! Usage:
//!   wayfinder --routes config/routes.yaml --grant user --locale locales/en-US.json
//!   wayfinder --routes config/routes.yaml --breadcrumb /list/search/articles

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

use wayfinder::source::read_source;
use wayfinder::{
    Authority, Localizer, MenuPipeline, MenuSettings, MessageCatalog, Passthrough, Principal,
    RawMenuNode,
};

/// Command-line arguments.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Route tree file (.json, .yaml or .yml).
    #[arg(long)]
    routes: PathBuf,

    /// Authority applied to top-level routes that declare none.
    #[arg(long, value_delimiter = ',')]
    authority: Vec<String>,

    /// Authorities granted to the current principal.
    #[arg(long, value_delimiter = ',')]
    grant: Vec<String>,

    /// Treat the principal as a superuser.
    #[arg(long)]
    superuser: bool,

    /// Message catalog for menu labels (.json, .yaml or .yml).
    #[arg(long)]
    locale: Option<PathBuf>,

    /// Use raw route names as labels.
    #[arg(long)]
    disable_locale: bool,

    /// Print the breadcrumb trail for this location instead of the menu.
    #[arg(long)]
    breadcrumb: Option<String>,
}

fn main() -> Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_tracing();

    let args = Args::parse();

    let mut settings = MenuSettings::from_env().context("failed to load menu settings")?;
    if args.disable_locale {
        settings.disable_locale = true;
    }

    let localizer: Arc<dyn Localizer> = match &args.locale {
        Some(path) => Arc::new(
            MessageCatalog::load(path)
                .with_context(|| format!("failed to load locale file {}", path.display()))?,
        ),
        None => Arc::new(Passthrough),
    };

    let routes: Vec<RawMenuNode> = read_source(&args.routes)
        .with_context(|| format!("failed to load routes from {}", args.routes.display()))?;
    info!(routes = routes.len(), "Routes loaded");

    let principal = if args.superuser {
        Principal::superuser()
    } else {
        Principal::new(args.grant.iter().cloned())
    };

    let root_authority = root_authority(args.authority);
    let pipeline = MenuPipeline::new(settings, localizer);
    let settings = pipeline.formatter().settings();
    info!(
        disable_locale = settings.disable_locale,
        root_locale = %settings.root_locale,
        "Menu settings"
    );
    let state = pipeline.compute(&routes, root_authority.as_ref(), &principal);

    let output = match &args.breadcrumb {
        Some(location) => {
            let trail = state.breadcrumb_map.trail(location);
            info!(location = %location, depth = trail.len(), "Breadcrumb resolved");
            serde_json::to_string_pretty(&trail)
        }
        None => serde_json::to_string_pretty(&state.menu_data),
    }
    .context("failed to serialize output")?;

    println!("{output}");
    Ok(())
}

fn root_authority(mut names: Vec<String>) -> Option<Authority> {
    match names.len() {
        0 => None,
        1 => names.pop().map(Authority::One),
        _ => Some(Authority::AnyOf(names)),
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
