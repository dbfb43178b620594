use std::fs::{self, File};
use std::path::PathBuf;

use clap::Parser;
use log::{info, warn};
use simplelog::{ConfigBuilder, WriteLogger};

use toolshelf::core::catalog;
use toolshelf::core::config::{self, CliOverrides, ResolvedConfig};
use toolshelf::core::ids::RandomIds;
use toolshelf::core::{Action, Store};
use toolshelf::tui;

#[derive(Parser)]
#[command(name = "toolshelf", about = "Terminal catalog of AI tools")]
struct Args {
    /// Catalog file to open (overrides config and TOOLSHELF_CATALOG)
    #[arg(short, long)]
    catalog: Option<PathBuf>,

    /// Do not write the catalog back on exit
    #[arg(long)]
    no_autosave: bool,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Config errors are reported after the logger is up
    let (file_config, config_error) = match config::load_config() {
        Ok(c) => (c, None),
        Err(e) => (Default::default(), Some(e)),
    };
    let mut resolved = config::resolve(
        &file_config,
        &CliOverrides {
            catalog: args.catalog,
            no_autosave: args.no_autosave,
        },
    );

    init_logging(&resolved);
    if let Some(e) = config_error {
        warn!("Ignoring config file: {}", e);
    }
    info!(
        "Toolshelf starting up (catalog: {:?}, autosave: {})",
        resolved.catalog_path, resolved.autosave
    );

    let mut store = open_store(&mut resolved);
    if let Some(open) = resolved.sidebar_open
        && open != store.state().is_sidebar_open
    {
        store.dispatch(Action::ToggleSidebar);
    }

    tui::run(&mut store, &resolved)
}

fn init_logging(config: &ResolvedConfig) {
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Some(parent) = config.log_file.parent()
        && !parent.as_os_str().is_empty()
    {
        let _ = fs::create_dir_all(parent);
    }
    if let Ok(log_file) = File::create(&config.log_file) {
        let _ = WriteLogger::init(config.log_level, log_config, log_file);
    }
}

/// The saved catalog if there is a readable one, else the built-in catalog.
///
/// An unreadable catalog file is never overwritten: autosave is switched
/// off for the session.
fn open_store(config: &mut ResolvedConfig) -> Store {
    let Some(path) = config.catalog_path.clone() else {
        return Store::with_defaults();
    };
    match catalog::load_catalog(&path) {
        Ok(Some(state)) => Store::new(state, Box::new(RandomIds::new())).unwrap_or_else(|e| {
            warn!("Catalog rejected: {}", e);
            config.autosave = false;
            Store::with_defaults()
        }),
        Ok(None) => {
            info!("No saved catalog, starting from the built-in one");
            Store::with_defaults()
        }
        Err(e) => {
            warn!(
                "Failed to load {}: {}, using built-in catalog with autosave off",
                path.display(),
                e
            );
            config.autosave = false;
            Store::with_defaults()
        }
    }
}
