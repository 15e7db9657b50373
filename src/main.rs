mod cli;

use introgate::{
    config,
    host::{Catalog, ItemStore, LibraryManager, MemoryHost, User},
    IntroFilterProvider,
};
use introgate_common::{ItemId, UserId};

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Commands};
use serde::Serialize;
use std::path::Path;
use std::sync::Arc;

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Respect RUST_LOG env var if set, otherwise use defaults based on verbose flag
    let env_filter = std::env::var("RUST_LOG").unwrap_or_else(|_| {
        if cli.verbose {
            "introgate=trace,introgate_common=debug".to_string()
        } else {
            "introgate=info".to_string()
        }
    });

    tracing_subscriber::fmt()
        .with_env_filter(&env_filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Validate {
            config: config_path,
        } => {
            let path = config_path.or(cli.config);
            validate_config(path.as_deref())
        }
        Commands::Libraries { catalog } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(list_libraries(&catalog, cli.config.as_deref()))
        }
        Commands::Decide {
            catalog,
            item,
            user,
            json,
        } => {
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(decide(&catalog, cli.config.as_deref(), item, user, json))
        }
        Commands::Version => {
            println!("introgate {}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
    }
}

fn load_host(catalog: &Path) -> Result<Arc<MemoryHost>> {
    let catalog = Catalog::load(catalog)
        .with_context(|| format!("Failed to load catalog: {:?}", catalog))?;
    Ok(Arc::new(MemoryHost::new(catalog)))
}

fn validate_config(path: Option<&Path>) -> Result<()> {
    let config = match path {
        Some(p) => {
            println!("Validating config: {:?}", p);
            config::load_config(p)?
        }
        None => {
            println!("No config file specified, using defaults");
            config::Config::default()
        }
    };

    let targets = config.intros.target_libraries();
    println!("✓ Configuration is valid");
    if targets.is_empty() {
        println!("  Included libraries: all movie libraries");
    } else {
        println!("  Included libraries: {}", targets.names().join(", "));
    }
    for warning in config::config_warnings(&config) {
        println!("  Warning: {}", warning);
    }

    Ok(())
}

async fn list_libraries(catalog: &Path, config_path: Option<&Path>) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let targets = config.intros.target_libraries();
    let host = load_host(catalog)?;

    let libraries = host.libraries().await?;
    let movie_libraries: Vec<_> = libraries.iter().filter(|l| l.is_movie_library()).collect();

    println!("Movie libraries: {}", movie_libraries.len());
    for library in movie_libraries {
        let status = if targets.allows(library) {
            "intros"
        } else {
            "skipped"
        };
        println!("  [{}] {} ({})", status, library.name, library.id);
    }

    for name in targets.missing_from(&libraries) {
        println!("  Warning: configured library '{}' not found", name);
    }

    Ok(())
}

#[derive(Serialize)]
struct DecideReport<'a> {
    item: ItemId,
    decision: &'a introgate::Decision,
    intros: &'a [introgate::host::IntroReference],
}

async fn decide(
    catalog: &Path,
    config_path: Option<&Path>,
    item_id: ItemId,
    user_id: Option<UserId>,
    json: bool,
) -> Result<()> {
    let config = config::load_config_or_default(config_path)?;
    let host = load_host(catalog)?;

    let item = host
        .get_item(item_id)
        .await?
        .with_context(|| format!("Item {} is not in the catalog", item_id))?;
    let user = User {
        id: user_id.unwrap_or_default(),
        name: String::new(),
    };

    let provider =
        IntroFilterProvider::new(&config.intros, host.clone(), host.clone(), host.clone());
    let (decision, intros) = provider.decide_with_reason(&item, &user).await;

    if json {
        let report = DecideReport {
            item: item.id,
            decision: &decision,
            intros: &intros,
        };
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Item: {} ({}, {})", item.name, item.kind, item.id);
        println!("Decision: {}", decision);
        println!("Intros: {}", intros.len());
        for intro in &intros {
            match (&intro.path, intro.item_id) {
                (Some(path), _) => println!("  {}", path.display()),
                (None, Some(id)) => println!("  item {}", id),
                (None, None) => println!("  (empty reference)"),
            }
        }
    }

    Ok(())
}
