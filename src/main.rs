use std::path::{Path, PathBuf};

use storefront_catalog::catalog::{Catalog, CatalogItem, FACET_COLOR, FACET_SIZE};
use storefront_catalog::cli::{Cli, Commands, ConfigAction, FilterArgs};
use storefront_catalog::config::Config;
use storefront_catalog::error::{CatalogError, Result};
use storefront_catalog::export;
use storefront_catalog::filtering::{
    build_predicate, distinct_categories, facet_values, price_bounds, sorted_view, status_counts,
    CatalogPipeline, Page, SortSpec,
};

fn main() -> Result<()> {
    let cli = Cli::parse_args();

    init_logging(cli.verbose);

    let profile = cli.profile.as_deref();

    match cli.command {
        Commands::Query {
            catalog,
            filters,
            sort,
            page,
            page_size,
            json,
        } => {
            let config = Config::resolve(cli.config.as_deref(), profile)?;
            cmd_query(&config, &catalog, &filters, sort, page, page_size, json)?;
        }
        Commands::Facets { catalog } => {
            cmd_facets(&catalog)?;
        }
        Commands::Export {
            catalog,
            filters,
            sort,
            format,
            output,
        } => {
            let config = Config::resolve(cli.config.as_deref(), profile)?;
            cmd_export(&config, &catalog, &filters, sort, format, output)?;
        }
        Commands::Config { action } => {
            cmd_config(cli.config, profile, action)?;
        }
    }

    Ok(())
}

fn init_logging(verbose: bool) {
    use tracing_subscriber::{fmt, EnvFilter};

    let default = if verbose {
        "storefront_catalog=debug"
    } else {
        "storefront_catalog=info"
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_sort(config: &Config, sort: Option<String>) -> SortSpec {
    match sort {
        Some(option) => {
            let spec = SortSpec::parse(&option);
            if spec == SortSpec::Featured && !option.eq_ignore_ascii_case("featured") {
                tracing::warn!("Unknown sort option '{}', using featured", option);
            }
            spec
        }
        None => config.default_sort(),
    }
}

fn cmd_query(
    config: &Config,
    catalog_path: &Path,
    filters: &FilterArgs,
    sort: Option<String>,
    page: usize,
    page_size: Option<usize>,
    json: bool,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let criteria = filters.to_criteria(chrono::Utc::now())?;
    let sort = resolve_sort(config, sort);

    let pipeline = CatalogPipeline::new(config.pagination.clone());
    let (page, stats) = pipeline.run(catalog.items(), &criteria, &sort, page, page_size)?;

    tracing::info!(
        "Matched {} of {} items in {}us",
        stats.filtered_items,
        stats.input_items,
        stats.processing_time_us
    );

    if json {
        println!("{}", export::to_json(&page)?);
        return Ok(());
    }

    print_page(&page);

    let active = criteria.active_filter_count(config.filters.price_min, config.filters.price_max);
    if active > 0 {
        println!(
            "  ({} active filter{})",
            active,
            if active == 1 { "" } else { "s" }
        );
    }

    Ok(())
}

fn print_page(page: &Page<CatalogItem>) {
    if page.items.is_empty() {
        println!("No items match the current filters.");
    }

    for item in &page.items {
        let price = if item.has_discount() {
            format!("{:.2} (was {:.2})", item.effective_price(), item.price)
        } else {
            format!("{:.2}", item.price)
        };
        println!(
            "  {:<10} {:<32} {:<14} {:<18} {}",
            item.id, item.name, item.category, price, item.status
        );
    }

    println!(
        "\nPage {} of {} ({} items){}{}",
        page.page_number,
        page.total_pages,
        page.total_items,
        if page.has_previous { "  [prev]" } else { "" },
        if page.has_next { "  [next]" } else { "" },
    );
}

fn cmd_facets(catalog_path: &Path) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let items = catalog.items();

    println!("Catalog Facets");
    println!("==============");
    println!("\nItems: {}", items.len());
    println!("Categories: {}", distinct_categories(items).join(", "));
    println!("Sizes: {}", facet_values(items, FACET_SIZE).join(", "));
    println!("Colors: {}", facet_values(items, FACET_COLOR).join(", "));

    if let Some((low, high)) = price_bounds(items) {
        println!("Price range: {:.2} - {:.2}", low, high);
    }

    println!("\nStatus counts:");
    for (status, count) in status_counts(items) {
        println!("  {:<18} {}", status, count);
    }

    Ok(())
}

fn cmd_export(
    config: &Config,
    catalog_path: &Path,
    filters: &FilterArgs,
    sort: Option<String>,
    format: Option<String>,
    output: Option<PathBuf>,
) -> Result<()> {
    let catalog = Catalog::load(catalog_path)?;
    let criteria = filters.to_criteria(chrono::Utc::now())?;
    let sort = resolve_sort(config, sort);

    let predicate = build_predicate(&criteria);
    let filtered: Vec<&CatalogItem> = catalog.items().iter().filter(|i| predicate(*i)).collect();
    let rows: Vec<CatalogItem> = sorted_view(&filtered, &sort).into_iter().cloned().collect();

    let format = format.unwrap_or_else(|| config.export.default_format.clone());
    let rendered = match format.as_str() {
        "json" => export::to_json(rows.as_slice())?,
        _ => export::to_csv(&rows),
    };

    match output {
        Some(path) => {
            std::fs::write(&path, rendered).map_err(|e| CatalogError::Io {
                source: e,
                context: format!("Failed to write export file: {:?}", path),
            })?;
            println!("✓ Exported {} items to {}", rows.len(), path.display());
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

fn cmd_config(config_path: Option<PathBuf>, profile: Option<&str>, action: ConfigAction) -> Result<()> {
    match action {
        ConfigAction::Show => {
            let config = Config::resolve(config_path.as_deref(), profile)?;
            let content = toml::to_string_pretty(&config)?;
            println!("{}", content);
        }
        ConfigAction::Validate { file } => {
            let path = match file.or(config_path) {
                Some(path) => path,
                None => Config::default_path()?,
            };
            let config = Config::load(&path)?;
            println!("✓ Configuration is valid");
            println!("  Schema version: {}", config.meta.schema_version);
            println!("  Profiles: {}", config.profiles.len());
        }
        ConfigAction::Init { force } => {
            let path = match config_path {
                Some(path) => path,
                None => Config::default_path()?,
            };

            if path.exists() && !force {
                println!("Configuration file already exists at: {}", path.display());
                println!("Use --force to overwrite");
                return Ok(());
            }

            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent).map_err(|e| CatalogError::Io {
                    source: e,
                    context: format!("Failed to create config directory: {:?}", parent),
                })?;
            }

            Config::default().save(&path)?;
            println!("✓ Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}
