//! Command-line front end: load backend records into SQLite and render
//! listing pages.

use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;

use clap::{Parser, Subcommand};
use dotenvy::dotenv;
use thiserror::Error;

use pushkind_fieldservice::columns::default_headers;
use pushkind_fieldservice::controller::{ListingController, ListingOutcome};
use pushkind_fieldservice::db::{establish_connection_pool, run_migrations};
use pushkind_fieldservice::domain::Domain;
use pushkind_fieldservice::domain::filter::FilterCriteria;
use pushkind_fieldservice::domain::record::RawRecord;
use pushkind_fieldservice::dto::listing::ListingRequest;
use pushkind_fieldservice::models::config::DashboardConfig;
use pushkind_fieldservice::pagination::{PageControl, Paginator};
use pushkind_fieldservice::repository::DieselQueryPort;
use pushkind_fieldservice::repository::errors::RepositoryError;
use pushkind_fieldservice::services::fetch_listing;

#[derive(Parser)]
#[command(name = "pushkind-fieldservice")]
#[command(about = "Filtered listings for the field-service dashboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Directory holding `default.yaml` and per-environment overrides.
    #[arg(long, default_value = "config", global = true)]
    config_dir: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Stores a JSON array of backend records for a domain.
    Import {
        domain: Domain,
        file: PathBuf,

        /// Drop the domain's existing records first.
        #[arg(long)]
        replace: bool,
    },

    /// Prints one page of a domain's listing as HTML.
    List {
        domain: Domain,

        #[arg(default_value_t = 1)]
        page: usize,

        /// JSON file with filter criteria.
        filters: Option<PathBuf>,

        /// Print the page as JSON instead of HTML.
        #[arg(long)]
        json: bool,
    },
}

#[derive(Debug, Error)]
enum CliError {
    #[error("Failed to read {0}: {1}")]
    Read(PathBuf, std::io::Error),

    #[error("Invalid JSON in {0}: {1}")]
    Json(PathBuf, serde_json::Error),

    #[error(transparent)]
    Repository(#[from] RepositoryError),

    #[error("{0}")]
    Listing(String),

    #[error("Failed to render output: {0}")]
    Render(String),

    #[error("Page {0} is out of range")]
    PageOverflow(usize),

    #[error("Page {page} is out of range: the listing has {total_pages} page(s)")]
    PageOutOfRange { page: usize, total_pages: usize },
}

fn check_page(page: usize, total_pages: usize) -> Result<(), CliError> {
    let page = page.max(1);
    if page > total_pages {
        return Err(CliError::PageOutOfRange { page, total_pages });
    }
    Ok(())
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = fs::read_to_string(path).map_err(|e| CliError::Read(path.to_path_buf(), e))?;
    serde_json::from_str(&contents).map_err(|e| CliError::Json(path.to_path_buf(), e))
}

fn import(port: &DieselQueryPort, domain: Domain, file: &Path, replace: bool) -> Result<(), CliError> {
    let records: Vec<RawRecord> = read_json(file)?;
    if replace {
        let removed = port.clear_domain(domain)?;
        log::info!("Removed {removed} existing {domain}");
    }
    let inserted = port.insert_records(domain, &records)?;
    log::info!("Imported {inserted} {domain} from {}", file.display());
    Ok(())
}

fn controls_line(controls: &[PageControl]) -> String {
    controls
        .iter()
        .filter(|control| control.is_enabled())
        .map(|control| match control {
            PageControl::Page { active: true, .. } => format!("[{}]", control.label()),
            _ => control.label(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn list(
    port: &DieselQueryPort,
    config: &DashboardConfig,
    domain: Domain,
    page: usize,
    filters: Option<&Path>,
    json: bool,
) -> Result<(), CliError> {
    let filters = match filters {
        Some(path) => read_json::<FilterCriteria>(path)?,
        None => FilterCriteria::default(),
    };
    let mut controller = ListingController::new(domain).with_debounce(config.debounce());
    controller.edit_filters(Instant::now(), filters);
    let filters = controller.submit_filters().unwrap_or_default();
    let request = ListingRequest::page(filters, config.page_size, page)
        .ok_or(CliError::PageOverflow(page))?;

    let token = controller.begin();
    let result = fetch_listing(domain, port, config.reference_offset(), &request);
    let outcome = controller.complete(token, result);

    let headers = default_headers(domain);
    let table = controller
        .table(&headers, &outcome)
        .ok_or_else(|| CliError::Listing("Listing request was superseded".to_string()))?;

    match &outcome {
        ListingOutcome::Rendered(listing) => {
            check_page(page, listing.total_pages)?;
            if json {
                let body = serde_json::to_string_pretty(listing)
                    .map_err(|e| CliError::Render(e.to_string()))?;
                println!("{body}");
                return Ok(());
            }
            let mut paginator = Paginator::new(listing.total_count, config.page_size, |offset| {
                log::debug!("Showing rows from offset {offset}");
            })
            .with_group_size(config.group_size);
            paginator.select_page(page);

            let html = table.to_html().map_err(|e| CliError::Render(e.to_string()))?;
            println!("{html}");
            let state = paginator.state();
            println!(
                "Page {} of {} ({} {})",
                state.current_index,
                state.total_pages,
                state.total_count,
                domain.plural_label()
            );
            println!("{}", controls_line(&paginator.render()));
            Ok(())
        }
        ListingOutcome::Failed { message } => Err(CliError::Listing(message.clone())),
        ListingOutcome::Discarded => Ok(()),
    }
}

fn main() {
    dotenv().ok(); // Load .env file
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let cli = Cli::parse();

    // Select config profile (defaults to `local`).
    let app_env = env::var("APP_ENV").unwrap_or_else(|_| "local".into());

    let config = match DashboardConfig::load(&cli.config_dir, &app_env) {
        Ok(config) => config,
        Err(err) => {
            log::error!("Error loading dashboard config: {err}");
            std::process::exit(1);
        }
    };

    let pool = match establish_connection_pool(&config.database_url) {
        Ok(pool) => pool,
        Err(e) => {
            log::error!("Failed to establish database connection: {e}");
            std::process::exit(1);
        }
    };

    if let Err(e) = run_migrations(&pool) {
        log::error!("Failed to run migrations: {e}");
        std::process::exit(1);
    }

    let port = DieselQueryPort::new(pool);

    let result = match &cli.command {
        Command::Import {
            domain,
            file,
            replace,
        } => import(&port, *domain, file, *replace),
        Command::List {
            domain,
            page,
            filters,
            json,
        } => list(&port, &config, *domain, *page, filters.as_deref(), *json),
    };

    if let Err(e) = result {
        log::error!("{e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pages_past_the_end_are_reported() {
        assert!(check_page(4, 4).is_ok());
        assert!(check_page(0, 1).is_ok());
        let err = check_page(9, 4).unwrap_err();
        assert!(matches!(err, CliError::PageOutOfRange { page: 9, total_pages: 4 }));
        assert_eq!(
            err.to_string(),
            "Page 9 is out of range: the listing has 4 page(s)"
        );
    }

    #[test]
    fn controls_line_marks_the_active_page() {
        let mut paginator = Paginator::new(37, 10, |_| {});
        paginator.select_page(2);
        assert_eq!(
            controls_line(&paginator.render()),
            "Prev 1 [2] 3 4 Next"
        );
    }
}
