// crm-calendar - prints the CRM activity calendar for a day, week or month
//
// Usage: crm-calendar [day|week|month] [YYYY-MM-DD] [--client ID]

use anyhow::{bail, Context, Result};
use chrono::NaiveDate;
use clap::Parser;
use crm_calendar::calendar::text::render_text;
use crm_calendar::calendar::{render, Granularity, NavigationController};
use crm_calendar::config::{validate_config, AppConfig};
use crm_calendar::feed::{CalendarFeed, RefreshOutcome};
use crm_calendar::http_config::HttpConfig;
use crm_calendar::sources::{InMemoryStore, RecordSource, RestSource, Scope};
use crm_calendar::utils::logging::init_logging;
use log::{error, info, warn};

#[derive(Parser, Debug, Clone)]
#[command(name = "crm-calendar", version, about = "Prints the CRM activity calendar")]
struct Cli {
    /// View to print: day, week or month
    #[arg(default_value = "week")]
    view: Granularity,

    /// Anchor date (YYYY-MM-DD); defaults to today in CRM_TIMEZONE
    date: Option<NaiveDate>,

    /// Only show records linked to this client
    #[arg(long = "client", value_name = "ID")]
    client: Option<i64>,
}

impl Cli {
    fn scope(&self) -> Scope {
        self.client.map_or(Scope::All, Scope::Client)
    }
}

async fn print_calendar<S: RecordSource>(source: S, cli: &Cli, config: &AppConfig) -> Result<()> {
    let feed = CalendarFeed::new(source, config.tz()?);
    let tz = feed.tz();

    match feed.refresh(cli.scope()).await {
        RefreshOutcome::Applied { events } => info!("Loaded {} calendar entries", events),
        RefreshOutcome::Failed(message) => warn!("Showing an empty calendar: {}", message),
        RefreshOutcome::Superseded => {}
    }

    let navigation = match cli.date {
        Some(anchor) => NavigationController::new(anchor, cli.view, tz),
        None => NavigationController::starting_today(cli.view, tz),
    };

    println!("{}", navigation.label());
    if let Some(message) = feed.error() {
        println!("! {}", message);
    }
    feed.with_events(|events| print!("{}", render_text(&render(events, navigation.state(), tz), tz)));
    Ok(())
}

async fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = AppConfig::from_env();
    validate_config(&config)?;

    if config.api_url.is_some() {
        let source = RestSource::from_config(&config, &HttpConfig::default())?;
        print_calendar(source, &cli, &config).await
    } else if let Some(path) = &config.fixtures {
        let store = InMemoryStore::from_fixture_file(path)
            .with_context(|| format!("Failed to load fixtures from {}", path.display()))?;
        print_calendar(store, &cli, &config).await
    } else {
        bail!("No record source configured")
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    if let Err(e) = run().await {
        error!("{:#}", e);
        eprintln!("crm-calendar: {:#}", e);
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use clap::CommandFactory;

    fn parse(raw: &[&str]) -> std::result::Result<Cli, clap::Error> {
        Cli::try_parse_from(std::iter::once("crm-calendar").chain(raw.iter().copied()))
    }

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = parse(&[]).unwrap();
        assert_eq!(cli.view, Granularity::Week);
        assert!(cli.date.is_none());
        assert_eq!(cli.scope(), Scope::All);
    }

    #[test]
    fn test_full_command_line() {
        let cli = parse(&["month", "2025-04-10", "--client", "4"]).unwrap();
        assert_eq!(cli.view, Granularity::Month);
        assert_eq!(cli.date, NaiveDate::from_ymd_opt(2025, 4, 10));
        assert_eq!(cli.scope(), Scope::Client(4));
    }

    #[test]
    fn test_invalid_date_is_reported_as_a_date() {
        let err = parse(&["day", "2025-02-30"]).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::ValueValidation);
        assert!(err.to_string().contains("2025-02-30"));
        assert!(err.to_string().contains("DATE"));
    }

    #[test]
    fn test_rejects_unknown_view_and_client() {
        assert_eq!(parse(&["year"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--client"]).unwrap_err().kind(), ErrorKind::InvalidValue);
        assert_eq!(parse(&["--client", "acme"]).unwrap_err().kind(), ErrorKind::ValueValidation);
    }
}
