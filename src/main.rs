//! Dairy Admin command line
//!
//! Headless front end over the same table screen the dashboard uses.

use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use serde_json::Value;
use std::path::PathBuf;

use dairy_admin::client::{EntityClient, HttpEntityClient};
use dairy_admin::config::ApiConfig;
use dairy_admin::domain::*;
use dairy_admin::live::EventHub;
use dairy_admin::screen::TableScreen;
use dairy_admin::validation::Schema;
use dairy_admin::view::{row_view, Derive, SortSpec};

#[derive(Parser, Debug)]
#[command(name = "dairy-admin")]
#[command(about = "Dairy admin dashboard lists from the command line")]
struct Cli {
    /// Config file (defaults to ./dairy_admin.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Log debug output
    #[arg(long, short)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print a collection with derived status and summary stats
    List {
        /// Collection or event name, e.g. `audits` or `milkEntry`
        kind: String,
        #[arg(long)]
        search: Option<String>,
        /// Field to sort by (defaults per collection)
        #[arg(long)]
        sort: Option<String>,
        #[arg(long)]
        desc: bool,
    },
    /// Print one record
    Show { kind: String, id: String },
    /// Delete one record
    Delete { kind: String, id: String },
    /// List supported collections
    Kinds,
}

struct ListArgs {
    search: Option<String>,
    sort: Option<String>,
    desc: bool,
}

/// Run `$body` with `$t` bound to the record type for `$kind`
macro_rules! for_kind {
    ($kind:expr, $t:ident => $body:expr) => {
        match $kind {
            EntityKind::Audit => { type $t = Audit; $body }
            EntityKind::Bill => { type $t = Bill; $body }
            EntityKind::Certification => { type $t = Certification; $body }
            EntityKind::ComplianceRecord => { type $t = ComplianceRecord; $body }
            EntityKind::Document => { type $t = Document; $body }
            EntityKind::Employee => { type $t = Employee; $body }
            EntityKind::Fleet => { type $t = Fleet; $body }
            EntityKind::MilkEntry => { type $t = MilkEntry; $body }
            EntityKind::QualityTest => { type $t = QualityTest; $body }
            EntityKind::CustomerReview => { type $t = CustomerReview; $body }
            EntityKind::GroupMessage => { type $t = GroupMessage; $body }
        }
    };
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    if let Err(e) = run(cli).await {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), String> {
    let config = ApiConfig::resolve(cli.config.as_deref())?;
    match &config.log_dir {
        Some(dir) => rolling_logger::init_logger(dir, "dairy-admin")?,
        None => rolling_logger::init_console(cli.verbose)?,
    }
    log::debug!("Using API at {}", config.base_url);

    match cli.command {
        Commands::Kinds => {
            for kind in EntityKind::ALL {
                println!("{:<16} {}:*  ({})", kind.collection(), kind.event_prefix(), kind.plural());
            }
            Ok(())
        }
        Commands::List { kind, search, sort, desc } => {
            let args = ListArgs { search, sort, desc };
            for_kind!(parse_kind(&kind)?, T => list::<T>(&config, &args).await)
        }
        Commands::Show { kind, id } => {
            for_kind!(parse_kind(&kind)?, T => show::<T>(&config, parse_id(&id)).await)
        }
        Commands::Delete { kind, id } => {
            for_kind!(parse_kind(&kind)?, T => delete::<T>(&config, parse_id(&id)).await)
        }
    }
}

fn parse_kind(name: &str) -> Result<EntityKind, String> {
    EntityKind::from_name(name).ok_or_else(|| format!("Unknown collection '{}', try `dairy-admin kinds`", name))
}

/// Numeric ids stay numeric on the wire
fn parse_id(raw: &str) -> RecordId {
    raw.parse::<i64>().map(RecordId::Number).unwrap_or_else(|_| RecordId::from(raw))
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn list<T: Derive + Schema>(config: &ApiConfig, args: &ListArgs) -> Result<(), String> {
    let client = HttpEntityClient::<T>::new(config).map_err(|e| e.user_message())?;
    let hub = EventHub::new();
    let mut screen = TableScreen::new(client);
    screen.mount(&hub).await;
    if let Some(banner) = screen.banner() {
        return Err(banner.to_string());
    }

    if let Some(search) = &args.search {
        screen.set_search(search.as_str());
    }
    if let Some(field) = &args.sort {
        let spec = if args.desc { SortSpec::desc(field) } else { SortSpec::asc(field) };
        screen.set_sort(Some(spec));
    }

    let today = today();
    let rows = screen.visible_rows(today);
    for row in &rows {
        let mut line = format!("{:<10} {:<14}", row.record.id().to_string(), row.status.label);
        if row.flags.expiring_soon {
            if let Some(days) = row.flags.days_remaining {
                line.push_str(&format!(" [{}d left]", days));
            }
        }
        println!("{}  {}", line, summary(row.record));
    }
    println!("-- {} of {} {}", rows.len(), screen.store().len(), T::KIND.plural());
    for stat in screen.stats(today) {
        println!("{:<24} {}", stat.label, stat.value);
    }
    screen.unmount();
    Ok(())
}

async fn show<T: Derive + Schema>(config: &ApiConfig, id: RecordId) -> Result<(), String> {
    let client = HttpEntityClient::<T>::new(config).map_err(|e| e.user_message())?;
    let record = client.get(&id).await.map_err(|e| e.user_message())?;
    let row = row_view(&record, today());
    let json = serde_json::to_string_pretty(&record).map_err(|e| e.to_string())?;
    println!("{}\nDisplayed status: {}", json, row.status.label);
    Ok(())
}

async fn delete<T: Derive + Schema>(config: &ApiConfig, id: RecordId) -> Result<(), String> {
    let client = HttpEntityClient::<T>::new(config).map_err(|e| e.user_message())?;
    match client.delete(&id).await {
        Ok(()) => println!("Deleted {} {}", T::KIND.singular(), id),
        Err(SyncError::NotFound(_)) => println!("{} {} was already gone", T::KIND.singular(), id),
        Err(e) => return Err(e.user_message()),
    }
    Ok(())
}

/// Non-empty scalar fields other than id and status, as `key=value`
fn summary<T: Entity>(record: &T) -> String {
    let Ok(Value::Object(fields)) = serde_json::to_value(record) else {
        return String::new();
    };
    fields
        .iter()
        .filter(|(k, _)| !matches!(k.as_str(), "id" | "status"))
        .filter_map(|(k, v)| match v {
            Value::String(s) if !s.is_empty() => Some(format!("{}={}", k, s)),
            Value::Number(n) => Some(format!("{}={}", k, n)),
            Value::Bool(b) => Some(format!("{}={}", k, b)),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join(" ")
}
