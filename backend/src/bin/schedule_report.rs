//! Print the work schedules visible to a user over a date range.
//!
//! Seeds a client from the fixture dataset, logs in as the requested user,
//! and reports what the visibility policy lets them see — leadership gets
//! the whole organisation, a department admin their department, a member
//! their own assignments.

use std::io::{self, Write};

use chrono::NaiveDate;
use clap::Parser;
use serde_json::Value;
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

use backend::{Client, Join, Table};

/// Command-line arguments.
#[derive(Debug, Parser)]
#[command(name = "schedule-report", about = "Report visible work schedules")]
struct Args {
    /// Email of the seeded user to log in as.
    #[arg(long)]
    email: String,

    /// First day of the reporting window (YYYY-MM-DD).
    #[arg(long)]
    from: NaiveDate,

    /// Last day of the reporting window (YYYY-MM-DD).
    #[arg(long)]
    to: NaiveDate,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let seed = backend::seeding::seed_from_dataset(&seed_data::demo_dataset())?;
    let client = Client::new(seed);

    let session = client.auth().login(&args.email, "-").await?;
    let rows = client
        .from(Table::WorkSchedules)
        .gte("work_date", args.from.to_string())
        .lte("work_date", args.to.to_string())
        .attach(Join::User)
        .attach(Join::Shift)
        .order("work_date", true)
        .resolve()
        .await?;

    let mut out = io::stdout().lock();
    writeln!(
        out,
        "{} schedule(s) visible to {} between {} and {}",
        rows.len(),
        session.user().full_name(),
        args.from,
        args.to,
    )?;
    for row in &rows {
        writeln!(
            out,
            "  {}  {:<20} {:<16} {}",
            field(row, &["work_date"]),
            field(row, &["user", "full_name"]),
            field(row, &["shift", "name"]),
            row.get("notes").and_then(Value::as_str).unwrap_or(""),
        )?;
    }
    Ok(())
}

/// Walk a path of keys through a row, rendering a missing leaf as `?`.
fn field(row: &backend::Row, path: &[&str]) -> String {
    let mut value = row.get(*path.first().unwrap_or(&""));
    for key in path.iter().skip(1) {
        value = value.and_then(|v| v.get(key));
    }
    value
        .and_then(Value::as_str)
        .unwrap_or("?")
        .to_owned()
}
