use std::io::{self, Write};

use crate::{
    cli::DashboardArgs,
    core::{
        provider::PriceDataSource,
        summary::{Analyst, Dashboard},
    },
    prelude::*,
    tables::{build_day_table, build_history_table, build_metrics_table},
};

#[instrument(skip_all)]
pub async fn dashboard<S: PriceDataSource>(
    analyst: &Analyst<'_, S>,
    args: &DashboardArgs,
) -> Result {
    let dashboard = analyst.dashboard().await?;
    if dashboard.today.is_none() {
        warn!(date = %analyst.today(), "no prices for today");
    }
    write_dashboard(&mut io::stdout().lock(), &dashboard, args.json)
}

/// Stdout carries nothing but the dashboard itself, logs go to stderr.
fn write_dashboard(writer: &mut impl Write, dashboard: &Dashboard, json: bool) -> Result {
    if json {
        serde_json::to_writer_pretty(&mut *writer, dashboard)?;
        writeln!(writer)?;
        return Ok(());
    }

    writeln!(writer, "{}", build_metrics_table(dashboard))?;
    if let Some(today) = &dashboard.today {
        writeln!(writer, "{}", build_day_table(today))?;
    }
    if let Some(tomorrow) = &dashboard.tomorrow {
        writeln!(writer, "{}", build_day_table(tomorrow))?;
    } else {
        writeln!(writer, "Tomorrow's prices are not yet published.")?;
    }
    writeln!(writer, "{}", build_history_table(&dashboard.history))?;
    Ok(())
}
