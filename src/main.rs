mod api;
mod cli;
mod core;
mod fmt;
mod prelude;
mod quantity;
mod tables;

use std::process::ExitCode;

use chrono::Local;
use clap::{Parser, crate_version};

use crate::{
    cli::{Args, Command, dashboard, history, prices, rating},
    core::error::Error as PriceError,
    prelude::*,
};

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<ExitCode> {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt().without_time().compact().with_writer(std::io::stderr).init();
    info!(version = crate_version!(), "starting…");

    let args = Args::parse();
    let now = Local::now().naive_local();
    let source = args.api.new_client()?;
    let analyst = args.analytics.analyst(&source, now);

    let result = match &args.command {
        Command::Dashboard(command_args) => dashboard(&analyst, command_args).await,
        Command::Prices(command_args) => prices(&analyst, command_args).await,
        Command::History(command_args) => history(&analyst, command_args).await,
        Command::Rating(command_args) => rating(&analyst, command_args).await,
    };

    match result {
        Ok(()) => {
            info!("done!");
            Ok(ExitCode::SUCCESS)
        }
        Err(error)
            if matches!(
                error.downcast_ref::<PriceError>(),
                Some(PriceError::Unavailable { .. })
            ) =>
        {
            error!("{error:#}");
            println!("Price data is unavailable at the moment, please try again later.");
            Ok(ExitCode::FAILURE)
        }
        Err(error) => Err(error),
    }
}
