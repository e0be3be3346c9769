use crate::{
    cli::DayArgs,
    core::{provider::PriceDataSource, summary::Analyst},
    prelude::*,
    tables::build_day_table,
};

#[instrument(skip_all)]
pub async fn prices<S: PriceDataSource>(analyst: &Analyst<'_, S>, args: &DayArgs) -> Result {
    let date = args.date.unwrap_or_else(|| analyst.today());
    match analyst.day(date).await? {
        Some(summary) => println!("{}", build_day_table(&summary)),
        None if date > analyst.today() => println!("Prices for {date} are not yet published."),
        None => println!("There are no prices for {date}."),
    }
    Ok(())
}
