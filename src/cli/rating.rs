use crate::{
    cli::DayArgs,
    core::{provider::PriceDataSource, summary::Analyst},
    prelude::*,
    tables::build_rating_table,
};

#[instrument(skip_all)]
pub async fn rating<S: PriceDataSource>(analyst: &Analyst<'_, S>, args: &DayArgs) -> Result {
    let date = args.date.unwrap_or_else(|| analyst.today());
    let Some(summary) = analyst.day(date).await? else {
        println!("There are no prices for {date} yet.");
        return Ok(());
    };
    if summary.rating.is_none() {
        warn!(%date, n_points = summary.prices.len(), "not enough prices to rate the day");
    }
    println!("{}", build_rating_table(&summary));
    Ok(())
}
