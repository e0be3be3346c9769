use crate::{
    cli::HistoryArgs,
    core::{provider::PriceDataSource, summary::Analyst},
    prelude::*,
    tables::build_history_table,
};

#[instrument(skip_all, fields(days = %args.days))]
pub async fn history<S: PriceDataSource>(analyst: &Analyst<'_, S>, args: &HistoryArgs) -> Result {
    let history = analyst.history(args.days).await?;
    println!("{}", build_history_table(&history));
    Ok(())
}
