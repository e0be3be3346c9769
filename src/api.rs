mod client;
pub mod prices;
