pub mod aggregate;
pub mod error;
pub mod history;
pub mod point;
pub mod provider;
pub mod rating;
pub mod series;
pub mod summary;
pub mod window;
