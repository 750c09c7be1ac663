mod calendar;
mod catalog;
mod error;
mod loader;
mod overview;
mod plan;
pub mod quantity;
mod tables;
mod tally;

pub use calendar::*;
pub use catalog::*;
pub use error::*;
pub use loader::*;
pub use overview::*;
pub use plan::*;
pub use tables::*;
pub use tally::Tally;
