pub mod movie;
pub mod ranking;

pub use movie::Movie;
pub use ranking::{RankingDefinition, UNRANKED_SENTINEL};
