pub mod models;

pub use models::{Movie, RankingDefinition, UNRANKED_SENTINEL};
