//! Kernel module - server infrastructure and dependencies.

pub mod ai;
pub mod deps;
pub mod stores;
pub mod test_dependencies;
pub mod traits;

pub use ai::{OpenAiCompletion, COMPLETION_MODEL};
pub use deps::ServerDeps;
pub use stores::{PgMovieStore, PgRankingCatalog};
pub use traits::*;
