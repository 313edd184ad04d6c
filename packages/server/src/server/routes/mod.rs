pub mod health;
pub mod movies;
pub mod reviews;
pub mod users;

pub use health::health_handler;
pub use movies::{add_movie_handler, get_movie_handler, list_movies_handler};
pub use reviews::admin_review_handler;
pub use users::{login_handler, register_handler};
