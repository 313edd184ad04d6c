// MovieStream - movie catalog and review ranking API
//
// REST backend for user registration/login, movie catalog CRUD, and admin
// review submission. Admin reviews are scored against the ranking catalog
// through an external completion provider.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
