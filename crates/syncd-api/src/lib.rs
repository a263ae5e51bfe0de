pub mod crud;
pub mod error;
pub mod filter;
pub mod group;
pub mod keyword;
pub mod params;
pub mod routes;
pub mod server;
pub mod service;
pub mod state;
pub mod validate;

pub use error::AppError;
pub use state::{AppState, AppStateInner};
