pub mod error;
pub mod handlers;
pub mod rest;
pub mod routes;
pub mod server;
pub mod state;

pub use error::*;
pub use handlers::{DOCS_UI_PATH, OPENAPI_JSON_PATH};
pub use routes::*;
pub use server::*;
pub use state::*;
