pub mod codegen;
pub mod config;
pub mod docgen;
pub mod error;
pub mod evaluation;
pub mod session;
pub mod store;
pub mod types;

pub use codegen::*;
pub use config::{
    ConfigManager, LlmConfig, LoggingConfig, ServerConfig, Settings, StorageConfig,
    LLM_API_KEY_ENV,
};
pub use docgen::*;
pub use error::*;
pub use evaluation::*;
pub use session::*;
pub use store::*;
pub use types::*;
