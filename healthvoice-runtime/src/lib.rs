pub mod config_store;
pub mod credentials;
pub mod defaults;
pub mod llm;
pub mod runtime_engine;
pub mod secrets;
