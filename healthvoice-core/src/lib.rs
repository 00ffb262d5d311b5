pub mod config;
pub mod error;
pub mod interpret;
pub mod prompt;
pub mod render;
pub mod text;
pub mod types;

// Keep the public surface small and intentional.
pub use config::*;
pub use error::*;
pub use interpret::*;
pub use prompt::*;
pub use render::*;
pub use text::*;
pub use types::*;
