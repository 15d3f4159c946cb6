//! CLI command handlers. Each command is in its own file.

mod render;
mod resolve;
mod token;
mod url;

pub use render::run_render;
pub use resolve::run_resolve;
pub use token::run_token;
pub use url::run_url;
