//! Each subcommand lives in its own file so the match in main stays thin.

mod config;
mod log;
mod path;

pub use config::cmd_config;
pub use log::cmd_log;
pub use path::cmd_path;
