//! Command handlers, one module per subcommand

pub mod completions;
pub mod extract;
pub mod latest;
pub mod list;
pub mod show;
mod utils;

pub use completions::handle_completions;
pub use extract::handle_extract;
pub use latest::handle_latest;
pub use list::handle_list;
pub use show::handle_show;
