mod catalog;
mod commands;
mod error;
mod info;
mod process;

pub use catalog::{
    CatalogMessage, InstalledMessage, SearchMessage, fetch_catalog, fetch_installed,
    search_packages,
};
pub use commands::{CommandKind, CommandMessage, run_package_command};
pub use error::BrewError;
pub use info::{InfoMessage, PackageInfo, fetch_info, parse_info};
pub use process::{Brew, CommandOutput};
