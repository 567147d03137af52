//! Configuration adapters

mod env;
mod xdg;

pub use env::{env_config, env_config_from, parse_flag};
pub use xdg::XdgConfigStore;
