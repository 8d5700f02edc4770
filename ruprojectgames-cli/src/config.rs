use std::path::Path;

use clap::Subcommand;
use ruprojectgames_lib::{Result, config::CoreConfig};

#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Print the location of the configuration file
    Path,
    /// Print the configuration in effect
    Show,
}

pub fn handle(cfg: &CoreConfig, path_override: Option<&Path>, cmd: &Command) -> Result<()> {
    match cmd {
        Command::Path => {
            let path = match path_override {
                Some(path) => path.to_path_buf(),
                None => CoreConfig::path()?,
            };
            println!("{}", path.display());
        }
        Command::Show => print!("{}", toml::to_string_pretty(cfg)?),
    }

    Ok(())
}
