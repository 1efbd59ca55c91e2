//! Config command implementation

use crate::cli::{load_config, ConfigArgs};
use crate::core::config::Config;
use crate::core::error::Result;

/// Print the effective configuration
pub fn run(args: ConfigArgs) -> Result<()> {
    let config = load_config(args.config.as_deref())?;
    let source = match &args.config {
        Some(path) => path.display().to_string(),
        None => {
            let path = Config::config_path()?;
            if path.exists() {
                path.display().to_string()
            } else {
                format!("defaults ({} not found)", path.display())
            }
        }
    };

    println!("# {}", source);
    print!("{}", config.to_toml()?);
    Ok(())
}
