use anyhow::{anyhow, Result};
use colored::*;
use dialoguer::{theme::ColorfulTheme, Input, Password};

use gisrep::{Config, Credentials};

/// Prompt for GitHub credentials and create the config file
///
/// The secret goes into the platform keyring; the config file records only
/// the username and the keyring service name.
pub fn run_init_command(force: bool) -> Result<()> {
    if !atty::is(atty::Stream::Stdin) {
        return Err(anyhow!(
            "init needs an interactive terminal to prompt for credentials"
        ));
    }

    let theme = ColorfulTheme::default();

    let username = Input::<String>::with_theme(&theme)
        .with_prompt("GitHub username")
        .interact_text()?;
    let secret = Password::with_theme(&theme)
        .with_prompt("GitHub password or token")
        .interact()?;

    let path = Config::default_path()?;
    let config = Config::create(&path, &Credentials::new(username, secret), force)?;

    println!(
        "{}",
        format!("Config written to {}", config.path().display()).green()
    );
    println!("Credentials stored in the platform keyring.");

    Ok(())
}
