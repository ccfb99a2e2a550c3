//! Config subcommands handler

use anyhow::Result;

use tuneframe::tui::current_theme;
use tuneframe::Config;

/// Show the effective configuration as TOML.
#[cfg(not(tarpaulin_include))]
pub fn handle_show() -> Result<()> {
    let config = Config::load()?;
    let toml_str = toml::to_string_pretty(&config)?;
    println!("{}", current_theme().primary_text(&toml_str));
    Ok(())
}

/// Print the config file path.
#[cfg(not(tarpaulin_include))]
pub fn handle_path() -> Result<()> {
    println!("{}", Config::config_path()?.display());
    Ok(())
}

/// Write the default config unless a file already exists.
#[cfg(not(tarpaulin_include))]
pub fn handle_init() -> Result<()> {
    let theme = current_theme();
    let path = Config::config_path()?;
    if path.exists() {
        println!(
            "{}",
            theme.primary_text(&format!("Config already exists at {}", path.display()))
        );
        return Ok(());
    }
    Config::default().save()?;
    println!(
        "{}",
        theme.accent_text(&format!("Created {}", path.display()))
    );
    Ok(())
}
