use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::config::RolodirConfig;

pub fn run() -> Result<()> {
    let config_path = RolodirConfig::config_path()?;
    let config = RolodirConfig::load()?;

    println!("{}", "Paths".bold());
    println!("  Config:   {}", config_path.display());
    println!("  Records:  {}", config.records_path().display());

    println!();
    println!("{}", "Session".bold());
    match &config.user {
        Some(user) => println!("  User:     {}", user),
        None => println!("  User:     {}", "(not signed in)".dimmed()),
    }

    Ok(())
}
