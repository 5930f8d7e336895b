use anyhow::Result;
use owo_colors::OwoColorize;
use rolodir_core::config::RolodirConfig;

pub fn run(user_id: &str) -> Result<()> {
    let mut config = RolodirConfig::load()?;
    config.user = Some(user_id.to_string());
    config.save()?;

    println!("{}", format!("Signed in as {}", user_id).green());
    Ok(())
}

pub fn run_logout() -> Result<()> {
    let mut config = RolodirConfig::load()?;

    match config.user.take() {
        Some(user) => {
            config.save()?;
            println!("Signed out {}", user);
        }
        None => println!("{}", "Not signed in".dimmed()),
    }

    Ok(())
}
