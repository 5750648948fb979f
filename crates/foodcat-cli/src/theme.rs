//! `foodcat theme`: inspect or flip the persisted light/dark preference.

use clap::Subcommand;
use foodcat_core::{AppConfig, FilePreferenceStore, ThemePreference};

use crate::render::toggle_label;

/// Sub-commands available under `theme`.
#[derive(Debug, Subcommand)]
pub enum ThemeCommands {
    /// Print the active theme (the default)
    Show,
    /// Switch between light and dark and save the choice
    Toggle,
}

/// # Errors
///
/// Returns an error if `toggle` cannot write the preference file.
pub(crate) fn run_theme(config: &AppConfig, command: Option<ThemeCommands>) -> anyhow::Result<()> {
    let mut preference = ThemePreference::load(FilePreferenceStore::new(&config.prefs_path));

    match command.unwrap_or(ThemeCommands::Show) {
        ThemeCommands::Show => {
            let theme = preference.current();
            println!("theme: {theme} (toggle: {})", toggle_label(theme));
        }
        ThemeCommands::Toggle => {
            let theme = preference.toggle_and_persist()?;
            println!(
                "theme set to {theme}; saved to {}",
                config.prefs_path.display()
            );
        }
    }

    Ok(())
}
