//! Settings CLI commands
//!
//! Theme switching and a configuration overview.

use clap::ValueEnum;

use crate::config::{LocaleConfig, PocketbookPaths, Settings, Theme};
use crate::error::LedgerResult;

/// Theme command argument
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ThemeChoice {
    /// Switch to the other theme
    Toggle,
    /// Light theme
    Light,
    /// Dark theme
    Dark,
}

impl ThemeChoice {
    /// The theme this choice leads to from `current`
    pub fn apply(self, current: Theme) -> Theme {
        match self {
            Self::Toggle => current.toggle(),
            Self::Light => Theme::Light,
            Self::Dark => Theme::Dark,
        }
    }
}

/// Show or change the theme
pub fn handle_theme_command(
    settings: &mut Settings,
    paths: &PocketbookPaths,
    choice: Option<ThemeChoice>,
) -> LedgerResult<()> {
    let Some(choice) = choice else {
        println!("Theme: {}", settings.theme);
        return Ok(());
    };

    settings.theme = choice.apply(settings.theme);
    settings.save(paths)?;
    println!("Theme set to {}", settings.theme);

    Ok(())
}

/// Print paths and settings
pub fn handle_config_command(settings: &Settings, paths: &PocketbookPaths) -> LedgerResult<()> {
    let locale = settings.locale_config();

    println!("Pocketbook Configuration");
    println!("========================");
    println!("Base directory:   {}", paths.base_dir().display());
    println!("Settings file:    {}", paths.settings_file().display());
    println!("Ledger file:      {}", paths.ledger_file().display());
    println!("Log file (TUI):   {}", paths.log_file().display());
    println!();
    println!("Settings:");
    println!("  Theme:            {}", settings.theme);
    println!("  Locale:           {} ({})", locale.code, locale.currency);
    println!("  Display currency: {}", settings.display_currency);
    println!("  Page size:        {}", settings.effective_page_size());
    println!("  Rate API:         {}", settings.exchange_rate_url);
    println!("  Rate cache TTL:   {}s", settings.cache_ttl_secs);
    println!();
    println!(
        "Supported locales: {}",
        LocaleConfig::supported()
            .iter()
            .map(|l| l.code.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_theme_choice() {
        assert_eq!(ThemeChoice::Toggle.apply(Theme::Light), Theme::Dark);
        assert_eq!(ThemeChoice::Light.apply(Theme::Dark), Theme::Light);
        assert_eq!(ThemeChoice::Dark.apply(Theme::Dark), Theme::Dark);
    }

    #[test]
    fn test_theme_command_persists() {
        let temp_dir = TempDir::new().unwrap();
        let paths = PocketbookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut settings = Settings::default();

        handle_theme_command(&mut settings, &paths, Some(ThemeChoice::Toggle)).unwrap();
        assert_eq!(Settings::load_or_create(&paths).unwrap().theme, Theme::Dark);
    }
}
