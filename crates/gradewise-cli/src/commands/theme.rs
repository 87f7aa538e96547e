//! The `gradewise theme` command.

use std::path::PathBuf;

use anyhow::Result;

use gradewise_core::theme::Theme;

use crate::config::{load_config_from, open_preferences};

pub fn execute(toggle: bool, config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config_from(config_path.as_deref())?;
    let mut prefs = open_preferences(&config)?;

    let theme = if toggle {
        Theme::toggle(&mut *prefs)?
    } else {
        Theme::load(&*prefs)
    };

    println!("Theme: {theme}");
    Ok(())
}
