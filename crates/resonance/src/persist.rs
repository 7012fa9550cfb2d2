//! Writes the recommended shaper into a TOML configuration store.

use anyhow::{Context, Result, bail};
use resonance_core::{
    Axis, SettingValue, ShaperType,
    settings::{SECTION, shaper_settings},
};
use std::{fs, path::Path};
use toml::{Table, Value};

/// Merges the shaper settings for `axis` into the `[input_shaper]` table of
/// the file at `path`, creating the file if it does not exist.
///
/// Unrelated keys and tables are preserved.
pub fn save_shaper(path: impl AsRef<Path>, axis: Axis, shaper: ShaperType, freq: f64) -> Result<()> {
    let path = path.as_ref();
    let mut document = if path.exists() {
        let content = fs::read_to_string(path)
            .with_context(|| format!("failed to read settings {}", path.display()))?;
        toml::from_str::<Table>(&content)
            .with_context(|| format!("failed to parse settings {}", path.display()))?
    } else {
        Table::new()
    };

    let section = document
        .entry(SECTION)
        .or_insert_with(|| Value::Table(Table::new()));
    let Value::Table(section) = section else {
        bail!("'{SECTION}' in {} is not a table", path.display());
    };
    for (key, value) in shaper_settings(axis, shaper, freq) {
        tracing::info!("Saving {key} = {value}");
        let value = match value {
            SettingValue::Text(text) => Value::String(text),
            SettingValue::Number(number) => Value::Float(number),
        };
        section.insert(key, value);
    }

    let rendered = toml::to_string_pretty(&document).context("failed to render settings")?;
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)
            .with_context(|| format!("failed to create settings directory {}", parent.display()))?;
    }
    fs::write(path, rendered)
        .with_context(|| format!("failed to write settings {}", path.display()))
}
