use std::path::PathBuf;

use shelfmark_core::TitleScript;

/// Resolved CLI configuration.
#[derive(Debug)]
pub(crate) struct Config {
    /// Vault directory holding notes and attachments.
    pub vault_root: PathBuf,
    /// Preferred title script for display and note file names.
    pub title: TitleScript,
}

/// TOML config file format.
#[derive(Debug, serde::Deserialize)]
struct ConfigFile {
    vault: Option<VaultSection>,
    display: Option<DisplaySection>,
}

#[derive(Debug, serde::Deserialize)]
struct VaultSection {
    root: Option<PathBuf>,
}

#[derive(Debug, serde::Deserialize)]
struct DisplaySection {
    /// "native", "romaji", or "english".
    title: Option<String>,
}

/// Return the path to the config file.
pub(crate) fn config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("shelfmark").join("config.toml"))
}

impl Config {
    /// Resolve configuration.
    ///
    /// Vault priority: CLI flag > SHELFMARK_VAULT env var > config file >
    /// `./vault`. An unknown title-script token falls back to native.
    pub(crate) fn load(vault_flag: Option<PathBuf>) -> Self {
        let file = load_config_file();

        let vault_root = vault_flag
            .or_else(|| std::env::var_os("SHELFMARK_VAULT").map(PathBuf::from))
            .or_else(|| file.as_ref().and_then(|f| f.vault.as_ref()?.root.clone()))
            .unwrap_or_else(|| PathBuf::from("vault"));

        let title = file
            .as_ref()
            .and_then(|f| f.display.as_ref()?.title.as_deref())
            .and_then(|t| t.parse().ok())
            .unwrap_or_default();

        Self { vault_root, title }
    }
}

fn load_config_file() -> Option<ConfigFile> {
    let path = config_path()?;
    let content = std::fs::read_to_string(&path).ok()?;
    match toml::from_str(&content) {
        Ok(file) => Some(file),
        Err(e) => {
            log::warn!("Ignoring malformed config at {}: {}", path.display(), e);
            None
        }
    }
}
