//! Extension pour intégrer les favoris dans pglconfig

use anyhow::Result;
use pglconfig::Config;
use serde_yaml::Value;
use std::path::PathBuf;

const DEFAULT_FAVORITES_FILE: &str = "favorites.json";

/// Trait d'extension pour localiser le fichier des favoris
pub trait FavoritesConfigExt {
    /// Chemin du fichier des favoris, résolu dans le répertoire de
    /// configuration s'il est relatif.
    fn get_favorites_file(&self) -> Result<PathBuf>;

    /// Définit le chemin du fichier des favoris.
    fn set_favorites_file(&self, path: &str) -> Result<()>;
}

impl FavoritesConfigExt for Config {
    fn get_favorites_file(&self) -> Result<PathBuf> {
        let file = match self.get_value(&["favorites", "file"]) {
            Ok(Value::String(s)) if !s.is_empty() => s,
            _ => DEFAULT_FAVORITES_FILE.to_string(),
        };

        let path = PathBuf::from(&file);
        if path.is_absolute() {
            Ok(path)
        } else {
            Ok(PathBuf::from(self.config_dir()).join(path))
        }
    }

    fn set_favorites_file(&self, path: &str) -> Result<()> {
        self.set_value(&["favorites", "file"], Value::String(path.to_string()))
    }
}
