//! Extension pour intégrer la configuration de la fenêtre dans pglconfig

use crate::window::WindowConfig;
use anyhow::Result;
use pglconfig::Config;
use serde_yaml::{Number, Value};
use std::time::Duration;

const DEFAULT_PAGE_SIZE: usize = 50;
const DEFAULT_WINDOW_CAPACITY: usize = 200;
const DEFAULT_DEBOUNCE_MS: u64 = 500;

fn get_usize(config: &Config, path: &[&str], default: usize) -> Result<usize> {
    match config.get_value(path) {
        Ok(Value::Number(n)) if n.is_i64() => Ok(n.as_i64().unwrap() as usize),
        Ok(Value::Number(n)) if n.is_u64() => Ok(n.as_u64().unwrap() as usize),
        _ => Ok(default),
    }
}

/// Trait d'extension pour lire les paramètres de la fenêtre paginée
///
/// # Exemple
///
/// ```rust,ignore
/// use pglconfig::Config;
/// use pglwindow::WindowConfigExt;
///
/// let config = Config::load_config("")?;
/// let window_config = config.window_config()?;
/// ```
pub trait WindowConfigExt {
    /// Taille de page configurée.
    fn get_page_size(&self) -> Result<usize>;

    /// Définit la taille de page.
    fn set_page_size(&self, size: usize) -> Result<()>;

    /// Capacité de la fenêtre glissante.
    fn get_window_capacity(&self) -> Result<usize>;

    /// Définit la capacité de la fenêtre.
    fn set_window_capacity(&self, capacity: usize) -> Result<()>;

    /// Debounce entre deux fetches de page.
    fn get_debounce(&self) -> Result<Duration>;

    /// Construit une `WindowConfig` complète depuis la configuration.
    fn window_config(&self) -> Result<WindowConfig>;
}

impl WindowConfigExt for Config {
    fn get_page_size(&self) -> Result<usize> {
        get_usize(self, &["gallery", "page_size"], DEFAULT_PAGE_SIZE)
    }

    fn set_page_size(&self, size: usize) -> Result<()> {
        self.set_value(&["gallery", "page_size"], Value::Number(Number::from(size)))
    }

    fn get_window_capacity(&self) -> Result<usize> {
        get_usize(self, &["gallery", "window_capacity"], DEFAULT_WINDOW_CAPACITY)
    }

    fn set_window_capacity(&self, capacity: usize) -> Result<()> {
        self.set_value(
            &["gallery", "window_capacity"],
            Value::Number(Number::from(capacity)),
        )
    }

    fn get_debounce(&self) -> Result<Duration> {
        let millis = get_usize(
            self,
            &["gallery", "debounce_ms"],
            DEFAULT_DEBOUNCE_MS as usize,
        )?;
        Ok(Duration::from_millis(millis as u64))
    }

    fn window_config(&self) -> Result<WindowConfig> {
        Ok(WindowConfig {
            page_size: self.get_page_size()?,
            max_window_size: self.get_window_capacity()?,
            debounce: self.get_debounce()?,
        })
    }
}
