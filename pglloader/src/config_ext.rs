//! Extension pour intégrer les paramètres du coordinateur dans pglconfig

use crate::coordinator::DEFAULT_PRELOAD_COUNT;
use anyhow::Result;
use pglconfig::Config;
use serde_yaml::{Number, Value};

/// Trait d'extension pour lire les paramètres du coordinateur de chargement
pub trait LoaderConfigExt {
    /// Nombre d'éléments préchargés par page fraîche.
    fn get_preload_count(&self) -> Result<usize>;

    /// Définit le nombre d'éléments préchargés.
    fn set_preload_count(&self, count: usize) -> Result<()>;
}

impl LoaderConfigExt for Config {
    fn get_preload_count(&self) -> Result<usize> {
        match self.get_value(&["gallery", "preload_count"]) {
            Ok(Value::Number(n)) if n.is_i64() => Ok(n.as_i64().unwrap() as usize),
            Ok(Value::Number(n)) if n.is_u64() => Ok(n.as_u64().unwrap() as usize),
            _ => Ok(DEFAULT_PRELOAD_COUNT),
        }
    }

    fn set_preload_count(&self, count: usize) -> Result<()> {
        self.set_value(
            &["gallery", "preload_count"],
            Value::Number(Number::from(count)),
        )
    }
}
