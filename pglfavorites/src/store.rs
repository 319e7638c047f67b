//! Backends de persistance des favoris

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Persistance de l'ensemble des favoris
///
/// Le registre écrit l'ensemble complet à chaque mutation ; le backend est
/// libre de son format tant que `load` restitue ce que `save` a reçu.
#[async_trait]
pub trait FavoriteStore: Send + Sync {
    /// Charge les identifiants persistés, ou un ensemble vide si rien n'a
    /// encore été écrit.
    async fn load(&self) -> Result<Vec<String>>;

    /// Persiste l'ensemble complet des identifiants.
    async fn save(&self, ids: &[String]) -> Result<()>;
}

/// Backend fichier : un tableau JSON d'identifiants
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    /// # Arguments
    ///
    /// * `path` - Chemin du fichier JSON (créé à la première écriture)
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl FavoriteStore for JsonFileStore {
    async fn load(&self) -> Result<Vec<String>> {
        match tokio::fs::read(&self.path).await {
            Ok(data) => {
                let ids: Vec<String> = serde_json::from_slice(&data)
                    .with_context(|| format!("invalid favorites file {:?}", self.path))?;
                Ok(ids)
            }
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Vec::new()),
            Err(err) => Err(err.into()),
        }
    }

    async fn save(&self, ids: &[String]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let data = serde_json::to_vec(ids)?;
        tokio::fs::write(&self.path, data).await?;
        Ok(())
    }
}
