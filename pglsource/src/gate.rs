//! Garde d'accès à la photothèque

use async_trait::async_trait;

/// État d'autorisation d'accès à la photothèque
///
/// `Denied` est un état distinct présenté tel quel au consommateur (porte
/// persistante avec action de réglage), jamais une erreur.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessStatus {
    /// L'utilisateur n'a pas encore été sollicité
    NotDetermined,
    Granted,
    Denied,
}

/// Garde d'accès consultée avant tout fetch de page
///
/// Les API d'autorisation du système restent hors périmètre ; la fenêtre ne
/// dépend que de cet état.
#[async_trait]
pub trait AccessGate: Send + Sync {
    /// État courant, sans solliciter l'utilisateur.
    fn status(&self) -> AccessStatus;

    /// Demande l'accès si nécessaire et retourne l'état résultant.
    async fn request_access(&self) -> AccessStatus;
}

/// Garde immuable, utile pour les tests et les environnements sans porte.
pub struct StaticGate {
    status: AccessStatus,
}

impl StaticGate {
    pub fn new(status: AccessStatus) -> Self {
        Self { status }
    }

    pub fn granted() -> Self {
        Self::new(AccessStatus::Granted)
    }

    pub fn denied() -> Self {
        Self::new(AccessStatus::Denied)
    }
}

#[async_trait]
impl AccessGate for StaticGate {
    fn status(&self) -> AccessStatus {
        self.status
    }

    async fn request_access(&self) -> AccessStatus {
        self.status
    }
}
