//! Suivi d'une requête d'image en vol

use bytes::Bytes;
use std::time::Duration;
use tokio::sync::RwLock;

/// Résultat d'une requête : blob ou message d'échec
type Outcome = Result<Bytes, String>;

/// État interne de la tâche
struct TaskState {
    /// `None` tant que la requête est en vol
    outcome: Option<Outcome>,
}

/// Objet représentant une requête d'image en cours
///
/// Les appelants qui trouvent une requête déjà en vol pour leur clé
/// s'attachent à cette tâche et attendent son dénouement au lieu d'émettre un
/// fetch dupliqué.
pub struct LoadTask {
    state: RwLock<TaskState>,
}

impl LoadTask {
    pub(crate) fn new() -> Self {
        Self {
            state: RwLock::new(TaskState { outcome: None }),
        }
    }

    /// Enregistre le dénouement et réveille les attentes.
    pub(crate) async fn complete(&self, outcome: Outcome) {
        let mut state = self.state.write().await;
        state.outcome = Some(outcome);
    }

    /// Attend le dénouement de la requête.
    pub async fn wait(&self) -> Outcome {
        loop {
            {
                let state = self.state.read().await;
                if let Some(outcome) = &state.outcome {
                    return outcome.clone();
                }
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }

    /// Indique si la requête est dénouée.
    pub async fn finished(&self) -> bool {
        self.state.read().await.outcome.is_some()
    }
}
