//! PagedAssetWindow : fenêtre glissante bornée sur une source paginée

use crate::error::{Error, Result};
use crate::event::WindowEvent;
use pglsource::{
    AccessGate, AccessStatus, AssetRecord, AssetSource, LoadState, validate_page_request,
    MAX_PAGE_LIMIT,
};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};
use tokio::sync::broadcast;

/// Capacité du canal d'évènements
const EVENT_CHANNEL_CAPACITY: usize = 64;

/// Configuration de la fenêtre
#[derive(Debug, Clone)]
pub struct WindowConfig {
    /// Nombre d'éléments demandés par page
    pub page_size: usize,
    /// Nombre maximal d'éléments conservés en mémoire
    pub max_window_size: usize,
    /// Délai minimal entre deux fetches de page
    pub debounce: Duration,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            max_window_size: 200,
            debounce: Duration::from_millis(500),
        }
    }
}

impl WindowConfig {
    /// Vérifie la cohérence de la configuration.
    ///
    /// La capacité doit valoir au moins deux pages, sans quoi chaque page
    /// appliquée évincerait une partie de la précédente.
    pub fn validate(&self) -> Result<()> {
        validate_page_request(self.page_size)?;
        if self.max_window_size < 2 * self.page_size {
            return Err(Error::InvalidConfig(format!(
                "max_window_size {} must be at least twice page_size {} (page limit is {})",
                self.max_window_size, self.page_size, MAX_PAGE_LIMIT
            )));
        }
        Ok(())
    }
}

/// État de la machine de fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchState {
    Idle,
    FetchingPage,
    /// Le dernier fetch a échoué ; le message décrit l'erreur
    Error(String),
}

/// Snapshot en lecture seule de la fenêtre
#[derive(Debug, Clone)]
pub struct WindowSnapshot {
    pub items: Vec<AssetRecord>,
    pub base_global_offset: usize,
    pub total_count: usize,
    pub has_more: bool,
    pub fetch_state: FetchState,
}

/// État interne, protégé par le mutex
struct WindowInner {
    items: VecDeque<AssetRecord>,
    base_global_offset: usize,
    total_count: usize,
    has_more: bool,
    fetch_state: FetchState,
    /// Incrémentée par `reset()` ; les complétions d'une génération
    /// antérieure sont jetées
    generation: u64,
    /// Instant de la dernière complétion de fetch (succès ou échec)
    last_fetch_done: Option<Instant>,
}

/// Fenêtre glissante, ordonnée et bornée, sur une source d'éléments paginée
///
/// La fenêtre est l'unique propriétaire de ses `AssetRecord` ; les
/// consommateurs reçoivent des snapshots clonés. Toute mutation se fait sous
/// le mutex interne, jamais tenu au travers d'un `.await`.
///
/// Note : ce type est conçu pour être utilisé derrière un
/// `Arc<PagedAssetWindow>`.
pub struct PagedAssetWindow {
    source: Arc<dyn AssetSource>,
    gate: Option<Arc<dyn AccessGate>>,
    config: WindowConfig,
    inner: Mutex<WindowInner>,
    event_tx: broadcast::Sender<WindowEvent>,
}

impl PagedAssetWindow {
    /// Crée une fenêtre sans garde d'accès.
    pub fn new(source: Arc<dyn AssetSource>, config: WindowConfig) -> Result<Self> {
        Self::build(source, None, config)
    }

    /// Crée une fenêtre dont les fetches sont conditionnés par une garde
    /// d'accès : tant que la garde ne répond pas `Granted`, `request_more`
    /// est un no-op.
    pub fn with_gate(
        source: Arc<dyn AssetSource>,
        gate: Arc<dyn AccessGate>,
        config: WindowConfig,
    ) -> Result<Self> {
        Self::build(source, Some(gate), config)
    }

    fn build(
        source: Arc<dyn AssetSource>,
        gate: Option<Arc<dyn AccessGate>>,
        config: WindowConfig,
    ) -> Result<Self> {
        config.validate()?;
        let (event_tx, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Ok(Self {
            source,
            gate,
            config,
            inner: Mutex::new(WindowInner {
                items: VecDeque::new(),
                base_global_offset: 0,
                total_count: 0,
                has_more: true,
                fetch_state: FetchState::Idle,
                generation: 0,
                last_fetch_done: None,
            }),
            event_tx,
        })
    }

    /// S'abonne aux évènements de la fenêtre.
    pub fn subscribe(&self) -> broadcast::Receiver<WindowEvent> {
        self.event_tx.subscribe()
    }

    /// Demande la page suivante si la fenêtre y est éligible.
    ///
    /// No-op (retourne `Ok(false)`) si un fetch est déjà en cours, si la
    /// collection est épuisée, si la dernière complétion date de moins que le
    /// debounce, ou si la garde d'accès ne répond pas `Granted`.
    ///
    /// # Returns
    ///
    /// `Ok(true)` si une page a été appliquée, `Ok(false)` sinon (y compris
    /// en cas d'échec de fetch, transformé en état `Error`).
    pub async fn request_more(&self) -> Result<bool> {
        self.fetch_next_page(false).await
    }

    /// Ré-essaie après un échec, sans attendre le debounce.
    pub async fn retry(&self) -> Result<bool> {
        self.fetch_next_page(true).await
    }

    async fn fetch_next_page(&self, bypass_debounce: bool) -> Result<bool> {
        if let Some(gate) = &self.gate {
            if gate.status() != AccessStatus::Granted {
                tracing::debug!("Page request skipped: access not granted");
                return Ok(false);
            }
        }

        // Rejeté avant toute E/S ; la seule erreur visible de l'appelant
        validate_page_request(self.config.page_size)?;

        let (offset, generation) = {
            let mut inner = self.inner.lock().unwrap();
            if inner.fetch_state == FetchState::FetchingPage {
                return Ok(false);
            }
            if !inner.has_more {
                return Ok(false);
            }
            if !bypass_debounce {
                if let Some(done) = inner.last_fetch_done {
                    if done.elapsed() < self.config.debounce {
                        return Ok(false);
                    }
                }
            }
            inner.fetch_state = FetchState::FetchingPage;
            (
                inner.base_global_offset + inner.items.len(),
                inner.generation,
            )
        };

        tracing::debug!(offset, page_size = self.config.page_size, "Fetching page");
        let result = self.source.fetch_page(offset, self.config.page_size).await;

        let mut inner = self.inner.lock().unwrap();
        if inner.generation != generation {
            // Complétion périmée : la fenêtre a été réinitialisée pendant le
            // fetch, le résultat est jeté sans être appliqué
            tracing::debug!(offset, "Discarding stale page fetch completion");
            return Ok(false);
        }
        inner.last_fetch_done = Some(Instant::now());

        match result {
            Ok(page) => {
                let appended = page.entries.len();
                for (i, entry) in page.entries.into_iter().enumerate() {
                    inner.items.push_back(AssetRecord::new(entry, offset + i));
                }
                inner.total_count = page.total_count;

                // Éviction par l'avant, atomique avec l'ajout : aucun
                // observateur ne voit la fenêtre au-delà de sa capacité
                let evicted = inner
                    .items
                    .len()
                    .saturating_sub(self.config.max_window_size);
                for _ in 0..evicted {
                    inner.items.pop_front();
                }
                inner.base_global_offset += evicted;

                inner.has_more =
                    inner.base_global_offset + inner.items.len() < inner.total_count;
                inner.fetch_state = FetchState::Idle;

                tracing::debug!(
                    appended,
                    evicted,
                    window_len = inner.items.len(),
                    base = inner.base_global_offset,
                    "Page applied"
                );
                drop(inner);
                let _ = self.event_tx.send(WindowEvent::PageLoaded { appended, evicted });
                Ok(true)
            }
            Err(err) => {
                // Pas d'ajout partiel : les éléments existants sont conservés
                let message = err.to_string();
                inner.fetch_state = FetchState::Error(message.clone());
                drop(inner);
                tracing::warn!(offset, error = %message, "Page fetch failed");
                let _ = self.event_tx.send(WindowEvent::PageFailed { message });
                Ok(false)
            }
        }
    }

    /// Vide la fenêtre et invalide les fetches en vol.
    ///
    /// Une complétion appartenant à un fetch émis avant ce `reset()` ne sera
    /// jamais appliquée.
    pub fn reset(&self) {
        {
            let mut inner = self.inner.lock().unwrap();
            inner.generation += 1;
            inner.items.clear();
            inner.base_global_offset = 0;
            inner.total_count = 0;
            inner.has_more = true;
            inner.fetch_state = FetchState::Idle;
            inner.last_fetch_done = None;
        }
        tracing::debug!("Window reset");
        let _ = self.event_tx.send(WindowEvent::Reset);
    }

    /// Met à jour l'état de chargement d'un élément encore présent.
    ///
    /// C'est le contrôle de vie du coordinateur de chargement : si l'élément
    /// a été évincé ou la fenêtre réinitialisée, rien n'est écrit et la
    /// méthode retourne `false`.
    pub fn mark_load_state(&self, id: &str, state: LoadState) -> bool {
        let mut inner = self.inner.lock().unwrap();
        match inner.items.iter_mut().find(|record| record.id == id) {
            Some(record) => {
                record.load_state = state;
                drop(inner);
                let _ = self.event_tx.send(WindowEvent::LoadStateChanged {
                    id: id.to_string(),
                    state,
                });
                true
            }
            None => false,
        }
    }

    /// Snapshot en lecture seule de l'état courant.
    pub fn snapshot(&self) -> WindowSnapshot {
        let inner = self.inner.lock().unwrap();
        WindowSnapshot {
            items: inner.items.iter().cloned().collect(),
            base_global_offset: inner.base_global_offset,
            total_count: inner.total_count,
            has_more: inner.has_more,
            fetch_state: inner.fetch_state.clone(),
        }
    }

    /// Récupère un élément par identifiant.
    pub fn get(&self, id: &str) -> Option<AssetRecord> {
        let inner = self.inner.lock().unwrap();
        inner.items.iter().find(|record| record.id == id).cloned()
    }

    /// Nombre d'éléments présents dans la fenêtre.
    pub fn len(&self) -> usize {
        self.inner.lock().unwrap().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Index global du premier élément de la fenêtre.
    pub fn base_global_offset(&self) -> usize {
        self.inner.lock().unwrap().base_global_offset
    }

    /// Nombre total d'éléments de la collection au dernier fetch.
    pub fn total_count(&self) -> usize {
        self.inner.lock().unwrap().total_count
    }

    /// Reste-t-il des éléments à charger ?
    pub fn has_more(&self) -> bool {
        self.inner.lock().unwrap().has_more
    }

    /// État courant de la machine de fetch.
    pub fn fetch_state(&self) -> FetchState {
        self.inner.lock().unwrap().fetch_state.clone()
    }

    /// Message du dernier échec de fetch, le cas échéant.
    pub fn last_error(&self) -> Option<String> {
        match &self.inner.lock().unwrap().fetch_state {
            FetchState::Error(message) => Some(message.clone()),
            _ => None,
        }
    }

    /// Configuration de la fenêtre.
    pub fn config(&self) -> &WindowConfig {
        &self.config
    }
}
