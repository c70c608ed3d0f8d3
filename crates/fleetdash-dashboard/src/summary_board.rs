//! Latest-cycle-wins state holder for one dashboard view.
//!
//! Every refresh starts a new cycle and receives a ticket carrying the cycle
//! generation. Results are applied only while their ticket is still the
//! newest one, so a slow cycle that settles after a newer cycle started is
//! dropped instead of overwriting the newer view.

use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum FetchState<T> {
    NotFetched,
    Fetching {
        generation: u64,
    },
    Succeeded {
        generation: u64,
        view: T,
    },
    PartiallySucceeded {
        generation: u64,
        view: T,
        missing_sources: Vec<String>,
    },
    Failed {
        generation: u64,
        message: String,
    },
}

impl<T> FetchState<T> {
    pub fn generation(&self) -> Option<u64> {
        match self {
            Self::NotFetched => None,
            Self::Fetching { generation }
            | Self::Succeeded { generation, .. }
            | Self::PartiallySucceeded { generation, .. }
            | Self::Failed { generation, .. } => Some(*generation),
        }
    }

    pub fn view(&self) -> Option<&T> {
        match self {
            Self::Succeeded { view, .. } | Self::PartiallySucceeded { view, .. } => Some(view),
            _ => None,
        }
    }

    pub fn is_settled(&self) -> bool {
        matches!(
            self,
            Self::Succeeded { .. } | Self::PartiallySucceeded { .. } | Self::Failed { .. }
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Handle for one refresh cycle.
pub struct CycleTicket {
    generation: u64,
}

impl CycleTicket {
    pub fn generation(self) -> u64 {
        self.generation
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CycleOutcome {
    Applied,
    Superseded,
}

#[derive(Debug, Clone, PartialEq)]
/// Settled projection of one cycle, before it is stamped with a generation.
pub enum Settled<T> {
    Complete(T),
    Partial { view: T, missing_sources: Vec<String> },
    Failed(String),
}

pub struct SummaryBoard<T> {
    generation: AtomicU64,
    state: watch::Sender<FetchState<T>>,
}

impl<T: Clone + Send + Sync + 'static> Default for SummaryBoard<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Send + Sync + 'static> SummaryBoard<T> {
    pub fn new() -> Self {
        let (state, _) = watch::channel(FetchState::NotFetched);
        Self {
            generation: AtomicU64::new(0),
            state,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<FetchState<T>> {
        self.state.subscribe()
    }

    pub fn current(&self) -> FetchState<T> {
        self.state.borrow().clone()
    }

    /// Starts a cycle; any earlier cycle still in flight becomes stale.
    pub fn begin_cycle(&self) -> CycleTicket {
        let mut generation = 0;
        self.state.send_modify(|state| {
            generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
            *state = FetchState::Fetching { generation };
        });
        CycleTicket { generation }
    }

    pub fn is_current(&self, ticket: CycleTicket) -> bool {
        self.generation.load(Ordering::SeqCst) == ticket.generation
    }

    /// Publishes a settled cycle unless a newer cycle has started since.
    pub fn commit(&self, ticket: CycleTicket, settled: Settled<T>) -> CycleOutcome {
        let applied = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != ticket.generation {
                return false;
            }
            let generation = ticket.generation;
            *state = match settled {
                Settled::Complete(view) => FetchState::Succeeded { generation, view },
                Settled::Partial {
                    view,
                    missing_sources,
                } => FetchState::PartiallySucceeded {
                    generation,
                    view,
                    missing_sources,
                },
                Settled::Failed(message) => FetchState::Failed {
                    generation,
                    message,
                },
            };
            true
        });

        if applied {
            tracing::info!(generation = ticket.generation, "summary cycle committed");
            CycleOutcome::Applied
        } else {
            tracing::debug!(
                generation = ticket.generation,
                current = self.generation.load(Ordering::SeqCst),
                "discarding superseded summary cycle"
            );
            CycleOutcome::Superseded
        }
    }
}
