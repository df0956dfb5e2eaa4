//! Shared server state: the engine, live sessions and the random source.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tokio::time::Instant;
use uuid::Uuid;

use fracquiz_core::{GameSession, QuizEngine};

use crate::error::ApiError;

/// Idle time after which a session is dropped.
pub const DEFAULT_SESSION_TTL: Duration = Duration::from_secs(30 * 60);
/// Most sessions held at once; the longest idle one is evicted past this.
pub const DEFAULT_MAX_SESSIONS: usize = 10_000;

#[derive(Debug)]
struct SessionEntry {
    session: GameSession,
    expires_at: Instant,
}

/// Sessions keyed by `answer_id`, each expiring after `ttl` without use.
#[derive(Debug)]
pub struct SessionStore {
    entries: HashMap<Uuid, SessionEntry>,
    ttl: Duration,
    capacity: usize,
}

impl SessionStore {
    pub fn new(ttl: Duration, capacity: usize) -> Self {
        Self {
            entries: HashMap::new(),
            ttl,
            capacity: capacity.max(1),
        }
    }

    /// A copy of the live session under `id`. Expired sessions are removed
    /// and reported as missing.
    pub fn get(&mut self, id: &Uuid) -> Option<GameSession> {
        let expired = self.entries.get(id)?.expires_at <= Instant::now();
        if expired {
            tracing::info!("session {id} expired");
            self.entries.remove(id);
            return None;
        }
        self.entries.get(id).map(|entry| entry.session.clone())
    }

    pub fn contains(&mut self, id: &Uuid) -> bool {
        self.get(id).is_some()
    }

    /// Store `session` under `id` and restart its idle clock.
    pub fn insert(&mut self, id: Uuid, session: GameSession) {
        let now = Instant::now();
        self.entries.retain(|_, entry| entry.expires_at > now);

        if !self.entries.contains_key(&id) && self.entries.len() >= self.capacity {
            let oldest = self
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.expires_at)
                .map(|(oldest, _)| *oldest);
            if let Some(oldest) = oldest {
                tracing::debug!("evicting session {oldest}");
                self.entries.remove(&oldest);
            }
        }

        self.entries.insert(
            id,
            SessionEntry {
                session,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Sessions held, expired ones not yet swept included.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

pub struct AppState {
    pub engine: QuizEngine,
    sessions: Mutex<SessionStore>,
    rng: Mutex<StdRng>,
}

impl AppState {
    /// A fixed `seed` makes the sequence of questions reproducible.
    pub fn new(engine: QuizEngine, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        Self {
            engine,
            sessions: Mutex::new(SessionStore::new(
                DEFAULT_SESSION_TTL,
                DEFAULT_MAX_SESSIONS,
            )),
            rng: Mutex::new(rng),
        }
    }

    pub fn with_session_limits(mut self, ttl: Duration, max_sessions: usize) -> Self {
        self.sessions = Mutex::new(SessionStore::new(ttl, max_sessions));
        self
    }

    pub fn sessions(&self) -> Result<MutexGuard<'_, SessionStore>, ApiError> {
        self.sessions
            .lock()
            .map_err(|_| ApiError::Internal("session store poisoned".into()))
    }

    pub fn rng(&self) -> Result<MutexGuard<'_, StdRng>, ApiError> {
        self.rng
            .lock()
            .map_err(|_| ApiError::Internal("random source poisoned".into()))
    }

    pub fn session_count(&self) -> Result<usize, ApiError> {
        Ok(self.sessions()?.len())
    }
}
