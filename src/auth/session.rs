use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use actix_session::Session;
use rand::Rng;

use crate::errors::AppError;
use crate::models::selection::BoardState;

const VIEWER_KEY: &str = "viewer_id";
const IDLE_SECS: u64 = 12 * 60 * 60;
const MAX_VIEWERS: usize = 10_000;

struct StoredBoard {
    state: BoardState,
    touched: Instant,
}

/// Per-viewer board state, kept server-side.
///
/// The session cookie only carries a random viewer id, so its size does not
/// depend on how many departments the feed reports. Entries idle for longer
/// than 12 hours are dropped lazily on write, and the oldest entry makes room
/// once `MAX_VIEWERS` is reached.
#[derive(Clone, Default)]
pub struct BoardStore {
    boards: Arc<Mutex<HashMap<String, StoredBoard>>>,
}

impl BoardStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The viewer's selection and page, or a fresh state for a new viewer.
    pub fn load(&self, session: &Session) -> BoardState {
        let viewer = match session.get::<String>(VIEWER_KEY) {
            Ok(Some(id)) => id,
            Ok(None) => return BoardState::default(),
            Err(e) => {
                log::warn!("Discarding unreadable viewer id: {e}");
                return BoardState::default();
            }
        };
        let mut map = self.boards.lock().unwrap_or_else(|e| e.into_inner());
        match map.get_mut(&viewer) {
            Some(stored) => {
                stored.touched = Instant::now();
                stored.state.clone()
            }
            None => BoardState::default(),
        }
    }

    pub fn store(&self, session: &Session, state: &BoardState) -> Result<(), AppError> {
        let viewer = match session.get::<String>(VIEWER_KEY) {
            Ok(Some(id)) => id,
            _ => {
                let id = generate_viewer_id();
                session.insert(VIEWER_KEY, &id)?;
                id
            }
        };

        let mut map = self.boards.lock().unwrap_or_else(|e| e.into_inner());
        let now = Instant::now();
        let cutoff = now.checked_sub(Duration::from_secs(IDLE_SECS));
        if let Some(cutoff) = cutoff {
            map.retain(|_, stored| stored.touched > cutoff);
        }
        if map.len() >= MAX_VIEWERS && !map.contains_key(&viewer) {
            let oldest = map
                .iter()
                .min_by_key(|(_, stored)| stored.touched)
                .map(|(id, _)| id.clone());
            if let Some(oldest) = oldest {
                map.remove(&oldest);
            }
        }
        map.insert(viewer, StoredBoard { state: state.clone(), touched: now });
        Ok(())
    }

    /// Number of viewers with stored state.
    pub fn len(&self) -> usize {
        self.boards.lock().unwrap_or_else(|e| e.into_inner()).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Random 16-byte hex id.
fn generate_viewer_id() -> String {
    let bytes: [u8; 16] = rand::rng().random();
    hex::encode(bytes)
}
