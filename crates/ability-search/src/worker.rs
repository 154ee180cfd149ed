//! Background search.
//!
//! A search runs on its own thread against a clone of the game state, so the
//! session stays usable while it thinks. The result carries the revision it
//! was computed at; [`SearchResult::commit`] refuses it once the game has
//! moved on.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use ability_engine::{Game, GameError};

use crate::negamax::{SearchOutcome, Searcher};
use crate::SearchConfig;

/// A finished search tied to the game revision it searched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchResult {
    pub revision: u64,
    pub outcome: SearchOutcome,
}

impl SearchResult {
    /// Plays the found move if `game` is still at the searched revision.
    pub fn commit(&self, game: &mut Game) -> Result<(), GameError> {
        game.accept_search(self.revision, self.outcome.best)
    }
}

/// Handle to a running search.
pub struct SearchHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<Option<SearchResult>>,
}

impl SearchHandle {
    /// Asks the search to stop. A stopped search yields no result.
    pub fn cancel(&self) {
        self.stop.store(true, Ordering::Relaxed);
    }

    pub fn is_finished(&self) -> bool {
        self.thread.is_finished()
    }

    /// Waits for the search to end.
    ///
    /// Returns `None` if it was cancelled or the side to move had no move.
    pub fn join(self) -> Option<SearchResult> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}

/// Starts searching the current position of `game` on a new thread.
pub fn spawn_search(game: &Game, config: &SearchConfig) -> SearchHandle {
    let mut state = game.state().clone();
    let revision = game.revision();
    let config = config.clone();
    let stop = Arc::new(AtomicBool::new(false));
    let flag = Arc::clone(&stop);

    let thread = thread::spawn(move || {
        let mut searcher = Searcher::with_stop(&config, flag);
        let outcome = searcher.search(&mut state);
        if outcome.is_none() {
            tracing::debug!(revision, nodes = searcher.nodes(), "search ended without a move");
        }
        outcome.map(|outcome| SearchResult { revision, outcome })
    });

    SearchHandle { stop, thread }
}
