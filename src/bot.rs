// Turn orchestration for the Battlesnake API
//
// The decision itself is synchronous and CPU-bound. get_move publishes a cheap
// fallback first, runs the real decision on a blocking thread, and answers with
// whatever is published when the decision finishes or the budget runs out.

use log::info;
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::debug_logger::DebugLogger;
use crate::grid::Grid;
use crate::selector::{fallback_move, MoveSelector};
use crate::types::{Battlesnake, Board, Direction, Game, InfoResponse, MoveResponse};

/// Lock-free shared state between the async poller and the decision thread
#[derive(Debug)]
pub struct SharedSearchState {
    /// Move to answer with (encoded via Direction::index)
    best_move: AtomicU8,
    /// Set once the decision thread has published its final move
    search_complete: AtomicBool,
}

impl SharedSearchState {
    /// Creates a state that already holds `fallback`
    pub fn new(fallback: Direction) -> Self {
        SharedSearchState {
            best_move: AtomicU8::new(fallback.index()),
            search_complete: AtomicBool::new(false),
        }
    }

    pub fn publish(&self, dir: Direction) {
        self.best_move.store(dir.index(), Ordering::Release);
        self.search_complete.store(true, Ordering::Release);
    }

    pub fn best_move(&self) -> Direction {
        Direction::from_index(self.best_move.load(Ordering::Acquire))
    }

    pub fn is_complete(&self) -> bool {
        self.search_complete.load(Ordering::Acquire)
    }
}

/// Battlesnake Bot
/// Takes static configuration and exposes methods corresponding to API endpoints
pub struct Bot {
    config: Config,
    debug_logger: DebugLogger,
}

impl Bot {
    /// Creates a new Bot instance with debug logging disabled
    pub fn new(config: Config) -> Self {
        Bot {
            config,
            debug_logger: DebugLogger::disabled(),
        }
    }

    pub fn with_debug_logger(config: Config, debug_logger: DebugLogger) -> Self {
        Bot {
            config,
            debug_logger,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Returns bot metadata and appearance
    /// Corresponds to GET / endpoint
    pub fn info(&self) -> InfoResponse {
        info!("INFO");

        InfoResponse {
            apiversion: "1".to_string(),
            author: "contour-snake".to_string(),
            color: "#3E8E7E".to_string(),
            head: "default".to_string(),
            tail: "default".to_string(),
        }
    }

    /// Called when a game starts
    /// Corresponds to POST /start endpoint
    pub fn start(&self, game: &Game, _turn: &i32, board: &Board, _you: &Battlesnake) {
        info!(
            "GAME START {} ({}x{}, {} snakes, timeout {}ms)",
            game.id,
            board.width,
            board.height,
            board.snakes.len(),
            game.timeout
        );
    }

    /// Called when a game ends
    /// Corresponds to POST /end endpoint
    pub fn end(&self, game: &Game, turn: &i32, _board: &Board, _you: &Battlesnake) {
        info!("GAME OVER {} after {} turns", game.id, turn);
    }

    /// Computes and returns the next move within the configured time budget
    /// Corresponds to POST /move endpoint
    ///
    /// 1. Publishes the first legal move as a fallback
    /// 2. Runs the full decision on a blocking thread
    /// 3. Polls until the decision lands or the budget is spent
    pub async fn get_move(
        &self,
        _game: &Game,
        turn: &i32,
        board: &Board,
        you: &Battlesnake,
    ) -> MoveResponse {
        let start_time = Instant::now();
        let turn = *turn;

        let fallback = fallback_move(&Grid::build(board, you), you.head);
        let shared = Arc::new(SharedSearchState::new(fallback));
        let shared_clone = shared.clone();

        let board_owned = board.clone();
        let you_owned = you.clone();
        let config = self.config.clone();

        tokio::task::spawn_blocking(move || {
            let dir = Bot::decide_with_config(&config, &board_owned, &you_owned, turn);
            shared_clone.publish(dir);
        });

        let effective_budget = self.config.timing.effective_budget_ms();
        let polling_interval = Duration::from_millis(self.config.timing.polling_interval_ms.max(1));

        loop {
            if shared.is_complete() {
                break;
            }
            if start_time.elapsed().as_millis() as u64 >= effective_budget {
                log::warn!(
                    "Turn {}: budget of {}ms exhausted, answering with fallback",
                    turn,
                    effective_budget
                );
                break;
            }
            tokio::time::sleep(polling_interval).await;
        }

        let chosen_move = shared.best_move();

        info!(
            "Turn {}: Chose {} ({:?}, complete: {}, time: {}ms)",
            turn,
            chosen_move.as_str(),
            self.config.strategy.mode,
            shared.is_complete(),
            start_time.elapsed().as_millis()
        );

        self.debug_logger
            .log_move(turn, &you.id, board.clone(), chosen_move);

        MoveResponse {
            r#move: chosen_move.as_str().to_string(),
            shout: None,
        }
    }

    /// Synchronous decision for one turn, used by replay and tests
    pub fn decide(&self, board: &Board, you: &Battlesnake, turn: i32) -> Direction {
        Self::decide_with_config(&self.config, board, you, turn)
    }

    fn decide_with_config(config: &Config, board: &Board, you: &Battlesnake, turn: i32) -> Direction {
        let mut rng = Self::turn_rng(config, turn);
        MoveSelector::new(config).decide(board, you, &mut rng)
    }

    /// Fresh RNG for one turn; reproducible when a seed is configured
    fn turn_rng(config: &Config, turn: i32) -> StdRng {
        match config.strategy.rng_seed {
            Some(seed) => StdRng::seed_from_u64(seed.wrapping_add(turn as u64)),
            None => StdRng::from_os_rng(),
        }
    }
}
