// Replay module for re-running the decision engine on logged turns
//
// 1. Parse JSONL debug logs written by DebugLogger
// 2. Re-decide every (or selected) turn with the current configuration
// 3. Compare against the logged move and report

use log::{info, warn};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;
use std::time::Instant;

use crate::bot::Bot;
use crate::config::Config;
use crate::grid::Grid;
use crate::types::{Battlesnake, Board, Direction};
use crate::weights::WeightField;

/// Represents a single log entry from the debug JSONL file
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct LogEntry {
    pub turn: i32,
    /// Id of the deciding snake; older logs without it fall back to the first snake
    #[serde(default)]
    pub you_id: Option<String>,
    pub chosen_move: String,
    pub board: Board,
    pub timestamp: String,
}

impl LogEntry {
    /// The snake that made the logged decision
    pub fn deciding_snake(&self) -> Result<&Battlesnake, String> {
        match &self.you_id {
            Some(id) => self
                .board
                .snakes
                .iter()
                .find(|s| &s.id == id)
                .ok_or_else(|| format!("Snake with id '{}' not found in board state", id)),
            None => self
                .board
                .snakes
                .first()
                .ok_or_else(|| "No snakes found in board state".to_string()),
        }
    }
}

/// Result of replaying a single turn
#[derive(Debug, Clone)]
pub struct ReplayResult {
    pub turn: i32,
    pub original_move: Direction,
    pub replayed_move: Direction,
    pub matches: bool,
    pub computation_time_ms: u128,
}

/// Statistics for a complete replay session
#[derive(Debug, Default)]
pub struct ReplayStats {
    pub total_turns: usize,
    pub matches: usize,
    pub mismatches: usize,
    pub match_rate: f64,
}

/// Replay engine for analyzing debug logs
pub struct ReplayEngine {
    bot: Bot,
    verbose: bool,
}

impl ReplayEngine {
    pub fn new(config: Config, verbose: bool) -> Self {
        ReplayEngine {
            bot: Bot::new(config),
            verbose,
        }
    }

    /// Loads all log entries from a JSONL file
    pub fn load_log_file<P: AsRef<Path>>(&self, log_path: P) -> Result<Vec<LogEntry>, String> {
        let file = File::open(log_path.as_ref())
            .map_err(|e| format!("Failed to open log file: {}", e))?;

        let entries = Self::parse_lines(BufReader::new(file))?;
        info!("Loaded {} log entries", entries.len());
        Ok(entries)
    }

    /// Parses JSONL from any reader, skipping blank lines
    pub fn parse_lines<R: BufRead>(reader: R) -> Result<Vec<LogEntry>, String> {
        let mut entries = Vec::new();

        for (line_num, line) in reader.lines().enumerate() {
            let line = line.map_err(|e| format!("Failed to read line {}: {}", line_num + 1, e))?;
            if line.trim().is_empty() {
                continue;
            }

            let entry: LogEntry = serde_json::from_str(&line)
                .map_err(|e| format!("Failed to parse JSON on line {}: {}", line_num + 1, e))?;
            entries.push(entry);
        }

        Ok(entries)
    }

    /// Re-decides one logged turn and compares it with the logged move
    pub fn replay_entry(&self, entry: &LogEntry) -> Result<ReplayResult, String> {
        let you = entry.deciding_snake()?;
        let original_move: Direction = entry.chosen_move.parse()?;

        let start_time = Instant::now();
        let replayed_move = self.bot.decide(&entry.board, you, entry.turn);
        let computation_time_ms = start_time.elapsed().as_millis();

        let matches = original_move == replayed_move;

        if self.verbose {
            if matches {
                info!(
                    "Turn {}: MATCH - {} ({}ms)",
                    entry.turn,
                    replayed_move.as_str(),
                    computation_time_ms
                );
            } else {
                warn!(
                    "Turn {}: MISMATCH - Original: {}, Replayed: {} ({}ms)\n{}",
                    entry.turn,
                    original_move.as_str(),
                    replayed_move.as_str(),
                    computation_time_ms,
                    self.mismatch_dump(&entry.board, you)
                );
            }
        }

        Ok(ReplayResult {
            turn: entry.turn,
            original_move,
            replayed_move,
            matches,
            computation_time_ms,
        })
    }

    /// Occupancy map followed by the weight field the bot saw on that turn
    fn mismatch_dump(&self, board: &Board, you: &Battlesnake) -> String {
        let grid = Grid::build(board, you);
        let field = WeightField::compute(&grid, you, &self.bot.config().weights);
        format!("{}\n{}", grid.render(), field.render())
    }

    /// Replays all entries, skipping (and logging) turns that cannot be replayed
    pub fn replay_all(&self, entries: &[LogEntry]) -> Vec<ReplayResult> {
        entries
            .iter()
            .filter_map(|entry| match self.replay_entry(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!("Failed to replay turn {}: {}", entry.turn, e);
                    None
                }
            })
            .collect()
    }

    /// Replays specific turns from a log file
    pub fn replay_turns(
        &self,
        entries: &[LogEntry],
        turn_numbers: &[i32],
    ) -> Result<Vec<ReplayResult>, String> {
        let mut results = Vec::new();

        for turn_num in turn_numbers {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn_num)
                .ok_or_else(|| format!("Turn {} not found in log file", turn_num))?;
            results.push(self.replay_entry(entry)?);
        }

        Ok(results)
    }

    pub fn generate_stats(results: &[ReplayResult]) -> ReplayStats {
        let total_turns = results.len();
        let matches = results.iter().filter(|r| r.matches).count();
        let mismatches = total_turns - matches;
        let match_rate = if total_turns > 0 {
            (matches as f64 / total_turns as f64) * 100.0
        } else {
            0.0
        };

        ReplayStats {
            total_turns,
            matches,
            mismatches,
            match_rate,
        }
    }

    /// Prints a summary report plus every mismatch
    pub fn print_report(&self, results: &[ReplayResult]) {
        let stats = Self::generate_stats(results);

        println!("\n===========================================================");
        println!("                    REPLAY REPORT");
        println!("===========================================================");
        println!("Total Turns:    {}", stats.total_turns);
        println!("Matches:        {} ({:.1}%)", stats.matches, stats.match_rate);
        println!("Mismatches:     {}", stats.mismatches);

        if !results.is_empty() {
            let avg_time: f64 = results
                .iter()
                .map(|r| r.computation_time_ms as f64)
                .sum::<f64>()
                / results.len() as f64;
            println!("Average Computation Time:   {:.1}ms", avg_time);
        }
        println!();

        for result in results.iter().filter(|r| !r.matches) {
            println!(
                "Turn {}: {} -> {} ({}ms)",
                result.turn,
                result.original_move.as_str(),
                result.replayed_move.as_str(),
                result.computation_time_ms
            );
        }
    }

    /// Checks that the logged move of each listed turn is one of the acceptable moves
    pub fn validate_expected_moves(
        entries: &[LogEntry],
        expected_moves: &[(i32, Vec<Direction>)],
    ) -> Result<(), String> {
        for (turn, acceptable) in expected_moves {
            let entry = entries
                .iter()
                .find(|e| e.turn == *turn)
                .ok_or_else(|| format!("Turn {} not found in log", turn))?;

            let actual_move: Direction = entry.chosen_move.parse()?;

            if !acceptable.contains(&actual_move) {
                return Err(format!(
                    "Turn {}: Expected one of {:?}, but got {}",
                    turn,
                    acceptable.iter().map(|d| d.as_str()).collect::<Vec<_>>(),
                    actual_move.as_str()
                ));
            }
        }

        Ok(())
    }
}
