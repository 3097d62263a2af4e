//! Console demo: a simulated player plays one or more games.
//!
//! Usage: `simon-autoplay [SEED] [GAMES]`. Set `RUST_LOG=debug` for
//! per-round logging.

use std::io::Write;
use std::time::Duration;

use log::info;

use simon_says::io::{PlaybackSink, SimulatedPlayer, StdClock};
use simon_says::{Direction, GameConfig, GameError, GameRunner, Symbol, SymbolRng, Timings};

/// Longest game the simulated player is allowed to survive.
const MAX_FAIL_ROUND: usize = 8;

#[derive(Default)]
struct ConsoleSink {
    prompted: bool,
}

impl ConsoleSink {
    /// Arrow plus the cue tone the board would play.
    fn glyph(symbol: Symbol) -> String {
        Direction::from_symbol(symbol)
            .map(|d| format!("{} ({} Hz)", d, d.tone_hz()))
            .unwrap_or_else(|| symbol.0.to_string())
    }

    fn flush() {
        let _ = std::io::stdout().flush();
    }
}

impl PlaybackSink for ConsoleSink {
    fn render(&mut self, symbol: Symbol, duration: Duration) {
        print!("{} ", Self::glyph(symbol));
        Self::flush();
        std::thread::sleep(duration);
    }

    fn begin_playback(&mut self, round: usize) {
        self.prompted = false;
        print!("\nround {:>2}  simon: ", round);
        Self::flush();
    }

    fn prompt(&mut self) {
        if !self.prompted {
            self.prompted = true;
            print!(" player: ");
            Self::flush();
        }
    }

    fn round_passed(&mut self, _round: usize) {
        print!(" ok");
        Self::flush();
    }

    fn game_over(&mut self, _score: u32) {
        println!(" wrong!");
    }
}

fn tilt(symbol: Symbol) -> String {
    Direction::from_symbol(symbol)
        .map(|d| d.gesture_name().to_string())
        .unwrap_or_else(|| symbol.to_string())
}

fn main() -> Result<(), GameError> {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let mut args = std::env::args().skip(1);
    let seed: u64 = args.next().and_then(|a| a.parse().ok()).unwrap_or(42);
    let games: usize = args.next().and_then(|a| a.parse().ok()).unwrap_or(1);

    let config = GameConfig::default()
        .with_seed(seed)
        .with_timings(Timings::default().scaled(0.2));

    let mut player_rng = SymbolRng::new(seed).for_context("player");
    let player = SimulatedPlayer::random(config.symbol_count, MAX_FAIL_ROUND, &mut player_rng)
        .with_hesitation(3);

    let mut runner = GameRunner::builder(config, player.hands())
        .sink((player.eyes(), ConsoleSink::default()))
        .reporter(|score: u32| println!("SCORE: {}", score))
        .clock(StdClock)
        .build()?;

    for game in 1..=games {
        if game > 1 {
            player.set_fail_round(player_rng.gen_range_usize(1..MAX_FAIL_ROUND + 1));
            runner.new_game();
        }
        info!("Game {}: simulated player slips in round {}", game, player.fail_round());

        let outcome = runner.run()?;
        info!(
            "Game {} ended in round {} (expected tilt {}, got {})",
            game,
            outcome.final_round(),
            tilt(outcome.mismatch.expected),
            tilt(outcome.mismatch.actual)
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_glyph_shows_arrow_and_tone() {
        assert_eq!(ConsoleSink::glyph(Direction::North.symbol()), "↑ (262 Hz)");
        assert_eq!(ConsoleSink::glyph(Direction::South.symbol()), "↓ (523 Hz)");
        assert_eq!(ConsoleSink::glyph(Symbol(7)), "7");
    }

    #[test]
    fn test_tilt_names_gesture() {
        assert_eq!(tilt(Direction::West.symbol()), "left");
        assert_eq!(tilt(Symbol(5)), "Symbol 5");
    }
}
