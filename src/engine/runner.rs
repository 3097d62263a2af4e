//! Drives a `SequenceGame` against its collaborators.
//!
//! The runner is cooperative and single-threaded. Each `tick` performs one
//! unit of work (one start poll, one full playback, or one gesture poll) and
//! all waiting goes through the injected `Clock`. There is no timeout on
//! gesture collection: the player has unlimited time per symbol.

use log::{debug, info, trace};

use crate::core::{GameConfig, Symbol, SymbolRng};
use crate::error::GameError;
use crate::io::{
    Clock, GestureSource, ImmediateStart, LogReporter, NullSink, PlaybackSink, ScoreReporter,
    StartSignal, StdClock, SymbolSource,
};

use super::outcome::{GameOutcome, GuessOutcome};
use super::state::{GamePhase, SequenceGame};

/// What a single `tick` did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tick {
    /// Start signal not asserted yet.
    AwaitingStart,
    /// Start signal seen; first symbol drawn.
    Started,
    /// Full sequence of `length` symbols played back.
    PlayedBack { length: usize },
    /// Polled, no gesture asserted.
    NoGesture,
    /// Correct guess at `position`, round continues.
    Accepted { symbol: Symbol, position: usize },
    /// `round` reproduced; next symbol drawn.
    RoundComplete { round: usize },
    /// Mismatch; score reported.
    GameOver { score: u32 },
    /// Game already finished; nothing to do.
    Idle,
}

/// Owns one game and the capabilities that feed it.
pub struct GameRunner {
    config: GameConfig,
    game: SequenceGame,
    symbols: Box<dyn SymbolSource>,
    sink: Box<dyn PlaybackSink>,
    gestures: Box<dyn GestureSource>,
    start: Box<dyn StartSignal>,
    reporter: Box<dyn ScoreReporter>,
    clock: Box<dyn Clock>,
    attract_lit: bool,
    empty_polls: u64,
}

impl std::fmt::Debug for GameRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameRunner")
            .field("config", &self.config)
            .field("game", &self.game)
            .field("empty_polls", &self.empty_polls)
            .finish()
    }
}

impl GameRunner {
    /// Start building a runner. Gestures are the only required capability.
    pub fn builder(config: GameConfig, gestures: impl GestureSource + 'static) -> GameRunnerBuilder {
        GameRunnerBuilder::new(config, gestures)
    }

    // === Accessors ===

    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// The underlying state machine.
    #[must_use]
    pub fn game(&self) -> &SequenceGame {
        &self.game
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        self.game.phase()
    }

    /// Polls this game that found no gesture asserted.
    #[must_use]
    pub fn empty_polls(&self) -> u64 {
        self.empty_polls
    }

    /// Outcome of the game once finished.
    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.game.outcome()
    }

    // === Driving ===

    /// Perform one unit of work for the current phase.
    pub fn tick(&mut self) -> Result<Tick, GameError> {
        match self.game.phase() {
            GamePhase::AwaitingStart => self.poll_start(),
            GamePhase::Playback => self.play_back(),
            GamePhase::Collecting => self.collect(),
            GamePhase::Finished => Ok(Tick::Idle),
        }
    }

    /// Tick until the game is finished and return its outcome.
    ///
    /// Blocks for as long as the start signal and the player take.
    pub fn run(&mut self) -> Result<GameOutcome, GameError> {
        while self.game.phase() != GamePhase::Finished {
            self.tick()?;
        }
        self.game.outcome().ok_or(GameError::WrongPhase {
            expected: GamePhase::Finished,
            actual: self.game.phase(),
        })
    }

    /// Discard the current game. The next tick waits for a new start signal.
    pub fn new_game(&mut self) {
        debug!("Resetting for a new game");
        self.game.reset();
        self.attract_lit = false;
        self.empty_polls = 0;
    }

    fn draw(&mut self) -> Symbol {
        self.symbols.draw_symbol(self.config.symbol_count)
    }

    fn poll_start(&mut self) -> Result<Tick, GameError> {
        let timings = &self.config.timings;

        if !self.start.start_signal() {
            self.attract_lit = !self.attract_lit;
            self.sink.attract(self.attract_lit);
            self.clock.sleep(timings.start_poll_interval);
            return Ok(Tick::AwaitingStart);
        }

        info!("Game started with {} symbols", self.config.symbol_count);
        for symbol in Symbol::all(self.config.symbol_count) {
            self.sink.render(symbol, timings.intro_step);
        }
        self.clock.sleep(timings.after_playback);

        let first = self.draw();
        self.game.start(first)?;
        Ok(Tick::Started)
    }

    fn play_back(&mut self) -> Result<Tick, GameError> {
        let timings = &self.config.timings;
        let round = self.game.round();

        debug!("Round {}: playing back sequence", round);
        self.sink.begin_playback(round);
        for &symbol in self.game.sequence() {
            self.sink.render(symbol, timings.show);
            self.clock.sleep(timings.gap);
        }
        self.clock.sleep(timings.after_playback);

        self.game.finish_playback()?;
        Ok(Tick::PlayedBack { length: round })
    }

    fn collect(&mut self) -> Result<Tick, GameError> {
        let timings = &self.config.timings;

        self.sink.prompt();
        let Some(symbol) = self.gestures.sample_gesture() else {
            self.empty_polls += 1;
            trace!("No gesture (poll {})", self.empty_polls);
            self.clock.sleep(timings.poll_interval);
            return Ok(Tick::NoGesture);
        };

        let position = self.game.guesses().len();
        let outcome = self.game.submit(symbol)?;
        debug!("Guess {} at position {}: {:?}", symbol, position, outcome);
        self.sink.render(symbol, timings.feedback);
        self.clock.sleep(timings.settle);

        match outcome {
            GuessOutcome::Correct => Ok(Tick::Accepted { symbol, position }),
            GuessOutcome::RoundComplete => {
                let round = self.game.round();
                self.sink.round_passed(round);
                self.clock.sleep(timings.celebrate);

                let next = self.draw();
                self.game.begin_round(next)?;
                Ok(Tick::RoundComplete { round })
            }
            GuessOutcome::Mismatch(_) => {
                let score = self.game.completed_rounds();
                self.sink.game_over(score);
                self.reporter.report_score(score);
                info!("Game over after {} completed rounds", score);
                Ok(Tick::GameOver { score })
            }
        }
    }
}

/// Builder for `GameRunner`.
///
/// Defaults: `SymbolRng` seeded from the config, `NullSink`, `ImmediateStart`,
/// `LogReporter`, `StdClock`.
pub struct GameRunnerBuilder {
    config: GameConfig,
    gestures: Box<dyn GestureSource>,
    symbols: Option<Box<dyn SymbolSource>>,
    sink: Option<Box<dyn PlaybackSink>>,
    start: Option<Box<dyn StartSignal>>,
    reporter: Option<Box<dyn ScoreReporter>>,
    clock: Option<Box<dyn Clock>>,
}

impl GameRunnerBuilder {
    pub fn new(config: GameConfig, gestures: impl GestureSource + 'static) -> Self {
        Self {
            config,
            gestures: Box::new(gestures),
            symbols: None,
            sink: None,
            start: None,
            reporter: None,
            clock: None,
        }
    }

    #[must_use]
    pub fn symbols(mut self, symbols: impl SymbolSource + 'static) -> Self {
        self.symbols = Some(Box::new(symbols));
        self
    }

    #[must_use]
    pub fn sink(mut self, sink: impl PlaybackSink + 'static) -> Self {
        self.sink = Some(Box::new(sink));
        self
    }

    #[must_use]
    pub fn start(mut self, start: impl StartSignal + 'static) -> Self {
        self.start = Some(Box::new(start));
        self
    }

    #[must_use]
    pub fn reporter(mut self, reporter: impl ScoreReporter + 'static) -> Self {
        self.reporter = Some(Box::new(reporter));
        self
    }

    #[must_use]
    pub fn clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Validate the config and assemble the runner.
    pub fn build(self) -> Result<GameRunner, GameError> {
        let game = SequenceGame::from_config(&self.config)?;
        let seed = self.config.seed;

        Ok(GameRunner {
            config: self.config,
            game,
            symbols: self.symbols.unwrap_or_else(|| Box::new(SymbolRng::new(seed))),
            sink: self.sink.unwrap_or_else(|| Box::new(NullSink)),
            gestures: self.gestures,
            start: self.start.unwrap_or_else(|| Box::new(ImmediateStart)),
            reporter: self.reporter.unwrap_or_else(|| Box::new(LogReporter)),
            clock: self.clock.unwrap_or_else(|| Box::new(StdClock)),
            attract_lit: false,
            empty_polls: 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::io::{RecordingClock, RecordingReporter, RecordingSink, ScriptedGestures, ScriptedStart, ScriptedSymbols, SinkEvent};

    fn runner(symbols: &[u8], gestures: ScriptedGestures) -> (GameRunner, RecordingSink, RecordingReporter, RecordingClock) {
        let sink = RecordingSink::new();
        let reporter = RecordingReporter::new();
        let clock = RecordingClock::new();
        let runner = GameRunner::builder(GameConfig::default(), gestures)
            .symbols(ScriptedSymbols::from_indices(symbols))
            .sink(sink.clone())
            .reporter(reporter.clone())
            .clock(clock.clone())
            .build()
            .unwrap();
        (runner, sink, reporter, clock)
    }

    #[test]
    fn test_build_rejects_bad_config() {
        let result = GameRunner::builder(GameConfig::new(0), ScriptedGestures::idle()).build();
        assert!(matches!(result, Err(GameError::Config { .. })));
    }

    #[test]
    fn test_tick_sequence() {
        let (mut runner, _, _, _) = runner(&[2, 1], ScriptedGestures::from_indices(&[2, 2, 0]));

        assert_eq!(runner.tick().unwrap(), Tick::Started);
        assert_eq!(runner.tick().unwrap(), Tick::PlayedBack { length: 1 });
        assert_eq!(runner.tick().unwrap(), Tick::RoundComplete { round: 1 });
        assert_eq!(runner.tick().unwrap(), Tick::PlayedBack { length: 2 });
        assert_eq!(
            runner.tick().unwrap(),
            Tick::Accepted { symbol: Symbol(2), position: 0 }
        );
        assert_eq!(runner.tick().unwrap(), Tick::GameOver { score: 1 });
        assert_eq!(runner.tick().unwrap(), Tick::Idle);
    }

    #[test]
    fn test_waits_for_start_with_attract_blink() {
        let sink = RecordingSink::new();
        let mut runner = GameRunner::builder(GameConfig::default(), ScriptedGestures::idle())
            .start(ScriptedStart::after(3))
            .sink(sink.clone())
            .clock(RecordingClock::new())
            .build()
            .unwrap();

        for _ in 0..3 {
            assert_eq!(runner.tick().unwrap(), Tick::AwaitingStart);
        }
        assert_eq!(runner.phase(), GamePhase::AwaitingStart);
        assert!(runner.game().sequence().is_empty());
        assert_eq!(runner.tick().unwrap(), Tick::Started);

        let frames: Vec<_> = sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                SinkEvent::Attract { lit } => Some(lit),
                _ => None,
            })
            .collect();
        assert_eq!(frames, vec![true, false, true]);
    }

    #[test]
    fn test_intro_renders_every_symbol() {
        let (mut runner, sink, _, _) = runner(&[3], ScriptedGestures::idle());
        runner.tick().unwrap();

        assert_eq!(sink.rendered(), Symbol::all(4).collect::<Vec<_>>());
    }

    #[test]
    fn test_playback_timing() {
        let (mut runner, sink, _, clock) = runner(&[1], ScriptedGestures::idle());
        runner.tick().unwrap();
        sink.clear();
        let before = clock.sleeps().len();

        runner.tick().unwrap();

        let timings = runner.config().timings.clone();
        assert_eq!(
            sink.events(),
            vec![
                SinkEvent::BeginPlayback { round: 1 },
                SinkEvent::Rendered { symbol: Symbol(1), duration: timings.show },
            ]
        );
        assert_eq!(clock.sleeps()[before..].to_vec(), vec![timings.gap, timings.after_playback]);
    }

    #[test]
    fn test_settle_after_each_accepted_gesture() {
        let config = GameConfig::default().with_settle(Duration::from_millis(70));
        let clock = RecordingClock::new();
        let mut runner = GameRunner::builder(config, ScriptedGestures::from_indices(&[0, 1]))
            .symbols(ScriptedSymbols::from_indices(&[1]))
            .clock(clock.clone())
            .reporter(RecordingReporter::new())
            .build()
            .unwrap();

        runner.run().unwrap();

        let settles = clock
            .sleeps()
            .iter()
            .filter(|&&d| d == Duration::from_millis(70))
            .count();
        assert_eq!(settles, 1);
    }

    #[test]
    fn test_run_reports_once() {
        let (mut runner, sink, reporter, _) = runner(&[0, 3, 2], ScriptedGestures::from_indices(&[0, 0, 3, 0, 1]));

        let outcome = runner.run().unwrap();
        assert_eq!(outcome.score, 2);
        assert_eq!(reporter.scores(), vec![2]);
        assert!(sink.events().contains(&SinkEvent::GameOver { score: 2 }));

        // Finished games stay finished
        assert_eq!(runner.tick().unwrap(), Tick::Idle);
        assert_eq!(runner.run().unwrap(), outcome);
        assert_eq!(reporter.scores(), vec![2]);
    }

    #[test]
    fn test_new_game() {
        let gestures = ScriptedGestures::from_indices(&[1]);
        let more = gestures.clone();
        let (mut runner, _, reporter, _) = runner(&[0, 1], gestures);

        assert_eq!(runner.run().unwrap().score, 0);

        runner.new_game();
        assert_eq!(runner.phase(), GamePhase::AwaitingStart);
        assert!(runner.game().sequence().is_empty());

        // Script continues with symbol 1 for the second game
        more.push([Some(Symbol(1)), Some(Symbol(0))]);
        assert_eq!(runner.run().unwrap().score, 1);
        assert_eq!(reporter.scores(), vec![0, 1]);
    }
}
