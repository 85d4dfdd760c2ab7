//! Session orchestration: rounds, balance, and the game-over loop

use log::debug;
use rand::Rng;
use rand::rngs::StdRng;
use serde::Serialize;

use crate::config::SessionConfig;
use crate::error::SlotResult;
use crate::grid::{GridSpinner, SpinGrid};
use crate::money::round_to_cents;
use crate::paytable::{self, SpinEvaluation};
use crate::sampler::SymbolSampler;
use crate::stake::{StakeContext, StakeValidator, StakeVerdict};
use crate::symbols::SymbolCatalog;

/// Supplies the next stake when the session asks for one. Implementations
/// own every prompt and parse concern; the session only ever sees a number,
/// or an error when input is exhausted.
pub trait StakeSource {
    fn request_stake(&mut self) -> SlotResult<f64>;
}

/// Receives session events as they happen. Purely observational; nothing an
/// observer does can change the outcome of a round.
pub trait SessionObserver {
    fn on_event(&mut self, event: &SessionEvent);
}

/// Observer that ignores everything
#[derive(Debug, Default)]
pub struct NullObserver;

impl SessionObserver for NullObserver {
    fn on_event(&mut self, _event: &SessionEvent) {}
}

/// Lifecycle phase of the session's current round
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundPhase {
    AwaitingStake,
    Spinning,
    Evaluating,
    BalanceUpdated,
    GameOver,
}

/// Everything observable that happens during a session
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    /// Session opened with its starting balance and grid shape
    SessionStarted { balance: f64, rows: u8, columns: u8 },
    /// A round began
    SpinStarted { round: u64 },
    /// The spun grid, before the stake is settled
    GridRevealed { grid: SpinGrid },
    /// A stake failed validation; a replacement is being collected
    StakeRejected { stake: f64, reasons: Vec<String> },
    /// Row wins for the round
    WinsEvaluated { evaluation: SpinEvaluation },
    /// The balance after deducting the stake and adding the win
    BalanceSettled {
        round: u64,
        stake: f64,
        win: f64,
        balance: f64,
    },
    /// The balance is exhausted; the session is over
    SessionEnded { balance: f64, stats: SessionStats },
}

/// Aggregate statistics for one session
#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionStats {
    pub rounds: u64,
    pub total_staked: f64,
    pub total_won: f64,
    pub winning_rounds: u64,
    pub losing_rounds: u64,
    pub biggest_win: f64,
    pub max_win_ratio: f64,
}

impl SessionStats {
    /// Return to player, percent
    pub fn rtp(&self) -> f64 {
        if self.total_staked > 0.0 {
            (self.total_won / self.total_staked) * 100.0
        } else {
            0.0
        }
    }

    /// Share of rounds that paid anything, percent
    pub fn hit_rate(&self) -> f64 {
        if self.rounds > 0 {
            (self.winning_rounds as f64 / self.rounds as f64) * 100.0
        } else {
            0.0
        }
    }

    fn record(&mut self, stake: f64, evaluation: &SpinEvaluation) {
        self.rounds += 1;
        self.total_staked += stake;
        self.total_won += evaluation.total_win;
        if evaluation.is_win() {
            self.winning_rounds += 1;
        } else {
            self.losing_rounds += 1;
        }
        if evaluation.total_win > self.biggest_win {
            self.biggest_win = evaluation.total_win;
        }
        if evaluation.win_ratio > self.max_win_ratio {
            self.max_win_ratio = evaluation.win_ratio;
        }
    }
}

/// Settled outcome of one round
#[derive(Debug, Clone, Serialize)]
pub struct RoundOutcome {
    pub round: u64,
    pub stake: f64,
    pub evaluation: SpinEvaluation,
    pub balance_after: f64,
}

/// The round controller. Owns the balance and the catalog, spins grids,
/// settles stakes through the validator, and loops until the balance is
/// exhausted.
pub struct Session<R: Rng, S, V, O> {
    catalog: SymbolCatalog,
    spinner: GridSpinner<R>,
    balance: f64,
    round: u64,
    phase: RoundPhase,
    stats: SessionStats,
    stakes: S,
    validator: V,
    observer: O,
}

impl<S, V, O> Session<StdRng, S, V, O>
where
    S: StakeSource,
    V: StakeValidator,
    O: SessionObserver,
{
    /// Build a session from its configuration, seeding the spinner from the
    /// config seed or the OS
    pub fn new(
        catalog: SymbolCatalog,
        config: &SessionConfig,
        stakes: S,
        validator: V,
        observer: O,
    ) -> SlotResult<Self> {
        let sampler = match config.seed {
            Some(seed) => SymbolSampler::from_seed(seed),
            None => SymbolSampler::from_os_rng(),
        };
        Self::with_spinner(
            catalog,
            config,
            GridSpinner::new(config.grid, sampler),
            stakes,
            validator,
            observer,
        )
    }
}

impl<R, S, V, O> Session<R, S, V, O>
where
    R: Rng,
    S: StakeSource,
    V: StakeValidator,
    O: SessionObserver,
{
    /// Build a session around an existing spinner
    pub fn with_spinner(
        catalog: SymbolCatalog,
        config: &SessionConfig,
        spinner: GridSpinner<R>,
        stakes: S,
        validator: V,
        observer: O,
    ) -> SlotResult<Self> {
        config.validate()?;
        Ok(Self {
            catalog,
            spinner,
            balance: round_to_cents(config.initial_balance),
            round: 0,
            phase: RoundPhase::AwaitingStake,
            stats: SessionStats::default(),
            stakes,
            validator,
            observer,
        })
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ROUND EXECUTION
    // ═══════════════════════════════════════════════════════════════════════════

    /// Run rounds until the balance is exhausted. Returns the final stats.
    pub fn run(&mut self) -> SlotResult<SessionStats> {
        if self.phase == RoundPhase::GameOver {
            return Ok(self.stats.clone());
        }

        let spec = self.spinner.spec();
        self.emit(SessionEvent::SessionStarted {
            balance: self.balance,
            rows: spec.rows,
            columns: spec.columns,
        });

        let mut stake = self.stakes.request_stake()?;
        loop {
            self.play_round(stake)?;
            if self.balance <= 0.0 {
                self.set_phase(RoundPhase::GameOver);
                self.emit(SessionEvent::SessionEnded {
                    balance: self.balance,
                    stats: self.stats.clone(),
                });
                return Ok(self.stats.clone());
            }
            self.set_phase(RoundPhase::AwaitingStake);
            stake = self.stakes.request_stake()?;
        }
    }

    /// Play one round. The stake is rounded on entry; if the validator
    /// rejects it, replacements are collected until one passes, and the
    /// round settles with that accepted stake.
    pub fn play_round(&mut self, stake: f64) -> SlotResult<RoundOutcome> {
        let stake = round_to_cents(stake);
        self.round += 1;
        self.set_phase(RoundPhase::Spinning);
        self.emit(SessionEvent::SpinStarted { round: self.round });

        let grid = self.spinner.spin(&self.catalog);
        self.emit(SessionEvent::GridRevealed { grid: grid.clone() });

        let stake = self.settle_valid_stake(stake)?;

        self.set_phase(RoundPhase::Evaluating);
        let evaluation = paytable::evaluate(&self.catalog, &grid, stake);
        self.emit(SessionEvent::WinsEvaluated {
            evaluation: evaluation.clone(),
        });

        self.set_phase(RoundPhase::BalanceUpdated);
        self.balance = round_to_cents(self.balance - stake + evaluation.total_win);
        self.stats.record(stake, &evaluation);
        debug!(
            "round {} settled: stake {:.2} win {:.2} balance {:.2}",
            self.round, stake, evaluation.total_win, self.balance
        );
        self.emit(SessionEvent::BalanceSettled {
            round: self.round,
            stake,
            win: evaluation.total_win,
            balance: self.balance,
        });

        Ok(RoundOutcome {
            round: self.round,
            stake,
            evaluation,
            balance_after: self.balance,
        })
    }

    /// Re-validate until a stake passes. Collecting replacements is session
    /// logic; the prompt mechanics live in the stake source.
    fn settle_valid_stake(&mut self, mut stake: f64) -> SlotResult<f64> {
        loop {
            let verdict = self.validator.validate(&StakeContext {
                stake,
                balance: self.balance,
            });
            match verdict {
                StakeVerdict::Valid => return Ok(stake),
                StakeVerdict::Invalid(reasons) => {
                    debug!("stake {:.2} rejected: {}", stake, reasons.join("; "));
                    self.emit(SessionEvent::StakeRejected { stake, reasons });
                    stake = round_to_cents(self.stakes.request_stake()?);
                }
            }
        }
    }

    fn set_phase(&mut self, phase: RoundPhase) {
        if self.phase != phase {
            debug!("phase {:?} -> {:?}", self.phase, phase);
            self.phase = phase;
        }
    }

    fn emit(&mut self, event: SessionEvent) {
        self.observer.on_event(&event);
    }

    // ═══════════════════════════════════════════════════════════════════════════
    // ACCESSORS
    // ═══════════════════════════════════════════════════════════════════════════

    /// Current balance
    pub fn balance(&self) -> f64 {
        self.balance
    }

    /// Current round phase
    pub fn phase(&self) -> RoundPhase {
        self.phase
    }

    /// Rounds played so far
    pub fn rounds_played(&self) -> u64 {
        self.round
    }

    /// Session statistics so far
    pub fn stats(&self) -> &SessionStats {
        &self.stats
    }

    /// The catalog this session spins
    pub fn catalog(&self) -> &SymbolCatalog {
        &self.catalog
    }

    /// The observer, for inspection after a run
    pub fn observer(&self) -> &O {
        &self.observer
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::GridSpec;
    use crate::error::SlotError;
    use crate::stake::StandardStakeRules;
    use crate::symbols::{Symbol, SymbolColor};
    use std::collections::VecDeque;

    struct ScriptedStakes(VecDeque<f64>);

    impl ScriptedStakes {
        fn new(stakes: &[f64]) -> Self {
            Self(stakes.iter().copied().collect())
        }
    }

    impl StakeSource for ScriptedStakes {
        fn request_stake(&mut self) -> SlotResult<f64> {
            self.0.pop_front().ok_or(SlotError::InputClosed)
        }
    }

    #[derive(Default)]
    struct Recorder(Vec<SessionEvent>);

    impl SessionObserver for Recorder {
        fn on_event(&mut self, event: &SessionEvent) {
            self.0.push(event.clone());
        }
    }

    /// One symbol, so every spun row wins with a known coefficient sum
    fn always_win_catalog(coefficient: f64) -> SymbolCatalog {
        SymbolCatalog::from_symbols(vec![Symbol::regular("A", coefficient, SymbolColor::Red)])
            .unwrap()
    }

    fn config(balance: f64, rows: u8, columns: u8) -> SessionConfig {
        SessionConfig {
            initial_balance: balance,
            grid: GridSpec::new(rows, columns),
            seed: Some(7),
        }
    }

    #[test]
    fn test_round_settles_balance() {
        // 1×3 of coefficient 1.0 pays 3 × stake
        let mut session = Session::new(
            always_win_catalog(1.0),
            &config(100.0, 1, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        )
        .unwrap();

        let outcome = session.play_round(10.0).unwrap();
        assert_eq!(outcome.stake, 10.0);
        assert_eq!(outcome.evaluation.total_win, 30.0);
        assert_eq!(outcome.balance_after, 120.0); // round(100 - 10 + 30)
        assert_eq!(session.balance(), 120.0);
    }

    #[test]
    fn test_stake_rounded_on_entry() {
        let mut session = Session::new(
            always_win_catalog(1.0),
            &config(100.0, 1, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        )
        .unwrap();

        let outcome = session.play_round(10.004).unwrap();
        assert_eq!(outcome.stake, 10.0);
    }

    #[test]
    fn test_rejected_stake_is_replaced() {
        let mut session = Session::new(
            always_win_catalog(1.0),
            &config(100.0, 1, 3),
            ScriptedStakes::new(&[20.0]),
            StandardStakeRules,
            Recorder::default(),
        )
        .unwrap();

        // 200 exceeds the balance; the replacement 20 settles the round
        let outcome = session.play_round(200.0).unwrap();
        assert_eq!(outcome.stake, 20.0);
        assert_eq!(outcome.balance_after, 140.0); // 100 - 20 + 60

        let rejections: Vec<_> = session
            .observer()
            .0
            .iter()
            .filter(|event| matches!(event, SessionEvent::StakeRejected { .. }))
            .collect();
        assert_eq!(rejections.len(), 1);
        match rejections[0] {
            SessionEvent::StakeRejected { stake, reasons } => {
                assert_eq!(*stake, 200.0);
                assert!(!reasons.is_empty());
            }
            _ => unreachable!(),
        }
    }

    #[test]
    fn test_session_ends_at_zero_balance() {
        // Coefficient 0 wins pay nothing, so the stake drains straight out
        let mut session = Session::new(
            always_win_catalog(0.0),
            &config(5.0, 1, 3),
            ScriptedStakes::new(&[5.0]),
            StandardStakeRules,
            Recorder::default(),
        )
        .unwrap();

        let stats = session.run().unwrap();
        assert_eq!(session.balance(), 0.0);
        assert_eq!(session.phase(), RoundPhase::GameOver);
        assert_eq!(stats.rounds, 1);
        assert_eq!(stats.total_staked, 5.0);
        assert_eq!(stats.total_won, 0.0);
        assert_eq!(stats.rtp(), 0.0);

        let last = session.observer().0.last().unwrap();
        assert!(matches!(last, SessionEvent::SessionEnded { balance, .. } if *balance == 0.0));
    }

    #[test]
    fn test_event_sequence_for_a_round() {
        let mut session = Session::new(
            always_win_catalog(0.0),
            &config(5.0, 1, 3),
            ScriptedStakes::new(&[5.0]),
            StandardStakeRules,
            Recorder::default(),
        )
        .unwrap();
        session.run().unwrap();

        let events = &session.observer().0;
        assert!(matches!(events[0], SessionEvent::SessionStarted { .. }));
        assert!(matches!(events[1], SessionEvent::SpinStarted { round: 1 }));
        assert!(matches!(events[2], SessionEvent::GridRevealed { .. }));
        assert!(matches!(events[3], SessionEvent::WinsEvaluated { .. }));
        assert!(matches!(events[4], SessionEvent::BalanceSettled { .. }));
        assert!(matches!(events[5], SessionEvent::SessionEnded { .. }));
        assert_eq!(events.len(), 6);
    }

    #[test]
    fn test_stats_accumulate_across_rounds() {
        let mut session = Session::new(
            always_win_catalog(1.0),
            &config(100.0, 1, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        )
        .unwrap();

        session.play_round(10.0).unwrap();
        session.play_round(10.0).unwrap();

        let stats = session.stats();
        assert_eq!(stats.rounds, 2);
        assert_eq!(stats.total_staked, 20.0);
        assert_eq!(stats.total_won, 60.0);
        assert_eq!(stats.winning_rounds, 2);
        assert_eq!(stats.losing_rounds, 0);
        assert_eq!(stats.rtp(), 300.0);
        assert_eq!(stats.hit_rate(), 100.0);
        assert_eq!(stats.biggest_win, 30.0);
        assert_eq!(stats.max_win_ratio, 3.0);
    }

    #[test]
    fn test_exhausted_input_propagates() {
        let mut session = Session::new(
            always_win_catalog(1.0),
            &config(100.0, 1, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        )
        .unwrap();

        assert!(matches!(session.run(), Err(SlotError::InputClosed)));
    }

    #[test]
    fn test_rejects_degenerate_config() {
        let broke = Session::new(
            always_win_catalog(1.0),
            &config(0.0, 1, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        );
        assert!(matches!(broke, Err(SlotError::InvalidConfig(_))));

        let flat = Session::new(
            always_win_catalog(1.0),
            &config(10.0, 0, 3),
            ScriptedStakes::new(&[]),
            StandardStakeRules,
            NullObserver,
        );
        assert!(matches!(flat, Err(SlotError::InvalidDimensions { .. })));
    }
}
