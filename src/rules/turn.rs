//! Turn controller: the per-ply state machine.
//!
//! ## Phases
//!
//! ```text
//! AwaitingRoll ──roll──► AwaitingMoveChoice ──play/choose──► AwaitingRoll (next seat)
//!      │                        │                          └► Terminal
//!      └─ no legal move ─► AwaitingRoll (next seat)
//!                               └──forfeit──► AwaitingRoll (next seat)
//! ```
//!
//! Applying a move happens inside a single call, so it is never an
//! observable phase. `Terminal` is absorbing: every later call returns
//! [`RuleError::GameOver`].
//!
//! ## Plies
//!
//! Each ply clears all capture flags, draws a roll (plus any rerolls the
//! rules allow), and ends with exactly one [`PlyRecord`] in the history,
//! whether a pawn moved or the seat was skipped.

use tracing::{debug, info, warn};

use crate::core::{
    GameState, InvalidMoveReason, Move, MoveList, PlayerId, PlyEvent, PlyRecord, Result,
    RuleError, SkipReason,
};

use super::ashtachamma::Ashtachamma;
use super::engine::{GameResult, RulesEngine};

/// Where the controller is within a ply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// The current seat must roll.
    AwaitingRoll,
    /// The current seat rolled and must pick one of `moves`.
    AwaitingMoveChoice {
        roll: u8,
        rerolls: u32,
        moves: MoveList,
    },
    /// The game is over.
    Terminal(GameResult),
}

impl Phase {
    /// Stable label for logs and observations.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Phase::AwaitingRoll => "awaiting_roll",
            Phase::AwaitingMoveChoice { .. } => "awaiting_move_choice",
            Phase::Terminal(_) => "terminal",
        }
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Phase::Terminal(_))
    }
}

/// A finished ply.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ply {
    /// What was recorded in the history.
    pub record: PlyRecord,
    /// Set when this ply ended the game.
    pub result: Option<GameResult>,
    /// The seat to move next, `None` once the game is over.
    pub next: Option<PlayerId>,
}

/// What a roll led to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TurnStart {
    /// The seat must choose among these moves.
    Choose {
        player: PlayerId,
        roll: u8,
        moves: MoveList,
    },
    /// No legal move; the ply is already finished.
    Skipped(Ply),
}

/// Drives one game through its plies.
///
/// ```
/// use ashtachamma::core::GameConfig;
/// use ashtachamma::rules::{Ashtachamma, TurnController, TurnStart};
///
/// let rules = Ashtachamma::new(GameConfig::default()).unwrap();
/// let mut game = TurnController::new(rules, 42);
///
/// while !game.is_terminal() && game.state().ply < 50 {
///     if let TurnStart::Choose { .. } = game.roll().unwrap() {
///         game.choose(0).unwrap();
///     }
/// }
/// assert!(game.state().ply >= 1);
/// ```
#[derive(Clone, Debug)]
pub struct TurnController<E: RulesEngine = Ashtachamma> {
    rules: E,
    state: GameState,
    phase: Phase,
}

impl<E: RulesEngine> TurnController<E> {
    /// Start a fresh game.
    pub fn new(rules: E, seed: u64) -> Self {
        let state = rules.initial_state(seed);
        Self {
            rules,
            state,
            phase: Phase::AwaitingRoll,
        }
    }

    /// Resume from an arbitrary position.
    ///
    /// If the seat to move has no active pawn the turn passes to the next
    /// eligible seat. A finished or stalemated position starts out terminal.
    pub fn from_state(rules: E, state: GameState) -> Self {
        let mut controller = Self {
            rules,
            state,
            phase: Phase::AwaitingRoll,
        };
        if let Some(result) = controller.rules.is_terminal(&controller.state) {
            controller.phase = Phase::Terminal(result);
        } else if !controller.rules.is_eligible(&controller.state, controller.state.current) {
            match controller.rules.next_eligible(&controller.state, controller.state.current) {
                Some(next) => controller.state.current = next,
                None => controller.phase = Phase::Terminal(GameResult::Stalemate),
            }
        }
        controller
    }

    /// Throw away the current game and start over.
    pub fn reset(&mut self, seed: u64) {
        self.state = self.rules.initial_state(seed);
        self.phase = Phase::AwaitingRoll;
    }

    // === Accessors ===

    #[must_use]
    pub fn rules(&self) -> &E {
        &self.rules
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Seat whose turn it is.
    #[must_use]
    pub fn current_player(&self) -> PlayerId {
        self.state.current
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.phase.is_terminal()
    }

    /// The result, once the game is over.
    #[must_use]
    pub fn result(&self) -> Option<GameResult> {
        match self.phase {
            Phase::Terminal(result) => Some(result),
            _ => None,
        }
    }

    /// Moves on offer; empty outside `AwaitingMoveChoice`.
    #[must_use]
    pub fn legal_moves(&self) -> &[Move] {
        match &self.phase {
            Phase::AwaitingMoveChoice { moves, .. } => moves,
            _ => &[],
        }
    }

    /// Fail unless it is `player`'s turn.
    pub fn check_turn(&self, player: PlayerId) -> Result<()> {
        if self.is_terminal() {
            return Err(RuleError::GameOver);
        }
        if player != self.state.current {
            return Err(RuleError::NotYourTurn {
                player,
                current: self.state.current,
            });
        }
        Ok(())
    }

    // === Transitions ===

    /// Roll for the current seat.
    ///
    /// Under a reroll policy the dice are thrown again while the rules ask
    /// for it. With no legal move the ply is skipped and finished here.
    pub fn roll(&mut self) -> Result<TurnStart> {
        self.expect_roll_phase()?;
        self.state.clear_capture_flags();

        let player = self.state.current;
        let mut roll = self.rules.roll_dice(&mut self.state);
        let mut rerolls = 0;
        let mut moves = self.rules.legal_moves(&self.state, player, roll);
        while moves.is_empty() && self.rules.should_reroll(&self.state, player, roll, rerolls) {
            rerolls += 1;
            debug!(%player, discarded = roll, rerolls, "overshoot, rolling again");
            roll = self.rules.roll_dice(&mut self.state);
            moves = self.rules.legal_moves(&self.state, player, roll);
        }

        Ok(self.offer(player, roll, rerolls, moves))
    }

    /// Start the ply with a fixed roll instead of drawing one.
    ///
    /// Used for replays and scripted positions. Never rerolls.
    pub fn roll_with(&mut self, roll: u8) -> Result<TurnStart> {
        self.expect_roll_phase()?;
        if !self.rules.is_valid_roll(roll) {
            return Err(RuleError::InvalidRoll(roll));
        }
        self.state.clear_capture_flags();

        let player = self.state.current;
        let moves = self.rules.legal_moves(&self.state, player, roll);
        Ok(self.offer(player, roll, 0, moves))
    }

    /// Play the move at `index` in the offered list.
    pub fn choose(&mut self, index: usize) -> Result<Ply> {
        let moves = self.pending_moves()?;
        let mv = moves.get(index).copied().ok_or(RuleError::ChoiceOutOfRange {
            index,
            available: moves.len(),
        })?;
        self.play(&mv)
    }

    /// Play the offered move of `pawn`.
    ///
    /// When the pawn has no offered move the error says why: missing pawn,
    /// pawn already home, overshoot, or self-block.
    pub fn choose_pawn(&mut self, pawn: usize) -> Result<Ply> {
        let (roll, moves) = match &self.phase {
            Phase::AwaitingMoveChoice { roll, moves, .. } => (*roll, moves),
            other => return Err(self.phase_error("awaiting_move_choice", other)),
        };
        if let Some(mv) = moves.iter().find(|m| m.pawn == pawn).copied() {
            return self.play(&mv);
        }
        Err(self.refusal(pawn, roll))
    }

    /// Why `pawn` has no offered move for the pending roll.
    ///
    /// Outside `AwaitingMoveChoice` this is the phase error.
    pub fn explain_refusal(&self, pawn: usize) -> RuleError {
        match &self.phase {
            Phase::AwaitingMoveChoice { roll, .. } => self.refusal(pawn, *roll),
            other => self.phase_error("awaiting_move_choice", other),
        }
    }

    /// Play `mv`, which must be one of the offered moves.
    pub fn play(&mut self, mv: &Move) -> Result<Ply> {
        let (roll, rerolls) = match &self.phase {
            Phase::AwaitingMoveChoice { roll, rerolls, moves } => {
                if !moves.contains(mv) {
                    return Err(RuleError::InvalidMove {
                        player: self.state.current,
                        pawn: mv.pawn,
                        reason: InvalidMoveReason::NotLegal,
                    });
                }
                (*roll, *rerolls)
            }
            other => return Err(self.phase_error("awaiting_move_choice", other)),
        };

        let player = self.state.current;
        let outcome = self.rules.apply_move(&mut self.state, player, mv)?;
        let result = outcome.won.then_some(GameResult::Winner(player));
        Ok(self.finish(player, roll, rerolls, PlyEvent::Moved(outcome), result))
    }

    /// Give up the pending ply without moving.
    pub fn forfeit(&mut self) -> Result<Ply> {
        let (roll, rerolls) = match &self.phase {
            Phase::AwaitingMoveChoice { roll, rerolls, .. } => (*roll, *rerolls),
            other => return Err(self.phase_error("awaiting_move_choice", other)),
        };
        let player = self.state.current;
        debug!(%player, "ply forfeited");
        Ok(self.finish(player, roll, rerolls, PlyEvent::Skipped(SkipReason::Forfeit), None))
    }

    // === Internals ===

    fn expect_roll_phase(&self) -> Result<()> {
        match &self.phase {
            Phase::AwaitingRoll => Ok(()),
            other => Err(self.phase_error("awaiting_roll", other)),
        }
    }

    fn pending_moves(&self) -> Result<MoveList> {
        match &self.phase {
            Phase::AwaitingMoveChoice { moves, .. } => Ok(moves.clone()),
            other => Err(self.phase_error("awaiting_move_choice", other)),
        }
    }

    fn refusal(&self, pawn: usize, roll: u8) -> RuleError {
        let player = self.state.current;
        match self.rules.check_move(&self.state, player, pawn, roll) {
            Err(err) => err,
            Ok(_) => RuleError::InvalidMove {
                player,
                pawn,
                reason: InvalidMoveReason::NotLegal,
            },
        }
    }

    fn phase_error(&self, expected: &'static str, found: &Phase) -> RuleError {
        match found {
            Phase::Terminal(_) => RuleError::GameOver,
            _ => RuleError::WrongPhase {
                expected,
                found: found.name(),
            },
        }
    }

    fn offer(&mut self, player: PlayerId, roll: u8, rerolls: u32, moves: MoveList) -> TurnStart {
        self.state.last_roll = Some(roll);
        if moves.is_empty() {
            debug!(%player, roll, "no legal move, skipping");
            let ply = self.finish(
                player,
                roll,
                rerolls,
                PlyEvent::Skipped(SkipReason::NoLegalMoves),
                None,
            );
            return TurnStart::Skipped(ply);
        }

        self.phase = Phase::AwaitingMoveChoice {
            roll,
            rerolls,
            moves: moves.clone(),
        };
        TurnStart::Choose { player, roll, moves }
    }

    /// Record the ply and hand the turn on.
    fn finish(
        &mut self,
        player: PlayerId,
        roll: u8,
        rerolls: u32,
        event: PlyEvent,
        result: Option<GameResult>,
    ) -> Ply {
        let record = PlyRecord {
            ply: self.state.ply,
            player,
            roll,
            rerolls,
            event,
        };
        self.state.record_ply(record.clone());

        let mut next = None;
        let result = match result.or_else(|| self.rules.is_terminal(&self.state)) {
            Some(result) => Some(result),
            None => match self.rules.next_eligible(&self.state, player) {
                Some(seat) => {
                    next = Some(seat);
                    None
                }
                None => {
                    warn!(ply = record.ply, "no seat has an active pawn, stalemate");
                    Some(GameResult::Stalemate)
                }
            },
        };

        if let Some(result) = result {
            info!(?result, plies = self.state.ply, "game over");
            self.phase = Phase::Terminal(result);
        } else if let Some(seat) = next {
            self.state.current = seat;
            self.phase = Phase::AwaitingRoll;
        }

        Ply { record, result, next }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{path, Cell, GOAL_INDEX};
    use crate::core::{DiceKind, GameConfig, OvershootPolicy};

    fn p(id: u8) -> PlayerId {
        PlayerId::new(id)
    }

    fn game(config: GameConfig) -> TurnController {
        TurnController::new(Ashtachamma::new(config).unwrap(), 7)
    }

    #[test]
    fn test_roll_then_choose_advances_seat() {
        let mut game = game(GameConfig::default());
        let start = game.roll_with(2).unwrap();
        let TurnStart::Choose { player, roll, moves } = start else {
            panic!("opening roll should offer moves");
        };
        assert_eq!((player, roll, moves.len()), (p(0), 2, 4));
        assert_eq!(game.phase().name(), "awaiting_move_choice");

        let ply = game.choose(0).unwrap();
        assert_eq!(ply.next, Some(p(1)));
        assert_eq!(ply.result, None);
        assert_eq!(game.current_player(), p(1));
        assert_eq!(game.phase(), &Phase::AwaitingRoll);
        assert_eq!(game.state().cell_of(p(0), 0), Some(path(p(0)).cells()[2]));
        assert_eq!(game.state().history().len(), 1);
    }

    #[test]
    fn test_wrong_phase_errors() {
        let mut game = game(GameConfig::default());
        assert_eq!(
            game.choose(0),
            Err(RuleError::WrongPhase {
                expected: "awaiting_move_choice",
                found: "awaiting_roll"
            })
        );
        assert!(game.forfeit().is_err());

        game.roll_with(1).unwrap();
        assert!(matches!(game.roll(), Err(RuleError::WrongPhase { .. })));
    }

    #[test]
    fn test_choice_out_of_range_keeps_phase() {
        let mut game = game(GameConfig::default().with_pawns(1).with_win_threshold(1));
        game.roll_with(3).unwrap();
        assert_eq!(
            game.choose(4),
            Err(RuleError::ChoiceOutOfRange { index: 4, available: 1 })
        );
        assert_eq!(game.legal_moves().len(), 1);
    }

    #[test]
    fn test_choose_pawn_explains_refusal() {
        let mut state = GameState::new(2, 7);
        state.set_pawn(p(0), 0, Some(46));
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(2).with_win_threshold(2)).unwrap();
        let mut game = TurnController::from_state(rules, state);

        game.roll_with(8).unwrap();
        assert_eq!(
            game.choose_pawn(0),
            Err(RuleError::OverAdvance { player: p(0), pawn: 0, target: 54 })
        );
        assert!(matches!(
            game.choose_pawn(3),
            Err(RuleError::InvalidMove { reason: InvalidMoveReason::OutOfRange, .. })
        ));
        assert_eq!(
            game.explain_refusal(0),
            RuleError::OverAdvance { player: p(0), pawn: 0, target: 54 }
        );
        let ply = game.choose_pawn(1).unwrap();
        assert_eq!(ply.record.outcome().map(|o| o.mv.to), Some(8));
    }

    #[test]
    fn test_no_legal_move_skips() {
        let mut state = GameState::new(1, 7);
        state.set_pawn(p(0), 0, Some(45));
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(1).with_win_threshold(1)).unwrap();
        let mut game = TurnController::from_state(rules, state);

        let TurnStart::Skipped(ply) = game.roll_with(8).unwrap() else {
            panic!("overshoot should skip");
        };
        assert_eq!(ply.record.event, PlyEvent::Skipped(SkipReason::NoLegalMoves));
        assert_eq!(ply.next, Some(p(1)));
        assert_eq!(game.state().player(p(0)).position(0), Some(45));
        assert_eq!(game.state().last_roll, Some(8));
    }

    #[test]
    fn test_reroll_policy_draws_again() {
        let config = GameConfig::default()
            .with_pawns(1)
            .with_win_threshold(1)
            .with_dice(DiceKind::Weighted { faces: vec![1, 8], weights: vec![1, 1] })
            .with_overshoot(OvershootPolicy::Reroll)
            .with_max_rerolls(64);
        let mut state = GameState::new(1, 3);
        state.set_pawn(p(0), 0, Some(45));
        let mut game = TurnController::from_state(Ashtachamma::new(config).unwrap(), state);

        match game.roll().unwrap() {
            TurnStart::Choose { roll, .. } => assert_eq!(roll, 1),
            TurnStart::Skipped(_) => panic!("rerolls should find the 1"),
        }
        let ply = game.choose(0).unwrap();
        assert_eq!(ply.record.roll, 1);
    }

    #[test]
    fn test_capture_flag_lasts_one_ply() {
        let mut state = GameState::new(1, 7);
        state.set_pawn(p(0), 0, Some(2));
        state.set_pawn(p(2), 0, Some(16));
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(1).with_win_threshold(1)).unwrap();
        let mut game = TurnController::from_state(rules, state);

        game.roll_with(2).unwrap();
        let ply = game.choose(0).unwrap();
        assert!(ply.record.outcome().unwrap().captured_any());
        assert!(game.state().player(p(0)).captured);
        assert_eq!(game.state().cell_of(p(2), 0), Some(Cell::new(8, 4)));

        game.roll_with(1).unwrap();
        assert!(!game.state().player(p(0)).captured);
    }

    #[test]
    fn test_win_is_terminal_and_absorbing() {
        let mut state = GameState::new(1, 7);
        state.set_pawn(p(0), 0, Some(GOAL_INDEX - 2));
        let rules = Ashtachamma::new(GameConfig::default().with_pawns(1).with_win_threshold(1)).unwrap();
        let mut game = TurnController::from_state(rules, state);

        game.roll_with(2).unwrap();
        let ply = game.choose(0).unwrap();
        assert_eq!(ply.result, Some(GameResult::Winner(p(0))));
        assert_eq!(ply.next, None);
        assert_eq!(game.result(), Some(GameResult::Winner(p(0))));

        assert_eq!(game.roll(), Err(RuleError::GameOver));
        assert_eq!(game.roll_with(1), Err(RuleError::GameOver));
        assert_eq!(game.choose(0), Err(RuleError::GameOver));
        assert_eq!(game.forfeit(), Err(RuleError::GameOver));
        assert_eq!(game.check_turn(p(1)), Err(RuleError::GameOver));
    }

    #[test]
    fn test_forfeit_records_skip() {
        let mut game = game(GameConfig::default());
        game.roll_with(4).unwrap();
        let ply = game.forfeit().unwrap();
        assert_eq!(ply.record.event, PlyEvent::Skipped(SkipReason::Forfeit));
        assert_eq!(game.current_player(), p(1));
        assert_eq!(game.state().player(p(0)).pawns(), &[Some(0); 4]);
    }

    #[test]
    fn test_check_turn() {
        let game = game(GameConfig::default());
        assert!(game.check_turn(p(0)).is_ok());
        assert_eq!(
            game.check_turn(p(2)),
            Err(RuleError::NotYourTurn { player: p(2), current: p(0) })
        );
    }

    #[test]
    fn test_invalid_roll_rejected() {
        let mut game = game(GameConfig::default());
        assert_eq!(game.roll_with(5), Err(RuleError::InvalidRoll(5)));
        assert_eq!(game.phase(), &Phase::AwaitingRoll);
    }

    #[test]
    fn test_reset_restores_start() {
        let mut game = game(GameConfig::default());
        game.roll_with(2).unwrap();
        game.choose(1).unwrap();
        game.reset(7);

        assert_eq!(game.state().ply, 0);
        assert_eq!(game.current_player(), p(0));
        assert!(game.state().history().is_empty());
        assert_eq!(game.phase(), &Phase::AwaitingRoll);
    }
}
