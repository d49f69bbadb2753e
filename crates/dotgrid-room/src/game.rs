//! The turn state machine.
//!
//! [`Game::apply_move`] is the single place a line gets drawn, for humans
//! and for the automated opponent alike. It either rejects the move with
//! no state change or applies it completely and reports the resulting
//! [`Transition`].

use dotgrid_board::{Board, Line, LineCoords, Square, completed_squares};
use dotgrid_protocol::{PlayerId, Scores};

use crate::GameError;

/// Where the game stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    /// The named participant must draw the next line.
    AwaitingMove(PlayerId),
    /// Every square is owned. Terminal.
    GameOver(Scores),
}

/// What happened to the turn after a successful move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// The board is complete; these are the final scores.
    GameOver { scores: Scores },
    /// The mover closed at least one square and moves again.
    ExtraTurn { player: PlayerId },
    /// The turn passed to the other participant.
    TurnPassed { next: PlayerId },
}

impl Transition {
    /// The participant who moves next, if the game continues.
    pub fn next_player(&self) -> Option<&PlayerId> {
        match self {
            Self::GameOver { .. } => None,
            Self::ExtraTurn { player } => Some(player),
            Self::TurnPassed { next } => Some(next),
        }
    }
}

/// The result of an applied move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveOutcome {
    pub line: Line,
    pub player: PlayerId,
    /// Squares this line closed, above/left before below/right.
    pub completed: Vec<Square>,
    pub transition: Transition,
}

impl MoveOutcome {
    pub fn extra_turn(&self) -> bool {
        !self.completed.is_empty()
    }
}

/// One game of dots and boxes between one or two participants.
#[derive(Debug, Clone)]
pub struct Game {
    players: Vec<PlayerId>,
    board: Board<PlayerId>,
    phase: Phase,
    scores: Scores,
    automated: bool,
}

impl Game {
    /// A human game with only its creator. Moves are refused until
    /// [`add_player`](Self::add_player) seats an opponent.
    pub fn new(initiator: PlayerId) -> Self {
        let mut scores = Scores::new();
        scores.insert(initiator.clone(), 0);
        Self {
            phase: Phase::AwaitingMove(initiator.clone()),
            players: vec![initiator],
            board: Board::standard(),
            scores,
            automated: false,
        }
    }

    /// A game against the automated opponent. The human moves first.
    pub fn new_automated(initiator: PlayerId) -> Self {
        let mut game = Self::new(initiator);
        game.players.push(PlayerId::automated());
        game.scores.insert(PlayerId::automated(), 0);
        game.automated = true;
        game
    }

    /// Seats a second participant with a zero score.
    ///
    /// Returns `false` if both seats are taken or `player` already has one.
    pub fn add_player(&mut self, player: PlayerId) -> bool {
        if self.is_full() || self.players.contains(&player) {
            return false;
        }
        self.scores.insert(player.clone(), 0);
        self.players.push(player);
        true
    }

    /// Validates and applies `player` drawing `line`.
    ///
    /// `line` may be a [`Line`] or the raw [`LineCoords`] a client sent;
    /// the coordinates are only checked once the turn checks pass.
    ///
    /// # Errors
    /// In this order, each leaving the game untouched:
    /// [`GameError::GameOver`], [`GameError::WaitingForOpponent`],
    /// [`GameError::NotYourTurn`], [`GameError::InvalidLine`] (not
    /// adjacent, or off the grid), [`GameError::DuplicateLine`].
    pub fn apply_move(
        &mut self,
        player: &PlayerId,
        line: impl Into<LineCoords>,
    ) -> Result<MoveOutcome, GameError> {
        let current = match &self.phase {
            Phase::GameOver(_) => return Err(GameError::GameOver),
            Phase::AwaitingMove(current) => current,
        };
        if !self.is_full() {
            return Err(GameError::WaitingForOpponent);
        }
        if current != player {
            return Err(GameError::NotYourTurn(player.clone()));
        }

        let line = Line::try_from(line.into())?;
        self.board.add_line(line)?;

        let completed = completed_squares(&self.board, &line);
        for square in &completed {
            self.board.claim(*square, player.clone());
        }
        *self.scores.entry(player.clone()).or_insert(0) += completed.len() as u32;

        let transition = if self.board.is_complete() {
            let scores = self.scores.clone();
            self.phase = Phase::GameOver(scores.clone());
            Transition::GameOver { scores }
        } else if !completed.is_empty() {
            Transition::ExtraTurn {
                player: player.clone(),
            }
        } else {
            let next = self.opponent_of(player).cloned().unwrap_or_else(|| player.clone());
            self.phase = Phase::AwaitingMove(next.clone());
            Transition::TurnPassed { next }
        };

        Ok(MoveOutcome {
            line,
            player: player.clone(),
            completed,
            transition,
        })
    }

    /// Participants in seating order.
    pub fn players(&self) -> &[PlayerId] {
        &self.players
    }

    pub fn contains(&self, player: &PlayerId) -> bool {
        self.players.contains(player)
    }

    pub fn is_full(&self) -> bool {
        self.players.len() >= 2
    }

    /// The other seated participant.
    pub fn opponent_of(&self, player: &PlayerId) -> Option<&PlayerId> {
        self.players.iter().find(|p| *p != player)
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// The turn holder, or `None` once the game is over.
    pub fn current_player(&self) -> Option<&PlayerId> {
        match &self.phase {
            Phase::AwaitingMove(player) => Some(player),
            Phase::GameOver(_) => None,
        }
    }

    pub fn is_game_over(&self) -> bool {
        matches!(self.phase, Phase::GameOver(_))
    }

    pub fn is_automated(&self) -> bool {
        self.automated
    }

    /// Returns `true` if the automated opponent holds the turn.
    pub fn awaiting_automated(&self) -> bool {
        self.current_player().is_some_and(PlayerId::is_automated)
    }

    pub fn scores(&self) -> &Scores {
        &self.scores
    }

    pub fn board(&self) -> &Board<PlayerId> {
        &self.board
    }
}
