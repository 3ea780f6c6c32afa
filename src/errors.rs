// This file is part of the referee library.
// Copyright (C) 2024 The referee developers
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <http://www.gnu.org/licenses/>.

use std::{error::Error, fmt};

use bitflags::bitflags;

use crate::{coordinate::Coordinate, outcome::GameState, role::Role};

bitflags! {
    /// Reasons for a piece set to be rejected as a board setup.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
    pub struct BoardErrorKinds: u32 {
        /// A team has no king.
        const MISSING_KING = 1 << 0;

        /// A team has more than one king.
        const TOO_MANY_KINGS = 1 << 1;

        /// A piece stands on a coordinate outside of the board.
        const OFF_BOARD = 1 << 2;

        /// Two pieces share a coordinate.
        const OVERLAPPING = 1 << 3;

        /// There are pawns on the first or last rank.
        const PAWNS_ON_BACKRANK = 1 << 4;

        /// More than one pawn may be captured en passant, or the pawn that
        /// may be captured does not belong to the team that just moved.
        const INVALID_EN_PASSANT = 1 << 5;

        /// The king of the team that just moved is in check.
        const OPPOSITE_CHECK = 1 << 6;

        /// The move number is too large to count in half-moves.
        const TURN_OVERFLOW = 1 << 7;
    }
}

/// Error when trying to create a [`Board`](crate::Board) from an invalid
/// piece set.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct BoardError {
    pub(crate) kinds: BoardErrorKinds,
}

impl BoardError {
    /// Every invariant the piece set violates.
    pub fn kinds(&self) -> BoardErrorKinds {
        self.kinds
    }
}

impl fmt::Display for BoardError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut reasons = Vec::new();

        if self.kinds.contains(BoardErrorKinds::MISSING_KING) {
            reasons.push("missing king");
        }
        if self.kinds.contains(BoardErrorKinds::TOO_MANY_KINGS) {
            reasons.push("too many kings");
        }
        if self.kinds.contains(BoardErrorKinds::OFF_BOARD) {
            reasons.push("pieces off the board");
        }
        if self.kinds.contains(BoardErrorKinds::OVERLAPPING) {
            reasons.push("overlapping pieces");
        }
        if self.kinds.contains(BoardErrorKinds::PAWNS_ON_BACKRANK) {
            reasons.push("pawns on backrank");
        }
        if self.kinds.contains(BoardErrorKinds::INVALID_EN_PASSANT) {
            reasons.push("invalid en passant state");
        }
        if self.kinds.contains(BoardErrorKinds::OPPOSITE_CHECK) {
            reasons.push("opposite check");
        }
        if self.kinds.contains(BoardErrorKinds::TURN_OVERFLOW) {
            reasons.push("move number out of range");
        }

        f.write_str("invalid board setup: ")?;
        if reasons.is_empty() {
            f.write_str("unknown reason")
        } else {
            f.write_str(&reasons.join(", "))
        }
    }
}

impl Error for BoardError {}

/// Error when trying to play a move that is not accepted. The board is left
/// exactly as it was.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum PlayError {
    /// The game has already ended.
    GameOver(GameState),
    /// The piece does not belong to the team to move.
    NotYourTurn,
    /// There is no such piece on the board.
    UnknownPiece,
    /// The destination is not among the legal moves of the piece.
    IllegalMove { from: Coordinate, to: Coordinate },
    /// Pawns can not promote to this kind.
    InvalidPromotion(Role),
    /// The turn counter can not be advanced any further.
    TurnLimit,
}

impl fmt::Display for PlayError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            PlayError::GameOver(state) => write!(f, "game is over ({state})"),
            PlayError::NotYourTurn => f.write_str("not your turn"),
            PlayError::UnknownPiece => f.write_str("no such piece on the board"),
            PlayError::IllegalMove { from, to } => write!(f, "illegal move {from}{to}"),
            PlayError::InvalidPromotion(role) => write!(f, "can not promote to {role}"),
            PlayError::TurnLimit => f.write_str("turn counter exhausted"),
        }
    }
}

impl Error for PlayError {}
