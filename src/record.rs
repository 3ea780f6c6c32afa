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

use std::fmt;

use bitflags::bitflags;

use crate::{coordinate::Coordinate, role::Role, team::Team};

/// How a move was executed.
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
pub enum MoveKind {
    /// Quiet moves, captures, double pawn pushes and promotions.
    Normal,
    /// A pawn captured the pawn beside it, landing behind it.
    EnPassant,
    /// The king moved two files towards the rook, and the rook jumped over
    /// it.
    Castle { king_to: Coordinate, rook_to: Coordinate },
}

bitflags! {
    /// Outcome cues of a move, for consumers that react to moves (sounds,
    /// dialogs, move lists) without inspecting the board.
    #[derive(Copy, Clone, Eq, PartialEq, Debug, Hash, Default)]
    pub struct MoveFlags: u8 {
        const CAPTURE = 1 << 0;
        const PROMOTION = 1 << 1;
        const CASTLE = 1 << 2;
        const EN_PASSANT = 1 << 3;
        /// The move puts the opponent in check.
        const CHECK = 1 << 4;
        /// The move ends the game.
        const GAME_OVER = 1 << 5;
    }
}

/// A move that was played on a [`Board`](crate::Board).
///
/// `to` is the destination as requested, which is the rook square for
/// castling moves.
///
/// # Examples
///
/// ```
/// use referee::{Board, Coordinate, MoveFlags, Role};
///
/// let mut board = Board::default();
/// let pawn = board.piece_at(Coordinate::E2).cloned().expect("pawn on e2");
/// let record = board.play_move(&pawn, Coordinate::E4, None)?;
///
/// assert_eq!(record.role, Role::Pawn);
/// assert_eq!(record.flags, MoveFlags::empty());
/// assert_eq!(record.to_string(), "e2e4");
/// # Ok::<_, referee::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub struct MoveRecord {
    pub team: Team,
    pub role: Role,
    pub from: Coordinate,
    pub to: Coordinate,
    pub kind: MoveKind,
    pub capture: Option<Role>,
    pub promotion: Option<Role>,
    pub flags: MoveFlags,
}

impl MoveRecord {
    #[inline]
    pub fn is_capture(&self) -> bool {
        self.capture.is_some()
    }

    /// Where the moved piece ended up. Differs from `to` only for castling.
    pub fn landing(&self) -> Coordinate {
        match self.kind {
            MoveKind::Castle { king_to, .. } => king_to,
            MoveKind::Normal | MoveKind::EnPassant => self.to,
        }
    }
}

impl fmt::Display for MoveRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(promotion) = self.promotion {
            write!(f, "{}", promotion.char())?;
        }
        Ok(())
    }
}
