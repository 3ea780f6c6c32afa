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

/// Classification of a position after its legal moves have been
/// calculated.
///
/// Every state other than `Ongoing` is terminal.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GameState {
    #[default]
    Ongoing,
    Checkmate,
    Stalemate,
    Draw,
}

impl GameState {
    #[inline]
    pub fn is_ongoing(self) -> bool {
        self == GameState::Ongoing
    }

    /// Checkmate, stalemate or a draw.
    #[inline]
    pub fn is_terminal(self) -> bool {
        !self.is_ongoing()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            GameState::Ongoing => "ongoing",
            GameState::Checkmate => "checkmate",
            GameState::Stalemate => "stalemate",
            GameState::Draw => "draw",
        })
    }
}

/// Why a game ended in [`GameState::Draw`].
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum DrawReason {
    /// The half-move clock reached its limit.
    FiftyMoves,
    /// The same position occurred often enough.
    Repetition,
}

impl fmt::Display for DrawReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            DrawReason::FiftyMoves => "fifty-move rule",
            DrawReason::Repetition => "repetition",
        })
    }
}
