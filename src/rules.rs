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

/// How strictly castling is checked.
#[derive(Copy, Clone, Default, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum CastlingMode {
    /// The king may not castle out of, through, or into check.
    #[default]
    Standard,
    /// Only requires an unmoved king, an unmoved rook and free squares
    /// between them. The king still may not end up in check.
    Relaxed,
}

impl CastlingMode {
    #[inline]
    pub fn is_standard(self) -> bool {
        self == CastlingMode::Standard
    }
}

/// Tunable parts of the game rules, fixed for the lifetime of a board.
///
/// # Examples
///
/// ```
/// use referee::{CastlingMode, Rules};
///
/// let rules = Rules {
///     fifty_move_limit: 100,
///     ..Rules::default()
/// };
/// assert_eq!(rules.castling, CastlingMode::Standard);
/// assert_eq!(rules.repetition_threshold, 3);
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Rules {
    pub castling: CastlingMode,
    /// Half-moves without a pawn move or capture after which the game is
    /// drawn.
    pub fifty_move_limit: u32,
    /// How often the same position must occur for a draw by repetition.
    pub repetition_threshold: usize,
}

impl Default for Rules {
    fn default() -> Rules {
        Rules {
            castling: CastlingMode::Standard,
            fifty_move_limit: 50,
            repetition_threshold: 3,
        }
    }
}
