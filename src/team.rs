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

use std::{error::Error, fmt, ops, str::FromStr};

/// `White` or `Black`.
///
/// # Examples
///
/// ```
/// use referee::Team;
///
/// assert_eq!(!Team::White, Team::Black);
/// assert_eq!(Team::Black.fold('w', 'b'), 'b');
/// ```
#[allow(missing_docs)]
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Debug, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Team {
    White,
    Black,
}

impl Team {
    /// Gets the team from its FEN letter, `w` or `b`.
    pub fn from_char(ch: char) -> Option<Team> {
        match ch {
            'w' => Some(Team::White),
            'b' => Some(Team::Black),
            _ => None,
        }
    }

    #[inline]
    pub fn from_white(white: bool) -> Team {
        if white {
            Team::White
        } else {
            Team::Black
        }
    }

    /// The team whose turn it is after `turns` half-moves. White moves
    /// on even counts.
    #[inline]
    pub fn from_turns(turns: u32) -> Team {
        Team::from_white(turns % 2 == 0)
    }

    #[inline]
    pub fn fold<T>(self, white: T, black: T) -> T {
        match self {
            Team::White => white,
            Team::Black => black,
        }
    }

    #[inline]
    pub fn is_white(self) -> bool {
        self == Team::White
    }

    #[inline]
    pub fn is_black(self) -> bool {
        self == Team::Black
    }

    #[inline]
    pub fn other(self) -> Team {
        self.fold(Team::Black, Team::White)
    }

    /// The rank the team's pieces start on.
    #[inline]
    pub fn backrank(self) -> i8 {
        self.fold(0, 7)
    }

    /// The rank the team's pawns start on.
    #[inline]
    pub fn pawn_rank(self) -> i8 {
        self.fold(1, 6)
    }

    /// The rank the team's pawns promote on.
    #[inline]
    pub fn promotion_rank(self) -> i8 {
        self.other().backrank()
    }

    /// Rank delta of a single pawn step.
    #[inline]
    pub fn forward(self) -> i8 {
        self.fold(1, -1)
    }

    pub fn char(self) -> char {
        self.fold('w', 'b')
    }

    /// `White` and `Black`, in this order.
    pub const ALL: [Team; 2] = [Team::White, Team::Black];
}

impl ops::Not for Team {
    type Output = Team;

    #[inline]
    fn not(self) -> Team {
        self.other()
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.fold("white", "black"))
    }
}

/// Error when parsing an invalid team name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseTeamError;

impl fmt::Display for ParseTeamError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid team")
    }
}

impl Error for ParseTeamError {}

impl FromStr for Team {
    type Err = ParseTeamError;

    fn from_str(s: &str) -> Result<Team, ParseTeamError> {
        Ok(match s {
            "white" => Team::White,
            "black" => Team::Black,
            _ => return Err(ParseTeamError),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_parity() {
        assert_eq!(Team::from_turns(0), Team::White);
        assert_eq!(Team::from_turns(1), Team::Black);
        assert_eq!(Team::from_turns(42), Team::White);
    }

    #[test]
    fn test_ranks() {
        assert_eq!(Team::White.promotion_rank(), 7);
        assert_eq!(Team::Black.promotion_rank(), 0);
        assert_eq!(Team::Black.pawn_rank() + Team::Black.forward(), 5);
    }

    #[test]
    fn test_parse() {
        assert_eq!("black".parse::<Team>(), Ok(Team::Black));
        assert_eq!("w".parse::<Team>(), Err(ParseTeamError));
        assert_eq!(Team::from_char('w'), Some(Team::White));
    }
}
