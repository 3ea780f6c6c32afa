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

use std::{error::Error, fmt, str::FromStr};

/// Error when parsing an invalid square name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct ParseCoordinateError;

impl fmt::Display for ParseCoordinateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid square name")
    }
}

impl Error for ParseCoordinateError {}

/// A square on the board, as a file and a rank.
///
/// Files and ranks are counted from `0` (the a-file, the first rank) to `7`.
/// A coordinate may be constructed outside of that range, but the engine
/// itself only ever produces coordinates that are
/// [on the board](Coordinate::is_on_board()).
///
/// # Examples
///
/// ```
/// use referee::Coordinate;
///
/// let e4: Coordinate = "e4".parse()?;
/// assert_eq!(e4, Coordinate::new(4, 3));
/// assert_eq!(e4, Coordinate::E4);
/// assert_eq!(e4.to_string(), "e4");
///
/// assert!(!Coordinate::new(8, 0).is_on_board());
/// # Ok::<_, referee::ParseCoordinateError>(())
/// ```
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Coordinate {
    file: i8,
    rank: i8,
}

impl Coordinate {
    /// A coordinate from zero-based file and rank indexes. The result may lie
    /// outside of the board.
    #[inline]
    pub const fn new(file: i8, rank: i8) -> Coordinate {
        Coordinate { file, rank }
    }

    #[inline]
    pub const fn file(self) -> i8 {
        self.file
    }

    #[inline]
    pub const fn rank(self) -> i8 {
        self.rank
    }

    /// Tests if both file and rank are in `0..8`.
    #[inline]
    pub const fn is_on_board(self) -> bool {
        0 <= self.file && self.file < 8 && 0 <= self.rank && self.rank < 8
    }

    /// Moves by the given deltas, or `None` if the result leaves the board.
    ///
    /// # Examples
    ///
    /// ```
    /// use referee::Coordinate;
    ///
    /// assert_eq!(Coordinate::B1.offset(1, 2), Some(Coordinate::C3));
    /// assert_eq!(Coordinate::H8.offset(1, 0), None);
    /// ```
    #[inline]
    pub fn offset(self, file_delta: i8, rank_delta: i8) -> Option<Coordinate> {
        let to = Coordinate::new(
            self.file.checked_add(file_delta)?,
            self.rank.checked_add(rank_delta)?,
        );
        to.is_on_board().then_some(to)
    }

    /// Euclidean distance between the centers of two squares.
    ///
    /// Meant for presentation, for example to highlight the nearest
    /// legal destination. It plays no part in move legality.
    ///
    /// ```
    /// use referee::Coordinate;
    ///
    /// assert_eq!(Coordinate::A1.distance(Coordinate::D5), 5.0);
    /// ```
    pub fn distance(self, other: Coordinate) -> f64 {
        let df = f64::from(self.file - other.file);
        let dr = f64::from(self.rank - other.rank);
        df.hypot(dr)
    }

    /// Parses a square name like `e4`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseCoordinateError`] if `s` is not a square name.
    pub fn from_ascii(s: &[u8]) -> Result<Coordinate, ParseCoordinateError> {
        match *s {
            [file @ b'a'..=b'h', rank @ b'1'..=b'8'] => Ok(Coordinate::new(
                (file - b'a') as i8,
                (rank - b'1') as i8,
            )),
            _ => Err(ParseCoordinateError),
        }
    }
}

impl FromStr for Coordinate {
    type Err = ParseCoordinateError;

    fn from_str(s: &str) -> Result<Coordinate, ParseCoordinateError> {
        Coordinate::from_ascii(s.as_bytes())
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(
                f,
                "{}{}",
                char::from(b'a' + self.file as u8),
                char::from(b'1' + self.rank as u8)
            )
        } else {
            write!(f, "({}, {})", self.file, self.rank)
        }
    }
}

impl fmt::Debug for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_on_board() {
            write!(f, "{}", self.to_string().to_uppercase())
        } else {
            write!(f, "Coordinate({}, {})", self.file, self.rank)
        }
    }
}

macro_rules! coordinates {
    (@rank $rank:literal, $file:expr, $name:ident) => {
        pub const $name: Coordinate = Coordinate::new($file, $rank);
    };
    (@rank $rank:literal, $file:expr, $name:ident, $($rest:ident),+) => {
        pub const $name: Coordinate = Coordinate::new($file, $rank);
        coordinates!(@rank $rank, $file + 1, $($rest),+);
    };
    ($($rank:literal => [$($name:ident),+];)+) => {
        #[allow(missing_docs)]
        impl Coordinate {
            $(coordinates!(@rank $rank, 0, $($name),+);)+
        }
    };
}

coordinates! {
    0 => [A1, B1, C1, D1, E1, F1, G1, H1];
    1 => [A2, B2, C2, D2, E2, F2, G2, H2];
    2 => [A3, B3, C3, D3, E3, F3, G3, H3];
    3 => [A4, B4, C4, D4, E4, F4, G4, H4];
    4 => [A5, B5, C5, D5, E5, F5, G5, H5];
    5 => [A6, B6, C6, D6, E6, F6, G6, H6];
    6 => [A7, B7, C7, D7, E7, F7, G7, H7];
    7 => [A8, B8, C8, D8, E8, F8, G8, H8];
}
