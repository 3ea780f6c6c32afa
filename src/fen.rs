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

//! Parse and write Forsyth-Edwards-Notation.
//!
//! # Examples
//!
//! Parse a FEN and set up a board:
//!
//! ```
//! use referee::{fen::Fen, Coordinate, Rules, Team};
//!
//! let fen: Fen = "rnbqkbnr/pppppppp/8/8/4P3/8/PPPP1PPP/RNBQKBNR b KQkq e3 0 1".parse()?;
//! let board = fen.into_board(Rules::default())?;
//!
//! assert_eq!(board.current_team(), Team::Black);
//! assert!(board
//!     .piece_at(Coordinate::E4)
//!     .is_some_and(|pawn| pawn.is_en_passant_eligible()));
//!
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Write a FEN:
//!
//! ```
//! use referee::{fen::Fen, Board};
//!
//! let board = Board::default();
//! assert_eq!(
//!     Fen::from_board(&board).to_string(),
//!     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
//! );
//! ```

use std::{
    error::Error,
    fmt::{self, Write as _},
    str::FromStr,
};

use tracing::warn;

use crate::{
    board::Board,
    coordinate::Coordinate,
    errors::{BoardError, BoardErrorKinds},
    piece::Piece,
    role::Role,
    rules::Rules,
    team::Team,
};

/// Errors that can occur when parsing a FEN.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ParseFenError {
    InvalidFen,
    InvalidBoard,
    InvalidTurn,
    InvalidCastling,
    InvalidEpSquare,
    InvalidHalfmoveClock,
    InvalidFullmoves,
}

impl fmt::Display for ParseFenError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match *self {
            ParseFenError::InvalidFen => "invalid fen",
            ParseFenError::InvalidBoard => "invalid board part in fen",
            ParseFenError::InvalidTurn => "invalid turn part in fen",
            ParseFenError::InvalidCastling => "invalid castling part in fen",
            ParseFenError::InvalidEpSquare => "invalid ep square in fen",
            ParseFenError::InvalidHalfmoveClock => "invalid halfmove clock in fen",
            ParseFenError::InvalidFullmoves => "invalid fullmove part in fen",
        })
    }
}

impl Error for ParseFenError {}

/// A parsed FEN.
///
/// Castling rights are kept as the squares of the rooks that may still
/// castle. Pieces carry no mobility state until the FEN is turned into a
/// board with [`Fen::into_board()`].
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Fen {
    pub pieces: Vec<Piece>,
    pub turn: Team,
    pub castling_rights: Vec<Coordinate>,
    pub ep_square: Option<Coordinate>,
    pub halfmoves: u32,
    pub fullmoves: u32,
}

impl Fen {
    /// Parses a FEN. Missing trailing fields default to white to move, no
    /// castling rights, no en passant square and move number 1.
    ///
    /// # Errors
    ///
    /// Returns [`ParseFenError`] naming the first malformed field.
    pub fn from_ascii(fen: &[u8]) -> Result<Fen, ParseFenError> {
        let mut parts = fen.split(|ch| *ch == b' ').filter(|part| !part.is_empty());

        let board_part = parts.next().ok_or(ParseFenError::InvalidFen)?;
        let pieces = parse_board_fen(board_part).ok_or(ParseFenError::InvalidBoard)?;

        let turn = match parts.next() {
            Some(b"w") | None => Team::White,
            Some(b"b") => Team::Black,
            Some(_) => return Err(ParseFenError::InvalidTurn),
        };

        let castling_rights = match parts.next() {
            Some(b"-") | None => Vec::new(),
            Some(part) => parse_castling(part, &pieces).ok_or(ParseFenError::InvalidCastling)?,
        };

        let ep_square = match parts.next() {
            Some(b"-") | None => None,
            Some(part) => Some(
                Coordinate::from_ascii(part).map_err(|_| ParseFenError::InvalidEpSquare)?,
            ),
        };

        let halfmoves = match parts.next() {
            Some(part) => btoi::btou(part).map_err(|_| ParseFenError::InvalidHalfmoveClock)?,
            None => 0,
        };

        let fullmoves = match parts.next() {
            Some(part) => btoi::btou::<u32>(part)
                .map_err(|_| ParseFenError::InvalidFullmoves)?
                .max(1),
            None => 1,
        };
        if turns_before(fullmoves, turn).is_none() {
            return Err(ParseFenError::InvalidFullmoves);
        }

        if parts.next().is_some() {
            return Err(ParseFenError::InvalidFen);
        }

        Ok(Fen {
            pieces,
            turn,
            castling_rights,
            ep_square,
            halfmoves,
            fullmoves,
        })
    }

    /// Describes the current state of `board`.
    pub fn from_board(board: &Board) -> Fen {
        let mut castling_rights = Vec::new();
        for team in Team::ALL {
            let Some(king) = board
                .king(team)
                .filter(|k| !k.has_moved() && k.position().rank() == team.backrank())
            else {
                continue;
            };

            castling_rights.extend(
                board
                    .iter()
                    .filter(|p| {
                        p.is(Role::Rook, team)
                            && !p.has_moved()
                            && p.position().rank() == king.position().rank()
                    })
                    .map(Piece::position),
            );
        }
        castling_rights.sort();

        let ep_square = board
            .iter()
            .find(|p| p.is_en_passant_eligible())
            .and_then(|pawn| pawn.position().offset(0, -pawn.team().forward()));

        Fen {
            pieces: board.pieces(),
            turn: board.current_team(),
            castling_rights,
            ep_square,
            halfmoves: board.halfmove_clock(),
            fullmoves: board.fullmoves(),
        }
    }

    /// Number of half-moves played before this position, or `None` if the
    /// move number is too large to be counted in half-moves.
    pub fn turns(&self) -> Option<u32> {
        turns_before(self.fullmoves, self.turn)
    }

    /// Sets up a board, with legal moves calculated.
    ///
    /// Pawns off their starting rank count as moved. Kings and rooks count
    /// as moved unless covered by a castling right. The pawn that passed the
    /// en passant square may be captured en passant.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the position is not a valid board setup,
    /// or if there is no pawn that could have passed the en passant square.
    pub fn into_board(self, rules: Rules) -> Result<Board, BoardError> {
        let passed = self
            .ep_square
            .and_then(|square| square.offset(0, (!self.turn).forward()))
            .filter(|&square| {
                self.pieces
                    .iter()
                    .any(|p| p.same_position(square) && p.is(Role::Pawn, !self.turn))
            });

        if self.ep_square.is_some() && passed.is_none() {
            let err = BoardError {
                kinds: BoardErrorKinds::INVALID_EN_PASSANT,
            };
            warn!(%err, ep_square = ?self.ep_square, "rejected board setup");
            return Err(err);
        }

        let pieces = self
            .pieces
            .iter()
            .map(|p| {
                let (team, position) = (p.team(), p.position());
                let has_moved = match p.role() {
                    Role::Pawn => position.rank() != team.pawn_rank(),
                    Role::Rook => !self.castling_rights.contains(&position),
                    Role::King => !self
                        .castling_rights
                        .iter()
                        .any(|square| square.rank() == team.backrank()),
                    Role::Knight | Role::Bishop | Role::Queen => p.has_moved(),
                };
                let eligible = p.role() == Role::Pawn && Some(position) == passed;
                Piece::with_state(p.role(), team, position, has_moved, eligible)
            })
            .collect();

        let Some(turns) = self.turns() else {
            let err = BoardError {
                kinds: BoardErrorKinds::TURN_OVERFLOW,
            };
            warn!(%err, fullmoves = self.fullmoves, "rejected board setup");
            return Err(err);
        };

        let mut board = Board::from_setup(pieces, turns, self.halfmoves, rules)?;
        board.calculate_all_moves();
        Ok(board)
    }

    fn fmt_castling(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut empty = true;

        for team in Team::ALL {
            let Some(king) = self.pieces.iter().find(|p| p.is(Role::King, team)) else {
                continue;
            };
            let king_file = king.position().file();
            let rook_files: Vec<i8> = self
                .pieces
                .iter()
                .filter(|p| p.is(Role::Rook, team) && p.position().rank() == team.backrank())
                .map(|p| p.position().file())
                .collect();

            let mut rights: Vec<i8> = self
                .castling_rights
                .iter()
                .filter(|square| square.rank() == team.backrank())
                .map(|square| square.file())
                .collect();
            rights.sort_by_key(|&file| (file < king_file, -file));

            for file in rights {
                let ch = if file > king_file && rook_files.iter().all(|&f| f <= file) {
                    'k'
                } else if file < king_file && rook_files.iter().all(|&f| f >= file) {
                    'q'
                } else {
                    char::from(b'a' + file as u8)
                };
                f.write_char(if team.is_white() { ch.to_ascii_uppercase() } else { ch })?;
                empty = false;
            }
        }

        if empty {
            f.write_char('-')?;
        }
        Ok(())
    }
}

impl FromStr for Fen {
    type Err = ParseFenError;

    fn from_str(fen: &str) -> Result<Fen, ParseFenError> {
        Fen::from_ascii(fen.as_bytes())
    }
}

impl fmt::Display for Fen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} ", board_fen(&self.pieces), self.turn.char())?;
        self.fmt_castling(f)?;
        match self.ep_square {
            Some(square) => write!(f, " {square}")?,
            None => f.write_str(" -")?,
        }
        write!(f, " {} {}", self.halfmoves, self.fullmoves)
    }
}

/// The piece placement part of a FEN, from rank 8 down to rank 1.
pub fn board_fen(pieces: &[Piece]) -> String {
    let mut grid = [[None; 8]; 8];
    for piece in pieces.iter().filter(|p| p.position().is_on_board()) {
        grid[piece.position().rank() as usize][piece.position().file() as usize] =
            Some(piece.char());
    }

    let mut fen = String::with_capacity(15);
    for (rank, row) in grid.iter().enumerate().rev() {
        let mut empty = 0;
        for square in row {
            match square {
                Some(ch) => {
                    if empty > 0 {
                        fen.push(char::from(b'0' + empty));
                        empty = 0;
                    }
                    fen.push(*ch);
                }
                None => empty += 1,
            }
        }
        if empty > 0 {
            fen.push(char::from(b'0' + empty));
        }
        if rank > 0 {
            fen.push('/');
        }
    }
    fen
}

fn turns_before(fullmoves: u32, turn: Team) -> Option<u32> {
    fullmoves
        .max(1)
        .checked_sub(1)?
        .checked_mul(2)?
        .checked_add(turn.fold(0, 1))
}

fn parse_board_fen(board_fen: &[u8]) -> Option<Vec<Piece>> {
    let mut pieces = Vec::with_capacity(32);
    let mut rank = 7;
    let mut file = 0;

    for &ch in board_fen {
        if ch == b'/' {
            if file != 8 || rank == 0 {
                return None;
            }
            rank -= 1;
            file = 0;
        } else if (b'1'..=b'8').contains(&ch) {
            file += (ch - b'0') as i8;
            if file > 8 {
                return None;
            }
        } else {
            let role = Role::from_char(char::from(ch))?;
            if file >= 8 {
                return None;
            }
            let team = Team::from_white(ch.is_ascii_uppercase());
            pieces.push(Piece::new(role, team, Coordinate::new(file, rank)));
            file += 1;
        }
    }

    (rank == 0 && file == 8).then_some(pieces)
}

fn parse_castling(part: &[u8], pieces: &[Piece]) -> Option<Vec<Coordinate>> {
    let mut rights = Vec::new();

    for &ch in part {
        let team = Team::from_white(ch.is_ascii_uppercase());
        let king = pieces
            .iter()
            .find(|p| p.is(Role::King, team) && p.position().rank() == team.backrank())?;
        let king_file = king.position().file();
        let mut rooks = pieces
            .iter()
            .filter(|p| p.is(Role::Rook, team) && p.position().rank() == team.backrank())
            .map(|p| p.position().file());

        let file = match ch.to_ascii_lowercase() {
            b'k' => rooks.filter(|&f| f > king_file).max(),
            b'q' => rooks.filter(|&f| f < king_file).min(),
            file @ b'a'..=b'h' => {
                let file = (file - b'a') as i8;
                rooks.any(|f| f == file).then_some(file)
            }
            _ => None,
        }?;

        rights.push(Coordinate::new(file, team.backrank()));
    }

    rights.sort();
    rights.dedup();
    Some(rights)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::PlayError;

    const START: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

    fn setup(fen: &str) -> Board {
        fen.parse::<Fen>()
            .expect("valid fen")
            .into_board(Rules::default())
            .expect("valid board")
    }

    #[test]
    fn test_start_position() {
        let fen: Fen = START.parse().expect("valid fen");
        assert_eq!(fen.pieces.len(), 32);
        assert_eq!(fen.castling_rights.len(), 4);
        assert_eq!(fen.turns(), Some(0));
        assert_eq!(fen.to_string(), START);
        let board = setup(START);
        assert_eq!(board.to_fen(), START);
        assert_eq!(board.legal_move_count(), 20);
        assert_eq!(board.pieces().len(), Board::default().pieces().len());
    }

    #[test]
    fn test_turns() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 b - - 12 40".parse().expect("valid fen");
        assert_eq!(fen.turns(), Some(79));
        assert_eq!(fen.halfmoves, 12);

        let board = fen.into_board(Rules::default()).expect("valid board");
        assert_eq!(board.turns(), 79);
        assert_eq!(board.fullmoves(), 40);
        assert_eq!(board.halfmove_clock(), 12);
    }

    #[test]
    fn test_huge_move_number() {
        // Largest move number whose half-moves still fit the turn counter.
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 2147483648".parse().expect("valid fen");
        assert_eq!(fen.turns(), Some(u32::MAX - 1));
        let board = fen.into_board(Rules::default()).expect("valid board");
        assert_eq!(board.current_team(), Team::White);
        assert_eq!(board.fullmoves(), 2_147_483_648);

        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 2147483650".parse::<Fen>(),
            Err(ParseFenError::InvalidFullmoves)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 b - - 0 2147483649".parse::<Fen>(),
            Err(ParseFenError::InvalidFullmoves)
        );

        let mut fen: Fen = "4k3/8/8/8/8/8/8/4K3 w - - 0 1".parse().expect("valid fen");
        fen.fullmoves = u32::MAX;
        assert_eq!(fen.turns(), None);
        let err = fen.into_board(Rules::default()).expect_err("move number out of range");
        assert_eq!(err.kinds(), BoardErrorKinds::TURN_OVERFLOW);
    }

    #[test]
    fn test_turn_counter_exhausted() {
        let mut board = setup("4k3/8/8/8/8/8/8/4K3 b - - 0 2147483648");
        assert_eq!(board.turns(), u32::MAX);
        assert_eq!(board.current_team(), Team::Black);

        let king = board.piece_at(Coordinate::E8).cloned().expect("black king");
        assert_eq!(
            board.play_move(&king, Coordinate::D8, None),
            Err(PlayError::TurnLimit)
        );
        assert_eq!(board.turns(), u32::MAX);
        assert!(board.piece_at(Coordinate::E8).is_some());
    }

    #[test]
    fn test_missing_fields() {
        let fen: Fen = "4k3/8/8/8/8/8/8/4K3".parse().expect("valid fen");
        assert_eq!(fen.turn, Team::White);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/4K3 w - - 0 1");
    }

    #[test]
    fn test_invalid_fens() {
        assert_eq!("".parse::<Fen>(), Err(ParseFenError::InvalidFen));
        assert_eq!("8/8/8 w - - 0 1".parse::<Fen>(), Err(ParseFenError::InvalidBoard));
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K2X w - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidBoard)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 x - - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidTurn)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w K - 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidCastling)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - e9 0 1".parse::<Fen>(),
            Err(ParseFenError::InvalidEpSquare)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - x 1".parse::<Fen>(),
            Err(ParseFenError::InvalidHalfmoveClock)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 -1".parse::<Fen>(),
            Err(ParseFenError::InvalidFullmoves)
        );
        assert_eq!(
            "4k3/8/8/8/8/8/8/4K3 w - - 0 1 extra".parse::<Fen>(),
            Err(ParseFenError::InvalidFen)
        );
    }

    #[test]
    fn test_mobility_state() {
        let board = setup("r3k3/1p6/8/8/2P5/8/8/4K2R w Kq - 0 1");
        assert!(board.piece_at(Coordinate::H1).is_some_and(|r| !r.has_moved()));
        assert!(board.piece_at(Coordinate::E1).is_some_and(|k| !k.has_moved()));
        assert!(board.piece_at(Coordinate::C4).is_some_and(|p| p.has_moved()));
        assert!(board.piece_at(Coordinate::B7).is_some_and(|p| !p.has_moved()));

        let board = setup("r3k3/8/8/8/8/8/8/4K2R w - - 0 1");
        assert!(board.piece_at(Coordinate::H1).is_some_and(|r| r.has_moved()));
        assert!(board.piece_at(Coordinate::E8).is_some_and(|k| k.has_moved()));
    }

    #[test]
    fn test_en_passant_square() {
        let fen = "rnbqkbnr/ppp1p1pp/8/3pPp2/8/8/PPPP1PPP/RNBQKBNR w KQkq f6 0 3";
        let board = setup(fen);
        assert!(board
            .piece_at(Coordinate::F5)
            .is_some_and(|p| p.is_en_passant_eligible()));
        assert!(board
            .piece_at(Coordinate::D5)
            .is_some_and(|p| !p.is_en_passant_eligible()));
        assert_eq!(board.to_fen(), fen);

        let err = "4k3/8/8/8/8/8/8/4K3 w - e6 0 1"
            .parse::<Fen>()
            .expect("valid fen")
            .into_board(Rules::default())
            .expect_err("no pawn passed e6");
        assert_eq!(err.kinds(), BoardErrorKinds::INVALID_EN_PASSANT);
    }

    #[test]
    fn test_castling_file_letters() {
        let fen: Fen = "4k3/8/8/8/8/8/8/RR2K3 w B - 0 1".parse().expect("valid fen");
        assert_eq!(fen.castling_rights, vec![Coordinate::B1]);
        assert_eq!(fen.to_string(), "4k3/8/8/8/8/8/8/RR2K3 w B - 0 1");

        let fen: Fen = "4k3/8/8/8/8/8/8/RR2K3 w Q - 0 1".parse().expect("valid fen");
        assert_eq!(fen.castling_rights, vec![Coordinate::A1]);

        let board = setup("1r2k1r1/8/8/8/8/8/8/4K3 w gb - 0 1");
        assert_eq!(board.to_fen(), "1r2k1r1/8/8/8/8/8/8/4K3 w kq - 0 1");
    }
}
