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

//! Pseudo-legal move generation.
//!
//! Every generator takes the moving piece and the complete piece set and
//! returns candidate destinations. Candidates respect the board edges and
//! the blocking and capture rules of the piece kind, but may still leave
//! the mover's own king in check. [`Board`](crate::Board) filters those out.
//!
//! # Examples
//!
//! ```
//! use referee::{movegen, Coordinate, Piece, Role, Team};
//!
//! let knight = Piece::new(Role::Knight, Team::White, Coordinate::A1);
//! let pieces = [knight.clone()];
//!
//! let moves = movegen::knight_moves(&knight, &pieces);
//! assert_eq!(moves.len(), 2);
//! assert!(moves.contains(&Coordinate::B3));
//! assert!(moves.contains(&Coordinate::C2));
//! ```

use arrayvec::ArrayVec;

use crate::{coordinate::Coordinate, piece::Piece, role::Role, rules::CastlingMode, team::Team};

/// Candidate destinations of a single piece, stored inline.
///
/// A queen in the middle of an empty board has 27 destinations, the
/// most any piece can have.
pub type Destinations = ArrayVec<Coordinate, 32>;

pub(crate) fn piece_at(pieces: &[Piece], square: Coordinate) -> Option<&Piece> {
    pieces.iter().find(|p| p.same_position(square))
}

trait Stepper {
    const STEPS: [(i8, i8); 8];

    fn gen_moves(piece: &Piece, pieces: &[Piece], moves: &mut Destinations) {
        for (file_delta, rank_delta) in Self::STEPS {
            if let Some(to) = piece.position().offset(file_delta, rank_delta) {
                if piece_at(pieces, to).map_or(true, |p| p.team() != piece.team()) {
                    moves.push(to);
                }
            }
        }
    }
}

trait Slider {
    const DIRECTIONS: &'static [(i8, i8)];

    fn gen_moves(piece: &Piece, pieces: &[Piece], moves: &mut Destinations) {
        for &(file_delta, rank_delta) in Self::DIRECTIONS {
            let mut square = piece.position();
            while let Some(to) = square.offset(file_delta, rank_delta) {
                match piece_at(pieces, to) {
                    None => moves.push(to),
                    Some(blocker) => {
                        if blocker.team() != piece.team() {
                            moves.push(to);
                        }
                        break;
                    }
                }
                square = to;
            }
        }
    }
}

struct KnightTag;
struct KingTag;
struct BishopTag;
struct RookTag;
struct QueenTag;

const DIAGONALS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, 1), (-1, -1)];
const ORTHOGONALS: [(i8, i8); 4] = [(1, 0), (-1, 0), (0, 1), (0, -1)];

impl Stepper for KnightTag {
    const STEPS: [(i8, i8); 8] = [
        (1, 2),
        (2, 1),
        (2, -1),
        (1, -2),
        (-1, -2),
        (-2, -1),
        (-2, 1),
        (-1, 2),
    ];
}

impl Stepper for KingTag {
    const STEPS: [(i8, i8); 8] = [
        (0, 1),
        (1, 1),
        (1, 0),
        (1, -1),
        (0, -1),
        (-1, -1),
        (-1, 0),
        (-1, 1),
    ];
}

impl Slider for BishopTag {
    const DIRECTIONS: &'static [(i8, i8)] = &DIAGONALS;
}

impl Slider for RookTag {
    const DIRECTIONS: &'static [(i8, i8)] = &ORTHOGONALS;
}

impl Slider for QueenTag {
    const DIRECTIONS: &'static [(i8, i8)] = &[
        (1, 1),
        (1, -1),
        (-1, 1),
        (-1, -1),
        (1, 0),
        (-1, 0),
        (0, 1),
        (0, -1),
    ];
}

/// Pawn pushes, double pushes from the starting rank, diagonal captures and
/// en passant captures.
///
/// An en passant capture is generated onto the empty square diagonally in
/// front of the pawn, when the enemy pawn directly beside it on that file
/// is [eligible](Piece::is_en_passant_eligible()).
pub fn pawn_moves(pawn: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    let team = pawn.team();
    let from = pawn.position();
    let forward = team.forward();

    if let Some(single) = from.offset(0, forward) {
        if piece_at(pieces, single).is_none() {
            moves.push(single);

            if !pawn.has_moved() && from.rank() == team.pawn_rank() {
                if let Some(double) = single.offset(0, forward) {
                    if piece_at(pieces, double).is_none() {
                        moves.push(double);
                    }
                }
            }
        }
    }

    for side in [-1, 1] {
        let Some(to) = from.offset(side, forward) else {
            continue;
        };

        match piece_at(pieces, to) {
            Some(target) => {
                if target.team() != team {
                    moves.push(to);
                }
            }
            None => {
                let passed = Coordinate::new(to.file(), from.rank());
                if piece_at(pieces, passed)
                    .is_some_and(|p| p.team() != team && p.is_en_passant_eligible())
                {
                    moves.push(to);
                }
            }
        }
    }

    moves
}

/// Knight jumps to squares that are empty or hold an enemy.
pub fn knight_moves(knight: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    KnightTag::gen_moves(knight, pieces, &mut moves);
    moves
}

/// Diagonal slides up to and including the first blocker, if it is an
/// enemy.
pub fn bishop_moves(bishop: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    BishopTag::gen_moves(bishop, pieces, &mut moves);
    moves
}

/// Orthogonal slides up to and including the first blocker, if it is an
/// enemy.
pub fn rook_moves(rook: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    RookTag::gen_moves(rook, pieces, &mut moves);
    moves
}

/// The union of bishop and rook slides.
pub fn queen_moves(queen: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    QueenTag::gen_moves(queen, pieces, &mut moves);
    moves
}

/// The eight neighbouring squares that are empty or hold an enemy. Whether
/// the destination is attacked is not considered here, and castling is
/// generated separately by [`castling_moves()`].
pub fn king_moves(king: &Piece, pieces: &[Piece]) -> Destinations {
    let mut moves = Destinations::new();
    KingTag::gen_moves(king, pieces, &mut moves);
    moves
}

/// Dispatches to the generator for the kind of `piece`.
pub fn pseudo_legal_moves(piece: &Piece, pieces: &[Piece]) -> Destinations {
    match piece.role() {
        Role::Pawn => pawn_moves(piece, pieces),
        Role::Knight => knight_moves(piece, pieces),
        Role::Bishop => bishop_moves(piece, pieces),
        Role::Rook => rook_moves(piece, pieces),
        Role::Queen => queen_moves(piece, pieces),
        Role::King => king_moves(piece, pieces),
    }
}

/// Castling candidates for an unmoved king, given as the squares of the
/// rooks it may castle with.
///
/// The king lands two files towards the rook and the rook lands on the
/// square the king crossed. Every square between and including the start
/// and landing squares of both pieces must be empty, apart from the king
/// and the rook themselves. With [`CastlingMode::Standard`] the king
/// must also not be in check, and must not cross or land on an attacked
/// square.
pub fn castling_moves(king: &Piece, pieces: &[Piece], mode: CastlingMode) -> Destinations {
    let mut moves = Destinations::new();

    if king.role() != Role::King || king.has_moved() {
        return moves;
    }

    let team = king.team();
    let from = king.position();

    if mode.is_standard() && is_attacked(from, !team, pieces) {
        return moves;
    }

    let rooks = pieces.iter().filter(|p| {
        p.is(Role::Rook, team) && !p.has_moved() && p.position().rank() == from.rank()
    });

    'next_rook: for rook in rooks {
        let side = (rook.position().file() - from.file()).signum();
        let Some(king_to) = from.offset(2 * side, 0) else {
            continue;
        };
        let rook_to = Coordinate::new(king_to.file() - side, from.rank());

        let files = [from.file(), rook.position().file(), king_to.file(), rook_to.file()];
        let (Some(&min), Some(&max)) = (files.iter().min(), files.iter().max()) else {
            continue;
        };

        for file in min..=max {
            let square = Coordinate::new(file, from.rank());
            if square != from && square != rook.position() && piece_at(pieces, square).is_some() {
                continue 'next_rook;
            }
        }

        if mode.is_standard() {
            let mut square = from;
            while square != king_to {
                square = Coordinate::new(square.file() + side, from.rank());
                if is_attacked(square, !team, pieces) {
                    continue 'next_rook;
                }
            }
        }

        moves.push(rook.position());
    }

    moves
}

/// Tests if `piece` attacks `target`, that is, could capture an enemy
/// piece standing there.
///
/// Pawns attack the two squares diagonally in front of them, whether or
/// not there is anything to capture.
pub fn attacks(piece: &Piece, target: Coordinate, pieces: &[Piece]) -> bool {
    let from = piece.position();
    let file_delta = target.file() - from.file();
    let rank_delta = target.rank() - from.rank();
    let diagonal = file_delta != 0 && file_delta.abs() == rank_delta.abs();
    let orthogonal = (file_delta == 0) != (rank_delta == 0);

    match piece.role() {
        Role::Pawn => rank_delta == piece.team().forward() && file_delta.abs() == 1,
        Role::Knight => matches!((file_delta.abs(), rank_delta.abs()), (1, 2) | (2, 1)),
        Role::King => file_delta.abs().max(rank_delta.abs()) == 1,
        Role::Bishop => diagonal && ray_is_clear(from, target, pieces),
        Role::Rook => orthogonal && ray_is_clear(from, target, pieces),
        Role::Queen => (diagonal || orthogonal) && ray_is_clear(from, target, pieces),
    }
}

/// Tests if the squares strictly between two aligned squares are empty.
fn ray_is_clear(from: Coordinate, to: Coordinate, pieces: &[Piece]) -> bool {
    let file_step = (to.file() - from.file()).signum();
    let rank_step = (to.rank() - from.rank()).signum();

    let mut square = Coordinate::new(from.file() + file_step, from.rank() + rank_step);
    while square != to {
        if piece_at(pieces, square).is_some() {
            return false;
        }
        square = Coordinate::new(square.file() + file_step, square.rank() + rank_step);
    }
    true
}

/// Tests if any piece of `by` attacks `target`.
///
/// # Examples
///
/// ```
/// use referee::{movegen, Coordinate, Piece, Role, Team};
///
/// let pieces = [
///     Piece::new(Role::Rook, Team::Black, Coordinate::A8),
///     Piece::new(Role::Pawn, Team::White, Coordinate::A4),
/// ];
///
/// assert!(movegen::is_attacked(Coordinate::A5, Team::Black, &pieces));
/// assert!(!movegen::is_attacked(Coordinate::A3, Team::Black, &pieces));
/// assert!(movegen::is_attacked(Coordinate::B5, Team::White, &pieces));
/// ```
pub fn is_attacked(target: Coordinate, by: Team, pieces: &[Piece]) -> bool {
    pieces
        .iter()
        .filter(|p| p.team() == by)
        .any(|p| attacks(p, target, pieces))
}
