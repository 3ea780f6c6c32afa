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

//! Count legal move paths.
//!
//! # Examples
//!
//! ```
//! use referee::{perft, Board};
//!
//! let board = Board::default();
//! assert_eq!(perft(&board, 1), 20);
//! assert_eq!(perft(&board, 2), 400);
//! ```

use crate::{board::Board, coordinate::Coordinate, piece::Piece, role::Role};

const PROMOTIONS: [Option<Role>; 4] = [
    Some(Role::Queen),
    Some(Role::Rook),
    Some(Role::Bishop),
    Some(Role::Knight),
];

fn promotion_choices(board: &Board, piece: &Piece, to: Coordinate) -> &'static [Option<Role>] {
    if board.is_promotion(piece, to) {
        &PROMOTIONS
    } else {
        &[None]
    }
}

/// Counts legal move paths of a given length.
///
/// A pawn move onto the last rank counts once for each kind the pawn can
/// promote to. Paths with mate, stalemate or a draw are not counted unless
/// it occurs in the final position. Useful for comparing, testing and
/// debugging move generation correctness.
pub fn perft(board: &Board, depth: u32) -> u64 {
    if depth < 1 {
        return 1;
    }

    let moves: Vec<(&Piece, Coordinate)> = board
        .iter()
        .flat_map(|piece| piece.legal_moves().iter().map(move |&to| (piece, to)))
        .collect();

    if depth == 1 {
        return moves
            .iter()
            .map(|&(piece, to)| promotion_choices(board, piece, to).len() as u64)
            .sum();
    }

    moves
        .iter()
        .flat_map(|&(piece, to)| {
            promotion_choices(board, piece, to)
                .iter()
                .map(move |&promotion| (piece, to, promotion))
        })
        .map(|(piece, to, promotion)| {
            let mut child = board.clone();
            match child.play_move(piece, to, promotion) {
                Ok(_) => perft(&child, depth - 1),
                Err(_) => 0,
            }
        })
        .sum()
}
