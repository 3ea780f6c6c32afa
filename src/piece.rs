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

use crate::{coordinate::Coordinate, role::Role, team::Team};

/// A piece standing on the board, with its mobility state.
///
/// Pawns additionally track whether they may be captured en passant. That
/// state only exists for pawns: [`Piece::en_passant()`] is `None` for every
/// other kind.
///
/// Pieces handed out by a [`Board`](crate::Board) are snapshots. Changing
/// or dropping them never affects the board.
///
/// # Examples
///
/// ```
/// use referee::{Coordinate, Piece, Role, Team};
///
/// let knight = Piece::new(Role::Knight, Team::White, Coordinate::G1);
/// assert!(!knight.has_moved());
/// assert_eq!(knight.en_passant(), None);
///
/// let pawn = Piece::with_state(Role::Pawn, Team::Black, Coordinate::D5, true, true);
/// assert_eq!(pawn.en_passant(), Some(true));
/// ```
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Piece {
    role: Role,
    team: Team,
    position: Coordinate,
    has_moved: bool,
    en_passant: Option<bool>,
    legal_moves: Vec<Coordinate>,
}

impl Piece {
    /// A piece that has not moved yet.
    pub fn new(role: Role, team: Team, position: Coordinate) -> Piece {
        Piece::with_state(role, team, position, false, false)
    }

    /// A piece with explicit mobility state. `en_passant` is ignored unless
    /// `role` is [`Role::Pawn`].
    pub fn with_state(
        role: Role,
        team: Team,
        position: Coordinate,
        has_moved: bool,
        en_passant: bool,
    ) -> Piece {
        Piece {
            role,
            team,
            position,
            has_moved,
            en_passant: (role == Role::Pawn).then_some(en_passant),
            legal_moves: Vec::new(),
        }
    }

    #[inline]
    pub fn role(&self) -> Role {
        self.role
    }

    #[inline]
    pub fn team(&self) -> Team {
        self.team
    }

    #[inline]
    pub fn position(&self) -> Coordinate {
        self.position
    }

    #[inline]
    pub fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Pawn-only en passant state, `None` for other kinds.
    #[inline]
    pub fn en_passant(&self) -> Option<bool> {
        self.en_passant
    }

    /// Whether this is a pawn that just advanced two squares.
    #[inline]
    pub fn is_en_passant_eligible(&self) -> bool {
        self.role == Role::Pawn && self.en_passant == Some(true)
    }

    /// Legal destinations, as of the last time the board calculated moves.
    ///
    /// Only pieces of the side to move have destinations. A castling move
    /// is listed as the square of the rook to castle with.
    #[inline]
    pub fn legal_moves(&self) -> &[Coordinate] {
        &self.legal_moves
    }

    /// Tests if `to` is among the cached legal moves.
    #[inline]
    pub fn can_move_to(&self, to: Coordinate) -> bool {
        self.legal_moves.contains(&to)
    }

    #[inline]
    pub fn is(&self, role: Role, team: Team) -> bool {
        self.role == role && self.team == team
    }

    /// Tests if the piece stands on `other`.
    #[inline]
    pub fn same_position(&self, other: Coordinate) -> bool {
        self.position == other
    }

    /// Tests if `other` refers to the same piece: same team on the same
    /// square. Used to find a piece again on a copy of the board.
    #[inline]
    pub fn same_identity(&self, other: &Piece) -> bool {
        self.team == other.team && self.position == other.position
    }

    /// The FEN letter, uppercase for white.
    pub fn char(&self) -> char {
        self.team.fold(self.role.upper_char(), self.role.char())
    }

    pub(crate) fn move_to(&mut self, to: Coordinate) {
        self.position = to;
        self.has_moved = true;
    }

    pub(crate) fn set_en_passant(&mut self, eligible: bool) {
        if let Some(state) = self.en_passant.as_mut() {
            *state = eligible;
        }
    }

    pub(crate) fn set_legal_moves(&mut self, moves: Vec<Coordinate>) {
        self.legal_moves = moves;
    }

    pub(crate) fn clear_legal_moves(&mut self) {
        self.legal_moves.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_en_passant_is_pawn_only() {
        let rook = Piece::with_state(Role::Rook, Team::White, Coordinate::A1, true, true);
        assert_eq!(rook.en_passant(), None);
        assert!(!rook.is_en_passant_eligible());

        let mut pawn = Piece::new(Role::Pawn, Team::White, Coordinate::E2);
        assert_eq!(pawn.en_passant(), Some(false));
        pawn.set_en_passant(true);
        assert!(pawn.is_en_passant_eligible());

        let mut queen = Piece::new(Role::Queen, Team::White, Coordinate::D1);
        queen.set_en_passant(true);
        assert_eq!(queen.en_passant(), None);
    }

    #[test]
    fn test_identity() {
        let a = Piece::new(Role::Knight, Team::White, Coordinate::G1);
        let mut b = a.clone();
        assert!(a.same_identity(&b));
        b.move_to(Coordinate::F3);
        assert!(!a.same_identity(&b));
        assert!(b.same_position(Coordinate::F3));
        assert!(b.has_moved());
        assert!(!a.has_moved());

        let c = Piece::new(Role::Knight, Team::Black, Coordinate::G1);
        assert!(!a.same_identity(&c));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_deserialized_en_passant_state() {
        let knight: Piece = serde_json::from_str(
            r#"{
                "role": "knight",
                "team": "black",
                "position": { "file": 3, "rank": 4 },
                "has_moved": true,
                "en_passant": true,
                "legal_moves": []
            }"#,
        )
        .expect("valid piece");
        assert_eq!(knight.en_passant(), Some(true));
        assert!(!knight.is_en_passant_eligible());
    }

    #[test]
    fn test_char() {
        assert_eq!(Piece::new(Role::Queen, Team::White, Coordinate::D1).char(), 'Q');
        assert_eq!(Piece::new(Role::Knight, Team::Black, Coordinate::B8).char(), 'n');
    }
}
