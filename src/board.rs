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

use std::{fmt, fmt::Write as _};

use tracing::{debug, trace, warn};

use crate::{
    coordinate::Coordinate,
    errors::{BoardError, BoardErrorKinds, PlayError},
    fen::{board_fen, Fen},
    movegen,
    outcome::{DrawReason, GameState},
    piece::Piece,
    record::{MoveFlags, MoveKind, MoveRecord},
    role::Role,
    rules::Rules,
    team::Team,
};

const BACKRANK: [Role; 8] = [
    Role::Rook,
    Role::Knight,
    Role::Bishop,
    Role::Queen,
    Role::King,
    Role::Bishop,
    Role::Knight,
    Role::Rook,
];

/// A game in progress: the piece set, the turn counter and everything
/// derived from them.
///
/// The board exclusively owns its pieces. Moves are only accepted through
/// [`Board::play_move()`], which checks them against the legal moves
/// cached on each piece by [`Board::calculate_all_moves()`].
///
/// # Examples
///
/// ```
/// use referee::{Board, Coordinate, GameState, Team};
///
/// let mut board = Board::default();
/// assert_eq!(board.current_team(), Team::White);
///
/// let knight = board.piece_at(Coordinate::G1).cloned().expect("knight");
/// assert_eq!(knight.legal_moves().len(), 2);
///
/// board.play_move(&knight, Coordinate::F3, None)?;
/// assert_eq!(board.current_team(), Team::Black);
/// assert_eq!(board.game_state(), GameState::Ongoing);
/// # Ok::<_, referee::PlayError>(())
/// ```
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Board {
    pieces: Vec<Piece>,
    turns: u32,
    halfmoves: u32,
    state: GameState,
    winner: Option<Team>,
    draw_reason: Option<DrawReason>,
    history: Vec<MoveRecord>,
    positions: Vec<String>,
    rules: Rules,
}

/// What [`execute`] did to the piece set.
struct Execution {
    kind: MoveKind,
    capture: Option<Role>,
    promotion: Option<Role>,
}

impl Board {
    /// Validates a piece set and creates a board with the default
    /// [`Rules`]. White moves if `turns` is even.
    ///
    /// Legal moves are not calculated yet. Call
    /// [`Board::calculate_all_moves()`] before playing the first move.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if the piece set violates a board invariant,
    /// most importantly if a team does not have exactly one king.
    pub fn new(pieces: Vec<Piece>, turns: u32) -> Result<Board, BoardError> {
        Board::with_rules(pieces, turns, Rules::default())
    }

    /// Like [`Board::new()`], with explicit rules.
    pub fn with_rules(pieces: Vec<Piece>, turns: u32, rules: Rules) -> Result<Board, BoardError> {
        Board::from_setup(pieces, turns, 0, rules)
    }

    pub(crate) fn from_setup(
        pieces: Vec<Piece>,
        turns: u32,
        halfmoves: u32,
        rules: Rules,
    ) -> Result<Board, BoardError> {
        let kinds = validate(&pieces, Team::from_turns(turns));
        if !kinds.is_empty() {
            let err = BoardError { kinds };
            warn!(%err, pieces = pieces.len(), turns, "rejected board setup");
            return Err(err);
        }

        Ok(Board::from_setup_unchecked(pieces, turns, halfmoves, rules))
    }

    fn from_setup_unchecked(
        mut pieces: Vec<Piece>,
        turns: u32,
        halfmoves: u32,
        rules: Rules,
    ) -> Board {
        for piece in &mut pieces {
            piece.clear_legal_moves();
        }

        let mut board = Board {
            pieces,
            turns,
            halfmoves,
            state: GameState::Ongoing,
            winner: None,
            draw_reason: None,
            history: Vec::new(),
            positions: Vec::new(),
            rules,
        };
        board.positions.push(board.position_key());
        board
    }

    /// The standard starting position, with legal moves calculated.
    pub fn starting_position(rules: Rules) -> Board {
        let mut pieces = Vec::with_capacity(32);
        for team in Team::ALL {
            for (file, role) in (0..).zip(BACKRANK) {
                pieces.push(Piece::new(role, team, Coordinate::new(file, team.backrank())));
                pieces.push(Piece::new(Role::Pawn, team, Coordinate::new(file, team.pawn_rank())));
            }
        }

        let mut board = Board::from_setup_unchecked(pieces, 0, 0, rules);
        board.calculate_all_moves();
        board
    }

    /// Recalculates the legal moves of the team to move and classifies the
    /// position.
    ///
    /// Pieces of the other team are left without legal moves. Every
    /// pseudo-legal candidate is played out on a copy of the piece set and
    /// dropped if it leaves the mover's king attacked. Calling this again
    /// without a move in between has no further effect.
    pub fn calculate_all_moves(&mut self) {
        for piece in &mut self.pieces {
            piece.clear_legal_moves();
        }

        if self.state.is_terminal() {
            return;
        }

        let team = self.current_team();
        let mut total = 0;

        for index in 0..self.pieces.len() {
            let piece = &self.pieces[index];
            if piece.team() != team {
                continue;
            }

            let mut candidates = movegen::pseudo_legal_moves(piece, &self.pieces);
            if piece.role() == Role::King {
                candidates.extend(movegen::castling_moves(
                    piece,
                    &self.pieces,
                    self.rules.castling,
                ));
            }

            let from = piece.position();
            let legal: Vec<Coordinate> = candidates
                .into_iter()
                .filter(|&to| self.leaves_king_safe(from, to))
                .collect();

            total += legal.len();
            self.pieces[index].set_legal_moves(legal);
        }

        trace!(%team, moves = total, "calculated legal moves");

        if total == 0 {
            if self.is_check() {
                self.state = GameState::Checkmate;
                self.winner = Some(!team);
            } else {
                self.state = GameState::Stalemate;
            }
        } else if self.halfmoves >= self.rules.fifty_move_limit {
            self.state = GameState::Draw;
            self.draw_reason = Some(DrawReason::FiftyMoves);
        } else if self.repetitions() >= self.rules.repetition_threshold {
            self.state = GameState::Draw;
            self.draw_reason = Some(DrawReason::Repetition);
        }

        if self.state.is_terminal() {
            for piece in &mut self.pieces {
                piece.clear_legal_moves();
            }
            debug!(
                state = %self.state,
                winner = ?self.winner,
                draw_reason = ?self.draw_reason,
                turns = self.turns,
                "game over"
            );
        }
    }

    fn leaves_king_safe(&self, from: Coordinate, to: Coordinate) -> bool {
        let Some(team) = self.piece_at(from).map(Piece::team) else {
            return false;
        };

        let mut scratch = self.pieces.clone();
        if execute(&mut scratch, from, to, None).is_none() {
            return false;
        }

        scratch
            .iter()
            .find(|p| p.is(Role::King, team))
            .is_some_and(|king| !movegen::is_attacked(king.position(), !team, &scratch))
    }

    fn repetitions(&self) -> usize {
        match self.positions.last() {
            Some(current) => self.positions.iter().filter(|&key| key == current).count(),
            None => 0,
        }
    }

    fn position_key(&self) -> String {
        let mut key = board_fen(&self.pieces);
        key.push(' ');
        key.push(self.current_team().char());
        key
    }

    /// Plays a move of `piece` to `to`.
    ///
    /// `piece` is located on the board by team and position, so a snapshot
    /// from [`Board::pieces()`] works. `to` must be one of the legal moves
    /// of that piece, which for castling is the square of the rook. When a
    /// pawn reaches the last rank, it is replaced by a piece of the
    /// `promotion` kind, or a queen if `None`.
    ///
    /// # Errors
    ///
    /// Returns [`PlayError`] and leaves the board untouched if the move is
    /// not accepted.
    pub fn play_move(
        &mut self,
        piece: &Piece,
        to: Coordinate,
        promotion: Option<Role>,
    ) -> Result<MoveRecord, PlayError> {
        let (team, role, from) = match self.check_move(piece, to, promotion) {
            Ok(own) => (own.team(), own.role(), own.position()),
            Err(err) => {
                trace!(%err, from = %piece.position(), %to, "rejected move");
                return Err(err);
            }
        };

        let Some(turns) = self.turns.checked_add(1) else {
            trace!(turns = self.turns, "rejected move");
            return Err(PlayError::TurnLimit);
        };

        let Some(execution) = execute(&mut self.pieces, from, to, promotion) else {
            return Err(PlayError::UnknownPiece);
        };

        self.turns = turns;
        if role == Role::Pawn || execution.capture.is_some() {
            self.halfmoves = 0;
        } else {
            self.halfmoves += 1;
        }
        self.positions.push(self.position_key());
        self.calculate_all_moves();

        let mut flags = MoveFlags::empty();
        flags.set(MoveFlags::CAPTURE, execution.capture.is_some());
        flags.set(MoveFlags::PROMOTION, execution.promotion.is_some());
        flags.set(MoveFlags::CASTLE, matches!(execution.kind, MoveKind::Castle { .. }));
        flags.set(MoveFlags::EN_PASSANT, execution.kind == MoveKind::EnPassant);
        flags.set(MoveFlags::CHECK, self.is_check());
        flags.set(MoveFlags::GAME_OVER, self.state.is_terminal());

        let record = MoveRecord {
            team,
            role,
            from,
            to,
            kind: execution.kind,
            capture: execution.capture,
            promotion: execution.promotion,
            flags,
        };

        debug!(%team, %record, ?flags, turns = self.turns, "played move");
        self.history.push(record.clone());
        Ok(record)
    }

    fn check_move(
        &self,
        piece: &Piece,
        to: Coordinate,
        promotion: Option<Role>,
    ) -> Result<&Piece, PlayError> {
        if self.state.is_terminal() {
            return Err(PlayError::GameOver(self.state));
        }

        if let Some(role) = promotion {
            if !role.is_promotion_target() {
                return Err(PlayError::InvalidPromotion(role));
            }
        }

        if piece.team() != self.current_team() {
            return Err(PlayError::NotYourTurn);
        }

        let own = self
            .pieces
            .iter()
            .find(|p| p.same_identity(piece))
            .ok_or(PlayError::UnknownPiece)?;

        if !own.can_move_to(to) {
            return Err(PlayError::IllegalMove {
                from: own.position(),
                to,
            });
        }

        Ok(own)
    }

    /// Tests if a move of `piece` to `to` is a legal pawn move onto the last
    /// rank, so that a promotion kind should be chosen.
    pub fn is_promotion(&self, piece: &Piece, to: Coordinate) -> bool {
        piece.role() == Role::Pawn
            && to.rank() == piece.team().promotion_rank()
            && self
                .pieces
                .iter()
                .find(|p| p.same_identity(piece))
                .is_some_and(|own| own.role() == Role::Pawn && own.can_move_to(to))
    }

    /// Tests if `king` is attacked by any piece of the other team. Attacks
    /// are computed fresh from the current piece set.
    pub fn is_king_in_check(&self, king: &Piece) -> bool {
        movegen::is_attacked(king.position(), !king.team(), &self.pieces)
    }

    /// Tests if the king of the team to move is in check.
    pub fn is_check(&self) -> bool {
        self.king(self.current_team())
            .is_some_and(|king| self.is_king_in_check(king))
    }

    /// An independent copy of every piece on the board.
    pub fn pieces(&self) -> Vec<Piece> {
        self.pieces.clone()
    }

    /// Iterates over the pieces without copying them.
    pub fn iter(&self) -> std::slice::Iter<'_, Piece> {
        self.pieces.iter()
    }

    /// The piece on `square`, if any.
    pub fn piece_at(&self, square: Coordinate) -> Option<&Piece> {
        movegen::piece_at(&self.pieces, square)
    }

    /// The king of `team`.
    pub fn king(&self, team: Team) -> Option<&Piece> {
        self.pieces.iter().find(|p| p.is(Role::King, team))
    }

    /// The team to move, derived from the turn counter.
    #[inline]
    pub fn current_team(&self) -> Team {
        Team::from_turns(self.turns)
    }

    /// Whether the game is still going on, and how it ended otherwise.
    #[inline]
    pub fn game_state(&self) -> GameState {
        self.state
    }

    /// The winner, if the game ended in checkmate.
    #[inline]
    pub fn winning_team(&self) -> Option<Team> {
        self.winner
    }

    /// Why the game was drawn, if it was.
    #[inline]
    pub fn draw_reason(&self) -> Option<DrawReason> {
        self.draw_reason
    }

    /// Number of half-moves played, including those before the board was
    /// created.
    #[inline]
    pub fn turns(&self) -> u32 {
        self.turns
    }

    /// Half-moves since the last capture or pawn move.
    #[inline]
    pub fn halfmove_clock(&self) -> u32 {
        self.halfmoves
    }

    /// The move number, starting at 1 and incremented after each move of
    /// black.
    #[inline]
    pub fn fullmoves(&self) -> u32 {
        self.turns / 2 + 1
    }

    /// Moves played on this board, oldest first.
    #[inline]
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// The rules this board was set up with.
    #[inline]
    pub fn rules(&self) -> &Rules {
        &self.rules
    }

    /// Number of legal moves of the team to move.
    pub fn legal_move_count(&self) -> usize {
        self.pieces.iter().map(|p| p.legal_moves().len()).sum()
    }

    /// Serializes the board in Forsyth-Edwards Notation.
    ///
    /// # Examples
    ///
    /// ```
    /// use referee::Board;
    ///
    /// assert_eq!(
    ///     Board::default().to_fen(),
    ///     "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1"
    /// );
    /// ```
    pub fn to_fen(&self) -> String {
        Fen::from_board(self).to_string()
    }

    /// The piece placement part of the FEN.
    pub fn board_fen(&self) -> String {
        board_fen(&self.pieces)
    }
}

impl Default for Board {
    fn default() -> Board {
        Board::starting_position(Rules::default())
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in (0..8).rev() {
            for file in 0..8 {
                f.write_char(
                    self.piece_at(Coordinate::new(file, rank))
                        .map_or('.', Piece::char),
                )?;
                f.write_char(if file < 7 { ' ' } else { '\n' })?;
            }
        }
        Ok(())
    }
}

fn validate(pieces: &[Piece], turn: Team) -> BoardErrorKinds {
    let mut kinds = BoardErrorKinds::empty();

    for team in Team::ALL {
        match pieces.iter().filter(|p| p.is(Role::King, team)).count() {
            0 => kinds |= BoardErrorKinds::MISSING_KING,
            1 => (),
            _ => kinds |= BoardErrorKinds::TOO_MANY_KINGS,
        }
    }

    if pieces.iter().any(|p| !p.position().is_on_board()) {
        kinds |= BoardErrorKinds::OFF_BOARD;
    }

    for (i, piece) in pieces.iter().enumerate() {
        if pieces[i + 1..].iter().any(|p| p.same_position(piece.position())) {
            kinds |= BoardErrorKinds::OVERLAPPING;
        }
    }

    if pieces.iter().any(|p| {
        p.role() == Role::Pawn && (p.position().rank() == 0 || p.position().rank() == 7)
    }) {
        kinds |= BoardErrorKinds::PAWNS_ON_BACKRANK;
    }

    if pieces.iter().any(|p| p.role() != Role::Pawn && p.en_passant().is_some()) {
        kinds |= BoardErrorKinds::INVALID_EN_PASSANT;
    }

    let mut eligible = pieces.iter().filter(|p| p.is_en_passant_eligible());
    if let Some(pawn) = eligible.next() {
        let (team, position) = (pawn.team(), pawn.position());
        let double_push_rank = team.pawn_rank() + 2 * team.forward();
        // The squares the pawn advanced over must be empty.
        let path_blocked = (1..=2).any(|steps| {
            let square = Coordinate::new(position.file(), position.rank() - steps * team.forward());
            movegen::piece_at(pieces, square).is_some()
        });
        if team == turn
            || position.rank() != double_push_rank
            || path_blocked
            || eligible.next().is_some()
        {
            kinds |= BoardErrorKinds::INVALID_EN_PASSANT;
        }
    }

    if kinds.is_empty() {
        let their_king = pieces.iter().find(|p| p.is(Role::King, !turn));
        if their_king.is_some_and(|king| movegen::is_attacked(king.position(), turn, pieces)) {
            kinds |= BoardErrorKinds::OPPOSITE_CHECK;
        }
    }

    kinds
}

/// Applies a move to a piece set, without checking its legality.
///
/// Returns `None` without touching the pieces if there is no piece on
/// `from`.
fn execute(
    pieces: &mut Vec<Piece>,
    from: Coordinate,
    to: Coordinate,
    promotion: Option<Role>,
) -> Option<Execution> {
    let mover = movegen::piece_at(pieces, from)?;
    let (role, team, unmoved) = (mover.role(), mover.team(), !mover.has_moved());
    let target = movegen::piece_at(pieces, to).map(|p| (p.role(), p.team(), p.has_moved()));

    let castles = role == Role::King && unmoved && target == Some((Role::Rook, team, false));
    let passed = Coordinate::new(to.file(), from.rank());
    let en_passant = role == Role::Pawn
        && from.file() != to.file()
        && target.is_none()
        && movegen::piece_at(pieces, passed)
            .is_some_and(|p| p.team() != team && p.is_en_passant_eligible());

    // Eligibility lives for exactly one ply.
    for piece in pieces.iter_mut() {
        piece.set_en_passant(false);
    }

    if castles {
        let side = (to.file() - from.file()).signum();
        let king_to = Coordinate::new(from.file() + 2 * side, from.rank());
        let rook_to = Coordinate::new(king_to.file() - side, from.rank());

        for piece in pieces.iter_mut() {
            if piece.same_position(from) {
                piece.move_to(king_to);
            } else if piece.same_position(to) {
                piece.move_to(rook_to);
            }
        }

        return Some(Execution {
            kind: MoveKind::Castle { king_to, rook_to },
            capture: None,
            promotion: None,
        });
    }

    let (kind, captured_square) = if en_passant {
        (MoveKind::EnPassant, passed)
    } else {
        (MoveKind::Normal, to)
    };

    let capture = pieces
        .iter()
        .position(|p| p.same_position(captured_square) && p.team() != team)
        .map(|index| pieces.remove(index).role());

    let promotion = (role == Role::Pawn && to.rank() == team.promotion_rank())
        .then(|| promotion.unwrap_or(Role::Queen));

    if let Some(mover) = pieces.iter_mut().find(|p| p.same_position(from)) {
        mover.move_to(to);
        if let Some(promoted) = promotion {
            *mover = Piece::with_state(promoted, team, to, true, false);
        } else if role == Role::Pawn && (to.rank() - from.rank()).abs() == 2 {
            mover.set_en_passant(true);
        }
    }

    Some(Execution {
        kind,
        capture,
        promotion,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kings() -> Vec<Piece> {
        vec![
            Piece::new(Role::King, Team::White, Coordinate::E1),
            Piece::new(Role::King, Team::Black, Coordinate::E8),
        ]
    }

    fn play(board: &mut Board, from: Coordinate, to: Coordinate) -> MoveRecord {
        let piece = board.piece_at(from).cloned().expect("piece on from square");
        board.play_move(&piece, to, None).expect("legal move")
    }

    #[test]
    fn test_king_count_is_enforced() {
        let err = Board::new(vec![Piece::new(Role::King, Team::White, Coordinate::E1)], 0)
            .expect_err("black king missing");
        assert_eq!(err.kinds(), BoardErrorKinds::MISSING_KING);

        let mut pieces = kings();
        pieces.push(Piece::new(Role::King, Team::White, Coordinate::A1));
        let err = Board::new(pieces, 0).expect_err("two white kings");
        assert_eq!(err.kinds(), BoardErrorKinds::TOO_MANY_KINGS);
    }

    #[test]
    fn test_setup_sanity_checks() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Queen, Team::White, Coordinate::E1));
        pieces.push(Piece::new(Role::Pawn, Team::Black, Coordinate::A1));
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::new(8, 3)));
        let err = Board::new(pieces, 0).expect_err("invalid setup");
        assert!(err.kinds().contains(BoardErrorKinds::OVERLAPPING));
        assert!(err.kinds().contains(BoardErrorKinds::PAWNS_ON_BACKRANK));
        assert!(err.kinds().contains(BoardErrorKinds::OFF_BOARD));
    }

    #[test]
    fn test_opposite_check() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::E4));
        let err = Board::new(pieces.clone(), 0).expect_err("black in check, white to move");
        assert_eq!(err.kinds(), BoardErrorKinds::OPPOSITE_CHECK);

        let board = Board::new(pieces, 1).expect("black to move in check");
        assert!(board.is_check());
    }

    #[test]
    fn test_en_passant_setup() {
        let mut pieces = kings();
        pieces.push(Piece::with_state(Role::Pawn, Team::White, Coordinate::D4, true, true));
        assert!(Board::new(pieces.clone(), 1).is_ok());

        let err = Board::new(pieces, 0).expect_err("mover's own pawn eligible");
        assert_eq!(err.kinds(), BoardErrorKinds::INVALID_EN_PASSANT);
    }

    #[test]
    fn test_en_passant_path_must_be_empty() {
        let mut pieces = kings();
        pieces.push(Piece::with_state(Role::Pawn, Team::White, Coordinate::D4, true, true));
        pieces.push(Piece::new(Role::Knight, Team::White, Coordinate::D3));
        let err = Board::new(pieces, 1).expect_err("skipped square occupied");
        assert_eq!(err.kinds(), BoardErrorKinds::INVALID_EN_PASSANT);

        let mut pieces = kings();
        pieces.push(Piece::with_state(Role::Pawn, Team::Black, Coordinate::E5, true, true));
        pieces.push(Piece::new(Role::Bishop, Team::White, Coordinate::E7));
        let err = Board::new(pieces, 0).expect_err("start square occupied");
        assert_eq!(err.kinds(), BoardErrorKinds::INVALID_EN_PASSANT);
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_en_passant_state_on_non_pawn() {
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

        let mut pieces = kings();
        pieces.push(knight);
        let err = Board::new(pieces, 0).expect_err("knight with en passant state");
        assert_eq!(err.kinds(), BoardErrorKinds::INVALID_EN_PASSANT);
    }

    #[test]
    fn test_moves_only_after_calculation() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::A2));
        let mut board = Board::new(pieces, 0).expect("valid");
        let rook = board.piece_at(Coordinate::A2).cloned().expect("rook");
        assert!(rook.legal_moves().is_empty());

        assert_eq!(
            board.play_move(&rook, Coordinate::A3, None),
            Err(PlayError::IllegalMove {
                from: Coordinate::A2,
                to: Coordinate::A3
            })
        );

        board.calculate_all_moves();
        assert_eq!(board.piece_at(Coordinate::A2).map(|p| p.legal_moves().len()), Some(14));
        assert!(board.king(Team::Black).is_some_and(|k| k.legal_moves().is_empty()));
    }

    #[test]
    fn test_calculate_is_idempotent() {
        let mut board = Board::default();
        let before = board.clone();
        board.calculate_all_moves();
        assert_eq!(board, before);
        assert_eq!(board.legal_move_count(), 20);
    }

    #[test]
    fn test_pinned_piece() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Bishop, Team::White, Coordinate::E2));
        pieces.push(Piece::new(Role::Rook, Team::Black, Coordinate::E7));
        let mut board = Board::new(pieces, 0).expect("valid");
        board.calculate_all_moves();
        assert!(board
            .piece_at(Coordinate::E2)
            .is_some_and(|b| b.legal_moves().is_empty()));
    }

    #[test]
    fn test_play_rejections() {
        let mut board = Board::default();
        let black_pawn = board.piece_at(Coordinate::E7).cloned().expect("pawn");
        assert_eq!(
            board.play_move(&black_pawn, Coordinate::E5, None),
            Err(PlayError::NotYourTurn)
        );

        let ghost = Piece::new(Role::Queen, Team::White, Coordinate::D4);
        assert_eq!(
            board.play_move(&ghost, Coordinate::D5, None),
            Err(PlayError::UnknownPiece)
        );

        let pawn = board.piece_at(Coordinate::E2).cloned().expect("pawn");
        assert_eq!(
            board.play_move(&pawn, Coordinate::E4, Some(Role::King)),
            Err(PlayError::InvalidPromotion(Role::King))
        );
        assert_eq!(board, Board::default());
    }

    #[test]
    fn test_castling_moves_both_pieces() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::A1));
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::H1));
        let mut board = Board::new(pieces, 0).expect("valid");
        board.calculate_all_moves();

        let record = play(&mut board, Coordinate::E1, Coordinate::H1);
        assert_eq!(
            record.kind,
            MoveKind::Castle {
                king_to: Coordinate::G1,
                rook_to: Coordinate::F1
            }
        );
        assert!(record.flags.contains(MoveFlags::CASTLE));
        assert!(board.piece_at(Coordinate::G1).is_some_and(|k| k.is(Role::King, Team::White) && k.has_moved()));
        assert!(board.piece_at(Coordinate::F1).is_some_and(|r| r.is(Role::Rook, Team::White) && r.has_moved()));
        assert!(board.piece_at(Coordinate::E1).is_none());
        assert!(board.piece_at(Coordinate::H1).is_none());
        assert_eq!(board.halfmove_clock(), 1);
    }

    #[test]
    fn test_check_flag() {
        let mut pieces = kings();
        pieces.push(Piece::new(Role::Rook, Team::White, Coordinate::A1));
        let mut board = Board::new(pieces, 0).expect("valid");
        board.calculate_all_moves();

        let record = play(&mut board, Coordinate::A1, Coordinate::A8);
        assert_eq!(record.flags, MoveFlags::CHECK);
        assert!(board.is_check());
        assert_eq!(board.game_state(), GameState::Ongoing);
    }

    #[test]
    fn test_display() {
        let board = Board::default();
        let text = board.to_string();
        assert!(text.starts_with("r n b q k b n r\n"));
        assert!(text.ends_with("R N B Q K B N R\n"));
    }
}
