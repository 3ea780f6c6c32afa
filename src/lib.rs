//! A chess legality engine: legal move generation, move execution including
//! castling, en passant and promotion, and detection of checkmate,
//! stalemate and draws.
//!
//! # Examples
//!
//! Legal moves in the starting position are cached on the pieces:
//!
//! ```
//! use referee::{Board, Coordinate};
//!
//! let board = Board::default();
//! assert_eq!(board.legal_move_count(), 20);
//!
//! let pawn = board.piece_at(Coordinate::E2).expect("pawn on e2");
//! assert_eq!(pawn.legal_moves(), &[Coordinate::E3, Coordinate::E4]);
//! ```
//!
//! Play moves:
//!
//! ```
//! use referee::{Board, Coordinate, PlayError};
//!
//! let mut board = Board::default();
//!
//! // 1. e4
//! let pawn = board.piece_at(Coordinate::E2).cloned().expect("pawn on e2");
//! board.play_move(&pawn, Coordinate::E4, None)?;
//!
//! // The same pawn can not move twice in a row.
//! let pawn = board.piece_at(Coordinate::E4).cloned().expect("pawn on e4");
//! assert_eq!(
//!     board.play_move(&pawn, Coordinate::E5, None),
//!     Err(PlayError::NotYourTurn)
//! );
//! # Ok::<_, PlayError>(())
//! ```
//!
//! Detect game end conditions:
//!
//! ```
//! use referee::{fen::Fen, GameState, Rules, Team};
//!
//! let board = "R5k1/5ppp/8/8/8/8/8/6K1 b - - 1 1"
//!     .parse::<Fen>()?
//!     .into_board(Rules::default())?;
//!
//! assert_eq!(board.game_state(), GameState::Checkmate);
//! assert_eq!(board.winning_team(), Some(Team::White));
//! # Ok::<_, Box<dyn std::error::Error>>(())
//! ```
//!
//! Also supports [FEN](fen) for reading and writing positions.
//!
//! # Logging
//!
//! Accepted moves and game termination are reported as `debug` events,
//! generated moves and rejected moves as `trace` events, and rejected board
//! setups as `warn` events, through [`tracing`]. No subscriber is installed
//! by the library.
//!
//! # Feature flags
//!
//! * `serde`: Implements [`serde::Serialize`](https://docs.rs/serde/1/serde/trait.Serialize.html)
//!   and [`serde::Deserialize`](https://docs.rs/serde/1/serde/trait.Deserialize.html) for
//!   value types and [`Rules`], so that rules can be loaded from
//!   configuration files.

#![doc(html_root_url = "https://docs.rs/referee/0.1.0")]
#![warn(missing_debug_implementations)]
#![cfg_attr(docs_rs, feature(doc_auto_cfg))]

mod board;
mod coordinate;
mod errors;
mod outcome;
mod perft;
mod piece;
mod record;
mod role;
mod rules;
mod team;

pub mod fen;
pub mod movegen;

pub use board::Board;
pub use coordinate::{Coordinate, ParseCoordinateError};
pub use errors::{BoardError, BoardErrorKinds, PlayError};
pub use outcome::{DrawReason, GameState};
pub use perft::perft;
pub use piece::Piece;
pub use record::{MoveFlags, MoveKind, MoveRecord};
pub use role::Role;
pub use rules::{CastlingMode, Rules};
pub use team::{ParseTeamError, Team};
