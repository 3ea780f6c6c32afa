use iai::black_box;
use referee::{fen::Fen, perft, Board, Coordinate, Rules};

fn bench_shallow_perft() {
    let board = Board::default();
    assert_eq!(black_box(perft(black_box(&board), 2)), 400);
}

fn bench_deep_perft() {
    let board = Board::default();
    assert_eq!(perft(black_box(&board), 3), 8_902);
}

fn bench_kiwipete() {
    let fen = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";
    let board = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_board(Rules::default())
        .expect("valid board");
    assert_eq!(perft(black_box(&board), 2), 2_039);
}

fn bench_calculate_all_moves() -> Board {
    let fen = "rn1qkb1r/pbp2ppp/1p2p3/3n4/8/2N2NP1/PP1PPPBP/R1BQ1RK1 b kq - 0 1";
    let mut board = fen
        .parse::<Fen>()
        .expect("valid fen")
        .into_board(Rules::default())
        .expect("valid board");

    black_box(&mut board).calculate_all_moves();
    assert_eq!(board.legal_move_count(), 39);
    board
}

fn bench_play_moves() -> Board {
    let line = [
        ("e2", "e4"),
        ("e7", "e5"),
        ("g1", "f3"),
        ("b8", "c6"),
        ("f1", "c4"),
        ("g8", "f6"),
        ("f3", "g5"),
        ("d7", "d5"),
        ("e4", "d5"),
        ("c6", "a5"),
        ("c4", "b5"),
        ("c7", "c6"),
        ("d5", "c6"),
        ("b7", "c6"),
        ("b5", "a4"),
        ("c8", "a6"),
        ("d2", "d3"),
        ("f8", "c5"),
        ("e1", "h1"),
        ("e8", "h8"),
    ];

    let mut board = black_box(Board::default());
    for (from, to) in black_box(line) {
        let from: Coordinate = from.parse().expect("valid square");
        let piece = board.piece_at(from).cloned().expect("piece on square");
        board
            .play_move(&piece, to.parse().expect("valid square"), None)
            .expect("legal move");
    }
    board
}

fn bench_to_fen() -> String {
    black_box(Board::default()).to_fen()
}

iai::main!(
    bench_shallow_perft,
    bench_deep_perft,
    bench_kiwipete,
    bench_calculate_all_moves,
    bench_play_moves,
    bench_to_fen,
);
