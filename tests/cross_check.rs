use rand::{SeedableRng, rngs::SmallRng};
use trenchess::{fen::Fen, fuzz::cross_check, rules};

#[test]
fn random_games_agree_with_the_chess_crate() {
    for seed in 0..4 {
        let mut rng = SmallRng::seed_from_u64(seed);
        if let Err(mismatch) = cross_check(&mut rng, 500) {
            panic!("seed {seed}: {mismatch}");
        }
    }
}

#[test]
fn known_positions_match_reference_counts() {
    let positions = [
        // kiwipete
        (
            "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
            48,
            2039,
        ),
        ("8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1", 14, 191),
    ];
    for (fen, depth_one, depth_two) in positions {
        let state = fen.parse::<Fen>().unwrap().0;
        assert_eq!(rules::perft(&state, 1), depth_one, "{fen}");
        assert_eq!(rules::perft(&state, 2), depth_two, "{fen}");
    }
}
