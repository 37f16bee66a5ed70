/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use kingrow::{
    GameStatus, IllegalMoveReason, Move, Piece, Position, RuleViolation, Side, Square,
};

fn sq(row: u8, col: u8) -> Square {
    Square::new(row, col)
}

/// Calls `f` on every position reachable from `position` within `depth` plies (including `position` itself).
fn walk(position: &Position, depth: usize, f: &mut impl FnMut(&Position)) {
    f(position);
    if depth == 0 {
        return;
    }

    for mv in position.legal_moves() {
        let next = position.apply(&mv).unwrap();
        walk(&next, depth - 1, f);
    }
}

/// A handful of positions with kings, forced captures, and multi-jumps.
fn sample_positions() -> Vec<Position> {
    [
        "D:D1-12:L21-32",
        "D:DK15,9,10:L18,19,26,27,K5",
        "L:D5,6,7,11,14,15,16:L18,19,22,K1,29",
        "D:D12:L16,23,24",
        "D:DK15:L18,19,26,27",
    ]
    .into_iter()
    .map(|fen| Position::from_fen(fen).unwrap())
    .collect()
}

#[test]
fn test_scenario_initial_moves() {
    let pos = Position::initial();
    assert_eq!(pos.side_to_move(), Side::Dark);

    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 7);
    assert!(moves.iter().all(Move::is_simple));
}

#[test]
fn test_scenario_single_capture() {
    let pos = Position::new()
        .with_piece(Piece::DARK_MAN, sq(4, 1))
        .unwrap()
        .with_piece(Piece::LIGHT_MAN, sq(3, 2))
        .unwrap();

    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 1);
    assert!(moves[0].is_capture());
    assert_eq!(moves[0].from(), sq(4, 1));
    assert_eq!(moves[0].to(), sq(2, 3));

    let next = pos.apply(&moves[0]).unwrap();
    assert_eq!(next.piece_at(sq(3, 2)), None);
    assert_eq!(next.piece_at(sq(4, 1)), None);
    assert_eq!(next.piece_at(sq(2, 3)), Some(Piece::DARK_MAN));
    assert_eq!(next.count(Side::Light), 0);
}

#[test]
fn test_scenario_promotion_ends_chain() {
    // From (0, 3), a king could go on to jump (1, 4) into the empty (2, 5)
    let pos = Position::new()
        .with_piece(Piece::DARK_MAN, sq(2, 1))
        .unwrap()
        .with_piece(Piece::LIGHT_MAN, sq(1, 2))
        .unwrap()
        .with_piece(Piece::LIGHT_MAN, sq(1, 4))
        .unwrap();
    assert!(pos.is_empty_at(sq(2, 5)));

    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 1);
    assert_eq!(moves[0].num_captures(), 1);
    assert_eq!(moves[0].to(), sq(0, 3));

    let next = pos.apply(&moves[0]).unwrap();
    assert_eq!(next.piece_at(sq(0, 3)), Some(Piece::DARK_KING));
    assert_eq!(next.piece_at(sq(1, 2)), None);
    assert_eq!(next.piece_at(sq(1, 4)), Some(Piece::LIGHT_MAN));
    assert_eq!(next.side_to_move(), Side::Light);
}

#[test]
fn test_scenario_capture_is_mandatory() {
    // Same as the single-capture scenario, with a Dark man free to step elsewhere
    let pos = Position::from_fen("D:D9,16:L19").unwrap();
    let step = Move::simple(sq(5, 6), sq(4, 5));

    let err = pos.apply(&step).unwrap_err();
    assert!(matches!(
        err,
        RuleViolation::IllegalMove {
            reason: IllegalMoveReason::CaptureRequired,
            ..
        }
    ));

    // The original is untouched, and it is still Dark's turn
    assert_eq!(pos, Position::from_fen("D:D9,16:L19").unwrap());
    assert_eq!(pos.side_to_move(), Side::Dark);
}

#[test]
fn test_out_of_bounds() {
    assert_eq!(
        Square::try_new(8, 3),
        Err(RuleViolation::OutOfBounds { row: 8, col: 3 })
    );
    assert_eq!(
        Square::try_new(3, -1),
        Err(RuleViolation::OutOfBounds { row: 3, col: -1 })
    );

    let pos = Position::initial();
    let unplayable = Move::simple(sq(5, 1), sq(4, 0));
    assert_eq!(
        pos.apply(&unplayable),
        Err(RuleViolation::OutOfBounds { row: 5, col: 1 })
    );
}

#[test]
fn test_piece_count_drops_only_by_captures() {
    for start in sample_positions() {
        walk(&start, 3, &mut |pos| {
            for mv in pos.legal_moves() {
                let next = pos.apply(&mv).unwrap();
                assert_eq!(
                    next.total() + mv.num_captures(),
                    pos.total(),
                    "{mv:?} in {pos}"
                );
                assert_eq!(next.count(pos.side_to_move()), pos.count(pos.side_to_move()));
            }
        });
    }
}

#[test]
fn test_men_never_move_backwards() {
    for start in sample_positions() {
        walk(&start, 3, &mut |pos| {
            for mv in pos.legal_moves() {
                let piece = pos.piece_at(mv.from()).unwrap();
                if piece.is_king() {
                    continue;
                }

                let first_step = match mv.jumps().first() {
                    Some(jump) => jump.to(),
                    None => mv.to(),
                };
                match piece.side() {
                    Side::Dark => assert!(first_step.row() < mv.from().row(), "{mv:?} in {pos}"),
                    Side::Light => assert!(first_step.row() > mv.from().row(), "{mv:?} in {pos}"),
                }

                for jump in mv.jumps() {
                    assert!(piece.directions().iter().any(|&d| {
                        kingrow::jump_landing(jump.from(), d) == Some(jump.to())
                    }));
                }
            }
        });
    }
}

#[test]
fn test_captures_exclude_simple_moves() {
    for start in sample_positions() {
        walk(&start, 3, &mut |pos| {
            let moves = pos.legal_moves();
            if moves.iter().any(Move::is_capture) {
                assert!(moves.iter().all(Move::is_capture), "{pos:?}");
                assert!(pos.has_captures());
            } else {
                assert!(!pos.has_captures());
            }
        });
    }
}

#[test]
fn test_capture_sequences_are_maximal() {
    for start in sample_positions() {
        walk(&start, 3, &mut |pos| {
            let moves = pos.legal_moves();
            for a in &moves {
                for b in &moves {
                    assert!(!a.is_prefix_of(b), "{a:?} is a prefix of {b:?} in {pos}");
                }
            }
        });
    }
}

#[test]
fn test_men_stop_on_king_row() {
    for start in sample_positions() {
        walk(&start, 4, &mut |pos| {
            for mv in pos.legal_moves() {
                let piece = pos.piece_at(mv.from()).unwrap();
                let jumps = mv.jumps();
                if piece.is_king() || jumps.len() < 2 {
                    continue;
                }

                // Only the final landing square may be on the king row
                for jump in &jumps[..jumps.len() - 1] {
                    assert!(!piece.crowns_on(jump.to().row()), "{mv:?} in {pos}");
                }
            }
        });
    }
}

#[test]
fn test_status_matches_legal_moves() {
    for start in sample_positions() {
        walk(&start, 3, &mut |pos| match pos.status() {
            GameStatus::InProgress => assert!(!pos.legal_moves().is_empty()),
            GameStatus::Won(side) => {
                assert!(pos.legal_moves().is_empty());
                assert_eq!(side, pos.side_to_move().opponent());
            }
        });
    }
}

#[test]
fn test_apply_is_deterministic() {
    for start in sample_positions() {
        walk(&start, 2, &mut |pos| {
            assert_eq!(pos.legal_moves(), pos.legal_moves());
            for mv in pos.legal_moves() {
                assert_eq!(pos.apply(&mv), pos.apply(&mv));
            }
        });
    }
}

#[test]
fn test_king_circuit_returns_home() {
    let pos = Position::from_fen("D:DK15:L18,19,26,27").unwrap();
    let moves = pos.legal_moves();
    assert_eq!(moves.len(), 2);

    for mv in &moves {
        assert_eq!(mv.num_captures(), 4);
        assert_eq!(mv.from(), mv.to());

        let next = pos.apply(mv).unwrap();
        assert_eq!(next.to_fen(), "L:DK15:L");
        assert_eq!(next.status(), GameStatus::Won(Side::Dark));
    }
}
