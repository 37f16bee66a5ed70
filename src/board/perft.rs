/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::time::Instant;

use super::Position;

/// Perform a perft at the specified depth, collecting only data about the number of possible positions (nodes).
///
/// This performs bulk counting, meaning that, at depth 1, it returns the number of available moves,
/// rather than making them, recursing again, and returning 1 for each terminal case.
/// If you do *not* want to use bulk counting, use [`perft_generic`].
///
/// # Example
/// ```
/// # use kingrow::{perft, Position};
/// assert_eq!(perft(&Position::initial(), 3), 302);
/// ```
#[inline(always)]
pub fn perft(position: &Position, depth: usize) -> u64 {
    perft_generic::<true, false>(position, depth)
}

/// Perform a splitperft at the specified depth, printing the number of nodes reachable after each
/// move available at the root, and returning the total.
#[inline(always)]
pub fn splitperft(position: &Position, depth: usize) -> u64 {
    perft_generic::<true, true>(position, depth)
}

/// Generic version of `perft` that allows you to specify whether to perform bulk counting and splitperft.
///
/// If `BULK` is set to `true`, this will perform bulk counting.
/// If `SPLIT` is set to `true`, this will perform a splitperft.
pub fn perft_generic<const BULK: bool, const SPLIT: bool>(position: &Position, depth: usize) -> u64 {
    // Bulk counting; no need to recurse again just to apply a singular move and return 1.
    if BULK && !SPLIT && depth == 1 {
        return position.legal_moves().len() as u64;
    }
    // Recursion limit; return 1, since we're fathoming this node.
    else if depth == 0 {
        return 1;
    }

    position.legal_moves().into_iter().fold(0, |nodes, mv| {
        let new_nodes =
            perft_generic::<BULK, false>(&position.make_move_unchecked(&mv), depth - 1);

        if SPLIT {
            println!("{mv}\t{new_nodes}");
        }

        nodes + new_nodes
    })
}

/// Runs a perft (or splitperft) and prints the node count, time taken, and nodes per second.
pub fn print_perft<const SPLIT: bool>(position: &Position, depth: usize) -> u64 {
    let now = Instant::now();
    let nodes = perft_generic::<true, SPLIT>(position, depth);
    let elapsed = now.elapsed();

    let nps = nodes as f64 / elapsed.as_secs_f64();
    log::debug!("perft({depth}) of {position} took {elapsed:?}");

    if SPLIT {
        println!();
    }
    println!("Nodes: {nodes}");
    println!("Time:  {elapsed:.1?}");
    println!("NPS:   {:.0}", nps);

    nodes
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_bulk_matches_full_count() {
        let pos = Position::initial();
        for depth in 0..=4 {
            assert_eq!(
                perft_generic::<true, false>(&pos, depth),
                perft_generic::<false, false>(&pos, depth),
                "Bulk counting disagrees at depth {depth}"
            );
        }
    }

    #[test]
    fn test_terminal_position() {
        // Light has no pieces, so nothing follows
        let pos = Position::from_fen("L:D12:L").unwrap();
        assert_eq!(perft(&pos, 1), 0);
        assert_eq!(perft(&pos, 3), 0);
        assert_eq!(perft(&pos, 0), 1);
    }
}
