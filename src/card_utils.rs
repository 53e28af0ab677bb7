use crate::config::{binomial, Config};
use itertools::Itertools;
use ndarray::Array2;
use rand::prelude::*;
use smallvec::SmallVec;

// Cards are integer ids in [1, card_count]. Suits only matter for card
// identity: two cards share a rank iff they land in the same
// (card - 1) / suit_count class. For the Leduc-style 6-card deck that gives
// J/Q/K with two suits each.
pub type Card = u8;

// Boards are small (1 card for Leduc, up to 5 for bigger variants), so keep
// them inline instead of heap-allocating per batch.
pub type Board = SmallVec<[Card; 5]>;

pub fn deck(config: &Config) -> Vec<Card> {
    (1..=config.card_count as u8).collect()
}

pub fn rank(config: &Config, card: Card) -> usize {
    (card as usize - 1) / config.suit_count
}

// Board identity is a set, not a sequence: permutations of the same cards
// must canonicalize to the same board.
pub fn canonical_board(board: &[Card]) -> Board {
    let mut sorted: Board = board.iter().copied().collect();
    sorted.sort_unstable();
    sorted
}

// A deterministic, total 1-based ordering over all distinct boards, via the
// combinatorial number system rank of the sorted card set. The bucketer, the
// value backends, and the downstream network all share this numbering
// implicitly through bucket indices, so it must never change between calls.
pub fn board_index(config: &Config, board: &[Card]) -> usize {
    debug_assert_eq!(board.len(), config.board_card_count);
    let sorted = canonical_board(board);
    let mut index = 0;
    for (i, &card) in sorted.iter().enumerate() {
        index += binomial(card as usize - 1, i + 1);
    }
    index + 1
}

// Every distinct board in canonical order. Used by tests and for exhaustive
// checks; generation itself only ever samples boards.
pub fn all_boards(config: &Config) -> Vec<Board> {
    deck(config)
        .into_iter()
        .combinations(config.board_card_count)
        .map(|cards| cards.into_iter().collect())
        .collect()
}

// Uniform sample without replacement from the full deck.
pub fn sample_board<R: Rng>(config: &Config, rng: &mut R) -> Board {
    let deck = deck(config);
    let mut board: Board = deck
        .choose_multiple(rng, config.board_card_count)
        .copied()
        .collect();
    board.sort_unstable();
    board
}

// One probability vector per example, uniform on the simplex over hands that
// don't collide with the board. Exponential draws normalized to sum 1;
// blocked hands stay at weight 0.
pub fn sample_ranges<R: Rng>(
    config: &Config,
    board: &[Card],
    rng: &mut R,
    batch_size: usize,
) -> Array2<f32> {
    let mut ranges = Array2::<f32>::zeros((batch_size, config.card_count));
    for mut row in ranges.rows_mut() {
        let mut sum = 0.0;
        for card in 1..=config.card_count as u8 {
            if board.contains(&card) {
                continue;
            }
            let u: f64 = rng.gen();
            let weight = -(1.0 - u).ln() as f32;
            row[card as usize - 1] = weight;
            sum += weight;
        }
        row.mapv_inplace(|w| w / sum);
    }
    ranges
}

pub fn pbar(n: u64) -> indicatif::ProgressBar {
    let bar = indicatif::ProgressBar::new(n);
    bar.set_style(
        indicatif::ProgressStyle::default_bar()
            .template("[{elapsed_precise}/{eta_precise}] {wide_bar} {pos:>7}/{len:7} {msg}"),
    );
    // make sure the drawing doesn't dominate computation for large n
    bar.set_draw_delta(n / 100_000);
    bar
}
