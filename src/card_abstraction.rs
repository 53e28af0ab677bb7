// This is the card abstraction for the value net: a black box that maps a
// (board, private hand) pair to a bucket id. Unlike a clustering abstraction
// there is no lossy merging here -- every (distinct board, private card)
// combination gets its own bucket, so the bucket space is the full cross
// product and the net sees each situation exactly once.

use crate::card_utils::{board_index, Board};
use crate::config::Config;

// A hand that shares a card with the board can't exist; its bucket is -1.
pub const NO_BUCKET: i32 = -1;

pub struct Bucketer {
    bucket_count: usize,
    config: Config,
}

impl Bucketer {
    pub fn new(config: &Config) -> Bucketer {
        Bucketer {
            bucket_count: config.bucket_count(),
            config: config.clone(),
        }
    }

    pub fn bucket_count(&self) -> usize {
        self.bucket_count
    }

    // Bucket id for every private hand given the board, in hand order.
    // Buckets are contiguous 1-based ids: the board owns the block
    // [1 + offset, card_count + offset] where offset is determined by the
    // board's position in the canonical board ordering. Runs once per batch,
    // so a single Vec allocation is all it costs.
    pub fn compute_buckets(&self, board: &Board) -> Vec<i32> {
        let card_count = self.config.card_count as i32;
        let offset = (board_index(&self.config, board) as i32 - 1) * card_count;
        let mut buckets: Vec<i32> = (1..=card_count).map(|b| b + offset).collect();
        for &card in board {
            buckets[card as usize - 1] = NO_BUCKET;
        }
        buckets
    }
}
