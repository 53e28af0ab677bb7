// Converts vectors between the per-private-hand basis and the per-bucket
// basis for one fixed board. The bucket-index cache is tied to the board it
// was built for, so it lives in an explicit per-board context object instead
// of hidden set_board/convert mutable state -- you can't convert against a
// board you never set.

use crate::card_abstraction::{Bucketer, NO_BUCKET};
use crate::card_utils::Board;
use crate::config::Config;
use ndarray::{Array1, ArrayView2, ArrayViewMut2};

pub struct BoardBuckets {
    bucket_indexes: Vec<i32>,
    bucket_count: usize,
}

impl BoardBuckets {
    pub fn new(config: &Config, bucketer: &Bucketer, board: &Board) -> BoardBuckets {
        assert_eq!(board.len(), config.board_card_count, "Bad board size");
        BoardBuckets {
            bucket_indexes: bucketer.compute_buckets(board),
            bucket_count: bucketer.bucket_count(),
        }
    }

    pub fn bucket_indexes(&self) -> &[i32] {
        &self.bucket_indexes
    }

    // Scatter-add from per-card columns into per-bucket columns, keyed by the
    // cached bucket indexes. Each row is one example and is aggregated
    // independently. Infeasible hands are skipped, and bucket columns no hand
    // maps to are left untouched (callers pre-zero the output).
    pub fn card_range_to_bucket_range(&self, cards: ArrayView2<f32>, mut out: ArrayViewMut2<f32>) {
        assert_eq!(cards.ncols(), self.bucket_indexes.len());
        assert_eq!(out.ncols(), self.bucket_count);
        assert_eq!(cards.nrows(), out.nrows());
        for (card_row, mut bucket_row) in cards.rows().into_iter().zip(out.rows_mut()) {
            for (hand, &bucket) in self.bucket_indexes.iter().enumerate() {
                if bucket == NO_BUCKET {
                    continue;
                }
                bucket_row[bucket as usize - 1] += card_row[hand];
            }
        }
    }

    // 1.0 for every bucket some feasible hand maps to, 0.0 otherwise.
    // Depends only on the board, not on any range.
    pub fn possible_bucket_mask(&self) -> Array1<f32> {
        let mut mask = Array1::<f32>::zeros(self.bucket_count);
        for &bucket in &self.bucket_indexes {
            if bucket != NO_BUCKET {
                mask[bucket as usize - 1] = 1.0;
            }
        }
        mask
    }
}
