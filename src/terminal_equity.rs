// Showdown equity against a range, assuming both players check/call to the
// end with no further decisions. Used directly as the cheap value backend and
// by the resolver for its terminal nodes.

use crate::card_utils::{rank, Board, Card};
use crate::config::Config;
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

pub struct TerminalEquity {
    config: Config,
    // call_matrix[i][j] is the showdown payoff of hand i against hand j:
    // +1 win, -1 loss, 0 tie. Blocked matchups (same card twice, or a hand
    // colliding with the board) are zeroed so they never contribute.
    call_matrix: Array2<f32>,
    // fold_matrix[i][j] is 1.0 for every valid matchup, used to total up the
    // opponent's reach at fold terminals.
    fold_matrix: Array2<f32>,
}

impl TerminalEquity {
    pub fn new(config: &Config, board: &Board) -> TerminalEquity {
        let n = config.card_count;
        let mut call_matrix = Array2::<f32>::zeros((n, n));
        let mut fold_matrix = Array2::<f32>::zeros((n, n));
        for i in 1..=n as u8 {
            if board.contains(&i) {
                continue;
            }
            for j in 1..=n as u8 {
                if j == i || board.contains(&j) {
                    continue;
                }
                let si = hand_strength(config, board, i);
                let sj = hand_strength(config, board, j);
                let value = match si.cmp(&sj) {
                    std::cmp::Ordering::Greater => 1.0,
                    std::cmp::Ordering::Less => -1.0,
                    std::cmp::Ordering::Equal => 0.0,
                };
                call_matrix[[i as usize - 1, j as usize - 1]] = value;
                fold_matrix[[i as usize - 1, j as usize - 1]] = 1.0;
            }
        }
        TerminalEquity {
            config: config.clone(),
            call_matrix,
            fold_matrix,
        }
    }

    // Showdown value of every hand against one opponent range, per unit bet.
    pub fn call_value(&self, opp_range: ArrayView1<f32>) -> Array1<f32> {
        self.call_matrix.dot(&opp_range)
    }

    // Batched form: one opponent range per row, one value row out.
    pub fn call_values(&self, opp_ranges: ArrayView2<f32>) -> Array2<f32> {
        opp_ranges.dot(&self.call_matrix.t())
    }

    // Total opponent reach each hand can actually face (blocked matchups
    // excluded). Scales the winner's payoff at fold terminals.
    pub fn fold_reach(&self, opp_range: ArrayView1<f32>) -> Array1<f32> {
        self.fold_matrix.dot(&opp_range)
    }

    pub fn card_count(&self) -> usize {
        self.config.card_count
    }
}

// Pairing the board beats any unpaired hand; otherwise rank decides.
// With multi-card boards both hands can pair, so paired hands are lifted a
// full rank_count above the unpaired ones and compared by rank within that.
fn hand_strength(config: &Config, board: &Board, hand: Card) -> usize {
    let r = rank(config, hand);
    let paired = board.iter().any(|&b| rank(config, b) == r);
    if paired {
        config.rank_count() + r
    } else {
        r
    }
}
