// The value-computation strategy behind the batch assembler. Both variants
// present the same surface -- set a board, sample pot features, turn ranges
// into per-hand payoffs -- so the pipeline never needs to know which one is
// active.
//
// The pot feature means different things per mode, on purpose: the
// terminal-equity variant writes a synthetic uniform [0, 1) scalar with no
// game meaning (equity doesn't depend on the pot), while the resolving
// variant samples a real pot in [ante, stack), writes pot / stack, and
// normalizes the solved values by that pot. Downstream consumers should keep
// this in mind when interpreting the last input column.

use crate::card_utils::Board;
use crate::config::Config;
use crate::resolving::Resolver;
use crate::terminal_equity::TerminalEquity;
use ndarray::{Array2, Axis};
use rand::Rng;
use rayon::prelude::*;

#[derive(Debug, Clone, Copy)]
pub struct PotSample {
    // Pot size in chips (resolving mode only; synthetic otherwise).
    pub pot: f32,
    // Normalized value written into the last input column.
    pub feature: f32,
}

enum BackendKind {
    TerminalEquity,
    Resolving,
}

pub struct ValueBackend {
    kind: BackendKind,
    config: Config,
    equity: Option<TerminalEquity>,
}

impl ValueBackend {
    pub fn from_config(config: &Config) -> ValueBackend {
        let kind = match config.value_backend.as_str() {
            "terminal_equity" => BackendKind::TerminalEquity,
            "resolving" => BackendKind::Resolving,
            other => panic!("Unknown value_backend '{other}'"),
        };
        ValueBackend {
            kind,
            config: config.clone(),
            equity: None,
        }
    }

    // Called once per batch, before any pot sampling or value computation.
    pub fn set_board(&mut self, board: &Board) {
        self.equity = Some(TerminalEquity::new(&self.config, board));
    }

    pub fn sample_pots<R: Rng>(&self, rng: &mut R, batch_size: usize) -> Vec<PotSample> {
        (0..batch_size)
            .map(|_| match self.kind {
                BackendKind::TerminalEquity => {
                    let feature = rng.gen::<f32>();
                    PotSample {
                        pot: feature,
                        feature,
                    }
                }
                BackendKind::Resolving => {
                    let stack = self.config.stack as f32;
                    let pot = rng.gen_range(self.config.ante as f32..stack);
                    PotSample {
                        pot,
                        feature: pot / stack,
                    }
                }
            })
            .collect()
    }

    // Per-hand payoffs for both players, one row per example, normalized to
    // pot-relative units.
    pub fn compute_values(
        &self,
        ranges: [&Array2<f32>; 2],
        pots: &[PotSample],
    ) -> [Array2<f32>; 2] {
        let equity = self
            .equity
            .as_ref()
            .expect("set_board must be called before compute_values");
        match self.kind {
            // Showdown equity against the opponent's range, vectorized over
            // the whole batch. No per-example state, so one matrix product
            // per player covers everything.
            BackendKind::TerminalEquity => [
                equity.call_values(ranges[1].view()),
                equity.call_values(ranges[0].view()),
            ],
            // One exact re-solve per example: pot size varies per example,
            // so each row gets its own node and its own solver instance.
            // This is the bottleneck of the whole pipeline, which is why the
            // rows run in parallel; every input was sampled up front, so the
            // result is deterministic regardless of scheduling.
            BackendKind::Resolving => {
                let resolver = Resolver::new(&self.config, equity);
                let rows: Vec<_> = (0..pots.len())
                    .into_par_iter()
                    .map(|example| {
                        let pot = pots[example].pot;
                        let mut cfvs = resolver.resolve(
                            [ranges[0].row(example), ranges[1].row(example)],
                            pot,
                        );
                        cfvs[0] /= pot;
                        cfvs[1] /= pot;
                        cfvs
                    })
                    .collect();

                let card_count = self.config.card_count;
                let mut values = [
                    Array2::zeros((pots.len(), card_count)),
                    Array2::zeros((pots.len(), card_count)),
                ];
                for (example, cfvs) in rows.iter().enumerate() {
                    for player in 0..2 {
                        values[player]
                            .index_axis_mut(Axis(0), example)
                            .assign(&cfvs[player]);
                    }
                }
                values
            }
        }
    }
}
