// Exact re-solving of a single sampled situation: a first-node, one-street
// game rooted at matched bets [pot, pot], solved with vector-form CFR over
// both players' ranges. Each resolve owns its own freshly built tree, so
// resolves can run in parallel without sharing any solver state.
//
// The betting shape is deliberately minimal: the acting player may check or
// make one pot-sized bet (capped at the remaining stack), the responder may
// call or fold, and there is no re-raise. When the pot already equals the
// stack no bet is possible and the tree collapses to a lone showdown, where
// the resolve agrees with the terminal-equity backend exactly.

use crate::config::Config;
use crate::terminal_equity::TerminalEquity;
use ndarray::{Array1, Array2, ArrayView1};

const DEALER: usize = 0;
const OPPONENT: usize = 1;

enum NodeKind {
    Decision { player: usize },
    Showdown,
    Fold { folder: usize },
}

struct Node {
    kind: NodeKind,
    bets: [f32; 2],
    children: Vec<Node>,
    // Per-hand, per-action cumulative regrets (decision nodes only).
    regrets: Array2<f32>,
}

impl Node {
    fn decision(player: usize, bets: [f32; 2], children: Vec<Node>, card_count: usize) -> Node {
        let n_actions = children.len();
        Node {
            kind: NodeKind::Decision { player },
            bets,
            children,
            regrets: Array2::zeros((card_count, n_actions)),
        }
    }

    fn terminal(kind: NodeKind, bets: [f32; 2]) -> Node {
        Node {
            kind,
            bets,
            children: Vec::new(),
            regrets: Array2::zeros((0, 0)),
        }
    }
}

pub struct Resolver<'a> {
    equity: &'a TerminalEquity,
    iters: u64,
    stack: f32,
}

impl<'a> Resolver<'a> {
    pub fn new(config: &Config, equity: &'a TerminalEquity) -> Resolver<'a> {
        Resolver {
            equity,
            iters: config.resolve_iters,
            stack: config.stack as f32,
        }
    }

    // Root counterfactual values for both players, in chips. Callers
    // normalize by the pot they used to construct the situation.
    pub fn resolve(&self, ranges: [ArrayView1<f32>; 2], pot: f32) -> [Array1<f32>; 2] {
        assert!(pot > 0.0, "Cannot resolve a node with an empty pot");
        assert!(pot <= self.stack, "Pot exceeds the stack");
        let card_count = self.equity.card_count();
        let mut root = build_tree(pot, self.stack, card_count);
        let reaches = [ranges[0].to_owned(), ranges[1].to_owned()];

        // Vanilla averaging is noisy early on; only the second half of the
        // iterations contributes to the reported root values.
        let skip = self.iters / 2;
        let mut sums = [Array1::zeros(card_count), Array1::zeros(card_count)];
        for iter in 0..self.iters {
            let cfvs = cfr(&mut root, [&reaches[0], &reaches[1]], self.equity);
            if iter >= skip {
                sums[0] += &cfvs[0];
                sums[1] += &cfvs[1];
            }
        }
        let averaged = (self.iters - skip) as f32;
        sums[0] /= averaged;
        sums[1] /= averaged;
        sums
    }
}

fn build_tree(pot: f32, stack: f32, card_count: usize) -> Node {
    let bet = pot.min(stack - pot);
    let can_bet = bet > 0.0;

    // Responder node after the first player checks.
    let mut check_children = vec![Node::terminal(NodeKind::Showdown, [pot, pot])];
    if can_bet {
        let raised = [pot, pot + bet];
        check_children.push(Node::decision(
            DEALER,
            raised,
            vec![
                Node::terminal(NodeKind::Fold { folder: DEALER }, raised),
                Node::terminal(NodeKind::Showdown, [pot + bet, pot + bet]),
            ],
            card_count,
        ));
    }
    let check_node = Node::decision(OPPONENT, [pot, pot], check_children, card_count);

    let mut root_children = vec![check_node];
    if can_bet {
        let raised = [pot + bet, pot];
        root_children.push(Node::decision(
            OPPONENT,
            raised,
            vec![
                Node::terminal(NodeKind::Fold { folder: OPPONENT }, raised),
                Node::terminal(NodeKind::Showdown, [pot + bet, pot + bet]),
            ],
            card_count,
        ));
    }
    Node::decision(DEALER, [pot, pot], root_children, card_count)
}

// One CFR iteration. Takes both players' reach ranges and returns both
// players' counterfactual values at this node, updating regrets in place.
fn cfr(node: &mut Node, reach: [&Array1<f32>; 2], equity: &TerminalEquity) -> [Array1<f32>; 2] {
    match node.kind {
        NodeKind::Showdown => {
            // Matched bets; each hand wins or loses the opponent's bet.
            let amount = node.bets[0];
            [
                equity.call_value(reach[1].view()) * amount,
                equity.call_value(reach[0].view()) * amount,
            ]
        }
        NodeKind::Fold { folder } => {
            let winner = 1 - folder;
            let amount = node.bets[folder];
            let mut cfvs = [
                equity.fold_reach(reach[1].view()),
                equity.fold_reach(reach[0].view()),
            ];
            cfvs[winner] *= amount;
            cfvs[folder] *= -amount;
            cfvs
        }
        NodeKind::Decision { player } => {
            let opponent = 1 - player;
            let strategy = regret_match(&node.regrets);
            let card_count = reach[0].len();

            let mut node_cfvs = [Array1::zeros(card_count), Array1::zeros(card_count)];
            let mut action_cfvs: Vec<Array1<f32>> = Vec::with_capacity(node.children.len());
            for (action, child) in node.children.iter_mut().enumerate() {
                let own_reach = reach[player] * &strategy.column(action);
                let child_reach = if player == DEALER {
                    [&own_reach, reach[1]]
                } else {
                    [reach[0], &own_reach]
                };
                let [dealer_cfv, opponent_cfv] = cfr(child, child_reach, equity);
                let (own_cfv, other_cfv) = if player == DEALER {
                    (dealer_cfv, opponent_cfv)
                } else {
                    (opponent_cfv, dealer_cfv)
                };
                node_cfvs[player] += &(&own_cfv * &strategy.column(action));
                node_cfvs[opponent] += &other_cfv;
                action_cfvs.push(own_cfv);
            }

            // Regret update with the CFR+ clamp at zero.
            for (action, cfvs) in action_cfvs.iter().enumerate() {
                let mut column = node.regrets.column_mut(action);
                column += &(cfvs - &node_cfvs[player]);
                column.mapv_inplace(|r| r.max(0.0));
            }
            node_cfvs
        }
    }
}

// Strategy proportional to positive regrets, uniform where no action has any.
fn regret_match(regrets: &Array2<f32>) -> Array2<f32> {
    let n_actions = regrets.ncols();
    let mut strategy = regrets.mapv(|r| r.max(0.0));
    for mut row in strategy.rows_mut() {
        let sum: f32 = row.sum();
        if sum > 0.0 {
            row.mapv_inplace(|p| p / sum);
        } else {
            row.fill(1.0 / n_actions as f32);
        }
    }
    strategy
}
