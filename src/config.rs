// For reading and storing the configuration file info. The config is passed
// explicitly to every component at construction so that each piece stays a
// pure function of (config, inputs).

use serde::{Deserialize, Serialize};
use std::fs;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Game parameters
    pub card_count: usize,
    pub suit_count: usize,
    pub board_card_count: usize,
    pub player_count: usize,
    pub ante: u32,
    pub stack: u32,

    // Resolving
    pub resolve_iters: u64,

    // Data generation
    pub train_count: usize,
    pub valid_count: usize,
    pub batch_size: usize,
    pub data_path: String,
    pub value_backend: String,
    pub seed: u64,
}

impl Config {
    pub fn load(path: &str) -> Config {
        let config_string =
            fs::read_to_string(path).unwrap_or_else(|_| panic!("Config file not found: {path}"));
        let config: Config =
            toml::from_str(&config_string).expect("Could not parse TOML config file");
        assert!(
            config.card_count % config.suit_count == 0,
            "card_count must be a multiple of suit_count"
        );
        assert_eq!(config.player_count, 2, "Only heads-up games are supported");
        assert!(config.board_card_count < config.card_count);
        assert!(config.ante <= config.stack);
        config
    }

    pub fn rank_count(&self) -> usize {
        self.card_count / self.suit_count
    }

    // Number of distinct boards under canonicalization (board identity is a
    // set, not a sequence).
    pub fn distinct_board_count(&self) -> usize {
        binomial(self.card_count, self.board_card_count)
    }

    pub fn bucket_count(&self) -> usize {
        self.card_count * self.distinct_board_count()
    }

    // Per-player bucket slices, plus the pot feature in the last column.
    pub fn input_width(&self) -> usize {
        self.bucket_count() * self.player_count + 1
    }

    pub fn target_width(&self) -> usize {
        self.bucket_count() * self.player_count
    }
}

pub fn binomial(n: usize, k: usize) -> usize {
    if k > n {
        return 0;
    }
    let mut result: usize = 1;
    for i in 0..k {
        result = result * (n - i) / (i + 1);
    }
    result
}
