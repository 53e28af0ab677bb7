// Builds the labeled training tensors for the value net: samples situations,
// runs them through the bucketer and the chosen value backend, and fills the
// three parallel output tensors (inputs, targets, feasibility mask) batch by
// batch. One board is shared by every example in a batch; ranges, pot
// features, and payoffs vary per example.

use crate::backend::ValueBackend;
use crate::bucket_conversion::BoardBuckets;
use crate::card_abstraction::Bucketer;
use crate::card_utils::{pbar, sample_board, sample_ranges};
use crate::config::Config;
use ndarray::{s, Array2};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

pub struct TensorSet {
    // [example_count, bucket_count * player_count + 1]; the last column is
    // the pot feature.
    pub inputs: Array2<f32>,
    // [example_count, bucket_count * player_count]
    pub targets: Array2<f32>,
    // [example_count, bucket_count]; shared across players.
    pub mask: Array2<f32>,
}

// Generates `count` examples with a fixed seed. Everything stochastic is
// drawn from one StdRng stream, so a given (config, seed) pair always
// produces bit-identical tensors.
pub fn generate_examples(config: &Config, count: usize, seed: u64) -> TensorSet {
    assert!(count > 0, "Requested an empty dataset");
    assert!(
        count % config.batch_size == 0,
        "Example count {} is not divisible by batch size {}",
        count,
        config.batch_size
    );
    let batch_count = count / config.batch_size;
    let bucket_count = config.bucket_count();
    let mut rng = StdRng::seed_from_u64(seed);
    let bucketer = Bucketer::new(config);
    let mut backend = ValueBackend::from_config(config);

    let mut tensors = TensorSet {
        inputs: Array2::zeros((count, config.input_width())),
        targets: Array2::zeros((count, config.target_width())),
        mask: Array2::zeros((count, bucket_count)),
    };

    let bar = pbar(batch_count as u64);
    for batch in 0..batch_count {
        let row0 = batch * config.batch_size;
        let row1 = row0 + config.batch_size;

        let board = sample_board(config, &mut rng);
        let buckets = BoardBuckets::new(config, &bucketer, &board);
        backend.set_board(&board);

        let ranges = [
            sample_ranges(config, &board, &mut rng, config.batch_size),
            sample_ranges(config, &board, &mut rng, config.batch_size),
        ];
        let pots = backend.sample_pots(&mut rng, config.batch_size);

        // Pot feature goes in the last input column.
        let pot_column = config.input_width() - 1;
        for (i, sample) in pots.iter().enumerate() {
            tensors.inputs[[row0 + i, pot_column]] = sample.feature;
        }

        // Per-player bucket slices of the inputs.
        for player in 0..config.player_count {
            let col0 = player * bucket_count;
            buckets.card_range_to_bucket_range(
                ranges[player].view(),
                tensors
                    .inputs
                    .slice_mut(s![row0..row1, col0..col0 + bucket_count]),
            );
        }

        let values = backend.compute_values([&ranges[0], &ranges[1]], &pots);
        for player in 0..config.player_count {
            let col0 = player * bucket_count;
            buckets.card_range_to_bucket_range(
                values[player].view(),
                tensors
                    .targets
                    .slice_mut(s![row0..row1, col0..col0 + bucket_count]),
            );
        }

        let mask = buckets.possible_bucket_mask();
        for row in row0..row1 {
            tensors.mask.row_mut(row).assign(&mask);
        }
        bar.inc(1);
    }
    bar.finish();
    tensors
}

// Dataset driver: one validation split, then one training split, written to
// <data_path><split>.inputs|.targets|.mask. The splits use independent seed
// streams, and a split only hits the disk once all of its batches succeeded,
// so a failure mid-train leaves the finished validation files intact.
pub fn generate_data(config: &Config) {
    println!("[INFO] Generating {} validation examples.", config.valid_count);
    let valid = generate_examples(config, config.valid_count, config.seed);
    save_tensors(&valid, config, "valid");

    println!("[INFO] Generating {} training examples.", config.train_count);
    let train = generate_examples(config, config.train_count, config.seed + 1);
    save_tensors(&train, config, "train");
}

pub fn save_tensors(tensors: &TensorSet, config: &Config, split: &str) {
    let stem = format!("{}{}", config.data_path, split);
    if let Some(parent) = Path::new(&stem).parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).expect("Could not create the output directory");
        }
    }
    write_tensor(&tensors.inputs, &format!("{stem}.inputs"));
    write_tensor(&tensors.targets, &format!("{stem}.targets"));
    write_tensor(&tensors.mask, &format!("{stem}.mask"));
    println!("[INFO] Saved {} tensors to {stem}.*", split);
}

pub fn load_tensors(config: &Config, split: &str) -> TensorSet {
    let stem = format!("{}{}", config.data_path, split);
    TensorSet {
        inputs: read_tensor(&format!("{stem}.inputs")),
        targets: read_tensor(&format!("{stem}.targets")),
        mask: read_tensor(&format!("{stem}.mask")),
    }
}

fn write_tensor(tensor: &Array2<f32>, path: &str) {
    let file = File::create(path).unwrap_or_else(|_| panic!("Could not create {path}"));
    let mut buf_writer = BufWriter::new(file);
    bincode::serialize_into(&mut buf_writer, tensor).expect("Failed to serialize tensor");
    buf_writer.flush().unwrap();
}

fn read_tensor(path: &str) -> Array2<f32> {
    let file = File::open(path).unwrap_or_else(|_| panic!("Tensor file not found: {path}"));
    let reader = BufReader::new(file);
    bincode::deserialize_from(reader).expect("Failed to deserialize tensor")
}
