use valuegen::*;

use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    let config_path = args.get(1).map(String::as_str).unwrap_or("params.toml");
    let config = Config::load(config_path);
    generate_data(&config);
}
