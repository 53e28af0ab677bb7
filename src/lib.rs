mod backend;
mod bucket_conversion;
mod card_abstraction;
mod card_utils;
mod config;
mod data_generation;
mod resolving;
mod terminal_equity;

pub use backend::*;
pub use bucket_conversion::*;
pub use card_abstraction::*;
pub use card_utils::*;
pub use config::*;
pub use data_generation::*;
pub use resolving::*;
pub use terminal_equity::*;
