pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::{cli::LocalStorage, ConverterSettings};
pub use crate::core::{engine::ConversionEngine, pipeline::HexPipeline};
pub use domain::model::{ByteSequence, ConversionSummary, Token};
pub use domain::ports::{InputSource, WriteErrorPolicy};
pub use utils::error::{ConvertError, Result};
