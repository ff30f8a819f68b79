pub mod engine;
pub mod hex;
pub mod pipeline;

pub use crate::domain::model::{ByteSequence, ConversionSummary, Token};
pub use crate::domain::ports::{ConfigProvider, InputSource, Pipeline, Storage, WriteErrorPolicy};
pub use crate::utils::error::Result;
