use crate::domain::model::{ByteSequence, Token};
use crate::utils::error::Result;

/// Where the hex text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// The built-in test program.
    Embedded,
    Inline(String),
    File(String),
    Stdin,
}

impl InputSource {
    pub fn describe(&self) -> String {
        match self {
            InputSource::Embedded => "embedded program".to_string(),
            InputSource::Inline(_) => "inline text".to_string(),
            InputSource::File(path) => format!("file '{}'", path),
            InputSource::Stdin => "stdin".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
pub enum WriteErrorPolicy {
    /// Write failures end the run with a non-zero exit code.
    #[default]
    Fail,
    /// Write failures are printed and the run still exits 0.
    Report,
}

impl WriteErrorPolicy {
    pub const NAMES: [&'static str; 2] = ["fail", "report"];

    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "fail" => Some(WriteErrorPolicy::Fail),
            "report" => Some(WriteErrorPolicy::Report),
            _ => None,
        }
    }
}

pub trait Storage {
    fn read_file(&self, path: &str) -> Result<Vec<u8>>;
    fn write_file(&self, path: &str, data: &[u8]) -> Result<()>;
}

pub trait ConfigProvider {
    fn input_source(&self) -> &InputSource;
    fn output_path(&self) -> &str;
    fn write_error_policy(&self) -> WriteErrorPolicy;
    fn verify(&self) -> bool;
    fn dry_run(&self) -> bool;
}

pub trait Pipeline {
    type Config: ConfigProvider;

    fn config(&self) -> &Self::Config;
    fn extract(&self) -> Result<Vec<Token>>;
    fn transform(&self, tokens: Vec<Token>) -> Result<ByteSequence>;
    fn load(&self, bytes: &ByteSequence) -> Result<String>;
    fn verify(&self, bytes: &ByteSequence) -> Result<()>;
}
