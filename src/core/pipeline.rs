use crate::core::hex::{self, DEFAULT_PROGRAM};
use crate::core::{ByteSequence, ConfigProvider, InputSource, Pipeline, Storage, Token};
use crate::utils::error::{ConvertError, Result};
use std::io::Read;

pub struct HexPipeline<S: Storage, C: ConfigProvider> {
    pub(crate) storage: S,
    pub(crate) config: C,
}

impl<S: Storage, C: ConfigProvider> HexPipeline<S, C> {
    pub fn new(storage: S, config: C) -> Self {
        Self { storage, config }
    }

    fn read_input(&self) -> Result<String> {
        match self.config.input_source() {
            InputSource::Embedded => Ok(DEFAULT_PROGRAM.to_string()),
            InputSource::Inline(text) => Ok(text.clone()),
            InputSource::File(path) => {
                std::fs::read_to_string(path).map_err(|source| ConvertError::InputError {
                    path: path.clone(),
                    source,
                })
            }
            InputSource::Stdin => {
                let mut text = String::new();
                std::io::stdin()
                    .read_to_string(&mut text)
                    .map_err(|source| ConvertError::InputError {
                        path: "<stdin>".to_string(),
                        source,
                    })?;
                Ok(text)
            }
        }
    }
}

impl<S: Storage, C: ConfigProvider> Pipeline for HexPipeline<S, C> {
    type Config = C;

    fn config(&self) -> &C {
        &self.config
    }

    fn extract(&self) -> Result<Vec<Token>> {
        tracing::debug!("Reading hex text from {}", self.config.input_source().describe());
        let text = self.read_input()?;
        Ok(hex::tokenize(&text))
    }

    fn transform(&self, tokens: Vec<Token>) -> Result<ByteSequence> {
        hex::parse_tokens(&tokens)
    }

    fn load(&self, bytes: &ByteSequence) -> Result<String> {
        let output_path = self.config.output_path();
        self.storage.write_file(output_path, bytes.as_bytes())?;
        Ok(output_path.to_string())
    }

    fn verify(&self, bytes: &ByteSequence) -> Result<()> {
        let output_path = self.config.output_path();
        let on_disk = self.storage.read_file(output_path).map_err(|e| match e {
            // 回讀失敗屬於輸出檔問題
            ConvertError::InputError { path, source } => ConvertError::OutputError { path, source },
            other => other,
        })?;

        let expected = bytes.as_bytes();
        if on_disk == expected {
            return Ok(());
        }

        let offset = on_disk
            .iter()
            .zip(expected)
            .position(|(a, b)| a != b)
            .unwrap_or_else(|| on_disk.len().min(expected.len()));

        Err(ConvertError::VerificationError {
            path: output_path.to_string(),
            expected: expected.len(),
            actual: on_disk.len(),
            offset,
        })
    }
}
