use serde::{Deserialize, Serialize};

/// A whitespace-delimited piece of the input, tagged with its position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub position: usize,
    pub text: String,
}

/// Parsed bytes in input order. Read-only once built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ByteSequence(Vec<u8>);

impl ByteSequence {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<Vec<u8>> for ByteSequence {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

impl FromIterator<u8> for ByteSequence {
    fn from_iter<I: IntoIterator<Item = u8>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConversionSummary {
    pub output_path: String,
    pub token_count: usize,
    pub byte_count: usize,
    pub written: bool,
    pub verified: bool,
}
