use crate::core::hex;
use crate::core::{ConfigProvider, ConversionSummary, Pipeline, WriteErrorPolicy};
use crate::utils::error::{ConvertError, Result};

/// Drives a pipeline through tokenize, parse, write and (optionally) verify,
/// printing a status line after each step.
pub struct ConversionEngine<P: Pipeline> {
    pipeline: P,
    console: bool,
}

impl<P: Pipeline> ConversionEngine<P> {
    pub fn new(pipeline: P) -> Self {
        Self {
            pipeline,
            console: true,
        }
    }

    /// Engine that only logs; used when stdout carries machine-readable output.
    pub fn new_quiet(pipeline: P) -> Self {
        Self {
            pipeline,
            console: false,
        }
    }

    fn report(&self, line: &str) {
        if self.console {
            println!("{}", line);
        }
    }

    pub fn run(&self) -> Result<ConversionSummary> {
        let config = self.pipeline.config();
        let output_path = config.output_path();

        self.report(&format!("Preparing to create binary file: {}", output_path));

        // Extract
        let tokens = self.pipeline.extract()?;
        let token_count = tokens.len();
        self.report(&format!("Found {} tokens.", token_count));
        tracing::debug!("Tokens read from {}", config.input_source().describe());

        // Transform
        let bytes = self.pipeline.transform(tokens)?;
        self.report(&format!("Successfully parsed {} bytes.", bytes.len()));
        tracing::debug!("Bytes: {}", hex::encode(bytes.as_bytes()));

        let mut summary = ConversionSummary {
            output_path: output_path.to_string(),
            token_count,
            byte_count: bytes.len(),
            written: false,
            verified: false,
        };

        if config.dry_run() {
            self.report(&format!("Dry run: '{}' was not written.", output_path));
            return Ok(summary);
        }

        // Load
        let written_path = self.pipeline.load(&bytes)?;
        summary.written = true;
        self.report(&format!("Success! Binary file '{}' created.", written_path));
        self.report(&format!("Total size: {} bytes.", bytes.len()));

        if config.verify() {
            self.pipeline.verify(&bytes)?;
            summary.verified = true;
            self.report(&format!("Verified {} bytes in '{}'.", bytes.len(), written_path));
        }

        Ok(summary)
    }

    /// Exit code for a failed [`run`](Self::run), honouring the configured
    /// write-error policy.
    pub fn exit_code(&self, error: &ConvertError) -> i32 {
        exit_code(error, self.pipeline.config().write_error_policy())
    }
}

/// Exit code for a failed run. Under [`WriteErrorPolicy::Report`] a failure
/// to produce the output file is reported only, so the run still exits 0.
pub fn exit_code(error: &ConvertError, policy: WriteErrorPolicy) -> i32 {
    if error.is_write_failure() && policy == WriteErrorPolicy::Report {
        return 0;
    }
    error.severity().exit_code()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::cli::LocalStorage;
    use crate::config::ConverterSettings;
    use crate::core::pipeline::HexPipeline;
    use crate::core::{InputSource, Storage};
    use tempfile::TempDir;

    /// Drops the last byte of every write so read-back never matches.
    struct LossyStorage(LocalStorage);

    impl Storage for LossyStorage {
        fn read_file(&self, path: &str) -> Result<Vec<u8>> {
            self.0.read_file(path)
        }

        fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
            let kept = &data[..data.len().saturating_sub(1)];
            self.0.write_file(path, kept)
        }
    }

    fn engine_in(
        dir: &TempDir,
        settings: ConverterSettings,
    ) -> ConversionEngine<HexPipeline<LocalStorage, ConverterSettings>> {
        ConversionEngine::new_quiet(HexPipeline::new(LocalStorage::new(dir.path()), settings))
    }

    #[test]
    fn test_run_embedded_program() {
        let dir = TempDir::new().unwrap();
        let summary = engine_in(&dir, ConverterSettings::default().with_verify(true))
            .run()
            .unwrap();

        assert_eq!(summary.token_count, 40);
        assert_eq!(summary.byte_count, 40);
        assert!(summary.written);
        assert!(summary.verified);

        let data = std::fs::read(dir.path().join("comprehensive_test.bin")).unwrap();
        assert_eq!(data.len(), 40);
        assert_eq!(data[8..12], [0x3b, 0x84, 0xc5, 0x40]);
    }

    #[test]
    fn test_parse_failure_leaves_existing_file_untouched() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("out.bin"), b"previous").unwrap();

        let settings =
            ConverterSettings::new(InputSource::Inline("13 05 zz 00".to_string()), "out.bin");
        let err = engine_in(&dir, settings).run().unwrap_err();

        assert!(matches!(err, ConvertError::InvalidTokenError { .. }));
        assert_eq!(exit_code(&err, WriteErrorPolicy::Report), 1);
        assert_eq!(
            std::fs::read(dir.path().join("out.bin")).unwrap(),
            b"previous"
        );
    }

    #[test]
    fn test_dry_run_does_not_write() {
        let dir = TempDir::new().unwrap();
        let settings = ConverterSettings::default().with_dry_run(true);
        let summary = engine_in(&dir, settings).run().unwrap();

        assert_eq!(summary.byte_count, 40);
        assert!(!summary.written);
        assert!(!dir.path().join("comprehensive_test.bin").exists());
    }

    #[test]
    fn test_empty_input_writes_empty_file() {
        let dir = TempDir::new().unwrap();
        let settings = ConverterSettings::new(InputSource::Inline(" \n ".to_string()), "e.bin");
        let summary = engine_in(&dir, settings).run().unwrap();

        assert_eq!(summary.byte_count, 0);
        assert_eq!(std::fs::metadata(dir.path().join("e.bin")).unwrap().len(), 0);
    }

    #[test]
    fn test_write_failure_exit_code_follows_policy() {
        let dir = TempDir::new().unwrap();
        // 父路徑是一般檔案，無論權限為何都無法建立
        std::fs::write(dir.path().join("blocker"), b"").unwrap();
        let settings = ConverterSettings::new(InputSource::Embedded, "blocker/out.bin");

        let err = engine_in(&dir, settings).run().unwrap_err();
        assert!(err.is_write_failure());
        assert_eq!(exit_code(&err, WriteErrorPolicy::Report), 0);
        assert_eq!(exit_code(&err, WriteErrorPolicy::Fail), 3);
    }

    #[test]
    fn test_verify_mismatch_follows_write_error_policy() {
        let dir = TempDir::new().unwrap();
        let run_with = |policy: WriteErrorPolicy| {
            let settings = ConverterSettings::default()
                .with_verify(true)
                .with_write_error_policy(policy);
            let storage = LossyStorage(LocalStorage::new(dir.path()));
            let engine = ConversionEngine::new_quiet(HexPipeline::new(storage, settings));
            let err = engine.run().unwrap_err();
            assert!(matches!(
                err,
                ConvertError::VerificationError {
                    expected: 40,
                    actual: 39,
                    ..
                }
            ));
            engine.exit_code(&err)
        };

        assert_eq!(run_with(WriteErrorPolicy::Report), 0);
        assert_eq!(run_with(WriteErrorPolicy::Fail), 3);
    }
}
