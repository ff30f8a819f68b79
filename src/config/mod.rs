pub mod cli;
pub mod toml_config;

use crate::core::hex::DEFAULT_OUTPUT_PATH;
use crate::core::{ConfigProvider, InputSource, WriteErrorPolicy};
use crate::utils::error::Result;
use crate::utils::validation::{self, Validate};

#[cfg(feature = "cli")]
use toml_config::TomlConfig;
#[cfg(feature = "cli")]
use clap::Parser;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "hex2bin")]
#[command(about = "Convert whitespace-separated hex byte tokens into a raw binary file")]
pub struct CliConfig {
    /// Hex tokens given directly on the command line
    #[arg(long, conflicts_with = "input")]
    pub hex: Option<String>,

    /// File holding hex tokens ("-" reads stdin)
    #[arg(short, long)]
    pub input: Option<String>,

    /// Output file [default: comprehensive_test.bin]
    #[arg(short, long)]
    pub output: Option<String>,

    /// Optional TOML configuration file
    #[arg(short, long)]
    pub config: Option<String>,

    /// What to do when the output file cannot be written
    #[arg(long, value_enum)]
    pub on_write_error: Option<WriteErrorPolicy>,

    /// Read the output back and compare it with the parsed bytes
    #[arg(long)]
    pub verify: bool,

    /// Parse and report without writing anything
    #[arg(long)]
    pub dry_run: bool,

    /// Print a JSON summary on success
    #[arg(long)]
    pub json: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// Merges command-line flags over the optional config file.
    pub fn into_settings(self) -> Result<ConverterSettings> {
        let file_config = match &self.config {
            Some(path) => {
                tracing::info!("📁 Loading configuration from: {}", path);
                let config = TomlConfig::from_file(path)?;
                config.validate()?;
                Some(config)
            }
            None => None,
        };

        Ok(ConverterSettings::merge(self, file_config))
    }
}

/// Fully resolved run settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConverterSettings {
    pub input: InputSource,
    pub output_path: String,
    pub write_error_policy: WriteErrorPolicy,
    pub verify: bool,
    pub dry_run: bool,
}

impl Default for ConverterSettings {
    fn default() -> Self {
        Self {
            input: InputSource::Embedded,
            output_path: DEFAULT_OUTPUT_PATH.to_string(),
            write_error_policy: WriteErrorPolicy::default(),
            verify: false,
            dry_run: false,
        }
    }
}

impl ConverterSettings {
    pub fn new(input: InputSource, output_path: impl Into<String>) -> Self {
        Self {
            input,
            output_path: output_path.into(),
            ..Self::default()
        }
    }

    pub fn with_write_error_policy(mut self, policy: WriteErrorPolicy) -> Self {
        self.write_error_policy = policy;
        self
    }

    pub fn with_verify(mut self, verify: bool) -> Self {
        self.verify = verify;
        self
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    #[cfg(feature = "cli")]
    fn merge(cli: CliConfig, file: Option<TomlConfig>) -> Self {
        let file = file.unwrap_or_default();

        // 優先順序: --hex / --input > 配置檔 > 內建程式
        let input = match (cli.hex, cli.input) {
            (Some(hex), _) => InputSource::Inline(hex),
            (None, Some(path)) if path == "-" => InputSource::Stdin,
            (None, Some(path)) => InputSource::File(path),
            (None, None) => file.input_source().unwrap_or(InputSource::Embedded),
        };

        let output_path = cli
            .output
            .or_else(|| file.output_path().map(str::to_string))
            .unwrap_or_else(|| DEFAULT_OUTPUT_PATH.to_string());

        let write_error_policy = cli
            .on_write_error
            .or_else(|| file.write_error_policy())
            .unwrap_or_default();

        Self {
            input,
            output_path,
            write_error_policy,
            verify: cli.verify || file.verify(),
            dry_run: cli.dry_run,
        }
    }
}

impl ConfigProvider for ConverterSettings {
    fn input_source(&self) -> &InputSource {
        &self.input
    }

    fn output_path(&self) -> &str {
        &self.output_path
    }

    fn write_error_policy(&self) -> WriteErrorPolicy {
        self.write_error_policy
    }

    fn verify(&self) -> bool {
        self.verify
    }

    fn dry_run(&self) -> bool {
        self.dry_run
    }
}

impl Validate for ConverterSettings {
    fn validate(&self) -> Result<()> {
        validation::validate_file_path("output", &self.output_path)?;
        if let InputSource::File(path) = &self.input {
            validation::validate_path("input", path)?;
        }
        Ok(())
    }
}
