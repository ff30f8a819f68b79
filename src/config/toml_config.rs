use crate::core::{InputSource, WriteErrorPolicy};
use crate::utils::error::{ConvertError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    #[serde(default)]
    pub input: InputConfig,
    #[serde(default)]
    pub output: OutputConfig,
    pub error_handling: Option<ErrorHandlingConfig>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct InputConfig {
    pub hex: Option<String>,
    pub file: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    pub path: Option<String>,
    pub verify: Option<bool>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ErrorHandlingConfig {
    pub on_write_error: Option<String>,
}

impl TomlConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content =
            std::fs::read_to_string(&path).map_err(|source| ConvertError::InputError {
                path: path.as_ref().display().to_string(),
                source,
            })?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| ConvertError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${PROGRAM_HEX})，未定義者保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;

        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| ConvertError::ConfigValidationError {
            field: "env_substitution".to_string(),
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    /// Input declared by the file, if any.
    pub fn input_source(&self) -> Option<InputSource> {
        if let Some(hex) = &self.input.hex {
            return Some(InputSource::Inline(hex.clone()));
        }
        self.input.file.as_ref().map(|file| {
            if file == "-" {
                InputSource::Stdin
            } else {
                InputSource::File(file.clone())
            }
        })
    }

    pub fn output_path(&self) -> Option<&str> {
        self.output.path.as_deref()
    }

    pub fn verify(&self) -> bool {
        self.output.verify.unwrap_or(false)
    }

    pub fn write_error_policy(&self) -> Option<WriteErrorPolicy> {
        self.error_handling
            .as_ref()
            .and_then(|e| e.on_write_error.as_deref())
            .and_then(WriteErrorPolicy::from_name)
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_exclusive(
            "input",
            self.input.hex.as_deref(),
            self.input.file.as_deref(),
        )?;

        if let Some(file) = &self.input.file {
            validation::validate_path("input.file", file)?;
        }

        if let Some(path) = &self.output.path {
            validation::validate_file_path("output.path", path)?;
        }

        if let Some(policy) = self
            .error_handling
            .as_ref()
            .and_then(|e| e.on_write_error.as_deref())
        {
            validation::validate_one_of(
                "error_handling.on_write_error",
                policy,
                &WriteErrorPolicy::NAMES,
            )?;
        }

        Ok(())
    }
}
