//! Resolution of the run options of one import.
//!
//! Each option is taken from the first source that provides it:
//!
//! 1. Command line flag
//! 2. Environment variable (merged with the flag by `clap`)
//! 3. Settings file (pool path only)
//! 4. Interactive prompt
//!
//! Resolution happens once, before any input is read. The import itself
//! only ever sees the finished [`ImportConfiguration`].

use std::path::PathBuf;

use super::settings::{Config, RecordConfig};
use crate::error::ConfigError;
use crate::import::ImportOptions;

/// A run option that may need to be prompted for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOption {
    /// Pool root directory.
    PoolPath,
    /// Package record to map pads from.
    PackagePath,
    /// Vendor pin table.
    XmlPath,
    /// Part number.
    PartName,
    /// Datasheet URL.
    DatasheetUrl,
    /// Part description.
    Description,
}

impl RunOption {
    /// Human readable option name.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::PoolPath => "pool path",
            Self::PackagePath => "package path",
            Self::XmlPath => "pin table path",
            Self::PartName => "part name",
            Self::DatasheetUrl => "datasheet URL",
            Self::Description => "description",
        }
    }

    /// Long command line flag, without dashes.
    #[must_use]
    pub const fn flag(self) -> &'static str {
        match self {
            Self::PoolPath => "pool",
            Self::PackagePath => "package",
            Self::XmlPath => "xml",
            Self::PartName => "part-name",
            Self::DatasheetUrl => "datasheet",
            Self::Description => "description",
        }
    }

    /// Environment variable consulted when the flag is absent.
    #[must_use]
    pub const fn env_var(self) -> &'static str {
        match self {
            Self::PoolPath => "MCU_IMPORT_POOL_PATH",
            Self::PackagePath => "MCU_IMPORT_PACKAGE",
            Self::XmlPath => "MCU_IMPORT_XML",
            Self::PartName => "MCU_IMPORT_PART_NAME",
            Self::DatasheetUrl => "MCU_IMPORT_DATASHEET",
            Self::Description => "MCU_IMPORT_DESCRIPTION",
        }
    }

    /// Whether the import cannot run without this option.
    #[must_use]
    pub const fn is_required(self) -> bool {
        !matches!(self, Self::DatasheetUrl | Self::Description)
    }

    const fn missing(self) -> ConfigError {
        ConfigError::MissingOption {
            option: self.name(),
            flag: self.flag(),
            env_var: self.env_var(),
        }
    }
}

/// Asks the operator for options no other source provided.
pub trait Prompter {
    /// Returns the value entered for `option`.
    ///
    /// # Errors
    ///
    /// Returns an error if no value can be obtained.
    fn prompt(&mut self, option: RunOption) -> Result<String, ConfigError>;
}

/// Never prompts: required options fail, optional ones are left empty.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoPrompt;

impl Prompter for NoPrompt {
    fn prompt(&mut self, option: RunOption) -> Result<String, ConfigError> {
        if option.is_required() {
            Err(option.missing())
        } else {
            Ok(String::new())
        }
    }
}

/// Prompts on the terminal.
#[derive(Debug, Clone, Copy, Default)]
pub struct InteractivePrompter;

impl Prompter for InteractivePrompter {
    fn prompt(&mut self, option: RunOption) -> Result<String, ConfigError> {
        let label = format!("{}:", capitalise(option.name()));
        let mut text = inquire::Text::new(&label);
        if option.is_required() {
            text = text.with_validator(inquire::required!());
        } else {
            text = text.with_help_message("optional, press enter to skip");
        }
        text.prompt().map_err(|source| ConfigError::Prompt {
            option: option.name(),
            source,
        })
    }
}

fn capitalise(s: &str) -> String {
    let mut chars = s.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}

/// Run options as supplied on the command line or environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunOptions {
    /// Pool root directory.
    pub pool_path: Option<PathBuf>,
    /// Package record file.
    pub package_path: Option<PathBuf>,
    /// Pin table file.
    pub xml_path: Option<PathBuf>,
    /// Part number.
    pub part_name: Option<String>,
    /// Datasheet URL.
    pub datasheet_url: Option<String>,
    /// Part description.
    pub description: Option<String>,
}

/// Fully resolved inputs of one import.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportConfiguration {
    /// Pool root directory; records are written below it.
    pub pool_path: PathBuf,
    /// Package record file.
    pub package_path: PathBuf,
    /// Pin table file.
    pub xml_path: PathBuf,
    /// Part number, also used as unit and entity name.
    pub part_name: String,
    /// Datasheet URL, possibly empty.
    pub datasheet_url: String,
    /// Part description, possibly empty.
    pub description: String,
}

impl ImportConfiguration {
    /// Combines the run options with the record settings.
    #[must_use]
    pub fn import_options(&self, records: &RecordConfig) -> ImportOptions {
        ImportOptions {
            part_name: self.part_name.clone(),
            manufacturer: records.manufacturer.clone(),
            prefix: records.entity_prefix.clone(),
            tags: records.tags.clone(),
            datasheet: self.datasheet_url.clone(),
            description: self.description.clone(),
        }
    }
}

/// Resolves every run option, prompting for those still missing.
///
/// Blank values count as missing.
///
/// # Errors
///
/// Returns [`ConfigError::MissingOption`] if a required option is still
/// blank after prompting, or any error from the prompter.
pub fn resolve(
    options: RunOptions,
    settings: &Config,
    prompter: &mut dyn Prompter,
) -> Result<ImportConfiguration, ConfigError> {
    let pool_path = options
        .pool_path
        .filter(|p| !p.as_os_str().is_empty())
        .or_else(|| settings.pool_path.clone());

    let pool_path = path_or_prompt(pool_path, RunOption::PoolPath, prompter)?;
    let package_path = path_or_prompt(options.package_path, RunOption::PackagePath, prompter)?;
    let xml_path = path_or_prompt(options.xml_path, RunOption::XmlPath, prompter)?;
    let part_name = text_or_prompt(options.part_name, RunOption::PartName, prompter)?;
    let datasheet_url = text_or_prompt(options.datasheet_url, RunOption::DatasheetUrl, prompter)?;
    let description = text_or_prompt(options.description, RunOption::Description, prompter)?;

    tracing::debug!(
        pool = %pool_path.display(),
        package = %package_path.display(),
        pin_table = %xml_path.display(),
        part = %part_name,
        "Resolved run options"
    );

    Ok(ImportConfiguration {
        pool_path,
        package_path,
        xml_path,
        part_name,
        datasheet_url,
        description,
    })
}

fn path_or_prompt(
    value: Option<PathBuf>,
    option: RunOption,
    prompter: &mut dyn Prompter,
) -> Result<PathBuf, ConfigError> {
    match value.filter(|p| !p.as_os_str().is_empty()) {
        Some(path) => Ok(path),
        None => text_or_prompt(None, option, prompter).map(PathBuf::from),
    }
}

fn text_or_prompt(
    value: Option<String>,
    option: RunOption,
    prompter: &mut dyn Prompter,
) -> Result<String, ConfigError> {
    if let Some(value) = value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty()) {
        return Ok(value);
    }

    let entered = prompter.prompt(option)?.trim().to_string();
    if entered.is_empty() && option.is_required() {
        return Err(option.missing());
    }
    Ok(entered)
}
