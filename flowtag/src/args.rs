use clap::{Args, Parser};
use serde::{Deserialize, Serialize};
use strum_macros::Display;

pub const DEFAULT_LOOKUP_PATH: &str = "lookup_table.csv";
pub const DEFAULT_FLOW_LOG_PATH: &str = "flow_logs.txt";
pub const DEFAULT_EXPORT_PATH: &str = "output.txt";

#[derive(Debug, Parser)]
#[clap(author, version, about)]
pub struct Cli {
    /// Path to a TOML configuration file, replaces every other option when given
    #[clap(long)]
    pub config_file: Option<String>,

    /// Where to read the lookup table and flow log from
    #[clap(flatten)]
    pub input: InputConfig,

    /// Output method
    #[clap(flatten)]
    pub output: OutputConfig,
}

/// Everything needed to run the aggregation pass.
#[derive(Args, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct InputConfig {
    /// The CSV lookup table with `dstport`, `protocol` and `tag` columns
    #[clap(long, default_value = DEFAULT_LOOKUP_PATH)]
    pub lookup: String,

    /// The flow log file, one whitespace-separated record per line
    #[clap(long, default_value = DEFAULT_FLOW_LOG_PATH)]
    pub flow_logs: String,

    /// How `Untagged` lookup results are counted
    #[clap(long, value_enum, default_value_t = TallyMode::Corrected)]
    pub mode: TallyMode,
}

impl Default for InputConfig {
    fn default() -> Self {
        InputConfig {
            lookup: DEFAULT_LOOKUP_PATH.to_string(),
            flow_logs: DEFAULT_FLOW_LOG_PATH.to_string(),
            mode: TallyMode::Corrected,
        }
    }
}

#[derive(Args, Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(default)]
pub struct OutputConfig {
    /// Output method
    #[clap(short, long, value_enum, default_value_t = ExportMethodType::File)]
    pub output: ExportMethodType,

    /// File path for the report (used if method is File)
    #[clap(long, default_value = DEFAULT_EXPORT_PATH)]
    pub export_path: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        OutputConfig {
            output: ExportMethodType::File,
            export_path: DEFAULT_EXPORT_PATH.to_string(),
        }
    }
}

/// Layout of the optional configuration file.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
#[serde(default)]
pub struct Config {
    pub input: InputConfig,
    pub output: OutputConfig,
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ExportMethodType {
    /// The report will be printed to the console
    Print,

    /// The report will be written to a file
    File,
}

#[derive(clap::ValueEnum, Serialize, Deserialize, Display, Clone, Copy, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum TallyMode {
    /// Counts `Untagged` a second time for every `Untagged` entry in a lookup result.
    Legacy,

    /// Counts every resolved tag exactly once.
    Corrected,
}
