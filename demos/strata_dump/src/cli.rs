//! Command-line surface of the `strata-dump` demo.
use camino::Utf8PathBuf;
use clap::Parser;
use strata_config::FileNameStyle;

/// Layers configuration files and `name=value` strings for one application
/// and prints the result.
#[derive(Debug, Clone, Default, Parser)]
#[command(
    name = "strata-dump",
    bin_name = "strata-dump",
    about = "Merge layered configuration sources and print the result",
    version
)]
pub struct DumpArgs {
    /// Application whose sections are merged.
    #[arg(long, value_name = "NAME")]
    pub app: String,
    /// Instance whose overrides are applied on top of the application.
    #[arg(long, value_name = "NAME")]
    pub instance: Option<String>,
    /// Configuration files, merged in the order given.
    #[arg(long = "file", short = 'f', value_name = "PATH")]
    pub files: Vec<Utf8PathBuf>,
    /// Colon-separated `name=value` properties, merged after every file.
    #[arg(long = "set", short = 's', value_name = "PROPERTIES")]
    pub properties: Vec<String>,
    /// Fold application element names in files to lower case.
    #[arg(long)]
    pub case_insensitive: bool,
    /// Print `path=value` for each dotted path instead of the whole tree.
    #[arg(long = "get", short = 'g', value_name = "PATH")]
    pub queries: Vec<String>,
    /// Print each normalised source on one line instead of merging.
    #[arg(long)]
    pub one_line: bool,
}

impl DumpArgs {
    /// Naming convention applied to files.
    #[must_use]
    pub const fn file_name_style(&self) -> FileNameStyle {
        if self.case_insensitive {
            FileNameStyle::CaseInsensitive
        } else {
            FileNameStyle::CaseSensitive
        }
    }

    /// Instance name, empty when none was given.
    #[must_use]
    pub fn instance_name(&self) -> &str {
        self.instance.as_deref().unwrap_or_default()
    }
}
