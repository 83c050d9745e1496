//! Source loading, merging and report rendering for the demo.
use std::io::Write;

use strata_config::{Config, ConfigSource, OutputStyle};
use tracing::debug;

use crate::cli::DumpArgs;
use crate::error::Result;

/// Builds every source named on the command line.
///
/// Files come first in the order given, followed by the `--set` property
/// strings. Property strings target the instance section when an instance
/// name was supplied.
///
/// # Errors
///
/// Returns [`crate::error::DumpError::Configuration`] when a file cannot be
/// read or a source is rejected.
pub fn load_sources(args: &DumpArgs) -> Result<Vec<ConfigSource>> {
    let builder = ConfigSource::builder().file_name_style(args.file_name_style());
    let mut sources = Vec::with_capacity(args.files.len() + args.properties.len());
    for path in &args.files {
        sources.push(builder.load_file(path)?);
    }
    for properties in &args.properties {
        let mut naive = ConfigSource::naive(properties.as_str(), args.app.as_str());
        if let Some(instance) = args.instance.as_deref() {
            naive = naive.instance_name(instance);
        }
        sources.push(naive.build()?);
    }
    debug!(count = sources.len(), "loaded config sources");
    Ok(sources)
}

/// Merges `sources` in order into a locked config for the requested
/// application and instance.
///
/// # Errors
///
/// Returns [`crate::error::DumpError::Configuration`] when the names are
/// invalid or a merge is ambiguous.
pub fn build_config(args: &DumpArgs, sources: &[ConfigSource]) -> Result<Config> {
    let mut config = Config::with_instance(&args.app, args.instance_name())?;
    for source in sources {
        config.merge(source)?;
    }
    config.lock()?;
    debug!(config = %config.name(), "config locked");
    Ok(config)
}

/// Writes the report selected by `args` to `out`.
///
/// # Errors
///
/// Returns an error when any source fails to load or merge, when a queried
/// path is missing, or when writing to `out` fails.
pub fn write_report<W: Write>(out: &mut W, args: &DumpArgs) -> Result<()> {
    let sources = load_sources(args)?;
    if args.one_line {
        for source in &sources {
            writeln!(out, "{}: {}", source.name(), source.to_string(OutputStyle::OneLine))?;
        }
        return Ok(());
    }
    let config = build_config(args, &sources)?;
    if args.queries.is_empty() {
        write!(out, "{config}")?;
        return Ok(());
    }
    for path in &args.queries {
        writeln!(out, "{path}={}", config.get(path)?)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests;
