use std::io::{self, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{bail, Result};

use crate::config::Config;
use crate::version::VersionSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// `label: value` lines
    Text,
    /// JSON object keyed by attribute name
    Json,
    /// `-a name=value` lines for asciidoctor
    Flags,
}

impl FromStr for OutputFormat {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            "flags" | "asciidoctor" => Ok(OutputFormat::Flags),
            _ => bail!("Unknown format: {}. Valid options: text, json, flags", s),
        }
    }
}

pub fn run(config: Option<String>, makefile: Option<String>, format: &str) -> Result<()> {
    let format = OutputFormat::from_str(format)?;
    let mut config = Config::load_with_path(config)?;
    if let Some(path) = makefile {
        config.makefile = PathBuf::from(path);
    }

    let versions = VersionSet::read(&config.makefile, &config.attributes)?;
    render(&versions, format, &mut io::stdout().lock())
}

pub fn render<W: Write>(versions: &VersionSet, format: OutputFormat, out: &mut W) -> Result<()> {
    match format {
        OutputFormat::Text => versions.report(out)?,
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut *out, &versions.to_map())?;
            writeln!(out)?;
        }
        OutputFormat::Flags => {
            for entry in versions.iter() {
                writeln!(out, "-a {}={}", entry.name, entry.value)?;
            }
        }
    }
    Ok(())
}
