use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{bail, Result};
use tracing::info;

use crate::config::Config;
use crate::extension::{ReportTarget, VersionsExtension};
use crate::lifecycle::Generator;
use crate::playbook::Playbook;

pub fn run(
    playbook: String,
    output: Option<String>,
    config: Option<String>,
    makefile: Option<String>,
) -> Result<()> {
    let input = Path::new(&playbook);
    if !input.is_file() {
        bail!("Playbook not found: {}", playbook);
    }

    let mut config = Config::load_with_path(config)?;
    if let Some(path) = makefile {
        config.makefile = PathBuf::from(path);
    }

    // Keep stdout clean when the playbook itself is written there
    let report = if output.is_some() {
        ReportTarget::Stdout
    } else {
        ReportTarget::Stderr
    };

    let resolved = resolve(Playbook::load(input)?, config, report)?;

    match output {
        Some(path) => {
            resolved.save(Path::new(&path))?;
            info!("Wrote resolved playbook to {}", path);
        }
        None => io::stdout().lock().write_all(resolved.to_yaml()?.as_bytes())?,
    }

    Ok(())
}

/// Run one build of `playbook` with the versions extension registered.
pub fn resolve(playbook: Playbook, config: Config, report: ReportTarget) -> Result<Playbook> {
    let mut generator = Generator::new();
    generator.register(VersionsExtension::new(config).with_report(report));
    generator.build(playbook)
}
