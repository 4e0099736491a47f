//! Publishes Makefile versions as AsciiDoc attributes when the playbook is built.

use anyhow::Result;
use std::io;
use tracing::info;

use crate::config::Config;
use crate::lifecycle::{BuildContext, Extension};
use crate::version::VersionSet;

/// Where the human-readable version report goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTarget {
    Stdout,
    Stderr,
    Silent,
}

pub struct VersionsExtension {
    config: Config,
    report: ReportTarget,
}

impl VersionsExtension {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            report: ReportTarget::Stdout,
        }
    }

    pub fn with_report(mut self, report: ReportTarget) -> Self {
        self.report = report;
        self
    }

    /// Read the configured file into a fresh set.
    pub fn versions(&self) -> Result<VersionSet> {
        Ok(VersionSet::read(
            &self.config.makefile,
            &self.config.attributes,
        )?)
    }

    fn report(&self, versions: &VersionSet) -> io::Result<()> {
        match self.report {
            ReportTarget::Stdout => versions.report(&mut io::stdout().lock()),
            ReportTarget::Stderr => versions.report(&mut io::stderr().lock()),
            ReportTarget::Silent => Ok(()),
        }
    }
}

impl Extension for VersionsExtension {
    fn name(&self) -> &str {
        "versions"
    }

    fn playbook_built(&self, ctx: &mut BuildContext) -> Result<()> {
        // Extract everything before touching the playbook
        let versions = self.versions()?;
        self.report(&versions)?;

        let mut playbook = ctx.playbook().clone();
        versions.merge_into(&mut playbook.asciidoc.attributes);
        ctx.update_variables(playbook);

        info!(
            "Published {} version attribute(s) from {}",
            versions.len(),
            self.config.makefile.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playbook::Playbook;
    use std::fs;
    use tempfile::TempDir;

    fn config_for(dir: &TempDir, content: &str) -> Config {
        let makefile = dir.path().join("Makefile");
        fs::write(&makefile, content).unwrap();
        Config {
            makefile,
            ..Config::default()
        }
    }

    #[test]
    fn test_playbook_built_commits_attributes() {
        let dir = TempDir::new().unwrap();
        let config = config_for(
            &dir,
            "OPENSHIFT_VERSION = 4.15.2\nCRC_VERSION = 2.35.0\nMICROSHIFT_VERSION = 4.15.2\n",
        );
        let extension = VersionsExtension::new(config).with_report(ReportTarget::Silent);

        let mut ctx = BuildContext::new(Playbook::default());
        extension.playbook_built(&mut ctx).unwrap();

        assert_eq!(ctx.updates(), 1);
        assert_eq!(ctx.playbook().attribute("ocp-ver"), Some("4.15"));
        assert_eq!(ctx.playbook().attribute("prod-ver-full"), Some("2.35.0"));
    }

    #[test]
    fn test_missing_key_leaves_playbook_untouched() {
        let dir = TempDir::new().unwrap();
        let config = config_for(&dir, "OPENSHIFT_VERSION = 4.15.2\nMICROSHIFT_VERSION = 4.15.2\n");
        let extension = VersionsExtension::new(config).with_report(ReportTarget::Silent);

        let mut ctx = BuildContext::new(Playbook::default());
        let err = extension.playbook_built(&mut ctx).unwrap_err();

        assert!(err.to_string().contains("CRC_VERSION"));
        assert_eq!(ctx.updates(), 0);
        assert!(ctx.playbook().asciidoc.attributes.is_empty());
    }

    #[test]
    fn test_missing_file_is_configuration_missing() {
        let dir = TempDir::new().unwrap();
        let config = Config {
            makefile: dir.path().join("Makefile"),
            ..Config::default()
        };
        let extension = VersionsExtension::new(config);
        let err = extension.versions().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<crate::error::VersionError>(),
            Some(crate::error::VersionError::ConfigurationMissing { .. })
        ));
    }
}
