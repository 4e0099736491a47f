//! Extension hooks of the site generator.
//!
//! The generator owns the playbook. Extensions see the committed playbook
//! through [`BuildContext::playbook`] and publish changes with
//! [`BuildContext::update_variables`]; anything not committed is dropped.

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::playbook::Playbook;

/// A build extension reacting to generator lifecycle events.
pub trait Extension {
    fn name(&self) -> &str;

    /// Called once per build after the playbook has been loaded.
    fn playbook_built(&self, ctx: &mut BuildContext) -> Result<()>;
}

/// Build variables visible to extensions.
#[derive(Debug)]
pub struct BuildContext {
    playbook: Playbook,
    updates: usize,
}

impl BuildContext {
    pub fn new(playbook: Playbook) -> Self {
        Self {
            playbook,
            updates: 0,
        }
    }

    pub fn playbook(&self) -> &Playbook {
        &self.playbook
    }

    /// Commit a new playbook for the rest of the build.
    pub fn update_variables(&mut self, playbook: Playbook) {
        self.updates += 1;
        self.playbook = playbook;
    }

    /// Number of commits so far.
    pub fn updates(&self) -> usize {
        self.updates
    }

    pub fn into_playbook(self) -> Playbook {
        self.playbook
    }
}

#[derive(Default)]
pub struct Generator {
    extensions: Vec<Box<dyn Extension>>,
}

impl Generator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register<E: Extension + 'static>(&mut self, extension: E) {
        debug!("Registered extension {}", extension.name());
        self.extensions.push(Box::new(extension));
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Fire `playbook_built` on every extension in registration order and
    /// return the committed playbook. The first failing extension aborts.
    pub fn build(&self, playbook: Playbook) -> Result<Playbook> {
        let mut ctx = BuildContext::new(playbook);

        for extension in &self.extensions {
            debug!("playbook_built -> {}", extension.name());
            extension
                .playbook_built(&mut ctx)
                .with_context(|| format!("Extension {} failed", extension.name()))?;
        }

        info!(
            "Playbook built: {} extension(s), {} update(s)",
            self.extensions.len(),
            ctx.updates()
        );
        Ok(ctx.into_playbook())
    }
}
