//! Lifecycle hooks called by the generator.
//!
//! Hooks are registered on a [`HookRegistry`] value owned by whoever drives
//! the build; nothing is stored globally.

use lol_html::errors::RewritingError;
use thiserror::Error;

use crate::generator::Generator;

/// Errors a hook may report. They are logged, never fatal to the build.
#[derive(Debug, Error)]
pub enum HookError {
    /// HTML of a content item could not be rewritten.
    #[error("Cannot rewrite HTML of {item}: {source}")]
    Rewrite {
        /// Display form of the item
        item: String,
        /// Underlying rewriter error
        #[source]
        source: RewritingError,
    },
}

/// A plugin reacting to generator lifecycle events.
pub trait ContentHook {
    /// Name used in logs.
    fn name(&self) -> &str;

    /// Called once every generator has produced its content.
    fn all_generators_finalized(&self, generators: &mut [Generator]) -> Result<(), HookError>;
}

/// Ordered collection of hooks.
#[derive(Default)]
pub struct HookRegistry {
    hooks: Vec<Box<dyn ContentHook>>,
}

impl HookRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a hook; hooks run in registration order.
    pub fn register<H: ContentHook + 'static>(&mut self, hook: H) {
        log::debug!("Registering content hook '{}'", hook.name());
        self.hooks.push(Box::new(hook));
    }

    /// Number of registered hooks.
    pub fn len(&self) -> usize {
        self.hooks.len()
    }

    /// Returns true if no hook is registered.
    pub fn is_empty(&self) -> bool {
        self.hooks.is_empty()
    }

    /// Names of registered hooks, in order.
    pub fn names(&self) -> Vec<&str> {
        self.hooks.iter().map(|hook| hook.name()).collect()
    }

    /// Runs every hook. A failing hook is logged and skipped.
    ///
    /// Returns the number of hooks that failed.
    pub fn all_generators_finalized(&self, generators: &mut [Generator]) -> usize {
        let mut failures = 0usize;
        for hook in &self.hooks {
            if let Err(err) = hook.all_generators_finalized(generators) {
                log::error!("Plugin '{}' failed to execute: {}", hook.name(), err);
                failures += 1;
            }
        }
        failures
    }
}

impl std::fmt::Debug for HookRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HookRegistry")
            .field("hooks", &self.names())
            .finish()
    }
}
