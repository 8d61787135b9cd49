#![deny(missing_docs)]
//! carnet site: settings, content items, generator hooks and the
//! representative-image plugin.

/// Site settings.
pub mod config;
/// Content items.
pub mod content;
/// Finalized generator outputs.
pub mod generator;
/// Lifecycle hooks.
pub mod hooks;
/// Plugin wiring from settings.
pub mod plugins;
/// Representative image extraction.
pub mod representative_image;

pub use config::{ConfigError, FeedSettings, I18nSettings, Link, MenuItem, MenuSettings, SiteConfig};
pub use content::{ContentItem, ContentKind};
pub use generator::{ArticlesGenerator, Generator, PagesGenerator, StaticGenerator};
pub use hooks::{ContentHook, HookError, HookRegistry};
pub use plugins::{PROVIDED_PLUGINS, Plugins};
pub use representative_image::{RepresentativeImage, extract_representative_image};
