//! Wiring of the configured plugin list into tag and hook registries.

use carnet_core::{CarnetError, FigureTag, ImgTag, TagRegistry};

use crate::config::SiteConfig;
use crate::content::{ContentItem, ContentKind};
use crate::generator::Generator;
use crate::hooks::HookRegistry;
use crate::representative_image::RepresentativeImage;

/// Plugin names handled by this crate.
pub const PROVIDED_PLUGINS: &[&str] = &[
    "liquid_tags.figure",
    "liquid_tags.img",
    "representative_image",
];

/// Tags and hooks enabled by the site settings.
#[derive(Debug, Default)]
pub struct Plugins {
    /// Liquid tags available while reading content.
    pub tags: TagRegistry,
    /// Hooks run after every generator has finished.
    pub hooks: HookRegistry,
    /// Enabled plugins this crate does not provide.
    pub delegated: Vec<String>,
}

impl Plugins {
    /// Builds registries from `config.plugins`, in list order.
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut plugins = Self::default();
        for name in &config.plugins {
            match name.as_str() {
                "liquid_tags.figure" => plugins.tags.register(FigureTag),
                "liquid_tags.img" => plugins.tags.register(ImgTag),
                "representative_image" => plugins.hooks.register(RepresentativeImage),
                other => {
                    log::debug!("Plugin '{}' is handled by the site generator", other);
                    plugins.delegated.push(other.to_string());
                }
            }
        }
        plugins
    }

    /// Reads one Markdown source with the enabled tags.
    pub fn read(&self, kind: ContentKind, source: &str) -> Result<ContentItem, CarnetError> {
        ContentItem::from_source(kind, source, &self.tags)
    }

    /// Runs the enabled hooks over finalized generators.
    ///
    /// Returns the number of hooks that failed; failures are logged.
    pub fn all_generators_finalized(&self, generators: &mut [Generator]) -> usize {
        self.hooks.all_generators_finalized(generators)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(plugins: &[&str]) -> SiteConfig {
        SiteConfig {
            sitename: "Carnet".to_string(),
            plugins: plugins.iter().map(|p| p.to_string()).collect(),
            ..SiteConfig::default()
        }
    }

    #[test]
    fn builds_registries_from_plugin_list() {
        let plugins = Plugins::from_config(&config(&[
            "liquid_tags.img",
            "liquid_tags.figure",
            "representative_image",
            "i18n_subsites",
            "tipue_search",
        ]));
        assert_eq!(plugins.tags.names(), vec!["figure", "img"]);
        assert_eq!(plugins.hooks.names(), vec!["representative_image"]);
        assert_eq!(plugins.delegated, vec!["i18n_subsites", "tipue_search"]);
    }

    #[test]
    fn disabled_tags_are_left_in_content() {
        let plugins = Plugins::from_config(&config(&["liquid_tags.img"]));
        let item = plugins
            .read(ContentKind::Article, "{% figure /a.png %}\n")
            .unwrap();
        assert!(item.content().contains("{% figure /a.png %}"));
    }

    #[test]
    fn provided_plugins_are_all_recognized() {
        let plugins = Plugins::from_config(&config(PROVIDED_PLUGINS));
        assert!(plugins.delegated.is_empty());
    }
}
