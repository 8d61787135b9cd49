//! Site settings read once at startup and handed to the generator.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors raised while loading or validating site settings.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Settings file could not be read.
    #[error("Cannot read settings file {path}: {source}")]
    Io {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },
    /// Settings are not valid YAML for [`SiteConfig`].
    #[error("Settings parse error: {0}")]
    Parse(#[from] serde_yaml::Error),
    /// A setting has an unusable value.
    #[error("Invalid setting '{field}': {message}")]
    Invalid {
        /// Offending key
        field: &'static str,
        /// What is wrong with it
        message: String,
    },
}

impl ConfigError {
    fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        Self::Invalid {
            field,
            message: message.into(),
        }
    }
}

/// Declarative settings of the blog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Author shown on every article.
    pub author: String,
    /// Site title.
    pub sitename: String,
    /// Public base URL; empty while developing.
    pub siteurl: String,
    /// Content root.
    pub path: PathBuf,
    /// Page directories, relative to `path`.
    pub page_paths: Vec<PathBuf>,
    /// IANA timezone of article dates.
    pub timezone: String,
    /// Default content language.
    pub default_lang: String,
    /// Feed outputs; all disabled unless set.
    pub feeds: FeedSettings,
    /// Blogroll.
    pub links: Vec<Link>,
    /// Articles per index page; `None` disables pagination.
    pub default_pagination: Option<u32>,
    /// Emit document-relative URLs.
    pub relative_urls: bool,
    /// Theme directory.
    pub theme: PathBuf,
    /// Translation catalog settings of the theme.
    pub i18n: I18nSettings,
    /// strftime format of displayed dates.
    pub default_date_format: String,
    /// Locale used to format dates.
    pub locale: String,
    /// Logo path, served from `static_paths`.
    pub logo: Option<String>,
    /// Directories searched for plugins.
    pub plugin_paths: Vec<PathBuf>,
    /// Enabled plugins, in load order.
    pub plugins: Vec<String>,
    /// Extensions enabled in the template environment.
    pub template_extensions: Vec<String>,
    /// Directories copied verbatim to the output.
    pub static_paths: Vec<PathBuf>,
    /// Reuse the content cache between builds.
    pub load_content_cache: bool,
    /// Navigation settings.
    pub menu: MenuSettings,
    /// Templates rendered once per site (index, archives, ...).
    pub direct_templates: Vec<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            author: String::new(),
            sitename: String::new(),
            siteurl: String::new(),
            path: PathBuf::from("content"),
            page_paths: vec![PathBuf::from("pages")],
            timezone: "UTC".to_string(),
            default_lang: "en".to_string(),
            feeds: FeedSettings::default(),
            links: Vec::new(),
            default_pagination: None,
            relative_urls: false,
            theme: PathBuf::from("theme"),
            i18n: I18nSettings::default(),
            default_date_format: "%a %d %B %Y".to_string(),
            locale: String::new(),
            logo: None,
            plugin_paths: Vec::new(),
            plugins: Vec::new(),
            template_extensions: Vec::new(),
            static_paths: vec![PathBuf::from("images")],
            load_content_cache: false,
            menu: MenuSettings::default(),
            direct_templates: ["index", "tags", "categories", "authors", "archives"]
                .into_iter()
                .map(String::from)
                .collect(),
        }
    }
}

/// Feed outputs. `None` disables a feed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedSettings {
    /// Atom feed of every article.
    pub all_atom: Option<String>,
    /// Per-category Atom feeds.
    pub category_atom: Option<String>,
    /// Per-translation Atom feeds.
    pub translation_atom: Option<String>,
    /// Per-author Atom feeds.
    pub author_atom: Option<String>,
    /// Per-author RSS feeds.
    pub author_rss: Option<String>,
}

/// A blogroll entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Link {
    /// Displayed name.
    pub title: String,
    /// Target URL.
    pub url: String,
}

/// gettext catalog settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct I18nSettings {
    /// Directory of compiled catalogs.
    pub gettext_localedir: PathBuf,
    /// Catalog domain.
    pub gettext_domain: String,
    /// Use new-style gettext placeholders.
    pub gettext_newstyle: bool,
    /// Language of the theme templates.
    pub templates_lang: Option<String>,
}

impl Default for I18nSettings {
    fn default() -> Self {
        Self {
            gettext_localedir: PathBuf::from("theme/locale"),
            gettext_domain: "messages".to_string(),
            gettext_newstyle: false,
            templates_lang: None,
        }
    }
}

/// Navigation menu settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MenuSettings {
    /// List pages in the menu.
    pub display_pages: bool,
    /// List pages on the home page.
    pub display_pages_on_home: bool,
    /// List categories in the menu.
    pub display_categories: bool,
    /// List tags in the menu.
    pub display_tags: bool,
    /// Extra menu entries.
    pub items: Vec<MenuItem>,
}

impl Default for MenuSettings {
    fn default() -> Self {
        Self {
            display_pages: true,
            display_pages_on_home: false,
            display_categories: true,
            display_tags: false,
            items: Vec::new(),
        }
    }
}

/// A menu entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuItem {
    /// Displayed label.
    pub title: String,
    /// Site-relative target.
    pub url: String,
}

impl SiteConfig {
    /// Parses and validates settings from YAML.
    pub fn from_yaml_str(input: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_yaml::from_str(input)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a settings file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let input = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_yaml_str(&input)
    }

    /// Checks values the generator cannot work with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.sitename.trim().is_empty() {
            return Err(ConfigError::invalid("sitename", "must not be empty"));
        }

        let mut seen = HashSet::new();
        for plugin in &self.plugins {
            if plugin.trim().is_empty() {
                return Err(ConfigError::invalid("plugins", "plugin names must not be empty"));
            }
            if !seen.insert(plugin.as_str()) {
                return Err(ConfigError::invalid(
                    "plugins",
                    format!("'{}' is listed twice", plugin),
                ));
            }
        }

        for item in &self.menu.items {
            if item.title.trim().is_empty() || item.url.trim().is_empty() {
                return Err(ConfigError::invalid(
                    "menu.items",
                    "entries need a title and a url",
                ));
            }
        }

        // tipue_search renders its results through the `search` template
        if self.has_plugin("tipue_search") && !self.direct_templates.iter().any(|t| t == "search")
        {
            return Err(ConfigError::invalid(
                "direct_templates",
                "'search' is required by the tipue_search plugin",
            ));
        }

        Ok(())
    }

    /// Returns true when `name` is in the plugin list.
    pub fn has_plugin(&self, name: &str) -> bool {
        self.plugins.iter().any(|p| p == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BLOG_SETTINGS: &str = include_str!("../../../config/site.yaml");

    #[test]
    fn shipped_settings_are_valid() {
        let config = SiteConfig::from_yaml_str(BLOG_SETTINGS).expect("site.yaml should load");
        assert_eq!(config.author, "Elida et Florian");
        assert_eq!(config.sitename, "Le blog voyage d'Elida et Florian");
        assert_eq!(config.timezone, "Europe/Paris");
        assert_eq!(config.default_lang, "fr");
        assert_eq!(config.default_pagination, None);
        assert_eq!(config.feeds, FeedSettings::default());
        assert!(config.has_plugin("representative_image"));
        assert!(config.has_plugin("liquid_tags.figure"));
        assert_eq!(config.menu.items.len(), 2);
        assert_eq!(config.menu.items[1].url, "feeds/all.atom.xml");
        assert!(config.direct_templates.iter().any(|t| t == "search"));
    }

    #[test]
    fn missing_keys_take_defaults() {
        let config = SiteConfig::from_yaml_str("sitename: Carnet\n").unwrap();
        assert_eq!(config.path, PathBuf::from("content"));
        assert!(config.plugins.is_empty());
        assert!(config.menu.display_pages);
    }

    #[test]
    fn empty_sitename_is_rejected() {
        let err = SiteConfig::from_yaml_str("author: x\n").unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "sitename", .. }));
    }

    #[test]
    fn duplicate_plugin_is_rejected() {
        let yaml = "sitename: Carnet\nplugins: [representative_image, representative_image]\n";
        let err = SiteConfig::from_yaml_str(yaml).unwrap_err();
        assert!(err.to_string().contains("listed twice"), "{err}");
    }

    #[test]
    fn search_template_required_by_tipue() {
        let yaml = "sitename: Carnet\nplugins: [tipue_search]\ndirect_templates: [index]\n";
        let err = SiteConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "direct_templates", .. }));
    }

    #[test]
    fn menu_items_need_url() {
        let yaml = "sitename: Carnet\nmenu:\n  items:\n    - title: Archive\n      url: ''\n";
        let err = SiteConfig::from_yaml_str(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "menu.items", .. }));
    }

    #[test]
    fn unknown_yaml_shape_is_a_parse_error() {
        let err = SiteConfig::from_yaml_str("plugins: 3\n").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn missing_file_reports_path() {
        let err = SiteConfig::from_path("does/not/exist.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("does/not/exist.yaml"));
    }
}
