//! Finalized generator outputs passed to `all_generators_finalized` hooks.

use std::path::PathBuf;

use crate::content::ContentItem;

/// Output of the articles generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ArticlesGenerator {
    /// Published articles, in generator order.
    pub articles: Vec<ContentItem>,
    /// Drafts, in generator order.
    pub drafts: Vec<ContentItem>,
}

/// Output of the pages generator.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PagesGenerator {
    /// Listed pages.
    pub pages: Vec<ContentItem>,
    /// Pages excluded from menus.
    pub hidden_pages: Vec<ContentItem>,
}

/// Output of the static files generator.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticGenerator {
    /// Files copied verbatim.
    pub files: Vec<PathBuf>,
}

/// One finalized generator.
#[derive(Debug, Clone, PartialEq)]
pub enum Generator {
    /// Articles and drafts.
    Articles(ArticlesGenerator),
    /// Pages.
    Pages(PagesGenerator),
    /// Static files.
    Static(StaticGenerator),
}

impl Generator {
    /// Articles of an articles generator, `None` for other generators.
    pub fn articles_mut(&mut self) -> Option<&mut Vec<ContentItem>> {
        match self {
            Generator::Articles(generator) => Some(&mut generator.articles),
            _ => None,
        }
    }
}

impl From<ArticlesGenerator> for Generator {
    fn from(generator: ArticlesGenerator) -> Self {
        Generator::Articles(generator)
    }
}

impl From<PagesGenerator> for Generator {
    fn from(generator: PagesGenerator) -> Self {
        Generator::Pages(generator)
    }
}

impl From<StaticGenerator> for Generator {
    fn from(generator: StaticGenerator) -> Self {
        Generator::Static(generator)
    }
}
