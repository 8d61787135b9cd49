//! Picks one representative image per article and strips images from summaries.
//!
//! Priority: `metadata.image`, then the first image of the summary, then the
//! first image of the body. Summary images are always removed so listings
//! never show them inline; the body is only read.
//!
//! `<noscript>` content reaches the rewriter as raw text, so it is buffered and
//! run through the same pass as markup.

use std::cell::{Cell, RefCell};

use lol_html::errors::RewritingError;
use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str, text};

use crate::content::ContentItem;
use crate::generator::Generator;
use crate::hooks::{ContentHook, HookError};

/// Hook running [`extract_representative_image`] on every article.
#[derive(Debug, Clone, Copy, Default)]
pub struct RepresentativeImage;

impl ContentHook for RepresentativeImage {
    fn name(&self) -> &str {
        "representative_image"
    }

    fn all_generators_finalized(&self, generators: &mut [Generator]) -> Result<(), HookError> {
        visit_articles(generators, extract_representative_image);
        Ok(())
    }
}

/// Calls `visit` on every article of every articles generator.
///
/// A failing item is logged and skipped. Returns the number of skipped items.
fn visit_articles<F>(generators: &mut [Generator], mut visit: F) -> usize
where
    F: FnMut(&mut ContentItem) -> Result<(), HookError>,
{
    let mut skipped = 0usize;
    for generator in generators.iter_mut() {
        let Some(articles) = generator.articles_mut() else {
            continue;
        };
        for article in articles.iter_mut() {
            if let Err(err) = visit(article) {
                log::warn!("[representative image] skipping {}: {}", article, err);
                skipped += 1;
            }
        }
    }
    skipped
}

/// Sets `featured_image` on an article, draft or page and strips `<img>`
/// elements from its summary. Other kinds are left untouched.
pub fn extract_representative_image(item: &mut ContentItem) -> Result<(), HookError> {
    log::debug!("[representative image] running for {}", item);
    if !item.kind().is_article_like() {
        return Ok(());
    }

    let mut selected = item
        .metadata_str("image")
        .filter(|image| !image.is_empty())
        .map(str::to_owned);

    let summary = strip_images(item.summary()).map_err(|err| rewrite_failed(item, err))?;
    if selected.is_none() {
        selected = summary.first_src;
    }
    if summary.removed > 0 {
        item.set_summary(summary.html);
    }

    if selected.is_none() {
        selected = first_image_src(item.content()).map_err(|err| rewrite_failed(item, err))?;
    }

    log::debug!("[representative image] setting {:?}", selected);
    item.featured_image = selected;
    Ok(())
}

fn rewrite_failed(item: &ContentItem, source: RewritingError) -> HookError {
    HookError::Rewrite {
        item: item.to_string(),
        source,
    }
}

/// Attribute values come back entity-encoded; `a&amp;b.png` is `a&b.png`.
fn decoded_src(src: String) -> Option<String> {
    let src = html_escape::decode_html_entities(&src).into_owned();
    (!src.is_empty()).then_some(src)
}

struct StrippedHtml {
    html: String,
    removed: usize,
    first_src: Option<String>,
}

/// Removes every `<img>` from `html`, remembering the first non-empty `src`.
fn strip_images(html: &str) -> Result<StrippedHtml, RewritingError> {
    let removed = Cell::new(0usize);
    let first_src: RefCell<Option<String>> = RefCell::new(None);
    let noscript = RefCell::new(String::new());

    let html = rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("img", |el| {
                    let mut first_src = first_src.borrow_mut();
                    if first_src.is_none() {
                        *first_src = el.get_attribute("src").and_then(decoded_src);
                    }
                    el.remove();
                    removed.set(removed.get() + 1);
                    Ok(())
                }),
                text!("noscript", |chunk| {
                    let mut buffer = noscript.borrow_mut();
                    buffer.push_str(chunk.as_str());
                    if !chunk.last_in_text_node() {
                        chunk.remove();
                        return Ok(());
                    }
                    let inner = strip_images(&buffer)?;
                    buffer.clear();
                    let mut first_src = first_src.borrow_mut();
                    if first_src.is_none() {
                        *first_src = inner.first_src;
                    }
                    removed.set(removed.get() + inner.removed);
                    chunk.replace(&inner.html, ContentType::Html);
                    Ok(())
                }),
            ],
            strict: false,
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(StrippedHtml {
        html,
        removed: removed.get(),
        first_src: first_src.into_inner(),
    })
}

/// First non-empty `<img src>` of `html`, in document order.
fn first_image_src(html: &str) -> Result<Option<String>, RewritingError> {
    let first_src: RefCell<Option<String>> = RefCell::new(None);
    let noscript = RefCell::new(String::new());

    rewrite_str(
        html,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("img[src]", |el| {
                    let mut first_src = first_src.borrow_mut();
                    if first_src.is_none() {
                        *first_src = el.get_attribute("src").and_then(decoded_src);
                    }
                    Ok(())
                }),
                text!("noscript", |chunk| {
                    let mut buffer = noscript.borrow_mut();
                    buffer.push_str(chunk.as_str());
                    if !chunk.last_in_text_node() {
                        return Ok(());
                    }
                    let mut first_src = first_src.borrow_mut();
                    if first_src.is_none() {
                        *first_src = first_image_src(&buffer)?;
                    }
                    buffer.clear();
                    Ok(())
                }),
            ],
            strict: false,
            ..RewriteStrSettings::new()
        },
    )?;

    Ok(first_src.into_inner())
}
