use carnet_site::{
    ArticlesGenerator, ContentKind, Generator, PagesGenerator, Plugins, SiteConfig,
    StaticGenerator,
};
use once_cell::sync::Lazy;

static BLOG: Lazy<SiteConfig> = Lazy::new(|| {
    SiteConfig::from_yaml_str(include_str!("../../../config/site.yaml"))
        .expect("shipped settings should load")
});

const WITH_COVER: &str = "\
Title: Trois jours à Lisbonne
Image: /images/lisbonne/cover.jpg

{% figure left half /images/lisbonne/tram.jpg 640 480 Le tram 28 %}

On a pris le tram jusqu'au château.
";

const FIGURE_ONLY: &str = "\
Title: Porto

{% figure /images/porto/douro.jpg Le Douro %}

Les caves de Gaia.
";

const NO_IMAGE: &str = "\
---
title: Coimbra
summary: <p>L'université.</p>
---
Beaucoup de marches.
";

fn articles(generators: &[Generator]) -> &ArticlesGenerator {
    match &generators[0] {
        Generator::Articles(articles) => articles,
        other => panic!("expected articles generator, got {other:?}"),
    }
}

#[test]
fn blog_settings_enable_both_plugins() {
    let plugins = Plugins::from_config(&BLOG);
    assert_eq!(plugins.tags.names(), vec!["figure", "img"]);
    assert_eq!(plugins.hooks.names(), vec!["representative_image"]);
}

#[test]
fn featured_images_follow_priority() {
    let plugins = Plugins::from_config(&BLOG);
    let read = |source: &str| {
        plugins
            .read(ContentKind::Article, source)
            .expect("article should read")
    };

    let mut generators = vec![
        Generator::from(ArticlesGenerator {
            articles: vec![read(WITH_COVER), read(FIGURE_ONLY), read(NO_IMAGE)],
            drafts: Vec::new(),
        }),
        Generator::from(PagesGenerator::default()),
        Generator::from(StaticGenerator::default()),
    ];
    assert_eq!(plugins.all_generators_finalized(&mut generators), 0);

    let articles = &articles(&generators).articles;

    assert_eq!(articles[0].slug(), "trois-jours-à-lisbonne");
    assert_eq!(
        articles[0].featured_image.as_deref(),
        Some("/images/lisbonne/cover.jpg")
    );
    assert!(!articles[0].summary().contains("<img"));
    assert!(articles[0].summary().contains("<figcaption>Le tram 28</figcaption>"));
    assert!(articles[0].content().contains(
        r#"<img class="left half" src="/images/lisbonne/tram.jpg" width="640" height="480" alt="Le tram 28">"#
    ));

    assert_eq!(
        articles[1].featured_image.as_deref(),
        Some("/images/porto/douro.jpg")
    );
    insta::assert_snapshot!(
        articles[1].summary().lines().next().unwrap_or_default(),
        @"<figure><figcaption>Le Douro</figcaption></figure>"
    );

    assert_eq!(articles[2].featured_image, None);
    assert_eq!(articles[2].summary(), "<p>L'université.</p>");
}

#[test]
fn rerunning_hooks_changes_nothing() {
    let plugins = Plugins::from_config(&BLOG);
    let item = plugins
        .read(ContentKind::Article, FIGURE_ONLY)
        .expect("article should read");
    let mut generators = vec![Generator::from(ArticlesGenerator {
        articles: vec![item],
        drafts: Vec::new(),
    })];

    plugins.all_generators_finalized(&mut generators);
    let first = generators.clone();
    plugins.all_generators_finalized(&mut generators);

    assert_eq!(generators, first);
}
