//! HTML views.
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Every view shares [`base_document`], which shows the date of the most
//! recent article in the header.

use folio_articles::{ArticleContext, ArticleMeta, IndexContext, NotFoundContext};
use maud::{DOCTYPE, Markup, PreEscaped, html};

const SITE_TITLE: &str = "Folio";

const CSS: &str = "body{max-width:44rem;margin:0 auto;padding:1rem;font-family:Georgia,serif;line-height:1.6}\
                   header,footer{display:flex;justify-content:space-between;color:#666}\
                   ul.articles{list-style:none;padding:0}\
                   ul.articles li{display:flex;justify-content:space-between}\
                   nav.pager{display:flex;justify-content:space-between;margin-top:2rem}";

/// URL of an article page.
pub(crate) fn article_href(route: &str) -> String {
    format!("/article/{route}")
}

fn base_document(title: &str, last_published: Option<&str>, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang="en" {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                title { (title) }
                style { (PreEscaped(CSS)) }
            }
            body {
                header {
                    a href="/" { (SITE_TITLE) }
                    @if let Some(date) = last_published {
                        span.last-published { "Last published " (date) }
                    }
                }
                main { (content) }
            }
        }
    }
}

fn article_link(article: &ArticleMeta, rel: Option<&str>) -> Markup {
    html! {
        a href=(article_href(&article.route)) rel=[rel] { (article.title) }
    }
}

/// Render the index page.
pub(crate) fn index(ctx: &IndexContext) -> Markup {
    let content = html! {
        ul.articles {
            @for article in &ctx.articles {
                li {
                    (article_link(article, None))
                    span.date { (article.date) }
                }
            }
        }
    };
    base_document(SITE_TITLE, Some(ctx.last_published_date.as_str()), content)
}

/// Render an article page around its pre-rendered HTML body.
pub(crate) fn article(ctx: &ArticleContext, body_html: &str) -> Markup {
    let content = html! {
        article {
            h1 { (ctx.title) }
            p.date { (ctx.date) }
            (PreEscaped(body_html))
        }
        nav.pager {
            span.previous { "Previous: " (article_link(&ctx.previous, Some("prev"))) }
            span.next { "Next: " (article_link(&ctx.next, Some("next"))) }
        }
    };
    base_document(&ctx.title, Some(ctx.last_published_date.as_str()), content)
}

/// Render the not-found page.
pub(crate) fn not_found(ctx: &NotFoundContext) -> Markup {
    let content = html! {
        h1 { "Not found" }
        p { "There is nothing here. " a href="/" { "Back to the index" } "." }
    };
    base_document("Not found", ctx.last_published_date.as_deref(), content)
}
