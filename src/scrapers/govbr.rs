//! gov.br news search: URL construction and result-page extraction.
//!
//! The search page at `https://www.gov.br/pt-br/noticias` renders its results
//! client side. Once rendered, each hit is an `<article class="tileItem">`
//! holding an `<h2>` headline, one or more links and an optional
//! `<p class="description">` summary.
//!
//! Field lookups are independent and total: a container missing its headline
//! still yields its link and description, with the placeholder standing in
//! for the title. Every container therefore produces exactly one record.

use crate::models::ArticleRecord;
use crate::utils::element_text;
use chrono::Local;
use scraper::{ElementRef, Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument};
use url::Url;

/// Query parameter the portal uses for full-text search.
pub const SEARCH_PARAM: &str = "SearchableText";

/// Title used when a container has no headline.
pub const PLACEHOLDER_TITLE: &str = "Sem título";

const CONTAINER_SELECTOR: &str = "article.tileItem";
const TITLE_SELECTOR: &str = "h2";
const LINK_SELECTOR: &str = "a[href]";
const DESCRIPTION_SELECTOR: &str = "p.description";

/// Build the search URL for `term` on top of the `base` search endpoint.
///
/// Existing query pairs on `base` are preserved.
pub fn search_url(base: &str, term: &str) -> Result<Url, Box<dyn Error>> {
    let mut url = Url::parse(base)?;
    url.query_pairs_mut().append_pair(SEARCH_PARAM, term);
    Ok(url)
}

/// Pulls [`ArticleRecord`]s out of rendered search-result markup.
#[derive(Debug)]
pub struct GovBrExtractor {
    /// Portal origin without a trailing slash.
    origin: String,
    container: Selector,
    title: Selector,
    link: Selector,
    description: Selector,
}

impl GovBrExtractor {
    /// Create an extractor resolving relative links against `origin`
    /// (e.g. `https://www.gov.br`).
    pub fn new(origin: &str) -> Result<Self, Box<dyn Error>> {
        let origin = Url::parse(origin)?;
        Ok(Self {
            origin: origin.as_str().trim_end_matches('/').to_string(),
            container: Selector::parse(CONTAINER_SELECTOR)?,
            title: Selector::parse(TITLE_SELECTOR)?,
            link: Selector::parse(LINK_SELECTOR)?,
            description: Selector::parse(DESCRIPTION_SELECTOR)?,
        })
    }

    /// Link used when a container has no usable hyperlink: the portal root.
    pub fn placeholder_link(&self) -> String {
        format!("{}/", self.origin)
    }

    /// Extract every article container in `html`, in document order.
    ///
    /// One record per container; missing fields take their fallback values.
    #[instrument(level = "info", skip_all, fields(bytes = html.len()))]
    pub fn extract(&self, html: &str) -> Vec<ArticleRecord> {
        let document = Html::parse_document(html);
        let records: Vec<ArticleRecord> = document
            .select(&self.container)
            .enumerate()
            .map(|(index, container)| {
                let record = self.extract_one(container);
                debug!(index, title = %record.title, link = %record.link, "Extracted article");
                record
            })
            .collect();

        info!(count = records.len(), "Extracted articles");
        records
    }

    fn extract_one(&self, container: ElementRef<'_>) -> ArticleRecord {
        let title = self
            .first_text(container, &self.title)
            .unwrap_or_else(|| PLACEHOLDER_TITLE.to_string());

        let link = match self.first_href(container) {
            Some(href) => self.resolve_link(href),
            None => self.placeholder_link(),
        };

        let description = self
            .first_text(container, &self.description)
            .unwrap_or_default();

        ArticleRecord {
            title,
            link,
            description,
            collected_at: Local::now(),
        }
    }

    fn first_text(&self, container: ElementRef<'_>, selector: &Selector) -> Option<String> {
        container.select(selector).next().map(element_text)
    }

    fn first_href<'a>(&self, container: ElementRef<'a>) -> Option<&'a str> {
        container
            .select(&self.link)
            .filter_map(|a| a.value().attr("href"))
            .map(str::trim)
            .find(|href| !href.is_empty())
    }

    /// Hrefs with a scheme are kept verbatim, whether or not they are valid
    /// URLs. Anything else is appended to the origin as is, with a `/` in
    /// between unless the href already starts with `/`, `?` or `#`.
    pub fn resolve_link(&self, href: &str) -> String {
        if has_scheme(href) {
            href.to_string()
        } else if href.starts_with(['/', '?', '#']) {
            format!("{}{}", self.origin, href)
        } else {
            format!("{}/{}", self.origin, href)
        }
    }
}

/// Whether `href` begins with an RFC 3986 scheme followed by `:`.
fn has_scheme(href: &str) -> bool {
    let Some((scheme, _)) = href.split_once(':') else {
        return false;
    };
    let mut chars = scheme.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ORIGIN: &str = "https://www.gov.br";

    fn extractor() -> GovBrExtractor {
        GovBrExtractor::new(ORIGIN).unwrap()
    }

    fn page(body: &str) -> String {
        format!("<html><head><title>Busca</title></head><body><div id='content'>{body}</div></body></html>")
    }

    #[test]
    fn test_search_url() {
        let url = search_url("https://www.gov.br/pt-br/noticias", "CEBAS").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.gov.br/pt-br/noticias?SearchableText=CEBAS"
        );
    }

    #[test]
    fn test_search_url_encodes_term() {
        let url = search_url("https://www.gov.br/pt-br/noticias", "assistência social").unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.gov.br/pt-br/noticias?SearchableText=assist%C3%AAncia+social"
        );
    }

    #[test]
    fn test_search_url_rejects_relative_base() {
        assert!(search_url("/pt-br/noticias", "CEBAS").is_err());
    }

    #[test]
    fn test_no_containers_yields_nothing() {
        let html = page("<p>Nenhum resultado</p><article class='other'><h2>x</h2></article>");
        assert!(extractor().extract(&html).is_empty());
    }

    #[test]
    fn test_two_container_scenario() {
        let html = page(
            r#"
            <article class="tileItem">
              <h2 class="tileHeadline"><a href="/noticias/123">CEBAS 2024</a></h2>
              <p class="description">Resumo A</p>
            </article>
            <article class="tileItem">
              <span><a href="https://exemplo.com/x">Leia</a></span>
            </article>
            "#,
        );
        let records = extractor().extract(&html);

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].title, "CEBAS 2024");
        assert_eq!(records[0].link, "https://www.gov.br/noticias/123");
        assert_eq!(records[0].description, "Resumo A");

        assert_eq!(records[1].title, PLACEHOLDER_TITLE);
        assert_eq!(records[1].link, "https://exemplo.com/x");
        assert_eq!(records[1].description, "");
    }

    #[test]
    fn test_missing_title_keeps_other_fields() {
        let html = page(
            r#"<article class="tileItem">
                 <a href="/pt-br/noticias/abc">ver</a>
                 <p class="description">  Texto  do resumo </p>
               </article>"#,
        );
        let records = extractor().extract(&html);

        assert_eq!(records[0].title, PLACEHOLDER_TITLE);
        assert_eq!(records[0].link, "https://www.gov.br/pt-br/noticias/abc");
        assert_eq!(records[0].description, "Texto  do resumo");
    }

    #[test]
    fn test_missing_link_uses_portal_root() {
        let html = page(r#"<article class="tileItem"><h2>Sem link</h2><a>x</a><a href="  ">y</a></article>"#);
        let records = extractor().extract(&html);
        assert_eq!(records[0].link, "https://www.gov.br/");
    }

    #[test]
    fn test_first_non_empty_href_wins() {
        let html = page(
            r#"<article class="tileItem"><a href="">vazio</a><a href="/a">a</a><a href="/b">b</a></article>"#,
        );
        let records = extractor().extract(&html);
        assert_eq!(records[0].link, "https://www.gov.br/a");
    }

    #[test]
    fn test_description_requires_marker_class() {
        let html = page(r#"<article class="tileItem"><h2>T</h2><p>sem classe</p></article>"#);
        let records = extractor().extract(&html);
        assert_eq!(records[0].description, "");
    }

    #[test]
    fn test_relative_links_are_prefixed_with_origin() {
        let e = extractor();
        for href in [
            "/noticias/123",
            "/pt-br/assuntos/x?y=1",
            "/",
            "//cdn.gov.br/x",
            "/../../x",
            "?q=1",
            "#topo",
        ] {
            assert_eq!(e.resolve_link(href), format!("{ORIGIN}{href}"));
        }
    }

    #[test]
    fn test_bare_relative_links_get_a_separator() {
        let e = extractor();
        assert_eq!(e.resolve_link("../x"), "https://www.gov.br/../x");
        assert_eq!(e.resolve_link("noticias/1"), "https://www.gov.br/noticias/1");
    }

    #[test]
    fn test_links_with_scheme_are_kept_verbatim() {
        let e = extractor();
        for href in [
            "http://exemplo.com/Path",
            "https://www.gov.br:99999/x",
            "http://",
            "https://exa mple.com/a",
            "http://[broken",
            "mailto:imprensa@gov.br",
        ] {
            assert_eq!(e.resolve_link(href), href);
        }
    }

    #[test]
    fn test_malformed_absolute_link_keeps_record() {
        let html = page(
            r#"<article class="tileItem"><h2>Um</h2><a href="/um">1</a></article>
               <article class="tileItem">
                 <h2>Noticia valida</h2>
                 <a href="https://www.gov.br:99999/x">2</a>
                 <p class="description">Resumo</p>
               </article>
               <article class="tileItem"><h2>Tres</h2><a href="/tres">3</a></article>"#,
        );
        let records = extractor().extract(&html);

        assert_eq!(records.len(), 3);
        assert_eq!(records[1].title, "Noticia valida");
        assert_eq!(records[1].link, "https://www.gov.br:99999/x");
        assert_eq!(records[1].description, "Resumo");
    }

    #[test]
    fn test_origin_trailing_slash_is_ignored() {
        let e = GovBrExtractor::new("https://www.gov.br/").unwrap();
        assert_eq!(e.resolve_link("/a"), "https://www.gov.br/a");
        assert_eq!(e.placeholder_link(), "https://www.gov.br/");
    }

    #[test]
    fn test_document_order_preserved() {
        let body: String = (1..=5)
            .map(|i| format!(r#"<article class="tileItem"><h2>Noticia {i}</h2></article>"#))
            .collect();
        let records = extractor().extract(&page(&body));
        let titles: Vec<_> = records.iter().map(|r| r.title.clone()).collect();
        assert_eq!(
            titles,
            (1..=5).map(|i| format!("Noticia {i}")).collect::<Vec<_>>()
        );
    }

    #[test]
    fn test_extraction_is_idempotent() {
        let html = page(
            r#"<article class="tileItem"><h2>A</h2><a href="/a">a</a><p class="description">d</p></article>
               <article class="tileItem"><a href="https://exemplo.com/b">b</a></article>"#,
        );
        let e = extractor();
        let first = e.extract(&html);
        let second = e.extract(&html);

        assert_eq!(first.len(), second.len());
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(
                (&a.title, &a.link, &a.description),
                (&b.title, &b.link, &b.description)
            );
        }
    }
}
