//! HTML parsing for article fields.
//!
//! Each field is looked up in a fixed order of sources and the first
//! non-empty value wins:
//!
//! | Field | Sources, in order |
//! |-------|-------------------|
//! | title | `og:title`, first `<h1>`, `<title>` |
//! | author | meta `author`, `article:author`, JSON-LD `author`, `[rel=author]`, `[itemprop=author]` |
//! | date | `article:published_time`, meta `pubdate`/`publishdate`/`date`/`dc.date`, `[itemprop=datePublished]`, JSON-LD `datePublished`, `time[datetime]` |
//! | body | paragraphs of `article`, `[itemprop=articleBody]`, `main`, `[role=main]`, then `body` |
//! | hints | meta `keywords`, `news_keywords`, `article:tag` |
//!
//! Anything not found is reported as [`NOT_FOUND`].

use crate::models::{ArticleRecord, NOT_FOUND};
use itertools::Itertools;
use scraper::{ElementRef, Html, Selector};
use serde_json::Value;

/// Minimum paragraph text a specific container needs before it is trusted
/// over the whole `<body>`.
const MIN_CONTAINER_CHARS: usize = 140;

const CONTAINERS: &[&str] = &[
    "article",
    "[itemprop=articleBody]",
    "main",
    "[role=main]",
];

/// Paragraphs below these elements are page chrome, not article text.
const CHROME_TAGS: &[&str] = &["nav", "header", "footer", "aside", "form", "figcaption"];

/// Parse a full HTML document into an [`ArticleRecord`].
pub fn parse_article(html: &str) -> ArticleRecord {
    let document = Html::parse_document(html);
    let json_ld = json_ld_objects(&document);

    let title = meta_content(&document, &[r#"meta[property="og:title"]"#])
        .or_else(|| first_text(&document, &["h1", "title"]));

    let author = meta_content(
        &document,
        &[r#"meta[name="author"]"#, r#"meta[property="article:author"]"#],
    )
    .or_else(|| json_ld.iter().find_map(|obj| obj.get("author").and_then(author_name)))
    .or_else(|| first_text(&document, &[r#"[rel="author"]"#, r#"[itemprop="author"]"#]));

    let date = meta_content(
        &document,
        &[
            r#"meta[property="article:published_time"]"#,
            r#"meta[name="pubdate"]"#,
            r#"meta[name="publishdate"]"#,
            r#"meta[name="date"]"#,
            r#"meta[name="dc.date"]"#,
            r#"meta[itemprop="datePublished"]"#,
        ],
    )
    .or_else(|| {
        json_ld
            .iter()
            .find_map(|obj| obj.get("datePublished").and_then(Value::as_str))
            .map(clean_ws)
            .filter(|s| !s.is_empty())
    })
    .or_else(|| first_attr(&document, "time[datetime]", "datetime"));

    ArticleRecord {
        title: title.unwrap_or_else(|| NOT_FOUND.to_string()),
        author: author.unwrap_or_else(|| NOT_FOUND.to_string()),
        date: date.unwrap_or_else(|| NOT_FOUND.to_string()),
        body: main_text(&document).unwrap_or_else(|| NOT_FOUND.to_string()),
        keyword_hints: keyword_hints(&document),
    }
}

fn clean_ws(s: &str) -> String {
    s.split_whitespace().join(" ")
}

fn element_text(el: ElementRef<'_>) -> String {
    clean_ws(&el.text().collect::<String>())
}

/// First non-empty `content` attribute among `selectors`.
fn meta_content(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors
        .iter()
        .find_map(|sel| first_attr(document, sel, "content"))
}

fn first_attr(document: &Html, selector: &str, attr: &str) -> Option<String> {
    let selector = Selector::parse(selector).ok()?;
    document
        .select(&selector)
        .filter_map(|el| el.value().attr(attr))
        .map(clean_ws)
        .find(|s| !s.is_empty())
}

fn first_text(document: &Html, selectors: &[&str]) -> Option<String> {
    selectors.iter().find_map(|sel| {
        let selector = Selector::parse(sel).ok()?;
        document
            .select(&selector)
            .map(element_text)
            .find(|s| !s.is_empty())
    })
}

/// All JSON-LD objects in the page, with `@graph` members flattened in.
fn json_ld_objects(document: &Html) -> Vec<Value> {
    let Ok(selector) = Selector::parse(r#"script[type="application/ld+json"]"#) else {
        return Vec::new();
    };

    let mut objects = Vec::new();
    let mut pending: Vec<Value> = document
        .select(&selector)
        .filter_map(|el| serde_json::from_str(&el.text().collect::<String>()).ok())
        .collect();
    pending.reverse();

    while let Some(value) = pending.pop() {
        match value {
            Value::Array(items) => pending.extend(items.into_iter().rev()),
            Value::Object(mut map) => {
                if let Some(graph) = map.remove("@graph") {
                    pending.push(graph);
                }
                objects.push(Value::Object(map));
            }
            _ => {}
        }
    }
    objects
}

/// Resolve a JSON-LD `author` value: a name, a `Person` object, or a list of either.
fn author_name(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(clean_ws(s)).filter(|s| !s.is_empty()),
        Value::Object(map) => map.get("name").and_then(author_name),
        Value::Array(items) => items.iter().find_map(author_name),
        _ => None,
    }
}

fn in_chrome(el: ElementRef<'_>) -> bool {
    el.ancestors()
        .filter_map(ElementRef::wrap)
        .any(|a| CHROME_TAGS.contains(&a.value().name()))
}

/// Paragraph texts below `root`, chrome excluded.
fn paragraphs(root: ElementRef<'_>) -> Vec<String> {
    let selector = Selector::parse("p").unwrap();
    root.select(&selector)
        .filter(|p| !in_chrome(*p))
        .map(element_text)
        .filter(|t| !t.is_empty())
        .collect()
}

fn text_len(paragraphs: &[String]) -> usize {
    paragraphs.iter().map(String::len).sum()
}

/// Main article text, paragraphs joined by blank lines.
fn main_text(document: &Html) -> Option<String> {
    for container in CONTAINERS {
        let selector = Selector::parse(container).ok()?;
        let best = document
            .select(&selector)
            .map(paragraphs)
            .max_by_key(|ps| text_len(ps));
        if let Some(ps) = best.filter(|ps| text_len(ps) >= MIN_CONTAINER_CHARS) {
            return Some(ps.join("\n\n"));
        }
    }

    let body = Selector::parse("body").ok()?;
    document
        .select(&body)
        .next()
        .map(paragraphs)
        .filter(|ps| !ps.is_empty())
        .map(|ps| ps.join("\n\n"))
}

/// Keywords the page declares in its metadata.
fn keyword_hints(document: &Html) -> Vec<String> {
    let sources = [
        r#"meta[name="keywords"]"#,
        r#"meta[name="news_keywords"]"#,
        r#"meta[property="article:tag"]"#,
    ];
    sources
        .iter()
        .filter_map(|sel| Selector::parse(sel).ok())
        .flat_map(|selector| {
            document
                .select(&selector)
                .filter_map(|el| el.value().attr("content"))
                .flat_map(|content| content.split(','))
                .map(clean_ws)
                .collect::<Vec<_>>()
        })
        .filter(|k| !k.is_empty())
        .unique()
        .collect()
}
