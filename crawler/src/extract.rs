use lazy_static::lazy_static;
use scraper::{ElementRef, Html, Node, Selector};

lazy_static! {
    static ref TITLE: Selector = Selector::parse("title").expect("valid selector");
    static ref AUTHOR: Selector = Selector::parse(r#"meta[name="author"]"#).expect("valid selector");
    static ref BODY: Selector = Selector::parse("body").expect("valid selector");
}

/// Elements whose text is never part of the readable body.
const SKIPPED: &[&str] = &["script", "style", "noscript", "template"];

/// Metadata and readable text pulled out of a page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Extracted {
    pub title: String,
    pub author: String,
    pub text: String,
}

pub fn extract(markup: &str) -> Extracted {
    let doc = Html::parse_document(markup);
    let title = doc
        .select(&TITLE)
        .next()
        .map(|n| n.text().collect::<String>())
        .unwrap_or_default();
    let author = doc
        .select(&AUTHOR)
        .next()
        .and_then(|n| n.value().attr("content"))
        .unwrap_or_default();
    let text = doc.select(&BODY).next().map(body_text).unwrap_or_default();
    Extracted { title: title.trim().to_string(), author: author.trim().to_string(), text }
}

/// Whitespace-joined text of `body`, skipping scripts and styles.
fn body_text(body: ElementRef<'_>) -> String {
    let mut words: Vec<&str> = Vec::new();
    for node in body.descendants() {
        let Node::Text(text) = node.value() else { continue };
        let hidden = node
            .ancestors()
            .any(|a| matches!(a.value(), Node::Element(e) if SKIPPED.contains(&e.name())));
        if !hidden {
            words.extend(text.split_whitespace());
        }
    }
    words.join(" ")
}
