use scraper::{ElementRef, Html, Selector};

/// Tags whose text is collected as article content.
const BLOCK_TAGS: [&str; 10] = [
    "h1", "h2", "h3", "h4", "h5", "h6", "p", "li", "blockquote", "pre",
];

/// Tags that only ever hold boilerplate or machinery.
const SKIP_TAGS: [&str; 7] = [
    "script", "style", "template", "noscript", "svg", "nav", "footer",
];

struct RootSelectors {
    article: Selector,
    main: Selector,
    body: Selector,
}

impl RootSelectors {
    fn new() -> Self {
        Self {
            article: Selector::parse("article").expect("article selector"),
            main: Selector::parse("main").expect("main selector"),
            body: Selector::parse("body").expect("body selector"),
        }
    }

    fn pick_root<'a>(&self, document: &'a Html) -> ElementRef<'a> {
        document
            .select(&self.article)
            .next()
            .or_else(|| document.select(&self.main).next())
            .or_else(|| document.select(&self.body).next())
            .unwrap_or_else(|| document.root_element())
    }
}

/// Extracts readable article text from an HTML page.
///
/// Prefers an `article` element as the content root, then `main`, then
/// `body`. Text is collected from block-level elements, boilerplate tags
/// are skipped, and blocks are joined with blank lines. Returns an empty
/// string when the page has no readable text.
pub fn extract_article_text(html: &str) -> String {
    let document = Html::parse_document(html);
    let selectors = RootSelectors::new();
    let root = selectors.pick_root(&document);

    let mut blocks: Vec<String> = Vec::new();
    collect_blocks(root, &mut blocks);
    blocks.join("\n\n")
}

fn collect_blocks(element: ElementRef<'_>, blocks: &mut Vec<String>) {
    let tag = element.value().name();
    if SKIP_TAGS.contains(&tag) {
        return;
    }

    if BLOCK_TAGS.contains(&tag) {
        let text = normalize_whitespace(&element.text().collect::<Vec<_>>().join(" "));
        if !text.is_empty() {
            blocks.push(text);
        }
        return;
    }

    for child in element.child_elements() {
        collect_blocks(child, blocks);
    }
}

fn normalize_whitespace(text: &str) -> String {
    text.split_whitespace().collect::<Vec<_>>().join(" ")
}
