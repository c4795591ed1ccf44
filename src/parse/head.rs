//! Head element extraction.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};

// CSS selector strings
const TITLE_SELECTOR_STR: &str = "head title";
const LINK_REL_SELECTOR_STR: &str = "head link[rel]";
const META_NAME_SELECTOR_STR: &str = "head meta[name]";

static TITLE_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_static_selector(TITLE_SELECTOR_STR));
static LINK_REL_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_static_selector(LINK_REL_SELECTOR_STR));
static META_NAME_SELECTOR: LazyLock<Selector> =
    LazyLock::new(|| parse_static_selector(META_NAME_SELECTOR_STR));

/// Parses a CSS selector that must succeed (compile-time constants only).
fn parse_static_selector(selector_str: &str) -> Selector {
    Selector::parse(selector_str).unwrap_or_else(|e| {
        panic!("Failed to parse static CSS selector '{selector_str}': {e}")
    })
}

/// Handle to a single head element.
///
/// `outer_html` is the raw HTML of the element, used as the metric context;
/// `value` is the `content` (meta) or `href` (link) attribute, empty when the
/// attribute is absent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct TagHandle {
    pub outer_html: String,
    pub value: String,
}

impl TagHandle {
    fn from_element(element: ElementRef<'_>, attr: &str) -> Self {
        Self {
            outer_html: element.html(),
            value: element.value().attr(attr).unwrap_or("").to_string(),
        }
    }
}

/// Handles to the head elements the pipeline validates.
///
/// Each handle is `None` or the first match in document order.
#[derive(Debug, Default)]
pub(crate) struct HeadTags {
    pub title: Option<String>,
    pub favicon: Option<TagHandle>,
    pub position: Option<TagHandle>,
    pub region: Option<TagHandle>,
    pub placename: Option<TagHandle>,
    pub icbm: Option<TagHandle>,
    pub dc_title: Option<TagHandle>,
}

/// Extracts the title, favicon link, and geo meta tags from an HTML document.
///
/// html5ever is error-recovering, so malformed markup still yields a document;
/// tags that are missing simply come back as `None`.
pub(crate) fn extract_head_tags(html: &str) -> HeadTags {
    let document = Html::parse_document(html);
    let mut tags = HeadTags::default();

    tags.title = document
        .select(&TITLE_SELECTOR)
        .next()
        .map(|element| element.text().collect::<String>().trim().to_string());

    // First link whose rel contains the literal substring "icon".
    // The match is on the raw attribute value, case-sensitive.
    tags.favicon = document
        .select(&LINK_REL_SELECTOR)
        .find(|element| {
            element
                .value()
                .attr("rel")
                .is_some_and(|rel| rel.contains("icon"))
        })
        .map(|element| TagHandle::from_element(element, "href"));

    for element in document.select(&META_NAME_SELECTOR) {
        let slot = match element.value().attr("name") {
            Some("geo.position") => &mut tags.position,
            Some("geo.region") => &mut tags.region,
            Some("geo.placename") => &mut tags.placename,
            Some("ICBM") => &mut tags.icbm,
            Some("DC.title") => &mut tags.dc_title,
            _ => continue,
        };
        if slot.is_none() {
            *slot = Some(TagHandle::from_element(element, "content"));
        }
    }

    tags
}
