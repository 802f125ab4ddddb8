use scraper::{ElementRef, Html};

use crate::Link;

/// Substring every item link must contain.
pub const DEFAULT_SITE_MARKER: &str = "mavanimes.co";
/// Substring of the thumbnail asset path an item's image must point into.
pub const DEFAULT_THUMBNAIL_MARKER: &str = "mavanimes.co/wp-content/uploads/";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkFilter {
    pub site_marker: String,
    pub thumbnail_marker: String,
}

impl Default for LinkFilter {
    fn default() -> Self {
        Self {
            site_marker: DEFAULT_SITE_MARKER.to_string(),
            thumbnail_marker: DEFAULT_THUMBNAIL_MARKER.to_string(),
        }
    }
}

/// Selects the anchors of a listing page that point at listed items.
///
/// An anchor qualifies when, checked in this order:
/// - it has a non-empty `href`
/// - it has no `class` (navigation and utility links carry one)
/// - it has at least one child element
/// - it contains exactly one `<img>` descendant
/// - that image's `src` contains the thumbnail marker
/// - its `href` contains the site marker
#[derive(Debug, Clone, Default)]
pub struct LinkExtractor {
    filter: LinkFilter,
}

impl LinkExtractor {
    pub fn new(filter: LinkFilter) -> Self {
        Self { filter }
    }

    pub fn filter(&self) -> &LinkFilter {
        &self.filter
    }

    /// Returns qualifying `href`s in document order.
    pub fn extract(&self, document: &Html) -> Vec<Link> {
        document
            .root_element()
            .descendants()
            .filter_map(ElementRef::wrap)
            .filter(|element| element.value().name() == "a")
            .filter_map(|anchor| self.item_href(anchor))
            .map(ToOwned::to_owned)
            .collect()
    }

    pub fn extract_from_html(&self, html: &str) -> Vec<Link> {
        self.extract(&Html::parse_document(html))
    }

    fn item_href<'a>(&self, anchor: ElementRef<'a>) -> Option<&'a str> {
        let element = anchor.value();
        let href = element.attr("href").filter(|href| !href.is_empty())?;
        if element.attr("class").is_some_and(|class| !class.is_empty()) {
            return None;
        }
        if !anchor.children().any(|child| child.value().is_element()) {
            return None;
        }

        let image = single_image(anchor)?;
        let src = image.value().attr("src")?;
        if !src.contains(self.filter.thumbnail_marker.as_str()) {
            return None;
        }

        href.contains(self.filter.site_marker.as_str()).then_some(href)
    }
}

fn single_image(anchor: ElementRef<'_>) -> Option<ElementRef<'_>> {
    let mut images = anchor
        .descendants()
        .skip(1)
        .filter_map(ElementRef::wrap)
        .filter(|element| element.value().name() == "img");
    let first = images.next()?;
    images.next().is_none().then_some(first)
}
