use crate::core::ElementId;
use crate::core::page;
use crate::dom::document::{Document, ScrollBlock};
use crate::dom::element::ACTIVE_CLASS;
use tracing::debug;

/// Smooth-scrolls in-page `#id` anchors to their target.
pub struct ScrollNavigator;

impl ScrollNavigator {
    /// Returns true when `href` named an existing element and a scroll was
    /// requested.
    pub fn activate(document: &mut Document, href: &str) -> bool {
        let Some(target) = href.strip_prefix('#').filter(|id| !id.is_empty()) else {
            return false;
        };
        let scrolled = document.scroll_into_view(target, ScrollBlock::Start);
        if !scrolled {
            debug!(href, "anchor target not found");
        }
        scrolled
    }
}

/// Highlights the nav entry for the current page.
pub struct ActiveLinkMarker;

impl ActiveLinkMarker {
    /// Mark every nav link pointing at the current page as active. An empty
    /// path matches `home`.
    pub fn mark(document: &mut Document, path: &str, home: &str) -> Vec<ElementId> {
        let current = page::page_name(path, home).to_string();
        let mut marked = Vec::new();
        for link in document.nav_links_mut() {
            if link.href.as_deref() == Some(current.as_str()) {
                link.add_class(ACTIVE_CLASS);
                marked.push(link.id.clone());
            } else {
                link.remove_class(ACTIVE_CLASS);
            }
        }
        marked
    }
}
