use crate::core::ElementId;
use crate::core::form::FormSpec;
use serde::{Deserialize, Serialize};

pub const HOME_PAGE: &str = "index.html";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkSpec {
    pub href: String,
    pub label: String,
}

impl LinkSpec {
    pub fn new(href: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            label: label.into(),
        }
    }
}

/// Static content block; its id is an anchor target for `#id` links.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectionSpec {
    pub id: ElementId,
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<LinkSpec>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageSpec {
    pub path: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub nav: Vec<LinkSpec>,
    #[serde(default)]
    pub sections: Vec<SectionSpec>,
    #[serde(default)]
    pub forms: Vec<FormSpec>,
}

impl PageSpec {
    /// Last path segment, or the home page for an empty path.
    pub fn page_name(&self) -> &str {
        page_name(&self.path, HOME_PAGE)
    }

    /// Whether `name` refers to this page, with or without the `.html` suffix.
    pub fn matches(&self, name: &str) -> bool {
        let page = self.page_name();
        page == name || page.strip_suffix(".html") == Some(name)
    }
}

pub fn page_name<'a>(path: &'a str, home: &'a str) -> &'a str {
    match path.rsplit('/').next() {
        Some(last) if !last.is_empty() => last,
        _ => home,
    }
}
