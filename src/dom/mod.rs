pub mod document;
pub mod element;
pub mod navigation;

pub use document::{Document, ScrollBlock, ScrollRequest};
pub use element::{Element, ElementKind, LinkRole};
pub use navigation::{ActiveLinkMarker, ScrollNavigator};
