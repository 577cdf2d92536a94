//! Interaction categories and the keyword classifier that maps report keys,
//! tag names and `type` hints onto them.
pub mod category;
pub mod classify;

// Re-exports
pub use category::InteractionCategory;
pub use classify::{classify, classify_json_key, classify_xml_name, JSON_KEYWORDS, XML_KEYWORDS};
