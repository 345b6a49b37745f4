pub mod html;
pub mod identity;
pub mod links;
pub mod text;

#[cfg(test)]
mod tests;

pub use html::TextExtractor;
pub use identity::{meta_description, page_title, resolve_name};
pub use links::LinkDiscoverer;
