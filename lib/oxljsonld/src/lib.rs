#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod context;
mod loader;
pub mod tree;

pub use crate::context::{
    ContainerType, ContextFetcher, ContextId, ContextStack, NoContextFetcher, Setting,
    StaticContextFetcher, TermInfo, TermMapping,
};
pub use crate::loader::JsonLdLoader;
