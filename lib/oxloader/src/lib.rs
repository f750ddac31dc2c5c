#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod error;
mod fetcher;
mod format;
mod loader;

pub use crate::error::DocumentLoadError;
pub use crate::fetcher::FileContextFetcher;
pub use crate::format::DocumentFormat;
pub use crate::loader::{DocumentLoader, LoadedDocument};
