#![doc = include_str!("../README.md")]
#![doc(test(attr(deny(warnings))))]
#![doc(html_favicon_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]
#![doc(html_logo_url = "https://raw.githubusercontent.com/oxigraph/oxigraph/main/logo.svg")]

mod lexer;
pub mod nquads;
pub mod ntriples;
mod parser;
pub mod rdft;
mod terse;
pub mod trig;
pub mod turtle;

pub use crate::nquads::NQuadsLoader;
pub use crate::ntriples::NTriplesLoader;
pub use crate::rdft::RdftLoader;
pub use crate::trig::TriGLoader;
pub use crate::turtle::TurtleLoader;
