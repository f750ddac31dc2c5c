use clap::{Parser, Subcommand, ValueHint};
use std::path::PathBuf;

#[derive(Parser)]
#[command(about, version, name = "oxloader")]
/// Oxloader command line tool to check and dump RDF, RDFT and OWL documents
pub struct Args {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load a document and write its content to the standard output
    ///
    /// RDF documents are written as N-Quads followed by their rules.
    /// OWL ontologies are written in functional syntax with full IRIs.
    Load {
        /// File to load
        ///
        /// If no file is given, stdin is read.
        #[arg(short, long, value_hint = ValueHint::FilePath)]
        file: Option<PathBuf>,
        /// The format of the file to load
        ///
        /// It can be an extension like "nt" or a media type like "text/turtle".
        ///
        /// By default the format is guessed from the loaded file extension.
        #[arg(long, required_unless_present = "file")]
        format: Option<String>,
        /// Base IRI of the document
        ///
        /// For stdin it is also the document IRI.
        #[arg(long, value_hint = ValueHint::Url)]
        base: Option<String>,
        /// Name of the graph the RDF triples are loaded into
        ///
        /// By default it is the document IRI.
        #[arg(long, value_hint = ValueHint::Url)]
        graph: Option<String>,
        /// Name of the graph of the RDFT meta patterns
        #[arg(long, value_hint = ValueHint::Url)]
        meta_graph: Option<String>,
        /// Name of the graph of the RDFT consequent patterns
        #[arg(long, value_hint = ValueHint::Url)]
        target_graph: Option<String>,
        /// Directory to read the JSON-LD remote contexts from
        ///
        /// A context is looked for under the last segment of its IRI path.
        #[arg(long, value_hint = ValueHint::DirPath)]
        context_dir: Option<PathBuf>,
        /// Only write the IRIs of the imported documents, one per line
        #[arg(long)]
        imports: bool,
    },
    /// List the supported formats with their extension and media type
    Formats,
}
