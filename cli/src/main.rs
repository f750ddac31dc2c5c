use anyhow::{Context, bail};
use clap::Parser;
use oxlmodel::InterningNodeFactory;
use oxloader::{
    DocumentFormat, DocumentLoadError, DocumentLoader, FileContextFetcher, LoadedDocument,
};
use std::ffi::OsStr;
use std::io::{self, BufWriter, Write, stdin, stdout};
use std::path::Path;
use tracing::info;
use tracing_subscriber::EnvFilter;

mod cli;

use crate::cli::{Args, Command};

/// The document IRI of the documents read from stdin without `--base`.
const STDIN_IRI: &str = "urn:x-oxloader:stdin";

pub fn main() -> anyhow::Result<()> {
    let matches = Args::parse();
    init_tracing();
    match matches.command {
        Command::Load {
            file,
            format,
            base,
            graph,
            meta_graph,
            target_graph,
            context_dir,
            imports,
        } => {
            let format = if let Some(format) = format {
                document_format_from_name(&format)?
            } else if let Some(file) = &file {
                document_format_from_path(file)?
            } else {
                bail!("The --format option must be set when loading from stdin")
            };
            let mut loader = DocumentLoader::from_format(format);
            if let Some(base) = &base {
                loader = loader.with_base_iri(base.as_str());
            }
            if let Some(graph) = graph {
                loader = loader.with_graph(graph);
            }
            if let Some(meta_graph) = meta_graph {
                loader = loader.with_meta_graph(meta_graph);
            }
            if let Some(target_graph) = target_graph {
                loader = loader.with_target_graph(target_graph);
            }
            if let Some(context_dir) = context_dir {
                loader = loader.with_context_fetcher(FileContextFetcher::new(context_dir));
            }

            let mut factory = InterningNodeFactory::default();
            let document = if let Some(file) = &file {
                loader
                    .load_file(file, &mut factory)
                    .with_context(|| format!("Failed to load {}", file.display()))?
            } else {
                let input = io::read_to_string(stdin())?;
                loader
                    .load_str(&input, base.as_deref().unwrap_or(STDIN_IRI), &mut factory)
                    .map_err(DocumentLoadError::from)
                    .context("Failed to load the standard input")?
            };
            let mut output = BufWriter::new(stdout().lock());
            if imports {
                for iri in document.imports() {
                    writeln!(output, "{iri}")?;
                }
            } else {
                write_document(&document, &mut output)?;
            }
            output.flush()?;
            Ok(())
        }
        Command::Formats => {
            let mut output = BufWriter::new(stdout().lock());
            for format in DocumentFormat::ALL {
                writeln!(
                    output,
                    "{}\t{}\t{}",
                    format.file_extension(),
                    format.media_type(),
                    format.name()
                )?;
            }
            output.flush()?;
            Ok(())
        }
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn write_document(document: &LoadedDocument, output: &mut impl Write) -> io::Result<()> {
    match document {
        LoadedDocument::Rdf(result) => {
            for quad in &result.quads {
                writeln!(output, "{quad}")?;
            }
            for rule in &result.rules {
                writeln!(output, "{rule}")?;
            }
            info!(
                "{} quads and {} rules loaded",
                result.quads.len(),
                result.rules.len()
            );
        }
        LoadedDocument::Ontology(ontology) => {
            writeln!(output, "{ontology}")?;
            info!("{} axioms loaded", ontology.len());
        }
    }
    Ok(())
}

fn format_from_path<T>(
    path: &Path,
    from_extension: impl FnOnce(&str) -> anyhow::Result<T>,
) -> anyhow::Result<T> {
    if let Some(ext) = path.extension().and_then(OsStr::to_str) {
        from_extension(ext).map_err(|e| {
            e.context(format!(
                "Not able to guess the file format from file name extension '{ext}'"
            ))
        })
    } else {
        bail!(
            "The path {} has no extension to guess a file format from",
            path.display()
        )
    }
}

fn document_format_from_path(path: &Path) -> anyhow::Result<DocumentFormat> {
    format_from_path(path, |ext| {
        DocumentFormat::from_extension(ext)
            .with_context(|| format!("The file extension '{ext}' is unknown"))
    })
}

fn document_format_from_name(name: &str) -> anyhow::Result<DocumentFormat> {
    if let Some(t) = DocumentFormat::from_extension(name) {
        return Ok(t);
    }
    if let Some(t) = DocumentFormat::from_media_type(name) {
        return Ok(t);
    }
    bail!("The file format '{name}' is unknown")
}

#[cfg(test)]
mod tests {
    #![allow(clippy::panic_in_result_fn)]

    use super::*;
    use anyhow::Result;

    #[test]
    fn clap_debug() {
        use clap::CommandFactory;

        Args::command().debug_assert()
    }

    #[test]
    fn format_names() -> Result<()> {
        assert_eq!(
            document_format_from_name("text/owl-functional")?,
            DocumentFormat::FunctionalOwl
        );
        assert_eq!(document_format_from_name("nq")?, DocumentFormat::NQuads);
        assert!(document_format_from_name("foo").is_err());
        assert_eq!(
            document_format_from_path(Path::new("ontology.owl"))?,
            DocumentFormat::OwlXml
        );
        assert!(document_format_from_path(Path::new("README")).is_err());
        Ok(())
    }
}
