#![allow(clippy::panic_in_result_fn)]

use anyhow::Result;
use assert_cmd::Command;
use assert_fs::TempDir;
use assert_fs::prelude::*;
use oxloader::DocumentFormat;
use predicates::prelude::*;

fn cli_command() -> Result<Command> {
    Ok(Command::cargo_bin("oxloader")?)
}

#[test]
fn cli_help() -> Result<()> {
    cli_command()?
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::starts_with("Oxloader"));
    Ok(())
}

#[test]
fn cli_load_turtle_file() -> Result<()> {
    let directory = TempDir::new()?;
    let input_file = directory.child("input.ttl");
    input_file.write_str("@prefix ex: <http://example.com/> .\n<s> ex:p \"o\" .")?;
    cli_command()?
        .arg("load")
        .arg("--file")
        .arg(input_file.path())
        .arg("--base")
        .arg("http://example.com/")
        .arg("--graph")
        .arg("http://example.com/g")
        .assert()
        .success()
        .stdout("<http://example.com/s> <http://example.com/p> \"o\" <http://example.com/g> .\n");
    Ok(())
}

#[test]
fn cli_load_stdin() -> Result<()> {
    cli_command()?
        .arg("load")
        .arg("--format")
        .arg("application/n-triples")
        .arg("--base")
        .arg("http://example.com/doc")
        .write_stdin("<http://example.com/s> <http://example.com/p> <http://example.com/o> .")
        .assert()
        .success()
        .stdout("<http://example.com/s> <http://example.com/p> <http://example.com/o> <http://example.com/doc> .\n");
    Ok(())
}

#[test]
fn cli_load_stdin_requires_a_format() -> Result<()> {
    cli_command()?
        .arg("load")
        .write_stdin("<http://example.com/s> <http://example.com/p> <http://example.com/o> .")
        .assert()
        .failure();
    Ok(())
}

#[test]
fn cli_load_rules() -> Result<()> {
    cli_command()?
        .arg("load")
        .arg("--format")
        .arg("rdft")
        .arg("--base")
        .arg("http://example.com/rules")
        .arg("--target-graph")
        .arg("http://example.com/target")
        .write_stdin(
            "@prefix ex: <http://example.com/> .\nrule ex:rule { ?x a ex:Person } => { ?x a ex:Agent }",
        )
        .assert()
        .success()
        .stdout(predicate::str::starts_with("rule <http://example.com/rule>"))
        .stdout(predicate::str::contains("<http://example.com/target>"));
    Ok(())
}

#[test]
fn cli_load_ontology() -> Result<()> {
    let directory = TempDir::new()?;
    let input_file = directory.child("animals.ofn");
    input_file.write_str(
        "Prefix(:=<http://example.com/animals#>)\nOntology(<http://example.com/animals>\n  Import(<http://example.com/life>)\n  SubClassOf(:Dog :Animal)\n)",
    )?;
    cli_command()?
        .arg("load")
        .arg("--file")
        .arg(input_file.path())
        .assert()
        .success()
        .stdout(predicate::str::starts_with(
            "Ontology(<http://example.com/animals>",
        ))
        .stdout(predicate::str::contains(
            "SubClassOf(<http://example.com/animals#Dog> <http://example.com/animals#Animal>)",
        ));
    cli_command()?
        .arg("load")
        .arg("--file")
        .arg(input_file.path())
        .arg("--imports")
        .assert()
        .success()
        .stdout("http://example.com/life\n");
    Ok(())
}

#[test]
fn cli_load_json_ld_with_context_dir() -> Result<()> {
    let directory = TempDir::new()?;
    directory
        .child("person.jsonld")
        .write_str(r#"{"@context": {"name": "http://schema.org/name"}}"#)?;
    cli_command()?
        .arg("load")
        .arg("--format")
        .arg("jsonld")
        .arg("--base")
        .arg("http://example.com/doc")
        .arg("--context-dir")
        .arg(directory.path())
        .write_stdin(r#"{"@context": "http://example.com/contexts/person.jsonld", "@id": "http://example.com/alice", "name": "Alice"}"#)
        .assert()
        .success()
        .stdout("<http://example.com/alice> <http://schema.org/name> \"Alice\" <http://example.com/doc> .\n");
    Ok(())
}

#[test]
fn cli_load_reports_errors() -> Result<()> {
    cli_command()?
        .arg("load")
        .arg("--format")
        .arg("ttl")
        .arg("--base")
        .arg("http://example.com/doc")
        .write_stdin("<http://example.com/s> <http://example.com/p> .")
        .assert()
        .failure()
        .stdout("")
        .stderr(predicate::str::contains("Loader error at line 1"));
    Ok(())
}

#[test]
fn cli_unknown_extension() -> Result<()> {
    let directory = TempDir::new()?;
    let input_file = directory.child("input.foo");
    input_file.write_str("")?;
    cli_command()?
        .arg("load")
        .arg("--file")
        .arg(input_file.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "The file extension 'foo' is unknown",
        ));
    Ok(())
}

#[test]
fn cli_formats() -> Result<()> {
    cli_command()?
        .arg("formats")
        .assert()
        .success()
        .stdout(predicate::str::contains("ttl\ttext/turtle\tTurtle\n"))
        .stdout(predicate::str::contains(
            "owx\tapplication/owl+xml\tOWL/XML\n",
        ))
        .stdout(predicate::function(|output: &str| {
            output.lines().count() == DocumentFormat::ALL.len()
        }));
    Ok(())
}
