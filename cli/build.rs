include!("src/cli.rs");

use clap::{CommandFactory, ValueEnum};
use clap_complete::Shell;
use clap_mangen::Man;
use std::env::var_os;
use std::fs::create_dir_all;
use std::io::{Error, Result};
use std::path::Path;

const BIN_NAME: &str = "oxloader";

fn main() -> Result<()> {
    let out_dir =
        PathBuf::from(var_os("OUT_DIR").ok_or_else(|| Error::other("OUT_DIR is not set"))?);
    let mut command = Args::command();
    write_completions(&mut command, &out_dir.join("complete"))?;
    write_man_pages(&command, &out_dir.join("man"))
}

fn write_completions(command: &mut clap::Command, directory: &Path) -> Result<()> {
    create_dir_all(directory)?;
    for shell in Shell::value_variants() {
        clap_complete::generate_to(*shell, command, BIN_NAME, directory)?;
    }
    Ok(())
}

/// One page for the tool and one `oxloader-<subcommand>` page per subcommand.
fn write_man_pages(command: &clap::Command, directory: &Path) -> Result<()> {
    create_dir_all(directory)?;
    let command = command.clone().disable_help_subcommand(true);
    Man::new(command.clone()).generate_to(directory)?;
    for subcommand in command.get_subcommands() {
        let name = format!("{BIN_NAME}-{}", subcommand.get_name());
        Man::new(subcommand.clone().display_name(name)).generate_to(directory)?;
    }
    Ok(())
}
