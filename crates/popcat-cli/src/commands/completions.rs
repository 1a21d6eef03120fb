//! Shell completion generation.

use clap::CommandFactory;
use clap_complete::{Shell as Target, generate};

use crate::{
    cli::{Cli, CompletionsArgs, Shell},
    error::CliResult,
};

const BIN_NAME: &str = "popcat";

pub fn execute(args: CompletionsArgs) -> CliResult<()> {
    let mut cmd = Cli::command();
    generate(target(args.shell), &mut cmd, BIN_NAME, &mut std::io::stdout());
    Ok(())
}

fn target(shell: Shell) -> Target {
    match shell {
        Shell::Bash => Target::Bash,
        Shell::Zsh => Target::Zsh,
        Shell::Fish => Target::Fish,
        Shell::PowerShell => Target::PowerShell,
        Shell::Elvish => Target::Elvish,
    }
}
