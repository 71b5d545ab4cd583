//! Line-oriented console commands.
//!
//! Each stdin line is parsed as a subcommand of [`ConsoleLine`]; `help`
//! prints the generated command list.
use clap::{CommandFactory, Parser, Subcommand};
use world_core::WorldId;

/// One console input line.
#[derive(Parser, Debug)]
#[command(
    name = "hopper",
    no_binary_name = true,
    disable_help_flag = true,
    disable_version_flag = true,
    help_template = "Commands:\n{subcommands}"
)]
pub struct ConsoleLine {
    #[command(subcommand)]
    pub command: ConsoleCommand,
}

#[derive(Subcommand, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConsoleCommand {
    /// Quick-hop to a world
    Hop { world: WorldId },

    /// Announce a spawn on the current world
    Spawn,

    /// Set a world's window manually
    Timer {
        world: WorldId,
        #[arg(allow_negative_numbers = true)]
        minutes: i32,
    },

    /// Show every tracked world
    #[command(alias = "ls")]
    List,

    /// Show session and hop state
    State,

    /// Log in, optionally on another world
    Login { world: Option<WorldId> },

    /// Return to the login screen
    Logout,

    /// Simulate the game refusing the world switcher
    Block,

    /// Show the overlay
    Show,

    /// Hide the overlay
    Hide,

    /// Exit
    #[command(alias = "exit")]
    Quit,
}

/// Parses one line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<ConsoleCommand>, clap::Error> {
    let words: Vec<&str> = line.split_whitespace().collect();
    if words.is_empty() {
        return Ok(None);
    }

    ConsoleLine::try_parse_from(words).map(|parsed| Some(parsed.command))
}

pub fn help() -> String {
    ConsoleLine::command().render_help().to_string()
}
