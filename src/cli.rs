//! Command-line definitions.
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Top-level CLI entry point for the dotfile repository linker.
#[derive(Parser, Debug)]
#[command(
    name = "snek",
    about = "Link a dotfile repository into your home directory and keep it in sync",
    version
)]
pub struct Cli {
    /// The subcommand to run.
    #[command(subcommand)]
    pub command: Command,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Options shared by all subcommands.
    #[command(flatten)]
    pub global: GlobalOpts,
}

/// Options shared across all subcommands.
#[derive(Parser, Debug, Clone, Default)]
pub struct GlobalOpts {
    /// Repository root (default: parent of the current directory)
    #[arg(long, global = true, env = "SNEK_ROOT")]
    pub root: Option<PathBuf>,

    /// Configuration file (default: <root>/snek.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,
}

/// Available subcommands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Sync the repository: update submodules, commit, pull, push
    Update,
    /// Link one or more environments into the destination
    Link(LinkOpts),
    /// Rename `dot-` entries under a tree to their hidden form
    Reveal(RenameOpts),
    /// Rename hidden entries under a tree to their `dot-` form
    Hide(RenameOpts),
    /// Print version information
    Version,
}

impl Command {
    /// Name used for the log file of this command.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Update => "update",
            Self::Link(_) => "link",
            Self::Reveal(_) => "reveal",
            Self::Hide(_) => "hide",
            Self::Version => "version",
        }
    }
}

/// Options for the `link` subcommand.
#[derive(Parser, Debug, Clone)]
pub struct LinkOpts {
    /// Environment directories under the repository root
    #[arg(required = true, value_name = "ENV")]
    pub envs: Vec<String>,

    /// Destination directory (default: config, then home directory)
    #[arg(long)]
    pub dest: Option<PathBuf>,
}

/// Options for the `reveal` and `hide` subcommands.
#[derive(Parser, Debug, Clone)]
pub struct RenameOpts {
    /// Tree to rename (default: current directory)
    pub path: Option<PathBuf>,
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn verify_cli() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parse_update() {
        let cli = Cli::parse_from(["snek", "update"]);
        assert!(matches!(cli.command, Command::Update));
    }

    #[test]
    fn parse_link_envs() {
        let cli = Cli::parse_from(["snek", "link", "common", "linux"]);
        assert!(
            matches!(&cli.command, Command::Link(_)),
            "Expected Link command"
        );
        if let Command::Link(opts) = cli.command {
            assert_eq!(opts.envs, vec!["common", "linux"]);
            assert!(opts.dest.is_none());
        }
    }

    #[test]
    fn parse_link_with_dest() {
        let cli = Cli::parse_from(["snek", "link", "--dest", "/tmp/home", "common"]);
        assert!(
            matches!(&cli.command, Command::Link(_)),
            "Expected Link command"
        );
        if let Command::Link(opts) = cli.command {
            assert_eq!(opts.dest, Some(PathBuf::from("/tmp/home")));
        }
    }

    #[test]
    fn link_requires_an_env() {
        assert!(Cli::try_parse_from(["snek", "link"]).is_err());
    }

    #[test]
    fn parse_reveal_and_hide() {
        let cli = Cli::parse_from(["snek", "reveal", "/repo/common"]);
        assert!(
            matches!(&cli.command, Command::Reveal(_)),
            "Expected Reveal command"
        );
        if let Command::Reveal(opts) = cli.command {
            assert_eq!(opts.path, Some(PathBuf::from("/repo/common")));
        }

        let cli = Cli::parse_from(["snek", "hide"]);
        assert!(
            matches!(&cli.command, Command::Hide(_)),
            "Expected Hide command"
        );
        if let Command::Hide(opts) = cli.command {
            assert!(opts.path.is_none());
        }
    }

    #[test]
    fn parse_version() {
        let cli = Cli::parse_from(["snek", "version"]);
        assert!(matches!(cli.command, Command::Version));
    }

    #[test]
    fn parse_verbose() {
        let cli = Cli::parse_from(["snek", "-v", "update"]);
        assert!(cli.verbose);
    }

    #[test]
    fn parse_global_flags_after_subcommand() {
        let cli = Cli::parse_from([
            "snek",
            "update",
            "--root",
            "/dotfiles",
            "--config",
            "/etc/snek.toml",
        ]);
        assert_eq!(cli.global.root, Some(PathBuf::from("/dotfiles")));
        assert_eq!(cli.global.config, Some(PathBuf::from("/etc/snek.toml")));
    }

    #[test]
    fn command_names() {
        assert_eq!(Cli::parse_from(["snek", "update"]).command.name(), "update");
        assert_eq!(Cli::parse_from(["snek", "link", "a"]).command.name(), "link");
        assert_eq!(Cli::parse_from(["snek", "hide"]).command.name(), "hide");
    }
}
