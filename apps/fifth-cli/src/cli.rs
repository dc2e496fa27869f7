use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use fifth_core::{Command, CommandFlags, EngineConfig, ProjectConfig, TracingObserver};
use tracing::info;

#[derive(Debug, Parser)]
#[command(name = "fifth", about = "Fifth stack language interpreter and number exercises")]
pub struct Cli {
    /// Directory containing `.fifth/config.yaml` (defaults to current directory)
    #[arg(short = 'C', long = "dir", default_value = ".", global = true)]
    pub dir: PathBuf,

    /// Also write JSON logs to `.fifth/logs/`
    #[arg(long, global = true)]
    pub log_file: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Apply the selected stack commands once each, in fixed priority order
    Stack(StackArgs),

    /// Apply an ordered list of commands, one per argument, file line or stdin line
    Exec {
        /// Initial stack, bottom first, comma-separated (e.g. `--stack 1,2,3`)
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        stack: Option<Vec<i64>>,

        /// Read commands from this file instead of stdin
        #[arg(short, long, conflicts_with = "commands")]
        file: Option<PathBuf>,

        /// Commands such as "PUSH 3" or "ADD"
        commands: Vec<String>,
    },

    /// Count the steps for a Collatz sequence to reach 1
    Collatz {
        /// Starting value
        n: u64,
    },

    /// Sum the value of one or more Roman numerals
    Roman {
        /// Numerals such as MXVII
        #[arg(required = true)]
        numerals: Vec<String>,
    },
}

#[derive(Debug, Args)]
pub struct StackArgs {
    /// Initial stack, bottom first
    #[arg(long, num_args = 1.., allow_negative_numbers = true)]
    pub stack: Option<Vec<i64>>,

    /// Push the given value onto the stack
    #[arg(long = "PUSH", visible_alias = "push", allow_negative_numbers = true)]
    pub push: Option<i64>,

    /// Remove the top element of the stack
    #[arg(long = "POP", visible_alias = "pop")]
    pub pop: bool,

    /// Swap the top two elements of the stack
    #[arg(long = "SWAP", visible_alias = "swap")]
    pub swap: bool,

    /// Duplicate the top element of the stack
    #[arg(long = "DUP", visible_alias = "dup")]
    pub dup: bool,

    /// Add the top two values and push the result
    #[arg(long = "ADD", visible_alias = "add")]
    pub add: bool,

    /// Subtract the top value from the one below it and push the result
    #[arg(long = "SUBTRACT", visible_alias = "subtract")]
    pub subtract: bool,

    /// Multiply the top two values and push the result
    #[arg(long = "MULTIPLY", visible_alias = "multiply")]
    pub multiply: bool,

    /// Divide the second value by the top value and push the rounded result
    #[arg(long = "DIVIDE", visible_alias = "divide")]
    pub divide: bool,
}

impl StackArgs {
    fn flags(&self) -> CommandFlags {
        CommandFlags {
            push: self.push,
            pop: self.pop,
            swap: self.swap,
            dup: self.dup,
            add: self.add,
            subtract: self.subtract,
            multiply: self.multiply,
            divide: self.divide,
        }
    }
}

impl Cli {
    /// Build the engine configuration from the global flags.
    pub fn engine_config(&self) -> EngineConfig {
        let builder = EngineConfig::builder().work_dir(self.dir.clone());
        if self.log_file {
            builder.log_file(true).build()
        } else {
            builder.build()
        }
    }

    pub fn run(self, project: &ProjectConfig) -> Result<()> {
        match self.command {
            Commands::Stack(args) => {
                let commands = args.flags().into_commands();
                let initial = project.initial_stack(args.stack);
                run_stack(initial, commands)
            }
            Commands::Exec {
                stack,
                file,
                commands,
            } => {
                let script = if !commands.is_empty() {
                    commands.join("\n")
                } else if let Some(path) = file {
                    std::fs::read_to_string(&path).with_context(|| {
                        format!("failed to read commands from {}", path.display())
                    })?
                } else {
                    std::io::read_to_string(std::io::stdin())
                        .context("failed to read commands from stdin")?
                };
                let commands = fifth_core::parse_script(&script)?;
                run_stack(project.initial_stack(stack), commands)
            }
            Commands::Collatz { n } => {
                let steps = fifth_kata::collatz_steps(n)?;
                info!(n, steps, "collatz sequence reached 1");
                println!("{steps}");
                Ok(())
            }
            Commands::Roman { numerals } => {
                let total = fifth_kata::roman_sum(&numerals);
                info!(?numerals, total, "summed roman numerals");
                println!("{total}");
                Ok(())
            }
        }
    }
}

fn run_stack(initial: Vec<i64>, commands: Vec<Command>) -> Result<()> {
    info!(commands = commands.len(), "running stack commands");
    let stack = fifth_core::run(initial, commands, TracingObserver)
        .context("stack commands did not complete")?;
    println!("{stack}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::CommandFactory;

    use super::*;

    #[test]
    fn test_should_pass_clap_debug_asserts() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_should_parse_stack_flags_in_priority_order() {
        let cli = Cli::try_parse_from([
            "fifth", "stack", "--stack", "12", "23", "--ADD", "--PUSH", "35", "--POP",
        ])
        .expect("should parse");

        let Commands::Stack(args) = cli.command else {
            panic!("expected stack subcommand");
        };
        assert_eq!(args.stack, Some(vec![12, 23]));
        assert_eq!(
            args.flags().into_commands(),
            vec![Command::Push(35), Command::Pop, Command::Add]
        );
    }

    #[test]
    fn test_should_accept_lowercase_aliases_and_negative_values() {
        let cli = Cli::try_parse_from([
            "fifth", "stack", "--stack", "-4", "2", "--push", "-1", "--divide",
        ])
        .expect("should parse");

        let Commands::Stack(args) = cli.command else {
            panic!("expected stack subcommand");
        };
        assert_eq!(args.stack, Some(vec![-4, 2]));
        assert_eq!(
            args.flags().into_commands(),
            vec![Command::Push(-1), Command::Divide]
        );
    }

    #[test]
    fn test_should_parse_exec_commands() {
        let cli = Cli::try_parse_from(["fifth", "exec", "--stack", "1", "--", "PUSH 2", "ADD"])
            .expect("should parse");

        let Commands::Exec { stack, commands, .. } = cli.command else {
            panic!("expected exec subcommand");
        };
        assert_eq!(stack, Some(vec![1]));
        assert_eq!(commands, vec!["PUSH 2", "ADD"]);
    }

    #[test]
    fn test_should_keep_exec_commands_after_stack_without_separator() {
        let cli = Cli::try_parse_from([
            "fifth", "exec", "--stack", "3,-2", "PUSH 2", "ADD",
        ])
        .expect("should parse");

        let Commands::Exec { stack, commands, .. } = cli.command else {
            panic!("expected exec subcommand");
        };
        assert_eq!(stack, Some(vec![3, -2]));
        assert_eq!(commands, vec!["PUSH 2", "ADD"]);
    }

    #[test]
    fn test_should_build_engine_config_from_global_flags() {
        let cli = Cli::try_parse_from(["fifth", "--log-file", "-C", "/tmp/work", "collatz", "8"])
            .expect("should parse");

        let config = cli.engine_config();
        assert_eq!(config.work_dir(), &PathBuf::from("/tmp/work"));
        assert_eq!(config.log_file(), Some(true));
    }

    #[test]
    fn test_should_require_roman_numerals() {
        assert!(Cli::try_parse_from(["fifth", "roman"]).is_err());
    }

    #[test]
    fn test_should_report_failed_stack_command() {
        let err = run_stack(vec![2], vec![Command::Add]).expect_err("should fail");
        let chain = format!("{err:#}");
        assert!(chain.contains("ADD"), "unexpected error: {chain}");
        assert!(chain.contains("'+'"), "unexpected error: {chain}");
    }
}
