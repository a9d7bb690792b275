pub mod output;
pub mod process;

use anyhow::Result;
use clap::{Parser, Subcommand};
use process::{process_attendance_command, summary_command, ProcessCommand, SummaryCommand};

use crate::utils::{
    dir::create_application_default_path,
    logging::{enable_logging, LoggingOptions},
};

#[derive(Parser, Debug)]
#[command(name = "minidone", version, long_about = None)]
#[command(about = "Calculate working hours of interns from attendance exports", long_about = None)]
struct Args {
    #[command(subcommand)]
    commands: Commands,
    #[arg(long, global = true, help = "Enable logging")]
    log: bool,
}

#[derive(Subcommand, Debug)]
enum Commands {
    #[command(about = "Process an attendance export into a table and a chart")]
    Process {
        #[command(flatten)]
        command: ProcessCommand,
    },
    #[command(about = "Print how many records fall into each work mode")]
    Summary {
        #[command(flatten)]
        command: SummaryCommand,
    },
}

pub fn run_cli() -> Result<()> {
    let args = Args::parse();

    enable_logging(&LoggingOptions::for_cli(
        create_application_default_path()?,
        args.log,
    ))?;

    match args.commands {
        Commands::Process { command } => process_attendance_command(command),
        Commands::Summary { command } => summary_command(command),
    }
}

#[cfg(test)]
mod tests {
    use clap::{CommandFactory, Parser};

    use super::{Args, Commands};

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_global_log_flag() {
        let args = Args::parse_from(["minidone", "summary", "march.xlsx", "--log"]);
        assert!(args.log);
        assert!(matches!(args.commands, Commands::Summary { .. }));
    }
}
