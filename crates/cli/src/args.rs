//! Command-line argument definitions using clap

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// chdgui - drive chdman from schema-described job options
#[derive(Parser, Debug)]
#[command(name = "chdgui")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// chdman executable (overrides config and CHDGUI_CHDMAN)
    #[arg(long, global = true)]
    pub chdman: Option<PathBuf>,

    /// Config file to use instead of the per-user one
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log debug output to the terminal
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List job types
    Jobs,

    /// List media types and their file extensions
    Media,

    /// Show the options available for a job/media pair
    Options {
        #[arg(short, long)]
        job: String,

        #[arg(short, long)]
        media: String,
    },

    /// List chdman hard disk templates
    Templates,

    /// Run a job over one or more inputs
    Run(RunArgs),
}

#[derive(Args, Debug)]
pub struct RunArgs {
    #[arg(short, long)]
    pub job: String,

    #[arg(short, long)]
    pub media: String,

    /// Directory receiving the outputs (defaults to the configured one)
    #[arg(short, long)]
    pub output_dir: Option<PathBuf>,

    /// Output extension (defaults to the first one the job produces)
    #[arg(short, long)]
    pub ext: Option<String>,

    /// Enable an option: `flag` or `flag=value`. Repeatable.
    #[arg(long = "opt", value_parser = parse_opt)]
    pub opts: Vec<(String, String)>,

    /// Print the commands instead of running them
    #[arg(long)]
    pub dry_run: bool,

    /// Input files; directories are searched recursively
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,
}

/// Splits `flag=value`; a bare `flag` has an empty value.
pub fn parse_opt(raw: &str) -> Result<(String, String), String> {
    let (flag, value) = raw.split_once('=').unwrap_or((raw, ""));
    let flag = flag.trim_start_matches("--");
    if flag.is_empty() {
        return Err(format!("missing option name in `{raw}`"));
    }
    Ok((flag.to_string(), value.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn run_collects_options_and_inputs() {
        let cli = Cli::parse_from([
            "chdgui",
            "run",
            "--job",
            "create",
            "--media",
            "cd",
            "--opt",
            "force",
            "--opt",
            "hunksize=4896",
            "--dry-run",
            "a.cue",
            "b.cue",
        ]);
        let Commands::Run(run) = cli.command else {
            panic!("expected run");
        };
        assert_eq!(run.job, "create");
        assert_eq!(
            run.opts,
            vec![
                ("force".to_string(), String::new()),
                ("hunksize".to_string(), "4896".to_string()),
            ]
        );
        assert!(run.dry_run);
        assert_eq!(run.inputs, vec![PathBuf::from("a.cue"), PathBuf::from("b.cue")]);
        assert!(run.ext.is_none());
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = Cli::parse_from(["chdgui", "templates", "--chdman", "/opt/chdman", "-v"]);
        assert!(matches!(cli.command, Commands::Templates));
        assert_eq!(cli.chdman, Some(PathBuf::from("/opt/chdman")));
        assert!(cli.verbose);
    }

    #[test]
    fn run_requires_inputs() {
        let res = Cli::try_parse_from(["chdgui", "run", "--job", "create", "--media", "cd"]);
        assert!(res.is_err());
    }

    #[test]
    fn opt_parsing() {
        assert_eq!(
            parse_opt("--compression=cdlz,cdzl").unwrap(),
            ("compression".to_string(), "cdlz,cdzl".to_string())
        );
        assert_eq!(
            parse_opt("ident=a=b").unwrap(),
            ("ident".to_string(), "a=b".to_string())
        );
        assert!(parse_opt("=x").is_err());
    }
}
