//! psl-gen: CLI tool for generating the public suffix rule header.

use clap::Parser;
use psl_gen::config::DEFAULT_DATA_DIR;
use psl_gen::{CheckStatus, GenConfig, Generator, ParseSummary};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "psl-gen")]
#[command(author = "Kaitu.io")]
#[command(version = "0.1.0")]
#[command(about = "Generate the public suffix rule header from public_suffix_list.dat", long_about = None)]
struct Cli {
    /// Directory holding the list, template and generated header
    #[arg(short, long, default_value = DEFAULT_DATA_DIR, conflicts_with = "config")]
    data_dir: PathBuf,

    /// YAML config file (paths in it are relative to the file)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Rule list file
    #[arg(short, long)]
    rules: Option<PathBuf>,

    /// Header template file
    #[arg(short, long)]
    template: Option<PathBuf>,

    /// Generated header file
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Only check that the generated header is up to date
    #[arg(long)]
    check: bool,

    /// Print line statistics
    #[arg(long)]
    stats: bool,

    /// Verbose output
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(&cli)?;
    let generator = Generator::new(config);

    if cli.check {
        let output = generator.config().output_path();
        return match generator.check()? {
            CheckStatus::UpToDate => {
                println!("{:?} is up to date", output);
                Ok(())
            }
            CheckStatus::Stale => Err(format!("{:?} is out of date", output).into()),
            CheckStatus::Missing => Err(format!("{:?} does not exist", output).into()),
        };
    }

    let report = generator.run()?;
    if cli.stats {
        print_summary(&report.summary);
    }
    println!(
        "Successfully generated {:?} ({} rules, {} bytes)",
        report.output, report.rules, report.bytes_written
    );
    Ok(())
}

fn load_config(cli: &Cli) -> psl_gen::Result<GenConfig> {
    let mut config = match &cli.config {
        Some(path) => GenConfig::load(path)?,
        None => GenConfig::in_dir(&cli.data_dir),
    };

    // Command-line paths are relative to the working directory.
    let cwd = std::env::current_dir()?;
    let absolutize = |path: &PathBuf| {
        if path.is_absolute() {
            path.clone()
        } else {
            cwd.join(path)
        }
    };
    if let Some(rules) = &cli.rules {
        config.rule_list = absolutize(rules);
    }
    if let Some(template) = &cli.template {
        config.template = absolutize(template);
    }
    if let Some(output) = &cli.output {
        config.output = absolutize(output);
    }

    config.validate()?;
    Ok(config)
}

fn print_summary(summary: &ParseSummary) {
    println!("Lines:           {}", summary.total_lines());
    println!("  blank:         {}", summary.blank_lines);
    println!("  comment:       {}", summary.comment_lines);
    println!("Rules:           {}", summary.rules);
    println!("  exception:     {}", summary.exception_rules);
    println!("  wildcard:      {}", summary.wildcard_rules);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_data_dir_conflicts_with_config() {
        let result = Cli::try_parse_from(["psl-gen", "-c", "psl.yaml", "-d", "data"]);
        assert_eq!(
            result.unwrap_err().kind(),
            clap::error::ErrorKind::ArgumentConflict
        );
    }

    #[test]
    fn test_config_alone_uses_default_data_dir() {
        let cli = Cli::try_parse_from(["psl-gen", "--config", "psl.yaml"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("psl.yaml")));
        assert_eq!(cli.data_dir, PathBuf::from(DEFAULT_DATA_DIR));
    }

    #[test]
    fn test_overrides_parse() {
        let cli = Cli::try_parse_from([
            "psl-gen", "-d", "data", "-r", "list.dat", "-o", "out.h", "--stats", "-v",
        ])
        .unwrap();
        assert_eq!(cli.data_dir, PathBuf::from("data"));
        assert_eq!(cli.rules, Some(PathBuf::from("list.dat")));
        assert_eq!(cli.output, Some(PathBuf::from("out.h")));
        assert!(cli.stats && cli.verbose && !cli.check);
    }
}
