use std::path::PathBuf;

use clap::{ArgAction, Parser, Subcommand};

use crate::essence::{
    convert_essence, document_essences, generate_essence, verify_essence, EssencePaths, VerifyReport,
    DEFAULT_ESSENCES,
};

#[derive(Debug, Clone, Parser)]
#[command(
    name = "essence_docs",
    version,
    about = "Generate Markdown ability documents from the essence .tsx tables"
)]
pub struct Cli {
    /// Project root the source and output directories are resolved against
    /// [default: current directory].
    #[arg(long, env = "ESSENCE_DOCS_ROOT", global = true)]
    pub root: Option<PathBuf>,

    /// Process only these essences, in the given order.
    #[arg(short = 'e', long = "essence", value_name = "NAME", global = true)]
    pub essences: Vec<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Clone, PartialEq, Eq, Subcommand)]
pub enum Command {
    /// Convert every essence table to Markdown (the default).
    Convert,
    /// Compare generated documents with their sources.
    Verify {
        /// Print reports as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Rebuild the .tsx tables from the Markdown documents.
    Generate,
}

impl Cli {
    pub fn command(&self) -> Command {
        self.command.clone().unwrap_or(Command::Convert)
    }

    pub fn paths(&self) -> EssencePaths {
        EssencePaths::new(self.root.clone().unwrap_or_default())
    }

    pub fn essence_names(&self) -> Vec<String> {
        if self.essences.is_empty() {
            DEFAULT_ESSENCES.iter().map(|name| name.to_string()).collect()
        } else {
            self.essences.clone()
        }
    }
}

/// Runs the selected command and returns the process exit code.
pub fn run(cli: &Cli) -> i32 {
    let paths = cli.paths();
    let essences = cli.essence_names();
    let result = match cli.command() {
        Command::Convert => Ok(handle_convert(&paths, &essences)),
        Command::Verify { json } => handle_verify(&paths, &essences, json),
        Command::Generate => handle_generate(&paths, &cli.essences),
    };
    match result {
        Ok(code) => code,
        Err(err) => {
            eprintln!("error: {err:#}");
            1
        }
    }
}

/// Converts each essence in turn. Failures are reported and skipped, so the
/// exit code is always 0.
fn handle_convert(paths: &EssencePaths, essences: &[String]) -> i32 {
    println!("Converting TypeScript essence files to Markdown...\n");

    for essence in essences {
        match convert_essence(paths, essence) {
            Ok(summary) => println!("[OK] {summary}"),
            Err(err) => println!("[ERROR] {err}"),
        }
    }

    println!("\n[SUCCESS] Conversion complete!");
    0
}

fn handle_verify(paths: &EssencePaths, essences: &[String], json: bool) -> anyhow::Result<i32> {
    let mut reports: Vec<VerifyReport> = Vec::new();
    let mut failed = false;

    for essence in essences {
        match verify_essence(paths, essence) {
            Ok(report) => {
                failed |= !report.is_clean();
                if !json {
                    print_verify_report(&report);
                }
                reports.push(report);
            }
            Err(err) => {
                failed = true;
                if json {
                    eprintln!("[ERROR] {err}");
                } else {
                    println!("[ERROR] {err}");
                }
            }
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&reports)?);
    }
    Ok(if failed { 1 } else { 0 })
}

/// Regenerates the `.tsx` table of each named essence, or of every document
/// in the output directory when none are named. Exits 1 only when there is
/// nothing to generate from.
fn handle_generate(paths: &EssencePaths, named: &[String]) -> anyhow::Result<i32> {
    println!("Generating essence TypeScript files from markdown...\n");

    let essences = if named.is_empty() {
        let data_dir = paths.output_dir();
        if !data_dir.is_dir() {
            eprintln!("[ERROR] Data directory not found: {}", data_dir.display());
            return Ok(1);
        }
        let found = document_essences(paths)?;
        if found.is_empty() {
            eprintln!("[ERROR] No markdown files found in {}", data_dir.display());
            return Ok(1);
        }
        found
    } else {
        named.to_vec()
    };

    let mut generated = 0;
    for essence in &essences {
        println!("Processing {essence}...");
        match generate_essence(paths, essence) {
            Ok(summary) => {
                println!("   [OK] {summary}");
                generated += 1;
            }
            Err(err) => eprintln!("   [ERROR] Error processing {essence}: {err}"),
        }
    }

    println!("\nSuccessfully generated {generated} essence file(s)!");
    Ok(0)
}

fn print_verify_report(report: &VerifyReport) {
    if report.is_clean() {
        println!("[OK] {}.md matches source", report.essence);
        return;
    }
    println!(
        "[DRIFT] {}.md: {} difference(s)",
        report.essence,
        report.drift.len()
    );
    for drift in &report.drift {
        println!("  - {drift}");
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use clap::Parser;

    use super::{Cli, Command};

    #[test]
    fn no_arguments_converts_the_fixed_list() {
        let cli = Cli::parse_from(["essence_docs"]);
        assert_eq!(cli.command(), Command::Convert);
        assert_eq!(
            cli.essence_names(),
            vec!["earth", "metal", "wood", "poison", "acid", "lightning", "air"]
        );
        assert_eq!(cli.verbose, 0);
        assert_eq!(
            cli.paths().input_path("wood"),
            Path::new("src/components/essences/consts/wood.tsx")
        );
    }

    #[test]
    fn generate_subcommand_keeps_named_essences_only() {
        let cli = Cli::parse_from(["essence_docs", "generate"]);
        assert_eq!(cli.command(), Command::Generate);
        assert!(cli.essences.is_empty());

        let cli = Cli::parse_from(["essence_docs", "generate", "-e", "air"]);
        assert_eq!(cli.essences, vec!["air"]);
    }

    #[test]
    fn essence_filter_and_root_apply_to_subcommands() {
        let cli = Cli::parse_from([
            "essence_docs",
            "verify",
            "--json",
            "-e",
            "air",
            "--essence",
            "earth",
            "--root",
            "/srv/site",
            "-vv",
        ]);
        assert_eq!(cli.command(), Command::Verify { json: true });
        assert_eq!(cli.essence_names(), vec!["air", "earth"]);
        assert_eq!(cli.root.as_deref(), Some(Path::new("/srv/site")));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn unknown_subcommand_is_rejected() {
        assert!(Cli::try_parse_from(["essence_docs", "serve"]).is_err());
    }
}
