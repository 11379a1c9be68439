use anyhow::Result;
use clap::{Parser, Subcommand};
use std::process::Command;

#[derive(Parser)]
#[command(name = "xtask", about = "Workspace automation for wildreach")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run fmt, clippy, tests, and doc in sequence
    Check,
    /// Run cargo fmt --check on all crates
    Fmt,
    /// Run clippy with warnings denied
    Clippy,
    /// Run all tests
    Test,
    /// Build rustdoc for the workspace
    Doc,
    /// Run the streaming benchmarks
    Bench,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let steps: &[&[&str]] = match cli.command {
        Commands::Check => &[FMT, CLIPPY, TEST, DOC],
        Commands::Fmt => &[FMT],
        Commands::Clippy => &[CLIPPY],
        Commands::Test => &[TEST],
        Commands::Doc => &[DOC],
        Commands::Bench => &[BENCH],
    };

    for args in steps {
        run(args)?;
    }
    Ok(())
}

const FMT: &[&str] = &["fmt", "--all", "--", "--check"];
const CLIPPY: &[&str] = &["clippy", "--workspace", "--all-targets", "--", "-D", "warnings"];
const TEST: &[&str] = &["test", "--workspace"];
const DOC: &[&str] = &["doc", "--workspace", "--no-deps"];
const BENCH: &[&str] = &["bench", "-p", "wildreach-stream"];

fn run(args: &[&str]) -> Result<()> {
    println!("==> cargo {}", args.join(" "));
    let status = Command::new("cargo").args(args).status()?;
    if !status.success() {
        anyhow::bail!("cargo {} failed", args.join(" "));
    }
    Ok(())
}
