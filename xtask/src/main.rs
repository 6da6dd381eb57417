use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::process::{exit, Command};

use clap::{Parser, Subcommand, ValueEnum};
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

// ── CLI definition ─────────────────────────────────────────────────

#[derive(Parser)]
#[command(name = "xtask", about = "Task runner for the SNS relay workspace")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run CI checks (fmt, clippy, tests)
    Ci {
        #[arg(value_enum, default_value_t = CiJob::All)]
        job: CiJob,
    },
    /// Build the relay Lambdas and zip each binary as `bootstrap`
    LambdaPackage {
        /// Target triple of the Lambda execution environment
        #[arg(long, default_value = "x86_64-unknown-linux-gnu")]
        target: String,
        /// Build in debug mode instead of release
        #[arg(long)]
        debug: bool,
        /// Directory receiving `publisher.zip` and `consumer.zip`
        #[arg(long, default_value = "dist")]
        out_dir: PathBuf,
    },
}

#[derive(Clone, ValueEnum)]
enum CiJob {
    /// Formatting and clippy
    Check,
    /// Workspace tests
    Test,
    /// Check, then test
    All,
}

/// A relay binary and the artifact it is shipped as.
struct LambdaArtifact {
    bin: &'static str,
    zip_name: &'static str,
}

const RELAY_LAMBDAS: [LambdaArtifact; 2] = [
    LambdaArtifact {
        bin: "relay_publisher",
        zip_name: "publisher.zip",
    },
    LambdaArtifact {
        bin: "relay_consumer",
        zip_name: "consumer.zip",
    },
];

// ── helpers ────────────────────────────────────────────────────────

fn step(label: &str) {
    eprintln!("\n=== {label} ===");
}

fn run_cargo(args: &[&str]) {
    eprintln!("+ cargo {}", args.join(" "));
    let status = Command::new("cargo")
        .args(args)
        .status()
        .unwrap_or_else(|error| fail(&format!("failed to execute cargo: {error}")));
    if !status.success() {
        exit(status.code().unwrap_or(1));
    }
}

fn fail(message: &str) -> ! {
    eprintln!("error: {message}");
    exit(1);
}

// ── lambda packaging ───────────────────────────────────────────────

fn package_lambdas(target: &str, debug: bool, out_dir: &Path) {
    step("Build relay lambdas");
    let mut args = vec!["build", "-p", "relay_lambda", "--target", target];
    for lambda in &RELAY_LAMBDAS {
        args.extend(["--bin", lambda.bin]);
    }
    if !debug {
        args.push("--release");
    }
    run_cargo(&args);

    step("Zip lambda artifacts");
    let profile_dir = if debug { "debug" } else { "release" };
    let build_dir = Path::new("target").join(target).join(profile_dir);
    fs::create_dir_all(out_dir)
        .unwrap_or_else(|error| fail(&format!("cannot create {}: {error}", out_dir.display())));

    for lambda in &RELAY_LAMBDAS {
        let zip_path = out_dir.join(lambda.zip_name);
        write_bootstrap_zip(&build_dir.join(lambda.bin), &zip_path);
        eprintln!("- {} -> {}", lambda.bin, zip_path.display());
    }
}

/// The `provided.al2023` runtime executes a file named `bootstrap` at the
/// archive root.
fn write_bootstrap_zip(binary_path: &Path, zip_path: &Path) {
    let binary = fs::read(binary_path).unwrap_or_else(|error| {
        fail(&format!(
            "cannot read lambda binary {}: {error}",
            binary_path.display()
        ))
    });

    let result = fs::File::create(zip_path)
        .map_err(zip::result::ZipError::Io)
        .and_then(|file| {
            let mut zip = ZipWriter::new(file);
            let options = FileOptions::default()
                .compression_method(CompressionMethod::Deflated)
                .unix_permissions(0o755);
            zip.start_file("bootstrap", options)?;
            zip.write_all(&binary)?;
            zip.finish()?;
            Ok(())
        });

    if let Err(error) = result {
        fail(&format!("cannot write {}: {error}", zip_path.display()));
    }
}

// ── CI jobs ────────────────────────────────────────────────────────

fn ci_check() {
    step("Check formatting");
    run_cargo(&["fmt", "--all", "--", "--check"]);

    step("Clippy");
    run_cargo(&["clippy", "--all-targets", "--", "-D", "warnings"]);
}

fn ci_test() {
    step("Test workspace");
    run_cargo(&["test", "--workspace"]);
}

// ── main ───────────────────────────────────────────────────────────

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Commands::Ci { job } => {
            match job {
                CiJob::Check => ci_check(),
                CiJob::Test => ci_test(),
                CiJob::All => {
                    ci_check();
                    ci_test();
                }
            }
            eprintln!("\nCI job passed.");
        }
        Commands::LambdaPackage {
            target,
            debug,
            out_dir,
        } => package_lambdas(&target, debug, &out_dir),
    }
}
