//! twofa - TOTP enrollment and validation from the command line.
//!
//! Usage:
//!   twofa enroll --issuer "Example Corp" --account user@example.com
//!   twofa code --secret GEZDGNBVGY3TQOJQ
//!   twofa check --secret GEZDGNBVGY3TQOJQ --code 755224

use std::process::ExitCode;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use twofa::{Enroller, OtpConfig, Secret, Validation, Validator};

#[derive(Parser)]
#[command(name = "twofa")]
#[command(version)]
#[command(about = "TOTP two-factor enrollment and validation", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a secret and print its provisioning material
    Enroll(EnrollArgs),

    /// Print the current code for a secret
    Code(CodeArgs),

    /// Check a user-entered code against a secret
    Check(CheckArgs),
}

#[derive(Args)]
struct CommonArgs {
    /// Number of digits per code
    #[arg(long, default_value_t = 6)]
    digits: u32,

    /// Time-step length in seconds
    #[arg(long, default_value_t = 30)]
    step: u32,
}

#[derive(Args)]
struct EnrollArgs {
    /// Issuer label shown in the authenticator app
    #[arg(short, long)]
    issuer: String,

    /// Account label (typically an email address)
    #[arg(short, long)]
    account: String,

    /// Secret length in bytes
    #[arg(long, default_value_t = 10)]
    secret_bytes: usize,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CodeArgs {
    /// Base32-encoded secret
    #[arg(short, long)]
    secret: String,

    #[command(flatten)]
    common: CommonArgs,
}

#[derive(Args)]
struct CheckArgs {
    /// Base32-encoded secret
    #[arg(short, long)]
    secret: String,

    /// Code to check
    #[arg(short, long)]
    code: String,

    /// Steps accepted on either side of the current one
    #[arg(short, long, default_value_t = 1)]
    window: u32,

    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Enroll(args) => enroll(args),
        Commands::Code(args) => code(args),
        Commands::Check(args) => check(args),
    }
}

fn enroll(args: EnrollArgs) -> Result<ExitCode> {
    let config = OtpConfig::new()
        .digits(args.common.digits)
        .step_seconds(args.common.step)
        .secret_length(args.secret_bytes);
    let enroller = Enroller::new(config, args.issuer)?;
    let enrollment = enroller.enroll(&args.account)?;

    println!("manual entry code: {}", enrollment.secret.manual_entry_code());
    println!("provisioning uri:  {}", enrollment.material.uri());
    Ok(ExitCode::SUCCESS)
}

fn code(args: CodeArgs) -> Result<ExitCode> {
    let secret = Secret::from_base32(&args.secret)?;
    let now = unix_now();
    println!(
        "{}",
        twofa::totp::generate(secret.as_bytes(), now, args.common.step, args.common.digits)?
    );
    Ok(ExitCode::SUCCESS)
}

fn check(args: CheckArgs) -> Result<ExitCode> {
    let config = OtpConfig::new()
        .digits(args.common.digits)
        .step_seconds(args.common.step)
        .window(args.window);
    let secret = Secret::from_base32(&args.secret)?;
    let validator = Validator::new(config)?;

    match validator.check_code(&secret, &args.code)? {
        Validation::Accepted => {
            println!("accepted");
            Ok(ExitCode::SUCCESS)
        }
        Validation::Rejected => {
            println!("rejected");
            Ok(ExitCode::FAILURE)
        }
    }
}

fn unix_now() -> u64 {
    let epoch = unix_time::Instant::at(0, 0);
    (unix_time::Instant::now() - epoch).as_secs()
}
