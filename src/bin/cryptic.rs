//! Cryptic CLI - password-based file encryption
//!
//! Command-line front end for sealing and opening files with
//! PBKDF2-SHA256 key derivation and AES-256-GCM, and for checking how
//! strong a password looks.

use clap::{Parser, Subcommand};
use std::error::Error as StdError;
use std::path::PathBuf;
use std::process;

use cryptic::error::{CrypticError, Result};
use cryptic::file_ops;
use cryptic::kdf::{DEFAULT_ITERATIONS, KdfParams};
use cryptic::passphrase::{
    CachingPasswordReader, PasswordReader, ReaderPasswordReader, TerminalPasswordReader,
};
use cryptic::strength::{self, StrengthBucket};

#[derive(Parser)]
#[command(name = "cryptic")]
#[command(version)]
#[command(about = "Password-based file encryption.", long_about = None)]
struct Cli {
    /// Read password from stdin instead of from terminal. Everything on
    /// stdin is the password, including a trailing newline (use `printf`,
    /// not `echo`)
    #[arg(long, global = true)]
    password_stdin: bool,

    /// PBKDF2 iteration count; must match between seal and open
    #[arg(long, global = true, value_name = "N", default_value_t = DEFAULT_ITERATIONS)]
    iterations: u32,

    /// Enable debug logging (RUST_LOG takes precedence)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Seal (encrypt) a file
    #[command(alias = "s")]
    Seal {
        /// Path to the file whose contents is to be sealed
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the armored sealed text to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Open (decrypt) a sealed file
    #[command(alias = "o")]
    Open {
        /// Path to the sealed file
        #[arg(short, long, value_name = "FILE")]
        input: PathBuf,

        /// Path to the file to write the plaintext to
        #[arg(short, long, value_name = "FILE")]
        output: PathBuf,
    },

    /// Estimate the strength of a password
    Strength,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", error_chain(&e));
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut reader = get_password_reader(cli.password_stdin);

    match cli.command {
        Commands::Seal { input, output } => {
            let params = KdfParams::hardened(cli.iterations)?;
            let mut reader = CachingPasswordReader::new(reader);
            check_password_policy(&mut reader)?;
            file_ops::seal_file(&input, &output, &params, &mut reader)
        }
        Commands::Open { input, output } => {
            let params = KdfParams::hardened(cli.iterations)?;
            file_ops::open_file(&input, &output, &params, &mut *reader)
        }
        Commands::Strength => {
            let password = reader.read_password()?;
            println!("{}", strength::assess(&password));
            Ok(())
        }
    }
}

/// Enforce the minimum password length for new sealed files and warn
/// about weak passwords.
fn check_password_policy(reader: &mut dyn PasswordReader) -> Result<()> {
    let password = reader.read_password()?;
    let assessment = strength::assess(&password);

    if assessment.length < strength::MIN_LENGTH {
        return Err(CrypticError::invalid_input(format!(
            "password must be at least {} characters",
            strength::MIN_LENGTH
        )));
    }
    if assessment.bucket <= StrengthBucket::Weak {
        eprintln!("Warning: password strength is {}", assessment);
    }
    Ok(())
}

fn get_password_reader(use_stdin: bool) -> Box<dyn PasswordReader> {
    if use_stdin {
        Box::new(ReaderPasswordReader::new(Box::new(std::io::stdin())))
    } else {
        Box::new(TerminalPasswordReader::new())
    }
}

fn error_chain(err: &CrypticError) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}
