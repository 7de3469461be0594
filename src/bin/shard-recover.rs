use clap::{crate_version, Parser, Subcommand};
use std::error::Error;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use shard_recover::bigint::BigInt;
use shard_recover::config::{Mode, OutputFormat, RecoverConfig};
use shard_recover::constants::{CONFIG_FILE_NAME, DEFAULT_COEFFICIENT_BOUND, DEFAULT_CONFIG_DIR};
use shard_recover::dealer::{deal, DealOptions};
use shard_recover::decode_share;
use shard_recover::input::TestCase;
use shard_recover::interpolate::{ExactInterpolator, Interpolator, ReferenceInterpolator};
use shard_recover::report::Report;
use shard_recover::solver::ConsensusSolver;

#[derive(Debug, Subcommand)]
enum CliArgument {
    /// Recover the secret from one or more test case files and report shares that look faulty.
    Solve {
        /// Test case files, solved in the order given.
        #[clap(required = true)]
        files: Vec<PathBuf>,

        /// Interpolation mode, overrides the configured mode.
        #[clap(long, short, value_enum)]
        mode: Option<Mode>,

        /// Print reports as JSON.
        #[clap(long, short)]
        json: bool,

        /// Render secrets as hex.
        #[clap(long)]
        hex: bool,
    },

    /// Decode a single share value to decimal.
    Decode {
        /// Base the value is written in (2-36).
        #[clap(long, short)]
        base: u32,

        /// Digits of the value.
        #[clap(long, short)]
        value: String,
    },

    /// Split a secret into encoded shares and write them as a test case.
    Deal {
        /// Non-negative decimal secret.
        #[clap(long)]
        secret: String,

        /// Share threshold.
        #[clap(long, short)]
        threshold: usize,

        /// Number of shares to generate.
        #[clap(long, short)]
        shares: usize,

        /// Encode every share in this base, otherwise a random base per share.
        #[clap(long, short)]
        base: Option<u32>,

        /// Corrupt the share with this identifier (repeatable).
        #[clap(long, short)]
        faulty: Vec<u64>,

        /// Exclusive upper bound for random coefficients.
        #[clap(long)]
        bound: Option<String>,

        /// Write the test case here instead of stdout.
        #[clap(long, short)]
        output: Option<PathBuf>,
    },

    /// Write a default configuration file into the configuration directory.
    InitConfig,
}

#[derive(Parser, Debug)]
#[command(name = "shard-recover")]
#[command(version = crate_version!())]
#[command(
    about = "shard-recover - recover a Shamir secret and spot faulty shares",
    long_about = "shard-recover reads test cases of encoded shares, each value written in its own base between 2 and 36, and reconstructs the secret by interpolating every threshold-sized subset of the shares and taking the most frequent result. Shares whose exclusion yields a different result are reported as likely faulty. Settings are read from conf.toml in the configuration directory and from SHARD_* environment variables; flags override both."
)]
struct Opt {
    /// Directory holding conf.toml, created with defaults when missing.
    #[clap(long, short)]
    config_dir: Option<PathBuf>,

    /// Subcommand to run.
    #[clap(subcommand)]
    argument: CliArgument,
}

fn main() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .try_init();

    let opt = Opt::parse();

    match opt.argument {
        CliArgument::Solve {
            files,
            mode,
            json,
            hex,
        } => {
            let mut config = load_config(opt.config_dir.as_deref())?;
            if let Some(mode) = mode {
                config.mode = mode;
            }
            if json {
                config.output = OutputFormat::Json;
            }
            config.hex |= hex;
            debug!("Using config: {:?}", config);

            for file in files {
                let report = match config.mode {
                    Mode::Reference => solve_file(&file, &config, ReferenceInterpolator)?,
                    Mode::Exact => solve_file(&file, &config, ExactInterpolator)?,
                };
                print!("{}", report.render(config.output)?);
                if config.output == OutputFormat::Json {
                    println!();
                }
            }
        }

        CliArgument::Decode { base, value } => {
            let decoded = decode_share(base, &value)?;
            println!("{decoded}");
        }

        CliArgument::Deal {
            secret,
            threshold,
            shares,
            base,
            faulty,
            bound,
            output,
        } => {
            let config = load_config(opt.config_dir.as_deref())?;
            if shares > config.max_shares {
                warn!(
                    "⚠️ dealing {} shares, more than the configured solve limit of {}",
                    shares, config.max_shares
                );
            }

            let secret = BigInt::from_decimal_str(&secret)?;
            let bound = match bound {
                Some(bound) => BigInt::from_decimal_str(&bound)?,
                None => BigInt::from(DEFAULT_COEFFICIENT_BOUND),
            };
            let options = DealOptions {
                threshold,
                shares,
                base,
                faulty: faulty.into_iter().collect(),
                bound,
            };

            let case = deal(&secret, &options)?;
            let json = case.to_json_pretty()?;
            match output {
                Some(path) => {
                    fs::write(&path, json)?;
                    println!("✂️  Secret has been split into {} shares.", shares);
                    println!("    threshold: {}", threshold);
                    println!("    written to: {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        CliArgument::InitConfig => {
            let dir = opt
                .config_dir
                .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_DIR));
            let path = RecoverConfig::init(&dir)?;
            println!("📝 config: {}", path.display());
        }
    }

    Ok(())
}

/// Uses the explicit directory if given, else `.shard/conf.toml` when it
/// exists, else defaults plus environment.
fn load_config(dir: Option<&Path>) -> Result<RecoverConfig, Box<dyn Error>> {
    let config = match dir {
        Some(dir) => RecoverConfig::new(dir)?,
        None if Path::new(DEFAULT_CONFIG_DIR).join(CONFIG_FILE_NAME).exists() => {
            RecoverConfig::new(DEFAULT_CONFIG_DIR)?
        }
        None => RecoverConfig::from_env()?,
    };
    Ok(config)
}

fn solve_file<I: Interpolator>(
    file: &Path,
    config: &RecoverConfig,
    interpolator: I,
) -> Result<Report, Box<dyn Error>> {
    let case = TestCase::from_path(file)?;
    if case.shares.len() > config.max_shares {
        return Err(format!(
            "{} has {} shares, more than the configured limit of {}",
            file.display(),
            case.shares.len(),
            config.max_shares
        )
        .into());
    }

    let points = case.points()?;
    let reconstruction = ConsensusSolver::new(interpolator).solve(&points, case.threshold)?;
    info!(
        "Solved {:?}: {} subsets, {} suspects",
        file,
        reconstruction.subsets,
        reconstruction.suspects.len()
    );

    Ok(Report::new(
        file.display().to_string(),
        &reconstruction,
        config.hex,
    ))
}
