//! Command-line arguments.
use std::path::PathBuf;

use anyhow::{anyhow, bail, Context, Result};

pub const USAGE: &str = "\
Usage: hexgrid <config.ron> [options]

Options:
  --rows <N>      grid rows (default 10)
  --cols <N>      grid columns (default 10)
  --out <STEM>    output path without extension
                  (default generated-grids/<config-name>-<unix-time>)
  --seed <N>      seed for a reproducible layout
  --no-pdf        skip the PDF document
  --open          open the HTML page when done
  -h, --help      print this help";

const DEFAULT_SIDE: usize = 10;

/// Parsed arguments of a generation run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Args {
    pub config: PathBuf,
    pub rows: usize,
    pub cols: usize,
    pub out: Option<PathBuf>,
    pub seed: Option<u64>,
    pub pdf: bool,
    pub open: bool,
}

impl Args {
    pub fn new(config: impl Into<PathBuf>) -> Self {
        Self {
            config: config.into(),
            rows: DEFAULT_SIDE,
            cols: DEFAULT_SIDE,
            out: None,
            seed: None,
            pdf: true,
            open: false,
        }
    }

    /// Parse arguments, excluding the program name.
    pub fn parse<I>(args: I) -> Result<Command>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = None;
        let mut parsed = Args::new(PathBuf::new());
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            let mut value = |flag: &str| {
                args.next()
                    .ok_or_else(|| anyhow!("{flag} expects a value"))
            };
            match arg.as_str() {
                "-h" | "--help" => return Ok(Command::Help),
                "--rows" => parsed.rows = dimension("--rows", &value("--rows")?)?,
                "--cols" => parsed.cols = dimension("--cols", &value("--cols")?)?,
                "--out" => parsed.out = Some(PathBuf::from(value("--out")?)),
                "--seed" => {
                    let raw = value("--seed")?;
                    parsed.seed = Some(
                        raw.parse()
                            .with_context(|| format!("--seed: '{raw}' is not a number"))?,
                    );
                }
                "--no-pdf" => parsed.pdf = false,
                "--open" => parsed.open = true,
                flag if flag.starts_with('-') => bail!("unknown option '{flag}'\n\n{USAGE}"),
                path => {
                    if config.replace(PathBuf::from(path)).is_some() {
                        bail!("only one configuration file may be given");
                    }
                }
            }
        }

        parsed.config = config.ok_or_else(|| anyhow!("missing configuration file\n\n{USAGE}"))?;
        Ok(Command::Run(parsed))
    }
}

/// What the binary should do.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Command {
    Run(Args),
    Help,
}

fn dimension(flag: &str, raw: &str) -> Result<usize> {
    let n: usize = raw
        .parse()
        .with_context(|| format!("{flag}: '{raw}' is not a number"))?;
    if n == 0 {
        bail!("{flag} must be at least 1");
    }
    Ok(n)
}
