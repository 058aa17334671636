use std::{fs, io, path::PathBuf, time::Duration};

use golife::{pattern, Mode, Point};
use thiserror::Error;

pub const USAGE: &str = "\
usage: golife [PATTERN] [options]

PATTERN is a text file where '#' marks an alive cell. Without it the
initial state is random.

options:
    --size WxH | N    grid size, default 10x10
    --stochastic      randomly prune survivors after every step
    --seed N          seed the random source
    --eager N         print N precomputed generations as JSON and exit
    --interval MS     autoplay tick in milliseconds, default 200
    --help            show this message

keys: q quit, arrows pan, n next, p previous, g newest, space play, +/- speed";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unknown argument `{0}`")]
    UnknownArgument(String),

    #[error("missing value for `{0}`")]
    MissingValue(&'static str),

    #[error("invalid value `{value}` for `{flag}`")]
    InvalidValue { flag: &'static str, value: String },

    #[error("cannot read pattern {}: {source}", path.display())]
    Pattern {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub pattern: Option<PathBuf>,
    pub grid_size: (u32, u32),
    pub mode: Mode,
    pub seed: Option<u64>,
    pub eager: Option<usize>,
    pub interval: Duration,
    pub help: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            pattern: None,
            grid_size: (10, 10),
            mode: Mode::Deterministic,
            seed: None,
            eager: None,
            interval: Duration::from_millis(200),
            help: false,
        }
    }
}

impl Config {
    /// reads the arguments following the program name.
    pub fn from_args(args: impl IntoIterator<Item = String>) -> Result<Self, ConfigError> {
        let mut config = Config::default();
        let mut args = args.into_iter();

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--help" | "-h" => config.help = true,
                "--stochastic" => config.mode = Mode::Stochastic,
                "--size" => {
                    let value = value_of("--size", args.next())?;
                    config.grid_size = parse_size(&value).ok_or(ConfigError::InvalidValue {
                        flag: "--size",
                        value,
                    })?;
                }
                "--seed" => config.seed = Some(parse_number("--seed", args.next())?),
                "--eager" => config.eager = Some(parse_number("--eager", args.next())?),
                "--interval" => {
                    let millis = parse_number("--interval", args.next())?;
                    config.interval = Duration::from_millis(millis);
                }
                path if config.pattern.is_none() && !path.starts_with('-') => {
                    config.pattern = Some(PathBuf::from(path))
                }
                other => return Err(ConfigError::UnknownArgument(other.to_string())),
            }
        }
        Ok(config)
    }

    /// the points of the pattern file, or none for a random start.
    pub fn initial_points(&self) -> Result<Vec<Point>, ConfigError> {
        let Some(path) = &self.pattern else {
            return Ok(vec![]);
        };
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Pattern {
            path: path.clone(),
            source,
        })?;
        Ok(pattern::parse(&content))
    }
}

fn value_of(flag: &'static str, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or(ConfigError::MissingValue(flag))
}

fn parse_number<T>(flag: &'static str, value: Option<String>) -> Result<T, ConfigError>
where
    T: std::str::FromStr,
{
    let value = value_of(flag, value)?;
    value
        .parse()
        .map_err(|_| ConfigError::InvalidValue { flag, value })
}

/// `WxH`, or `N` for a square grid.
fn parse_size(value: &str) -> Option<(u32, u32)> {
    match value.split_once(['x', 'X']) {
        Some((x, y)) => Some((x.trim().parse().ok()?, y.trim().parse().ok()?)),
        None => {
            let size = value.trim().parse().ok()?;
            Some((size, size))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Result<Config, ConfigError> {
        Config::from_args(args.iter().map(|arg| arg.to_string()))
    }

    #[test]
    fn test_defaults() {
        assert_eq!(parse(&[]).unwrap(), Config::default());
    }

    #[test]
    fn test_full_command_line() {
        let config = parse(&[
            "glider.txt",
            "--size",
            "20x12",
            "--stochastic",
            "--seed",
            "7",
            "--eager",
            "40",
            "--interval",
            "80",
        ])
        .unwrap();
        assert_eq!(config.pattern, Some(PathBuf::from("glider.txt")));
        assert_eq!(config.grid_size, (20, 12));
        assert_eq!(config.mode, Mode::Stochastic);
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.eager, Some(40));
        assert_eq!(config.interval, Duration::from_millis(80));
    }

    #[test]
    fn test_square_size() {
        assert_eq!(parse_size("15"), Some((15, 15)));
        assert_eq!(parse_size("3X4"), Some((3, 4)));
        assert_eq!(parse_size("0x4"), Some((0, 4)));
        assert_eq!(parse_size("x4"), None);
        assert_eq!(parse_size("-2"), None);
    }

    #[test]
    fn test_errors() {
        assert!(matches!(
            parse(&["--size"]),
            Err(ConfigError::MissingValue("--size"))
        ));
        assert!(matches!(
            parse(&["--seed", "abc"]),
            Err(ConfigError::InvalidValue { flag: "--seed", .. })
        ));
        assert!(matches!(
            parse(&["--fast"]),
            Err(ConfigError::UnknownArgument(arg)) if arg == "--fast"
        ));
        assert!(matches!(
            parse(&["a.txt", "b.txt"]),
            Err(ConfigError::UnknownArgument(arg)) if arg == "b.txt"
        ));
    }

    #[test]
    fn test_missing_pattern_file() {
        let config = parse(&["/nonexistent/golife/pattern.txt"]).unwrap();
        assert!(matches!(
            config.initial_points(),
            Err(ConfigError::Pattern { .. })
        ));
        assert!(Config::default().initial_points().unwrap().is_empty());
    }
}
