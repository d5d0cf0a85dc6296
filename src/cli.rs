// Command-line options shared by the binaries

use crate::config::AppConfig;
use crate::grid::{GridError, GridResult};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliArgs {
    pub config_path: Option<PathBuf>,
    pub width: Option<usize>,
    pub height: Option<usize>,
    pub seed: Option<u64>,
    pub pattern: Option<String>,
    pub json: bool,
    pub help: bool,
}

pub const USAGE: &str =
    "[--width N] [--height N] [--seed N] [--pattern ROWS] [--config FILE] [--json] [--help]";

/// Parse arguments (without the program name)
pub fn parse_args<I>(args: I) -> GridResult<CliArgs>
where
    I: IntoIterator<Item = String>,
{
    let mut parsed = CliArgs::default();
    let mut args = args.into_iter();

    while let Some(arg) = args.next() {
        let mut value = |flag: &str| {
            args.next()
                .ok_or_else(|| GridError::Config(format!("{} requires a value", flag)))
        };
        match arg.as_str() {
            "--width" | "-w" => parsed.width = Some(parse_number(&arg, &value(&arg)?)?),
            "--height" => parsed.height = Some(parse_number(&arg, &value(&arg)?)?),
            "--seed" | "-s" => parsed.seed = Some(parse_number(&arg, &value(&arg)?)?),
            // `|` separates rows so a pattern fits in one argument
            "--pattern" | "-p" => parsed.pattern = Some(value(&arg)?.replace('|', "\n")),
            "--config" | "-c" => parsed.config_path = Some(PathBuf::from(value(&arg)?)),
            "--json" => parsed.json = true,
            "--help" | "-h" | "help" => parsed.help = true,
            other => return Err(GridError::Config(format!("unknown argument: {}", other))),
        }
    }

    Ok(parsed)
}

fn parse_number<T: std::str::FromStr>(flag: &str, value: &str) -> GridResult<T> {
    value
        .parse()
        .map_err(|_| GridError::Config(format!("{} expects a non-negative integer, got {:?}", flag, value)))
}

impl CliArgs {
    /// Config file (or environment defaults) with command-line overrides on top
    pub fn to_config(&self) -> GridResult<AppConfig> {
        let mut config = match &self.config_path {
            Some(path) => AppConfig::load_from_file(path)?,
            None => AppConfig::from_env(),
        };

        if let Some(width) = self.width {
            config.grid.width = Some(width);
        }
        if let Some(height) = self.height {
            config.grid.height = Some(height);
        }
        if let Some(seed) = self.seed {
            config.grid.seed = Some(seed);
        }
        if let Some(pattern) = &self.pattern {
            config.grid.matrix = None;
            config.grid.pattern = Some(pattern.clone());
        }

        config.validate()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_parse_flags() {
        let parsed = parse_args(args(&["--width", "12", "--height", "8", "-s", "7", "--json"])).unwrap();
        assert_eq!(parsed.width, Some(12));
        assert_eq!(parsed.height, Some(8));
        assert_eq!(parsed.seed, Some(7));
        assert!(parsed.json);
        assert!(!parsed.help);
    }

    #[test]
    fn test_parse_errors() {
        assert!(parse_args(args(&["--width"])).is_err());
        assert!(parse_args(args(&["--width", "-3"])).is_err());
        assert!(parse_args(args(&["--bogus"])).is_err());
    }

    #[test]
    fn test_pattern_overrides_config() {
        let parsed = parse_args(args(&["--pattern", "#.#|.#."])).unwrap();
        let config = parsed.to_config().unwrap();
        assert_eq!(config.grid.pattern.as_deref(), Some("#.#\n.#."));
        assert!(config.grid.matrix.is_none());
    }
}
