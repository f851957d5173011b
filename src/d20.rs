use anyhow::{Context, Result};
use mosaic::{helpers, puzzle};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};
use std::path::PathBuf;

const LOG_LEVEL_VAR: &str = "MOSAIC_LOG";
const DEFAULT_INPUT: &str = "d20";

#[derive(Debug)]
struct Config {
    /// First command line argument. Without it `data/d20.txt` is read, which
    /// isn't checked in, so pass a path like `data/d20_sample.txt` until it is.
    input_path: Option<PathBuf>,
    log_level: LevelFilter,
}

fn parse_log_level(value: Option<&str>) -> Result<LevelFilter> {
    match value {
        None => Ok(LevelFilter::Warn),
        Some(level) => level
            .parse::<LevelFilter>()
            .with_context(|| format!("Invalid {} value '{}'", LOG_LEVEL_VAR, level)),
    }
}

impl Config {
    fn from_env() -> Result<Self> {
        let input_path = std::env::args_os().nth(1).map(PathBuf::from);
        let level = std::env::var(LOG_LEVEL_VAR).ok();
        let log_level = parse_log_level(level.as_deref())?;
        Ok(Config {
            input_path,
            log_level,
        })
    }

    fn read_input(&self) -> Result<String> {
        match &self.input_path {
            Some(path) => helpers::get_data_from_path_res(path)
                .with_context(|| format!("Coudn't read {}.", path.display())),
            None => helpers::get_data_from_file_res(DEFAULT_INPUT).with_context(|| {
                format!(
                    "Coudn't read data/{}.txt, pass the input path as the first argument.",
                    DEFAULT_INPUT
                )
            }),
        }
    }
}

fn init_logging(level: LevelFilter) -> Result<()> {
    TermLogger::init(
        level,
        simplelog::Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    )
    .context("Couldn't set up logging.")
}

fn main() -> Result<()> {
    let config = Config::from_env()?;
    init_logging(config.log_level)?;
    log::debug!("{:?}", config);

    let input = config.read_input()?;
    let answers = puzzle::solve(&input)?;
    println!(
        "The multiplication of the 4 corner tile ids is: {}",
        answers.corner_product
    );
    println!("Water roughness is: {}", answers.roughness);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level() {
        assert_eq!(parse_log_level(None).unwrap(), LevelFilter::Warn);
        assert_eq!(parse_log_level(Some("debug")).unwrap(), LevelFilter::Debug);
        assert_eq!(parse_log_level(Some("TRACE")).unwrap(), LevelFilter::Trace);
        assert!(parse_log_level(Some("loud")).is_err());
    }

    #[test]
    fn test_input_path() {
        let config = Config {
            input_path: Some(PathBuf::from("data/d20_small.txt")),
            log_level: LevelFilter::Off,
        };
        let input = config.read_input().unwrap();
        assert_eq!(puzzle::solve(&input).unwrap().roughness, 138);

        let config = Config {
            input_path: Some(PathBuf::from("data/d20_missing.txt")),
            log_level: LevelFilter::Off,
        };
        let e = config.read_input().unwrap_err();
        assert_eq!(e.to_string(), "Coudn't read data/d20_missing.txt.");
    }
}
