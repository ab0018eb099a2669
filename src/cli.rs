use crate::error::{Error, Result};
use chrono::Duration;
use lazy_static::lazy_static;
use regex::Regex;
use simplelog::LevelFilter;

const DURATION_PART_PATTERN: &str = r"(\d+(?:\.\d+)?)(ms|s|m|h|d)";
const DURATION_PATTERN: &str = r"^(?:\d+(?:\.\d+)?(?:ms|s|m|h|d))+$";

fn select_log_level_filter(verbosity: u64, debug: bool) -> LevelFilter {
    if debug {
        return LevelFilter::Debug.max(select_log_level_filter(verbosity, false));
    }

    match verbosity {
        0 => LevelFilter::Info,
        1 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

pub fn init_logging(verbosity: u64, debug: bool) -> std::result::Result<(), log::SetLoggerError> {
    simplelog::TermLogger::init(
        select_log_level_filter(verbosity, debug),
        simplelog::Config::default(),
        simplelog::TerminalMode::Stderr,
        simplelog::ColorChoice::Auto,
    )
}

/// Parse a duration like `720h`, `1h30m`, or `90d`.
pub fn parse_duration(input: &str) -> Result<Duration> {
    lazy_static! {
        static ref DURATION_RE: Regex = Regex::new(DURATION_PATTERN).unwrap();
        static ref DURATION_PART_RE: Regex = Regex::new(DURATION_PART_PATTERN).unwrap();
    }

    let input = input.trim();

    if input == "0" {
        return Ok(Duration::zero());
    }

    if !DURATION_RE.is_match(input) {
        return Err(Error::DurationParse(input.to_string()));
    }

    let mut millis = 0f64;

    for part in DURATION_PART_RE.captures_iter(input) {
        let value = part[1]
            .parse::<f64>()
            .map_err(|_| Error::DurationParse(input.to_string()))?;
        let unit_millis = match &part[2] {
            "ms" => 1.0,
            "s" => 1_000.0,
            "m" => 60_000.0,
            "h" => 3_600_000.0,
            _ => 86_400_000.0,
        };

        millis += value * unit_millis;
    }

    Ok(Duration::milliseconds(millis.round() as i64))
}
