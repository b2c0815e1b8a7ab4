// src/config/validate.rs

use std::path::{Path, PathBuf};
use std::time::Duration;

use globset::Glob;

use crate::config::model::{ConfigFile, RawConfigFile, SourceSection};
use crate::errors::{LessgateError, Result};
use crate::gate::SourceMapping;

impl TryFrom<RawConfigFile> for ConfigFile {
    type Error = LessgateError;

    fn try_from(raw: RawConfigFile) -> std::result::Result<Self, Self::Error> {
        validate_raw_config(&raw)?;
        let timeout = parse_duration(&raw.config.timeout)
            .map_err(|e| LessgateError::ConfigError(format!("[config].timeout: {e}")))?;
        let debounce = parse_duration(&raw.config.debounce)
            .map_err(|e| LessgateError::ConfigError(format!("[config].debounce: {e}")))?;
        let mapping = mapping_from_section(&raw.source);
        Ok(ConfigFile::new_unchecked(
            raw.config,
            mapping,
            raw.watch.exclude,
            timeout,
            debounce,
        ))
    }
}

fn validate_raw_config(cfg: &RawConfigFile) -> Result<()> {
    validate_global_config(cfg)?;
    validate_source_section(&cfg.source)?;
    validate_exclude_patterns(&cfg.watch.exclude)?;
    Ok(())
}

fn validate_global_config(cfg: &RawConfigFile) -> Result<()> {
    if cfg.config.executable.trim().is_empty() {
        return Err(LessgateError::ConfigError(
            "[config].executable must not be empty".to_string(),
        ));
    }
    let cfg = &cfg.config;
    if cfg.script.is_none() && !cfg.bundled_compiler && runs_node(&cfg.executable) {
        return Err(LessgateError::ConfigError(
            "[config]: node needs a compiler script; set `script` or enable `bundled_compiler`"
                .to_string(),
        ));
    }
    Ok(())
}

// `node`, `node.exe` or a path to either.
fn runs_node(executable: &str) -> bool {
    Path::new(executable.trim())
        .file_stem()
        .and_then(|stem| stem.to_str())
        .is_some_and(|stem| stem.eq_ignore_ascii_case("node"))
}

// A missing `sources` list or pair path is not rejected here: it is a
// resolve-time configuration error, reported when a build actually needs it.
fn validate_source_section(section: &SourceSection) -> Result<()> {
    match section {
        SourceSection::Discover { root_name } => {
            if root_name.trim().is_empty() {
                return Err(LessgateError::ConfigError(
                    "[source].root_name must not be empty".to_string(),
                ));
            }
        }
        SourceSection::List { delimiter, .. } => {
            if delimiter.is_empty() {
                return Err(LessgateError::ConfigError(
                    "[source].delimiter must not be empty".to_string(),
                ));
            }
        }
        SourceSection::Pair { .. } => {}
    }
    Ok(())
}

fn validate_exclude_patterns(patterns: &[String]) -> Result<()> {
    for pat in patterns {
        Glob::new(pat).map_err(|e| {
            LessgateError::ConfigError(format!("[watch].exclude: invalid glob '{pat}': {e}"))
        })?;
    }
    Ok(())
}

fn mapping_from_section(section: &SourceSection) -> SourceMapping {
    match section {
        SourceSection::Discover { root_name } => SourceMapping::Discover {
            root_name: root_name.trim().to_string(),
        },
        SourceSection::List {
            sources,
            delimiter,
            out_dir,
        } => SourceMapping::List {
            sources: split_sources(sources.as_deref().unwrap_or(""), delimiter),
            out_dir: out_dir.clone().filter(|d| !d.as_os_str().is_empty()),
        },
        SourceSection::Pair {
            source,
            destination,
        } => SourceMapping::Pair {
            source: source.clone().filter(|p| !p.as_os_str().is_empty()),
            destination: destination.clone().filter(|p| !p.as_os_str().is_empty()),
        },
    }
}

/// Split a delimiter-separated source list, trimming and dropping blanks.
pub fn split_sources(list: &str, delimiter: &str) -> Vec<PathBuf> {
    list.split(delimiter)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(PathBuf::from)
        .collect()
}

/// Parse a short duration string such as `"250ms"`, `"30s"`, `"2m"`, `"1h"`.
pub fn parse_duration(s: &str) -> std::result::Result<Duration, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("empty duration string".to_string());
    }

    let idx = s
        .chars()
        .position(|c| !c.is_ascii_digit())
        .ok_or_else(|| "duration missing unit suffix".to_string())?;

    let (num_part, unit_part) = s.split_at(idx);
    let value: u64 = num_part
        .parse()
        .map_err(|e| format!("invalid duration number '{}': {}", num_part, e))?;

    let seconds_per_unit = match unit_part.trim().to_lowercase().as_str() {
        "ms" => return Ok(Duration::from_millis(value)),
        "s" => 1,
        "m" => 60,
        "h" => 60 * 60,
        unit => {
            return Err(format!(
                "unsupported duration unit '{}'; expected ms, s, m, or h",
                unit
            ))
        }
    };
    value
        .checked_mul(seconds_per_unit)
        .map(Duration::from_secs)
        .ok_or_else(|| format!("duration '{s}' is too large"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn durations_with_units() {
        assert_eq!(parse_duration("250ms"), Ok(Duration::from_millis(250)));
        assert_eq!(parse_duration(" 30s "), Ok(Duration::from_secs(30)));
        assert_eq!(parse_duration("2m"), Ok(Duration::from_secs(120)));
        assert!(parse_duration("10").is_err());
        assert!(parse_duration("5d").is_err());
        assert!(parse_duration("").is_err());
    }

    #[test]
    fn oversized_durations_are_rejected() {
        assert_eq!(
            parse_duration("5124095576030432h"),
            Err("duration '5124095576030432h' is too large".to_string())
        );
        assert!(parse_duration("307445734561825861m").is_err());
        assert_eq!(
            parse_duration("18446744073709551615s"),
            Ok(Duration::from_secs(u64::MAX))
        );
    }

    #[test]
    fn node_without_any_script_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.config.bundled_compiler = false;
        assert!(matches!(
            ConfigFile::try_from(raw.clone()),
            Err(LessgateError::ConfigError(_))
        ));

        raw.config.executable = "/usr/local/bin/node.exe".to_string();
        assert!(ConfigFile::try_from(raw.clone()).is_err());

        raw.config.executable = "lessc".to_string();
        assert!(ConfigFile::try_from(raw).is_ok());
    }

    #[test]
    fn source_list_split_trims_and_skips_blanks() {
        let got = split_sources(" a/x.less ;; b/y.less;", ";");
        assert_eq!(got, vec![PathBuf::from("a/x.less"), PathBuf::from("b/y.less")]);
    }

    #[test]
    fn empty_executable_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.config.executable = "  ".to_string();
        let err = ConfigFile::try_from(raw).unwrap_err();
        assert!(matches!(err, LessgateError::ConfigError(msg) if msg.contains("executable")));
    }

    #[test]
    fn bad_exclude_glob_is_rejected() {
        let mut raw = RawConfigFile::default();
        raw.watch.exclude = vec!["src/[".to_string()];
        assert!(matches!(
            ConfigFile::try_from(raw),
            Err(LessgateError::ConfigError(_))
        ));
    }
}
