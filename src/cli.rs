use anyhow::{anyhow, Result};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CliArgs {
    pub config: PathBuf,
    /// Overrides `assets.map` from the config.
    pub map: Option<PathBuf>,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self { config: PathBuf::from("config.ron"), map: None }
    }
}

/// `[--config PATH] [--map PATH]`, without the program name.
pub fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut out = CliArgs::default();
    let mut i = 0usize;
    while i < args.len() {
        match args[i].as_str() {
            "--config" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --config"))?;
                out.config = PathBuf::from(v);
            }
            "--map" => {
                i += 1;
                let v = args.get(i).ok_or_else(|| anyhow!("missing value for --map"))?;
                out.map = Some(PathBuf::from(v));
            }
            other => return Err(anyhow!("unknown argument: {}", other)),
        }
        i += 1;
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_args_uses_defaults() {
        assert_eq!(parse_args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn both_flags_parse() {
        let a = parse_args(&args(&["--map", "assets/level2_map.tmj", "--config", "alt.ron"])).unwrap();
        assert_eq!(a.config, PathBuf::from("alt.ron"));
        assert_eq!(a.map, Some(PathBuf::from("assets/level2_map.tmj")));
    }

    #[test]
    fn missing_value_and_unknown_flag_fail() {
        assert!(parse_args(&args(&["--map"])).is_err());
        assert!(parse_args(&args(&["--fullscreen"])).is_err());
    }
}
