use std::fs;
use std::path::PathBuf;

use chrono::Utc;
use clap::{Args, Parser, Subcommand};

use crate::services::{RefreshPipeline, WidgetConfig};

/// LeetCode submission streak and activity heatmap
#[derive(Parser)]
#[command(name = "leetstreak")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(flatten)]
    overrides: ConfigOverrides,

    #[command(subcommand)]
    command: Option<Commands>,
}

/// Flags layered over the config file
#[derive(Args, Debug, Default)]
struct ConfigOverrides {
    /// Config file (defaults to ~/.leetstreak/config.json)
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// LeetCode username
    #[arg(short, long, global = true)]
    username: Option<String>,

    /// Fixed timezone offset from UTC in hours (e.g. 5.5)
    #[arg(long, global = true, allow_hyphen_values = true)]
    tz_offset: Option<f64>,

    /// Refresh interval in milliseconds
    #[arg(long, global = true)]
    interval_ms: Option<u64>,

    /// Heatmap width budget in pixels
    #[arg(long, global = true)]
    width: Option<u32>,

    /// Stats API base URL
    #[arg(long, global = true)]
    api_base: Option<String>,

    /// Disable today highlighting and the 4+ color level
    #[arg(long, global = true)]
    no_highlight: bool,
}

impl ConfigOverrides {
    fn config_path(&self) -> crate::types::Result<PathBuf> {
        match &self.config {
            Some(path) => Ok(path.clone()),
            None => WidgetConfig::default_path(),
        }
    }

    fn apply(&self, mut config: WidgetConfig) -> WidgetConfig {
        if let Some(username) = &self.username {
            config.username = Some(username.clone());
        }
        if let Some(hours) = self.tz_offset {
            config.timezone_offset_hours = hours;
        }
        if let Some(ms) = self.interval_ms {
            config.refresh_interval_ms = ms;
        }
        if let Some(width) = self.width {
            config.layout.width = width;
        }
        if let Some(api_base) = &self.api_base {
            config.api_base = api_base.clone();
        }
        if self.no_highlight {
            config.highlight_today = false;
        }
        config
    }

    fn resolve(&self) -> crate::types::Result<WidgetConfig> {
        let file_config = WidgetConfig::load_or_default(&self.config_path()?)?;
        Ok(self.apply(file_config))
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Launch the live terminal widget (default)
    Tui,

    /// Fetch once and print streak statistics
    Show {
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Fetch once and write the heatmap as SVG
    Svg {
        /// Output file (stdout when omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the resolved configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        init_logging(matches!(self.command, None | Some(Commands::Tui)));
        let config = self.overrides.resolve()?;

        match self.command {
            None | Some(Commands::Tui) => crate::tui::run(config),
            Some(Commands::Show { json }) => {
                let data = RefreshPipeline::new(config)?.refresh(Utc::now())?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&data)?);
                } else {
                    println!("@{}", data.username);
                    println!("Current streak: {}", data.stats.current_streak);
                    println!("Max streak:     {}", data.stats.max_streak);
                    println!("Submissions (52 weeks): {}", data.grid.total_submissions());
                }
                Ok(())
            }
            Some(Commands::Svg { output }) => {
                let data = RefreshPipeline::new(config)?.refresh(Utc::now())?;
                let svg = data.image.to_svg();
                match output {
                    Some(path) => fs::write(&path, svg)?,
                    None => println!("{}", svg),
                }
                Ok(())
            }
            Some(Commands::Config { init }) => {
                let path = self.overrides.config_path()?;
                if init {
                    if path.exists() {
                        println!("Config already exists at {}", path.display());
                    } else {
                        WidgetConfig::default().save(&path)?;
                        println!("Wrote default config to {}", path.display());
                    }
                }
                println!("# {}", path.display());
                println!("{}", serde_json::to_string_pretty(&config)?);
                if let Err(e) = config.validate() {
                    eprintln!("warning: {}", e);
                }
                Ok(())
            }
        }
    }
}

/// Initialize env_logger. The TUI owns the terminal, so it logs nothing
/// unless RUST_LOG asks for it.
fn init_logging(tui: bool) {
    let default_filter = if tui { "off" } else { "warn" };
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env).try_init();
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_cli_parse_no_args() {
        let cli = Cli::try_parse_from(["leetstreak"]).unwrap();
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_show_json() {
        let cli = Cli::try_parse_from(["leetstreak", "show", "--json"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Show { json: true })));
    }

    #[test]
    fn test_cli_parse_svg_output() {
        let cli = Cli::try_parse_from(["leetstreak", "svg", "-o", "out.svg"]).unwrap();
        match cli.command {
            Some(Commands::Svg { output }) => assert_eq!(output, Some(PathBuf::from("out.svg"))),
            _ => panic!("Expected Svg command"),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "leetstreak",
            "show",
            "--username",
            "alice",
            "--tz-offset",
            "-3.5",
            "--no-highlight",
        ])
        .unwrap();

        assert_eq!(cli.overrides.username.as_deref(), Some("alice"));
        assert_eq!(cli.overrides.tz_offset, Some(-3.5));
        assert!(cli.overrides.no_highlight);
    }

    #[test]
    fn test_cli_parse_config_init() {
        let cli = Cli::try_parse_from(["leetstreak", "config", "--init"]).unwrap();
        assert!(matches!(cli.command, Some(Commands::Config { init: true })));
    }

    #[test]
    fn test_overrides_win_over_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        fs::write(&path, r#"{"username": "file_user", "refresh_interval_ms": 60000}"#).unwrap();

        let overrides = ConfigOverrides {
            config: Some(path),
            username: Some("flag_user".into()),
            width: Some(500),
            ..Default::default()
        };
        let config = overrides.resolve().unwrap();

        assert_eq!(config.username().unwrap(), "flag_user");
        assert_eq!(config.refresh_interval_ms, 60_000);
        assert_eq!(config.layout.width, 500);
        assert!(config.highlight_today);
    }

    #[test]
    fn test_missing_config_file_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let overrides = ConfigOverrides {
            config: Some(temp_dir.path().join("absent.json")),
            ..Default::default()
        };
        assert_eq!(overrides.resolve().unwrap(), WidgetConfig::default());
    }
}
