use std::path::PathBuf;

use clap::{Parser, ValueEnum};
use log::LevelFilter;

/// Custom enum for log levels that can be used with clap's ValueEnum
#[derive(Debug, Clone, ValueEnum)]
pub enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// Convert our custom LogLevel enum to log crate's LevelFilter
impl From<LogLevel> for LevelFilter {
    fn from(level: LogLevel) -> Self {
        match level {
            LogLevel::Error => LevelFilter::Error,
            LogLevel::Warn => LevelFilter::Warn,
            LogLevel::Info => LevelFilter::Info,
            LogLevel::Debug => LevelFilter::Debug,
            LogLevel::Trace => LevelFilter::Trace,
        }
    }
}

/// Command line arguments structure using clap derive macros
#[derive(Debug, Parser)]
#[command(name = "whitted")]
#[command(about = "A recursive ray tracer for triangle scenes")]
pub struct Args {
    /// Scene file (TOML). Renders the built-in demo scene when omitted
    #[arg(short, long)]
    pub scene: Option<PathBuf>,

    /// Set the logging level
    #[arg(long, default_value = "info")]
    pub debug_level: LogLevel,

    /// Image width in pixels
    #[arg(long, default_value = "800")]
    pub width: u32,

    /// Image height in pixels
    #[arg(long, default_value = "600")]
    pub height: u32,

    /// Maximum reflection depth, overrides the scene's value
    #[arg(long, short = 'd')]
    pub max_depth: Option<u32>,

    /// Output file path (.png for 8-bit with gamma correction, .exr for HDR linear)
    #[arg(short, long, default_value = "output.png")]
    pub output: PathBuf,

    /// Also write the scene that was rendered to this TOML file
    #[arg(long)]
    pub dump_scene: Option<PathBuf>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::parse_from(["whitted"]);
        assert!(args.scene.is_none());
        assert_eq!((args.width, args.height), (800, 600));
        assert!(args.max_depth.is_none());
        assert_eq!(args.output, PathBuf::from("output.png"));
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Info);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "whitted",
            "--scene",
            "room.toml",
            "-d",
            "0",
            "--debug-level",
            "trace",
            "-o",
            "room.exr",
        ]);
        assert_eq!(args.scene, Some(PathBuf::from("room.toml")));
        assert_eq!(args.max_depth, Some(0));
        assert_eq!(args.output, PathBuf::from("room.exr"));
        assert_eq!(LevelFilter::from(args.debug_level), LevelFilter::Trace);
    }
}
