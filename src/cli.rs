// cli.rs - Command-line interface configuration
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WindowMode {
    #[default]
    Windowed,
    /// Exclusive fullscreen on the primary monitor
    Fullscreen,
    /// Borderless window covering the current monitor
    FullscreenWindow,
}

#[derive(Parser, Debug, Clone)]
#[command(name = "isometric-renderer")]
#[command(about = "Isometric tile renderer demo", long_about = None)]
pub struct Cli {
    /// Directory holding resources.json and the images it names
    #[arg(long, default_value = "resources")]
    pub resources: PathBuf,

    #[arg(long, default_value_t = 600)]
    pub width: u32,

    #[arg(long, default_value_t = 400)]
    pub height: u32,

    #[arg(long, value_enum, default_value_t = WindowMode::Windowed)]
    pub window_mode: WindowMode,

    /// Cap frame dispatch; uncapped when omitted
    #[arg(long)]
    pub fps: Option<u32>,

    /// Demo map width in cells
    #[arg(long, default_value_t = 16)]
    pub map_width: usize,

    /// Demo map height in cells
    #[arg(long, default_value_t = 16)]
    pub map_height: usize,
}
