//! CLI command definitions.

use advision_core::AspectRatio;
use clap::{Args, Parser, Subcommand, ValueEnum};

/// AdVision - TV commercial storyboards from a product brief
#[derive(Parser, Debug)]
#[command(name = "advision")]
#[command(about = "Six-frame TV commercial storyboards from a product brief", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Emit logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Generate a script and render every frame
    Generate {
        /// Product brief
        #[command(flatten)]
        brief: BriefArgs,

        /// Aspect ratio for every frame (16:9, 9:16, 1:1, 4:3, 3:4)
        #[arg(long)]
        aspect_ratio: Option<AspectRatio>,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,

        /// Keep the session open and read commands from stdin
        #[arg(long)]
        interactive: bool,
    },

    /// Generate and print the script only, without images
    Script {
        /// Product brief
        #[command(flatten)]
        brief: BriefArgs,

        /// Output format
        #[arg(long, default_value = "human")]
        format: OutputFormat,
    },
}

/// Product brief fields
#[derive(Args, Debug, Clone)]
pub struct BriefArgs {
    /// Product or brand name
    #[arg(long)]
    pub name: String,

    /// Product description and key selling points
    #[arg(long)]
    pub description: String,

    /// Visual tone and style (defaults to the configured tone)
    #[arg(long)]
    pub tone: Option<String>,
}

/// Output format options
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}
