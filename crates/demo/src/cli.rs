//! CLI argument parsing for the demo binary.

use clap::Parser;

/// mc-tui-demo - exercises the core terminal UI engine end-to-end.
#[derive(Parser, Debug)]
#[command(name = "mc-tui-demo", version, about)]
pub struct Cli {
    /// Target frame rate, clamped to 1..=60.
    #[arg(long, env = "MC_TUI_FPS", default_value = "30")]
    pub fps: u32,

    /// Disable color output (styles still apply bold/reverse, but all
    /// foreground/background colors collapse to the terminal default).
    #[arg(long)]
    pub no_color: bool,

    /// Path to write log output. Logging never goes to stdout/stderr, since
    /// those are the alternate-screen surface.
    #[arg(long, default_value = "mc-tui-demo.log")]
    pub log_file: String,
}

impl Cli {
    /// Parse CLI arguments.
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
