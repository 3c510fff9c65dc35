//! Honeyhoard: hexagonal falling-block puzzle in the terminal.

mod app;
mod input;
mod theme;
mod ui;

use anyhow::{Context, Result, bail};
use app::{App, AppOptions};
use clap::{Parser, ValueEnum};
use honeyhoard::{DragPolicy, GameConfig, GameState};
use rand::Rng;

fn main() -> Result<()> {
    let args = Args::parse();
    if !(args.tick_rate.is_finite() && args.tick_rate > 0.0) {
        bail!("--tick-rate must be a positive number, got {}", args.tick_rate);
    }
    let config = args.game_config();
    let seed = args.seed.unwrap_or_else(|| rand::rng().random());
    let game = GameState::new(config, seed).context("invalid game settings")?;
    let theme = theme::Theme::for_palette(args.palette)?;
    let options = AppOptions {
        tick_rate: args.tick_rate,
        animate: !args.no_animation,
        skip_menu: args.no_menu,
    };
    App::new(game, theme, options).run()
}

/// Hexagonal falling-block puzzle in the terminal.
#[derive(Debug, Parser)]
#[command(
    name = "honeyhoard",
    version,
    about = "Hexagonal falling-block puzzle in the terminal. Fill a straight line of honeycomb cells to clear it.",
    long_about = "Honeyhoard drops polyhex pieces into a hexagon-shaped honeycomb.\n\n\
        Any straight run of filled cells along one of the three hex axes that is long \
        enough is cleared and scored (10 points per cell). Pieces can also be dragged \
        with the mouse and dropped anywhere they fit.\n\n\
        CONTROLS:\n  Left/Right (a/d, h/l)  Move      Up/Space (w, k)  Rotate\n  \
        Down (s, j)           Soft drop P                Pause\n  \
        R                     Restart   Enter            Start     Q / Esc  Quit"
)]
pub struct Args {
    /// Rule set: hoard (5-cell lines, ten shapes) or classic (3-cell lines, four small shapes).
    #[arg(long, default_value = "hoard")]
    pub variant: Variant,

    /// Board radius in cells from the centre.
    #[arg(long, value_name = "N", value_parser = clap::value_parser!(i32).range(1..=12))]
    pub radius: Option<i32>,

    /// Override the run length that clears a line.
    #[arg(long, value_name = "N")]
    pub threshold: Option<usize>,

    /// Seed for piece selection; random when omitted.
    #[arg(long, value_name = "SEED")]
    pub seed: Option<u64>,

    /// Which keys still work while a piece is being dragged.
    #[arg(long, default_value = "allow-all")]
    pub drag_policy: DragPolicyArg,

    /// Game ticks per second. Fall intervals are counted in ticks.
    #[arg(long, default_value = "60.0", value_name = "RATE")]
    pub tick_rate: f64,

    /// Colour palette.
    #[arg(long, default_value = "honey")]
    pub palette: Palette,

    /// Skip the title screen and start immediately.
    #[arg(long)]
    pub no_menu: bool,

    /// Disable the line-clear highlight and fade.
    #[arg(long)]
    pub no_animation: bool,
}

impl Args {
    fn game_config(&self) -> GameConfig {
        let mut config = match self.variant {
            Variant::Hoard => GameConfig::default(),
            Variant::Classic => GameConfig::classic(),
        };
        if let Some(radius) = self.radius {
            config = config.with_radius(radius);
        }
        if let Some(threshold) = self.threshold {
            config.clear_threshold = threshold;
        }
        config.drag_policy = self.drag_policy.into();
        config
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Palette {
    #[default]
    Honey,

    #[value(alias = "highcontrast", alias = "contrast")]
    HighContrast,

    #[value(alias = "colourblind")]
    Colorblind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Variant {
    #[default]
    Hoard,
    #[value(alias = "horde")]
    Classic,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum DragPolicyArg {
    #[default]
    AllowAll,
    AllowRotate,
    BlockKeys,
}

impl From<DragPolicyArg> for DragPolicy {
    fn from(arg: DragPolicyArg) -> Self {
        match arg {
            DragPolicyArg::AllowAll => Self::AllowAll,
            DragPolicyArg::AllowRotate => Self::AllowRotate,
            DragPolicyArg::BlockKeys => Self::BlockKeys,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_map_to_hoard_config() {
        let args = Args::parse_from(["honeyhoard"]);
        assert_eq!(args.game_config(), GameConfig::default());
        assert_eq!(args.palette, Palette::Honey);
    }

    #[test]
    fn test_overrides() {
        let args = Args::parse_from([
            "honeyhoard",
            "--variant",
            "classic",
            "--radius",
            "4",
            "--threshold",
            "4",
            "--drag-policy",
            "block-keys",
        ]);
        let config = args.game_config();
        assert_eq!(config.board_radius, 4);
        assert_eq!(config.clear_threshold, 4);
        assert_eq!(config.catalog.len(), 4);
        assert_eq!(config.drag_policy, DragPolicy::BlockKeys);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_radius_out_of_range_rejected() {
        assert!(Args::try_parse_from(["honeyhoard", "--radius", "0"]).is_err());
    }
}
