//! Essence Arena entry point
//!
//! The native build has no window; it runs a headless autopilot session so
//! the simulation can be exercised and profiled from the command line.
//!
//! Usage: `essence-arena [--seed N] [--seconds N] [--settings path.json] [--quality low|medium|high]`

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    use clap::Parser;

    env_logger::init();
    log::info!("Essence Arena (native, headless) starting...");

    let args = native::Args::parse();
    let summary = native::run(&args);
    println!("{}", summary);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // The browser host drives `essence_arena::Game` directly
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::path::PathBuf;

    use clap::Parser;
    use essence_arena::consts::*;
    use essence_arena::sim::GameState;
    use essence_arena::{Game, QualityPreset, Settings};
    use glam::Vec2;

    #[derive(Parser, Debug)]
    #[command(name = "essence-arena", about = "Headless autopilot run of the arena simulation")]
    pub struct Args {
        /// RNG seed for the run
        #[arg(long, default_value_t = 1)]
        pub seed: u64,
        /// Simulated seconds before the run is stopped
        #[arg(long, default_value_t = 120.0)]
        pub seconds: f32,
        /// Settings JSON file
        #[arg(long)]
        pub settings: Option<PathBuf>,
        /// Quality preset, overrides the settings file
        #[arg(long, value_parser = parse_quality)]
        pub quality: Option<QualityPreset>,
    }

    fn parse_quality(s: &str) -> Result<QualityPreset, String> {
        QualityPreset::parse(s).ok_or_else(|| format!("unknown quality preset: {}", s))
    }

    /// Play one run with the autopilot and return the final HUD as JSON
    pub fn run(args: &Args) -> String {
        let mut settings = args
            .settings
            .as_deref()
            .map(Settings::load)
            .unwrap_or_default();
        if let Some(quality) = args.quality {
            settings.quality = quality;
        }
        log::info!(
            "Seed {}, {} s, quality {}",
            args.seed,
            args.seconds,
            settings.quality.as_str()
        );
        let mut game = Game::new(settings, Vec2::new(DEFAULT_WIDTH, DEFAULT_HEIGHT));
        game.start_game(args.seed);

        let total_ticks = (args.seconds / SIM_DT) as u64;
        while game.state.is_running() && game.state.time_ticks < total_ticks {
            autopilot(&mut game);
            game.frame(SIM_DT);
        }
        if game.state.is_running() {
            game.end_game();
        }

        match game.hud().to_json() {
            Ok(json) => json,
            Err(e) => {
                log::warn!("Could not serialize HUD: {}", e);
                game.game_over_message().unwrap_or_default().to_string()
            }
        }
    }

    /// Kite away from the nearest enemy while shooting at it
    fn autopilot(game: &mut Game) {
        for key in ["w", "a", "s", "d", "1", "2", " ", "="] {
            game.key_up(key);
        }
        let Some((target, dist)) = nearest_enemy(&game.state) else {
            game.set_firing(false);
            return;
        };

        game.pointer_move(target.x, target.y);
        game.set_firing(true);

        let away = game.state.player.pos - target;
        if dist < 220.0 {
            game.key_down(if away.x < 0.0 { "a" } else { "d" });
            game.key_down(if away.y < 0.0 { "w" } else { "s" });
        }
        if dist < SLASH_RANGE {
            game.key_down("1");
        }
        if dist < 80.0 {
            game.key_down(" ");
        }
        if game.state.enemies.len() >= 6 {
            game.key_down("2");
        }
        if game.state.enemies.len() >= 10 {
            game.key_down("=");
        }
        let hurt = game.state.player.health < game.state.player.max_health * 0.5;
        let want_potion = hurt && !game.state.inventory.is_empty();
        if want_potion != game.state.inventory.open {
            game.key_down("tab");
            game.key_up("tab");
        }
        if want_potion {
            game.key_down("1");
        }
    }

    fn nearest_enemy(state: &GameState) -> Option<(Vec2, f32)> {
        state
            .enemies
            .iter()
            .map(|e| (e.pos, e.pos.distance(state.player.pos)))
            .min_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_args_defaults() {
            let args = Args::try_parse_from(["essence-arena"]).unwrap();
            assert_eq!(args.seed, 1);
            assert_eq!(args.seconds, 120.0);
            assert!(args.settings.is_none());
            assert!(args.quality.is_none());
        }

        #[test]
        fn test_args_parse_flags() {
            let args = Args::try_parse_from([
                "essence-arena",
                "--seed",
                "42",
                "--seconds",
                "2.5",
                "--settings",
                "prefs.json",
                "--quality",
                "High",
            ])
            .unwrap();
            assert_eq!(args.seed, 42);
            assert_eq!(args.seconds, 2.5);
            assert_eq!(args.settings, Some(PathBuf::from("prefs.json")));
            assert_eq!(args.quality, Some(QualityPreset::High));
        }

        #[test]
        fn test_args_reject_bad_values() {
            assert!(Args::try_parse_from(["essence-arena", "--seed", "abc"]).is_err());
            assert!(Args::try_parse_from(["essence-arena", "--quality", "ultra"]).is_err());
            assert!(Args::try_parse_from(["essence-arena", "--bogus"]).is_err());
        }

        #[test]
        fn test_short_run_reports_hud() {
            let args = Args::try_parse_from(["essence-arena", "--seconds", "1", "--quality", "low"]).unwrap();
            let json = run(&args);
            assert!(json.contains("\"score\""), "{}", json);
        }
    }
}
