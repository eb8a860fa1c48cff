mod session_mode;

use bevy::log::LogPlugin;
use bevy::prelude::*;

use estimator::routes::DistanceSource;
use estimator::{EstimatorConfig, EstimatorPlugin};

/// Path to a JSON config file. Unset means built-in defaults.
const CONFIG_ENV: &str = "GREEN_HEARTBEAT_CONFIG";

/// Commands replayed by `--demo`: a day of activity, a route and a summary.
const DEMO_SCRIPT: &[&str] = &[
    r#"{"cmd":"submit","category":"car","quantity":12,"label":"Commute"}"#,
    r#"{"cmd":"submit","category":"diet.chicken","quantity":1,"label":"Lunch"}"#,
    r#"{"cmd":"submit","category":"vegan","quantity":2}"#,
    r#"{"cmd":"submit","category":"shower","quantity":45}"#,
    r#"{"cmd":"submit","category":"laundry","quantity":60}"#,
    r#"{"cmd":"submit","category":"waste.recyclable","quantity":1.2}"#,
    r#"{"cmd":"submit","category":"organic","quantity":0.8}"#,
    r#"{"cmd":"electricity","units":240}"#,
    r#"{"cmd":"route","origin":"Home","destination":"Office"}"#,
    r#"{"cmd":"air_quality","aqi":156}"#,
    r#"{"cmd":"summary"}"#,
    r#"{"cmd":"quit"}"#,
];

fn load_config() -> EstimatorConfig {
    let Ok(path) = std::env::var(CONFIG_ENV) else {
        return EstimatorConfig::default();
    };
    match EstimatorConfig::load(&path) {
        Ok(config) => {
            info!("Loaded config from {path}");
            config
        }
        Err(e) => {
            warn!("Ignoring config {path}: {e}; using defaults");
            EstimatorConfig::default()
        }
    }
}

fn main() {
    let demo = std::env::args().any(|a| a == "--demo");

    let mut app = App::new();
    app.add_plugins((MinimalPlugins, LogPlugin::default()));

    // The config must be in place before the plugin reads it.
    let config = load_config();
    if demo {
        // Reproducible output: one fixed distance instead of the seeded mock.
        app.insert_resource(DistanceSource::fixed(8.0));
    }
    app.insert_resource(config);
    app.add_plugins(EstimatorPlugin);

    // Initial update so summaries exist before the first command.
    app.update();

    let stdout = std::io::stdout();
    if demo {
        let script = DEMO_SCRIPT.join("\n");
        session_mode::run_session(&mut app, script.as_bytes(), stdout.lock());
    } else {
        let stdin = std::io::stdin();
        session_mode::run_session(&mut app, stdin.lock(), stdout.lock());
    }
}
