//! Scripted review sessions.
//!
//! `run` replays a JSON-lines script of host stimuli through a controller
//! on a simulated clock; `demo` replays a canned script. Every controller
//! event, outbound wire message and render operation prints as a JSON line,
//! in the order it happened.

use std::path::PathBuf;

use chrono::{DateTime, Duration, Utc};
use clap::Subcommand;
use serde::Deserialize;

use ovation_core::{Category, Config, Controller, Event};

use crate::host::{ScriptedBridge, ScriptedSurface};

#[derive(Subcommand)]
pub enum SessionAction {
    /// Replay a JSON-lines host script
    Run {
        /// Path to the script file
        script: PathBuf,
        /// Override the configured random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Replay a canned session exercising feedback, a deferred start reward
    /// and the intermission round trip
    Demo {
        /// Override the configured random seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Print the initial controller state as JSON
    Status,
}

/// One line of a session script.
#[derive(Debug, Deserialize)]
#[serde(tag = "step", rename_all = "camelCase")]
enum ScriptStep {
    /// Host side of the bridge came up.
    Ready,
    /// A pool response arrived from the host.
    Pool { category: Category, payload: String },
    /// Page load event.
    Load,
    /// Answer graded.
    Answer { grade: Category },
    /// Review session started.
    ReviewStart,
    /// Scheduled break reached.
    Intermission { grade: Category },
    /// User dismissed the intermission.
    Dismiss,
    /// User clicked the intermission image.
    Replay,
    /// Advance the simulated clock.
    Wait { ms: u64 },
}

pub fn run(action: SessionAction) -> Result<(), Box<dyn std::error::Error>> {
    match action {
        SessionAction::Run { script, seed } => {
            let text = std::fs::read_to_string(&script)
                .map_err(|e| format!("cannot read {}: {e}", script.display()))?;
            let mut steps = Vec::new();
            for (number, line) in text.lines().enumerate() {
                let line = line.trim();
                if line.is_empty() || line.starts_with('#') {
                    continue;
                }
                let step: ScriptStep = serde_json::from_str(line)
                    .map_err(|e| format!("script line {}: {e}", number + 1))?;
                steps.push(step);
            }
            replay(steps, seed)
        }
        SessionAction::Demo { seed } => replay(demo_steps(), seed),
        SessionAction::Status => {
            let config = Config::load_or_default();
            let controller = new_controller(config);
            let snapshot = controller.snapshot(Utc::now());
            println!("{}", serde_json::to_string_pretty(&snapshot)?);
            Ok(())
        }
    }
}

fn new_controller(config: Config) -> Controller<ScriptedBridge, ScriptedSurface> {
    let bridge = ScriptedBridge::new(&config.bridge.namespace);
    Controller::new(config, bridge, ScriptedSurface::default())
}

fn replay(steps: Vec<ScriptStep>, seed: Option<u64>) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = Config::load_or_default();
    if seed.is_some() {
        config.selector.seed = seed;
    }
    let mut controller = new_controller(config);

    // Simulated clock; scripts advance it explicitly with `wait` steps.
    let mut now: DateTime<Utc> = DateTime::UNIX_EPOCH;

    for step in steps {
        let mut events: Vec<Event> = Vec::new();
        match step {
            ScriptStep::Ready => controller.bridge_mut().set_ready(),
            ScriptStep::Pool { category, payload } => {
                controller.bridge_mut().queue_response(category, &payload)
            }
            ScriptStep::Load => controller.on_load(),
            ScriptStep::Answer { grade } => events.extend(controller.on_answer(grade, now)),
            ScriptStep::ReviewStart => events.extend(controller.on_review_start(now)),
            ScriptStep::Intermission { grade } => {
                events.extend(controller.on_intermission(grade, now))
            }
            ScriptStep::Dismiss => events.extend(controller.dismiss_intermission(now)),
            ScriptStep::Replay => controller.replay_intermission_sound(),
            ScriptStep::Wait { ms } => now += Duration::milliseconds(ms as i64),
        }
        events.extend(controller.tick(now));

        for event in &events {
            println!("{}", serde_json::to_string(event)?);
        }
        for op in controller.surface_mut().take_ops() {
            println!("{}", serde_json::json!({ "surface": op }));
        }
        for channel in controller.bridge_mut().take_outbound() {
            println!("{}", serde_json::json!({ "wire": channel }));
        }
    }
    Ok(())
}

fn demo_steps() -> Vec<ScriptStep> {
    let pool = |category: Category, payload: &str| ScriptStep::Pool {
        category,
        payload: payload.to_string(),
    };
    vec![
        ScriptStep::Load,
        ScriptStep::Ready,
        pool(Category::Good, r#"["good-1.png","good-2.png"]"#),
        pool(Category::Easy, r#"["easy-1.png"]"#),
        pool(Category::Break, r#"["break-1.png","break-2.png"]"#),
        // Start pool is still in flight: the start reward defers, then
        // fires on arrival.
        ScriptStep::ReviewStart,
        pool(Category::Start, r#"["start-1.png"]"#),
        ScriptStep::Wait { ms: 2000 },
        ScriptStep::Answer {
            grade: Category::Good,
        },
        // A second answer inside the display window supersedes the first.
        ScriptStep::Wait { ms: 500 },
        ScriptStep::Answer {
            grade: Category::Easy,
        },
        ScriptStep::Wait { ms: 2000 },
        ScriptStep::Intermission {
            grade: Category::Good,
        },
        ScriptStep::Replay,
        ScriptStep::Dismiss,
    ]
}
