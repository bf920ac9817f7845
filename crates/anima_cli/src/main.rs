use anima_core::AnimaConfig;
use anima_limbic::Engine;
use anima_mind::{DefaultMotivation, MotivationState};
use anima_sim::{
    tick_lines, AutopilotMind, InputAdapter, ScenarioInjector, ScriptedMind, SimulationLoop,
    SimulationState, DEFAULT_DRIVE_THRESHOLD,
};
use anyhow::{bail, Context, Result};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::oneshot;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "anima", author, version, about, long_about = None)]
struct Args {
    /// Path to the TOML config; a missing file means defaults
    #[arg(short, long, default_value = "anima.toml")]
    config: PathBuf,

    /// Ticks to run; 0 runs until stdin closes or ctrl-c
    #[arg(short, long, default_value_t = 0)]
    ticks: u64,

    /// Simulated seconds per tick
    #[arg(long)]
    dt: Option<f64>,

    /// Engine RNG seed
    #[arg(long)]
    seed: Option<u64>,

    /// Wall-clock milliseconds between ticks
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Replay mind responses from a file, one per blank-line separated block
    #[arg(long)]
    script: Option<PathBuf>,

    /// Activate a built-in scenario (cold_room, hot_room, calm_space, crowded_street)
    #[arg(long)]
    scenario: Option<String>,

    /// JSON logs, and one JSON tick result per line on stdout
    #[arg(long)]
    json: bool,
}

fn init_tracing(json: bool) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

/// Operator lines go straight into the shared queue. The sender fires once
/// stdin reaches EOF.
fn spawn_stdin_reader(adapter: Arc<InputAdapter>) -> oneshot::Receiver<()> {
    let (closed_tx, closed_rx) = oneshot::channel();
    std::thread::spawn(move || {
        let stdin = std::io::stdin();
        for line in stdin.lock().lines() {
            match line {
                Ok(line) => adapter.enqueue(line),
                Err(e) => {
                    tracing::warn!("stdin read failed: {}", e);
                    break;
                }
            }
        }
        let _ = closed_tx.send(());
    });
    closed_rx
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.json);

    let mut config = AnimaConfig::load_or_default(&args.config);
    if let Some(seed) = args.seed {
        config.engine.seed = Some(seed);
    }
    if let Some(dt) = args.dt {
        config.simulation.dt_seconds = dt;
    }
    if let Some(ms) = args.interval_ms {
        config.simulation.tick_interval_ms = ms;
    }

    let adapter = Arc::new(InputAdapter::default());
    let injector = Arc::new(ScenarioInjector::with_presets(adapter.clone()));
    if let Some(name) = &args.scenario {
        if !injector.activate(name) {
            bail!(
                "unknown scenario {:?} (known: {})",
                name,
                injector.names().join(", ")
            );
        }
    }

    let builder = SimulationLoop::builder()
        .input(injector)
        .biology(Engine::new(config.engine.clone()))
        .motivation(DefaultMotivation)
        .configure(&config);
    let builder = match &args.script {
        Some(path) => {
            let script = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read script: {}", path.display()))?;
            let mind = ScriptedMind::from_script(&script);
            info!("Replaying {} scripted responses from {}", mind.len(), path.display());
            builder.mind(mind)
        }
        None => builder.mind(AutopilotMind),
    };
    let mut sim = builder.build()?;
    let mut state = SimulationState::from_config(&config);

    let dt = config.simulation.dt_seconds;
    let period = Duration::from_millis(config.simulation.tick_interval_ms.max(1));
    info!(
        dt,
        interval_ms = period.as_millis() as u64,
        ticks = args.ticks,
        scenario = args.scenario.as_deref().unwrap_or("none"),
        "Anima online"
    );

    let mut stdin_closed = spawn_stdin_reader(adapter);
    let mut stdin_open = true;
    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);
    let mut interval = tokio::time::interval(period);
    let mut previous: Option<MotivationState> = None;

    loop {
        tokio::select! {
            _ = interval.tick() => {
                let result = sim.tick(&mut state, dt);
                if args.json {
                    println!("{}", serde_json::to_string(&result)?);
                } else {
                    let before = previous.unwrap_or(result.motivation);
                    for line in tick_lines(&result, &before, DEFAULT_DRIVE_THRESHOLD) {
                        println!("{}", line);
                    }
                }
                previous = Some(result.motivation);

                if args.ticks > 0 && state.tick >= args.ticks {
                    break;
                }
            }
            _ = &mut stdin_closed, if stdin_open => {
                stdin_open = false;
                if args.ticks == 0 {
                    info!("stdin closed");
                    break;
                }
            }
            _ = &mut ctrl_c => {
                info!("interrupted");
                break;
            }
        }
    }

    info!(ticks = state.tick, "Anima stopped");
    Ok(())
}
