use std::env;
use std::io;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use runner_app::state::AppState;
use runner_app::{game_loop, ipc};
use runner_core::commands::PlayerCommand;
use runner_core::spec::SceneSpec;
use runner_sim::RunConfig;

const DEFAULT_RUN_TIME: Duration = Duration::from_secs(10);

struct Options {
    scene: PathBuf,
    seed: Option<u64>,
    run_time: Duration,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args: Vec<String> = env::args().collect();
    let options = match parse_args(&args) {
        Ok(options) => options,
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            std::process::exit(2);
        }
    };

    if let Err(err) = run(options) {
        log::error!("{err}");
        std::process::exit(1);
    }
}

fn print_usage() {
    eprintln!("Usage: runner-app <scene.json> [--seed N] [--seconds S]");
    eprintln!("Player commands are read from stdin as JSON lines.");
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut scene = None;
    let mut seed = None;
    let mut run_time = DEFAULT_RUN_TIME;

    let mut iter = args.iter().skip(1);
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--seed" => {
                let value = iter.next().ok_or("--seed needs a value")?;
                seed = Some(value.parse().map_err(|_| format!("invalid seed `{value}`"))?);
            }
            "--seconds" => {
                let value = iter.next().ok_or("--seconds needs a value")?;
                run_time = value
                    .parse::<f64>()
                    .ok()
                    .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
                    .ok_or_else(|| format!("invalid duration `{value}`"))?;
            }
            flag if flag.starts_with("--") => return Err(format!("unknown flag `{flag}`")),
            path if scene.is_none() => scene = Some(PathBuf::from(path)),
            extra => return Err(format!("unexpected argument `{extra}`")),
        }
    }

    Ok(Options {
        scene: scene.ok_or("missing scene file")?,
        seed,
        run_time,
    })
}

fn run(options: Options) -> Result<(), String> {
    let spec = SceneSpec::load(&options.scene)
        .map_err(|e| format!("failed to load {}: {e}", options.scene.display()))?;

    let mut config = RunConfig::default();
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    log::info!("scene {} (seed {})", options.scene.display(), config.seed);

    let state = Arc::new(AppState::new());
    let (cmd_tx, handle) = game_loop::spawn_game_loop(spec, config, state.latest_snapshot.clone())
        .map_err(|e| format!("failed to start: {e}"))?;
    *state.command_tx.lock().map_err(|e| e.to_string())? = Some(cmd_tx);

    ipc::send_command(&state, PlayerCommand::StartRun)?;

    // Detached: ends with stdin, or once the loop's sender is gone.
    let reader_state = Arc::clone(&state);
    std::thread::Builder::new()
        .name("runner-stdin".into())
        .spawn(move || {
            let forwarded = ipc::forward_commands(io::stdin().lock(), &reader_state);
            log::debug!("forwarded {forwarded} commands");
        })
        .map_err(|e| e.to_string())?;

    std::thread::sleep(options.run_time);
    ipc::shutdown(&state)?;
    handle.join().map_err(|_| "game loop panicked".to_string())?;

    let snapshot = ipc::get_snapshot(&state)?.ok_or("no frame was produced")?;
    log::info!(
        "{:?} with score {} after {}",
        snapshot.phase,
        snapshot.score.score,
        snapshot.score.elapsed_display
    );
    let json = serde_json::to_string_pretty(&snapshot).map_err(|e| e.to_string())?;
    println!("{json}");
    Ok(())
}
