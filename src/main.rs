//! Lane Racer headless runner
//!
//! Plays a match with a simple autopilot at simulation speed and prints the
//! final result and state snapshot as JSON. Useful for balancing tunings.
//!
//! Usage: `lane-racer [--multiplayer] [--seed N] [--tuning FILE] [--max-secs N]
//! [--width W] [--height H]`

use std::process::ExitCode;

use lane_racer::consts::{DEFAULT_PLAY_HEIGHT, DEFAULT_PLAY_WIDTH, TICKS_PER_SECOND};
use lane_racer::sim::{PlayerId, PlayerState, SimulationState};
use lane_racer::{Key, Session, Tuning};

/// Runner options
#[derive(Debug)]
struct Options {
    multiplayer: bool,
    seed: u64,
    tuning: Option<String>,
    max_secs: u32,
    width: i32,
    height: i32,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            multiplayer: false,
            seed: 0x5eed,
            tuning: None,
            max_secs: 300,
            width: DEFAULT_PLAY_WIDTH,
            height: DEFAULT_PLAY_HEIGHT,
        }
    }
}

fn parse_args() -> Result<Options, String> {
    let mut options = Options::default();
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        let mut value = |name: &str| args.next().ok_or_else(|| format!("{name} needs a value"));
        match arg.as_str() {
            "--multiplayer" => options.multiplayer = true,
            "--seed" => options.seed = value("--seed")?.parse().map_err(|e| format!("--seed: {e}"))?,
            "--tuning" => options.tuning = Some(value("--tuning")?),
            "--max-secs" => {
                options.max_secs = value("--max-secs")?
                    .parse()
                    .map_err(|e| format!("--max-secs: {e}"))?
            }
            "--width" => {
                options.width = value("--width")?.parse().map_err(|e| format!("--width: {e}"))?
            }
            "--height" => {
                options.height = value("--height")?
                    .parse()
                    .map_err(|e| format!("--height: {e}"))?
            }
            other => return Err(format!("unknown argument `{other}`")),
        }
    }
    Ok(options)
}

/// Keys for one player, letters for Player1 and arrows for Player2
fn keys_for(id: PlayerId) -> [Key; 4] {
    match id {
        PlayerId::Player1 => [Key::W, Key::A, Key::S, Key::D],
        PlayerId::Player2 => [Key::ArrowUp, Key::ArrowLeft, Key::ArrowDown, Key::ArrowRight],
    }
}

/// Steer away from the closest car ahead, staying on the road
fn autopilot(state: &SimulationState, player: &PlayerState) -> Option<Key> {
    let [_, left, _, right] = keys_for(player.id);
    let bounds = player.bounds(&state.tuning);
    let lookahead = bounds.expand_x(state.tuning.safety_margin);

    let threat = state
        .traffic
        .iter()
        .filter(|car| car.bounds.bottom() <= bounds.bottom())
        .filter(|car| car.bounds.bottom() > bounds.top() - 3 * bounds.size.y)
        .filter(|car| car.bounds.left() < lookahead.right() && lookahead.left() < car.bounds.right())
        .max_by_key(|car| car.bounds.bottom())?;

    let lane = state
        .lanes()
        .iter()
        .find(|lane| lane.contains_x(player.position.x))
        .or_else(|| state.lanes().first())?;
    let car_center = threat.bounds.left() + threat.bounds.size.x / 2;
    let room_left = threat.bounds.left() - lane.left;
    let room_right = lane.right - threat.bounds.right();

    if car_center >= player.position.x && room_left >= bounds.size.x {
        Some(left)
    } else if room_right >= bounds.size.x {
        Some(right)
    } else {
        Some(left)
    }
}

fn run(options: &Options) -> Result<(), Box<dyn std::error::Error>> {
    let tuning = match &options.tuning {
        Some(path) => Tuning::load(path)?,
        None => Tuning::default(),
    };

    let mut session = Session::seeded(options.width, options.height, tuning, options.seed)?;
    session.on_game_over(|result| {
        log::info!(
            "Final scores: P1={} P2={:?} after {:.1}s",
            result.player1_score,
            result.player2_score,
            result.elapsed_secs
        );
    });
    session.start(options.multiplayer);

    let max_ticks = u64::from(options.max_secs) * u64::from(TICKS_PER_SECOND);
    let mut result = None;
    for _ in 0..max_ticks {
        let steering: Vec<(PlayerId, Option<Key>)> = session
            .state()
            .players()
            .map(|p| (p.id, autopilot(session.state(), p)))
            .collect();
        for (id, key) in steering {
            for k in keys_for(id) {
                if Some(k) != key {
                    session.key_up(k);
                }
            }
            if let Some(key) = key {
                session.key_down(key);
            }
        }

        if let Some(finished) = session.tick() {
            result = Some(finished);
            break;
        }
    }

    if result.is_none() {
        log::info!("Time limit reached after {}s", options.max_secs);
    }

    let report = serde_json::json!({
        "seed": options.seed,
        "result": result,
        "state": session.state(),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Lane Racer (headless) starting...");

    let options = match parse_args() {
        Ok(options) => options,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            return ExitCode::from(2);
        }
    };

    match run(&options) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}
