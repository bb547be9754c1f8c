//! Pixel Jump headless runner
//!
//! Plays a level with a scripted "run right and hop" input pattern and logs the
//! events. Usage: `pixel-jump [level.json] [settings.json]`

fn main() {
    env_logger::init();
    log::info!("Pixel Jump (headless) starting...");

    if let Err(err) = play() {
        log::error!("{err}");
        std::process::exit(1);
    }
}

/// Frames between scripted jumps
const JUMP_EVERY: u64 = 45;
/// Give up after this much simulated time (seconds)
const TIME_LIMIT: f32 = 120.0;

fn play() -> pixel_jump::error::Result<()> {
    use pixel_jump::consts::SIM_DT;
    use pixel_jump::sim::{GameEvent, Outcome, Run, RunPhase, TickInput};
    use pixel_jump::{Level, Settings};

    let mut args = std::env::args().skip(1);
    let level = match args.next() {
        Some(path) => Level::from_json(&std::fs::read_to_string(path)?)?,
        None => Level::default_level(),
    };
    let settings = match args.next() {
        Some(path) => Settings::load_from(path)?,
        None => Settings::default(),
    };

    let mut run = Run::new(level, settings);
    let mut input = TickInput {
        right: true,
        ..Default::default()
    };

    let mut elapsed = 0.0;
    while !run.is_over() && elapsed < TIME_LIMIT {
        if run.state().frame % JUMP_EVERY == 0 {
            input.up = true;
        }
        for event in run.advance(&mut input, SIM_DT) {
            match event {
                GameEvent::CoinCollected { index, score } => {
                    log::info!("Coin {index} collected (score {score})")
                }
                GameEvent::EnemyDefeated { index, score } => {
                    log::info!("Enemy {index} defeated (score {score})")
                }
                GameEvent::PlayerDied {
                    cause, lives_left, ..
                } => log::info!("Died: {cause:?} ({lives_left} lives left)"),
                GameEvent::PlayerRespawned { episode } => {
                    log::info!("Respawned after death #{episode}")
                }
                GameEvent::RunWon { score } | GameEvent::RunLost { score } => {
                    log::info!("Run finished with {score} points")
                }
            }
        }
        elapsed += SIM_DT;
    }

    let scene = run.scene();
    match run.phase() {
        RunPhase::RunOver(Outcome::Won) => println!("✓ Course clear! Score: {}", run.score()),
        RunPhase::RunOver(Outcome::Lost) => println!("✗ Game over. Score: {}", run.score()),
        _ => println!(
            "Time limit reached at x={:.0} (score {}, {} lives)",
            scene.player.position.x,
            run.score(),
            run.lives()
        ),
    }
    Ok(())
}
