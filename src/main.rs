use std::{
    env::args,
    io::{stdout, Write},
    process::exit,
};

use golife::Game;
use log::info;
use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use config::{Config, ConfigError};
mod config;

use sim::Session;
mod sim;

use view::View;
mod view;

#[derive(Debug, Error)]
enum Failure {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Game(#[from] golife::Error),

    #[error("cannot write generations: {0}")]
    Output(#[from] serde_json::Error),

    #[error("cannot write generations: {0}")]
    Io(#[from] std::io::Error),
}

fn run(config: Config) -> Result<(), Failure> {
    let initial = config.initial_points()?;
    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let (x, y) = config.grid_size;

    if let Some(generations) = config.eager {
        let game = Game::with_generations(initial, x, y, config.mode, rng, generations)?;
        let mut out = stdout().lock();
        serde_json::to_writer(&mut out, game.generations())?;
        writeln!(out)?;
        return Ok(());
    }

    let game = Game::new(initial, x, y, config.mode, rng)?;
    info!("starting a {:?} session on {x}x{y}", config.mode);
    let session = Session::spawn(game, config.interval);
    let view = View::spawn(session.handle());

    view.join();
    session.shutdown();
    Ok(())
}

pub fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config = Config::from_args(args().skip(1)).unwrap_or_else(|err| {
        eprintln!("[error] {err}\n\n{}", config::USAGE);
        exit(1);
    });
    if config.help {
        println!("{}", config::USAGE);
        return;
    }

    if let Err(err) = run(config) {
        eprintln!("[error] {err}");
        exit(1);
    }
}
