use clap::Parser;
use pokesim::battle::state::EventBus;
use pokesim::{
    dump_pokemon, Battle, BattleConfig, BattleEngineError, InertStatusHook, RandomBehavior,
    SeededRng,
};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser, Debug)]
#[command(
    name = "pokesim",
    about = "Runs an unattended one-on-one battle between two configured Pokemon",
    version
)]
struct Cli {
    /// RON battle configuration; Bulbasaur versus Charmander when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Seed for the battle RNG, overriding the configuration
    #[arg(short, long)]
    seed: Option<u64>,

    /// Turn limit after which the battle is a draw
    #[arg(long)]
    max_turns: Option<u32>,

    /// Print events and the outcome as JSON lines
    #[arg(long)]
    json: bool,

    /// Print both combatants side by side before the battle
    #[arg(long)]
    dump: bool,

    /// Raise log verbosity (-v debug, -vv trace); RUST_LOG still applies
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn setup_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let filter = EnvFilter::from_default_env().add_directive(level.into());

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr).with_target(false))
        .with(filter)
        .init();
}

fn print_events(bus: &EventBus, json: bool) {
    for event in bus.events() {
        if json {
            match serde_json::to_string(event) {
                Ok(line) => println!("{}", line),
                Err(err) => warn!(%err, "could not serialize event"),
            }
        } else if let Some(line) = event.format() {
            println!("{}", line);
        }
    }
}

fn run(cli: Cli) -> Result<(), BattleEngineError> {
    let mut config = match &cli.config {
        Some(path) => BattleConfig::load(path)?,
        None => BattleConfig::default(),
    };
    if cli.seed.is_some() {
        config.seed = cli.seed;
    }
    if let Some(max_turns) = cli.max_turns {
        config.max_turns = max_turns;
    }

    let (player, opponent) = config.build_combatants()?;
    if cli.dump {
        println!("{}\n", dump_pokemon(&player, &opponent)?);
    }

    let mut rng = match config.seed {
        Some(seed) => SeededRng::from_seed(seed),
        None => SeededRng::from_entropy(),
    };
    info!(seed = ?config.seed, max_turns = config.max_turns, "starting battle");

    let mut battle = Battle::new(player, opponent).with_max_turns(config.max_turns);
    let outcome = battle.run_with(
        &RandomBehavior::new(),
        &RandomBehavior::new(),
        &mut rng,
        &InertStatusHook,
        |bus| print_events(bus, cli.json),
    )?;

    if cli.json {
        match serde_json::to_string(&outcome) {
            Ok(line) => println!("{}", line),
            Err(err) => warn!(%err, "could not serialize outcome"),
        }
    } else {
        match &outcome.winner_name {
            Some(name) => println!("{} won after {} turns.", name, outcome.turns_played),
            None => println!("No winner after {} turns.", outcome.turns_played),
        }
    }
    Ok(())
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("Error: {}", err);
            ExitCode::FAILURE
        }
    }
}
