//! Hogwarts Engine - Main Binary
//!
//! Plays cooperative deck-building games against the starter content set

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use hogwarts_engine::{
    content,
    game::{
        DecisionMaker, GameConfig, GameInitializer, GameLoop, RandomController, ScriptedController, VerbosityLevel,
        ZeroController,
    },
    tournament::{self, DeciderType, SimulationConfig},
};
use std::cell::RefCell;
use std::rc::Rc;

/// Decider type for the heroes
#[derive(Debug, Clone, Copy, ValueEnum)]
enum DeciderArg {
    /// Always picks the first option
    Zero,
    /// Makes random choices
    Random,
    /// Replays a fixed list of choices (requires --script)
    Fixed,
}

/// Verbosity level for game output (custom parser supporting both names and numbers)
#[derive(Debug, Clone, Copy)]
struct VerbosityArg(VerbosityLevel);

impl std::str::FromStr for VerbosityArg {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "silent" | "0" => Ok(VerbosityArg(VerbosityLevel::Silent)),
            "minimal" | "1" => Ok(VerbosityArg(VerbosityLevel::Minimal)),
            "normal" | "2" => Ok(VerbosityArg(VerbosityLevel::Normal)),
            "verbose" | "3" => Ok(VerbosityArg(VerbosityLevel::Verbose)),
            _ => Err(format!(
                "invalid verbosity level '{s}' (expected: silent/0, minimal/1, normal/2, verbose/3)"
            )),
        }
    }
}

impl From<VerbosityArg> for VerbosityLevel {
    fn from(arg: VerbosityArg) -> Self {
        arg.0
    }
}

#[derive(Parser)]
#[command(name = "hogwarts")]
#[command(about = "Hogwarts Engine - cooperative deck-building rules engine", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play one game and print the log
    Play {
        /// Number of heroes (1-4)
        #[arg(long, default_value_t = 2)]
        heroes: usize,

        /// Decider for every hero
        #[arg(long, value_enum, default_value = "random")]
        decider: DeciderArg,

        /// Choices for the fixed decider (space or comma separated indices, e.g., "1 0 2" or "1,0,2")
        #[arg(long, value_name = "CHOICES")]
        script: Option<String>,

        /// Set random seed for deterministic games
        #[arg(long)]
        seed: Option<u64>,

        /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
        #[arg(long, default_value = "normal", short = 'v')]
        verbosity: VerbosityArg,

        /// Turns before the game is called off
        #[arg(long, default_value_t = 200)]
        max_turns: u32,

        /// Print the final game snapshot as JSON
        #[arg(long)]
        dump_state: bool,
    },

    /// Run many silent games in parallel and print statistics
    Simulate {
        /// Number of games to run
        #[arg(long, short = 'g', default_value_t = 100)]
        games: usize,

        /// Number of heroes (1-4)
        #[arg(long, default_value_t = 2)]
        heroes: usize,

        /// Decider for every hero (fixed is not available here)
        #[arg(long, value_enum, default_value = "random")]
        decider: DeciderArg,

        /// Base seed; game N uses a seed derived from it
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Turns before a game is called off
        #[arg(long, default_value_t = 200)]
        max_turns: u32,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Play {
            heroes,
            decider,
            script,
            seed,
            verbosity,
            max_turns,
            dump_state,
        } => run_play(heroes, decider, script, seed, verbosity.into(), max_turns, dump_state),
        Commands::Simulate {
            games,
            heroes,
            decider,
            seed,
            max_turns,
        } => {
            let decider = match decider {
                DeciderArg::Zero => DeciderType::Zero,
                DeciderArg::Random => DeciderType::Random,
                DeciderArg::Fixed => bail!("the fixed decider needs a script and cannot be used for simulate"),
            };
            let config = SimulationConfig {
                games,
                heroes,
                decider,
                seed,
                max_turns,
            };
            let stats = tournament::simulate(&config);
            tournament::print_report(&config, &stats);
            Ok(())
        }
    }
}

/// Parse "1 0 2" or "1,0,2" into choice indices
fn parse_script(script: &str) -> Result<Vec<usize>> {
    script
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<usize>().with_context(|| format!("invalid choice index '{s}'")))
        .collect()
}

fn run_play(
    heroes: usize,
    decider: DeciderArg,
    script: Option<String>,
    seed: Option<u64>,
    verbosity: VerbosityLevel,
    max_turns: u32,
    dump_state: bool,
) -> Result<()> {
    let mut config = GameConfig::default().with_verbosity(verbosity);
    config.seed = seed;
    config.max_turns = max_turns;

    let decider: Rc<RefCell<dyn DecisionMaker>> = match decider {
        DeciderArg::Zero => Rc::new(RefCell::new(ZeroController::new())),
        DeciderArg::Random => match seed {
            Some(seed) => Rc::new(RefCell::new(RandomController::with_seed(seed))),
            None => Rc::new(RefCell::new(RandomController::new())),
        },
        DeciderArg::Fixed => {
            let script = script.context("--script is required with --decider fixed")?;
            Rc::new(RefCell::new(ScriptedController::new(parse_script(&script)?)))
        }
    };

    let setup = content::starter_setup(heroes, config).context("building the starter game")?;
    let mut game = GameInitializer::new(setup)
        .init_game(decider)
        .context("setting up the game")?;

    let result = GameLoop::new(&mut game).run_game().context("running the game")?;
    if verbosity == VerbosityLevel::Silent {
        println!("Game {} after {} turns", result.outcome, result.turns_played);
    }

    if dump_state {
        let json = game.snapshot().to_json().context("serializing the final state")?;
        println!("{json}");
    }
    Ok(())
}
