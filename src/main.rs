//! TriPeaks - Main Binary
//!
//! Text front end for the card matching engine

use clap::{Parser, Subcommand, ValueEnum};
use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use tripeaks::{
    core::CardId,
    game::{
        ActivationOutcome, Command, Completion, ControllerConfig, GameController, GameLoop,
        GameStateView, OutputFormat, Player, Presenter, RandomPlayer, TransitionRequest,
        UndoOutcome, VerbosityLevel, ZeroPlayer,
    },
    level::{LevelConfig, LevelFile},
    Result,
};

/// Automatic player type
#[derive(Debug, Clone, Copy, ValueEnum)]
enum PlayerType {
    /// Always takes the first legal move (matches before draws)
    Zero,
    /// Picks a random legal move
    Random,
}

/// Verbosity level (accepts names or numbers)
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

#[derive(Parser)]
#[command(name = "tripeaks")]
#[command(about = "TriPeaks - card matching solitaire engine", long_about = None)]
struct Cli {
    /// Verbosity level for game output (0=silent, 1=minimal, 2=normal, 3=verbose)
    #[arg(long, short = 'v', global = true, default_value = "minimal")]
    verbosity: VerbosityArg,

    /// Maximum number of undoable moves
    #[arg(long, global = true, default_value_t = 100)]
    max_undo: usize,

    /// Emit log lines as JSON objects
    #[arg(long, global = true)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the initial piles of a level
    Show {
        /// Level file (.json)
        level: PathBuf,
    },

    /// Play a level interactively via stdin
    Play {
        /// Level file (.json)
        level: PathBuf,
    },

    /// Let an automatic player play a level
    Auto {
        /// Level file (.json)
        level: PathBuf,

        #[arg(long, value_enum, default_value = "zero")]
        player: PlayerType,

        /// Seed for the random player
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Stop after this many moves
        #[arg(long, default_value_t = 1000)]
        max_steps: u32,
    },
}

/// Presenter that narrates transitions on stdout and finishes them at once
struct TextPresenter {
    quiet: bool,
}

impl TextPresenter {
    fn say(&self, message: &str) {
        if !self.quiet {
            println!("{message}");
        }
    }
}

impl Presenter for TextPresenter {
    fn on_game_started(&mut self, view: &GameStateView) {
        self.say(&view.render());
    }

    fn animate(&mut self, request: TransitionRequest) -> Option<Completion> {
        self.say(&format!(
            "  {:?}: card {} -> {}",
            request.kind, request.card_id, request.target
        ));
        Some(request.completion)
    }

    fn reject(&mut self, card_id: CardId) {
        self.say(&format!("  card {card_id} does not match the base card"));
    }

    fn set_undo_enabled(&mut self, enabled: bool) {
        self.say(if enabled { "  [undo available]" } else { "  [undo unavailable]" });
    }

    fn show_victory(&mut self) {
        self.say("*** You cleared the playfield! ***");
    }
}

async fn load_level(path: &Path) -> Result<LevelConfig> {
    let file = LevelFile::load_async(path).await?;
    let skipped = file.skipped_entries();
    if skipped > 0 {
        eprintln!("warning: skipped {skipped} incomplete card entries in {}", path.display());
    }
    file.to_config()
}

fn make_controller(cli: &Cli, quiet: bool) -> GameController<TextPresenter> {
    let config = ControllerConfig::default()
        .with_max_undo_depth(cli.max_undo)
        .with_verbosity(cli.verbosity.0);
    let mut controller = GameController::new(TextPresenter { quiet }, config);
    if cli.json {
        controller.logger_mut().set_output_format(OutputFormat::Json);
    }
    controller
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Show { level } => {
            let config = load_level(level).await?;
            let mut controller = make_controller(&cli, true);
            controller.start_game(&config)?;
            if cli.json {
                println!("{}", serde_json::to_string_pretty(controller.state())?);
            } else {
                println!("{}", controller.view().render());
            }
        }
        Commands::Play { level } => {
            let config = load_level(level).await?;
            let mut controller = make_controller(&cli, false);
            controller.start_game(&config)?;
            run_interactive(&mut controller)?;
        }
        Commands::Auto {
            level,
            player,
            seed,
            max_steps,
        } => {
            let config = load_level(level).await?;
            let mut controller = make_controller(&cli, true);
            controller.start_game(&config)?;

            let mut player: Box<dyn Player> = match player {
                PlayerType::Zero => Box::new(ZeroPlayer),
                PlayerType::Random => Box::new(RandomPlayer::with_seed(*seed)),
            };
            let result = GameLoop::new(&mut controller)
                .with_max_steps(*max_steps)
                .run(player.as_mut());

            println!("{}", controller.view().render());
            println!(
                "Result: {:?} after {} moves ({} undoable)",
                result.end_reason, result.steps, result.undo_depth
            );
        }
    }

    Ok(())
}

fn run_interactive(controller: &mut GameController<TextPresenter>) -> Result<()> {
    println!("Type '?' for help.");
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            break;
        };
        let command = match Command::parse(&line?) {
            Ok(command) => command,
            Err(e) => {
                println!("{e}");
                continue;
            }
        };

        match command {
            Command::Activate(card_id) => match controller.activate(card_id) {
                ActivationOutcome::Ignored(reason) => println!("  nothing happens ({reason:?})"),
                ActivationOutcome::Busy => println!("  still animating"),
                _ => {}
            },
            Command::Undo => match controller.undo() {
                UndoOutcome::NothingToUndo => println!("  nothing to undo"),
                UndoOutcome::Inconsistent(record) => {
                    println!("  could not undo move of card {}", record.card_id)
                }
                _ => {}
            },
            Command::Show => println!("{}", controller.view().render()),
            Command::Help => println!("{}", Command::help_text()),
            Command::Quit => break,
        }

        if controller.is_won() {
            break;
        }
        if controller.legal_activations().is_empty() && !controller.can_undo() {
            println!("No moves left.");
            break;
        }
    }
    Ok(())
}
