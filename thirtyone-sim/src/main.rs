mod reports;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use colored::Colorize;
use std::fs::File;
use std::io::{BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::Instant;

use reports::{RunSettings, SimulationReport, SingleTrial};
use thirtyone_game::{
    ExperimentConfig, ScoreSummary, StrategyId, Tournament, TurnOrder, run_single_strategy_seeded,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RunMode {
    /// Every listed strategy at one table, seats reordered each game
    Tournament,
    /// Each listed strategy alone, filling every seat of its own table
    Single,
}

#[derive(Debug, Parser)]
#[command(name = "thirtyone-sim", version)]
#[command(about = "Batch simulator comparing keep/discard strategies for the Thirty-One dice game")]
struct Args {
    /// Experiment to run
    #[arg(long, value_enum, default_value_t = RunMode::Tournament)]
    mode: RunMode,

    /// Strategies to run (comma-separated, `all` for the full roster)
    #[arg(long, default_value = "all")]
    strategies: String,

    /// List all available strategies and exit
    #[arg(long)]
    list_strategies: bool,

    /// Number of games to simulate
    #[arg(long, default_value_t = thirtyone_game::constants::DEFAULT_GAMES)]
    games: usize,

    /// Seats per table in single mode
    #[arg(long, default_value_t = thirtyone_game::constants::DEFAULT_PLAYERS)]
    players: usize,

    /// Seed for every dice and seating stream
    #[arg(long, default_value_t = thirtyone_game::constants::DEFAULT_SEED)]
    seed: u64,

    /// Seating order before each tournament game (shuffled, fixed, rotating)
    #[arg(long, default_value = "shuffled")]
    order: TurnOrder,

    /// Spread games across all cores
    #[arg(long)]
    parallel: bool,

    /// JSON experiment file; replaces the experiment flags above
    #[arg(long)]
    config: Option<PathBuf>,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "markdown", "console", "csv"])]
    report: String,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Log experiment progress (overridden by RUST_LOG)
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    if maybe_list_strategies(&args)? {
        return Ok(());
    }

    announce_banner();

    let start_time = Instant::now();
    let cfg = resolve_config(&args)?;
    let report = run_simulation(args.mode, &cfg)?;
    write_reports(&args, &report, start_time)?;
    Ok(())
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "info" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn maybe_list_strategies(args: &Args) -> Result<bool> {
    if !args.list_strategies {
        return Ok(false);
    }
    let mut output_target = OutputTarget::new(args.output.clone())?;
    writeln!(output_target.writer(), "Available strategies:")?;
    for id in StrategyId::default_roster() {
        writeln!(
            output_target.writer(),
            "  {:25} - {}",
            id.to_string(),
            id.description()
        )?;
    }
    writeln!(
        output_target.writer(),
        "  {:25} - any premeditated target from 0 to 30",
        "PremeditatedTarget<N>"
    )?;
    output_target.flush_inner()?;
    Ok(true)
}

fn announce_banner() {
    eprintln!("{}", "🎲 Thirty-One Strategy Simulator".bright_cyan().bold());
    eprintln!("{}", "================================".cyan());
}

fn split_csv(s: &str) -> Vec<String> {
    s.split(',')
        .map(|x| x.trim().to_string())
        .filter(|x| !x.is_empty())
        .collect()
}

/// Resolve a comma-separated list; `all` stands for the default roster and
/// keeps its place in the list.
fn expand_strategies(strategies_arg: &str) -> Result<Vec<StrategyId>> {
    let mut ids: Vec<StrategyId> = Vec::new();
    for token in split_csv(strategies_arg) {
        if token.eq_ignore_ascii_case("all") {
            for id in StrategyId::default_roster() {
                if !ids.contains(&id) {
                    ids.push(id);
                }
            }
        } else {
            let id: StrategyId = token
                .parse()
                .with_context(|| format!("invalid --strategies entry `{token}`"))?;
            if !ids.contains(&id) {
                ids.push(id);
            }
        }
    }
    Ok(ids)
}

fn resolve_config(args: &Args) -> Result<ExperimentConfig> {
    if let Some(path) = &args.config {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let cfg = ExperimentConfig::from_json_str(&raw)
            .with_context(|| format!("invalid experiment file {}", path.display()))?;
        return Ok(cfg);
    }

    let cfg = ExperimentConfig {
        games: args.games,
        players: args.players,
        seed: args.seed,
        order: args.order,
        parallel: args.parallel,
        strategies: expand_strategies(&args.strategies)?,
    };
    cfg.validate().context("invalid experiment flags")?;
    Ok(cfg)
}

fn settings_of(cfg: &ExperimentConfig) -> RunSettings {
    RunSettings {
        games: cfg.games,
        players: cfg.players,
        seed: cfg.seed,
        order: cfg.order,
        parallel: cfg.parallel,
    }
}

fn run_simulation(mode: RunMode, cfg: &ExperimentConfig) -> Result<SimulationReport> {
    log::info!(
        "{mode:?} run: {} strategies, {} games, seed {}",
        cfg.strategies.len(),
        cfg.games,
        cfg.seed
    );
    match mode {
        RunMode::Tournament => {
            let tournament = Tournament::from_config(cfg)?;
            let result = tournament
                .run_seeded(cfg.seed, cfg.parallel)
                .context("tournament aborted")?;
            Ok(SimulationReport::tournament(settings_of(cfg), result))
        }
        RunMode::Single => {
            let mut trials = Vec::with_capacity(cfg.strategies.len());
            for id in &cfg.strategies {
                let strategy = id.create();
                let scores = run_single_strategy_seeded(
                    &strategy,
                    cfg.players,
                    cfg.games,
                    cfg.seed,
                    cfg.parallel,
                )
                .with_context(|| format!("single-strategy trial for {id} aborted"))?;
                trials.push(SingleTrial {
                    strategy: id.to_string(),
                    summary: ScoreSummary::from_scores(&scores),
                    scores,
                });
            }
            Ok(SimulationReport::Single {
                settings: settings_of(cfg),
                trials,
            })
        }
    }
}

fn write_reports(args: &Args, report: &SimulationReport, start_time: Instant) -> Result<()> {
    let mut output_target = OutputTarget::new(args.output.clone())?;

    match args.report.as_str() {
        "json" => reports::generate_json_report(&mut output_target, report)?,
        "markdown" => reports::generate_markdown_report(&mut output_target, report)?,
        "csv" => reports::generate_csv_report(&mut output_target, report)?,
        _ => {
            reports::generate_console_report(&mut output_target, report, start_time.elapsed())?;
        }
    }

    output_target.flush_inner()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<std::io::Stdout>),
    File(BufWriter<File>),
}

impl OutputTarget {
    fn new(path: Option<PathBuf>) -> Result<Self> {
        if let Some(path) = path {
            let file = File::create(&path)
                .with_context(|| format!("failed to create {}", path.display()))?;
            Ok(Self::File(BufWriter::new(file)))
        } else {
            Ok(Self::Stdout(BufWriter::new(stdout())))
        }
    }

    fn writer(&mut self) -> &mut dyn Write {
        match self {
            Self::Stdout(w) => w,
            Self::File(w) => w,
        }
    }

    fn flush_inner(&mut self) -> std::io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> std::io::Result<()> {
        self.flush_inner()
    }
}
