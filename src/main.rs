use std::path::{Path, PathBuf};
use std::process::ExitCode;

use bmkplot::bench::{run_sweep_with_progress, KeyKind, SweepConfig};
use bmkplot::chart::{present, render_with_size, Presentation};
use bmkplot::config::{Scenario, Settings};
use bmkplot::{error, io, BmkError, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use indicatif::{ProgressBar, ProgressStyle};
use log::debug;

#[derive(Parser, Debug)]
#[command(
    name = "bmkplot",
    version,
    about = "Compare map, unordered_map and red-black tree lookup times"
)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Settings file (default: user config directory)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Draw the comparison chart of a measurement file
    Plot(PlotArgs),
    /// Time lookups and write a measurement file
    Generate(GenerateArgs),
    /// Print the effective settings
    Config(ConfigArgs),
}

#[derive(Args, Debug, Default)]
struct PlotArgs {
    /// Measurement file (default: the scenario's file)
    input: Option<PathBuf>,

    #[arg(long, value_enum, default_value_t = ScenarioArg::Nodes)]
    scenario: ScenarioArg,

    /// Write to a .png, .svg or .json file instead of showing the chart
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    x_label: Option<String>,

    /// The first line of the input is data, not a header
    #[arg(long)]
    no_header: bool,
}

#[derive(Args, Debug)]
struct GenerateArgs {
    #[arg(long, value_enum, default_value_t = KindArg::Int)]
    kind: KindArg,

    /// Destination file (default: the scenario's file)
    #[arg(short, long)]
    output: Option<PathBuf>,

    #[arg(long, default_value_t = 20_000)]
    max_size: usize,

    #[arg(long, default_value_t = 50)]
    start: usize,

    #[arg(long, default_value_t = 50)]
    step: usize,

    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args, Debug)]
struct ConfigArgs {
    /// Also write the settings to the config file
    #[arg(long)]
    write: bool,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
enum ScenarioArg {
    /// bmk_measures.txt, integer keys
    #[default]
    Nodes,
    /// bmk_measures_double.txt, double keys
    Double,
}

impl From<ScenarioArg> for Scenario {
    fn from(arg: ScenarioArg) -> Self {
        match arg {
            ScenarioArg::Nodes => Scenario::Nodes,
            ScenarioArg::Double => Scenario::Double,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum KindArg {
    Int,
    Double,
}

impl From<KindArg> for KeyKind {
    fn from(arg: KindArg) -> Self {
        match arg {
            KindArg::Int => KeyKind::Int,
            KindArg::Double => KeyKind::Double,
        }
    }
}

fn init_logging(verbose: u8) {
    let log_level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

fn load_settings(path: Option<&Path>) -> Result<Settings> {
    match path {
        Some(path) => Settings::load_from(path),
        None => Settings::load(),
    }
}

fn plot(args: PlotArgs, settings: &Settings) -> Result<()> {
    let mut chart = settings.chart(args.scenario.into()).clone();
    if let Some(input) = args.input {
        chart = chart.with_input_path(input);
    }
    if let Some(title) = args.title {
        chart = chart.with_title(title);
    }
    if let Some(x_label) = args.x_label {
        chart = chart.with_x_label(x_label);
    }
    if args.no_header {
        chart = chart.with_header(false);
    }
    chart.validate()?;

    let table = io::load_with(&chart.input_path, &chart.x_column, chart.has_header)?;
    let figure = render_with_size(&table, &chart.title, &chart.x_label, settings.size())?;
    present(&figure, &Presentation::from_output(args.output))
}

fn generate(args: GenerateArgs, settings: &Settings) -> Result<()> {
    let key_kind = KeyKind::from(args.kind);
    let config = SweepConfig {
        key_kind,
        max_size: args.max_size,
        start: args.start,
        step: args.step,
        seed: args.seed,
    };
    config.validate()?;

    let output = args
        .output
        .unwrap_or_else(|| settings.chart(key_kind.scenario()).input_path.clone());

    let pb = ProgressBar::new(config.row_count() as u64);
    pb.set_style(
        ProgressStyle::with_template("{spinner} [{bar:40}] {pos}/{len} batches ({eta}) {msg}")
            .map_err(|e| BmkError::ConfigError(format!("Progress template: {}", e)))?,
    );

    let table = run_sweep_with_progress(&config, |size| {
        pb.inc(1);
        pb.set_message(format!("{} keys", size));
    })?;
    pb.finish_and_clear();

    io::save(&table, &output)
}

fn show_config(args: ConfigArgs, settings: &Settings, path: Option<&Path>) -> Result<()> {
    print!("{}", toml::to_string_pretty(settings)?);
    if args.write {
        match path {
            Some(path) => settings.save_to(path)?,
            None => settings.save()?,
        }
    }
    Ok(())
}

fn run(cli: Cli) -> Result<()> {
    let settings = load_settings(cli.config.as_deref())?;
    debug!("Settings: {:?}", settings);

    match cli.command.unwrap_or_else(|| Command::Plot(PlotArgs::default())) {
        Command::Plot(args) => plot(args, &settings),
        Command::Generate(args) => generate(args, &settings),
        Command::Config(args) => show_config(args, &settings, cli.config.as_deref()),
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            debug!("{:?}", err);
            eprintln!("bmkplot: {}", error::user_friendly_message(&err));
            ExitCode::FAILURE
        }
    }
}
