mod logic;
mod play;
mod render;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use std::fs::File;
use std::io::{self, BufWriter, Write, stdout};
use std::path::PathBuf;
use std::time::{Duration, Instant};

use oregon_game::{
    InitialPurchases, Journey, OutfitCatalog, SeedSource, ShootingSkill, TurnOutcome,
};

use logic::{
    GameplayStrategy, ReportFormat, SweepPlan, SweepReport, aggregate, load_catalog,
    resolve_seed_inputs, run_sweep, select_outfits, split_csv, verify_determinism,
};
use play::ConsoleDecisions;

#[derive(Debug, Parser)]
#[command(name = "oregon-trail", version)]
#[command(about = "The 1847 Oregon Trail: play it, or sweep strategies across seeds")]
struct Cli {
    /// Verbose logging (RUST_LOG still wins when set)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Outfit catalog JSON to use instead of the built-in presets
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Play interactively on this terminal
    Play(PlayArgs),
    /// Run automated strategies over many seeds and report survival
    Sweep(SweepArgs),
    /// List the outfit presets
    Outfits,
}

#[derive(Debug, Args)]
struct PlayArgs {
    /// Seed: decimal, 0x hex, `pinned` or `entropy`
    #[arg(long, conflicts_with = "pinned_seed")]
    seed: Option<SeedSource>,

    /// Use the fixed 0x12345678 seed
    #[arg(long)]
    pinned_seed: bool,

    /// Outfit preset to start from
    #[arg(long, default_value = "balanced")]
    outfit: String,

    /// Shooting skill, 1 (ace marksman) to 5 (shaky knees)
    #[arg(long)]
    skill: Option<i32>,

    /// Dollars on oxen (200-300), overriding the preset
    #[arg(long)]
    oxen: Option<i32>,

    /// Dollars on food, overriding the preset
    #[arg(long)]
    food: Option<i32>,

    /// Dollars on ammunition, overriding the preset
    #[arg(long)]
    ammunition: Option<i32>,

    /// Dollars on clothing, overriding the preset
    #[arg(long)]
    clothing: Option<i32>,

    /// Dollars on miscellaneous supplies, overriding the preset
    #[arg(long)]
    misc: Option<i32>,

    /// Seconds allowed to type a shot before it counts as a miss
    #[arg(long)]
    shot_seconds: Option<f64>,
}

impl PlayArgs {
    fn seed_source(&self) -> SeedSource {
        if self.pinned_seed {
            SeedSource::Pinned
        } else {
            self.seed.unwrap_or(SeedSource::Entropy)
        }
    }

    fn purchases(&self, catalog: &OutfitCatalog) -> Result<InitialPurchases> {
        let preset = catalog
            .get(&self.outfit)
            .with_context(|| format!("unknown outfit `{}`", self.outfit))?;
        let base = preset.purchases;
        Ok(InitialPurchases {
            shooting_skill: self
                .skill
                .map_or(base.shooting_skill, ShootingSkill::from_choice),
            oxen: self.oxen.unwrap_or(base.oxen),
            food: self.food.unwrap_or(base.food),
            ammunition: self.ammunition.unwrap_or(base.ammunition),
            clothing: self.clothing.unwrap_or(base.clothing),
            misc_supplies: self.misc.unwrap_or(base.misc_supplies),
        })
    }

    fn shot_limit(&self) -> Option<Duration> {
        self.shot_seconds
            .and_then(|secs| Duration::try_from_secs_f64(secs).ok())
    }
}

#[derive(Debug, Args)]
struct SweepArgs {
    /// Seeds to run (comma-separated; decimal, 0x hex, `pinned`, `entropy`)
    #[arg(long, default_value = "pinned")]
    seeds: String,

    /// Consecutive seeds run from each listed seed
    #[arg(long, default_value_t = 10)]
    iterations: u32,

    /// Strategies to run (comma-separated, default all)
    #[arg(long, value_enum, value_delimiter = ',')]
    strategies: Vec<GameplayStrategy>,

    /// Outfit presets to run (comma-separated, or `all`)
    #[arg(long, default_value = "all")]
    outfits: String,

    /// Output report format
    #[arg(long, value_enum, default_value_t = ReportFormat::Console)]
    report: ReportFormat,

    /// Optional path to write the report output instead of stdout
    #[arg(long)]
    output: Option<PathBuf>,

    /// Replay every run and fail if any fingerprint differs
    #[arg(long)]
    verify: bool,
}

impl SweepArgs {
    fn plan(&self, catalog: &OutfitCatalog) -> Result<SweepPlan> {
        let strategies = if self.strategies.is_empty() {
            GameplayStrategy::ALL.to_vec()
        } else {
            self.strategies.clone()
        };
        Ok(SweepPlan {
            seeds: resolve_seed_inputs(&split_csv(&self.seeds))?,
            iterations: self.iterations.max(1),
            strategies,
            outfits: select_outfits(catalog, &split_csv(&self.outfits))?,
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    let catalog = load_catalog(cli.catalog.as_deref())?;

    match &cli.command {
        Commands::Play(args) => run_play(args, &catalog),
        Commands::Sweep(args) => run_sweep_command(args, &catalog),
        Commands::Outfits => list_outfits(&catalog, &mut stdout()),
    }
}

fn init_logging(verbose: bool) {
    let default_filter = if verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();
}

fn announce_banner() {
    println!("{}", "🐂 The Oregon Trail, 1847".bright_cyan().bold());
    println!("{}", "=========================".cyan());
}

fn list_outfits(catalog: &OutfitCatalog, out: &mut dyn Write) -> Result<()> {
    writeln!(out, "Available outfits:")?;
    for preset in &catalog.presets {
        writeln!(
            out,
            "  {:14} - {} (${}) {}",
            preset.id,
            preset.name,
            preset.purchases.normalized().total(),
            preset.desc
        )?;
    }
    out.flush()?;
    Ok(())
}

fn run_play(args: &PlayArgs, catalog: &OutfitCatalog) -> Result<()> {
    let purchases = args.purchases(catalog)?;
    let mut journey =
        Journey::outfit(&purchases, args.seed_source()).context("outfitting the wagon")?;

    announce_banner();
    println!("Trail seed {:#010x}", journey.rng().state());
    println!(
        "After all your purchases you have ${} left.",
        journey.state().cash
    );

    let stdin = io::stdin();
    let mut console =
        ConsoleDecisions::new(stdin.lock(), stdout()).with_shot_limit(args.shot_limit());
    let outcome = play::play_interactive(&mut journey, &mut console)?;

    if let TurnOutcome::Won(_) = outcome {
        println!("{}", "Congratulations! Have a happy new life in Oregon.".green().bold());
    }
    Ok(())
}

fn run_sweep_command(args: &SweepArgs, catalog: &OutfitCatalog) -> Result<()> {
    let plan = args.plan(catalog)?;
    if args.report == ReportFormat::Console && args.output.is_none() {
        announce_banner();
    }

    let start_time = Instant::now();
    let records = run_sweep(&plan)?;
    let verification = args
        .verify
        .then(|| verify_determinism(&records, &plan.outfits));
    let aggregates = aggregate(&records);

    let report = SweepReport {
        aggregates: &aggregates,
        records: &records,
        verified: verification.as_ref().map(Result::is_ok),
    };
    let mut output_target = OutputTarget::new(args.output.clone())?;
    report.write(args.report, &mut output_target)?;
    if args.report == ReportFormat::Console {
        writeln!(&mut output_target)?;
        writeln!(&mut output_target, "🏁 Total time: {:?}", start_time.elapsed())?;
    }
    output_target.flush_inner()?;

    verification.transpose()?;
    Ok(())
}

enum OutputTarget {
    Stdout(BufWriter<io::Stdout>),
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

    fn flush_inner(&mut self) -> io::Result<()> {
        match self {
            Self::Stdout(w) => w.flush(),
            Self::File(w) => w.flush(),
        }
    }
}

impl Write for OutputTarget {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.writer().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.flush_inner()
    }
}
