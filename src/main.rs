use anyhow::{Context, Result};
use clap::Parser;
use contagion_lib::app::{prompt, summary_line, App};
use contagion_lib::model::config::{AppConfig, ContactStrategy};
use contagion_lib::model::world::World;
use contagion_tui::Tui;
use std::path::Path;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Mode to run the simulation in
    #[arg(short, long, value_enum, default_value = "tui")]
    mode: Mode,

    /// Custom config file path; defaults are used when it does not exist
    #[arg(short, long, default_value = "config.toml")]
    config: String,

    /// Write the effective configuration to the config path and exit
    #[arg(long)]
    write_config: bool,

    /// Seed for the random stream
    #[arg(long)]
    seed: Option<u64>,

    /// Stop after this many ticks (0 = run until stopped)
    #[arg(long)]
    ticks: Option<u64>,

    /// Delay between ticks in milliseconds
    #[arg(long)]
    interval: Option<u64>,

    /// Number of people
    #[arg(long)]
    population: Option<usize>,

    /// Number of initially infected people
    #[arg(long)]
    infected: Option<usize>,

    /// Vulnerability percentage (0-100)
    #[arg(long)]
    vulnerable: Option<u32>,

    #[arg(long)]
    min_age: Option<i32>,

    #[arg(long)]
    max_age: Option<i32>,

    /// Contact detection strategy
    #[arg(long, value_enum)]
    strategy: Option<Strategy>,

    /// Ask for the setup values on the terminal
    #[arg(short, long)]
    interactive: bool,

    /// Do not write logs/history.jsonl
    #[arg(long)]
    no_history: bool,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Mode {
    Tui,
    Headless,
}

#[derive(clap::ValueEnum, Clone, Copy, Debug)]
enum Strategy {
    CellIndex,
    AllPairs,
}

impl Args {
    fn apply(&self, config: &mut AppConfig) {
        if let Some(seed) = self.seed {
            config.world.seed = Some(seed);
        }
        if let Some(ticks) = self.ticks {
            config.driver.max_ticks = ticks;
        }
        if let Some(interval) = self.interval {
            config.driver.tick_interval_ms = interval;
        }
        if let Some(population) = self.population {
            config.setup.population = population;
        }
        if let Some(infected) = self.infected {
            config.setup.initial_infected = infected;
        }
        if let Some(vulnerable) = self.vulnerable {
            config.setup.vulnerable_percent = vulnerable;
        }
        if let Some(min_age) = self.min_age {
            config.setup.min_age = min_age;
        }
        if let Some(max_age) = self.max_age {
            config.setup.max_age = max_age;
        }
        if let Some(strategy) = self.strategy {
            config.engine.contact_strategy = match strategy {
                Strategy::CellIndex => ContactStrategy::CellIndex,
                Strategy::AllPairs => ContactStrategy::AllPairs,
            };
        }
    }
}

fn init_logging(mode: Mode, log_dir: &str) -> Result<()> {
    match mode {
        Mode::Headless => contagion_core::init_logging("info"),
        Mode::Tui => {
            std::fs::create_dir_all(log_dir)
                .with_context(|| format!("creating log directory {log_dir}"))?;
            let file = std::fs::File::create(Path::new(log_dir).join("contagion.log"))?;
            contagion_core::init_file_logging("info", file);
        }
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let mut config = AppConfig::load(&args.config)?;
    args.apply(&mut config);

    if args.interactive {
        let stdin = std::io::stdin();
        let mut input = stdin.lock();
        let mut output = std::io::stdout();
        config.setup = prompt::prompt_setup(&mut input, &mut output, &config.setup)?;
    }
    config.validate()?;

    if args.write_config {
        let text = toml::to_string_pretty(&config)?;
        std::fs::write(&args.config, text)
            .with_context(|| format!("writing {}", args.config))?;
        println!("Wrote {}", args.config);
        return Ok(());
    }

    init_logging(args.mode, &config.driver.log_dir)?;

    let log_dir = config.driver.log_dir.clone();
    let mut world = World::new(config)?;
    if !args.no_history {
        world = world.with_history(&log_dir)?;
    }
    tracing::info!(seed = world.seed, fingerprint = %world.config.fingerprint(), "Starting run");

    let mut app = App::new(world);
    let reason = match args.mode {
        Mode::Headless => {
            println!("Running in HEADLESS mode (seed {})...", app.world.seed);
            app.run_headless().await?
        }
        Mode::Tui => {
            let mut tui = Tui::new()?;
            tui.init()?;
            let res = app.run(&mut tui).await;
            tui.exit()?;
            res?
        }
    };

    println!("Finished ({}), seed {}", reason.as_str(), app.world.seed);
    println!("{}", summary_line(app.world.tick, app.world.stats()));
    Ok(())
}
