use clap::Parser;
use contagion_lib::model::history::{read_history, HistorySummary};
use contagion_lib::model::state::PopulationStats;
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(author, version, about = "Summarise a recorded run", long_about = None)]
struct Args {
    #[arg(short = 'H', long, default_value = "logs/history.jsonl")]
    history: String,

    /// Print the summary as JSON
    #[arg(long)]
    json: bool,
}

#[derive(Serialize)]
struct Report<'a> {
    seed: u64,
    fingerprint: &'a str,
    runs_in_file: usize,
    records: usize,
    peak_infected: usize,
    peak_tick: u64,
    transmissions: usize,
    reinfections: usize,
    recoveries: usize,
    final_tick: Option<u64>,
    final_stats: Option<PopulationStats>,
    finished: Option<&'a str>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let entries = read_history(&args.history)?;
    let summary = HistorySummary::from_entries(&entries)?;

    let report = Report {
        seed: summary.header.seed,
        fingerprint: &summary.header.fingerprint,
        runs_in_file: summary.runs,
        records: summary.records,
        peak_infected: summary.peak_infected,
        peak_tick: summary.peak_tick,
        transmissions: summary.events.transmissions,
        reinfections: summary.events.reinfections,
        recoveries: summary.events.recoveries,
        final_tick: summary.last.as_ref().map(|r| r.tick),
        final_stats: summary.last.as_ref().map(|r| r.stats),
        finished: summary.finished.as_ref().map(|(_, reason)| reason.as_str()),
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("Run started {} (seed {})", summary.header.started_at, report.seed);
    println!("Config fingerprint: {}", report.fingerprint);
    println!(
        "Initial: {} people, {} infected",
        summary.header.initial.total_people, summary.header.initial.total_infected
    );
    println!("Peak infected: {} at tick {}", report.peak_infected, report.peak_tick);
    println!(
        "Events: {} transmissions, {} reinfections, {} recoveries",
        report.transmissions, report.reinfections, report.recoveries
    );
    if let (Some(tick), Some(stats)) = (report.final_tick, report.final_stats) {
        println!(
            "Final (tick {tick}): {} people, {} infected, {} immune, {} recovered, {} births, {} deaths",
            stats.total_people,
            stats.total_infected,
            stats.total_immune,
            stats.total_recovered,
            stats.births,
            stats.deaths
        );
    }
    match report.finished {
        Some(reason) => println!("Ended: {reason}"),
        None => println!("Ended: no finish marker (run still going or crashed)"),
    }
    Ok(())
}
