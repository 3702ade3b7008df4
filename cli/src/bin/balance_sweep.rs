use clap::Parser;
use engine::api::{BatchStats, CombatConfig, simulate_combat_many};
use engine::content::{builtin_encounters, builtin_heroes};

#[derive(Parser)]
#[command(name = "balance-sweep")]
#[command(about = "Monte Carlo sweep: every builtin hero vs every builtin encounter")]
struct Args {
    /// Number of trials per matchup
    #[arg(long, default_value_t = 200)]
    trials: u32,

    /// Safety cap on rounds per trial
    #[arg(long, default_value_t = 30)]
    max_rounds: u32,

    /// RNG base seed (trial i uses seed+i)
    #[arg(long, default_value_t = 12345)]
    seed: u64,

    /// Restrict the sweep to one hero id
    #[arg(long)]
    hero: Option<String>,

    /// Restrict the sweep to one encounter id
    #[arg(long)]
    encounter: Option<String>,
}

struct Row {
    hero: String,
    encounter: String,
    stats: BatchStats,
}

fn main() -> anyhow::Result<()> {
    engine::init_tracing();
    let args = Args::parse();

    let mut heroes: Vec<&str> = builtin_heroes().keys().copied().collect();
    heroes.sort_unstable();
    let mut encounters: Vec<&str> = builtin_encounters().keys().copied().collect();
    encounters.sort_unstable();

    if let Some(h) = args.hero.as_deref() {
        if !heroes.contains(&h) {
            anyhow::bail!("no builtin hero '{h}'");
        }
        heroes.retain(|id| *id == h);
    }
    if let Some(e) = args.encounter.as_deref() {
        if !encounters.contains(&e) {
            anyhow::bail!("no builtin encounter '{e}'");
        }
        encounters.retain(|id| *id == e);
    }

    let mut rows = Vec::with_capacity(heroes.len() * encounters.len());
    for hero in &heroes {
        for encounter in &encounters {
            let cfg = CombatConfig {
                hero_id: Some(hero.to_string()),
                hero_path: None,
                encounter_id: Some(encounter.to_string()),
                encounter_path: None,
                seed: args.seed,
                hero_hp: None,
                max_rounds: Some(args.max_rounds),
            };
            let stats = simulate_combat_many(cfg, args.trials)?;
            rows.push(Row {
                hero: hero.to_string(),
                encounter: encounter.to_string(),
                stats,
            });
        }
    }

    println!("balance-sweep results ({} trials per matchup)", args.trials);
    println!("---------------------------------------------");
    println!(
        "{:<10} {:<16} {:>8} {:>8} {:>9} {:>11} {:>10}",
        "hero", "encounter", "win%", "loss%", "timeout%", "avg rounds", "avg hp"
    );
    for row in &rows {
        let n = row.stats.samples.max(1) as f64;
        println!(
            "{:<10} {:<16} {:>7.1}% {:>7.1}% {:>8.1}% {:>11.2} {:>10.2}",
            row.hero,
            row.encounter,
            row.stats.victories as f64 / n * 100.0,
            row.stats.defeats as f64 / n * 100.0,
            row.stats.timeouts as f64 / n * 100.0,
            row.stats.avg_rounds,
            row.stats.avg_hero_hp_end,
        );
    }

    Ok(())
}
