use clap::{Args, Parser, Subcommand};
use engine::api::{CombatConfig, simulate_combat, simulate_combat_many};
use engine::catalog::CardCatalog;
use engine::content::{builtin_cards, builtin_encounters, builtin_heroes};

#[derive(Args, Clone)]
struct MatchupArgs {
    /// Builtin hero id (wukong, tang, bajie)
    #[arg(long, default_value = "wukong")]
    hero: String,
    /// Path to a hero file (JSON or YAML); overrides --hero
    #[arg(long)]
    hero_path: Option<String>,
    /// Builtin encounter id
    #[arg(long, default_value = "skeleton_pair")]
    encounter: String,
    /// Path to an encounter file (JSON or YAML); overrides --encounter
    #[arg(long)]
    encounter_path: Option<String>,
    /// RNG seed for determinism
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Override the hero's starting hp
    #[arg(long)]
    hero_hp: Option<i32>,
    /// Round cap before the combat counts as a timeout
    #[arg(long)]
    max_rounds: Option<u32>,
}

impl MatchupArgs {
    fn into_config(self) -> CombatConfig {
        CombatConfig {
            hero_id: if self.hero_path.is_some() {
                None
            } else {
                Some(self.hero)
            },
            hero_path: self.hero_path,
            encounter_id: if self.encounter_path.is_some() {
                None
            } else {
                Some(self.encounter)
            },
            encounter_path: self.encounter_path,
            seed: self.seed,
            hero_hp: self.hero_hp,
            max_rounds: self.max_rounds,
        }
    }
}

#[derive(Subcommand)]
enum Cmd {
    /// Run one combat under the greedy autoplayer and print the log
    Simulate {
        #[command(flatten)]
        matchup: MatchupArgs,
        /// Emit the report as JSON instead of the readable log
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Run many combats over consecutive seeds and print aggregate stats
    SimulateMany {
        #[command(flatten)]
        matchup: MatchupArgs,
        /// Number of combats to run
        #[arg(long, default_value_t = 100)]
        samples: u32,
        /// Emit the stats as JSON
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// List the builtin card catalog
    Cards,
    /// Serialize a builtin hero to JSON (stdout)
    HeroDump {
        /// Builtin hero id
        #[arg(long, default_value = "wukong")]
        hero: String,
        /// Pretty-print JSON
        #[arg(long, default_value_t = true)]
        pretty: bool,
    },
    /// List the builtin encounter ids
    Encounters,
}

#[derive(Parser)]
#[command(name = "echoes-cli")]
#[command(about = "Echoes combat simulator harness")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

fn main() -> anyhow::Result<()> {
    engine::init_tracing();
    let cli = Cli::parse();
    match cli.cmd {
        Cmd::Simulate { matchup, json } => {
            let report = simulate_combat(matchup.into_config())?;
            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                for line in &report.log {
                    println!("{line}");
                }
                let verdict = if report.timed_out {
                    "TIMEOUT"
                } else if report.victory {
                    "VICTORY"
                } else {
                    "DEFEAT"
                };
                println!(
                    "{verdict} after {} round(s), hero hp {}",
                    report.rounds, report.hero_hp_end
                );
                if let Some(card) = &report.recruit_candidate {
                    println!("recruit candidate: {card}");
                }
            }
        }
        Cmd::SimulateMany {
            matchup,
            samples,
            json,
        } => {
            let stats = simulate_combat_many(matchup.into_config(), samples)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&stats)?);
            } else {
                println!(
                    "{} sample(s): {} win / {} loss / {} timeout",
                    stats.samples, stats.victories, stats.defeats, stats.timeouts
                );
                println!(
                    "avg rounds {:.2}, avg hero hp at end {:.2}",
                    stats.avg_rounds, stats.avg_hero_hp_end
                );
            }
        }
        Cmd::Cards => {
            let catalog = CardCatalog::from_json(builtin_cards())?;
            for card in catalog.iter() {
                println!(
                    "{:<14} cost {}  {:?}/{:?}  {}",
                    card.id, card.cost, card.kind, card.target, card.name
                );
            }
        }
        Cmd::HeroDump { hero, pretty } => {
            let Some(text) = builtin_heroes().get(hero.as_str()).copied() else {
                anyhow::bail!("no builtin hero '{hero}'");
            };
            let value: serde_json::Value = serde_json::from_str(text)?;
            if pretty {
                println!("{}", serde_json::to_string_pretty(&value)?);
            } else {
                println!("{}", serde_json::to_string(&value)?);
            }
        }
        Cmd::Encounters => {
            let mut ids: Vec<&str> = builtin_encounters().keys().copied().collect();
            ids.sort_unstable();
            for id in ids {
                println!("{id}");
            }
        }
    }
    Ok(())
}
