use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::{CardCatalog, CardType, TargetMode};
use crate::content::{builtin_cards, builtin_encounters, builtin_heroes};
use crate::entity::{Enemy, EnemySpec, Hero, HeroSpec};
use crate::error::PlayRejection;
use crate::events::CombatEvent;
use crate::outcome::Outcome;
use crate::session::CombatSession;

const DEFAULT_MAX_ROUNDS: u32 = 30;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct EncounterSpec {
    pub name: String,
    pub enemies: Vec<EnemySpec>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct CombatConfig {
    #[serde(default)]
    pub hero_id: Option<String>,
    #[serde(default)]
    pub hero_path: Option<String>,
    #[serde(default)]
    pub encounter_id: Option<String>,
    #[serde(default)]
    pub encounter_path: Option<String>,
    #[serde(default)]
    pub seed: u64,
    /// Override the hero's starting (and max) hp.
    #[serde(default)]
    pub hero_hp: Option<i32>,
    #[serde(default)]
    pub max_rounds: Option<u32>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct CombatReport {
    pub victory: bool,
    pub timed_out: bool,
    pub rounds: u32,
    pub hero_hp_end: i32,
    pub recruit_candidate: Option<String>,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct BatchStats {
    pub samples: u32,
    pub victories: u32,
    pub defeats: u32,
    pub timeouts: u32,
    pub avg_rounds: f64,
    pub avg_hero_hp_end: f64,
}

/// Run one whole combat under a greedy autoplayer: each turn it plays every
/// affordable card (attacks at the weakest living enemy) and ends the turn
/// when nothing is left to play. Rounds are capped so degenerate matchups
/// terminate; hitting the cap reports a timeout, not a victory.
pub fn simulate_combat(cfg: CombatConfig) -> Result<CombatReport> {
    let catalog = CardCatalog::from_json(builtin_cards())?;
    let hero_spec = load_hero(&cfg)?;
    let encounter = load_encounter(&cfg)?;
    if encounter.enemies.is_empty() {
        bail!("encounter '{}' has no enemies", encounter.name);
    }

    let mut hero = Hero::from_spec(&hero_spec);
    if let Some(hp) = cfg.hero_hp {
        hero.max_hp = hp;
        hero.hp = hp;
    }
    let enemies: Vec<Enemy> = encounter.enemies.iter().map(Enemy::from_spec).collect();
    let max_rounds = cfg.max_rounds.unwrap_or(DEFAULT_MAX_ROUNDS);

    let mut log = Vec::new();
    let (mut session, events) =
        CombatSession::new(hero, enemies, hero_spec.deck.clone(), catalog, cfg.seed);
    log_events(&mut log, &events);

    while !session.is_over() && session.turn <= max_rounds {
        play_greedy_turn(&mut session, &mut log);
        if session.is_over() {
            break;
        }
        log_events(&mut log, &session.end_turn().map_err(unexpected_rejection)?);
        if session.is_over() {
            break;
        }
        log_events(
            &mut log,
            &session.run_enemy_phase().map_err(unexpected_rejection)?,
        );
        session.check_invariants()?;
    }

    let timed_out = !session.is_over();
    if timed_out {
        log.push(format!("[END] round cap {max_rounds} reached"));
    }
    let (victory, recruit_candidate) = match session.outcome() {
        Outcome::Victory { recruit_candidate } => (true, recruit_candidate),
        _ => (false, None),
    };

    Ok(CombatReport {
        victory,
        timed_out,
        rounds: session.turn.min(max_rounds),
        hero_hp_end: session.hero.hp,
        recruit_candidate,
        log,
    })
}

/// Repeat `simulate_combat` with seeds `seed..seed+samples` and aggregate.
pub fn simulate_combat_many(cfg: CombatConfig, samples: u32) -> Result<BatchStats> {
    let mut victories = 0u32;
    let mut defeats = 0u32;
    let mut timeouts = 0u32;
    let mut rounds_total = 0u64;
    let mut hp_total = 0i64;

    for i in 0..samples {
        let mut sample_cfg = cfg.clone();
        sample_cfg.seed = cfg.seed.wrapping_add(i as u64);
        let report = simulate_combat(sample_cfg)?;
        if report.timed_out {
            timeouts += 1;
        } else if report.victory {
            victories += 1;
        } else {
            defeats += 1;
        }
        rounds_total += report.rounds as u64;
        hp_total += report.hero_hp_end as i64;
    }

    let div = samples.max(1) as f64;
    Ok(BatchStats {
        samples,
        victories,
        defeats,
        timeouts,
        avg_rounds: rounds_total as f64 / div,
        avg_hero_hp_end: hp_total as f64 / div,
    })
}

fn play_greedy_turn(session: &mut CombatSession, log: &mut Vec<String>) {
    loop {
        let Some((card_id, target)) = pick_play(session) else {
            return;
        };
        match session.play_card(&card_id, target) {
            Ok(events) => log_events(log, &events),
            // Rejections here mean the picker has nothing useful left;
            // stop playing rather than treating it as a failure.
            Err(rejection) => {
                debug!(%rejection, "greedy play rejected, ending turn");
                return;
            }
        }
        if session.is_over() {
            return;
        }
    }
}

fn pick_play(session: &CombatSession) -> Option<(String, Option<usize>)> {
    let weakest = session
        .enemies
        .iter()
        .enumerate()
        .filter(|(_, e)| e.is_alive())
        .min_by_key(|(_, e)| e.hp)
        .map(|(i, _)| i)?;

    // Attacks first so lethal lines are not wasted on setup cards.
    let mut best: Option<(&str, Option<usize>, i32)> = None;
    for id in &session.deck.hand {
        let Some(card) = session.catalog.get(id) else {
            continue;
        };
        if card.cost > session.hero.energy {
            continue;
        }
        let target = match card.target {
            TargetMode::Single => Some(weakest),
            _ => None,
        };
        let priority = match card.kind {
            CardType::Attack => 2,
            CardType::Skill | CardType::Power => 1,
            CardType::Curse => 0,
        };
        let rank = priority * 100 + card.cost;
        if best.is_none_or(|(_, _, r)| rank > r) {
            best = Some((id, target, rank));
        }
    }
    best.map(|(id, target, _)| (id.to_string(), target))
}

fn unexpected_rejection(rejection: PlayRejection) -> anyhow::Error {
    anyhow::anyhow!("engine rejected a scripted command: {rejection}")
}

fn log_events(log: &mut Vec<String>, events: &[CombatEvent]) {
    log.extend(events.iter().map(|e| e.to_string()));
}

pub fn load_hero(cfg: &CombatConfig) -> Result<HeroSpec> {
    if let Some(path) = cfg.hero_path.as_deref() {
        return parse_by_extension(path);
    }
    if let Some(id) = cfg.hero_id.as_deref() {
        let text = builtin_heroes()
            .get(id)
            .copied()
            .with_context(|| format!("no builtin hero '{id}'"))?;
        return serde_json::from_str(text).with_context(|| format!("builtin hero '{id}'"));
    }
    bail!("config needs hero_id or hero_path");
}

pub fn load_encounter(cfg: &CombatConfig) -> Result<EncounterSpec> {
    if let Some(path) = cfg.encounter_path.as_deref() {
        return parse_by_extension(path);
    }
    if let Some(id) = cfg.encounter_id.as_deref() {
        let text = builtin_encounters()
            .get(id)
            .copied()
            .with_context(|| format!("no builtin encounter '{id}'"))?;
        return serde_json::from_str(text).with_context(|| format!("builtin encounter '{id}'"));
    }
    bail!("config needs encounter_id or encounter_path");
}

/// Content files may be JSON or YAML, chosen by extension.
fn parse_by_extension<T: serde::de::DeserializeOwned>(path: &str) -> Result<T> {
    let text = fs::read_to_string(path).with_context(|| format!("failed to read {path}"))?;
    let ext = Path::new(path)
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("");
    if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") {
        serde_yaml::from_str(&text).with_context(|| format!("failed to parse YAML {path}"))
    } else {
        serde_json::from_str(&text).with_context(|| format!("failed to parse JSON {path}"))
    }
}
