use engine::catalog::{Card, CardCatalog, CardEffect, CardType, Rarity, SpecialTag, TargetMode};
use engine::entity::{Enemy, Hero, Relic};
use engine::intent::{Intent, MoveKind, MoveSpec};
use engine::session::{CombatSession, Phase};
use engine::status::{StatusKind, StatusMap, apply_stacks, stacks};
use engine::{CombatEvent, Outcome, PlayRejection};

fn card(id: &str, cost: i32, kind: CardType, target: TargetMode, effects: CardEffect) -> Card {
    Card {
        id: id.to_string(),
        name: id.to_string(),
        cost,
        kind,
        target,
        rarity: Rarity::Common,
        effects,
        exhaust: false,
    }
}

fn strike() -> Card {
    card(
        "strike",
        1,
        CardType::Attack,
        TargetMode::Single,
        CardEffect {
            damage: Some(6),
            ..Default::default()
        },
    )
}

fn guard() -> Card {
    card(
        "guard",
        1,
        CardType::Skill,
        TargetMode::Hero,
        CardEffect {
            block: Some(8),
            ..Default::default()
        },
    )
}

fn sweep() -> Card {
    card(
        "sweep",
        2,
        CardType::Attack,
        TargetMode::AllEnemies,
        CardEffect {
            damage: Some(8),
            ..Default::default()
        },
    )
}

fn clone_card() -> Card {
    let mut c = card(
        "clone",
        0,
        CardType::Skill,
        TargetMode::Hero,
        CardEffect {
            special: Some(SpecialTag::Clone),
            ..Default::default()
        },
    );
    c.exhaust = true;
    c
}

fn catalog() -> CardCatalog {
    CardCatalog::from_cards(vec![strike(), guard(), sweep(), clone_card()]).unwrap()
}

fn hero() -> Hero {
    Hero {
        id: "hero".to_string(),
        name: "Hero".to_string(),
        max_hp: 50,
        hp: 50,
        block: 0,
        max_energy: 3,
        energy: 3,
        relics: vec![],
        statuses: StatusMap::new(),
    }
}

fn enemy(name: &str, hp: i32, moves: Vec<MoveSpec>) -> Enemy {
    Enemy {
        id: name.to_lowercase(),
        name: name.to_string(),
        max_hp: hp,
        hp,
        block: 0,
        statuses: StatusMap::new(),
        intent: None,
        elite: false,
        boss: false,
        recruit_card: None,
        moves,
    }
}

fn attacker_move(base: i32) -> MoveSpec {
    MoveSpec {
        kind: MoveKind::Attack,
        base,
        scaling: 1,
        weight: 1,
        status: None,
        stacks: None,
    }
}

fn defender_move(block: i32) -> MoveSpec {
    MoveSpec {
        kind: MoveKind::Defend,
        base: block,
        scaling: 0,
        weight: 1,
        status: None,
        stacks: None,
    }
}

fn new_session(enemies: Vec<Enemy>, deck: Vec<&str>) -> CombatSession {
    let deck = deck.into_iter().map(str::to_string).collect();
    let (session, _) = CombatSession::new(hero(), enemies, deck, catalog(), 42);
    session
}

#[test]
fn setup_draws_announces_and_enters_player_turn() {
    let session = new_session(
        vec![enemy("Gnoll", 20, vec![attacker_move(8)])],
        vec!["strike", "strike", "guard"],
    );
    assert_eq!(session.phase, Phase::PlayerTurn);
    assert_eq!(session.turn, 1);
    assert_eq!(session.deck.hand.len(), 3);
    assert!(session.enemies[0].intent.is_some());
}

#[test]
fn playing_an_attack_spends_energy_and_damages_the_target() {
    let mut session = new_session(
        vec![enemy("Gnoll", 20, vec![attacker_move(8)])],
        vec!["strike"],
    );
    let events = session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.hero.energy, 2);
    assert_eq!(session.enemies[0].hp, 14);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::DamageDealt {
            amount: 6,
            hp_lost: 6,
            ..
        }
    )));
}

#[test]
fn block_absorbs_before_hp() {
    let mut target = enemy("Gnoll", 20, vec![attacker_move(8)]);
    target.block = 5;
    let mut session = new_session(vec![target], vec!["strike"]);

    session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.enemies[0].block, 0);
    assert_eq!(session.enemies[0].hp, 19);
}

#[test]
fn insufficient_energy_rejects_without_mutation() {
    let mut session = new_session(
        vec![enemy("Gnoll", 20, vec![attacker_move(8)])],
        vec!["strike", "strike", "strike", "strike"],
    );
    session.play_card("strike", Some(0)).unwrap();
    session.play_card("strike", Some(0)).unwrap();
    session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.hero.energy, 0);

    let err = session.play_card("strike", Some(0)).unwrap_err();
    assert_eq!(
        err,
        PlayRejection::NotEnoughEnergy {
            cost: 1,
            available: 0
        }
    );
    assert_eq!(session.enemies[0].hp, 2);
    assert_eq!(session.deck.hand.len(), 1);
    assert_eq!(session.hero.energy, 0);
}

#[test]
fn dead_enemies_are_illegal_targets() {
    let mut session = new_session(
        vec![
            enemy("Gnoll", 6, vec![attacker_move(8)]),
            enemy("Hyena", 20, vec![attacker_move(8)]),
        ],
        vec!["strike", "strike"],
    );
    session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.enemies[0].hp, 0);

    let err = session.play_card("strike", Some(0)).unwrap_err();
    assert_eq!(err, PlayRejection::InvalidTarget(0));
    let err = session.play_card("strike", None).unwrap_err();
    assert_eq!(err, PlayRejection::MissingTarget);
}

#[test]
fn aoe_hits_only_living_enemies() {
    let mut session = new_session(
        vec![
            enemy("Gnoll", 0, vec![attacker_move(8)]),
            enemy("Hyena", 20, vec![attacker_move(8)]),
            enemy("Jackal", 20, vec![attacker_move(8)]),
        ],
        vec!["sweep"],
    );
    let events = session.play_card("sweep", None).unwrap();
    assert_eq!(session.enemies[0].hp, 0);
    assert_eq!(session.enemies[1].hp, 12);
    assert_eq!(session.enemies[2].hp, 12);
    let hits = events
        .iter()
        .filter(|e| matches!(e, CombatEvent::DamageDealt { .. }))
        .count();
    assert_eq!(hits, 2);
}

#[test]
fn double_cast_applies_to_the_next_attack_only() {
    let mut session = new_session(
        vec![enemy("Gnoll", 30, vec![attacker_move(8)])],
        vec!["clone", "strike", "strike"],
    );

    let events = session.play_card("clone", None).unwrap();
    assert!(session.double_cast);
    assert!(events.contains(&CombatEvent::DoubleCastArmed));
    assert!(events.contains(&CombatEvent::CardExhausted {
        card: "clone".to_string()
    }));

    // First attack casts twice and consumes the flag.
    session.play_card("strike", Some(0)).unwrap();
    assert!(!session.double_cast);
    assert_eq!(session.enemies[0].hp, 18);

    // The next attack is back to a single cast.
    session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.enemies[0].hp, 12);
}

#[test]
fn unconsumed_double_cast_clears_at_end_of_turn() {
    let mut session = new_session(
        vec![enemy("Gnoll", 30, vec![defender_move(5)])],
        vec!["clone", "strike"],
    );
    session.play_card("clone", None).unwrap();
    session.end_turn().unwrap();
    assert!(!session.double_cast);
}

#[test]
fn enemy_attack_scales_with_the_round_counter() {
    let mut session = new_session(vec![enemy("Gnoll", 99, vec![attacker_move(8)])], vec![]);
    // base 8 + scaling 1 x turn 1 = 9
    session.end_turn().unwrap();
    let events = session.run_enemy_phase().unwrap();
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::DamageDealt {
            amount: 9,
            hp_lost: 9,
            ..
        }
    )));
    assert_eq!(session.hero.hp, 41);
    assert_eq!(session.turn, 2);

    // base 8 + scaling 1 x turn 2 = 10
    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    assert_eq!(session.hero.hp, 31);
}

#[test]
fn weak_applied_after_the_telegraph_lowers_the_dealt_damage() {
    let mut session = new_session(vec![enemy("Gnoll", 99, vec![attacker_move(8)])], vec![]);
    let announced = session.enemies[0].intent;
    // base 8 + scaling 1 x turn 1 = 9 at selection time
    assert!(matches!(announced, Some(Intent::Attack { damage: 9 })));

    apply_stacks(&mut session.enemies[0].statuses, StatusKind::Weak, 1);
    session.end_turn().unwrap();
    let events = session.run_enemy_phase().unwrap();

    // The announcement is a snapshot; execution applies the enemy's
    // current WEAK: 9 x 0.75 truncated to 6.
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::DamageDealt {
            amount: 6,
            hp_lost: 6,
            ..
        }
    )));
    assert_eq!(session.hero.hp, 44);
}

#[test]
fn player_block_persists_through_the_enemy_phase() {
    let mut session = new_session(
        vec![enemy("Gnoll", 99, vec![attacker_move(8)])],
        vec!["guard"],
    );
    session.play_card("guard", None).unwrap();
    assert_eq!(session.hero.block, 8);

    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    // 9 incoming, 8 blocked.
    assert_eq!(session.hero.hp, 49);
    // Block resets when the hero's next turn begins (no preserving relic).
    assert_eq!(session.hero.block, 0);
}

#[test]
fn cassock_preserves_a_flat_amount_of_block() {
    let mut h = hero();
    h.relics = vec![Relic::Cassock];
    let enemies = vec![enemy("Gnoll", 99, vec![defender_move(5)])];
    let (mut session, _) = CombatSession::new(
        h,
        enemies,
        vec!["guard".to_string()],
        catalog(),
        42,
    );

    session.play_card("guard", None).unwrap();
    assert_eq!(session.hero.block, 8);
    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    assert_eq!(session.turn, 2);
    assert_eq!(session.hero.block, 5);
}

#[test]
fn golden_hoop_grants_strength_at_combat_start() {
    let mut h = hero();
    h.relics = vec![Relic::GoldenHoop];
    let (mut session, events) = CombatSession::new(
        h,
        vec![enemy("Gnoll", 30, vec![attacker_move(8)])],
        vec!["strike".to_string()],
        catalog(),
        42,
    );
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::StatusApplied {
            status: StatusKind::Strength,
            stacks: 1,
            ..
        }
    )));
    session.play_card("strike", Some(0)).unwrap();
    assert_eq!(session.enemies[0].hp, 23);
}

#[test]
fn stunned_enemy_skips_one_action() {
    let mut session = new_session(vec![enemy("Gnoll", 99, vec![attacker_move(8)])], vec![]);
    apply_stacks(&mut session.enemies[0].statuses, StatusKind::Stun, 1);

    session.end_turn().unwrap();
    let events = session.run_enemy_phase().unwrap();
    assert!(events.iter().any(|e| matches!(e, CombatEvent::EnemyStunned { .. })));
    assert_eq!(session.hero.hp, 50);
    assert_eq!(stacks(&session.enemies[0].statuses, StatusKind::Stun), 0);

    // The stack was consumed; next round the enemy acts normally.
    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    assert_eq!(session.hero.hp, 40);
}

#[test]
fn burn_ticks_at_the_end_of_the_owners_turn() {
    let mut session = new_session(vec![enemy("Gnoll", 10, vec![defender_move(5)])], vec![]);
    apply_stacks(&mut session.enemies[0].statuses, StatusKind::Burn, 2);

    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    assert_eq!(session.enemies[0].hp, 8);
    assert_eq!(stacks(&session.enemies[0].statuses, StatusKind::Burn), 1);

    session.end_turn().unwrap();
    let events = session.run_enemy_phase().unwrap();
    assert_eq!(session.enemies[0].hp, 7);
    assert!(events.iter().any(|e| matches!(
        e,
        CombatEvent::StatusExpired {
            status: StatusKind::Burn,
            ..
        }
    )));
}

#[test]
fn dot_can_finish_an_enemy_and_win_the_combat() {
    let mut session = new_session(vec![enemy("Gnoll", 2, vec![defender_move(5)])], vec![]);
    apply_stacks(&mut session.enemies[0].statuses, StatusKind::Burn, 3);

    session.end_turn().unwrap();
    let events = session.run_enemy_phase().unwrap();
    assert_eq!(session.enemies[0].hp, 0);
    assert!(events.contains(&CombatEvent::CombatEnded { victory: true }));
    assert!(session.is_over());
}

#[test]
fn defeat_halts_the_remaining_enemy_actions() {
    let mut h = hero();
    h.hp = 1;
    let enemies = vec![
        enemy("Gnoll", 99, vec![attacker_move(8)]),
        enemy("Hyena", 99, vec![attacker_move(8)]),
    ];
    let (mut session, _) = CombatSession::new(h, enemies, vec![], catalog(), 42);

    session.end_turn().unwrap();
    let events = session.advance_enemy().unwrap();
    assert!(events.contains(&CombatEvent::HeroDefeated));
    assert!(events.contains(&CombatEvent::CombatEnded { victory: false }));
    assert_eq!(session.phase, Phase::Defeat);
    assert_eq!(session.outcome(), Outcome::Defeat);

    // The second enemy never gets to act.
    let err = session.advance_enemy().unwrap_err();
    assert_eq!(err, PlayRejection::CombatOver);
}

#[test]
fn terminal_states_are_absorbing() {
    let mut session = new_session(
        vec![enemy("Gnoll", 6, vec![attacker_move(8)])],
        vec!["strike", "strike"],
    );
    let events = session.play_card("strike", Some(0)).unwrap();
    assert!(events.contains(&CombatEvent::CombatEnded { victory: true }));

    assert_eq!(
        session.play_card("strike", Some(0)).unwrap_err(),
        PlayRejection::CombatOver
    );
    assert_eq!(session.end_turn().unwrap_err(), PlayRejection::CombatOver);
    assert_eq!(
        session.run_enemy_phase().unwrap_err(),
        PlayRejection::CombatOver
    );
}

#[test]
fn invariants_hold_across_a_full_round() {
    let mut session = new_session(
        vec![enemy("Gnoll", 40, vec![attacker_move(8)])],
        vec!["strike", "strike", "guard", "guard", "strike", "strike"],
    );
    session.check_invariants().unwrap();
    session.play_card("strike", Some(0)).unwrap();
    session.play_card("guard", None).unwrap();
    session.check_invariants().unwrap();
    session.end_turn().unwrap();
    session.run_enemy_phase().unwrap();
    session.check_invariants().unwrap();
    assert_eq!(session.deck.total_cards(), 6);
}
