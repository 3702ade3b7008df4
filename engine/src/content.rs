use std::collections::HashMap;

pub fn builtin_cards() -> &'static str {
    include_str!("../content/cards/basic.json")
}

pub fn builtin_heroes() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        ("wukong", include_str!("../content/heroes/wukong.json")),
        ("tang", include_str!("../content/heroes/tang.json")),
        ("bajie", include_str!("../content/heroes/bajie.json")),
    ])
}

pub fn builtin_encounters() -> HashMap<&'static str, &'static str> {
    HashMap::from([
        (
            "skeleton_pair",
            include_str!("../content/encounters/skeleton_pair.json"),
        ),
        (
            "bat_swarm",
            include_str!("../content/encounters/bat_swarm.json"),
        ),
        (
            "tiger_vanguard",
            include_str!("../content/encounters/tiger_vanguard.json"),
        ),
        (
            "black_bear",
            include_str!("../content/encounters/black_bear.json"),
        ),
    ])
}
