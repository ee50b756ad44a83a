/// Multiplier for an attacker of `attacking` primary type hitting a defender of
/// `defending` primary type. Pairs not listed are neutral.
///
/// Only primary types take part; a creature's secondary types never change
/// the multiplier.
pub fn type_effectiveness(attacking: &str, defending: &str) -> f64 {
    let atk = attacking.to_ascii_lowercase();
    let def = defending.to_ascii_lowercase();
    match atk.as_str() {
        "fire" => match def.as_str() {
            "grass" | "ice" | "bug" | "steel" => 2.0,
            "water" | "fire" => 0.5,
            _ => 1.0,
        },
        "water" => match def.as_str() {
            "fire" | "ground" | "rock" => 2.0,
            "grass" | "water" | "electric" => 0.5,
            _ => 1.0,
        },
        "grass" => match def.as_str() {
            "water" | "ground" | "rock" => 2.0,
            "fire" | "flying" | "grass" | "bug" => 0.5,
            _ => 1.0,
        },
        "electric" => match def.as_str() {
            "water" | "flying" => 2.0,
            "electric" | "grass" => 0.5,
            "ground" => 0.0,
            _ => 1.0,
        },
        "psychic" => match def.as_str() {
            "fighting" | "poison" => 2.0,
            "psychic" => 0.5,
            "dark" => 0.0,
            _ => 1.0,
        },
        "normal" => match def.as_str() {
            "rock" | "steel" => 0.5,
            "ghost" => 0.0,
            _ => 1.0,
        },
        "fighting" => match def.as_str() {
            "normal" | "rock" | "steel" => 2.0,
            "flying" | "psychic" | "bug" => 0.5,
            _ => 1.0,
        },
        "flying" => match def.as_str() {
            "grass" | "fighting" | "bug" => 2.0,
            "electric" | "rock" | "steel" => 0.5,
            _ => 1.0,
        },
        "poison" => match def.as_str() {
            "grass" | "fairy" => 2.0,
            "ground" | "psychic" | "rock" => 0.5,
            _ => 1.0,
        },
        "ground" => match def.as_str() {
            "fire" | "electric" | "poison" | "rock" | "steel" => 2.0,
            "grass" | "bug" => 0.5,
            "flying" => 0.0,
            _ => 1.0,
        },
        "rock" => match def.as_str() {
            "fire" | "ice" | "flying" | "bug" => 2.0,
            "fighting" | "ground" | "steel" => 0.5,
            _ => 1.0,
        },
        "bug" => match def.as_str() {
            "grass" | "psychic" | "dark" => 2.0,
            "fire" | "fighting" | "flying" | "ghost" => 0.5,
            _ => 1.0,
        },
        "ghost" => match def.as_str() {
            "psychic" | "ghost" => 2.0,
            "dark" => 0.5,
            "normal" => 0.0,
            _ => 1.0,
        },
        "steel" => match def.as_str() {
            "ice" | "rock" | "fairy" => 2.0,
            "fire" | "fighting" | "ground" => 0.5,
            _ => 1.0,
        },
        "ice" => match def.as_str() {
            "grass" | "ground" | "flying" | "dragon" => 2.0,
            "fire" | "steel" | "ice" => 0.5,
            _ => 1.0,
        },
        "dragon" => match def.as_str() {
            "dragon" => 2.0,
            "steel" => 0.5,
            "fairy" => 0.0,
            _ => 1.0,
        },
        "dark" => match def.as_str() {
            "psychic" | "ghost" => 2.0,
            "fighting" | "dark" | "fairy" => 0.5,
            _ => 1.0,
        },
        "fairy" => match def.as_str() {
            "fighting" | "dragon" | "dark" => 2.0,
            "poison" | "steel" | "fire" => 0.5,
            _ => 1.0,
        },
        _ => 1.0,
    }
}
