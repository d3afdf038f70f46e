//! Basic-attack cast-name classification
//!
//! The process reports basic attacks as spell casts; the name decides whether
//! a cast is a real attack. The lists are balance data for the target patch.

/// Casts that are attacks even without "attack" in their name.
const ATTACKS: [&str; 11] = [
    "caitlynheadshotmissile",
    "kennenmegaproc",
    "masteryidoublestrike",
    "quinnwenhanced",
    "renektonexecute",
    "renektonsuperexecute",
    "trundleq",
    "viktorqbuff",
    "xinzhaoqthrust1",
    "xinzhaoqthrust2",
    "xinzhaoqthrust3",
];

/// Casts that are not attacks despite "attack" in their name.
const NO_ATTACKS: [&str; 22] = [
    "annietibbersbasicattack",
    "annietibbersbasicattack2",
    "asheqattacknoonhit",
    "volleyattackwithsound",
    "volleyattack",
    "azirbasicattacksoldier",
    "elisespiderlingbasicattack",
    "gravesbasicattackspread",
    "gravesautoattackrecoil",
    "heimertyellowbasicattack",
    "heimertbluebasicattack",
    "ivernminionbasicattack",
    "kindredwolfbasicattack",
    "malzaharvoidlingbasicattack",
    "monkeykingdoubleattack",
    "shyvanadoubleattack",
    "shyvanadoubleattackdragon",
    "talonqattack",
    "talonqdashattack",
    "redcardattack",
    "bluecardattack",
    "goldcardattack",
];

/// Casts that reset the basic-attack timer.
const ATTACK_RESETS: [&str; 12] = [
    "powerfist",
    "camilleq",
    "vorpalspikes",
    "dariusnoxiantacticsonh",
    "ekkoe",
    "fiorae",
    "garenq",
    "jaxempowertwo",
    "nasusq",
    "rengarq",
    "vaynetumble",
    "itemtitanichydracleave",
];

/// True when the cast name denotes a basic attack.
pub fn is_auto_attack(name: &str) -> bool {
    let name = name.to_lowercase();
    (name.contains("attack") && !NO_ATTACKS.contains(&name.as_str()))
        || ATTACKS.contains(&name.as_str())
}

/// True when the cast name resets the attack timer.
pub fn is_auto_attack_reset(name: &str) -> bool {
    ATTACK_RESETS.contains(&name.to_lowercase().as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_attack_names() {
        assert!(is_auto_attack("BasicAttack"));
        assert!(is_auto_attack("TurretBasicAttack"));
    }

    #[test]
    fn test_listed_attacks_without_keyword() {
        assert!(is_auto_attack("caitlynheadshotmissile"));
        assert!(is_auto_attack("TrundleQ"));
    }

    #[test]
    fn test_excluded_names_are_not_attacks() {
        assert!(!is_auto_attack("AsheQAttackNoOnHit"));
        assert!(!is_auto_attack("MonkeyKingDoubleAttack"));
        assert!(!is_auto_attack("Fireball"));
    }

    #[test]
    fn test_attack_resets() {
        assert!(is_auto_attack_reset("NasusQ"));
        assert!(!is_auto_attack_reset("BasicAttack"));
    }
}
