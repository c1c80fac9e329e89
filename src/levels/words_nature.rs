// Animals, plants and the outdoors.
use super::{EVERY, FROM_MEDIUM, HARD_ONLY, LevelItem, Tiers};

const fn w(
    name: &'static str,
    emoji: &'static str,
    czech: &'static str,
    tiers: Tiers,
) -> LevelItem {
    LevelItem { name, emoji, czech, tiers }
}

pub static ANIMALS: [LevelItem; 7] = [
    w("cat", "🐱", "kočka", EVERY),
    w("dog", "🐶", "pes", EVERY),
    w("mouse", "🐭", "myš", EVERY),
    w("rabbit", "🐰", "králík", FROM_MEDIUM),
    w("bear", "🐻", "medvěd", FROM_MEDIUM),
    w("fox", "🦊", "liška", HARD_ONLY),
    w("frog", "🐸", "žába", HARD_ONLY),
];

pub static FARM: [LevelItem; 7] = [
    w("cow", "🐮", "kráva", EVERY),
    w("pig", "🐷", "prase", EVERY),
    w("horse", "🐴", "kůň", EVERY),
    w("chicken", "🐔", "slepice", FROM_MEDIUM),
    w("sheep", "🐑", "ovce", FROM_MEDIUM),
    w("duck", "🦆", "kachna", HARD_ONLY),
    w("goat", "🐐", "koza", HARD_ONLY),
];

pub static FRUIT: [LevelItem; 7] = [
    w("apple", "🍎", "jablko", EVERY),
    w("banana", "🍌", "banán", EVERY),
    w("pear", "🍐", "hruška", EVERY),
    w("orange", "🍊", "pomeranč", FROM_MEDIUM),
    w("strawberry", "🍓", "jahoda", FROM_MEDIUM),
    w("grapes", "🍇", "hrozny", HARD_ONLY),
    w("cherry", "🍒", "třešně", HARD_ONLY),
];

pub static VEGETABLES: [LevelItem; 6] = [
    w("carrot", "🥕", "mrkev", EVERY),
    w("potato", "🥔", "brambora", EVERY),
    w("tomato", "🍅", "rajče", EVERY),
    w("corn", "🌽", "kukuřice", FROM_MEDIUM),
    w("cucumber", "🥒", "okurka", HARD_ONLY),
    w("onion", "🧅", "cibule", HARD_ONLY),
];

pub static NATURE: [LevelItem; 7] = [
    w("sun", "☀️", "slunce", EVERY),
    w("tree", "🌳", "strom", EVERY),
    w("flower", "🌸", "květina", EVERY),
    w("moon", "🌙", "měsíc", FROM_MEDIUM),
    w("star", "⭐", "hvězda", FROM_MEDIUM),
    w("rain", "🌧️", "déšť", HARD_ONLY),
    w("snow", "❄️", "sníh", HARD_ONLY),
];

pub static WILD: [LevelItem; 6] = [
    w("fish", "🐟", "ryba", EVERY),
    w("bird", "🐦", "pták", EVERY),
    w("owl", "🦉", "sova", EVERY),
    w("snail", "🐌", "šnek", FROM_MEDIUM),
    w("hedgehog", "🦔", "ježek", HARD_ONLY),
    w("butterfly", "🦋", "motýl", HARD_ONLY),
];
