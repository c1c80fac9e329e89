// Everyday words: toys, body, clothes, family, home, food, transport, play.
use super::{EVERY, FROM_MEDIUM, HARD_ONLY, LevelItem, Tiers};

const fn w(
    name: &'static str,
    emoji: &'static str,
    czech: &'static str,
    tiers: Tiers,
) -> LevelItem {
    LevelItem { name, emoji, czech, tiers }
}

pub static TOYS: [LevelItem; 6] = [
    w("ball", "⚽", "míč", EVERY),
    w("teddy bear", "🧸", "plyšový medvídek", EVERY),
    w("kite", "🪁", "drak", EVERY),
    w("doll", "🪆", "panenka", FROM_MEDIUM),
    w("balloon", "🎈", "balónek", FROM_MEDIUM),
    w("puzzle", "🧩", "puzzle", HARD_ONLY),
];

pub static BODY: [LevelItem; 7] = [
    w("eye", "👁️", "oko", EVERY),
    w("ear", "👂", "ucho", EVERY),
    w("nose", "👃", "nos", EVERY),
    w("hand", "✋", "ruka", FROM_MEDIUM),
    w("foot", "🦶", "noha", FROM_MEDIUM),
    w("mouth", "👄", "pusa", HARD_ONLY),
    w("tooth", "🦷", "zub", HARD_ONLY),
];

pub static CLOTHES: [LevelItem; 6] = [
    w("hat", "👒", "klobouk", EVERY),
    w("shoe", "👟", "bota", EVERY),
    w("dress", "👗", "šaty", EVERY),
    w("socks", "🧦", "ponožky", FROM_MEDIUM),
    w("gloves", "🧤", "rukavice", HARD_ONLY),
    w("scarf", "🧣", "šála", HARD_ONLY),
];

pub static FAMILY: [LevelItem; 6] = [
    w("mum", "👩", "maminka", EVERY),
    w("dad", "👨", "tatínek", EVERY),
    w("baby", "👶", "miminko", EVERY),
    w("grandma", "👵", "babička", FROM_MEDIUM),
    w("grandpa", "👴", "dědeček", FROM_MEDIUM),
    w("family", "👪", "rodina", HARD_ONLY),
];

pub static HOME: [LevelItem; 6] = [
    w("house", "🏠", "dům", EVERY),
    w("bed", "🛏️", "postel", EVERY),
    w("chair", "🪑", "židle", EVERY),
    w("door", "🚪", "dveře", FROM_MEDIUM),
    w("window", "🪟", "okno", HARD_ONLY),
    w("lamp", "💡", "lampa", HARD_ONLY),
];

pub static FOOD: [LevelItem; 7] = [
    w("bread", "🍞", "chleba", EVERY),
    w("cheese", "🧀", "sýr", EVERY),
    w("egg", "🥚", "vajíčko", EVERY),
    w("cake", "🍰", "dort", FROM_MEDIUM),
    w("soup", "🍲", "polévka", FROM_MEDIUM),
    w("pizza", "🍕", "pizza", HARD_ONLY),
    w("ice cream", "🍦", "zmrzlina", HARD_ONLY),
];

pub static TRANSPORT: [LevelItem; 6] = [
    w("car", "🚗", "auto", EVERY),
    w("bus", "🚌", "autobus", EVERY),
    w("train", "🚂", "vlak", EVERY),
    w("plane", "✈️", "letadlo", FROM_MEDIUM),
    w("boat", "⛵", "loďka", FROM_MEDIUM),
    w("bike", "🚲", "kolo", HARD_ONLY),
];

pub static PLAY: [LevelItem; 6] = [
    w("swing", "🛝", "houpačka", EVERY),
    w("drum", "🥁", "buben", EVERY),
    w("guitar", "🎸", "kytara", EVERY),
    w("book", "📖", "kniha", FROM_MEDIUM),
    w("crayon", "🖍️", "pastelka", HARD_ONLY),
    w("trumpet", "🎺", "trumpeta", HARD_ONLY),
];
