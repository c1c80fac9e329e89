// Payloads for the mini-game levels.
use super::{
    ColorItem, CountingObject, Destination, DragDropItem, DrinkItem, EVERY, FROM_MEDIUM,
    HARD_ONLY, LevelItem, ShapeItem, Tiers,
};

// Coloring: palette order matters, easy players only get the first two colors.
pub static COLORS: [ColorItem; 7] = [
    ColorItem { name: "red", czech: "červená", color: "#e63946", tiers: EVERY },
    ColorItem { name: "blue", czech: "modrá", color: "#457b9d", tiers: EVERY },
    ColorItem { name: "yellow", czech: "žlutá", color: "#ffd166", tiers: EVERY },
    ColorItem { name: "green", czech: "zelená", color: "#2a9d8f", tiers: EVERY },
    ColorItem { name: "orange", czech: "oranžová", color: "#f4a261", tiers: FROM_MEDIUM },
    ColorItem { name: "purple", czech: "fialová", color: "#8e44ad", tiers: HARD_ONLY },
    ColorItem { name: "pink", czech: "růžová", color: "#ff8fab", tiers: HARD_ONLY },
];

pub static SHAPES: [ShapeItem; 5] = [
    ShapeItem { name: "circle", czech: "kruh", tiers: EVERY },
    ShapeItem { name: "square", czech: "čtverec", tiers: EVERY },
    ShapeItem { name: "triangle", czech: "trojúhelník", tiers: EVERY },
    ShapeItem { name: "star", czech: "hvězda", tiers: FROM_MEDIUM },
    ShapeItem { name: "heart", czech: "srdce", tiers: HARD_ONLY },
];

pub static ROOMS: [Destination; 3] = [
    Destination { name: "fridge", czech: "lednice", emoji: "🧊", css_class: "fridge" },
    Destination { name: "wardrobe", czech: "skříň", emoji: "🚪", css_class: "wardrobe" },
    Destination { name: "toy box", czech: "krabice na hračky", emoji: "📦", css_class: "toyBox" },
];

const fn put(
    name: &'static str,
    emoji: &'static str,
    czech: &'static str,
    tiers: Tiers,
    belongs_to: &'static str,
) -> DragDropItem {
    DragDropItem { item: LevelItem { name, emoji, czech, tiers }, belongs_to }
}

pub static TIDY_UP: [DragDropItem; 9] = [
    put("milk", "🥛", "mléko", EVERY, "fridge"),
    put("cheese", "🧀", "sýr", EVERY, "fridge"),
    put("socks", "🧦", "ponožky", EVERY, "wardrobe"),
    put("dress", "👗", "šaty", EVERY, "wardrobe"),
    put("ball", "⚽", "míč", EVERY, "toy box"),
    put("teddy bear", "🧸", "plyšový medvídek", EVERY, "toy box"),
    put("butter", "🧈", "máslo", FROM_MEDIUM, "fridge"),
    put("scarf", "🧣", "šála", HARD_ONLY, "wardrobe"),
    put("kite", "🪁", "drak", HARD_ONLY, "toy box"),
];

pub static COUNTABLES: [CountingObject; 6] = [
    CountingObject {
        name: "apples",
        name_singular: "apple",
        emoji: "🍎",
        czech: "jablka",
        czech_singular: "jablko",
        tiers: EVERY,
    },
    CountingObject {
        name: "ducks",
        name_singular: "duck",
        emoji: "🦆",
        czech: "kachny",
        czech_singular: "kachna",
        tiers: EVERY,
    },
    CountingObject {
        name: "stars",
        name_singular: "star",
        emoji: "⭐",
        czech: "hvězdy",
        czech_singular: "hvězda",
        tiers: EVERY,
    },
    CountingObject {
        name: "balloons",
        name_singular: "balloon",
        emoji: "🎈",
        czech: "balónky",
        czech_singular: "balónek",
        tiers: EVERY,
    },
    CountingObject {
        name: "cars",
        name_singular: "car",
        emoji: "🚗",
        czech: "auta",
        czech_singular: "auto",
        tiers: FROM_MEDIUM,
    },
    CountingObject {
        name: "fish",
        name_singular: "fish",
        emoji: "🐟",
        czech: "ryby",
        czech_singular: "ryba",
        tiers: HARD_ONLY,
    },
];

pub static DRINKS: [DrinkItem; 6] = [
    DrinkItem { name: "water", emoji: "💧", czech: "voda", tiers: EVERY },
    DrinkItem { name: "milk", emoji: "🥛", czech: "mléko", tiers: EVERY },
    DrinkItem { name: "juice", emoji: "🧃", czech: "džus", tiers: EVERY },
    DrinkItem { name: "tea", emoji: "🍵", czech: "čaj", tiers: FROM_MEDIUM },
    DrinkItem { name: "cocoa", emoji: "☕", czech: "kakao", tiers: HARD_ONLY },
    DrinkItem { name: "lemonade", emoji: "🍋", czech: "limonáda", tiers: HARD_ONLY },
];

pub static CUSTOMERS: [&str; 6] = ["🧑", "👧", "👦", "👵", "👴", "🧔"];
