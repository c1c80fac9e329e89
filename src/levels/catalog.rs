// Play order of the built-in levels.
//
// Flashcard runs are followed by an auto-review of that run, then a mini-game.
use super::words_home::{BODY, CLOTHES, FAMILY, FOOD, HOME, PLAY, TOYS, TRANSPORT};
use super::words_minigames::{COLORS, COUNTABLES, CUSTOMERS, DRINKS, ROOMS, SHAPES, TIDY_UP};
use super::words_nature::{ANIMALS, FARM, FRUIT, NATURE, VEGETABLES, WILD};
use super::{Level, LevelContent};

pub static LEVELS: [Level; 25] = [
    // 0..=4
    Level::standard("Zvířátka", &ANIMALS),
    Level::standard("Na statku", &FARM),
    Level::standard("Ovoce", &FRUIT),
    Level::standard("Zelenina", &VEGETABLES),
    Level::new("Opakování 1", LevelContent::AutoReview { range: (0, 3) }),
    // 5
    Level::new("Pexeso", LevelContent::Memory),
    // 6..=9
    Level::standard("Hračky", &TOYS),
    Level::standard("Moje tělo", &BODY),
    Level::standard("Oblečení", &CLOTHES),
    Level::new("Opakování 2", LevelContent::AutoReview { range: (6, 8) }),
    // 10
    Level::new(
        "Omalovánky",
        LevelContent::Coloring {
            colors: &COLORS,
            shapes: &SHAPES,
        },
    ),
    // 11..=14
    Level::standard("Rodina", &FAMILY),
    Level::standard("Doma", &HOME),
    Level::standard("Jídlo", &FOOD),
    Level::new("Opakování 3", LevelContent::AutoReview { range: (11, 13) }),
    // 15
    Level::new(
        "Uklízení",
        LevelContent::DragDrop {
            destinations: &ROOMS,
            items: &TIDY_UP,
            items_per_round: 3,
        },
    ),
    // 16..=18
    Level::standard("Příroda", &NATURE),
    Level::standard("Doprava", &TRANSPORT),
    Level::new("Opakování 4", LevelContent::AutoReview { range: (16, 17) }),
    // 19
    Level::new(
        "Počítání",
        LevelContent::Counting {
            objects: &COUNTABLES,
        },
    ),
    // 20..=22
    Level::standard("Hrajeme si", &PLAY),
    Level::standard("V lese a u vody", &WILD),
    Level::new("Opakování 5", LevelContent::AutoReview { range: (20, 21) }),
    // 23
    Level::new(
        "Restaurace",
        LevelContent::Restaurant {
            drinks: &DRINKS,
            customers: &CUSTOMERS,
            customers_to_serve: 5,
        },
    ),
    // 24
    Level::new("Rytmus", LevelContent::Rhythm),
];

