//! Coloring: hear "red circle", pick the color, then paint the shape.

use rand::rngs::SmallRng;
use rand::seq::{IndexedRandom, SliceRandom};
use serde::Serialize;

use super::{Game, GameHost, GameTimer, PlayerInput, rng_from};
use crate::config::GameRules;
use crate::difficulty::{Difficulty, filter_by_difficulty};
use crate::feedback::Cue;
use crate::levels::{ColorItem, ShapeItem};

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaletteColor {
    #[serde(flatten)]
    pub color: ColorItem,
    pub used: bool,
}

#[derive(Clone, Copy, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PaintedShape {
    pub shape: &'static str,
    pub color: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ColoringGame {
    palette: Vec<PaletteColor>,
    shapes: Vec<ShapeItem>,
    painted: Vec<PaintedShape>,
    selected: Option<usize>,
    play_enabled: bool,
    transitioning: bool,
    finished: bool,
    message: &'static str,
    #[serde(skip)]
    all_shapes: Vec<ShapeItem>,
    #[serde(skip)]
    target: Option<(usize, ShapeItem)>,
    #[serde(skip)]
    rules: GameRules,
    #[serde(skip)]
    rng: SmallRng,
}

impl ColoringGame {
    pub fn new(
        colors: &[ColorItem],
        shapes: &[ShapeItem],
        difficulty: Difficulty,
        rules: GameRules,
        seed: u64,
    ) -> Self {
        let mut palette = filter_by_difficulty(colors, difficulty);
        palette.truncate(difficulty.palette_size());
        Self {
            palette: palette
                .into_iter()
                .map(|color| PaletteColor { color, used: false })
                .collect(),
            shapes: Vec::new(),
            painted: Vec::new(),
            selected: None,
            play_enabled: false,
            transitioning: true,
            finished: false,
            message: "",
            all_shapes: filter_by_difficulty(shapes, difficulty),
            target: None,
            rules,
            rng: rng_from(seed),
        }
    }

    pub fn palette(&self) -> &[PaletteColor] {
        &self.palette
    }

    pub fn shapes(&self) -> &[ShapeItem] {
        &self.shapes
    }

    /// Palette index and shape asked for.
    pub fn target(&self) -> Option<(usize, ShapeItem)> {
        self.target
    }

    pub fn painted(&self) -> &[PaintedShape] {
        &self.painted
    }

    fn next_shape(&mut self, host: &mut dyn GameHost) {
        let open: Vec<usize> = (0..self.palette.len()).filter(|&i| !self.palette[i].used).collect();
        let (Some(&color), Some(&shape)) = (open.choose(&mut self.rng), self.all_shapes.choose(&mut self.rng)) else {
            self.finished = true;
            self.play_enabled = false;
            self.message = "🎨 Skvělá práce! Level dokončen!";
            host.play(Cue::Correct);
            host.schedule(self.rules.timing.short_ms, GameTimer::Complete);
            return;
        };
        self.shapes = self.all_shapes.clone();
        self.shapes.shuffle(&mut self.rng);
        self.target = Some((color, shape));
        self.selected = None;
        self.transitioning = false;
        self.play_enabled = true;
        self.message = "Klikni na PLAY a poslechni si barvu a tvar!";
    }

    fn play(&mut self, host: &mut dyn GameHost) -> bool {
        let Some((color, shape)) = self.target else { return false };
        if self.transitioning || self.finished || !self.play_enabled {
            return false;
        }
        self.play_enabled = false;
        self.message = if self.selected.is_some() {
            "Vyber správný tvar a obarvi ho!"
        } else {
            "Vyber správnou barvu a pak správný tvar!"
        };
        host.speak(&format!("{} {}", self.palette[color].color.name, shape.name));
        true
    }

    fn pick_color(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        if self.transitioning || self.finished {
            return false;
        }
        let Some(entry) = self.palette.get(index).filter(|c| !c.used) else { return false };
        host.speak(entry.color.name);
        self.selected = Some(index);
        self.message = "Teď vyber tvar a obarvi ho!";
        true
    }

    fn paint(&mut self, host: &mut dyn GameHost, index: usize) -> bool {
        let Some((color, shape)) = self.target else { return false };
        if self.transitioning || self.finished || index >= self.shapes.len() {
            return false;
        }
        let Some(selected) = self.selected else {
            self.message = "Nejdřív vyber barvu!";
            host.play(Cue::Error);
            return true;
        };
        if selected != color || self.shapes[index].name != shape.name {
            self.message = if selected != color {
                "❌ Špatná barva! Zkus to znovu."
            } else {
                "❌ Špatný tvar! Zkus to znovu."
            };
            host.play(Cue::Error);
            host.schedule(self.rules.timing.wrong_ms, GameTimer::ReenablePlay);
            return true;
        }

        self.palette[color].used = true;
        self.painted.push(PaintedShape {
            shape: shape.name,
            color: self.palette[color].color.color,
        });
        self.selected = None;
        self.transitioning = true;
        self.message = "🎉 Skvěle! +10 bodů";
        host.add_score(self.rules.scoring.correct);
        host.play(Cue::Correct);
        host.schedule(self.rules.timing.wrong_ms, GameTimer::NextRound);
        true
    }
}

impl Game for ColoringGame {
    fn start(&mut self, host: &mut dyn GameHost) {
        self.next_shape(host);
    }

    fn input(&mut self, host: &mut dyn GameHost, input: PlayerInput) -> bool {
        match input {
            PlayerInput::Play => self.play(host),
            PlayerInput::PickColor { index } => self.pick_color(host, index),
            PlayerInput::Pick { index } => self.paint(host, index),
            _ => false,
        }
    }

    fn on_timer(&mut self, host: &mut dyn GameHost, timer: GameTimer) {
        match timer {
            GameTimer::ReenablePlay => {
                if !self.transitioning && !self.finished {
                    self.play_enabled = true;
                }
            }
            GameTimer::NextRound => self.next_shape(host),
            GameTimer::Complete => host.complete_level(),
            _ => {}
        }
    }
}
