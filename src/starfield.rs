//! Background starfield drifting up behind the colony.
//!
//! Purely cosmetic, so it lives outside `GameState`; the front end owns one
//! and advances it once per frame. On the win screen the stars twinkle.

use rand::Rng;

/// Frames between twinkle colour changes.
pub const TWINKLE_FRAMES: u32 = 10;
/// Drift speed range, in cells per frame.
const MIN_SPEED: f32 = 0.01;
const MAX_SPEED: f32 = 0.075;
/// Twinkle channels stay bright enough to read on a dark background.
const MIN_CHANNEL: u8 = 100;

#[derive(Clone, Debug, PartialEq)]
pub struct Star {
    pub x: f32,
    pub y: f32,
    pub speed: f32,
    /// `None` = plain white; set only while twinkling.
    pub tint: Option<(u8, u8, u8)>,
    timer: u32,
}

impl Star {
    fn random(width: usize, height: usize, rng: &mut impl Rng) -> Self {
        Self {
            x: rng.gen_range(0.0..width as f32),
            y: rng.gen_range(0.0..height as f32),
            speed: rng.gen_range(MIN_SPEED..MAX_SPEED),
            tint: None,
            timer: 0,
        }
    }

    fn update(&mut self, width: usize, height: usize, twinkle: bool, rng: &mut impl Rng) {
        self.y -= self.speed;
        if self.y < 0.0 {
            self.y = height as f32;
            self.x = rng.gen_range(0.0..width as f32);
        }

        if !twinkle {
            self.tint = None;
            return;
        }
        self.timer += 1;
        if self.timer > TWINKLE_FRAMES {
            self.timer = 0;
            self.tint = Some((
                rng.gen_range(MIN_CHANNEL..=u8::MAX),
                rng.gen_range(MIN_CHANNEL..=u8::MAX),
                rng.gen_range(MIN_CHANNEL..=u8::MAX),
            ));
        }
    }

    /// Field cell the star is over, or `None` while it waits below the field.
    pub fn cell(&self, height: usize) -> Option<(usize, usize)> {
        let row = self.y.floor() as usize;
        (row < height).then(|| (row, self.x.floor() as usize))
    }
}

#[derive(Clone, Debug)]
pub struct Starfield {
    width: usize,
    height: usize,
    stars: Vec<Star>,
}

impl Starfield {
    pub fn new(width: usize, height: usize, count: usize, rng: &mut impl Rng) -> Self {
        let stars = (0..count).map(|_| Star::random(width, height, rng)).collect();
        Self {
            width,
            height,
            stars,
        }
    }

    pub fn stars(&self) -> &[Star] {
        &self.stars
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Drift every star one frame; `twinkle` is set while the win screen shows.
    pub fn update(&mut self, twinkle: bool, rng: &mut impl Rng) {
        let (width, height) = (self.width, self.height);
        for star in self.stars.iter_mut() {
            star.update(width, height, twinkle, rng);
        }
    }
}
