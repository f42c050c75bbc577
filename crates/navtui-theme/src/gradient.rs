//! Multi-stop RGB gradients.
//!
//! A preset is a short list of control points. [`gradient`] spreads a
//! requested number of steps across the segments between consecutive
//! points and interpolates each channel linearly inside a segment.
//!
//! ```text
//! points:  P0 ────────── P1 ────────── P2
//! steps:   0  1  2  3  4  5  6  7  8  9
//!          └─ segment 0 ─┘└─ segment 1 ─┘
//! ```
//!
//! Segment boundaries are `floor(seg * steps / segments)`, so uneven
//! splits put the extra step in the later segment. Channels truncate
//! toward zero. For two or more steps the first and last outputs are the
//! first and last control points exactly.

use navtui_term::Rgb;
use navtui_term::ansi;

// ---------------------------------------------------------------------------
// Presets
// ---------------------------------------------------------------------------

/// Named gradient, or a caller-supplied list of control points.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GradientPreset {
    /// No gradient; renders white.
    #[default]
    None,
    WarmToCold,
    RedToGreen,
    BlueToPurple,
    Sunset,
    Ocean,
    Forest,
    Fire,
    Rainbow,
    /// Caller-supplied control points. Empty renders white.
    Custom(Vec<Rgb>),
}

const fn rgb(r: u8, g: u8, b: u8) -> Rgb {
    Rgb::new(r, g, b)
}

const WARM_TO_COLD: &[Rgb] = &[rgb(255, 10, 0), rgb(255, 255, 200), rgb(100, 200, 255)];
const RED_TO_GREEN: &[Rgb] = &[rgb(255, 50, 50), rgb(255, 255, 100), rgb(50, 255, 50)];
const BLUE_TO_PURPLE: &[Rgb] = &[rgb(50, 100, 255), rgb(150, 50, 255), rgb(255, 50, 255)];
const SUNSET: &[Rgb] = &[rgb(255, 0, 100), rgb(255, 100, 0), rgb(150, 0, 255)];
const OCEAN: &[Rgb] = &[rgb(0, 50, 150), rgb(0, 150, 255), rgb(0, 255, 255)];
const FOREST: &[Rgb] = &[rgb(0, 100, 0), rgb(50, 200, 50), rgb(150, 255, 100)];
const FIRE: &[Rgb] = &[rgb(255, 0, 0), rgb(255, 100, 0), rgb(255, 255, 0)];
const RAINBOW: &[Rgb] = &[
    rgb(255, 0, 0),
    rgb(255, 255, 0),
    rgb(0, 255, 0),
    rgb(0, 255, 255),
    rgb(0, 0, 255),
    rgb(255, 0, 255),
    rgb(255, 0, 0),
];

impl GradientPreset {
    /// Every named preset, in display order.
    pub const NAMED: [Self; 9] = [
        Self::None,
        Self::WarmToCold,
        Self::RedToGreen,
        Self::BlueToPurple,
        Self::Sunset,
        Self::Ocean,
        Self::Forest,
        Self::Fire,
        Self::Rainbow,
    ];

    /// The control points, in order. Empty for [`None`](Self::None).
    #[must_use]
    pub fn control_points(&self) -> &[Rgb] {
        match self {
            Self::None => &[],
            Self::WarmToCold => WARM_TO_COLD,
            Self::RedToGreen => RED_TO_GREEN,
            Self::BlueToPurple => BLUE_TO_PURPLE,
            Self::Sunset => SUNSET,
            Self::Ocean => OCEAN,
            Self::Forest => FOREST,
            Self::Fire => FIRE,
            Self::Rainbow => RAINBOW,
            Self::Custom(points) => points,
        }
    }

    /// Kebab-case name used by option strings.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::WarmToCold => "warm-to-cold",
            Self::RedToGreen => "red-to-green",
            Self::BlueToPurple => "blue-to-purple",
            Self::Sunset => "sunset",
            Self::Ocean => "ocean",
            Self::Forest => "forest",
            Self::Fire => "fire",
            Self::Rainbow => "rainbow",
            Self::Custom(_) => "custom",
        }
    }

    /// Look up a named preset. Case-insensitive; `_` and `-` are equivalent.
    /// `custom` is not a name: build [`Custom`](Self::Custom) directly.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let wanted = name.trim().to_ascii_lowercase().replace('_', "-");
        Self::NAMED.into_iter().find(|p| p.name() == wanted)
    }

    /// Parse a comma-separated list of `#rrggbb` colors into a custom preset.
    #[must_use]
    pub fn custom_from_hex_list(list: &str) -> Option<Self> {
        list.split(',')
            .filter(|s| !s.trim().is_empty())
            .map(|s| Rgb::hex(s.trim()))
            .collect::<Option<Vec<_>>>()
            .map(Self::Custom)
    }

    /// Whether highlighted text should be painted with a gradient at all.
    #[must_use]
    pub const fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

// ---------------------------------------------------------------------------
// Interpolation
// ---------------------------------------------------------------------------

// Multiply and add round separately; a fused multiply-add truncates some
// channels one lower.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::suboptimal_flops
)]
fn lerp_channel(start: u8, end: u8, ratio: f32) -> u8 {
    let s = f32::from(start);
    let e = f32::from(end);
    (ratio * (e - s) + s) as u8
}

fn lerp(start: Rgb, end: Rgb, ratio: f32) -> Rgb {
    Rgb::new(
        lerp_channel(start.r, end.r, ratio),
        lerp_channel(start.g, end.g, ratio),
        lerp_channel(start.b, end.b, ratio),
    )
}

/// `steps` colors running through the preset's control points.
///
/// Deterministic. `None` and an empty custom list give white; a single
/// control point is repeated.
#[must_use]
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
pub fn gradient(preset: &GradientPreset, steps: usize) -> Vec<Rgb> {
    let points = preset.control_points();
    match points {
        [] => return vec![Rgb::WHITE; steps],
        [only] => return vec![*only; steps],
        _ => {}
    }
    if steps == 0 {
        return Vec::new();
    }

    let segments = points.len() - 1;
    let per_segment = steps as f32 / segments as f32;
    let mut out = Vec::with_capacity(steps);

    for (seg, pair) in points.windows(2).enumerate() {
        let seg_start = (seg as f32 * per_segment) as usize;
        let seg_end = (((seg + 1) as f32 * per_segment) as usize).min(steps);
        let seg_len = seg_end.saturating_sub(seg_start);

        for i in 0..seg_len {
            let ratio = if seg_len > 1 {
                i as f32 / (seg_len - 1) as f32
            } else {
                0.0
            };
            out.push(lerp(pair[0], pair[1], ratio));
        }
    }

    let last = points[points.len() - 1];
    out.resize(steps, last);

    if steps >= 2 {
        out[0] = points[0];
        out[steps - 1] = last;
    }
    out
}

// ---------------------------------------------------------------------------
// Shuffle
// ---------------------------------------------------------------------------

/// Xorshift32 PRNG. Small, fast, deterministic for a given seed.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Zero is a fixed point of xorshift, so it is replaced.
    #[must_use]
    pub const fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 0x9E37_79B9 } else { seed },
        }
    }

    /// Seed from the wall clock.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn from_time() -> Self {
        let nanos = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.subsec_nanos() ^ (d.as_secs() as u32));
        Self::new(nanos)
    }

    /// Next value of the xorshift sequence.
    pub const fn next_u32(&mut self) -> u32 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 17;
        self.state ^= self.state << 5;
        self.state
    }

    /// Uniform-ish index in `0..n`. `n` must be non-zero.
    fn below(&mut self, n: usize) -> usize {
        self.next_u32() as usize % n
    }

    /// Fisher–Yates in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

// ---------------------------------------------------------------------------
// Text painting
// ---------------------------------------------------------------------------

/// Paint `text` one gradient step per visible character.
///
/// Escape sequences already in `text` are copied through and do not use
/// up a step. The result ends with a reset. With `rng`, the colors are
/// shuffled first.
#[must_use]
pub fn paint(text: &str, preset: &GradientPreset, rng: Option<&mut Rng>) -> String {
    let visible = ansi::strip_escapes(text).chars().count();
    let mut colors = gradient(preset, visible);
    if let Some(rng) = rng {
        rng.shuffle(&mut colors);
    }

    let mut out = String::with_capacity(text.len() * 20);
    let mut colors = colors.into_iter();
    let mut rest = text;
    while let Some(c) = rest.chars().next() {
        if let Some(len) = ansi::escape_len(rest) {
            out.push_str(&rest[..len]);
            rest = &rest[len..];
            continue;
        }
        if let Some(color) = colors.next() {
            out.push_str(&ansi::fg_rgb_string(color));
        }
        out.push(c);
        rest = &rest[c.len_utf8()..];
    }
    out.push_str(ansi::RESET);
    out
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
