// Copyright (c) 2026 rezky_nightky

use crossterm::style::Color;

use crate::runtime::{ColorMode, ColorScheme};

/// Colors for one scheme: lit cells, in-flight noise cells, status text,
/// the dimmed export panel, and the board background.
#[derive(Clone, Copy, Debug)]
pub struct Palette {
    pub active: Option<Color>,
    pub noise: Option<Color>,
    pub text: Option<Color>,
    pub dim: Option<Color>,
    pub bg: Option<Color>,
}

struct SchemeDef {
    active: (u8, u8, u8),
    noise: (u8, u8, u8),
    text: (u8, u8, u8),
    dim: (u8, u8, u8),
    // nearest xterm-256 indices for the same four slots
    ansi: [u8; 4],
}

fn scheme_def(scheme: ColorScheme) -> SchemeDef {
    match scheme {
        ColorScheme::Pink => SchemeDef {
            active: (255, 105, 180),
            noise: (160, 70, 120),
            text: (255, 192, 213),
            dim: (120, 80, 100),
            ansi: [205, 132, 218, 96],
        },
        ColorScheme::Green => SchemeDef {
            active: (0, 255, 70),
            noise: (0, 140, 40),
            text: (170, 255, 190),
            dim: (60, 110, 70),
            ansi: [46, 28, 157, 65],
        },
        ColorScheme::Amber => SchemeDef {
            active: (255, 190, 0),
            noise: (150, 110, 0),
            text: (255, 225, 160),
            dim: (120, 100, 50),
            ansi: [214, 136, 222, 101],
        },
        ColorScheme::Cyan => SchemeDef {
            active: (0, 230, 255),
            noise: (0, 130, 150),
            text: (180, 245, 255),
            dim: (60, 110, 120),
            ansi: [51, 37, 159, 66],
        },
        ColorScheme::White => SchemeDef {
            active: (240, 240, 240),
            noise: (130, 130, 130),
            text: (210, 210, 210),
            dim: (110, 110, 110),
            ansi: [255, 245, 252, 242],
        },
    }
}

fn rgb(v: (u8, u8, u8)) -> Color {
    Color::Rgb {
        r: v.0,
        g: v.1,
        b: v.2,
    }
}

pub fn build_palette(scheme: ColorScheme, mode: ColorMode, default_background: bool) -> Palette {
    let bg = if default_background || mode == ColorMode::Mono {
        None
    } else {
        Some(Color::Black)
    };

    let def = scheme_def(scheme);
    match mode {
        ColorMode::Mono => Palette {
            active: None,
            noise: None,
            text: None,
            dim: None,
            bg,
        },
        ColorMode::Color256 => Palette {
            active: Some(Color::AnsiValue(def.ansi[0])),
            noise: Some(Color::AnsiValue(def.ansi[1])),
            text: Some(Color::AnsiValue(def.ansi[2])),
            dim: Some(Color::AnsiValue(def.ansi[3])),
            bg,
        },
        ColorMode::TrueColor => Palette {
            active: Some(rgb(def.active)),
            noise: Some(rgb(def.noise)),
            text: Some(rgb(def.text)),
            dim: Some(rgb(def.dim)),
            bg,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mono_palette_carries_no_colors() {
        let p = build_palette(ColorScheme::Pink, ColorMode::Mono, false);
        assert!(p.active.is_none() && p.noise.is_none() && p.bg.is_none());
    }

    #[test]
    fn truecolor_and_256_pick_the_mode_flavor() {
        let t = build_palette(ColorScheme::Green, ColorMode::TrueColor, false);
        assert!(matches!(t.active, Some(Color::Rgb { .. })));
        assert_eq!(t.bg, Some(Color::Black));

        let x = build_palette(ColorScheme::Green, ColorMode::Color256, true);
        assert!(matches!(x.active, Some(Color::AnsiValue(_))));
        assert!(x.bg.is_none());
    }
}
