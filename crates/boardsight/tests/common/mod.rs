#![allow(dead_code)]

use std::fs;
use std::path::Path;

use boardsight::{Orientation, Quad, SessionConfig};
use image::{DynamicImage, Rgba, RgbaImage};

pub const BACKGROUND: [u8; 4] = [118, 150, 86, 255];
pub const LIGHT: [u8; 4] = [250, 250, 250, 255];
pub const DARK: [u8; 4] = [20, 20, 20, 255];

/// Disc glyph radii as a fraction of the cell side.
pub const PAWN: f32 = 0.2;
pub const KING: f32 = 0.43;

fn disc(size: u32, x: u32, y: u32, radius: f32, fg: [u8; 4]) -> Rgba<u8> {
    let c = size as f32 / 2.0;
    let (dx, dy) = (x as f32 + 0.5 - c, y as f32 + 0.5 - c);
    let r = radius * size as f32;
    if dx * dx + dy * dy <= r * r {
        Rgba(fg)
    } else {
        Rgba(BACKGROUND)
    }
}

/// Reference set: wP, wK, bP and an empty square, 60px each.
pub fn write_references(root: &Path) {
    let refs = [
        ("white/wP.png", PAWN, LIGHT),
        ("white/wK.png", KING, LIGHT),
        ("black/bP.png", PAWN, DARK),
        ("empty.png", 0.0, DARK),
    ];
    for (name, radius, fg) in refs {
        let path = root.join(name);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        RgbaImage::from_fn(60, 60, |x, y| disc(60, x, y, radius, fg))
            .save(path)
            .unwrap();
    }
}

/// 1000x1000 screen with the board at (100, 100), 800x800, drawn white at
/// the bottom: white pawns on rank 2, white king on e1, black pawn on e7.
pub fn screenshot() -> DynamicImage {
    DynamicImage::ImageRgba8(RgbaImage::from_fn(1000, 1000, |x, y| {
        if !(100..900).contains(&x) || !(100..900).contains(&y) {
            return Rgba([40, 40, 40, 255]);
        }
        let (col, row) = ((x - 100) / 100, (y - 100) / 100);
        let (lx, ly) = ((x - 100) % 100, (y - 100) % 100);
        match (col, row) {
            (_, 6) => disc(100, lx, ly, PAWN, LIGHT),
            (4, 7) => disc(100, lx, ly, KING, LIGHT),
            (4, 1) => disc(100, lx, ly, PAWN, DARK),
            _ => Rgba(BACKGROUND),
        }
    }))
}

pub fn config(pieces_dir: &Path, orientation: Orientation) -> SessionConfig {
    let mut cfg = SessionConfig::template(pieces_dir, orientation).unwrap();
    cfg.board = Quad::from_origin_size(100, 100, 800, 800).unwrap();
    cfg.notation = Some(Quad::from_origin_size(900, 100, 100, 360).unwrap());
    cfg.settle_ms = 0;
    cfg
}
