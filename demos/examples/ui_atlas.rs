// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Pack the clock/weather UI sprite set into the reference 1024x1024 atlas.
//!
//! Sprites are synthesized as solid colours so the example needs no assets.
//! The layout is printed together with the texture coordinates a renderer
//! would use, and the atlas is written to `ui_atlas.png`.
//!
//! Run:
//! - `RUST_LOG=debug cargo run -p quilt_demos --example ui_atlas`

use anyhow::Context;
use image::{Rgba, RgbaImage};
use quilt_atlas::{AtlasBuilder, AtlasConfig, ImageCompositor, SpriteBorder, SpriteDesc, describe_image};

/// Name, size, and nine-slice border of each sprite.
const SPRITES: &[(&str, u32, u32, SpriteBorder)] = &[
    ("clockface", 256, 256, SpriteBorder::NONE),
    ("hand", 32, 128, SpriteBorder::NONE),
    ("battery", 32, 64, SpriteBorder::NONE),
    ("web", 64, 64, SpriteBorder::NONE),
    ("newmail", 64, 64, SpriteBorder::NONE),
    ("network", 64, 64, SpriteBorder::NONE),
    ("calendar", 64, 64, SpriteBorder::NONE),
    ("weather_sun_cloud_big", 128, 128, SpriteBorder::NONE),
    ("weather_sun_cloud", 64, 64, SpriteBorder::NONE),
    ("weather_rain", 64, 64, SpriteBorder::NONE),
    ("weather_storm", 64, 64, SpriteBorder::NONE),
    ("container_corner", 16, 16, SpriteBorder::NONE),
    ("container_vertical", 16, 1, SpriteBorder::NONE),
    ("container_horizontal", 1, 16, SpriteBorder::NONE),
    ("text_1", 256, 32, SpriteBorder::NONE),
    ("text_2", 256, 32, SpriteBorder::NONE),
    ("text_weather", 128, 32, SpriteBorder::NONE),
    ("text_fri", 64, 32, SpriteBorder::NONE),
    ("text_sat", 64, 32, SpriteBorder::NONE),
    ("text_sun", 64, 32, SpriteBorder::NONE),
    ("text_mon", 64, 32, SpriteBorder::NONE),
    ("clockface_small", 128, 128, SpriteBorder::NONE),
    ("hand_small", 16, 64, SpriteBorder::NONE),
    ("window_bottom", 32, 32, SpriteBorder::new(2, 2, 4, 0)),
    ("window_bottom_corner", 32, 32, SpriteBorder::new(8, 0, 8, 0)),
    ("window_side", 16, 32, SpriteBorder::new(4, 0, 2, 2)),
    ("window_top", 32, 64, SpriteBorder::new(3, 3, 0, 32)),
    ("window_top_left", 64, 64, SpriteBorder::new(0, 32, 0, 32)),
    ("window_top_right", 64, 64, SpriteBorder::new(32, 0, 0, 32)),
];

/// Virtual screen the sample UI is laid out on.
const VIRTUAL_SCREEN: (f64, f64) = (640.0, 480.0);

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let images: Vec<RgbaImage> = SPRITES
        .iter()
        .enumerate()
        .map(|(i, &(_, w, h, _))| RgbaImage::from_pixel(w, h, palette(i)))
        .collect();

    let mut builder = AtlasBuilder::new(AtlasConfig::default());
    for (image, &(_, _, _, border)) in images.iter().zip(SPRITES) {
        let desc: SpriteDesc = describe_image(image).with_border(border);
        builder.add(desc);
    }

    let mut sink = ImageCompositor::new(&images);
    let layout = builder
        .build_into(&mut sink)
        .context("insufficient atlas space for the UI sprite set")?;

    println!("{:<24} {:>16} {:>40}", "sprite", "pixels", "uv");
    for &id in layout.packing_order() {
        let entry = layout.get(id).context("layout lost a sprite")?;
        let uv = layout.uv_rect(id).context("layout lost a sprite")?;
        let r = entry.region;
        println!(
            "{:<24} {:>16} {:>40}",
            SPRITES[id.index()].0,
            format!("{}x{}+{}+{}", r.width, r.height, r.x, r.y),
            format!("({:.4}, {:.4})-({:.4}, {:.4})", uv.x0, uv.y0, uv.x1, uv.y1),
        );
    }
    if let Some(p) = layout.null_texcoord() {
        println!("null quad texcoord: ({:.4}, {:.4})", p.x, p.y);
    }
    println!(
        "occupancy {:.1}%, preview scale on {}x{}: {:.3}",
        layout.occupancy() * 100.0,
        VIRTUAL_SCREEN.0,
        VIRTUAL_SCREEN.1,
        layout.fit_scale(VIRTUAL_SCREEN.0, VIRTUAL_SCREEN.1),
    );

    sink.into_image()
        .save("ui_atlas.png")
        .context("writing ui_atlas.png")?;
    Ok(())
}

/// A distinct colour per sprite; every third one is translucent.
fn palette(i: usize) -> Rgba<u8> {
    let hue = u8::try_from(i * 47 % 256).unwrap_or_default();
    let alpha = if i % 3 == 0 { 192 } else { 255 };
    Rgba([hue, 255 - hue, hue / 2 + 64, alpha])
}
