// Copyright 2025 the Quilt Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Build a texture atlas from every PNG in a directory.
//!
//! The atlas configuration can be loaded from a TOML file with the same field
//! names as `AtlasConfig`; command-line flags override it:
//!
//! ```toml
//! width = 512
//! height = 512
//! padding = 1
//! null_quad = 4
//! ```
//!
//! `null_quad = 0` disables the white patch, like `--no-null-quad`. With
//! `--auto-size` the atlas becomes the smallest square from 8x8 to 1024x1024
//! that can hold the padded sprites, ignoring the configured width and height.
//!
//! Run:
//! - `cargo run -p quilt_demos --example atlas_from_dir -- sprites/ atlas.png`
//! - `cargo run -p quilt_demos --example atlas_from_dir -- sprites/ atlas.png --config atlas.toml --no-null-quad`

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use clap::Parser;
use image::RgbaImage;
use quilt_atlas::{AtlasBuilder, AtlasConfig, ImageCompositor, describe_image};

#[derive(Debug, Parser)]
#[command(about = "Pack a directory of PNG sprites into one atlas image")]
struct Args {
    /// Directory containing the sprite PNGs.
    input: PathBuf,
    /// Where to write the atlas PNG.
    output: PathBuf,
    /// TOML file with the atlas configuration.
    #[arg(long)]
    config: Option<PathBuf>,
    /// Atlas width in pixels.
    #[arg(long)]
    width: Option<u32>,
    /// Atlas height in pixels.
    #[arg(long)]
    height: Option<u32>,
    /// Transparent border around each sprite, in pixels.
    #[arg(long)]
    padding: Option<u32>,
    /// Do not reserve the white null quad.
    #[arg(long)]
    no_null_quad: bool,
    /// Pick the smallest square atlas that can hold the sprites.
    #[arg(long, conflicts_with_all = ["width", "height"])]
    auto_size: bool,
}

impl Args {
    fn atlas_config(&self) -> anyhow::Result<AtlasConfig> {
        let mut config = match &self.config {
            Some(path) => {
                let text = fs::read_to_string(path)
                    .with_context(|| format!("reading {}", path.display()))?;
                toml::from_str(&text).with_context(|| format!("parsing {}", path.display()))?
            }
            None => AtlasConfig::default(),
        };
        if let Some(width) = self.width {
            config.width = width;
        }
        if let Some(height) = self.height {
            config.height = height;
        }
        if let Some(padding) = self.padding {
            config.padding = padding;
        }
        if self.no_null_quad {
            config.null_quad = None;
        }
        Ok(config)
    }
}

fn load_sprites(dir: &Path) -> anyhow::Result<Vec<(String, RgbaImage)>> {
    let mut paths: Vec<PathBuf> = fs::read_dir(dir)
        .with_context(|| format!("listing {}", dir.display()))?
        .map(|entry| entry.map(|e| e.path()))
        .collect::<Result<_, _>>()?;
    paths.retain(|p| p.extension().is_some_and(|ext| ext.eq_ignore_ascii_case("png")));
    // Sorted input keeps the layout reproducible between runs.
    paths.sort();

    paths
        .into_iter()
        .map(|path| {
            let image = image::open(&path)
                .with_context(|| format!("decoding {}", path.display()))?
                .into_rgba8();
            let name = path
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok((name, image))
        })
        .collect()
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();
    let config = args.atlas_config()?;

    let sprites = load_sprites(&args.input)?;
    if sprites.is_empty() {
        bail!("no PNG sprites found in {}", args.input.display());
    }
    let (names, images): (Vec<String>, Vec<RgbaImage>) = sprites.into_iter().unzip();
    let mut builder = AtlasBuilder::new(config);
    for image in &images {
        builder.add(describe_image(image));
    }
    if args.auto_size {
        builder.fit_size()?;
    }
    let config = builder.config();
    log::info!("packing {} sprites into {}x{}", builder.len(), config.width, config.height);

    let mut sink = ImageCompositor::new(&images);
    let layout = builder
        .build_into(&mut sink)
        .context("insufficient atlas space; try a larger --width/--height")?;

    for entry in layout.entries() {
        let r = entry.region;
        println!(
            "{}\t{}\t{}\t{}\t{}\t{}",
            names[entry.sprite.index()],
            r.x,
            r.y,
            r.width,
            r.height,
            if entry.has_alpha { "alpha" } else { "opaque" },
        );
    }
    if let Some(quad) = layout.null_quad() {
        println!("<null>\t{}\t{}\t{}\t{}\topaque", quad.x, quad.y, quad.width, quad.height);
    }

    sink.into_image()
        .save(&args.output)
        .with_context(|| format!("writing {}", args.output.display()))?;
    log::info!(
        "wrote {} ({:.1}% occupied)",
        args.output.display(),
        layout.occupancy() * 100.0
    );
    Ok(())
}
