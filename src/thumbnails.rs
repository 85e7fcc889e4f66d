use crate::{
    gradient::build_gradient,
    icons::draw_icon,
    manifest::{Manifest, ManifestEntry},
    themes::{default_themes, Theme},
};
use anyhow::{Context, Result};
use image::{
    codecs::png::{CompressionType, FilterType, PngEncoder},
    ColorType, ImageEncoder, Rgb, Rgba, RgbaImage,
};
use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
    str::FromStr,
};

/// Brand navy, `#1a365d`
pub const PRIMARY_NAVY: Rgb<u8> = Rgb([26, 54, 93]);
pub const PRIMARY_NAVY_HEX: &str = "#1a365d";
/// Brand blue, `#3182ce`
pub const ACCENT_BLUE: Rgb<u8> = Rgb([49, 130, 206]);
pub const ACCENT_BLUE_HEX: &str = "#3182ce";

pub const WIDTH: u32 = 800;
pub const HEIGHT: u32 = 450;
pub const ICON_SIZE: u32 = 100;
/// Icon opacity in percent
pub const ICON_OPACITY: u8 = 30;
pub const OUTPUT_DIR: &str = "./blog-images";

const MAX_DIMENSION: u32 = 16384;

/// Everything one generation run needs.
#[derive(Debug, Clone)]
pub struct Options {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub icon_size: u32,
    pub opacity: u8,
    pub from: Rgb<u8>,
    pub to: Rgb<u8>,
    pub themes: Vec<Theme>,
    pub manifest: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            output: PathBuf::from(OUTPUT_DIR),
            width: WIDTH,
            height: HEIGHT,
            icon_size: ICON_SIZE,
            opacity: ICON_OPACITY,
            from: PRIMARY_NAVY,
            to: ACCENT_BLUE,
            themes: default_themes(),
            manifest: false,
        }
    }
}

impl Options {
    fn validate(&self) -> Result<()> {
        if self.width == 0 || self.height == 0 {
            anyhow::bail!(
                "Image dimensions must be positive, got {}x{}",
                self.width,
                self.height
            );
        }
        if self.width > MAX_DIMENSION || self.height > MAX_DIMENSION {
            anyhow::bail!("Image dimensions must not exceed {MAX_DIMENSION}px");
        }
        if self.icon_size == 0 {
            anyhow::bail!("Icon size must be positive");
        }
        if self.opacity > 100 {
            anyhow::bail!("Icon opacity must be a percentage (0-100), got {}", self.opacity);
        }
        if self.themes.is_empty() {
            anyhow::bail!("No themes to generate");
        }
        Ok(())
    }

    /// Translucent white used for every icon.
    pub fn icon_color(&self) -> Rgba<u8> {
        Rgba([255, 255, 255, opacity_to_alpha(self.opacity)])
    }
}

/// Generate one thumbnail per theme and return the written paths in order.
pub fn generate_thumbnails(options: &Options) -> Result<Vec<PathBuf>> {
    options.validate()?;

    create_dir_all(&options.output).context("Can't create output directory")?;

    println!("Generating branded blog thumbnails...");
    println!("Dimensions: {}x{}px", options.width, options.height);
    println!(
        "Style: diagonal gradient ({} -> {}) with {}% white icons",
        to_hex(options.from),
        to_hex(options.to),
        options.opacity
    );

    let mut manifest = Manifest::new();
    let mut written = Vec::with_capacity(options.themes.len());

    for (index, theme) in options.themes.iter().enumerate() {
        let image = render_thumbnail(theme, options);

        let filename = thumbnail_filename(index, &theme.name);
        let path = options.output.join(&filename);
        save_png(&image, &path).with_context(|| format!("Failed to save {filename}"))?;
        println!("  ✓ Generated {filename}");

        manifest.add_image(ManifestEntry {
            filename,
            theme: theme.name.clone(),
            icon: theme.icon,
            width: options.width,
            height: options.height,
        });
        written.push(path);
    }

    if options.manifest {
        manifest.write(&options.output)?;
        println!("  ✓ Generated manifest.json");
    }

    println!(
        "Done! Created {} images in {}",
        written.len(),
        options.output.display()
    );
    Ok(written)
}

/// Gradient background with the theme's icon in the middle.
pub fn render_thumbnail(theme: &Theme, options: &Options) -> RgbaImage {
    let mut image = build_gradient(options.width, options.height, options.from, options.to);
    draw_icon(
        &mut image,
        theme.icon,
        (options.width / 2) as f64,
        (options.height / 2) as f64,
        options.icon_size as f64,
        options.icon_color(),
    );
    image
}

/// `blog-<NN>-<name>.png` with a 1-based, zero-padded index.
pub fn thumbnail_filename(index: usize, name: &str) -> String {
    format!("blog-{:02}-{}.png", index + 1, name)
}

/// Parse a CSS color (`#1a365d`, `rgb(26, 54, 93)`, `navy`, ...) into an opaque RGB value.
pub fn parse_color(value: &str) -> Result<Rgb<u8>> {
    let color = css_color::Srgb::from_str(value)
        .map_err(|_| anyhow::anyhow!("Invalid color: {value}"))?;
    Ok(Rgb([
        (color.red * 255.).round() as u8,
        (color.green * 255.).round() as u8,
        (color.blue * 255.).round() as u8,
    ]))
}

/// Percent opacity to an 8-bit alpha, rounded to nearest (30% is 77).
pub fn opacity_to_alpha(percent: u8) -> u8 {
    let percent = percent.min(100) as u32;
    ((percent * 255 + 50) / 100) as u8
}

fn to_hex(color: Rgb<u8>) -> String {
    format!("#{:02x}{:02x}{:02x}", color[0], color[1], color[2])
}

fn save_png(image: &RgbaImage, path: &Path) -> Result<()> {
    let file = File::create(path).context("Failed to create PNG file")?;
    let mut out_file = BufWriter::new(file);
    write_png(image, &mut out_file)?;
    out_file.flush().context("Failed to write PNG")?;
    Ok(())
}

// Encode image data as PNG with compression
fn write_png<W: Write>(image: &RgbaImage, w: W) -> Result<()> {
    let encoder = PngEncoder::new_with_quality(w, CompressionType::Best, FilterType::Adaptive);
    encoder
        .write_image(image.as_raw(), image.width(), image.height(), ColorType::Rgba8)
        .context("Failed to encode PNG")?;
    Ok(())
}
