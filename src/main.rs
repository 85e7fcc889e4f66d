use anyhow::Result;
use blog_thumbs::{
    themes::{default_themes, load_themes},
    thumbnails::{self, Options},
};
use clap::Parser;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[clap(
    name = "blog-thumbs",
    about = "Generate branded blog thumbnails with a gradient background and a centered icon"
)]
struct Args {
    /// Output directory.
    #[clap(short, long, value_name = "DIR", default_value = thumbnails::OUTPUT_DIR)]
    output: PathBuf,

    /// Image width in pixels
    #[clap(long, value_name = "PX", default_value_t = thumbnails::WIDTH)]
    width: u32,

    /// Image height in pixels
    #[clap(long, value_name = "PX", default_value_t = thumbnails::HEIGHT)]
    height: u32,

    /// Icon size in pixels (icons extend roughly this far from the center)
    #[clap(long, value_name = "PX", default_value_t = thumbnails::ICON_SIZE)]
    icon_size: u32,

    /// Icon opacity in percent
    #[clap(long, value_name = "PERCENT", default_value_t = thumbnails::ICON_OPACITY)]
    opacity: u8,

    /// Gradient start color at the top-left corner (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = thumbnails::PRIMARY_NAVY_HEX)]
    from: String,

    /// Gradient end color towards the bottom-right corner (CSS color format)
    #[clap(long, value_name = "COLOR", default_value = thumbnails::ACCENT_BLUE_HEX)]
    to: String,

    /// JSON file with `{ "name": ..., "icon": ... }` themes replacing the built-in list
    #[clap(long, value_name = "FILE")]
    themes: Option<PathBuf>,

    /// Also write a manifest.json describing the generated images
    #[clap(long)]
    manifest: bool,
}

impl Args {
    fn into_options(self) -> Result<Options> {
        let themes = match &self.themes {
            Some(path) => load_themes(path)?,
            None => default_themes(),
        };

        Ok(Options {
            output: self.output,
            width: self.width,
            height: self.height,
            icon_size: self.icon_size,
            opacity: self.opacity,
            from: thumbnails::parse_color(&self.from)?,
            to: thumbnails::parse_color(&self.to)?,
            themes,
            manifest: self.manifest,
        })
    }
}

fn main() -> Result<()> {
    let options = Args::parse().into_options()?;

    thumbnails::generate_thumbnails(&options)?;
    Ok(())
}
