use asset_optimizer::cli::{self, CommonArgs};
use asset_optimizer::output::Tool;
use clap::Parser;

#[derive(Parser)]
#[command(name = "optimize-images")]
#[command(about = "Write WebP and AVIF versions next to project images")]
#[command(long_about = "\
Write WebP and AVIF versions next to project images

Every image matched by the configured patterns gets two siblings:

  public/hero.jpg
  ├── public/hero.webp   quality 75, sharp YUV
  └── public/hero.avif   quality 60

Sources wider than 1920px are downscaled (aspect ratio kept). PNGs under
5000 bytes are skipped as icons. Originals are never modified.

Default patterns (relative to --root):
  src/**/assets/**/*.{png,jpg,jpeg,JPG,PNG,JPEG}
  screenshots/*.{png,jpg,jpeg}
  public/*.{png,jpg,jpeg}

Run 'optimize-images --print-config' for a documented image-optimizer.toml.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli::run(Tool::Derivatives, &cli.common)
}
