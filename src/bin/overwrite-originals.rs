use asset_optimizer::cli::{self, CommonArgs};
use asset_optimizer::output::Tool;
use clap::Parser;

#[derive(Parser)]
#[command(name = "overwrite-originals")]
#[command(about = "Recompress project JPEG/PNG images in place")]
#[command(long_about = "\
Recompress project JPEG/PNG images in place

Every image matched by the configured patterns is re-encoded in its own
format and replaces the original:

  *.jpg / *.jpeg   JPEG quality 75
  *.png            palette quantisation (quality 80), maximum compression

Files under 1024 bytes are left alone. The new file is written to
<path>.opt.tmp first and renamed over the original, so a failed encode
never touches it. Review the result with 'git diff'.

Run 'overwrite-originals --print-config' for a documented image-optimizer.toml.")]
#[command(version)]
struct Cli {
    #[command(flatten)]
    common: CommonArgs,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    cli::run(Tool::Overwrite, &cli.common)
}
