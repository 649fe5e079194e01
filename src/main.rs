use asset_functions::config::{self, AssetsConfig, CacheBusterSetting};
use asset_functions::{Processor, css};
use clap::{Parser, Subcommand};
use futures::executor::block_on;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Shared arguments for commands that produce a URL.
#[derive(clap::Args, Clone)]
struct UrlArgs {
    /// Asset filename, relative to its root (fragments and queries allowed)
    filename: String,
    /// Print the bare URL instead of wrapping it in url('…')
    #[arg(long)]
    only_path: bool,
}

#[derive(Parser)]
#[command(name = "asset-functions")]
#[command(version)]
#[command(about = "Resolve stylesheet asset references to public URLs")]
#[command(long_about = "\
Resolve stylesheet asset references to public URLs

Each subcommand mirrors a stylesheet function and prints the CSS value it
would produce:

  image-url logo.png              url('/images/logo.png')
  font-url sans.woff --only-path  /fonts/sans.woff
  inline-image dot.gif            url('data:image/gif;base64,…')
  image-width logo.png            120px
  font-files a.woff2 a.woff       url('/fonts/a.woff2') format('woff2'), …

Settings come from assets.toml in --config-dir (see 'gen-config'), then
from command-line flags.

Set RUST_LOG=asset_functions=debug to trace each resolution step.")]
struct Cli {
    /// Directory containing assets.toml; relative roots in the file are
    /// resolved against it, root flags against the working directory
    #[arg(long, default_value = ".", global = true)]
    config_dir: PathBuf,

    /// Filesystem root for images
    #[arg(long, global = true)]
    images_path: Option<String>,

    /// Filesystem root for fonts
    #[arg(long, global = true)]
    fonts_path: Option<String>,

    /// Public URL root for images
    #[arg(long, global = true)]
    http_images_path: Option<String>,

    /// Public URL root for fonts
    #[arg(long, global = true)]
    http_fonts_path: Option<String>,

    /// Host every asset URL is resolved against (e.g. a CDN origin)
    #[arg(long, global = true)]
    asset_host: Option<String>,

    /// Cache busting: true, false, or a strategy name ("content-hash")
    #[arg(long, global = true)]
    cache_buster: Option<CacheBusterSetting>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// URL of an image
    ImageUrl(UrlArgs),
    /// URL of a font file
    FontUrl(UrlArgs),
    /// Image embedded as a data URI
    InlineImage {
        filename: String,
        /// MIME type to use instead of guessing from the extension
        #[arg(long)]
        mime_type: Option<String>,
    },
    /// Image width in pixels
    ImageWidth { filename: String },
    /// Image height in pixels
    ImageHeight { filename: String },
    /// `@font-face src` value for several font files
    FontFiles {
        /// Filenames, each optionally followed by a format keyword
        #[arg(required = true)]
        tokens: Vec<String>,
        /// Print the resolved list as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock assets.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();
    let cli = Cli::parse();

    let output = match cli.command {
        Command::GenConfig => config::stock_config_toml().trim_end().to_string(),
        ref command => {
            let processor = Processor::from_config(&effective_config(&cli)?);
            run(command, &processor)?
        }
    };

    println!("{output}");
    Ok(())
}

/// Evaluate one stylesheet function, blocking on the processor's futures.
fn run(command: &Command, processor: &Processor) -> Result<String, Box<dyn std::error::Error>> {
    let output = match command {
        Command::ImageUrl(args) => {
            let url = block_on(processor.image_url(&args.filename))?;
            css::url_value(&url, args.only_path)
        }
        Command::FontUrl(args) => {
            let url = block_on(processor.font_url(&args.filename))?;
            css::url_value(&url, args.only_path)
        }
        Command::InlineImage {
            filename,
            mime_type,
        } => {
            let data_uri = processor.inline_image(filename, mime_type.as_deref())?;
            css::url_value(&data_uri, false)
        }
        Command::ImageWidth { filename } => css::px(processor.image_width(filename)?),
        Command::ImageHeight { filename } => css::px(processor.image_height(filename)?),
        Command::FontFiles { tokens, json } => {
            let files = block_on(processor.font_files(tokens))?;
            if *json {
                serde_json::to_string_pretty(&files)?
            } else {
                css::font_src(&files)
            }
        }
        Command::GenConfig => config::stock_config_toml().trim_end().to_string(),
    };
    Ok(output)
}

/// Log to stderr so stdout stays a clean CSS value.
fn init_tracing() {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "asset_functions=warn".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

/// Load assets.toml, then apply command-line overrides and re-validate.
fn effective_config(cli: &Cli) -> Result<AssetsConfig, config::ConfigError> {
    let mut settings = config::load_config(&cli.config_dir)?.relative_to(&cli.config_dir);

    let overrides = [
        (&cli.images_path, &mut settings.images_path),
        (&cli.fonts_path, &mut settings.fonts_path),
        (&cli.http_images_path, &mut settings.http_images_path),
        (&cli.http_fonts_path, &mut settings.http_fonts_path),
    ];
    for (flag, field) in overrides {
        if let Some(value) = flag {
            *field = value.clone();
        }
    }
    if let Some(host) = &cli.asset_host {
        settings.asset_host = Some(host.clone());
    }
    if let Some(buster) = &cli.cache_buster {
        settings.asset_cache_buster = Some(buster.clone());
    }

    settings.validate()?;
    Ok(settings)
}
