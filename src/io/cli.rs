//! Command-line interface for batch texture generation and the bot shell

use crate::bot::api::BotClient;
use crate::bot::delivery::DeliveryShell;
use crate::fetch::adapter::ImageFetchAdapter;
use crate::fetch::http::ReqwestClient;
use crate::io::codec;
use crate::io::configuration::{
    DEFAULT_BLEND_WIDTH, DEFAULT_POLL_TIMEOUT_SECS, DEFAULT_TARGET_SIZE, OUTPUT_SUFFIX,
};
use crate::io::error::{Result, TextureError, invalid_configuration};
use crate::io::progress::ProgressManager;
use crate::synthesis::fallback::synthesize_fast;
use crate::synthesis::pipeline::{BlendConfig, TextureSynthesizer};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

/// Command-line arguments for the texture tool
#[derive(Parser)]
#[command(name = "seamweave")]
#[command(
    author,
    version,
    about = "Create seamless tileable textures from photographs"
)]
pub struct Cli {
    /// Selected operating mode
    #[command(subcommand)]
    pub command: Command,
}

/// Operating modes of the tool
#[derive(Subcommand)]
pub enum Command {
    /// Process image files into tileable textures
    Tile(TileArgs),
    /// Run the Telegram delivery bot
    Serve(ServeArgs),
}

/// Arguments for batch file processing
// CLI tools commonly need multiple boolean flags for various features and user preferences
#[allow(clippy::struct_excessive_bools)]
#[derive(Args)]
pub struct TileArgs {
    /// Input image file or directory to process
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Output canvas edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_TARGET_SIZE)]
    pub size: usize,

    /// Width of the seam blending strips in pixels
    #[arg(short, long, default_value_t = DEFAULT_BLEND_WIDTH)]
    pub blend_width: usize,

    /// Disable seam blending
    #[arg(long)]
    pub no_blend: bool,

    /// Enable the detail enhancement pass
    #[arg(short, long)]
    pub enhance: bool,

    /// Use the low-fidelity fast profile
    #[arg(short, long)]
    pub fast: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Process files even if output exists
    #[arg(short, long)]
    pub no_skip: bool,
}

impl TileArgs {
    /// Check if existing output files should be skipped
    pub const fn skip_existing(&self) -> bool {
        !self.no_skip
    }

    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Pipeline configuration for these arguments
    pub const fn blend_config(&self) -> BlendConfig {
        BlendConfig {
            target_size: self.size,
            blend_edges: !self.no_blend,
            blend_width: self.blend_width,
            enhance_details: self.enhance,
        }
    }
}

/// Arguments for the Telegram bot mode
#[derive(Args)]
pub struct ServeArgs {
    /// Telegram bot token (falls back to the BOT_TOKEN environment variable)
    #[arg(long)]
    pub token: Option<String>,

    /// Output canvas edge length in pixels
    #[arg(short, long, default_value_t = DEFAULT_TARGET_SIZE)]
    pub size: usize,

    /// Width of the seam blending strips in pixels
    #[arg(short, long, default_value_t = DEFAULT_BLEND_WIDTH)]
    pub blend_width: usize,

    /// Disable seam blending
    #[arg(long)]
    pub no_blend: bool,

    /// Disable the detail enhancement pass
    #[arg(long)]
    pub no_enhance: bool,

    /// Long-poll window for update requests, in seconds
    #[arg(long, default_value_t = DEFAULT_POLL_TIMEOUT_SECS)]
    pub poll_timeout: u64,
}

impl ServeArgs {
    /// Pipeline configuration for these arguments
    ///
    /// Enhancement is on by default in bot mode, matching the delivery
    /// shell this tool grew out of.
    pub const fn blend_config(&self) -> BlendConfig {
        BlendConfig {
            target_size: self.size,
            blend_edges: !self.no_blend,
            blend_width: self.blend_width,
            enhance_details: !self.no_enhance,
        }
    }

    /// Resolve the bot token from the flag or the environment
    ///
    /// # Errors
    ///
    /// Returns [`TextureError::InvalidConfiguration`] when neither source
    /// provides a token.
    pub fn resolve_token(&self) -> Result<String> {
        self.token
            .clone()
            .or_else(|| std::env::var("BOT_TOKEN").ok())
            .ok_or_else(|| {
                invalid_configuration(
                    "token",
                    &"<missing>",
                    &"pass --token or set the BOT_TOKEN environment variable",
                )
            })
    }
}

/// Orchestrates batch processing of image files with progress tracking
pub struct FileProcessor {
    args: TileArgs,
    progress: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor with the given arguments
    pub fn new(args: TileArgs) -> Self {
        let progress = args.should_show_progress().then(ProgressManager::new);
        Self { args, progress }
    }

    /// Process files according to the arguments
    ///
    /// # Errors
    ///
    /// Returns an error if target validation, configuration validation, or
    /// file processing fails.
    pub fn process(&mut self) -> Result<()> {
        let files = self.collect_files()?;
        if files.is_empty() {
            return Ok(());
        }

        // One validated synthesizer serves the whole batch.
        let synthesizer = (!self.args.fast)
            .then(|| TextureSynthesizer::new(self.args.blend_config()))
            .transpose()?;

        if let Some(pm) = self.progress.as_mut() {
            pm.initialize(files.len());
        }

        for (index, file) in files.iter().enumerate() {
            self.process_file(file, index, synthesizer.as_ref())?;
        }

        if let Some(ref pm) = self.progress {
            pm.finish();
        }
        Ok(())
    }

    fn collect_files(&self) -> Result<Vec<PathBuf>> {
        if self.args.target.is_file() {
            if !is_image_file(&self.args.target) {
                return Err(invalid_configuration(
                    "target",
                    &self.args.target.display(),
                    &"must be an image file (png, jpg, jpeg, bmp or webp)",
                ));
            }
            if self.should_process_file(&self.args.target) {
                Ok(vec![self.args.target.clone()])
            } else {
                Ok(vec![])
            }
        } else if self.args.target.is_dir() {
            let mut files = Vec::new();
            for entry in std::fs::read_dir(&self.args.target)? {
                let path = entry?.path();
                if is_image_file(&path) && self.should_process_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_configuration(
                "target",
                &self.args.target.display(),
                &"must be an existing image file or directory",
            ))
        }
    }

    fn should_process_file(&self, input_path: &Path) -> bool {
        if !self.args.skip_existing() {
            return true;
        }

        let destination = output_path(input_path);
        if destination.exists() {
            // Allow print for user feedback for progress messages
            #[allow(clippy::print_stderr)]
            if !self.args.quiet {
                eprintln!("Skipping: {} (output exists)", input_path.display());
            }
            false
        } else {
            true
        }
    }

    // Allow print for per-file metadata feedback
    #[allow(clippy::print_stderr)]
    fn process_file(
        &self,
        input_path: &Path,
        index: usize,
        synthesizer: Option<&TextureSynthesizer>,
    ) -> Result<()> {
        let destination = output_path(input_path);

        if let Some(ref pm) = self.progress {
            pm.start_file(index, input_path);
        }

        let source = codec::load_raster(input_path)?;

        if let Some(ref pm) = self.progress {
            pm.update_stage(index, "synthesizing");
        }

        let result = match synthesizer {
            Some(primary) => primary.synthesize(&source)?,
            None => synthesize_fast(&source)?,
        };

        if let Some(ref pm) = self.progress {
            pm.update_stage(index, "writing");
        }

        std::fs::write(&destination, &result.bytes).map_err(|e| TextureError::FileSystem {
            path: destination.clone(),
            operation: "write texture",
            source: e,
        })?;

        if let Some(ref pm) = self.progress {
            pm.complete_file(index);
        }

        if !self.args.quiet {
            eprintln!("Wrote {}\n{}", destination.display(), result.metadata);
        }
        Ok(())
    }
}

/// Output path for an input image: same directory, suffixed stem, PNG
///
/// The extension is always `.png` because the pipeline encodes losslessly
/// regardless of the input format.
pub fn output_path(input_path: &Path) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{OUTPUT_SUFFIX}.png", stem.to_string_lossy());

    input_path.parent().map_or_else(
        || PathBuf::from(&output_name),
        |parent| parent.join(&output_name),
    )
}

fn is_image_file(path: &Path) -> bool {
    path.extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| {
            matches!(
                extension.to_ascii_lowercase().as_str(),
                "png" | "jpg" | "jpeg" | "bmp" | "webp"
            )
        })
}

/// Start the Telegram delivery shell with the given arguments
///
/// Initializes structured logging (honoring `RUST_LOG`) and blocks on the
/// update loop until the transport fails.
///
/// # Errors
///
/// Returns [`TextureError::InvalidConfiguration`] for a missing token or
/// invalid pipeline parameters, and [`TextureError::BotApi`] when the
/// update transport fails.
pub fn run_serve(args: &ServeArgs) -> Result<()> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .try_init();

    let token = args.resolve_token()?;
    let api = BotClient::new(token, args.poll_timeout)?;
    let fetcher = ImageFetchAdapter::new(ReqwestClient::new()?);
    let mut shell = DeliveryShell::new(api, fetcher, args.blend_config(), args.poll_timeout)?;
    shell.run()
}
