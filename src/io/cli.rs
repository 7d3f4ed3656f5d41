//! Command-line interface for rendering, listing and sending bouquets

use crate::compose::{Compositor, DirectorySpriteLoader, OutputFormat};
use crate::delivery::ai::enhance_or_keep;
use crate::delivery::artifact::ArtifactStore;
use crate::delivery::gemini::GeminiClient;
use crate::delivery::mail::ConfiguredTransport;
use crate::delivery::prompt::image_prompt;
use crate::delivery::validation::SendRequest;
use crate::delivery::DeliveryService;
use crate::io::configuration::{DEFAULT_CANVAS_SIZE, DEFAULT_SEED, DEFAULT_VARIATIONS, Settings};
use crate::io::error::{
    BouquetError, Result, WithContext, invalid_parameter, service_error, validation_error,
};
use crate::io::image::write_image_file;
use crate::io::progress::ProgressManager;
use crate::layout::random::random_seed;
use crate::layout::{ItemKind, compute_layout};
use crate::selection::catalog::label_from_filename;
use crate::selection::{Catalog, SelectionEntry, SelectionState};
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Instant;
use tracing::{info, warn};

/// Session name used for handoffs made from the command line
pub const CLI_SESSION: &str = "cli";

#[derive(Parser)]
#[command(name = "bouquet")]
#[command(
    author,
    version,
    about = "Lay out, render and send virtual flower bouquets"
)]
/// Command-line arguments for the bouquet tool
pub struct Cli {
    /// Asset directory holding `flowers/` and `props/` (overrides `BOUQUET_ASSETS_DIR`)
    #[arg(long, global = true, value_name = "DIR")]
    pub assets: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Action to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Command {
    /// Render one or more layout variations to image files
    Render(RenderArgs),
    /// Print the asset catalog as JSON
    Catalog,
    /// Print the image generation prompt for a selection
    Prompt(SelectionArgs),
    /// Render a selection and deliver it through the outbox
    Send(SendArgs),
    /// Rewrite a greeting with the AI service, keeping it on failure
    Enhance {
        /// Greeting to rewrite
        message: String,
    },
    /// Ask the AI service for a bouquet image of a selection
    Generate(GenerateArgs),
}

/// Where the selection comes from
#[derive(Args, Clone, Default)]
pub struct SelectionArgs {
    /// JSON file holding an array of selection entries
    #[arg(short = 'S', long, value_name = "FILE")]
    pub selection: Option<PathBuf>,

    /// Item to include as `kind:file[:quantity]`, repeatable
    #[arg(short, long = "item", value_name = "KIND:FILE[:QTY]")]
    pub items: Vec<ItemSpec>,

    /// Start from the example bouquet
    #[arg(long)]
    pub example: bool,
}

/// Arguments for `render`
#[derive(Args)]
pub struct RenderArgs {
    /// Items to render
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Random seed for reproducible layouts
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Draw a fresh seed instead of using `--seed`
    #[arg(short, long, conflicts_with = "seed")]
    pub random_seed: bool,

    /// Square canvas size in pixels
    #[arg(long, default_value_t = DEFAULT_CANVAS_SIZE)]
    pub size: u32,

    /// Output encoding, `png` or `jpeg`
    #[arg(short, long, default_value = "png")]
    pub format: OutputFormat,

    /// Number of layouts to render from consecutive seeds
    #[arg(short = 'n', long, default_value_t = DEFAULT_VARIATIONS)]
    pub variations: usize,

    /// Output file; variations get the seed appended to the stem
    #[arg(short, long, default_value = "bouquet.png")]
    pub output: PathBuf,
}

/// Arguments for `send`
#[derive(Args)]
pub struct SendArgs {
    /// Items to send
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Recipient address
    #[arg(long)]
    pub to: String,

    /// Name shown as the sender
    #[arg(long)]
    pub from_name: Option<String>,

    /// Greeting sent with the bouquet
    #[arg(short, long, default_value = "")]
    pub message: String,

    /// Rewrite the greeting with the AI service first
    #[arg(long)]
    pub enhance: bool,

    /// Random seed for the layout
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Rate-limit key for this sender
    #[arg(long, default_value = "local")]
    pub client: String,

    /// Write the sent image here once delivery succeeds
    #[arg(long, value_name = "FILE")]
    pub preview: Option<PathBuf>,
}

/// Arguments for `generate`
#[derive(Args)]
pub struct GenerateArgs {
    /// Items to describe
    #[command(flatten)]
    pub selection: SelectionArgs,

    /// Output file; the extension follows the returned image type
    #[arg(short, long, default_value = "bouquet-ai.png")]
    pub output: PathBuf,
}

/// An item given on the command line as `kind:file[:quantity]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemSpec {
    /// Asset category
    pub kind: ItemKind,
    /// Asset filename
    pub source_id: String,
    /// Copies to add
    pub quantity: u32,
}

impl FromStr for ItemSpec {
    type Err = BouquetError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| invalid_parameter("item", &s, &reason);

        let (kind, rest) = s
            .split_once(':')
            .ok_or_else(|| invalid("expected kind:file[:quantity]"))?;
        let kind: ItemKind = kind.parse()?;

        let (source_id, quantity) = match rest.rsplit_once(':') {
            Some((file, count))
                if !count.is_empty() && count.chars().all(|c| c.is_ascii_digit()) =>
            {
                let quantity = count
                    .parse::<u32>()
                    .map_err(|e| invalid(&format!("quantity is out of range: {e}")))?;
                (file, quantity)
            }
            _ => (rest, 1),
        };

        if source_id.is_empty() {
            return Err(invalid("file name is empty"));
        }
        if quantity == 0 {
            return Err(invalid("quantity must be at least 1"));
        }

        Ok(Self {
            kind,
            source_id: source_id.to_string(),
            quantity,
        })
    }
}

impl SelectionArgs {
    /// Build the selection these arguments describe
    ///
    /// The example bouquet comes first, then the file entries, then `--item`
    /// additions. Labels for `--item` assets come from `catalog` when it knows
    /// them.
    ///
    /// # Errors
    ///
    /// Returns an error if the selection file cannot be read or holds
    /// invalid entries
    pub fn resolve(&self, catalog: Option<&Catalog>) -> Result<SelectionState> {
        let mut state = if self.example {
            SelectionState::example()
        } else {
            SelectionState::new()
        };

        if let Some(ref path) = self.selection {
            let loaded = load_selection(path)?;
            for entry in loaded.entries() {
                state.add_many(entry.kind, entry.source_id(), &entry.label, entry.quantity);
            }
        }

        for item in &self.items {
            let label = catalog
                .and_then(|c| c.find(item.kind, &item.source_id))
                .map_or_else(|| label_from_filename(&item.source_id), |c| c.label.clone());
            state.add_many(item.kind, &item.source_id, &label, item.quantity);
        }

        Ok(state)
    }
}

/// Read a JSON array of selection entries
///
/// # Errors
///
/// Returns a file system error if the file cannot be read, or a validation
/// error if it is not a valid selection
pub fn load_selection(path: &Path) -> Result<SelectionState> {
    let text = std::fs::read_to_string(path)
        .with_path(path)
        .with_operation("read selection")?;
    let entries: Vec<SelectionEntry> = serde_json::from_str(&text)
        .map_err(|e| validation_error("selection", format!("{}: {e}", path.display())))?;
    SelectionState::from_entries(entries)
}

/// Path for one render output
///
/// Single renders use `output` as given; variations insert `-<seed>` before
/// the extension. The extension always follows `format`.
pub fn variation_output_path(
    output: &Path,
    seed: u64,
    variations: usize,
    format: OutputFormat,
) -> PathBuf {
    let stem = output.file_stem().unwrap_or_default().to_string_lossy();
    let name = if variations > 1 {
        format!("{stem}-{seed}.{}", format.extension())
    } else {
        format!("{stem}.{}", format.extension())
    };

    if let Some(parent) = output.parent() {
        parent.join(name)
    } else {
        PathBuf::from(name)
    }
}

/// Runs the parsed command against the resolved settings
pub struct CommandRunner {
    cli: Cli,
    settings: Settings,
    progress_manager: Option<ProgressManager>,
}

impl CommandRunner {
    /// Create a runner; `--assets` takes precedence over the settings
    pub fn new(cli: Cli, mut settings: Settings) -> Self {
        if let Some(ref assets) = cli.assets {
            settings.assets_dir.clone_from(assets);
        }
        let progress_manager = (!cli.quiet).then(ProgressManager::new);

        Self {
            cli,
            settings,
            progress_manager,
        }
    }

    /// Settings in effect
    pub const fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Execute the parsed subcommand
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the subcommand
    pub async fn run(&mut self) -> Result<()> {
        match self.cli.command {
            Command::Render(ref args) => {
                let catalog = self.optional_catalog();
                let state = args.selection.resolve(catalog.as_ref())?;
                let paths = render_variations(
                    &self.settings,
                    &state,
                    args,
                    self.progress_manager.as_mut(),
                )
                .await?;
                info!(count = paths.len(), "render finished");
                Ok(())
            }
            Command::Catalog => self.print_catalog(),
            Command::Prompt(ref args) => {
                let catalog = self.optional_catalog();
                let state = args.resolve(catalog.as_ref())?;
                print_line(&image_prompt(&state.labeled_items())?);
                Ok(())
            }
            Command::Send(ref args) => {
                let catalog = self.optional_catalog();
                let state = args.selection.resolve(catalog.as_ref())?;
                send_selection(&self.settings, &state, args).await
            }
            Command::Enhance { ref message } => {
                let rewritten = if let Some(client) = self.gemini()? {
                    enhance_or_keep(&client, message).await
                } else {
                    warn!("GEMINI_API_KEY is not set, keeping the original message");
                    message.clone()
                };
                print_line(&rewritten);
                Ok(())
            }
            Command::Generate(ref args) => {
                let catalog = self.optional_catalog();
                let state = args.selection.resolve(catalog.as_ref())?;
                let client = self
                    .gemini()?
                    .ok_or_else(|| service_error("gemini", &"GEMINI_API_KEY is not set"))?;
                let mut service = self.delivery_service();
                let image = service
                    .generate_bouquet(CLI_SESSION, &client, &state.labeled_items())
                    .await?;
                let path = args.output.with_extension(image.format().extension());
                write_image_file(&image, &path)?;
                info!(path = %path.display(), "generated bouquet written");
                Ok(())
            }
        }
    }

    fn optional_catalog(&self) -> Option<Catalog> {
        match Catalog::scan(&self.settings.assets_dir) {
            Ok(catalog) => Some(catalog),
            Err(e) => {
                warn!(error = %e, "asset catalog unavailable, deriving labels from filenames");
                None
            }
        }
    }

    fn print_catalog(&self) -> Result<()> {
        let catalog = Catalog::scan(&self.settings.assets_dir)?;
        let json = serde_json::to_string_pretty(&catalog)
            .map_err(|e| service_error("asset catalog", &e))?;
        print_line(&json);
        Ok(())
    }

    fn gemini(&self) -> Result<Option<GeminiClient>> {
        self.settings
            .gemini_api_key
            .as_deref()
            .map(GeminiClient::new)
            .transpose()
    }

    fn delivery_service(&self) -> DeliveryService<ConfiguredTransport> {
        delivery_service(&self.settings)
    }
}

/// Render `args.variations` layouts of `state` from consecutive seeds
///
/// # Errors
///
/// Returns an error if the canvas cannot be created, encoding fails, or an
/// output file cannot be written
pub async fn render_variations(
    settings: &Settings,
    state: &SelectionState,
    args: &RenderArgs,
    mut progress: Option<&mut ProgressManager>,
) -> Result<Vec<PathBuf>> {
    if args.variations == 0 {
        return Err(invalid_parameter(
            "variations",
            &args.variations,
            &"must be at least 1",
        ));
    }
    if state.is_empty() {
        warn!("selection is empty, rendering the background only");
    }

    let items = state.layout_items();
    let compositor = Compositor::new(DirectorySpriteLoader::new(&settings.assets_dir))
        .with_size(args.size, args.size);
    let base_seed = if args.random_seed {
        random_seed()
    } else {
        args.seed
    };

    if let Some(pm) = progress.as_deref_mut() {
        pm.initialize(args.variations);
    }

    let mut paths = Vec::with_capacity(args.variations);
    for index in 0..args.variations {
        let start_time = Instant::now();
        let seed = base_seed.wrapping_add(index as u64);
        let placed = compute_layout(&items, seed);

        if let Some(pm) = progress.as_deref_mut() {
            pm.start_variation(index, &format!("seed {seed}"), placed.len());
        }

        let (encoded, report) = compositor.render_encoded(&placed, args.format).await?;
        let path = variation_output_path(&args.output, seed, args.variations, args.format);
        write_image_file(&encoded, &path)?;

        if let Some(pm) = progress.as_deref_mut() {
            pm.complete_variation(index, report.drawn.len());
        }
        info!(
            seed,
            heads = placed.len(),
            skipped = report.skipped.len(),
            elapsed_ms = start_time.elapsed().as_millis(),
            path = %path.display(),
            "bouquet rendered"
        );
        paths.push(path);
    }

    if let Some(pm) = progress {
        pm.finish();
    }
    Ok(paths)
}

/// Delivery flow wired to the transport `settings` select
pub fn delivery_service(settings: &Settings) -> DeliveryService<ConfiguredTransport> {
    DeliveryService::new(
        ConfiguredTransport::from_outbox(settings.outbox_dir.as_deref()),
        ArtifactStore::new(&settings.generated_dir),
        settings.mail_from.clone(),
    )
}

/// Render `state` as JPEG and deliver it through the outbox transport
///
/// # Errors
///
/// Returns a validation error for an empty selection, or any error raised
/// while rendering or delivering
pub async fn send_selection(
    settings: &Settings,
    state: &SelectionState,
    args: &SendArgs,
) -> Result<()> {
    if state.is_empty() {
        return Err(validation_error(
            "selection",
            "Add at least one flower or prop before sending",
        ));
    }

    let placed = compute_layout(&state.layout_items(), args.seed);
    let compositor = Compositor::new(DirectorySpriteLoader::new(&settings.assets_dir));
    let (encoded, report) = compositor
        .render_encoded(&placed, OutputFormat::email())
        .await?;
    if !report.is_complete() {
        warn!(
            skipped = report.skipped.len(),
            "some sprites could not be drawn"
        );
    }

    let message = if args.enhance && !args.message.trim().is_empty() {
        if let Some(key) = settings.gemini_api_key.as_deref() {
            enhance_or_keep(&GeminiClient::new(key)?, &args.message).await
        } else {
            warn!("GEMINI_API_KEY is not set, sending the original message");
            args.message.clone()
        }
    } else {
        args.message.clone()
    };

    let request = SendRequest {
        receiver_email: args.to.clone(),
        sender_name: args.from_name.clone(),
        message,
        image_data: encoded.to_data_url(),
    };

    let mut service = delivery_service(settings);
    let receipt = service.send_bouquet(&args.client, CLI_SESSION, &request).await?;
    info!(
        filename = %receipt.filename,
        outbox = ?settings.outbox_dir,
        "bouquet delivered"
    );

    if let (Some(preview), Some(image)) = (&args.preview, service.take_handoff(CLI_SESSION)) {
        write_image_file(&image, preview)?;
    }
    Ok(())
}

// Allow print for command output meant for pipes
#[allow(clippy::print_stdout)]
fn print_line(text: &str) {
    println!("{text}");
}
