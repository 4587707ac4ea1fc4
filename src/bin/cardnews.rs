use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context as _;
use clap::{Parser, Subcommand};

use cardnews::template::document::SlotLocator;
use cardnews::template::matte::UNIFORM_MATTE_TOLERANCE;
use cardnews::template::source::{InMemoryDocument, StaticFrame};
use cardnews::{
    Background, BlockLayoutEngine, Canvas, CardConfig, CardInput, FontCache, FontResolver,
    RenderOptions, SlotText,
};

#[derive(Parser, Debug)]
#[command(name = "cardnews", version)]
struct Cli {
    /// JSON configuration file; defaults are used when omitted.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Extra directory searched for fallback fonts (repeatable).
    #[arg(long = "font-dir", global = true)]
    font_dirs: Vec<PathBuf>,

    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Render a single title/subtitle card.
    Create(CreateArgs),
    /// Render a four-slot brand card.
    BrandCard(BrandCardArgs),
    /// Render every card of a JSON input file in parallel.
    Batch(BatchArgs),
    /// Write the seeded gradient background as an image.
    Gradient(GradientArgs),
    /// Place text into a design template frame exported to local files.
    Compose(ComposeArgs),
}

#[derive(Parser, Debug)]
struct CreateArgs {
    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    /// Seed for the gradient background.
    #[arg(long)]
    image_prompt: Option<String>,

    #[arg(long)]
    background_path: Option<PathBuf>,

    /// JSON card input; command-line values take precedence.
    #[arg(long = "input")]
    input: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,

    /// Output size as WIDTHxHEIGHT; the card is square of the smaller side.
    #[arg(long)]
    size: Option<String>,

    #[arg(long)]
    no_overlay: bool,

    #[arg(long)]
    no_shadow: bool,

    /// Render without writing the file.
    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct BrandCardArgs {
    #[arg(long)]
    brand_text: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long)]
    subtitle: Option<String>,

    #[arg(long)]
    footer_text: Option<String>,

    #[arg(long)]
    background_path: Option<PathBuf>,

    /// Gradient seed used when no background file is given.
    #[arg(long)]
    image_prompt: Option<String>,

    #[arg(long = "input")]
    input: Option<PathBuf>,

    #[arg(long)]
    output: Option<PathBuf>,

    /// Edge of the square card; defaults to `brand_card.size` from the config.
    #[arg(long)]
    size: Option<u32>,

    /// Overrides `brand_card.overlay_alpha`.
    #[arg(long)]
    overlay_alpha: Option<u8>,

    #[arg(long)]
    no_overlay: bool,

    /// Draw drop shadows even when the config disables them.
    #[arg(long)]
    shadow: bool,

    #[arg(long)]
    dry_run: bool,
}

#[derive(Parser, Debug)]
struct BatchArgs {
    /// JSON array (or single object) of cards.
    #[arg(long = "input")]
    input: PathBuf,

    #[arg(long, default_value = "output")]
    output_dir: PathBuf,

    #[arg(long)]
    size: Option<String>,

    #[arg(long)]
    no_overlay: bool,

    #[arg(long)]
    no_shadow: bool,

    /// Worker threads; rayon's default when omitted.
    #[arg(long)]
    threads: Option<usize>,
}

#[derive(Parser, Debug)]
struct GradientArgs {
    #[arg(long)]
    seed: Option<String>,

    #[arg(long, default_value = "1080x1080")]
    size: String,

    #[arg(long)]
    output: PathBuf,
}

#[derive(Parser, Debug)]
struct ComposeArgs {
    /// Node payload (`{"nodes": {id: {"document": ...}}}`) of the template file.
    #[arg(long)]
    document: PathBuf,

    /// Frame raster exported at `template.scale`.
    #[arg(long)]
    frame: PathBuf,

    /// Overrides `template.frame_id`.
    #[arg(long)]
    frame_id: Option<String>,

    /// Slot text as SLOT=TEXT (repeatable).
    #[arg(long = "text", value_parser = parse_slot_text)]
    texts: Vec<(String, String)>,

    /// Layer name whose area is cleared from the frame (repeatable).
    #[arg(long = "background-layer")]
    background_layers: Vec<String>,

    /// Clear pixels matching the dominant corner color when no layer is listed.
    #[arg(long)]
    uniform_matte: bool,

    #[arg(long)]
    no_shadow: bool,

    #[arg(long)]
    output: PathBuf,
}

fn parse_slot_text(s: &str) -> Result<(String, String), String> {
    s.split_once('=')
        .map(|(slot, text)| (slot.trim().to_string(), text.to_string()))
        .filter(|(slot, _)| !slot.is_empty())
        .ok_or_else(|| format!("expected SLOT=TEXT, got '{s}'"))
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,cardnews=info".into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = CardConfig::load_or_default(cli.config.as_deref())?;
    let resolver = font_resolver(&cli.font_dirs);
    match cli.cmd {
        Command::Create(args) => cmd_create(&config, resolver, args),
        Command::BrandCard(args) => cmd_brand_card(&config, resolver, args),
        Command::Batch(args) => cmd_batch(&config, &resolver, args),
        Command::Gradient(args) => cmd_gradient(args),
        Command::Compose(args) => cmd_compose(&config, resolver, args),
    }
}

fn font_resolver(extra_dirs: &[PathBuf]) -> FontResolver {
    let mut dirs = vec![PathBuf::from(".")];
    dirs.extend(extra_dirs.iter().cloned());
    FontResolver::new(Arc::new(FontCache::new())).with_search_dirs(dirs)
}

fn read_card_input(path: Option<&Path>) -> anyhow::Result<CardInput> {
    let Some(path) = path else {
        return Ok(CardInput::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("read card input '{}'", path.display()))?;
    let cards = CardInput::list_from_json(&text)?;
    cards
        .into_iter()
        .next()
        .with_context(|| format!("no card in '{}'", path.display()))
}

fn save_rgb(image: &cardnews::RgbImage, out: &Path) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image
        .save(out)
        .with_context(|| format!("write image '{}'", out.display()))?;
    Ok(())
}

fn save_rgba(
    image: &cardnews::RgbaImage,
    out: &Path,
    format: image::ImageFormat,
) -> anyhow::Result<()> {
    if let Some(parent) = out.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create output dir '{}'", parent.display()))?;
    }
    image
        .save_with_format(out, format)
        .with_context(|| format!("write image '{}'", out.display()))?;
    Ok(())
}

/// Encoders without an alpha channel get the composed card flattened to RGB.
fn keeps_alpha(format: image::ImageFormat) -> bool {
    !matches!(format, image::ImageFormat::Jpeg | image::ImageFormat::Pnm)
}

/// Decode the exported frame, which must be in the configured template format.
fn read_frame(
    path: &Path,
    expected: image::ImageFormat,
) -> anyhow::Result<cardnews::RgbaImage> {
    let reader = image::ImageReader::open(path)
        .with_context(|| format!("open frame '{}'", path.display()))?
        .with_guessed_format()
        .with_context(|| format!("read frame '{}'", path.display()))?;
    if reader.format() != Some(expected) {
        anyhow::bail!(
            "frame '{}' is {:?}, template.format expects {:?}",
            path.display(),
            reader.format(),
            expected
        );
    }
    let frame = reader
        .decode()
        .with_context(|| format!("decode frame '{}'", path.display()))?;
    Ok(frame.to_rgba8())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}

fn cmd_create(config: &CardConfig, resolver: FontResolver, args: CreateArgs) -> anyhow::Result<()> {
    let mut card = read_card_input(args.input.as_deref())?;
    card.title = non_empty(args.title).or(card.title);
    card.subtitle = non_empty(args.subtitle).or(card.subtitle);
    card.image_prompt = non_empty(args.image_prompt).or(card.image_prompt);
    if let Some(path) = &args.background_path {
        card.background_path = Some(path.display().to_string());
    }
    let title = card.title.clone().filter(|t| !t.is_empty());
    let Some(title) = title else {
        anyhow::bail!("a title is required (--title or the input file)");
    };

    let out = args
        .output
        .or_else(|| card.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("card.jpg"));
    let options = config.render_options(args.size.as_deref(), args.no_overlay, args.no_shadow)?;

    let mut engine = BlockLayoutEngine::new(resolver);
    let image = cardnews::create_card(
        &mut engine,
        &title,
        card.subtitle.as_deref().unwrap_or_default(),
        card.background(),
        &config.card_fonts(),
        &options,
    )?;
    if args.dry_run {
        eprintln!("dry run: {} not written", out.display());
        return Ok(());
    }
    save_rgb(&image, &out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_brand_card(
    config: &CardConfig,
    resolver: FontResolver,
    args: BrandCardArgs,
) -> anyhow::Result<()> {
    let data = read_card_input(args.input.as_deref())?;
    let card = CardInput {
        title: non_empty(args.title).or(data.title),
        subtitle: non_empty(args.subtitle).or(data.subtitle),
        brand: non_empty(args.brand_text).or(data.brand),
        footer: non_empty(args.footer_text).or(data.footer),
        image_prompt: non_empty(args.image_prompt).or(data.image_prompt),
        background_path: args
            .background_path
            .map(|p| p.display().to_string())
            .or(data.background_path),
        output: data.output,
    };
    let text = card.brand_text();
    if text.title.is_empty() {
        anyhow::bail!("a title is required (--title or the input file)");
    }

    let mut brand_config = config.brand_card.clone();
    if let Some(alpha) = args.overlay_alpha {
        brand_config.overlay_alpha = alpha;
    }
    brand_config.shadow |= args.shadow;
    let options = brand_config.options(args.size, args.no_overlay);

    let seed = card
        .image_prompt
        .clone()
        .unwrap_or_else(|| "brand-card".to_string());
    let background = match card.background_path.as_deref().filter(|p| !p.is_empty()) {
        Some(path) => Background::Path(Path::new(path)),
        None => Background::Gradient(Some(seed.as_str())),
    };

    let out = args
        .output
        .or_else(|| card.output.as_ref().map(PathBuf::from))
        .unwrap_or_else(|| PathBuf::from("brand_card.png"));
    let mut engine = BlockLayoutEngine::new(resolver);
    let image = cardnews::create_brand_card(&mut engine, Some(background), &text, &options)?;
    if args.dry_run {
        eprintln!("dry run: {} not written", out.display());
        return Ok(());
    }
    save_rgb(&image, &out)?;
    eprintln!("wrote {}", out.display());
    Ok(())
}

fn cmd_batch(config: &CardConfig, resolver: &FontResolver, args: BatchArgs) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(&args.input)
        .with_context(|| format!("read batch input '{}'", args.input.display()))?;
    let cards = CardInput::list_from_json(&text)?;
    if cards.is_empty() {
        anyhow::bail!("no cards in '{}'", args.input.display());
    }
    std::fs::create_dir_all(&args.output_dir)
        .with_context(|| format!("create output dir '{}'", args.output_dir.display()))?;

    let options = config.render_options(args.size.as_deref(), args.no_overlay, args.no_shadow)?;
    let rendered =
        cardnews::render_batch(&cards, resolver, &config.card_fonts(), &options, args.threads)?;

    let mut failed = 0usize;
    for (idx, (card, result)) in cards.iter().zip(rendered).enumerate() {
        let out = args.output_dir.join(card.output_name(idx));
        match result {
            Ok(image) => save_rgb(&image, &out)?,
            Err(err) => {
                failed += 1;
                tracing::error!(index = idx + 1, %err, "card failed");
            }
        }
    }
    eprintln!(
        "wrote {} of {} cards to {}",
        cards.len() - failed,
        cards.len(),
        args.output_dir.display()
    );
    if failed > 0 {
        anyhow::bail!("{failed} card(s) failed");
    }
    Ok(())
}

fn cmd_gradient(args: GradientArgs) -> anyhow::Result<()> {
    let (width, height) = RenderOptions::parse_size(&args.size)?;
    let image = cardnews::generate_prompt_gradient(args.seed.as_deref(), width, height)?;
    save_rgb(&image, &args.output)?;
    eprintln!("wrote {}", args.output.display());
    Ok(())
}

fn cmd_compose(config: &CardConfig, resolver: FontResolver, args: ComposeArgs) -> anyhow::Result<()> {
    let mut template = config.template.clone();
    if let Some(frame_id) = args.frame_id {
        template.frame_id = frame_id;
    }
    let Some(mut request) = template.request() else {
        anyhow::bail!("no template frame id (--frame-id or template.frame_id)");
    };
    for layer in args.background_layers {
        request = request.with_background(SlotLocator::ByName(layer));
    }
    if args.uniform_matte {
        request = request.with_uniform_fallback(UNIFORM_MATTE_TOLERANCE);
    }

    // Fail on an unknown output extension before any rendering.
    let output_format = image::ImageFormat::from_path(&args.output)
        .with_context(|| format!("unsupported output extension '{}'", args.output.display()))?;
    if !output_format.can_write() {
        anyhow::bail!("cannot encode {output_format:?} output '{}'", args.output.display());
    }

    let payload = std::fs::read_to_string(&args.document)
        .with_context(|| format!("read document '{}'", args.document.display()))?;
    let document = InMemoryDocument::from_nodes_json(&payload)?;
    let frame = read_frame(&args.frame, template.frame_format()?)?;
    let raster = StaticFrame::new(frame);

    let texts = args
        .texts
        .into_iter()
        .map(|(slot, text)| {
            let font = match slot.as_str() {
                "title" => config.fonts.title.clone(),
                "subtitle" => config.fonts.subtitle.clone(),
                _ => config.fonts.business.clone(),
            };
            SlotText::new(slot, text, font)
        })
        .collect::<Vec<_>>();

    let mut engine = BlockLayoutEngine::new(resolver);
    // The frame file is already at the exported scale.
    let image = cardnews::compose_template(
        &document,
        &raster,
        &mut engine,
        &request.with_scale(1.0),
        &texts,
        !args.no_shadow,
    )?;
    if keeps_alpha(output_format) {
        save_rgba(&image, &args.output, output_format)?;
    } else {
        save_rgb(&Canvas::from(image).into_rgb(), &args.output)?;
    }
    eprintln!("wrote {}", args.output.display());
    Ok(())
}
