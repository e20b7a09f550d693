use anyhow::Result;
use clap::Parser;
use jewelry_analyzer::app::{prepare, Analyzer};
use jewelry_analyzer::budget::normalize_context;
use jewelry_analyzer::image::load_upload;
use jewelry_analyzer::models::{
    AnalysisRequest, Config, JewelryAttribute, JewelryAttributes, LengthTier, Tone,
};
use std::path::PathBuf;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "jewelry-analyzer")]
#[command(about = "Generate a product description and caption for a jewelry photo")]
struct CliArgs {
    /// Product photo (JPEG or PNG).
    #[arg(value_name = "IMAGE")]
    image: PathBuf,

    /// Writing tone for the description.
    #[arg(long, value_enum, default_value_t = Tone::Original)]
    tone: Tone,

    /// Target description length.
    #[arg(long, value_enum, default_value_t = LengthTier::Short)]
    length: LengthTier,

    /// Additional context (e.g. related festival, celebrity news).
    #[arg(long)]
    context: Option<String>,

    #[arg(long)]
    carat: Option<String>,

    /// Weight in grams.
    #[arg(long)]
    weight: Option<String>,

    #[arg(long)]
    color: Option<String>,

    #[arg(long)]
    metal: Option<String>,

    #[arg(long)]
    diamond_type: Option<String>,

    /// Size in cm.
    #[arg(long)]
    size: Option<String>,

    /// OpenAI API key; overrides OPENAI_API_KEY.
    #[arg(long)]
    api_key: Option<String>,

    /// Chat model; overrides ANALYZER_MODEL.
    #[arg(long)]
    model: Option<String>,

    /// Maximum output tokens; overrides ANALYZER_MAX_TOKENS.
    #[arg(long)]
    max_tokens: Option<u32>,

    /// Print the rendered prompt to stderr before sending it.
    #[arg(long)]
    show_prompt: bool,

    /// Print the rendered prompt and exit without calling the API.
    #[arg(long)]
    dry_run: bool,
}

impl CliArgs {
    fn attributes(&self) -> JewelryAttributes {
        let mut attributes = JewelryAttributes::new();
        let fields = [
            (JewelryAttribute::Carat, &self.carat),
            (JewelryAttribute::Weight, &self.weight),
            (JewelryAttribute::Color, &self.color),
            (JewelryAttribute::Metal, &self.metal),
            (JewelryAttribute::DiamondType, &self.diamond_type),
            (JewelryAttribute::Size, &self.size),
        ];
        for (attribute, value) in fields {
            if let Some(value) = value {
                attributes.set(attribute, value.as_str());
            }
        }
        attributes
    }

    fn apply_overrides(&self, config: &mut Config) {
        if let Some(api_key) = &self.api_key {
            config.api_key = Some(api_key.clone());
        }
        if let Some(model) = &self.model {
            config.model = model.clone();
        }
        if let Some(max_tokens) = self.max_tokens {
            config.max_tokens = max_tokens;
        }
    }
}

async fn run(args: CliArgs) -> jewelry_analyzer::Result<()> {
    let request = AnalysisRequest {
        image: load_upload(&args.image).await?,
        tone: args.tone,
        length: args.length,
        additional_context: args.context.as_deref().and_then(normalize_context),
        attributes: args.attributes(),
    };
    info!(
        "Tone: {} ({}), length: {}",
        request.tone,
        request.tone.description(),
        request.length.label()
    );

    if args.dry_run {
        let (_, prompt) = prepare(&request);
        println!("{}", prompt);
        return Ok(());
    }

    let mut config = Config::from_env()?;
    args.apply_overrides(&mut config);
    let analyzer = Analyzer::from_config(&config)?;

    if args.show_prompt {
        let (_, prompt) = prepare(&request);
        eprintln!("{}", prompt);
    }

    let analysis = analyzer.analyze(&request).await?;
    println!("Analysis Result:");
    println!("{}", analysis.result);
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "jewelry_analyzer=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let args = CliArgs::parse();

    match run(args).await {
        Ok(()) => Ok(()),
        Err(e) => {
            error!("{}", e);
            std::process::exit(1);
        }
    }
}
