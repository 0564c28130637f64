//! ddg-search CLI - DuckDuckGo web, image, news, maps and translation from the command line.

use anyhow::Result;
use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing_subscriber::EnvFilter;

use ddg_search::{
    Address, ClientConfig, DdgClient, ImageColor, ImageFilters, ImageLayout, ImageLicense,
    ImageSize, ImageType, PlaceQuery, SafeSearch, SearchQuery, TimeLimit,
};

/// ddg-search - DuckDuckGo search client
#[derive(Parser)]
#[command(name = "ddg-search")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Request timeout in seconds
    #[arg(short, long, global = true, default_value = "10")]
    timeout: u64,

    /// Proxy URL (e.g., http://127.0.0.1:8080 or socks5://127.0.0.1:1080)
    #[arg(short, long, global = true)]
    proxy: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "text")]
    format: OutputFormat,
}

#[derive(Subcommand)]
enum Commands {
    /// Web search
    Text(SearchArgs),

    /// Image search
    Images(ImageArgs),

    /// News search, newest first
    News(SearchArgs),

    /// Local places around an address
    Maps(MapsArgs),

    /// Translate one or more strings
    Translate(TranslateArgs),
}

#[derive(Args)]
struct SearchArgs {
    /// Search keywords
    keywords: String,

    /// Region code (wt-wt, us-en, uk-en, ru-ru, ...)
    #[arg(short, long, default_value = "wt-wt")]
    region: String,

    /// Safe search level
    #[arg(short, long, default_value = "moderate")]
    safesearch: SafeSearchArg,

    /// Only results from the last day, week, month or year
    #[arg(long)]
    time: Option<TimeArg>,

    /// Minimum number of results to collect
    #[arg(short = 'n', long)]
    max_results: Option<usize>,
}

impl SearchArgs {
    fn query(&self) -> SearchQuery {
        let mut query = SearchQuery::new(&self.keywords)
            .with_region(&self.region)
            .with_safesearch(self.safesearch.into());
        if let Some(time) = self.time {
            query = query.with_time_limit(time.into());
        }
        if let Some(max) = self.max_results {
            query = query.with_max_results(max);
        }
        query
    }
}

#[derive(Args)]
struct ImageArgs {
    #[command(flatten)]
    search: SearchArgs,

    #[arg(long)]
    size: Option<SizeArg>,

    #[arg(long)]
    color: Option<ColorArg>,

    #[arg(long = "type")]
    image_type: Option<TypeArg>,

    #[arg(long)]
    layout: Option<LayoutArg>,

    #[arg(long)]
    license: Option<LicenseArg>,
}

#[derive(Args)]
struct MapsArgs {
    /// Search keywords
    keywords: String,

    /// House number and street
    #[arg(long)]
    street: Option<String>,

    #[arg(long)]
    city: Option<String>,

    #[arg(long)]
    county: Option<String>,

    #[arg(long)]
    state: Option<String>,

    #[arg(long)]
    country: Option<String>,

    #[arg(long)]
    postal_code: Option<String>,

    /// Grow the search area by this many kilometers
    #[arg(long, default_value = "0")]
    radius: f64,
}

#[derive(Args)]
struct TranslateArgs {
    /// Strings to translate
    #[arg(required = true)]
    texts: Vec<String>,

    /// Source language (detected when omitted)
    #[arg(long)]
    from: Option<String>,

    /// Target language
    #[arg(long, default_value = "en")]
    to: String,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// Compact single-line output
    Compact,
}

#[derive(Clone, Copy, ValueEnum)]
enum SafeSearchArg {
    On,
    Moderate,
    Off,
}

impl From<SafeSearchArg> for SafeSearch {
    fn from(arg: SafeSearchArg) -> Self {
        match arg {
            SafeSearchArg::On => SafeSearch::Strict,
            SafeSearchArg::Moderate => SafeSearch::Moderate,
            SafeSearchArg::Off => SafeSearch::Off,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum TimeArg {
    D,
    W,
    M,
    Y,
}

impl From<TimeArg> for TimeLimit {
    fn from(arg: TimeArg) -> Self {
        match arg {
            TimeArg::D => TimeLimit::Day,
            TimeArg::W => TimeLimit::Week,
            TimeArg::M => TimeLimit::Month,
            TimeArg::Y => TimeLimit::Year,
        }
    }
}

macro_rules! value_arg {
    ($arg:ident => $target:ident { $($variant:ident),+ $(,)? }) => {
        #[derive(Clone, Copy, ValueEnum)]
        enum $arg {
            $($variant),+
        }

        impl From<$arg> for $target {
            fn from(arg: $arg) -> Self {
                match arg {
                    $($arg::$variant => $target::$variant),+
                }
            }
        }
    };
}

value_arg!(SizeArg => ImageSize { Small, Medium, Large, Wallpaper });
value_arg!(ColorArg => ImageColor {
    Color, Monochrome, Red, Orange, Yellow, Green, Blue, Purple, Pink, Brown, Black, Gray, Teal, White,
});
value_arg!(TypeArg => ImageType { Photo, Clipart, Gif, Transparent, Line });
value_arg!(LayoutArg => ImageLayout { Square, Tall, Wide });
value_arg!(LicenseArg => ImageLicense {
    Any, Public, Share, ShareCommercially, Modify, ModifyCommercially,
});

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Setup logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let mut config = ClientConfig::default().with_timeout(cli.timeout);
    if let Some(proxy) = &cli.proxy {
        config = config.with_proxy(proxy);
        if matches!(cli.format, OutputFormat::Text) {
            eprintln!("Using proxy: {}", proxy);
        }
    }
    let client = DdgClient::with_config(config)?;

    match cli.command {
        Commands::Text(args) => {
            let results = client.search_text(&args.query()).await?;
            print_records(cli.format, &results, |r| {
                (r.title.clone(), r.href.clone(), r.body.clone())
            })
        }
        Commands::Images(args) => {
            let filters = ImageFilters {
                size: args.size.map(Into::into),
                color: args.color.map(Into::into),
                image_type: args.image_type.map(Into::into),
                layout: args.layout.map(Into::into),
                license: args.license.map(Into::into),
            };
            let results = client.search_images(&args.search.query(), &filters).await?;
            print_records(cli.format, &results, |r| {
                (
                    r.title.clone(),
                    r.image.clone(),
                    format!("{}x{} from {}", r.width, r.height, r.url),
                )
            })
        }
        Commands::News(args) => {
            let results = client.search_news(&args.query()).await?;
            print_records(cli.format, &results, |r| {
                (
                    format!("[{}] {}", r.date, r.title),
                    r.url.clone(),
                    format!("{} - {}", r.source, r.body),
                )
            })
        }
        Commands::Maps(args) => {
            let address = Address {
                street: args.street,
                city: args.city,
                county: args.county,
                state: args.state,
                country: args.country,
                postal_code: args.postal_code,
            };
            let query = PlaceQuery::new(args.keywords, address).with_radius_km(args.radius);
            let results = client.search_places(&query).await?;
            print_records(cli.format, &results, |r| {
                (
                    r.title.clone(),
                    r.url.clone().unwrap_or_default(),
                    format!("{} ({}, {})", r.address, r.latitude, r.longitude),
                )
            })
        }
        Commands::Translate(args) => {
            let results = client
                .translate(&args.texts, args.from.as_deref(), &args.to)
                .await?;
            print_records(cli.format, &results, |r| {
                (
                    r.translated.clone(),
                    r.detected_language.clone().unwrap_or_default(),
                    r.original.clone(),
                )
            })
        }
    }
}

/// Prints records; `line` picks (heading, link, detail) for text output.
fn print_records<T, F>(format: OutputFormat, records: &[T], line: F) -> Result<()>
where
    T: Serialize,
    F: Fn(&T) -> (String, String, String),
{
    match format {
        OutputFormat::Text => {
            println!("\n{} results:\n", records.len());
            for (i, record) in records.iter().enumerate() {
                let (heading, link, detail) = line(record);
                println!("{}. {}", i + 1, heading);
                if !link.is_empty() {
                    println!("   {}", link);
                }
                if !detail.is_empty() {
                    let detail = if detail.chars().count() > 150 {
                        format!("{}...", detail.chars().take(150).collect::<String>())
                    } else {
                        detail
                    };
                    println!("   {}", detail);
                }
                println!();
            }
        }
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(records)?);
        }
        OutputFormat::Compact => {
            for record in records {
                let (heading, link, _) = line(record);
                println!("{}\t{}", heading, link);
            }
        }
    }
    Ok(())
}
