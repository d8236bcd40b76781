use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use tracing_subscriber::EnvFilter;

use crop_yield_advisor::{
    analysis::Advisor,
    config::AdvisorConfig,
    io,
    models::{default_soil_profile, profiled_regions, Season, YieldRequest},
    visualization::{
        print_assessment, print_batch_results, print_challenges, print_recommendations,
        print_soil_health, print_soil_profile, print_suitability_chart,
    },
};

#[derive(Parser)]
#[command(
    name = "crop-advisor",
    about = "Crop Yield Advisor - yield estimates, soil health and crop recommendations",
    version,
    author
)]
struct Cli {
    /// Path to a TOML configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Seed for the seasonal variability factor (reproducible estimates)
    #[arg(long, global = true)]
    seed: Option<u64>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Predict yield for a field, with soil health and seasonal challenges
    Predict {
        /// Crop name, e.g. rice
        #[arg(short, long)]
        crop: String,

        /// Variety identifier, e.g. IR36
        #[arg(short, long, default_value = "")]
        variety: String,

        /// Field area in hectares
        #[arg(short, long)]
        area: f64,

        /// Soil description (defaults to the region's soil type)
        #[arg(short, long)]
        soil_type: Option<String>,

        /// State or region, e.g. Punjab
        #[arg(short, long)]
        region: String,

        /// Soil pH (defaults to the region's soil profile)
        #[arg(long)]
        ph: Option<f64>,

        /// Available nitrogen in kg/ha
        #[arg(long)]
        nitrogen: Option<f64>,

        /// Available phosphorus in kg/ha
        #[arg(long)]
        phosphorus: Option<f64>,

        /// Available potassium in kg/ha
        #[arg(long)]
        potassium: Option<f64>,

        /// Season: kharif, rabi or zaid (defaults to the current season)
        #[arg(long)]
        season: Option<Season>,

        /// Print the assessment as JSON
        #[arg(long)]
        json: bool,
    },

    /// Classify soil pH and N, P, K levels
    SoilHealth {
        #[arg(long)]
        ph: Option<f64>,
        #[arg(long)]
        nitrogen: Option<f64>,
        #[arg(long)]
        phosphorus: Option<f64>,
        #[arg(long)]
        potassium: Option<f64>,

        /// Fill missing values from this region's soil profile
        #[arg(short, long)]
        region: Option<String>,
    },

    /// List known seasonal challenges for a crop
    Challenges {
        #[arg(short, long)]
        crop: String,

        #[arg(short, long)]
        region: String,

        #[arg(long)]
        season: Option<Season>,
    },

    /// Rank suitable crops for a region, soil and season
    Recommend {
        #[arg(short, long)]
        region: String,

        /// Soil description (defaults to the region's soil type)
        #[arg(short, long)]
        soil_type: Option<String>,

        #[arg(long)]
        season: Option<Season>,

        /// Number of primary recommendations
        #[arg(short, long)]
        primary: Option<usize>,

        /// Show a suitability bar chart
        #[arg(long)]
        chart: bool,
    },

    /// Show the agricultural season for a month
    Season {
        /// Month index, 0 = January (defaults to the current month)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(0..12))]
        month: Option<u32>,
    },

    /// Show the default soil profile for a region
    SoilProfile {
        /// Region name; lists mapped regions when omitted
        #[arg(short, long)]
        region: Option<String>,
    },

    /// Predict yield for every field in a CSV or JSON plan file
    Batch {
        /// Plan file (.csv or .json)
        #[arg(short, long)]
        input: PathBuf,

        /// Results file (.csv or .json)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Start the HTTP API server
    #[cfg(feature = "web")]
    Serve {
        #[arg(long)]
        host: Option<String>,

        #[arg(short, long)]
        port: Option<u16>,
    },
}

fn load_config(cli: &Cli) -> Result<AdvisorConfig> {
    let mut config = match &cli.config {
        Some(path) => AdvisorConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display()))?,
        None => AdvisorConfig::default(),
    };
    if let Some(seed) = cli.seed {
        config.variability.seed = Some(seed);
    }
    Ok(config)
}

fn init_tracing(config: &AdvisorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = load_config(&cli)?;
    init_tracing(&config);

    match cli.command {
        Commands::Predict {
            crop,
            variety,
            area,
            soil_type,
            region,
            ph,
            nitrogen,
            phosphorus,
            potassium,
            season,
            json,
        } => {
            let profile = default_soil_profile(&region);
            let request = YieldRequest {
                crop,
                variety,
                area_hectares: area,
                soil_type: soil_type.unwrap_or_else(|| profile.predominant_type.to_string()),
                region,
                ph: ph.unwrap_or(profile.ph),
                nitrogen: nitrogen.unwrap_or(profile.nitrogen as f64),
                phosphorus: phosphorus.unwrap_or(profile.phosphorus as f64),
                potassium: potassium.unwrap_or(profile.potassium as f64),
            };
            let mut advisor = Advisor::from_config(&config)?;
            let assessment = advisor.assess(&request, season.unwrap_or_else(Season::current))?;

            if json {
                println!("{}", serde_json::to_string_pretty(&assessment)?);
            } else {
                print_assessment(&assessment);
            }
        }

        Commands::SoilHealth {
            ph,
            nitrogen,
            phosphorus,
            potassium,
            region,
        } => {
            let (ph, nitrogen, phosphorus, potassium) = match region {
                Some(region) => {
                    let profile = default_soil_profile(&region);
                    (
                        ph.unwrap_or(profile.ph),
                        nitrogen.unwrap_or(profile.nitrogen as f64),
                        phosphorus.unwrap_or(profile.phosphorus as f64),
                        potassium.unwrap_or(profile.potassium as f64),
                    )
                }
                None => match (ph, nitrogen, phosphorus, potassium) {
                    (Some(ph), Some(n), Some(p), Some(k)) => (ph, n, p, k),
                    _ => anyhow::bail!(
                        "Provide --ph, --nitrogen, --phosphorus and --potassium, or --region"
                    ),
                },
            };
            let advisor = Advisor::from_config(&config)?;
            print_soil_health(&advisor.soil_health(ph, nitrogen, phosphorus, potassium));
        }

        Commands::Challenges {
            crop,
            region,
            season,
        } => {
            let season = season.unwrap_or_else(Season::current);
            println!(
                "\n{}",
                format!("{crop} in {region}, {season} season").bold().cyan()
            );
            let advisor = Advisor::from_config(&config)?;
            print_challenges(&advisor.challenges(&crop, &region, season));
        }

        Commands::Recommend {
            region,
            soil_type,
            season,
            primary,
            chart,
        } => {
            if let Some(primary) = primary {
                config.recommendations.primary_count = primary;
            }
            let season = season.unwrap_or_else(Season::current);
            let soil_type = soil_type
                .unwrap_or_else(|| default_soil_profile(&region).predominant_type.to_string());
            println!(
                "\n{}",
                format!("Crops for {region} ({soil_type} soil), {season} season")
                    .bold()
                    .cyan()
            );

            let advisor = Advisor::from_config(&config)?;
            let recs = advisor.recommend(&region, &soil_type, season);
            print_recommendations(&recs);
            if chart {
                print_suitability_chart(&recs);
            }
        }

        Commands::Season { month } => {
            let (month, season) = match month {
                Some(m) => (m, Season::from_month0(m)),
                None => {
                    let now = chrono::Local::now();
                    (chrono::Datelike::month0(&now), Season::from_date(&now))
                }
            };
            println!("Month {month}: {}", season.to_string().bold());
        }

        Commands::SoilProfile { region } => match region {
            Some(region) => print_soil_profile(&region, &default_soil_profile(&region)),
            None => {
                println!("\n{}", "Mapped regions".bold().cyan());
                for region in profiled_regions() {
                    println!("  {region}");
                }
            }
        },

        Commands::Batch { input, output } => {
            let plans = io::read_plans(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            println!(
                "\n{}",
                format!("Batch: {} ({} fields)", input.display(), plans.len())
                    .bold()
                    .cyan()
            );

            let mut advisor = Advisor::from_config(&config)?;
            let results = advisor.predict_batch(&plans);
            print_batch_results(&results);

            if let Some(output) = output {
                io::write_results(&results, &output)?;
                println!(
                    "{} Wrote results to {}",
                    "Success:".green().bold(),
                    output.display()
                );
            }
        }

        #[cfg(feature = "web")]
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            config.validate()?;
            let rt = tokio::runtime::Runtime::new()?;
            rt.block_on(crop_yield_advisor::web::start_server(config))?;
        }
    }

    Ok(())
}
