//! resale - marketplace fee calculator and pricing assistant
//!
//! # Usage
//! ```sh
//! resale quote --price 15
//! resale recommend --price 100 --cost 90
//! resale advise --name "Platform heel boots" --brand "Dr. Martens" --retail 200 --cost 50
//! resale inventory add --name "Levi's 501" --price 45 --cost 8
//! resale describe ab12cd34 --platform depop
//! ```
//!
//! # Environment Variables
//! - `FEE_SCHEDULE_PATH` - TOML rate table merged over the built-in fees
//! - `INVENTORY_PATH` - Inventory JSON file (default: inventory.json)
//! - `MIN_MARKUP` - Minimum price as a multiple of cost basis (default: 1.10)
//! - `RUST_LOG` - Log filter (default: info)

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use resale_pricing::application::{PricingAdvisor, PricingRequest, QuoteReporter};
use resale_pricing::config::{Config, fee_schedule_to_toml};
use resale_pricing::domain::inventory::Item;
use resale_pricing::domain::listing::ListingDescriptions;
use resale_pricing::domain::market::Condition;
use resale_pricing::domain::pricing::{FeeEngine, Platform};
use resale_pricing::domain::repositories::ItemRepository;
use resale_pricing::infrastructure::{JsonFileItemRepository, NoComparables};
use rust_decimal::Decimal;
use serde::Serialize;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Marketplace fee calculator and pricing assistant",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Default, ValueEnum)]
enum OutputFormat {
    #[default]
    Table,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Fee and net proceeds for a sale price, per platform
    Quote {
        /// Sale price
        #[arg(short, long)]
        price: Decimal,

        /// Single platform (poshmark, depop, mercari, ebay, xiaohongshu)
        #[arg(long)]
        platform: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Rank platforms by net proceeds, demoting any that lose money
    Recommend {
        /// Sale price
        #[arg(short, long)]
        price: Decimal,

        /// What you paid for the item
        #[arg(short, long)]
        cost: Option<Decimal>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Suggest asking prices and the best platform for an item
    Advise {
        /// Item name
        #[arg(short, long)]
        name: String,

        #[arg(short, long)]
        brand: Option<String>,

        /// new, excellent, good, fair
        #[arg(long, default_value = "good")]
        condition: String,

        /// Original retail price
        #[arg(short, long)]
        retail: Option<Decimal>,

        /// What you paid for the item
        #[arg(short, long)]
        cost: Option<Decimal>,

        /// Lowest price you will accept
        #[arg(long)]
        floor: Option<Decimal>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Listing title and descriptions for an inventory item
    Describe {
        id: String,

        /// Only this platform's description
        #[arg(long)]
        platform: Option<String>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Print the active fee table as TOML
    Fees,
    /// Manage the item inventory
    Inventory {
        #[command(subcommand)]
        command: InventoryCommands,
    },
}

#[derive(Subcommand)]
enum InventoryCommands {
    /// Add an unlisted item
    Add {
        #[arg(short, long)]
        name: String,

        /// Asking price
        #[arg(short, long)]
        price: Decimal,

        #[arg(short, long)]
        cost: Option<Decimal>,

        #[arg(short, long)]
        brand: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long, default_value = "good")]
        condition: String,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        measurements: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        /// Lowest price you will accept
        #[arg(long)]
        floor: Option<Decimal>,

        /// Price you hope to get
        #[arg(long)]
        target: Option<Decimal>,
    },
    /// Change descriptive fields and seller prices
    Edit {
        id: String,

        #[arg(short, long)]
        name: Option<String>,

        #[arg(short, long)]
        brand: Option<String>,

        #[arg(long)]
        category: Option<String>,

        #[arg(long)]
        condition: Option<String>,

        #[arg(long)]
        color: Option<String>,

        #[arg(long)]
        size: Option<String>,

        #[arg(long)]
        measurements: Option<String>,

        #[arg(long)]
        notes: Option<String>,

        #[arg(long)]
        floor: Option<Decimal>,

        #[arg(long)]
        target: Option<Decimal>,
    },
    /// Pricing advice for a stored item
    Advise {
        id: String,

        /// Original retail price
        #[arg(short, long)]
        retail: Option<Decimal>,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// List all items
    List {
        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Show an item with its platform recommendation
    Show {
        id: String,

        #[arg(short, long, value_enum, default_value_t)]
        format: OutputFormat,
    },
    /// Change the asking price and/or cost basis
    Reprice {
        id: String,

        #[arg(short, long)]
        price: Option<Decimal>,

        #[arg(short, long)]
        cost: Option<Decimal>,
    },
    /// Mark an item as listed on a platform
    ListOn { id: String, platform: String },
    /// Mark a listed item as sold
    Sell { id: String },
    /// Remove an item
    Delete { id: String },
    /// Write the full inventory dump to a file
    Export {
        #[arg(short, long, default_value = "inventory_export.json")]
        output: PathBuf,
    },
}

#[derive(Serialize)]
struct ItemReport<'a> {
    item: &'a Item,
    recommendation: resale_pricing::domain::pricing::Recommendation,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    // Logs go to stderr so JSON on stdout stays machine-readable
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = Config::from_env()?;
    debug!("Configuration loaded: {:?}", config);

    let engine = FeeEngine::new(config.fee_schedule()?);
    let reporter = QuoteReporter;

    match cli.command {
        Commands::Quote {
            price,
            platform,
            format,
        } => {
            let quotes = match platform {
                Some(name) => vec![engine.compute_quote(Platform::from_str(&name)?, price)?],
                None => engine.compute_all_quotes(price)?,
            };
            match format {
                OutputFormat::Table => print!("{}", reporter.quotes_table(&quotes)),
                OutputFormat::Json => println!("{}", reporter.json(&quotes)?),
            }
        }
        Commands::Recommend {
            price,
            cost,
            format,
        } => {
            let recommendation = engine.recommend_best(price, cost)?;
            match format {
                OutputFormat::Table => print!("{}", reporter.recommendation(&recommendation)),
                OutputFormat::Json => println!("{}", reporter.json(&recommendation)?),
            }
        }
        Commands::Advise {
            name,
            brand,
            condition,
            retail,
            cost,
            floor,
            format,
        } => {
            let request = PricingRequest {
                item_name: name,
                brand,
                condition: Condition::from_str(&condition)?,
                retail_price: retail,
                cost_basis: cost,
                floor_price: floor,
            };
            advise(engine, &config, &request, format, &reporter).await?;
        }
        Commands::Describe {
            id,
            platform,
            format,
        } => {
            let platform = platform.as_deref().map(Platform::from_str).transpose()?;
            let repo = JsonFileItemRepository::new(&config.inventory_path);
            let item = find_item(&repo, &id).await?;
            let descriptions = ListingDescriptions::for_item(&item);
            match (format, platform) {
                (OutputFormat::Table, platform) => {
                    print!("{}", reporter.descriptions(&descriptions, platform))
                }
                (OutputFormat::Json, Some(platform)) => println!(
                    "{}",
                    reporter.json(&serde_json::json!({
                        "title": descriptions.title,
                        "platform": platform,
                        "description": descriptions.for_platform(platform),
                    }))?
                ),
                (OutputFormat::Json, None) => println!("{}", reporter.json(&descriptions)?),
            }
        }
        Commands::Fees => {
            print!("{}", fee_schedule_to_toml(engine.schedule())?);
        }
        Commands::Inventory { command } => {
            let repo = JsonFileItemRepository::new(&config.inventory_path);
            run_inventory(command, &repo, engine, &config, &reporter).await?;
        }
    }

    Ok(())
}

async fn advise(
    engine: FeeEngine,
    config: &Config,
    request: &PricingRequest,
    format: OutputFormat,
    reporter: &QuoteReporter,
) -> Result<()> {
    // No comparable-sales provider is wired in; estimates fall back to
    // retail or the default range.
    let advisor =
        PricingAdvisor::new(engine, Arc::new(NoComparables)).with_min_markup(config.min_markup);
    let advice = advisor.advise(request).await?;
    match format {
        OutputFormat::Table => print!("{}", reporter.advice(&advice)),
        OutputFormat::Json => println!("{}", reporter.json(&advice)?),
    }
    Ok(())
}

async fn run_inventory(
    command: InventoryCommands,
    repo: &JsonFileItemRepository,
    engine: FeeEngine,
    config: &Config,
    reporter: &QuoteReporter,
) -> Result<()> {
    match command {
        InventoryCommands::Add {
            name,
            price,
            cost,
            brand,
            category,
            condition,
            color,
            size,
            measurements,
            notes,
            floor,
            target,
        } => {
            let mut item = Item::new(name, price, cost)?;
            item.brand = brand.unwrap_or_default();
            item.category = category.unwrap_or_default();
            item.condition = Condition::from_str(&condition)?;
            item.color = color.unwrap_or_default();
            item.size = size.unwrap_or_default();
            item.measurements = measurements.unwrap_or_default();
            item.notes = notes.unwrap_or_default();
            item.set_floor_price(floor)?;
            item.set_target_price(target)?;

            repo.create(&item).await?;
            println!("✅ Added {} ({})", item.name, item.id());
        }
        InventoryCommands::List { format } => {
            let items = repo.list().await?;
            match format {
                OutputFormat::Table => print!("{}", reporter.items_table(&items)),
                OutputFormat::Json => println!("{}", reporter.json(&items)?),
            }
        }
        InventoryCommands::Show { id, format } => {
            let item = find_item(repo, &id).await?;
            let recommendation = item.quote_listing(&engine)?;
            match format {
                OutputFormat::Table => {
                    print!("{}", reporter.item_details(&item));
                    println!();
                    print!("{}", reporter.recommendation(&recommendation));
                }
                OutputFormat::Json => println!(
                    "{}",
                    reporter.json(&ItemReport {
                        item: &item,
                        recommendation,
                    })?
                ),
            }
        }
        InventoryCommands::Edit {
            id,
            name,
            brand,
            category,
            condition,
            color,
            size,
            measurements,
            notes,
            floor,
            target,
        } => {
            let mut item = find_item(repo, &id).await?;
            let text_fields = [
                (&mut item.name, name),
                (&mut item.brand, brand),
                (&mut item.category, category),
                (&mut item.color, color),
                (&mut item.size, size),
                (&mut item.measurements, measurements),
                (&mut item.notes, notes),
            ];
            for (field, value) in text_fields {
                if let Some(value) = value {
                    *field = value;
                }
            }
            if let Some(condition) = condition {
                item.condition = Condition::from_str(&condition)?;
            }
            if floor.is_some() {
                item.set_floor_price(floor)?;
            }
            if target.is_some() {
                item.set_target_price(target)?;
            }
            repo.update(&item).await?;
            info!("Edited item {}", item.id());
            println!("✅ Updated {} ({})", item.name, item.id());
        }
        InventoryCommands::Advise { id, retail, format } => {
            let item = find_item(repo, &id).await?;
            let request = PricingRequest {
                retail_price: retail,
                ..PricingRequest::for_item(&item)
            };
            advise(engine, config, &request, format, reporter).await?;
        }
        InventoryCommands::Reprice { id, price, cost } => {
            let mut item = find_item(repo, &id).await?;
            if let Some(price) = price {
                item.set_list_price(price)?;
            }
            if cost.is_some() {
                item.set_cost_basis(cost)?;
            }
            repo.update(&item).await?;
            info!("Repriced {} to {}", item.id(), item.list_price());
            println!("✅ {} now at ${:.2}", item.name, item.list_price());
        }
        InventoryCommands::ListOn { id, platform } => {
            let platform = Platform::from_str(&platform)?;
            let mut item = find_item(repo, &id).await?;
            item.list_on(platform)?;
            repo.update(&item).await?;
            println!("✅ {} listed on {}", item.name, platform.display_name());
        }
        InventoryCommands::Sell { id } => {
            let mut item = find_item(repo, &id).await?;
            item.mark_sold()?;
            repo.update(&item).await?;
            println!("✅ {} marked as sold", item.name);
        }
        InventoryCommands::Delete { id } => {
            repo.delete(&id).await?;
            println!("🗑️  Deleted {}", id);
        }
        InventoryCommands::Export { output } => {
            let count = repo.export_to(&output).await?;
            println!("✅ Exported {} items to {}", count, output.display());
        }
    }
    Ok(())
}

async fn find_item(repo: &JsonFileItemRepository, id: &str) -> Result<Item> {
    repo.get(id)
        .await?
        .with_context(|| format!("Item not found: {}", id))
}
