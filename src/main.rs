use anyhow::Result;
use log::{info, warn};
use recipe_costing::catalog::Catalog;
use recipe_costing::costing::{format_report, load_recipes, RecipeCoster};
use recipe_costing::costing_config::CostingConfig;

fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenv::dotenv().ok();

    // Initialize logging
    env_logger::init();

    info!("Starting recipe costing");

    let config = CostingConfig::from_env()?;

    let catalog = Catalog::load_dir(&config.catalog_dir)?;
    if catalog.rejected_count() > 0 {
        warn!(
            "{} catalog entries have a malformed price and were ignored",
            catalog.rejected_count()
        );
    }

    let aliases = config.load_aliases()?;
    let recipes = load_recipes(&config.recipes_path)?;
    let limit = config.recipe_limit.min(recipes.len());

    let coster = RecipeCoster::new(&catalog, &aliases);
    let results = coster.cost_recipes(&recipes[..limit]);

    for result in &results {
        println!("--------------------------");
        println!("{}", format_report(result));
    }
    println!("--------------------------");

    let skipped: usize = results.iter().map(|r| r.skipped.len()).sum();
    info!(
        "Costed {} recipes against {} products, {} ingredients unresolved",
        results.len(),
        catalog.len(),
        skipped
    );

    Ok(())
}
