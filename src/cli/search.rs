use clap::Args;
use rust_decimal::Decimal;
use techmarket_seed::{
    database::Db,
    domain::products::{MongoProductsService, ProductsService},
};

use super::{error_chain, table::products_table};

#[derive(Debug, Args)]
pub(crate) struct SearchArgs {
    /// Keywords matched against product name and description
    #[arg(long, conflicts_with = "max_price", value_parser = non_blank)]
    text: Option<String>,

    /// Only list products priced at or below this amount
    #[arg(long)]
    max_price: Option<Decimal>,
}

fn non_blank(value: &str) -> Result<String, String> {
    if value.trim().is_empty() {
        return Err("text cannot be empty".to_string());
    }

    Ok(value.to_string())
}

pub(crate) async fn run(db: Db, args: SearchArgs) -> Result<(), String> {
    let products = MongoProductsService::new(db);

    let found = match (args.text, args.max_price) {
        (Some(text), _) => products.search_products(text).await,
        (None, Some(max_price)) => products.products_up_to_price(max_price).await,
        (None, None) => products.list_products().await,
    }
    .map_err(|error| format!("failed to query products: {}", error_chain(&error)))?;

    println!("{}", products_table(&found));

    Ok(())
}
