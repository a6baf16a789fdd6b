//! `littlepay products`: list products and link them to groups.

use std::path::Path;

use futures_util::TryStreamExt;

use super::groups::{link_product, unlink_product};
use super::{
    active_client, check_active_selection, filter_by_terms, print_active_message, Console,
    RESULT_FAILURE, RESULT_SUCCESS,
};
use crate::cli::{ProductsArgs, ProductsCommand};
use crate::client::ClientConfig;
use crate::config::Config;
use crate::models::Product;
use crate::output::CsvRecord;
use crate::Result;

/// Run a `products` invocation against the config at `config_path`.
pub async fn products(
    config_path: &Path,
    args: &ProductsArgs,
    client_config: &ClientConfig,
    console: &mut Console<'_>,
) -> Result<i32> {
    let mut config = Config::load(config_path)?;
    if !check_active_selection(console, &config)? {
        return Ok(RESULT_FAILURE);
    }

    let client = active_client(&mut config, client_config).await?;
    let mut failures = 0;

    let products: Vec<Product> = client.products().list(args.status).try_collect().await?;
    let products = filter_by_terms(products, &args.terms, |p| {
        vec![p.id.as_str(), p.code.as_str(), p.description.as_str()]
    });

    if args.csv {
        console.line(Product::csv_header())?;
    } else {
        let message = format!("🛒 Matching products ({})", products.len());
        print_active_message(console, &config, &message, None)?;
    }

    for product in &products {
        if args.csv {
            console.line(product.csv())?;
        } else {
            console.line(product.to_string())?;
        }
    }

    match &args.command {
        Some(ProductsCommand::Link { group_id }) => {
            for product in &products {
                failures += link_product(&client, &config, group_id, &product.id, console).await?;
            }
        }
        Some(ProductsCommand::Unlink { group_id }) => {
            for product in &products {
                failures += unlink_product(&client, &config, group_id, &product.id, console).await?;
            }
        }
        None => {}
    }

    Ok(if failures == 0 { RESULT_SUCCESS } else { RESULT_FAILURE })
}
