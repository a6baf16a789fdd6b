//! `littlepay groups`: list and manage concession groups.

use std::path::Path;

use futures_util::TryStreamExt;

use super::{
    active_client, check_active_selection, filter_by_terms, print_active_message, Console,
    RESULT_FAILURE, RESULT_SUCCESS,
};
use crate::cli::{GroupsArgs, GroupsCommand};
use crate::client::{ClientConfig, LittlepayClient};
use crate::config::Config;
use crate::models::{ConcessionGroup, Product};
use crate::output::CsvRecord;
use crate::Result;

/// Run a `groups` invocation against the config at `config_path`.
pub async fn groups(
    config_path: &Path,
    args: &GroupsArgs,
    client_config: &ClientConfig,
    console: &mut Console<'_>,
) -> Result<i32> {
    let mut config = Config::load(config_path)?;
    if !check_active_selection(console, &config)? {
        return Ok(RESULT_FAILURE);
    }

    let client = active_client(&mut config, client_config).await?;
    let mut failures = 0;

    match &args.command {
        Some(GroupsCommand::Create { label }) => {
            failures += create_group(&client, &config, label, console).await?;
        }
        Some(GroupsCommand::Remove { group_id, force }) => {
            failures += remove_group(&client, &config, group_id, *force, console).await?;
        }
        _ => {}
    }

    let groups: Vec<ConcessionGroup> = client.groups().list().try_collect().await?;
    let groups = filter_by_terms(groups, &args.terms, |g| vec![g.id.as_str(), g.label.as_str()]);

    match &args.command {
        Some(GroupsCommand::Link { product_id }) => {
            for group in &groups {
                failures += link_product(&client, &config, &group.id, product_id, console).await?;
            }
        }
        Some(GroupsCommand::Unlink { product_id }) => {
            for group in &groups {
                failures += unlink_product(&client, &config, &group.id, product_id, console).await?;
            }
        }
        Some(GroupsCommand::Migrate { force }) => {
            for group in &groups {
                failures += migrate_group(&client, &config, &group.id, *force, console).await?;
            }
        }
        _ => {}
    }

    let listing_products = matches!(args.command, Some(GroupsCommand::Products));

    if args.csv && listing_products {
        console.line("group_id,product_id,participant_id")?;
    } else if args.csv {
        console.line(ConcessionGroup::csv_header())?;
    } else {
        let message = format!("👥 Matching groups ({})", groups.len());
        print_active_message(console, &config, &message, None)?;
    }

    for group in &groups {
        if !args.csv {
            console.line(group.to_string())?;
        }

        match &args.command {
            Some(GroupsCommand::Products) => {
                failures += linked_products(&client, group, args.csv, console).await?;
            }
            Some(GroupsCommand::FundingSources) => {
                failures += linked_funding_sources(&client, &group.id, console).await?;
            }
            _ if args.csv => console.line(group.csv())?,
            _ => {}
        }
    }

    Ok(if failures == 0 { RESULT_SUCCESS } else { RESULT_FAILURE })
}

/// Print the outcome of one operation; returns its contribution to the failure count.
fn report<T>(console: &mut Console<'_>, result: Result<T>, success: impl FnOnce(T) -> String) -> Result<i32> {
    match result {
        Ok(value) => {
            console.line(success(value))?;
            Ok(RESULT_SUCCESS)
        }
        Err(err) => {
            console.line(format!("❌ Error: {}", err))?;
            Ok(RESULT_FAILURE)
        }
    }
}

async fn create_group(
    client: &LittlepayClient,
    config: &Config,
    label: &str,
    console: &mut Console<'_>,
) -> Result<i32> {
    print_active_message(console, config, "Creating group", Some(format!("[{}]", label).as_str()))?;

    let result = client.groups().create(label).await;
    report(console, result, |created| format!("✅ Created: {}", created))
}

async fn remove_group(
    client: &LittlepayClient,
    config: &Config,
    group_id: &str,
    force: bool,
    console: &mut Console<'_>,
) -> Result<i32> {
    print_active_message(console, config, "Removing group", Some(format!("[{}]", group_id).as_str()))?;

    if !force && !console.confirm()? {
        console.line("Canceled...")?;
        return Ok(RESULT_SUCCESS);
    }

    console.line("Removing group...")?;
    let result = client.groups().remove(group_id).await;
    report(console, result, |_| "✅ Removed".to_string())
}

pub(crate) async fn link_product(
    client: &LittlepayClient,
    config: &Config,
    group_id: &str,
    product_id: &str,
    console: &mut Console<'_>,
) -> Result<i32> {
    let postfix = format!("[{}] <-> [{}]", group_id, product_id);
    print_active_message(console, config, "Linking group <-> product", Some(postfix.as_str()))?;

    let result = client.groups().link_product(group_id, product_id).await;
    report(console, result, |linked| format!("✅ Linked: {}", linked))
}

pub(crate) async fn unlink_product(
    client: &LittlepayClient,
    config: &Config,
    group_id: &str,
    product_id: &str,
    console: &mut Console<'_>,
) -> Result<i32> {
    let postfix = format!("[{}] <-> [{}]", group_id, product_id);
    print_active_message(console, config, "Unlinking group <-> product", Some(postfix.as_str()))?;

    let result = client.groups().unlink_product(group_id, product_id).await;
    report(console, result, |_| "✅ Unlinked".to_string())
}

async fn migrate_group(
    client: &LittlepayClient,
    config: &Config,
    group_id: &str,
    force: bool,
    console: &mut Console<'_>,
) -> Result<i32> {
    print_active_message(console, config, "Migrating group", Some(format!("[{}]", group_id).as_str()))?;

    if !force && !console.confirm()? {
        console.line("Canceled...")?;
        return Ok(RESULT_SUCCESS);
    }

    console.line("Migrating group...")?;
    let result = client.groups().migrate(group_id).await;
    report(console, result, |_| "✅ Migrated".to_string())
}

async fn linked_products(
    client: &LittlepayClient,
    group: &ConcessionGroup,
    csv: bool,
    console: &mut Console<'_>,
) -> Result<i32> {
    let products: Vec<Product> = match client.groups().products(&group.id).try_collect().await {
        Ok(products) => products,
        Err(err) => {
            console.line(format!("❌ Error: {}", err))?;
            return Ok(RESULT_FAILURE);
        }
    };

    if !csv {
        console.line(format!("  🛒 Linked products ({})", products.len()))?;
    }

    for product in &products {
        if csv {
            console.line(format!("{},{},{}", group.id, product.id, group.participant_id))?;
        } else {
            console.line(format!("  {}", product))?;
        }
    }

    Ok(RESULT_SUCCESS)
}

async fn linked_funding_sources(
    client: &LittlepayClient,
    group_id: &str,
    console: &mut Console<'_>,
) -> Result<i32> {
    let result: Result<Vec<_>> = client.groups().funding_sources(group_id).try_collect().await;

    match result {
        Ok(funding_sources) => {
            console.line(format!("  💵 Linked funding sources ({})", funding_sources.len()))?;
            for funding_source in &funding_sources {
                console.line(format!("  {}", funding_source))?;
            }
            Ok(RESULT_SUCCESS)
        }
        Err(err) => {
            console.line(format!("❌ Error: {}", err))?;
            Ok(RESULT_FAILURE)
        }
    }
}
