use pricer_comps::ListingSearch;

use crate::UrlsArgs;

/// Prints the sold and current listing searches for `args.query`.
///
/// # Errors
///
/// Returns an error if the engine config file cannot be loaded.
pub(crate) fn run_urls(config: &pricer_core::AppConfig, args: &UrlsArgs) -> anyhow::Result<()> {
    let days = match args.days {
        Some(days) => days,
        None => pricer_core::load_engine_config(config.engine_config_path.as_deref())?.days_back,
    };

    let (sold, current) = build_searches(args, days);
    println!("sold:    {}", sold.to_url());
    println!("current: {}", current.to_url());
    Ok(())
}

pub(crate) fn build_searches(args: &UrlsArgs, days: u32) -> (ListingSearch, ListingSearch) {
    let refine = |mut search: ListingSearch| {
        search = search.price_range(args.min_price, args.max_price);
        if let Some(per_page) = args.per_page {
            search = search.per_page(per_page);
        }
        if let Some(category) = &args.category {
            search = search.category(category.clone());
        }
        for condition in &args.condition {
            search = search.condition(*condition);
        }
        search
    };

    let sold = refine(ListingSearch::sold(args.query.clone()).sold_within_days(days));
    let current = refine(ListingSearch::active(args.query.clone()));
    (sold, current)
}
