use super::*;

#[test]
fn sold_url_has_completed_flags() {
    let url = ListingSearch::sold("Widget Pro").to_url();
    assert_eq!(
        url,
        "https://www.ebay.com/sch/i.html?_nkw=Widget%20Pro&LH_Sold=1&LH_Complete=1&_ipg=200&_sop=10"
    );
}

#[test]
fn active_url_omits_completed_flags() {
    let url = ListingSearch::active("Widget Pro").to_url();
    assert_eq!(
        url,
        "https://www.ebay.com/sch/i.html?_nkw=Widget%20Pro&_ipg=200&_sop=10"
    );
}

#[test]
fn per_page_is_capped() {
    let url = ListingSearch::active("lamp").per_page(500).to_url();
    assert!(url.contains("&_ipg=200&"), "url was {url}");
}

#[test]
fn small_per_page_is_kept() {
    let url = ListingSearch::active("lamp").per_page(25).to_url();
    assert!(url.contains("&_ipg=25&"), "url was {url}");
}

#[test]
fn keywords_are_percent_encoded() {
    let url = ListingSearch::sold("Tom & Jerry #5").to_url();
    assert!(url.contains("_nkw=Tom%20%26%20Jerry%20%235"), "url was {url}");
}

#[test]
fn all_filters_render_in_fixed_order() {
    let url = ListingSearch::sold("Canon AE-1")
        .per_page(50)
        .price_range(Some(20.0), Some(150.5))
        .category("15230")
        .condition(ConditionCode::Used)
        .condition(ConditionCode::New)
        .sold_within_days(30)
        .to_url();
    assert_eq!(
        url,
        "https://www.ebay.com/sch/i.html?_nkw=Canon%20AE%2D1&LH_Sold=1&LH_Complete=1\
         &_ipg=50&_sop=10&_udlo=20.00&_udhi=150.50&_sacat=15230\
         &LH_ItemCondition=3000%7C1000&LH_SoldWithin=30"
    );
}

#[test]
fn sold_within_ignored_for_active_search() {
    let url = ListingSearch::active("lamp").sold_within_days(30).to_url();
    assert!(!url.contains("LH_SoldWithin"), "url was {url}");
}

#[test]
fn duplicate_conditions_collapse() {
    let search = ListingSearch::sold("lamp")
        .condition(ConditionCode::Good)
        .condition(ConditionCode::Good);
    assert_eq!(search.conditions, vec![ConditionCode::Good]);
}

#[test]
fn rendering_is_deterministic() {
    let search = ListingSearch::sold("lamp").price_range(Some(5.0), None);
    assert_eq!(search.to_url(), search.clone().to_url());
}

#[test]
fn condition_labels_parse() {
    assert_eq!("Open box".parse::<ConditionCode>(), Ok(ConditionCode::OpenBox));
    assert_eq!("for-parts".parse::<ConditionCode>(), Ok(ConditionCode::ForParts));
    assert_eq!("USED".parse::<ConditionCode>(), Ok(ConditionCode::Used));
    assert!("mint".parse::<ConditionCode>().is_err());
}

#[test]
fn condition_codes_match_marketplace_values() {
    assert_eq!(ConditionCode::New.code(), 1000);
    assert_eq!(ConditionCode::OpenBox.code(), 1500);
    assert_eq!(ConditionCode::ForParts.code(), 7000);
}
