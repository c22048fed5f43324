use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rust_decimal::Decimal;
use stockzy::models::Product;
use stockzy::queries::{
    query, ProductFilter, ProductFilterParams, SortDirection, SortKey, StockStatusFilter,
};

const NAMES: [&str; 4] = ["Alpha", "Beta", "Gamma", "Delta"];
const CATEGORIES: [&str; 3] = ["Electronics", "Furniture", "Kitchen"];

fn product(id: usize, name: &str, sku: &str, quantity: u32, threshold: u32) -> Product {
    let created = Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap();
    Product {
        id: format!("p{}", id),
        name: name.to_string(),
        sku: sku.to_string(),
        description: format!("{} description", name),
        category: "Electronics".to_string(),
        price: Decimal::from(10 + id as u64),
        cost_price: Decimal::from(5),
        stock_quantity: quantity,
        min_stock_level: threshold,
        supplier: "Supplier 1".to_string(),
        created_at: created,
        updated_at: created,
    }
}

fn widgets() -> Vec<Product> {
    vec![
        product(1, "Widget A", "SKU-1", 0, 5),
        product(2, "Widget B", "SKU-2", 3, 5),
        product(3, "Gadget", "SKU-3", 20, 5),
    ]
}

fn names(products: &[Product]) -> Vec<&str> {
    products.iter().map(|p| p.name.as_str()).collect()
}

#[test]
fn low_stock_selector_keeps_only_low_products() {
    let filter = ProductFilter {
        search: String::new(),
        category: String::new(),
        stock_status: StockStatusFilter::LowStock,
        sort_by: Some(SortKey::Name),
        sort_direction: SortDirection::Asc,
    };
    assert_eq!(names(&query(&widgets(), &filter)), vec!["Widget B"]);
}

#[test]
fn out_of_stock_selector_keeps_only_empty_products() {
    let filter = ProductFilter::default().with_stock_status(StockStatusFilter::OutOfStock);
    assert_eq!(names(&query(&widgets(), &filter)), vec!["Widget A"]);
}

#[test]
fn search_ignores_case() {
    for needle in ["gadget", "GADGET", "GaDgEt"] {
        let filter = ProductFilter::default().with_search(needle);
        assert_eq!(names(&query(&widgets(), &filter)), vec!["Gadget"]);
    }
}

#[test]
fn search_matches_sku_and_description() {
    let by_sku = ProductFilter::default().with_search("sku-2");
    assert_eq!(names(&query(&widgets(), &by_sku)), vec!["Widget B"]);

    let by_description = ProductFilter::default().with_search("a description");
    assert_eq!(names(&query(&widgets(), &by_description)), vec!["Widget A"]);
}

#[test]
fn empty_input_gives_empty_output() {
    assert!(query(&[], &ProductFilter::default()).is_empty());
}

#[test]
fn unmatched_category_gives_empty_output() {
    let filter = ProductFilter::default().with_category("Garden");
    assert!(query(&widgets(), &filter).is_empty());
}

#[test]
fn all_category_is_no_constraint() {
    let filter = ProductFilter::default().with_category("all");
    assert_eq!(query(&widgets(), &filter).len(), 3);
}

#[test]
fn stages_compose() {
    let mut products = widgets();
    products.push(product(4, "Widget C", "SKU-4", 2, 5));
    products[3].category = "Furniture".to_string();

    let filter = ProductFilter::default()
        .with_search("widget")
        .with_category("Electronics")
        .with_stock_status(StockStatusFilter::LowStock)
        .sorted_by(SortKey::Stock, SortDirection::Desc);
    assert_eq!(names(&query(&products, &filter)), vec!["Widget B"]);
}

#[test]
fn sorting_by_each_key() {
    let products = widgets();
    let ids = |filter: &ProductFilter| -> Vec<String> {
        query(&products, filter).into_iter().map(|p| p.id).collect()
    };

    assert_eq!(
        ids(&ProductFilter::default().sorted_by(SortKey::Name, SortDirection::Asc)),
        vec!["p3", "p1", "p2"]
    );
    assert_eq!(
        ids(&ProductFilter::default().sorted_by(SortKey::Sku, SortDirection::Desc)),
        vec!["p3", "p2", "p1"]
    );
    assert_eq!(
        ids(&ProductFilter::default().sorted_by(SortKey::Stock, SortDirection::Desc)),
        vec!["p3", "p2", "p1"]
    );
    assert_eq!(
        ids(&ProductFilter::default().sorted_by(SortKey::Price, SortDirection::Asc)),
        vec!["p1", "p2", "p3"]
    );
}

#[test]
fn malformed_params_do_not_constrain() {
    let filter = ProductFilter::from(ProductFilterParams {
        search: None,
        category: None,
        stock_status: Some("nearly-gone".to_string()),
        sort_by: Some("colour".to_string()),
        sort_direction: Some("sideways".to_string()),
    });

    assert_eq!(filter.stock_status, StockStatusFilter::All);
    assert_eq!(filter.sort_by, None);
    assert_eq!(filter.sort_direction, SortDirection::Asc);
    assert_eq!(query(&widgets(), &filter), widgets());
}

fn catalog_strategy() -> impl Strategy<Value = Vec<Product>> {
    prop::collection::vec(
        (0..NAMES.len(), 0..CATEGORIES.len(), 0u32..30, 0u32..10, "[a-zA-Z -]{0,12}"),
        0..25,
    )
    .prop_map(|rows| {
        rows.into_iter()
            .enumerate()
            .map(|(i, (name, category, quantity, threshold, description))| {
                let mut p = product(i, NAMES[name], &format!("SKU-{}", i % 7), quantity, threshold);
                p.category = CATEGORIES[category].to_string();
                p.description = description;
                p.price = Decimal::from(quantity % 4);
                p
            })
            .collect()
    })
}

fn sort_key_strategy() -> impl Strategy<Value = SortKey> {
    prop_oneof![
        Just(SortKey::Name),
        Just(SortKey::Sku),
        Just(SortKey::Stock),
        Just(SortKey::Price),
    ]
}

fn direction_strategy() -> impl Strategy<Value = SortDirection> {
    prop_oneof![Just(SortDirection::Asc), Just(SortDirection::Desc)]
}

fn stock_filter_strategy() -> impl Strategy<Value = StockStatusFilter> {
    prop_oneof![
        Just(StockStatusFilter::All),
        Just(StockStatusFilter::InStock),
        Just(StockStatusFilter::LowStock),
        Just(StockStatusFilter::OutOfStock),
    ]
}

fn position_of(products: &[Product], id: &str) -> usize {
    products.iter().position(|p| p.id == id).unwrap()
}

// Property: an unconstrained query only reorders
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn unconstrained_query_is_a_permutation(
        products in catalog_strategy(),
        key in sort_key_strategy(),
        direction in direction_strategy(),
    ) {
        let filter = ProductFilter::default().sorted_by(key, direction);
        let result = query(&products, &filter);

        let mut expected: Vec<String> = products.iter().map(|p| p.id.clone()).collect();
        let mut actual: Vec<String> = result.iter().map(|p| p.id.clone()).collect();
        expected.sort();
        actual.sort();
        prop_assert_eq!(actual, expected);
    }

    #[test]
    fn query_is_idempotent(
        products in catalog_strategy(),
        search in "[a-z0-9]{0,2}",
        category in prop_oneof![Just(String::new()), Just("Furniture".to_string())],
        stock_status in stock_filter_strategy(),
        key in sort_key_strategy(),
        direction in direction_strategy(),
    ) {
        let filter = ProductFilter {
            search,
            category,
            stock_status,
            sort_by: Some(key),
            sort_direction: direction,
        };
        let once = query(&products, &filter);
        let twice = query(&once, &filter);
        prop_assert_eq!(twice, once);
    }
}

// Property: search keeps exactly the products containing the needle
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn search_keeps_iff_a_field_contains_the_needle(
        products in catalog_strategy(),
        search in "[a-zA-Z -]{0,3}",
    ) {
        let filter = ProductFilter {
            search: search.clone(),
            sort_by: None,
            ..ProductFilter::default()
        };
        let result = query(&products, &filter);

        let needle = search.to_lowercase();
        let expected: Vec<Product> = products
            .iter()
            .filter(|p| {
                p.name.to_lowercase().contains(&needle)
                    || p.sku.to_lowercase().contains(&needle)
                    || p.description.to_lowercase().contains(&needle)
            })
            .cloned()
            .collect();
        prop_assert_eq!(result, expected);
    }
}

// Property: equal sort keys keep their input order in both directions
proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn sort_is_stable_in_both_directions(
        products in catalog_strategy(),
        key in sort_key_strategy(),
        direction in direction_strategy(),
    ) {
        let filter = ProductFilter::default().sorted_by(key, direction);
        let result = query(&products, &filter);

        for (i, a) in result.iter().enumerate() {
            for b in &result[i + 1..] {
                let same_key = match key {
                    SortKey::Name => a.name == b.name,
                    SortKey::Sku => a.sku == b.sku,
                    SortKey::Stock => a.stock_quantity == b.stock_quantity,
                    SortKey::Price => a.price == b.price,
                };
                if same_key {
                    prop_assert!(
                        position_of(&products, &a.id) < position_of(&products, &b.id),
                        "{} and {} swapped under {:?} {:?}", a.id, b.id, key, direction
                    );
                }
            }
        }
    }
}
