use menufit_catalog::{fallback_catalog, Catalog, Category, MenuItem, MenuSize};
use menufit_features::{FeatureError, FeatureSet, VectorizerConfig};
use proptest::prelude::*;

fn item(id: usize, name: &str, category: Category, popularity: f64, size: MenuSize) -> MenuItem {
    MenuItem {
        menu_id: id.to_string(),
        restaurant_id: "1".into(),
        name: name.into(),
        category_label: category.label().to_string(),
        category,
        price: 10000,
        size,
        popularity_score: popularity,
    }
}

fn small_catalog() -> Catalog {
    Catalog::new(
        vec![
            item(1, "kimchi stew", Category::Korean, 2.0, MenuSize::new(18.0, 18.0, 7.0)),
            item(2, "kimchi fried rice", Category::Korean, 8.0, MenuSize::new(20.0, 15.0, 5.0)),
            item(3, "sushi platter", Category::Japanese, 5.0, MenuSize::new(25.0, 12.0, 4.0)),
            item(4, "pasta", Category::Western, 10.0, MenuSize::new(16.0, 16.0, 6.0)),
        ],
        Vec::new(),
    )
}

#[test]
fn empty_catalog_fails_preparation() {
    let err = FeatureSet::prepare(&Catalog::default(), VectorizerConfig::default()).unwrap_err();
    assert_eq!(err, FeatureError::EmptyCatalog);
}

#[test]
fn prepares_all_feature_groups() {
    let features = FeatureSet::prepare(&small_catalog(), VectorizerConfig::default()).unwrap();
    assert_eq!(features.len(), 4);
    assert_eq!(features.content_dimension(), 50);
    assert_eq!(features.normalized_popularity(0), Some(0.0));
    assert_eq!(features.normalized_popularity(3), Some(1.0));
    assert!(features.normalized_size(4).is_none());

    let heights: Vec<f64> = (0..4)
        .map(|idx| features.normalized_size(idx).unwrap()[2])
        .collect();
    let mean: f64 = heights.iter().sum::<f64>() / 4.0;
    assert!(mean.abs() < 1e-9);
}

#[test]
fn similar_items_share_text() {
    let features = FeatureSet::prepare(&small_catalog(), VectorizerConfig::default()).unwrap();
    let nearest = features.similar(0, 1);
    assert_eq!(nearest, vec![1], "the other kimchi dish is closest");
    assert_eq!(features.similar(0, 5).len(), 3);
}

proptest! {
    #[test]
    fn similar_never_returns_self(idx in 0usize..100, k in 0usize..10) {
        let catalog = fallback_catalog();
        let features = FeatureSet::prepare(&catalog, VectorizerConfig::default()).unwrap();
        let similar = features.similar(idx, k);
        prop_assert_eq!(similar.len(), k);
        prop_assert!(!similar.contains(&idx));
    }
}
