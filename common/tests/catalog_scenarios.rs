use common::catalog::RestaurantCatalog;
use common::proximity::parse_radius;
use common::types::coordinate::Coordinate;
use common::utils::distance_meters;

fn gulberg() -> Coordinate {
    Coordinate::new(31.5204, 74.3587).unwrap()
}

#[test]
fn test_growing_radius_never_drops_a_restaurant() {
    let catalog = RestaurantCatalog::bundled().unwrap();
    let mut previous: Vec<String> = Vec::new();
    for radius in ["0.5", "1", "2.5", "5", "10", "25", "100"] {
        let names: Vec<String> = catalog
            .nearby(gulberg(), parse_radius(radius).unwrap())
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert!(previous.iter().all(|name| names.contains(name)), "radius {}", radius);
        previous = names;
    }
    assert_eq!(previous.len(), catalog.len());
}

#[test]
fn test_every_match_is_within_the_radius() {
    let catalog = RestaurantCatalog::bundled().unwrap();
    let radius = parse_radius("5").unwrap();
    let nearby = catalog.nearby(gulberg(), radius);
    for restaurant in catalog.restaurants() {
        let distance = distance_meters(gulberg(), restaurant.position.unwrap());
        assert_eq!(
            nearby.contains(restaurant),
            distance <= radius.meters(),
            "{} at {} m",
            restaurant.name,
            distance
        );
    }
}

#[actix_rt::test]
async fn test_catalog_file_replaces_bundled_data() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("restaurants.json");
    std::fs::write(
        &path,
        r#"[{"name": "Only One", "address": "Model Town", "latitude": "31.4805", "longitude": "74.3239"}]"#,
    )
    .unwrap();

    let catalog = RestaurantCatalog::load(&path).await.unwrap();
    assert_eq!(catalog.len(), 1);
    assert_eq!(catalog.get(0).unwrap().name, "Only One");
    assert!(catalog.nearby(gulberg(), parse_radius("10").unwrap()).len() == 1);
}
