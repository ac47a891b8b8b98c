use casemap_core::{
    builtin_reference_table, nearest_town, GeoPoint, ReferenceTable, ResolveError, Town,
};

fn scenario_table() -> ReferenceTable {
    ReferenceTable::new(vec![
        Town::new(1, "Cape Town", -33.9249, 18.4241, 120_000),
        Town::new(2, "Johannesburg", -26.2041, 28.0473, 140_000),
        Town::new(3, "Durban", -29.8587, 31.0218, 90_000),
    ])
    .unwrap()
}

#[test]
fn resolved_town_is_always_a_table_member() {
    let table = builtin_reference_table();
    let probes = [
        GeoPoint::new(0.0, 0.0),
        GeoPoint::new(-33.9, 18.4),
        GeoPoint::new(-90.0, 180.0),
        GeoPoint::new(90.0, -180.0),
        GeoPoint::new(-28.5, 25.0),
        GeoPoint::new(1e6, -1e6),
    ];

    for point in probes {
        let town = nearest_town(table.towns(), point).unwrap();
        assert!(
            table.towns().iter().any(|member| member.id == town.id),
            "resolved town {} is not part of the table",
            town.id
        );
    }
}

#[test]
fn exact_town_coordinate_resolves_to_that_town() {
    let table = scenario_table();

    for expected in table.towns() {
        let town = nearest_town(table.towns(), GeoPoint::new(expected.lat, expected.lon)).unwrap();
        assert_eq!(town.id, expected.id);
    }
}

#[test]
fn point_near_cape_town_resolves_to_cape_town() {
    let table = scenario_table();

    let town = nearest_town(table.towns(), GeoPoint::new(-33.9, 18.4)).unwrap();
    assert_eq!(town.id, 1);
    assert_eq!(town.name, "Cape Town");
}

#[test]
fn ties_resolve_to_first_town_in_table_order() {
    let table = ReferenceTable::new(vec![
        Town::new(10, "North", 1.0, 0.0, 1_000),
        Town::new(20, "South", -1.0, 0.0, 1_000),
    ])
    .unwrap();

    let town = nearest_town(table.towns(), GeoPoint::new(0.0, 0.0)).unwrap();
    assert_eq!(town.id, 10);
}

#[test]
fn empty_town_slice_fails_explicitly() {
    let err = nearest_town(&[], GeoPoint::new(-33.9, 18.4)).unwrap_err();
    assert_eq!(err, ResolveError::EmptyReferenceTable);
}
