//! End-to-end resolution over catalogs built from YAML rows.

use labelmatch_core::{
    parse_catalog, BranchRow, LocalityRow, RawAddressRecord, Scalar, ShipmentType,
};
use labelmatch_engine::{
    annotate_batch, normalize, resolve_branch, resolve_locality, AddressQuery, BranchIndex,
    CatalogIndex, LocalityIndex, MatchOutcome, MatchStatus, BRANCH_SUGGESTION_LIMIT,
    LOCALITY_SUGGESTION_LIMIT,
};

fn branches(rows: &[(&str, &str)]) -> BranchIndex {
    let rows: Vec<BranchRow> = rows
        .iter()
        .map(|(name, address)| BranchRow {
            name: Some(Scalar::from(*name)),
            address: Some(Scalar::from(*address)),
        })
        .collect();
    BranchIndex::build(&rows)
}

fn localities(rows: &[&str]) -> LocalityIndex {
    let rows: Vec<LocalityRow> = rows
        .iter()
        .map(|value| LocalityRow {
            value: Some(Scalar::from(*value)),
        })
        .collect();
    LocalityIndex::build(&rows)
}

// -----------------------------------------------------------------------
// normalize
// -----------------------------------------------------------------------

#[test]
fn normalize_is_accent_insensitive_and_idempotent() {
    assert_eq!(normalize("Córdoba"), normalize("CORDOBA"));
    let once = normalize("  Ciudad Autónoma de Bs. As., Nuñez ");
    assert_eq!(normalize(&once), once);
}

// -----------------------------------------------------------------------
// branch resolver
// -----------------------------------------------------------------------

#[test]
fn single_branch_resolves_by_street_and_number() {
    let idx = branches(&[("Sucursal Centro", "Av. Corrientes 1234")]);
    let outcome = resolve_branch(&idx, &AddressQuery::street("Corrientes", "1234"));
    assert!(outcome.is_resolved());
    assert_eq!(outcome.matched(), Some("Sucursal Centro"));
}

#[test]
fn unmatched_number_returns_all_candidates_in_catalog_order() {
    let idx = branches(&[
        ("Sucursal Corrientes 100", "Corrientes 100"),
        ("Sucursal Corrientes 200", "Corrientes 200"),
    ]);
    let outcome = resolve_branch(&idx, &AddressQuery::street("Corrientes", "999"));
    assert_eq!(
        outcome,
        MatchOutcome::Ambiguous(vec![
            "Sucursal Corrientes 100".to_owned(),
            "Sucursal Corrientes 200".to_owned(),
        ])
    );
}

#[test]
fn caba_query_keeps_only_capital_branches() {
    let idx = branches(&[
        ("Sucursal La Plata", "Buenos Aires / Calle 7 1000"),
        ("Sucursal Palermo", "Ciudad Autónoma de Buenos Aires / Santa Fe 3253"),
        ("Sucursal Quilmes", "Buenos Aires / Rivadavia 300"),
        ("Sucursal Belgrano", "Ciudad Autonoma de Buenos Aires / Cabildo 2000"),
    ]);
    // The street phrase "BUENOS AIRES" appears in every address, so the
    // province filter alone decides which branches are offered.
    let query = AddressQuery::street("Buenos Aires", "1").with_province("CABA");
    let outcome = resolve_branch(&idx, &query);
    assert_eq!(
        outcome.suggestions(),
        &["Sucursal Palermo".to_owned(), "Sucursal Belgrano".to_owned()]
    );
}

#[test]
fn empty_street_is_unresolved() {
    let idx = branches(&[("Sucursal Centro", "Av. Corrientes 1234")]);
    for street in ["", "   ", " ., "] {
        let outcome = resolve_branch(&idx, &AddressQuery::street(street, "1234"));
        assert_eq!(outcome, MatchOutcome::Unresolved);
        assert!(outcome.suggestions().is_empty());
    }
}

#[test]
fn phrase_miss_empties_working_set_even_with_province_matches() {
    // Regression: both branches survive the province filter, but the street
    // phrase matches neither. The resolver must not fall back to the
    // province-filtered set.
    let idx = branches(&[
        ("Sucursal Mendoza Centro", "Mendoza / San Martin 1200"),
        ("Sucursal Godoy Cruz", "Mendoza / San Martin Sur 450"),
    ]);
    let query = AddressQuery::street("Avenida Las Heras", "1200")
        .with_city("Mendoza")
        .with_province("Mendoza");
    assert_eq!(resolve_branch(&idx, &query), MatchOutcome::Unresolved);
}

#[test]
fn branch_suggestions_are_capped_in_catalog_order() {
    let names: Vec<String> = (0..25).map(|i| format!("Sucursal Belgrano {i:02}")).collect();
    let rows: Vec<(&str, &str)> = names.iter().map(|n| (n.as_str(), "Belgrano 500")).collect();
    let idx = branches(&rows);
    let outcome = resolve_branch(&idx, &AddressQuery::street("Belgrano", "999"));
    let suggestions = outcome.suggestions();
    assert_eq!(suggestions.len(), BRANCH_SUGGESTION_LIMIT);
    assert_eq!(suggestions, &names[..BRANCH_SUGGESTION_LIMIT]);
}

// -----------------------------------------------------------------------
// locality resolver
// -----------------------------------------------------------------------

#[test]
fn decimal_postal_code_resolves_on_first_stage() {
    let idx = localities(&["Buenos Aires / La Plata / 1900", "Buenos Aires / Berisso / 1923"]);
    let query = AddressQuery::default()
        .with_postal_code("1900.0")
        .with_locality("Something Else Entirely")
        .with_city("Otra Ciudad");
    assert_eq!(
        resolve_locality(&idx, &query).matched(),
        Some("Buenos Aires / La Plata / 1900")
    );
}

#[test]
fn locality_suggestions_are_capped_in_catalog_order() {
    let rows: Vec<String> = (0..12).map(|i| format!("Salta / Paraje {i:02} / 4400")).collect();
    let refs: Vec<&str> = rows.iter().map(String::as_str).collect();
    let idx = localities(&refs);
    let outcome = resolve_locality(&idx, &AddressQuery::default().with_postal_code("4400"));
    assert_eq!(outcome.suggestions().len(), LOCALITY_SUGGESTION_LIMIT);
    assert_eq!(outcome.suggestions(), &rows[..LOCALITY_SUGGESTION_LIMIT]);
}

// -----------------------------------------------------------------------
// full pipeline
// -----------------------------------------------------------------------

const CATALOG_YAML: &str = r#"
branches:
  - name: "Sucursal Centro"
    address: "Capital Federal / Av. Corrientes 1234"
  - name: "Sucursal Once"
    address: "Capital Federal / Av. Pueyrredón 50"
  - address: "row without a name is skipped"
localities:
  - value: "Buenos Aires / La Plata / 1900"
  - value: "Capital Federal / Ciudad Autonoma Buenos Aires / 1000"
  - value: null
"#;

#[test]
fn catalog_yaml_to_batch_report() {
    let catalog = parse_catalog(CATALOG_YAML).unwrap();
    let index = CatalogIndex::build(&catalog);
    assert_eq!(index.branches.len(), 2);
    assert_eq!(index.localities.len(), 2);

    let records: Vec<RawAddressRecord> = serde_json::from_str(
        r#"[
            {"order_number": 2, "shipment_type": "pickup", "street": "Pueyrredon", "house_number": "50", "province": "CABA"},
            {"order_number": 1, "shipment_type": "home_delivery", "postal_code": 1900.0, "locality": "La Plata"},
            {"order_number": 3, "shipment_type": "pickup", "street": "Santa Fe", "house_number": "S/N"}
        ]"#,
    )
    .unwrap();

    let report = annotate_batch(&index, &records);
    assert_eq!(report.summary.total, 3);
    assert_eq!(report.summary.needs_review, 1);

    let first = &report.records[0];
    assert_eq!(first.shipment_type, ShipmentType::HomeDelivery);
    assert_eq!(first.match_value, "Buenos Aires / La Plata / 1900");

    let once = &report.records[1];
    assert_eq!(once.match_value, "Sucursal Once");
    assert_eq!(once.status, MatchStatus::Ok);

    let unknown = &report.records[2];
    assert_eq!(unknown.status, MatchStatus::Missing);
    assert!(unknown.suggestions.is_empty());

    assert_eq!(report.catalog.branches[1].context, "CAPITAL FEDERAL / AV PUEYRREDON 50");
    assert_eq!(report.catalog.localities[1].province, "CAPITAL FEDERAL");
}

#[test]
fn catalog_index_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<CatalogIndex>();

    let index = std::sync::Arc::new(CatalogIndex::build(&parse_catalog(CATALOG_YAML).unwrap()));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let index = std::sync::Arc::clone(&index);
            std::thread::spawn(move || {
                resolve_branch(&index.branches, &AddressQuery::street("Corrientes", "1234"))
                    .matched()
                    .map(str::to_owned)
            })
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap().as_deref(), Some("Sucursal Centro"));
    }
}
