mod common;

use common::{arithmetic_measure, pop_fixture, pop_measure, previous_period_measure, simple_measure};
use insight_core::{
    fill_derived_titles, ArithmeticOperator, Measure, TitleError, TitleResolver,
};

fn titles_of(resolver: &TitleResolver, measures: &[Measure]) -> Vec<Option<String>> {
    resolver
        .resolve(measures)
        .expect("resolution must succeed")
        .into_iter()
        .map(|t| t.title)
        .collect()
}

#[test]
fn pop_title_is_master_title_plus_suffix() {
    let resolver = TitleResolver::with_uniform_suffix(" - SP year ago");
    let measures = vec![
        simple_measure("m1", "# Accounts with AD Query", "/gdc/md/p/obj/8172"),
        pop_measure("m1_pop", "m1", "/gdc/md/p/obj/1514"),
    ];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles[1].as_deref(), Some("# Accounts with AD Query - SP year ago"));
}

#[test]
fn master_alias_wins_over_title_in_derived_titles() {
    let resolver = TitleResolver::with_uniform_suffix(" - prior");
    let mut master = simple_measure("m1", "# Accounts with AD Query", "/gdc/md/p/obj/8172");
    master.alias = Some("AD Queries".to_string());
    let measures = vec![master, previous_period_measure("m1_pp", "m1", "/gdc/md/p/obj/921")];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles[1].as_deref(), Some("AD Queries - prior"));
}

#[test]
fn missing_master_resolves_to_no_title() {
    let resolver = TitleResolver::default();
    let measures = vec![pop_measure("m1_pop", "m_gone", "/gdc/md/p/obj/1514")];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles, vec![None]);
}

#[test]
fn arithmetic_titles_use_operator_templates() {
    let resolver = TitleResolver::default();
    let measures = vec![
        simple_measure("m1", "Revenue", "/gdc/md/p/obj/1"),
        simple_measure("m2", "Cost", "/gdc/md/p/obj/2"),
        arithmetic_measure("m3", ArithmeticOperator::Difference, &["m1", "m2"]),
        arithmetic_measure("m4", ArithmeticOperator::Change, &["m1", "m2"]),
    ];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles[2].as_deref(), Some("Difference of Revenue and Cost"));
    assert_eq!(titles[3].as_deref(), Some("Change from Cost to Revenue"));
}

#[test]
fn arithmetic_with_single_operand_cannot_resolve() {
    let resolver = TitleResolver::default();
    let measures = vec![
        simple_measure("m1", "Revenue", "/gdc/md/p/obj/1"),
        arithmetic_measure("m3", ArithmeticOperator::Sum, &["m1"]),
    ];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles[1], None);
}

#[test]
fn multi_level_derivation_resolves_without_presorted_order() {
    // The arithmetic measure is listed before the PoP measure it depends
    // on; dependency order, not list order, drives resolution.
    let resolver = TitleResolver::with_uniform_suffix(" - last year");
    let measures = vec![
        arithmetic_measure("m3", ArithmeticOperator::Ratio, &["m1", "m1_pop"]),
        simple_measure("m1", "Revenue", "/gdc/md/p/obj/1"),
        pop_measure("m1_pop", "m1", "/gdc/md/p/obj/1514"),
    ];
    let titles = titles_of(&resolver, &measures);
    assert_eq!(titles[0].as_deref(), Some("Ratio of Revenue and Revenue - last year"));
    assert_eq!(titles[2].as_deref(), Some("Revenue - last year"));
}

#[test]
fn cyclic_derivation_is_an_explicit_error() {
    let resolver = TitleResolver::default();
    let measures = vec![
        arithmetic_measure("m1", ArithmeticOperator::Sum, &["m2", "m2"]),
        arithmetic_measure("m2", ArithmeticOperator::Sum, &["m1", "m1"]),
    ];
    let err = resolver.resolve(&measures).expect_err("cycle must be detected");
    match err {
        TitleError::CyclicDerivation { members } => {
            assert!(members.contains(&"m1".to_string()));
            assert!(members.contains(&"m2".to_string()));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(
        resolver.resolve(&measures).expect_err("stable").code(),
        "INSIGHT_TITLE_001"
    );
}

#[test]
fn duplicate_local_identifiers_are_rejected() {
    let resolver = TitleResolver::default();
    let measures = vec![
        simple_measure("m1", "A", "/gdc/md/p/obj/1"),
        simple_measure("m1", "B", "/gdc/md/p/obj/2"),
    ];
    let err = resolver.resolve(&measures).expect_err("duplicate must be rejected");
    assert_eq!(err.code(), "INSIGHT_TITLE_002");
}

#[test]
fn fill_derived_titles_on_the_pop_fixture() {
    let vis = pop_fixture();
    let filled = fill_derived_titles(&vis, " - testing pop title").expect("fixture resolves");

    let pop = filled
        .measure_by_local_identifier("m1_pop")
        .expect("m1_pop present");
    assert_eq!(
        pop.title.as_deref(),
        Some("# Accounts with AD Query - testing pop title")
    );

    let previous = filled
        .measure_by_local_identifier("m1_previous_period")
        .expect("m1_previous_period present");
    assert_eq!(
        previous.title.as_deref(),
        Some("# Accounts with AD Query - testing pop title")
    );

    // The master keeps its own title.
    let master = filled.measure_by_local_identifier("m1").expect("m1 present");
    assert_eq!(master.title.as_deref(), Some("# Accounts with AD Query"));
}

#[test]
fn fill_derived_titles_keeps_explicit_titles() {
    let mut vis = pop_fixture();
    // Give the PoP measure an explicit title; filling must not clobber it.
    for bucket in &mut vis.buckets {
        for item in &mut bucket.items {
            if let insight_core::BucketItem::Measure(measure) = item {
                if measure.local_identifier == "m1_pop" {
                    measure.title = Some("Custom".to_string());
                }
            }
        }
    }
    let filled = fill_derived_titles(&vis, " - suffix").expect("fixture resolves");
    assert_eq!(
        filled
            .measure_by_local_identifier("m1_pop")
            .expect("m1_pop present")
            .title
            .as_deref(),
        Some("Custom")
    );
}
