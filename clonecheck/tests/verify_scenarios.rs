//! End-to-end verification runs against correct and broken copy functions.
//!
//! Each test builds a `Verifier` for one of the `test_support` records and
//! checks which failure, if any, the run reports.

use std::cell::RefCell;
use std::rc::Rc;

use clonecheck::test_support::{Config, Flag, IntList, SharedConfig};
use clonecheck::{FillError, Verifier, VerifierConfig, VerifyError, impl_record, logging};

#[derive(Debug, Clone, Default, PartialEq)]
struct Strings {
    s: Vec<String>,
}

impl_record!(Strings { s });

#[test]
fn deep_copy_of_shared_sequence_passes() {
    logging::init();
    let verifier = Verifier::new(IntList::default, |orig: &IntList| IntList {
        s: Rc::new(RefCell::new(orig.s.borrow().clone())),
    });
    verifier.verify().expect("deep copy verifies");
}

/// Reusing the original's storage makes the clone's edit visible on the original.
#[test]
fn shared_sequence_reports_orig_changed() {
    logging::init();
    let verifier = Verifier::new(IntList::default, |orig: &IntList| IntList {
        s: Rc::clone(&orig.s),
    });
    let err = verifier.verify().expect_err("aliasing detected");
    assert!(
        matches!(&err, VerifyError::OrigChanged { field, .. } if field == "s"),
        "unexpected error: {err}"
    );
}

#[test]
fn unsupported_field_reports_orig_fill() {
    let verifier = Verifier::new(Flag::default, Flag::clone);
    let err = verifier.verify().expect_err("bool is unsupported");
    assert!(
        matches!(
            &err,
            VerifyError::OrigFill(FillError::Unsupported {
                field: "b",
                type_name: "bool"
            })
        ),
        "unexpected error: {err}"
    );
}

/// Allocating new storage without copying the items is caught before any edit.
#[test]
fn empty_copy_reports_clone_orig_not_equal() {
    let verifier = Verifier::new(Strings::default, |orig: &Strings| Strings {
        s: Vec::with_capacity(orig.s.len()),
    });
    let err = verifier.verify().expect_err("items were not copied");
    assert!(
        matches!(err, VerifyError::CloneOrigNotEqual { .. }),
        "unexpected error: {err}"
    );
}

#[test]
fn auto_change_reports_missing_field() {
    let verifier = Verifier::new(Strings::default, Strings::clone);
    let mut record = verifier.auto_fill().expect("fill");
    let err = verifier
        .auto_change(&mut record, "missing")
        .expect_err("no such field");
    assert!(
        matches!(&err, VerifyError::FieldNotFound { field, .. } if field == "missing"),
        "unexpected error: {err}"
    );
}

/// The derived `Clone` of an owned-only record is already a deep copy.
#[test]
fn owned_record_with_derived_clone_passes() {
    Verifier::new(Config::default, Config::clone)
        .verify()
        .expect("derived clone verifies");
}

#[test]
fn mixed_record_deep_clone_passes() {
    Verifier::new(SharedConfig::default, SharedConfig::deep_clone)
        .verify()
        .expect("deep clone verifies");
}

/// A shallow copy fails on the first shared field in declaration order.
#[test]
fn shallow_clone_fails_on_first_shared_field() {
    let err = Verifier::new(SharedConfig::default, SharedConfig::clone)
        .verify()
        .expect_err("shallow copy");
    assert!(
        matches!(err, VerifyError::OrigChanged { .. } | VerifyError::CloneOrigEqual { .. }),
        "unexpected error: {err}"
    );
    assert_eq!(err.field(), Some("int_list"));
}

#[test]
fn forgotten_field_is_named() {
    let err = Verifier::new(SharedConfig::default, SharedConfig::clone_sharing_map)
        .verify()
        .expect_err("map is shared");
    assert!(matches!(err, VerifyError::OrigChanged { .. }));
    assert_eq!(err.field(), Some("map_vals"));
    assert!(err.to_string().contains("\"map_vals\""));
}

#[test]
fn dropped_items_report_clone_orig_not_equal() {
    let err = Verifier::new(SharedConfig::default, SharedConfig::clone_dropping_strings)
        .verify()
        .expect_err("strings were not copied");
    assert!(matches!(err, VerifyError::CloneOrigNotEqual { .. }));
    assert_eq!(err.field(), None);
}

/// Two fills from fresh generator chains are equal.
#[test]
fn auto_fill_is_deterministic() {
    let verifier = Verifier::new(SharedConfig::default, SharedConfig::deep_clone);
    let first = verifier.auto_fill().expect("first fill");
    let second = verifier.auto_fill().expect("second fill");
    assert_eq!(first, second);
    assert_ne!(first, SharedConfig::default());
}

/// Internal fields keep the value the creator gave them.
#[test]
fn auto_fill_skips_internal_fields() {
    let verifier = Verifier::new(
        || SharedConfig {
            hidden: true,
            ..SharedConfig::default()
        },
        SharedConfig::deep_clone,
    );
    let record = verifier.auto_fill().expect("fill");
    assert!(record.hidden);
    assert_eq!(record._scratch, None);
    assert!(!record.int_list.borrow().is_empty());

    let mut record = record;
    let err = verifier
        .auto_change(&mut record, "hidden")
        .expect_err("internal field is not reachable");
    assert!(matches!(err, VerifyError::FieldNotFound { .. }));
}

#[test]
fn tuned_config_still_verifies() {
    let config = VerifierConfig {
        mutation_factor: -3,
        seed: 5,
    };
    let verifier = Verifier::new(SharedConfig::default, SharedConfig::deep_clone)
        .with_config(config.clone())
        .expect("valid config");
    assert_eq!(verifier.config(), &config);
    verifier.verify().expect("deep clone verifies");

    let err = Verifier::new(SharedConfig::default, SharedConfig::clone)
        .with_config(config)
        .expect("valid config")
        .verify()
        .expect_err("shallow copy");
    assert_eq!(err.field(), Some("int_list"));
}

#[test]
fn invalid_config_is_rejected() {
    let config = VerifierConfig {
        mutation_factor: 1,
        ..VerifierConfig::default()
    };
    assert!(
        Verifier::new(Config::default, Config::clone)
            .with_config(config)
            .is_err()
    );
}

/// A seed past the bound is rejected before any fill allocates for it.
#[test]
fn oversized_seed_is_rejected() {
    let config = VerifierConfig {
        seed: 1 << 62,
        ..VerifierConfig::default()
    };
    let err = Verifier::new(Config::default, Config::clone)
        .with_config(config)
        .expect_err("seed too large");
    assert!(err.to_string().contains("seed"));
}
