use strata_interval::{Component, Interval, IntervalError, Position, Relation};

/// A small library of components used across the cases.
fn lith(name: &str) -> Component {
    Component::new().with("lithology", name)
}

// ---------------------------------------------------------------------------
// 1. union_spans_min_top_max_base
// ---------------------------------------------------------------------------
#[test]
fn union_spans_min_top_max_base() {
    let cases = [
        ((0.0, 10.0), (5.0, 15.0)),
        ((0.0, 10.0), (2.0, 8.0)),
        ((0.0, 10.0), (10.0, 20.0)),
        ((3.0, 7.0), (0.0, 20.0)),
    ];
    for ((at, ab), (bt, bb)) in cases {
        let a = Interval::new(at, ab).with_component(lith("a"));
        let b = Interval::new(bt, bb).with_component(lith("b"));
        let u = a.union(&b).unwrap();
        assert_eq!(u.top().value(), at.min(bt), "top of {at}-{ab} u {bt}-{bb}");
        assert_eq!(u.base().value(), ab.max(bb), "base of {at}-{ab} u {bt}-{bb}");
    }
}

// ---------------------------------------------------------------------------
// 2. union_is_commutative_on_the_range
// ---------------------------------------------------------------------------
#[test]
fn union_is_commutative_on_the_range() {
    let a = Interval::new(0.0, 10.0).with_component(lith("a"));
    let b = Interval::new(5.0, 15.0).with_component(lith("b"));
    let ab = a.union(&b).unwrap();
    let ba = b.union(&a).unwrap();
    assert_eq!(ab.top(), ba.top());
    assert_eq!(ab.base(), ba.base());
    // Component order differs (self first), content does not.
    assert_eq!(ab.components().len(), ba.components().len());
}

// ---------------------------------------------------------------------------
// 3. intersect_within_both_inputs
// ---------------------------------------------------------------------------
#[test]
fn intersect_within_both_inputs() {
    let a = Interval::new(0.0, 10.0).with_component(lith("a"));
    let b = Interval::new(4.0, 20.0).with_component(lith("b"));
    let i = a.intersect(&b).unwrap();
    assert!(i.top().value() >= a.top().value());
    assert!(i.top().value() >= b.top().value());
    assert!(i.base().value() <= a.base().value());
    assert!(i.base().value() <= b.base().value());
    assert_eq!(i.top().value(), 4.0);
    assert_eq!(i.base().value(), 10.0);
}

// ---------------------------------------------------------------------------
// 4. difference_and_union_are_consistent
// ---------------------------------------------------------------------------
#[test]
fn difference_and_union_are_consistent() {
    let a = Interval::new(0.0, 20.0).with_component(lith("a"));
    let b = Interval::new(5.0, 12.0).with_component(lith("b"));
    let pieces = a.difference(&b);
    let covered: f64 = pieces.iter().map(Interval::thickness).sum();
    let overlap = a.intersect(&b).unwrap().thickness();
    // difference + intersection partitions a's thickness.
    assert!((covered + overlap - a.thickness()).abs() < 1e-12);
}

// ---------------------------------------------------------------------------
// 5. disjoint_union_is_a_kinded_error
// ---------------------------------------------------------------------------
#[test]
fn disjoint_union_is_a_kinded_error() {
    let a = Interval::new(0.0, 1.0);
    let b = Interval::new(5.0, 6.0);
    match a.union(&b) {
        Err(IntervalError::DisjointIntervals {
            a_top,
            a_base,
            b_top,
            b_base,
        }) => {
            assert_eq!((a_top, a_base), (0.0, 1.0));
            assert_eq!((b_top, b_base), (5.0, 6.0));
        }
        other => panic!("expected DisjointIntervals, got {other:?}"),
    }
}

// ---------------------------------------------------------------------------
// 6. zero_thickness_convention_is_uniform
// ---------------------------------------------------------------------------
#[test]
fn zero_thickness_convention_is_uniform() {
    let host = Interval::new(0.0, 10.0).with_component(lith("host"));
    let inside = Interval::point(5.0);
    let edge = Interval::point(10.0);

    // Strictly-inside points overlap; edge points only touch.
    assert!(inside.overlaps(&host));
    assert!(!edge.overlaps(&host));
    assert!(edge.touches(&host));

    // The same convention drives intersect.
    assert!(inside.intersect(&host).is_some());
    assert!(edge.intersect(&host).is_none());
}

// ---------------------------------------------------------------------------
// 7. split_then_union_roundtrip
// ---------------------------------------------------------------------------
#[test]
fn split_then_union_roundtrip() {
    let src = Interval::new(0.0, 10.0).with_component(lith("sandstone"));
    let (upper, lower) = src.split_at(4.0).unwrap();
    assert!(upper.touches(&lower));
    let back = upper.union(&lower).unwrap();
    assert_eq!(back.top().value(), 0.0);
    assert_eq!(back.base().value(), 10.0);
    assert_eq!(back.components(), src.components());
}

// ---------------------------------------------------------------------------
// 8. relation_is_antisymmetric
// ---------------------------------------------------------------------------
#[test]
fn relation_is_antisymmetric() {
    let outer = Interval::new(0.0, 20.0);
    let inner = Interval::new(5.0, 10.0);
    assert_eq!(outer.relation(&inner), Relation::Contains);
    assert_eq!(inner.relation(&outer), Relation::ContainedBy);
}

// ---------------------------------------------------------------------------
// 9. positions_with_uncertainty_survive_the_algebra
// ---------------------------------------------------------------------------
#[test]
fn positions_with_uncertainty_survive_the_algebra() {
    let top = Position::with_bounds(10.0, 9.0, 11.0).unwrap();
    let base = Position::with_bounds(20.0, 19.5, 20.5).unwrap();
    let a = Interval::from_positions(top, base).with_component(lith("a"));
    let b = Interval::new(15.0, 30.0).with_component(lith("b"));

    let u = a.union(&b).unwrap();
    assert_eq!(u.top().uncertainty(), 2.0);
    // The deeper base came from b, with degenerate bounds.
    assert_eq!(u.base().uncertainty(), 0.0);
}

// ---------------------------------------------------------------------------
// 10. component_dedup_in_union
// ---------------------------------------------------------------------------
#[test]
fn component_dedup_in_union() {
    let sst = lith("sandstone");
    let a = Interval::new(0.0, 10.0)
        .with_component(sst.clone())
        .with_component(lith("shale"));
    let b = Interval::new(5.0, 15.0)
        .with_component(sst.clone())
        .with_component(lith("coal"));
    let u = a.union(&b).unwrap();
    assert_eq!(
        u.components(),
        &[sst, lith("shale"), lith("coal")],
        "duplicates removed, first-seen order kept"
    );
}
