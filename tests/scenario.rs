use bdd_order::error::Error;
use bdd_order::expr::{from_fn, BooleanFunction, Expression};
use bdd_order::ordering::VarOrder;
use bdd_order::reference::Ref;
use bdd_order::search::SearchConfig;
use bdd_order::store::NodeStore;

use test_log::test;

#[test]
fn test_ab_or_c_truth_table() {
    let mut store = NodeStore::default();
    let d = store.create("AB+C", "ABC").unwrap();

    let table = [
        ("000", false),
        ("001", true),
        ("010", false),
        ("011", true),
        ("100", false),
        ("101", true),
        ("110", true),
        ("111", true),
    ];
    for (input, expected) in table {
        assert_eq!(d.evaluate(input), Ok(expected), "input {}", input);
    }

    // A at the root, B below its 1-branch, C shared by both remaining paths.
    assert_eq!(d.size(), 3);
    assert_eq!(d.num_vars(), 3);
    assert!(d.store().num_nodes() >= d.size());
}

#[test]
fn test_ab_or_c_structure() {
    let mut store = NodeStore::default();
    let d = store.create("AB+C", "ABC").unwrap();
    let s = d.store();

    let a = s.node(d.root()).unwrap();
    assert_eq!(a.variable, 0);
    let c = s.node(a.low).unwrap();
    assert_eq!((c.variable, c.low, c.high), (2, Ref::ZERO, Ref::ONE));
    let b = s.node(a.high).unwrap();
    assert_eq!(b.variable, 1);
    assert_eq!(b.low, a.low, "C must be shared");
    assert_eq!(b.high, Ref::ONE);
}

#[test]
fn test_structural_sharing_across_diagrams() {
    let store = NodeStore::default();
    let order = VarOrder::identity(4);

    // Both functions reduce to C ∧ D once A and B are fixed to 0.
    let f: Expression = "AB+CD".parse().unwrap();
    let g: Expression = "A!B+CD".parse().unwrap();
    let h: Expression = "CD".parse().unwrap();

    let df = store.build(&f, &order).unwrap();
    let dg = store.build(&g, &order).unwrap();
    let dh = store.build(&h, &order).unwrap();

    let cd = dh.root();
    let low_f = store.low(df.root()).unwrap();
    let low_g = store.low(dg.root()).unwrap();
    assert_eq!(low_f, cd);
    assert_eq!(low_g, cd);

    // Rebuilding in the same session allocates nothing new.
    let nodes = store.num_nodes();
    let again = store.build(&f, &order).unwrap();
    assert_eq!(again.root(), df.root());
    assert_eq!(store.num_nodes(), nodes);
}

#[test]
fn test_combining_built_diagrams() {
    let store = NodeStore::default();
    let order = VarOrder::identity(3);
    let ab = store.build(&"AB".parse::<Expression>().unwrap(), &order).unwrap();
    let c = store.build(&"C".parse::<Expression>().unwrap(), &order).unwrap();
    let both = store.build(&"AB+C".parse::<Expression>().unwrap(), &order).unwrap();

    assert_eq!(store.apply_or(ab.root(), c.root()).unwrap(), both.root());
}

#[test]
fn test_session_isolation() {
    let mut store = NodeStore::default();
    let (stale, old_session) = {
        let d = store.create("AB+C", "ABC").unwrap();
        (d.root(), d.store().session())
    };

    // The second session holds more nodes than the first one ever did.
    let d = store.create("AB+CD+EF+!AC", "ABCDEF").unwrap();
    let s = d.store();
    assert_ne!(s.session(), old_session);
    assert!(s.num_nodes() > stale.index());
    assert!(!s.descendants([d.root()]).contains(&stale));

    assert_eq!(s.node(stale), None);
    assert!(matches!(
        s.make_node(0, stale, Ref::ONE),
        Err(Error::InvalidArgument(_))
    ));
    assert!(matches!(
        s.apply_or(stale, d.root()),
        Err(Error::InvalidArgument(_))
    ));
}

#[test]
fn test_search_never_worse_than_identity() {
    let mut store = NodeStore::default();
    for expr in ["AB+C", "AD+BE+CF", "A!B+!AB+CD", "ABC+!D"] {
        let identity = {
            let f: Expression = expr.parse().unwrap();
            let order = VarOrder::identity(f.num_vars());
            store.create(expr, &order.to_string()).unwrap().size()
        };
        let best = store
            .create_with_search(expr, &SearchConfig::default().with_seed(17))
            .unwrap()
            .size();
        assert!(best <= identity, "{}: {} > {}", expr, best, identity);
    }
}

#[test]
fn test_build_with_custom_function() {
    let store = NodeStore::default();
    let majority = from_fn(3, |a: &[bool]| a.iter().filter(|&&b| b).count() >= 2);
    let d = store.build(&majority, &VarOrder::identity(3)).unwrap();
    assert_eq!(d.size(), 4);
    assert_eq!(d.evaluate("110"), Ok(true));
    assert_eq!(d.evaluate("100"), Ok(false));
}
