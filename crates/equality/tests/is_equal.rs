use objkit_core::{Realm, Value};
use objkit_equality::equals;

fn setup() -> Realm {
    objkit_observability::init();
    Realm::new()
}

fn object(realm: &Realm, entries: &[(&str, Value)]) -> Value {
    realm.object(entries.iter().cloned())
}

fn boxed(realm: &Realm, primitive: impl Into<Value>) -> Value {
    realm.boxed(primitive).unwrap()
}

fn pattern(realm: &Realm, source: &str, flags: &str) -> Value {
    realm.pattern(source, flags).unwrap()
}

fn push(target: &Value, value: impl Into<Value>) {
    target.as_object().unwrap().push(value);
}

fn set(target: &Value, key: &str, value: impl Into<Value>) {
    target.as_object().unwrap().set(key, value);
}

/// Asserts the verdict in both argument orders.
fn assert_equal(a: &Value, b: &Value, expected: bool) {
    assert_eq!(equals(a, b), expected, "equals({a:?}, {b:?})");
    assert_eq!(equals(b, a), expected, "equals({b:?}, {a:?})");
}

#[test]
fn nullish_values_equal_only_themselves() {
    setup();
    assert!(equals(&Value::Null, &Value::Null));
    assert!(equals(&Value::Undefined, &Value::Undefined));
    assert_equal(&Value::Null, &Value::Undefined, false);
    assert_equal(&Value::Null, &Value::from(0), false);
    assert_equal(&Value::Undefined, &Value::from(""), false);
}

#[test]
fn zero_and_negative_zero_differ() {
    let realm = setup();
    assert_equal(&Value::from(0), &Value::from(-0.0), false);
    assert_equal(&boxed(&realm, 0), &Value::from(-0.0), false);
    assert_equal(&Value::from(0), &boxed(&realm, -0.0), false);
    assert!(equals(&Value::from(-0.0), &Value::from(-0.0)));
}

#[test]
fn strings_compare_through_wrappers() {
    let realm = setup();
    assert!(equals(&"Curly".into(), &"Curly".into()));
    assert_equal(&boxed(&realm, "Curly"), &boxed(&realm, "Curly"), true);
    assert_equal(&boxed(&realm, "Curly"), &"Curly".into(), true);

    assert_equal(&"Curly".into(), &"Larry".into(), false);
    assert_equal(&boxed(&realm, "Curly"), &boxed(&realm, "Larry"), false);

    let to_string = object(&realm, &[("toString", realm.function("toString"))]);
    assert_equal(&boxed(&realm, "Curly"), &to_string, false);
}

#[test]
fn numbers_compare_through_wrappers() {
    let realm = setup();
    assert!(equals(&75.into(), &75.into()));
    assert_equal(&boxed(&realm, 75), &boxed(&realm, 75), true);
    assert_equal(&Value::from(75), &boxed(&realm, 75), true);

    assert_equal(&boxed(&realm, 75), &boxed(&realm, 63), false);
    let value_of = object(&realm, &[("valueOf", realm.function("valueOf"))]);
    assert_equal(&boxed(&realm, 63), &value_of, false);
}

#[test]
fn nan_equals_nan() {
    let realm = setup();
    assert!(equals(&Value::NAN, &Value::NAN));
    assert_equal(&boxed(&realm, Value::NAN), &Value::NAN, true);
    assert_equal(&Value::from(61), &Value::NAN, false);
    assert_equal(&boxed(&realm, 79), &Value::NAN, false);
    assert_equal(&Value::from(f64::INFINITY), &Value::NAN, false);
}

#[test]
fn booleans_compare_through_wrappers() {
    let realm = setup();
    assert!(equals(&true.into(), &true.into()));
    assert_equal(&boxed(&realm, false), &boxed(&realm, false), true);
    assert_equal(&Value::from(true), &boxed(&realm, true), true);
    assert_equal(&boxed(&realm, true), &boxed(&realm, false), false);
}

#[test]
fn kinds_are_never_coerced() {
    let realm = setup();
    assert_equal(&boxed(&realm, false), &Value::from(true), false);
    assert_equal(&Value::from("75"), &Value::from(75), false);
    assert_equal(&boxed(&realm, 63), &boxed(&realm, "63"), false);
    assert_equal(&Value::from(0), &Value::from(""), false);
    assert_equal(&Value::from(1), &Value::from(true), false);
    assert_equal(&boxed(&realm, false), &boxed(&realm, 0), false);
    assert_equal(&Value::from(false), &boxed(&realm, ""), false);
    assert_equal(&boxed(&realm, "x"), &boxed(&realm, 0), false);

    let date = realm.date_parse("2009-10-25T06:00:00Z");
    assert_equal(&Value::from(1_256_450_400_000.0), &date, false);
}

#[test]
fn dates_compare_by_instant() {
    let realm = setup();
    assert_equal(&realm.date_ymd(2009, 10, 25), &realm.date_ymd(2009, 10, 25), true);
    assert_equal(&realm.date_ymd(2009, 10, 25), &realm.date_ymd(2009, 12, 13), false);

    let get_time = object(&realm, &[("getTime", realm.function("getTime"))]);
    assert_equal(&realm.date_ymd(2009, 12, 13), &get_time, false);

    assert_equal(
        &realm.date_parse("2009-10-25T02:00:00+02:00"),
        &realm.date_parse("2009-10-25T00:00:00Z"),
        true,
    );
}

#[test]
fn invalid_dates_equal_nothing() {
    let realm = setup();
    assert_equal(&realm.date_parse("Curly"), &realm.date_parse("Curly"), false);
    assert_equal(&realm.invalid_date(), &realm.date_ymd(2009, 10, 25), false);
}

#[test]
fn functions_compare_by_identity() {
    let realm = setup();
    let first = realm.function("First");
    let second = realm.function("Second");
    assert_equal(&first, &second, false);
    assert_equal(&realm.function("First"), &first, false);
    assert!(equals(&first, &first.clone()));

    let host = realm.opaque("div");
    assert!(equals(&host, &host));
    assert_equal(&host, &realm.opaque("div"), false);
}

#[test]
fn patterns_compare_by_source_and_flags() {
    let realm = setup();
    assert_equal(&pattern(&realm, "(?:)", "gim"), &pattern(&realm, "(?:)", "gim"), true);
    assert_equal(&pattern(&realm, "(?:)", "gi"), &pattern(&realm, "(?:)", "ig"), true);
    assert_equal(&pattern(&realm, "(?:)", "g"), &pattern(&realm, "(?:)", "gi"), false);
    assert_equal(&pattern(&realm, "Moe", "gim"), &pattern(&realm, "Curly", "gim"), false);

    let pattern_like = object(
        &realm,
        &[
            ("source", "Larry".into()),
            ("global", true.into()),
            ("ignoreCase", false.into()),
            ("multiline", false.into()),
        ],
    );
    assert_equal(&pattern(&realm, "Curly", "g"), &pattern_like, false);
}

#[test]
fn empty_containers_compare_by_shape() {
    let realm = setup();
    let empty = || realm.object::<_, &str>([]);

    assert_equal(&empty(), &empty(), true);
    assert_equal(&realm.array([]), &realm.array([]), true);
    assert_equal(&realm.array([empty()]), &realm.array([empty()]), true);

    let length_zero = object(&realm, &[("length", 0.into())]);
    assert_equal(&length_zero, &realm.array([]), false);
    assert_equal(&empty(), &realm.array([]), false);
}

#[test]
fn arrays_compare_elements_recursively() {
    let realm = setup();
    assert_equal(
        &realm.array([1.into(), "Larry".into(), true.into()]),
        &realm.array([1.into(), "Larry".into(), true.into()]),
        true,
    );
    assert_equal(
        &realm.array([pattern(&realm, "Moe", "g"), realm.date_ymd(2009, 10, 25)]),
        &realm.array([pattern(&realm, "Moe", "g"), realm.date_ymd(2009, 10, 25)]),
        true,
    );
}

#[test]
fn arrays_ignore_non_index_properties() {
    let realm = setup();
    let stooges = || {
        realm.array([
            boxed(&realm, 47),
            false.into(),
            "Larry".into(),
            pattern(&realm, "Moe", ""),
            realm.date_ymd(2009, 12, 13),
            realm.array(["running".into(), "biking".into(), boxed(&realm, "programming")]),
            object(&realm, &[("a", 47.into())]),
        ])
    };
    let a = stooges();
    let b = stooges();
    assert_equal(&a, &b, true);

    for method in ["forEach", "map", "filter", "every", "indexOf", "some", "reduce"] {
        set(&a, method, Value::Null);
    }
    for method in ["join", "pop", "reverse", "shift", "slice", "splice", "concat"] {
        set(&b, method, Value::Null);
    }
    assert_equal(&a, &b, true);

    push(&a, "White Rocks");
    assert_equal(&a, &b, false);

    push(&a, "East Boulder");
    push(&b, "Gunbarrel Ranch");
    push(&b, "Teller Farm");
    assert_equal(&a, &b, false);
}

#[test]
fn sparse_arrays_read_holes_as_undefined() {
    let realm = setup();
    assert_equal(&realm.sparse_array(3), &realm.sparse_array(3), true);
    assert_equal(&realm.sparse_array(3), &realm.sparse_array(6), false);

    let sparse = realm.array([]);
    set(&sparse, "1", 5);
    assert_equal(&sparse, &realm.array([Value::Undefined, 5.into()]), true);
    assert_equal(&sparse, &realm.array([Value::Null, 5.into()]), false);
}

#[test]
fn far_array_indices_compare_without_dense_storage() {
    let realm = setup();
    let far = || {
        let array = realm.array([1.into()]);
        set(&array, "4294967294", "last");
        set(&array, "1000000000", "middle");
        array
    };
    assert_equal(&far(), &far(), true);

    let moved = far();
    set(&moved, "1000000000", Value::Undefined);
    assert_equal(&far(), &moved, false);

    let removed = far();
    removed.as_object().unwrap().remove("1000000000");
    assert_equal(&moved, &removed, true);
}

#[test]
fn out_of_range_index_keys_are_ignored_like_other_properties() {
    let realm = setup();
    let a = realm.array([1.into()]);
    set(&a, "4294967295", 1);
    let b = realm.array([1.into()]);

    assert_eq!(a.as_object().unwrap().len(), Some(1));
    assert_equal(&a, &b, true);

    let c = realm.array([1.into()]);
    set(&c, "4294967294", 1);
    assert_equal(&a, &c, false);
}

#[test]
fn deep_acyclic_chains_compare_on_a_large_stack() {
    const DEPTH: usize = 5_000;

    let verdicts = std::thread::Builder::new()
        .stack_size(256 * 1024 * 1024)
        .spawn(|| {
            let realm = setup();
            let chain = |leaf: Value| (0..DEPTH).fold(leaf, |inner, _| realm.array([inner]));
            let a = chain("leaf".into());
            let b = chain("leaf".into());
            let c = chain("other".into());
            (equals(&a, &b), equals(&a, &c))
        })
        .unwrap()
        .join()
        .unwrap();

    assert_eq!(verdicts, (true, false));
}

#[test]
fn plain_containers_compare_members() {
    let realm = setup();
    assert_equal(
        &object(&realm, &[("a", "Curly".into()), ("b", 1.into()), ("c", true.into())]),
        &object(&realm, &[("a", "Curly".into()), ("b", 1.into()), ("c", true.into())]),
        true,
    );
    assert_equal(
        &object(&realm, &[("a", pattern(&realm, "Curly", "g")), ("b", realm.date_ymd(2009, 12, 13))]),
        &object(&realm, &[("a", pattern(&realm, "Curly", "g")), ("b", realm.date_ymd(2009, 12, 13))]),
        true,
    );
    assert_equal(
        &object(&realm, &[("a", 63.into()), ("b", 75.into())]),
        &object(&realm, &[("a", 61.into()), ("b", 55.into())]),
        false,
    );
    assert_equal(
        &object(&realm, &[("a", 63.into()), ("b", 75.into())]),
        &object(&realm, &[("a", 61.into()), ("c", 55.into())]),
        false,
    );
    assert_equal(
        &object(&realm, &[("x", 1.into()), ("y", Value::Undefined)]),
        &object(&realm, &[("x", 1.into()), ("z", 2.into())]),
        false,
    );
}

#[test]
fn member_order_is_irrelevant() {
    let realm = setup();
    assert_equal(
        &object(&realm, &[("a", 1.into()), ("b", 2.into())]),
        &object(&realm, &[("b", 2.into()), ("a", 1.into())]),
        true,
    );
}

#[test]
fn hidden_members_are_not_compared() {
    let realm = setup();
    let a = object(&realm, &[("a", 1.into())]);
    let b = object(&realm, &[("a", 1.into())]);
    b.as_object().unwrap().define("secret", 2, false);
    assert_equal(&a, &b, true);
}

#[test]
fn nested_members_are_compared_recursively() {
    let realm = setup();
    let moe = || {
        let film = object(
            &realm,
            &[
                ("name", "Sing a Song of Six Pants".into()),
                ("release", realm.date_ymd(1947, 10, 30)),
                ("stars", realm.array([boxed(&realm, "Larry Fine"), "Shemp Howard".into()])),
                ("minutes", boxed(&realm, 16)),
                ("seconds", 54.into()),
            ],
        );
        object(
            &realm,
            &[
                ("name", boxed(&realm, "Moe Howard")),
                ("age", boxed(&realm, 77)),
                ("stooge", true.into()),
                ("hobbies", realm.array(["acting".into()])),
                ("film", film),
            ],
        )
    };
    let a = moe();
    let b = moe();
    assert_equal(&a, &b, true);

    let film = b.as_object().unwrap().get("film");
    set(&film, "seconds", 55);
    assert_equal(&a, &b, false);
}

#[test]
fn instances_compare_by_blueprint() {
    let realm = setup();
    let first = realm.blueprint("First");
    first.define("value", 1);
    let second = realm.blueprint("Second");
    second.define("value", 2);

    let new_first = || first.instantiate([("value", Value::from(1))]);
    let new_second = || second.instantiate([("value", Value::from(1))]);

    assert_equal(&new_first(), &new_first(), true);
    assert_equal(&new_first(), &new_second(), false);
    assert_equal(&object(&realm, &[("value", 1.into())]), &new_first(), false);
    assert_equal(&object(&realm, &[("value", 2.into())]), &new_second(), false);
}

#[test]
fn origin_is_ignored_when_one_side_has_none() {
    let realm = setup();
    let foo = realm.blueprint("Foo");
    let bare = realm.bare_object([("x", Value::from(1))]);

    assert_equal(&bare, &object(&realm, &[("x", 1.into())]), true);
    assert_equal(&bare, &foo.instantiate([("x", Value::from(1))]), true);
    assert_equal(&bare, &realm.bare_object([("x", Value::from(1))]), true);
    assert_equal(&bare, &object(&realm, &[("x", 2.into())]), false);
}

#[test]
fn inherited_members_do_not_count() {
    let realm = setup();
    let foo = realm.blueprint("Foo");
    foo.define("value", 1);
    let instance = foo.instantiate::<_, &str>([]);
    assert_eq!(instance.as_object().unwrap().get("value"), Value::from(1));

    assert_equal(&realm.bare_object([("value", Value::from(1))]), &instance, false);
    assert_equal(&realm.bare_object::<_, &str>([]), &instance, true);
}

#[test]
fn values_from_other_realms_compare_structurally() {
    let realm = setup();
    let foreign = Realm::new();

    assert_equal(&realm.object::<_, &str>([]), &foreign.object::<_, &str>([]), true);
    assert_equal(
        &object(&realm, &[("a", realm.array([1.into()]))]),
        &object(&foreign, &[("a", foreign.array([1.into()]))]),
        true,
    );
    assert_equal(&realm.date_ymd(2020, 1, 1), &foreign.date_ymd(2020, 1, 1), true);
    assert_equal(&pattern(&realm, "a", "g"), &pattern(&foreign, "a", "g"), true);
    assert_equal(&boxed(&realm, "x"), &boxed(&foreign, "x"), true);

    let ours = realm.blueprint("Foo");
    let theirs = foreign.blueprint("Foo");
    assert_equal(
        &ours.instantiate([("x", Value::from(1))]),
        &theirs.instantiate([("x", Value::from(1))]),
        false,
    );
}

#[test]
fn circular_arrays() {
    let realm = setup();
    let a = realm.array([]);
    push(&a, a.clone());
    let b = realm.array([]);
    push(&b, b.clone());
    assert_equal(&a, &b, true);

    push(&a, boxed(&realm, "Larry"));
    push(&b, boxed(&realm, "Larry"));
    assert_equal(&a, &b, true);

    push(&a, "Shemp");
    push(&b, "Curly");
    assert_equal(&a, &b, false);
}

#[test]
fn circular_array_against_acyclic_array() {
    let realm = setup();
    let a = realm.array(["everything is checked but".into(), "this".into(), "is not".into()]);
    set(&a, "1", a.clone());
    let b = realm.array([
        "everything is checked but".into(),
        realm.array(["this".into(), "array".into()]),
        "is not".into(),
    ]);
    assert_equal(&a, &b, false);
}

#[test]
fn circular_objects() {
    let realm = setup();
    let a = object(&realm, &[("abc", Value::Null)]);
    let b = object(&realm, &[("abc", Value::Null)]);
    set(&a, "abc", a.clone());
    set(&b, "abc", b.clone());
    assert_equal(&a, &b, true);

    set(&a, "def", 75);
    set(&b, "def", 75);
    assert_equal(&a, &b, true);

    set(&a, "def", boxed(&realm, 75));
    set(&b, "def", boxed(&realm, 63));
    assert_equal(&a, &b, false);
}

#[test]
fn circular_object_against_acyclic_object() {
    let realm = setup();
    let a = object(
        &realm,
        &[("everything", "is checked".into()), ("but", "this".into()), ("is", "not".into())],
    );
    set(&a, "but", a.clone());
    let b = object(
        &realm,
        &[
            ("everything", "is checked".into()),
            ("but", object(&realm, &[("that", "object".into())])),
            ("is", "not".into()),
        ],
    );
    assert_equal(&a, &b, false);
}

#[test]
fn cyclic_structures() {
    let realm = setup();
    let build = || {
        let inner = object(&realm, &[("abc", Value::Null)]);
        let outer = realm.array([inner.clone()]);
        set(&inner, "abc", outer.clone());
        push(&outer, outer.clone());
        (outer, inner)
    };
    let (a, a0) = build();
    let (b, b0) = build();
    assert_equal(&a, &b, true);

    set(&a0, "def", "Larry");
    set(&b0, "def", "Larry");
    assert_equal(&a, &b, true);

    set(&a0, "def", boxed(&realm, "Larry"));
    set(&b0, "def", boxed(&realm, "Curly"));
    assert_equal(&a, &b, false);
}

#[test]
fn cycles_through_identically_named_members() {
    let realm = setup();
    let build = || {
        let c = object(&realm, &[("foo", Value::Null)]);
        let inner = object(&realm, &[("c", c.clone())]);
        let b = object(&realm, &[("foo", inner)]);
        let root = object(&realm, &[("foo", object(&realm, &[("b", b)]))]);
        set(&c, "foo", root.clone());
        root
    };
    assert_equal(&build(), &build(), true);
}

#[test]
fn self_referential_objects() {
    let realm = setup();
    let a = object(&realm, &[("v", 1.into())]);
    set(&a, "self", a.clone());
    let b = object(&realm, &[("v", 1.into())]);
    set(&b, "self", b.clone());
    assert_equal(&a, &b, true);

    set(&b, "v", 2);
    assert_equal(&a, &b, false);
}

#[test]
fn cycles_of_different_length_compare_by_data() {
    let realm = setup();
    // x -> x against y1 -> y2 -> y1
    let x = object(&realm, &[("data", 1.into())]);
    set(&x, "next", x.clone());

    let y1 = object(&realm, &[("data", 1.into())]);
    let y2 = object(&realm, &[("data", 1.into()), ("next", y1.clone())]);
    set(&y1, "next", y2.clone());
    assert_equal(&x, &y1, true);

    set(&y2, "data", 2);
    assert_equal(&x, &y1, false);
}

#[test]
fn mutably_borrowed_members_compare_unequal() {
    let realm = setup();
    let shared = realm.array([1.into()]);
    let a = object(&realm, &[("list", shared.clone())]);
    let b = object(&realm, &[("list", realm.array([1.into()]))]);
    assert_equal(&a, &b, true);

    let guard = shared.as_object().unwrap().borrow_mut();
    assert_equal(&a, &b, false);
    drop(guard);
    assert_equal(&a, &b, true);
}

#[test]
fn mutably_borrowed_values_still_equal_themselves() {
    let realm = setup();
    let a = object(&realm, &[("x", 1.into())]);
    let b = object(&realm, &[("x", 1.into())]);
    let _guard = a.as_object().unwrap().borrow_mut();
    assert!(equals(&a, &a));
    assert_equal(&a, &b, false);
}

#[test]
fn verdicts_are_symmetric_and_stable() {
    let realm = setup();
    let cyclic = realm.array([]);
    push(&cyclic, cyclic.clone());

    let values = [
        Value::Undefined,
        Value::Null,
        Value::from(0),
        Value::from(-0.0),
        Value::NAN,
        Value::from("75"),
        Value::from(75),
        boxed(&realm, 75),
        boxed(&realm, "75"),
        Value::from(true),
        boxed(&realm, true),
        realm.date_ymd(2009, 10, 25),
        realm.invalid_date(),
        pattern(&realm, "abc", "gi"),
        realm.array([]),
        realm.object::<_, &str>([]),
        object(&realm, &[("length", 0.into())]),
        realm.bare_object::<_, &str>([]),
        realm.blueprint("Foo").instantiate::<_, &str>([]),
        realm.function("First"),
        cyclic,
    ];

    for a in &values {
        for b in &values {
            let verdict = equals(a, b);
            assert_eq!(verdict, equals(b, a), "symmetry of {a:?} and {b:?}");
            assert_eq!(verdict, equals(a, b), "stability of {a:?} and {b:?}");
        }
    }
}
