use droplet::value::to_text;
use droplet::{derived_name, Engine, Error, Filter, Result};
use pretty_assertions::assert_eq;
use serde_json::{json, Value};

const STANDARD_FILTERS: &[&str] = &[
    "append",
    "capitalize",
    "date",
    "divided_by",
    "downcase",
    "escape",
    "escape_once",
    "first",
    "h",
    "join",
    "last",
    "map",
    "minus",
    "modulo",
    "plus",
    "prepend",
    "remove",
    "remove_first",
    "replace",
    "replace_first",
    "size",
    "sort",
    "split",
    "strip_html",
    "strip_newlines",
    "times",
    "truncate",
    "truncatewords",
    "upcase",
];

const STANDARD_TAGS: &[&str] = &[
    "assign", "case", "capture", "comment", "cycle", "for", "if", "include", "raw", "tablerow",
    "unless",
];

struct Shout;

impl Filter for Shout {
    fn name(&self) -> &str {
        "shout"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(to_text(input).to_uppercase()))
    }
}

struct ShoutBang;

impl Filter for ShoutBang {
    fn name(&self) -> &str {
        "shout"
    }

    fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
        Ok(Value::String(to_text(input).to_uppercase() + "!"))
    }
}

fn init_logging() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

#[test]
fn every_standard_filter_resolves_under_its_own_name() {
    init_logging();
    let engine = Engine::new();
    for name in STANDARD_FILTERS {
        let filter = engine
            .filter(name)
            .unwrap_or_else(|_| panic!("standard filter '{name}' missing"));
        assert_eq!(filter.name(), *name);
    }
}

#[test]
fn every_standard_tag_resolves_under_its_own_name() {
    init_logging();
    let engine = Engine::new();
    for name in STANDARD_TAGS {
        let tag = engine
            .tag(name)
            .unwrap_or_else(|_| panic!("standard tag '{name}' missing"));
        assert_eq!(tag.name(), *name);
    }
}

#[test]
fn the_standard_sets_are_exactly_the_fixed_lists() {
    let engine = Engine::new();
    let mut filters: Vec<&str> = engine.filter_names().collect();
    filters.sort_unstable();
    let mut expected_filters = STANDARD_FILTERS.to_vec();
    expected_filters.sort_unstable();
    assert_eq!(filters, expected_filters);

    let mut tags: Vec<&str> = engine.tag_names().collect();
    tags.sort_unstable();
    let mut expected_tags = STANDARD_TAGS.to_vec();
    expected_tags.sort_unstable();
    assert_eq!(tags, expected_tags);
}

#[test]
fn unknown_names_fail_without_fallback() {
    let engine = Engine::new();
    match engine.filter("__nonexistent__") {
        Err(Error::UnknownFilter(name)) => assert_eq!(name, "__nonexistent__"),
        Err(other) => panic!("expected UnknownFilter, got error {other:?}"),
        Ok(_) => panic!("expected UnknownFilter, got Ok"),
    }
    match engine.tag("__nonexistent__") {
        Err(Error::UnknownTag(name)) => assert_eq!(name, "__nonexistent__"),
        Err(other) => panic!("expected UnknownTag, got error {other:?}"),
        Ok(_) => panic!("expected UnknownTag, got Ok"),
    }
    // Lookups are case-sensitive.
    assert!(engine.filter("Upcase").is_err());
}

#[test]
fn registration_applies_and_last_one_wins() {
    let mut engine = Engine::new();
    engine.register_filter(Shout);
    let shout = engine.filter("shout").unwrap();
    assert_eq!(shout.apply(&json!("hello"), &[]).unwrap(), json!("HELLO"));

    engine.register_filter(ShoutBang);
    let replaced = engine.filter("shout").unwrap();
    assert_eq!(
        replaced.apply(&json!("hello"), &[]).unwrap(),
        json!("HELLO!")
    );
}

#[test]
fn registrations_are_private_to_the_engine() {
    let pristine = Engine::new();
    let mut extended = pristine.clone();
    extended.register_filter(Shout);

    assert!(extended.filter("shout").is_ok());
    assert!(pristine.filter("shout").is_err());
}

#[test]
fn a_fresh_engine_on_another_thread_sees_standard_state() {
    let mut local = Engine::new();
    local.register_filter(Shout);

    let handle = std::thread::spawn(|| {
        let fresh = Engine::new();
        fresh.filter("shout").is_err() && fresh.filter("upcase").is_ok()
    });
    assert!(handle.join().unwrap());
    assert!(local.filter("shout").is_ok());
}

#[test]
fn an_engine_moved_across_threads_keeps_its_registrations() {
    let mut engine = Engine::new();
    engine.register_filter(Shout);

    let handle = std::thread::spawn(move || {
        engine
            .filter("shout")
            .unwrap()
            .apply(&json!("hi"), &[])
            .unwrap()
    });
    assert_eq!(handle.join().unwrap(), json!("HI"));
}

#[test]
fn standard_entries_can_be_overridden_in_place() {
    struct Backwards;
    impl Filter for Backwards {
        fn name(&self) -> &str {
            "upcase"
        }
        fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
            Ok(Value::String(to_text(input).chars().rev().collect()))
        }
    }

    let mut engine = Engine::new();
    engine.register_filter(Backwards);
    let upcase = engine.filter("upcase").unwrap();
    assert_eq!(upcase.apply(&json!("abc"), &[]).unwrap(), json!("cba"));

    // A fresh engine still has the standard behavior.
    let fresh = Engine::new();
    assert_eq!(
        fresh
            .filter("upcase")
            .unwrap()
            .apply(&json!("abc"), &[])
            .unwrap(),
        json!("ABC")
    );
}

#[test]
fn derived_names_lowercase_the_type_name() {
    struct Upcase;
    assert_eq!(derived_name::<Upcase>(), "upcase");

    struct Named {
        name: String,
    }
    impl Filter for Named {
        fn name(&self) -> &str {
            &self.name
        }
        fn apply(&self, input: &Value, _params: &[Value]) -> Result<Value> {
            Ok(input.clone())
        }
    }

    let mut engine = Engine::new();
    engine.register_filter(Named {
        name: derived_name::<Upcase>(),
    });
    assert_eq!(engine.filter("upcase").unwrap().name(), "upcase");
}
