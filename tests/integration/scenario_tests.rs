//! End-to-end search scenarios through the service facade.

use classfinder::search::MatchKind;
use classfinder::test_utils::fixtures::artifact;

use crate::assert_ranked;
use crate::fixture::SearchFixture;

#[test]
fn test_exact_local_hit_carries_usage() {
    let fixture = SearchFixture::new(
        &[artifact("java", "rt", "8", &["/java/util/ArrayList"])],
        &[("java:rt", 5000)],
    );
    let results = fixture.service().search("ArrayList");

    assert_ranked!(results, ["java.util.ArrayList"]);
    assert_eq!(results[0].match_kind, MatchKind::Prefix);
    assert_eq!(results[0].usage_score, 5000);
    assert_eq!(results[0].simple_class_name, "ArrayList");
}

#[test]
fn test_unpopular_fuzzy_hit_is_filtered() {
    let fixture = SearchFixture::new(
        &[artifact("com.foo", "foo", "1", &["com.foo.List"])],
        &[("com.foo:foo", 50)],
    );
    assert!(fixture.service().search("Lst").is_empty());
}

#[test]
fn test_popular_fuzzy_hit_survives() {
    let fixture = SearchFixture::new(
        &[artifact("com.foo", "foo", "1", &["com.foo.List"])],
        &[("com.foo:foo", 1000)],
    );
    let results = fixture.service().search("Lst");
    assert_ranked!(results, ["com.foo.List"]);
    assert_eq!(results[0].match_kind, MatchKind::Fuzzy);
}

#[test]
fn test_remote_only_when_local_disabled() {
    let fixture = SearchFixture::new(&[artifact("g", "a", "1", &["p.Other"])], &[])
        .with_remote(&[("com.bar", "bar", "1.0", &["com.bar.<em>Foo</em>"])]);
    let service = fixture.service();
    assert!(service.set_enabled(false));

    let results = service.search("Foo");
    assert_ranked!(results, ["com.bar.Foo"]);
    assert_eq!(results[0].match_kind, MatchKind::Prefix);
    assert_eq!(results[0].group_id, "com.bar");
    assert_eq!(results[0].usage_score, 0);
}

#[test]
fn test_local_wins_over_remote_on_same_class() {
    let fixture = SearchFixture::new(&[artifact("org.local", "local", "2", &["com.x.Foo"])], &[])
        .with_remote(&[(
            "org.remote",
            "remote",
            "9",
            &["com.x.<em>Foo</em>", "com.y.<em>Foo</em>Bar"],
        )]);

    let results = fixture.service().search("foo");
    assert_ranked!(results, ["com.x.Foo", "com.y.FooBar"]);
    assert_eq!(results[0].artifact_id, "local");
    assert_eq!(results[1].artifact_id, "remote");
}

#[test]
fn test_curated_artifact_promoted_into_starred_window() {
    let mut records = Vec::new();
    let mut usage = Vec::new();
    for i in 0..13u64 {
        let artifact_id = if i == 6 { "azure-core".to_string() } else { format!("lib{i:02}") };
        records.push(artifact("g", &artifact_id, "1", &[&format!("p{i:02}.Foo{i:02}")]));
        usage.push((format!("g:{artifact_id}"), 10_000 - i * 10));
    }
    let usage: Vec<(&str, u64)> = usage.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    let fixture = SearchFixture::new(&records, &usage);

    let results = fixture.service().search("Foo");
    assert_eq!(results.len(), 13);
    assert_ranked!(
        results,
        [
            "p00.Foo00", "p01.Foo01", "p06.Foo06", "p02.Foo02", "p03.Foo03", "p04.Foo04",
            "p05.Foo05", "p07.Foo07", "p08.Foo08", "p09.Foo09", "p10.Foo10", "p11.Foo11",
            "p12.Foo12",
        ]
    );
    assert_eq!(results[2].artifact_id, "azure-core");
}

#[test]
fn test_dotted_query_matches_by_simple_name() {
    let fixture = SearchFixture::new(
        &[artifact("java", "rt", "8", &["java.util.ArrayList", "java.util.HashMap"])],
        &[],
    );
    let results = fixture.service().search("java.util.ArrayList");
    assert_ranked!(results, ["java.util.ArrayList"]);
}

#[test]
fn test_nested_class_names_survive_indexing() {
    let fixture = SearchFixture::new(&[artifact("java", "rt", "8", &["/java/util/Map$Entry"])], &[]);
    let results = fixture.service().search("Map$Entry");
    assert_ranked!(results, ["java.util.Map$Entry"]);
}

#[test]
fn test_concurrent_searches_while_toggling() {
    let fixture = SearchFixture::new(&[artifact("g", "a", "1", &["p.Foo"])], &[]);
    let service = fixture.service();

    std::thread::scope(|scope| {
        for _ in 0..4 {
            scope.spawn(|| {
                for _ in 0..50 {
                    let n = service.search("Foo").len();
                    assert!(n <= 1);
                }
            });
        }
        scope.spawn(|| {
            for i in 0..20 {
                assert!(service.set_enabled(i % 2 == 1));
            }
        });
    });

    assert!(service.set_enabled(true));
    assert_eq!(service.search("Foo").len(), 1);
}
