use std::path::Path;
use std::sync::Arc;
use tempfile::TempDir;
use tickerset_catalog::{Catalog, CatalogError, CatalogLoader, LocalDirectory};

fn write(dir: &Path, name: &str, body: &str) {
    std::fs::write(dir.join(name), body).unwrap();
}

fn fixture_dir() -> TempDir {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "ironcondor.yaml",
        r#"
group: ironcondor_friendly
title: Iron condor friendly underlyings
sets:
  indexes:
    title: Index ETFs
    tickers: [SPY, QQQ, IWM]
  megacaps:
    title: Mega caps
    tickers: ["  AAPL  ", MSFT, AAPL, "   "]
  all:
    title: All iron condor names
    tickers: [SPY]
    include: [indexes, megacaps]
"#,
    );
    write(
        temp_dir.path(),
        "broken.yml",
        r#"
group: broken
title: Sets with problems
sets:
  loop_a: { title: Loop A, include: [loop_b] }
  loop_b: { title: Loop B, include: [loop_a] }
  self_ref: { title: Self, include: [self_ref] }
  dangling: { title: Dangling, tickers: [X], include: [ghost] }
  diamond: { title: Diamond, include: [left, right] }
  left: { title: Left, include: [base] }
  right: { title: Right, include: [base] }
  base: { title: Base, tickers: [D1, D2] }
  empty: { title: Empty }
"#,
    );
    write(temp_dir.path(), "README.md", "not a definition");
    temp_dir
}

#[tokio::test]
async fn test_load_and_resolve_from_directory() {
    let temp_dir = fixture_dir();
    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();

    assert_eq!(catalog.group_count(), 2);

    let resolved = catalog.resolve("ironcondor_friendly.all").unwrap();
    assert_eq!(resolved.title, "All iron condor names");
    assert_eq!(resolved.tickers, vec!["AAPL", "IWM", "MSFT", "QQQ", "SPY"]);
}

#[tokio::test]
async fn test_resolve_is_deterministic() {
    let temp_dir = fixture_dir();
    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();

    let first = serde_json::to_string(&catalog.resolve("ironcondor_friendly.all").unwrap()).unwrap();
    for _ in 0..10 {
        let again =
            serde_json::to_string(&catalog.resolve("ironcondor_friendly.all").unwrap()).unwrap();
        assert_eq!(first, again);
    }
    assert_eq!(
        first,
        r#"{"title":"All iron condor names","tickers":["AAPL","IWM","MSFT","QQQ","SPY"]}"#
    );
}

#[tokio::test]
async fn test_cycles_and_references() {
    let temp_dir = fixture_dir();
    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();

    for id in ["broken.loop_a", "broken.loop_b", "broken.self_ref"] {
        assert!(
            matches!(catalog.resolve(id), Err(CatalogError::IncludeCycle { .. })),
            "{} should be a cycle",
            id
        );
    }

    assert!(matches!(
        catalog.resolve("broken.dangling"),
        Err(CatalogError::UnknownSetReference { ref set, .. }) if set == "ghost"
    ));

    let diamond = catalog.resolve("broken.diamond").unwrap();
    assert_eq!(diamond.tickers, vec!["D1", "D2"]);

    let empty = catalog.resolve("broken.empty").unwrap();
    assert_eq!(empty.title, "Empty");
    assert!(empty.tickers.is_empty());
}

#[tokio::test]
async fn test_listing_is_best_effort_and_ordered() {
    let temp_dir = fixture_dir();
    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();

    let listing = catalog.listing();
    let ids: Vec<&str> = listing.items.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(
        ids,
        vec![
            "broken.base",
            "broken.dangling",
            "broken.diamond",
            "broken.empty",
            "broken.left",
            "broken.loop_a",
            "broken.loop_b",
            "broken.right",
            "broken.self_ref",
            "ironcondor_friendly.all",
            "ironcondor_friendly.indexes",
            "ironcondor_friendly.megacaps",
        ]
    );

    let dangling = &listing.items[1];
    assert_eq!(dangling.title, "Dangling");
    assert_eq!(dangling.count, 0);
    assert!(dangling.tickers.is_empty());

    let megacaps = &listing.items[11];
    assert_eq!(megacaps.count, 2);
    assert_eq!(megacaps.tickers, vec!["AAPL", "MSFT"]);

    let json = serde_json::to_value(&listing).unwrap();
    assert_eq!(json["items"][5]["tickers"], serde_json::json!([]));
    assert_eq!(json["items"][5]["title"], "Loop A");
}

#[tokio::test]
async fn test_duplicate_group_across_files_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "one.yaml", "group: x\nsets:\n  a: { tickers: [A] }\n");
    write(temp_dir.path(), "two.yaml", "group: x\nsets:\n  b: { tickers: [B] }\n");

    let err = Catalog::load_dir(temp_dir.path()).await.unwrap_err();
    match err {
        CatalogError::DuplicateGroupKey {
            group,
            file,
            first_file,
        } => {
            assert_eq!(group, "x");
            assert_eq!(first_file, "one.yaml");
            assert_eq!(file, "two.yaml");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[tokio::test]
async fn test_structural_load_failures() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "notes.txt", "group: ignored");
    assert!(matches!(
        Catalog::load_dir(temp_dir.path()).await,
        Err(CatalogError::NoDefinitionsFound { .. })
    ));

    write(temp_dir.path(), "nogroup.yaml", "title: Missing group\n");
    assert!(matches!(
        Catalog::load_dir(temp_dir.path()).await,
        Err(CatalogError::MissingGroupKey { ref file }) if file == "nogroup.yaml"
    ));

    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "bad.yaml", "group: g\nsets: [not, a, mapping]\n");
    assert!(matches!(
        Catalog::load_dir(temp_dir.path()).await,
        Err(CatalogError::ParseError { .. })
    ));

    assert!(matches!(
        Catalog::load_dir(temp_dir.path().join("missing")).await,
        Err(CatalogError::IoError { .. })
    ));
}

#[tokio::test]
async fn test_dotted_group_does_not_block_other_groups() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "a.yaml",
        "group: us.equities\nsets:\n  big: { title: Big caps, tickers: [AAPL] }\n",
    );
    write(temp_dir.path(), "b.yaml", "group: etf\nsets:\n  core: { tickers: [SPY] }\n");

    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();
    assert_eq!(catalog.group_count(), 2);
    assert_eq!(catalog.resolve("etf.core").unwrap().tickers, vec!["SPY"]);

    let summaries = catalog.list_summaries();
    assert_eq!(summaries.len(), 2);
    assert_eq!(summaries[1].id, "us.equities.big");
    assert_eq!(summaries[1].title, "Big caps");
    assert_eq!(summaries[1].count, 0);
}

#[tokio::test]
async fn test_invalid_utf8_file_fails_load() {
    let temp_dir = TempDir::new().unwrap();
    std::fs::write(
        temp_dir.path().join("bad.yaml"),
        b"group: g\nsets:\n  a: { tickers: [AA\xffPL] }\n",
    )
    .unwrap();

    assert!(matches!(
        Catalog::load_dir(temp_dir.path()).await,
        Err(CatalogError::ParseError { ref file, .. }) if file == "bad.yaml"
    ));
}

#[tokio::test]
async fn test_group_without_sets_is_valid() {
    let temp_dir = TempDir::new().unwrap();
    write(temp_dir.path(), "bare.yaml", "group: bare\ntitle: Nothing yet\n");

    let catalog = Catalog::load_dir(temp_dir.path()).await.unwrap();
    assert_eq!(catalog.group_count(), 1);
    assert_eq!(catalog.set_count(), 0);
    assert!(catalog.list_summaries().is_empty());
    assert!(matches!(
        catalog.resolve("bare.any"),
        Err(CatalogError::UnknownSet { .. })
    ));
}

#[tokio::test]
async fn test_depth_limit_from_loader() {
    let temp_dir = TempDir::new().unwrap();
    write(
        temp_dir.path(),
        "chain.yaml",
        "group: chain\nsets:\n  a: { include: [b] }\n  b: { include: [c] }\n  c: { title: C, tickers: [C] }\n",
    );

    let catalog = CatalogLoader::new(LocalDirectory::new(temp_dir.path()))
        .with_max_include_depth(1)
        .load()
        .await
        .unwrap();
    assert!(matches!(
        catalog.resolve("chain.a"),
        Err(CatalogError::IncludeDepthExceeded { limit: 1, .. })
    ));
    assert_eq!(catalog.resolve("chain.b").unwrap().tickers, vec!["C"]);

    let summaries = catalog.list_summaries();
    assert_eq!(summaries[0].id, "chain.a");
    assert_eq!(summaries[0].count, 0);
}

#[tokio::test]
async fn test_concurrent_queries_share_catalog() {
    let temp_dir = fixture_dir();
    let catalog = Arc::new(Catalog::load_dir(temp_dir.path()).await.unwrap());
    let expected = catalog.resolve("ironcondor_friendly.all").unwrap();

    let handles: Vec<_> = (0..16)
        .map(|i| {
            let catalog = Arc::clone(&catalog);
            tokio::spawn(async move {
                if i % 2 == 0 {
                    catalog.resolve("ironcondor_friendly.all").unwrap()
                } else {
                    let listing = catalog.listing();
                    let item = listing
                        .items
                        .into_iter()
                        .find(|s| s.id == "ironcondor_friendly.all")
                        .unwrap();
                    tickerset_catalog::ResolvedSet {
                        title: item.title,
                        tickers: item.tickers,
                    }
                }
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), expected);
    }
}
