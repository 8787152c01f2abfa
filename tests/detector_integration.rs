use nodisposable::cache::source::FileDomainSource;
use nodisposable::{Config, DetectionResult, DomainCache, EmailDetector, LoadState};
use std::fs;
use std::sync::Arc;
use tempfile::TempDir;

/// Lays out `<root>/data/domains.json` the way an install would.
fn install_root(contents: &str) -> TempDir {
    let root = tempfile::tempdir().expect("tempdir");
    fs::create_dir_all(root.path().join("data")).expect("data dir");
    fs::write(root.path().join("data").join("domains.json"), contents).expect("domains file");
    root
}

#[tokio::test]
async fn detects_from_installed_domain_file() {
    let root = install_root(r#"["10minutemail.com","mailinator.com"]"#);
    let detector = EmailDetector::from_config(&Config::with_root(root.path()));

    assert_eq!(
        detector.detect("a@10minutemail.com").await,
        DetectionResult::classified("10minutemail.com", true)
    );
    assert_eq!(
        detector.detect("a@gmail.com").await,
        DetectionResult::classified("gmail.com", false)
    );

    let bad = detector.detect("bad-email").await;
    assert!(!bad.is_disposable);
    assert_eq!(bad.domain, "");
    assert!(bad.error.is_some());
}

#[tokio::test]
async fn invalidation_picks_up_a_refreshed_file() {
    let root = install_root(r#"["mailinator.com"]"#);
    let detector = EmailDetector::from_config(&Config::with_root(root.path()));

    assert!(!detector.is_disposable_email("x@yopmail.com").await);

    fs::write(
        root.path().join("data").join("domains.json"),
        r#"["mailinator.com","yopmail.com"]"#,
    )
    .unwrap();

    // Cached list still served until invalidated.
    assert!(!detector.is_disposable_email("x@yopmail.com").await);

    detector.invalidate_cache();
    assert!(detector.peek_cached_domains().is_none());
    assert!(detector.is_disposable_email("x@yopmail.com").await);
    assert_eq!(detector.cache_status().load_count, 2);
}

#[tokio::test]
async fn missing_file_is_an_error_and_retried() {
    let root = tempfile::tempdir().unwrap();
    let detector = EmailDetector::from_config(&Config::with_root(root.path()));

    let result = detector.detect("a@mailinator.com").await;
    let error = result.error.expect("missing file should be reported");
    assert!(error.contains("domains.json"));
    assert_eq!(detector.cache_status().state, LoadState::Empty);

    fs::create_dir_all(root.path().join("data")).unwrap();
    fs::write(root.path().join("data").join("domains.json"), r#"["mailinator.com"]"#).unwrap();

    assert!(detector.is_disposable_email("a@mailinator.com").await);
}

#[tokio::test]
async fn malformed_file_is_reported() {
    let root = install_root(r#"{"domains": []}"#);
    let detector = EmailDetector::from_config(&Config::with_root(root.path()));

    let result = detector.detect("a@mailinator.com").await;
    assert_eq!(
        result,
        DetectionResult::failed("Domains data must be an array")
    );

    let root = install_root("[\"mailinator.com\"");
    let detector = EmailDetector::from_config(&Config::with_root(root.path()));
    let result = detector.detect("a@mailinator.com").await;
    assert_eq!(
        result.error.as_deref(),
        Some("Invalid JSON format in 'domains.json'")
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_tasks_share_one_cache() {
    let root = install_root(r#"["guerrillamail.com"]"#);
    let cache = Arc::new(DomainCache::new(FileDomainSource::new(
        root.path().join("data").join("domains.json"),
    )));
    let detector = EmailDetector::new(Arc::clone(&cache));

    let handles: Vec<_> = (0..24)
        .map(|i| {
            let detector = detector.clone();
            tokio::spawn(async move {
                detector
                    .detect(&format!("user{i}@GuerrillaMail.com"))
                    .await
            })
        })
        .collect();

    for handle in handles {
        let result = handle.await.unwrap();
        assert_eq!(result, DetectionResult::classified("guerrillamail.com", true));
    }
    assert_eq!(cache.status().load_count, 1);
    assert_eq!(cache.peek(), Some(vec!["guerrillamail.com".to_string()]));
}
