use std::{
    num::NonZeroUsize,
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use kisuite::{Config, DeclareError, HookKind, Runner, Suite, outcome::SpecStatus};
use pretty_assertions::assert_eq;

use journal::{Failure, Journal};

fn counter() -> (Arc<AtomicUsize>, impl Fn() -> usize) {
    let count = Arc::new(AtomicUsize::new(0));
    let read = {
        let count = Arc::clone(&count);
        move || count.load(Ordering::SeqCst)
    };
    (count, read)
}

#[test]
fn title_paths_and_identifiers() -> Result<(), DeclareError> {
    let mut suite = Suite::new();
    suite.group("A", |t| {
        t.group("B", |t| {
            t.group("C", |t| t.test("deep", || async {}))?;
            t.group_untitled(|t| t.test("anonymous", || async {}))?;
            Ok(())
        })?;
        Ok(())
    })?;

    assert_eq!(suite.identifiers().collect::<Vec<_>>(), ["ABC", "AB"]);
    assert_eq!(suite.lookup("ABC").unwrap().title_path(), ["A", "B", "C"]);
    assert_eq!(suite.lookup("AB").unwrap().title_path(), ["A", "B"]);
    Ok(())
}

#[test]
fn config_resolution() -> Result<(), DeclareError> {
    let mut suite = Suite::new();
    suite.configure(Config::new().with_timeout(Duration::from_millis(77)))?;
    suite.group("A", |t| {
        t.configure(Config::new().with_timeout(Duration::from_millis(5)))?;
        t.group("B", |t| t.test("spec", || async {}))?;
        Ok(())
    })?;
    suite.group("Z", |t| {
        t.configure(Config::new().with_timeout(Duration::ZERO))?;
        t.group("B", |t| t.test("spec", || async {}))?;
        Ok(())
    })?;

    let timeout = |identifier: &str| suite.lookup(identifier).unwrap().config().timeout;
    assert_eq!(timeout("AB"), Some(Duration::from_millis(5)));
    assert_eq!(timeout("ZB"), Some(Duration::from_millis(77)));
    Ok(())
}

#[test]
fn teardown_hooks_are_not_reversed() -> Result<(), DeclareError> {
    let mut suite = Suite::new();
    suite.group("A", |t| {
        t.hook(HookKind::AfterAll, "g1", || async {})?;
        t.group("B", |t| {
            t.hook(HookKind::AfterAll, "g2", || async {})?;
            t.test("spec", || async {})
        })?;
        Ok(())
    })?;

    let hooks = suite.lookup("AB").unwrap().hooks();
    let titles: Vec<_> = hooks
        .iter()
        .filter(|h| h.kind == HookKind::AfterAll)
        .map(|h| h.title.as_str())
        .collect();
    assert_eq!(titles, ["g1", "g2"]);
    Ok(())
}

#[tokio::test]
async fn retried_spec_passes_on_third_attempt() -> anyhow::Result<()> {
    let (count, calls) = counter();
    let mut suite = Suite::new();
    suite.group("flaky", |t| {
        t.configure(Config::new().with_retries(3))?;
        t.test("eventually", move || {
            let call = count.fetch_add(1, Ordering::SeqCst) + 1;
            async move {
                match call {
                    1 | 2 => Err(Failure("attempt")),
                    _ => Ok(()),
                }
            }
        })
    })?;

    suite.run().await?;
    assert_eq!(calls(), 3);
    Ok(())
}

#[tokio::test]
async fn exhausted_retries_keep_the_original_error() -> anyhow::Result<()> {
    let journal = Journal::default();
    let mut suite = Suite::new();
    suite.group("broken", |t| {
        t.configure(Config::new().with_retries(3))?;
        t.test("always", journal.fail("always"))
    })?;

    let err = suite.run().await.unwrap_err();
    assert_eq!(journal.entries(), ["always", "always", "always"]);
    let failure = err.body_error().and_then(|e| e.downcast_ref::<Failure>());
    assert_eq!(failure, Some(&Failure("always")));
    Ok(())
}

#[tokio::test(start_paused = true)]
async fn hanging_spec_times_out() -> anyhow::Result<()> {
    let mut suite = Suite::new();
    suite.group("hangs", |t| {
        t.configure(Config::new().with_timeout(Duration::from_millis(10)))?;
        t.test("forever", std::future::pending::<()>)
    })?;

    let started = tokio::time::Instant::now();
    let err = suite.run().await.unwrap_err();
    assert!(err.is_timeout());
    assert!(err.to_string().contains("10ms"));
    assert!(started.elapsed() < Duration::from_millis(50));
    Ok(())
}

#[tokio::test]
async fn run_group_ignores_unknown_identifiers() -> anyhow::Result<()> {
    let journal = Journal::default();
    let mut suite = Suite::new();
    suite.group("known", |t| t.test("spec", journal.step("spec")))?;

    suite.run_group("missing").await?;
    assert!(journal.entries().is_empty());

    suite.run_group("known").await?;
    assert_eq!(journal.entries(), ["spec"]);
    Ok(())
}

#[tokio::test]
async fn first_after_each_error_surfaces_after_both_ran() -> anyhow::Result<()> {
    let journal = Journal::default();
    let mut suite = Suite::new();
    suite.group("g", |t| {
        t.after_each(journal.fail("first"))?;
        t.after_each(journal.step("second"))?;
        t.test("spec", journal.step("spec"))
    })?;

    let err = suite.run().await.unwrap_err();
    assert_eq!(journal.entries(), ["spec", "first", "second"]);
    assert_eq!(err.to_string(), "first failed");
    Ok(())
}

#[tokio::test]
async fn failing_group_does_not_stop_its_sibling() -> anyhow::Result<()> {
    let journal = Journal::default();
    let mut suite = Suite::new();
    suite.group("failing", |t| {
        t.test("breaks", journal.fail("breaks"))?;
        t.test("never", journal.step("never"))?;
        t.after_all(journal.step("failing afterAll"))
    })?;
    suite.group("passing", |t| {
        t.test("works", || async {
            tokio::time::sleep(Duration::from_millis(5)).await;
        })?;
        t.after_all(journal.step("passing afterAll"))
    })?;

    let report = Runner::new()
        .with_concurrency(NonZeroUsize::new(2).unwrap())
        .run(&mut suite)
        .await;

    let mut entries = journal.entries();
    entries.sort();
    assert_eq!(entries, ["breaks", "passing afterAll"]);

    let failing = &report.groups[0];
    let statuses: Vec<_> = failing.specs.iter().map(|(_, o)| &o.status).collect();
    assert_eq!(
        statuses,
        [&SpecStatus::Failed("breaks failed".into()), &SpecStatus::Skipped]
    );
    assert!(report.groups[1].passed());
    assert_eq!(report.into_result().unwrap_err().to_string(), "breaks failed");
    Ok(())
}

#[tokio::test]
async fn declarations_close_when_running() -> anyhow::Result<()> {
    let mut suite = Suite::new();
    suite.test("spec", || async {})?;
    suite.run().await?;

    assert_eq!(
        suite.before_all(|| async {}),
        Err(DeclareError::OutOfContext {
            operation: "before_all()"
        })
    );
    Ok(())
}

#[tokio::test]
async fn sessions_are_independent() -> anyhow::Result<()> {
    let mut first = Suite::new();
    let mut second = Suite::new();
    first.group("one", |t| t.test("spec", || async {}))?;
    second.group("two", |t| t.test("spec", || async {}))?;

    first.run().await?;
    second.group("three", |t| t.test("spec", || async {}))?;
    assert_eq!(second.identifiers().collect::<Vec<_>>(), ["two", "three"]);
    second.run().await?;
    Ok(())
}
