use std::{
    sync::atomic::{AtomicUsize, Ordering},
    thread,
    time::Duration,
};

use kisuite::{Config, Runner, Suite, event::RunEvent, outcome::SpecStatus};

static CONNECTIONS: AtomicUsize = AtomicUsize::new(0);

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().init();

    let mut suite = Suite::new();
    suite.group("database", |t| {
        t.configure(Config::new().with_timeout(Duration::from_millis(200)))?;
        t.before_each(|| async {
            CONNECTIONS.fetch_add(1, Ordering::SeqCst);
        })?;
        t.after_each(|| async {
            CONNECTIONS.fetch_sub(1, Ordering::SeqCst);
        })?;

        t.test("connects", || async {
            anyhow::ensure!(CONNECTIONS.load(Ordering::SeqCst) > 0, "no connection");
            Ok(())
        })?;

        t.group("queries", |t| {
            t.configure(Config::new().with_retries(3))?;
            t.test("select", || async {
                tokio::time::sleep(Duration::from_millis(20)).await;
            })?;
            t.test("too slow", || async {
                tokio::time::sleep(Duration::from_secs(1)).await;
            })
        })?;
        Ok(())
    })?;
    suite.group("math", |t| t.test("adds", || async { assert_eq!(1 + 1, 2) }))?;

    let (tx, rx) = crossbeam_channel::unbounded();
    let reporter = thread::spawn(move || {
        for event in rx {
            match event {
                RunEvent::SpecFinished {
                    identifier,
                    title,
                    outcome,
                } => {
                    let label = match outcome.status {
                        SpecStatus::Passed => "ok".to_string(),
                        SpecStatus::TimedOut(limit) => format!("timed out after {limit:?}"),
                        SpecStatus::Failed(reason) => format!("FAILED: {reason}"),
                        SpecStatus::Interrupted => "interrupted".to_string(),
                        _ => "skipped".to_string(),
                    };
                    println!("{identifier} > {title} ... {label}");
                }
                RunEvent::RunFinished { passed, duration } => {
                    println!("finished in {duration:?}, passed: {passed}");
                }
                _ => {}
            }
        }
    });

    let report = Runner::new().with_events(tx).run(&mut suite).await;
    let _ = reporter.join();
    report.into_result()?;
    Ok(())
}
