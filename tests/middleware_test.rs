//! Middleware behaviour against the job runtime contract.

use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

use memory_logger::observability::logging::logger_fn;
use memory_logger::sink::{self, RecordingSink};
use memory_logger::{Configuration, Job, MemoryMiddleware};
use serde_json::{json, Value};
use tracing::Level;

mod common;

use common::{recording_middleware, test_config, CapturedLog};

fn test_job() -> Job {
    Job::new("TestJob").with_args(vec![json!(123), json!("test_arg")])
}

#[test]
fn test_calls_sink_with_measurement() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));

    middleware.call(&test_job(), "test_queue", || thread::sleep(Duration::from_millis(10)));

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].job_class, "TestJob");
    assert_eq!(records[0].queue, "test_queue");
    assert!(records[0].memory_diff_mb.is_finite());
    assert_eq!(records[0].args, Some(vec![json!(123), json!("test_arg")]));
}

#[test]
fn test_job_without_args_field_reports_absent_args() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));

    middleware.call(&Job::new("TestJob"), "test_queue", || ());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].job_class, "TestJob");
    assert_eq!(records[0].queue, "test_queue");
    assert!(records[0].memory_diff_mb.is_finite());
    assert_eq!(records[0].args, None);
}

#[test]
fn test_argument_shapes_are_distinct() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));

    let payloads = [
        r#"{"class": "SpecialJob"}"#,
        r#"{"class": "CleanupJob", "args": []}"#,
        r#"{"class": "ProcessCompanyDataJob", "args": [42, "Acme Corp", {"priority": "high"}]}"#,
    ];
    for payload in payloads {
        let job = Job::from_json(payload).unwrap();
        middleware.call(&job, "default", || ());
    }

    let args: Vec<Option<Vec<Value>>> = recorder.records().into_iter().map(|r| r.args).collect();
    assert_eq!(
        args,
        vec![
            None,
            Some(vec![]),
            Some(vec![json!(42), json!("Acme Corp"), json!({"priority": "high"})]),
        ]
    );
}

#[test]
fn test_default_sink_logs_measurement_line() {
    let log = CapturedLog::default();
    let middleware = MemoryMiddleware::new(Arc::new(test_config(&log)));

    middleware.call(&test_job(), "test_queue", || ());

    let info = log.at(Level::INFO);
    assert_eq!(info.len(), 1);
    assert!(info[0].contains("[MemoryLogger] job=TestJob queue=test_queue memory_mb="));
    assert!(info[0].contains("objects="));
}

#[test]
fn test_return_value_passes_through() {
    let log = CapturedLog::default();
    let (middleware, _recorder) = recording_middleware(test_config(&log));

    let value = middleware.call(&test_job(), "test_queue", || vec![1, 2, 3]);
    assert_eq!(value, vec![1, 2, 3]);

    let result: Result<u32, String> = middleware.call(&test_job(), "test_queue", || Err("boom".into()));
    assert_eq!(result, Err("boom".to_string()));
}

#[test]
fn test_job_panic_is_measured_and_resumed() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        middleware.call(&test_job(), "test_queue", || -> () { panic!("test error") })
    }));

    let payload = outcome.unwrap_err();
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"test error"));
    assert_eq!(recorder.len(), 1);
}

#[test]
fn test_sink_error_is_logged_not_raised() {
    let log = CapturedLog::default();
    let config = test_config(&log).with_sink(sink::from_fn(|_, _, _, _, _| Err("callback error".into())));
    let middleware = MemoryMiddleware::new(Arc::new(config));

    let value = middleware.call(&test_job(), "test_queue", || "done");

    assert_eq!(value, "done");
    let errors = log.at(Level::ERROR);
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("callback failed"));
    assert!(errors[0].contains("callback error"));
    assert!(log
        .contents()
        .contains("memory logger callback failed: callback error"));
}

#[test]
fn test_sink_panic_is_isolated() {
    let log = CapturedLog::default();
    let config = test_config(&log).with_sink(sink::from_fn(|_, _, _, _, _| panic!("sink exploded")));
    let middleware = MemoryMiddleware::new(Arc::new(config));

    let value = middleware.call(&test_job(), "test_queue", || 7);

    assert_eq!(value, 7);
    assert_eq!(
        log.at(Level::ERROR),
        vec!["memory logger callback failed: sink exploded".to_string()]
    );
}

#[test]
fn test_sink_failure_does_not_mask_job_panic() {
    let log = CapturedLog::default();
    let config = test_config(&log).with_sink(sink::from_fn(|_, _, _, _, _| Err("callback error".into())));
    let middleware = MemoryMiddleware::new(Arc::new(config));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        middleware.call(&test_job(), "test_queue", || -> () { panic!("job failed") })
    }));

    assert_eq!(outcome.unwrap_err().downcast_ref::<&str>(), Some(&"job failed"));
    assert_eq!(log.at(Level::ERROR).len(), 1);
}

fn panicking_logger_config() -> Configuration {
    Configuration::new()
        .with_logger(logger_fn(|_, _| panic!("logger down")))
        .with_memory_probe(|| 256.0_f64)
        .with_allocation_counter(|| 0u64)
}

#[test]
fn test_panicking_logger_keeps_job_value() {
    let middleware = MemoryMiddleware::new(Arc::new(panicking_logger_config()));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        middleware.call(&test_job(), "test_queue", || 7)
    }));

    assert_eq!(outcome.ok(), Some(7));
}

#[test]
fn test_panicking_logger_keeps_job_panic_payload() {
    let middleware = MemoryMiddleware::new(Arc::new(panicking_logger_config()));

    let outcome = panic::catch_unwind(AssertUnwindSafe(|| {
        middleware.call(&test_job(), "test_queue", || -> () { panic!("job failed") })
    }));

    assert_eq!(outcome.unwrap_err().downcast_ref::<&str>(), Some(&"job failed"));
}

#[test]
fn test_skips_queues_not_in_allow_list() {
    let log = CapturedLog::default();
    let (middleware, recorder) =
        recording_middleware(test_config(&log).with_queues(["important", "critical"]));
    let ran = AtomicBool::new(false);

    middleware.call(&test_job(), "unimportant_queue", || ran.store(true, Ordering::SeqCst));

    assert!(ran.load(Ordering::SeqCst));
    assert!(recorder.is_empty());
    assert!(log.lines().is_empty());
}

#[test]
fn test_processes_queues_in_allow_list() {
    let log = CapturedLog::default();
    let (middleware, recorder) =
        recording_middleware(test_config(&log).with_queues(["test_queue", "critical"]));

    middleware.call(&test_job(), "test_queue", || ());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].job_class, "TestJob");
    assert_eq!(records[0].queue, "test_queue");
}

#[test]
fn test_empty_allow_list_processes_all_queues() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log).with_queues(Vec::<String>::new()));

    middleware.call(&test_job(), "any_queue", || ());

    let records = recorder.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].queue, "any_queue");
}

#[test]
fn test_adapter_wrapper_reports_wrapped_class() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));
    let job = Job::new("ActiveJob::QueueAdapters::SidekiqAdapter::JobWrapper").with_wrapped("ReportJob");

    middleware.call(&job, "reports", || ());

    assert_eq!(recorder.records()[0].job_class, "ReportJob");
}

#[test]
fn test_job_body_runs_exactly_once() {
    let log = CapturedLog::default();
    let (middleware, _recorder) = recording_middleware(test_config(&log));
    let runs = AtomicUsize::new(0);

    middleware.call(&test_job(), "test_queue", || runs.fetch_add(1, Ordering::SeqCst));

    assert_eq!(runs.load(Ordering::SeqCst), 1);
}

#[test]
fn test_concurrent_jobs_share_configuration() {
    let log = CapturedLog::default();
    let (middleware, recorder) = recording_middleware(test_config(&log));

    thread::scope(|s| {
        for i in 0..8 {
            let middleware = &middleware;
            s.spawn(move || {
                let job = Job::new(format!("Job{i}"));
                middleware.call(&job, "default", || ());
            });
        }
    });

    assert_eq!(recorder.len(), 8);
}

#[test]
fn test_closure_sink_receives_five_fields() {
    let log = CapturedLog::default();
    let calls = Arc::new(Mutex::new(Vec::new()));
    let captured = calls.clone();
    let config = test_config(&log).with_sink(sink::from_fn(move |job, queue, memory, objects, args| {
        captured
            .lock()
            .unwrap()
            .push((job.to_string(), queue.to_string(), memory, objects, args.map(|a| a.len())));
        Ok(())
    }));
    let middleware = MemoryMiddleware::new(Arc::new(config));

    middleware.call(&test_job(), "test_queue", || ());

    let calls = calls.lock().unwrap();
    assert_eq!(*calls, vec![("TestJob".to_string(), "test_queue".to_string(), 0.0, 0, Some(2))]);
}

#[test]
fn test_middleware_keeps_its_own_configuration() {
    let log = CapturedLog::default();
    let first = Arc::new(RecordingSink::new());
    let second = Arc::new(RecordingSink::new());

    let a = MemoryMiddleware::new(Arc::new(test_config(&log).with_sink(first.clone())));
    let b = MemoryMiddleware::new(Arc::new(Configuration::clone(a.config()).with_sink(second.clone())));

    a.call(&test_job(), "q", || ());
    b.call(&test_job(), "q", || ());
    b.call(&test_job(), "q", || ());

    assert_eq!(first.len(), 1);
    assert_eq!(second.len(), 2);
}
