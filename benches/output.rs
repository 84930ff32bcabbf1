use criterion::{Criterion, criterion_group, criterion_main};
use keeplog::output::{ConsoleCapture, ConsoleOutput, ConsoleStream, FileOutput, LogRecord, Output};
use keeplog::{Disposition, Level, LineFormatter, Logger, TargetOverrides};
use std::hint::black_box;
use tempfile::TempDir;

fn bench_file_output_write(c: &mut Criterion) {
    let tmp = TempDir::new().expect("failed to create temp dir");
    let output = FileOutput::new(tmp.path().join("bench.log"), false)
        .disposition(Disposition::Overwrite)
        .formatter(LineFormatter::new().with_level(true).with_timestamp(true));
    let record = LogRecord::new(Level::Info, "benchmark log message", 1);

    c.bench_function("FileOutput::write", |b| {
        b.iter(|| {
            output.write(black_box(&record)).expect("write failed");
        });
    });

    output.close();
}

fn bench_console_capture_write(c: &mut Criterion) {
    let capture = ConsoleCapture::new();
    let output = ConsoleOutput::new().stream(ConsoleStream::Capture(capture.clone()));
    let record = LogRecord::new(Level::Error, "benchmark log message", 0);

    c.bench_function("ConsoleOutput::write (capture)", |b| {
        b.iter(|| {
            output.write(black_box(&record)).expect("write failed");
            capture.clear();
        });
    });
}

fn bench_logger_filtered(c: &mut Criterion) {
    let (mut logger, _capture) = Logger::with_console_capture();
    logger
        .init(&keeplog::Settings::new())
        .expect("init failed");

    c.bench_function("Logger::log (filtered)", |b| {
        b.iter(|| {
            logger
                .log(
                    Level::Debug,
                    black_box("below threshold"),
                    0,
                    TargetOverrides::default(),
                )
                .expect("log failed");
        });
    });
}

criterion_group!(
    benches,
    bench_file_output_write,
    bench_console_capture_write,
    bench_logger_filtered
);
criterion_main!(benches);
