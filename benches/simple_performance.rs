use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use sms_core::testing::RecordingGateway;
use sms_phones::{Message, PhoneStore, Registry};
use sms_web_generic::PhoneProcessor;
use std::sync::Arc;
use tokio::runtime::Runtime;

fn registry() -> Registry {
    Registry::new(Arc::new(RecordingGateway::new()))
}

fn benchmark_inbound_storage(c: &mut Criterion) {
    let mut group = c.benchmark_group("inbound_storage");

    for phones in [1usize, 10, 100] {
        let registry = registry();
        let mut counter = 0u64;
        group.bench_with_input(
            BenchmarkId::new("receive_inbound", phones),
            &phones,
            |b, &phones| {
                b.iter(|| {
                    counter += 1;
                    let number = format!("+1555{:07}", counter % phones as u64);
                    black_box(registry.receive_inbound(
                        &number,
                        Message::new(format!("m-{counter}"), "+15551230001", "hello"),
                    ))
                })
            },
        );
    }
    group.finish();
}

fn benchmark_webhook_processing(c: &mut Criterion) {
    let processor = PhoneProcessor::new(Arc::new(registry()));
    let payload = r#"{"originationNumber":"+15551230001","destinationNumber":"+15559998888","messageKeyword":"K","messageBody":"hello","inboundMessageId":"m-1"}"#;

    c.bench_function("process_inbound_webhook", |b| {
        b.iter(|| black_box(processor.receive_sms(payload.as_bytes())))
    });
}

fn benchmark_concurrent_receive(c: &mut Criterion) {
    let rt = Runtime::new().unwrap();
    let registry = registry();

    c.bench_function("concurrent_receive_10_tasks", |b| {
        b.to_async(&rt).iter(|| {
            let registry = registry.clone();
            async move {
                let tasks = (0..10).map(|i| {
                    let registry = registry.clone();
                    tokio::spawn(async move {
                        registry
                            .receive_inbound(
                                "+15559998888",
                                Message::new(format!("m-{i}"), "+15551230001", "hi"),
                            )
                            .unwrap();
                    })
                });
                for task in futures::future::join_all(tasks).await {
                    task.unwrap();
                }
            }
        })
    });
}

fn benchmark_list_messages(c: &mut Criterion) {
    let registry = registry();
    for i in 0..1000 {
        registry
            .receive_inbound("+15559998888", Message::new(format!("m-{i}"), "+1", "x"))
            .unwrap();
    }
    let processor = PhoneProcessor::new(Arc::new(registry));

    c.bench_function("list_1000_messages", |b| {
        b.iter(|| black_box(processor.list_messages("+15559998888")))
    });
}

criterion_group!(
    benches,
    benchmark_inbound_storage,
    benchmark_webhook_processing,
    benchmark_concurrent_receive,
    benchmark_list_messages
);
criterion_main!(benches);
