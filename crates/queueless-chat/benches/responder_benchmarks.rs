//! Benchmarks for the responder hot path.
//!
//! Measures normalization alone and full `respond` calls for each kind of
//! resolution against the bundled knowledge base.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use queueless_chat::{normalize, Capabilities, CapabilityError, Responder};
use queueless_core::{ChatMessage, ConversationState};

/// Host that accepts every effect without doing anything.
struct NullHost;

impl Capabilities for NullHost {
    fn navigate_login(&mut self) -> Result<(), CapabilityError> {
        Ok(())
    }

    fn scroll_to(&mut self, _section: &str) -> Result<(), CapabilityError> {
        Ok(())
    }

    fn export_transcript(&mut self, _messages: &[ChatMessage]) -> Result<(), CapabilityError> {
        Ok(())
    }
}

fn bench_normalize(c: &mut Criterion) {
    let text = "Olá! Como está a fila do Mercado Central hoje? Vi em https://queueless.example/lojas que estava LOTADO…";
    c.bench_function("normalize_sentence", |b| {
        b.iter(|| normalize(black_box(text)))
    });
}

fn bench_respond(c: &mut Criterion) {
    let responder = Responder::bundled().expect("bundled knowledge base");
    let cases = [
        ("respond_action", "entrar"),
        ("respond_location", "como está a fila do Mercado Central?"),
        ("respond_knowledge", "quem desenvolveu a plataforma?"),
        ("respond_clarification", "lorem ipsum dolor sit amet"),
    ];

    for (name, input) in cases {
        c.bench_function(name, |b| {
            b.iter(|| {
                let mut state = ConversationState::new();
                responder
                    .respond(black_box(input), &mut state, &mut NullHost)
                    .expect("respond")
            })
        });
    }
}

criterion_group!(benches, bench_normalize, bench_respond);
criterion_main!(benches);
