use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use gemini_polish::llm::{build_improvement_prompt, locate_sentence, Settings};
use gemini_polish::position::position_at;

fn sample_document() -> String {
    let paragraph = "The quick brown fox jumps over the lazy dog. Is it quick? It is!\n";
    let mut text = paragraph.repeat(500);
    text.push_str("and this last sentence is still being typed");
    text
}

fn bench_locate(c: &mut Criterion) {
    let text = sample_document();
    let cursor = position_at(&text, text.len());

    c.bench_function("locate_sentence_long_document", |b| {
        b.iter(|| locate_sentence(black_box(&text), black_box(cursor)))
    });
}

fn bench_prompt(c: &mut Criterion) {
    let mut settings = Settings::default();
    settings
        .add_custom_style("Witty", "The tone should be witty.")
        .expect("valid style");
    settings.writing_style = "Witty".to_string();
    let config = settings.configuration();

    c.bench_function("build_improvement_prompt", |b| {
        b.iter(|| build_improvement_prompt(black_box("their going home"), black_box(&config)))
    });
}

criterion_group!(benches, bench_locate, bench_prompt);
criterion_main!(benches);
