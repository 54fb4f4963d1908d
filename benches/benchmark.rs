//! Benchmarks for letter_topics

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use letter_topics::*;

/// Word pool for synthetic letters; two loose themes so the model has
/// structure to find.
const WORDS: &[&str] = &[
    "king", "war", "army", "soldier", "battle", "camp", "sword", "victory",
    "queen", "court", "dance", "music", "feast", "gown", "letter", "news",
    "brother", "sister", "mother", "father", "health", "sickness", "money",
    "debt", "land", "horse", "journey", "london", "winter", "summer",
];

/// A deterministic synthetic corpus: `letters` letters of `words_per_letter`
/// tokens each, cycling through the word pool with a letter-dependent
/// stride.
fn synthetic_table(letters: usize, words_per_letter: usize) -> RecordTable {
    let mut records = Vec::with_capacity(letters * words_per_letter);
    for li in 0..letters {
        let letter_id = format!("L{:04}", li);
        let sender = format!("sender{}", li % 7);
        for wi in 0..words_per_letter {
            records.push(WordRecord {
                letter_id: letter_id.clone(),
                sender: sender.clone(),
                sender_sex: if li % 2 == 0 { "F" } else { "M" }.to_string(),
                sender_rank: "GA".to_string(),
                rel_code: "FN".to_string(),
                year: 1590 + (li % 70) as i32,
                word: WORDS[(li * 3 + wi) % WORDS.len()].to_string(),
                tag: "NN1".to_string(),
            });
        }
    }
    RecordTable::new(records)
}

fn benchmark_filtering(c: &mut Criterion) {
    let table = synthetic_table(200, 40);

    c.bench_function("filter_by_years", |b| {
        b.iter(|| corpus::filter::by_years(black_box(&table), 1600, 1650))
    });

    c.bench_function("filter_chain", |b| {
        let filters = FilterSpec {
            tags: Some(vec!["NN1".to_string()]),
            sex: Some("F".to_string()),
            year_range: Some((1600, 1650)),
            ..FilterSpec::default()
        };
        b.iter(|| filters.apply(black_box(&table)))
    });
}

fn benchmark_assembly(c: &mut Criterion) {
    let mut group = c.benchmark_group("assemble_by_size");
    for letters in [50, 200, 500].iter() {
        let table = synthetic_table(*letters, 40);
        group.throughput(Throughput::Elements(table.len() as u64));
        group.bench_with_input(BenchmarkId::from_parameter(letters), &table, |b, table| {
            b.iter(|| assemble(black_box(table)))
        });
    }
    group.finish();
}

fn benchmark_normalization(c: &mut Criterion) {
    let table = synthetic_table(200, 40);
    let documents = assemble(&table);
    let normalizer = Normalizer::new();

    c.bench_function("normalize_documents", |b| {
        b.iter(|| normalizer.normalize_documents(black_box(&documents)))
    });

    let mut group = c.benchmark_group("normalize_by_size");
    for letters in [50, 200, 500].iter() {
        let docs = assemble(&synthetic_table(*letters, 40));
        let bytes: usize = docs.iter().map(|d| d.text.len()).sum();
        group.throughput(Throughput::Bytes(bytes as u64));
        group.bench_with_input(BenchmarkId::from_parameter(letters), &docs, |b, docs| {
            b.iter(|| normalizer.normalize_documents(black_box(docs)))
        });
    }
    group.finish();
}

fn benchmark_encoding(c: &mut Criterion) {
    let documents = assemble(&synthetic_table(200, 40));
    let token_lists = Normalizer::new().normalize_documents(&documents);

    c.bench_function("bow_build", |b| {
        b.iter(|| BowCorpus::build(black_box(&token_lists), &VocabularyOptions::default()))
    });
}

fn benchmark_training(c: &mut Criterion) {
    let documents = assemble(&synthetic_table(100, 40));
    let token_lists = Normalizer::new().normalize_documents(&documents);
    let corpus = BowCorpus::build(&token_lists, &VocabularyOptions::default()).unwrap();

    c.bench_function("lda_train", |b| {
        b.iter(|| LdaModel::train(black_box(&corpus), &LdaConfig::new(5, 20)))
    });

    // Cost scaling with the topic count
    let mut group = c.benchmark_group("lda_train_topics");
    for topics in [2usize, 5, 10].iter() {
        group.bench_with_input(
            BenchmarkId::from_parameter(topics),
            topics,
            |b, &topics| b.iter(|| LdaModel::train(black_box(&corpus), &LdaConfig::new(topics, 20))),
        );
    }
    group.finish();
}

fn benchmark_reporting(c: &mut Criterion) {
    let table = synthetic_table(100, 40);
    let documents = assemble(&table);
    let token_lists = Normalizer::new().normalize_documents(&documents);
    let corpus = BowCorpus::build(&token_lists, &VocabularyOptions::default()).unwrap();
    let model = LdaModel::train(&corpus, &LdaConfig::new(5, 20)).unwrap();
    let keys: Vec<LetterKey> = documents.into_iter().map(|d| d.key).collect();
    let rows = dominant_topics(&model, &keys).unwrap();

    c.bench_function("dominant_topics", |b| {
        b.iter(|| dominant_topics(black_box(&model), black_box(&keys)))
    });

    c.bench_function("topic_summary", |b| {
        b.iter(|| topic_summary(black_box(&rows)))
    });

    c.bench_function("top_topics", |b| {
        b.iter(|| top_topics(black_box(&model), black_box(&corpus)))
    });
}

fn benchmark_full_pipeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("full_pipeline");
    for letters in [20, 50, 100].iter() {
        let table = synthetic_table(*letters, 40);
        group.throughput(Throughput::Elements(*letters as u64));
        group.bench_with_input(BenchmarkId::from_parameter(letters), &table, |b, table| {
            b.iter(|| run_analysis(black_box(table), &AnalysisRequest::new(5, 20)))
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    benchmark_filtering,
    benchmark_assembly,
    benchmark_normalization,
    benchmark_encoding,
    benchmark_training,
    benchmark_reporting,
    benchmark_full_pipeline,
);

criterion_main!(benches);
