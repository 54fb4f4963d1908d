//! Integration tests for letter_topics

use letter_topics::*;

/// Build one word record with the given letter metadata.
fn record(
    letter: &str,
    sender: &str,
    sex: &str,
    rank: &str,
    rel: &str,
    year: i32,
    word: &str,
    tag: &str,
) -> WordRecord {
    WordRecord {
        letter_id: letter.to_string(),
        sender: sender.to_string(),
        sender_sex: sex.to_string(),
        sender_rank: rank.to_string(),
        rel_code: rel.to_string(),
        year,
        word: word.to_string(),
        tag: tag.to_string(),
    }
}

/// A small synthetic letter corpus: three senders, two broad themes
/// (war and court life), years 1595-1660.
fn sample_corpus() -> RecordTable {
    let letters: &[(&str, &str, &str, &str, &str, i32, &str)] = &[
        ("L1", "anne", "F", "GA", "FN", 1595, "the king sent his army to the war"),
        ("L2", "anne", "F", "GA", "FN", 1601, "soldiers and captains marched to battle"),
        ("L3", "henry", "M", "N", "T", 1610, "the queen held a dance at court"),
        ("L4", "henry", "M", "N", "T", 1622, "music and dancing filled the court"),
        ("L5", "margaret", "F", "GA", "FS", 1640, "news of the war reached the king"),
        ("L6", "margaret", "F", "GA", "FS", 1660, "the queen wrote letters about the court"),
    ];

    let mut records = Vec::new();
    for &(id, sender, sex, rank, rel, year, text) in letters {
        for word in text.split_whitespace() {
            records.push(record(id, sender, sex, rank, rel, year, word, "NN1"));
        }
    }
    RecordTable::new(records)
}

#[test]
fn test_full_pipeline() {
    let table = sample_corpus();

    // Filter
    let filtered = corpus::filter::by_years(&table, 1595, 1660);
    assert_eq!(filtered.len(), table.len());

    // Assemble
    let documents = assemble(&filtered);
    assert_eq!(documents.len(), 6);
    assert_eq!(documents[0].key.letter_id, "L1");
    assert_eq!(documents[0].text, "the king sent his army to the war");

    // Normalize
    let normalizer = Normalizer::new();
    let token_lists = normalizer.normalize_documents(&documents);
    assert_eq!(token_lists.len(), 6);
    assert!(token_lists.iter().all(|tokens| !tokens.is_empty()));

    // Encode
    let corpus = BowCorpus::build(&token_lists, &VocabularyOptions::default()).unwrap();
    assert_eq!(corpus.num_documents(), 6);
    assert!(corpus.vocabulary().len() > 10);

    // Train
    let model = LdaModel::train(&corpus, &LdaConfig::new(2, 50)).unwrap();
    assert_eq!(model.num_topics(), 2);

    // Report
    let keys: Vec<LetterKey> = documents.into_iter().map(|d| d.key).collect();
    let dominant = dominant_topics(&model, &keys).unwrap();
    assert_eq!(dominant.len(), 6);

    let representative = representative_letters(&dominant);
    let summary = topic_summary(&dominant);
    assert!(!representative.is_empty());
    assert!(!summary.is_empty());

    let ranked = top_topics(&model, &corpus);
    assert_eq!(ranked.len(), 2);
}

#[test]
fn test_run_analysis_produces_all_artifacts() {
    let output = run_analysis(&sample_corpus(), &AnalysisRequest::new(2, 50)).unwrap();

    assert_eq!(output.dominant_topics.len(), 6);
    assert_eq!(output.document_keys.len(), 6);
    assert_eq!(output.top_topics.len(), 2);

    for topic in &output.top_topics {
        assert!(!topic.words.is_empty());
        for (word, weight) in &topic.words {
            assert!(!word.is_empty());
            assert!(*weight > 0.0);
        }
    }
}

#[test]
fn test_three_letter_example() {
    // Three letters, two topics, 50 iterations, the fixed seed.
    let texts = ["the king sent news", "queen wrote letter", "king queen meet"];
    let mut records = Vec::new();
    for (i, text) in texts.iter().enumerate() {
        let id = format!("L{}", i + 1);
        for word in text.split_whitespace() {
            records.push(record(&id, "anne", "F", "GA", "FN", 1600, word, "NN1"));
        }
    }
    let table = RecordTable::new(records);

    // Normalization drops nothing here: every token is alphabetic with
    // more than one character.
    let documents = assemble(&table);
    let token_lists = Normalizer::new().normalize_documents(&documents);
    let lengths: Vec<usize> = token_lists.iter().map(Vec::len).collect();
    assert_eq!(lengths, [4, 3, 3]);

    let output = run_analysis(&table, &AnalysisRequest::new(2, 50)).unwrap();
    assert_eq!(output.dominant_topics.len(), 3);
    for row in &output.dominant_topics {
        assert!(row.dominant_topic < 2);
        assert!(row.contribution >= 0.0 && row.contribution <= 1.0);
    }
}

#[test]
fn test_year_filter_without_matches_stops_before_training() {
    let request = AnalysisRequest::new(2, 50).with_filters(FilterSpec {
        year_range: Some((1700, 1750)),
        ..FilterSpec::default()
    });
    let err = run_analysis(&sample_corpus(), &request).unwrap_err();
    assert!(err.is_empty_corpus());
}

#[test]
fn test_topic_count_exceeding_vocabulary_fails_with_training_error() {
    // 50 distinct words across a handful of letters.
    let mut records = Vec::new();
    for i in 0..50 {
        let id = format!("L{}", i % 5);
        records.push(record(&id, "anne", "F", "GA", "FN", 1600, &format!("word{:02}", i), "NN1"));
    }
    let table = RecordTable::new(records);

    let err = run_analysis(&table, &AnalysisRequest::new(1000, 10)).unwrap_err();
    assert!(matches!(err, AnalysisError::Training { .. }));
}

#[test]
fn test_pipeline_is_deterministic_end_to_end() {
    let table = sample_corpus();
    let request = AnalysisRequest::new(3, 40);

    let a = run_analysis(&table, &request).unwrap();
    let b = run_analysis(&table, &request).unwrap();

    assert_eq!(a.dominant_topics, b.dominant_topics);
    assert_eq!(a.representative_letters, b.representative_letters);
    assert_eq!(a.topic_summary, b.topic_summary);
    assert_eq!(a.top_topics, b.top_topics);
}

#[test]
fn test_document_order_flows_from_assembler_to_reporter() {
    let table = sample_corpus();
    let assembled_keys: Vec<LetterKey> =
        assemble(&table).into_iter().map(|d| d.key).collect();

    let output = run_analysis(&table, &AnalysisRequest::new(2, 30)).unwrap();
    assert_eq!(output.document_keys, assembled_keys);
    for (row, key) in output.dominant_topics.iter().zip(&assembled_keys) {
        assert_eq!(row.letter_id, key.letter_id);
        assert_eq!(row.sender, key.sender);
    }
}

#[test]
fn test_summary_proportions_sum_to_one() {
    let output = run_analysis(&sample_corpus(), &AnalysisRequest::new(3, 50)).unwrap();
    let total: f64 = output.topic_summary.iter().map(|r| r.proportion).sum();
    assert!((total - 1.0).abs() < 1e-4, "proportions sum to {}", total);
}

#[test]
fn test_representative_letters_match_group_maxima() {
    let output = run_analysis(&sample_corpus(), &AnalysisRequest::new(2, 50)).unwrap();

    let mut observed: Vec<u32> = output
        .dominant_topics
        .iter()
        .map(|r| r.dominant_topic)
        .collect();
    observed.sort_unstable();
    observed.dedup();

    assert_eq!(output.representative_letters.len(), observed.len());
    for rep in &output.representative_letters {
        let group_max = output
            .dominant_topics
            .iter()
            .filter(|r| r.dominant_topic == rep.topic)
            .map(|r| r.contribution)
            .fold(f64::NEG_INFINITY, f64::max);
        assert!((rep.contribution - (group_max * 1000.0).round() / 1000.0).abs() < 1e-9);
    }
}

#[test]
fn test_columnar_handoff_feeds_the_pipeline() {
    let input = ColumnarInput::new()
        .with_strings("ID", ["L1", "L1", "L1", "L2", "L2", "L2"])
        .with_strings("Sender", ["anne", "anne", "anne", "henry", "henry", "henry"])
        .with_strings("SenderSex", ["F", "F", "F", "M", "M", "M"])
        .with_strings("SenderRank", ["GA", "GA", "GA", "N", "N", "N"])
        .with_strings("RelCode", ["FN", "FN", "FN", "T", "T", "T"])
        .with_integers("Year", [1600, 1600, 1600, 1620, 1620, 1620])
        .with_strings("Words", ["king", "sent", "army", "queen", "held", "court"])
        .with_strings("Tags", ["NN1", "VB", "NN1", "NN1", "VB", "NN1"]);

    let table = RecordTable::from_columns(&input).unwrap();
    let output = run_analysis(&table, &AnalysisRequest::new(2, 20)).unwrap();
    assert_eq!(output.dominant_topics.len(), 2);
}

#[test]
fn test_stats_aggregations_over_sample_corpus() {
    let table = sample_corpus();

    let counts = stats::word_counts(&table);
    assert_eq!(counts.len(), 6);
    assert_eq!(counts[0].letter_id, "L1");
    assert_eq!(counts[0].count, 8);

    let pos = stats::pos_counts(&table);
    assert!(pos.iter().all(|r| r.percentage > 0.0 && r.percentage <= 100.0));

    let tags = stats::distinct_tags(&table);
    assert_eq!(tags, ["NN1"]);
}
