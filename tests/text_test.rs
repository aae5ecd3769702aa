use chartstudio::analytics::text::{
    KeywordOptions, SentimentLabel, analyze_sentiment, extract_keywords, tokenize,
};

#[test]
fn tokenizer_lowercases_and_splits() {
    assert_eq!(
        tokenize("Charts, DATA & dashboards: 2024!"),
        vec!["charts", "data", "dashboards", "2024"]
    );
    assert_eq!(tokenize("It\u{2019}s fine"), vec!["it's", "fine"]);
    assert!(tokenize("  ...  ").is_empty());
}

#[test]
fn keywords_are_counted_and_ranked() {
    let texts = [
        "The dashboard's charts load fast",
        "Charts and more charts in the dashboard",
        "Export the data in 2024",
    ];
    let keywords = extract_keywords(&texts, &KeywordOptions::default());

    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words, vec!["charts", "dashboard", "data", "export", "fast", "load"]);
    assert_eq!(keywords[0].count, 3);
    assert_eq!(keywords[1].count, 2);

    let total: usize = keywords.iter().map(|k| k.count).sum();
    assert!((keywords[0].frequency - 3.0 / total as f64).abs() < 1e-9);
}

#[test]
fn keyword_options_limit_output() {
    let texts = vec!["alpha beta gamma delta".to_string(), "go to it".to_string()];
    let options = KeywordOptions {
        top_n: 2,
        min_length: 5,
    };
    let keywords = extract_keywords(&texts, &options);
    let words: Vec<&str> = keywords.iter().map(|k| k.word.as_str()).collect();
    assert_eq!(words, vec!["alpha", "delta"]);
    assert!(extract_keywords::<&str>(&[], &KeywordOptions::default()).is_empty());
}

#[test]
fn sentiment_scores_and_labels() {
    let positive = analyze_sentiment("Great charts, I love the new export!");
    assert_eq!(positive.score, 6);
    assert_eq!(positive.label, SentimentLabel::Positive);
    assert_eq!(positive.positive, vec!["great", "love"]);
    assert!(positive.negative.is_empty());

    let negative = analyze_sentiment("The preview is slow and the legend is broken");
    assert_eq!(negative.score, -3);
    assert_eq!(negative.label, SentimentLabel::Negative);

    let neutral = analyze_sentiment("The chart has four series");
    assert_eq!(neutral.score, 0);
    assert_eq!(neutral.comparative, 0.0);
    assert_eq!(neutral.label, SentimentLabel::Neutral);

    assert_eq!(analyze_sentiment("").label, SentimentLabel::Neutral);
}

#[test]
fn negation_flips_the_next_word() {
    let result = analyze_sentiment("not good, don't like it");
    assert_eq!(result.score, -5);
    assert_eq!(result.negative, vec!["good", "like"]);
    assert!((result.comparative - (-5.0 / 5.0)).abs() < 1e-9);
}
