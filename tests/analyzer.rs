use std::collections::HashSet;

use serpkit::analyzer::*;
use serpkit::data_models::{HeadingLevel, Language, OutlineNode, ScoreKind};
use serpkit::knowledge;

#[cfg(test)]
mod outline_tests {
    use super::*;

    fn h2_texts(outline: &[OutlineNode]) -> Vec<&str> {
        outline
            .iter()
            .filter(|n| n.level == HeadingLevel::H2)
            .map(|n| n.text.as_str())
            .collect()
    }

    #[test]
    fn test_empty_titles_give_only_h1() {
        let empty: [&str; 0] = [];
        let outline = propose_outline("how to brew tea", &empty, &empty);
        assert_eq!(outline, vec![OutlineNode::h1("how to brew tea")]);
    }

    #[test]
    fn test_repeated_bigram_surfaces() {
        let titles = ["Best cats food", "Best cats toys", "Best cats food"];
        let outline = propose_outline("cats", &titles, &[]);
        assert_eq!(outline[0], OutlineNode::h1("cats"));
        assert!(h2_texts(&outline).contains(&"Best cats"));
    }

    #[test]
    fn test_ngrams_ranked_by_frequency() {
        let titles = ["Best cats food", "Best cats toys", "Best cats food"];
        let grams = common_ngrams(&titles, MIN_NGRAM_COUNT);
        assert_eq!(grams[0], ("best cats".to_string(), 3));
        assert!(grams.iter().all(|(_, count)| *count >= 2));
        // "cats food" is seen twice, "cats toys" only once
        assert!(grams.iter().any(|(g, _)| g == "cats food"));
        assert!(!grams.iter().any(|(g, _)| g == "cats toys"));
    }

    #[test]
    fn test_fallback_appends_titles_when_outline_is_short() {
        let titles = ["Green tea guide", "Oolong explained", "Matcha at home"];
        let outline = propose_outline("tea", &titles, &[]);
        assert_eq!(
            outline,
            vec![
                OutlineNode::h1("tea"),
                OutlineNode::h2("Green tea guide"),
                OutlineNode::h2("Oolong explained"),
                OutlineNode::h2("Matcha at home"),
            ]
        );
    }

    #[test]
    fn test_fallback_uses_at_most_five_titles() {
        let titles = ["one", "two", "three", "four", "five", "six", "seven"];
        let outline = propose_outline("numbers", &titles, &[]);
        assert_eq!(outline.len(), 1 + FALLBACK_TITLES);
        assert_eq!(outline.last().unwrap().text, "five");
    }

    #[test]
    fn test_no_fallback_when_enough_subtopics() {
        let titles = [
            "Cold brew coffee recipe",
            "Cold brew coffee ratio",
            "Cold brew coffee recipe",
        ];
        let outline = propose_outline("cold brew", &titles, &[]);
        assert!(outline.len() >= MIN_OUTLINE_LEN);
        assert!(outline.len() <= 1 + MAX_SUBTOPICS);
        assert!(!h2_texts(&outline).contains(&"Cold brew coffee ratio"));
        assert_eq!(h2_texts(&outline)[0], "Cold brew");
    }

    #[test]
    fn test_short_words_and_punctuation_ignored() {
        let titles = ["Go to: do it!", "Go to: do it!"];
        // every token is 2 chars or less, so no n-grams exist
        assert!(common_ngrams(&titles, 2).is_empty());
    }

    #[test]
    fn test_cyrillic_titles() {
        let titles = ["Кращі корми для котів", "Кращі корми 2024", "Іграшки для котів"];
        let grams = common_ngrams(&titles, 2);
        assert_eq!(grams[0].0, "кращі корми");
        let outline = propose_outline("коти", &titles, &[]);
        assert!(h2_texts(&outline).contains(&"Кращі корми"));
    }
}

#[cfg(test)]
mod wateriness_tests {
    use super::*;

    #[test]
    fn test_only_stopwords_is_fully_watery() {
        let stop = knowledge::profile(Language::En).stopwords();
        assert_eq!(wateriness("This is... no wait", stop), 25.0);
        assert_eq!(wateriness("This. THAT, also very JUST", stop), 100.0);
    }

    #[test]
    fn test_no_tokens_is_zero() {
        let stop: HashSet<&str> = HashSet::from(["the"]);
        assert_eq!(wateriness("", &stop), 0.0);
        assert_eq!(wateriness("  ?! -- ...", &stop), 0.0);
    }

    #[test]
    fn test_rounded_to_two_decimals() {
        let stop: HashSet<&str> = HashSet::from(["very"]);
        assert_eq!(wateriness("very good tea", &stop), 33.33);
    }

    #[test]
    fn test_each_language_has_own_set() {
        let ru = knowledge::profile(Language::Ru).stopwords();
        let en = knowledge::profile(Language::En).stopwords();
        assert_eq!(wateriness("Это очень просто", ru), 100.0);
        assert_eq!(wateriness("Это очень просто", en), 0.0);

        let uk = knowledge::profile(Language::Uk).stopwords();
        assert_eq!(wateriness("Це дуже смачний чай", uk), 50.0);
    }

    #[test]
    fn test_score_result_kind() {
        let stop = knowledge::profile(Language::En).stopwords();
        let score = wateriness_score("just tea", stop);
        assert_eq!(score.kind, ScoreKind::Wateriness);
        assert_eq!(score.value, 50.0);
    }
}

#[cfg(test)]
mod uniqueness_tests {
    use super::*;

    #[test]
    fn test_no_references_is_fully_unique() {
        let none: [&str; 0] = [];
        assert_eq!(uniqueness("anything at all", &none), 100.0);
        assert_eq!(uniqueness("", &none), 100.0);
    }

    #[test]
    fn test_identical_text_has_zero_uniqueness() {
        let text = "Green tea is brewed at 80 degrees for two minutes. ".repeat(10);
        assert_eq!(uniqueness(&text, &[text.as_str()]), 0.0);
    }

    #[test]
    fn test_best_reference_wins() {
        let refs = ["completely different", "abyd"];
        // against "abyd" the similarity is 0.75
        assert_eq!(uniqueness("abxd", &refs), 25.0);
    }

    #[test]
    fn test_disjoint_text_is_fully_unique() {
        assert_eq!(uniqueness("aaaa", &["bbbb"]), 100.0);
    }

    #[test]
    fn test_similarity_is_symmetric_for_simple_cases() {
        assert_eq!(similarity_ratio("kitten", "sitting"), similarity_ratio("sitting", "kitten"));
    }

    #[test]
    fn test_score_result_kind() {
        let score = uniqueness_score("tea", &["tea"]);
        assert_eq!(score.kind, ScoreKind::Uniqueness);
        assert_eq!(score.value, 0.0);
    }
}
