use cardwise_core::{
    model::{Bonus, Card, RewardType},
    ranking::{best_bonus, best_card, find_best_cards},
};
use chrono::NaiveDate;

// ── Test helpers ────────────────────────────────────────────────────────────

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn card(id: &str, default_rate: f64) -> Card {
    let mut card = Card::new(format!("Card {id}"), default_rate);
    card.id = id.into();
    card
}

fn bonus(id: &str, category: &str, rate: f64) -> Bonus {
    let mut bonus = Bonus::new(category, rate);
    bonus.id = id.into();
    bonus
}

fn today() -> NaiveDate {
    date(2025, 6, 10)
}

fn ids(results: &[cardwise_core::model::MatchResult]) -> Vec<&str> {
    results.iter().map(|r| r.card_id.as_str()).collect()
}

// ── Scenarios ───────────────────────────────────────────────────────────────

/// Card A has a 5% Dining bonus, card B only a 2% default.
/// A lower-case request still matches A's bonus.
#[test]
fn bonus_match_is_case_insensitive_and_outranks_default() {
    let cards = vec![
        card("A", 1.0).with_bonus(bonus("a1", "Dining", 5.0)),
        card("B", 2.0),
    ];

    let results = find_best_cards(&cards, "dining", today());

    assert_eq!(ids(&results), vec!["A", "B"]);
    assert!(!results[0].is_default);
    assert_eq!(results[0].rate, 5.0);
    assert_eq!(results[0].reward_type, RewardType::Percentage);
    assert_eq!(results[0].bonus_id.as_deref(), Some("a1"));
    assert!(results[1].is_default);
    assert_eq!(results[1].rate, 2.0);
}

/// A January-only Travel bonus is inactive on Feb 1st, so the card ranks
/// on its default rate.
#[test]
fn expired_bonus_falls_back_to_default_rate() {
    let cards = vec![card("A", 1.5).with_bonus(
        bonus("a1", "Travel", 3.0).with_window(Some(date(2025, 1, 1)), Some(date(2025, 1, 31))),
    )];

    let results = find_best_cards(&cards, "Travel", date(2025, 2, 1));

    assert_eq!(results.len(), 1);
    assert!(results[0].is_default);
    assert_eq!(results[0].rate, 1.5);
    assert_eq!(results[0].bonus_id, None);
}

#[test]
fn bonus_not_yet_started_is_ignored() {
    let cards = vec![card("A", 1.0).with_bonus(
        bonus("a1", "Gas", 4.0).with_window(Some(date(2025, 7, 1)), None),
    )];

    let results = find_best_cards(&cards, "Gas", today());
    assert!(results[0].is_default);
}

#[test]
fn empty_card_collection_yields_empty_result() {
    assert!(find_best_cards(&[], "Dining", today()).is_empty());
    assert!(best_card(&[], "Dining", today()).is_none());
}

/// A category nobody has a bonus for: one default entry per card,
/// highest default rate first.
#[test]
fn unknown_category_ranks_all_cards_by_default_rate() {
    let cards = vec![
        card("A", 1.0).with_bonus(bonus("a1", "Dining", 5.0)),
        card("B", 2.0),
        card("C", 1.5),
    ];

    let results = find_best_cards(&cards, "Pet Supplies", today());

    assert_eq!(ids(&results), vec!["B", "C", "A"]);
    assert!(results.iter().all(|r| r.is_default));
}

#[test]
fn empty_request_is_not_an_error() {
    let cards = vec![card("A", 1.0).with_bonus(bonus("a1", "", 9.0)), card("B", 2.0)];

    let results = find_best_cards(&cards, "   ", today());

    assert_eq!(ids(&results), vec!["B", "A"]);
    assert!(results.iter().all(|r| r.is_default));
}

#[test]
fn zero_default_rate_still_participates() {
    let cards = vec![card("A", 0.0), card("B", 1.0)];

    let results = find_best_cards(&cards, "Dining", today());

    assert_eq!(ids(&results), vec!["B", "A"]);
    assert_eq!(results[1].rate, 0.0);
}

// ── Tie-breaks ──────────────────────────────────────────────────────────────

#[test]
fn bonus_beats_default_at_equal_rate() {
    // B is listed first, but A's 3% comes from a bonus.
    let cards = vec![
        card("B", 3.0),
        card("A", 1.0).with_bonus(bonus("a1", "Groceries", 3.0)),
    ];

    let results = find_best_cards(&cards, "Groceries", today());

    assert_eq!(ids(&results), vec!["A", "B"]);
    assert!(!results[0].is_default);
    assert!(results[1].is_default);
}

#[test]
fn equal_results_keep_card_order() {
    let cards = vec![card("X", 2.0), card("Y", 2.0), card("Z", 2.0)];
    let results = find_best_cards(&cards, "Dining", today());
    assert_eq!(ids(&results), vec!["X", "Y", "Z"]);

    let reversed: Vec<Card> = cards.into_iter().rev().collect();
    let results = find_best_cards(&reversed, "Dining", today());
    assert_eq!(ids(&results), vec!["Z", "Y", "X"]);
}

#[test]
fn highest_rate_bonus_on_a_card_wins() {
    let c = card("A", 1.0)
        .with_bonus(bonus("low", "Dining", 2.0))
        .with_bonus(bonus("high", "dining", 4.0))
        .with_bonus(bonus("other", "Travel", 10.0));

    let best = best_bonus(&c, "Dining", today()).unwrap();
    assert_eq!(best.id, "high");
}

/// Equal rates: the bonus with the soonest defined end date surfaces.
#[test]
fn soonest_ending_bonus_wins_rate_tie() {
    let c = card("A", 1.0)
        .with_bonus(bonus("forever", "Dining", 5.0))
        .with_bonus(bonus("late", "Dining", 5.0).with_window(None, Some(date(2025, 12, 31))))
        .with_bonus(bonus("soon", "Dining", 5.0).with_window(None, Some(date(2025, 6, 30))));

    let results = find_best_cards(&[c], "Dining", today());
    assert_eq!(results[0].bonus_id.as_deref(), Some("soon"));
    assert_eq!(results[0].end_date, Some(date(2025, 6, 30)));
}

#[test]
fn fully_tied_bonuses_keep_insertion_order() {
    let c = card("A", 1.0)
        .with_bonus(bonus("first", "Dining", 5.0))
        .with_bonus(bonus("second", "Dining", 5.0));

    assert_eq!(best_bonus(&c, "Dining", today()).unwrap().id, "first");
}

#[test]
fn rotating_flag_does_not_affect_ranking() {
    let cards = vec![
        card("A", 1.0).with_bonus(bonus("a1", "Gas", 5.0).rotating(true)),
        card("B", 1.0).with_bonus(bonus("b1", "Gas", 5.0)),
    ];

    let results = find_best_cards(&cards, "Gas", today());
    assert_eq!(ids(&results), vec!["A", "B"]);
}

#[test]
fn points_bonus_reports_its_reward_type() {
    let cards = vec![card("A", 1.0).with_bonus(
        bonus("a1", "Travel", 3.0).with_reward_type(RewardType::Points),
    )];

    let results = find_best_cards(&cards, "travel", today());
    assert_eq!(results[0].reward_type, RewardType::Points);
    assert_eq!(results[0].category.as_deref(), Some("Travel"));
}

// ── Malformed input ─────────────────────────────────────────────────────────

#[test]
fn malformed_bonuses_are_treated_as_not_matching() {
    let mut inverted = bonus("inverted", "Dining", 8.0);
    inverted.start_date = Some(date(2025, 6, 20));
    inverted.end_date = Some(date(2025, 6, 1));

    let cards = vec![
        card("A", 1.0).with_bonus(bonus("negative", "Dining", -4.0)),
        card("B", 1.0).with_bonus(bonus("huge", "Dining", 250.0)),
        card("C", 1.0).with_bonus(bonus("nan", "Dining", f64::NAN)),
        card("D", 1.0).with_bonus(inverted),
    ];

    let results = find_best_cards(&cards, "Dining", today());

    assert_eq!(results.len(), 4);
    assert!(results.iter().all(|r| r.is_default));
}

#[test]
fn out_of_range_default_rate_ranks_as_zero() {
    let cards = vec![card("A", -5.0), card("B", 0.5)];
    let results = find_best_cards(&cards, "Dining", today());

    assert_eq!(ids(&results), vec!["B", "A"]);
    assert_eq!(results[1].rate, 0.0);
}

// ── Properties ──────────────────────────────────────────────────────────────

fn mixed_wallet() -> Vec<Card> {
    vec![
        card("c1", 1.0)
            .with_bonus(bonus("c1-d", "Dining", 3.0))
            .with_bonus(bonus("c1-g", "Groceries", 6.0).with_window(None, Some(date(2025, 6, 9)))),
        card("c2", 2.0).with_bonus(bonus("c2-g", "groceries", 3.0)),
        card("c3", 1.5)
            .with_bonus(bonus("c3-t", "Travel", 5.0).with_window(Some(date(2025, 6, 1)), Some(date(2025, 6, 30)))),
        card("c4", 3.0),
        card("c5", 0.0).with_bonus(bonus("c5-d", "DINING", 4.0).rotating(true)),
    ]
}

#[test]
fn every_card_appears_exactly_once() {
    let cards = mixed_wallet();
    for category in ["Dining", "Groceries", "Travel", "Gas", "Hotels"] {
        let results = find_best_cards(&cards, category, today());
        assert_eq!(results.len(), cards.len(), "category {category}");
        for c in &cards {
            let hits = results.iter().filter(|r| r.card_id == c.id).count();
            assert_eq!(hits, 1, "card {} appeared {hits} times for {category}", c.id);
        }
    }
}

#[test]
fn output_is_sorted_by_rate_descending() {
    let cards = mixed_wallet();
    for category in ["Dining", "Groceries", "Travel", "Gas"] {
        let results = find_best_cards(&cards, category, today());
        for pair in results.windows(2) {
            assert!(
                pair[0].rate >= pair[1].rate,
                "{category}: {} ({}) ranked above {} ({})",
                pair[0].card_id, pair[0].rate, pair[1].card_id, pair[1].rate
            );
            if pair[0].rate == pair[1].rate {
                assert!(
                    !pair[0].is_default || pair[1].is_default,
                    "{category}: default entry ranked above bonus entry at equal rate"
                );
            }
        }
    }
}

#[test]
fn groceries_ranking_in_mixed_wallet() {
    // c1's 6% grocery bonus ended yesterday, so c2's 3% bonus ties c4's 3% default.
    let results = find_best_cards(&mixed_wallet(), "Groceries", today());
    assert_eq!(ids(&results), vec!["c2", "c4", "c3", "c1", "c5"]);
    assert!(!results[0].is_default);
    assert!(results[1].is_default);
}
