use cardwise_core::{
    error::RewardsError,
    model::{Bonus, Card},
    validation::{ensure_valid_card, validate_bonus, validate_card},
};
use chrono::NaiveDate;

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

#[test]
fn well_formed_card_passes() {
    let card = Card::new("Everyday", 1.5)
        .with_issuer("Acme Bank")
        .with_bonus(Bonus::new("Dining", 3.0))
        .with_bonus(Bonus::new("Travel", 100.0).with_window(Some(date(2025, 1, 1)), Some(date(2025, 1, 1))));

    assert!(validate_card(&card).is_empty());
    assert!(ensure_valid_card(&card).is_ok());
}

#[test]
fn default_rate_of_zero_is_allowed() {
    assert!(validate_card(&Card::new("Debit", 0.0)).is_empty());
}

#[test]
fn bonus_rate_of_zero_is_rejected() {
    let issues = validate_bonus(&Bonus::new("Dining", 0.0), "bonus");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "bonus.rate");
}

#[test]
fn rates_above_one_hundred_are_rejected() {
    let card = Card::new("Too Good", 100.5).with_bonus(Bonus::new("Dining", 101.0));
    let fields: Vec<String> = validate_card(&card).into_iter().map(|i| i.field).collect();
    assert_eq!(fields, vec!["default_rate", "bonuses[0].rate"]);
}

#[test]
fn start_after_end_is_rejected() {
    let bonus = Bonus::new("Travel", 2.0).with_window(Some(date(2025, 2, 1)), Some(date(2025, 1, 1)));
    let issues = validate_bonus(&bonus, "bonus");
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "bonus.start_date");
}

#[test]
fn every_problem_is_reported() {
    let card = Card::new("   ", f64::NAN)
        .with_bonus(Bonus::new("", -1.0))
        .with_bonus(Bonus::new("Gas", 2.0));

    let issues = validate_card(&card);
    let fields: Vec<&str> = issues.iter().map(|i| i.field.as_str()).collect();
    assert_eq!(fields, vec!["name", "default_rate", "bonuses[0].category", "bonuses[0].rate"]);
}

#[test]
fn ensure_valid_returns_first_issue_as_error() {
    let card = Card::new("", 1.0);
    match ensure_valid_card(&card) {
        Err(RewardsError::Validation { field, .. }) => assert_eq!(field, "name"),
        other => panic!("expected validation error, got {other:?}"),
    }
}

#[test]
fn repeated_bonus_id_on_one_card_is_rejected() {
    let dining = Bonus::new("Dining", 3.0);
    let mut copy = Bonus::new("Travel", 2.0);
    copy.id = dining.id.clone();
    let card = Card::new("Twins", 1.0).with_bonus(dining).with_bonus(copy);

    let issues = validate_card(&card);
    assert_eq!(issues.len(), 1);
    assert_eq!(issues[0].field, "bonuses[1].id");
    assert!(matches!(ensure_valid_card(&card), Err(RewardsError::Validation { .. })));
}
