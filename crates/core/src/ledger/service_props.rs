//! Property-based tests for the ledger.
//!
//! - A numeric amount edit leaves the row balanced.
//! - Typing back a displayed amount stores the original within display precision.
//! - Toggling the allocation mode never rewrites stored benefits.
//! - Apply-to-all writes the current uniform benefit (blank as zero) into every row.
//! - Ingesting the same lines twice matches a single ingest, ids aside.

use nomina_shared::types::LineItemId;
use proptest::prelude::*;
use rust_decimal::Decimal;

use super::amount::Amount;
use super::service::Ledger;
use super::types::{AmountField, GlobalSettings, LineItem};
use crate::payroll::ProcessedLine;

/// Strategy to generate amounts (-1,000,000.00 to 1,000,000.00).
fn amount() -> impl Strategy<Value = Decimal> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Decimal::new(cents, 2))
}

/// Strategy to generate positive exchange rates (1.00 to 10,000.00).
fn rate() -> impl Strategy<Value = Decimal> {
    (100i64..1_000_000i64).prop_map(|v| Decimal::new(v, 2))
}

fn field() -> impl Strategy<Value = AmountField> {
    prop_oneof![
        Just(AmountField::GrossBase),
        Just(AmountField::Deduction),
        Just(AmountField::Net),
    ]
}

/// Strategy for ingestion lines with non-negative debt.
fn processed_line() -> impl Strategy<Value = ProcessedLine> {
    ("[A-Z ]{0,12}", "[0-9]{1,9}", amount(), 0i64..1_000_000i64).prop_map(
        |(name, identifier, net, debt_cents)| ProcessedLine {
            name,
            identifier,
            net,
            debt_deducted: Decimal::new(debt_cents, 2),
        },
    )
}

/// Ledger operations that may touch benefits or the mode.
#[derive(Debug, Clone)]
enum BenefitOp {
    Toggle,
    EditBenefit(usize, Decimal),
    SetUniform(Decimal),
    ClearUniform,
    ApplyUniform,
}

fn benefit_op() -> impl Strategy<Value = BenefitOp> {
    prop_oneof![
        Just(BenefitOp::Toggle),
        (0usize..8, amount()).prop_map(|(i, v)| BenefitOp::EditBenefit(i, v)),
        amount().prop_map(BenefitOp::SetUniform),
        Just(BenefitOp::ClearUniform),
        Just(BenefitOp::ApplyUniform),
    ]
}

/// Copies `items` with every id replaced by `id`.
fn with_id(items: &[LineItem], id: LineItemId) -> Vec<LineItem> {
    items
        .iter()
        .map(|item| LineItem {
            id,
            ..item.clone()
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    /// After a numeric edit of any amount field, `net = gross - deduction`.
    #[test]
    fn prop_numeric_edit_keeps_row_balanced(
        gross in amount(),
        deduction in amount(),
        edited in field(),
        value in amount(),
    ) {
        let mut ledger = Ledger::new(GlobalSettings::default());
        let id = ledger.add_manual_row();
        ledger.edit_amount(id, AmountField::GrossBase, &gross.to_string()).unwrap();
        ledger.edit_amount(id, AmountField::Deduction, &deduction.to_string()).unwrap();

        ledger.edit_amount(id, edited, &value.to_string()).unwrap();

        let item = ledger.item(id).unwrap();
        prop_assert!(item.is_balanced(), "unbalanced after editing {:?}: {:?}", edited, item);
        prop_assert_eq!(item.amount(edited), Amount::Numeric(value));
    }

    /// A value shown in the secondary view and typed back is stored within
    /// half a display cent of the original primary amount.
    #[test]
    fn prop_display_round_trip(value in amount(), rate in rate()) {
        let mut ledger = Ledger::new(GlobalSettings::with_exchange_rate(rate));
        let id = ledger.add_manual_row();
        ledger.edit_amount(id, AmountField::Net, &value.to_string()).unwrap();
        ledger.toggle_display_currency();

        let Amount::Numeric(shown) = ledger.project_for_display(ledger.item(id).unwrap().net) else {
            return Err(TestCaseError::fail("projection of a number was empty"));
        };
        ledger.edit_amount(id, AmountField::Net, &shown.to_string()).unwrap();

        let stored = ledger.item(id).unwrap().net.or_zero();
        let tolerance = Decimal::new(5, 3) / rate + Decimal::new(1, 20);
        prop_assert!((stored - value).abs() <= tolerance);
    }

    /// Only apply-to-all writes benefits, and it writes the uniform value
    /// into every row; toggling never does.
    #[test]
    fn prop_only_apply_to_all_rewrites_benefits(
        lines in prop::collection::vec(processed_line(), 1..8),
        ops in prop::collection::vec(benefit_op(), 0..20),
    ) {
        let mut ledger = Ledger::new(GlobalSettings::default());
        ledger.ingest(lines);
        let mut uniform = Decimal::ZERO;

        for op in ops {
            let before: Vec<Option<Amount>> = ledger.items().iter().map(|i| i.benefit).collect();
            match op {
                BenefitOp::Toggle => {
                    ledger.toggle_allocation_mode();
                    let after: Vec<Option<Amount>> = ledger.items().iter().map(|i| i.benefit).collect();
                    prop_assert_eq!(before, after);
                }
                BenefitOp::EditBenefit(i, v) => {
                    let id = ledger.items()[i % ledger.items().len()].id;
                    let _ = ledger.edit_benefit(id, &v.to_string());
                }
                BenefitOp::SetUniform(v) => {
                    ledger.set_uniform_benefit(&v.to_string()).unwrap();
                    uniform = v;
                    let after: Vec<Option<Amount>> = ledger.items().iter().map(|i| i.benefit).collect();
                    prop_assert_eq!(before, after);
                }
                BenefitOp::ClearUniform => {
                    ledger.set_uniform_benefit("").unwrap();
                    uniform = Decimal::ZERO;
                    let after: Vec<Option<Amount>> = ledger.items().iter().map(|i| i.benefit).collect();
                    prop_assert_eq!(before, after);
                }
                BenefitOp::ApplyUniform => {
                    ledger.apply_uniform_to_all();
                    for item in ledger.items() {
                        prop_assert_eq!(item.benefit, Some(Amount::Numeric(uniform)));
                    }
                }
            }
        }
    }

    /// Re-ingesting identical lines yields the same ledger apart from ids.
    #[test]
    fn prop_reingest_is_idempotent(lines in prop::collection::vec(processed_line(), 0..10)) {
        let mut once = Ledger::new(GlobalSettings::default());
        once.ingest(lines.clone());

        let mut twice = Ledger::new(GlobalSettings::default());
        twice.ingest(lines.clone());
        twice.ingest(lines);

        let id = LineItemId::new();
        prop_assert_eq!(with_id(once.items(), id), with_id(twice.items(), id));
        prop_assert_eq!(once.settings(), twice.settings());
        prop_assert_eq!(once.totals(), twice.totals());
    }
}
