//! C9 — C-type, 长/细/方 composite caps and 方 single-round concentration.

use crate::report::{FamilyReport, Violation};
use alloc_core::product::CSubtype;
use alloc_core::{AllocationMatrix, ConfigRecord, DataFacade};

pub const C9_SLACK_BOXES: f64 = 1e-3;

fn round_sum(facade: &DataFacade, a: &AllocationMatrix, round: &alloc_core::Round, pred: impl Fn(&alloc_core::ProductRecord) -> bool) -> f64 {
    facade
        .product_table()
        .iter()
        .filter(|p| pred(p))
        .map(|p| a.get(&p.code, round))
        .sum()
}

pub fn validate_c_type(facade: &DataFacade, config: &ConfigRecord, a: &AllocationMatrix) -> FamilyReport {
    let mut report = FamilyReport::passing();

    for round in facade.rounds() {
        let v_r = a.round_total(round);
        let c_r = round_sum(facade, a, round, |p| p.is_c_type());
        let l_r = round_sum(facade, a, round, |p| p.is_c_type() && p.c_subtype() == CSubtype::Chang);
        let x_r = round_sum(facade, a, round, |p| p.is_c_type() && p.c_subtype() == CSubtype::Xi);

        report.details.insert(format!("C_{round}"), c_r);
        report.details.insert(format!("L_{round}"), l_r);
        report.details.insert(format!("X_{round}"), x_r);

        check_cap(&mut report, round, "C-type share", c_r, config.c_type_ratio * v_r);
        check_cap(&mut report, round, "C-type absolute", c_r, config.c_type_volume_limit);
        check_cap(&mut report, round, "长 share of C-type", l_r, config.chang_type_ratio * c_r);
        check_cap(&mut report, round, "长 absolute", l_r, config.chang_type_volume_limit);
        check_cap(&mut report, round, "细 share of C-type", x_r, config.xi_type_ratio * c_r);
        check_cap(&mut report, round, "细 absolute", x_r, config.xi_type_volume_limit);
    }

    for product in facade.product_table() {
        if product.c_subtype() != CSubtype::Fang || product.has_any_fixed_cell() {
            continue;
        }
        let used = a.rounds_used(&product.code);
        report.details.insert(format!("fang_rounds_{}", product.code), used as f64);
        if used > 1 {
            report.push(Violation {
                family: "C9",
                message: format!(
                    "方-subtype product {} allocated across {used} rounds, must concentrate in one",
                    product.code
                ),
                product_code: Some(product.code.clone()),
                round_label: None,
                excess: (used - 1) as f64,
            });
        }
    }

    report
}

fn check_cap(report: &mut FamilyReport, round: &alloc_core::Round, label: &str, value: f64, cap: f64) {
    if value > cap + C9_SLACK_BOXES {
        report.push(Violation {
            family: "C9",
            message: format!("round {round}: {label} {value:.3} exceeds cap {cap:.3}"),
            product_code: None,
            round_label: Some(round.label().to_string()),
            excess: value - cap - C9_SLACK_BOXES,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ProductRecord, Round};
    use std::collections::HashMap;

    fn c_product(code: &str, demand: f64) -> ProductRecord {
        ProductRecord {
            code: code.into(),
            name: code.into(),
            category: String::new(),
            brand: String::new(),
            wholesale_price: 200.0,
            sticks_per_bundle: 200.0,
            demand,
            available_supply: demand,
            c_flag: "C".into(),
            c_subtype_raw: String::new(),
            demand_tag: String::new(),
            price_tag: String::new(),
            existing_allocations: HashMap::new(),
        }
    }

    fn facade(products: Vec<ProductRecord>, rounds: Vec<&str>) -> DataFacade {
        let rounds: Vec<_> = rounds.iter().map(|l| Round::parse(l).unwrap()).collect();
        let mut constraints = HashMap::new();
        for r in &rounds {
            constraints.insert(
                r.label().to_string(),
                RoundConstraintRaw { price_upper: 1e9, price_lower: 0.0, volume_target: 1.0 },
            );
        }
        DataFacade::new(products, rounds, constraints).unwrap()
    }

    #[test]
    fn c_type_cap_enforced() {
        let f = facade(
            vec![c_product("A001", 3000.0), c_product("A002", 3000.0)],
            vec!["第一轮", "第二轮"],
        );
        let mut config = ConfigRecord::default();
        config.c_type_volume_limit = 4000.0;
        config.c_type_ratio = 1.0;
        let mut a = AllocationMatrix::new();
        let r1 = Round::parse("第一轮").unwrap();
        a.set("A001", &r1, 3000.0);
        a.set("A002", &r1, 3000.0);
        let report = validate_c_type(&f, &config, &a);
        assert!(!report.ok);
    }

    #[test]
    fn c_type_within_cap_passes() {
        let f = facade(
            vec![c_product("A001", 3000.0), c_product("A002", 3000.0)],
            vec!["第一轮", "第二轮"],
        );
        let mut config = ConfigRecord::default();
        config.c_type_volume_limit = 4000.0;
        config.c_type_ratio = 1.0;
        let mut a = AllocationMatrix::new();
        let r1 = Round::parse("第一轮").unwrap();
        let r2 = Round::parse("第二轮").unwrap();
        a.set("A001", &r1, 2000.0);
        a.set("A002", &r1, 1900.0);
        a.set("A001", &r2, 1000.0);
        a.set("A002", &r2, 1100.0);
        let report = validate_c_type(&f, &config, &a);
        assert!(report.ok);
    }

    #[test]
    fn fang_concentration_violation() {
        let mut p = c_product("A001", 100.0);
        p.c_subtype_raw = "方".into();
        let f = facade(vec![p], vec!["第一轮", "第二轮"]);
        let config = ConfigRecord::default();
        let mut a = AllocationMatrix::new();
        a.set("A001", &Round::parse("第一轮").unwrap(), 50.0);
        a.set("A001", &Round::parse("第二轮").unwrap(), 50.0);
        let report = validate_c_type(&f, &config, &a);
        assert!(!report.ok);
    }
}
