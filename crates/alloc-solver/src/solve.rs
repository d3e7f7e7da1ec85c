//! Top-level entry point: build the model, solve it, and post-process
//! the result (spec §4.3.4, §4.3.5, §6).

use crate::constraints::add_constraints;
use crate::objective::build_objective;
use crate::postprocess;
use crate::variables::{build_variables, DecisionVariables};
use alloc_constraints::merge_round_params;
use alloc_core::{AllocationMatrix, CigError, CigResult, ConfigRecord, DataFacade};
use good_lp::solvers::highs::highs;
use good_lp::{variables, Solution, SolverModel};
use tracing::{debug, info, warn};

/// Outcome of a solve attempt. A `TimeLimit` result still carries a
/// feasible incumbent — it is not an error (see `alloc_core::CigError`).
#[derive(Debug, Clone)]
pub enum SolveOutcome {
    Optimal(AllocationMatrix),
    TimeLimit(AllocationMatrix),
}

impl SolveOutcome {
    pub fn allocation(&self) -> &AllocationMatrix {
        match self {
            SolveOutcome::Optimal(a) | SolveOutcome::TimeLimit(a) => a,
        }
    }
}

fn enabled_family_tags(config: &ConfigRecord) -> Vec<String> {
    let mut tags = vec!["C1".to_string(), "C4".to_string(), "C5".to_string()];
    let e = &config.enabled;
    if e.c2_price {
        tags.push("C2".into());
    }
    if e.c3_volume {
        tags.push("C3".into());
    }
    if e.c6_demand_split {
        tags.push("C6".into());
    }
    if e.c7_demand_priority {
        tags.push("C7".into());
    }
    if e.c8_price_priority {
        tags.push("C8".into());
    }
    if e.c9_c_type {
        tags.push("C9".into());
    }
    if e.c10_balance {
        tags.push("C10".into());
    }
    tags
}

fn extract_allocation(facade: &DataFacade, dv: &DecisionVariables, solution: &impl Solution) -> AllocationMatrix {
    let mut allocation = AllocationMatrix::new();
    for product in facade.product_table() {
        for round in facade.rounds() {
            let value = solution.value(dv.x_at(&product.code, round.label()));
            allocation.set(&product.code, round, value);
        }
    }
    allocation
}

pub fn solve(facade: &DataFacade, config: &ConfigRecord) -> CigResult<SolveOutcome> {
    info!(
        products = facade.product_table().len(),
        rounds = facade.rounds().len(),
        "starting allocation solve"
    );

    let params = merge_round_params(facade, config)
        .map_err(|e| CigError::Config(format!("could not merge round params: {e}")))?;

    let mut vars = variables!();
    let dv = build_variables(&mut vars, facade, config);
    let objective = build_objective(facade, config, &dv);

    let problem = vars
        .minimise(objective)
        .using(highs)
        .set_time_limit(config.time_limit_seconds);
    let problem = add_constraints(problem, facade, config, &params, &dv);

    debug!("solving MILP");
    let start = std::time::Instant::now();
    let solution = problem.solve().map_err(|e| match e {
        good_lp::ResolutionError::Infeasible => CigError::Infeasible {
            message: "solver proved the model infeasible".to_string(),
            enabled_families: enabled_family_tags(config),
        },
        good_lp::ResolutionError::Unbounded => {
            CigError::Solver("model is unbounded — check objective weights and bounds".to_string())
        }
        other => CigError::Solver(other.to_string()),
    })?;
    let elapsed = start.elapsed().as_secs_f64();

    let mut allocation = extract_allocation(facade, &dv, &solution);
    postprocess::run(facade, &mut allocation);

    if elapsed >= config.time_limit_seconds {
        warn!(elapsed, limit = config.time_limit_seconds, "solve hit the wall-clock time limit");
        Ok(SolveOutcome::TimeLimit(allocation))
    } else {
        info!(elapsed, "solve reached optimality");
        Ok(SolveOutcome::Optimal(allocation))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc_core::facade::RoundConstraintRaw;
    use alloc_core::{ConfigRecord, ProductRecord, Round};
    use std::collections::HashMap;

    fn two_round_facade(demand: f64) -> DataFacade {
        let rounds = vec![Round::parse("第一轮").unwrap(), Round::parse("第二轮").unwrap()];
        let product = ProductRecord {
            code: "A001".into(),
            name: "示例".into(),
            category: "一类".into(),
            brand: String::new(),
            wholesale_price: 200.0,
            sticks_per_bundle: 200.0,
            demand,
            available_supply: demand,
            c_flag: String::new(),
            c_subtype_raw: String::new(),
            demand_tag: String::new(),
            price_tag: String::new(),
            existing_allocations: HashMap::new(),
        };
        let mut constraints = HashMap::new();
        for r in &rounds {
            constraints.insert(
                r.label().to_string(),
                RoundConstraintRaw {
                    price_upper: 1e9,
                    price_lower: 0.0,
                    volume_target: demand,
                },
            );
        }
        DataFacade::new(vec![product], rounds, constraints).unwrap()
    }

    #[test]
    fn solved_allocation_satisfies_total_demand() {
        let facade = two_round_facade(60.0);
        let config = ConfigRecord::default();
        let outcome = solve(&facade, &config).expect("model should be feasible");
        let total = outcome.allocation().product_total("A001");
        assert!((total - 60.0).abs() < 1e-3, "total allocation {total} should match demand");
    }
}
