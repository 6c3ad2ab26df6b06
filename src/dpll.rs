//The DPLL engine: unit propagation to a fixpoint, then a Jeroslow-Wang guided
//branch on the surviving formula, positive literal tried before negative.
use crate::assignment::Assignment;
use crate::cnf::{var_of, Cnf, Literal};
use crate::heuristic::jeroslow_wang;
use crate::propagate::{propagate, propagate_to_fixpoint};
use log::debug;

#[derive(Debug, Clone)]
pub enum Verdict {
    Sat(Assignment),
    Unsat,
}

impl Verdict {
    pub fn is_sat(&self) -> bool {
        matches!(self, Verdict::Sat(_))
    }
}

/// Process-wide solve counters, owned by one top-level solve. The reference
/// keeps these as process globals reset at the start of a solve; threading
/// them through the recursion instead gives the same observable counts
/// without resorting to shared mutable statics.
#[derive(Debug, Default, Clone, Copy)]
pub struct SolveStats {
    pub dpll_calls: u64,
    pub unit_propagations: u64,
    pub backtracks: u64,
}

pub struct DpllSolver {
    formula: Cnf,
}

impl DpllSolver {
    pub fn new(formula: Cnf) -> Self {
        DpllSolver { formula }
    }

    pub fn solve(self) -> (Verdict, SolveStats) {
        let mut stats = SolveStats::default();
        let mut assignment = Assignment::new(self.formula.num_vars());
        let verdict = dpll_recursive(self.formula, &mut assignment, &mut stats);
        (verdict, stats)
    }
}

fn dpll_recursive(formula: Cnf, assignment: &mut Assignment, stats: &mut SolveStats) -> Verdict {
    stats.dpll_calls += 1;

    if formula.has_empty_clause() {
        return Verdict::Unsat;
    }

    let formula = match propagate_to_fixpoint(formula, assignment, stats) {
        Some(f) => f,
        None => return Verdict::Unsat,
    };

    if formula.is_empty() {
        return Verdict::Sat(assignment.snapshot());
    }

    let decision = jeroslow_wang(&formula);
    if decision == 0 {
        // Clauses remain but no literal survives to branch on.
        return Verdict::Unsat;
    }
    let v = var_of(decision);
    let snapshot = assignment.snapshot();
    debug!(
        "decision: variable {} (heuristic suggested literal {})",
        v, decision
    );

    // The branch order is always +v then -v, regardless of the heuristic's
    // chosen sign -- see the design notes on branching-sign behavior.
    if let Some(positive) = propagate(&formula, v as Literal, assignment) {
        if let Verdict::Sat(model) = dpll_recursive(positive, assignment, stats) {
            return Verdict::Sat(model);
        }
    }
    assignment.restore(snapshot.clone());
    stats.backtracks += 1;

    if let Some(negative) = propagate(&formula, -(v as Literal), assignment) {
        if let Verdict::Sat(model) = dpll_recursive(negative, assignment, stats) {
            return Verdict::Sat(model);
        }
    }
    assignment.restore(snapshot);
    stats.backtracks += 1;

    Verdict::Unsat
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assignment::VarValue;
    use crate::cnf::Clause;

    fn cnf(num_vars: usize, clauses: &[&[i32]]) -> Cnf {
        let mut f = Cnf::new(num_vars);
        for c in clauses {
            f.add_clause(Clause::new(c.to_vec()));
        }
        f
    }

    #[test]
    fn single_unit_clause_is_sat() {
        let (v, stats) = DpllSolver::new(cnf(1, &[&[1]])).solve();
        let Verdict::Sat(model) = v else { panic!("expected SAT") };
        assert_eq!(model.get(1), VarValue::True);
        assert!(stats.dpll_calls >= 1);
    }

    #[test]
    fn contradictory_units_are_unsat() {
        let (v, _) = DpllSolver::new(cnf(1, &[&[1], &[-1]])).solve();
        assert!(!v.is_sat());
    }

    #[test]
    fn simple_chain_is_sat() {
        let (v, _) = DpllSolver::new(cnf(3, &[&[1, 2], &[-1, 2], &[-2, 3]])).solve();
        assert!(v.is_sat());
    }

    #[test]
    fn pigeonhole_3_into_2_is_unsat() {
        // var(p, h) = 2*p + h, p in {0,1,2}, h in {0,1}
        let var = |p: i32, h: i32| 2 * p + h + 1;
        let mut f = Cnf::new(6);
        for p in 0..3 {
            f.add_clause(Clause::new(vec![var(p, 0), var(p, 1)]));
        }
        for h in 0..2 {
            for p1 in 0..3 {
                for p2 in (p1 + 1)..3 {
                    f.add_clause(Clause::new(vec![-var(p1, h), -var(p2, h)]));
                }
            }
        }
        let (v, _) = DpllSolver::new(f).solve();
        assert!(!v.is_sat());
    }

    #[test]
    fn empty_formula_is_trivially_sat() {
        let (v, _) = DpllSolver::new(Cnf::new(0)).solve();
        assert!(v.is_sat());
    }

    #[test]
    fn formula_with_empty_clause_is_immediately_unsat() {
        let (v, _) = DpllSolver::new(cnf(1, &[&[]])).solve();
        assert!(!v.is_sat());
    }

    #[test]
    fn sat_model_satisfies_every_clause() {
        let f = cnf(
            7,
            &[
                &[-1, 2],
                &[-1, 3, 5],
                &[-2, 4],
                &[-3, -4],
                &[1, 5, -2],
                &[2, 3],
                &[2, -3, 7],
                &[6, -5],
            ],
        );
        let (v, _) = DpllSolver::new(f.clone()).solve();
        let Verdict::Sat(model) = v else { panic!("expected SAT") };
        for clause in f.clauses() {
            let satisfied = clause.literals().iter().any(|&l| {
                let value = model.get(var_of(l));
                (l > 0 && value == VarValue::True) || (l < 0 && value == VarValue::False)
            });
            assert!(satisfied, "clause {:?} not satisfied by model", clause);
        }
    }

    #[test]
    fn determinism_across_repeated_runs() {
        let f = cnf(3, &[&[1, 2], &[-1, 2], &[-2, 3]]);
        let (v1, _) = DpllSolver::new(f.clone()).solve();
        let (v2, _) = DpllSolver::new(f).solve();
        let (Verdict::Sat(m1), Verdict::Sat(m2)) = (v1, v2) else {
            panic!("expected SAT both times")
        };
        for var in 1..=3 {
            assert_eq!(m1.get(var), m2.get(var));
        }
    }
}
