//The propagator: rewrites a CNF store under one literal forced True, and the
//unit-propagation loop that drives it to a fixpoint before each decision.
use crate::assignment::{Assignment, VarValue};
use crate::cnf::{var_of, Clause, Cnf, Literal};
use crate::dpll::SolveStats;
use log::trace;

/// `propagate(F, l, A)`: sets `A[|l|]`, then for every clause C in F drops C
/// if `l` satisfies it, strips `-l` out of C if present, or keeps C unchanged
/// otherwise. Returns `None` on conflict (some rewritten clause is empty) --
/// the assignment mutation is kept either way, since the caller holds a
/// snapshot to restore from.
pub fn propagate(f: &Cnf, literal: Literal, assignment: &mut Assignment) -> Option<Cnf> {
    let v = var_of(literal);
    assignment.set(v, if literal > 0 { VarValue::True } else { VarValue::False });

    let mut out = Cnf::new(f.num_vars());
    let mut conflict = false;

    for clause in f.clauses() {
        if clause.contains(literal) {
            continue;
        }
        if clause.contains(-literal) {
            let rewritten: Vec<Literal> = clause
                .literals()
                .iter()
                .copied()
                .filter(|&l| l != -literal)
                .collect();
            if rewritten.is_empty() {
                conflict = true;
            }
            out.add_clause(Clause::new(rewritten));
        } else {
            if clause.is_empty() {
                conflict = true;
            }
            out.add_clause(clause.clone());
        }
    }

    if conflict {
        None
    } else {
        Some(out)
    }
}

/// Repeatedly finds the first unit clause (left to right, restarting the scan
/// after each propagation) and propagates it, until none remain or a conflict
/// is derived.
pub fn propagate_to_fixpoint(
    mut f: Cnf,
    assignment: &mut Assignment,
    stats: &mut SolveStats,
) -> Option<Cnf> {
    while let Some(idx) = f.first_unit_clause() {
        let unit = f.clauses()[idx].literals()[0];
        trace!("unit propagation: clause {} forces literal {}", idx, unit);
        stats.unit_propagations += 1;
        f = propagate(&f, unit, assignment)?;
    }
    Some(f)
}
