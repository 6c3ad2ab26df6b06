//Result sink: writes and reads the line-oriented `s`/`v`/`t` result format.
use crate::assignment::{Assignment, VarValue};
use crate::dpll::Verdict;
use crate::error::{SolverError, SolverResult};
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResultRecord {
    pub sat: bool,
    pub literals: Vec<i32>,
    pub elapsed_ms: u64,
}

/// Writes `s <status>` / `v <literals...>` (SAT only) / `t <elapsed_ms>`.
/// Unassigned variables are reported as True, per the reference's convention.
pub fn write_result(path: impl AsRef<Path>, verdict: &Verdict, elapsed_ms: u64) -> SolverResult<()> {
    let mut out = String::new();
    match verdict {
        Verdict::Sat(model) => {
            out.push_str("s 1\n");
            out.push_str("v ");
            for var in 1..=model.num_vars() {
                let value = model.get(var);
                if value == VarValue::False {
                    out.push_str(&format!("-{} ", var));
                } else {
                    out.push_str(&format!("{} ", var));
                }
            }
            out.push_str("0\n");
        }
        Verdict::Unsat => out.push_str("s 0\n"),
    }
    out.push_str(&format!("t {}\n", elapsed_ms));

    let path = path.as_ref();
    fs::write(path, out).map_err(|source| SolverError::Io {
        path: path.display().to_string(),
        source,
    })
}

pub fn read_result(path: impl AsRef<Path>) -> SolverResult<ResultRecord> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| SolverError::Io {
        path: path.display().to_string(),
        source,
    })?;

    let mut sat = None;
    let mut literals = Vec::new();
    let mut elapsed_ms = 0u64;

    for line in contents.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("s ") {
            sat = Some(match rest.trim() {
                "1" => true,
                "0" => false,
                other => return Err(SolverError::InvalidStatus(other.to_string())),
            });
        } else if let Some(rest) = line.strip_prefix("v ") {
            literals = rest
                .split_whitespace()
                .filter_map(|t| t.parse::<i32>().ok())
                .take_while(|&l| l != 0)
                .collect();
        } else if let Some(rest) = line.strip_prefix("t ") {
            elapsed_ms = rest.trim().parse().unwrap_or(0);
        }
    }

    Ok(ResultRecord {
        sat: sat.ok_or(SolverError::MissingStatus)?,
        literals,
        elapsed_ms,
    })
}

/// Checks every clause of `cnf` against a result's reported literals;
/// used by the standalone verifier binary. Not part of the DPLL core.
pub fn verify_against(cnf: &crate::cnf::Cnf, record: &ResultRecord) -> bool {
    if !record.sat {
        // UNSAT results aren't independently checkable without re-solving;
        // accept them at face value, matching the reference verifier.
        return true;
    }
    let mut assignment = Assignment::new(cnf.num_vars());
    for &lit in &record.literals {
        let v = lit.unsigned_abs() as usize;
        if v == 0 || v > cnf.num_vars() {
            return false;
        }
        assignment.set(v, if lit > 0 { VarValue::True } else { VarValue::False });
    }

    cnf.clauses().iter().all(|clause| {
        clause.literals().iter().any(|&l| {
            let v = l.unsigned_abs() as usize;
            let value = assignment.get(v);
            (l > 0 && value == VarValue::True) || (l < 0 && value == VarValue::False)
        })
    })
}
