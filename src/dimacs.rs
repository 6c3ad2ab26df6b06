//DIMACS CNF parser.
//https://www.cs.ubc.ca/~hoos/SATLIB/Benchmarks/SAT/satformat.ps
use crate::cnf::{Clause, Cnf};
use crate::error::{SolverError, SolverResult};
use log::{debug, warn};
use std::fs::File;
use std::io::{self, BufRead};
use std::path::Path;

/// Parses a DIMACS CNF file into a `Cnf`. The declared clause count is
/// advisory only; the parsed clause count is what the solver actually uses.
pub fn parse_dimacs_file(path: impl AsRef<Path>) -> SolverResult<Cnf> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| SolverError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_dimacs_reader(io::BufReader::new(file))
}

pub fn parse_dimacs_reader(reader: impl BufRead) -> SolverResult<Cnf> {
    let mut num_vars: Option<usize> = None;
    let mut declared_clauses: Option<usize> = None;
    let mut clauses = Vec::new();

    for line in reader.lines() {
        let line = line.map_err(|source| SolverError::Io {
            path: "<stream>".to_string(),
            source,
        })?;
        let line = line.trim();

        if line.is_empty() || line.starts_with('c') {
            continue;
        }

        if line.starts_with('p') {
            let parts: Vec<&str> = line.split_whitespace().collect();
            if parts.len() < 4 || parts[0] != "p" || parts[1] != "cnf" {
                return Err(SolverError::MissingHeader);
            }
            let n: usize = parts[2].parse().map_err(|_| SolverError::MissingHeader)?;
            let m: usize = parts[3].parse().map_err(|_| SolverError::MissingHeader)?;
            num_vars = Some(n);
            declared_clauses = Some(m);
            continue;
        }

        let n = num_vars.ok_or(SolverError::MissingHeader)?;
        let mut literals = Vec::new();
        for token in line.split_whitespace() {
            let lit: i32 = token
                .parse()
                .map_err(|_| SolverError::InvalidLiteral(token.to_string()))?;
            if lit == 0 {
                break;
            }
            if lit.unsigned_abs() as usize > n {
                return Err(SolverError::LiteralOutOfRange {
                    literal: lit,
                    num_vars: n,
                });
            }
            literals.push(lit);
        }
        if !literals.is_empty() || line == "0" {
            clauses.push(Clause::new(literals));
        }
    }

    let num_vars = num_vars.ok_or(SolverError::MissingHeader)?;
    if let Some(declared) = declared_clauses {
        if declared != clauses.len() {
            warn!(
                "declared clause count {} does not match parsed count {}",
                declared,
                clauses.len()
            );
        }
    }
    debug!("parsed {} variables, {} clauses", num_vars, clauses.len());

    let mut cnf = Cnf::new(num_vars);
    for clause in clauses {
        cnf.add_clause(clause);
    }
    Ok(cnf)
}
