//Error taxonomy for the ambient stack (parsing, I/O). The DPLL core itself
//never returns a Result: a conflict is a normal branch outcome, not an error.
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SolverError {
    #[error("cannot open {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("missing or malformed 'p cnf <vars> <clauses>' header")]
    MissingHeader,

    #[error("literal {literal} out of range for {num_vars} declared variables")]
    LiteralOutOfRange { literal: i32, num_vars: usize },

    #[error("clause line contains a token that is not a valid literal: {0:?}")]
    InvalidLiteral(String),

    #[error("sudoku grid must have exactly 9 lines, got {lines} lines")]
    MalformedGrid { lines: usize },

    #[error("sudoku row {row} must have exactly 9 characters, got {chars}")]
    MalformedRow { row: usize, chars: usize },

    #[error("sudoku line {line} has invalid character {ch:?} (expected '1'..='9' or '%')")]
    InvalidCell { line: usize, ch: char },

    #[error("result file is missing a status line")]
    MissingStatus,

    #[error("unreadable result status {0:?}")]
    InvalidStatus(String),
}

pub type SolverResult<T> = Result<T, SolverError>;
