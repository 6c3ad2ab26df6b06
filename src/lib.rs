/*
DPLL SAT solver core.

Definitions:
    Literal: a nonzero signed integer; positive v means variable v is True.
    Clause C:
        C is satisfied if some l in C is True.
        C is a conflict (empty) if every l in C is False.
    CNF F is satisfied if every clause in F is satisfied.

    Unit propagation: repeatedly force the sole literal of any length-1
    clause True, until none remain or a conflict is derived.
*/
pub mod assignment;
pub mod cnf;
pub mod dimacs;
pub mod dpll;
pub mod error;
pub mod heuristic;
pub mod propagate;
pub mod result_io;
pub mod sudoku;
