//Standalone result verifier: re-reads a .cnf file and its .res result file
//and independently checks the reported assignment against every clause.
//Deliberately does not link against the DPLL engine's internals -- only the
//public CNF and result types -- since it is meant to catch bugs in the
//solver it is checking.
use dpll_sat::dimacs::parse_dimacs_file;
use dpll_sat::result_io::{read_result, verify_against};
use std::env;
use std::process::ExitCode;

fn main() -> ExitCode {
    pretty_env_logger::init();

    let args: Vec<String> = env::args().collect();
    if args.len() != 3 {
        eprintln!("Usage: {} <cnf_file> <res_file>", args[0]);
        return ExitCode::from(1);
    }

    let cnf = match parse_dimacs_file(&args[1]) {
        Ok(cnf) => cnf,
        Err(e) => {
            eprintln!("failed to parse {}: {}", args[1], e);
            return ExitCode::from(1);
        }
    };

    let record = match read_result(&args[2]) {
        Ok(record) => record,
        Err(e) => {
            eprintln!("failed to read {}: {}", args[2], e);
            return ExitCode::from(1);
        }
    };

    if verify_against(&cnf, &record) {
        println!("OK: result agrees with every clause");
        ExitCode::SUCCESS
    } else {
        eprintln!("MISMATCH: reported assignment falsifies at least one clause");
        ExitCode::from(1)
    }
}
