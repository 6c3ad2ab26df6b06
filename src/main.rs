use dpll_sat::dimacs::parse_dimacs_file;
use dpll_sat::dpll::{DpllSolver, Verdict};
use dpll_sat::result_io::write_result;
use dpll_sat::sudoku::{self, Grid};
use log::info;
use std::io::{self, Write};
use std::path::Path;
use std::time::{Instant, SystemTime, UNIX_EPOCH};

fn main() {
    pretty_env_logger::init();

    println!("=== SAT SOLVER ===");
    println!("Please select mode:");
    println!("1. Generate and solve Sudoku puzzle");
    println!("2. Load CNF file and solve");
    print!("Enter your choice (1/2): ");
    io::stdout().flush().ok();

    let mut choice = String::new();
    if io::stdin().read_line(&mut choice).is_err() {
        eprintln!("Failed to read choice");
        std::process::exit(1);
    }

    let outcome = match choice.trim() {
        "1" => run_sudoku_mode(),
        "2" => run_cnf_mode(),
        other => {
            eprintln!("Invalid choice: {}", other);
            Err(1)
        }
    };

    if let Err(code) = outcome {
        std::process::exit(code);
    }
    println!("Program ended");
}

fn run_sudoku_mode() -> Result<(), i32> {
    print!("Enter number of holes to dig (17-64, recommended 25-55): ");
    io::stdout().flush().ok();
    let mut line = String::new();
    io::stdin().read_line(&mut line).map_err(|_| 1)?;
    let requested: usize = line.trim().parse().unwrap_or(sudoku::MIN_CLUES);
    let holes = requested.clamp(sudoku::MIN_CLUES, sudoku::MAX_HOLES);
    if requested != holes {
        println!("Clamping requested holes {} to {}", requested, holes);
    }

    info!("generating a full sudoku grid");
    let mut grid = Grid::generate_full();
    let mut rng = rand::thread_rng();
    grid.dig_holes(holes, &mut rng);

    println!(
        "Puzzle created with {} empty cells:",
        sudoku::CELLS - grid.filled_cells()
    );
    print_grid(&grid);

    let stamp = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0);
    std::fs::create_dir_all("sudoku_cnf").map_err(|_| 1)?;
    let ss_path = format!("sudoku_cnf/puzzle_{}.ss", stamp);
    std::fs::write(&ss_path, grid.to_ss()).map_err(|_| 1)?;
    println!("Puzzle saved to: {}", ss_path);

    let cnf = sudoku::encode(&grid);

    println!("\nSolving sudoku using SAT solver...");
    let start = Instant::now();
    let (verdict, stats) = DpllSolver::new(cnf).solve();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    report(&verdict, elapsed_ms, &stats);
    if let Verdict::Sat(ref model) = verdict {
        print_grid(&sudoku::decode(model));
    }

    let result_path = format!("sudoku_cnf/puzzle_{}.res", stamp);
    write_result(&result_path, &verdict, elapsed_ms).map_err(|e| {
        eprintln!("failed to save result: {}", e);
        1
    })?;
    println!("Result saved to: {}", result_path);
    Ok(())
}

fn run_cnf_mode() -> Result<(), i32> {
    print!("Enter path to DIMACS CNF file: ");
    io::stdout().flush().ok();
    let mut path = String::new();
    io::stdin().read_line(&mut path).map_err(|_| 1)?;
    let path = path.trim();

    println!("Parsing CNF file: {}", path);
    let cnf = parse_dimacs_file(path).map_err(|e| {
        eprintln!("Error parsing CNF file: {}", e);
        1
    })?;
    println!(
        "Variables: {}, Clauses: {}",
        cnf.num_vars(),
        cnf.num_clauses()
    );

    println!("Solving SAT problem...");
    let start = Instant::now();
    let (verdict, stats) = DpllSolver::new(cnf).solve();
    let elapsed_ms = start.elapsed().as_millis() as u64;

    report(&verdict, elapsed_ms, &stats);

    let base = Path::new(path)
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "result".to_string());
    std::fs::create_dir_all("res").map_err(|_| 1)?;
    let result_path = format!("res/{}.res", base);
    write_result(&result_path, &verdict, elapsed_ms).map_err(|e| {
        eprintln!("failed to save result: {}", e);
        1
    })?;
    println!("Result saved to: {}", result_path);
    Ok(())
}

fn report(verdict: &Verdict, elapsed_ms: u64, stats: &dpll_sat::dpll::SolveStats) {
    println!(
        "Result: {}",
        if verdict.is_sat() {
            "Satisfiable (SAT)"
        } else {
            "Unsatisfiable (UNSAT)"
        }
    );
    println!("Solving time: {} ms", elapsed_ms);
    info!(
        "stats: dpll calls {}, unit propagations {}, backtracks {}",
        stats.dpll_calls, stats.unit_propagations, stats.backtracks
    );
}

fn print_grid(grid: &Grid) {
    println!("   1 2 3   4 5 6   7 8 9");
    for row in 0..sudoku::SIZE {
        if row % 3 == 0 && row > 0 {
            println!("  -------+-------+-------");
        }
        print!("{} ", (b'A' + row as u8) as char);
        for col in 0..sudoku::SIZE {
            if col % 3 == 0 && col > 0 {
                print!("| ");
            }
            let d = grid.get(row, col);
            if d == 0 {
                print!("% ");
            } else {
                print!("{} ", d);
            }
        }
        println!();
    }
}
