use criterion::{criterion_group, criterion_main, Criterion};
use dpll_sat::cnf::Cnf;
use dpll_sat::dimacs::parse_dimacs_file;
use dpll_sat::dpll::DpllSolver;
use dpll_sat::sudoku::{self, Grid};

pub fn criterion_benchmark(c: &mut Criterion) {
    let files_path = "benchmarks/";

    let cnfs: Vec<(String, Cnf)> = match std::fs::read_dir(files_path) {
        Ok(entries) => entries
            .filter_map(|entry| entry.ok())
            .filter_map(|entry| {
                let path = entry.path();
                let path_str = path.to_str()?.to_string();
                parse_dimacs_file(&path_str).ok().map(|cnf| (path_str, cnf))
            })
            .collect(),
        Err(_) => Vec::new(),
    };

    let mut group = c.benchmark_group("dimacs");
    for (file, cnf) in &cnfs {
        group.bench_function(file, |b| b.iter(|| DpllSolver::new(cnf.clone()).solve()));
    }
    group.finish();

    let mut rng = rand::thread_rng();
    let mut grid = Grid::generate_full();
    grid.dig_holes(30, &mut rng);
    let sudoku_cnf = sudoku::encode(&grid);

    let mut group = c.benchmark_group("sudoku");
    group.bench_function("30-hole puzzle", |b| {
        b.iter(|| DpllSolver::new(sudoku_cnf.clone()).solve())
    });
    group.finish();
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
