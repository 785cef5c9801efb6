//! Basic example of using the hybrid Sudoku engine

use qsudoku_core::{
    analyze, rank_candidates, Grid, HybridSolver, Position, SearchSpaceDescriptor,
};

fn main() -> qsudoku_core::Result<()> {
    // Parse the classic demo puzzle
    let puzzle_string =
        "530070000600195000098000060800060003400803001700020006060000280000419005000080079";
    let puzzle = Grid::from_string(puzzle_string)?;

    println!("Puzzle:");
    println!("{}", puzzle);
    println!("Given cells: {}", puzzle.given_count());
    println!("Empty cells: {}", puzzle.empty_count());

    // Peek at the amplitude ranking for one cell
    let pos = Position::new(0, 2);
    let weights = rank_candidates(&puzzle, pos);
    println!("\nRanking for cell {}:", pos);
    for (digit, weight) in weights.iter() {
        println!("  {} -> {:.4}", digit, weight);
    }

    // Solve it
    println!("\nSolving...\n");
    let solver = HybridSolver::new();
    let solution = solver.solve(&puzzle)?;
    println!("Solution:");
    println!("{}", solution.grid);
    println!(
        "decisions: {}, backtracks: {}",
        solution.stats.decisions, solution.stats.backtracks
    );

    // What would a literal Grover search over this space need?
    let report = analyze(&SearchSpaceDescriptor::new(puzzle.empty_count() as u32))?;
    println!("\nSearch space size: {}", report.search_space_size);
    println!(
        "Optimal Grover iterations: {}",
        report.optimal_grover_iterations
    );
    println!("Required qubits: {}", report.required_qubit_count);

    Ok(())
}
