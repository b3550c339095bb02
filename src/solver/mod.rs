mod sequential;

pub use sequential::{solve_position_constraints, ContactSolver, SolverConfig};
