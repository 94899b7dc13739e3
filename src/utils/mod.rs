pub mod solvers;
pub mod units;
