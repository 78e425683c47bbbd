use crate::{core::Bounds, Float};

/// Module containing the Sphere test function.
pub mod sphere;
pub use sphere::Sphere;

/// Module containing the Rosenbrock test function.
pub mod rosenbrock;
pub use rosenbrock::Rosenbrock;

/// Module containing the bi-objective double sphere test function.
pub mod double_sphere;
pub use double_sphere::DoubleSphere;

/// The half-width of the default region of interest, `[-5, 5]` in every coordinate.
pub const DEFAULT_REGION_HALF_WIDTH: Float = 5.0;

fn default_region(n: usize) -> Bounds {
    vec![(-DEFAULT_REGION_HALF_WIDTH, DEFAULT_REGION_HALF_WIDTH); n].into()
}

fn replace_region(current: &Bounds, bounds: Bounds) -> Bounds {
    assert_eq!(
        bounds.len(),
        current.len(),
        "Expected {} bounds, got {}",
        current.len(),
        bounds.len()
    );
    bounds
}
