//! Kernel functions and precomputed kernel matrices

pub mod gaussian;
pub mod kernel_type;
pub mod matrix;
pub mod polynomial;
pub mod traits;

pub use self::gaussian::*;
pub use self::kernel_type::*;
pub use self::matrix::*;
pub use self::polynomial::*;
pub use self::traits::*;
