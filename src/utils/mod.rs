//! Various unsorted numerical operators.

pub use self::poly::poly_eval;

mod poly;
