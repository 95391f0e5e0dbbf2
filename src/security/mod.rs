pub mod hash;

pub use hash::{HashAlgorithm, HashGenerator};
