pub mod mutation;
pub mod residue;
