pub mod nelder_mead;
