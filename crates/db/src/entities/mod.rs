//! `SeaORM` entity definitions.

pub mod employees;
