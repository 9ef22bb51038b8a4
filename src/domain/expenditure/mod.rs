//! Expenditure domain module.

mod expenditure;

pub use expenditure::Expenditure;
