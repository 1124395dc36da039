pub mod vacation_store;

pub use vacation_store::{InMemoryVacationStore, VacationStoreTrait};
