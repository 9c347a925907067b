pub mod detail;
pub mod form;
pub mod list;
pub mod repository;

pub use detail::PatientPage;
pub use form::{EditPatientPage, NewPatientPage};
pub use list::PatientsPage;
