pub mod academic_years;
pub mod auth;
pub mod classes;
pub mod grades;
pub mod parents;
pub mod scores;
pub mod students;
pub mod subjects;
pub mod users;
