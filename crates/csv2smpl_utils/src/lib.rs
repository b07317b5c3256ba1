pub mod io;
pub mod numerical;
