mod doctor;
mod generate;

pub use doctor::doctor;
pub use generate::generate;
