pub mod sparklines;
pub mod status;
