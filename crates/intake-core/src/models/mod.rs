pub mod analysis;
pub mod outcome;
pub mod pattern;
pub mod question;
pub mod response;
pub mod session;
