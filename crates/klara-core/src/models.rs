pub mod answer;
pub mod assessment;
pub mod history;
pub mod question;
pub mod severity;
