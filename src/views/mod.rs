pub mod admin_dashboard;
pub mod busy;
pub mod job_board;
pub mod job_details;
pub mod job_management;
pub mod listing;
pub mod my_applications;
pub mod review;
pub mod user_management;
