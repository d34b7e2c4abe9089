pub mod catalog;
pub mod diary;
pub mod rubrics;
pub mod server;
