pub mod diary_entries;
pub mod report;
pub mod stats;
