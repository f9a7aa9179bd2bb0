pub mod diary_entry;
