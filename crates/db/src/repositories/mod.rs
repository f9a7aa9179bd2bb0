pub mod diary_entry_repo;

pub use diary_entry_repo::DiaryEntryRepo;
