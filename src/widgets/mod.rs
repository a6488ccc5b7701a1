// Terminal widgets drawn over the showcase

pub mod dialog;
pub mod notices;

pub use dialog::{Dialog, DialogSize};
pub use notices::{notice_area, NoticeStackWidget};
