//! UI Components
//!
//! Leptos components for the group page.

mod create_list_modal;
mod group_page;
mod list_card;
mod search_header;
mod slot_notice;

pub use create_list_modal::CreateListModal;
pub use group_page::GroupPage;
pub use list_card::{CreateListCard, ListCard};
pub use search_header::SearchHeader;
pub use slot_notice::SlotNotice;
