//! UI Components
//!
//! Screens and reusable Leptos components.

mod header;
mod home;
mod city_page;
mod item_card;
mod sortable_list;
mod star_rating;
mod priority_badge;
mod user_notes;
mod filter_panel;
mod active_filters;
mod admin_panel;
mod admin_form;
mod admin_manage;
mod delete_confirm_button;
mod loading_skeleton;
mod about;

pub use header::Header;
pub use home::HomePage;
pub use city_page::CityPage;
pub use item_card::ItemCard;
pub use sortable_list::SortableList;
pub use star_rating::StarRating;
pub use priority_badge::{PriorityBadge, PriorityButtons};
pub use user_notes::UserNotes;
pub use filter_panel::FilterPanel;
pub use active_filters::ActiveFilters;
pub use admin_panel::AdminPage;
pub use admin_form::{AdminItemForm, AdminSearch};
pub use admin_manage::ManagePage;
pub use delete_confirm_button::DeleteConfirmButton;
pub use loading_skeleton::LoadingSkeleton;
pub use about::AboutPage;
