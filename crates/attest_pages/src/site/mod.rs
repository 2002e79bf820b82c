//! Page content
//!
//! One module per route. Each builds its page top to bottom on a
//! [`PageBuilder`]; everything here is literal copy.

mod about;
mod contact;
mod home;
mod partners;
mod platform;
mod resources;
mod solutions;

use crate::page::PageBuilder;
use crate::route::Route;

/// Element id of the contact form on the contact page
pub const CONTACT_FORM: &str = "contact-form";

pub(crate) fn build(route: Route, page: &mut PageBuilder<'_>) {
    match route {
        Route::Home => home::build(page),
        Route::About => about::build(page),
        Route::Contact => contact::build(page),
        Route::Platform => platform::build(page),
        Route::Partners => partners::build(page),
        Route::Resources => resources::build(page),
        Route::Solutions => solutions::build(page),
    }
}
