pub mod datetime;
pub mod html;
pub mod pager;
pub mod url;
