pub mod panel;
pub mod table;

pub(crate) use panel::visible_width;
