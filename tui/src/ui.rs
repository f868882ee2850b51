mod layout;
mod widgets;

pub use layout::render;
pub use widgets::{
    render_favorites,
    render_header,
    render_help_overlay,
    render_home,
    render_nav_bar,
    render_status_bar,
};
