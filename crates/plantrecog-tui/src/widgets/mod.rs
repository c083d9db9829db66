//! Custom widget components

mod alert_dialog;
mod camera_panel;
mod class_list;
mod gallery_picker;
mod header;
pub mod modal_overlay;
mod result_view;
mod splash;
mod status_bar;

pub use alert_dialog::AlertDialog;
pub use camera_panel::CameraPanel;
pub use class_list::ClassList;
pub use gallery_picker::GalleryPicker;
pub use header::MainHeader;
pub use result_view::{result_content, ResultBody, ResultContent, ResultView, IDLE_CAPTION};
pub use splash::Splash;
pub use status_bar::StatusBar;
